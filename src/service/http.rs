//! App Center service implementation over HTTP

use crate::error::{Error, Result};
use crate::service::{
    AppCenterService, ReleaseDetails, ReleaseUploadBegin, ReleaseUploadEnd, SymbolUploadBegin,
    SymbolUploadBeginRequest,
};
use crate::types::UploadStatus;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::header::CONTENT_LENGTH;
use reqwest::{Body, Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::debug;
use url::Url;

/// Public App Center API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.appcenter.ms/";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Asset transfers get far longer than metadata calls
const TRANSFER_TIMEOUT_SECS: u64 = 600;

const API_TOKEN_HEADER: &str = "X-API-Token";

#[derive(Serialize)]
struct UploadEndPayload {
    status: UploadStatus,
}

/// App Center service using reqwest
pub struct HttpAppCenterService {
    client: Client,
    token: String,
    base_url: Url,
}

impl HttpAppCenterService {
    /// Create a new service for the given endpoint
    pub fn new(base_url: &str, token: String) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid base URL {base_url}: {e}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            client,
            token,
            base_url,
        })
    }

    fn app_url(&self, owner: &str, app: &str, rest: &str) -> Result<Url> {
        let path = format!(
            "v0.1/apps/{}/{}/{rest}",
            urlencoding::encode(owner),
            urlencoding::encode(app)
        );
        self.base_url
            .join(&path)
            .map_err(|e| Error::Internal(format!("failed to build API URL: {e}")))
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let response = Self::check(req.header(API_TOKEN_HEADER, &self.token).send().await?).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_empty(&self, req: RequestBuilder) -> Result<()> {
        Self::check(req.header(API_TOKEN_HEADER, &self.token).send().await?).await?;
        Ok(())
    }

    /// Open `path` as a streaming request body, with its length
    async fn file_body(path: &Path) -> Result<(Body, u64)> {
        let file = File::open(path).await?;
        let len = file.metadata().await?.len();
        Ok((Body::wrap_stream(ReaderStream::new(file)), len))
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::ServiceApi(format!("{status}: {body}")))
    }
}

#[async_trait]
impl AppCenterService for HttpAppCenterService {
    async fn begin_release_upload(&self, owner: &str, app: &str) -> Result<ReleaseUploadBegin> {
        let url = self.app_url(owner, app, "release_uploads")?;
        debug!("POST {url}");

        self.send_json(self.client.post(url).json(&serde_json::json!({})))
            .await
    }

    async fn begin_symbol_upload(
        &self,
        owner: &str,
        app: &str,
        request: &SymbolUploadBeginRequest,
    ) -> Result<SymbolUploadBegin> {
        let url = self.app_url(owner, app, "symbol_uploads")?;
        debug!("POST {url} ({})", request.symbol_type);

        self.send_json(self.client.post(url).json(request)).await
    }

    async fn upload_release_asset(&self, upload_url: &str, path: &Path) -> Result<()> {
        let (body, len) = Self::file_body(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!("POST {upload_url} ({len} bytes)");

        let form = Form::new().part(
            "ipa",
            Part::stream_with_length(body, len).file_name(file_name),
        );
        let response = self
            .client
            .post(upload_url)
            .timeout(Duration::from_secs(TRANSFER_TIMEOUT_SECS))
            .multipart(form)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn upload_symbol_asset(&self, upload_url: &str, path: &Path) -> Result<()> {
        let (body, len) = Self::file_body(path).await?;
        debug!("PUT {upload_url} ({len} bytes)");

        // block blobs reject chunked uploads
        let response = self
            .client
            .put(upload_url)
            .timeout(Duration::from_secs(TRANSFER_TIMEOUT_SECS))
            .header("x-ms-blob-type", "BlockBlob")
            .header(CONTENT_LENGTH, len)
            .body(body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn complete_release_upload(
        &self,
        owner: &str,
        app: &str,
        upload_id: &str,
        status: UploadStatus,
    ) -> Result<ReleaseUploadEnd> {
        let url = self.app_url(
            owner,
            app,
            &format!("release_uploads/{}", urlencoding::encode(upload_id)),
        )?;
        debug!("PATCH {url}");

        self.send_json(self.client.patch(url).json(&UploadEndPayload { status }))
            .await
    }

    async fn complete_symbol_upload(
        &self,
        owner: &str,
        app: &str,
        symbol_upload_id: &str,
        status: UploadStatus,
    ) -> Result<()> {
        let url = self.app_url(
            owner,
            app,
            &format!("symbol_uploads/{}", urlencoding::encode(symbol_upload_id)),
        )?;
        debug!("PATCH {url}");

        self.send_empty(self.client.patch(url).json(&UploadEndPayload { status }))
            .await
    }

    async fn distribute_release(
        &self,
        owner: &str,
        app: &str,
        release_id: &str,
        details: &ReleaseDetails,
    ) -> Result<()> {
        let url = self.app_url(
            owner,
            app,
            &format!("releases/{}", urlencoding::encode(release_id)),
        )?;
        debug!("PATCH {url} ({} destinations)", details.destinations.len());

        self.send_empty(self.client.patch(url).json(details)).await
    }
}
