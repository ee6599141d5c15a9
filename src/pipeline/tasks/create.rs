//! Create phase: open the upload sessions

use crate::error::Result;
use crate::pipeline::tasks::{PhaseTask, log_failure};
use crate::pipeline::{Phase, ProgressCallback};
use crate::service::{AppCenterService, SymbolUploadBeginRequest};
use crate::types::{SymbolArtifact, UploadRequest};
use async_trait::async_trait;
use std::sync::Arc;

/// Opens the binary upload session, then the symbol session if symbols are configured
pub struct CreateUploadResourceTask {
    service: Arc<dyn AppCenterService>,
    progress: Arc<dyn ProgressCallback>,
}

impl CreateUploadResourceTask {
    /// Create the task
    pub fn new(service: Arc<dyn AppCenterService>, progress: Arc<dyn ProgressCallback>) -> Self {
        Self { service, progress }
    }

    async fn create_app_resource(&self, request: UploadRequest) -> Result<UploadRequest> {
        const CONTEXT: &str = "Creating an upload resource for app";
        self.progress.on_message(&format!("{CONTEXT}.")).await;

        match self
            .service
            .begin_release_upload(&request.owner_name, &request.app_name)
            .await
        {
            Ok(begin) => {
                self.progress
                    .on_message(&format!("{CONTEXT} successful."))
                    .await;
                Ok(request.with_upload(begin.upload_id, begin.upload_url))
            }
            Err(e) => Err(log_failure(self.progress.as_ref(), CONTEXT, e).await),
        }
    }

    async fn create_symbol_resource(
        &self,
        request: UploadRequest,
        symbols: &SymbolArtifact,
    ) -> Result<UploadRequest> {
        const CONTEXT: &str = "Creating an upload resource for debug symbols";
        self.progress.on_message(&format!("{CONTEXT}.")).await;

        let begin_request = SymbolUploadBeginRequest {
            symbol_type: symbols.symbol_type,
            file_name: symbols.file_name(),
        };

        match self
            .service
            .begin_symbol_upload(&request.owner_name, &request.app_name, &begin_request)
            .await
        {
            Ok(begin) => {
                self.progress
                    .on_message(&format!("{CONTEXT} successful."))
                    .await;
                if let Some(expires) = begin.expiration_date {
                    tracing::debug!("symbol upload URL expires at {expires}");
                }
                Ok(request.with_symbol_upload(begin.symbol_upload_id, begin.upload_url))
            }
            Err(e) => Err(log_failure(self.progress.as_ref(), CONTEXT, e).await),
        }
    }
}

#[async_trait]
impl PhaseTask for CreateUploadResourceTask {
    fn phase(&self) -> Phase {
        Phase::CreatingUploadResource
    }

    fn describe(&self, request: &UploadRequest) -> Vec<String> {
        let mut ops = vec![format!(
            "begin release upload for {}/{}",
            request.owner_name, request.app_name
        )];
        if let Some(symbols) = &request.symbols {
            ops.push(format!(
                "begin {} symbol upload for {}",
                symbols.symbol_type,
                symbols.file_name()
            ));
        }
        ops
    }

    async fn execute(&self, request: UploadRequest) -> Result<UploadRequest> {
        let request = self.create_app_resource(request).await?;
        match request.symbols.clone() {
            Some(symbols) => self.create_symbol_resource(request, &symbols).await,
            None => Ok(request),
        }
    }
}
