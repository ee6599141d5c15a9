//! Transfer phase: send the binary and symbols to their upload URLs
//!
//! The two transfers are independent, so they run concurrently. Each one
//! reports its own outcome before the phase result is decided.

use crate::error::Result;
use crate::pipeline::tasks::{PhaseTask, log_failure, missing, require};
use crate::pipeline::{Phase, ProgressCallback};
use crate::service::AppCenterService;
use crate::types::UploadRequest;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

const PHASE: &str = "upload resources";

/// Transfers the release binary and, when a symbol session exists, the symbols
pub struct UploadResourcesTask {
    service: Arc<dyn AppCenterService>,
    progress: Arc<dyn ProgressCallback>,
}

impl UploadResourcesTask {
    /// Create the task
    pub fn new(service: Arc<dyn AppCenterService>, progress: Arc<dyn ProgressCallback>) -> Self {
        Self { service, progress }
    }

    async fn upload_app(&self, upload_url: &str, path: &Path) -> Result<()> {
        const CONTEXT: &str = "Uploading app to resource";
        self.progress.on_message(&format!("{CONTEXT}.")).await;

        match self.service.upload_release_asset(upload_url, path).await {
            Ok(()) => {
                self.progress
                    .on_message(&format!("{CONTEXT} successful."))
                    .await;
                Ok(())
            }
            Err(e) => Err(log_failure(self.progress.as_ref(), CONTEXT, e).await),
        }
    }

    async fn upload_symbols(&self, upload_url: &str, path: &Path) -> Result<()> {
        const CONTEXT: &str = "Uploading symbols to resource";
        self.progress.on_message(&format!("{CONTEXT}.")).await;

        match self.service.upload_symbol_asset(upload_url, path).await {
            Ok(()) => {
                self.progress
                    .on_message(&format!("{CONTEXT} successful."))
                    .await;
                Ok(())
            }
            Err(e) => Err(log_failure(self.progress.as_ref(), CONTEXT, e).await),
        }
    }
}

#[async_trait]
impl PhaseTask for UploadResourcesTask {
    fn phase(&self) -> Phase {
        Phase::UploadingResources
    }

    fn describe(&self, request: &UploadRequest) -> Vec<String> {
        let mut ops = vec![format!("upload {}", request.app_path.display())];
        if let Some(symbols) = &request.symbols {
            ops.push(format!("upload {}", symbols.path.display()));
        }
        ops
    }

    async fn execute(&self, request: UploadRequest) -> Result<UploadRequest> {
        let upload_url = require(request.upload_url.as_deref(), PHASE, "upload_url")?;

        let symbol_target = if request.symbol_upload_id.is_some() {
            let url = require(
                request.symbol_upload_url.as_deref(),
                PHASE,
                "symbol_upload_url",
            )?;
            let symbols = request
                .symbols
                .as_ref()
                .ok_or_else(|| missing(PHASE, "symbols"))?;
            Some((url, symbols.path.as_path()))
        } else {
            None
        };

        let app = self.upload_app(upload_url, &request.app_path);
        let symbols = async {
            match symbol_target {
                Some((url, path)) => self.upload_symbols(url, path).await,
                None => Ok(()),
            }
        };

        let (app_result, symbol_result) = tokio::join!(app, symbols);
        app_result?;
        symbol_result?;

        Ok(request)
    }
}
