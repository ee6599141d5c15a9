//! Commit phase
//!
//! Finishes the binary upload session and, when one was opened, the symbol
//! upload session. The two commits are sequential: symbols are only
//! committed once the binary commit has succeeded.

use crate::error::{Error, Result};
use crate::pipeline::tasks::{PhaseTask, log_failure, require};
use crate::pipeline::{Phase, ProgressCallback};
use crate::service::AppCenterService;
use crate::types::{UploadRequest, UploadStatus};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

const PHASE: &str = "commit upload resource";

/// Commit state machine
#[derive(Debug)]
enum CommitState {
    Idle(UploadRequest),
    AppCommitting {
        request: UploadRequest,
        upload_id: String,
        symbol_upload_id: Option<String>,
    },
    SymbolCommitting {
        request: UploadRequest,
        symbol_upload_id: String,
    },
    Done(UploadRequest),
    Failed(Error),
}

impl CommitState {
    /// Leave `Idle`. Whether symbols get committed is fixed here, from the
    /// input snapshot, and never re-read after the app commit.
    fn start(request: UploadRequest) -> Self {
        let upload_id = match require(request.upload_id.as_deref(), PHASE, "upload_id") {
            Ok(id) => id.to_string(),
            Err(e) => return Self::Failed(e),
        };
        let symbol_upload_id = request.symbol_upload_id.clone();
        Self::AppCommitting {
            request,
            upload_id,
            symbol_upload_id,
        }
    }

    const fn name(&self) -> &'static str {
        match self {
            Self::Idle(_) => "idle",
            Self::AppCommitting { .. } => "app-committing",
            Self::SymbolCommitting { .. } => "symbol-committing",
            Self::Done(_) => "done",
            Self::Failed(_) => "failed",
        }
    }
}

/// Commits the app resource, then the symbol resource if there is one
pub struct CommitUploadResourceTask {
    service: Arc<dyn AppCenterService>,
    progress: Arc<dyn ProgressCallback>,
}

impl CommitUploadResourceTask {
    /// Create the task
    pub fn new(service: Arc<dyn AppCenterService>, progress: Arc<dyn ProgressCallback>) -> Self {
        Self { service, progress }
    }

    async fn advance(&self, state: CommitState) -> CommitState {
        match state {
            CommitState::Idle(request) => CommitState::start(request),
            CommitState::AppCommitting {
                request,
                upload_id,
                symbol_upload_id,
            } => match self.commit_app(request, &upload_id).await {
                Ok(request) => match symbol_upload_id {
                    Some(symbol_upload_id) => CommitState::SymbolCommitting {
                        request,
                        symbol_upload_id,
                    },
                    None => CommitState::Done(request),
                },
                Err(e) => CommitState::Failed(e),
            },
            CommitState::SymbolCommitting {
                request,
                symbol_upload_id,
            } => match self.commit_symbols(request, &symbol_upload_id).await {
                Ok(request) => CommitState::Done(request),
                Err(e) => CommitState::Failed(e),
            },
            terminal @ (CommitState::Done(_) | CommitState::Failed(_)) => terminal,
        }
    }

    async fn commit_app(&self, request: UploadRequest, upload_id: &str) -> Result<UploadRequest> {
        self.progress.on_message("Committing app resource.").await;

        match self
            .service
            .complete_release_upload(
                &request.owner_name,
                &request.app_name,
                upload_id,
                UploadStatus::Committed,
            )
            .await
        {
            Ok(end) => {
                self.progress
                    .on_message("Committing app resource successful.")
                    .await;
                Ok(request.with_release_id(end.release_id))
            }
            Err(e) => Err(log_failure(self.progress.as_ref(), "Committing app resource", e).await),
        }
    }

    async fn commit_symbols(
        &self,
        request: UploadRequest,
        symbol_upload_id: &str,
    ) -> Result<UploadRequest> {
        self.progress.on_message("Committing symbol resource.").await;

        match self
            .service
            .complete_symbol_upload(
                &request.owner_name,
                &request.app_name,
                symbol_upload_id,
                UploadStatus::Committed,
            )
            .await
        {
            Ok(()) => {
                self.progress
                    .on_message("Committing symbol resource successful.")
                    .await;
                Ok(request)
            }
            Err(e) => {
                Err(log_failure(self.progress.as_ref(), "Committing symbol resource", e).await)
            }
        }
    }
}

#[async_trait]
impl PhaseTask for CommitUploadResourceTask {
    fn phase(&self) -> Phase {
        Phase::Committing
    }

    fn describe(&self, request: &UploadRequest) -> Vec<String> {
        let mut ops = vec!["commit app resource".to_string()];
        if request.symbol_upload_id.is_some() || request.symbols.is_some() {
            ops.push("commit symbol resource".to_string());
        }
        ops
    }

    async fn execute(&self, request: UploadRequest) -> Result<UploadRequest> {
        let mut state = CommitState::Idle(request);
        loop {
            state = match self.advance(state).await {
                CommitState::Done(request) => return Ok(request),
                CommitState::Failed(err) => return Err(err),
                next => {
                    debug!("commit: entering {}", next.name());
                    next
                }
            };
        }
    }
}
