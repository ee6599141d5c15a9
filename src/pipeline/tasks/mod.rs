//! Phase tasks
//!
//! Each task turns one [`UploadRequest`] snapshot into the next by making one
//! remote call, or a short fixed sequence of them.

mod commit;
mod create;
mod distribute;
mod transfer;

pub use commit::CommitUploadResourceTask;
pub use create::CreateUploadResourceTask;
pub use distribute::DistributeReleaseTask;
pub use transfer::UploadResourcesTask;

use crate::error::{Error, Result};
use crate::pipeline::{Phase, ProgressCallback};
use crate::types::UploadRequest;
use async_trait::async_trait;
use tracing::{error, warn};

/// One step of the upload pipeline
#[async_trait]
pub trait PhaseTask: Send + Sync {
    /// Phase reported before the task runs
    fn phase(&self) -> Phase;

    /// Remote operations this task would perform for `request`, for dry runs
    fn describe(&self, request: &UploadRequest) -> Vec<String>;

    /// Run the task, returning the next request snapshot
    async fn execute(&self, request: UploadRequest) -> Result<UploadRequest>;
}

/// Report a failed remote call and wrap it for propagation
///
/// The returned error's message is exactly the line handed to the sink.
pub(crate) async fn log_failure(
    progress: &dyn ProgressCallback,
    context: &str,
    cause: Error,
) -> Error {
    let message = format!("{context} unsuccessful: {cause}");
    warn!("{message}");
    let err = Error::Upload {
        message,
        source: Box::new(cause),
    };
    progress.on_error(&err).await;
    err
}

/// Take a required identifier or fail with a precondition fault
pub(crate) fn require<'a>(
    value: Option<&'a str>,
    phase: &'static str,
    field: &'static str,
) -> Result<&'a str> {
    value.ok_or_else(|| missing(phase, field))
}

/// Precondition fault for an absent field
pub(crate) fn missing(phase: &'static str, field: &'static str) -> Error {
    error!("{phase} started without {field}; the pipeline is assembled out of order");
    Error::MissingField { phase, field }
}
