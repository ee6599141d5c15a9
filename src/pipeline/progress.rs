//! Progress callback trait for interface-agnostic updates
//!
//! This trait allows different interfaces (CLI, CI log, tests) to receive
//! the diagnostic lines written while an upload runs.

use crate::error::Error;
use async_trait::async_trait;
use std::fmt;

/// Upload pipeline phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Opening upload sessions
    CreatingUploadResource,
    /// Transferring the binary and symbols
    UploadingResources,
    /// Committing the upload sessions
    Committing,
    /// Releasing to distribution groups
    Distributing,
    /// Upload complete
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CreatingUploadResource => "Creating upload resources",
            Self::UploadingResources => "Uploading resources",
            Self::Committing => "Committing upload",
            Self::Distributing => "Distributing release",
            Self::Complete => "Done",
        };
        f.write_str(label)
    }
}

/// Progress callback trait
///
/// The message text passed to these methods is operator-facing output and
/// is scraped by CI log tooling, so it must stay stable.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called with a "starting" or "successful" line
    async fn on_message(&self, message: &str);

    /// Called once when a remote call fails, with the wrapped error
    async fn on_error(&self, error: &Error);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_message(&self, _message: &str) {}
    async fn on_error(&self, _error: &Error) {}
}
