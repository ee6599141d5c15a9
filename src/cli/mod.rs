//! CLI commands
//!
//! Command implementations for the `appcenter-upload` binary.

mod progress;
mod style;
mod upload;

pub use upload::{UploadArgs, run_upload};
