//! Upload pipeline
//!
//! Drives an artifact through the remote phases:
//! 1. Create - open the binary (and symbol) upload sessions
//! 2. Transfer - send the bytes
//! 3. Commit - finish the sessions, obtaining the release id
//! 4. Distribute - release to groups, when any are configured

mod progress;
mod runner;
pub mod tasks;

pub use progress::{NoopProgress, Phase, ProgressCallback};
pub use runner::UploadPipeline;
pub use tasks::{
    CommitUploadResourceTask, CreateUploadResourceTask, DistributeReleaseTask, PhaseTask,
    UploadResourcesTask,
};
