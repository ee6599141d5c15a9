//! Pipeline runner
//!
//! Feeds the request through an ordered list of phase tasks, stopping at
//! the first failure.

use crate::error::Result;
use crate::pipeline::tasks::{
    CommitUploadResourceTask, CreateUploadResourceTask, DistributeReleaseTask, PhaseTask,
    UploadResourcesTask,
};
use crate::pipeline::{Phase, ProgressCallback};
use crate::service::AppCenterService;
use crate::types::UploadRequest;
use std::sync::Arc;
use tracing::{Instrument, debug, info_span};

/// An ordered chain of phase tasks
pub struct UploadPipeline {
    tasks: Vec<Box<dyn PhaseTask>>,
    progress: Arc<dyn ProgressCallback>,
}

impl UploadPipeline {
    /// Build a pipeline from explicit tasks
    pub fn new(tasks: Vec<Box<dyn PhaseTask>>, progress: Arc<dyn ProgressCallback>) -> Self {
        Self { tasks, progress }
    }

    /// The full upload: create, transfer, commit, distribute
    pub fn standard(
        service: Arc<dyn AppCenterService>,
        progress: Arc<dyn ProgressCallback>,
    ) -> Self {
        let tasks: Vec<Box<dyn PhaseTask>> = vec![
            Box::new(CreateUploadResourceTask::new(
                Arc::clone(&service),
                Arc::clone(&progress),
            )),
            Box::new(UploadResourcesTask::new(
                Arc::clone(&service),
                Arc::clone(&progress),
            )),
            Box::new(CommitUploadResourceTask::new(
                Arc::clone(&service),
                Arc::clone(&progress),
            )),
            Box::new(DistributeReleaseTask::new(service, Arc::clone(&progress))),
        ];
        Self::new(tasks, progress)
    }

    /// Phases in execution order
    pub fn phases(&self) -> Vec<Phase> {
        self.tasks.iter().map(|t| t.phase()).collect()
    }

    /// Run every task in order
    ///
    /// Each task receives the previous task's output. The first failure is
    /// returned as-is; it has already been reported to the progress sink.
    pub async fn run(&self, request: UploadRequest) -> Result<UploadRequest> {
        let span = info_span!(
            "upload",
            owner = %request.owner_name,
            app = %request.app_name
        );

        async move {
            let mut request = request;
            for task in &self.tasks {
                let phase = task.phase();
                self.progress.on_phase(phase).await;
                debug!("running phase: {phase}");
                request = task.execute(request).await?;
            }
            self.progress.on_phase(Phase::Complete).await;
            Ok(request)
        }
        .instrument(span)
        .await
    }

    /// Report what would be done in a dry run
    pub async fn report_dry_run(&self, request: &UploadRequest) {
        self.progress
            .on_message("Dry run - no changes will be made")
            .await;

        for task in &self.tasks {
            let ops = task.describe(request);
            if ops.is_empty() {
                continue;
            }
            self.progress
                .on_message(&format!("Would run {}:", task.phase()))
                .await;
            for op in ops {
                self.progress.on_message(&format!("  - {op}")).await;
            }
        }
    }
}
