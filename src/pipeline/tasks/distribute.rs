//! Distribute phase: release the committed build to groups

use crate::error::Result;
use crate::pipeline::tasks::{PhaseTask, log_failure, require};
use crate::pipeline::{Phase, ProgressCallback};
use crate::service::{AppCenterService, Destination, ReleaseDetails};
use crate::types::UploadRequest;
use async_trait::async_trait;
use std::sync::Arc;

const PHASE: &str = "distribute release";
const CONTEXT: &str = "Distributing release";

/// Sends the release to the configured distribution groups
pub struct DistributeReleaseTask {
    service: Arc<dyn AppCenterService>,
    progress: Arc<dyn ProgressCallback>,
}

impl DistributeReleaseTask {
    /// Create the task
    pub fn new(service: Arc<dyn AppCenterService>, progress: Arc<dyn ProgressCallback>) -> Self {
        Self { service, progress }
    }
}

fn release_details(request: &UploadRequest) -> ReleaseDetails {
    ReleaseDetails {
        release_notes: request.release_notes.clone(),
        mandatory_update: request.mandatory_update,
        destinations: request
            .destination_groups
            .iter()
            .map(|name| Destination { name: name.clone() })
            .collect(),
        notify_testers: request.notify_testers,
    }
}

#[async_trait]
impl PhaseTask for DistributeReleaseTask {
    fn phase(&self) -> Phase {
        Phase::Distributing
    }

    fn describe(&self, request: &UploadRequest) -> Vec<String> {
        if request.destination_groups.is_empty() {
            return vec![];
        }
        vec![format!(
            "distribute release to {}",
            request.destination_groups.join(", ")
        )]
    }

    async fn execute(&self, request: UploadRequest) -> Result<UploadRequest> {
        if request.destination_groups.is_empty() {
            self.progress
                .on_message("No destination groups configured, skipping distribution.")
                .await;
            return Ok(request);
        }

        let release_id = require(request.release_id.as_deref(), PHASE, "release_id")?;
        self.progress.on_message(&format!("{CONTEXT}.")).await;

        match self
            .service
            .distribute_release(
                &request.owner_name,
                &request.app_name,
                release_id,
                &release_details(&request),
            )
            .await
        {
            Ok(()) => {
                self.progress
                    .on_message(&format!("{CONTEXT} successful."))
                    .await;
                Ok(request)
            }
            Err(e) => Err(log_failure(self.progress.as_ref(), CONTEXT, e).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_details_from_request() {
        let request = UploadRequest::new("acme", "widget", "app.apk")
            .with_destination_groups(vec!["Beta".to_string(), "QA".to_string()])
            .with_release_notes("Bug fixes")
            .with_notify_testers(true);

        let details = release_details(&request);
        assert_eq!(details.release_notes, "Bug fixes");
        assert!(details.notify_testers);
        assert!(!details.mandatory_update);
        assert_eq!(
            details.destinations,
            vec![
                Destination {
                    name: "Beta".to_string()
                },
                Destination {
                    name: "QA".to_string()
                },
            ]
        );
    }
}
