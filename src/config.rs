//! Upload and service configuration

use crate::error::{Error, Result};
use crate::service::DEFAULT_BASE_URL;
use crate::types::{SymbolArtifact, UploadRequest};
use std::fmt;
use std::path::PathBuf;

/// Where to reach the service and how to authenticate
#[derive(Clone)]
pub struct ServiceConfig {
    /// API endpoint
    pub base_url: String,
    /// API token sent with every service call
    pub token: String,
}

impl ServiceConfig {
    /// Config for the public endpoint
    pub fn new(token: String) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token,
        }
    }

    /// Override the endpoint
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// What to upload and where to distribute it
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Owner (user or organization) of the target app
    pub owner: String,
    /// Target app name
    pub app: String,
    /// Release binary
    pub app_path: PathBuf,
    /// Optional debug symbols
    pub symbols: Option<SymbolArtifact>,
    /// Distribution group names
    pub destination_groups: Vec<String>,
    /// Release notes
    pub release_notes: String,
    /// Email testers about the release
    pub notify_testers: bool,
    /// Force installs to update
    pub mandatory_update: bool,
}

impl UploadConfig {
    /// Check the configuration before any remote call is made
    pub fn validate(&self) -> Result<()> {
        if self.owner.trim().is_empty() {
            return Err(Error::Config("owner name cannot be empty".to_string()));
        }
        if self.app.trim().is_empty() {
            return Err(Error::Config("app name cannot be empty".to_string()));
        }
        if !self.app_path.is_file() {
            return Err(Error::Config(format!(
                "app file not found: {}",
                self.app_path.display()
            )));
        }
        if let Some(symbols) = &self.symbols {
            if !symbols.path.is_file() {
                return Err(Error::Config(format!(
                    "symbol file not found: {}",
                    symbols.path.display()
                )));
            }
        }
        if self.destination_groups.iter().any(|g| g.trim().is_empty()) {
            return Err(Error::Config(
                "destination group names cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the initial request the pipeline starts from
    pub fn to_request(&self) -> UploadRequest {
        let mut request = UploadRequest::new(&self.owner, &self.app, &self.app_path)
            .with_release_notes(&self.release_notes)
            .with_destination_groups(self.destination_groups.clone())
            .with_notify_testers(self.notify_testers)
            .with_mandatory_update(self.mandatory_update);
        if let Some(symbols) = &self.symbols {
            request = request.with_symbols(symbols.clone());
        }
        request
    }
}
