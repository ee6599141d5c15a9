//! App Center service client
//!
//! The pipeline only talks to the service through [`AppCenterService`], so
//! tests can substitute a mock and the HTTP client stays swappable.

mod factory;
mod http;

pub use factory::create_service;
pub use http::{DEFAULT_BASE_URL, HttpAppCenterService};

use crate::error::Result;
use crate::types::{SymbolType, UploadStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Response to beginning a release upload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseUploadBegin {
    /// Upload session identifier
    pub upload_id: String,
    /// Where the binary should be sent
    pub upload_url: String,
}

/// Request body for beginning a symbol upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolUploadBeginRequest {
    /// Kind of symbols being uploaded
    pub symbol_type: SymbolType,
    /// Name of the symbol file
    pub file_name: String,
}

/// Response to beginning a symbol upload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SymbolUploadBegin {
    /// Symbol upload session identifier
    pub symbol_upload_id: String,
    /// Where the symbols should be sent
    pub upload_url: String,
    /// When the upload URL stops accepting data
    #[serde(default)]
    pub expiration_date: Option<DateTime<Utc>>,
}

/// Response to completing a release upload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseUploadEnd {
    /// Release created from the committed binary
    #[serde(deserialize_with = "string_or_number")]
    pub release_id: String,
    /// API location of the release
    #[serde(default)]
    pub release_url: Option<String>,
}

/// A distribution group destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    /// Group name
    pub name: String,
}

/// Release details sent when distributing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseDetails {
    /// Release notes shown to testers
    pub release_notes: String,
    /// Whether installs must update
    pub mandatory_update: bool,
    /// Groups receiving the release
    pub destinations: Vec<Destination>,
    /// Whether testers get an email
    pub notify_testers: bool,
}

/// App Center operations used by the upload pipeline
///
/// Each method is a single remote call. Implementations must not retry.
#[async_trait]
pub trait AppCenterService: Send + Sync {
    /// Open a binary upload session
    async fn begin_release_upload(&self, owner: &str, app: &str) -> Result<ReleaseUploadBegin>;

    /// Open a symbol upload session
    async fn begin_symbol_upload(
        &self,
        owner: &str,
        app: &str,
        request: &SymbolUploadBeginRequest,
    ) -> Result<SymbolUploadBegin>;

    /// Send the release binary to its upload URL
    async fn upload_release_asset(&self, upload_url: &str, path: &Path) -> Result<()>;

    /// Send the symbol file to its upload URL
    async fn upload_symbol_asset(&self, upload_url: &str, path: &Path) -> Result<()>;

    /// Finish a binary upload session
    async fn complete_release_upload(
        &self,
        owner: &str,
        app: &str,
        upload_id: &str,
        status: UploadStatus,
    ) -> Result<ReleaseUploadEnd>;

    /// Finish a symbol upload session
    async fn complete_symbol_upload(
        &self,
        owner: &str,
        app: &str,
        symbol_upload_id: &str,
        status: UploadStatus,
    ) -> Result<()>;

    /// Release a committed build to distribution groups
    async fn distribute_release(
        &self,
        owner: &str,
        app: &str,
        release_id: &str,
        details: &ReleaseDetails,
    ) -> Result<()>;
}

// The service has returned release ids both as JSON numbers and strings.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_upload_end_numeric_id() {
        let end: ReleaseUploadEnd = serde_json::from_str(r#"{"release_id": 42}"#).unwrap();
        assert_eq!(end.release_id, "42");
        assert!(end.release_url.is_none());
    }

    #[test]
    fn test_release_upload_end_string_id() {
        let end: ReleaseUploadEnd = serde_json::from_str(
            r#"{"release_id": "r1", "release_url": "v0.1/apps/acme/widget/releases/r1"}"#,
        )
        .unwrap();
        assert_eq!(end.release_id, "r1");
        assert_eq!(
            end.release_url.as_deref(),
            Some("v0.1/apps/acme/widget/releases/r1")
        );
    }

    #[test]
    fn test_symbol_upload_begin_request_body() {
        let body = serde_json::to_value(SymbolUploadBeginRequest {
            symbol_type: SymbolType::Apple,
            file_name: "app.dSYM.zip".to_string(),
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"symbol_type": "Apple", "file_name": "app.dSYM.zip"})
        );
    }
}
