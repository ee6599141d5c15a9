//! Core types for appcenter-upload

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::Error;

/// Status sent when finishing an upload session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    /// The uploaded bytes are final and should be processed
    Committed,
}

/// Kind of debug symbols accepted by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolType {
    /// dSYM bundles
    Apple,
    /// Proguard/R8 mapping files
    #[serde(rename = "AndroidProguard")]
    Android,
    /// Breakpad symbol files
    Breakpad,
    /// Windows PDB files
    #[serde(rename = "UWP")]
    Uwp,
    /// JavaScript source maps
    JavaScript,
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Apple => "apple",
            Self::Android => "android",
            Self::Breakpad => "breakpad",
            Self::Uwp => "uwp",
            Self::JavaScript => "javascript",
        };
        f.write_str(name)
    }
}

impl FromStr for SymbolType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "apple" => Ok(Self::Apple),
            "android" | "androidproguard" => Ok(Self::Android),
            "breakpad" => Ok(Self::Breakpad),
            "uwp" => Ok(Self::Uwp),
            "javascript" => Ok(Self::JavaScript),
            other => Err(Error::Config(format!("unknown symbol type: {other}"))),
        }
    }
}

/// Debug symbols uploaded alongside the release binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolArtifact {
    /// Path to the symbol file or archive
    pub path: PathBuf,
    /// Kind of symbols
    pub symbol_type: SymbolType,
}

impl SymbolArtifact {
    /// File name reported to the service when the symbol upload begins
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// State of a single upload, threaded through every pipeline phase
///
/// Each phase takes the request by value and hands back a new snapshot with
/// the identifiers it obtained. Fields are only ever added, never cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Owner (user or organization) of the target app
    pub owner_name: String,
    /// Target app name
    pub app_name: String,
    /// Release binary to upload
    pub app_path: PathBuf,
    /// Optional debug symbols
    pub symbols: Option<SymbolArtifact>,
    /// Release notes attached on distribution
    pub release_notes: String,
    /// Distribution groups to release to
    pub destination_groups: Vec<String>,
    /// Whether testers are notified of the new release
    pub notify_testers: bool,
    /// Whether the release is a mandatory update
    pub mandatory_update: bool,
    /// Binary upload session, set by the create phase
    pub upload_id: Option<String>,
    /// Where the binary is transferred to, set by the create phase
    pub upload_url: Option<String>,
    /// Symbol upload session; `None` means there are no symbols to commit
    pub symbol_upload_id: Option<String>,
    /// Where the symbols are transferred to
    pub symbol_upload_url: Option<String>,
    /// Release created by committing the binary upload
    pub release_id: Option<String>,
}

impl UploadRequest {
    /// Start a request for the given app and binary
    pub fn new(
        owner_name: impl Into<String>,
        app_name: impl Into<String>,
        app_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            owner_name: owner_name.into(),
            app_name: app_name.into(),
            app_path: app_path.into(),
            symbols: None,
            release_notes: String::new(),
            destination_groups: Vec::new(),
            notify_testers: false,
            mandatory_update: false,
            upload_id: None,
            upload_url: None,
            symbol_upload_id: None,
            symbol_upload_url: None,
            release_id: None,
        }
    }

    /// Attach debug symbols to upload
    #[must_use]
    pub fn with_symbols(mut self, symbols: SymbolArtifact) -> Self {
        self.symbols = Some(symbols);
        self
    }

    /// Set the release notes
    #[must_use]
    pub fn with_release_notes(mut self, notes: impl Into<String>) -> Self {
        self.release_notes = notes.into();
        self
    }

    /// Set the distribution groups
    #[must_use]
    pub fn with_destination_groups(mut self, groups: Vec<String>) -> Self {
        self.destination_groups = groups;
        self
    }

    /// Set whether testers are notified
    #[must_use]
    pub const fn with_notify_testers(mut self, notify: bool) -> Self {
        self.notify_testers = notify;
        self
    }

    /// Mark the release as a mandatory update
    #[must_use]
    pub const fn with_mandatory_update(mut self, mandatory: bool) -> Self {
        self.mandatory_update = mandatory;
        self
    }

    /// Record the binary upload session
    #[must_use]
    pub fn with_upload(
        mut self,
        upload_id: impl Into<String>,
        upload_url: impl Into<String>,
    ) -> Self {
        self.upload_id = Some(upload_id.into());
        self.upload_url = Some(upload_url.into());
        self
    }

    /// Record the symbol upload session
    #[must_use]
    pub fn with_symbol_upload(
        mut self,
        symbol_upload_id: impl Into<String>,
        symbol_upload_url: impl Into<String>,
    ) -> Self {
        self.symbol_upload_id = Some(symbol_upload_id.into());
        self.symbol_upload_url = Some(symbol_upload_url.into());
        self
    }

    /// Record the release created by the binary commit
    #[must_use]
    pub fn with_release_id(mut self, release_id: impl Into<String>) -> Self {
        self.release_id = Some(release_id.into());
        self
    }
}
