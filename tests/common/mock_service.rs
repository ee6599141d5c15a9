//! Mock App Center service for testing
//!
//! These are test utilities - not every helper is used by every test binary.

#![allow(dead_code)]

use appcenter_upload::error::{Error, Result};
use appcenter_upload::service::{
    AppCenterService, ReleaseDetails, ReleaseUploadBegin, ReleaseUploadEnd, SymbolUploadBegin,
    SymbolUploadBeginRequest,
};
use appcenter_upload::types::UploadStatus;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// Remote operations the mock can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    BeginRelease,
    BeginSymbol,
    UploadRelease,
    UploadSymbol,
    CompleteRelease,
    CompleteSymbol,
    Distribute,
}

/// A recorded service call, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    BeginRelease {
        owner: String,
        app: String,
    },
    BeginSymbol {
        owner: String,
        app: String,
        request: SymbolUploadBeginRequest,
    },
    UploadRelease {
        url: String,
        path: PathBuf,
    },
    UploadSymbol {
        url: String,
        path: PathBuf,
    },
    CompleteRelease {
        owner: String,
        app: String,
        upload_id: String,
        status: UploadStatus,
    },
    /// Marks the moment the release commit future resolved
    CompleteReleaseResolved,
    CompleteSymbol {
        owner: String,
        app: String,
        symbol_upload_id: String,
        status: UploadStatus,
    },
    Distribute {
        release_id: String,
        details: ReleaseDetails,
    },
}

impl Call {
    pub const fn op(&self) -> Option<Op> {
        match self {
            Self::BeginRelease { .. } => Some(Op::BeginRelease),
            Self::BeginSymbol { .. } => Some(Op::BeginSymbol),
            Self::UploadRelease { .. } => Some(Op::UploadRelease),
            Self::UploadSymbol { .. } => Some(Op::UploadSymbol),
            Self::CompleteRelease { .. } => Some(Op::CompleteRelease),
            Self::CompleteReleaseResolved => None,
            Self::CompleteSymbol { .. } => Some(Op::CompleteSymbol),
            Self::Distribute { .. } => Some(Op::Distribute),
        }
    }
}

/// Simple mock App Center service
///
/// Features:
/// - Call tracking in arrival order
/// - Configurable identifiers returned by the service
/// - Error injection per operation
/// - Optional delay before the release commit resolves
pub struct MockAppCenterService {
    calls: Mutex<Vec<Call>>,
    errors: Mutex<HashMap<Op, String>>,
    release_id: Mutex<String>,
    release_commit_delay: Mutex<Option<Duration>>,
}

impl Default for MockAppCenterService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAppCenterService {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            errors: Mutex::new(HashMap::new()),
            release_id: Mutex::new("r1".to_string()),
            release_commit_delay: Mutex::new(None),
        }
    }

    // === Configuration ===

    /// Make `op` return a service error with `msg`
    pub fn fail(&self, op: Op, msg: &str) {
        self.errors.lock().unwrap().insert(op, msg.to_string());
    }

    /// Release id returned by the release commit
    pub fn set_release_id(&self, release_id: &str) {
        *self.release_id.lock().unwrap() = release_id.to_string();
    }

    /// Delay the release commit response
    pub fn delay_release_commit(&self, delay: Duration) {
        *self.release_commit_delay.lock().unwrap() = Some(delay);
    }

    // === Call verification ===

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Operations in call order
    pub fn ops(&self) -> Vec<Op> {
        self.calls().iter().filter_map(Call::op).collect()
    }

    pub fn call_count(&self, op: Op) -> usize {
        self.ops().iter().filter(|o| **o == op).count()
    }

    pub fn assert_not_called(&self, op: Op) {
        let ops = self.ops();
        assert!(
            !ops.contains(&op),
            "Expected {op:?} to never be called but got: {ops:?}"
        );
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, op: Op) -> Result<()> {
        match self.errors.lock().unwrap().get(&op) {
            Some(msg) => Err(Error::ServiceApi(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AppCenterService for MockAppCenterService {
    async fn begin_release_upload(&self, owner: &str, app: &str) -> Result<ReleaseUploadBegin> {
        self.record(Call::BeginRelease {
            owner: owner.to_string(),
            app: app.to_string(),
        });
        self.check(Op::BeginRelease)?;

        Ok(ReleaseUploadBegin {
            upload_id: "u1".to_string(),
            upload_url: "https://upload.example.com/u1".to_string(),
        })
    }

    async fn begin_symbol_upload(
        &self,
        owner: &str,
        app: &str,
        request: &SymbolUploadBeginRequest,
    ) -> Result<SymbolUploadBegin> {
        self.record(Call::BeginSymbol {
            owner: owner.to_string(),
            app: app.to_string(),
            request: request.clone(),
        });
        self.check(Op::BeginSymbol)?;

        Ok(SymbolUploadBegin {
            symbol_upload_id: "s1".to_string(),
            upload_url: "https://blob.example.com/s1".to_string(),
            expiration_date: None,
        })
    }

    async fn upload_release_asset(&self, upload_url: &str, path: &Path) -> Result<()> {
        self.record(Call::UploadRelease {
            url: upload_url.to_string(),
            path: path.to_path_buf(),
        });
        self.check(Op::UploadRelease)
    }

    async fn upload_symbol_asset(&self, upload_url: &str, path: &Path) -> Result<()> {
        self.record(Call::UploadSymbol {
            url: upload_url.to_string(),
            path: path.to_path_buf(),
        });
        self.check(Op::UploadSymbol)
    }

    async fn complete_release_upload(
        &self,
        owner: &str,
        app: &str,
        upload_id: &str,
        status: UploadStatus,
    ) -> Result<ReleaseUploadEnd> {
        self.record(Call::CompleteRelease {
            owner: owner.to_string(),
            app: app.to_string(),
            upload_id: upload_id.to_string(),
            status,
        });

        let delay = *self.release_commit_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.record(Call::CompleteReleaseResolved);
        self.check(Op::CompleteRelease)?;

        Ok(ReleaseUploadEnd {
            release_id: self.release_id.lock().unwrap().clone(),
            release_url: None,
        })
    }

    async fn complete_symbol_upload(
        &self,
        owner: &str,
        app: &str,
        symbol_upload_id: &str,
        status: UploadStatus,
    ) -> Result<()> {
        self.record(Call::CompleteSymbol {
            owner: owner.to_string(),
            app: app.to_string(),
            symbol_upload_id: symbol_upload_id.to_string(),
            status,
        });
        self.check(Op::CompleteSymbol)
    }

    async fn distribute_release(
        &self,
        _owner: &str,
        _app: &str,
        release_id: &str,
        details: &ReleaseDetails,
    ) -> Result<()> {
        self.record(Call::Distribute {
            release_id: release_id.to_string(),
            details: details.clone(),
        });
        self.check(Op::Distribute)
    }
}
