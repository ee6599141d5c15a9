//! API token lookup
//!
//! Tokens are only read, never stored.

use crate::error::{Error, Result};
use std::env;
use std::fmt;

/// Environment variable holding the API token
pub const TOKEN_ENV_VAR: &str = "APPCENTER_API_TOKEN";

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token passed on the command line
    Flag,
    /// Token from environment variable
    EnvVar,
}

/// Resolved authentication
#[derive(Clone)]
pub struct AuthConfig {
    /// API token
    pub token: String,
    /// Where the token was obtained from
    pub source: AuthSource,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Get the API token
///
/// Priority:
/// 1. explicit `--api-token`
/// 2. `APPCENTER_API_TOKEN` environment variable
pub fn get_auth(explicit: Option<&str>) -> Result<AuthConfig> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(AuthConfig {
            token: token.to_string(),
            source: AuthSource::Flag,
        });
    }

    if let Ok(token) = env::var(TOKEN_ENV_VAR) {
        let token = token.trim();
        if !token.is_empty() {
            return Ok(AuthConfig {
                token: token.to_string(),
                source: AuthSource::EnvVar,
            });
        }
    }

    Err(Error::Auth(format!(
        "No App Center API token found. Pass --api-token or set {TOKEN_ENV_VAR}"
    )))
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_flag_wins_over_env() {
        // SAFETY: serialized with the other env tests
        unsafe { env::set_var(TOKEN_ENV_VAR, "from-env") };
        let auth = get_auth(Some("from-flag")).unwrap();
        assert_eq!(auth.token, "from-flag");
        assert_eq!(auth.source, AuthSource::Flag);
        unsafe { env::remove_var(TOKEN_ENV_VAR) };
    }

    #[test]
    #[serial]
    fn test_env_fallback() {
        unsafe { env::set_var(TOKEN_ENV_VAR, " from-env\n") };
        let auth = get_auth(None).unwrap();
        assert_eq!(auth.token, "from-env");
        assert_eq!(auth.source, AuthSource::EnvVar);
        unsafe { env::remove_var(TOKEN_ENV_VAR) };
    }

    #[test]
    #[serial]
    fn test_missing_token() {
        unsafe { env::remove_var(TOKEN_ENV_VAR) };
        let err = get_auth(Some("   ")).unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
    }

    #[test]
    fn test_debug_hides_token() {
        let auth = AuthConfig {
            token: "secret-token".to_string(),
            source: AuthSource::Flag,
        };
        let debug = format!("{auth:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("Flag"));
    }
}
