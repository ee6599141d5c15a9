//! Service factory
//!
//! Creates the App Center service from configuration.

use crate::config::ServiceConfig;
use crate::error::Result;
use crate::service::{AppCenterService, HttpAppCenterService};
use std::sync::Arc;

/// Create an App Center service from configuration
pub fn create_service(config: &ServiceConfig) -> Result<Arc<dyn AppCenterService>> {
    Ok(Arc::new(HttpAppCenterService::new(
        config.base_url.as_str(),
        config.token.clone(),
    )?))
}
