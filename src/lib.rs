//! appcenter-upload - ship CI build artifacts to App Center
//!
//! Uploads a release binary and optional debug symbols, commits the upload
//! sessions and distributes the resulting release.

pub mod auth;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod service;
pub mod types;
