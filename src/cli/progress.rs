//! CLI progress callback with styled output and a spinner

use crate::cli::style::{Stylize, cross, spinner_style};
use anstream::{eprintln, println};
use appcenter_upload::error::Error;
use appcenter_upload::pipeline::{Phase, ProgressCallback};
use async_trait::async_trait;
use indicatif::ProgressBar;
use std::time::Duration;

/// CLI progress callback
///
/// Diagnostic lines are printed verbatim (only colored on a TTY) so CI log
/// scrapers see the same text everywhere. The spinner is hidden when stderr
/// is not a terminal.
pub struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    /// Create progress output with a running spinner
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner }
    }

    /// Stop the spinner without leaving a trace
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        if phase == Phase::Complete {
            self.finish();
            return;
        }
        self.spinner
            .suspend(|| println!("{}...", phase.to_string().emphasis()));
        self.spinner.set_message(phase.to_string());
    }

    async fn on_message(&self, message: &str) {
        self.spinner.suspend(|| {
            if message.ends_with(" successful.") {
                println!("  {}", message.success());
            } else if message.starts_with("  - ") {
                println!("  {}", message.muted());
            } else {
                println!("  {message}");
            }
        });
    }

    async fn on_error(&self, error: &Error) {
        self.spinner
            .suspend(|| eprintln!("  {} {}", cross(), error.to_string().error()));
    }
}
