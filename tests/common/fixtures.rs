//! Test data factories and a recording progress sink
//!
//! These are test utilities - not every helper is used by every test binary.

#![allow(dead_code)]

use appcenter_upload::error::Error;
use appcenter_upload::pipeline::{Phase, ProgressCallback};
use appcenter_upload::types::{SymbolArtifact, SymbolType, UploadRequest};
use async_trait::async_trait;
use std::sync::Mutex;

/// A request that has passed the create phase, without symbols
pub fn make_request(upload_id: &str) -> UploadRequest {
    let mut request = UploadRequest::new("acme", "widget", "build/app.apk");
    request.upload_id = Some(upload_id.to_string());
    request
}

/// A request that has passed the create phase with a symbol session
pub fn make_request_with_symbols(upload_id: &str, symbol_upload_id: &str) -> UploadRequest {
    let mut request = make_request(upload_id).with_symbols(make_symbols());
    request.symbol_upload_id = Some(symbol_upload_id.to_string());
    request
}

/// A fresh request, as built at pipeline start
pub fn make_initial_request() -> UploadRequest {
    UploadRequest::new("acme", "widget", "build/app.apk")
}

pub fn make_symbols() -> SymbolArtifact {
    SymbolArtifact {
        path: "build/app.dSYM.zip".into(),
        symbol_type: SymbolType::Apple,
    }
}

/// Everything the pipeline reported, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Phase(Phase),
    Message(String),
    Error(String),
}

/// Progress sink that records every line
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<Event>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Message and error lines, without phase markers
    pub fn lines(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Message(m) | Event::Error(m) => Some(m),
                Event::Phase(_) => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Error(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn phases(&self) -> Vec<Phase> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Phase(p) => Some(p),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_phase(&self, phase: Phase) {
        self.events.lock().unwrap().push(Event::Phase(phase));
    }

    async fn on_message(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Message(message.to_string()));
    }

    async fn on_error(&self, error: &Error) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Error(error.to_string()));
    }
}
