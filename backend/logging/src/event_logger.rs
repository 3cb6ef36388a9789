//! Pipeline Event Logger
//!
//! One structured event per pipeline step, emitted under the
//! `pipeline_events` target so it can be filtered or routed on its own.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    Lookup {
        query: String,
        world: String,
        candidates: usize,
        resolved: Option<String>,
    },
    Capture {
        url: String,
        path: String,
        elapsed_ms: u64,
    },
    ProfileStored {
        user_id: String,
        server: String,
    },
    Error {
        stage: String,
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: PipelineEvent,
}

impl EventLogEntry {
    pub fn new(request_id: &str, mut event: PipelineEvent) -> Self {
        if let PipelineEvent::Error { error_msg, .. } = &mut event {
            *error_msg = redact_sensitive_data(error_msg);
        }
        Self {
            request_id: request_id.into(),
            timestamp: Utc::now(),
            event,
        }
    }
}

pub struct EventLogger;

impl EventLogger {
    pub fn log_event(request_id: &str, event: PipelineEvent) {
        let entry = EventLogEntry::new(request_id, event);
        match serde_json::to_string(&entry) {
            Ok(json) => info!(target: "pipeline_events", event = %json, "Pipeline event"),
            Err(e) => info!(target: "pipeline_events", event = ?entry, error = %e, "Pipeline event"),
        }
    }
}
