//! Structured logging for Kupo.
//!
//! Console + rolling NDJSON output, redaction of secrets, and structured
//! pipeline events (lookups, captures, profile writes).

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogEntry, EventLogger, PipelineEvent};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
