//! Storage Layer
//!
//! In-memory persistence collaborator behind the poller's write-only
//! sink traits: a capped sample log for durable telemetry and an alert
//! log for audit. Schema-level persistence lives outside this core.

mod repository;

pub use repository::{AlertRecord, SampleRecord, TelemetryLog};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("record not found")]
    NotFound,
}
