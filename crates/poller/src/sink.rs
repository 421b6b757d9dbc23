//! Persistence Sinks
//!
//! Write-only collaborators for durable logging. Sink failures are
//! reported to the caller, logged, and never abort a tick.

use alerting::Alert;
use response_decoder::DecodedSample;
use thiserror::Error;

/// Error from a persistence sink
#[derive(Debug, Clone, Error)]
#[error("sink error: {0}")]
pub struct SinkError(pub String);

/// Accepts decoded samples for durable logging
pub trait SampleSink: Send + Sync {
    fn record_sample(&self, sample: &DecodedSample) -> Result<(), SinkError>;
}

/// Accepts alerts for audit logging
pub trait AlertSink: Send + Sync {
    fn record_alert(&self, alert: &Alert) -> Result<(), SinkError>;
}
