//! Alerting
//!
//! Compares newly decoded samples against configured per-PID thresholds
//! and emits severity-classified alerts into an acknowledgeable log.

mod engine;
mod log;

pub use engine::{Alert, AlertKind, AlertThreshold, Severity, ThresholdEngine};
pub use log::AlertLog;
