//! Threshold Evaluation

use pid_catalog::PidCode;
use response_decoder::DecodedSample;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Per-PID alert configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertThreshold {
    /// Fire a warning when the value drops below this
    pub min: Option<f64>,
    /// Fire an error when the value rises above this
    pub max: Option<f64>,
    /// Disabled thresholds never fire
    pub enabled: bool,
}

/// Alert severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Alert event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Info,
    Warning,
    Error,
}

/// A threshold violation event.
///
/// Immutable after creation except for acknowledgement, which goes
/// through `AlertLog::acknowledge`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    /// Unique id derived from `(pid_code, timestamp_ms)`
    pub id: String,
    pub pid_code: PidCode,
    pub kind: AlertKind,
    pub severity: Severity,
    /// The decoded value that violated the threshold
    pub value: f64,
    /// The threshold bound that was crossed
    pub threshold: f64,
    pub timestamp_ms: u64,
    pub acknowledged: bool,
    pub message: String,
}

/// Stateless threshold evaluator.
///
/// Duplicate evaluations at the same timestamp are not deduplicated;
/// callers throttle upstream if they need to.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdEngine;

impl ThresholdEngine {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate one sample against the configured thresholds.
    ///
    /// Max violations take precedence over min violations when both
    /// bounds are configured and both would fire. Missing or disabled
    /// configuration means no alert, never an error.
    pub fn evaluate(
        &self,
        sample: &DecodedSample,
        thresholds: &HashMap<PidCode, AlertThreshold>,
    ) -> Option<Alert> {
        let threshold = thresholds.get(sample.pid.as_str())?;
        if !threshold.enabled {
            return None;
        }

        let (kind, severity, bound, message) = match (threshold.max, threshold.min) {
            (Some(max), _) if sample.value > max => (
                AlertKind::Error,
                Severity::High,
                max,
                format!("Value {} exceeds maximum threshold {}", sample.value, max),
            ),
            (_, Some(min)) if sample.value < min => (
                AlertKind::Warning,
                Severity::Medium,
                min,
                format!("Value {} below minimum threshold {}", sample.value, min),
            ),
            _ => return None,
        };

        debug!("alert for {}: {}", sample.pid, message);

        Some(Alert {
            id: format!("{}-{}", sample.pid, sample.timestamp_ms),
            pid_code: sample.pid.clone(),
            kind,
            severity,
            value: sample.value,
            threshold: bound,
            timestamp_ms: sample.timestamp_ms,
            acknowledged: false,
            message,
        })
    }
}
