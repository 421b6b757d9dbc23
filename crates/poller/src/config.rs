//! Poller Configuration Surface
//!
//! Read by the polling loop at the start of each tick; changes take
//! effect on the next tick, never mid-tick.

use alerting::AlertThreshold;
use pid_catalog::PidCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default tick interval
pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 1000;

/// Runtime configuration for the polling pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Tick interval in milliseconds
    pub update_interval_ms: u64,
    /// History buffer cap, applied at the start of each tick
    pub max_history_points: usize,
    /// Master switch for the alert engine
    pub enable_alerts: bool,
    /// Per-PID alert thresholds
    pub alert_thresholds: HashMap<PidCode, AlertThreshold>,
    /// PIDs to poll each tick; empty means the catalog's recommended set
    pub poll_codes: Vec<PidCode>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
            max_history_points: history_buffer::DEFAULT_CAPACITY,
            enable_alerts: true,
            alert_thresholds: HashMap::new(),
            poll_codes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = PollerConfig::default();
        assert_eq!(cfg.update_interval_ms, 1000);
        assert_eq!(cfg.max_history_points, 1000);
        assert!(cfg.enable_alerts);
        assert!(cfg.poll_codes.is_empty());
    }
}
