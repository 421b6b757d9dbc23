//! Monitor Settings
//!
//! Layered configuration: an optional `monitor.toml` next to the binary,
//! overridden by `MONITOR_*` environment variables. Everything has a
//! default so the monitor runs with no configuration at all.

use alerting::AlertThreshold;
use poller::PollerConfig;
use serde::Deserialize;
use std::collections::HashMap;

/// Per-PID threshold entry as it appears in the settings file
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ThresholdSettings {
    pub min: Option<f64>,
    pub max: Option<f64>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Top-level monitor configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    /// Tick interval in milliseconds
    pub update_interval_ms: u64,
    /// History buffer cap
    pub max_history_points: usize,
    /// Master alert switch
    pub enable_alerts: bool,
    /// PID codes to poll; empty means the recommended set
    pub poll_pids: Vec<String>,
    /// Per-PID alert thresholds keyed by code
    pub alert_thresholds: HashMap<String, ThresholdSettings>,
    /// Durable sample log retention
    pub sample_retention: usize,
    /// Durable alert log retention
    pub alert_retention: usize,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            update_interval_ms: 1000,
            max_history_points: 1000,
            enable_alerts: true,
            poll_pids: Vec::new(),
            alert_thresholds: HashMap::new(),
            sample_retention: 1_000_000,
            alert_retention: 10_000,
        }
    }
}

impl MonitorSettings {
    /// Translate into the poller's runtime configuration
    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig {
            update_interval_ms: self.update_interval_ms,
            max_history_points: self.max_history_points,
            enable_alerts: self.enable_alerts,
            alert_thresholds: self
                .alert_thresholds
                .iter()
                .map(|(code, t)| {
                    (
                        code.as_str().into(),
                        AlertThreshold {
                            min: t.min,
                            max: t.max,
                            enabled: t.enabled,
                        },
                    )
                })
                .collect(),
            poll_codes: self.poll_pids.iter().map(|c| c.as_str().into()).collect(),
        }
    }
}

/// Load settings from `monitor.toml` (optional) and `MONITOR_*` env vars
pub fn load() -> anyhow::Result<MonitorSettings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("monitor").required(false))
        .add_source(config::Environment::with_prefix("MONITOR"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = MonitorSettings::default();
        assert_eq!(settings.update_interval_ms, 1000);
        assert_eq!(settings.max_history_points, 1000);
        assert!(settings.enable_alerts);
    }

    #[test]
    fn test_poller_config_normalizes_codes() {
        let mut settings = MonitorSettings::default();
        settings.poll_pids = vec!["0c".to_string()];
        settings.alert_thresholds.insert(
            "220425".to_string(),
            ThresholdSettings {
                min: None,
                max: Some(45.0),
                enabled: true,
            },
        );

        let cfg = settings.poller_config();
        assert_eq!(cfg.poll_codes[0].as_str(), "0C");
        let threshold = cfg.alert_thresholds.get("220425").unwrap();
        assert_eq!(threshold.max, Some(45.0));
        assert!(threshold.enabled);
    }
}
