//! Telemetry Log Implementation

use crate::StorageError;
use alerting::Alert;
use poller::{AlertSink, SampleSink, SinkError};
use response_decoder::DecodedSample;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::{debug, info};

/// One durably logged sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRecord {
    pub timestamp_ms: u64,
    pub pid_code: String,
    pub value: f64,
    pub unit: String,
    pub out_of_range: bool,
}

impl From<&DecodedSample> for SampleRecord {
    fn from(sample: &DecodedSample) -> Self {
        Self {
            timestamp_ms: sample.timestamp_ms,
            pid_code: sample.pid.as_str().to_string(),
            value: sample.value,
            unit: sample.unit.to_string(),
            out_of_range: sample.out_of_range,
        }
    }
}

/// One audited alert
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRecord {
    pub id: String,
    pub timestamp_ms: u64,
    pub pid_code: String,
    pub severity: String,
    pub value: f64,
    pub threshold: f64,
    pub message: String,
}

impl From<&Alert> for AlertRecord {
    fn from(alert: &Alert) -> Self {
        Self {
            id: alert.id.clone(),
            timestamp_ms: alert.timestamp_ms,
            pid_code: alert.pid_code.as_str().to_string(),
            severity: format!("{:?}", alert.severity).to_lowercase(),
            value: alert.value,
            threshold: alert.threshold,
            message: alert.message.clone(),
        }
    }
}

/// In-memory telemetry log with retention caps
pub struct TelemetryLog {
    samples: Mutex<VecDeque<SampleRecord>>,
    alerts: Mutex<Vec<AlertRecord>>,
    max_sample_records: usize,
    max_alert_records: usize,
}

impl TelemetryLog {
    /// Create a log with default retention (~28 h of a 10-PID set at 1 Hz)
    pub fn new() -> Self {
        Self::with_retention(1_000_000, 10_000)
    }

    /// Create a log with explicit retention caps
    pub fn with_retention(max_sample_records: usize, max_alert_records: usize) -> Self {
        info!(
            "creating telemetry log (retention: {} samples, {} alerts)",
            max_sample_records, max_alert_records
        );
        Self {
            samples: Mutex::new(VecDeque::with_capacity(max_sample_records.min(10_000))),
            alerts: Mutex::new(Vec::with_capacity(max_alert_records.min(1_000))),
            max_sample_records,
            max_alert_records,
        }
    }

    /// Insert a sample record, evicting the oldest past the cap
    pub fn insert_sample(&self, record: SampleRecord) -> Result<(), StorageError> {
        let mut samples = self
            .samples
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        while samples.len() >= self.max_sample_records {
            samples.pop_front();
        }
        samples.push_back(record);
        Ok(())
    }

    /// Insert an alert record, evicting the oldest past the cap
    pub fn insert_alert(&self, record: AlertRecord) -> Result<(), StorageError> {
        let mut alerts = self
            .alerts
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        if alerts.len() >= self.max_alert_records {
            alerts.remove(0);
        }
        debug!("audited alert {}", record.id);
        alerts.push(record);
        Ok(())
    }

    /// Most recent sample records, newest first
    pub fn recent_samples(&self, limit: usize) -> Result<Vec<SampleRecord>, StorageError> {
        let samples = self
            .samples
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(samples.iter().rev().take(limit).cloned().collect())
    }

    /// Sample records at or after `since_ms`, in insertion order
    pub fn samples_since(&self, since_ms: u64) -> Result<Vec<SampleRecord>, StorageError> {
        let samples = self
            .samples
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(samples
            .iter()
            .filter(|r| r.timestamp_ms >= since_ms)
            .cloned()
            .collect())
    }

    /// Alert records filtered by severity, newest first
    pub fn alerts_by_severity(
        &self,
        severity: Option<&str>,
        limit: usize,
    ) -> Result<Vec<AlertRecord>, StorageError> {
        let alerts = self
            .alerts
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(alerts
            .iter()
            .rev()
            .filter(|a| severity.map_or(true, |s| a.severity == s))
            .take(limit)
            .cloned()
            .collect())
    }

    pub fn sample_count(&self) -> usize {
        self.samples.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn alert_count(&self) -> usize {
        self.alerts.lock().map(|a| a.len()).unwrap_or(0)
    }

    /// Clear all records
    pub fn clear(&self) {
        if let Ok(mut samples) = self.samples.lock() {
            samples.clear();
        }
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.clear();
        }
    }
}

impl Default for TelemetryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleSink for TelemetryLog {
    fn record_sample(&self, sample: &DecodedSample) -> Result<(), SinkError> {
        self.insert_sample(sample.into())
            .map_err(|e| SinkError(e.to_string()))
    }
}

impl AlertSink for TelemetryLog {
    fn record_alert(&self, alert: &Alert) -> Result<(), SinkError> {
        self.insert_alert(alert.into())
            .map_err(|e| SinkError(e.to_string()))
    }
}
