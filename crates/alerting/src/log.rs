//! Alert Log

use crate::engine::Alert;
use tracing::info;

/// Newest-first alert log with an unread counter.
///
/// Alerts stay in the log until `clear_all`; acknowledging marks them
/// read without removing them.
#[derive(Debug, Default)]
pub struct AlertLog {
    alerts: Vec<Alert>,
    unread: usize,
}

impl AlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an alert at the front of the log
    pub fn push(&mut self, alert: Alert) {
        info!("alert {}: {}", alert.id, alert.message);
        self.alerts.insert(0, alert);
        self.unread += 1;
    }

    /// Mark one alert acknowledged by id; returns false for unknown ids
    pub fn acknowledge(&mut self, id: &str) -> bool {
        match self.alerts.iter_mut().find(|a| a.id == id && !a.acknowledged) {
            Some(alert) => {
                alert.acknowledged = true;
                self.unread = self.unread.saturating_sub(1);
                true
            }
            None => false,
        }
    }

    /// Remove every alert and reset the unread counter
    pub fn clear_all(&mut self) {
        self.alerts.clear();
        self.unread = 0;
    }

    /// Unacknowledged alerts, newest first
    pub fn pending(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(|a| !a.acknowledged)
    }

    /// All alerts, newest first
    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    pub fn unread(&self) -> usize {
        self.unread
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}
