//! Live Value Store Implementation

use pid_catalog::PidCode;
use response_decoder::DecodedSample;
use std::collections::HashMap;
use tracing::trace;

/// Latest decoded sample per PID.
///
/// `update` is the single fan-out point of the pipeline: history and
/// alerting observe samples in the same tick the store is written. The
/// store itself holds no clock; staleness checks take the caller's `now`
/// so they stay deterministic under test.
#[derive(Debug, Default)]
pub struct LiveValueStore {
    slots: HashMap<PidCode, DecodedSample>,
}

impl LiveValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditionally overwrite the slot for the sample's PID.
    ///
    /// No merging: the previous value and timestamp are discarded.
    pub fn update(&mut self, sample: DecodedSample) {
        trace!("live update {} = {} {}", sample.pid, sample.value, sample.unit);
        self.slots.insert(sample.pid.clone(), sample);
    }

    /// Most recent sample for a code, if any has been stored
    pub fn get(&self, code: &str) -> Option<&DecodedSample> {
        self.slots.get(PidCode::new(code).as_str())
    }

    /// True when the slot is absent or was last written more than
    /// `threshold_ms` before `now_ms`.
    pub fn is_stale(&self, code: &str, threshold_ms: u64, now_ms: u64) -> bool {
        match self.get(code) {
            Some(sample) => now_ms.saturating_sub(sample.timestamp_ms) > threshold_ms,
            None => true,
        }
    }

    /// Number of PIDs that have reported at least once
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over all current samples (arbitrary order)
    pub fn iter(&self) -> impl Iterator<Item = &DecodedSample> {
        self.slots.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(pid: &str, value: f64, timestamp_ms: u64) -> DecodedSample {
        DecodedSample {
            pid: pid.into(),
            value,
            unit: "RPM",
            timestamp_ms,
            out_of_range: false,
        }
    }

    #[test]
    fn test_update_then_get_returns_exact_sample() {
        let mut store = LiveValueStore::new();
        let s = sample("0C", 1664.0, 1000);
        store.update(s.clone());
        assert_eq!(store.get("0C"), Some(&s));
    }

    #[test]
    fn test_update_overwrites_without_merge() {
        let mut store = LiveValueStore::new();
        store.update(sample("0C", 1664.0, 1000));
        store.update(sample("0C", 800.0, 2000));

        let current = store.get("0C").unwrap();
        assert_eq!(current.value, 800.0);
        assert_eq!(current.timestamp_ms, 2000);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let mut store = LiveValueStore::new();
        store.update(sample("2204B0", 385.0, 1000));
        assert!(store.get("2204b0").is_some());
    }

    #[test]
    fn test_staleness() {
        let mut store = LiveValueStore::new();
        store.update(sample("0D", 88.0, 10_000));

        assert!(!store.is_stale("0D", 5000, 12_000));
        assert!(store.is_stale("0D", 5000, 16_000));
        // Never-reported PIDs are always stale.
        assert!(store.is_stale("05", u64::MAX, 0));
    }

    #[test]
    fn test_one_slot_per_pid() {
        let mut store = LiveValueStore::new();
        for tick in 0..100 {
            store.update(sample("0C", tick as f64, tick));
            store.update(sample("0D", tick as f64, tick));
        }
        assert_eq!(store.len(), 2);
    }
}
