//! Bounded Snapshot Buffer Implementation

use pid_catalog::PidCode;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

/// Default snapshot capacity (one snapshot per tick; ~17 min at 1 Hz)
pub const DEFAULT_CAPACITY: usize = 1000;

/// One tick's worth of decoded values across the polled PID set
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistorySnapshot {
    /// Tick timestamp (Unix ms)
    pub timestamp_ms: u64,
    /// PID code -> decoded value for every PID that decoded this tick
    pub values: HashMap<PidCode, f64>,
}

impl HistorySnapshot {
    pub fn new(timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms,
            ..Default::default()
        }
    }

    pub fn insert(&mut self, pid: PidCode, value: f64) {
        self.values.insert(pid, value);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// FIFO snapshot buffer with a hard capacity.
///
/// The cap holds after every `append` returns; eviction is strictly
/// oldest-first.
#[derive(Debug)]
pub struct HistoryBuffer {
    points: VecDeque<HistorySnapshot>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Create a buffer holding at most `capacity` snapshots
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be non-zero");
        Self {
            points: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Append a snapshot at the tail, evicting from the head until the
    /// length is back at the cap.
    pub fn append(&mut self, snapshot: HistorySnapshot) {
        self.points.push_back(snapshot);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// `(timestamp, value)` pairs for one PID at or after `since_ms`,
    /// in chronological order.
    pub fn query(&self, code: &str, since_ms: u64) -> Vec<(u64, f64)> {
        let code = PidCode::new(code);
        self.points
            .iter()
            .filter(|p| p.timestamp_ms >= since_ms)
            .filter_map(|p| p.values.get(&code).map(|&v| (p.timestamp_ms, v)))
            .collect()
    }

    /// Most recent snapshot, if any
    pub fn latest(&self) -> Option<&HistorySnapshot> {
        self.points.back()
    }

    /// Change the cap, trimming oldest snapshots if it shrank.
    ///
    /// Configuration is re-read every tick, so a lowered cap takes
    /// effect on the next append at the latest.
    pub fn set_capacity(&mut self, capacity: usize) {
        assert!(capacity > 0, "history capacity must be non-zero");
        self.capacity = capacity;
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Empty the buffer
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
