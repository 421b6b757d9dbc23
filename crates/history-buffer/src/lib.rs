//! History Buffer
//!
//! Bounded, insertion-ordered sequence of per-tick telemetry snapshots
//! with FIFO eviction. Insertion order equals temporal order.

mod buffer;

pub use buffer::{HistoryBuffer, HistorySnapshot, DEFAULT_CAPACITY};
