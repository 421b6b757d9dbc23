//! Live Value Store
//!
//! Keyed map from PID code to the most recent decoded sample. One slot
//! per known PID, overwritten on every update; the store never grows past
//! the set of PIDs that have reported at least once.

mod store;

pub use store::LiveValueStore;
