//! Decoded Sample Type

use pid_catalog::PidCode;
use serde::Serialize;

/// One decoded reading for one PID at one poll instant.
///
/// Created by the decoder, then consumed by the live store, history
/// buffer, and alert engine. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedSample {
    /// The PID this sample belongs to
    pub pid: PidCode,
    /// Decoded physical value
    pub value: f64,
    /// Unit of the value
    pub unit: &'static str,
    /// Poll timestamp (Unix ms)
    pub timestamp_ms: u64,
    /// Set when the value lies outside the definition's declared range
    pub out_of_range: bool,
}
