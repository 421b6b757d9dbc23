//! Decode Error Types

use pid_catalog::PidCode;
use thiserror::Error;

/// Errors for structurally invalid decode input.
///
/// Out-of-range values are not errors; they come back flagged on the
/// decoded result instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The code has no definition in the catalog
    #[error("unknown PID {0}")]
    UnknownPid(PidCode),

    /// Response byte count does not match the formula arity
    #[error("length mismatch for PID {pid}: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        pid: PidCode,
        expected: usize,
        actual: usize,
    },
}
