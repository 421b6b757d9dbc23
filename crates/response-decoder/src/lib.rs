//! Response Decoder
//!
//! Evaluates a PID definition's typed formula against raw adapter response
//! bytes and produces a physical value, or a decode error for structurally
//! invalid input. Out-of-range values are returned flagged, never clamped
//! and never treated as errors; callers decide policy.

mod decoder;
mod error;
mod sample;

pub use decoder::{decode, CatalogDecoder, Decoded};
pub use error::DecodeError;
pub use sample::DecodedSample;
