//! Formula Evaluation

use crate::error::DecodeError;
use crate::sample::DecodedSample;
use pid_catalog::{PidCatalog, PidDefinition};
use tracing::trace;

/// A decoded physical value with its range verdict
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoded {
    pub value: f64,
    pub out_of_range: bool,
}

/// Decode raw response bytes against a definition.
///
/// Pure and deterministic: identical inputs always yield identical
/// results. The byte count must match the formula arity exactly.
pub fn decode(def: &PidDefinition, raw: &[u8]) -> Result<Decoded, DecodeError> {
    let expected = def.response_len();
    if raw.len() != expected {
        return Err(DecodeError::LengthMismatch {
            pid: def.code.clone(),
            expected,
            actual: raw.len(),
        });
    }

    let value = def.formula.apply(raw);
    let out_of_range = !def.in_range(value);
    if out_of_range {
        trace!("PID {} value {} outside declared range", def.code, value);
    }

    Ok(Decoded { value, out_of_range })
}

/// Catalog-resolving decoder front end.
///
/// Resolves codes through the catalog before decoding, so callers holding
/// only raw `(code, bytes)` pairs get `UnknownPid` for catalog misses.
pub struct CatalogDecoder<'a> {
    catalog: &'a PidCatalog,
}

impl<'a> CatalogDecoder<'a> {
    pub fn new(catalog: &'a PidCatalog) -> Self {
        Self { catalog }
    }

    /// Decode one response into a timestamped sample
    pub fn decode_response(
        &self,
        code: &str,
        raw: &[u8],
        timestamp_ms: u64,
    ) -> Result<DecodedSample, DecodeError> {
        let def = self
            .catalog
            .lookup(code)
            .ok_or_else(|| DecodeError::UnknownPid(code.into()))?;
        let decoded = decode(def, raw)?;
        Ok(DecodedSample {
            pid: def.code.clone(),
            value: decoded.value,
            unit: def.unit,
            timestamp_ms,
            out_of_range: decoded.out_of_range,
        })
    }
}
