//! PID Definition Types

use crate::code::PidCode;
use crate::formula::Formula;
use serde::Serialize;

/// PID origin category (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Chevrolet Volt enhanced-mode PID
    Volt,
    /// Standard OBD-II PID
    Standard,
    /// User-defined PID
    Custom,
}

/// Inclusive valid range for a decoded physical value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies inside the range (inclusive both ends)
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// CAN request/response header pair for adapters that require an
/// explicit header switch before querying (GM charger module PIDs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanHeaders {
    /// Request header (e.g. `"7E0"`)
    pub request: &'static str,
    /// Expected response header (e.g. `"7E8"`)
    pub response: &'static str,
}

/// A single parameter definition. Static, loaded once, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct PidDefinition {
    /// Unique hex code, the catalog key
    pub code: PidCode,
    /// Request mode byte (`0x01`, `0x22`, `0x43`)
    pub mode: u8,
    /// Human-readable parameter name
    pub description: &'static str,
    /// Physical unit of the decoded value
    pub unit: &'static str,
    /// Typed decode formula
    pub formula: Formula,
    /// Valid range of the decoded value; `None` for bit-encoded PIDs
    pub range: Option<ValueRange>,
    /// Origin category
    pub category: Category,
    /// CAN headers, when the adapter must switch explicitly
    pub headers: Option<CanHeaders>,
}

impl PidDefinition {
    pub fn new(
        code: &str,
        mode: u8,
        description: &'static str,
        unit: &'static str,
        formula: Formula,
        category: Category,
    ) -> Self {
        Self {
            code: PidCode::new(code),
            mode,
            description,
            unit,
            formula,
            range: None,
            category,
            headers: None,
        }
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some(ValueRange::new(min, max));
        self
    }

    pub fn with_headers(mut self, request: &'static str, response: &'static str) -> Self {
        self.headers = Some(CanHeaders { request, response });
        self
    }

    /// Number of response bytes this PID's formula consumes
    pub fn response_len(&self) -> usize {
        self.formula.response_len()
    }

    /// Whether `value` falls inside the declared range.
    ///
    /// Always true when no range is declared (bit-encoded PIDs).
    pub fn in_range(&self, value: f64) -> bool {
        self.range.map_or(true, |r| r.contains(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode;

    #[test]
    fn test_range_contains_endpoints() {
        let range = ValueRange::new(-40.0, 215.0);
        assert!(range.contains(-40.0));
        assert!(range.contains(215.0));
        assert!(!range.contains(215.1));
    }

    #[test]
    fn test_definition_builder() {
        let def = PidDefinition::new(
            "220005",
            mode::ENHANCED_DATA,
            "Engine Coolant Temperature",
            "°C",
            Formula::TEMP_C,
            Category::Volt,
        )
        .with_range(-40.0, 215.0)
        .with_headers("7E0", "7E8");

        assert_eq!(def.code.as_str(), "220005");
        assert_eq!(def.response_len(), 1);
        assert!(def.in_range(90.0));
        assert!(!def.in_range(250.0));
        assert_eq!(def.headers.unwrap().response, "7E8");
    }

    #[test]
    fn test_unranged_definition_accepts_all() {
        let def = PidDefinition::new(
            "00",
            mode::CURRENT_DATA,
            "PIDs supported (01-20)",
            "Bit encoded",
            Formula::Bits { length: 4 },
            Category::Standard,
        );
        assert!(def.in_range(f64::MAX));
    }
}
