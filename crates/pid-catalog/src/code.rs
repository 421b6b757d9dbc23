//! PID Code Newtype

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A PID identifier as an uppercase hex string (e.g. `"2204B0"`, `"0C"`).
///
/// Codes are normalized to uppercase on construction so lookups are
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PidCode(String);

impl PidCode {
    /// Create a code, trimming whitespace and uppercasing
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    /// The normalized hex string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PidCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PidCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl Borrow<str> for PidCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        assert_eq!(PidCode::new("2204b0").as_str(), "2204B0");
        assert_eq!(PidCode::new("  0c "), PidCode::new("0C"));
    }

    #[test]
    fn test_map_lookup_by_str() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(PidCode::new("22005B"), 1);
        assert_eq!(map.get("22005B"), Some(&1));
    }
}
