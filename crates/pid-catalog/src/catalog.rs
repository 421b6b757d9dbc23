//! PID Catalog Registry
//!
//! Immutable registry over the built-in PID tables. All reads; no writes
//! after construction, so shared references are safe across threads.

use crate::code::PidCode;
use crate::definition::{Category, PidDefinition};
use crate::tables::{standard_pids, volt_pids};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// The curated monitoring set shown by default on the dashboard.
const RECOMMENDED: [&str; 10] = [
    "22005B", // Volt SOC
    "220042", // Volt control module voltage
    "2204B0", // Volt HV battery voltage
    "220272", // Volt motor A RPM
    "0C",     // engine RPM
    "0D",     // vehicle speed
    "05",     // coolant temperature
    "2F",     // fuel level
    "04",     // engine load
    "42",     // control module voltage
];

/// Catalog construction errors
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// Two definitions share a code
    #[error("duplicate PID code {0}")]
    DuplicateCode(PidCode),
}

/// Vehicle-system grouping used by the dashboard browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum System {
    Battery,
    Charging,
    Motor,
    Engine,
    Fuel,
    Temperature,
    Pressure,
    Vehicle,
    Diagnostics,
}

/// Per-category catalog counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub volt: usize,
    pub standard: usize,
}

/// Immutable PID registry with insertion-ordered iteration
#[derive(Debug)]
pub struct PidCatalog {
    defs: Vec<PidDefinition>,
    index: HashMap<PidCode, usize>,
}

impl PidCatalog {
    /// Build a catalog from definitions, rejecting duplicate codes
    pub fn from_definitions(defs: Vec<PidDefinition>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(defs.len());
        for (i, def) in defs.iter().enumerate() {
            if index.insert(def.code.clone(), i).is_some() {
                return Err(CatalogError::DuplicateCode(def.code.clone()));
            }
        }
        Ok(Self { defs, index })
    }

    /// The built-in Volt + standard catalog
    pub fn builtin() -> Self {
        let mut defs = volt_pids();
        defs.extend(standard_pids());
        Self::from_definitions(defs).expect("built-in PID tables contain no duplicate codes")
    }

    /// Look up a definition by code (case-insensitive)
    pub fn lookup(&self, code: &str) -> Option<&PidDefinition> {
        let normalized = code.trim().to_ascii_uppercase();
        self.index.get(normalized.as_str()).map(|&i| &self.defs[i])
    }

    /// All definitions in insertion order
    pub fn all(&self) -> impl Iterator<Item = &PidDefinition> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Definitions in one category, insertion order preserved
    pub fn filter_by_category(&self, category: Category) -> impl Iterator<Item = &PidDefinition> {
        self.defs.iter().filter(move |d| d.category == category)
    }

    /// Case-insensitive substring search over code, description, and unit
    pub fn search(&self, query: &str) -> Vec<&PidDefinition> {
        let query = query.to_lowercase();
        self.defs
            .iter()
            .filter(|d| {
                d.code.as_str().to_lowercase().contains(&query)
                    || d.description.to_lowercase().contains(&query)
                    || d.unit.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// The curated default monitoring set
    pub fn recommended(&self) -> Vec<&PidDefinition> {
        RECOMMENDED.iter().filter_map(|code| self.lookup(code)).collect()
    }

    /// Group definitions by vehicle system, keyed off descriptions
    pub fn by_system(&self) -> BTreeMap<System, Vec<&PidDefinition>> {
        let mut systems: BTreeMap<System, Vec<&PidDefinition>> = BTreeMap::new();
        for def in &self.defs {
            systems.entry(classify(def)).or_default().push(def);
        }
        systems
    }

    /// Per-category counts
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            total: self.defs.len(),
            volt: self.filter_by_category(Category::Volt).count(),
            standard: self.filter_by_category(Category::Standard).count(),
        }
    }
}

fn classify(def: &PidDefinition) -> System {
    let desc = def.description.to_lowercase();
    if desc.contains("battery") || desc.contains("soc") {
        System::Battery
    } else if desc.contains("charg") || desc.contains(" ac ") || desc.contains(" dc ") {
        System::Charging
    } else if desc.contains("motor") {
        System::Motor
    } else if desc.contains("engine") || desc.contains("rpm") {
        System::Engine
    } else if desc.contains("fuel") {
        System::Fuel
    } else if desc.contains("temperature") || desc.contains("temp") {
        System::Temperature
    } else if desc.contains("pressure") {
        System::Pressure
    } else if desc.contains("speed") || desc.contains("throttle") {
        System::Vehicle
    } else {
        System::Diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::Formula;
    use crate::mode;

    #[test]
    fn test_builtin_catalog_counts() {
        let catalog = PidCatalog::builtin();
        let stats = catalog.stats();
        assert_eq!(stats.volt, 31);
        assert_eq!(stats.standard, 33);
        assert_eq!(stats.total, 64);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = PidCatalog::builtin();
        let def = catalog.lookup("2204b0").unwrap();
        assert_eq!(def.description, "HV Battery Voltage");
        assert!(catalog.lookup("ffff").is_none());
    }

    #[test]
    fn test_all_preserves_insertion_order() {
        let catalog = PidCatalog::builtin();
        let codes: Vec<_> = catalog.all().map(|d| d.code.as_str()).collect();
        // Volt table first, then the standard table.
        assert_eq!(codes[0], "22005B");
        assert_eq!(codes[31], "00");
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let dup = PidDefinition::new(
            "0C",
            mode::CURRENT_DATA,
            "Engine speed",
            "RPM",
            Formula::QUARTER_WORD,
            Category::Standard,
        );
        let err = PidCatalog::from_definitions(vec![dup.clone(), dup]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCode(code) if code.as_str() == "0C"));
    }

    #[test]
    fn test_search_matches_code_description_and_unit() {
        let catalog = PidCatalog::builtin();
        assert!(!catalog.search("torque").is_empty());
        assert!(catalog.search("2204").len() >= 2);
        let by_unit = catalog.search("km/h");
        assert!(by_unit.iter().all(|d| d.unit == "km/h"));
        assert!(catalog.search("TORQUE").len() == catalog.search("torque").len());
    }

    #[test]
    fn test_recommended_set_resolves_fully() {
        let catalog = PidCatalog::builtin();
        assert_eq!(catalog.recommended().len(), 10);
    }

    #[test]
    fn test_by_system_covers_every_pid() {
        let catalog = PidCatalog::builtin();
        let grouped = catalog.by_system();
        let total: usize = grouped.values().map(Vec::len).sum();
        assert_eq!(total, catalog.len());
        assert!(grouped.contains_key(&System::Battery));
        assert!(grouped.contains_key(&System::Motor));
    }
}
