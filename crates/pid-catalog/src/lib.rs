//! OBD-II PID Catalog
//!
//! Defines the Chevrolet Volt enhanced-mode PIDs and the standard OBD-II
//! PIDs, each with a typed byte-decoding formula, unit, valid range, and
//! CAN header requirements. The catalog is immutable after construction.

mod catalog;
mod code;
mod definition;
mod formula;
mod tables;

pub use catalog::{CatalogError, CatalogStats, PidCatalog, System};
pub use code::PidCode;
pub use definition::{CanHeaders, Category, PidDefinition, ValueRange};
pub use formula::Formula;
pub use tables::{standard_pids, volt_pids};

/// OBD-II request mode constants
pub mod mode {
    /// Current data (standard OBD-II)
    pub const CURRENT_DATA: u8 = 0x01;
    /// GM enhanced data (Volt-specific PIDs)
    pub const ENHANCED_DATA: u8 = 0x22;
    /// GM charger module data (requires explicit CAN header switch)
    pub const CHARGER_DATA: u8 = 0x43;
}
