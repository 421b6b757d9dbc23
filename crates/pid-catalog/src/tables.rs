//! Built-in PID Tables
//!
//! The Chevrolet Volt enhanced-mode table and the standard OBD-II mode-01
//! table. Formula parameters follow the documented ELM327 formulas for
//! each PID (e.g. `((A*256)+B)/4` for quarter-unit RPM encodings).

use crate::definition::{Category, PidDefinition};
use crate::formula::Formula;
use crate::mode;

fn volt(
    code: &str,
    description: &'static str,
    unit: &'static str,
    formula: Formula,
    min: f64,
    max: f64,
) -> PidDefinition {
    PidDefinition::new(code, mode::ENHANCED_DATA, description, unit, formula, Category::Volt)
        .with_range(min, max)
        .with_headers("7E0", "7E8")
}

// Charger-module PIDs answer on a different CAN header pair.
fn charger(
    code: &str,
    description: &'static str,
    unit: &'static str,
    formula: Formula,
    min: f64,
    max: f64,
) -> PidDefinition {
    PidDefinition::new(code, mode::CHARGER_DATA, description, unit, formula, Category::Volt)
        .with_range(min, max)
        .with_headers("7E4", "5EC")
}

fn standard(
    code: &str,
    description: &'static str,
    unit: &'static str,
    formula: Formula,
    min: f64,
    max: f64,
) -> PidDefinition {
    PidDefinition::new(code, mode::CURRENT_DATA, description, unit, formula, Category::Standard)
        .with_range(min, max)
}

fn standard_bits(
    code: &str,
    description: &'static str,
    length: usize,
) -> PidDefinition {
    PidDefinition::new(
        code,
        mode::CURRENT_DATA,
        description,
        "Bit encoded",
        Formula::Bits { length },
        Category::Standard,
    )
}

/// Chevrolet Volt enhanced-mode PIDs
pub fn volt_pids() -> Vec<PidDefinition> {
    let v_per_mille = Formula::Word { scale: 0.001, offset: 0.0 };
    let deci = Formula::Word { scale: 0.1, offset: 0.0 };
    let centi = Formula::Word { scale: 0.01, offset: 0.0 };
    let torque_quarter = Formula::BiasedWord { bias: 32768.0, divisor: 4.0 };

    vec![
        // Battery system
        volt("22005B", "Hybrid Pack Remaining (SOC)", "%", Formula::PERCENT, 0.0, 100.0),
        volt("220042", "Control Module Voltage", "V", v_per_mille, 0.0, 15.0),
        volt(
            "2204B0",
            "HV Battery Voltage",
            "V",
            Formula::Triple { divisor: 100.0 },
            0.0,
            400.0,
        ),
        volt(
            "2204AF",
            "HV Battery Current",
            "A",
            Formula::BiasedWord { bias: 32768.0, divisor: 100.0 },
            -327.68,
            327.67,
        ),
        volt("220425", "HV Battery Temperature Max", "°C", Formula::TEMP_C, -40.0, 215.0),
        volt("220426", "HV Battery Temperature Min", "°C", Formula::TEMP_C, -40.0, 215.0),
        volt("2201BB", "HV Battery Pack Voltage", "V", deci, 0.0, 6553.5),
        volt("22437D", "12V Battery Voltage", "V", v_per_mille, 0.0, 16.0),
        // Charging system
        volt("224373", "Onboard Charger AC Current", "A", centi, 0.0, 655.35),
        volt("224372", "Onboard Charger AC Voltage", "V", deci, 0.0, 6553.5),
        volt("224375", "Onboard Charger DC Current", "A", centi, 0.0, 655.35),
        volt("224374", "Onboard Charger DC Voltage", "V", deci, 0.0, 6553.5),
        volt(
            "22437E",
            "LV Charge Amps",
            "A",
            Formula::SignedWord { divisor: 20.0 },
            -100.0,
            100.0,
        ),
        volt("2243A5", "Charging Power", "kW", centi, 0.0, 655.35),
        // Motor system
        volt("220272", "Motor A RPM", "RPM", Formula::QUARTER_WORD, -8192.0, 8191.0),
        volt("220273", "Motor A Torque", "Nm", torque_quarter, -2048.0, 2047.0),
        volt("220274", "Motor B RPM", "RPM", Formula::QUARTER_WORD, -8192.0, 8191.0),
        volt("220275", "Motor B Torque", "Nm", torque_quarter, -2048.0, 2047.0),
        volt(
            "22F40C",
            "Total Motor Torque",
            "Nm",
            Formula::BiasedWord { bias: 32768.0, divisor: 8.0 },
            -4096.0,
            4095.875,
        ),
        // Engine system
        volt("220005", "Engine Coolant Temperature", "°C", Formula::TEMP_C, -40.0, 215.0),
        volt("221154", "Engine Oil Temperature", "°C", Formula::TEMP_C, -40.0, 215.0),
        volt("22000C", "Engine RPM", "RPM", Formula::QUARTER_WORD, 0.0, 16383.75),
        volt("22203F", "Engine Torque", "Nm", Formula::QUARTER_WORD, 0.0, 200.0),
        volt("22001F", "Engine Run Time", "seconds", Formula::RAW_WORD, 0.0, 65535.0),
        // Vehicle state
        volt("22000D", "Vehicle Speed", "km/h", Formula::RAW_BYTE, 0.0, 255.0),
        volt("22002F", "Fuel Level", "%", Formula::PERCENT, 0.0, 100.0),
        volt("22004C", "Commanded Throttle Position", "%", Formula::PERCENT, 0.0, 100.0),
        volt("220011", "Throttle Position", "%", Formula::PERCENT, 0.0, 100.0),
        // Charger module (special header)
        charger("4368", "Onboard Charger Voltage", "V", centi, 0.0, 655.35),
        charger("4369", "Onboard Charger Current", "A", centi, 0.0, 655.35),
        charger("434F", "HV Battery Temperature", "°C", Formula::TEMP_C, -40.0, 215.0),
    ]
}

/// Standard OBD-II mode-01 PIDs
pub fn standard_pids() -> Vec<PidDefinition> {
    let centi = Formula::Word { scale: 0.01, offset: 0.0 };

    vec![
        standard_bits("00", "PIDs supported (01-20)", 4),
        standard_bits("01", "Monitor status since DTCs cleared", 4),
        standard_bits("02", "Freeze DTC", 2),
        standard_bits("03", "Fuel system status", 2),
        standard("04", "Calculated engine load", "%", Formula::PERCENT, 0.0, 100.0),
        standard("05", "Engine coolant temperature", "°C", Formula::TEMP_C, -40.0, 215.0),
        standard("06", "Short term fuel trim - Bank 1", "%", Formula::FUEL_TRIM, -100.0, 99.22),
        standard("07", "Long term fuel trim - Bank 1", "%", Formula::FUEL_TRIM, -100.0, 99.22),
        standard("08", "Short term fuel trim - Bank 2", "%", Formula::FUEL_TRIM, -100.0, 99.22),
        standard("09", "Long term fuel trim - Bank 2", "%", Formula::FUEL_TRIM, -100.0, 99.22),
        standard(
            "0A",
            "Fuel pressure",
            "kPa",
            Formula::Byte { scale: 3.0, offset: 0.0 },
            0.0,
            765.0,
        ),
        standard("0B", "Intake manifold absolute pressure", "kPa", Formula::RAW_BYTE, 0.0, 255.0),
        standard("0C", "Engine speed", "RPM", Formula::QUARTER_WORD, 0.0, 16383.75),
        standard("0D", "Vehicle speed", "km/h", Formula::RAW_BYTE, 0.0, 255.0),
        standard(
            "0E",
            "Timing advance",
            "°",
            Formula::Byte { scale: 0.5, offset: -64.0 },
            -64.0,
            63.5,
        ),
        standard("0F", "Intake air temperature", "°C", Formula::TEMP_C, -40.0, 215.0),
        standard("10", "MAF air flow rate", "g/s", centi, 0.0, 655.35),
        standard("11", "Throttle position", "%", Formula::PERCENT, 0.0, 100.0),
        standard_bits("12", "Commanded secondary air status", 1),
        standard_bits("13", "Oxygen sensors present", 1),
        standard("1F", "Run time since engine start", "seconds", Formula::RAW_WORD, 0.0, 65535.0),
        standard("21", "Distance traveled with MIL on", "km", Formula::RAW_WORD, 0.0, 65535.0),
        standard("2F", "Fuel Tank Level Input", "%", Formula::PERCENT, 0.0, 100.0),
        standard(
            "31",
            "Distance traveled since codes cleared",
            "km",
            Formula::RAW_WORD,
            0.0,
            65535.0,
        ),
        standard("33", "Absolute Barometric Pressure", "kPa", Formula::RAW_BYTE, 0.0, 255.0),
        standard(
            "42",
            "Control module voltage",
            "V",
            Formula::Word { scale: 0.001, offset: 0.0 },
            0.0,
            65.535,
        ),
        standard(
            "43",
            "Absolute load value",
            "%",
            Formula::Word { scale: 100.0 / 255.0, offset: 0.0 },
            0.0,
            25700.0,
        ),
        standard("45", "Relative throttle position", "%", Formula::PERCENT, 0.0, 100.0),
        standard("46", "Ambient air temperature", "°C", Formula::TEMP_C, -40.0, 215.0),
        standard("47", "Absolute throttle position B", "%", Formula::PERCENT, 0.0, 100.0),
        standard("4C", "Commanded throttle actuator", "%", Formula::PERCENT, 0.0, 100.0),
        standard_bits("51", "Fuel Type", 1),
        standard("52", "Ethanol fuel", "%", Formula::PERCENT, 0.0, 100.0),
    ]
}
