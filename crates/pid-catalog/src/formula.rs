//! Typed Decode Formulas
//!
//! Each PID declares one of a closed set of byte-arithmetic shapes. The
//! variants cover every formula in the catalog; no formula is ever
//! evaluated from a string. `A` is the first response byte, `B` the
//! second, `C` the third (big-endian composition throughout).

use serde::{Deserialize, Serialize};

/// Decode formula for a PID response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Formula {
    /// `A * scale + offset` (1 byte)
    Byte { scale: f64, offset: f64 },
    /// `((A*256)+B) * scale + offset` (2 bytes)
    Word { scale: f64, offset: f64 },
    /// `(((A*256)+B) - bias) / divisor` (2 bytes)
    ///
    /// Covers the `-32768`-biased current encoding and the `/4-8192`,
    /// `/8-4096` torque encodings, which are the same shape.
    BiasedWord { bias: f64, divisor: f64 },
    /// Two's-complement `(A*256)+B` as i16, then `/ divisor` (2 bytes)
    SignedWord { divisor: f64 },
    /// `(((A*256)+B)*256+C) / divisor` (3 bytes)
    Triple { divisor: f64 },
    /// Raw big-endian composition of `length` bytes, no scaling.
    ///
    /// Used for bit-encoded status PIDs where the value is a bitmask,
    /// not a physical quantity.
    Bits { length: usize },
}

impl Formula {
    /// `A` unchanged
    pub const RAW_BYTE: Formula = Formula::Byte { scale: 1.0, offset: 0.0 };
    /// `A * 100 / 255` (percentages)
    pub const PERCENT: Formula = Formula::Byte {
        scale: 100.0 / 255.0,
        offset: 0.0,
    };
    /// `A - 40` (temperatures in °C)
    pub const TEMP_C: Formula = Formula::Byte {
        scale: 1.0,
        offset: -40.0,
    };
    /// `(A-128) * 100 / 128` (fuel trim percentages)
    pub const FUEL_TRIM: Formula = Formula::Byte {
        scale: 100.0 / 128.0,
        offset: -100.0,
    };
    /// `((A*256)+B) / 4` (quarter-unit RPM encodings)
    pub const QUARTER_WORD: Formula = Formula::Word {
        scale: 0.25,
        offset: 0.0,
    };
    /// `(A*256)+B` unchanged
    pub const RAW_WORD: Formula = Formula::Word {
        scale: 1.0,
        offset: 0.0,
    };

    /// Number of response bytes this formula consumes
    pub fn response_len(&self) -> usize {
        match self {
            Formula::Byte { .. } => 1,
            Formula::Word { .. } | Formula::BiasedWord { .. } | Formula::SignedWord { .. } => 2,
            Formula::Triple { .. } => 3,
            Formula::Bits { length } => *length,
        }
    }

    /// Evaluate the formula over `bytes`.
    ///
    /// Callers must supply exactly `response_len()` bytes; the decoder
    /// enforces this before calling.
    pub fn apply(&self, bytes: &[u8]) -> f64 {
        debug_assert_eq!(bytes.len(), self.response_len());
        match *self {
            Formula::Byte { scale, offset } => bytes[0] as f64 * scale + offset,
            Formula::Word { scale, offset } => word(bytes) as f64 * scale + offset,
            Formula::BiasedWord { bias, divisor } => (word(bytes) as f64 - bias) / divisor,
            Formula::SignedWord { divisor } => (word(bytes) as i16) as f64 / divisor,
            Formula::Triple { divisor } => {
                let raw = (word(bytes) as u32) * 256 + bytes[2] as u32;
                raw as f64 / divisor
            }
            Formula::Bits { .. } => bytes
                .iter()
                .fold(0u64, |acc, &b| (acc << 8) | b as u64) as f64,
        }
    }

    /// Encode a physical value back into raw response bytes.
    ///
    /// Inverse of `apply` for the linear shapes, rounded to the nearest
    /// representable raw value and clamped to the byte width. Used by the
    /// mock transport and round-trip tests.
    pub fn encode(&self, value: f64) -> Vec<u8> {
        match *self {
            Formula::Byte { scale, offset } => {
                let raw = ((value - offset) / scale).round().clamp(0.0, 255.0);
                vec![raw as u8]
            }
            Formula::Word { scale, offset } => {
                let raw = ((value - offset) / scale).round().clamp(0.0, 65535.0);
                word_bytes(raw as u16)
            }
            Formula::BiasedWord { bias, divisor } => {
                let raw = (value * divisor + bias).round().clamp(0.0, 65535.0);
                word_bytes(raw as u16)
            }
            Formula::SignedWord { divisor } => {
                let raw = (value * divisor)
                    .round()
                    .clamp(i16::MIN as f64, i16::MAX as f64);
                word_bytes(raw as i16 as u16)
            }
            Formula::Triple { divisor } => {
                let raw = (value * divisor).round().clamp(0.0, 16_777_215.0) as u32;
                vec![(raw >> 16) as u8, (raw >> 8) as u8, (raw & 0xFF) as u8]
            }
            Formula::Bits { length } => {
                let raw = value.max(0.0) as u64;
                (0..length)
                    .rev()
                    .map(|i| (raw >> (8 * i)) as u8)
                    .collect()
            }
        }
    }
}

fn word(bytes: &[u8]) -> u16 {
    ((bytes[0] as u16) << 8) | bytes[1] as u16
}

fn word_bytes(raw: u16) -> Vec<u8> {
    vec![(raw >> 8) as u8, (raw & 0xFF) as u8]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_word_rpm() {
        // 1A 00 => ((0x1A * 256) + 0x00) / 4 = 6656/4 = 1664
        assert_eq!(Formula::QUARTER_WORD.apply(&[0x1A, 0x00]), 1664.0);
    }

    #[test]
    fn test_temp_offset() {
        // 0x50 = 80, so 80 - 40 = 40°C
        assert_eq!(Formula::TEMP_C.apply(&[0x50]), 40.0);
    }

    #[test]
    fn test_biased_word_current() {
        // ((A*256+B)-32768)/100: raw 0 => -327.68 A, raw 32768 => 0 A
        let f = Formula::BiasedWord {
            bias: 32768.0,
            divisor: 100.0,
        };
        assert!((f.apply(&[0x00, 0x00]) + 327.68).abs() < 1e-9);
        assert_eq!(f.apply(&[0x80, 0x00]), 0.0);
    }

    #[test]
    fn test_signed_word() {
        // (S_A*256+B)/20: 0xFFEC = -20 as i16 => -1.0 A
        let f = Formula::SignedWord { divisor: 20.0 };
        assert_eq!(f.apply(&[0xFF, 0xEC]), -1.0);
        assert_eq!(f.apply(&[0x00, 0x14]), 1.0);
    }

    #[test]
    fn test_triple_hv_voltage() {
        // ((A*256+B)*256+C)/100: raw 40000 => 400.00 V
        let f = Formula::Triple { divisor: 100.0 };
        assert_eq!(f.apply(&[0x00, 0x9C, 0x40]), 400.0);
    }

    #[test]
    fn test_bits_composition() {
        let f = Formula::Bits { length: 4 };
        assert_eq!(f.apply(&[0x00, 0x00, 0x01, 0x02]), 258.0);
    }

    #[test]
    fn test_encode_round_trip() {
        let cases = [
            (Formula::TEMP_C, 75.0),
            (Formula::PERCENT, 50.2),
            (Formula::QUARTER_WORD, 1664.0),
            (
                Formula::BiasedWord {
                    bias: 32768.0,
                    divisor: 4.0,
                },
                -120.0,
            ),
            (Formula::SignedWord { divisor: 20.0 }, -42.5),
            (Formula::Triple { divisor: 100.0 }, 385.3),
        ];
        for (formula, value) in cases {
            let bytes = formula.encode(value);
            assert_eq!(bytes.len(), formula.response_len());
            let decoded = formula.apply(&bytes);
            // Tolerance is one raw step through the formula's scale.
            assert!(
                (decoded - value).abs() < 1.0,
                "{formula:?}: {value} -> {decoded}"
            );
        }
    }
}
