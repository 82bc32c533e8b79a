//! Strongly typed parameter enumerations for the MAX31865 driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the configuration register view.
//!
//! # Examples
//!
//! ```rust
//! use max31865::params::{FilterMode, Wiring};
//!
//! let wiring = Wiring::try_from(3u8).unwrap();
//! assert_eq!(wiring, Wiring::Three);
//! assert!(wiring.is_three_wire());
//! let _ = FilterMode::Hz60;
//! ```

use modular_bitfield::prelude::Specifier;

use crate::config::ConfigError;

/// Number of leads connecting the RTD element to the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wiring {
    /// 2-wire connection, no lead compensation.
    Two,
    /// 3-wire connection, lead resistance compensated on chip.
    Three,
    /// 4-wire (Kelvin) connection.
    Four,
}

impl Wiring {
    /// Returns the number of leads.
    pub const fn leads(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }

    /// Whether `CONFIG[4]` (3-wire select) must be set for this wiring.
    pub const fn is_three_wire(self) -> bool {
        matches!(self, Self::Three)
    }
}

impl TryFrom<u8> for Wiring {
    type Error = ConfigError;

    fn try_from(leads: u8) -> core::result::Result<Self, Self::Error> {
        match leads {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            other => Err(ConfigError::UnsupportedWiring(other)),
        }
    }
}

/// Mains rejection filter selection (`CONFIG[0]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum FilterMode {
    /// 60 Hz notch filter.
    Hz60 = 0,
    /// 50 Hz notch filter.
    Hz50 = 1,
}

/// Conversion mode selection (`CONFIG[6]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum ConversionMode {
    /// Conversions only on one-shot request.
    NormallyOff = 0,
    /// Continuous conversions at the filter rate.
    Auto = 1,
}
