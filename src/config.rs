//! Configuration primitives for the MAX31865 driver.

use crate::conversion::{DEFAULT_REFERENCE_RESISTANCE, PT100_NOMINAL_RESISTANCE};
use crate::params::{FilterMode, Wiring};

/// User-facing configuration for the MAX31865 converter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// RTD lead configuration.
    pub wiring: Wiring,
    /// Reference resistor value in ohms.
    pub reference_resistance: f64,
    /// RTD resistance at 0 °C in ohms.
    pub rtd_nominal: f64,
    /// Mains rejection filter.
    pub filter: FilterMode,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks that both resistances are positive and finite.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if !is_positive_ohms(self.reference_resistance) {
            return Err(ConfigError::InvalidReferenceResistance);
        }

        if !is_positive_ohms(self.rtd_nominal) {
            return Err(ConfigError::InvalidNominalResistance);
        }

        Ok(())
    }
}

fn is_positive_ohms(ohms: f64) -> bool {
    ohms.is_finite() && ohms > 0.0
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the RTD lead configuration.
    pub fn wiring(mut self, wiring: Wiring) -> Self {
        self.config.wiring = wiring;
        self
    }

    /// Overrides the reference resistor value (ohms).
    pub fn reference_resistance(mut self, ohms: f64) -> Self {
        self.config.reference_resistance = ohms;
        self
    }

    /// Overrides the RTD nominal resistance at 0 °C (ohms).
    pub fn rtd_nominal(mut self, ohms: f64) -> Self {
        self.config.rtd_nominal = ohms;
        self
    }

    /// Selects the mains rejection filter.
    pub fn filter(mut self, filter: FilterMode) -> Self {
        self.config.filter = filter;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wiring: Wiring::Three,
            reference_resistance: DEFAULT_REFERENCE_RESISTANCE,
            rtd_nominal: PT100_NOMINAL_RESISTANCE,
            filter: FilterMode::Hz60,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Reference resistance is zero, negative or not finite.
    InvalidReferenceResistance,
    /// RTD nominal resistance is zero, negative or not finite.
    InvalidNominalResistance,
    /// Lead count other than 2, 3 or 4.
    UnsupportedWiring(u8),
}
