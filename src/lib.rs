//! `#![no_std]` driver for the MAX31865 RTD-to-digital converter.
//!
//! The driver configures the chip once on construction and then turns the
//! 15-bit RTD conversion code into ohms and degrees Celsius.
//!
//! ```rust
//! use max31865::conversion::{code_to_resistance, resistance_to_temperature};
//!
//! let ohms = code_to_resistance(4096, 430.0);
//! assert_eq!(ohms, 53.75);
//! let celsius = resistance_to_temperature(ohms, 100.0);
//! assert!((celsius + 120.129_870_129_87).abs() < 1e-9);
//! ```
#![cfg_attr(not(test), no_std)]

mod error;
#[macro_use]
mod log;

pub mod config;
pub mod conversion;
pub mod device;
pub mod interface;
pub mod params;
pub mod poll;
pub mod registers;

pub use crate::config::{Config, ConfigError};
pub use crate::device::{Max31865, Measurement};
pub use crate::error::{Error, Result};
pub use crate::interface::{BusError, Max31865Interface};
