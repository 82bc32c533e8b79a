//! Register map definitions for the MAX31865 RTD converter.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{ConversionMode, FilterMode};

/// Register address of `CONFIG`.
pub const REG_CONFIG: u8 = 0x00;
/// Register address of `RTD_MSB`.
pub const REG_RTD_MSB: u8 = 0x01;
/// Register address of `RTD_LSB`.
pub const REG_RTD_LSB: u8 = 0x02;
/// Register address of `HIGH_FAULT_THRESHOLD_MSB`.
pub const REG_HIGH_FAULT_THRESHOLD_MSB: u8 = 0x03;
/// Register address of `HIGH_FAULT_THRESHOLD_LSB`.
pub const REG_HIGH_FAULT_THRESHOLD_LSB: u8 = 0x04;
/// Register address of `LOW_FAULT_THRESHOLD_MSB`.
pub const REG_LOW_FAULT_THRESHOLD_MSB: u8 = 0x05;
/// Register address of `LOW_FAULT_THRESHOLD_LSB`.
pub const REG_LOW_FAULT_THRESHOLD_LSB: u8 = 0x06;
/// Register address of `FAULT_STATUS`.
pub const REG_FAULT_STATUS: u8 = 0x07;

/// Address bit 7 selects a write transaction; cleared means read.
pub const WRITE_FLAG: u8 = 0x80;

/// Number of bytes in the `RTD_MSB`/`RTD_LSB` pair.
pub const RTD_DATA_BYTES: usize = 2;

/// Base configuration: Vbias on, automatic conversion, fault status clear.
pub const BASE_CONFIGURATION: u8 = 0xC2;

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Read/write register.
    ReadWrite,
}

/// Minimal metadata exposed by every register value type.
pub trait Register {
    /// Raw storage backing the register payload.
    type Raw: Copy;
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
    /// Access permission classification.
    const ACCESS: RegisterAccess;
    /// Optional reset/default value defined by the datasheet.
    const RESET_VALUE: Option<Self::Raw>;
}

/// Command byte that reads `register`.
#[inline]
pub const fn read_address(register: u8) -> u8 {
    register & !WRITE_FLAG
}

/// Command byte that writes `register`.
#[inline]
pub const fn write_address(register: u8) -> u8 {
    register | WRITE_FLAG
}

/// Bitfield representation of the `CONFIG` register (address `0x00`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    // 50/60 Hz filter select (bit 0).
    pub filter: FilterMode,
    // Fault status clear, self-clearing (bit 1).
    pub fault_clear: bool,
    // Fault detection cycle control (bits 3:2), left at 0.
    #[skip]
    __: B2,
    // 3-wire RTD select (bit 4).
    pub three_wire: bool,
    // One-shot conversion request (bit 5).
    pub one_shot: bool,
    // Conversion mode (bit 6).
    pub conversion_mode: ConversionMode,
    // Bias voltage enable (bit 7).
    pub vbias: bool,
}

impl From<u8> for Configuration {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Configuration> for u8 {
    fn from(value: Configuration) -> Self {
        value.into_bytes()[0]
    }
}

impl Register for Configuration {
    type Raw = u8;
    const ADDRESS: u8 = REG_CONFIG;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

#[cfg(feature = "defmt")]
impl defmt::Format for Configuration {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Configuration {{ VBIAS: {}, MODE: {}, 1SHOT: {}, 3WIRE: {}, FAULT_CLR: {}, FILTER: {} }}",
            self.vbias(),
            self.conversion_mode(),
            self.one_shot(),
            self.three_wire(),
            self.fault_clear(),
            self.filter()
        );
    }
}

/// The 15-bit conversion result held in `RTD_MSB`/`RTD_LSB` (`0x01`-`0x02`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtdData;

impl Register for RtdData {
    type Raw = u16;
    const ADDRESS: u8 = REG_RTD_MSB;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: Option<Self::Raw> = Some(0x0000);
}
