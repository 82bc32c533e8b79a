//! Raw code to resistance to temperature conversions.
//!
//! Temperature uses the linear Pt100 approximation
//! `R(T) = R0 * (1 + alpha * T)`, which is only accurate near 0 °C.

/// Divisor mapping a 15-bit RTD code onto the reference resistance.
pub const RTD_FULL_SCALE: f64 = 32_768.0;
/// Mean temperature coefficient of the IEC 60751 platinum curve (1/°C).
pub const PT100_ALPHA: f64 = 0.003_85;
/// Reference resistor fitted on common Pt100 breakout boards (ohms).
pub const DEFAULT_REFERENCE_RESISTANCE: f64 = 430.0;
/// Pt100 resistance at 0 °C (ohms).
pub const PT100_NOMINAL_RESISTANCE: f64 = 100.0;

/// Largest value [`rtd_code`] can produce.
pub const RTD_CODE_MAX: u16 = 0x7FFF;

/// Combines the `RTD_MSB`/`RTD_LSB` pair and drops the fault flag (bit 0).
#[inline]
pub const fn rtd_code(msb: u8, lsb: u8) -> u16 {
    u16::from_be_bytes([msb, lsb]) >> 1
}

/// Converts an RTD code into ohms.
#[inline]
pub fn code_to_resistance(code: u16, reference_resistance: f64) -> f64 {
    (f64::from(code) * reference_resistance) / RTD_FULL_SCALE
}

/// Converts a measured resistance into degrees Celsius.
#[inline]
pub fn resistance_to_temperature(resistance: f64, rtd_nominal: f64) -> f64 {
    (resistance / rtd_nominal - 1.0) / PT100_ALPHA
}

/// Converts an RTD code straight into degrees Celsius.
pub fn code_to_temperature(code: u16, reference_resistance: f64, rtd_nominal: f64) -> f64 {
    resistance_to_temperature(code_to_resistance(code, reference_resistance), rtd_nominal)
}
