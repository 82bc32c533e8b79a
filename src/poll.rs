//! Blocking acquisition loop.
//!
//! The caller injects the delay source and decides when to stop, so the loop
//! runs unchanged against real hardware or test doubles.

use core::ops::ControlFlow;

use embedded_hal::delay::DelayNs;

use crate::device::{Max31865, Measurement};
use crate::error::Result;
use crate::interface::Max31865Interface;

/// Interval between measurements in the reference setup (milliseconds).
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 1_000;

/// Reads a measurement, hands it to `on_measurement` and sleeps for
/// `interval_ms`, until the callback breaks or the bus fails.
///
/// No delay is issued after the final measurement.
pub fn run<IFACE, CommE, D, F>(
    device: &mut Max31865<IFACE>,
    delay: &mut D,
    interval_ms: u32,
    mut on_measurement: F,
) -> Result<(), CommE>
where
    IFACE: Max31865Interface<Error = CommE>,
    D: DelayNs,
    F: FnMut(Measurement) -> ControlFlow<()>,
{
    loop {
        let measurement = device.read_measurement()?;
        if on_measurement(measurement).is_break() {
            return Ok(());
        }
        delay.delay_ms(interval_ms);
    }
}
