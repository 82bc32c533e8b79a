//! Bus interface abstraction for the MAX31865 driver.

pub mod bus;
pub mod spi;

use embedded_hal::spi::{MODE_3, Mode};

/// SPI mode required by the MAX31865 (CPOL = 1, CPHA = 1).
pub const MODE: Mode = MODE_3;

/// SPI clock used by the reference wiring; the chip accepts up to 5 MHz.
pub const DEFAULT_SPI_FREQUENCY_HZ: u32 = 500_000;

/// Abstraction over the low-level bus access required by the driver.
pub trait Max31865Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Writes a single register.
    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error>;

    /// Reads `buf.len()` consecutive registers starting at `register`.
    ///
    /// An empty buffer is a caller error and must be rejected without
    /// touching the bus.
    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error>;

    /// Reads a single register.
    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.read_many(register, &mut value)?;
        Ok(value[0])
    }
}

/// Errors raised by the bundled SPI transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError<SpiE, PinE = core::convert::Infallible> {
    /// The SPI peripheral failed the transfer.
    Spi(SpiE),
    /// Driving the chip-select line failed.
    ChipSelect(PinE),
    /// A read was requested with a zero-length buffer.
    EmptyRead,
}
