//! SPI interface that owns the chip-select line, built on `embedded-hal` `SpiBus`.
//!
//! Every transaction drives `CS` low, runs the transfer, flushes the bus and
//! drives `CS` high again. The release happens on every exit path, including
//! when the transfer itself fails.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use super::{BusError, Max31865Interface};
use crate::registers::{read_address, write_address};

/// `SpiBus` + chip-select implementation for the MAX31865 driver.
pub struct ChipSelectInterface<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> ChipSelectInterface<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Creates a new interface and parks chip-select in its idle (high) state.
    pub fn new(spi: SPI, mut cs: CS) -> core::result::Result<Self, BusError<SPI::Error, CS::Error>> {
        cs.set_high().map_err(BusError::ChipSelect)?;
        Ok(Self { spi, cs })
    }

    /// Consumes the interface and returns the owned bus and chip-select pin.
    ///
    /// Chip-select is already deasserted: no transaction leaves it low.
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    /// Runs `transfer` with chip-select asserted.
    fn framed<F>(&mut self, transfer: F) -> core::result::Result<(), BusError<SPI::Error, CS::Error>>
    where
        F: FnOnce(&mut SPI) -> core::result::Result<(), SPI::Error>,
    {
        if let Err(err) = self.cs.set_low() {
            // State of the line is unknown; try to park it before bailing.
            let _ = self.cs.set_high();
            return Err(BusError::ChipSelect(err));
        }

        let spi = &mut self.spi;
        let transferred = transfer(spi).and_then(|()| spi.flush());
        let released = self.cs.set_high();

        if let Err(err) = transferred {
            warn!("SPI transfer failed, chip-select released");
            return Err(BusError::Spi(err));
        }
        released.map_err(BusError::ChipSelect)
    }
}

impl<SPI, CS> Max31865Interface for ChipSelectInterface<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    type Error = BusError<SPI::Error, CS::Error>;

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        let frame = [write_address(register), value];
        self.framed(|spi| spi.write(&frame))
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if buf.is_empty() {
            return Err(BusError::EmptyRead);
        }

        let command = [read_address(register)];
        self.framed(|spi| {
            spi.write(&command)?;
            spi.read(buf)
        })
    }
}
