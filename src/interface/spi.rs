//! SPI interface implementation built on top of `embedded-hal` `SpiDevice`.
//!
//! Use this when the HAL (or `embedded-hal-bus`) already manages chip-select.

use embedded_hal::spi::{Operation, SpiDevice};

use super::{BusError, Max31865Interface};
use crate::registers::{read_address, write_address};

/// SPI-device-based interface implementation for the MAX31865 driver.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Creates a new interface from the provided SPI device abstraction.
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Provides mutable access to the wrapped SPI device.
    pub fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Consumes the interface and returns the owned SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> Max31865Interface for SpiInterface<SPI>
where
    SPI: SpiDevice,
{
    type Error = BusError<SPI::Error>;

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        let frame = [write_address(register), value];
        self.spi.write(&frame).map_err(BusError::Spi)
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if buf.is_empty() {
            return Err(BusError::EmptyRead);
        }

        let command = [read_address(register)];
        let mut operations = [Operation::Write(&command), Operation::Read(buf)];
        self.spi.transaction(&mut operations).map_err(BusError::Spi)
    }
}

#[cfg(test)]
mod tests {
    use super::SpiInterface;
    use crate::interface::{BusError, Max31865Interface};
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    #[test]
    fn read_many_transfers_command_and_fills_buffer() {
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x01]),
            SpiTransaction::read_vec(vec![0x3A, 0x55]),
            SpiTransaction::transaction_end(),
        ];
        let mut interface = SpiInterface::new(SpiMock::new(&expectations));

        let mut buffer = [0u8; 2];
        interface.read_many(0x01, &mut buffer).unwrap();
        assert_eq!(buffer, [0x3A, 0x55]);

        interface.release().done();
    }

    #[test]
    fn write_register_sends_flagged_address_and_value() {
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x80, 0xC2]),
            SpiTransaction::transaction_end(),
        ];
        let mut interface = SpiInterface::new(SpiMock::new(&expectations));

        interface.write_register(0x00, 0xC2).unwrap();

        interface.release().done();
    }

    #[test]
    fn read_register_reuses_read_many() {
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x07]),
            SpiTransaction::read_vec(vec![0x00]),
            SpiTransaction::transaction_end(),
        ];
        let mut interface = SpiInterface::new(SpiMock::new(&expectations));

        assert_eq!(interface.read_register(0x07).unwrap(), 0x00);

        interface.release().done();
    }

    #[test]
    fn read_many_rejects_empty_buffer() {
        let mut interface = SpiInterface::new(SpiMock::<u8>::new(&[]));

        let result = interface.read_many(0x01, &mut []);
        assert!(matches!(result, Err(BusError::EmptyRead)));

        interface.release().done();
    }
}
