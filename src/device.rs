//! High-level MAX31865 device driver implementation.

use crate::config::Config;
use crate::conversion::{code_to_resistance, resistance_to_temperature, rtd_code};
use crate::error::{Error, Result};
use crate::interface::bus::ChipSelectInterface;
use crate::interface::spi::SpiInterface;
use crate::interface::{BusError, Max31865Interface};
use crate::params::ConversionMode;
use crate::registers::{BASE_CONFIGURATION, Configuration, RTD_DATA_BYTES, Register, RtdData};
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{SpiBus, SpiDevice};

/// High-level synchronous driver for the MAX31865 RTD converter.
///
/// The configuration register is written during construction, so a value of
/// this type always refers to a configured chip.
pub struct Max31865<IFACE> {
    interface: IFACE,
    config: Config,
}

/// One conversion expressed in every unit the driver knows about.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// 15-bit RTD code with the fault flag removed.
    pub code: u16,
    /// RTD resistance in ohms.
    pub resistance: f64,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
}

impl Configuration {
    /// Builds the register value that realises `config`.
    pub fn from_config(config: &Config) -> Self {
        let mut register = Self::from(BASE_CONFIGURATION);
        register.set_three_wire(config.wiring.is_three_wire());
        register.set_filter(config.filter);
        register
    }
}

impl<IFACE> Max31865<IFACE> {
    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> (IFACE, Config) {
        (self.interface, self.config)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<SPI, CS> Max31865<ChipSelectInterface<SPI, CS>>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Convenience constructor for a bus plus a driver-managed chip-select pin.
    pub fn new_spi(spi: SPI, cs: CS, config: Config) -> Result<Self, BusError<SPI::Error, CS::Error>> {
        Self::new(ChipSelectInterface::new(spi, cs)?, config)
    }

    /// Releases the driver, returning the bus, chip-select pin and configuration.
    pub fn release_spi(self) -> (SPI, CS, Config) {
        let (iface, config) = self.release();
        let (spi, cs) = iface.release();
        (spi, cs, config)
    }
}

impl<SPI> Max31865<SpiInterface<SPI>>
where
    SPI: SpiDevice,
{
    /// Convenience constructor for HAL-managed chip-select.
    pub fn new_device(spi: SPI, config: Config) -> Result<Self, BusError<SPI::Error>> {
        Self::new(SpiInterface::new(spi), config)
    }

    /// Releases the driver, returning the SPI device and configuration.
    pub fn release_device(self) -> (SPI, Config) {
        let (iface, config) = self.release();
        (iface.release(), config)
    }
}

impl<IFACE, CommE> Max31865<IFACE>
where
    IFACE: Max31865Interface<Error = CommE>,
{
    // ==================================================================
    // == Construction & Configuration ==================================
    // ==================================================================
    /// Creates a driver and writes `config` to the chip.
    ///
    /// The register is not read back after the write.
    pub fn new(interface: IFACE, config: Config) -> Result<Self, CommE> {
        config.validate().map_err(Error::InvalidConfig)?;

        let mut device = Self { interface, config };
        device.write_configuration(Configuration::from_config(&config))?;
        Ok(device)
    }

    /// Applies a new configuration to the device.
    ///
    /// The stored configuration only changes once the register write succeeds.
    pub fn configure(&mut self, config: Config) -> Result<(), CommE> {
        config.validate().map_err(Error::InvalidConfig)?;

        self.write_configuration(Configuration::from_config(&config))?;
        self.config = config;
        Ok(())
    }

    /// Reads the `CONFIG` register back for diagnostics.
    pub fn read_configuration(&mut self) -> Result<Configuration, CommE> {
        let raw = self
            .interface
            .read_register(Configuration::ADDRESS)
            .map_err(Error::from)?;
        Ok(Configuration::from(raw))
    }

    /// Stops bias and automatic conversion, then hands the interface back.
    pub fn shutdown(mut self) -> Result<(IFACE, Config), CommE> {
        let mut idle = Configuration::from_config(&self.config);
        idle.set_vbias(false);
        idle.set_conversion_mode(ConversionMode::NormallyOff);
        idle.set_fault_clear(false);

        self.write_configuration(idle)?;
        Ok(self.release())
    }

    fn write_configuration(&mut self, register: Configuration) -> Result<(), CommE> {
        let value = u8::from(register);
        self.interface
            .write_register(Configuration::ADDRESS, value)
            .map_err(Error::from)?;
        debug!("CONFIG <- {=u8:#x}", value);
        Ok(())
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Reads the 15-bit RTD conversion code.
    ///
    /// Fetches `RTD_MSB` and `RTD_LSB` in a single transaction and drops the
    /// fault flag in bit 0. The result lies in `0..=32767`.
    pub fn read_raw_code(&mut self) -> Result<u16, CommE> {
        let mut raw = [0u8; RTD_DATA_BYTES];
        self.interface
            .read_many(RtdData::ADDRESS, &mut raw)
            .map_err(Error::from)?;

        let code = rtd_code(raw[0], raw[1]);
        trace!("RTD code {=u16}", code);
        Ok(code)
    }

    /// Reads the RTD resistance in ohms using the configured reference resistor.
    pub fn read_resistance(&mut self) -> Result<f64, CommE> {
        self.read_resistance_with(self.config.reference_resistance)
    }

    /// Reads the RTD resistance in ohms against an explicit reference resistor.
    pub fn read_resistance_with(&mut self, reference_resistance: f64) -> Result<f64, CommE> {
        let code = self.read_raw_code()?;
        Ok(code_to_resistance(code, reference_resistance))
    }

    /// Reads the temperature in degrees Celsius using the configured resistances.
    pub fn read_temperature(&mut self) -> Result<f64, CommE> {
        self.read_temperature_with(self.config.reference_resistance, self.config.rtd_nominal)
    }

    /// Reads the temperature in degrees Celsius with explicit resistances.
    ///
    /// Uses the linear approximation `(R / R0 - 1) / 0.00385`, so accuracy
    /// degrades away from 0 °C.
    pub fn read_temperature_with(
        &mut self,
        reference_resistance: f64,
        rtd_nominal: f64,
    ) -> Result<f64, CommE> {
        let resistance = self.read_resistance_with(reference_resistance)?;
        Ok(resistance_to_temperature(resistance, rtd_nominal))
    }

    /// Reads one conversion and derives resistance and temperature from it.
    pub fn read_measurement(&mut self) -> Result<Measurement, CommE> {
        let code = self.read_raw_code()?;
        let resistance = code_to_resistance(code, self.config.reference_resistance);
        Ok(Measurement {
            code,
            resistance,
            temperature: resistance_to_temperature(resistance, self.config.rtd_nominal),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::params::{FilterMode, Wiring};

    /// Interface double recording writes and serving canned RTD bytes.
    #[derive(Default)]
    struct FakeInterface {
        writes: Vec<(u8, u8)>,
        reads: Vec<(u8, usize)>,
        rtd: [u8; 2],
        config: u8,
        fail: bool,
    }

    #[derive(Debug, PartialEq)]
    struct FakeError;

    impl Max31865Interface for FakeInterface {
        type Error = FakeError;

        fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), FakeError> {
            if self.fail {
                return Err(FakeError);
            }
            self.writes.push((register, value));
            Ok(())
        }

        fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), FakeError> {
            if self.fail {
                return Err(FakeError);
            }
            self.reads.push((register, buf.len()));
            match register {
                0x00 => buf[0] = self.config,
                _ => buf.copy_from_slice(&self.rtd[..buf.len()]),
            }
            Ok(())
        }
    }

    fn device_with(wiring: Wiring, rtd: [u8; 2]) -> Max31865<FakeInterface> {
        let interface = FakeInterface {
            rtd,
            ..FakeInterface::default()
        };
        Max31865::new(interface, Config::new().wiring(wiring).build()).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() <= 1e-9 * expected.abs().max(1.0));
    }

    #[test]
    fn three_wire_sets_bit_four() {
        let device = device_with(Wiring::Three, [0; 2]);
        assert_eq!(device.interface.writes, vec![(0x00, 0xD2)]);
    }

    #[test]
    fn two_and_four_wire_keep_base_byte() {
        for wiring in [Wiring::Two, Wiring::Four] {
            let device = device_with(wiring, [0; 2]);
            let (register, value) = device.interface.writes[0];
            assert_eq!(register, 0x00);
            assert_eq!(value, 0xC2);
            assert_eq!(value & 0x10, 0);
        }
    }

    #[test]
    fn filter_selection_only_touches_bit_zero() {
        let interface = FakeInterface::default();
        let config = Config::new()
            .wiring(Wiring::Two)
            .filter(FilterMode::Hz50)
            .build();
        let device = Max31865::new(interface, config).unwrap();
        assert_eq!(device.interface.writes, vec![(0x00, 0xC3)]);
    }

    #[test]
    fn invalid_config_issues_no_transaction() {
        let config = Config::new().reference_resistance(-1.0).build();
        let result = Max31865::new(FakeInterface::default(), config);
        assert!(matches!(
            result,
            Err(Error::InvalidConfig(ConfigError::InvalidReferenceResistance))
        ));
    }

    #[test]
    fn construction_propagates_bus_failure() {
        let interface = FakeInterface {
            fail: true,
            ..FakeInterface::default()
        };
        let result = Max31865::new(interface, Config::default());
        assert!(matches!(result, Err(Error::Interface(FakeError))));
    }

    #[test]
    fn raw_code_reads_two_bytes_from_rtd_msb() {
        let mut device = device_with(Wiring::Three, [0x20, 0x01]);
        assert_eq!(device.read_raw_code().unwrap(), 4096);
        assert_eq!(device.interface.reads, vec![(0x01, 2)]);
    }

    #[test]
    fn raw_code_spans_fifteen_bits() {
        let mut device = device_with(Wiring::Three, [0xFF, 0xFF]);
        assert_eq!(device.read_raw_code().unwrap(), 32_767);
    }

    #[test]
    fn resistance_and_temperature_use_configured_values() {
        let mut device = device_with(Wiring::Three, [0x20, 0x00]);
        assert_eq!(device.read_resistance().unwrap(), 53.75);
        assert_close(device.read_temperature().unwrap(), -120.129_870_129_870_13);
        assert_eq!(device.interface.reads.len(), 2);
    }

    #[test]
    fn explicit_resistances_override_configuration() {
        let mut device = device_with(Wiring::Three, [0x20, 0x00]);
        assert_eq!(device.read_resistance_with(400.0).unwrap(), 50.0);
        assert_close(device.read_temperature_with(400.0, 50.0).unwrap(), 0.0);
    }

    #[test]
    fn measurement_uses_a_single_transaction() {
        let mut device = device_with(Wiring::Three, [0x20, 0x00]);
        let measurement = device.read_measurement().unwrap();
        assert_eq!(measurement.code, 4096);
        assert_eq!(measurement.resistance, 53.75);
        assert_close(measurement.temperature, -120.129_870_129_870_13);
        assert_eq!(device.interface.reads.len(), 1);
    }

    #[test]
    fn configure_keeps_previous_config_on_failure() {
        let mut device = device_with(Wiring::Three, [0; 2]);
        device.interface.fail = true;

        let result = device.configure(Config::new().wiring(Wiring::Two).build());
        assert!(matches!(result, Err(Error::Interface(FakeError))));
        assert_eq!(device.config().wiring, Wiring::Three);

        device.interface.fail = false;
        device
            .configure(Config::new().wiring(Wiring::Four).build())
            .unwrap();
        assert_eq!(device.config().wiring, Wiring::Four);
        assert_eq!(device.interface.writes.last(), Some(&(0x00, 0xC2)));
    }

    #[test]
    fn read_configuration_decodes_register() {
        let mut device = device_with(Wiring::Three, [0; 2]);
        device.interface.config = 0xD0;

        let register = device.read_configuration().unwrap();
        assert!(register.three_wire());
        assert!(register.vbias());
        assert!(!register.fault_clear());
        assert_eq!(device.interface.reads, vec![(0x00, 1)]);
    }

    #[test]
    fn shutdown_disables_bias_and_conversion() {
        let device = device_with(Wiring::Three, [0; 2]);
        let (interface, config) = device.shutdown().unwrap();
        assert_eq!(interface.writes, vec![(0x00, 0xD2), (0x00, 0x10)]);
        assert_eq!(config.wiring, Wiring::Three);
    }
}
