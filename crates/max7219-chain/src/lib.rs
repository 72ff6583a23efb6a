#![cfg_attr(not(test), no_std)]

//! MAX7219 daisy-chain driver primitives.
//!
//! The chain is driven through three `embedded-hal` primitives: an SPI bus for
//! shifting bytes, an output pin for the LOAD (latch) line, and a delay owned
//! by the caller.

pub mod emulator;
pub mod protocol;

use embedded_hal::{digital::OutputPin, spi::SpiBus};
use log::{debug, trace};

/// Driver errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Error<SpiErr, LoadErr> {
    /// SPI transfer failed.
    Spi(SpiErr),
    /// LOAD pin operation failed.
    Load(LoadErr),
    /// Input parameters are outside supported bounds.
    InvalidInput,
}

impl<SpiErr, LoadErr> core::fmt::Display for Error<SpiErr, LoadErr>
where
    SpiErr: core::fmt::Debug,
    LoadErr: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(err) => write!(f, "spi transfer failed: {err:?}"),
            Self::Load(err) => write!(f, "load pin failed: {err:?}"),
            Self::InvalidInput => f.write_str("invalid input"),
        }
    }
}

pub type DriverResult<SpiErr, LoadErr> = Result<(), Error<SpiErr, LoadErr>>;

/// A chain of MAX7219 chips sharing one SPI bus and one LOAD line.
#[derive(Debug)]
pub struct Max7219Chain<SPI, LOAD> {
    spi: SPI,
    load: LOAD,
    chip_count: usize,
}

impl<SPI, LOAD> Max7219Chain<SPI, LOAD>
where
    SPI: SpiBus<u8>,
    LOAD: OutputPin,
{
    /// Creates a driver for a single chip; see [`Self::set_chip_count`].
    pub fn new(spi: SPI, load: LOAD) -> Self {
        Self {
            spi,
            load,
            chip_count: 1,
        }
    }

    pub fn chip_count(&self) -> usize {
        self.chip_count
    }

    /// Changes the chain length used to size every following transaction.
    pub fn set_chip_count(&mut self, chip_count: usize) -> DriverResult<SPI::Error, LOAD::Error> {
        if !(1..=protocol::MAX_CHIPS).contains(&chip_count) {
            return Err(Error::InvalidInput);
        }

        self.chip_count = chip_count;
        Ok(())
    }

    /// Releases owned bus and pin.
    pub fn release(self) -> (SPI, LOAD) {
        (self.spi, self.load)
    }

    /// Writes the same register value into every chip.
    pub fn broadcast(&mut self, register: u8, data: u8) -> DriverResult<SPI::Error, LOAD::Error> {
        let frame = protocol::build_broadcast_frame(self.chip_count, register, data)
            .ok_or(Error::InvalidInput)?;
        self.transmit(&frame)
    }

    /// Writes a register value into one chip, leaving the others untouched.
    ///
    /// A `chip` outside the chain is ignored without touching the bus.
    pub fn write_to(
        &mut self,
        register: u8,
        data: u8,
        chip: usize,
    ) -> DriverResult<SPI::Error, LOAD::Error> {
        let Some(frame) = protocol::build_targeted_frame(self.chip_count, register, data, chip)
        else {
            trace!("max7219: chip {} not in chain of {}", chip, self.chip_count);
            return Ok(());
        };

        self.transmit(&frame)
    }

    /// Runs the register setup sequence and leaves every chip running.
    pub fn initialize(&mut self, intensity: u8) -> DriverResult<SPI::Error, LOAD::Error> {
        debug!(
            "max7219: init chips={} intensity={}",
            self.chip_count, intensity
        );

        self.broadcast(protocol::SHUTDOWN, 0)?;
        self.broadcast(protocol::DISPLAY_TEST, 0)?;
        self.broadcast(protocol::DECODE_MODE, 0)?;
        self.broadcast(protocol::SCAN_LIMIT, (protocol::DIGIT_COUNT - 1) as u8)?;
        self.broadcast(protocol::INTENSITY, intensity.min(protocol::MAX_INTENSITY))?;
        self.broadcast(protocol::SHUTDOWN, 1)
    }

    /// LOAD low, all pairs, LOAD high.
    fn transmit(&mut self, frame: &[u8]) -> DriverResult<SPI::Error, LOAD::Error> {
        self.load.set_low().map_err(Error::Load)?;

        for pair in frame.chunks_exact(2) {
            self.spi.write(pair).map_err(Error::Spi)?;
        }
        self.spi.flush().map_err(Error::Spi)?;

        self.load.set_high().map_err(Error::Load)
    }
}
