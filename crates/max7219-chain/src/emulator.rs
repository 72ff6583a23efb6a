//! Software model of a MAX7219 chain for host runs and tests.
//!
//! Bytes shift through a `2 * chip_count` byte register exactly as they
//! would through the chips' DIN/DOUT pins; a LOAD rising edge commits the pair
//! each chip holds at that moment.

use core::{cell::RefCell, convert::Infallible};

use embedded_hal::{
    delay::DelayNs,
    digital::{self, OutputPin},
    spi::{self, SpiBus},
};

use crate::protocol::{
    DECODE_MODE, DIGIT_COUNT, DISPLAY_TEST, FRAME_CAPACITY, Frame, INTENSITY, MAX_CHIPS, NOOP,
    SCAN_LIMIT, SHUTDOWN, is_digit_register,
};

/// Register state of one emulated chip.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChipState {
    /// Digit registers as received on the wire.
    pub digits: [u8; DIGIT_COUNT],
    pub intensity: u8,
    pub shutdown: bool,
    pub display_test: bool,
    pub decode_mode: u8,
    pub scan_limit: u8,
}

impl ChipState {
    const POWER_ON: Self = Self {
        digits: [0xFF; DIGIT_COUNT],
        intensity: 0,
        shutdown: true,
        display_test: false,
        decode_mode: 0,
        scan_limit: 0,
    };

    /// Lit columns, bit `n` = row `n`, with the wire inversion undone.
    pub fn columns(&self) -> [u8; DIGIT_COUNT] {
        self.digits.map(|digit| digit ^ 0xFF)
    }

    pub fn is_lit(&self, column: usize, row: usize) -> bool {
        if column >= DIGIT_COUNT || row >= 8 {
            return false;
        }

        self.columns()[column] & (1 << row) != 0
    }

    fn apply(&mut self, register: u8, data: u8) {
        match register {
            NOOP => {}
            r if is_digit_register(r) => self.digits[(r - 1) as usize] = data,
            DECODE_MODE => self.decode_mode = data,
            INTENSITY => self.intensity = data & 0x0F,
            SCAN_LIMIT => self.scan_limit = data & 0x07,
            SHUTDOWN => self.shutdown = data & 0x01 == 0,
            DISPLAY_TEST => self.display_test = data & 0x01 != 0,
            _ => {}
        }
    }
}

/// Emulated chain plus bus bookkeeping.
#[derive(Clone, Debug)]
pub struct ChainEmulator {
    chips: [ChipState; MAX_CHIPS],
    chip_count: usize,
    shift: [u8; FRAME_CAPACITY],
    latch_high: bool,
    current: Frame,
    last_frame: Frame,
    transactions: usize,
    bytes_sent: usize,
    delay_calls: usize,
    delayed_ns: u64,
}

impl ChainEmulator {
    /// Creates a powered-on chain, `chip_count` clamped to `1..=MAX_CHIPS`.
    pub fn new(chip_count: usize) -> Self {
        Self {
            chips: [ChipState::POWER_ON; MAX_CHIPS],
            chip_count: chip_count.clamp(1, MAX_CHIPS),
            shift: [0u8; FRAME_CAPACITY],
            latch_high: true,
            current: Frame::new(),
            last_frame: Frame::new(),
            transactions: 0,
            bytes_sent: 0,
            delay_calls: 0,
            delayed_ns: 0,
        }
    }

    pub fn chip_count(&self) -> usize {
        self.chip_count
    }

    /// Chip state by physical index, 0 = farthest from the controller.
    pub fn chip(&self, index: usize) -> Option<&ChipState> {
        self.chips[..self.chip_count].get(index)
    }

    /// Completed LOAD low/high cycles.
    pub fn transactions(&self) -> usize {
        self.transactions
    }

    pub fn bytes_sent(&self) -> usize {
        self.bytes_sent
    }

    pub fn pairs_sent(&self) -> usize {
        self.bytes_sent / 2
    }

    /// Bytes of the most recently latched transaction.
    ///
    /// Holds at most [`FRAME_CAPACITY`] bytes; anything a transaction shifts
    /// past that is counted in [`Self::bytes_sent`] but not recorded here.
    pub fn last_frame(&self) -> &[u8] {
        &self.last_frame
    }

    pub fn delay_calls(&self) -> usize {
        self.delay_calls
    }

    pub fn delayed_ms(&self) -> u64 {
        self.delayed_ns / 1_000_000
    }

    /// Clears bus and delay counters, keeping chip state.
    pub fn reset_counters(&mut self) {
        self.transactions = 0;
        self.bytes_sent = 0;
        self.delay_calls = 0;
        self.delayed_ns = 0;
        self.last_frame.clear();
    }

    /// Shifts one byte in at the controller end and returns the byte that
    /// falls out of the farthest chip.
    fn shift_in(&mut self, byte: u8) -> u8 {
        let len = self.chip_count * 2;
        let out = self.shift[0];
        self.shift.copy_within(1..len, 0);
        self.shift[len - 1] = byte;

        self.bytes_sent += 1;
        if !self.latch_high {
            let _ = self.current.push(byte);
        }

        out
    }

    fn set_latch(&mut self, high: bool) {
        match (self.latch_high, high) {
            (true, false) => self.current.clear(),
            (false, true) => {
                for (chip, pair) in self.chips[..self.chip_count]
                    .iter_mut()
                    .zip(self.shift.chunks_exact(2))
                {
                    chip.apply(pair[0], pair[1]);
                }
                self.transactions += 1;
                self.last_frame = self.current.clone();
            }
            _ => {}
        }

        self.latch_high = high;
    }

    fn record_delay(&mut self, ns: u64) {
        self.delay_calls += 1;
        self.delayed_ns += ns;
    }
}

/// Hands out the SPI, LOAD and delay halves of one emulated chain.
pub fn handles(
    chain: &RefCell<ChainEmulator>,
) -> (EmulatedSpi<'_>, EmulatedLoad<'_>, EmulatedDelay<'_>) {
    (
        EmulatedSpi { chain },
        EmulatedLoad { chain },
        EmulatedDelay { chain },
    )
}

/// SPI half of an emulated chain.
#[derive(Clone, Copy, Debug)]
pub struct EmulatedSpi<'a> {
    chain: &'a RefCell<ChainEmulator>,
}

impl spi::ErrorType for EmulatedSpi<'_> {
    type Error = Infallible;
}

impl SpiBus<u8> for EmulatedSpi<'_> {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let mut chain = self.chain.borrow_mut();
        for word in words {
            *word = chain.shift_in(0x00);
        }
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        let mut chain = self.chain.borrow_mut();
        for &word in words {
            chain.shift_in(word);
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        let mut chain = self.chain.borrow_mut();
        for i in 0..read.len().max(write.len()) {
            let out = chain.shift_in(write.get(i).copied().unwrap_or(0x00));
            if let Some(slot) = read.get_mut(i) {
                *slot = out;
            }
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let mut chain = self.chain.borrow_mut();
        for word in words {
            *word = chain.shift_in(*word);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// LOAD pin half of an emulated chain.
#[derive(Clone, Copy, Debug)]
pub struct EmulatedLoad<'a> {
    chain: &'a RefCell<ChainEmulator>,
}

impl digital::ErrorType for EmulatedLoad<'_> {
    type Error = Infallible;
}

impl OutputPin for EmulatedLoad<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.chain.borrow_mut().set_latch(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.chain.borrow_mut().set_latch(true);
        Ok(())
    }
}

/// Delay that only records how long it was asked to wait.
#[derive(Clone, Copy, Debug)]
pub struct EmulatedDelay<'a> {
    chain: &'a RefCell<ChainEmulator>,
}

impl DelayNs for EmulatedDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.chain.borrow_mut().record_delay(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.chain.borrow_mut().record_delay(u64::from(us) * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.chain.borrow_mut().record_delay(u64::from(ms) * 1_000_000);
    }
}
