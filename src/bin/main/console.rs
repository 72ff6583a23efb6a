//! Terminal rendering of the emulated chain.

use std::{
    cell::RefCell,
    io::{self, Write},
    thread,
    time::Duration,
};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Print, PrintStyledContent, Stylize},
    terminal::{Clear, ClearType},
};
use embedded_hal::delay::DelayNs;
use log::warn;
use matrixchain_core::{ChainConfig, matrix::SIZE, slice_to_chip_index};
use max7219_chain::emulator::ChainEmulator;

/// Draws every chip in window order, left to right.
pub fn render(chain: &RefCell<ChainEmulator>, config: &ChainConfig) -> io::Result<()> {
    let chain = chain.borrow();
    let mut out = io::stdout().lock();

    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;

    for row in 0..SIZE {
        for slice in 0..config.chip_count {
            let chip = slice_to_chip_index(slice, config.chip_count, config.reversed);
            let Some(state) = chain.chip(chip) else {
                continue;
            };

            for column in 0..SIZE {
                let cell = if !state.shutdown && state.is_lit(column, row) {
                    "#".red().bold()
                } else {
                    ".".dark_grey()
                };
                queue!(out, PrintStyledContent(cell))?;
            }
            queue!(out, Print(' '))?;
        }
        queue!(out, Print('\n'))?;
    }

    queue!(out, Print(format!("transactions {}", chain.transactions())))?;
    for slice in 0..config.chip_count {
        let chip = slice_to_chip_index(slice, config.chip_count, config.reversed);
        if let Some(state) = chain.chip(chip) {
            queue!(out, Print(format!(" | chip {chip} i={:>2}", state.intensity)))?;
        }
    }
    queue!(out, Print('\n'))?;

    out.flush()
}

/// Delay that redraws the chain before sleeping, so every controller pause
/// shows up as one animation frame.
pub struct TerminalDelay<'a> {
    chain: &'a RefCell<ChainEmulator>,
    config: ChainConfig,
}

impl<'a> TerminalDelay<'a> {
    pub fn new(chain: &'a RefCell<ChainEmulator>, config: ChainConfig) -> Self {
        Self { chain, config }
    }

    fn redraw(&self) {
        if let Err(err) = render(self.chain, &self.config) {
            warn!("console: redraw failed: {}", err);
        }
    }
}

impl DelayNs for TerminalDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.redraw();
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        self.redraw();
        thread::sleep(Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.redraw();
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
