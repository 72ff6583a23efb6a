//! Top-level controller owning the chain, its configuration, the framebuffer
//! and the glyph table.

use core::fmt::Write as _;

use embedded_hal::{
    delay::DelayNs,
    digital::{self, OutputPin},
    spi::{self, SpiBus},
};
use heapless::String;
use log::{debug, warn};
use max7219_chain::{
    DriverResult, Max7219Chain,
    protocol::{self, DIGIT_COUNT, MAX_INTENSITY},
};
use rand_core::RngCore;

use crate::{
    bytes::{self, ByteList},
    config::{ChainConfig, Target, slice_to_chip_index},
    error::{ByteParseError, ConfigError, DisplayError, GlyphError, LayoutError},
    framebuffer::{FrameBuffer, MARGIN},
    glyph::GlyphTable,
    matrix::{Matrix8x8, Rotation},
    scroll::{TextScroll, layout_text},
};

/// Step delay of diagnostic messages.
pub const DIAGNOSTIC_STEP_MS: u32 = 75;
/// Pause after a diagnostic message has scrolled through.
pub const DIAGNOSTIC_END_MS: u32 = 500;

const DIAGNOSTIC_BYTES: usize = 64;

/// Driver error for a given bus and LOAD pin.
pub type BusError<SPI, LOAD> =
    max7219_chain::Error<<SPI as spi::ErrorType>::Error, <LOAD as digital::ErrorType>::Error>;

pub type DisplayResult<T, SPI, LOAD> = Result<T, DisplayError<BusError<SPI, LOAD>>>;

/// Failed [`DisplayController::new`], with the parts it was given.
pub struct SetupFailure<SPI, LOAD, DELAY>
where
    SPI: spi::ErrorType,
    LOAD: digital::ErrorType,
{
    pub error: DisplayError<BusError<SPI, LOAD>>,
    pub chain: Max7219Chain<SPI, LOAD>,
    pub delay: DELAY,
}

/// A chain of 8x8 modules presented as one wide display.
///
/// Every operation runs to completion on the calling thread; scrolling
/// blocks for the whole animation.
pub struct DisplayController<SPI, LOAD, DELAY> {
    chain: Max7219Chain<SPI, LOAD>,
    delay: DELAY,
    config: ChainConfig,
    frame: FrameBuffer,
    glyphs: GlyphTable,
    diagnostics: bool,
    reporting: bool,
}

impl<SPI, LOAD, DELAY> DisplayController<SPI, LOAD, DELAY>
where
    SPI: SpiBus<u8>,
    LOAD: OutputPin,
    DELAY: DelayNs,
{
    /// Takes ownership of the chain and runs [`Self::configure`].
    ///
    /// An invalid configuration is rejected before any bus activity. On any
    /// failure the chain and delay are handed back in the [`SetupFailure`].
    pub fn new(
        chain: Max7219Chain<SPI, LOAD>,
        delay: DELAY,
        config: ChainConfig,
    ) -> Result<Self, SetupFailure<SPI, LOAD, DELAY>> {
        if let Err(err) = config.validate() {
            return Err(SetupFailure {
                error: err.into(),
                chain,
                delay,
            });
        }

        let mut display = Self {
            chain,
            delay,
            config,
            frame: FrameBuffer::new(config.chip_count),
            glyphs: GlyphTable::new(),
            diagnostics: false,
            reporting: false,
        };

        match display.configure(config) {
            Ok(()) => Ok(display),
            Err(error) => {
                let (chain, delay) = display.release();
                Err(SetupFailure {
                    error,
                    chain,
                    delay,
                })
            }
        }
    }

    /// Applies a chain configuration, re-initialises every chip and blanks
    /// them.
    ///
    /// Safe to repeat. Framebuffer content is kept (grown or cut to the new
    /// size) and custom glyphs survive.
    pub fn configure(&mut self, config: ChainConfig) -> DisplayResult<(), SPI, LOAD> {
        config.validate()?;
        self.chain
            .set_chip_count(config.chip_count)
            .map_err(DisplayError::Bus)?;
        self.frame.resize(config.chip_count);
        self.config = config;

        debug!(
            "display: configure chips={} rotation={:?} reversed={} intensity={}",
            config.chip_count, config.rotation, config.reversed, config.intensity
        );

        self.chain
            .initialize(config.intensity)
            .map_err(DisplayError::Bus)?;
        self.clear(Target::All)
    }

    /// Changes module orientation without touching the bus.
    pub fn set_orientation(&mut self, rotation: Rotation, reversed: bool) {
        self.config.rotation = rotation;
        self.config.reversed = reversed;
    }

    pub fn config(&self) -> ChainConfig {
        self.config
    }

    pub fn glyphs(&self) -> &GlyphTable {
        &self.glyphs
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Columns currently mapped onto the chain.
    pub fn visible_columns(&self) -> &[u8] {
        self.frame.visible()
    }

    /// Enables rendering of failures as scrolling text on the display.
    pub fn set_diagnostics(&mut self, enabled: bool) {
        self.diagnostics = enabled;
    }

    pub fn diagnostics_enabled(&self) -> bool {
        self.diagnostics
    }

    /// Releases owned chain and delay.
    pub fn release(self) -> (Max7219Chain<SPI, LOAD>, DELAY) {
        (self.chain, self.delay)
    }

    /// Shows a pattern on every chip or one chip, applying chain rotation.
    pub fn display_pattern(
        &mut self,
        pattern: &Matrix8x8,
        target: Target,
    ) -> DisplayResult<(), SPI, LOAD> {
        write_digits(
            &mut self.chain,
            self.config.rotation,
            pattern.to_columns(),
            target,
        )
        .map_err(DisplayError::Bus)
    }

    /// Sets LED brightness, `level` capped at 15.
    ///
    /// Levels of 7 and up draw enough current to corrupt transfers on some
    /// boards.
    pub fn set_brightness(&mut self, level: u8, target: Target) -> DisplayResult<(), SPI, LOAD> {
        send(
            &mut self.chain,
            protocol::INTENSITY,
            level.min(MAX_INTENSITY),
            target,
        )
        .map_err(DisplayError::Bus)
    }

    pub fn set_power(&mut self, on: bool, target: Target) -> DisplayResult<(), SPI, LOAD> {
        send(&mut self.chain, protocol::SHUTDOWN, u8::from(on), target).map_err(DisplayError::Bus)
    }

    /// Lights every LED. The framebuffer is left alone.
    pub fn fill(&mut self, target: Target) -> DisplayResult<(), SPI, LOAD> {
        fill_digits(&mut self.chain, 0xFF, target).map_err(DisplayError::Bus)
    }

    /// Turns every LED off. The framebuffer is left alone.
    pub fn clear(&mut self, target: Target) -> DisplayResult<(), SPI, LOAD> {
        fill_digits(&mut self.chain, 0x00, target).map_err(DisplayError::Bus)
    }

    /// Random column bytes; with [`Target::All`] every chip shows the same
    /// pattern.
    pub fn randomize<R>(&mut self, rng: &mut R, target: Target) -> DisplayResult<(), SPI, LOAD>
    where
        R: RngCore + ?Sized,
    {
        for digit in 0..DIGIT_COUNT {
            let value = (rng.next_u32() & 0xFF) as u8;
            send(&mut self.chain, protocol::DIGIT0 + digit as u8, value, target)
                .map_err(DisplayError::Bus)?;
        }
        Ok(())
    }

    /// Pushes the visible window to the chain.
    pub fn flush(&mut self) -> DisplayResult<(), SPI, LOAD> {
        flush_window(&mut self.chain, &self.config, &self.frame).map_err(DisplayError::Bus)
    }

    /// Prints text starting `offset` columns into the window.
    ///
    /// Offsets below `-8` are clamped. Glyphs are placed until the right edge
    /// of the window is reached. Without `clear_first` the text is drawn over
    /// the current buffer content.
    pub fn display_text(
        &mut self,
        text: &str,
        offset: i32,
        clear_first: bool,
    ) -> DisplayResult<(), SPI, LOAD> {
        let result = self.place_text(text, offset, clear_first);
        self.report("displayText", result)
    }

    /// Prints text flush against the right edge of the window.
    pub fn display_text_right_aligned(
        &mut self,
        text: &str,
        clear_first: bool,
    ) -> DisplayResult<(), SPI, LOAD> {
        let width: usize = text
            .chars()
            .filter_map(|ch| self.glyphs.lookup(ch))
            .map(|glyph| glyph.width())
            .sum();
        let offset = self.config.visible_width() as i32 - width as i32;

        self.display_text(text, offset, clear_first)
    }

    /// Writes raw column bytes at a window offset and shows the result.
    pub fn display_columns(
        &mut self,
        columns: &[u8],
        offset: i32,
        clear_first: bool,
    ) -> DisplayResult<(), SPI, LOAD> {
        if clear_first {
            self.frame.clear();
            self.clear(Target::All)?;
        }

        self.frame.write_columns(offset, columns);
        self.flush()
    }

    /// Scrolls text once from right to left across the whole chain.
    ///
    /// Waits `step_delay_ms` after every column step and `end_delay_ms` once
    /// the text has left the window.
    pub fn scroll_text(
        &mut self,
        text: &str,
        step_delay_ms: u32,
        end_delay_ms: u32,
    ) -> DisplayResult<(), SPI, LOAD> {
        let result = self.run_scroll(text, step_delay_ms, end_delay_ms);
        self.report("scrollText", result)
    }

    /// Shows every glyph except the space, one chip after another.
    pub fn glyph_demo(&mut self, delay_ms: u32) -> DisplayResult<(), SPI, LOAD> {
        let Self {
            chain,
            delay,
            config,
            frame,
            glyphs,
            ..
        } = self;

        fill_digits(chain, 0x00, Target::All).map_err(DisplayError::Bus)?;

        let mut slot = 0usize;
        for glyph in glyphs.glyphs().skip(1) {
            let offset = (slot * MARGIN) as i32;
            frame.write_columns(offset, &[0x00; MARGIN]);
            frame.write_columns(offset, glyph.columns);
            flush_window(chain, config, frame).map_err(DisplayError::Bus)?;

            slot = (slot + 1) % config.chip_count;
            delay.delay_ms(delay_ms);
        }

        delay.delay_ms(delay_ms);
        fill_digits(chain, 0x00, Target::All).map_err(DisplayError::Bus)
    }

    /// Adds a custom glyph that text operations can use from now on.
    pub fn add_custom_glyph(&mut self, key: &str, columns: &[u8]) -> DisplayResult<(), SPI, LOAD> {
        let result = self
            .glyphs
            .add_custom(key, columns)
            .map_err(DisplayError::from);
        self.report("addCustomGlyph", result)
    }

    /// [`bytes::decode_byte_list`], with failures reported as diagnostics.
    pub fn decode_byte_list(&mut self, text: &str) -> DisplayResult<ByteList, SPI, LOAD> {
        let result = bytes::decode_byte_list(text).map_err(DisplayError::from);
        self.report("decodeByteList", result)
    }

    fn place_text(
        &mut self,
        text: &str,
        offset: i32,
        clear_first: bool,
    ) -> DisplayResult<(), SPI, LOAD> {
        let Self {
            chain,
            config,
            frame,
            glyphs,
            ..
        } = self;

        if clear_first {
            frame.clear();
            fill_digits(chain, 0x00, Target::All).map_err(DisplayError::Bus)?;
        }

        let layout = layout_text(glyphs, text)?;
        let end = frame.right_margin();
        let mut position = frame.position_of(offset);
        for glyph in layout.glyphs() {
            if position >= end {
                break;
            }
            position = frame.write_at(position, glyph.columns);
        }

        flush_window(chain, config, frame).map_err(DisplayError::Bus)
    }

    fn run_scroll(
        &mut self,
        text: &str,
        step_delay_ms: u32,
        end_delay_ms: u32,
    ) -> DisplayResult<(), SPI, LOAD> {
        let Self {
            chain,
            delay,
            config,
            frame,
            glyphs,
            ..
        } = self;

        let layout = layout_text(glyphs, text)?;
        frame.clear();
        fill_digits(chain, 0x00, Target::All).map_err(DisplayError::Bus)?;

        let mut scroll = TextScroll::new(&layout, config.chip_count);
        debug!(
            "display: scroll {} glyphs over {} steps",
            layout.glyphs().len(),
            scroll.total_steps()
        );

        while scroll.step(frame) {
            flush_window(chain, config, frame).map_err(DisplayError::Bus)?;
            delay.delay_ms(step_delay_ms);
        }
        delay.delay_ms(end_delay_ms);

        Ok(())
    }

    fn report<T>(
        &mut self,
        context: &str,
        result: DisplayResult<T, SPI, LOAD>,
    ) -> DisplayResult<T, SPI, LOAD> {
        if let Err(err) = &result {
            warn!("display: {} failed: {:?}", context, err);
            if let Some(detail) = diagnostic_detail(err) {
                let mut message = String::<DIAGNOSTIC_BYTES>::new();
                let _ = write!(message, "Error {context}: {detail}");
                self.show_diagnostic(&message);
            }
        }

        result
    }

    /// Scrolls a message if diagnostics are on; a failing diagnostic never
    /// triggers another one.
    fn show_diagnostic(&mut self, message: &str) {
        if !self.diagnostics || self.reporting {
            return;
        }

        self.reporting = true;
        if let Err(err) = self.scroll_text(message, DIAGNOSTIC_STEP_MS, DIAGNOSTIC_END_MS) {
            warn!("display: diagnostic not shown: {:?}", err);
        }
        self.reporting = false;
    }
}

fn diagnostic_detail<BusErr>(err: &DisplayError<BusErr>) -> Option<&'static str> {
    let detail = match err {
        DisplayError::Bus(_) => return None,
        DisplayError::Config(ConfigError::ChipCount(_)) => "bad chip count",
        DisplayError::Glyph(GlyphError::NotSingleChar) => "key must be 1 character",
        DisplayError::Glyph(GlyphError::Empty) => "no columns",
        DisplayError::Glyph(GlyphError::Duplicate(_)) => "character exists",
        DisplayError::Glyph(GlyphError::TooWide(_)) => "glyph too wide",
        DisplayError::Glyph(GlyphError::StoreFull) => "glyph store full",
        DisplayError::ByteParse(ByteParseError::Empty) => "no bytes",
        DisplayError::ByteParse(ByteParseError::InvalidToken { .. }) => "invalid byte",
        DisplayError::ByteParse(ByteParseError::TooLong) => "too many bytes",
        DisplayError::Layout(LayoutError::AllGlyphsUnmatched) => "no character found",
        DisplayError::Layout(LayoutError::TextTooLong) => "text too long",
    };
    Some(detail)
}

fn send<SPI, LOAD>(
    chain: &mut Max7219Chain<SPI, LOAD>,
    register: u8,
    data: u8,
    target: Target,
) -> DriverResult<SPI::Error, LOAD::Error>
where
    SPI: SpiBus<u8>,
    LOAD: OutputPin,
{
    match target {
        Target::All => chain.broadcast(register, data),
        Target::Chip(chip) => chain.write_to(register, data, chip),
    }
}

fn fill_digits<SPI, LOAD>(
    chain: &mut Max7219Chain<SPI, LOAD>,
    value: u8,
    target: Target,
) -> DriverResult<SPI::Error, LOAD::Error>
where
    SPI: SpiBus<u8>,
    LOAD: OutputPin,
{
    for digit in 0..DIGIT_COUNT {
        send(chain, protocol::DIGIT0 + digit as u8, value, target)?;
    }
    Ok(())
}

/// Writes eight columns to the digit registers, rotating them first when the
/// modules are mounted rotated.
fn write_digits<SPI, LOAD>(
    chain: &mut Max7219Chain<SPI, LOAD>,
    rotation: Rotation,
    columns: [u8; DIGIT_COUNT],
    target: Target,
) -> DriverResult<SPI::Error, LOAD::Error>
where
    SPI: SpiBus<u8>,
    LOAD: OutputPin,
{
    // Rotation mixes rows and columns, so it has to go through a full matrix.
    let columns = match rotation {
        Rotation::None => columns,
        rotation => Matrix8x8::from_columns(columns)
            .rotated(rotation)
            .to_columns(),
    };

    for (digit, column) in columns.into_iter().enumerate() {
        send(chain, protocol::DIGIT0 + digit as u8, column, target)?;
    }
    Ok(())
}

/// Sends every 8-column slice of the visible window to its chip.
fn flush_window<SPI, LOAD>(
    chain: &mut Max7219Chain<SPI, LOAD>,
    config: &ChainConfig,
    frame: &FrameBuffer,
) -> DriverResult<SPI::Error, LOAD::Error>
where
    SPI: SpiBus<u8>,
    LOAD: OutputPin,
{
    let slices = frame
        .visible()
        .chunks_exact(DIGIT_COUNT)
        .take(config.chip_count);

    for (slice, columns) in slices.enumerate() {
        let columns = <[u8; DIGIT_COUNT]>::try_from(columns)
            .map_err(|_| max7219_chain::Error::InvalidInput)?;
        let chip = slice_to_chip_index(slice, config.chip_count, config.reversed);
        write_digits(chain, config.rotation, columns, Target::Chip(chip))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests;
