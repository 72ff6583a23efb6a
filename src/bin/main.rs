use std::{cell::RefCell, process::ExitCode};

use embedded_hal::delay::DelayNs;
use log::{LevelFilter, error, info, warn};
use matrixchain_core::{
    ChainConfig, DisplayController, DisplayResult, Flip, Matrix8x8, Rotation, Target,
};
use max7219_chain::{
    Max7219Chain,
    emulator::{ChainEmulator, EmulatedLoad, EmulatedSpi, handles},
};
use rand_core::{OsRng, TryRngCore};

use console::TerminalDelay;

#[path = "main/console.rs"]
mod console;

const DEFAULT_CHIPS: usize = 4;
const DEFAULT_TEXT: &str = "Hello from a MAX7219 chain!";
const INTENSITY: u8 = 2;
const SCROLL_STEP_MS: u32 = 35;
const SCROLL_END_MS: u32 = 400;
const HOLD_MS: u32 = 700;
const GLYPH_DEMO_MS: u32 = 60;
const RANDOM_FRAMES: usize = 6;
const HEART_COLUMNS: &str = "0x0C, 0x1E, 0x3C, 0x78, 0x3C, 0x1E, 0x0C";
const SMILEY_COLUMNS: [u8; 8] = [
    0b0011_1100,
    0b0100_0010,
    0b1010_0101,
    0b1000_0001,
    0b1010_0101,
    0b1001_1001,
    0b0100_0010,
    0b0011_1100,
];

const CHIPS: Option<&str> = option_env!("MATRIXCHAIN_CHIPS");
const ROTATION: Option<&str> = option_env!("MATRIXCHAIN_ROTATION");
const REVERSED: Option<&str> = option_env!("MATRIXCHAIN_REVERSED");
const TEXT: Option<&str> = option_env!("MATRIXCHAIN_TEXT");
const LOG_LEVEL: Option<&str> = option_env!("MATRIXCHAIN_LOG");

type HostDisplay<'a> = DisplayController<EmulatedSpi<'a>, EmulatedLoad<'a>, TerminalDelay<'a>>;
type DemoResult<'a> = DisplayResult<(), EmulatedSpi<'a>, EmulatedLoad<'a>>;

fn main() -> ExitCode {
    init_logger();

    let config = chain_config();
    info!(
        "chain: chips={} rotation={:?} reversed={}",
        config.chip_count, config.rotation, config.reversed
    );

    let emulator = RefCell::new(ChainEmulator::new(config.chip_count));
    let (spi, load, _) = handles(&emulator);
    let chain = Max7219Chain::new(spi, load);
    let delay = TerminalDelay::new(&emulator, config);

    let mut display = match DisplayController::new(chain, delay, config) {
        Ok(display) => display,
        Err(failure) => {
            error!("display setup failed: {}", failure.error);
            return ExitCode::FAILURE;
        }
    };
    display.set_diagnostics(true);

    let mut pause = TerminalDelay::new(&emulator, config);
    if let Err(err) = run_demo(&mut display, &mut pause) {
        error!("demo aborted: {}", err);
        return ExitCode::FAILURE;
    }

    info!(
        "demo done: {} transactions, {} bytes on the bus",
        emulator.borrow().transactions(),
        emulator.borrow().bytes_sent()
    );
    ExitCode::SUCCESS
}

/// `MATRIXCHAIN_LOG` takes `env_logger` filter syntax, e.g. `debug` or
/// `matrixchain_core=trace`.
fn init_logger() {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Info);
    if let Some(filters) = LOG_LEVEL {
        builder.parse_filters(filters);
    }
    builder.init();
}

fn chain_config() -> ChainConfig {
    let chip_count = CHIPS
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_CHIPS);
    let rotation = match ROTATION.map(str::trim) {
        Some("cw" | "90") => Rotation::Clockwise,
        Some("ccw" | "270") => Rotation::CounterClockwise,
        Some("180") => Rotation::HalfTurn,
        _ => Rotation::None,
    };
    let reversed = matches!(REVERSED.map(str::trim), Some("1" | "true" | "yes"));

    ChainConfig::new(chip_count)
        .with_rotation(rotation)
        .with_reversed(reversed)
        .with_intensity(INTENSITY)
}

fn run_demo<'a>(display: &mut HostDisplay<'a>, pause: &mut TerminalDelay<'a>) -> DemoResult<'a> {
    info!("demo: static text");
    display.display_text("Hi!", 0, true)?;
    pause.delay_ms(HOLD_MS);
    display.display_text_right_aligned("42", true)?;
    pause.delay_ms(HOLD_MS);

    info!("demo: scrolling text");
    display.scroll_text(TEXT.unwrap_or(DEFAULT_TEXT), SCROLL_STEP_MS, SCROLL_END_MS)?;

    info!("demo: pattern transforms");
    let smiley = Matrix8x8::from_columns(SMILEY_COLUMNS);
    let variants = [
        smiley,
        smiley.rotated(Rotation::Clockwise),
        smiley.rotated(Rotation::HalfTurn),
        smiley.flipped(Flip::Vertical),
        smiley.shifted(2, 1),
        smiley.inverted(),
    ];
    for pattern in &variants {
        display.display_pattern(pattern, Target::All)?;
        pause.delay_ms(HOLD_MS);
    }

    info!("demo: custom glyph");
    let heart = display.decode_byte_list(HEART_COLUMNS)?;
    display.add_custom_glyph("\u{2665}", &heart)?;
    display.scroll_text("I \u{2665} LEDs", SCROLL_STEP_MS, SCROLL_END_MS)?;

    // Rejected definitions scroll their own diagnostic.
    if let Err(err) = display.add_custom_glyph("A", &[0xFF]) {
        warn!("glyph rejected: {}", err);
    }

    info!("demo: fill, clear and noise");
    display.fill(Target::All)?;
    pause.delay_ms(HOLD_MS);
    display.clear(Target::Chip(0))?;
    pause.delay_ms(HOLD_MS);

    let mut rng = OsRng.unwrap_err();
    for _ in 0..RANDOM_FRAMES {
        display.randomize(&mut rng, Target::All)?;
        pause.delay_ms(HOLD_MS / 4);
    }

    info!("demo: brightness and power");
    for level in [0, 5, 10, 15] {
        display.set_brightness(level, Target::All)?;
        pause.delay_ms(HOLD_MS / 2);
    }
    display.set_brightness(INTENSITY, Target::All)?;
    display.set_power(false, Target::All)?;
    pause.delay_ms(HOLD_MS);
    display.set_power(true, Target::All)?;

    info!("demo: glyph table");
    display.glyph_demo(GLYPH_DEMO_MS)?;

    display.clear(Target::All)
}
