use core::cell::{Cell, RefCell};

use max7219_chain::{
    emulator::{ChainEmulator, EmulatedDelay, EmulatedLoad, EmulatedSpi, handles},
    protocol::MAX_CHIPS,
};

use super::*;

type TestDisplay<'a> = DisplayController<EmulatedSpi<'a>, EmulatedLoad<'a>, EmulatedDelay<'a>>;

const GLYPH_A: [u8; 8] = [0x7E, 0x11, 0x11, 0x7E, 0x00, 0x00, 0x00, 0x00];

fn make_display(chain: &RefCell<ChainEmulator>, config: ChainConfig) -> TestDisplay<'_> {
    let (spi, load, delay) = handles(chain);
    let display = match DisplayController::new(Max7219Chain::new(spi, load), delay, config) {
        Ok(display) => display,
        Err(failure) => panic!("display setup failed: {:?}", failure.error),
    };
    chain.borrow_mut().reset_counters();
    display
}

fn chip_columns(chain: &RefCell<ChainEmulator>, chip: usize) -> [u8; 8] {
    chain.borrow().chip(chip).unwrap().columns()
}

struct CountingRng {
    state: u32,
}

impl RngCore for CountingRng {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x35);
        self.state
    }

    fn next_u64(&mut self) -> u64 {
        u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for byte in dst {
            *byte = self.next_u32() as u8;
        }
    }
}

/// SPI bus that fails every transfer while armed.
struct FaultySpi<'a> {
    armed: &'a Cell<bool>,
    failures: &'a Cell<usize>,
}

impl FaultySpi<'_> {
    fn check(&self) -> Result<(), spi::ErrorKind> {
        if !self.armed.get() {
            return Ok(());
        }
        self.failures.set(self.failures.get() + 1);
        Err(spi::ErrorKind::Other)
    }
}

impl spi::ErrorType for FaultySpi<'_> {
    type Error = spi::ErrorKind;
}

impl SpiBus<u8> for FaultySpi<'_> {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        self.check()
    }

    fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> {
        self.check()
    }

    fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
        self.check()
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        self.check()
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[test]
fn new_wakes_and_blanks_every_chip() {
    let chain = RefCell::new(ChainEmulator::new(3));
    let (spi, load, delay) = handles(&chain);
    let config = ChainConfig::new(3).with_intensity(4);
    let display = DisplayController::new(Max7219Chain::new(spi, load), delay, config);

    assert!(display.is_ok());
    let chain = chain.borrow();
    for index in 0..3 {
        let chip = chain.chip(index).unwrap();
        assert!(!chip.shutdown);
        assert!(!chip.display_test);
        assert_eq!(chip.decode_mode, 0);
        assert_eq!(chip.scan_limit, 7);
        assert_eq!(chip.intensity, 4);
        assert_eq!(chip.columns(), [0; 8]);
    }
}

#[test]
fn invalid_chip_count_is_rejected_before_bus_activity() {
    let chain = RefCell::new(ChainEmulator::new(2));
    let (spi, load, delay) = handles(&chain);
    let display = DisplayController::new(Max7219Chain::new(spi, load), delay, ChainConfig::new(0));

    let Err(failure) = display else {
        panic!("chip count 0 accepted");
    };
    assert_eq!(
        failure.error,
        DisplayError::Config(ConfigError::ChipCount(0))
    );
    assert_eq!(chain.borrow().transactions(), 0);
}

#[test]
fn failed_setup_hands_back_chain_and_delay() {
    let chain = RefCell::new(ChainEmulator::new(2));
    let (spi, load, delay) = handles(&chain);
    let display = DisplayController::new(
        Max7219Chain::new(spi, load),
        delay,
        ChainConfig::new(MAX_CHIPS + 1),
    );
    let Err(SetupFailure { chain: driver, delay, .. }) = display else {
        panic!("oversized chain accepted");
    };

    let display = DisplayController::new(driver, delay, ChainConfig::new(2));

    assert!(display.is_ok());
    assert!(chain.borrow().transactions() > 0);
}

#[test]
fn text_lands_at_window_start_on_single_chip() {
    let chain = RefCell::new(ChainEmulator::new(1));
    let mut display = make_display(&chain, ChainConfig::new(1));

    display.display_text("A", 0, true).unwrap();

    assert_eq!(chip_columns(&chain, 0), GLYPH_A);
    assert_eq!(display.visible_columns(), &GLYPH_A);
}

#[test]
fn text_is_cut_at_right_edge_of_window() {
    let chain = RefCell::new(ChainEmulator::new(1));
    let mut display = make_display(&chain, ChainConfig::new(1));

    display.display_text("AB", 0, true).unwrap();

    assert_eq!(
        chip_columns(&chain, 0),
        [0x7E, 0x11, 0x11, 0x7E, 0x00, 0x7F, 0x49, 0x49]
    );
}

#[test]
fn text_offset_and_right_alignment() {
    let chain = RefCell::new(ChainEmulator::new(1));
    let mut display = make_display(&chain, ChainConfig::new(1));

    display.display_text("-", 6, true).unwrap();
    assert_eq!(chip_columns(&chain, 0), [0, 0, 0, 0, 0, 0, 0x08, 0x08]);

    display.display_text_right_aligned("-", true).unwrap();
    assert_eq!(chip_columns(&chain, 0), [0, 0, 0, 0, 0, 0x08, 0x08, 0x08]);
}

#[test]
fn text_without_clear_draws_over_buffer() {
    let chain = RefCell::new(ChainEmulator::new(1));
    let mut display = make_display(&chain, ChainConfig::new(1));

    display.display_columns(&[0xFF; 8], 0, true).unwrap();
    display.display_text("!", 0, false).unwrap();

    assert_eq!(
        chip_columns(&chain, 0),
        [0x5F, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
    );
}

#[test]
fn leftmost_slice_goes_to_far_chip_unless_reversed() {
    let mut columns = [0x01; 16];
    columns[8..].fill(0x80);

    let chain = RefCell::new(ChainEmulator::new(2));
    let mut display = make_display(&chain, ChainConfig::new(2));
    display.display_columns(&columns, 0, true).unwrap();
    assert_eq!(chip_columns(&chain, 1), [0x01; 8]);
    assert_eq!(chip_columns(&chain, 0), [0x80; 8]);

    let chain = RefCell::new(ChainEmulator::new(2));
    let mut display = make_display(&chain, ChainConfig::new(2).with_reversed(true));
    display.display_columns(&columns, 0, true).unwrap();
    assert_eq!(chip_columns(&chain, 0), [0x01; 8]);
    assert_eq!(chip_columns(&chain, 1), [0x80; 8]);
}

#[test]
fn chain_rotation_applies_to_text_and_patterns() {
    let chain = RefCell::new(ChainEmulator::new(1));
    let config = ChainConfig::new(1).with_rotation(Rotation::Clockwise);
    let mut display = make_display(&chain, config);
    let expected = Matrix8x8::from_columns(GLYPH_A)
        .rotated(Rotation::Clockwise)
        .to_columns();

    display.display_text("A", 0, true).unwrap();
    assert_eq!(chip_columns(&chain, 0), expected);
    // Framebuffer keeps the unrotated columns.
    assert_eq!(display.visible_columns(), &GLYPH_A);

    display.clear(Target::All).unwrap();
    display
        .display_pattern(&Matrix8x8::from_columns(GLYPH_A), Target::All)
        .unwrap();
    assert_eq!(chip_columns(&chain, 0), expected);
}

fn rotated_slices(display: &TestDisplay<'_>, rotation: Rotation) -> Vec<(usize, [u8; 8])> {
    let config = display.config();
    display
        .visible_columns()
        .chunks_exact(8)
        .enumerate()
        .map(|(slice, columns)| {
            let columns = <[u8; 8]>::try_from(columns).unwrap();
            let chip = slice_to_chip_index(slice, config.chip_count, config.reversed);
            let rotated = Matrix8x8::from_columns(columns).rotated(rotation).to_columns();
            (chip, rotated)
        })
        .collect()
}

#[test]
fn rotated_reversed_chain_maps_each_slice_to_its_chip() {
    let columns: [u8; 24] = core::array::from_fn(|i| (i as u8).wrapping_mul(37) ^ 0x5A);
    let chain = RefCell::new(ChainEmulator::new(3));
    let config = ChainConfig::new(3)
        .with_rotation(Rotation::CounterClockwise)
        .with_reversed(true);
    let mut display = make_display(&chain, config);

    display.display_columns(&columns, 0, true).unwrap();

    for (slice, chunk) in columns.chunks_exact(8).enumerate() {
        let chunk = <[u8; 8]>::try_from(chunk).unwrap();
        let expected = Matrix8x8::from_columns(chunk)
            .rotated(Rotation::CounterClockwise)
            .to_columns();
        // Reversed wiring: slice n lands on chip n.
        assert_eq!(chip_columns(&chain, slice), expected, "slice {slice}");
    }
}

#[test]
fn rotated_scroll_frames_follow_slice_mapping() {
    for reversed in [false, true] {
        let chain = RefCell::new(ChainEmulator::new(2));
        let config = ChainConfig::new(2)
            .with_rotation(Rotation::Clockwise)
            .with_reversed(reversed);
        let mut display = make_display(&chain, config);

        {
            let layout = layout_text(&display.glyphs, "AB").unwrap();
            let mut scroll = TextScroll::new(&layout, 2);
            for _ in 0..12 {
                scroll.step(&mut display.frame);
            }
        }
        display.flush().unwrap();

        assert!(display.visible_columns().iter().any(|c| *c != 0));
        for (chip, expected) in rotated_slices(&display, Rotation::Clockwise) {
            assert_eq!(chip_columns(&chain, chip), expected, "chip {chip}");
        }
    }
}

#[test]
fn orientation_change_takes_effect_on_next_flush() {
    let chain = RefCell::new(ChainEmulator::new(1));
    let mut display = make_display(&chain, ChainConfig::new(1));
    display.display_text("A", 0, true).unwrap();
    chain.borrow_mut().reset_counters();

    display.set_orientation(Rotation::HalfTurn, false);
    assert_eq!(chain.borrow().transactions(), 0);

    display.flush().unwrap();
    assert_eq!(
        chip_columns(&chain, 0),
        Matrix8x8::from_columns(GLYPH_A)
            .rotated(Rotation::HalfTurn)
            .to_columns()
    );
}

#[test]
fn pattern_targets_one_chip_or_all() {
    let chain = RefCell::new(ChainEmulator::new(3));
    let mut display = make_display(&chain, ChainConfig::new(3));
    let pattern = Matrix8x8::from_columns([1, 2, 3, 4, 5, 6, 7, 8]);

    display.display_pattern(&pattern, Target::Chip(1)).unwrap();
    assert_eq!(chip_columns(&chain, 0), [0; 8]);
    assert_eq!(chip_columns(&chain, 1), [1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(chip_columns(&chain, 2), [0; 8]);

    display.display_pattern(&pattern, Target::All).unwrap();
    for chip in 0..3 {
        assert_eq!(chip_columns(&chain, chip), [1, 2, 3, 4, 5, 6, 7, 8]);
    }
}

#[test]
fn chip_outside_chain_is_silently_ignored() {
    let chain = RefCell::new(ChainEmulator::new(2));
    let mut display = make_display(&chain, ChainConfig::new(2));

    display
        .display_pattern(&Matrix8x8::filled(), Target::Chip(5))
        .unwrap();
    display.fill(Target::Chip(2)).unwrap();
    display.set_brightness(9, Target::Chip(7)).unwrap();

    assert_eq!(chain.borrow().transactions(), 0);
}

#[test]
fn scroll_runs_every_step_then_waits_once() {
    let chain = RefCell::new(ChainEmulator::new(2));
    let mut display = make_display(&chain, ChainConfig::new(2));
    let steps = {
        let layout = layout_text(display.glyphs(), "Hi").unwrap();
        layout.scroll_steps(2)
    };

    display.scroll_text("Hi", 10, 250).unwrap();

    let chain = chain.borrow();
    assert_eq!(chain.delay_calls(), steps + 1);
    assert_eq!(chain.delayed_ms(), steps as u64 * 10 + 250);
    // Initial blank, then two chips of eight digits per step.
    assert_eq!(chain.transactions(), 8 + steps * 16);
    assert!(display.visible_columns().iter().all(|c| *c == 0));
    assert_eq!(chain.chip(0).unwrap().columns(), [0; 8]);
    assert_eq!(chain.chip(1).unwrap().columns(), [0; 8]);
}

#[test]
fn scroll_of_unrenderable_text_fails_without_waiting() {
    let chain = RefCell::new(ChainEmulator::new(1));
    let mut display = make_display(&chain, ChainConfig::new(1));

    assert_eq!(
        display.scroll_text("\u{2603}", 10, 10),
        Err(DisplayError::Layout(LayoutError::AllGlyphsUnmatched))
    );
    assert!(display.scroll_text("", 10, 10).is_err());
    assert_eq!(chain.borrow().delay_calls(), 0);
}

#[test]
fn brightness_is_capped_and_power_is_per_chip() {
    let chain = RefCell::new(ChainEmulator::new(2));
    let mut display = make_display(&chain, ChainConfig::new(2));

    display.set_brightness(200, Target::All).unwrap();
    assert_eq!(chain.borrow().chip(0).unwrap().intensity, 15);
    assert_eq!(chain.borrow().chip(1).unwrap().intensity, 15);

    display.set_brightness(3, Target::Chip(1)).unwrap();
    assert_eq!(chain.borrow().chip(0).unwrap().intensity, 15);
    assert_eq!(chain.borrow().chip(1).unwrap().intensity, 3);

    display.set_power(false, Target::Chip(0)).unwrap();
    assert!(chain.borrow().chip(0).unwrap().shutdown);
    assert!(!chain.borrow().chip(1).unwrap().shutdown);

    display.set_power(true, Target::All).unwrap();
    assert!(!chain.borrow().chip(0).unwrap().shutdown);
}

#[test]
fn fill_clear_and_randomize_leave_framebuffer_alone() {
    let chain = RefCell::new(ChainEmulator::new(2));
    let mut display = make_display(&chain, ChainConfig::new(2));

    display.fill(Target::All).unwrap();
    assert_eq!(chip_columns(&chain, 0), [0xFF; 8]);
    assert_eq!(chip_columns(&chain, 1), [0xFF; 8]);

    display.clear(Target::Chip(1)).unwrap();
    assert_eq!(chip_columns(&chain, 0), [0xFF; 8]);
    assert_eq!(chip_columns(&chain, 1), [0x00; 8]);

    let mut rng = CountingRng { state: 0 };
    display.randomize(&mut rng, Target::Chip(1)).unwrap();
    let expected: [u8; 8] = core::array::from_fn(|i| (0x35 * (i as u32 + 1)) as u8);
    assert_eq!(chip_columns(&chain, 1), expected);
    assert_eq!(chip_columns(&chain, 0), [0xFF; 8]);

    assert!(display.visible_columns().iter().all(|c| *c == 0));
}

#[test]
fn custom_glyph_from_byte_list_renders() {
    let chain = RefCell::new(ChainEmulator::new(1));
    let mut display = make_display(&chain, ChainConfig::new(1));

    let columns = display
        .decode_byte_list("0x0C, 0x1E, 0b00111100, 30, 0x0C")
        .unwrap();
    display.add_custom_glyph("\u{2665}", &columns).unwrap();
    display.display_text("\u{2665}", 0, true).unwrap();

    assert_eq!(
        chip_columns(&chain, 0),
        [0x0C, 0x1E, 0x3C, 0x1E, 0x0C, 0x00, 0x00, 0x00]
    );
}

#[test]
fn rejected_custom_glyphs_leave_table_unchanged() {
    let chain = RefCell::new(ChainEmulator::new(1));
    let mut display = make_display(&chain, ChainConfig::new(1));
    let before = display.glyphs().len();

    assert_eq!(
        display.add_custom_glyph("ab", &[1]),
        Err(DisplayError::Glyph(GlyphError::NotSingleChar))
    );
    assert_eq!(
        display.add_custom_glyph("A", &[1]),
        Err(DisplayError::Glyph(GlyphError::Duplicate('A')))
    );
    assert_eq!(
        display.add_custom_glyph("#", &[]),
        Err(DisplayError::Glyph(GlyphError::Empty))
    );
    assert_eq!(display.glyphs().len(), before);
    assert_eq!(chain.borrow().transactions(), 0);
}

#[test]
fn failures_scroll_only_when_diagnostics_enabled() {
    let chain = RefCell::new(ChainEmulator::new(1));
    let mut display = make_display(&chain, ChainConfig::new(1));

    assert!(display.decode_byte_list("0xZZ").is_err());
    assert_eq!(chain.borrow().delay_calls(), 0);

    display.set_diagnostics(true);
    assert!(display.diagnostics_enabled());
    assert_eq!(
        display.display_text("\u{2603}", 0, false),
        Err(DisplayError::Layout(LayoutError::AllGlyphsUnmatched))
    );
    let first = chain.borrow().delay_calls();
    assert!(first > 0);
    assert_eq!(
        chain.borrow().delayed_ms() % u64::from(DIAGNOSTIC_STEP_MS),
        u64::from(DIAGNOSTIC_END_MS) % u64::from(DIAGNOSTIC_STEP_MS)
    );

    // The reporting guard is released again after each message.
    assert!(display.add_custom_glyph("", &[1]).is_err());
    assert!(chain.borrow().delay_calls() > first);
}

#[test]
fn bus_errors_are_not_rendered() {
    assert_eq!(
        diagnostic_detail(&DisplayError::Bus(
            max7219_chain::Error::<(), ()>::InvalidInput
        )),
        None
    );
    assert!(
        diagnostic_detail::<()>(&DisplayError::Layout(LayoutError::TextTooLong)).is_some()
    );
}

#[test]
fn configure_is_repeatable_and_keeps_custom_glyphs() {
    let chain = RefCell::new(ChainEmulator::new(4));
    let mut display = make_display(&chain, ChainConfig::new(2));
    display.add_custom_glyph("\u{2605}", &[0x06, 0x09, 0x06]).unwrap();
    display.display_text("A", 0, true).unwrap();

    display.configure(ChainConfig::new(2)).unwrap();
    display.configure(ChainConfig::new(2)).unwrap();
    assert_eq!(display.frame().len(), 32);
    assert!(display.glyphs().contains('\u{2605}'));
    assert_eq!(&display.visible_columns()[..8], &GLYPH_A);

    display.configure(ChainConfig::new(4)).unwrap();
    assert_eq!(display.config().chip_count, 4);
    assert_eq!(display.frame().len(), 48);
    assert_eq!(display.visible_columns().len(), 32);
    assert_eq!(&display.visible_columns()[..8], &GLYPH_A);

    assert!(matches!(
        display.configure(ChainConfig::new(33)),
        Err(DisplayError::Config(ConfigError::ChipCount(33)))
    ));
    assert_eq!(display.config().chip_count, 4);
}

#[test]
fn glyph_demo_visits_every_glyph_and_ends_blank() {
    let chain = RefCell::new(ChainEmulator::new(2));
    let mut display = make_display(&chain, ChainConfig::new(2));
    let glyph_count = display.glyphs().len();

    display.glyph_demo(5).unwrap();

    let chain = chain.borrow();
    // One wait per glyph after the space, plus the closing pause.
    assert_eq!(chain.delay_calls(), glyph_count);
    assert_eq!(chain.chip(0).unwrap().columns(), [0; 8]);
    assert_eq!(chain.chip(1).unwrap().columns(), [0; 8]);
}

#[test]
fn release_returns_the_chain() {
    let chain = RefCell::new(ChainEmulator::new(3));
    let display = make_display(&chain, ChainConfig::new(3));

    let (driver, _delay) = display.release();
    assert_eq!(driver.chip_count(), 3);
}

#[test]
fn diagnostic_bus_failure_is_dropped_after_one_attempt() {
    let chain = RefCell::new(ChainEmulator::new(1));
    let (_, load, delay) = handles(&chain);
    let armed = Cell::new(false);
    let failures = Cell::new(0);
    let spi = FaultySpi {
        armed: &armed,
        failures: &failures,
    };
    let Ok(mut display) =
        DisplayController::new(Max7219Chain::new(spi, load), delay, ChainConfig::new(1))
    else {
        panic!("display setup failed");
    };
    display.set_diagnostics(true);
    armed.set(true);

    assert_eq!(
        display.decode_byte_list("0xZZ"),
        Err(DisplayError::ByteParse(ByteParseError::InvalidToken {
            position: 0
        }))
    );
    assert_eq!(failures.get(), 1);
    assert!(!display.reporting);

    armed.set(false);
    assert!(display.display_text("A", 0, true).is_ok());
}
