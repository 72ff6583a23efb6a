//! Register map and daisy-chain frame encoding for MAX7219 chains.
//!
//! Every transaction carries one `(register, data)` pair per chip. The first
//! pair shifted in travels furthest, so slot `i` of a frame lands in physical
//! chip `i`, with chip 0 being the one farthest from the controller.

use heapless::Vec;

/// Longest supported chain.
pub const MAX_CHIPS: usize = 32;
/// Bytes in a frame for the longest supported chain.
pub const FRAME_CAPACITY: usize = MAX_CHIPS * 2;
/// Digit (column) registers per chip.
pub const DIGIT_COUNT: usize = 8;

pub const NOOP: u8 = 0x00;
/// First digit register; digits occupy `0x01..=0x08`.
pub const DIGIT0: u8 = 0x01;
pub const DECODE_MODE: u8 = 0x09;
pub const INTENSITY: u8 = 0x0A;
pub const SCAN_LIMIT: u8 = 0x0B;
pub const SHUTDOWN: u8 = 0x0C;
pub const DISPLAY_TEST: u8 = 0x0F;

/// Highest accepted intensity level.
pub const MAX_INTENSITY: u8 = 0x0F;

/// One chain transaction, two bytes per chip in shift order.
pub type Frame = Vec<u8, FRAME_CAPACITY>;

/// Returns the digit register for column `0..8`.
#[inline]
pub const fn digit_register(column: usize) -> Option<u8> {
    if column < DIGIT_COUNT {
        Some(DIGIT0 + column as u8)
    } else {
        None
    }
}

#[inline]
pub const fn is_digit_register(register: u8) -> bool {
    matches!(register, 0x01..=0x08)
}

/// Data byte as it must appear on the wire.
///
/// Column bytes are inverted: the module wiring lights an LED for a cleared
/// digit bit.
#[inline]
pub const fn wire_data(register: u8, data: u8) -> u8 {
    if is_digit_register(register) {
        data ^ 0xFF
    } else {
        data
    }
}

#[inline]
const fn chain_length_supported(chip_count: usize) -> bool {
    chip_count >= 1 && chip_count <= MAX_CHIPS
}

/// Builds a frame writing the same pair into every chip.
///
/// Returns `None` when `chip_count` is outside `1..=MAX_CHIPS`.
pub fn build_broadcast_frame(chip_count: usize, register: u8, data: u8) -> Option<Frame> {
    if !chain_length_supported(chip_count) {
        return None;
    }

    let data = wire_data(register, data);
    let mut frame = Frame::new();
    for _ in 0..chip_count {
        frame.push(register).ok()?;
        frame.push(data).ok()?;
    }

    Some(frame)
}

/// Builds a frame that changes only `chip`; every other slot carries a no-op.
///
/// Returns `None` when `chip_count` is unsupported or `chip` is not in the chain.
pub fn build_targeted_frame(
    chip_count: usize,
    register: u8,
    data: u8,
    chip: usize,
) -> Option<Frame> {
    if !chain_length_supported(chip_count) || chip >= chip_count {
        return None;
    }

    let data = wire_data(register, data);
    let mut frame = Frame::new();
    for slot in 0..chip_count {
        if slot == chip {
            frame.push(register).ok()?;
            frame.push(data).ok()?;
        } else {
            frame.push(NOOP).ok()?;
            frame.push(0x00).ok()?;
        }
    }

    Some(frame)
}
