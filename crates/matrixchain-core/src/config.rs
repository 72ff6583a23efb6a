//! Chain shape and addressing.

use max7219_chain::protocol::MAX_CHIPS;

use crate::{error::ConfigError, matrix::Rotation};

/// Chain layout and start-up settings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChainConfig {
    /// Modules in the chain.
    pub chip_count: usize,
    /// Orientation applied to every module, e.g. for 4-in-1 boards.
    pub rotation: Rotation,
    /// Whether the module nearest the controller shows the leftmost slice.
    pub reversed: bool,
    /// Brightness written during setup, 0..=15.
    pub intensity: u8,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ChainConfig {
    pub const fn new(chip_count: usize) -> Self {
        Self {
            chip_count,
            rotation: Rotation::None,
            reversed: false,
            intensity: 1,
        }
    }

    pub const fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub const fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    pub const fn with_intensity(mut self, intensity: u8) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_CHIPS).contains(&self.chip_count) {
            return Err(ConfigError::ChipCount(self.chip_count));
        }
        Ok(())
    }

    /// Columns in the visible window.
    pub const fn visible_width(&self) -> usize {
        self.chip_count * 8
    }
}

/// Chips addressed by a register write.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Target {
    All,
    /// Physical index, 0 = farthest from the controller.
    Chip(usize),
}

/// Physical chip showing visible slice `slice` (0 = leftmost 8 columns).
///
/// Slices are consumed from the far end of the chain unless `reversed`.
pub const fn slice_to_chip_index(slice: usize, chip_count: usize, reversed: bool) -> usize {
    if reversed {
        slice
    } else {
        chip_count - 1 - slice
    }
}
