//! Column buffer wider than the chain.
//!
//! Layout: `[margin | visible window | margin]`, each margin one module
//! (8 columns) wide, so glyphs can enter and leave the window smoothly.
//! Column byte bit `n` = row `n`.

use heapless::Vec;
use max7219_chain::protocol::MAX_CHIPS;

/// Off-screen columns on either side of the window.
pub const MARGIN: usize = 8;
/// Longest buffer, for the longest supported chain.
pub const MAX_COLUMNS: usize = (MAX_CHIPS + 2) * MARGIN;

#[derive(Clone, Debug)]
pub struct FrameBuffer {
    columns: Vec<u8, MAX_COLUMNS>,
}

impl FrameBuffer {
    /// Creates a blank buffer for `chip_count` modules.
    pub fn new(chip_count: usize) -> Self {
        let mut frame = Self {
            columns: Vec::new(),
        };
        frame.resize(chip_count);
        frame
    }

    /// Resizes to `(chip_count + 2) * 8` columns.
    ///
    /// Growing appends blank columns; shrinking cuts at the new right margin.
    /// `chip_count` is clamped to `1..=MAX_CHIPS`.
    pub fn resize(&mut self, chip_count: usize) {
        let len = (chip_count.clamp(1, MAX_CHIPS) + 2) * MARGIN;
        if self.columns.len() > len {
            self.columns.truncate(len);
        }
        while self.columns.len() < len {
            let _ = self.columns.push(0);
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn chip_count(&self) -> usize {
        self.columns.len() / MARGIN - 2
    }

    /// Every column, margins included.
    pub fn columns(&self) -> &[u8] {
        &self.columns
    }

    pub fn clear(&mut self) {
        self.columns.fill(0);
    }

    /// First column of the right margin; also the end of the visible window.
    pub fn right_margin(&self) -> usize {
        self.columns.len() - MARGIN
    }

    /// The columns currently mapped onto the chain.
    pub fn visible(&self) -> &[u8] {
        &self.columns[MARGIN..self.right_margin()]
    }

    /// Buffer index for a window-relative offset.
    ///
    /// The offset is clamped to `-8..=len - 9`, so `-8` is the first margin
    /// column and no offset lands past the buffer.
    pub fn position_of(&self, offset: i32) -> usize {
        let last = self.columns.len() as i32 - MARGIN as i32 - 1;
        (offset.clamp(-(MARGIN as i32), last) + MARGIN as i32) as usize
    }

    /// Writes a column run at a window-relative offset.
    ///
    /// Returns the buffer index following the last column written.
    pub fn write_columns(&mut self, offset: i32, columns: &[u8]) -> usize {
        let position = self.position_of(offset);
        self.write_at(position, columns)
    }

    /// Writes a column run at a buffer index, clipped at the buffer end.
    ///
    /// Returns the buffer index following the last column written.
    pub fn write_at(&mut self, position: usize, columns: &[u8]) -> usize {
        let Some(slots) = self.columns.get_mut(position..) else {
            return position;
        };

        let written = slots.len().min(columns.len());
        slots[..written].copy_from_slice(&columns[..written]);
        position + written
    }

    /// Moves every column one step toward index 0 and blanks the last one.
    pub fn scroll_step(&mut self) {
        let len = self.columns.len();
        if len == 0 {
            return;
        }

        self.columns.copy_within(1.., 0);
        self.columns[len - 1] = 0;
    }
}
