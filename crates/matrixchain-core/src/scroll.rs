//! Text layout and the right-to-left scroll state machine.

use heapless::Vec;
use log::warn;

use crate::{
    error::LayoutError,
    framebuffer::{FrameBuffer, MARGIN},
    glyph::{Glyph, GlyphTable},
};

/// Most glyphs one layout can hold.
pub const MAX_TEXT_GLYPHS: usize = 128;

/// Glyphs of a text in reading order, characters without a glyph dropped.
#[derive(Clone, Debug)]
pub struct TextLayout<'a> {
    glyphs: Vec<Glyph<'a>, MAX_TEXT_GLYPHS>,
    total_width: usize,
    skipped: usize,
}

impl<'a> TextLayout<'a> {
    pub fn glyphs(&self) -> &[Glyph<'a>] {
        &self.glyphs
    }

    /// Width of every glyph, in order.
    pub fn advances(&self) -> impl Iterator<Item = usize> + '_ {
        self.glyphs.iter().map(Glyph::width)
    }

    /// Sum of all glyph widths.
    pub fn total_width(&self) -> usize {
        self.total_width
    }

    /// Characters that had no glyph.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Steps needed to scroll the whole text in and out of a window of
    /// `chip_count` modules.
    pub fn scroll_steps(&self, chip_count: usize) -> usize {
        self.total_width + chip_count * MARGIN
    }
}

/// Expands `text` into glyphs.
///
/// Unknown characters are skipped; a text with no renderable character at
/// all is an error.
pub fn layout_text<'a>(table: &'a GlyphTable, text: &str) -> Result<TextLayout<'a>, LayoutError> {
    let mut glyphs = Vec::new();
    let mut total_width = 0usize;
    let mut skipped = 0usize;

    for ch in text.chars() {
        let Some(glyph) = table.lookup(ch) else {
            warn!("glyph: no glyph for {:?}, skipped", ch);
            skipped += 1;
            continue;
        };

        total_width += glyph.width();
        glyphs.push(glyph).map_err(|_| LayoutError::TextTooLong)?;
    }

    if glyphs.is_empty() {
        return Err(LayoutError::AllGlyphsUnmatched);
    }

    Ok(TextLayout {
        glyphs,
        total_width,
        skipped,
    })
}

/// Drives one pass of a text through the window.
///
/// Each step may print the next glyph just outside the right edge of the
/// window, then shifts the whole buffer one column left. Columns of a glyph
/// wider than the margin are appended at the buffer end one per step. After
/// the last step the text has left the window entirely.
#[derive(Debug)]
pub struct TextScroll<'l, 'a> {
    layout: &'l TextLayout<'a>,
    next_glyph: usize,
    pending: &'a [u8],
    countdown: usize,
    remaining: usize,
    total: usize,
}

impl<'l, 'a> TextScroll<'l, 'a> {
    pub fn new(layout: &'l TextLayout<'a>, chip_count: usize) -> Self {
        let total = layout.scroll_steps(chip_count);
        Self {
            layout,
            next_glyph: 0,
            pending: &[],
            countdown: 1,
            remaining: total,
            total,
        }
    }

    pub fn total_steps(&self) -> usize {
        self.total
    }

    pub fn remaining_steps(&self) -> usize {
        self.remaining
    }

    /// Advances one column. Returns `false` once the scroll is complete.
    pub fn step(&mut self, frame: &mut FrameBuffer) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;

        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown == 0 {
            if let Some(glyph) = self.layout.glyphs.get(self.next_glyph) {
                let columns = glyph.columns;
                let start = frame.right_margin();
                let written = frame.write_at(start, columns) - start;
                self.pending = &columns[written..];
                self.countdown = glyph.width();
                self.next_glyph += 1;
            }
        }

        frame.scroll_step();
        if let Some((&column, rest)) = self.pending.split_first() {
            frame.write_at(frame.len() - 1, &[column]);
            self.pending = rest;
        }
        true
    }
}
