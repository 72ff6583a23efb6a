//! Character to column-bitmap lookup.
//!
//! Built-in glyphs index into one shared byte table; custom glyphs added at
//! runtime keep their own columns. The table only grows.

use heapless::Vec;
use log::debug;

use crate::{
    error::GlyphError,
    font::{BUILTIN_GLYPHS, FONT_DATA},
};

/// Custom glyphs a table can hold.
pub const MAX_CUSTOM_GLYPHS: usize = 32;
/// Widest custom glyph, two modules. Glyphs wider than the 8-column margin
/// are fed in column by column while scrolling.
pub const MAX_GLYPH_COLUMNS: usize = 16;

/// Where a glyph's columns are stored.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GlyphSource {
    Builtin { offset: u16, length: u8 },
    Custom { index: usize },
}

/// Column bitmap of one character, bit 0 = top row.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Glyph<'a> {
    pub key: char,
    pub columns: &'a [u8],
}

impl Glyph<'_> {
    /// Columns the glyph advances the cursor by.
    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

#[derive(Clone, Debug)]
struct CustomGlyph {
    key: char,
    columns: Vec<u8, MAX_GLYPH_COLUMNS>,
}

#[derive(Clone, Debug, Default)]
pub struct GlyphTable {
    custom: Vec<CustomGlyph, MAX_CUSTOM_GLYPHS>,
}

impl GlyphTable {
    pub const fn new() -> Self {
        Self { custom: Vec::new() }
    }

    /// Number of glyphs, built-in and custom.
    pub fn len(&self) -> usize {
        BUILTIN_GLYPHS.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn custom_count(&self) -> usize {
        self.custom.len()
    }

    pub fn contains(&self, key: char) -> bool {
        self.source_of(key).is_some()
    }

    /// Finds where `key` is stored; built-ins win over custom glyphs.
    pub fn source_of(&self, key: char) -> Option<GlyphSource> {
        if let Some(&(_, offset, length)) = BUILTIN_GLYPHS.iter().find(|(k, _, _)| *k == key) {
            return Some(GlyphSource::Builtin { offset, length });
        }

        self.custom
            .iter()
            .position(|glyph| glyph.key == key)
            .map(|index| GlyphSource::Custom { index })
    }

    /// Returns the stored columns for a source.
    pub fn columns(&self, source: GlyphSource) -> Option<&[u8]> {
        match source {
            GlyphSource::Builtin { offset, length } => {
                let start = offset as usize;
                FONT_DATA.get(start..start + length as usize)
            }
            GlyphSource::Custom { index } => self
                .custom
                .get(index)
                .map(|glyph| glyph.columns.as_slice()),
        }
    }

    pub fn lookup(&self, key: char) -> Option<Glyph<'_>> {
        let columns = self.columns(self.source_of(key)?)?;
        Some(Glyph { key, columns })
    }

    /// Registers a one-character glyph.
    ///
    /// Keys must be exactly one character not already in the table, and the
    /// column list must hold `1..=MAX_GLYPH_COLUMNS` columns.
    pub fn add_custom(&mut self, key: &str, columns: &[u8]) -> Result<(), GlyphError> {
        let mut chars = key.chars();
        let (Some(key), None) = (chars.next(), chars.next()) else {
            return Err(GlyphError::NotSingleChar);
        };
        if columns.is_empty() {
            return Err(GlyphError::Empty);
        }
        if self.contains(key) {
            return Err(GlyphError::Duplicate(key));
        }
        if columns.len() > MAX_GLYPH_COLUMNS {
            return Err(GlyphError::TooWide(columns.len()));
        }

        let columns = Vec::from_slice(columns).map_err(|_| GlyphError::TooWide(columns.len()))?;
        self.custom
            .push(CustomGlyph { key, columns })
            .map_err(|_| GlyphError::StoreFull)?;

        debug!(
            "glyph: added custom {:?} ({} custom total)",
            key,
            self.custom.len()
        );
        Ok(())
    }

    /// Every glyph in lookup order, built-ins first.
    pub fn glyphs(&self) -> impl Iterator<Item = Glyph<'_>> + '_ {
        let builtin = BUILTIN_GLYPHS.iter().filter_map(|&(key, offset, length)| {
            let start = offset as usize;
            FONT_DATA
                .get(start..start + length as usize)
                .map(|columns| Glyph { key, columns })
        });
        let custom = self.custom.iter().map(|glyph| Glyph {
            key: glyph.key,
            columns: glyph.columns.as_slice(),
        });

        builtin.chain(custom)
    }
}
