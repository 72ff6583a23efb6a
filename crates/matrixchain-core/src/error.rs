//! Error types shared by the display stack.

use core::fmt;

/// Chain configuration rejected before any bus activity.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ConfigError {
    /// Chip count outside `1..=MAX_CHIPS`.
    ChipCount(usize),
}

/// Custom glyph definition rejected; the table is left unchanged.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GlyphError {
    /// Key is empty or longer than one character.
    NotSingleChar,
    /// No columns supplied.
    Empty,
    /// Key already has a glyph.
    Duplicate(char),
    /// More columns than one glyph may carry.
    TooWide(usize),
    /// Custom glyph store is at capacity.
    StoreFull,
}

/// Byte-list decoding failed; no partial result is produced.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ByteParseError {
    /// Input holds no byte tokens at all.
    Empty,
    /// Token at this zero-based position (counting empty tokens) is malformed
    /// or outside `0..=255`.
    InvalidToken { position: usize },
    /// More values than a decoded list can hold.
    TooLong,
}

/// Text could not be turned into glyphs.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LayoutError {
    /// Not a single character of the text has a glyph.
    AllGlyphsUnmatched,
    /// More renderable characters than a layout can hold.
    TextTooLong,
}

/// Errors surfaced by [`crate::display::DisplayController`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DisplayError<BusErr> {
    Bus(BusErr),
    Config(ConfigError),
    Glyph(GlyphError),
    ByteParse(ByteParseError),
    Layout(LayoutError),
}

impl<BusErr> From<ConfigError> for DisplayError<BusErr> {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl<BusErr> From<GlyphError> for DisplayError<BusErr> {
    fn from(err: GlyphError) -> Self {
        Self::Glyph(err)
    }
}

impl<BusErr> From<ByteParseError> for DisplayError<BusErr> {
    fn from(err: ByteParseError) -> Self {
        Self::ByteParse(err)
    }
}

impl<BusErr> From<LayoutError> for DisplayError<BusErr> {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChipCount(count) => write!(f, "unsupported chip count {count}"),
        }
    }
}

impl fmt::Display for GlyphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSingleChar => f.write_str("glyph key must be exactly one character"),
            Self::Empty => f.write_str("glyph has no columns"),
            Self::Duplicate(key) => write!(f, "glyph {key:?} already defined"),
            Self::TooWide(width) => write!(f, "glyph is {width} columns wide"),
            Self::StoreFull => f.write_str("custom glyph store is full"),
        }
    }
}

impl fmt::Display for ByteParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("no bytes in list"),
            Self::InvalidToken { position } => write!(f, "invalid byte at position {position}"),
            Self::TooLong => f.write_str("byte list too long"),
        }
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllGlyphsUnmatched => f.write_str("no character of the text has a glyph"),
            Self::TextTooLong => f.write_str("text too long"),
        }
    }
}

impl<BusErr: fmt::Display> fmt::Display for DisplayError<BusErr> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(err) => write!(f, "bus: {err}"),
            Self::Config(err) => write!(f, "config: {err}"),
            Self::Glyph(err) => write!(f, "glyph: {err}"),
            Self::ByteParse(err) => write!(f, "byte list: {err}"),
            Self::Layout(err) => write!(f, "layout: {err}"),
        }
    }
}
