#![cfg_attr(not(test), no_std)]

//! Text and pattern rendering for chains of MAX7219 8x8 LED modules.
//!
//! [`display::DisplayController`] ties together the chain driver, a column
//! framebuffer, the glyph table and the scroll engine.

pub mod bytes;
pub mod config;
pub mod display;
pub mod error;
mod font;
pub mod framebuffer;
pub mod glyph;
pub mod matrix;
pub mod scroll;

#[cfg(feature = "embedded-graphics")]
mod graphics;

pub use bytes::{ByteList, decode_byte_list};
pub use config::{ChainConfig, Target, slice_to_chip_index};
pub use display::{DisplayController, DisplayResult, SetupFailure};
pub use error::{ByteParseError, ConfigError, DisplayError, GlyphError, LayoutError};
pub use framebuffer::FrameBuffer;
pub use glyph::{Glyph, GlyphTable};
pub use matrix::{Flip, Matrix8x8, Rotation};
