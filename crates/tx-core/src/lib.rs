//! Data model, tables and configuration for textify.
//!
//! This crate contains the pixel buffer, the output cell grid, the named
//! character ramps, the ANSI palettes and the conversion options shared
//! across the textify workspace.

pub mod charset;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod palette;

pub use charset::CharacterRamp;
pub use config::{ArtStyle, ColorScheme, ConversionOptions, DitherAlgorithm, DitherOptions};
pub use error::CoreError;
pub use frame::{Cell, Conversion, ConversionResult, PixelBuffer};
pub use palette::{ColorPalette, Rgb};
