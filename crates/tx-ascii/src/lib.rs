//! Image → text conversion engine for textify.
//!
//! Resamples a pixel buffer to the character grid, optionally dithers it,
//! then maps each pixel to a ramp glyph (monochrome) or a colored cell.

pub mod color_map;
pub mod convert;
pub mod dither;
pub mod luminance;
pub mod resize;

pub use convert::{convert, convert_with_rng};
pub use dither::{apply_dither, apply_dither_with_rng, recommend_algorithm};
