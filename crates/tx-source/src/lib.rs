//! Image source for textify: decodes files into RGBA pixel buffers.

pub mod image;

pub use crate::image::{from_dynamic, load_image};
