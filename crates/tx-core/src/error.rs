use thiserror::Error;

/// Errors originating from the conversion core.
///
/// Every variant is a caller-contract violation: the pipeline is pure, so
/// there is nothing transient to retry and no state to roll back.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Target or source dimensions are zero.
    #[error("Invalid dimensions: {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Pixel data length does not match `width * height * 4`.
    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch {
        /// Expected byte count.
        expected: usize,
        /// Actual byte count.
        actual: usize,
    },

    /// Character ramp key not in the built-in table.
    #[error("Unknown character ramp: {0}")]
    UnknownRamp(String),

    /// Dithering algorithm name not in the known set.
    #[error("Unknown dithering algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Palette size other than 16 or 256.
    #[error("Unsupported palette size: {0} (expected 16 or 256)")]
    InvalidPaletteSize(u16),

    /// Invalid numeric option.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
