//! Dither engine: optional pre-quantization pass on the resampled buffer.
//!
//! Every algorithm maps a [`PixelBuffer`] to a new buffer of the same size,
//! works on R, G and B independently, targets 0/255 per channel and leaves
//! alpha untouched.

pub mod adaptive;
pub mod blue_noise;
pub mod diffusion;
pub mod kernel;
pub mod ordered;

use std::borrow::Cow;

use rand::Rng;
use tx_core::config::{ArtStyle, DitherAlgorithm, DitherOptions};
use tx_core::frame::PixelBuffer;

use self::kernel::Kernel;

/// Fixed midpoint of the binary quantizer.
pub const MIDPOINT: u8 = 128;

/// Ramps up to this length get no dithering in monochrome ANSI mode.
const SHORT_RAMP: usize = 5;
/// ASCII ramps at least this long get serpentine Floyd–Steinberg.
const LONG_RAMP: usize = 50;

/// Quantize a channel to 0 or 255 around [`MIDPOINT`].
#[inline(always)]
#[must_use]
pub fn quantize_midpoint(value: u8) -> u8 {
    if value < MIDPOINT { 0 } else { 255 }
}

/// Store a diffused value the way an 8-bit clamped canvas buffer does:
/// round half to even, saturate to [0, 255].
#[inline(always)]
pub(crate) fn store_channel(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Diffusion kernel and serpentine flag of an error-diffusion algorithm.
///
/// # Example
/// ```
/// use tx_ascii::dither::diffusion_kernel;
/// use tx_core::config::DitherAlgorithm;
/// let (kernel, serpentine) = diffusion_kernel(DitherAlgorithm::FloydSteinbergSerpentine).unwrap();
/// assert_eq!(kernel.divisor, 16);
/// assert!(serpentine);
/// assert!(diffusion_kernel(DitherAlgorithm::Ordered2x2).is_none());
/// ```
#[must_use]
pub fn diffusion_kernel(algorithm: DitherAlgorithm) -> Option<(&'static Kernel, bool)> {
    match algorithm {
        DitherAlgorithm::FloydSteinberg => Some((&kernel::FLOYD_STEINBERG, false)),
        DitherAlgorithm::FloydSteinbergSerpentine => Some((&kernel::FLOYD_STEINBERG, true)),
        DitherAlgorithm::JarvisJudiceNinke => Some((&kernel::JARVIS_JUDICE_NINKE, false)),
        DitherAlgorithm::Stucki => Some((&kernel::STUCKI, false)),
        DitherAlgorithm::Burkes => Some((&kernel::BURKES, false)),
        DitherAlgorithm::Sierra => Some((&kernel::SIERRA, false)),
        DitherAlgorithm::SierraLite => Some((&kernel::SIERRA_LITE, false)),
        DitherAlgorithm::Atkinson => Some((&kernel::ATKINSON, false)),
        DitherAlgorithm::None
        | DitherAlgorithm::Ordered2x2
        | DitherAlgorithm::Ordered4x4
        | DitherAlgorithm::Ordered8x8
        | DitherAlgorithm::BlueNoise
        | DitherAlgorithm::AdaptiveHybrid => None,
    }
}

/// Apply the configured dither, drawing blue noise from the thread RNG.
///
/// `none` or strength 0 borrows the input unchanged.
///
/// # Example
/// ```
/// use tx_ascii::dither::apply_dither;
/// use tx_core::config::{DitherAlgorithm, DitherOptions};
/// use tx_core::frame::PixelBuffer;
/// let src = PixelBuffer::filled(4, 4, [100, 100, 100, 255]);
/// let off = DitherOptions { algorithm: DitherAlgorithm::Stucki, strength: 0.0 };
/// assert_eq!(*apply_dither(&src, &off), src);
/// ```
#[must_use]
pub fn apply_dither<'a>(src: &'a PixelBuffer, options: &DitherOptions) -> Cow<'a, PixelBuffer> {
    apply_dither_with_rng(src, options, &mut rand::rng())
}

/// Apply the configured dither with an explicit random source.
///
/// Only [`DitherAlgorithm::BlueNoise`] draws from `rng`. Strength is
/// clamped to [0, 1].
#[must_use]
pub fn apply_dither_with_rng<'a, R: Rng>(
    src: &'a PixelBuffer,
    options: &DitherOptions,
    rng: &mut R,
) -> Cow<'a, PixelBuffer> {
    if options.is_identity() || src.is_empty() {
        return Cow::Borrowed(src);
    }
    let strength = options.strength.clamp(0.0, 1.0);
    log::trace!(
        "dither {} strength {strength} on {}×{}",
        options.algorithm,
        src.width(),
        src.height()
    );

    if let Some((kernel, serpentine)) = diffusion_kernel(options.algorithm) {
        return Cow::Owned(diffusion::error_diffusion(src, kernel, serpentine, strength));
    }
    let out = match options.algorithm {
        DitherAlgorithm::Ordered2x2 => ordered::ordered_dither(src, &ordered::BAYER_2X2, strength),
        DitherAlgorithm::Ordered4x4 => ordered::ordered_dither(src, &ordered::BAYER_4X4, strength),
        DitherAlgorithm::Ordered8x8 => ordered::ordered_dither(src, &ordered::BAYER_8X8, strength),
        DitherAlgorithm::BlueNoise => blue_noise::blue_noise_dither(src, strength, rng),
        DitherAlgorithm::AdaptiveHybrid => adaptive::adaptive_dither(src, strength),
        _ => return Cow::Borrowed(src),
    };
    Cow::Owned(out)
}

/// Suggested default algorithm for a style / ramp / color combination.
///
/// Colored ANSI and short ramps read best undithered; long ASCII ramps
/// have enough levels to absorb serpentine diffusion.
///
/// # Example
/// ```
/// use tx_ascii::dither::recommend_algorithm;
/// use tx_core::config::{ArtStyle, DitherAlgorithm};
/// assert_eq!(recommend_algorithm(ArtStyle::Ansi, 5, true), DitherAlgorithm::None);
/// assert_eq!(recommend_algorithm(ArtStyle::Ansi, 6, false), DitherAlgorithm::Ordered2x2);
/// assert_eq!(
///     recommend_algorithm(ArtStyle::Ascii, 70, false),
///     DitherAlgorithm::FloydSteinbergSerpentine
/// );
/// ```
#[must_use]
pub fn recommend_algorithm(style: ArtStyle, ramp_len: usize, use_colors: bool) -> DitherAlgorithm {
    match style {
        ArtStyle::Ansi if use_colors => DitherAlgorithm::None,
        ArtStyle::Ansi if ramp_len <= SHORT_RAMP => DitherAlgorithm::None,
        ArtStyle::Ansi => DitherAlgorithm::Ordered2x2,
        ArtStyle::Ascii if ramp_len >= LONG_RAMP => DitherAlgorithm::FloydSteinbergSerpentine,
        ArtStyle::Ascii => DitherAlgorithm::None,
    }
}
