//! Ordered dithering against Bayer threshold matrices.
//!
//! Purely local: each output channel depends only on its input value, the
//! position modulo `n` and the strength.

use tx_core::frame::PixelBuffer;

/// Bayer 2x2 matrix, levels 0-3.
pub const BAYER_2X2: [[u8; 2]; 2] = [[0, 2], [3, 1]];

/// Bayer 4x4 matrix, levels 0-15.
pub const BAYER_4X4: [[u8; 4]; 4] = [[0, 8, 2, 10], [12, 4, 14, 6], [3, 11, 1, 9], [15, 7, 13, 5]];

/// Bayer 8x8 matrix, levels 0-63.
pub const BAYER_8X8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Threshold at (x, y): `(m / (n² - 1)) * 255 * strength`.
///
/// # Example
/// ```
/// use tx_ascii::dither::ordered::{threshold_at, BAYER_2X2};
/// assert_eq!(threshold_at(&BAYER_2X2, 0, 0, 1.0), 0.0);
/// assert_eq!(threshold_at(&BAYER_2X2, 0, 1, 1.0), 255.0);
/// assert_eq!(threshold_at(&BAYER_2X2, 2, 3, 1.0), 255.0);
/// ```
#[inline(always)]
#[must_use]
pub fn threshold_at<const N: usize>(matrix: &[[u8; N]; N], x: u32, y: u32, strength: f64) -> f64 {
    let m = matrix[y as usize % N][x as usize % N];
    let levels = (N * N - 1) as f64;
    (f64::from(m) / levels) * 255.0 * strength
}

/// Apply a threshold matrix to every RGB channel; alpha is copied through.
///
/// A channel becomes 255 when strictly above the threshold, else 0.
#[must_use]
pub fn ordered_dither<const N: usize>(
    src: &PixelBuffer,
    matrix: &[[u8; N]; N],
    strength: f64,
) -> PixelBuffer {
    let mut out = src.clone();
    let w = src.width();
    if w == 0 {
        return out;
    }
    for (i, px) in out.data_mut().chunks_exact_mut(4).enumerate() {
        let x = (i % w as usize) as u32;
        let y = (i / w as usize) as u32;
        let threshold = threshold_at(matrix, x, y, strength);
        for c in &mut px[..3] {
            *c = if f64::from(*c) > threshold { 255 } else { 0 };
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_permutation<const N: usize>(matrix: &[[u8; N]; N]) {
        let mut seen: Vec<u8> = matrix.iter().flatten().copied().collect();
        seen.sort_unstable();
        let expected: Vec<u8> = (0..(N * N) as u8).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn matrices_hold_every_level_once() {
        assert_permutation(&BAYER_2X2);
        assert_permutation(&BAYER_4X4);
        assert_permutation(&BAYER_8X8);
    }

    #[test]
    fn output_depends_only_on_position_modulo_n() {
        let mut src = PixelBuffer::new(13, 11);
        for (i, b) in src.data_mut().iter_mut().enumerate() {
            *b = (i * 37 % 251) as u8;
        }
        let out = ordered_dither(&src, &BAYER_4X4, 0.8);
        for y in 0..11 {
            for x in 0..13 {
                let (r, g, b, a) = src.pixel(x, y);
                let t = threshold_at(&BAYER_4X4, x % 4, y % 4, 0.8);
                let q = |v: u8| if f64::from(v) > t { 255 } else { 0 };
                assert_eq!(out.pixel(x, y), (q(r), q(g), q(b), a));
            }
        }
    }

    #[test]
    fn independent_of_image_size() {
        let small = PixelBuffer::filled(4, 4, [100, 150, 200, 255]);
        let large = PixelBuffer::filled(20, 9, [100, 150, 200, 255]);
        let a = ordered_dither(&small, &BAYER_2X2, 1.0);
        let b = ordered_dither(&large, &BAYER_2X2, 1.0);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(a.pixel(x, y), b.pixel(x + 8, y + 4));
            }
        }
    }

    #[test]
    fn mid_gray_produces_half_coverage_on_2x2() {
        // Thresholds are 0, 85, 170, 255: 128 lights exactly 2 of 4.
        let src = PixelBuffer::filled(2, 2, [128, 128, 128, 255]);
        let out = ordered_dither(&src, &BAYER_2X2, 1.0);
        let lit = out.data().chunks(4).filter(|p| p[0] == 255).count();
        assert_eq!(lit, 2);
    }
}
