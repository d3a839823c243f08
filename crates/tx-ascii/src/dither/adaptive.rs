use tx_core::color::luminance;
use tx_core::frame::PixelBuffer;

use super::ordered::{BAYER_4X4, threshold_at};
use super::{quantize_midpoint, store_channel};

/// Above this local contrast a pixel is thresholded without diffusion.
pub const EDGE_CONTRAST: f64 = 0.3;
/// Below this local contrast a pixel uses the 4×4 ordered pattern.
pub const FLAT_CONTRAST: f64 = 0.1;
/// Error scale for the partial diffusion band.
pub const PARTIAL_STRENGTH: f64 = 0.5;
/// Partial diffusion taps: right, below, below-right.
pub const PARTIAL_KERNEL: [(i64, i64, f64); 3] = [(1, 0, 0.5), (0, 1, 0.3), (1, 1, 0.2)];

/// Max absolute luminance difference to the 8-neighborhood, over 255.
///
/// Computed on the input before any pixel is rewritten.
///
/// # Example
/// ```
/// use tx_ascii::dither::adaptive::contrast_map;
/// use tx_core::frame::PixelBuffer;
/// let flat = PixelBuffer::filled(3, 3, [50, 50, 50, 255]);
/// assert!(contrast_map(&flat).iter().all(|&c| c == 0.0));
/// ```
#[must_use]
pub fn contrast_map(src: &PixelBuffer) -> Vec<f64> {
    let w = i64::from(src.width());
    let h = i64::from(src.height());
    let lum: Vec<i32> = src
        .data()
        .chunks_exact(4)
        .map(|p| i32::from(luminance(p[0], p[1], p[2])))
        .collect();

    let mut map = vec![0.0; lum.len()];
    for y in 0..h {
        for x in 0..w {
            let center = lum[(y * w + x) as usize];
            let mut max_diff = 0;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let (nx, ny) = (x + dx, y + dy);
                    if (dx == 0 && dy == 0) || nx < 0 || ny < 0 || nx >= w || ny >= h {
                        continue;
                    }
                    max_diff = max_diff.max((lum[(ny * w + nx) as usize] - center).abs());
                }
            }
            map[(y * w + x) as usize] = f64::from(max_diff) / 255.0;
        }
    }
    map
}

/// Region-adaptive dither.
///
/// - contrast > 0.3: midpoint threshold only, edges stay crisp;
/// - 0.1 ≤ contrast ≤ 0.3: midpoint threshold plus half-strength diffusion
///   to the right, below and below-right neighbors;
/// - contrast < 0.1: Bayer 4×4 threshold scaled by strength.
#[must_use]
pub fn adaptive_dither(src: &PixelBuffer, strength: f64) -> PixelBuffer {
    let contrast = contrast_map(src);
    let mut out = src.clone();
    let w = i64::from(src.width());
    let h = i64::from(src.height());
    let data = out.data_mut();

    for y in 0..h {
        for x in 0..w {
            let p = (y * w + x) as usize;
            let local = contrast[p];
            for c in 0..3 {
                let i = p * 4 + c;
                let old = data[i];
                if local > EDGE_CONTRAST {
                    data[i] = quantize_midpoint(old);
                } else if local >= FLAT_CONTRAST {
                    let new = quantize_midpoint(old);
                    data[i] = new;
                    let error = (f64::from(old) - f64::from(new)) * strength * PARTIAL_STRENGTH;
                    for (dx, dy, weight) in PARTIAL_KERNEL {
                        let (nx, ny) = (x + dx, y + dy);
                        if nx >= w || ny >= h {
                            continue;
                        }
                        let n = ((ny * w + nx) * 4) as usize + c;
                        data[n] = store_channel(f64::from(data[n]) + error * weight);
                    }
                } else {
                    let threshold = threshold_at(&BAYER_4X4, x as u32, y as u32, strength);
                    data[i] = if f64::from(old) > threshold { 255 } else { 0 };
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dither::ordered::ordered_dither;

    fn split(w: u32, h: u32, left: u8, right: u8) -> PixelBuffer {
        let mut fb = PixelBuffer::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let v = if x < w / 2 { left } else { right };
                let o = fb.offset(x, y);
                fb.data_mut()[o..o + 4].copy_from_slice(&[v, v, v, 255]);
            }
        }
        fb
    }

    #[test]
    fn partial_kernel_sums_to_one() {
        let total: f64 = PARTIAL_KERNEL.iter().map(|&(_, _, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn contrast_detects_edges() {
        let fb = split(6, 3, 0, 255);
        let map = contrast_map(&fb);
        // Columns 2 and 3 straddle the edge.
        assert!((map[2] - 1.0).abs() < 1e-9);
        assert!((map[3] - 1.0).abs() < 1e-9);
        assert!(map[0].abs() < 1e-9);
        assert!(map[5].abs() < 1e-9);
    }

    #[test]
    fn flat_regions_match_ordered_4x4() {
        let fb = PixelBuffer::filled(8, 8, [140, 60, 200, 255]);
        assert_eq!(adaptive_dither(&fb, 0.7), ordered_dither(&fb, &BAYER_4X4, 0.7));
    }

    #[test]
    fn edges_use_plain_threshold() {
        // Edge columns of a 100 | 200 split see contrast 100/255 > 0.3.
        let fb = split(4, 2, 100, 200);
        let out = adaptive_dither(&fb, 1.0);
        for y in 0..2 {
            assert_eq!(out.pixel(1, y).0, 0);
            assert_eq!(out.pixel(2, y).0, 255);
        }
    }

    #[test]
    fn middle_band_diffuses_error() {
        // 120 | 160: contrast 40/255 ≈ 0.157 on the seam.
        let fb = split(4, 1, 120, 160);
        let out = adaptive_dither(&fb, 1.0);
        // (1,0): 120 → 0, pushes 120 * 0.5 * 0.5 = 30 right: 160 + 30 → 190 → 255.
        assert_eq!(out.pixel(1, 0).0, 0);
        assert_eq!(out.pixel(2, 0).0, 255);
    }
}
