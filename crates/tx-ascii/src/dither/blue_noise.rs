use rand::Rng;
use tx_core::frame::PixelBuffer;

/// Refinement passes of the void-and-cluster approximation.
pub const REFINEMENT_ITERATIONS: usize = 10;

/// Per-image threshold map in [0, 1), row-major.
///
/// Starts from uniform noise, then each pass finds the interior pixel whose
/// 3×3 neighborhood has the highest summed energy (first in raster order
/// on ties) and halves its value. Images narrower or shorter than 3 pixels
/// have no interior and keep the raw noise.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use tx_ascii::dither::blue_noise::blue_noise_map;
/// let map = blue_noise_map(8, 8, &mut StdRng::seed_from_u64(7));
/// assert_eq!(map.len(), 64);
/// assert!(map.iter().all(|v| (0.0..1.0).contains(v)));
/// ```
#[must_use]
pub fn blue_noise_map<R: Rng>(width: u32, height: u32, rng: &mut R) -> Vec<f64> {
    let (w, h) = (width as usize, height as usize);
    let mut map: Vec<f64> = (0..w * h).map(|_| rng.random::<f64>()).collect();
    if w < 3 || h < 3 {
        return map;
    }

    for _ in 0..REFINEMENT_ITERATIONS {
        let mut best = (1, 1);
        let mut best_energy = f64::NEG_INFINITY;
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let energy: f64 = (y - 1..=y + 1)
                    .flat_map(|ny| (x - 1..=x + 1).map(move |nx| ny * w + nx))
                    .map(|i| map[i])
                    .sum();
                if energy > best_energy {
                    best_energy = energy;
                    best = (x, y);
                }
            }
        }
        map[best.1 * w + best.0] *= 0.5;
    }
    map
}

/// Threshold every RGB channel against a fresh blue-noise map scaled by
/// `255 * strength`. Output differs between calls unless `rng` is seeded.
#[must_use]
pub fn blue_noise_dither<R: Rng>(src: &PixelBuffer, strength: f64, rng: &mut R) -> PixelBuffer {
    let map = blue_noise_map(src.width(), src.height(), rng);
    let mut out = src.clone();
    for (px, noise) in out.data_mut().chunks_exact_mut(4).zip(&map) {
        let threshold = noise * 255.0 * strength;
        for c in &mut px[..3] {
            *c = if f64::from(*c) > threshold { 255 } else { 0 };
        }
    }
    out
}
