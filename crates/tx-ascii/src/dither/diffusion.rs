use tx_core::frame::PixelBuffer;

use super::kernel::Kernel;
use super::{quantize_midpoint, store_channel};

/// Error diffusion over a live copy of `src`, one kernel for every variant.
///
/// Each RGB channel is quantized to 0/255 around 128 and
/// `(old - new) * strength` is pushed onto unprocessed neighbors. Taps
/// outside the image are dropped. With `serpentine`, odd rows run right to
/// left and the kernel's `dx` is mirrored. Alpha is copied through.
///
/// # Example
/// ```
/// use tx_ascii::dither::diffusion::error_diffusion;
/// use tx_ascii::dither::kernel::FLOYD_STEINBERG;
/// use tx_core::frame::PixelBuffer;
/// let src = PixelBuffer::filled(8, 8, [100, 100, 100, 255]);
/// let out = error_diffusion(&src, &FLOYD_STEINBERG, false, 1.0);
/// assert!(out.data().chunks(4).all(|p| (p[0] == 0 || p[0] == 255) && p[3] == 255));
/// ```
#[must_use]
pub fn error_diffusion(
    src: &PixelBuffer,
    kernel: &Kernel,
    serpentine: bool,
    strength: f64,
) -> PixelBuffer {
    let mut out = src.clone();
    let w = i64::from(src.width());
    let h = i64::from(src.height());
    let data = out.data_mut();

    for y in 0..h {
        let reverse = serpentine && y % 2 == 1;
        let dir: i64 = if reverse { -1 } else { 1 };
        for step in 0..w {
            let x = if reverse { w - 1 - step } else { step };
            let idx = ((y * w + x) * 4) as usize;
            for c in 0..3 {
                let old = data[idx + c];
                let new = quantize_midpoint(old);
                data[idx + c] = new;
                let error = (f64::from(old) - f64::from(new)) * strength;
                if error == 0.0 {
                    continue;
                }
                for &(dx, dy, weight) in kernel.entries {
                    let nx = x + i64::from(dx) * dir;
                    let ny = y + i64::from(dy);
                    if nx < 0 || nx >= w || ny >= h {
                        continue;
                    }
                    let n = ((ny * w + nx) * 4) as usize + c;
                    data[n] = store_channel(f64::from(data[n]) + error * kernel.weight(weight));
                }
            }
        }
    }
    out
}
