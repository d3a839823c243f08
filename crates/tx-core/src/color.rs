use crate::palette::Rgb;

/// BT.601 perceptual luminance, rounded to the nearest integer.
///
/// # Example
/// ```
/// use tx_core::color::luminance;
/// assert_eq!(luminance(255, 255, 255), 255);
/// assert_eq!(luminance(128, 128, 128), 128);
/// assert_eq!(luminance(255, 0, 0), 76);
/// ```
#[inline(always)]
#[must_use]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let lum = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    lum.round().clamp(0.0, 255.0) as u8
}

/// True when the mean of the three channels is below the midpoint.
///
/// # Example
/// ```
/// use tx_core::color::is_dark;
/// assert!(is_dark((10, 10, 10)));
/// assert!(!is_dark((200, 100, 100)));
/// ```
#[inline(always)]
#[must_use]
pub fn is_dark((r, g, b): Rgb) -> bool {
    (f64::from(r) + f64::from(g) + f64::from(b)) / 3.0 < 128.0
}

/// Multiply every channel by `ratio`, rounding and clamping to [0, 255].
///
/// # Example
/// ```
/// use tx_core::color::scale_rgb;
/// assert_eq!(scale_rgb((100, 50, 200), 2.0), (200, 100, 255));
/// ```
#[inline(always)]
#[must_use]
pub fn scale_rgb((r, g, b): Rgb, ratio: f64) -> Rgb {
    let scale = |c: u8| (f64::from(c) * ratio).round().clamp(0.0, 255.0) as u8;
    (scale(r), scale(g), scale(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luminance_weights_sum_to_one() {
        for v in 0..=255u8 {
            assert_eq!(luminance(v, v, v), v, "gray {v} drifted");
        }
    }

    #[test]
    fn luminance_primaries() {
        assert_eq!(luminance(0, 255, 0), 150);
        assert_eq!(luminance(0, 0, 255), 29);
        assert_eq!(luminance(0, 0, 0), 0);
    }

    #[test]
    fn dark_split_is_mean_below_128() {
        assert!(is_dark((127, 127, 127)));
        assert!(!is_dark((128, 128, 128)));
        assert!(is_dark((255, 0, 0)));
    }

    #[test]
    fn scale_clamps_and_zeroes() {
        assert_eq!(scale_rgb((255, 255, 255), 0.0), (0, 0, 0));
        assert_eq!(scale_rgb((10, 20, 30), 1.0), (10, 20, 30));
        assert_eq!(scale_rgb((200, 200, 200), 1.5), (255, 255, 255));
    }
}
