use tx_core::charset::CharacterRamp;
use tx_core::config::ConversionOptions;
use tx_core::frame::PixelBuffer;

/// Apply contrast and brightness to a luminance value.
///
/// Contrast: multiply around 128. Brightness: additive offset.
/// Result clamped to [0, 255].
///
/// # Example
/// ```
/// use tx_ascii::luminance::adjust_tone;
/// assert_eq!(adjust_tone(128.0, 3.0, 0.0), 128.0);
/// assert_eq!(adjust_tone(200.0, 2.0, 0.0), 255.0);
/// assert_eq!(adjust_tone(100.0, 1.0, -20.0), 80.0);
/// ```
#[inline(always)]
#[must_use]
pub fn adjust_tone(luminance: f64, contrast: f64, brightness: f64) -> f64 {
    ((luminance - 128.0) * contrast + 128.0 + brightness).clamp(0.0, 255.0)
}

/// Luminance of pixel (x, y) used for glyph indexing.
///
/// Tone adjustment runs on the raw luminance; the black-on-white scheme
/// inverts the adjusted value afterwards. The colored path orders these
/// the other way round (see [`crate::color_map::colored_cell`]).
///
/// # Example
/// ```
/// use tx_ascii::luminance::adjusted_luminance;
/// use tx_core::config::{ColorScheme, ConversionOptions};
/// use tx_core::frame::PixelBuffer;
///
/// let frame = PixelBuffer::filled(1, 1, [0, 0, 0, 255]);
/// let opts = ConversionOptions {
///     brightness: 100.0,
///     color_scheme: ColorScheme::BlackOnWhite,
///     ..ConversionOptions::default()
/// };
/// assert_eq!(adjusted_luminance(&frame, 0, 0, &opts), 155.0);
/// ```
#[inline(always)]
#[must_use]
pub fn adjusted_luminance(frame: &PixelBuffer, x: u32, y: u32, options: &ConversionOptions) -> f64 {
    let lum = frame.luminance(x, y);
    let adjusted = adjust_tone(f64::from(lum), options.contrast, options.brightness);
    if options.is_inverted() {
        255.0 - adjusted
    } else {
        adjusted
    }
}

/// Monochrome path: one glyph per pixel, rows joined by `\n`, trailing
/// newline after the last row. A 0×0 frame gives an empty string.
///
/// # Example
/// ```
/// use tx_ascii::luminance::map_monochrome;
/// use tx_core::charset::CharacterRamp;
/// use tx_core::config::ConversionOptions;
/// use tx_core::frame::PixelBuffer;
///
/// let frame = PixelBuffer::filled(3, 2, [255, 255, 255, 255]);
/// let ramp = CharacterRamp::from_key("standard").unwrap();
/// let text = map_monochrome(&frame, &ConversionOptions::default(), &ramp);
/// assert_eq!(text, "@@@\n@@@\n");
/// ```
#[must_use]
pub fn map_monochrome(
    frame: &PixelBuffer,
    options: &ConversionOptions,
    ramp: &CharacterRamp,
) -> String {
    let (w, h) = (frame.width(), frame.height());
    let mut out = String::with_capacity((w as usize + 1) * h as usize);
    for y in 0..h {
        for x in 0..w {
            out.push(ramp.glyph_for(adjusted_luminance(frame, x, y, options)));
        }
        out.push('\n');
    }
    out
}
