use tx_core::charset::CharacterRamp;
use tx_core::color::{is_dark, luminance, scale_rgb};
use tx_core::config::ConversionOptions;
use tx_core::frame::{Cell, PixelBuffer};
use tx_core::palette::{ColorPalette, Rgb};

use crate::luminance::adjust_tone;

/// Glyph drawn over a dark pixel's background color.
pub const DENSE_BLOCK: char = '█';

/// Foreground used for dark cells (palette index 0, black).
pub const DARK_FOREGROUND: u8 = 0;

/// Nearest palette entry by Euclidean RGB distance, lowest index on ties.
///
/// # Example
/// ```
/// use tx_ascii::color_map::nearest_color;
/// use tx_core::palette::ColorPalette;
/// assert_eq!(nearest_color((250, 5, 5), &ColorPalette::ansi16()), 9);
/// ```
#[inline(always)]
#[must_use]
pub fn nearest_color(rgb: Rgb, palette: &ColorPalette) -> u8 {
    palette.nearest(rgb).0
}

/// Colored cell for one source pixel.
///
/// Tone is shifted by rescaling RGB with `adjusted / original` luminance,
/// ratio 1 when the original luminance is 0. Dark results (mean < 128)
/// paint the palette color as background under a black block glyph, or a
/// space where the ramp has one; bright results draw the ramp glyph in the
/// palette color with no background.
///
/// # Example
/// ```
/// use tx_ascii::color_map::colored_cell;
/// use tx_core::charset::CharacterRamp;
/// use tx_core::config::ConversionOptions;
/// use tx_core::palette::ColorPalette;
///
/// let ramp = CharacterRamp::from_key("standard").unwrap();
/// let opts = ConversionOptions::default();
/// let cell = colored_cell((255, 255, 255), &opts, &ramp, &ColorPalette::ansi16());
/// assert_eq!(cell.ch, '@');
/// assert_eq!(cell.fg, Some(15));
/// assert_eq!(cell.bg, None);
/// ```
#[must_use]
pub fn colored_cell(
    rgb: Rgb,
    options: &ConversionOptions,
    ramp: &CharacterRamp,
    palette: &ColorPalette,
) -> Cell {
    let original = luminance(rgb.0, rgb.1, rgb.2);
    let lum = if options.is_inverted() {
        255 - original
    } else {
        original
    };
    let adjusted = adjust_tone(f64::from(lum), options.contrast, options.brightness);
    let ratio = if original == 0 {
        1.0
    } else {
        adjusted / f64::from(original)
    };
    let shifted = scale_rgb(rgb, ratio);
    let color = nearest_color(shifted, palette);
    let glyph = ramp.glyph_for(adjusted);

    if is_dark(shifted) {
        Cell {
            ch: if glyph == ' ' { ' ' } else { DENSE_BLOCK },
            fg: Some(DARK_FOREGROUND),
            bg: Some(color),
            rgb: Some(shifted),
        }
    } else {
        Cell {
            ch: glyph,
            fg: Some(color),
            bg: None,
            rgb: Some(shifted),
        }
    }
}

/// Colored path: a `height × width` grid of cells. A 0×0 frame gives an
/// empty grid.
#[must_use]
pub fn map_colored(
    frame: &PixelBuffer,
    options: &ConversionOptions,
    ramp: &CharacterRamp,
    palette: &ColorPalette,
) -> Vec<Vec<Cell>> {
    (0..frame.height())
        .map(|y| {
            (0..frame.width())
                .map(|x| colored_cell(frame.rgb(x, y), options, ramp, palette))
                .collect()
        })
        .collect()
}
