use rand::Rng;
use tx_core::config::{ConversionOptions, DitherOptions};
use tx_core::error::CoreError;
use tx_core::frame::{Conversion, ConversionResult, PixelBuffer};

use crate::color_map::map_colored;
use crate::dither::apply_dither_with_rng;
use crate::luminance::map_monochrome;
use crate::resize::{calculate_dimensions, resize};

/// Output grid size for `src` under `options`.
///
/// An explicit row count wins over the aspect computation.
///
/// # Errors
/// Returns [`CoreError::InvalidDimensions`] if the source is empty or the
/// resulting grid has no column or no row.
pub fn output_dimensions(
    src: &PixelBuffer,
    options: &ConversionOptions,
) -> Result<(u32, u32), CoreError> {
    if src.width() == 0 || src.height() == 0 {
        return Err(CoreError::InvalidDimensions {
            width: src.width(),
            height: src.height(),
        });
    }
    let (columns, rows) = match options.rows {
        Some(rows) => (options.columns, rows),
        None => calculate_dimensions(
            src.width(),
            src.height(),
            options.columns,
            options.maintain_aspect_ratio,
            options.char_aspect_ratio,
        ),
    };
    if columns == 0 || rows == 0 {
        return Err(CoreError::InvalidDimensions {
            width: columns,
            height: rows,
        });
    }
    Ok((columns, rows))
}

/// Run the whole pipeline: resample, dither, tone-map, select glyphs or
/// cells, assemble.
///
/// # Errors
/// Returns a [`CoreError`] for invalid options (zero dimensions, unknown
/// ramp, unsupported palette, out-of-range strength) or an empty source.
///
/// # Example
/// ```
/// use tx_ascii::convert::convert;
/// use tx_core::config::{ConversionOptions, DitherOptions};
/// use tx_core::frame::{ConversionResult, PixelBuffer};
///
/// let src = PixelBuffer::filled(200, 100, [255, 255, 255, 255]);
/// let opts = ConversionOptions { columns: 8, ..ConversionOptions::default() };
/// let out = convert(&src, &opts, &DitherOptions::default()).unwrap();
/// assert_eq!((out.columns, out.rows), (8, 2));
/// assert_eq!(out.result, ConversionResult::Text("@@@@@@@@\n@@@@@@@@\n".into()));
/// ```
pub fn convert(
    src: &PixelBuffer,
    options: &ConversionOptions,
    dither: &DitherOptions,
) -> Result<Conversion, CoreError> {
    convert_with_rng(src, options, dither, &mut rand::rng())
}

/// [`convert`] with an explicit random source for blue-noise dithering.
///
/// # Errors
/// Same as [`convert`].
pub fn convert_with_rng<R: Rng>(
    src: &PixelBuffer,
    options: &ConversionOptions,
    dither: &DitherOptions,
    rng: &mut R,
) -> Result<Conversion, CoreError> {
    options.validate()?;
    dither.validate()?;
    let ramp = options.character_ramp()?;
    let palette = options.palette()?;
    let (columns, rows) = output_dimensions(src, options)?;
    log::debug!(
        "convert {}×{} → {columns}×{rows}, ramp {ramp}, style {:?}, dither {}",
        src.width(),
        src.height(),
        options.style,
        dither.algorithm
    );

    let resized = resize(src, columns, rows);
    let dithered = apply_dither_with_rng(&resized, dither, rng);

    let result = if options.is_colored() {
        ConversionResult::Cells(map_colored(&dithered, options, &ramp, &palette))
    } else {
        ConversionResult::Text(map_monochrome(&dithered, options, &ramp))
    };

    Ok(Conversion {
        result,
        palette,
        columns,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tx_core::config::{ArtStyle, ColorScheme, DitherAlgorithm};

    fn square_opts(n: u32) -> ConversionOptions {
        ConversionOptions {
            columns: n,
            rows: Some(n),
            ..ConversionOptions::default()
        }
    }

    #[test]
    fn mid_gray_scenario() {
        let src = PixelBuffer::filled(10, 10, [128, 128, 128, 255]);
        let out = convert(&src, &square_opts(10), &DitherOptions::default()).unwrap();
        let ConversionResult::Text(text) = out.result else {
            panic!("expected text");
        };
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|r| *r == "=========="));
    }

    #[test]
    fn black_on_white_white_image_is_blank() {
        let src = PixelBuffer::filled(4, 4, [255, 255, 255, 255]);
        let opts = ConversionOptions {
            color_scheme: ColorScheme::BlackOnWhite,
            ..square_opts(4)
        };
        let out = convert(&src, &opts, &DitherOptions::default()).unwrap();
        assert_eq!(out.result.to_plain_text(), "    \n".repeat(4));
    }

    #[test]
    fn aspect_dimensions_flow_through() {
        let src = PixelBuffer::filled(200, 100, [0, 0, 0, 255]);
        let opts = ConversionOptions {
            columns: 80,
            ..ConversionOptions::default()
        };
        let out = convert(&src, &opts, &DitherOptions::default()).unwrap();
        assert_eq!((out.columns, out.rows), (80, 20));
        assert_eq!(out.result.to_plain_text().lines().count(), 20);
    }

    #[test]
    fn colored_shape_only_for_ansi_with_colors() {
        let src = PixelBuffer::filled(6, 6, [255, 0, 0, 255]);
        let mono_ansi = ConversionOptions {
            style: ArtStyle::Ansi,
            ramp: "blocks".into(),
            ..square_opts(3)
        };
        let out = convert(&src, &mono_ansi, &DitherOptions::default()).unwrap();
        assert!(!out.result.is_colored());

        let colored = ConversionOptions {
            use_colors: true,
            palette_size: 16,
            ..mono_ansi
        };
        let out = convert(&src, &colored, &DitherOptions::default()).unwrap();
        let ConversionResult::Cells(grid) = &out.result else {
            panic!("expected cells");
        };
        assert_eq!(grid.len(), 3);
        assert!(grid.iter().flatten().all(|c| c.bg == Some(9)));
        assert_eq!(out.palette.len(), 16);
    }

    #[test]
    fn contract_violations_are_errors() {
        let src = PixelBuffer::filled(4, 4, [0, 0, 0, 255]);
        let none = DitherOptions::default();
        assert!(matches!(
            convert(&src, &square_opts(0), &none),
            Err(CoreError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            convert(&PixelBuffer::new(0, 0), &square_opts(4), &none),
            Err(CoreError::InvalidDimensions { .. })
        ));
        // 1000×1 source at 10 columns computes 0 rows.
        let wide = PixelBuffer::filled(1000, 1, [0, 0, 0, 255]);
        let opts = ConversionOptions {
            columns: 10,
            ..ConversionOptions::default()
        };
        assert!(matches!(
            convert(&wide, &opts, &none),
            Err(CoreError::InvalidDimensions { width: 10, height: 0 })
        ));
        let bad_ramp = ConversionOptions {
            ramp: "runes".into(),
            ..square_opts(4)
        };
        assert_eq!(
            convert(&src, &bad_ramp, &none),
            Err(CoreError::UnknownRamp("runes".into()))
        );
        let too_strong = DitherOptions {
            algorithm: DitherAlgorithm::Atkinson,
            strength: 2.0,
        };
        assert!(matches!(
            convert(&src, &square_opts(4), &too_strong),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn dithered_gradient_uses_ramp_ends() {
        let mut src = PixelBuffer::new(32, 8);
        for y in 0..8 {
            for x in 0..32 {
                let v = (x * 8) as u8;
                let o = src.offset(x, y);
                src.data_mut()[o..o + 4].copy_from_slice(&[v, v, v, 255]);
            }
        }
        let dither = DitherOptions {
            algorithm: DitherAlgorithm::FloydSteinberg,
            strength: 1.0,
        };
        let out = convert(&src, &square_opts(8), &dither).unwrap();
        // Binary channels map to luminance 0 or 255 only.
        let text = out.result.to_plain_text();
        assert!(text.chars().all(|c| c == ' ' || c == '@' || c == '\n'));
    }

    #[test]
    fn seeded_blue_noise_conversion_is_stable() {
        let src = PixelBuffer::filled(40, 20, [100, 140, 180, 255]);
        let dither = DitherOptions {
            algorithm: DitherAlgorithm::BlueNoise,
            strength: 1.0,
        };
        let opts = square_opts(20);
        let a = convert_with_rng(&src, &opts, &dither, &mut StdRng::seed_from_u64(4)).unwrap();
        let b = convert_with_rng(&src, &opts, &dither, &mut StdRng::seed_from_u64(4)).unwrap();
        assert_eq!(a, b);
    }
}
