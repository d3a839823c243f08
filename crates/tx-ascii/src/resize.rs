use tx_core::frame::PixelBuffer;

/// Output grid size for a source image.
///
/// Without aspect preservation the row count is `floor(columns * 0.5)`.
/// With it, rows are `floor((columns / (src_w / src_h)) * char_aspect)`,
/// compensating for glyph cells that are taller than wide.
///
/// # Example
/// ```
/// use tx_ascii::resize::calculate_dimensions;
/// assert_eq!(calculate_dimensions(200, 100, 80, true, 0.5), (80, 20));
/// assert_eq!(calculate_dimensions(200, 100, 80, false, 0.5), (80, 40));
/// ```
#[must_use]
pub fn calculate_dimensions(
    src_width: u32,
    src_height: u32,
    columns: u32,
    maintain_aspect_ratio: bool,
    char_aspect_ratio: f64,
) -> (u32, u32) {
    if !maintain_aspect_ratio {
        return (columns, (f64::from(columns) * 0.5).floor() as u32);
    }
    if src_width == 0 || src_height == 0 {
        return (columns, 0);
    }
    let aspect = f64::from(src_width) / f64::from(src_height);
    let rows = ((f64::from(columns) / aspect) * char_aspect_ratio).floor();
    (columns, rows.max(0.0) as u32)
}

/// Nearest-neighbor resample into a fresh `width × height` buffer.
///
/// Destination (x, y) reads source `(floor(x * src_w / width),
/// floor(y * src_h / height))`, computed in exact integer arithmetic.
/// A zero target axis yields an empty buffer; an empty source yields
/// transparent black.
///
/// # Example
/// ```
/// use tx_ascii::resize::resize;
/// use tx_core::frame::PixelBuffer;
/// let src = PixelBuffer::filled(100, 100, [9, 9, 9, 255]);
/// let dst = resize(&src, 50, 25);
/// assert_eq!((dst.width(), dst.height()), (50, 25));
/// assert_eq!(dst.pixel(49, 24), (9, 9, 9, 255));
/// ```
#[must_use]
pub fn resize(src: &PixelBuffer, width: u32, height: u32) -> PixelBuffer {
    let mut dst = PixelBuffer::new(width, height);
    if src.is_empty() || dst.is_empty() {
        return dst;
    }
    if src.width() == width && src.height() == height {
        dst.data_mut().copy_from_slice(src.data());
        return dst;
    }

    let (sw, sh) = (u64::from(src.width()), u64::from(src.height()));
    let (tw, th) = (u64::from(width), u64::from(height));
    let src_data = src.data();
    let out = dst.data_mut();
    let mut o = 0usize;
    for y in 0..th {
        let sy = (y * sh / th) as u32;
        for x in 0..tw {
            let sx = (x * sw / tw) as u32;
            let i = src.offset(sx, sy);
            out[o..o + 4].copy_from_slice(&src_data[i..i + 4]);
            o += 4;
        }
    }
    dst
}
