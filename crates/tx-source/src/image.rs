use std::path::Path;

use anyhow::{Context, Result};
use image::DynamicImage;
use tx_core::frame::PixelBuffer;

/// Convert a decoded image into an RGBA8 pixel buffer.
///
/// # Errors
/// Returns an error if the decoded data does not match its dimensions.
///
/// # Example
/// ```
/// use image::{DynamicImage, RgbImage};
/// use tx_source::image::from_dynamic;
/// let img = DynamicImage::ImageRgb8(RgbImage::new(3, 2));
/// let fb = from_dynamic(&img).unwrap();
/// assert_eq!((fb.width(), fb.height()), (3, 2));
/// assert_eq!(fb.pixel(0, 0), (0, 0, 0, 255));
/// ```
pub fn from_dynamic(img: &DynamicImage) -> Result<PixelBuffer> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::from_raw(width, height, rgba.into_raw()).context("Buffer RGBA incohérent")
}

/// Load an image from disk (PNG, JPEG, BMP, GIF).
///
/// # Errors
/// Returns an error if the file cannot be opened or decoded.
///
/// # Example
/// ```no_run
/// use tx_source::image::load_image;
/// use std::path::Path;
/// let frame = load_image(Path::new("photo.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    let frame = from_dynamic(&img)?;
    log::info!(
        "{} chargée : {}×{}",
        path.display(),
        frame.width(),
        frame.height()
    );
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn png_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.png");
        let mut img = RgbaImage::new(5, 3);
        img.put_pixel(4, 2, Rgba([255, 0, 0, 128]));
        img.save(&path).unwrap();

        let frame = load_image(&path).unwrap();
        assert_eq!((frame.width(), frame.height()), (5, 3));
        assert_eq!(frame.pixel(4, 2), (255, 0, 0, 128));
        assert_eq!(frame.pixel(0, 0), (0, 0, 0, 0));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image(&dir.path().join("absent.png")).unwrap_err();
        assert!(err.to_string().contains("absent.png"));
    }
}
