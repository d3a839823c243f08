use crate::color::luminance;
use crate::error::CoreError;
use crate::palette::{ColorPalette, Rgb};

/// Buffer de pixels RGBA, row-major, 4 bytes par pixel.
///
/// Invariant: `data.len() == width * height * 4`. Every pipeline stage
/// returns a fresh buffer; inputs are never mutated.
///
/// # Example
/// ```
/// use tx_core::frame::PixelBuffer;
/// let fb = PixelBuffer::new(10, 10);
/// assert_eq!(fb.data().len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Transparent black buffer of the given size.
    ///
    /// # Example
    /// ```
    /// use tx_core::frame::PixelBuffer;
    /// let fb = PixelBuffer::new(100, 50);
    /// assert_eq!(fb.width(), 100);
    /// assert_eq!(fb.height(), 50);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Wrap raw RGBA bytes produced by an image source.
    ///
    /// # Errors
    /// Returns [`CoreError::BufferSizeMismatch`] if `data.len()` is not
    /// `width * height * 4`.
    ///
    /// # Example
    /// ```
    /// use tx_core::frame::PixelBuffer;
    /// assert!(PixelBuffer::from_raw(2, 2, vec![0; 16]).is_ok());
    /// assert!(PixelBuffer::from_raw(2, 2, vec![0; 15]).is_err());
    /// ```
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(CoreError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Buffer of a single repeated RGBA color.
    ///
    /// # Example
    /// ```
    /// use tx_core::frame::PixelBuffer;
    /// let fb = PixelBuffer::filled(3, 2, [128, 128, 128, 255]);
    /// assert_eq!(fb.pixel(2, 1), (128, 128, 128, 255));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        Self {
            data: rgba.repeat(count),
            width,
            height,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True for a 0-pixel buffer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw RGBA bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable RGBA bytes; the length cannot change.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer, returning the raw bytes.
    #[must_use]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of pixel (x, y).
    #[inline(always)]
    #[must_use]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Pixel (x, y) as (r, g, b, a).
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = self.offset(x, y);
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// RGB of pixel (x, y), alpha dropped.
    #[inline(always)]
    #[must_use]
    pub fn rgb(&self, x: u32, y: u32) -> Rgb {
        let (r, g, b, _) = self.pixel(x, y);
        (r, g, b)
    }

    /// Luminance BT.601 of pixel (x, y).
    ///
    /// # Example
    /// ```
    /// use tx_core::frame::PixelBuffer;
    /// let fb = PixelBuffer::filled(1, 1, [255, 255, 255, 255]);
    /// assert_eq!(fb.luminance(0, 0), 255);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn luminance(&self, x: u32, y: u32) -> u8 {
        let (r, g, b, _) = self.pixel(x, y);
        luminance(r, g, b)
    }
}

/// Single cell of the colored output grid.
///
/// # Example
/// ```
/// use tx_core::frame::Cell;
/// let cell = Cell::default();
/// assert_eq!(cell.ch, ' ');
/// assert!(cell.fg.is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Glyph to draw.
    pub ch: char,
    /// Foreground palette index.
    pub fg: Option<u8>,
    /// Background palette index.
    pub bg: Option<u8>,
    /// Tone-adjusted source color, kept for renderers that want truecolor.
    pub rgb: Option<Rgb>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg: None,
            rgb: None,
        }
    }
}

/// Output of one conversion: plain text or a rectangular cell grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConversionResult {
    /// Monochrome rows joined by `\n`, with a trailing newline.
    Text(String),
    /// Colored rows, all of the same length.
    Cells(Vec<Vec<Cell>>),
}

impl ConversionResult {
    /// Flatten to characters only; colors are discarded.
    ///
    /// # Example
    /// ```
    /// use tx_core::frame::{Cell, ConversionResult};
    /// let cell = Cell { ch: '#', ..Cell::default() };
    /// let grid = ConversionResult::Cells(vec![vec![cell, cell], vec![cell, cell]]);
    /// assert_eq!(grid.to_plain_text(), "##\n##\n");
    /// ```
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Cells(rows) => {
                let mut out = String::with_capacity(rows.iter().map(|r| r.len() + 1).sum());
                for row in rows {
                    out.extend(row.iter().map(|c| c.ch));
                    out.push('\n');
                }
                out
            }
        }
    }

    /// True for the colored shape.
    #[must_use]
    pub fn is_colored(&self) -> bool {
        matches!(self, Self::Cells(_))
    }
}

/// Everything a renderer needs: the result, the palette its indices refer
/// to, and the effective grid size.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversion {
    /// Text or cell grid.
    pub result: ConversionResult,
    /// Palette used for color indices.
    pub palette: ColorPalette,
    /// Columns of the output grid.
    pub columns: u32,
    /// Rows of the output grid.
    pub rows: u32,
}
