use crate::error::CoreError;

/// RGB triple, 8 bits per channel.
pub type Rgb = (u8, u8, u8);

/// The 16 standard ANSI colors (xterm defaults).
#[rustfmt::skip]
pub const ANSI_16: [Rgb; 16] = [
    (0, 0, 0),       (128, 0, 0),     (0, 128, 0),     (128, 128, 0),
    (0, 0, 128),     (128, 0, 128),   (0, 128, 128),   (192, 192, 192),
    (128, 128, 128), (255, 0, 0),     (0, 255, 0),     (255, 255, 0),
    (0, 0, 255),     (255, 0, 255),   (0, 255, 255),   (255, 255, 255),
];

/// Channel levels of the 6×6×6 xterm color cube.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// The 256-color xterm palette: 16 fixed, 216 cube, 24 grays.
pub const ANSI_256: [Rgb; 256] = build_ansi_256();

const fn build_ansi_256() -> [Rgb; 256] {
    let mut table = [(0u8, 0u8, 0u8); 256];
    let mut i = 0;
    while i < 16 {
        table[i] = ANSI_16[i];
        i += 1;
    }
    let mut n = 0;
    while n < 216 {
        table[16 + n] = (
            CUBE_LEVELS[n / 36],
            CUBE_LEVELS[(n / 6) % 6],
            CUBE_LEVELS[n % 6],
        );
        n += 1;
    }
    let mut g = 0;
    while g < 24 {
        let v = (8 + g * 10) as u8;
        table[232 + g] = (v, v, v);
        g += 1;
    }
    table
}

/// Read-only palette; the index of an entry is its ANSI color code.
///
/// # Example
/// ```
/// use tx_core::palette::ColorPalette;
/// let p = ColorPalette::ansi16();
/// assert_eq!(p.len(), 16);
/// assert_eq!(p.nearest((255, 0, 0)), (9, 0.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorPalette {
    colors: &'static [Rgb],
}

impl ColorPalette {
    /// The 16-entry ANSI palette.
    #[must_use]
    pub const fn ansi16() -> Self {
        Self { colors: &ANSI_16 }
    }

    /// The 256-entry xterm palette.
    #[must_use]
    pub const fn ansi256() -> Self {
        Self { colors: &ANSI_256 }
    }

    /// Palette for a configured size.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidPaletteSize`] unless `size` is 16 or 256.
    pub fn for_size(size: u16) -> Result<Self, CoreError> {
        match size {
            16 => Ok(Self::ansi16()),
            256 => Ok(Self::ansi256()),
            other => Err(CoreError::InvalidPaletteSize(other)),
        }
    }

    /// Entries, indexed by color code.
    #[must_use]
    pub fn colors(&self) -> &'static [Rgb] {
        self.colors
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True if the palette has no entry (never for built-in palettes).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// RGB of a color code.
    #[must_use]
    pub fn get(&self, index: u8) -> Option<Rgb> {
        self.colors.get(usize::from(index)).copied()
    }

    /// Nearest entry by Euclidean RGB distance, as `(index, distance)`.
    ///
    /// Linear scan in index order; on a tie the lowest index wins.
    #[must_use]
    pub fn nearest(&self, (r, g, b): Rgb) -> (u8, f64) {
        let mut best = 0usize;
        let mut best_dist = u32::MAX;
        for (i, &(pr, pg, pb)) in self.colors.iter().enumerate() {
            let dr = i32::from(r) - i32::from(pr);
            let dg = i32::from(g) - i32::from(pg);
            let db = i32::from(b) - i32::from(pb);
            let dist = (dr * dr + dg * dg + db * db) as u32;
            if dist < best_dist {
                best = i;
                best_dist = dist;
                if dist == 0 {
                    break;
                }
            }
        }
        (best as u8, f64::from(best_dist).sqrt())
    }
}
