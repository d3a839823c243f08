use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// 5 glyphs, very high contrast.
pub const RAMP_MINIMAL: &str = " .:#@";

/// 10 glyphs, compact with good contrast.
pub const RAMP_STANDARD: &str = " .:-=+*#%@";

/// 70 glyphs, Paul Bourke's extended ramp.
pub const RAMP_DETAILED: &str =
    " .'`^\",:;Il!i><~+_-?][}{1)(|\\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// 92 glyphs, ordered by measured glyph coverage.
pub const RAMP_DENSE: &str = " `.-':_,^=;><+!rc*/z?sLTv)J7(|Fi{C}fI31tlu[neoZ5Yxjya]2ESwqkP6h9d4VpOGbUAKXHm8RD#$Bg0MNWQ%&@";

/// Unicode shade blocks used as pseudo-pixels.
pub const RAMP_BLOCKS: &str = " ░▒▓█";

/// Shade blocks with a middle dot step.
pub const RAMP_SHADES: &str = " ·░▒▓█";

/// Built-in ramps, keyed by name. Every entry is ordered darkest → lightest.
pub const RAMPS: &[(&str, &str)] = &[
    ("minimal", RAMP_MINIMAL),
    ("standard", RAMP_STANDARD),
    ("detailed", RAMP_DETAILED),
    ("dense", RAMP_DENSE),
    ("blocks", RAMP_BLOCKS),
    ("shades", RAMP_SHADES),
];

/// An ordered glyph sequence, index 0 = darkest, last index = lightest.
///
/// # Example
/// ```
/// use tx_core::charset::CharacterRamp;
/// let ramp = CharacterRamp::from_key("standard").unwrap();
/// assert_eq!(ramp.len(), 10);
/// assert_eq!(ramp.glyph_for(0.0), ' ');
/// assert_eq!(ramp.glyph_for(255.0), '@');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterRamp {
    key: String,
    glyphs: Vec<char>,
}

impl CharacterRamp {
    /// Build a ramp from an arbitrary glyph string.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if the string holds fewer than 2 glyphs.
    ///
    /// # Example
    /// ```
    /// use tx_core::charset::CharacterRamp;
    /// assert!(CharacterRamp::new("custom", "@").is_err());
    /// let ramp = CharacterRamp::new("custom", " #").unwrap();
    /// assert_eq!(ramp.glyph_for(200.0), '#');
    /// ```
    pub fn new(key: &str, glyphs: &str) -> Result<Self, CoreError> {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.len() < 2 {
            return Err(CoreError::Config(format!(
                "ramp '{key}' needs at least 2 glyphs, got {}",
                glyphs.len()
            )));
        }
        Ok(Self {
            key: key.to_owned(),
            glyphs,
        })
    }

    /// Look up a built-in ramp by key.
    ///
    /// # Errors
    /// Returns [`CoreError::UnknownRamp`] if `key` is not in [`RAMPS`].
    pub fn from_key(key: &str) -> Result<Self, CoreError> {
        RAMPS
            .iter()
            .find(|(k, _)| *k == key)
            .ok_or_else(|| CoreError::UnknownRamp(key.to_owned()))
            .and_then(|(k, glyphs)| Self::new(k, glyphs))
    }

    /// All built-in ramps, in table order.
    ///
    /// # Example
    /// ```
    /// use tx_core::charset::CharacterRamp;
    /// assert!(CharacterRamp::all().iter().all(|r| r.len() >= 2));
    /// ```
    #[must_use]
    pub fn all() -> Vec<Self> {
        RAMPS
            .iter()
            .filter_map(|(k, glyphs)| Self::new(k, glyphs).ok())
            .collect()
    }

    /// Name of the ramp.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Glyphs, darkest first.
    #[must_use]
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Number of glyphs (always ≥ 2).
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Ramp index for an adjusted luminance in [0, 255].
    ///
    /// `floor((lum / 255) * (len - 1))`, evaluated in `f64` so that exact
    /// integer steps land on their glyph. Values outside the range clamp.
    ///
    /// # Example
    /// ```
    /// use tx_core::charset::CharacterRamp;
    /// let ramp = CharacterRamp::from_key("standard").unwrap();
    /// assert_eq!(ramp.index_for(128.0), 4);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn index_for(&self, luminance: f64) -> usize {
        let last = self.glyphs.len() - 1;
        let idx = ((luminance.clamp(0.0, 255.0) / 255.0) * last as f64).floor();
        (idx as usize).min(last)
    }

    /// Glyph for an adjusted luminance in [0, 255].
    #[inline(always)]
    #[must_use]
    pub fn glyph_for(&self, luminance: f64) -> char {
        self.glyphs[self.index_for(luminance)]
    }
}

impl FromStr for CharacterRamp {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}

impl fmt::Display for CharacterRamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} glyphs)", self.key, self.glyphs.len())
    }
}
