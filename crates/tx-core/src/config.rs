use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::CharacterRamp;
use crate::error::CoreError;
use crate::palette::ColorPalette;

/// Output style.
///
/// # Example
/// ```
/// use tx_core::config::ArtStyle;
/// assert_eq!(ArtStyle::default(), ArtStyle::Ascii);
/// assert_eq!("ansi".parse::<ArtStyle>().unwrap(), ArtStyle::Ansi);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtStyle {
    /// Plain character art.
    #[default]
    Ascii,
    /// Block-character art, colored when `use_colors` is set.
    Ansi,
}

impl FromStr for ArtStyle {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascii" => Ok(Self::Ascii),
            "ansi" => Ok(Self::Ansi),
            other => Err(CoreError::Config(format!("unknown art style '{other}'"))),
        }
    }
}

/// Color scheme of the rendering surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScheme {
    /// Light glyphs on a dark background; luminance used as is.
    #[default]
    WhiteOnBlack,
    /// Dark ink on a light background; luminance inverted before indexing.
    BlackOnWhite,
}

/// Dithering algorithm selector.
///
/// # Example
/// ```
/// use tx_core::config::DitherAlgorithm;
/// let algo: DitherAlgorithm = "floyd-steinberg-serpentine".parse().unwrap();
/// assert_eq!(algo, DitherAlgorithm::FloydSteinbergSerpentine);
/// assert_eq!(algo.to_string(), "floyd-steinberg-serpentine");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DitherAlgorithm {
    /// Identity.
    #[default]
    None,
    /// Floyd–Steinberg, raster scan.
    FloydSteinberg,
    /// Floyd–Steinberg, alternating scan direction per row.
    FloydSteinbergSerpentine,
    /// Jarvis–Judice–Ninke, 12 taps.
    JarvisJudiceNinke,
    /// Stucki, 12 taps.
    Stucki,
    /// Burkes, 7 taps.
    Burkes,
    /// Sierra, 10 taps.
    Sierra,
    /// Sierra Lite, 3 taps.
    SierraLite,
    /// Atkinson, diffuses 6/8 of the error.
    Atkinson,
    /// Bayer 2×2 threshold matrix.
    #[serde(rename = "ordered-2x2")]
    Ordered2x2,
    /// Bayer 4×4 threshold matrix.
    #[serde(rename = "ordered-4x4")]
    Ordered4x4,
    /// Bayer 8×8 threshold matrix.
    #[serde(rename = "ordered-8x8")]
    Ordered8x8,
    /// Per-image void-and-cluster threshold map (randomized).
    BlueNoise,
    /// Contrast-driven mix of thresholding, diffusion and ordered dither.
    AdaptiveHybrid,
}

impl DitherAlgorithm {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::None,
        Self::FloydSteinberg,
        Self::FloydSteinbergSerpentine,
        Self::JarvisJudiceNinke,
        Self::Stucki,
        Self::Burkes,
        Self::Sierra,
        Self::SierraLite,
        Self::Atkinson,
        Self::Ordered2x2,
        Self::Ordered4x4,
        Self::Ordered8x8,
        Self::BlueNoise,
        Self::AdaptiveHybrid,
    ];

    /// Stable kebab-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::FloydSteinberg => "floyd-steinberg",
            Self::FloydSteinbergSerpentine => "floyd-steinberg-serpentine",
            Self::JarvisJudiceNinke => "jarvis-judice-ninke",
            Self::Stucki => "stucki",
            Self::Burkes => "burkes",
            Self::Sierra => "sierra",
            Self::SierraLite => "sierra-lite",
            Self::Atkinson => "atkinson",
            Self::Ordered2x2 => "ordered-2x2",
            Self::Ordered4x4 => "ordered-4x4",
            Self::Ordered8x8 => "ordered-8x8",
            Self::BlueNoise => "blue-noise",
            Self::AdaptiveHybrid => "adaptive-hybrid",
        }
    }
}

impl fmt::Display for DitherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DitherAlgorithm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| CoreError::UnknownAlgorithm(s.to_owned()))
    }
}

/// Dithering stage settings. `None` or strength 0 is the identity.
///
/// # Example
/// ```
/// use tx_core::config::{DitherAlgorithm, DitherOptions};
/// let opts = DitherOptions { algorithm: DitherAlgorithm::Atkinson, strength: 0.0 };
/// assert!(opts.is_identity());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct DitherOptions {
    /// Selected algorithm.
    pub algorithm: DitherAlgorithm,
    /// Error / threshold scale in [0.0, 1.0].
    pub strength: f64,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            algorithm: DitherAlgorithm::None,
            strength: 1.0,
        }
    }
}

impl DitherOptions {
    /// True when the stage leaves pixels untouched.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.algorithm == DitherAlgorithm::None || self.strength == 0.0
    }

    /// Check the strength range.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if strength is outside [0, 1] or NaN.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(0.0..=1.0).contains(&self.strength) {
            return Err(CoreError::Config(format!(
                "dither strength {} outside [0, 1]",
                self.strength
            )));
        }
        Ok(())
    }
}

/// Conversion settings, constructed by the caller before each conversion.
///
/// # Example
/// ```
/// use tx_core::config::ConversionOptions;
/// let opts = ConversionOptions::default();
/// assert_eq!(opts.columns, 100);
/// assert!(!opts.is_colored());
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ConversionOptions {
    /// Target column count.
    pub columns: u32,
    /// Explicit row count; computed from the source when `None`.
    pub rows: Option<u32>,
    /// Character ramp key (see [`crate::charset::RAMPS`]).
    pub ramp: String,
    /// Output style.
    pub style: ArtStyle,
    /// Derive rows from the source aspect ratio.
    pub maintain_aspect_ratio: bool,
    /// Glyph cell width:height ratio used to correct the row count.
    pub char_aspect_ratio: f64,
    /// Contrast factor, 1.0 = neutral.
    pub contrast: f64,
    /// Brightness offset, roughly [-100, 100].
    pub brightness: f64,
    /// Inverted or not.
    pub color_scheme: ColorScheme,
    /// Emit a colored cell grid when the style is `ansi`.
    pub use_colors: bool,
    /// 16 or 256.
    pub palette_size: u16,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            columns: 100,
            rows: None,
            ramp: "standard".to_owned(),
            style: ArtStyle::Ascii,
            maintain_aspect_ratio: true,
            char_aspect_ratio: 0.5,
            contrast: 1.0,
            brightness: 0.0,
            color_scheme: ColorScheme::WhiteOnBlack,
            use_colors: false,
            palette_size: 256,
        }
    }
}

impl ConversionOptions {
    /// Colored path: ANSI style with colors enabled.
    #[must_use]
    pub fn is_colored(&self) -> bool {
        self.style == ArtStyle::Ansi && self.use_colors
    }

    /// Black-on-white scheme.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.color_scheme == ColorScheme::BlackOnWhite
    }

    /// Resolve the ramp key.
    ///
    /// # Errors
    /// Returns [`CoreError::UnknownRamp`] for a key outside the table.
    pub fn character_ramp(&self) -> Result<CharacterRamp, CoreError> {
        CharacterRamp::from_key(&self.ramp)
    }

    /// Resolve the palette size.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidPaletteSize`] unless the size is 16 or 256.
    pub fn palette(&self) -> Result<ColorPalette, CoreError> {
        ColorPalette::for_size(self.palette_size)
    }

    /// Reject caller-contract violations before any pixel work.
    ///
    /// # Errors
    /// Returns the matching [`CoreError`] for zero dimensions, an unknown
    /// ramp, an unsupported palette, or a non-positive contrast / aspect.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.columns == 0 || self.rows == Some(0) {
            return Err(CoreError::InvalidDimensions {
                width: self.columns,
                height: self.rows.unwrap_or(0),
            });
        }
        if !(self.contrast.is_finite() && self.contrast > 0.0) {
            return Err(CoreError::Config(format!(
                "contrast must be > 0, got {}",
                self.contrast
            )));
        }
        if !self.brightness.is_finite() {
            return Err(CoreError::Config("brightness must be finite".into()));
        }
        if !(self.char_aspect_ratio.is_finite() && self.char_aspect_ratio > 0.0) {
            return Err(CoreError::Config(format!(
                "char aspect ratio must be > 0, got {}",
                self.char_aspect_ratio
            )));
        }
        self.character_ramp()?;
        self.palette()?;
        Ok(())
    }
}

/// Conversion and dither settings loaded together from one TOML file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextifyConfig {
    /// `[conversion]` section.
    pub conversion: ConversionOptions,
    /// `[dither]` section.
    pub dither: DitherOptions,
}

impl TextifyConfig {
    /// Clamp numeric fields to their supported ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        let c = &mut self.conversion;
        c.contrast = clamp_logged("contrast", c.contrast, 0.1, 5.0);
        c.brightness = clamp_logged("brightness", c.brightness, -100.0, 100.0);
        c.char_aspect_ratio = clamp_logged("char_aspect_ratio", c.char_aspect_ratio, 0.1, 4.0);
        let d = &mut self.dither;
        d.strength = clamp_logged("strength", d.strength, 0.0, 1.0);
    }
}

fn clamp_logged(name: &str, value: f64, min: f64, max: f64) -> f64 {
    let clamped = if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    };
    if (clamped - value).abs() > f64::EPSILON || value.is_nan() {
        log::warn!("{name} = {value} hors limites, ramené à {clamped}");
    }
    clamped
}

/// On-disk TOML shape; every field optional so partial files merge over defaults.
#[derive(Deserialize)]
struct ConfigFile {
    conversion: Option<ConversionSection>,
    dither: Option<DitherSection>,
}

/// Conversion section, all fields optional for partial override.
#[derive(Deserialize)]
struct ConversionSection {
    columns: Option<u32>,
    rows: Option<u32>,
    ramp: Option<String>,
    style: Option<ArtStyle>,
    maintain_aspect_ratio: Option<bool>,
    char_aspect_ratio: Option<f64>,
    contrast: Option<f64>,
    brightness: Option<f64>,
    color_scheme: Option<ColorScheme>,
    use_colors: Option<bool>,
    palette_size: Option<u16>,
}

/// Dither section; the algorithm stays a string so unknown names surface
/// as [`CoreError::UnknownAlgorithm`].
#[derive(Deserialize)]
struct DitherSection {
    algorithm: Option<String>,
    strength: Option<f64>,
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML, names an unknown
/// algorithm or ramp, or uses an unsupported palette size.
///
/// # Example
/// ```
/// use tx_core::config::{parse_config, DitherAlgorithm};
/// let cfg = parse_config("[dither]\nalgorithm = \"stucki\"\n").unwrap();
/// assert_eq!(cfg.dither.algorithm, DitherAlgorithm::Stucki);
/// assert_eq!(cfg.conversion.columns, 100);
/// ```
pub fn parse_config(content: &str) -> Result<TextifyConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
    let mut config = TextifyConfig::default();

    if let Some(s) = file.conversion {
        let c = &mut config.conversion;
        if let Some(v) = s.columns {
            c.columns = v;
        }
        if s.rows.is_some() {
            c.rows = s.rows;
        }
        if let Some(v) = s.ramp {
            c.ramp = v;
        }
        if let Some(v) = s.style {
            c.style = v;
        }
        if let Some(v) = s.maintain_aspect_ratio {
            c.maintain_aspect_ratio = v;
        }
        if let Some(v) = s.char_aspect_ratio {
            c.char_aspect_ratio = v;
        }
        if let Some(v) = s.contrast {
            c.contrast = v;
        }
        if let Some(v) = s.brightness {
            c.brightness = v;
        }
        if let Some(v) = s.color_scheme {
            c.color_scheme = v;
        }
        if let Some(v) = s.use_colors {
            c.use_colors = v;
        }
        if let Some(v) = s.palette_size {
            c.palette_size = v;
        }
    }

    if let Some(d) = file.dither {
        if let Some(v) = d.algorithm {
            config.dither.algorithm = v.parse()?;
        }
        if let Some(v) = d.strength {
            config.dither.strength = v;
        }
    }

    config.clamp_all();
    config.conversion.character_ramp()?;
    config.conversion.palette()?;
    Ok(config)
}

/// Load a TOML file and merge it over the defaults.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use tx_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<TextifyConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content)
        .with_context(|| format!("Configuration invalide dans {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_names_round_trip() {
        for algo in DitherAlgorithm::ALL {
            assert_eq!(algo.name().parse::<DitherAlgorithm>(), Ok(algo));
        }
        assert_eq!(
            "floyd".parse::<DitherAlgorithm>(),
            Err(CoreError::UnknownAlgorithm("floyd".into()))
        );
    }

    #[test]
    fn colored_requires_ansi_and_colors() {
        let mut opts = ConversionOptions {
            use_colors: true,
            ..ConversionOptions::default()
        };
        assert!(!opts.is_colored());
        opts.style = ArtStyle::Ansi;
        assert!(opts.is_colored());
        opts.use_colors = false;
        assert!(!opts.is_colored());
    }

    #[test]
    fn validate_rejects_contract_violations() {
        let ok = ConversionOptions::default();
        assert!(ok.validate().is_ok());

        let zero_cols = ConversionOptions {
            columns: 0,
            ..ok.clone()
        };
        assert!(matches!(
            zero_cols.validate(),
            Err(CoreError::InvalidDimensions { width: 0, .. })
        ));

        let zero_rows = ConversionOptions {
            rows: Some(0),
            ..ok.clone()
        };
        assert!(matches!(
            zero_rows.validate(),
            Err(CoreError::InvalidDimensions { height: 0, .. })
        ));

        let bad_ramp = ConversionOptions {
            ramp: "klingon".into(),
            ..ok.clone()
        };
        assert_eq!(
            bad_ramp.validate(),
            Err(CoreError::UnknownRamp("klingon".into()))
        );

        let bad_contrast = ConversionOptions {
            contrast: 0.0,
            ..ok.clone()
        };
        assert!(matches!(bad_contrast.validate(), Err(CoreError::Config(_))));

        let bad_palette = ConversionOptions {
            palette_size: 8,
            ..ok
        };
        assert_eq!(
            bad_palette.validate(),
            Err(CoreError::InvalidPaletteSize(8))
        );
    }

    #[test]
    fn dither_strength_range() {
        let mut d = DitherOptions::default();
        assert!(d.validate().is_ok());
        d.strength = 1.5;
        assert!(d.validate().is_err());
        d.strength = f64::NAN;
        assert!(d.validate().is_err());
    }

    #[test]
    fn partial_config_overrides_defaults() {
        let cfg = parse_config(
            r#"
            [conversion]
            columns = 80
            ramp = "blocks"
            style = "ansi"
            use_colors = true
            palette_size = 16
            color_scheme = "black-on-white"

            [dither]
            algorithm = "ordered-4x4"
            strength = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.conversion.columns, 80);
        assert_eq!(cfg.conversion.ramp, "blocks");
        assert!(cfg.conversion.is_colored());
        assert!(cfg.conversion.is_inverted());
        assert_eq!(cfg.conversion.palette_size, 16);
        assert!((cfg.conversion.contrast - 1.0).abs() < f64::EPSILON);
        assert_eq!(cfg.dither.algorithm, DitherAlgorithm::Ordered4x4);
        assert!((cfg.dither.strength - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn config_clamps_out_of_range() {
        let input = r#"
            [conversion]
            contrast = 40.0
            brightness = -500.0

            [dither]
            strength = 3.0
        "#;
        let cfg = parse_config(input).unwrap();
        assert!((cfg.conversion.contrast - 5.0).abs() < f64::EPSILON);
        assert!((cfg.conversion.brightness + 100.0).abs() < f64::EPSILON);
        assert!((cfg.dither.strength - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn config_rejects_unknown_names() {
        let err = parse_config("[dither]\nalgorithm = \"voronoi\"\n").unwrap_err();
        assert!(
            err.downcast_ref::<CoreError>()
                .is_some_and(|e| *e == CoreError::UnknownAlgorithm("voronoi".into()))
        );
        assert!(parse_config("[conversion]\nramp = \"nope\"\n").is_err());
        assert!(parse_config("[conversion]\npalette_size = 12\n").is_err());
    }

    #[test]
    fn load_config_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("textify.toml");
        std::fs::write(&path, "[conversion]\ncolumns = 42\n").unwrap();
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.conversion.columns, 42);
        assert!(load_config(&dir.path().join("missing.toml")).is_err());
    }
}
