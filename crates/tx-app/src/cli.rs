use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tx_core::config::{ArtStyle, ColorScheme, DitherAlgorithm, TextifyConfig};

/// Convert an image to ASCII or ANSI block art.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF).
    pub image: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(short, long, default_value = "textify.toml")]
    pub config: PathBuf,

    /// Target column count.
    #[arg(long)]
    pub columns: Option<u32>,

    /// Explicit row count (skips aspect-ratio computation).
    #[arg(long)]
    pub rows: Option<u32>,

    /// Character ramp key (see --list-ramps).
    #[arg(long)]
    pub ramp: Option<String>,

    /// Art style: ascii or ansi.
    #[arg(long)]
    pub style: Option<String>,

    /// Emit colored cells (ansi style only).
    #[arg(long, default_value_t = false)]
    pub colors: bool,

    /// Palette size: 16 or 256.
    #[arg(long)]
    pub palette: Option<u16>,

    /// Black-on-white scheme (inverts luminance).
    #[arg(long, default_value_t = false)]
    pub invert: bool,

    /// Contrast factor, 1.0 = neutral.
    #[arg(long)]
    pub contrast: Option<f64>,

    /// Brightness offset, -100..100.
    #[arg(long, allow_hyphen_values = true)]
    pub brightness: Option<f64>,

    /// Ignore the source aspect ratio (rows = columns / 2).
    #[arg(long, default_value_t = false)]
    pub no_aspect: bool,

    /// Dithering algorithm (see --list-dithers). Defaults to a recommendation.
    #[arg(long)]
    pub dither: Option<String>,

    /// Dithering strength in [0, 1].
    #[arg(long)]
    pub strength: Option<f64>,

    /// Also write the plain-text result to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the known ramp keys and exit.
    #[arg(long, default_value_t = false)]
    pub list_ramps: bool,

    /// Print the known dithering algorithms and exit.
    #[arg(long, default_value_t = false)]
    pub list_dithers: bool,

    /// Log level: error, warn, info, debug or trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// The image path, required unless a listing flag is set.
    ///
    /// # Errors
    /// Returns an error if no image was given.
    pub fn validate_source(&self) -> anyhow::Result<&Path> {
        self.image
            .as_deref()
            .context("Aucune image spécifiée. Usage : textify <IMAGE> [OPTIONS]")
    }

    /// Apply command-line overrides on top of the loaded configuration.
    ///
    /// # Errors
    /// Returns an error for an unknown style or dithering algorithm.
    pub fn apply_overrides(&self, config: &mut TextifyConfig) -> anyhow::Result<()> {
        let c = &mut config.conversion;
        if let Some(v) = self.columns {
            c.columns = v;
        }
        if self.rows.is_some() {
            c.rows = self.rows;
        }
        if let Some(ref v) = self.ramp {
            c.ramp.clone_from(v);
        }
        if let Some(ref v) = self.style {
            c.style = v.parse::<ArtStyle>()?;
        }
        if self.colors {
            c.use_colors = true;
        }
        if let Some(v) = self.palette {
            c.palette_size = v;
        }
        if self.invert {
            c.color_scheme = ColorScheme::BlackOnWhite;
        }
        if let Some(v) = self.contrast {
            c.contrast = v;
        }
        if let Some(v) = self.brightness {
            c.brightness = v;
        }
        if self.no_aspect {
            c.maintain_aspect_ratio = false;
        }
        if let Some(ref v) = self.dither {
            config.dither.algorithm = v.parse::<DitherAlgorithm>()?;
        }
        if let Some(v) = self.strength {
            config.dither.strength = v;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_config_values() {
        let cli = Cli::parse_from([
            "textify",
            "photo.png",
            "--columns",
            "64",
            "--style",
            "ansi",
            "--colors",
            "--palette",
            "16",
            "--brightness",
            "-20",
            "--dither",
            "sierra-lite",
            "--invert",
        ]);
        let mut config = TextifyConfig::default();
        cli.apply_overrides(&mut config).unwrap();
        assert_eq!(config.conversion.columns, 64);
        assert!(config.conversion.is_colored());
        assert!(config.conversion.is_inverted());
        assert_eq!(config.conversion.palette_size, 16);
        assert!((config.conversion.brightness + 20.0).abs() < f64::EPSILON);
        assert_eq!(config.dither.algorithm, DitherAlgorithm::SierraLite);
        assert_eq!(cli.validate_source().unwrap(), Path::new("photo.png"));
    }

    #[test]
    fn unknown_names_are_rejected() {
        let cli = Cli::parse_from(["textify", "a.png", "--dither", "wobble"]);
        assert!(cli.apply_overrides(&mut TextifyConfig::default()).is_err());
        let cli = Cli::parse_from(["textify", "a.png", "--style", "html"]);
        assert!(cli.apply_overrides(&mut TextifyConfig::default()).is_err());
    }

    #[test]
    fn image_is_required_for_conversion() {
        let cli = Cli::parse_from(["textify", "--list-ramps"]);
        assert!(cli.list_ramps);
        assert!(cli.validate_source().is_err());
    }
}
