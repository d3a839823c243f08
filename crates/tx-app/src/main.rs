use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tx_core::charset::CharacterRamp;
use tx_core::config::{DitherAlgorithm, TextifyConfig};

pub mod cli;
pub mod render;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    if cli.list_ramps {
        for ramp in CharacterRamp::all() {
            println!("{:<10} {}", ramp.key(), ramp.glyphs().iter().collect::<String>());
        }
        return Ok(());
    }
    if cli.list_dithers {
        for algo in DitherAlgorithm::ALL {
            println!("{algo}");
        }
        return Ok(());
    }

    // 3. Valider la source
    let path = cli.validate_source()?;

    // 4. Charger la config, puis les overrides CLI
    let (mut config, from_file) = resolve_config(&cli)?;
    cli.apply_overrides(&mut config)?;
    if cli.dither.is_none() && !from_file {
        let ramp = config.conversion.character_ramp()?;
        config.dither.algorithm = tx_ascii::recommend_algorithm(
            config.conversion.style,
            ramp.len(),
            config.conversion.use_colors,
        );
        log::info!("Dithering recommandé : {}", config.dither.algorithm);
    }

    // 5. Charger l'image et convertir
    let frame = tx_source::load_image(path)?;
    let conversion = tx_ascii::convert(&frame, &config.conversion, &config.dither)
        .with_context(|| format!("Conversion impossible pour {}", path.display()))?;
    log::info!("Sortie : {}×{}", conversion.columns, conversion.rows);

    // 6. Afficher, puis exporter le texte brut
    render::write_conversion(&mut io::stdout().lock(), &conversion)?;
    if let Some(ref out) = cli.output {
        std::fs::write(out, conversion.result.to_plain_text())
            .with_context(|| format!("Impossible d'écrire {}", out.display()))?;
    }
    Ok(())
}

/// Charge le fichier de config s'il existe, sinon les défauts. Le booléen
/// indique si un fichier a été lu.
fn resolve_config(cli: &cli::Cli) -> Result<(TextifyConfig, bool)> {
    if cli.config.exists() {
        Ok((tx_core::config::load_config(&cli.config)?, true))
    } else {
        log::debug!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok((TextifyConfig::default(), false))
    }
}
