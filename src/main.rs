// src/main.rs
//
// Calculatrice — point d’entrée console
// -------------------------------------
// - `calculatrice "2×(3+4)"` : évalue une fois, affiche le résultat arrondi
//   (code de sortie 1 en cas d’échec)
// - `calculatrice`           : boucle interactive (voir :aide)
//
// Journal : RUST_LOG=debug calculatrice "sin(30)" (sur stderr).

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use calculatrice_sci::app::AppCalc;
use calculatrice_sci::config;
use calculatrice_sci::noyau::format::DECIMALES_MAX;
use calculatrice_sci::noyau::ModeAngle;

#[derive(Parser)]
#[command(version, about = "Calculatrice scientifique (÷ × − ^ √ π e ² ! sin cos tan ln log)")]
struct Cli {
    /// Expression à évaluer (sans expression : mode interactif)
    expression: Option<String>,

    /// Angles en radians
    #[arg(long, conflicts_with = "degres")]
    radians: bool,

    /// Angles en degrés
    #[arg(long)]
    degres: bool,

    /// Décimales affichées (0 à 15)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(0..=DECIMALES_MAX as i64))]
    decimales: Option<u32>,

    /// Fichier de configuration TOML
    #[arg(long, value_name = "CHEMIN")]
    config: Option<PathBuf>,
}

fn init_journal() {
    let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    init_journal();
    let cli = Cli::parse();

    let mut reglages =
        config::charger(cli.config.as_deref()).context("chargement de la configuration")?;

    // Les options de la ligne de commande l’emportent sur le fichier.
    if cli.radians {
        reglages.mode_angle = ModeAngle::Radians;
    }
    if cli.degres {
        reglages.mode_angle = ModeAngle::Degres;
    }
    if let Some(d) = cli.decimales {
        reglages.decimales = d;
    }
    debug!(?reglages, "réglages");

    let mut app = AppCalc::avec_config(&reglages);

    match cli.expression {
        Some(expression) => {
            app.entree = expression;
            match app.evaluer_entree() {
                Ok(_) => {
                    println!("{}", app.entree);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("erreur [{}] : {e}", e.genre());
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        None => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            app.boucle(stdin.lock(), &mut stdout)
                .context("entrée/sortie de la console")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
