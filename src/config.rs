// src/config.rs
//
// Réglages persistants de la calculatrice (TOML).
// ------------------------------------------------
// Emplacement : <config_dir>/calculatrice/config.toml, ou --config CHEMIN.
// - fichier absent    : valeurs par défaut
// - fichier malformé  : erreur (avec le chemin en contexte)
// - valeurs hors bornes : ramenées dans les bornes, avec un avertissement
//
// Exemple :
//   mode_angle = "radians"
//   decimales = 6
//   historique_max = 100

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::noyau::format::{DECIMALES_AFFICHAGE, DECIMALES_MAX};
use crate::noyau::trig::ModeAngle;

const NOM_APPLI: &str = "calculatrice";
const NOM_FICHIER: &str = "config.toml";

/// Garde-fous (anti-abus mémoire).
const HISTORIQUE_BORNE: usize = 10_000;
const LONGUEUR_BORNE: usize = 65_536;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub mode_angle: ModeAngle,
    pub decimales: u32,
    pub historique_max: usize,
    pub longueur_max: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode_angle: ModeAngle::Degres,
            decimales: DECIMALES_AFFICHAGE,
            historique_max: 50,
            longueur_max: 512,
        }
    }
}

impl Config {
    /// Lit une configuration depuis du texte TOML.
    pub fn depuis_toml(texte: &str) -> anyhow::Result<Config> {
        let brute: Config = toml::from_str(texte).context("configuration TOML invalide")?;
        Ok(brute.bornee())
    }

    /// Ramène chaque valeur dans ses bornes.
    fn bornee(mut self) -> Config {
        if self.decimales > DECIMALES_MAX {
            warn!(
                decimales = self.decimales,
                max = DECIMALES_MAX,
                "décimales ramenées au maximum"
            );
            self.decimales = DECIMALES_MAX;
        }
        if self.historique_max > HISTORIQUE_BORNE {
            warn!(historique_max = self.historique_max, "historique ramené à {HISTORIQUE_BORNE}");
            self.historique_max = HISTORIQUE_BORNE;
        }
        if self.longueur_max == 0 || self.longueur_max > LONGUEUR_BORNE {
            warn!(longueur_max = self.longueur_max, "longueur max hors bornes, défaut retenu");
            self.longueur_max = Config::default().longueur_max;
        }
        self
    }
}

/// Chemin par défaut du fichier de configuration (None si le système n’en a pas).
pub fn chemin_defaut() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(NOM_APPLI).join(NOM_FICHIER))
}

/// Charge la configuration.
///
/// `chemin` explicite : le fichier DOIT exister.
/// Sans chemin : fichier par défaut s’il existe, sinon valeurs par défaut.
pub fn charger(chemin: Option<&Path>) -> anyhow::Result<Config> {
    let (chemin, explicite) = match chemin {
        Some(p) => (p.to_path_buf(), true),
        None => match chemin_defaut() {
            Some(p) => (p, false),
            None => {
                debug!("pas de répertoire de configuration, défauts");
                return Ok(Config::default());
            }
        },
    };

    let texte = match fs::read_to_string(&chemin) {
        Ok(t) => t,
        Err(e) if e.kind() == ErrorKind::NotFound && !explicite => {
            debug!(chemin = %chemin.display(), "pas de configuration, défauts");
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("lecture de {}", chemin.display()));
        }
    };

    let config =
        Config::depuis_toml(&texte).with_context(|| format!("dans {}", chemin.display()))?;
    debug!(chemin = %chemin.display(), ?config, "configuration chargée");
    Ok(config)
}
