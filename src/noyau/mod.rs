//! Noyau de la calculatrice (sans état, sans UI)
//!
//! Organisation interne :
//! - normalisation.rs : symboles d’affichage -> forme canonique (÷ × − ᴇ pi sqrt)
//! - validation.rs    : liste blanche des caractères et des mots
//! - jetons.rs        : tokenisation (nombres, notation E, fonctions)
//! - analyse.rs       : descente récursive -> AST
//! - expr.rs          : AST + évaluation f64
//! - trig.rs          : mode d’angle + angles remarquables
//! - factorielle.rs   : n! exact jusqu’à 170
//! - erreur.rs        : genres d’échec
//! - format.rs        : arrondi + texte d’affichage
//! - eval.rs          : pipeline complet

pub mod analyse;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod factorielle;
pub mod format;
pub mod jetons;
pub mod normalisation;
pub mod trig;
pub mod validation;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::{ErreurCalc, Resultat};
pub use eval::evaluer;
pub use trig::ModeAngle;
