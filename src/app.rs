// src/app.rs
//
// Calculatrice — module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc et Touche (pour main.rs: use calculatrice_sci::app::AppCalc;)
//
// Important:
// - etat.rs ne sait rien de l’affichage ; vue.rs ne fait qu’entrée/sortie texte.

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::{AppCalc, Touche};
pub use vue::Suite;
