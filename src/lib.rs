//! Calculatrice scientifique : noyau d’évaluation sans état, session et console.
//!
//! ```
//! use calculatrice_sci::noyau::{evaluer, ModeAngle};
//!
//! assert_eq!(evaluer("2×(3+4)", ModeAngle::Degres), Ok(14.0));
//! ```

pub mod app;
pub mod config;
pub mod noyau;
