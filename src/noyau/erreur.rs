// src/noyau/erreur.rs
//
// Taxonomie des échecs d’évaluation.
// Tout échec est synchrone et rendu tel quel à l’appelant : pas de reprise,
// réévaluer la même entrée donnerait le même résultat.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalc {
    /// Caractère ou mot hors du vocabulaire fermé.
    #[error("caractères invalides : {0}")]
    CaracteresInvalides(String),

    /// Syntaxe mal formée (parenthèses, opérande manquant, nombre illisible…).
    #[error("expression invalide : {0}")]
    ExpressionInvalide(String),

    /// Opérande refusé par la factorielle (négatif ou non entier).
    #[error("opérande invalide : {0}")]
    OperandeInvalide(String),

    /// Factorielle au-delà de 170! (dépasse f64).
    #[error("dépassement : {0}")]
    Depassement(String),

    /// Résultat NaN (0÷0, √ d’un négatif, tan(90°)…).
    #[error("résultat indéfini")]
    Indefini,

    /// Résultat non fini (division par zéro, ln(0)…).
    #[error("résultat infini")]
    Infini,
}

impl ErreurCalc {
    /// Nom stable du genre d’erreur (utile pour les journaux et les tests).
    pub fn genre(&self) -> &'static str {
        match self {
            ErreurCalc::CaracteresInvalides(_) => "caracteres_invalides",
            ErreurCalc::ExpressionInvalide(_) => "expression_invalide",
            ErreurCalc::OperandeInvalide(_) => "operande_invalide",
            ErreurCalc::Depassement(_) => "depassement",
            ErreurCalc::Indefini => "indefini",
            ErreurCalc::Infini => "infini",
        }
    }
}

pub type Resultat<T> = Result<T, ErreurCalc>;
