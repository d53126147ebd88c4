//! Noyau — évaluation (pipeline réel)
//!
//! normaliser -> valider (liste blanche) -> tokenize -> analyse (AST) -> valeur -> classement
//!
//! Aucune exécution de code générique : seul l’AST du vocabulaire fermé est évalué.
//! Le mode d’angle est un paramètre de chaque appel ; le noyau ne garde aucun état.

use tracing::{debug, trace};

use super::analyse::analyser_jetons;
use super::erreur::{ErreurCalc, Resultat};
use super::expr::Expr;
use super::jetons::{format_tokens, tokenize, Tok};
use super::normalisation::normaliser;
use super::trig::ModeAngle;
use super::validation::valider;

#[derive(Default, Clone, Debug)]
pub struct Demarche {
    pub normalisee: String,
    pub jetons: String,
    pub arbre: String,
}

/// API publique : évalue une expression saisie.
///
/// - Ok(v) : v est fini (ni NaN, ni ±∞)
/// - Err : genre d’échec typé (voir ErreurCalc)
///
/// Réévaluer le même couple (expression, mode) donne toujours le même résultat.
pub fn evaluer(expression: &str, mode: ModeAngle) -> Resultat<f64> {
    let arbre = analyser(expression)?;
    let v = arbre.valeur(mode)?;
    let classe = classer(v);
    debug!(expression, ?mode, resultat = ?classe, "évaluation");
    classe
}

/// Texte saisi -> AST (sans évaluer).
pub fn analyser(expression: &str) -> Resultat<Expr> {
    etapes(expression).map(|(_, _, arbre)| arbre)
}

/// Démarche : les étapes intermédiaires, pour affichage.
pub fn demarche(expression: &str) -> Resultat<Demarche> {
    let (normalisee, jetons, arbre) = etapes(expression)?;

    Ok(Demarche {
        jetons: format_tokens(&jetons),
        arbre: arbre.to_string(),
        normalisee,
    })
}

/// Une seule passe : texte normalisé, jetons, arbre.
fn etapes(expression: &str) -> Resultat<(String, Vec<Tok>, Expr)> {
    let s = normaliser(expression);
    if s.is_empty() {
        return Err(ErreurCalc::ExpressionInvalide("entrée vide".into()));
    }

    valider(&s)?;

    let jetons = tokenize(&s)?;
    trace!(jetons = %format_tokens(&jetons), "jetons");

    let arbre = analyser_jetons(&jetons)?;
    Ok((s, jetons, arbre))
}

/// Classement du résultat final : jamais de valeur “à moitié valide”.
fn classer(v: f64) -> Resultat<f64> {
    if v.is_nan() {
        Err(ErreurCalc::Indefini)
    } else if v.is_infinite() {
        Err(ErreurCalc::Infini)
    } else {
        Ok(v)
    }
}
