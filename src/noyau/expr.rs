// src/noyau/expr.rs
//
// AST de la calculatrice (flottants f64).
// - Nombre    : littéral déjà lu (notation scientifique comprise)
// - Constante : π ou e (valeur résolue à l’évaluation)
// - Trig      : sin/cos/tan, l’argument est dans l’unité du mode d’angle
//
// Les anciennes “substitutions” (puissance, racine, trig, log, factorielle,
// réciproque) sont des NOEUDS : l’opérande gauche de ^ est un sous-arbre,
// jamais “le texte depuis le dernier opérateur”.

use std::fmt;

use super::erreur::Resultat;
use super::factorielle::factorielle;
use super::trig::{appliquer, ModeAngle, TrigFn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => std::f64::consts::PI,
            Constante::E => std::f64::consts::E,
        }
    }

    pub fn symbole(self) -> &'static str {
        match self {
            Constante::Pi => "π",
            Constante::E => "e",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Constante(Constante),

    Neg(Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),

    Puissance(Box<Expr>, Box<Expr>), // a^b, a² = Puissance(a, 2)
    Racine(Box<Expr>),               // √x
    Factorielle(Box<Expr>),          // x!

    Trig(TrigFn, Box<Expr>),
    Ln(Box<Expr>),
    Log(Box<Expr>), // base 10
}

impl Expr {
    /// Évalue l’arbre. Le mode d’angle n’influence que les noeuds Trig.
    ///
    /// Les flottants suivent IEEE : 1/0 = ∞, 0/0 = NaN. Le classement
    /// (fini / indéfini / infini) est fait par l’appelant, une seule fois,
    /// sur le résultat final. Seule la factorielle échoue en cours de route.
    pub fn valeur(&self, mode: ModeAngle) -> Resultat<f64> {
        use Expr::*;

        let v = match self {
            Nombre(n) => *n,
            Constante(c) => c.valeur(),

            Neg(x) => -x.valeur(mode)?,

            Add(a, b) => a.valeur(mode)? + b.valeur(mode)?,
            Sub(a, b) => a.valeur(mode)? - b.valeur(mode)?,
            Mul(a, b) => a.valeur(mode)? * b.valeur(mode)?,
            Div(a, b) => a.valeur(mode)? / b.valeur(mode)?,

            Puissance(a, b) => a.valeur(mode)?.powf(b.valeur(mode)?),
            Racine(x) => x.valeur(mode)?.sqrt(),
            Factorielle(x) => factorielle(x.valeur(mode)?)?,

            Trig(f, x) => appliquer(*f, x.valeur(mode)?, mode),
            Ln(x) => x.valeur(mode)?.ln(),
            Log(x) => x.valeur(mode)?.log10(),
        };

        Ok(v)
    }

    /// Nombre de noeuds (garde-fou de taille, tests).
    pub fn taille(&self) -> usize {
        use Expr::*;
        match self {
            Nombre(_) | Constante(_) => 1,
            Neg(x) | Racine(x) | Factorielle(x) | Trig(_, x) | Ln(x) | Log(x) => 1 + x.taille(),
            Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Puissance(a, b) => {
                1 + a.taille() + b.taille()
            }
        }
    }
}

/// Forme canonique, entièrement parenthésée pour les binaires (relisible par le noyau).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Nombre(n) => write!(f, "{n}"),
            Constante(c) => write!(f, "{}", c.symbole()),

            Neg(x) => write!(f, "-{x}"),

            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
            Puissance(a, b) => write!(f, "({a}^{b})"),

            Racine(x) => write!(f, "√({x})"),
            Factorielle(x) => write!(f, "({x})!"),

            Trig(t, x) => write!(f, "{}({x})", t.nom()),
            Ln(x) => write!(f, "ln({x})"),
            Log(x) => write!(f, "log({x})"),
        }
    }
}
