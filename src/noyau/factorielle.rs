// src/noyau/factorielle.rs
//
// n! pour n entier, 0 ≤ n ≤ 170.
// Produit itératif exact (BigUint) de 2 à n, converti UNE fois en f64 :
// pas d’accumulation d’arrondis. Table calculée une seule fois (OnceLock).

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};
use std::sync::OnceLock;

use super::erreur::{ErreurCalc, Resultat};

/// Au-delà, n! dépasse f64::MAX.
pub const FACTORIELLE_MAX: u32 = 170;

static TABLE: OnceLock<Vec<f64>> = OnceLock::new();

fn table() -> &'static [f64] {
    TABLE.get_or_init(|| {
        let mut produit = BigUint::one();
        let mut out = Vec::with_capacity(FACTORIELLE_MAX as usize + 1);
        out.push(1.0); // 0! = 1

        for k in 1..=FACTORIELLE_MAX {
            if k >= 2 {
                produit *= k;
            }
            out.push(produit.to_f64().unwrap_or(f64::INFINITY));
        }
        out
    })
}

/// n! en f64.
///
/// - OperandeInvalide si n est négatif, non entier ou NaN
/// - Depassement si n > 170
pub fn factorielle(n: f64) -> Resultat<f64> {
    if n.is_nan() {
        return Err(ErreurCalc::OperandeInvalide(
            "factorielle d’une valeur indéfinie".into(),
        ));
    }
    if n < 0.0 {
        return Err(ErreurCalc::OperandeInvalide(format!(
            "factorielle d’un négatif ({n})"
        )));
    }
    if n.is_infinite() {
        return Err(ErreurCalc::Depassement("factorielle de l’infini".into()));
    }
    if n.fract() != 0.0 {
        return Err(ErreurCalc::OperandeInvalide(format!(
            "factorielle d’un non-entier ({n})"
        )));
    }
    if n > FACTORIELLE_MAX as f64 {
        return Err(ErreurCalc::Depassement(format!(
            "{n}! dépasse {FACTORIELLE_MAX}!"
        )));
    }

    let v = table()[n as usize];
    if v.is_infinite() {
        return Err(ErreurCalc::Depassement(format!("{n}!")));
    }
    Ok(v)
}
