// src/noyau/format.rs
//
// Affichage des résultats (responsabilité de l’appelant, pas de l’évaluateur).
// - arrondi EXACT à N décimales via BigRational (pas de “0.30000000000000004”)
// - grands nombres en notation scientifique avec E (relisible par le noyau)

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

/// Décimales affichées par défaut (masque le bruit flottant).
pub const DECIMALES_AFFICHAGE: u32 = 9;

/// Au-delà, f64 n’a de toute façon plus de chiffres significatifs à montrer.
pub const DECIMALES_MAX: u32 = 15;

/// À partir de ce module, on passe en notation scientifique.
const SEUIL_SCIENTIFIQUE: f64 = 1e15;

fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

/// r arrondi à `decimales` (demi loin de zéro), None si v non fini.
fn arrondi_exact(v: f64, decimales: u32) -> Option<BigRational> {
    let r = BigRational::from_float(v)?;
    let echelle = BigRational::from_integer(pow10(decimales));
    Some((r * &echelle).round() / echelle)
}

/// Arrondit `v` à `decimales` chiffres après la virgule.
/// Les valeurs non finies sont rendues telles quelles.
pub fn arrondir(v: f64, decimales: u32) -> f64 {
    arrondi_exact(v, decimales.min(DECIMALES_MAX))
        .and_then(|r| r.to_f64())
        .unwrap_or(v)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
fn scaled_to_decimal(mut scaled: BigInt, digits: u32) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    let signe = if neg { "-" } else { "" };
    if digits == 0 {
        return format!("{signe}{int_part}");
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits as usize {
        frac.insert(0, '0');
    }

    format!("{signe}{int_part}.{frac}")
}

fn format_scientifique(v: f64, decimales: u32) -> String {
    let brut = format!("{:.*e}", decimales as usize, v);
    let Some((mantisse, exposant)) = brut.split_once('e') else {
        return brut;
    };
    let mantisse = if mantisse.contains('.') {
        mantisse.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantisse
    };
    format!("{mantisse}E{exposant}")
}

/// Texte d’affichage d’un résultat, arrondi à `decimales`.
///
/// Exemples : 0.1+0.2 -> "0.3" ; 120 -> "120" ; 170! -> "7.257415615E306".
pub fn formater(v: f64, decimales: u32) -> String {
    if v.is_nan() {
        return "indéfini".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let d = decimales.min(DECIMALES_MAX);

    if v.abs() >= SEUIL_SCIENTIFIQUE {
        return format_scientifique(v, d);
    }

    let Some(r) = arrondi_exact(v, d) else {
        return v.to_string();
    };
    if r.is_zero() {
        return "0".to_string();
    }

    let scaled = (r * BigRational::from_integer(pow10(d))).to_integer();
    let texte = scaled_to_decimal(scaled, d);

    if texte.contains('.') {
        texte
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        texte
    }
}
