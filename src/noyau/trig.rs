// src/noyau/trig.rs
//
// Trigonométrie avec mode d’angle explicite
// -----------------------------------------
// - Le mode (degrés/radians) est un PARAMÈTRE de chaque évaluation,
//   jamais un état caché du noyau.
// - En degrés : angles remarquables (multiples de 30° et 45°) donnés par table,
//   après réduction exacte modulo 360° (rem_euclid sur f64 est exact).
//   tan(90° + k·180°) = indéfini (NaN), pas un “grand nombre”.
// - En radians : f64 direct.

use serde::Deserialize;
use std::f64::consts::FRAC_1_SQRT_2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeAngle {
    #[default]
    #[serde(alias = "degrees", alias = "deg")]
    Degres,
    #[serde(alias = "rad")]
    Radians,
}

impl ModeAngle {
    pub fn bascule(self) -> ModeAngle {
        match self {
            ModeAngle::Degres => ModeAngle::Radians,
            ModeAngle::Radians => ModeAngle::Degres,
        }
    }

    pub fn libelle(self) -> &'static str {
        match self {
            ModeAngle::Degres => "DEG",
            ModeAngle::Radians => "RAD",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
}

impl TrigFn {
    pub fn nom(self) -> &'static str {
        match self {
            TrigFn::Sin => "sin",
            TrigFn::Cos => "cos",
            TrigFn::Tan => "tan",
        }
    }
}

/// Applique sin/cos/tan à `x` exprimé dans l’unité `mode`.
pub fn appliquer(f: TrigFn, x: f64, mode: ModeAngle) -> f64 {
    let rad = match mode {
        ModeAngle::Radians => x,
        ModeAngle::Degres => {
            if let Some(v) = angle_remarquable(f, x) {
                return v;
            }
            x.to_radians()
        }
    };

    match f {
        TrigFn::Sin => rad.sin(),
        TrigFn::Cos => rad.cos(),
        TrigFn::Tan => rad.tan(),
    }
}

/// Table des angles remarquables en degrés.
///
/// Retour:
/// - Some(valeur) si `x` est un multiple exact de 30° ou 45°
/// - Some(NaN) pour tan(90°), tan(270°) (indéfini)
/// - None sinon (calcul flottant ordinaire)
fn angle_remarquable(f: TrigFn, x: f64) -> Option<f64> {
    if !x.is_finite() {
        return None;
    }

    // réduction modulo 360° : exacte, résultat dans [0, 360)
    let a = x.rem_euclid(360.0);
    if a % 30.0 != 0.0 && a % 45.0 != 0.0 {
        return None;
    }

    let demi_r3 = 3f64.sqrt() / 2.0;
    let r3 = 3f64.sqrt();
    let tiers_r3 = 3f64.sqrt() / 3.0;

    // sin(a) pour a ∈ [0, 360) remarquable ; cos(a) = sin(a + 90)
    let sin_table = |d: i64| -> f64 {
        match d.rem_euclid(360) {
            0 | 180 => 0.0,
            30 | 150 => 0.5,
            210 | 330 => -0.5,
            45 | 135 => FRAC_1_SQRT_2,
            225 | 315 => -FRAC_1_SQRT_2,
            60 | 120 => demi_r3,
            240 | 300 => -demi_r3,
            90 => 1.0,
            270 => -1.0,
            _ => f64::NAN,
        }
    };

    let d = a as i64;
    let v = match f {
        TrigFn::Sin => sin_table(d),
        TrigFn::Cos => sin_table(d + 90),
        TrigFn::Tan => match d % 180 {
            0 => 0.0,
            30 => tiers_r3,
            150 => -tiers_r3,
            45 => 1.0,
            135 => -1.0,
            60 => r3,
            120 => -r3,
            _ => f64::NAN, // 90
        },
    };

    Some(v)
}
