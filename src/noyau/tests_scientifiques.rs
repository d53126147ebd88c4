//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : trouver les limites sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//! - comparaisons à 1e-9 près (le bruit flottant est l’affaire de l’affichage)
//!
//! Notes (aligné avec l’état actuel du noyau) :
//! - En degrés, les multiples de 30° et 45° passent par la table : résultats exacts,
//!   tan(90°) est indéfini. Ailleurs, f64 ordinaire.
//! - En radians, tan(π/2) n’est PAS indéfini : π/2 n’est pas représentable,
//!   le résultat est un (très) grand nombre fini.

use std::time::{Duration, Instant};

use super::erreur::ErreurCalc;
use super::eval::evaluer;
use super::format::{formater, DECIMALES_AFFICHAGE};
use super::trig::ModeAngle;

const DEG: ModeAngle = ModeAngle::Degres;
const RAD: ModeAngle = ModeAngle::Radians;

fn eval_ok(expr: &str, mode: ModeAngle) -> f64 {
    evaluer(expr, mode).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, mode: ModeAngle, attendu: f64) {
    let v = eval_ok(expr, mode);
    assert!(
        (v - attendu).abs() < 1e-9,
        "expr={expr:?} : {v} au lieu de {attendu}"
    );
}

fn assert_indefini(expr: &str, mode: ModeAngle) {
    assert_eq!(evaluer(expr, mode), Err(ErreurCalc::Indefini), "expr={expr:?}");
}

fn assert_affiche(expr: &str, mode: ModeAngle, attendu: &str) {
    let v = eval_ok(expr, mode);
    assert_eq!(formater(v, DECIMALES_AFFICHAGE), attendu, "expr={expr:?}");
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Invariants trig (degrés) ------------------------ */

#[test]
fn sci_indefinis_tan() {
    assert_indefini("tan(90)", DEG);
    assert_indefini("tan(270)", DEG);
    assert_indefini("tan(−90)", DEG);
    assert_indefini("tan(450)", DEG);
}

#[test]
fn sci_identites_symetrie() {
    // sin(-x) = -sin(x)
    assert_proche("sin(−45)", DEG, -(2f64.sqrt() / 2.0));
    assert_proche("sin(45)", DEG, 2f64.sqrt() / 2.0);

    // cos(-x) = cos(x)
    assert_eq!(eval_ok("cos(−60)", DEG), 0.5);
    assert_eq!(eval_ok("cos(60)", DEG), 0.5);

    // tan(-x) = -tan(x) (hors indéfini)
    assert_proche("tan(−30)", DEG, -(3f64.sqrt() / 3.0));
    assert_proche("tan(30)", DEG, 3f64.sqrt() / 3.0);
}

#[test]
fn sci_periodicite_angles() {
    // sin(x + 360°) = sin(x)
    assert_eq!(eval_ok("sin(30+360)", DEG), eval_ok("sin(30)", DEG));
    // cos(x + 720°) = cos(x)
    assert_eq!(eval_ok("cos(60+720)", DEG), 0.5);
    // tan(x + 180°) = tan(x)
    assert_proche("tan(30+180)", DEG, 3f64.sqrt() / 3.0);
    // hors table : la périodicité vaut encore à 1e-9 près
    assert_proche("sin(17+360)", DEG, eval_ok("sin(17)", DEG));
}

#[test]
fn sci_angles_remarquables_exacts() {
    // pas de résidu flottant type 1.2246e-16
    assert_eq!(eval_ok("sin(180)", DEG), 0.0);
    assert_eq!(eval_ok("cos(90)", DEG), 0.0);
    assert_eq!(eval_ok("sin(30)", DEG), 0.5);
    assert_eq!(eval_ok("tan(45)", DEG), 1.0);
}

#[test]
fn sci_degres_contre_radians() {
    // même angle, deux unités
    assert_proche("sin(60)", DEG, eval_ok("sin(π÷3)", RAD));
    assert_proche("cos(135)", DEG, eval_ok("cos(3π÷4)", RAD));

    // tan(π/2) en radians : fini, énorme
    let v = eval_ok("tan(π÷2)", RAD);
    assert!(v.abs() > 1e15);
}

#[test]
fn sci_propagation_indefini() {
    // indéfini doit contaminer les opérations
    assert_indefini("1 + tan(90)", DEG);
    assert_indefini("tan(90) + 1", DEG);
    assert_indefini("2 × tan(90)", DEG);
    assert_indefini("tan(90) ÷ 3", DEG);
    assert_indefini("√(−1) × 0", DEG);
}

#[test]
fn sci_infini_classe() {
    assert_eq!(evaluer("1÷0", DEG), Err(ErreurCalc::Infini));
    assert_eq!(evaluer("−1÷0", DEG), Err(ErreurCalc::Infini));
    assert_eq!(evaluer("10^400", DEG), Err(ErreurCalc::Infini));
    assert_eq!(evaluer("0⁻¹", DEG), Err(ErreurCalc::Infini));
    // ∞ - ∞ : indéfini, pas infini
    assert_eq!(evaluer("1÷0 − 1÷0", DEG), Err(ErreurCalc::Indefini));
}

/* ------------------------ Cohérence algébrique ------------------------ */

#[test]
fn sci_zero_algebrique() {
    assert_affiche("(1÷2 + 1÷3) − 5÷6", DEG, "0");
    assert_affiche("(2÷3 × 3÷4) − 1÷2", DEG, "0");
    assert_affiche("√(2)×√(2) − 2", DEG, "0");
    assert_affiche("0.1+0.2", DEG, "0.3");
}

#[test]
fn sci_identites_classiques() {
    // sin² + cos² = 1
    for a in ["17", "33.3", "100", "−250"] {
        assert_proche(&format!("sin({a})² + cos({a})²"), DEG, 1.0);
    }
    // ln(e^x) = x ; 10^log(x) = x
    assert_proche("ln(e^3)", DEG, 3.0);
    assert_proche("10^log(42)", DEG, 42.0);
    // réciproque
    assert_proche("(0.125)⁻¹", DEG, 8.0);
}

#[test]
fn sci_factorielles_bornes() {
    assert_eq!(eval_ok("0!", DEG), 1.0);
    assert_affiche("170!", DEG, "7.257415615E306");
    assert!(matches!(
        evaluer("171!", DEG),
        Err(ErreurCalc::Depassement(_))
    ));
    assert!(matches!(
        evaluer("(−3)!", DEG),
        Err(ErreurCalc::OperandeInvalide(_))
    ));
    // l’argument est une valeur calculée, pas seulement un littéral
    assert_eq!(eval_ok("(2+3)!", DEG), 120.0);
    assert_eq!(eval_ok("3!!", DEG), 720.0);
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_profondeur_racine_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // alterne √ et ² : la valeur doit revenir à 4
    let mut expr = "4".to_string();
    for k in 0..60 {
        expr = if k % 2 == 0 {
            format!("√({expr})")
        } else {
            format!("({expr})²")
        };
        budget(t0, max);
    }

    assert_proche(&expr, DEG, 4.0);
}

#[test]
fn sci_stress_taille_somme_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // chaîne plate : l’analyse est itérative sur un même niveau
    let mut expr = String::new();
    for k in 0..400 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str("1÷2");
        budget(t0, max);
    }

    assert_eq!(eval_ok(&expr, DEG), 200.0);
}

#[test]
fn sci_stress_grands_litteraux_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // 100 chiffres : lu comme f64 (≈ 1e100), sans gel
    let big = "9".repeat(100);
    let expr = format!("{big}÷7 + 1÷7");
    budget(t0, max);

    let v = eval_ok(&expr, DEG);
    assert!(v.is_finite() && v > 1e99);

    // 400 chiffres : dépasse f64 -> infini, classé proprement
    let enorme = "9".repeat(400);
    assert_eq!(evaluer(&enorme, DEG), Err(ErreurCalc::Infini));
}

#[test]
fn sci_imbrication_excessive_refusee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
    assert!(matches!(
        evaluer(&expr, DEG),
        Err(ErreurCalc::ExpressionInvalide(_))
    ));
    budget(t0, max);
}

#[test]
fn sci_chaines_profondes_refusees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // chaînes plates ou postfixes : arbre trop haut, refusé sans épuiser la pile
    for expr in [
        format!("1{}", "!".repeat(1000)),
        vec!["1"; 2000].join("+"),
        format!("2{}", "⁻¹".repeat(2000)),
    ] {
        assert!(
            matches!(evaluer(&expr, DEG), Err(ErreurCalc::ExpressionInvalide(_))),
            "attendu ExpressionInvalide ({} caractères)",
            expr.chars().count()
        );
    }
    budget(t0, max);

    assert_eq!(eval_ok(&format!("1{}", "!".repeat(500)), DEG), 1.0);
}
