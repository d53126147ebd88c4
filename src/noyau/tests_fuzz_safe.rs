//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariants clés : jamais de panique, Ok(v) => v fini,
//!   même entrée + même mode => même sortie

use std::time::{Duration, Instant};

use super::erreur::ErreurCalc;
use super::eval::evaluer;
use super::normalisation::normaliser;
use super::trig::ModeAngle;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
    fn mode(&mut self) -> ModeAngle {
        if self.coin() {
            ModeAngle::Degres
        } else {
            ModeAngle::Radians
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn check_resultat(expr: &str, r: &Result<f64, ErreurCalc>) {
    if let Ok(v) = r {
        assert!(v.is_finite(), "Ok non fini: expr={expr:?} v={v}");
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let a = rng.pick(10);
    match rng.pick(4) {
        0 => format!("{a}.{}", rng.pick(100)),
        1 => format!("{a}ᴇ{}", rng.pick(5)),
        _ => format!("{a}"),
    }
}

fn gen_angle(rng: &mut Rng) -> String {
    // multiples de 15° (une partie tombe dans la table, une partie hors table)
    let k = rng.pick(49) as i64 - 24;
    format!("{}", k * 15)
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 | 2 => gen_nombre(rng),
        3 => "π".to_string(),
        4 => "e".to_string(),
        _ => format!("({})", gen_nombre(rng)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(14) {
        0 => gen_atom(rng),
        1 => format!(
            "({}+{})",
            gen_expr(rng, depth - 1),
            gen_expr(rng, depth - 1)
        ),
        2 => format!(
            "({}−{})",
            gen_expr(rng, depth - 1),
            gen_expr(rng, depth - 1)
        ),
        3 => format!(
            "({}×{})",
            gen_expr(rng, depth - 1),
            gen_expr(rng, depth - 1)
        ),
        4 => format!(
            "({}÷{})",
            gen_expr(rng, depth - 1),
            gen_expr(rng, depth - 1)
        ),
        5 => format!("({})^({})", gen_expr(rng, depth - 1), gen_atom(rng)),
        6 => format!("sin({})", gen_angle(rng)),
        7 => format!("cos({})", gen_angle(rng)),
        8 => format!("tan({})", gen_angle(rng)),
        9 => format!("√({})", gen_expr(rng, depth - 1)),
        10 => format!("ln({})", gen_expr(rng, depth - 1)),
        11 => format!("log({})", gen_expr(rng, depth - 1)),
        12 => format!("({})!", rng.pick(25)),
        _ => format!("({})²", gen_expr(rng, depth - 1)),
    }
}

/// Bruit : caractères hors vocabulaire, parenthèses orphelines, etc.
fn gen_bruit(rng: &mut Rng) -> String {
    const ALPHABET: &[char] = &[
        '1', '2', '9', '0', '.', '+', '−', '×', '÷', '(', ')', '^', '!', '²', '√', 'π', 'e', 'E',
        'ᴇ', 's', 'i', 'n', 'x', '$', ' ', '⁻', '¹', '-', '*', '/',
    ];
    let len = 1 + rng.pick(24) as usize;
    (0..len)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_resultats_finis() {
    let t0 = Instant::now();
    let max = Duration::from_millis(400);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 5);
        let mode = rng.mode();

        let r = evaluer(&expr, mode);
        check_resultat(&expr, &r);
        assert_eq!(r, evaluer(&expr, mode), "non déterministe: expr={expr:?}");

        match r {
            Ok(_) => seen_ok += 1,
            Err(_) => seen_err += 1,
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..500 {
        budget(t0, max);

        let s = gen_bruit(&mut rng);
        let r = evaluer(&s, ModeAngle::Degres);
        check_resultat(&s, &r);

        // la normalisation est idempotente
        let n = normaliser(&s);
        let nn = normaliser(&n);
        if !n.contains("--") {
            assert_eq!(nn, n, "normaliser non idempotent: {s:?}");
        }
    }
}

#[test]
fn fuzz_safe_angles_trig_tables() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut rng = Rng::new(0xA11CE_u64);

    for _ in 0..120 {
        budget(t0, max);

        let a = gen_angle(&mut rng);
        for f in ["sin", "cos"] {
            let expr = format!("{f}({a})");
            let v = evaluer(&expr, ModeAngle::Degres)
                .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
            assert!((-1.0..=1.0).contains(&v), "hors [-1,1]: {expr:?} = {v}");
        }

        // tan : indéfini exactement sur 90° + k·180°
        let deg: i64 = a.parse().unwrap();
        let r = evaluer(&format!("tan({a})"), ModeAngle::Degres);
        if (deg - 90).rem_euclid(180) == 0 {
            assert_eq!(r, Err(ErreurCalc::Indefini), "tan({a})");
        } else {
            assert!(r.is_ok(), "tan({a}) : {r:?}");
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("1÷2", 800);
    budget(t0, max);

    let v = evaluer(&expr, ModeAngle::Degres).unwrap_or_else(|e| panic!("err: {e}"));

    // 800*(1/2) = 400
    assert_eq!(v, 400.0);
}
