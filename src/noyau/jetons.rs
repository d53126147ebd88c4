// src/noyau/jetons.rs

use super::erreur::{ErreurCalc, Resultat};

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Pi,
    Euler, // e (toujours la constante, jamais un exposant)

    // Mots du vocabulaire (sin, cos, tan, ln, log).
    // NOTE: le parseur décide si c’est une fonction connue.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    Bang,    // !  (factorielle, postfixe)
    Carre,   // ²  (postfixe)
    Inverse, // ⁻¹ (postfixe)
    Racine,  // √  (préfixe)

    LPar,
    RPar,
}

/// Tokenize une chaîne normalisée en jetons.
/// Supporte:
/// - décimaux (ex: 12, 3.5, .5, 5.)
/// - notation scientifique avec E majuscule (ex: 5E3, 1.2E-4)
/// - opérateurs + - * / ^
/// - postfixes ! ² ⁻¹ et préfixe √
/// - parenthèses ( )
/// - π, e
/// - identifiants [a-z]+
pub fn tokenize(s: &str) -> Resultat<Vec<Tok>> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Symboles d’un seul caractère
        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '!' => Some(Tok::Bang),
            '²' => Some(Tok::Carre),
            '√' => Some(Tok::Racine),
            'π' => Some(Tok::Pi),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // ⁻¹ : deux caractères, l’un sans l’autre n’a pas de sens
        if c == '⁻' {
            if chars.get(i + 1) == Some(&'¹') {
                out.push(Tok::Inverse);
                i += 2;
                continue;
            }
            return Err(ErreurCalc::ExpressionInvalide("⁻ doit être suivi de ¹".into()));
        }

        // Identifiants : [a-z]+
        if c.is_ascii_lowercase() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_lowercase() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            if word == "e" {
                // "1e3", "2.5e-3" : notation ambiguë, on ne devine pas
                let colle_au_nombre = start > 0
                    && matches!(out.last(), Some(Tok::Num(_)))
                    && (chars[start - 1].is_ascii_digit() || chars[start - 1] == '.');
                if colle_au_nombre && suivi_de_chiffres(&chars, i) {
                    let debut_mantisse = chars[..start]
                        .iter()
                        .rposition(|c| !(c.is_ascii_digit() || *c == '.'))
                        .map_or(0, |p| p + 1);
                    let mantisse: String = chars[debut_mantisse..start].iter().collect();
                    return Err(ErreurCalc::ExpressionInvalide(format!(
                        "« {mantisse}e… » ambigu : notation scientifique avec E ou ᴇ (ex. {mantisse}E3), sinon {mantisse}×e"
                    )));
                }
                out.push(Tok::Euler);
            } else {
                out.push(Tok::Ident(word));
            }
            continue;
        }

        // Nombre décimal + exposant E optionnel
        if c.is_ascii_digit() || c == '.' {
            let (n, suite) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(n));
            i = suite;
            continue;
        }

        if c == 'E' {
            return Err(ErreurCalc::ExpressionInvalide(
                "exposant E sans mantisse".into(),
            ));
        }

        return Err(ErreurCalc::CaracteresInvalides(format!("'{c}'")));
    }

    Ok(out)
}

/// Chiffres (éventuellement signés) à partir de `i`.
fn suivi_de_chiffres(chars: &[char], i: usize) -> bool {
    match chars.get(i) {
        Some(c) if c.is_ascii_digit() => true,
        Some('+' | '-') => chars.get(i + 1).is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Lit un nombre à partir de `debut`, retourne (valeur, index suivant).
fn lire_nombre(chars: &[char], debut: usize) -> Resultat<(f64, usize)> {
    let mut i = debut;
    let mut points = 0;

    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
        if chars[i] == '.' {
            points += 1;
        }
        i += 1;
    }

    let mantisse: String = chars[debut..i].iter().collect();
    if points > 1 || mantisse == "." {
        return Err(ErreurCalc::ExpressionInvalide(format!(
            "nombre invalide : {mantisse}"
        )));
    }

    let mut texte = mantisse;

    // exposant : E[+-]chiffres
    if i < chars.len() && chars[i] == 'E' {
        let mut j = i + 1;
        let mut exposant = String::from("E");
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            exposant.push(chars[j]);
            j += 1;
        }
        let debut_chiffres = j;
        while j < chars.len() && chars[j].is_ascii_digit() {
            exposant.push(chars[j]);
            j += 1;
        }
        if j == debut_chiffres {
            return Err(ErreurCalc::ExpressionInvalide(format!(
                "exposant incomplet après {texte}E"
            )));
        }
        texte.push_str(&exposant);
        i = j;
    }

    let n = texte
        .parse::<f64>()
        .map_err(|_| ErreurCalc::ExpressionInvalide(format!("nombre invalide : {texte}")))?;

    Ok((n, i))
}

/// Format utilitaire (journal / démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(n) => format!("{n}"),
            Tok::Pi => "π".to_string(),
            Tok::Euler => "e".to_string(),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),

            Tok::Bang => "!".to_string(),
            Tok::Carre => "²".to_string(),
            Tok::Inverse => "⁻¹".to_string(),
            Tok::Racine => "√".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
