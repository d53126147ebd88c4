// src/noyau/validation.rs
//
// Liste blanche (défense en profondeur) sur le texte normalisé.
// Le parseur ne sait de toute façon construire que des noeuds du vocabulaire
// fermé ; ce filtre rejette plus tôt, avec un message qui nomme le coupable.

use super::erreur::{ErreurCalc, Resultat};

/// Mots reconnus (fonctions + constante d’Euler).
pub const VOCABULAIRE: &[&str] = &["sin", "cos", "tan", "ln", "log", "e"];

/// Symboles hors chiffres autorisés après normalisation.
const SYMBOLES: &str = "+-*/.()^!²⁻¹√πE";

fn caractere_autorise(c: char) -> bool {
    c.is_ascii_digit() || SYMBOLES.contains(c)
}

/// Vérifie que le texte normalisé ne contient que le vocabulaire autorisé.
pub fn valider(s: &str) -> Resultat<()> {
    let chars: Vec<char> = s.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // mots : suites maximales de minuscules ASCII
        if c.is_ascii_lowercase() {
            let debut = i;
            while i < chars.len() && chars[i].is_ascii_lowercase() {
                i += 1;
            }
            let mot: String = chars[debut..i].iter().collect();
            if !VOCABULAIRE.contains(&mot.as_str()) {
                return Err(ErreurCalc::CaracteresInvalides(format!("« {mot} »")));
            }
            continue;
        }

        if !caractere_autorise(c) {
            return Err(ErreurCalc::CaracteresInvalides(format!("'{c}'")));
        }
        i += 1;
    }

    Ok(())
}
