// src/noyau/normalisation.rs
//
// Réécriture des symboles d’affichage vers la forme canonique.
// Pure : aucune erreur possible ici, la validation vient après.
//
// Ordre (important) :
// 1) espaces retirés
// 2) constantes : "pi" -> π (e reste e : toujours Euler)
// 3) opérateurs d’affichage : ÷ × − -> / * - ; ᴇ -> E ; "sqrt" -> √
// 4) "--" -> "+" (double négation issue du ±), sauf juste après l’exposant E

/// Normalise une saisie calculatrice.
///
/// Exemple : `"2×3÷(1−4)"` -> `"2*3/(1-4)"`.
pub fn normaliser(s: &str) -> String {
    // 1) espaces
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();

    // 2) constantes : une seule écriture canonique pour π.
    // e n’est PAS réécrit : la notation scientifique utilise E (ou ᴇ), jamais e.
    let constantes = compact.replace("pi", "π");

    // 3) opérateurs d’affichage
    let operateurs: String = constantes
        .chars()
        .map(|c| match c {
            '÷' => '/',
            '×' => '*',
            '−' => '-',
            'ᴇ' => 'E',
            autre => autre,
        })
        .collect();
    let operateurs = operateurs.replace("sqrt", "√");

    // 4) double moins (une passe gauche -> droite : "---" -> "+-")
    double_moins(&operateurs)
}

/// "--" -> "+" ; après E le signe appartient à l’exposant : "5E--3" reste
/// tel quel (et sera refusé par la lecture du nombre).
fn double_moins(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    let mut precedent = None;

    while let Some(c) = chars.next() {
        if c == '-' && precedent != Some('E') && chars.peek() == Some(&'-') {
            chars.next();
            out.push('+');
            precedent = Some('+');
            continue;
        }
        out.push(c);
        precedent = Some(c);
    }
    out
}
