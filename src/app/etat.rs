//! src/app/etat.rs
//!
//! État de la calculatrice (sans vue).
//!
//! Rôle : contenir la session (entrée, erreur, historique, mémoire, mode d’angle)
//! et offrir les actions des touches, sans logique d’affichage.
//!
//! Contrats :
//! - Le noyau reste sans état : le mode d’angle est passé à CHAQUE évaluation.
//! - Aperçu : les échecs sont muets (None). “=” : les échecs sont montrés (erreur).
//! - Défense en profondeur : longueur d’entrée et historique bornés.

use tracing::debug;

use crate::config::Config;
use crate::noyau::erreur::{ErreurCalc, Resultat};
use crate::noyau::eval::evaluer;
use crate::noyau::format::formater;
use crate::noyau::trig::ModeAngle;

/// Touches du clavier de la calculatrice (symboles d’affichage).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    Chiffre(u8),
    Point,

    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,

    Carre,
    Factorielle,
    Inverse,
    Racine,

    Pi,
    Euler,
    Exposant, // ᴇ : notation scientifique

    ParOuvrante,
    ParFermante,

    Sin,
    Cos,
    Tan,
    Ln,
    Log,
}

const CHIFFRES: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

impl Touche {
    /// Texte inséré dans l’entrée (None : chiffre hors 0..=9).
    pub fn symbole(self) -> Option<&'static str> {
        use Touche::*;
        let s = match self {
            Chiffre(d) => return CHIFFRES.get(usize::from(d)).copied(),
            Point => ".",

            Plus => "+",
            Moins => "−",
            Fois => "×",
            Divise => "÷",
            Puissance => "^",

            Carre => "²",
            Factorielle => "!",
            Inverse => "⁻¹",
            Racine => "√(",

            Pi => "π",
            Euler => "e",
            Exposant => "ᴇ",

            ParOuvrante => "(",
            ParFermante => ")",

            Sin => "sin(",
            Cos => "cos(",
            Tan => "tan(",
            Ln => "ln(",
            Log => "log(",
        };
        Some(s)
    }

    /// Touche qui prolonge un résultat affiché (opérateur, postfixe)
    /// plutôt que d’en commencer un nouveau.
    fn prolonge(self) -> bool {
        use Touche::*;
        matches!(
            self,
            Plus | Moins | Fois | Divise | Puissance | Carre | Factorielle | Inverse | ParFermante
        )
    }
}

/// Motifs retirés d’un bloc par le retour arrière.
const MOTIFS_BLOC: [&str; 7] = ["sin(", "cos(", "tan(", "log(", "ln(", "√(", "⁻¹"];

/// Caractères qui terminent une valeur (un ± qui suit est binaire).
fn termine_valeur(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, ')' | '.' | 'π' | 'e' | '!' | '²' | '¹')
}

/// Début du nombre en fin d’entrée, exposant compris ("…2ᴇ−3") ;
/// `chars.len()` s’il n’y en a pas.
fn debut_nombre_final(chars: &[char]) -> usize {
    let mantisse = |fin: usize| {
        let mut d = fin;
        while d > 0 && (chars[d - 1].is_ascii_digit() || chars[d - 1] == '.') {
            d -= 1;
        }
        d
    };

    let debut = mantisse(chars.len());
    if debut == chars.len() {
        return debut;
    }

    // ᴇ[signe]chiffres derrière une mantisse
    let mut k = debut;
    if k > 0 && matches!(chars[k - 1], '−' | '-' | '+') {
        k -= 1;
    }
    if k > 0 && matches!(chars[k - 1], 'ᴇ' | 'E') {
        let m = mantisse(k - 1);
        if m < k - 1 {
            return m;
        }
    }
    debut
}

/// Résultat repris dans une nouvelle entrée : précision complète (aller-retour
/// exact), entre parenthèses s’il est négatif ou écrit avec E.
fn texte_reprise(v: f64) -> String {
    let court = format!("{v}");
    let texte = if court.len() > 24 { format!("{v:E}") } else { court };
    if texte.starts_with('-') || texte.contains('E') {
        format!("({texte})")
    } else {
        texte
    }
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub erreur: String, // message d’erreur (le “modal”), vide si aucune
    pub historique: Vec<String>,

    // --- registre mémoire (MC / MR / M+ / M−) ---
    pub memoire: f64,

    // --- paramètres ---
    pub mode_angle: ModeAngle,
    pub decimales: u32,
    pub historique_max: usize,
    pub longueur_max: usize,

    // Valeur exacte du dernier “=” tant que l’entrée l’affiche (arrondie) :
    // un chiffre repart de zéro, un opérateur prolonge cette valeur.
    dernier: Option<f64>,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::avec_config(&Config::default())
    }
}

impl AppCalc {
    pub fn avec_config(config: &Config) -> Self {
        Self {
            entree: String::new(),
            erreur: String::new(),
            historique: Vec::new(),
            memoire: 0.0,
            mode_angle: config.mode_angle,
            decimales: config.decimales,
            historique_max: config.historique_max,
            longueur_max: config.longueur_max,
            dernier: None,
        }
    }

    /* ------------------------ Évaluation ------------------------ */

    /// Aperçu en direct : résultat arrondi, ou None (jamais d’erreur affichée).
    pub fn apercu(&self) -> Option<String> {
        if self.entree.trim().is_empty() || self.trop_longue() {
            return None;
        }
        evaluer(&self.entree, self.mode_angle)
            .ok()
            .map(|v| formater(v, self.decimales))
    }

    /// “=” : évalue l’entrée.
    ///
    /// Succès : "<expression> = <résultat>" va dans l’historique, l’entrée
    /// devient le résultat. Échec : message dans `erreur`, entrée conservée.
    pub fn evaluer_entree(&mut self) -> Resultat<f64> {
        let expression = self.entree.trim().to_string();
        let v = self.evaluer_texte(&expression)?;

        let texte = formater(v, self.decimales);
        debug!(%expression, resultat = %texte, "historique");
        self.historique.push(format!("{expression} = {texte}"));
        if self.historique.len() > self.historique_max {
            let surplus = self.historique.len() - self.historique_max;
            self.historique.drain(..surplus);
        }

        self.entree = texte;
        self.dernier = Some(v);
        Ok(v)
    }

    /// Évaluation commune à “=” et M±, erreur déposée dans l’état.
    fn evaluer_texte(&mut self, expression: &str) -> Resultat<f64> {
        let r = if self.trop_longue() {
            Err(ErreurCalc::ExpressionInvalide(format!(
                "entrée trop longue (max {} caractères)",
                self.longueur_max
            )))
        } else {
            evaluer(expression, self.mode_angle)
        };

        match r {
            Ok(v) => {
                self.erreur.clear();
                Ok(v)
            }
            Err(e) => {
                self.set_erreur(e.to_string());
                Err(e)
            }
        }
    }

    /// Vrai si l’entrée est le résultat du dernier “=”.
    pub fn montre_resultat(&self) -> bool {
        self.dernier.is_some()
    }

    /// Prolonge le résultat affiché (sans arrondi) : "×3", "²", "^2"…
    /// Sans résultat affiché, le texte est simplement ajouté.
    pub fn prolonger(&mut self, suite: &str) {
        self.reprendre_resultat();
        self.entree.push_str(suite);
    }

    /// L’entrée arrondie redevient la valeur exacte du dernier “=”.
    fn reprendre_resultat(&mut self) {
        if let Some(v) = self.dernier.take() {
            self.entree = texte_reprise(v);
        }
    }

    /// Valeur de l’entrée : le dernier résultat s’il est affiché, sinon évaluée.
    fn valeur_entree(&mut self) -> Resultat<f64> {
        if let Some(v) = self.dernier {
            return Ok(v);
        }
        let expression = self.entree.trim().to_string();
        self.evaluer_texte(&expression)
    }

    fn trop_longue(&self) -> bool {
        self.entree.chars().count() > self.longueur_max
    }

    /* ------------------------ Saisie ------------------------ */

    /// Insère le symbole d’une touche à la fin de l’entrée.
    pub fn inserer(&mut self, touche: Touche) {
        let Some(symbole) = touche.symbole() else {
            self.set_erreur(format!("touche invalide : {touche:?}"));
            return;
        };
        if touche.prolonge() {
            self.reprendre_resultat();
        } else if self.dernier.take().is_some() {
            self.entree.clear();
        }
        self.pousser(symbole);
    }

    fn pousser(&mut self, texte: &str) {
        let total = self.entree.chars().count() + texte.chars().count();
        if total > self.longueur_max {
            self.set_erreur(format!(
                "entrée trop longue (max {} caractères)",
                self.longueur_max
            ));
            return;
        }
        self.entree.push_str(texte);
    }

    /// Retour arrière “intelligent” : retire d’un coup les motifs utiles ("sin(", "⁻¹", etc.).
    pub fn backspace_entree(&mut self) {
        self.dernier = None;

        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        for pat in MOTIFS_BLOC {
            if let Some(reste) = self.entree.strip_suffix(pat) {
                let n = reste.len();
                self.entree.truncate(n);
                return;
            }
        }

        // Sinon : un caractère
        self.entree.pop();
    }

    /// ± : change le signe du nombre en fin d’entrée.
    ///
    /// - "5×3"  -> "5×−3" -> "5×3"
    /// - "5−3"  -> "5+3"  (le moins binaire devient plus, et inversement)
    /// - "2ᴇ3"  -> "−2ᴇ3" (l’exposant fait partie du nombre)
    /// - sans nombre final : "−(…)" autour de toute l’entrée
    /// - sur un résultat affiché : le résultat change de signe
    pub fn basculer_signe(&mut self) {
        if let Some(v) = self.dernier {
            self.dernier = Some(-v);
            self.entree = formater(-v, self.decimales);
            return;
        }

        let chars: Vec<char> = self.entree.chars().collect();
        let debut = debut_nombre_final(&chars);

        if debut == chars.len() {
            if !self.entree.is_empty() {
                self.entree = format!("−({})", self.entree);
            }
            return;
        }

        let avant = &chars[..debut];
        let nombre: String = chars[debut..].iter().collect();
        let binaire = avant.len() >= 2 && termine_valeur(avant[avant.len() - 2]);

        let signe = avant.last().copied();
        let mut tete: String = match signe {
            Some('−' | '-') | Some('+') => avant[..avant.len() - 1].iter().collect(),
            _ => avant.iter().collect(),
        };
        match signe {
            Some('−' | '-') if binaire => tete.push('+'),
            Some('−' | '-') => {}
            Some('+') => tete.push('−'),
            _ => tete.push('−'),
        }

        self.entree = tete + &nombre;
    }

    /// 1/x : enveloppe toute l’entrée.
    pub fn reciproque(&mut self) {
        if self.entree.trim().is_empty() {
            return;
        }
        self.reprendre_resultat();
        self.entree = format!("1÷({})", self.entree);
    }

    /* ------------------------ Mémoire ------------------------ */

    /// MC
    pub fn memoire_effacer(&mut self) {
        self.memoire = 0.0;
    }

    /// MR : insère la valeur mémorisée (entre parenthèses si négative).
    pub fn memoire_rappel(&mut self) {
        if self.dernier.take().is_some() {
            self.entree.clear();
        }
        let texte = formater(self.memoire, self.decimales);
        let texte = if self.memoire < 0.0 && texte != "0" {
            format!("({texte})")
        } else {
            texte
        };
        self.pousser(&texte);
    }

    /// M+ : évalue l’entrée (ou reprend le résultat affiché) et l’ajoute à la mémoire.
    pub fn memoire_ajouter(&mut self) -> Resultat<f64> {
        let v = self.valeur_entree()?;
        self.memoire += v;
        Ok(self.memoire)
    }

    /// M− : évalue l’entrée (ou reprend le résultat affiché) et la retranche de la mémoire.
    pub fn memoire_soustraire(&mut self) -> Resultat<f64> {
        let v = self.valeur_entree()?;
        self.memoire -= v;
        Ok(self.memoire)
    }

    /* ------------------------ Historique / mode ------------------------ */

    /// Recharge l’expression d’une entrée d’historique. false si l’index n’existe pas.
    pub fn reprendre_historique(&mut self, index: usize) -> bool {
        let Some(ligne) = self.historique.get(index) else {
            return false;
        };
        let expression = match ligne.rsplit_once(" = ") {
            Some((e, _)) => e.to_string(),
            None => ligne.clone(),
        };
        self.entree = expression;
        self.dernier = None;
        self.erreur.clear();
        true
    }

    /// DEG <-> RAD
    pub fn basculer_mode_angle(&mut self) -> ModeAngle {
        self.mode_angle = self.mode_angle.bascule();
        self.mode_angle
    }

    /* ------------------------ Actions “effacer” ------------------------ */

    /// AC : entrée + erreur (mémoire et historique conservés).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.erreur.clear();
        self.dernier = None;
    }

    /// C : effacer seulement l’entrée.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.dernier = None;
    }

    /// Utilitaire : placer une erreur (l’entrée est conservée pour correction).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.dernier = None;
    }
}
