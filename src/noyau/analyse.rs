// src/noyau/analyse.rs
//
// Jetons -> AST (descente récursive + montée de précédence)
// ---------------------------------------------------------
// Grammaire (du plus lâche au plus serré) :
//   expression := unaire ( ('+'|'-'|'*'|'/'|implicite) unaire )*   (précédence)
//   unaire     := ('-'|'+') unaire | puissance
//   puissance  := postfixe ( '^' unaire )?                           (associatif à droite)
//   postfixe   := primaire ( '!' | '²' | '⁻¹' )*
//   primaire   := nombre | π | e | '(' expression ')' | '√' primaire | fonction primaire
//
// Règles:
// - Multiplication implicite : une valeur suivie de '(', π, e, √, d’un nombre
//   ou d’une fonction ("2π", "3(4)", "2sin(30)").
// - "-n!" : le moins placé juste devant un littéral portant '!' appartient
//   au littéral : "-1!" = (-1)! (refusé), "2-1!" reste 2 - (1!).
// - Garde-fous : imbrication de l’analyse, hauteur de l’arbre et nombre de
//   noeuds bornés. Les chaînes "1+1+1…" et "1!!!…" sont construites en boucle
//   mais donnent des arbres profonds : c’est la hauteur qui les arrête.

use super::erreur::{ErreurCalc, Resultat};
use super::expr::{Constante, Expr};
use super::jetons::{format_tokens, Tok};
use super::trig::TrigFn;

/// Imbrication max de l’analyse (parenthèses, fonctions, signes, exposants).
pub const PROFONDEUR_MAX: usize = 256;

/// Hauteur max de l’arbre : `valeur`, `Display` et `Drop` sont récursifs.
pub const HAUTEUR_MAX: usize = 512;

/// Taille max de l’arbre.
pub const NOEUDS_MAX: usize = 4096;

const PREC_MIN: i32 = 1;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        _ => 0,
    }
}

/// Jetons qui peuvent commencer une valeur (multiplication implicite).
fn debute_valeur(t: &Tok) -> bool {
    matches!(
        t,
        Tok::Num(_) | Tok::Pi | Tok::Euler | Tok::Ident(_) | Tok::Racine | Tok::LPar
    )
}

fn inattendu(t: &Tok) -> ErreurCalc {
    let txt = format_tokens(std::slice::from_ref(t));
    match t {
        Tok::RPar => ErreurCalc::ExpressionInvalide("parenthèse fermante inattendue".into()),
        _ => ErreurCalc::ExpressionInvalide(format!("« {txt} » inattendu")),
    }
}

/// Construit l’AST d’une suite de jetons.
pub fn analyser_jetons(jetons: &[Tok]) -> Resultat<Expr> {
    if jetons.is_empty() {
        return Err(ErreurCalc::ExpressionInvalide("expression vide".into()));
    }

    let mut a = Analyseur {
        jetons,
        pos: 0,
        profondeur: 0,
        noeuds: 0,
    };

    let s = a.expression(PREC_MIN)?;
    if let Some(t) = a.peek() {
        return Err(inattendu(t));
    }
    Ok(s.expr)
}

/// Sous-arbre en construction, avec sa hauteur (une feuille vaut 1).
struct Sous {
    expr: Expr,
    hauteur: usize,
}

struct Analyseur<'a> {
    jetons: &'a [Tok],
    pos: usize,
    profondeur: usize,
    noeuds: usize,
}

impl Analyseur<'_> {
    fn peek(&self) -> Option<&Tok> {
        self.jetons.get(self.pos)
    }

    fn peek_at(&self, decalage: usize) -> Option<&Tok> {
        self.jetons.get(self.pos + decalage)
    }

    fn entrer(&mut self) -> Resultat<()> {
        self.profondeur += 1;
        if self.profondeur > PROFONDEUR_MAX {
            return Err(ErreurCalc::ExpressionInvalide(
                "imbrication trop profonde".into(),
            ));
        }
        Ok(())
    }

    fn sortir(&mut self) {
        self.profondeur -= 1;
    }

    /// Compte le noeud et vérifie la hauteur (`sous` = hauteur max des enfants).
    fn noeud(&mut self, expr: Expr, sous: usize) -> Resultat<Sous> {
        self.noeuds += 1;
        if self.noeuds > NOEUDS_MAX {
            return Err(ErreurCalc::ExpressionInvalide("expression trop longue".into()));
        }
        let hauteur = sous + 1;
        if hauteur > HAUTEUR_MAX {
            return Err(ErreurCalc::ExpressionInvalide(
                "expression trop imbriquée".into(),
            ));
        }
        Ok(Sous { expr, hauteur })
    }

    fn feuille(&mut self, expr: Expr) -> Resultat<Sous> {
        self.noeud(expr, 0)
    }

    /* ------------------------ binaires (précédence) ------------------------ */

    fn expression(&mut self, prec_min: i32) -> Resultat<Sous> {
        let mut gauche = self.unaire()?;

        loop {
            let (op, implicite) = match self.peek() {
                Some(t) if precedence(t) > 0 => (t.clone(), false),
                Some(t) if debute_valeur(t) => (Tok::Star, true),
                _ => break,
            };

            let p = precedence(&op);
            if p < prec_min {
                break;
            }
            if !implicite {
                self.pos += 1;
            }

            // gauche-associatif : le côté droit ne prend que des opérateurs plus forts
            let droite = self.expression(p + 1)?;

            let sous = gauche.hauteur.max(droite.hauteur);
            let (a, b) = (Box::new(gauche.expr), Box::new(droite.expr));
            let e = match op {
                Tok::Plus => Expr::Add(a, b),
                Tok::Minus => Expr::Sub(a, b),
                Tok::Star => Expr::Mul(a, b),
                _ => Expr::Div(a, b),
            };
            gauche = self.noeud(e, sous)?;
        }

        Ok(gauche)
    }

    /* ------------------------ unaires + puissance ------------------------ */

    fn unaire(&mut self) -> Resultat<Sous> {
        match self.peek() {
            Some(Tok::Minus) => {
                self.pos += 1;

                // "-n!" : littéral signé
                if let (Some(Tok::Num(n)), Some(Tok::Bang)) = (self.peek(), self.peek_at(1)) {
                    let n = *n;
                    self.pos += 1;
                    let litteral = self.feuille(Expr::Nombre(-n))?;
                    let base = self.postfixes(litteral)?;
                    return self.suite_puissance(base);
                }

                self.entrer()?;
                let x = self.unaire()?;
                self.sortir();
                self.noeud(Expr::Neg(Box::new(x.expr)), x.hauteur)
            }
            Some(Tok::Plus) => {
                self.pos += 1;
                self.entrer()?;
                let x = self.unaire()?;
                self.sortir();
                Ok(x)
            }
            _ => self.puissance(),
        }
    }

    fn puissance(&mut self) -> Resultat<Sous> {
        let base = self.postfixe()?;
        self.suite_puissance(base)
    }

    fn suite_puissance(&mut self, base: Sous) -> Resultat<Sous> {
        if self.peek() != Some(&Tok::Caret) {
            return Ok(base);
        }
        self.pos += 1;

        // exposant signé permis : 2^-1 ; associatif à droite : 2^3^2 = 2^9
        self.entrer()?;
        let exposant = self.unaire()?;
        self.sortir();

        let sous = base.hauteur.max(exposant.hauteur);
        self.noeud(
            Expr::Puissance(Box::new(base.expr), Box::new(exposant.expr)),
            sous,
        )
    }

    /* ------------------------ postfixes ------------------------ */

    fn postfixe(&mut self) -> Resultat<Sous> {
        let p = self.primaire()?;
        self.postfixes(p)
    }

    fn postfixes(&mut self, mut s: Sous) -> Resultat<Sous> {
        loop {
            let suivant = match self.peek() {
                Some(Tok::Bang) => Expr::Factorielle(Box::new(s.expr)),
                Some(Tok::Carre) => {
                    let deux = self.feuille(Expr::Nombre(2.0))?;
                    Expr::Puissance(Box::new(s.expr), Box::new(deux.expr))
                }
                Some(Tok::Inverse) => {
                    let un = self.feuille(Expr::Nombre(1.0))?;
                    Expr::Div(Box::new(un.expr), Box::new(s.expr))
                }
                _ => return Ok(s),
            };
            self.pos += 1;
            s = self.noeud(suivant, s.hauteur)?;
        }
    }

    /* ------------------------ primaires ------------------------ */

    fn primaire(&mut self) -> Resultat<Sous> {
        let tok = match self.peek() {
            Some(t) => t.clone(),
            None => {
                return Err(ErreurCalc::ExpressionInvalide(
                    "opérande manquant en fin d’expression".into(),
                ))
            }
        };

        match tok {
            Tok::Num(n) => {
                self.pos += 1;
                self.feuille(Expr::Nombre(n))
            }
            Tok::Pi => {
                self.pos += 1;
                self.feuille(Expr::Constante(Constante::Pi))
            }
            Tok::Euler => {
                self.pos += 1;
                self.feuille(Expr::Constante(Constante::E))
            }

            Tok::LPar => {
                self.pos += 1;
                self.entrer()?;
                let e = self.expression(PREC_MIN)?;
                self.sortir();

                match self.peek() {
                    Some(Tok::RPar) => {
                        self.pos += 1;
                        Ok(e)
                    }
                    Some(t) => Err(inattendu(t)),
                    None => Err(ErreurCalc::ExpressionInvalide(
                        "parenthèse non fermée".into(),
                    )),
                }
            }

            Tok::Racine => {
                self.pos += 1;
                let x = self.argument()?;
                self.noeud(Expr::Racine(Box::new(x.expr)), x.hauteur)
            }

            Tok::Ident(nom) => {
                self.pos += 1;
                let x = self.argument()?;
                let sous = x.hauteur;
                let e = match nom.as_str() {
                    "sin" => Expr::Trig(TrigFn::Sin, Box::new(x.expr)),
                    "cos" => Expr::Trig(TrigFn::Cos, Box::new(x.expr)),
                    "tan" => Expr::Trig(TrigFn::Tan, Box::new(x.expr)),
                    "ln" => Expr::Ln(Box::new(x.expr)),
                    "log" => Expr::Log(Box::new(x.expr)),
                    _ => return Err(ErreurCalc::CaracteresInvalides(format!("« {nom} »"))),
                };
                self.noeud(e, sous)
            }

            autre => Err(inattendu(&autre)),
        }
    }

    /// Argument d’une fonction ou de √ : un primaire (les postfixes s’appliquent
    /// ensuite au résultat : sin(30)² = (sin 30)²).
    fn argument(&mut self) -> Resultat<Sous> {
        self.entrer()?;
        let x = self.primaire()?;
        self.sortir();
        Ok(x)
    }
}
