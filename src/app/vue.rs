// src/app/vue.rs
//
// Vue console (REPL)
// ------------------
// Objectifs :
// - Même AppCalc (etat.rs) que n’importe quel autre front
// - Une ligne = une expression évaluée comme avec “=”
// - Une ligne qui commence par un opérateur prolonge le dernier résultat ("+2", "×3", "²")
// - Les lignes ":…" sont des commandes (mode, mémoire, historique, arbre)
//
// Note :
// - Entrée/sortie génériques (BufRead/Write) : testable sans terminal.

use std::io::{self, BufRead, Write};

use super::etat::AppCalc;
use crate::noyau::erreur::ErreurCalc;
use crate::noyau::eval::demarche;
use crate::noyau::format::formater;
use crate::noyau::trig::ModeAngle;

const AIDE: &str = "\
Saisir une expression puis Entrée. Symboles : + − × ÷ ^ √ π e ² ! ⁻¹ ᴇ (ou * / - sqrt pi E)
Fonctions : sin cos tan ln log   (ex. 2sin(30)+√(16))
Une ligne commençant par + × ÷ ^ ² ! prolonge le dernier résultat.
Commandes :
  :deg  :rad          mode d’angle
  :mc :mr :m+ :m-     mémoire (effacer, rappeler, ajouter, retrancher le dernier résultat)
  :hist               historique
  :reprendre N        réévalue l’entrée N de l’historique
  :arbre EXPR         normalisation, jetons et arbre d’une expression
  :aide               cette aide
  :q                  quitter";

/// Suite de la boucle après une ligne.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Suite {
    Continuer,
    Quitter,
}

/// Opérateurs qui, en tête de ligne, prolongent le résultat précédent.
/// Le moins est exclu : "-3" est un nombre négatif.
fn prolonge_resultat(ligne: &str) -> bool {
    ligne.starts_with(&['+', '*', '/', '×', '÷', '^', '²', '!', '⁻'][..])
}

impl AppCalc {
    /// REPL : lit des lignes jusqu’à la fin de l’entrée ou ":q".
    pub fn boucle<R: BufRead, W: Write>(&mut self, lecteur: R, sortie: &mut W) -> io::Result<()> {
        self.invite(sortie)?;
        for ligne in lecteur.lines() {
            let ligne = ligne?;
            if self.traiter_ligne(&ligne, sortie)? == Suite::Quitter {
                return Ok(());
            }
            self.invite(sortie)?;
        }
        writeln!(sortie)?;
        Ok(())
    }

    fn invite<W: Write>(&self, sortie: &mut W) -> io::Result<()> {
        write!(sortie, "[{}] > ", self.mode_angle.libelle())?;
        sortie.flush()
    }

    /// Traite une ligne (expression ou commande).
    pub fn traiter_ligne<W: Write>(&mut self, ligne: &str, sortie: &mut W) -> io::Result<Suite> {
        let ligne = ligne.trim();
        if ligne.is_empty() {
            return Ok(Suite::Continuer);
        }

        if let Some(commande) = ligne.strip_prefix(':') {
            return self.commande(commande.trim(), sortie);
        }

        if self.montre_resultat() && prolonge_resultat(ligne) {
            self.prolonger(ligne);
        } else {
            self.entree = ligne.to_string();
        }

        match self.evaluer_entree() {
            Ok(_) => writeln!(sortie, "= {}", self.entree)?,
            Err(e) => Self::ecrire_erreur(sortie, &e)?,
        }
        Ok(Suite::Continuer)
    }

    fn ecrire_erreur<W: Write>(sortie: &mut W, e: &ErreurCalc) -> io::Result<()> {
        writeln!(sortie, "erreur [{}] : {e}", e.genre())
    }

    fn commande<W: Write>(&mut self, commande: &str, sortie: &mut W) -> io::Result<Suite> {
        let (nom, argument) = match commande.split_once(char::is_whitespace) {
            Some((n, a)) => (n, a.trim()),
            None => (commande, ""),
        };

        match nom {
            "q" | "quitter" => return Ok(Suite::Quitter),

            "deg" | "rad" => {
                self.mode_angle = if nom == "deg" {
                    ModeAngle::Degres
                } else {
                    ModeAngle::Radians
                };
                writeln!(sortie, "mode : {}", self.mode_angle.libelle())?;
            }

            "mc" => {
                self.memoire_effacer();
                self.ecrire_memoire(sortie)?;
            }
            "mr" => {
                self.clear_entree();
                self.memoire_rappel();
                writeln!(sortie, "entrée : {}", self.entree)?;
            }
            "m+" | "m-" => {
                let r = if nom == "m+" {
                    self.memoire_ajouter()
                } else {
                    self.memoire_soustraire()
                };
                match r {
                    Ok(_) => self.ecrire_memoire(sortie)?,
                    Err(e) => Self::ecrire_erreur(sortie, &e)?,
                }
            }

            "hist" => {
                if self.historique.is_empty() {
                    writeln!(sortie, "(historique vide)")?;
                }
                for (i, ligne) in self.historique.iter().enumerate() {
                    writeln!(sortie, "{:>3}. {ligne}", i + 1)?;
                }
            }
            "reprendre" => {
                let index = argument.parse::<usize>().ok().and_then(|n| n.checked_sub(1));
                match index {
                    Some(i) if self.reprendre_historique(i) => {
                        writeln!(sortie, "entrée : {}", self.entree)?;
                        match self.evaluer_entree() {
                            Ok(_) => writeln!(sortie, "= {}", self.entree)?,
                            Err(e) => Self::ecrire_erreur(sortie, &e)?,
                        }
                    }
                    _ => writeln!(sortie, "numéro d’historique invalide : {argument:?}")?,
                }
            }

            "arbre" => match demarche(argument) {
                Ok(d) => {
                    writeln!(sortie, "normalisée : {}", d.normalisee)?;
                    writeln!(sortie, "jetons     : {}", d.jetons)?;
                    writeln!(sortie, "arbre      : {}", d.arbre)?;
                }
                Err(e) => Self::ecrire_erreur(sortie, &e)?,
            },

            "aide" | "h" | "?" => writeln!(sortie, "{AIDE}")?,

            autre => writeln!(sortie, "commande inconnue : :{autre} (voir :aide)")?,
        }

        Ok(Suite::Continuer)
    }

    fn ecrire_memoire<W: Write>(&self, sortie: &mut W) -> io::Result<()> {
        writeln!(sortie, "M = {}", formater(self.memoire, self.decimales))
    }
}
