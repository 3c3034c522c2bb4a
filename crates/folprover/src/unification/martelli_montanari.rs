//! Martelli–Montanari unification
//!
//! The argument pairs of the two atoms form a set of equations which is
//! rewritten until no rule applies:
//!
//! 1. decompose `f(s1..sn) = f(t1..tn)` into `si = ti`; different symbols clash
//! 2. orient `t = x` to `x = t` when `t` is not a variable
//! 3. delete `t = t`
//! 4. eliminate `x = t` by substituting `t` for `x` in every other equation,
//!    failing if `x` occurs in `t`
//!
//! The final set is in solved form and reads off as the unifier.

use super::{same_predicate, Unifier};
use crate::fol::{Atom, Substitution, Term};
use crate::logging::targets;

#[derive(Debug, Clone, Copy, Default)]
pub struct MartelliMontanari;

/// Outcome of one rewriting pass over the equations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// A rule fired
    Progress,
    /// No rule applies
    Solved,
    /// Symbol clash or occurs failure
    Clash,
}

type Equation = (Term, Term);

impl Unifier for MartelliMontanari {
    fn unify(&self, lhs: &Atom, rhs: &Atom) -> Option<Substitution> {
        if !same_predicate(lhs, rhs) {
            return None;
        }
        let mut equations: Vec<Equation> = lhs.args.iter().cloned().zip(rhs.args.iter().cloned()).collect();

        loop {
            match rewrite(&mut equations) {
                Outcome::Progress => continue,
                Outcome::Solved => break,
                Outcome::Clash => {
                    log::trace!(target: targets::UNIFY, "martelli-montanari: {} / {} clash", lhs, rhs);
                    return None;
                }
            }
        }

        equations
            .into_iter()
            .map(|(var, term)| match var {
                Term::Variable(v) => Some((v, term)),
                _ => None,
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "Martelli-Montanari"
    }
}

/// Apply the first rule that matches any equation
fn rewrite(equations: &mut Vec<Equation>) -> Outcome {
    for i in 0..equations.len() {
        let (lhs, rhs) = &equations[i];

        if lhs == rhs {
            equations.remove(i);
            return Outcome::Progress;
        }

        match (lhs, rhs) {
            (Term::Variable(var), term) => {
                if term.contains_variable(var) {
                    return Outcome::Clash;
                }
                let occurs_elsewhere = equations.iter().enumerate().any(|(k, (l, r))| {
                    k != i && (l.contains_variable(var) || r.contains_variable(var))
                });
                if !occurs_elsewhere {
                    continue;
                }
                let binding = Substitution::single(var.clone(), term.clone());
                for (k, (l, r)) in equations.iter_mut().enumerate() {
                    if k != i {
                        *l = binding.apply(l);
                        *r = binding.apply(r);
                    }
                }
                return Outcome::Progress;
            }
            (_, Term::Variable(_)) => {
                let oriented = (rhs.clone(), lhs.clone());
                equations[i] = oriented;
                return Outcome::Progress;
            }
            (Term::Function(f, largs), Term::Function(g, rargs)) => {
                if f != g || largs.len() != rargs.len() {
                    return Outcome::Clash;
                }
                let parts: Vec<Equation> = largs.iter().cloned().zip(rargs.iter().cloned()).collect();
                equations.remove(i);
                equations.extend(parts);
                return Outcome::Progress;
            }
            _ => return Outcome::Clash,
        }
    }
    Outcome::Solved
}
