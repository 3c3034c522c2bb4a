//! Unification of atoms and the clause operations built on it
//!
//! Three interchangeable algorithms implement [`Unifier`]: Robinson's
//! recursive algorithm with an explicit occurs check, the Martelli–Montanari
//! rule system, and HERE, which detects occurs failures as binding cycles.
//! They agree on whether two atoms unify; the substitutions they return may
//! differ by variable renaming.

mod here;
mod martelli_montanari;
mod robinson;


pub use here::Here;
pub use martelli_montanari::MartelliMontanari;
pub use robinson::{unify_terms, Robinson, UnificationError};

use crate::fol::{Atom, Clause, ClauseIds, Literal, Substitute, Substitution, Term, Variable};
use crate::logging::targets;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A unification algorithm over atoms.
///
/// Only [`Unifier::unify`] is algorithm specific. Simplification,
/// subsumption and resolution are shared by every implementation.
pub trait Unifier {
    /// Most general unifier of two atoms, ignoring polarity.
    ///
    /// `None` when predicates or arities differ, a subterm pair clashes or
    /// a variable would have to contain itself.
    fn unify(&self, lhs: &Atom, rhs: &Atom) -> Option<Substitution>;

    /// Name for display
    fn name(&self) -> &'static str;

    /// Merge same-polarity literals of a clause that unify, until no such
    /// pair is left. Every merge shrinks the clause, so this terminates.
    fn simplify(&self, clause: &Clause) -> Clause {
        let mut clause = clause.clone();
        loop {
            let found = {
                let lits = clause.literals();
                (0..lits.len()).find_map(|i| {
                    lits[i + 1..].iter().find_map(|other| {
                        if lits[i].polarity == other.polarity {
                            self.unify(&lits[i].atom, &other.atom)
                        } else {
                            None
                        }
                    })
                })
            };
            match found {
                Some(subst) => clause = clause.substitute(&subst),
                None => return clause,
            }
        }
    }

    /// Every literal of `lhs` unifies with a literal of `rhs` of the same
    /// polarity. Used as the subsumption test for redundant clauses.
    fn is_part_of(&self, lhs: &Clause, rhs: &Clause) -> bool {
        lhs.literals().iter().all(|l| {
            rhs.literals()
                .iter()
                .any(|r| l.polarity == r.polarity && self.unify(&l.atom, &r.atom).is_some())
        })
    }

    /// Binary resolution on the first complementary pair that unifies.
    ///
    /// Variables of `rhs` are renamed apart from `lhs` first. The resolvent
    /// is simplified, gets a fresh id and records both clauses as
    /// ancestors. Later unifiable pairs of the same two clauses are not
    /// tried.
    fn resolution(&self, lhs: &Clause, rhs: &Clause, ids: &mut ClauseIds) -> Option<Clause> {
        let renamed = rename_apart(lhs, rhs);

        for (i, left) in lhs.literals().iter().enumerate() {
            for (j, right) in renamed.iter().enumerate() {
                if left.polarity == right.polarity {
                    continue;
                }
                let Some(subst) = self.unify(&left.atom, &right.atom) else {
                    continue;
                };
                log::trace!(
                    target: targets::UNIFY,
                    "{}: {} ~ {} with {}",
                    self.name(),
                    left,
                    right,
                    subst
                );

                let literals: Vec<Literal> = lhs
                    .literals()
                    .iter()
                    .enumerate()
                    .filter(|(k, _)| *k != i)
                    .map(|(_, l)| l)
                    .chain(renamed.iter().enumerate().filter(|(k, _)| *k != j).map(|(_, l)| l))
                    .map(|l| l.substitute(&subst))
                    .collect();

                let simplified = self.simplify(&Clause::new(0, literals));
                return Some(Clause::derived(
                    ids.fresh(),
                    simplified.into_literals(),
                    [lhs, rhs],
                ));
            }
        }
        None
    }
}

/// Same predicate symbol with the same arity on both atoms
pub(crate) fn same_predicate(lhs: &Atom, rhs: &Atom) -> bool {
    lhs.predicate == rhs.predicate && lhs.args.len() == rhs.args.len()
}

/// Literals of `rhs` with every variable shared with `lhs` renamed to
/// `<name>_<rhs id>` (extended until unused).
fn rename_apart(lhs: &Clause, rhs: &Clause) -> Vec<Literal> {
    let lhs_vars = lhs.variables();
    let rhs_vars = rhs.variables();
    let mut taken: HashSet<Variable> = lhs_vars.union(&rhs_vars).cloned().collect();

    let mut shared: Vec<&Variable> = rhs_vars.intersection(&lhs_vars).collect();
    if shared.is_empty() {
        return rhs.literals().to_vec();
    }
    shared.sort();

    let mut renaming = Substitution::new();
    for var in shared {
        let mut name = format!("{}_{}", var.name, rhs.id);
        while taken.contains(&Variable::new(name.as_str())) {
            name = format!("{}_{}", name, rhs.id);
        }
        let fresh = Variable::new(name);
        taken.insert(fresh.clone());
        renaming.insert(var.clone(), Term::Variable(fresh));
    }

    rhs.literals().iter().map(|l| l.substitute(&renaming)).collect()
}

/// Selects one of the unification algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum UnifierKind {
    #[default]
    Robinson,
    Here,
    MartelliMontanari,
}

impl UnifierKind {
    pub const ALL: [UnifierKind; 3] = [
        UnifierKind::Robinson,
        UnifierKind::Here,
        UnifierKind::MartelliMontanari,
    ];

    pub fn build(self) -> Box<dyn Unifier> {
        match self {
            UnifierKind::Robinson => Box::new(Robinson),
            UnifierKind::Here => Box::new(Here),
            UnifierKind::MartelliMontanari => Box::new(MartelliMontanari),
        }
    }

    /// Entry of the interactive menu, numbered from 1
    pub fn from_menu(choice: usize) -> Option<Self> {
        choice.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for UnifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnifierKind::Robinson => "Robinson",
            UnifierKind::Here => "Here",
            UnifierKind::MartelliMontanari => "Martelli-Montanari",
        };
        write!(f, "{}", name)
    }
}
