//! Proof reconstruction from the ancestry of the empty clause

use crate::fol::{Clause, ClauseIds};
use crate::unification::Unifier;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A step of a proof that does not check out
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("proof ends in [{id}], which is not the empty clause")]
    NotARefutation { id: usize },

    #[error("clause [{id}] has {parents} parents; resolution needs two")]
    MalformedStep { id: usize, parents: usize },

    #[error("clause [{id}] is not the resolvent of [{lhs}] and [{rhs}]")]
    InvalidResolvent { id: usize, lhs: usize, rhs: usize },
}

/// Every clause the empty clause was derived from, ordered by id
#[derive(Debug, Clone)]
pub struct Proof {
    steps: BTreeMap<usize, Clause>,
    refutation: Clause,
}

impl Proof {
    /// Walk the ancestors of `empty` recursively, collecting each clause
    /// once.
    pub fn from_refutation(empty: &Clause) -> Self {
        let mut steps = BTreeMap::new();
        collect_ancestors(empty, &mut steps);
        Proof {
            steps,
            refutation: empty.clone(),
        }
    }

    /// Clauses of the proof in id order
    pub fn steps(&self) -> impl Iterator<Item = &Clause> {
        self.steps.values()
    }

    pub fn refutation(&self) -> &Clause {
        &self.refutation
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Clauses numbered before the refutation that the proof never used
    pub fn useless_clauses(&self) -> usize {
        self.refutation.id.saturating_sub(self.steps.len())
    }

    /// Re-derive every resolution step from its parents with `unifier`.
    ///
    /// Resolvents are compared literally, so this must be the unifier that
    /// found the proof; another algorithm may pick differently named
    /// variables.
    pub fn verify(&self, unifier: &dyn Unifier) -> Result<(), VerificationError> {
        if !self.refutation.is_empty() {
            return Err(VerificationError::NotARefutation {
                id: self.refutation.id,
            });
        }

        // Ids of the replayed resolvents are never looked at
        let mut scratch = ClauseIds::new();
        for clause in self.steps.values() {
            match clause.ancestors() {
                [] => {}
                [lhs, rhs] => {
                    let replayed = unifier.resolution(lhs, rhs, &mut scratch);
                    if replayed.as_ref() != Some(clause) {
                        return Err(VerificationError::InvalidResolvent {
                            id: clause.id,
                            lhs: lhs.id,
                            rhs: rhs.id,
                        });
                    }
                }
                parents => {
                    return Err(VerificationError::MalformedStep {
                        id: clause.id,
                        parents: parents.len(),
                    })
                }
            }
        }
        Ok(())
    }
}

fn collect_ancestors(clause: &Clause, steps: &mut BTreeMap<usize, Clause>) {
    if steps.contains_key(&clause.id) {
        return;
    }
    for parent in clause.ancestors() {
        collect_ancestors(parent, steps);
    }
    steps.insert(clause.id, clause.clone());
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, clause) in &self.steps {
            write!(f, "[{}] {} [ ", id, clause)?;
            if clause.ancestors().is_empty() {
                write!(f, "AXIOM ")?;
            }
            for parent in clause.ancestors() {
                write!(f, "{} ", parent.id)?;
            }
            writeln!(f, "]")?;
        }
        writeln!(f, "Proof size: {}", self.steps.len())?;
        write!(f, "Useless clauses: {}", self.useless_clauses())
    }
}
