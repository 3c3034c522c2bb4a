//! Strikeout: a store wrapper that keeps out redundant clauses

use super::ClauseStore;
use crate::fol::Clause;
use crate::logging::targets;
use crate::unification::Unifier;

/// Wraps another store and filters what goes into it.
///
/// A new clause is rejected when it is a tautology, already stored, or
/// subsumed by a stored clause. An accepted clause strikes out the stored
/// clauses it subsumes that are at least as long as itself. Selection
/// order is the inner store's.
pub struct StrikeoutStore<S> {
    inner: S,
    unifier: Box<dyn Unifier>,
}

impl<S: ClauseStore> StrikeoutStore<S> {
    pub fn new(inner: S, unifier: Box<dyn Unifier>) -> Self {
        StrikeoutStore { inner, unifier }
    }

    /// Initial contents only lose duplicates and tautologies; input clauses
    /// are not checked for subsumption against each other.
    pub fn seeded(inner: S, unifier: Box<dyn Unifier>, clauses: impl IntoIterator<Item = Clause>) -> Self {
        let mut store = StrikeoutStore::new(inner, unifier);
        for clause in clauses {
            if clause.is_tautology() {
                log::trace!(target: targets::SUBSUMPTION, "dropping tautology [{}] {}", clause.id, clause);
                continue;
            }
            if !store.inner.is_redundant(&clause) {
                store.inner.add_clause(clause);
            }
        }
        store
    }

    fn is_subsumed(&self, clause: &Clause) -> bool {
        self.inner
            .clauses()
            .any(|stored| self.unifier.is_part_of(stored, clause))
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: ClauseStore> ClauseStore for StrikeoutStore<S> {
    fn next_clause(&mut self) -> Option<Clause> {
        self.inner.next_clause()
    }

    fn add_clause(&mut self, clause: Clause) {
        if clause.is_tautology() {
            log::trace!(target: targets::SUBSUMPTION, "dropping tautology [{}] {}", clause.id, clause);
            return;
        }
        if self.is_redundant(&clause) {
            log::trace!(target: targets::SUBSUMPTION, "dropping subsumed [{}] {}", clause.id, clause);
            return;
        }

        let unifier = self.unifier.as_ref();
        self.inner.retain(&mut |stored| {
            let struck = stored.len() >= clause.len() && unifier.is_part_of(&clause, stored);
            if struck {
                log::trace!(
                    target: targets::SUBSUMPTION,
                    "[{}] {} strikes out [{}] {}",
                    clause.id,
                    clause,
                    stored.id,
                    stored
                );
            }
            !struck
        });
        self.inner.add_clause(clause);
    }

    fn is_redundant(&self, clause: &Clause) -> bool {
        self.inner.is_redundant(clause) || self.is_subsumed(clause)
    }

    fn retain(&mut self, keep: &mut dyn FnMut(&Clause) -> bool) {
        self.inner.retain(keep);
    }

    fn clauses(&self) -> Box<dyn Iterator<Item = &Clause> + '_> {
        self.inner.clauses()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn name(&self) -> &'static str {
        "Strikeout"
    }
}
