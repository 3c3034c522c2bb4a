//! First-in first-out clause store

use super::ClauseStore;
use crate::fol::Clause;
use indexmap::IndexSet;

/// Selects clauses in insertion order.
///
/// Every stored clause is eventually selected, which keeps the search fair.
/// Clauses with the same literals as a stored clause are dropped.
#[derive(Debug, Clone, Default)]
pub struct FifoStore {
    clauses: IndexSet<Clause>,
}

impl FifoStore {
    pub fn new() -> Self {
        FifoStore::default()
    }

    pub fn from_clauses(clauses: impl IntoIterator<Item = Clause>) -> Self {
        let mut store = FifoStore::new();
        for clause in clauses {
            store.add_clause(clause);
        }
        store
    }

    pub fn contains(&self, clause: &Clause) -> bool {
        self.clauses.contains(clause)
    }
}

impl ClauseStore for FifoStore {
    fn next_clause(&mut self) -> Option<Clause> {
        // Oldest first; shift_remove keeps the remaining order
        self.clauses.shift_remove_index(0)
    }

    fn add_clause(&mut self, clause: Clause) {
        self.clauses.insert(clause);
    }

    fn is_redundant(&self, clause: &Clause) -> bool {
        self.contains(clause)
    }

    fn retain(&mut self, keep: &mut dyn FnMut(&Clause) -> bool) {
        self.clauses.retain(|clause| keep(clause));
    }

    fn clauses(&self) -> Box<dyn Iterator<Item = &Clause> + '_> {
        Box::new(self.clauses.iter())
    }

    fn len(&self) -> usize {
        self.clauses.len()
    }

    fn name(&self) -> &'static str {
        "FIFO"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fol::{Atom, Literal, Term};

    fn clause(id: usize, preds: &[&str]) -> Clause {
        let lits = preds
            .iter()
            .map(|p| Literal::positive(Atom::new(*p, vec![Term::var("vx")])))
            .collect();
        Clause::new(id, lits)
    }

    #[test]
    fn test_fifo_order() {
        let mut store = FifoStore::new();
        store.add_clause(clause(1, &["pA", "pB"]));
        store.add_clause(clause(2, &["pC"]));
        store.add_clause(clause(3, &["pD"]));

        assert_eq!(store.next_clause().map(|c| c.id), Some(1));
        assert_eq!(store.next_clause().map(|c| c.id), Some(2));
        assert_eq!(store.next_clause().map(|c| c.id), Some(3));
        assert_eq!(store.next_clause(), None);
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let mut store = FifoStore::new();
        store.add_clause(clause(1, &["pA", "pB"]));
        store.add_clause(clause(2, &["pB", "pA"]));

        assert_eq!(store.len(), 1);
        assert!(store.is_redundant(&clause(7, &["pA", "pB"])));
        assert_eq!(store.next_clause().map(|c| c.id), Some(1));
    }

    #[test]
    fn test_retain() {
        let mut store = FifoStore::from_clauses(vec![clause(1, &["pA"]), clause(2, &["pB"]), clause(3, &["pC"])]);
        store.retain(&mut |c| c.id != 2);
        let ids: Vec<usize> = store.clauses().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
