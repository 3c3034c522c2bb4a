//! Shortest-first clause store

use super::ClauseStore;
use crate::fol::Clause;
use std::collections::BTreeSet;

/// Selects the clause with the fewest literals; ties go to the smaller
/// clause in clause order.
///
/// Favouring short clauses heads towards the empty clause quickly, at the
/// price of fairness: a long clause may wait forever.
#[derive(Debug, Clone, Default)]
pub struct ShortestFirstStore {
    clauses: BTreeSet<(usize, Clause)>,
}

impl ShortestFirstStore {
    pub fn new() -> Self {
        ShortestFirstStore::default()
    }

    pub fn from_clauses(clauses: impl IntoIterator<Item = Clause>) -> Self {
        let mut store = ShortestFirstStore::new();
        for clause in clauses {
            store.add_clause(clause);
        }
        store
    }

    pub fn contains(&self, clause: &Clause) -> bool {
        self.clauses.contains(&(clause.len(), clause.clone()))
    }
}

impl ClauseStore for ShortestFirstStore {
    fn next_clause(&mut self) -> Option<Clause> {
        self.clauses.pop_first().map(|(_, clause)| clause)
    }

    fn add_clause(&mut self, clause: Clause) {
        // BTreeSet::insert keeps the stored clause on a duplicate
        self.clauses.insert((clause.len(), clause));
    }

    fn is_redundant(&self, clause: &Clause) -> bool {
        self.contains(clause)
    }

    fn retain(&mut self, keep: &mut dyn FnMut(&Clause) -> bool) {
        self.clauses.retain(|(_, clause)| keep(clause));
    }

    fn clauses(&self) -> Box<dyn Iterator<Item = &Clause> + '_> {
        Box::new(self.clauses.iter().map(|(_, clause)| clause))
    }

    fn len(&self) -> usize {
        self.clauses.len()
    }

    fn name(&self) -> &'static str {
        "ShortestFirst"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fol::{Atom, Literal, Term};

    fn clause(id: usize, preds: &[&str]) -> Clause {
        let lits = preds
            .iter()
            .map(|p| Literal::positive(Atom::new(*p, vec![Term::constant("cA")])))
            .collect();
        Clause::new(id, lits)
    }

    #[test]
    fn test_shortest_first() {
        let mut store = ShortestFirstStore::new();
        store.add_clause(clause(1, &["pA", "pB", "pC"]));
        store.add_clause(clause(2, &["pD"]));
        store.add_clause(clause(3, &["pA", "pB"]));

        let order: Vec<usize> = std::iter::from_fn(|| store.next_clause()).map(|c| c.id).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_ties_use_clause_order() {
        let store = ShortestFirstStore::from_clauses(vec![clause(1, &["pZ"]), clause(2, &["pB"])]);
        let ids: Vec<usize> = store.clauses().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let mut store = ShortestFirstStore::new();
        store.add_clause(clause(1, &["pA"]));
        store.add_clause(clause(2, &["pA"]));
        assert_eq!(store.len(), 1);
        assert!(store.is_redundant(&clause(3, &["pA"])));
        assert_eq!(store.next_clause().map(|c| c.id), Some(1));
    }
}
