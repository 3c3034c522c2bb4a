//! Clause stores for the given clause loop
//!
//! The prover keeps two stores: *passive* clauses waiting to be selected
//! and *active* clauses that have already been resolved against each
//! other. A store decides the order in which passive clauses come out and
//! which incoming clauses are worth keeping. [`StoragePolicy`] builds a
//! matching passive/active pair from the input clauses.

mod fifo;
mod shortest;
mod strikeout;

pub use fifo::FifoStore;
pub use shortest::ShortestFirstStore;
pub use strikeout::StrikeoutStore;

use crate::fol::{Clause, ClauseIds};
use crate::unification::{Unifier, UnifierKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage for a set of clauses with a selection order.
pub trait ClauseStore {
    /// Remove and return the next clause in selection order
    fn next_clause(&mut self) -> Option<Clause>;

    /// Insert a clause. Stores may silently drop clauses they consider
    /// redundant.
    fn add_clause(&mut self, clause: Clause);

    /// Whether `clause` adds nothing to what is already stored
    fn is_redundant(&self, clause: &Clause) -> bool;

    /// Keep only the clauses for which `keep` returns true
    fn retain(&mut self, keep: &mut dyn FnMut(&Clause) -> bool);

    /// Stored clauses in selection order
    fn clauses(&self) -> Box<dyn Iterator<Item = &Clause> + '_>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store name for logging
    fn name(&self) -> &'static str;

    /// Resolve `clause` against every stored clause, in selection order.
    fn infer(&self, clause: &Clause, unifier: &dyn Unifier, ids: &mut ClauseIds) -> Vec<Clause> {
        self.clauses()
            .filter_map(|stored| unifier.resolution(clause, stored, ids))
            .collect()
    }
}

/// How passive and active clauses are stored and selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StoragePolicy {
    /// First in, first out
    #[default]
    Basic,
    /// Fewest literals first
    ShortestFirst,
    /// FIFO, dropping tautologies and subsumed clauses
    Strikeout,
    /// Set of support: the negated hypothesis is passive, axioms are active
    Support,
    StrikeoutShortestFirst,
    SupportShortestFirst,
}

impl StoragePolicy {
    pub const ALL: [StoragePolicy; 6] = [
        StoragePolicy::Basic,
        StoragePolicy::ShortestFirst,
        StoragePolicy::Strikeout,
        StoragePolicy::Support,
        StoragePolicy::StrikeoutShortestFirst,
        StoragePolicy::SupportShortestFirst,
    ];

    /// Entry of the interactive menu, numbered from 1
    pub fn from_menu(choice: usize) -> Option<Self> {
        choice.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Build the `(passive, active)` stores for a proof attempt.
    ///
    /// `unifier` is only used by strikeout stores for their subsumption
    /// checks; resolution itself uses the prover's unifier.
    pub fn build(
        self,
        axioms: Vec<Clause>,
        hypothesis: Vec<Clause>,
        unifier: UnifierKind,
    ) -> (Box<dyn ClauseStore>, Box<dyn ClauseStore>) {
        match self {
            StoragePolicy::Basic => {
                let passive = FifoStore::from_clauses(axioms.into_iter().chain(hypothesis));
                (Box::new(passive), Box::new(FifoStore::new()))
            }
            StoragePolicy::ShortestFirst => {
                let passive = ShortestFirstStore::from_clauses(axioms.into_iter().chain(hypothesis));
                (Box::new(passive), Box::new(ShortestFirstStore::new()))
            }
            StoragePolicy::Strikeout => {
                let passive = StrikeoutStore::seeded(
                    FifoStore::new(),
                    unifier.build(),
                    axioms.into_iter().chain(hypothesis),
                );
                let active = StrikeoutStore::new(FifoStore::new(), unifier.build());
                (Box::new(passive), Box::new(active))
            }
            StoragePolicy::StrikeoutShortestFirst => {
                let passive = StrikeoutStore::seeded(
                    ShortestFirstStore::new(),
                    unifier.build(),
                    axioms.into_iter().chain(hypothesis),
                );
                let active = StrikeoutStore::new(ShortestFirstStore::new(), unifier.build());
                (Box::new(passive), Box::new(active))
            }
            StoragePolicy::Support => (
                Box::new(FifoStore::from_clauses(hypothesis)),
                Box::new(FifoStore::from_clauses(axioms)),
            ),
            StoragePolicy::SupportShortestFirst => (
                Box::new(ShortestFirstStore::from_clauses(hypothesis)),
                Box::new(ShortestFirstStore::from_clauses(axioms)),
            ),
        }
    }
}

impl fmt::Display for StoragePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoragePolicy::Basic => "Basic",
            StoragePolicy::ShortestFirst => "Shortest first",
            StoragePolicy::Strikeout => "Strikeout",
            StoragePolicy::Support => "Support",
            StoragePolicy::StrikeoutShortestFirst => "Strikeout + Shortest first",
            StoragePolicy::SupportShortestFirst => "Support + Shortest first",
        };
        write!(f, "{}", name)
    }
}
