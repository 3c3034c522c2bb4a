//! Clauses and clause identifiers

use super::literal::Literal;
use super::term::Variable;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Role of a clause in the proof
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClauseRole {
    /// Clause of an axiom
    #[default]
    Axiom,
    /// Clause of the negated hypothesis
    NegatedConjecture,
    /// Derived clause (from resolution)
    Derived,
}

impl ClauseRole {
    /// Check if this is a goal clause (negated conjecture)
    pub fn is_goal(&self) -> bool {
        matches!(self, ClauseRole::NegatedConjecture)
    }

    pub fn is_input(&self) -> bool {
        !matches!(self, ClauseRole::Derived)
    }
}

/// Monotonic clause id generator.
///
/// One generator is shared by clause extraction and the prover, so ids are
/// unique within a proof attempt and independent between attempts.
#[derive(Debug, Clone)]
pub struct ClauseIds {
    next: usize,
}

impl ClauseIds {
    pub fn new() -> Self {
        ClauseIds { next: 1 }
    }

    /// Take the next unused id
    pub fn fresh(&mut self) -> usize {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> usize {
        self.next - 1
    }
}

impl Default for ClauseIds {
    fn default() -> Self {
        Self::new()
    }
}

/// A clause (disjunction of literals).
///
/// Literals are kept sorted and free of duplicates. Equality, hashing and
/// ordering look at the literals only; `id`, `role` and `ancestors` are
/// bookkeeping for proof reconstruction.
#[derive(Debug, Clone)]
pub struct Clause {
    pub id: usize,
    literals: Vec<Literal>,
    pub role: ClauseRole,
    ancestors: Vec<Arc<Clause>>,
}

impl Clause {
    /// Create a new input clause; literals are sorted and de-duplicated
    pub fn new(id: usize, literals: Vec<Literal>) -> Self {
        Clause {
            id,
            literals: canonical(literals),
            role: ClauseRole::default(),
            ancestors: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: ClauseRole) -> Self {
        self.role = role;
        self
    }

    /// Create a derived clause recording its parents
    pub fn derived(id: usize, literals: Vec<Literal>, parents: [&Clause; 2]) -> Self {
        Clause {
            id,
            literals: canonical(literals),
            role: ClauseRole::Derived,
            ancestors: parents.iter().map(|p| Arc::new((*p).clone())).collect(),
        }
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn ancestors(&self) -> &[Arc<Clause>] {
        &self.ancestors
    }

    /// Replace the literals, restoring the sorted/de-duplicated invariant
    pub fn set_literals(&mut self, literals: Vec<Literal>) {
        self.literals = canonical(literals);
    }

    pub fn into_literals(self) -> Vec<Literal> {
        self.literals
    }

    /// Check if this is the empty clause (contradiction)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// A literal and its exact complement both occur
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .any(|lit| lit.polarity && self.literals.contains(&lit.complement()))
    }

    pub fn variables(&self) -> HashSet<Variable> {
        let mut vars = HashSet::new();
        for lit in &self.literals {
            lit.atom.collect_variables(&mut vars);
        }
        vars
    }
}

fn canonical(mut literals: Vec<Literal>) -> Vec<Literal> {
    literals.sort();
    literals.dedup();
    literals
}

impl PartialEq for Clause {
    fn eq(&self, other: &Self) -> bool {
        self.literals == other.literals
    }
}

impl Eq for Clause {}

impl Hash for Clause {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.literals.hash(state);
    }
}

impl Ord for Clause {
    fn cmp(&self, other: &Self) -> Ordering {
        self.literals.cmp(&other.literals)
    }
}

impl PartialOrd for Clause {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literals.is_empty() {
            write!(f, "⊥")
        } else {
            let lits: Vec<String> = self.literals.iter().map(|l| l.to_string()).collect();
            write!(f, "{}", lits.join(" or "))
        }
    }
}
