//! First-order logic data structures
//!
//! This module provides the fundamental types for representing clauses:
//! terms, atoms, literals, clauses and substitutions.

pub mod clause;
pub mod literal;
pub mod substitution;
pub mod term;

// Re-export commonly used types
pub use clause::{Clause, ClauseIds, ClauseRole};
pub use literal::{Atom, Literal, PredicateSymbol};
pub use substitution::{Substitute, Substitution};
pub use term::{Constant, FunctionSymbol, Term, Variable};
