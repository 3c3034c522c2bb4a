//! folprover: a resolution refutation prover for first-order logic
//!
//! Formulas are parsed from a small ASCII syntax, normalized to prenex
//! conjunctive normal form, Skolemized and split into clauses. The prover
//! negates the hypothesis and runs the given clause loop until it derives
//! the empty clause or runs out of clauses.

pub mod config;
pub mod error;
pub mod fol;
pub mod json;
pub mod logging;
pub mod parser;
pub mod prover;
pub mod selection;
pub mod unification;

// Re-export commonly used types from fol
pub use fol::{
    Atom, Clause, ClauseIds, ClauseRole, Constant, FunctionSymbol, Literal, PredicateSymbol,
    Substitute, Substitution, Term, Variable,
};

pub use config::ProverConfig;
pub use error::{FolError, LexError, ParseError, Result};

pub use parser::{clausify, normalize, parse_formula, Formula, NormalizedFormula, Quantifier, SymbolGenerator};

pub use prover::{Limit, Problem, Proof, ProofResult, Prover, ProverStats, VerificationError};

pub use selection::{ClauseStore, FifoStore, ShortestFirstStore, StoragePolicy, StrikeoutStore};

pub use unification::{Here, MartelliMontanari, Robinson, Unifier, UnifierKind};
