//! Formula parser and conversion to clauses

pub mod cnf_conversion;
pub mod fof;
pub mod formula;
pub mod lexer;
pub mod normalized;

// Re-export main parsing functions and types
pub use cnf_conversion::{
    clausify, move_negation_inward, normalize, normalize_quantifiers, remove_implication, to_cnf,
    SymbolGenerator,
};
pub use fof::{Formula, Quantifier};
pub use formula::parse_formula;
pub use lexer::{tokenize, Spanned, Token};
pub use normalized::NormalizedFormula;
