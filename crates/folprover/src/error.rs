//! Error types for folprover

use std::io;
use thiserror::Error;

/// Errors raised while splitting input text into tokens
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character '{found}' at position {position}")]
    UnexpectedChar { found: char, position: usize },

    #[error("malformed token '{text}' at position {position}")]
    MalformedToken { text: String, position: usize },
}

/// Grammar violations found by the parser
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected} at position {position}, found '{found}'")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        position: usize,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("missing variable after quantifier at position {position}")]
    MissingVariable { position: usize },

    #[error("missing '.' after quantified variable at position {position}")]
    MissingDot { position: usize },

    #[error("unclosed bracket opened at position {position}")]
    UnclosedBracket { position: usize },

    #[error("unexpected trailing input '{found}' at position {position}")]
    TrailingInput { found: String, position: usize },

    #[error("function '{name}' needs at least one argument")]
    EmptyArguments { name: String },
}

#[derive(Error, Debug)]
pub enum FolError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("normalization error: {0}")]
    Normalize(String),

    #[error("symbol '{0}' was already introduced by Skolemization")]
    SkolemClash(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FolError>;
