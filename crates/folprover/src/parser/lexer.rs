//! Tokenizer for the formula language
//!
//! Identifiers carry their category in the first letter: `v` variables,
//! `c` constants, `f` functions and `p` predicates. The prefix stays part
//! of the name.

use crate::error::LexError;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, multispace0, one_of, satisfy},
    combinator::{map, not, recognize, value},
    sequence::{pair, terminated},
    IResult,
};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    LParen,
    RParen,
    Comma,
    Dot,
    Forall,
    Exists,
    Not,
    And,
    Or,
    Implies,
    Variable(String),
    Constant(String),
    Function(String),
    Predicate(String),
}

/// A token with the byte offset where it starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Dot => write!(f, "."),
            Token::Forall => write!(f, "@"),
            Token::Exists => write!(f, "?"),
            Token::Not => write!(f, "~"),
            Token::And => write!(f, "and"),
            Token::Or => write!(f, "or"),
            Token::Implies => write!(f, "->"),
            Token::Variable(name)
            | Token::Constant(name)
            | Token::Function(name)
            | Token::Predicate(name) => write!(f, "{}", name),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn punctuation(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::LParen, char('(')),
        value(Token::RParen, char(')')),
        value(Token::Comma, char(',')),
        value(Token::Dot, char('.')),
        value(Token::Forall, char('@')),
        value(Token::Exists, char('?')),
        value(Token::Not, char('~')),
        value(Token::Implies, tag("->")),
    ))(input)
}

/// A keyword must not run into identifier characters (`andx` is no keyword)
fn keyword<'a>(word: &'static str, token: Token) -> impl FnMut(&'a str) -> IResult<&'a str, Token> {
    value(token, terminated(tag(word), not(satisfy(is_ident_char))))
}

fn identifier(input: &str) -> IResult<&str, Token> {
    map(
        recognize(pair(one_of("vcfp"), take_while1(is_ident_char))),
        |name: &str| {
            let name = name.to_string();
            match name.as_bytes()[0] {
                b'v' => Token::Variable(name),
                b'c' => Token::Constant(name),
                b'f' => Token::Function(name),
                _ => Token::Predicate(name),
            }
        },
    )(input)
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((
        punctuation,
        keyword("and", Token::And),
        keyword("or", Token::Or),
        keyword("not", Token::Not),
        identifier,
    ))(input)
}

/// Split `input` into tokens
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, LexError> {
    let mut tokens = Vec::new();
    let mut rest = input;

    loop {
        let (after_space, _) = skip_whitespace(rest);
        rest = after_space;
        if rest.is_empty() {
            return Ok(tokens);
        }

        let position = input.len() - rest.len();
        match token(rest) {
            Ok((remaining, token)) => {
                tokens.push(Spanned { token, position });
                rest = remaining;
            }
            Err(_) => return Err(lex_error(rest, position)),
        }
    }
}

fn skip_whitespace(input: &str) -> (&str, &str) {
    let result: IResult<&str, &str> = multispace0(input);
    result.unwrap_or((input, ""))
}

/// Classify the failure at the start of `rest`
fn lex_error(rest: &str, position: usize) -> LexError {
    let text: String = rest
        .chars()
        .take_while(|&c| is_ident_char(c) || c == '-' || c == '>')
        .collect();
    match rest.chars().next() {
        Some(found) if text.is_empty() => LexError::UnexpectedChar { found, position },
        _ => LexError::MalformedToken { text, position },
    }
}
