//! Recursive-descent parser for formulas
//!
//! ```text
//! implication := disjunction ( "->" implication )?
//! disjunction := conjunction ( "or" conjunction )*
//! conjunction := unary ( "and" unary )*
//! unary       := ("~" | "not") unary
//!              | "(" implication ")"
//!              | ("@" | "?") VAR "." implication
//!              | PRED ( "(" term ( "," term )* ")" )?
//! term        := VAR | CONST | FUNC "(" term ( "," term )* ")"
//! ```

use super::fof::{Formula, Quantifier};
use super::lexer::{tokenize, Spanned, Token};
use crate::error::{ParseError, Result};
use crate::fol::{Atom, Term, Variable};

/// Parse a single formula
pub fn parse_formula(input: &str) -> Result<Formula> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
    };
    let formula = parser.implication()?;
    if let Some(extra) = parser.peek() {
        return Err(ParseError::TrailingInput {
            found: extra.token.to_string(),
            position: extra.position,
        }
        .into());
    }
    Ok(formula)
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
}

type ParseResult<T> = std::result::Result<T, ParseError>;

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Spanned> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Spanned> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consume the next token if it equals `expected`
    fn eat(&mut self, expected: &Token) -> bool {
        match self.peek() {
            Some(spanned) if spanned.token == *expected => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn implication(&mut self) -> ParseResult<Formula> {
        let lhs = self.disjunction()?;
        if self.eat(&Token::Implies) {
            let rhs = self.implication()?;
            return Ok(Formula::implies(lhs, rhs));
        }
        Ok(lhs)
    }

    fn disjunction(&mut self) -> ParseResult<Formula> {
        let mut formula = self.conjunction()?;
        while self.eat(&Token::Or) {
            formula = Formula::or(formula, self.conjunction()?);
        }
        Ok(formula)
    }

    fn conjunction(&mut self) -> ParseResult<Formula> {
        let mut formula = self.unary()?;
        while self.eat(&Token::And) {
            formula = Formula::and(formula, self.unary()?);
        }
        Ok(formula)
    }

    fn unary(&mut self) -> ParseResult<Formula> {
        let Some(spanned) = self.next() else {
            return Err(ParseError::UnexpectedEnd { expected: "formula" });
        };

        match &spanned.token {
            Token::Not => Ok(Formula::not(self.unary()?)),
            Token::LParen => {
                let inner = self.implication()?;
                if !self.eat(&Token::RParen) {
                    return Err(ParseError::UnclosedBracket {
                        position: spanned.position,
                    });
                }
                Ok(inner)
            }
            Token::Forall => self.quantified(Quantifier::Forall, spanned.position),
            Token::Exists => self.quantified(Quantifier::Exists, spanned.position),
            Token::Predicate(name) => {
                let args = if self.peek().map(|s| &s.token) == Some(&Token::LParen) {
                    self.arguments()?
                } else {
                    Vec::new()
                };
                Ok(Formula::Atom(Atom::new(name.clone(), args)))
            }
            other => Err(ParseError::UnexpectedToken {
                expected: "formula",
                found: other.to_string(),
                position: spanned.position,
            }),
        }
    }

    fn quantified(&mut self, quantifier: Quantifier, position: usize) -> ParseResult<Formula> {
        let var = match self.next() {
            Some(Spanned {
                token: Token::Variable(name),
                ..
            }) => Variable::new(name.clone()),
            Some(other) => {
                return Err(ParseError::MissingVariable {
                    position: other.position,
                })
            }
            None => return Err(ParseError::MissingVariable { position }),
        };

        if !self.eat(&Token::Dot) {
            let position = self.peek().map(|s| s.position).unwrap_or(position);
            return Err(ParseError::MissingDot { position });
        }

        let body = self.implication()?;
        Ok(Formula::Quantified(quantifier, var, Box::new(body)))
    }

    /// `"(" term ("," term)* ")"`; the opening bracket is next
    fn arguments(&mut self) -> ParseResult<Vec<Term>> {
        let open = self.next().map(|s| s.position).unwrap_or(0);
        let mut args = vec![self.term()?];
        while self.eat(&Token::Comma) {
            args.push(self.term()?);
        }
        if !self.eat(&Token::RParen) {
            return Err(ParseError::UnclosedBracket { position: open });
        }
        Ok(args)
    }

    fn term(&mut self) -> ParseResult<Term> {
        let Some(spanned) = self.next() else {
            return Err(ParseError::UnexpectedEnd { expected: "term" });
        };

        match &spanned.token {
            Token::Variable(name) => Ok(Term::var(name.clone())),
            Token::Constant(name) => Ok(Term::constant(name.clone())),
            Token::Function(name) => {
                let has_args = self.peek().map(|s| &s.token) == Some(&Token::LParen)
                    && self.tokens.get(self.pos + 1).map(|s| &s.token) != Some(&Token::RParen);
                if !has_args {
                    return Err(ParseError::EmptyArguments { name: name.clone() });
                }
                Ok(Term::function(name.clone(), self.arguments()?))
            }
            other => Err(ParseError::UnexpectedToken {
                expected: "term",
                found: other.to_string(),
                position: spanned.position,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FolError;
    use proptest::prelude::*;

    fn parse_err(input: &str) -> ParseError {
        match parse_formula(input) {
            Err(FolError::Parse(err)) => err,
            other => panic!("expected parse error for {:?}, got {:?}", input, other),
        }
    }

    #[test]
    fn test_precedence() {
        let f = parse_formula("pA or pB and pC -> pD").unwrap();
        assert_eq!(f.to_string(), "pA or pB and pC -> pD");
        match f {
            Formula::Implies(lhs, _) => assert!(matches!(*lhs, Formula::Or(_, _))),
            other => panic!("expected implication, got {}", other),
        }
    }

    #[test]
    fn test_implication_is_right_associative() {
        let f = parse_formula("pA -> pB -> pC").unwrap();
        match f {
            Formula::Implies(_, rhs) => assert!(matches!(*rhs, Formula::Implies(_, _))),
            other => panic!("expected implication, got {}", other),
        }
    }

    #[test]
    fn test_quantifier_body_extends_right() {
        let f = parse_formula("@ vx . pHuman(vx) -> pMortal(vx)").unwrap();
        match f {
            Formula::Quantified(Quantifier::Forall, var, body) => {
                assert_eq!(var.name, "vx");
                assert!(matches!(*body, Formula::Implies(_, _)));
            }
            other => panic!("expected quantifier, got {}", other),
        }
    }

    #[test]
    fn test_nested_terms() {
        let f = parse_formula("pP(fF(vx, cA), vy)").unwrap();
        assert_eq!(f.to_string(), "pP(fF(vx, cA), vy)");
    }

    #[test]
    fn test_not_keyword_and_tilde() {
        assert_eq!(parse_formula("not pA").unwrap(), parse_formula("~pA").unwrap());
    }

    #[test]
    fn test_round_trip() {
        for input in [
            "@ vx . pHuman(vx) -> pMortal(vx)",
            "~(pP1(vx) and pP2(vx))",
            "(? vy . pQ(vy)) and pR(cA)",
            "pA -> (pB -> pC) -> pD",
            "~~pA or ~(@ vx . ? vy . pL(vx, vy))",
        ] {
            let parsed = parse_formula(input).unwrap();
            let reparsed = parse_formula(&parsed.to_string()).unwrap();
            assert_eq!(parsed, reparsed, "{}", input);
        }
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse_err("(pA and pB"), ParseError::UnclosedBracket { position: 0 }));
        assert!(matches!(parse_err("@ . pA"), ParseError::MissingVariable { .. }));
        assert!(matches!(parse_err("@ vx pA(vx)"), ParseError::MissingDot { .. }));
        assert!(matches!(parse_err("pA and"), ParseError::UnexpectedEnd { .. }));
        assert!(matches!(parse_err("pA pB"), ParseError::TrailingInput { .. }));
        assert!(matches!(parse_err("pP(vx cA)"), ParseError::UnclosedBracket { .. }));
        assert!(matches!(parse_err("pP(fF)"), ParseError::EmptyArguments { .. }));
        assert!(matches!(parse_err("pP(fF())"), ParseError::EmptyArguments { .. }));
        assert!(matches!(parse_err("cA"), ParseError::UnexpectedToken { .. }));
        assert!(matches!(parse_err(""), ParseError::UnexpectedEnd { .. }));
    }

    #[test]
    fn test_lex_error_is_reported() {
        assert!(matches!(parse_formula("pA $ pB"), Err(FolError::Lex(_))));
    }

    fn arb_term() -> impl Strategy<Value = Term> {
        let leaf = prop_oneof![
            prop::sample::select(vec!["vx", "vy"]).prop_map(|name| Term::var(name)),
            prop::sample::select(vec!["cA", "cB"]).prop_map(|name| Term::constant(name)),
        ];
        leaf.prop_recursive(2, 6, 2, |inner| {
            prop::collection::vec(inner, 1..=2).prop_map(|args| Term::function("fF", args))
        })
    }

    fn arb_formula() -> impl Strategy<Value = Formula> {
        let atom = (
            prop::sample::select(vec!["pP", "pQ", "pRain"]),
            prop::collection::vec(arb_term(), 0..=2),
        )
            .prop_map(|(name, args)| Formula::Atom(Atom::new(name, args)));
        atom.prop_recursive(4, 24, 2, |inner| {
            prop_oneof![
                inner.clone().prop_map(Formula::not),
                (inner.clone(), inner.clone()).prop_map(|(l, r)| Formula::and(l, r)),
                (inner.clone(), inner.clone()).prop_map(|(l, r)| Formula::or(l, r)),
                (inner.clone(), inner.clone()).prop_map(|(l, r)| Formula::implies(l, r)),
                (prop::bool::ANY, prop::sample::select(vec!["vx", "vy"]), inner).prop_map(
                    |(forall, var, body)| {
                        let var = Variable::new(var);
                        if forall {
                            Formula::forall(var, body)
                        } else {
                            Formula::exists(var, body)
                        }
                    }
                ),
            ]
        })
    }

    proptest! {
        /// Printing and parsing again gives back the same tree
        #[test]
        fn print_parse_round_trip(formula in arb_formula()) {
            let printed = formula.to_string();
            let reparsed = parse_formula(&printed);
            prop_assert_eq!(reparsed.ok(), Some(formula), "{}", printed);
        }
    }
}
