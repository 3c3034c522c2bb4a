//! Atoms and literals in first-order logic

use super::term::{Term, Variable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

/// A predicate symbol with arity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PredicateSymbol {
    pub name: String,
    pub arity: usize,
}

impl PredicateSymbol {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        PredicateSymbol {
            name: name.into(),
            arity,
        }
    }
}

/// An atomic formula (predicate applied to terms)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Atom {
    pub predicate: PredicateSymbol,
    pub args: Vec<Term>,
}

impl Atom {
    /// Build an atom; the arity is taken from `args`
    pub fn new(predicate: impl Into<String>, args: Vec<Term>) -> Self {
        Atom {
            predicate: PredicateSymbol::new(predicate, args.len()),
            args,
        }
    }

    /// Variables of the atom in order of first occurrence
    pub fn variables(&self) -> Vec<Variable> {
        let mut seen = HashSet::new();
        self.args
            .iter()
            .flat_map(|t| t.variables())
            .filter(|v| seen.insert(v.clone()))
            .collect()
    }

    pub fn collect_variables(&self, vars: &mut HashSet<Variable>) {
        for arg in &self.args {
            arg.collect_variables(vars);
        }
    }
}

/// A literal (positive or negative atom)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub atom: Atom,
    pub polarity: bool,
}

impl Literal {
    /// Create a positive literal
    pub fn positive(atom: Atom) -> Self {
        Literal {
            atom,
            polarity: true,
        }
    }

    /// Create a negative literal
    pub fn negative(atom: Atom) -> Self {
        Literal {
            atom,
            polarity: false,
        }
    }

    pub fn is_negated(&self) -> bool {
        !self.polarity
    }

    /// Get the complement of this literal
    pub fn complement(&self) -> Self {
        Literal {
            atom: self.atom.clone(),
            polarity: !self.polarity,
        }
    }
}

/// Literals order by their printed form; the structural comparison only
/// breaks ties so that `Ord` stays consistent with `Eq`.
impl Ord for Literal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_string()
            .cmp(&other.to_string())
            .then_with(|| self.polarity.cmp(&other.polarity))
            .then_with(|| self.atom.cmp(&other.atom))
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.predicate.name)?;
        if self.args.is_empty() {
            return Ok(());
        }
        write!(f, "(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negated() {
            write!(f, "~")?;
        }
        write!(f, "{}", self.atom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_display() {
        let atom = Atom::new("pP", vec![Term::var("vx"), Term::constant("cA")]);
        assert_eq!(Literal::positive(atom.clone()).to_string(), "pP(vx, cA)");
        assert_eq!(Literal::negative(atom).to_string(), "~pP(vx, cA)");
        assert_eq!(Atom::new("pRain", vec![]).to_string(), "pRain");
    }

    #[test]
    fn test_ordering_by_text() {
        let a = Literal::positive(Atom::new("pA", vec![]));
        let b = Literal::negative(Atom::new("pA", vec![]));
        let c = Literal::positive(Atom::new("pB", vec![]));
        let mut lits = vec![c.clone(), b.clone(), a.clone()];
        lits.sort();
        assert_eq!(lits, vec![a, c, b]);
    }

    #[test]
    fn test_complement() {
        let lit = Literal::positive(Atom::new("pP", vec![Term::var("vx")]));
        assert_eq!(lit.complement().complement(), lit);
        assert!(lit.complement().is_negated());
    }
}
