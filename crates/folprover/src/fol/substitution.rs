//! Variable substitutions

use super::clause::Clause;
use super::literal::{Atom, Literal};
use super::term::{Term, Variable};
use indexmap::IndexMap;
use std::fmt;

/// A finite substitution from variables to terms, kept in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    map: IndexMap<Variable, Term>,
}

impl Substitution {
    /// Create a new empty substitution
    pub fn new() -> Self {
        Substitution {
            map: IndexMap::new(),
        }
    }

    /// A substitution with exactly one binding
    pub fn single(var: Variable, term: Term) -> Self {
        let mut subst = Substitution::new();
        subst.insert(var, term);
        subst
    }

    /// Add a variable -> term mapping. Identity bindings are ignored.
    pub fn insert(&mut self, var: Variable, term: Term) {
        if let Term::Variable(v) = &term {
            if *v == var {
                return;
            }
        }
        self.map.insert(var, term);
    }

    /// Get the term for a variable, if bound
    pub fn get(&self, var: &Variable) -> Option<&Term> {
        self.map.get(var)
    }

    /// Check if a variable is bound
    pub fn contains(&self, var: &Variable) -> bool {
        self.map.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.map.iter()
    }

    /// Apply the substitution to a term. A single pass is enough for the
    /// idempotent substitutions produced by `compose` and the unifiers.
    pub fn apply(&self, term: &Term) -> Term {
        match term {
            Term::Variable(v) => self.map.get(v).cloned().unwrap_or_else(|| term.clone()),
            Term::Constant(_) => term.clone(),
            Term::Function(f, args) => {
                Term::Function(f.clone(), args.iter().map(|arg| self.apply(arg)).collect())
            }
        }
    }

    /// Compose two substitutions: `self` first, then `other`.
    ///
    /// Values of `self` are pushed through `other`; bindings of `other` for
    /// variables `self` does not bind are appended; identity pairs are dropped.
    pub fn compose(&self, other: &Substitution) -> Substitution {
        let mut result = Substitution::new();

        for (var, term) in &self.map {
            result.insert(var.clone(), other.apply(term));
        }

        for (var, term) in &other.map {
            if !self.map.contains_key(var) {
                result.insert(var.clone(), term.clone());
            }
        }

        result
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, term)) in self.map.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} -> {}", var, term)?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<(Variable, Term)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (Variable, Term)>>(iter: I) -> Self {
        let mut subst = Substitution::new();
        for (var, term) in iter {
            subst.insert(var, term);
        }
        subst
    }
}

/// Values a substitution can be applied to
pub trait Substitute {
    fn substitute(&self, subst: &Substitution) -> Self;
}

impl Substitute for Term {
    fn substitute(&self, subst: &Substitution) -> Term {
        subst.apply(self)
    }
}

impl Substitute for Atom {
    fn substitute(&self, subst: &Substitution) -> Atom {
        Atom {
            predicate: self.predicate.clone(),
            args: self.args.iter().map(|arg| subst.apply(arg)).collect(),
        }
    }
}

impl Substitute for Literal {
    fn substitute(&self, subst: &Substitution) -> Literal {
        Literal {
            atom: self.atom.substitute(subst),
            polarity: self.polarity,
        }
    }
}

/// Keeps id, role and ancestry; the literals are re-sorted and de-duplicated.
impl Substitute for Clause {
    fn substitute(&self, subst: &Substitution) -> Clause {
        let mut clause = self.clone();
        clause.set_literals(self.literals().iter().map(|l| l.substitute(subst)).collect());
        clause
    }
}
