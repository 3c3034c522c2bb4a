//! HERE unification
//!
//! Variables are grouped into classes through variable-to-variable links;
//! the end of a link chain is the class source and may carry a bound term.
//! The first walk merges classes and binds sources without any occurs
//! check. The second walk resolves every variable to a term, and a source
//! met again while its own term is being resolved is a cycle, which is how
//! occurs failures show up.

use super::{same_predicate, Unifier};
use crate::fol::{Atom, Substitution, Term, Variable};
use crate::logging::targets;
use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, Default)]
pub struct Here;

/// Failures local to the algorithm; they never leave `Here::unify`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HereError {
    /// Different constant or function symbols
    Clash,
    /// A variable would have to contain itself
    Cycle,
}

#[derive(Debug, Clone)]
enum Binding {
    Unbound,
    /// Bound to a term; a variable term links to another class member
    Bound(Term),
    /// Currently being unified or resolved
    InProgress,
    /// Final term of the second walk
    Resolved(Term),
}

impl Unifier for Here {
    fn unify(&self, lhs: &Atom, rhs: &Atom) -> Option<Substitution> {
        if !same_predicate(lhs, rhs) {
            return None;
        }
        let mut bindings = Bindings::default();
        let result = lhs
            .args
            .iter()
            .zip(&rhs.args)
            .try_for_each(|(l, r)| bindings.unify(l, r))
            .and_then(|()| bindings.into_substitution());

        match result {
            Ok(subst) => Some(subst),
            Err(err) => {
                log::trace!(target: targets::UNIFY, "here: {} / {}: {:?}", lhs, rhs, err);
                None
            }
        }
    }

    fn name(&self) -> &'static str {
        "Here"
    }
}

#[derive(Debug, Default)]
struct Bindings {
    slots: IndexMap<Variable, Binding>,
}

impl Bindings {
    fn state(&self, var: &Variable) -> Binding {
        self.slots.get(var).cloned().unwrap_or(Binding::Unbound)
    }

    fn set(&mut self, var: &Variable, binding: Binding) {
        self.slots.insert(var.clone(), binding);
    }

    /// Source of the class of `var`, shortening the walked chain so every
    /// visited link points straight at the source.
    fn source(&mut self, var: &Variable) -> Variable {
        self.slots.entry(var.clone()).or_insert(Binding::Unbound);

        let mut path = Vec::new();
        let mut current = var.clone();
        while let Some(Binding::Bound(Term::Variable(next))) = self.slots.get(&current) {
            let next = next.clone();
            path.push(current);
            current = next;
        }

        for link in path {
            self.set(&link, Binding::Bound(Term::Variable(current.clone())));
        }
        current
    }

    fn unify(&mut self, lhs: &Term, rhs: &Term) -> Result<(), HereError> {
        match (lhs, rhs) {
            (Term::Variable(a), Term::Variable(b)) => self.merge(a, b),
            (Term::Variable(v), term) | (term, Term::Variable(v)) => self.bind(v, term),
            (Term::Constant(a), Term::Constant(b)) if a == b => Ok(()),
            (Term::Function(f, largs), Term::Function(g, rargs))
                if f == g && largs.len() == rargs.len() =>
            {
                largs.iter().zip(rargs).try_for_each(|(l, r)| self.unify(l, r))
            }
            _ => Err(HereError::Clash),
        }
    }

    /// Join the classes of two variables
    fn merge(&mut self, a: &Variable, b: &Variable) -> Result<(), HereError> {
        let ra = self.source(a);
        let rb = self.source(b);
        if ra == rb {
            return Ok(());
        }

        match (self.state(&ra), self.state(&rb)) {
            (Binding::InProgress, _) | (_, Binding::InProgress) => Err(HereError::Cycle),
            (Binding::Unbound, _) => {
                self.set(&ra, Binding::Bound(Term::Variable(rb)));
                Ok(())
            }
            (_, Binding::Unbound) => {
                self.set(&rb, Binding::Bound(Term::Variable(ra)));
                Ok(())
            }
            (Binding::Bound(s) | Binding::Resolved(s), Binding::Bound(t) | Binding::Resolved(t)) => {
                self.set(&rb, Binding::Bound(Term::Variable(ra.clone())));
                self.unify_bound(&ra, s, &t)
            }
        }
    }

    /// Bind the class of `var` to a non-variable term
    fn bind(&mut self, var: &Variable, term: &Term) -> Result<(), HereError> {
        let source = self.source(var);
        match self.state(&source) {
            Binding::Unbound => {
                self.set(&source, Binding::Bound(term.clone()));
                Ok(())
            }
            Binding::InProgress => Err(HereError::Cycle),
            Binding::Bound(bound) | Binding::Resolved(bound) => self.unify_bound(&source, bound, term),
        }
    }

    /// Unify the term bound to `source` with `other` while `source` is
    /// marked in progress.
    fn unify_bound(&mut self, source: &Variable, bound: Term, other: &Term) -> Result<(), HereError> {
        self.set(source, Binding::InProgress);
        let result = self.unify(&bound, other);
        self.set(source, Binding::Bound(bound));
        result
    }

    /// Final term of `var` with every bound variable replaced
    fn resolve(&mut self, var: &Variable) -> Result<Term, HereError> {
        let source = self.source(var);
        match self.state(&source) {
            Binding::Unbound => Ok(Term::Variable(source)),
            Binding::Resolved(term) => Ok(term),
            Binding::InProgress => Err(HereError::Cycle),
            Binding::Bound(bound) => {
                self.set(&source, Binding::InProgress);
                let term = self.resolve_term(&bound)?;
                self.set(&source, Binding::Resolved(term.clone()));
                Ok(term)
            }
        }
    }

    fn resolve_term(&mut self, term: &Term) -> Result<Term, HereError> {
        match term {
            Term::Variable(v) => self.resolve(v),
            Term::Constant(_) => Ok(term.clone()),
            Term::Function(f, args) => {
                let args = args
                    .iter()
                    .map(|arg| self.resolve_term(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Term::Function(f.clone(), args))
            }
        }
    }

    fn into_substitution(mut self) -> Result<Substitution, HereError> {
        let vars: Vec<Variable> = self.slots.keys().cloned().collect();
        let mut subst = Substitution::new();
        for var in vars {
            let term = self.resolve(&var)?;
            subst.insert(var, term);
        }
        Ok(subst)
    }
}
