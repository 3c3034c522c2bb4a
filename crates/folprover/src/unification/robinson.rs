//! Robinson's unification algorithm

use super::{same_predicate, Unifier};
use crate::fol::{Atom, Substitution, Term, Variable};
use crate::logging::targets;

/// Reasons a Robinson unification fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnificationError {
    /// Occurs check failed - variable occurs in term
    OccursCheck(Variable, Term),
    /// Constant or function symbols don't match
    SymbolClash(Term, Term),
    /// Predicate symbols or arities of the atoms don't match
    PredicateMismatch,
}

/// Walks argument pairs left to right, applying the running substitution
/// before each comparison and binding variables after an occurs check.
#[derive(Debug, Clone, Copy, Default)]
pub struct Robinson;

impl Unifier for Robinson {
    fn unify(&self, lhs: &Atom, rhs: &Atom) -> Option<Substitution> {
        match unify_atoms(lhs, rhs) {
            Ok(subst) => Some(subst),
            Err(err) => {
                log::trace!(target: targets::UNIFY, "robinson: {} / {}: {:?}", lhs, rhs, err);
                None
            }
        }
    }

    fn name(&self) -> &'static str {
        "Robinson"
    }
}

fn unify_atoms(lhs: &Atom, rhs: &Atom) -> Result<Substitution, UnificationError> {
    if !same_predicate(lhs, rhs) {
        return Err(UnificationError::PredicateMismatch);
    }
    let mut subst = Substitution::new();
    for (l, r) in lhs.args.iter().zip(&rhs.args) {
        unify_with_subst(l, r, &mut subst)?;
    }
    Ok(subst)
}

/// Unify two terms, returning a most general unifier if one exists
pub fn unify_terms(lhs: &Term, rhs: &Term) -> Result<Substitution, UnificationError> {
    let mut subst = Substitution::new();
    unify_with_subst(lhs, rhs, &mut subst)?;
    Ok(subst)
}

/// Unify two terms under an existing substitution, extending it
fn unify_with_subst(
    lhs: &Term,
    rhs: &Term,
    subst: &mut Substitution,
) -> Result<(), UnificationError> {
    let l = subst.apply(lhs);
    let r = subst.apply(rhs);

    match (&l, &r) {
        _ if l == r => Ok(()),

        (Term::Variable(v), t) | (t, Term::Variable(v)) => {
            if t.contains_variable(v) {
                return Err(UnificationError::OccursCheck(v.clone(), t.clone()));
            }
            *subst = subst.compose(&Substitution::single(v.clone(), t.clone()));
            Ok(())
        }

        (Term::Function(f, largs), Term::Function(g, rargs)) => {
            if f != g || largs.len() != rargs.len() {
                return Err(UnificationError::SymbolClash(l.clone(), r.clone()));
            }
            for (a, b) in largs.iter().zip(rargs) {
                unify_with_subst(a, b, subst)?;
            }
            Ok(())
        }

        _ => Err(UnificationError::SymbolClash(l.clone(), r.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Term {
        Term::var("vx")
    }

    fn y() -> Term {
        Term::var("vy")
    }

    fn f(args: Vec<Term>) -> Term {
        Term::function("fF", args)
    }

    #[test]
    fn test_unify_variable_with_constant() {
        let subst = unify_terms(&x(), &Term::constant("cA")).unwrap();
        assert_eq!(subst.to_string(), "{vx -> cA}");
    }

    #[test]
    fn test_unify_propagates_bindings() {
        // f(x, y) = f(y, a)  ->  x = a, y = a
        let lhs = f(vec![x(), y()]);
        let rhs = f(vec![y(), Term::constant("cA")]);
        let subst = unify_terms(&lhs, &rhs).unwrap();
        assert_eq!(subst.apply(&lhs), subst.apply(&rhs));
        assert_eq!(subst.apply(&x()), Term::constant("cA"));
    }

    #[test]
    fn test_occurs_check() {
        let result = unify_terms(&x(), &f(vec![x()]));
        assert!(matches!(result, Err(UnificationError::OccursCheck(_, _))));
    }

    #[test]
    fn test_symbol_clash() {
        let result = unify_terms(&Term::constant("cA"), &Term::constant("cB"));
        assert!(matches!(result, Err(UnificationError::SymbolClash(_, _))));
        let result = unify_terms(&f(vec![x()]), &Term::function("fG", vec![x()]));
        assert!(matches!(result, Err(UnificationError::SymbolClash(_, _))));
        assert!(unify_terms(&f(vec![x()]), &Term::constant("cA")).is_err());
    }

    #[test]
    fn test_arguments_are_paired_positionally() {
        // f(a, b) and f(b, a) do not unify
        let a = Term::constant("cA");
        let b = Term::constant("cB");
        assert!(unify_terms(&f(vec![a.clone(), b.clone()]), &f(vec![b, a])).is_err());
    }

    #[test]
    fn test_atoms() {
        let lhs = Atom::new("pP", vec![x(), f(vec![y()])]);
        let rhs = Atom::new("pP", vec![Term::constant("cA"), f(vec![x()])]);
        let subst = Robinson.unify(&lhs, &rhs).unwrap();
        assert_eq!(subst.apply(&y()), Term::constant("cA"));
    }
}
