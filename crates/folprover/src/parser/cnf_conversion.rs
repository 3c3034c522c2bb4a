//! Conversion from first-order formulas to clauses
//!
//! The pipeline runs in a fixed order:
//!
//! 1. [`remove_implication`]: `A -> B` becomes `~A or B`
//! 2. [`move_negation_inward`]: negation normal form
//! 3. [`normalize_quantifiers`]: bound variables renamed apart, quantifiers
//!    hoisted into a prefix
//! 4. [`to_cnf`]: `or` distributed over `and`
//!
//! followed by Skolemization and clause extraction on the resulting
//! [`NormalizedFormula`]. Fresh names come from a [`SymbolGenerator`] the
//! caller owns, so separate runs produce the same names.

use super::fof::{Formula, Quantifier};
use super::normalized::NormalizedFormula;
use crate::error::Result;
use crate::fol::{Clause, ClauseIds, ClauseRole, Variable};
use crate::logging::targets;
use std::collections::HashSet;

/// Source of fresh variable names (`vu<n>`) and Skolem symbols
/// (`csk<n>` constants, `fsk<n>` functions).
///
/// Skolem symbols never collide with reserved names or with each other.
/// Reserve the constants and functions of every formula of a problem
/// before Skolemizing any of them.
#[derive(Debug, Clone, Default)]
pub struct SymbolGenerator {
    variables: usize,
    skolems: usize,
    reserved: HashSet<String>,
    generated: HashSet<String>,
}

impl SymbolGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A variable whose name is not in `taken`
    pub fn fresh_variable(&mut self, taken: &HashSet<Variable>) -> Variable {
        loop {
            self.variables += 1;
            let var = Variable::new(format!("vu{}", self.variables));
            if !taken.contains(&var) {
                return var;
            }
        }
    }

    /// Keep these constant and function names away from Skolem symbols
    pub fn reserve(&mut self, names: impl IntoIterator<Item = String>) {
        self.reserved.extend(names);
    }

    /// Whether `name` was handed out by [`SymbolGenerator::skolem_symbol`]
    pub fn is_skolem(&self, name: &str) -> bool {
        self.generated.contains(name)
    }

    /// A Skolem symbol name for the given arity that is neither in `taken`
    /// nor reserved
    pub fn skolem_symbol(&mut self, arity: usize, taken: &HashSet<String>) -> String {
        let prefix = if arity == 0 { "csk" } else { "fsk" };
        loop {
            self.skolems += 1;
            let name = format!("{}{}", prefix, self.skolems);
            if !taken.contains(&name) && !self.reserved.contains(&name) {
                self.reserved.insert(name.clone());
                self.generated.insert(name.clone());
                return name;
            }
        }
    }
}

/// Replace every implication `A -> B` by `~A or B`, bottom-up
pub fn remove_implication(formula: Formula) -> Formula {
    match formula {
        Formula::Atom(_) => formula,
        Formula::Not(f) => Formula::not(remove_implication(*f)),
        Formula::And(l, r) => Formula::and(remove_implication(*l), remove_implication(*r)),
        Formula::Or(l, r) => Formula::or(remove_implication(*l), remove_implication(*r)),
        Formula::Implies(l, r) => {
            Formula::or(Formula::not(remove_implication(*l)), remove_implication(*r))
        }
        Formula::Quantified(q, var, body) => {
            Formula::Quantified(q, var, Box::new(remove_implication(*body)))
        }
    }
}

/// Push negations down to the atoms (negation normal form)
pub fn move_negation_inward(formula: Formula) -> Formula {
    match formula {
        Formula::Atom(_) => formula,
        Formula::Not(f) => negated(*f),
        Formula::And(l, r) => Formula::and(move_negation_inward(*l), move_negation_inward(*r)),
        Formula::Or(l, r) => Formula::or(move_negation_inward(*l), move_negation_inward(*r)),
        Formula::Implies(l, r) => Formula::or(negated(*l), move_negation_inward(*r)),
        Formula::Quantified(q, var, body) => {
            Formula::Quantified(q, var, Box::new(move_negation_inward(*body)))
        }
    }
}

/// Negation normal form of `~formula`
fn negated(formula: Formula) -> Formula {
    match formula {
        Formula::Atom(_) => Formula::not(formula),
        Formula::Not(f) => move_negation_inward(*f),
        Formula::And(l, r) => Formula::or(negated(*l), negated(*r)),
        Formula::Or(l, r) => Formula::and(negated(*l), negated(*r)),
        Formula::Implies(l, r) => Formula::and(move_negation_inward(*l), negated(*r)),
        Formula::Quantified(q, var, body) => Formula::Quantified(q.dual(), var, Box::new(negated(*body))),
    }
}

/// Hoist all quantifiers into a prefix.
///
/// A bound variable that is free in the formula, or already bound by an
/// earlier quantifier, is first renamed to a fresh name throughout its
/// scope, so pulling the quantifier over a connective can not capture
/// anything. The prefix lists quantifiers in the order they are met,
/// outermost and leftmost first.
pub fn normalize_quantifiers(formula: Formula, symbols: &mut SymbolGenerator) -> NormalizedFormula {
    let mut taken = formula.all_variables();
    let mut bound = formula.free_variables();
    let renamed = rename_bound(formula, &mut bound, &mut taken, symbols);

    let mut prefix = Vec::new();
    let matrix = pull_quantifiers(renamed, &mut prefix);
    NormalizedFormula { prefix, matrix }
}

fn rename_bound(
    formula: Formula,
    bound: &mut HashSet<Variable>,
    taken: &mut HashSet<Variable>,
    symbols: &mut SymbolGenerator,
) -> Formula {
    match formula {
        Formula::Atom(_) => formula,
        Formula::Not(f) => Formula::not(rename_bound(*f, bound, taken, symbols)),
        Formula::And(l, r) => {
            let l = rename_bound(*l, bound, taken, symbols);
            Formula::and(l, rename_bound(*r, bound, taken, symbols))
        }
        Formula::Or(l, r) => {
            let l = rename_bound(*l, bound, taken, symbols);
            Formula::or(l, rename_bound(*r, bound, taken, symbols))
        }
        Formula::Implies(l, r) => {
            let l = rename_bound(*l, bound, taken, symbols);
            Formula::implies(l, rename_bound(*r, bound, taken, symbols))
        }
        Formula::Quantified(q, var, body) => {
            let (var, body) = if bound.contains(&var) {
                let fresh = symbols.fresh_variable(taken);
                taken.insert(fresh.clone());
                log::trace!(target: targets::NORMALIZE, "renaming bound {} to {}", var, fresh);
                let body = body.rename_free(&var, &fresh);
                (fresh, body)
            } else {
                (var, *body)
            };
            bound.insert(var.clone());
            let body = rename_bound(body, bound, taken, symbols);
            Formula::Quantified(q, var, Box::new(body))
        }
    }
}

/// Move quantifiers of a renamed-apart formula into `prefix`. Negations
/// and implications still present are normalised first so that no
/// quantifier is pulled out from under a negation.
fn pull_quantifiers(formula: Formula, prefix: &mut Vec<(Quantifier, Variable)>) -> Formula {
    match formula {
        Formula::Atom(_) => formula,
        Formula::Not(f) if f.is_quantifier_free() => Formula::Not(f),
        Formula::Not(f) => pull_quantifiers(negated(*f), prefix),
        Formula::And(l, r) => {
            let l = pull_quantifiers(*l, prefix);
            Formula::and(l, pull_quantifiers(*r, prefix))
        }
        Formula::Or(l, r) => {
            let l = pull_quantifiers(*l, prefix);
            Formula::or(l, pull_quantifiers(*r, prefix))
        }
        Formula::Implies(l, r) => pull_quantifiers(Formula::or(negated(*l), *r), prefix),
        Formula::Quantified(q, var, body) => {
            prefix.push((q, var));
            pull_quantifiers(*body, prefix)
        }
    }
}

/// Distribute `or` over `and` until the formula is a conjunction of
/// disjunctions of literals
pub fn to_cnf(formula: Formula) -> Formula {
    match formula {
        Formula::Atom(_) => formula,
        Formula::Not(f) if matches!(*f, Formula::Atom(_)) => Formula::Not(f),
        Formula::Not(f) => to_cnf(negated(*f)),
        Formula::And(l, r) => Formula::and(to_cnf(*l), to_cnf(*r)),
        Formula::Or(l, r) => distribute(to_cnf(*l), to_cnf(*r)),
        Formula::Implies(l, r) => to_cnf(Formula::or(negated(*l), *r)),
        Formula::Quantified(q, var, body) => Formula::Quantified(q, var, Box::new(to_cnf(*body))),
    }
}

/// `l or r` for two formulas already in CNF
fn distribute(l: Formula, r: Formula) -> Formula {
    match (l, r) {
        (Formula::And(a, b), r) => Formula::and(distribute(*a, r.clone()), distribute(*b, r)),
        (l, Formula::And(a, b)) => Formula::and(distribute(l.clone(), *a), distribute(l, *b)),
        (l, r) => Formula::or(l, r),
    }
}

/// Run the four normalisation stages
pub fn normalize(formula: Formula, symbols: &mut SymbolGenerator) -> NormalizedFormula {
    let formula = remove_implication(formula);
    let formula = move_negation_inward(formula);
    let NormalizedFormula { prefix, matrix } = normalize_quantifiers(formula, symbols);
    let normalized = NormalizedFormula {
        prefix,
        matrix: to_cnf(matrix),
    };
    log::debug!(target: targets::NORMALIZE, "normalized: {}", normalized);
    normalized
}

/// Convert a formula into clauses: normalise, Skolemize, split
pub fn clausify(
    formula: Formula,
    role: ClauseRole,
    symbols: &mut SymbolGenerator,
    ids: &mut ClauseIds,
) -> Result<Vec<Clause>> {
    normalize(formula, symbols).into_clauses(role, symbols, ids)
}
