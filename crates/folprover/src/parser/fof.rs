//! First-order formula representation
//!
//! Formulas as written by the user, before conversion to clauses. The
//! `Display` implementation prints text the parser reads back into the same
//! tree.

use crate::fol::{Atom, Substitute, Substitution, Term, Variable};
use std::collections::HashSet;
use std::fmt;

/// Quantifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    Forall,
    Exists,
}

impl Quantifier {
    /// The quantifier a negation turns this one into
    pub fn dual(self) -> Quantifier {
        match self {
            Quantifier::Forall => Quantifier::Exists,
            Quantifier::Exists => Quantifier::Forall,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Quantifier::Forall => "@",
            Quantifier::Exists => "?",
        }
    }
}

/// First-order formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    /// Atomic formula
    Atom(Atom),
    /// Negation
    Not(Box<Formula>),
    /// Conjunction
    And(Box<Formula>, Box<Formula>),
    /// Disjunction
    Or(Box<Formula>, Box<Formula>),
    /// Implication
    Implies(Box<Formula>, Box<Formula>),
    /// Quantified formula
    Quantified(Quantifier, Variable, Box<Formula>),
}

impl Formula {
    pub fn not(f: Formula) -> Formula {
        Formula::Not(Box::new(f))
    }

    pub fn and(l: Formula, r: Formula) -> Formula {
        Formula::And(Box::new(l), Box::new(r))
    }

    pub fn or(l: Formula, r: Formula) -> Formula {
        Formula::Or(Box::new(l), Box::new(r))
    }

    pub fn implies(l: Formula, r: Formula) -> Formula {
        Formula::Implies(Box::new(l), Box::new(r))
    }

    pub fn forall(var: Variable, body: Formula) -> Formula {
        Formula::Quantified(Quantifier::Forall, var, Box::new(body))
    }

    pub fn exists(var: Variable, body: Formula) -> Formula {
        Formula::Quantified(Quantifier::Exists, var, Box::new(body))
    }

    /// Get all free variables in the formula
    pub fn free_variables(&self) -> HashSet<Variable> {
        match self {
            Formula::Atom(atom) => {
                let mut vars = HashSet::new();
                atom.collect_variables(&mut vars);
                vars
            }
            Formula::Not(f) => f.free_variables(),
            Formula::And(f1, f2) | Formula::Or(f1, f2) | Formula::Implies(f1, f2) => {
                let mut vars = f1.free_variables();
                vars.extend(f2.free_variables());
                vars
            }
            Formula::Quantified(_, var, f) => {
                let mut vars = f.free_variables();
                vars.remove(var);
                vars
            }
        }
    }

    /// Every variable name in the formula, free or bound
    pub fn all_variables(&self) -> HashSet<Variable> {
        let mut vars = HashSet::new();
        self.collect_all_variables(&mut vars);
        vars
    }

    fn collect_all_variables(&self, vars: &mut HashSet<Variable>) {
        match self {
            Formula::Atom(atom) => atom.collect_variables(vars),
            Formula::Not(f) => f.collect_all_variables(vars),
            Formula::And(f1, f2) | Formula::Or(f1, f2) | Formula::Implies(f1, f2) => {
                f1.collect_all_variables(vars);
                f2.collect_all_variables(vars);
            }
            Formula::Quantified(_, var, f) => {
                vars.insert(var.clone());
                f.collect_all_variables(vars);
            }
        }
    }

    /// Names of constants and functions used in the formula
    pub fn symbol_names(&self) -> HashSet<String> {
        let mut names = HashSet::new();
        self.visit_atoms(&mut |atom| {
            for arg in &atom.args {
                arg.collect_symbols(&mut names);
            }
        });
        names
    }

    fn visit_atoms(&self, visit: &mut impl FnMut(&Atom)) {
        match self {
            Formula::Atom(atom) => visit(atom),
            Formula::Not(f) | Formula::Quantified(_, _, f) => f.visit_atoms(visit),
            Formula::And(f1, f2) | Formula::Or(f1, f2) | Formula::Implies(f1, f2) => {
                f1.visit_atoms(visit);
                f2.visit_atoms(visit);
            }
        }
    }

    pub fn is_quantifier_free(&self) -> bool {
        match self {
            Formula::Atom(_) => true,
            Formula::Not(f) => f.is_quantifier_free(),
            Formula::And(f1, f2) | Formula::Or(f1, f2) | Formula::Implies(f1, f2) => {
                f1.is_quantifier_free() && f2.is_quantifier_free()
            }
            Formula::Quantified(..) => false,
        }
    }

    /// An atom or a negated atom
    pub fn is_literal(&self) -> bool {
        match self {
            Formula::Atom(_) => true,
            Formula::Not(f) => matches!(**f, Formula::Atom(_)),
            _ => false,
        }
    }

    /// Conjunction of disjunctions of literals
    pub fn is_cnf(&self) -> bool {
        match self {
            Formula::And(f1, f2) => f1.is_cnf() && f2.is_cnf(),
            f => f.is_clause(),
        }
    }

    fn is_clause(&self) -> bool {
        match self {
            Formula::Or(f1, f2) => f1.is_clause() && f2.is_clause(),
            f => f.is_literal(),
        }
    }

    /// Replace free occurrences of `from` by the variable `to`.
    ///
    /// `to` must not be bound anywhere inside the formula.
    pub fn rename_free(self, from: &Variable, to: &Variable) -> Formula {
        match self {
            Formula::Atom(atom) => {
                let subst = Substitution::single(from.clone(), Term::Variable(to.clone()));
                Formula::Atom(atom.substitute(&subst))
            }
            Formula::Not(f) => Formula::not(f.rename_free(from, to)),
            Formula::And(f1, f2) => Formula::and(f1.rename_free(from, to), f2.rename_free(from, to)),
            Formula::Or(f1, f2) => Formula::or(f1.rename_free(from, to), f2.rename_free(from, to)),
            Formula::Implies(f1, f2) => {
                Formula::implies(f1.rename_free(from, to), f2.rename_free(from, to))
            }
            Formula::Quantified(q, var, body) if var == *from => Formula::Quantified(q, var, body),
            Formula::Quantified(q, var, body) => {
                Formula::Quantified(q, var, Box::new(body.rename_free(from, to)))
            }
        }
    }

    /// Apply a substitution to every atom, ignoring quantifier scopes.
    /// Meant for quantifier-free matrices.
    pub fn substitute_atoms(&self, subst: &Substitution) -> Formula {
        match self {
            Formula::Atom(atom) => Formula::Atom(atom.substitute(subst)),
            Formula::Not(f) => Formula::not(f.substitute_atoms(subst)),
            Formula::And(f1, f2) => Formula::and(f1.substitute_atoms(subst), f2.substitute_atoms(subst)),
            Formula::Or(f1, f2) => Formula::or(f1.substitute_atoms(subst), f2.substitute_atoms(subst)),
            Formula::Implies(f1, f2) => {
                Formula::implies(f1.substitute_atoms(subst), f2.substitute_atoms(subst))
            }
            Formula::Quantified(q, var, body) => {
                Formula::Quantified(*q, var.clone(), Box::new(body.substitute_atoms(subst)))
            }
        }
    }

    /// Binding strength used by the printer
    fn precedence(&self) -> u8 {
        match self {
            Formula::Implies(..) => 1,
            Formula::Or(..) => 2,
            Formula::And(..) => 3,
            Formula::Atom(_) | Formula::Not(_) | Formula::Quantified(..) => 4,
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Formula, min_precedence: u8) -> fmt::Result {
    if operand.precedence() < min_precedence {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

/// `->` associates to the right, `and`/`or` to the left; quantified
/// formulas are always parenthesised because their body extends rightwards.
impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Atom(atom) => write!(f, "{}", atom),
            Formula::Not(inner) => {
                write!(f, "~")?;
                write_operand(f, inner, 4)
            }
            Formula::And(l, r) => {
                write_operand(f, l, 3)?;
                write!(f, " and ")?;
                write_operand(f, r, 4)
            }
            Formula::Or(l, r) => {
                write_operand(f, l, 2)?;
                write!(f, " or ")?;
                write_operand(f, r, 3)
            }
            Formula::Implies(l, r) => {
                write_operand(f, l, 2)?;
                write!(f, " -> ")?;
                write_operand(f, r, 1)
            }
            Formula::Quantified(q, var, body) => write!(f, "({} {} . {})", q.symbol(), var, body),
        }
    }
}
