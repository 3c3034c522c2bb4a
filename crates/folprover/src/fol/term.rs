//! Terms in first-order logic

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A variable in first-order logic
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
}

/// A constant symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
}

/// A function symbol with arity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FunctionSymbol {
    pub name: String,
    pub arity: usize,
}

/// A term in first-order logic
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    Variable(Variable),
    Constant(Constant),
    Function(FunctionSymbol, Vec<Term>),
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable { name: name.into() }
    }
}

impl Constant {
    pub fn new(name: impl Into<String>) -> Self {
        Constant { name: name.into() }
    }
}

impl FunctionSymbol {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        FunctionSymbol {
            name: name.into(),
            arity,
        }
    }
}

impl Term {
    /// Build a variable term
    pub fn var(name: impl Into<String>) -> Self {
        Term::Variable(Variable::new(name))
    }

    /// Build a constant term
    pub fn constant(name: impl Into<String>) -> Self {
        Term::Constant(Constant::new(name))
    }

    /// Build a function application; the arity is taken from `args`
    pub fn function(name: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Function(FunctionSymbol::new(name, args.len()), args)
    }

    /// Get all variables in this term, in order of first occurrence
    pub fn variables(&self) -> Vec<Variable> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        self.walk_variables(&mut |v| {
            if seen.insert(v.clone()) {
                out.push(v.clone());
            }
        });
        out
    }

    /// Collect all variables in this term
    pub fn collect_variables(&self, vars: &mut HashSet<Variable>) {
        self.walk_variables(&mut |v| {
            vars.insert(v.clone());
        });
    }

    fn walk_variables(&self, visit: &mut impl FnMut(&Variable)) {
        match self {
            Term::Variable(v) => visit(v),
            Term::Constant(_) => {}
            Term::Function(_, args) => {
                for arg in args {
                    arg.walk_variables(visit);
                }
            }
        }
    }

    /// Check whether `var` occurs anywhere inside this term
    pub fn contains_variable(&self, var: &Variable) -> bool {
        match self {
            Term::Variable(v) => v == var,
            Term::Constant(_) => false,
            Term::Function(_, args) => args.iter().any(|arg| arg.contains_variable(var)),
        }
    }

    /// Collect constant and function names (used to keep Skolem symbols fresh)
    pub fn collect_symbols(&self, names: &mut HashSet<String>) {
        match self {
            Term::Variable(_) => {}
            Term::Constant(c) => {
                names.insert(c.name.clone());
            }
            Term::Function(f, args) => {
                names.insert(f.name.clone());
                for arg in args {
                    arg.collect_symbols(names);
                }
            }
        }
    }
}

// Display implementations for pretty printing

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Constant(c) => write!(f, "{}", c),
            Term::Function(func, args) => {
                write!(f, "{}(", func.name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nested() {
        let t = Term::function(
            "fF",
            vec![Term::var("vx"), Term::function("fG", vec![Term::constant("cA")])],
        );
        assert_eq!(t.to_string(), "fF(vx, fG(cA))");
    }

    #[test]
    fn test_variables_in_order_without_duplicates() {
        let t = Term::function("fF", vec![Term::var("vy"), Term::var("vx"), Term::var("vy")]);
        let names: Vec<_> = t.variables().into_iter().map(|v| v.name).collect();
        assert_eq!(names, vec!["vy", "vx"]);
    }

    #[test]
    fn test_contains_variable() {
        let x = Variable::new("vx");
        assert!(Term::function("fF", vec![Term::var("vx")]).contains_variable(&x));
        assert!(!Term::constant("cA").contains_variable(&x));
    }
}
