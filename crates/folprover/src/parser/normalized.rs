//! Prenex CNF formulas, Skolemization and clause extraction

use super::cnf_conversion::SymbolGenerator;
use super::fof::{Formula, Quantifier};
use crate::error::{FolError, Result};
use crate::fol::{Clause, ClauseIds, ClauseRole, Literal, Substitution, Term, Variable};
use crate::logging::targets;
use std::fmt;

/// A quantifier prefix over a quantifier-free matrix in CNF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFormula {
    pub prefix: Vec<(Quantifier, Variable)>,
    pub matrix: Formula,
}

impl NormalizedFormula {
    pub fn is_skolemized(&self) -> bool {
        self.prefix.iter().all(|(q, _)| *q == Quantifier::Forall)
    }

    /// Replace each existential variable by a Skolem term over the
    /// universal variables to its left in the prefix, and drop it from the
    /// prefix. Without preceding universals the Skolem term is a constant.
    pub fn skolemize(&mut self, symbols: &mut SymbolGenerator) {
        if self.is_skolemized() {
            return;
        }

        let mut taken = self.matrix.symbol_names();
        let mut universals: Vec<Variable> = Vec::new();
        let mut skolem = Substitution::new();

        for (quantifier, var) in std::mem::take(&mut self.prefix) {
            match quantifier {
                Quantifier::Forall => {
                    universals.push(var.clone());
                    self.prefix.push((quantifier, var));
                }
                Quantifier::Exists => {
                    let name = symbols.skolem_symbol(universals.len(), &taken);
                    taken.insert(name.clone());
                    let term = if universals.is_empty() {
                        Term::constant(name)
                    } else {
                        Term::function(name, universals.iter().cloned().map(Term::Variable).collect())
                    };
                    log::debug!(target: targets::NORMALIZE, "skolemizing {} as {}", var, term);
                    skolem.insert(var, term);
                }
            }
        }

        self.matrix = self.matrix.substitute_atoms(&skolem);
    }

    /// Skolemize if needed and turn each conjunct of the matrix into a
    /// clause with a fresh id
    pub fn into_clauses(
        mut self,
        role: ClauseRole,
        symbols: &mut SymbolGenerator,
        ids: &mut ClauseIds,
    ) -> Result<Vec<Clause>> {
        self.skolemize(symbols);

        let mut conjuncts = Vec::new();
        split_conjunction(self.matrix, &mut conjuncts);

        let mut clauses = Vec::with_capacity(conjuncts.len());
        for conjunct in conjuncts {
            let mut literals = Vec::new();
            collect_literals(conjunct, &mut literals)?;
            clauses.push(Clause::new(ids.fresh(), literals).with_role(role));
        }
        Ok(clauses)
    }
}

fn split_conjunction(formula: Formula, out: &mut Vec<Formula>) {
    match formula {
        Formula::And(l, r) => {
            split_conjunction(*l, out);
            split_conjunction(*r, out);
        }
        other => out.push(other),
    }
}

fn collect_literals(formula: Formula, out: &mut Vec<Literal>) -> Result<()> {
    match formula {
        Formula::Or(l, r) => {
            collect_literals(*l, out)?;
            collect_literals(*r, out)
        }
        Formula::Atom(atom) => {
            out.push(Literal::positive(atom));
            Ok(())
        }
        Formula::Not(inner) => match *inner {
            Formula::Atom(atom) => {
                out.push(Literal::negative(atom));
                Ok(())
            }
            other => Err(FolError::Normalize(format!("~({}) is not a literal", other))),
        },
        other => Err(FolError::Normalize(format!("{} is not a disjunction of literals", other))),
    }
}

impl fmt::Display for NormalizedFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (quantifier, var) in &self.prefix {
            write!(f, "{} {} . ", quantifier.symbol(), var)?;
        }
        write!(f, "{}", self.matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{normalize, parse_formula};

    fn normalized(input: &str, symbols: &mut SymbolGenerator) -> NormalizedFormula {
        normalize(parse_formula(input).unwrap(), symbols)
    }

    fn skolem_terms(formula: &Formula) -> Vec<Term> {
        let mut found = Vec::new();
        collect_skolem_terms(formula, &mut found);
        found
    }

    fn collect_skolem_terms(formula: &Formula, out: &mut Vec<Term>) {
        match formula {
            Formula::Atom(atom) => {
                for arg in &atom.args {
                    if let Term::Function(f, _) = arg {
                        if f.name.starts_with("fsk") {
                            out.push(arg.clone());
                        }
                    }
                    if let Term::Constant(c) = arg {
                        if c.name.starts_with("csk") {
                            out.push(arg.clone());
                        }
                    }
                }
            }
            Formula::Not(f) | Formula::Quantified(_, _, f) => collect_skolem_terms(f, out),
            Formula::And(l, r) | Formula::Or(l, r) | Formula::Implies(l, r) => {
                collect_skolem_terms(l, out);
                collect_skolem_terms(r, out);
            }
        }
    }

    #[test]
    fn test_skolem_arguments_are_preceding_universals() {
        let mut symbols = SymbolGenerator::new();
        let mut nf = normalized("@ vx . ? vy . @ vz . ? vw . pP(vx, vy, vz, vw)", &mut symbols);
        nf.skolemize(&mut symbols);

        assert!(nf.is_skolemized());
        assert_eq!(nf.to_string(), "@ vx . @ vz . pP(vx, fsk1(vx), vz, fsk2(vx, vz))");
        assert_eq!(skolem_terms(&nf.matrix).len(), 2);
    }

    #[test]
    fn test_leading_existential_becomes_constant() {
        let mut symbols = SymbolGenerator::new();
        let mut nf = normalized("? vy . @ vx . pL(vx, vy)", &mut symbols);
        nf.skolemize(&mut symbols);
        assert_eq!(nf.to_string(), "@ vx . pL(vx, csk1)");
    }

    #[test]
    fn test_skolem_names_avoid_user_symbols() {
        let mut symbols = SymbolGenerator::new();
        let mut nf = normalized("? vy . pL(csk1, vy)", &mut symbols);
        nf.skolemize(&mut symbols);
        assert_eq!(nf.to_string(), "pL(csk1, csk2)");
    }

    #[test]
    fn test_generator_is_shared_between_formulas() {
        let mut symbols = SymbolGenerator::new();
        let mut first = normalized("? vx . pP(vx)", &mut symbols);
        let mut second = normalized("? vx . pQ(vx)", &mut symbols);
        first.skolemize(&mut symbols);
        second.skolemize(&mut symbols);
        assert_eq!(first.to_string(), "pP(csk1)");
        assert_eq!(second.to_string(), "pQ(csk2)");
    }

    #[test]
    fn test_clauses_split_on_conjunction() {
        let mut symbols = SymbolGenerator::new();
        let mut ids = ClauseIds::new();
        let nf = normalized("@ vx . pA(vx) -> pB(vx) and pC(vx)", &mut symbols);
        let clauses = nf
            .into_clauses(ClauseRole::NegatedConjecture, &mut symbols, &mut ids)
            .unwrap();
        let text: Vec<String> = clauses.iter().map(|c| c.to_string()).collect();
        assert_eq!(text, vec!["pB(vx) or ~pA(vx)", "pC(vx) or ~pA(vx)"]);
        assert_eq!(clauses[1].id, 2);
        assert!(clauses.iter().all(|c| c.role == ClauseRole::NegatedConjecture));
    }

    #[test]
    fn test_single_three_literal_clause() {
        let mut symbols = SymbolGenerator::new();
        let mut ids = ClauseIds::new();
        let clauses = normalized("pP1(vx) or pP2(vx) or pP3(vx)", &mut symbols)
            .into_clauses(ClauseRole::Axiom, &mut symbols, &mut ids)
            .unwrap();
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].len(), 3);
    }

    #[test]
    fn test_non_cnf_matrix_is_rejected() {
        let mut symbols = SymbolGenerator::new();
        let mut ids = ClauseIds::new();
        let nf = NormalizedFormula {
            prefix: Vec::new(),
            matrix: parse_formula("pA or (pB and pC)").unwrap(),
        };
        assert!(matches!(
            nf.into_clauses(ClauseRole::Axiom, &mut symbols, &mut ids),
            Err(FolError::Normalize(_))
        ));
    }
}
