//! Turning axioms and a hypothesis into the input clauses of a refutation

use super::Prover;
use crate::config::ProverConfig;
use crate::error::{FolError, Result};
use crate::fol::{Clause, ClauseIds, ClauseRole};
use crate::logging::targets;
use crate::parser::{normalize, Formula, NormalizedFormula, SymbolGenerator};
use crate::selection::StoragePolicy;
use crate::unification::{Unifier, UnifierKind};

/// Input clauses of one proof attempt.
///
/// Axioms are clausified as given; the hypothesis is negated first, so a
/// refutation of all clauses proves the hypothesis from the axioms. Fresh
/// names and clause ids come from state owned by the problem, so separate
/// problems never influence each other.
///
/// Skolem symbols must not coincide with user symbols of any formula of
/// the problem. [`Problem::from_formulas`] reserves all of them up front.
/// When formulas are added one by one, call [`Problem::reserve`] on all of
/// them first; a formula that uses an already generated Skolem symbol is
/// rejected.
#[derive(Debug, Default)]
pub struct Problem {
    symbols: SymbolGenerator,
    ids: ClauseIds,
    axioms: Vec<Clause>,
    hypothesis: Vec<Clause>,
}

impl Problem {
    pub fn new() -> Self {
        Problem::default()
    }

    /// Build a problem from parsed formulas in one go
    pub fn from_formulas(
        axioms: impl IntoIterator<Item = Formula>,
        hypothesis: Formula,
        unifier: &dyn Unifier,
    ) -> Result<Self> {
        let axioms: Vec<Formula> = axioms.into_iter().collect();
        let mut problem = Problem::new();
        for formula in axioms.iter().chain(Some(&hypothesis)) {
            problem.reserve(formula);
        }
        for axiom in axioms {
            problem.add_axiom(axiom, unifier)?;
        }
        problem.add_hypothesis(hypothesis, unifier)?;
        Ok(problem)
    }

    /// Keep the constants and functions of `formula` out of the Skolem
    /// symbols generated later
    pub fn reserve(&mut self, formula: &Formula) {
        self.symbols.reserve(formula.symbol_names());
    }

    /// Clausify an axiom. Returns the Skolemized prenex form the clauses
    /// were read from.
    pub fn add_axiom(&mut self, formula: Formula, unifier: &dyn Unifier) -> Result<NormalizedFormula> {
        let (normalized, clauses) = self.clausify(formula, ClauseRole::Axiom, unifier)?;
        self.axioms.extend(clauses);
        Ok(normalized)
    }

    /// Negate and clausify a hypothesis. Calling this twice adds the
    /// clauses of both negations.
    pub fn add_hypothesis(&mut self, formula: Formula, unifier: &dyn Unifier) -> Result<NormalizedFormula> {
        let (normalized, clauses) =
            self.clausify(Formula::not(formula), ClauseRole::NegatedConjecture, unifier)?;
        self.hypothesis.extend(clauses);
        Ok(normalized)
    }

    fn clausify(
        &mut self,
        formula: Formula,
        role: ClauseRole,
        unifier: &dyn Unifier,
    ) -> Result<(NormalizedFormula, Vec<Clause>)> {
        let names = formula.symbol_names();
        if let Some(name) = names.iter().find(|name| self.symbols.is_skolem(name)) {
            return Err(FolError::SkolemClash(name.clone()));
        }
        self.symbols.reserve(names);

        let mut normalized = normalize(formula, &mut self.symbols);
        normalized.skolemize(&mut self.symbols);

        let clauses = normalized
            .clone()
            .into_clauses(role, &mut self.symbols, &mut self.ids)?
            .iter()
            .map(|clause| unifier.simplify(clause))
            .collect::<Vec<_>>();

        for clause in &clauses {
            log::debug!(target: targets::NORMALIZE, "input clause [{}] {}", clause.id, clause);
        }
        Ok((normalized, clauses))
    }

    pub fn axioms(&self) -> &[Clause] {
        &self.axioms
    }

    /// Clauses of the negated hypothesis
    pub fn hypothesis(&self) -> &[Clause] {
        &self.hypothesis
    }

    /// Axiom clauses followed by hypothesis clauses
    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.axioms.iter().chain(&self.hypothesis)
    }

    /// Seed the stores of `policy` and hand everything to a prover
    pub fn into_prover(self, policy: StoragePolicy, unifier: UnifierKind, config: ProverConfig) -> Prover {
        let (passive, active) = policy.build(self.axioms, self.hypothesis, unifier);
        Prover::new(unifier.build(), passive, active, self.ids, config)
    }
}
