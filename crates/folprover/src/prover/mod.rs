//! Prover: resolution refutation with the given clause loop.
//!
//! Each step takes the next passive clause, resolves it against every
//! active clause and moves it to the active store. Resolvents that the
//! active store does not already cover go back to passive. Deriving the
//! empty clause ends the search with a proof; an empty passive store ends
//! it without one.
//!
//! Use `prove()` or `run()` to go to completion, or `step()` for
//! incremental execution.

mod problem;
mod proof;

pub use problem::Problem;
pub use proof::{Proof, VerificationError};

use crate::config::ProverConfig;
use crate::fol::{Clause, ClauseIds};
use crate::logging::targets;
use crate::selection::ClauseStore;
use crate::unification::Unifier;
use std::fmt;
use std::time::Instant;

/// Budget that stopped the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Iterations,
    Timeout,
    PassiveSize,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Iterations => write!(f, "iteration limit"),
            Limit::Timeout => write!(f, "timeout"),
            Limit::PassiveSize => write!(f, "passive store limit"),
        }
    }
}

/// Outcome of a proof search
#[derive(Debug, Clone)]
pub enum ProofResult {
    /// The empty clause, with its derivation in the ancestors
    Proof(Clause),
    /// Passive store ran out without a contradiction
    Saturated,
    /// Search stopped by the budget
    ResourceLimit(Limit),
}

impl ProofResult {
    pub fn is_proof(&self) -> bool {
        matches!(self, ProofResult::Proof(_))
    }

    pub fn into_refutation(self) -> Option<Clause> {
        match self {
            ProofResult::Proof(clause) => Some(clause),
            _ => None,
        }
    }
}

/// Counters for one proof attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProverStats {
    /// Given clauses processed
    pub iterations: usize,
    /// Resolvents produced
    pub generated: usize,
    /// Resolvents handed to the passive store
    pub kept: usize,
}

/// Per-problem saturation engine.
pub struct Prover {
    config: ProverConfig,
    unifier: Box<dyn Unifier>,
    passive: Box<dyn ClauseStore>,
    active: Box<dyn ClauseStore>,
    ids: ClauseIds,
    stats: ProverStats,
    start_time: Option<Instant>,
}

impl Prover {
    /// Create a prover over already seeded stores.
    ///
    /// `ids` must be the generator that numbered the input clauses, so
    /// resolvents continue the numbering.
    pub fn new(
        unifier: Box<dyn Unifier>,
        passive: Box<dyn ClauseStore>,
        active: Box<dyn ClauseStore>,
        ids: ClauseIds,
        config: ProverConfig,
    ) -> Self {
        Prover {
            config,
            unifier,
            passive,
            active,
            ids,
            stats: ProverStats::default(),
            start_time: None,
        }
    }

    pub fn stats(&self) -> ProverStats {
        self.stats
    }

    pub fn passive(&self) -> &dyn ClauseStore {
        self.passive.as_ref()
    }

    pub fn active(&self) -> &dyn ClauseStore {
        self.active.as_ref()
    }

    /// Run until a proof, saturation or the budget.
    pub fn run(&mut self) -> ProofResult {
        log::info!(
            target: targets::SEARCH,
            "starting search: {} unifier, {} passive / {} active clauses ({} / {})",
            self.unifier.name(),
            self.passive.len(),
            self.active.len(),
            self.passive.name(),
            self.active.name()
        );

        let result = loop {
            if let Some(result) = self.step() {
                break result;
            }
        };

        log::info!(
            target: targets::SEARCH,
            "search finished after {} iterations ({} generated, {} kept): {}",
            self.stats.iterations,
            self.stats.generated,
            self.stats.kept,
            match &result {
                ProofResult::Proof(_) => "proof found".to_string(),
                ProofResult::Saturated => "saturated".to_string(),
                ProofResult::ResourceLimit(limit) => limit.to_string(),
            }
        );
        result
    }

    /// The empty clause if a refutation was found. Saturation and an
    /// exhausted budget both give `None`.
    pub fn prove(&mut self) -> Option<Clause> {
        self.run().into_refutation()
    }

    fn exceeded_limit(&self, start: Instant) -> Option<Limit> {
        if self.config.max_iterations > 0 && self.stats.iterations >= self.config.max_iterations {
            return Some(Limit::Iterations);
        }
        if self.config.max_passive > 0 && self.passive.len() > self.config.max_passive {
            return Some(Limit::PassiveSize);
        }
        if let Some(timeout) = self.config.timeout {
            if start.elapsed() >= timeout {
                return Some(Limit::Timeout);
            }
        }
        None
    }

    /// Execute one iteration of the loop.
    ///
    /// Returns `Some(result)` when the search is over, `None` to continue.
    pub fn step(&mut self) -> Option<ProofResult> {
        let start = *self.start_time.get_or_insert_with(Instant::now);
        if let Some(limit) = self.exceeded_limit(start) {
            return Some(ProofResult::ResourceLimit(limit));
        }

        let Some(given) = self.passive.next_clause() else {
            return Some(ProofResult::Saturated);
        };
        self.stats.iterations += 1;
        log::info!(target: targets::SEARCH, "given clause: [{}] {}", given.id, given);

        let resolvents = self.active.infer(&given, self.unifier.as_ref(), &mut self.ids);
        self.stats.generated += resolvents.len();
        self.active.add_clause(given);

        for resolvent in &resolvents {
            log::info!(target: targets::RESOLUTION, "{}", resolution_trace(resolvent));
        }

        if let Some(empty) = resolvents.iter().find(|c| c.is_empty()) {
            return Some(ProofResult::Proof(empty.clone()));
        }

        for resolvent in resolvents {
            if !self.active.is_redundant(&resolvent) {
                self.stats.kept += 1;
                self.passive.add_clause(resolvent);
            }
        }
        None
    }
}

/// `[p1] C1 RESOLVE [p2] C2 >>> [id] R` for a resolvent and its parents
fn resolution_trace(resolvent: &Clause) -> String {
    let parents: Vec<String> = resolvent
        .ancestors()
        .iter()
        .map(|parent| format!("[{}] {}", parent.id, parent))
        .collect();
    format!("{} >>> [{}] {}", parents.join(" RESOLVE "), resolvent.id, resolvent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fol::{Atom, ClauseRole, Literal, Term};
    use crate::selection::{FifoStore, StoragePolicy};
    use crate::unification::{Robinson, UnifierKind};
    use std::time::Duration;

    fn lit(pred: &str, arg: Term, positive: bool) -> Literal {
        let atom = Atom::new(pred, vec![arg]);
        if positive {
            Literal::positive(atom)
        } else {
            Literal::negative(atom)
        }
    }

    /// ~pHuman(vx) or pMortal(vx), pHuman(cS), ~pMortal(cS)
    fn socrates(ids: &mut ClauseIds) -> (Vec<Clause>, Vec<Clause>) {
        let axioms = vec![
            Clause::new(
                ids.fresh(),
                vec![lit("pHuman", Term::var("vx"), false), lit("pMortal", Term::var("vx"), true)],
            ),
            Clause::new(ids.fresh(), vec![lit("pHuman", Term::constant("cS"), true)]),
        ];
        let hypothesis = vec![Clause::new(ids.fresh(), vec![lit("pMortal", Term::constant("cS"), false)])
            .with_role(ClauseRole::NegatedConjecture)];
        (axioms, hypothesis)
    }

    #[test]
    fn test_finds_refutation() {
        let mut ids = ClauseIds::new();
        let (axioms, hypothesis) = socrates(&mut ids);
        let (passive, active) = StoragePolicy::Basic.build(axioms, hypothesis, UnifierKind::Robinson);
        let mut prover = Prover::new(Box::new(Robinson), passive, active, ids, ProverConfig::default());

        let result = prover.run();
        match result {
            ProofResult::Proof(ref empty) => {
                assert!(empty.is_empty());
                assert_eq!(empty.ancestors().len(), 2);
                assert_eq!(empty.role, ClauseRole::Derived);
            }
            _ => panic!("Expected proof, got {:?}", result),
        }
        assert!(prover.stats().iterations >= 1);
        assert!(prover.stats().generated >= 1);
    }

    #[test]
    fn test_saturates_without_proof() {
        let mut ids = ClauseIds::new();
        let axioms = vec![Clause::new(ids.fresh(), vec![lit("pP", Term::constant("cA"), true)])];
        let hypothesis = vec![Clause::new(ids.fresh(), vec![lit("pQ", Term::constant("cA"), false)])];
        let (passive, active) = StoragePolicy::Basic.build(axioms, hypothesis, UnifierKind::Robinson);
        let mut prover = Prover::new(Box::new(Robinson), passive, active, ids, ProverConfig::default());

        assert!(matches!(prover.run(), ProofResult::Saturated));
        assert_eq!(prover.stats().iterations, 2);
        assert_eq!(prover.active().len(), 2);
        assert!(prover.passive().is_empty());
    }

    #[test]
    fn test_empty_input_saturates() {
        let mut prover = Prover::new(
            Box::new(Robinson),
            Box::new(FifoStore::new()),
            Box::new(FifoStore::new()),
            ClauseIds::new(),
            ProverConfig::default(),
        );
        assert!(prover.prove().is_none());
    }

    /// pNat(vx) -> pNat(fS(vx)) never saturates
    fn naturals(config: ProverConfig) -> Prover {
        let mut ids = ClauseIds::new();
        let axioms = vec![
            Clause::new(ids.fresh(), vec![lit("pNat", Term::constant("cZ"), true)]),
            Clause::new(
                ids.fresh(),
                vec![
                    lit("pNat", Term::var("vx"), false),
                    lit("pNat", Term::function("fS", vec![Term::var("vx")]), true),
                ],
            ),
        ];
        let hypothesis = vec![Clause::new(ids.fresh(), vec![lit("pQ", Term::constant("cZ"), false)])];
        let (passive, active) = StoragePolicy::Basic.build(axioms, hypothesis, UnifierKind::Robinson);
        Prover::new(Box::new(Robinson), passive, active, ids, config)
    }

    #[test]
    fn test_iteration_limit() {
        let mut prover = naturals(ProverConfig {
            max_iterations: 25,
            ..ProverConfig::unlimited()
        });
        assert!(matches!(prover.run(), ProofResult::ResourceLimit(Limit::Iterations)));
        assert_eq!(prover.stats().iterations, 25);
    }

    #[test]
    fn test_resolution_trace() {
        let mut ids = ClauseIds::new();
        let (axioms, _) = socrates(&mut ids);
        let resolvent = Robinson.resolution(&axioms[0], &axioms[1], &mut ids).unwrap();
        assert_eq!(
            resolution_trace(&resolvent),
            "[1] pMortal(vx) or ~pHuman(vx) RESOLVE [2] pHuman(cS) >>> [4] pMortal(cS)"
        );
    }

    #[test]
    fn test_passive_limit() {
        // three input clauses start out in passive
        let mut prover = naturals(ProverConfig {
            max_passive: 2,
            ..ProverConfig::unlimited()
        });
        assert!(matches!(prover.run(), ProofResult::ResourceLimit(Limit::PassiveSize)));
        assert_eq!(prover.stats().iterations, 0);
        assert_eq!(prover.passive().len(), 3);
    }

    #[test]
    fn test_timeout() {
        let mut prover = naturals(ProverConfig {
            timeout: Some(Duration::ZERO),
            ..ProverConfig::unlimited()
        });
        assert!(matches!(prover.run(), ProofResult::ResourceLimit(Limit::Timeout)));
        assert_eq!(Limit::Timeout.to_string(), "timeout");
    }

    #[test]
    fn test_step_by_step() {
        let mut ids = ClauseIds::new();
        let (axioms, hypothesis) = socrates(&mut ids);
        let (passive, active) = StoragePolicy::Support.build(axioms, hypothesis, UnifierKind::Robinson);
        let mut prover = Prover::new(Box::new(Robinson), passive, active, ids, ProverConfig::default());

        // ~pMortal(cS) against the axioms gives ~pHuman(cS)
        assert!(prover.step().is_none());
        assert_eq!(prover.passive().len(), 1);
        let result = prover.step();
        assert!(matches!(result, Some(ProofResult::Proof(_))));
    }
}
