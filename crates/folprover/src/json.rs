//! JSON serialization types for proof data

use crate::fol::{Clause, Literal, Term};
use crate::prover::{Proof, ProofResult, ProverStats};
use serde::{Deserialize, Serialize};

/// JSON representation of a term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TermJson {
    Variable { name: String },
    Constant { name: String },
    Function { name: String, args: Vec<TermJson> },
}

impl TermJson {
    pub fn from_term(term: &Term) -> Self {
        match term {
            Term::Variable(v) => TermJson::Variable { name: v.name.clone() },
            Term::Constant(c) => TermJson::Constant { name: c.name.clone() },
            Term::Function(func, args) => TermJson::Function {
                name: func.name.clone(),
                args: args.iter().map(TermJson::from_term).collect(),
            },
        }
    }
}

/// JSON representation of a literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralJson {
    pub polarity: bool,
    pub predicate: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub args: Vec<TermJson>,
}

impl LiteralJson {
    pub fn from_literal(lit: &Literal) -> Self {
        LiteralJson {
            polarity: lit.polarity,
            predicate: lit.atom.predicate.name.clone(),
            args: lit.atom.args.iter().map(TermJson::from_term).collect(),
        }
    }
}

/// JSON representation of a clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseJson {
    pub id: usize,
    /// Canonical text, as printed in traces
    pub text: String,
    pub literals: Vec<LiteralJson>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parents: Vec<usize>,
}

impl ClauseJson {
    pub fn from_clause(clause: &Clause) -> Self {
        ClauseJson {
            id: clause.id,
            text: clause.to_string(),
            literals: clause.literals().iter().map(LiteralJson::from_literal).collect(),
            parents: clause.ancestors().iter().map(|p| p.id).collect(),
        }
    }
}

/// JSON representation of a proof
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofJson {
    pub steps: Vec<ClauseJson>,
    pub empty_clause_id: usize,
    pub useless_clauses: usize,
}

impl ProofJson {
    pub fn from_proof(proof: &Proof) -> Self {
        ProofJson {
            steps: proof.steps().map(ClauseJson::from_clause).collect(),
            empty_clause_id: proof.refutation().id,
            useless_clauses: proof.useless_clauses(),
        }
    }
}

/// JSON representation of a search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ProofResultJson {
    Proof {
        proof: ProofJson,
        iterations: usize,
        time_ms: f64,
    },
    Saturated {
        iterations: usize,
        time_ms: f64,
    },
    ResourceLimit {
        reason: String,
        iterations: usize,
        time_ms: f64,
    },
}

impl ProofResultJson {
    pub fn from_result(result: &ProofResult, stats: &ProverStats, time_ms: f64) -> Self {
        let iterations = stats.iterations;
        match result {
            ProofResult::Proof(empty) => ProofResultJson::Proof {
                proof: ProofJson::from_proof(&Proof::from_refutation(empty)),
                iterations,
                time_ms,
            },
            ProofResult::Saturated => ProofResultJson::Saturated { iterations, time_ms },
            ProofResult::ResourceLimit(limit) => ProofResultJson::ResourceLimit {
                reason: limit.to_string(),
                iterations,
                time_ms,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fol::Atom;
    use crate::prover::Limit;

    #[test]
    fn test_term_json_is_tagged() {
        let term = Term::function("fF", vec![Term::var("vx"), Term::constant("cA")]);
        let value = serde_json::to_value(TermJson::from_term(&term)).unwrap();
        assert_eq!(value["type"], "Function");
        assert_eq!(value["name"], "fF");
        assert_eq!(value["args"][0]["type"], "Variable");
        assert_eq!(value["args"][1]["name"], "cA");
    }

    #[test]
    fn test_clause_json() {
        let clause = Clause::new(
            7,
            vec![
                Literal::negative(Atom::new("pHuman", vec![Term::var("vx")])),
                Literal::positive(Atom::new("pRain", vec![])),
            ],
        );
        let json = ClauseJson::from_clause(&clause);
        assert_eq!(json.text, "pRain or ~pHuman(vx)");

        let value = serde_json::to_value(&json).unwrap();
        assert_eq!(value["id"], 7);
        assert!(value.get("parents").is_none());
        assert!(value["literals"][0].get("args").is_none());
        assert_eq!(value["literals"][1]["polarity"], false);

        let back: ClauseJson = serde_json::from_value(value).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn test_result_tag() {
        let stats = ProverStats {
            iterations: 3,
            ..ProverStats::default()
        };
        let json = ProofResultJson::from_result(&ProofResult::ResourceLimit(Limit::Timeout), &stats, 1.5);
        let value = serde_json::to_value(json).unwrap();
        assert_eq!(value["result"], "resource_limit");
        assert_eq!(value["reason"], "timeout");
        assert_eq!(value["iterations"], 3);
    }
}
