//! Prover configuration types.

use std::time::Duration;

/// Budget for the saturation loop, checked once per iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProverConfig {
    pub max_iterations: usize,
    /// Largest passive store before giving up
    pub max_passive: usize,
    pub timeout: Option<Duration>,
}

impl ProverConfig {
    /// No budget at all; the loop only stops on a proof or saturation
    pub fn unlimited() -> Self {
        ProverConfig {
            max_iterations: 0,
            max_passive: 0,
            timeout: None,
        }
    }
}

impl Default for ProverConfig {
    fn default() -> Self {
        ProverConfig {
            max_iterations: 10_000, // 0 means no limit
            max_passive: 0,         // 0 means no limit
            timeout: Some(Duration::from_secs(60)),
        }
    }
}
