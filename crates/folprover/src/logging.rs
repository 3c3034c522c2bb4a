//! Log targets used across the prover.
//!
//! Records go through the `log` facade, so a binary chooses the backend and
//! filters per target (e.g. `RUST_LOG=unify=trace`).

pub mod targets {
    /// CNF conversion and Skolemization.
    pub const NORMALIZE: &str = "normalize";

    /// Unifier calls.
    pub const UNIFY: &str = "unify";

    /// Resolvents built by the prover.
    pub const RESOLUTION: &str = "resolution";

    /// Clauses rejected or struck out as redundant.
    pub const SUBSUMPTION: &str = "subsumption";

    /// The given-clause loop.
    pub const SEARCH: &str = "search";
}
