//! Candidate generation.
//!
//! Pools are supplied by the host: either a team-scoped pool keyed by team
//! id, or the global pool derived from the catalog. The generator subtracts
//! exclusions and champions already on the team; ranking is left to the
//! tree builder.

mod generator;
mod pool;

pub use generator::{available_by_role, generate_candidates};
pub use pool::{resolve_pool, CandidatePool, TeamPools};
