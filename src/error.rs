//! Error types for the draft composition engine.
//!
//! Only malformed input is an error. Every "cannot proceed" situation found
//! during search (empty pools, score floors, unreachable requirements) is
//! reported as an ordinary leaf node instead.

use thiserror::Error;

/// Validation failures raised before any search work is done.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DraftError {
    #[error("unknown slot name '{name}' (expected one of: Top, Jungle, Mid, ADC, Support)")]
    UnknownSlot { name: String },

    #[error("champion '{champion}' appears in both {first} and {second}")]
    DuplicateChampion {
        champion: String,
        first: String,
        second: String,
    },

    #[error("slot {slot} given both '{first}' and '{second}'")]
    ConflictingPick {
        slot: String,
        first: String,
        second: String,
    },

    #[error("slot {slot} is listed more than once in the role order")]
    DuplicateRole { slot: String },

    #[error("champion '{name}' referenced by {context} is not in the catalog")]
    UnknownChampion { name: String, context: String },

    #[error("no candidate pool registered for team '{team_id}'")]
    UnknownTeam { team_id: String },

    #[error("{name} must be positive, got {value}")]
    InvalidLimit { name: String, value: usize },

    #[error("relative_score_window must be non-negative, got {value}")]
    NegativeWindow { value: i64 },

    #[error("unknown rank goal '{name}' (expected candidate_score or valid_end_states)")]
    UnknownRankGoal { name: String },

    #[error("weight for {check} must be non-negative and keep scores within i64, got {value}")]
    InvalidWeight { check: String, value: i64 },
}

/// Convenience alias for results carrying a [`DraftError`].
pub type Result<T> = std::result::Result<T, DraftError>;
