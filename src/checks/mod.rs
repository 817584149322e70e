//! Requirement checks and composition scoring.
//!
//! The evaluator runs a fixed rule set over a team's non-null picks and
//! reports, per check, whether it is satisfied and whether the caller marked
//! it required. The scorer turns an evaluation into a single integer that
//! ranks compositions: any unmet required check pushes the score below
//! every composition with zero required gaps.
//!
//! # Key Components
//!
//! - [`CheckName`]: the seven composition checks
//! - [`RequirementToggles`]: which checks are required
//! - [`evaluate_composition_checks`]: team state → [`CheckEvaluation`]
//! - [`score_node_from_checks`]: evaluation → composition score
//! - [`candidate_score`]: local value of a single prospective pick

mod evaluator;
mod scorer;
mod types;

pub use evaluator::evaluate_composition_checks;
pub use scorer::{candidate_score, score_node_from_checks, ScoreWeights};
pub use types::{CheckEvaluation, CheckName, CheckResult, MissingNeeds, RequirementToggles};
