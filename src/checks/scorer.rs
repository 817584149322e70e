//! Composition and candidate scoring.
//!
//! # Formula
//!
//! ```text
//! value(c)  = weight(c) + (required(c) ? required_bonus : 0)
//! earned    = Σ value(c) over satisfied checks
//! ceiling   = Σ (weight(c) + required_bonus) over all checks
//! penalty   = max(required_gap_penalty, ceiling + 1)
//! score     = earned − required_gaps × penalty
//! ```
//!
//! With non-negative weights a composition with no required gaps scores at
//! least 0 and any composition with a gap scores below 0, so the score
//! ranks whole compositions and prospective picks alike.

use std::collections::BTreeMap;

use super::types::{CheckEvaluation, CheckName};
use crate::error::{DraftError, Result};

/// Per-check weights and requirement multipliers.
///
/// # Examples
///
/// ```
/// use draft_compose::checks::{CheckName, ScoreWeights};
///
/// let weights = ScoreWeights::default()
///     .with_weight(CheckName::HasAntiTank, 5)
///     .with_required_bonus(1);
/// assert_eq!(weights.weight(CheckName::HasAntiTank), 5);
/// assert!(weights.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreWeights {
    /// Weight of each check. Checks absent from the map weigh 0.
    pub check_weights: BTreeMap<CheckName, i64>,
    /// Added to a satisfied check's weight when the check is required.
    pub required_bonus: i64,
    /// Multiplies a required check's weight in candidate scores.
    pub required_multiplier: i64,
    /// Penalty per unmet required check. Raised automatically so that a
    /// single gap always outweighs every satisfied check.
    pub required_gap_penalty: i64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        let check_weights = [
            (CheckName::HasHardEngage, 3),
            (CheckName::HasFrontline, 3),
            (CheckName::HasWaveclear, 2),
            (CheckName::HasDisengage, 2),
            (CheckName::HasAntiTank, 2),
            (CheckName::DamageMix, 3),
            (CheckName::TopMustBeThreat, 2),
        ]
        .into_iter()
        .collect();
        Self {
            check_weights,
            required_bonus: 2,
            required_multiplier: 2,
            required_gap_penalty: 100,
        }
    }
}

impl ScoreWeights {
    /// Sets the weight of one check.
    pub fn with_weight(mut self, check: CheckName, weight: i64) -> Self {
        self.check_weights.insert(check, weight);
        self
    }

    pub fn with_required_bonus(mut self, bonus: i64) -> Self {
        self.required_bonus = bonus;
        self
    }

    pub fn with_required_multiplier(mut self, multiplier: i64) -> Self {
        self.required_multiplier = multiplier;
        self
    }

    pub fn with_required_gap_penalty(mut self, penalty: i64) -> Self {
        self.required_gap_penalty = penalty;
        self
    }

    pub fn weight(&self, check: CheckName) -> i64 {
        self.check_weights.get(&check).copied().unwrap_or(0)
    }

    /// Validates that every weight is non-negative and that the largest
    /// possible score, candidate score, and gap penalty fit in `i64`.
    ///
    /// # Errors
    ///
    /// [`DraftError::InvalidWeight`] naming the first negative or
    /// overflowing entry.
    pub fn validate(&self) -> Result<()> {
        for (&check, &value) in &self.check_weights {
            if value < 0 {
                return Err(DraftError::InvalidWeight {
                    check: check.to_string(),
                    value,
                });
            }
        }
        for (name, value) in [
            ("required_bonus", self.required_bonus),
            ("required_multiplier", self.required_multiplier),
            ("required_gap_penalty", self.required_gap_penalty),
        ] {
            if value < 0 {
                return Err(DraftError::InvalidWeight {
                    check: name.to_string(),
                    value,
                });
            }
        }
        self.validate_range()
    }

    fn validate_range(&self) -> Result<()> {
        let overflow = |check: String, value: i64| DraftError::InvalidWeight { check, value };
        let mut ceiling: i64 = 0;
        let mut candidate_ceiling: i64 = 0;
        for check in CheckName::ALL {
            let weight = self.weight(check);
            ceiling = weight
                .checked_add(self.required_bonus)
                .and_then(|value| ceiling.checked_add(value))
                .ok_or_else(|| overflow(check.to_string(), weight))?;
            candidate_ceiling = weight
                .checked_mul(self.required_multiplier.max(1))
                .and_then(|value| candidate_ceiling.checked_add(value))
                .ok_or_else(|| overflow(check.to_string(), weight))?;
        }
        let max_gaps = CheckName::ALL.len() as i64;
        ceiling
            .checked_add(1)
            .map(|floor| floor.max(self.required_gap_penalty))
            .and_then(|penalty| penalty.checked_mul(max_gaps))
            .ok_or_else(|| {
                overflow("required_gap_penalty".to_string(), self.required_gap_penalty)
            })?;
        Ok(())
    }

    /// Highest score any composition can earn.
    fn ceiling(&self) -> i64 {
        CheckName::ALL
            .into_iter()
            .map(|check| self.weight(check).saturating_add(self.required_bonus))
            .fold(0, i64::saturating_add)
    }

    fn effective_penalty(&self) -> i64 {
        self.required_gap_penalty.max(self.ceiling().saturating_add(1))
    }
}

/// Reduces an evaluation to one ranking integer.
///
/// # Examples
///
/// ```
/// use draft_compose::checks::*;
/// use draft_compose::team::*;
///
/// let catalog = ChampionCatalog::new();
/// let eval = evaluate_composition_checks(
///     &create_empty_team_state(),
///     &catalog,
///     &RequirementToggles::none(),
/// )
/// .unwrap();
/// assert_eq!(score_node_from_checks(&eval, &ScoreWeights::default()), 0);
/// ```
pub fn score_node_from_checks(evaluation: &CheckEvaluation, weights: &ScoreWeights) -> i64 {
    let earned: i64 = evaluation
        .checks
        .iter()
        .filter(|(_, r)| r.satisfied)
        .map(|(&check, r)| {
            let bonus = if r.required { weights.required_bonus } else { 0 };
            weights.weight(check).saturating_add(bonus)
        })
        .fold(0, i64::saturating_add);
    let gaps = evaluation.required_gaps() as i64;
    earned.saturating_sub(gaps.saturating_mul(weights.effective_penalty()))
}

/// Local value of the pick that turned `before` into `after`.
///
/// Counts every check the pick newly satisfies, with required checks scaled
/// by `required_multiplier`. Checks only ever become satisfied as picks are
/// added, so the result is never negative.
pub fn candidate_score(
    before: &CheckEvaluation,
    after: &CheckEvaluation,
    weights: &ScoreWeights,
) -> i64 {
    after
        .checks
        .iter()
        .filter(|&(&check, r)| r.satisfied && !before.is_satisfied(check))
        .map(|(&check, r)| {
            let scale = if r.required {
                weights.required_multiplier
            } else {
                1
            };
            weights.weight(check).saturating_mul(scale)
        })
        .fold(0, i64::saturating_add)
}
