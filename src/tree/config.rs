//! Possibility-tree search configuration.
//!
//! [`TreeConfig`] holds the limits that bound the search. [`DraftDefaults`]
//! bundles the default toggles, weights, and limits a host would otherwise
//! read from its configuration source.

use std::fmt;
use std::str::FromStr;

use crate::checks::{RequirementToggles, ScoreWeights};
use crate::error::{DraftError, Result};

/// Which candidates survive width-capping when several are comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RankGoal {
    /// Keep the picks with the highest candidate score.
    CandidateScore,

    /// Probe a wider set of picks and keep those whose subtrees reach the
    /// most terminal-valid completions.
    #[default]
    ValidEndStates,
}

impl RankGoal {
    pub fn as_str(self) -> &'static str {
        match self {
            RankGoal::CandidateScore => "candidate_score",
            RankGoal::ValidEndStates => "valid_end_states",
        }
    }
}

impl fmt::Display for RankGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankGoal {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "candidate_score" => Ok(RankGoal::CandidateScore),
            "valid_end_states" => Ok(RankGoal::ValidEndStates),
            other => Err(DraftError::UnknownRankGoal {
                name: other.to_string(),
            }),
        }
    }
}

/// Limits and pruning switches for [`generate_possibility_tree`].
///
/// # Defaults
///
/// ```
/// use draft_compose::tree::{RankGoal, TreeConfig};
///
/// let config = TreeConfig::default();
/// assert_eq!(config.max_depth, 5);
/// assert_eq!(config.max_branch, 4);
/// assert_eq!(config.rank_goal, RankGoal::ValidEndStates);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use draft_compose::tree::TreeConfig;
///
/// let config = TreeConfig::default()
///     .with_max_depth(3)
///     .with_max_branch(2)
///     .with_min_candidate_score(4)
///     .with_prune_unreachable_required(false);
/// assert!(config.validate().is_ok());
/// ```
///
/// [`generate_possibility_tree`]: super::generate_possibility_tree
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeConfig {
    /// Number of picks to explore below the root. Values above the slot
    /// count are clamped.
    pub max_depth: usize,

    /// Maximum children kept per node.
    pub max_branch: usize,

    /// Candidates scoring below this floor are dropped unless that would
    /// leave the role with no candidate at all.
    pub min_candidate_score: i64,

    /// Drop picks after which a required check can no longer be met.
    pub prune_unreachable_required: bool,

    /// Selection preference when trimming to `max_branch`.
    pub rank_goal: RankGoal,

    /// Drop candidates more than this far below the node's best candidate
    /// score. `None` disables relative pruning.
    pub relative_score_window: Option<i64>,

    /// Re-admit below-floor candidates when the floor would empty a role.
    pub allow_fallback: bool,

    /// With [`RankGoal::ValidEndStates`], how many times `max_branch`
    /// candidates are expanded before the final trim.
    pub rank_probe_factor: usize,

    /// Build sibling subtrees with rayon. Only honoured with the `parallel`
    /// feature; output is identical either way.
    pub parallel: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            max_branch: 4,
            min_candidate_score: 0,
            prune_unreachable_required: true,
            rank_goal: RankGoal::ValidEndStates,
            relative_score_window: Some(10),
            allow_fallback: true,
            rank_probe_factor: 2,
            parallel: false,
        }
    }
}

impl TreeConfig {
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_max_branch(mut self, branch: usize) -> Self {
        self.max_branch = branch;
        self
    }

    pub fn with_min_candidate_score(mut self, score: i64) -> Self {
        self.min_candidate_score = score;
        self
    }

    pub fn with_prune_unreachable_required(mut self, prune: bool) -> Self {
        self.prune_unreachable_required = prune;
        self
    }

    pub fn with_rank_goal(mut self, goal: RankGoal) -> Self {
        self.rank_goal = goal;
        self
    }

    pub fn with_relative_score_window(mut self, window: Option<i64>) -> Self {
        self.relative_score_window = window;
        self
    }

    pub fn with_allow_fallback(mut self, allow: bool) -> Self {
        self.allow_fallback = allow;
        self
    }

    pub fn with_rank_probe_factor(mut self, factor: usize) -> Self {
        self.rank_probe_factor = factor;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the limits.
    ///
    /// # Errors
    ///
    /// [`DraftError::InvalidLimit`] for a zero `max_depth`, `max_branch`, or
    /// `rank_probe_factor`; [`DraftError::NegativeWindow`] for a negative
    /// `relative_score_window`.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("max_depth", self.max_depth),
            ("max_branch", self.max_branch),
            ("rank_probe_factor", self.rank_probe_factor),
        ] {
            if value == 0 {
                return Err(DraftError::InvalidLimit {
                    name: name.to_string(),
                    value,
                });
            }
        }
        if let Some(window) = self.relative_score_window.filter(|&w| w < 0) {
            return Err(DraftError::NegativeWindow { value: window });
        }
        Ok(())
    }

    /// Number of candidates expanded per node before the final trim.
    pub(crate) fn probe_width(&self) -> usize {
        match self.rank_goal {
            RankGoal::CandidateScore => self.max_branch,
            RankGoal::ValidEndStates => self.max_branch.saturating_mul(self.rank_probe_factor),
        }
    }
}

/// Default toggles, weights, and search limits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DraftDefaults {
    pub toggles: RequirementToggles,
    pub weights: ScoreWeights,
    pub tree: TreeConfig,
}

impl DraftDefaults {
    /// Validates weights and limits together.
    ///
    /// # Errors
    ///
    /// The first error from [`ScoreWeights::validate`] or
    /// [`TreeConfig::validate`].
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.tree.validate()
    }
}
