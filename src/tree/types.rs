//! Tree node and statistics types.

use std::fmt;

use crate::checks::CheckName;
use crate::team::{Slot, TeamState};

/// Why a node could not expand its selected role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BlockedReason {
    /// The role's pool is empty after exclusions and used champions.
    NoEligibleChampionsForRole,
    /// Top needs a threat and no eligible Top champion is one.
    TopThreatFilter,
    /// Every pick would leave some required check impossible to meet.
    RequiredUnreachable,
    /// Every pick scored below the floor and fallback is disabled.
    CandidateScoreFloor,
}

impl BlockedReason {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockedReason::NoEligibleChampionsForRole => "no_eligible_champions_for_role",
            BlockedReason::TopThreatFilter => "top_threat_filter",
            BlockedReason::RequiredUnreachable => "required_unreachable",
            BlockedReason::CandidateScoreFloor => "candidate_score_floor",
        }
    }
}

impl fmt::Display for BlockedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Required-gap summary for a node's team.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequiredSummary {
    pub required_gaps: usize,
    pub unmet_required: Vec<CheckName>,
}

/// Reachability facts for one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viability {
    /// Slots still empty.
    pub remaining_steps: usize,
    pub is_draft_complete: bool,
    /// Complete with no required gaps.
    pub is_terminal_valid: bool,
    /// This node's pick was re-admitted below the score floor.
    pub fallback_applied: bool,
    pub blocked_role: Option<Slot>,
    pub blocked_reason: Option<BlockedReason>,
    /// Required checks that cannot be met from this node.
    pub unreachable_required: Vec<CheckName>,
    /// Required checks that some pruned candidate would have made
    /// unreachable. Kept siblings may still meet them.
    pub pruned_for_unreachable: Vec<CheckName>,
}

/// Summary of terminal-valid completions beneath a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BranchPotential {
    pub valid_leaf_count: u64,
    pub best_leaf_score: Option<i64>,
}

/// Counters accumulated over one generation call.
///
/// Work counters (`nodes_visited`, `candidate_generation_calls`,
/// `candidates_evaluated`, the `pruned_*` counters and
/// `fallback_candidates_used`) include subtrees probed and then discarded by
/// the rank goal. The remaining counters describe only the returned tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    pub nodes_visited: usize,
    pub nodes_kept: usize,
    pub candidate_generation_calls: usize,
    pub candidates_evaluated: usize,
    pub candidates_selected: usize,
    pub pruned_unreachable: usize,
    pub pruned_low_candidate_score: usize,
    pub pruned_relative_candidate_score: usize,
    pub pruned_branch_cap: usize,
    pub fallback_candidates_used: usize,
    pub fallback_nodes: usize,
    pub complete_draft_leaves: usize,
    pub incomplete_draft_leaves: usize,
    pub valid_leaves: usize,
    /// Returned leaves that are not terminal-valid.
    pub incomplete_leaves: usize,
}

impl GenerationStats {
    /// Adds every counter of a kept subtree.
    pub(crate) fn absorb(&mut self, other: &GenerationStats) {
        self.absorb_work(other);
        self.nodes_kept += other.nodes_kept;
        self.candidates_selected += other.candidates_selected;
        self.fallback_nodes += other.fallback_nodes;
        self.complete_draft_leaves += other.complete_draft_leaves;
        self.incomplete_draft_leaves += other.incomplete_draft_leaves;
        self.valid_leaves += other.valid_leaves;
        self.incomplete_leaves += other.incomplete_leaves;
    }

    /// Adds only the work counters of a discarded subtree.
    pub(crate) fn absorb_work(&mut self, other: &GenerationStats) {
        self.nodes_visited += other.nodes_visited;
        self.candidate_generation_calls += other.candidate_generation_calls;
        self.candidates_evaluated += other.candidates_evaluated;
        self.pruned_unreachable += other.pruned_unreachable;
        self.pruned_low_candidate_score += other.pruned_low_candidate_score;
        self.pruned_relative_candidate_score += other.pruned_relative_candidate_score;
        self.pruned_branch_cap += other.pruned_branch_cap;
        self.fallback_candidates_used += other.fallback_candidates_used;
    }
}

/// One node of the possibility tree.
///
/// Child `N` of parent `P` differs from `P` in exactly one slot,
/// `N.added_role`, which holds `N.added_champion`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeNode {
    pub depth: usize,
    pub team_slots: TeamState,
    pub added_role: Option<Slot>,
    pub added_champion: Option<String>,
    /// Local value of this node's pick; `None` at the root.
    pub candidate_score: Option<i64>,
    pub passes_min_score: bool,
    /// Composition score of `team_slots`.
    pub score: i64,
    pub required_summary: RequiredSummary,
    /// One human-readable line per pick from the root to here.
    pub path_rationale: Vec<String>,
    pub viability: Viability,
    pub branch_potential: BranchPotential,
    pub children: Vec<TreeNode>,
    /// Present on the root only.
    pub generation_stats: Option<GenerationStats>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first, pre-order walk over this node and its descendants.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Total nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Leaves of this subtree in pre-order.
    pub fn leaves(&self) -> impl Iterator<Item = &TreeNode> {
        self.iter().filter(|node| node.is_leaf())
    }
}

/// Pre-order iterator returned by [`TreeNode::iter`].
pub struct Iter<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
