//! Viability and branch-potential analysis.
//!
//! The builder calls [`viability_for`] and [`branch_potential`] as each
//! node is finalized, children first, so the rank goal can read a child's
//! potential before deciding whether to keep it. [`analyze_tree`] re-runs
//! the same pass over a finished tree.

use super::types::{BranchPotential, TreeNode, Viability};
use crate::team::TeamState;

/// Base viability of a node: step counts and terminal validity.
///
/// Blocking and fallback fields are left for the builder to fill in.
pub fn viability_for(team: &TeamState, required_gaps: usize) -> Viability {
    let remaining_steps = team.remaining();
    let is_draft_complete = remaining_steps == 0;
    Viability {
        remaining_steps,
        is_draft_complete,
        is_terminal_valid: is_draft_complete && required_gaps == 0,
        ..Viability::default()
    }
}

/// Potential of a node given its own validity and its analyzed children.
pub fn branch_potential(is_terminal_valid: bool, score: i64, children: &[TreeNode]) -> BranchPotential {
    if is_terminal_valid && children.is_empty() {
        return BranchPotential {
            valid_leaf_count: 1,
            best_leaf_score: Some(score),
        };
    }
    children
        .iter()
        .fold(BranchPotential::default(), |acc, child| BranchPotential {
            valid_leaf_count: acc.valid_leaf_count + child.branch_potential.valid_leaf_count,
            best_leaf_score: match (acc.best_leaf_score, child.branch_potential.best_leaf_score) {
                (Some(a), Some(b)) => Some(a.max(b)),
                (a, b) => a.or(b),
            },
        })
}

/// Recomputes viability step counts and branch potential for every node.
pub fn analyze_tree(node: &mut TreeNode) {
    for child in &mut node.children {
        analyze_tree(child);
    }
    let base = viability_for(&node.team_slots, node.required_summary.required_gaps);
    node.viability.remaining_steps = base.remaining_steps;
    node.viability.is_draft_complete = base.is_draft_complete;
    node.viability.is_terminal_valid = base.is_terminal_valid;
    node.branch_potential =
        branch_potential(node.viability.is_terminal_valid, node.score, &node.children);
}
