//! Bounded possibility-tree search over the remaining picks of a team.
//!
//! Each node is a team state; each child adds exactly one champion to the
//! next open slot in the draft order. Width and depth are bounded by
//! [`TreeConfig`], and candidates are pruned by score floor, relative score
//! window, and required-check reachability. When the floor would empty a
//! role, the best below-floor candidates are re-admitted and marked.
//!
//! # Key Components
//!
//! - [`generate_possibility_tree`]: builds a [`TreeNode`] from [`TreeParams`]
//! - [`unreachable_required`]: best-case reachability of unmet required checks
//! - [`analyze_tree`]: recomputes viability and branch potential bottom-up
//! - [`node_at`] / [`best_leaf_address`]: dotted-path navigation
//!
//! # Determinism
//!
//! Candidates are ordered by candidate score, then name, and every map in
//! the pipeline is ordered, so identical inputs yield identical trees. The
//! `parallel` feature builds sibling subtrees concurrently and preserves
//! that guarantee.

mod analyzer;
mod builder;
mod config;
mod navigate;
mod reachability;
mod types;

pub use analyzer::{analyze_tree, branch_potential, viability_for};
pub use builder::{generate_possibility_tree, TreeParams};
pub use config::{DraftDefaults, RankGoal, TreeConfig};
pub use navigate::{best_leaf_address, node_at};
pub use reachability::unreachable_required;
pub use types::{
    BlockedReason, BranchPotential, GenerationStats, Iter, RequiredSummary, TreeNode, Viability,
};
