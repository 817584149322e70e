//! Possibility-tree construction.
//!
//! # Algorithm
//!
//! For each node, starting at the caller's team state as the depth-0 root:
//!
//! 1. Stop if `max_depth` is reached or every slot is filled
//! 2. Select the first open slot in the draft order
//! 3. Generate candidates for it; on Top, keep only threats when required
//! 4. Score each candidate (local candidate score and full composition score)
//! 5. Optionally drop candidates that make a required check unreachable
//! 6. Rank by candidate score, then name; drop candidates far below the best
//! 7. Apply the score floor; if that empties the role, backfill the best
//!    below-floor candidates
//! 8. Expand up to the probe width, then trim to `max_branch` by rank goal
//!
//! A node whose role loses every candidate becomes a dead-end leaf naming the
//! stage that removed the last option.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace, warn};

use super::analyzer::{branch_potential, viability_for};
use super::config::{DraftDefaults, RankGoal, TreeConfig};
use super::reachability::unreachable_required;
use super::types::{BlockedReason, GenerationStats, RequiredSummary, TreeNode};
use crate::candidates::{available_by_role, resolve_pool, CandidatePool, TeamPools};
use crate::checks::{
    candidate_score, evaluate_composition_checks, score_node_from_checks, CheckEvaluation,
    CheckName, RequirementToggles, ScoreWeights,
};
use crate::error::{DraftError, Result};
use crate::team::{ChampionCatalog, Slot, TeamState};

static NO_TEAM_POOLS: TeamPools = TeamPools::new();

/// Inputs to [`generate_possibility_tree`].
///
/// The catalog and team pools are borrowed from the host; everything else is
/// owned so a request can be assembled with the `with_*` builders.
///
/// # Examples
///
/// ```
/// use draft_compose::team::*;
/// use draft_compose::tree::{generate_possibility_tree, TreeConfig, TreeParams};
///
/// let catalog: ChampionCatalog = [
///     ChampionRecord::new("Garen", DamageType::Ad, ScalingPhase::Mid)
///         .with_roles([Slot::Top])
///         .with_tags([CompositionTag::SideLaneThreat, CompositionTag::Frontline]),
/// ]
/// .into_iter()
/// .collect();
///
/// let params = TreeParams::new(&catalog)
///     .with_config(
///         TreeConfig::default()
///             .with_max_depth(1)
///             .with_max_branch(2)
///             .with_prune_unreachable_required(false),
///     );
/// let tree = generate_possibility_tree(&params).unwrap();
/// assert_eq!(tree.children.len(), 1);
/// assert_eq!(tree.children[0].added_champion.as_deref(), Some("Garen"));
/// ```
#[derive(Debug, Clone)]
pub struct TreeParams<'a> {
    pub catalog: &'a ChampionCatalog,
    pub team_pools: &'a TeamPools,
    /// Selects a team-scoped pool; `None` uses the global pool.
    pub team_id: Option<String>,
    pub team_state: TeamState,
    /// Draft order. Slots left out are appended in natural order.
    pub role_order: Vec<Slot>,
    pub toggles: RequirementToggles,
    pub excluded: BTreeSet<String>,
    pub weights: ScoreWeights,
    pub config: TreeConfig,
}

impl<'a> TreeParams<'a> {
    /// Empty team, global pool, natural draft order, and default settings.
    pub fn new(catalog: &'a ChampionCatalog) -> Self {
        Self {
            catalog,
            team_pools: &NO_TEAM_POOLS,
            team_id: None,
            team_state: TeamState::default(),
            role_order: Slot::ALL.to_vec(),
            toggles: RequirementToggles::default(),
            excluded: BTreeSet::new(),
            weights: ScoreWeights::default(),
            config: TreeConfig::default(),
        }
    }

    pub fn with_team_state(mut self, team: TeamState) -> Self {
        self.team_state = team;
        self
    }

    /// Uses the pool registered for `team_id` in `pools`.
    pub fn with_team(mut self, team_id: impl Into<String>, pools: &'a TeamPools) -> Self {
        self.team_id = Some(team_id.into());
        self.team_pools = pools;
        self
    }

    pub fn with_role_order(mut self, order: impl IntoIterator<Item = Slot>) -> Self {
        self.role_order = order.into_iter().collect();
        self
    }

    pub fn with_toggles(mut self, toggles: RequirementToggles) -> Self {
        self.toggles = toggles;
        self
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_excluded<I, S>(mut self, champions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded = champions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_config(mut self, config: TreeConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces toggles, weights, and limits with a defaults bundle.
    pub fn with_defaults(mut self, defaults: &DraftDefaults) -> Self {
        self.toggles = defaults.toggles.clone();
        self.weights = defaults.weights.clone();
        self.config = defaults.tree.clone();
        self
    }
}

/// Builds the possibility tree for the remaining picks of a team.
///
/// The returned root carries [`GenerationStats`]; every other node carries
/// `None`. Identical inputs always produce an identical tree.
///
/// # Errors
///
/// Fails fast, with no partial result, on a zero limit, a negative score
/// window, a negative or overflowing weight, a repeated slot in the draft order, a team-state or pool entry missing from
/// the catalog, or an unknown team id.
pub fn generate_possibility_tree(params: &TreeParams<'_>) -> Result<TreeNode> {
    params.config.validate()?;
    params.weights.validate()?;
    let role_order = effective_role_order(&params.role_order)?;
    for (slot, name) in params.team_state.picks() {
        if !params.catalog.contains(name) {
            return Err(DraftError::UnknownChampion {
                name: name.to_string(),
                context: format!("the team state ({slot})"),
            });
        }
    }
    let pool = resolve_pool(params.team_id.as_deref(), params.team_pools, params.catalog)?;

    let max_depth = if params.config.max_depth > Slot::COUNT {
        warn!(
            requested = params.config.max_depth,
            clamped = Slot::COUNT,
            "max_depth exceeds slot count"
        );
        Slot::COUNT
    } else {
        params.config.max_depth
    };

    let expander = Expander {
        catalog: params.catalog,
        toggles: &params.toggles,
        weights: &params.weights,
        excluded: &params.excluded,
        config: &params.config,
        pool,
        role_order,
        max_depth,
    };

    debug!(
        team_id = params.team_id.as_deref().unwrap_or("<global>"),
        open_slots = params.team_state.remaining(),
        max_depth,
        max_branch = params.config.max_branch,
        rank_goal = %params.config.rank_goal,
        "generating possibility tree"
    );

    let evaluation =
        evaluate_composition_checks(&params.team_state, params.catalog, &params.toggles)?;
    let score = score_node_from_checks(&evaluation, &params.weights);
    let root = NodeSeed {
        team: params.team_state.clone(),
        evaluation,
        score,
        pick: None,
        path_rationale: Vec::new(),
    };

    let (mut tree, stats) = expander.build(root, 0)?;
    debug!(
        nodes_visited = stats.nodes_visited,
        nodes_kept = stats.nodes_kept,
        valid_leaves = stats.valid_leaves,
        fallback_nodes = stats.fallback_nodes,
        pruned_unreachable = stats.pruned_unreachable,
        "possibility tree generated"
    );
    tree.generation_stats = Some(stats);
    Ok(tree)
}

/// Caller order followed by any omitted slots in natural order.
fn effective_role_order(order: &[Slot]) -> Result<Vec<Slot>> {
    let mut effective = Vec::with_capacity(Slot::COUNT);
    for &slot in order {
        if effective.contains(&slot) {
            return Err(DraftError::DuplicateRole {
                slot: slot.to_string(),
            });
        }
        effective.push(slot);
    }
    for slot in Slot::ALL {
        if !effective.contains(&slot) {
            effective.push(slot);
        }
    }
    Ok(effective)
}

/// The pick that created a child node.
struct Pick {
    role: Slot,
    champion: String,
    candidate_score: i64,
    fallback: bool,
}

/// Everything needed to build one node.
struct NodeSeed {
    team: TeamState,
    evaluation: CheckEvaluation,
    score: i64,
    pick: Option<Pick>,
    path_rationale: Vec<String>,
}

/// A scored prospective pick.
struct Candidate {
    champion: String,
    team: TeamState,
    evaluation: CheckEvaluation,
    score: i64,
    candidate_score: i64,
    unreachable: Vec<CheckName>,
    rationale: String,
}

impl Candidate {
    fn into_seed(self, role: Slot, parent_path: &[String], fallback: bool) -> NodeSeed {
        let mut path_rationale = parent_path.to_vec();
        if fallback {
            path_rationale.push(format!("{} [below score floor]", self.rationale));
        } else {
            path_rationale.push(self.rationale);
        }
        NodeSeed {
            team: self.team,
            evaluation: self.evaluation,
            score: self.score,
            pick: Some(Pick {
                role,
                champion: self.champion,
                candidate_score: self.candidate_score,
                fallback,
            }),
            path_rationale,
        }
    }
}

/// Result of trying to expand a node's selected role.
struct Expansion {
    children: Vec<TreeNode>,
    blocked: Option<BlockedReason>,
    pruned_for: BTreeSet<CheckName>,
}

impl Expansion {
    fn blocked(reason: BlockedReason, pruned_for: BTreeSet<CheckName>) -> Self {
        Self {
            children: Vec::new(),
            blocked: Some(reason),
            pruned_for,
        }
    }
}

struct Expander<'a> {
    catalog: &'a ChampionCatalog,
    toggles: &'a RequirementToggles,
    weights: &'a ScoreWeights,
    excluded: &'a BTreeSet<String>,
    config: &'a TreeConfig,
    pool: CandidatePool,
    role_order: Vec<Slot>,
    max_depth: usize,
}

impl Expander<'_> {
    fn next_role(&self, team: &TeamState) -> Option<Slot> {
        self.role_order.iter().copied().find(|&slot| team.is_open(slot))
    }

    fn build(&self, seed: NodeSeed, depth: usize) -> Result<(TreeNode, GenerationStats)> {
        let mut stats = GenerationStats {
            nodes_visited: 1,
            ..GenerationStats::default()
        };
        let required_gaps = seed.evaluation.required_gaps();
        let mut viability = viability_for(&seed.team, required_gaps);

        let available = available_by_role(&seed.team, &self.pool, self.excluded);
        let mut unreachable: BTreeSet<CheckName> =
            unreachable_required(&seed.team, &seed.evaluation, &available, self.catalog)
                .into_iter()
                .collect();

        let mut children = Vec::new();
        let expandable = depth < self.max_depth && !seed.team.is_full();
        if let Some(role) = self.next_role(&seed.team).filter(|_| expandable) {
            let expansion = self.expand(&seed, role, &available, depth, &mut stats)?;
            if let Some(reason) = expansion.blocked {
                debug!(depth, role = %role, reason = %reason, "dead end");
                viability.blocked_role = Some(role);
                viability.blocked_reason = Some(reason);
                // Every pick here lost these checks, so they are out of reach.
                unreachable.extend(expansion.pruned_for.iter().copied());
            }
            viability.pruned_for_unreachable = expansion.pruned_for.into_iter().collect();
            children = expansion.children;
        }
        viability.unreachable_required = unreachable.into_iter().collect();

        if let Some(pick) = &seed.pick {
            if pick.fallback {
                viability.fallback_applied = true;
                stats.fallback_nodes += 1;
            }
        }

        stats.nodes_kept += 1;
        if children.is_empty() {
            if viability.is_draft_complete {
                stats.complete_draft_leaves += 1;
            } else {
                stats.incomplete_draft_leaves += 1;
            }
            if viability.is_terminal_valid {
                stats.valid_leaves += 1;
            } else {
                stats.incomplete_leaves += 1;
            }
        }

        let potential = branch_potential(viability.is_terminal_valid, seed.score, &children);
        let (added_role, added_champion, cand_score, passes_min_score) = match seed.pick {
            Some(pick) => (
                Some(pick.role),
                Some(pick.champion),
                Some(pick.candidate_score),
                !pick.fallback,
            ),
            None => (None, None, None, true),
        };

        let node = TreeNode {
            depth,
            team_slots: seed.team,
            added_role,
            added_champion,
            candidate_score: cand_score,
            passes_min_score,
            score: seed.score,
            required_summary: RequiredSummary {
                required_gaps,
                unmet_required: seed.evaluation.unmet_required(),
            },
            path_rationale: seed.path_rationale,
            viability,
            branch_potential: potential,
            children,
            generation_stats: None,
        };
        Ok((node, stats))
    }

    fn expand(
        &self,
        seed: &NodeSeed,
        role: Slot,
        available: &BTreeMap<Slot, Vec<String>>,
        depth: usize,
        stats: &mut GenerationStats,
    ) -> Result<Expansion> {
        stats.candidate_generation_calls += 1;
        let mut names = available.get(&role).cloned().unwrap_or_default();
        if names.is_empty() {
            return Ok(Expansion::blocked(
                BlockedReason::NoEligibleChampionsForRole,
                BTreeSet::new(),
            ));
        }

        if role == Slot::Top && self.toggles.is_required(CheckName::TopMustBeThreat) {
            names.retain(|name| {
                self.catalog
                    .get(name)
                    .is_some_and(|record| record.is_top_threat())
            });
            if names.is_empty() {
                return Ok(Expansion::blocked(
                    BlockedReason::TopThreatFilter,
                    BTreeSet::new(),
                ));
            }
        }

        let mut candidates = Vec::with_capacity(names.len());
        for name in names {
            candidates.push(self.score_candidate(seed, role, name, available)?);
        }
        stats.candidates_evaluated += candidates.len();

        let mut pruned_for = BTreeSet::new();
        if self.config.prune_unreachable_required {
            let before = candidates.len();
            candidates.retain(|c| {
                if c.unreachable.is_empty() {
                    return true;
                }
                trace!(champion = %c.champion, checks = ?c.unreachable, "pruned: required check unreachable");
                pruned_for.extend(c.unreachable.iter().copied());
                false
            });
            stats.pruned_unreachable += before - candidates.len();
            if candidates.is_empty() {
                return Ok(Expansion::blocked(
                    BlockedReason::RequiredUnreachable,
                    pruned_for,
                ));
            }
        }

        candidates.sort_by(|a, b| {
            b.candidate_score
                .cmp(&a.candidate_score)
                .then_with(|| a.champion.cmp(&b.champion))
        });

        if let (Some(window), Some(top)) = (
            self.config.relative_score_window,
            candidates.first().map(|c| c.candidate_score),
        ) {
            let before = candidates.len();
            let cutoff = top.saturating_sub(window);
            candidates.retain(|c| c.candidate_score >= cutoff);
            stats.pruned_relative_candidate_score += before - candidates.len();
        }

        // Floor first, then backfill if the floor emptied the role.
        let (passing, below): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|c| c.candidate_score >= self.config.min_candidate_score);
        let (mut selected, fallback) = if !passing.is_empty() {
            stats.pruned_low_candidate_score += below.len();
            (passing, false)
        } else if self.config.allow_fallback {
            let below_count = below.len();
            let backfill: Vec<Candidate> = below.into_iter().take(self.config.max_branch).collect();
            stats.pruned_low_candidate_score += below_count - backfill.len();
            stats.fallback_candidates_used += backfill.len();
            debug!(
                depth,
                role = %role,
                floor = self.config.min_candidate_score,
                readmitted = backfill.len(),
                "score floor emptied role; using fallback candidates"
            );
            (backfill, true)
        } else {
            stats.pruned_low_candidate_score += below.len();
            return Ok(Expansion::blocked(
                BlockedReason::CandidateScoreFloor,
                pruned_for,
            ));
        };

        if selected.is_empty() {
            return Ok(Expansion::blocked(
                BlockedReason::CandidateScoreFloor,
                pruned_for,
            ));
        }

        let width = self.config.probe_width();
        if selected.len() > width {
            stats.pruned_branch_cap += selected.len() - width;
            selected.truncate(width);
        }

        let seeds: Vec<NodeSeed> = selected
            .into_iter()
            .map(|c| c.into_seed(role, &seed.path_rationale, fallback))
            .collect();
        let mut built = self.build_all(seeds, depth + 1)?;

        if self.config.rank_goal == RankGoal::ValidEndStates {
            built.sort_by(|(a, _), (b, _)| valid_end_state_order(a, b));
            if built.len() > self.config.max_branch {
                for (_, discarded) in built.drain(self.config.max_branch..) {
                    stats.absorb_work(&discarded);
                    stats.pruned_branch_cap += 1;
                }
            }
        }

        let mut children = Vec::with_capacity(built.len());
        for (child, child_stats) in built {
            stats.absorb(&child_stats);
            children.push(child);
        }
        stats.candidates_selected += children.len();

        Ok(Expansion {
            children,
            blocked: None,
            pruned_for,
        })
    }

    fn score_candidate(
        &self,
        seed: &NodeSeed,
        role: Slot,
        champion: String,
        available: &BTreeMap<Slot, Vec<String>>,
    ) -> Result<Candidate> {
        let team = seed.team.with_pick(role, &champion)?;
        let evaluation = evaluate_composition_checks(&team, self.catalog, self.toggles)?;
        let score = score_node_from_checks(&evaluation, self.weights);
        let cand_score = candidate_score(&seed.evaluation, &evaluation, self.weights);
        let unreachable = if self.config.prune_unreachable_required {
            unreachable_required(&team, &evaluation, available, self.catalog)
        } else {
            Vec::new()
        };
        let rationale = rationale_line(role, &champion, &seed.evaluation, &evaluation);
        Ok(Candidate {
            champion,
            team,
            evaluation,
            score,
            candidate_score: cand_score,
            unreachable,
            rationale,
        })
    }

    #[cfg(feature = "parallel")]
    fn build_all(&self, seeds: Vec<NodeSeed>, depth: usize) -> Result<Vec<(TreeNode, GenerationStats)>> {
        if self.config.parallel {
            return seeds
                .into_par_iter()
                .map(|seed| self.build(seed, depth))
                .collect();
        }
        seeds.into_iter().map(|seed| self.build(seed, depth)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn build_all(&self, seeds: Vec<NodeSeed>, depth: usize) -> Result<Vec<(TreeNode, GenerationStats)>> {
        seeds.into_iter().map(|seed| self.build(seed, depth)).collect()
    }
}

/// More valid completions first, then best completion score, then the
/// immediate candidate score, then name.
fn valid_end_state_order(a: &TreeNode, b: &TreeNode) -> Ordering {
    b.branch_potential
        .valid_leaf_count
        .cmp(&a.branch_potential.valid_leaf_count)
        .then_with(|| {
            b.branch_potential
                .best_leaf_score
                .cmp(&a.branch_potential.best_leaf_score)
        })
        .then_with(|| b.candidate_score.cmp(&a.candidate_score))
        .then_with(|| a.added_champion.cmp(&b.added_champion))
}

/// `"Top: Malphite (+Hard Engage, +Frontline)"`.
fn rationale_line(
    role: Slot,
    champion: &str,
    before: &CheckEvaluation,
    after: &CheckEvaluation,
) -> String {
    let gained: Vec<String> = CheckName::ALL
        .into_iter()
        .filter(|&check| after.is_satisfied(check) && !before.is_satisfied(check))
        .map(|check| format!("+{}", check.label()))
        .collect();
    if gained.is_empty() {
        format!("{role}: {champion} (no new checks)")
    } else {
        format!("{role}: {champion} ({})", gained.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::{ChampionRecord, CompositionTag, DamageType, ScalingPhase};

    fn catalog() -> ChampionCatalog {
        [
            ChampionRecord::new("Camille", DamageType::Ad, ScalingPhase::Mid)
                .with_roles([Slot::Top])
                .with_tags([CompositionTag::SideLaneThreat, CompositionTag::DiveThreat]),
            ChampionRecord::new("Shen", DamageType::Ap, ScalingPhase::Mid)
                .with_roles([Slot::Top])
                .with_tags([CompositionTag::Frontline, CompositionTag::SideLaneThreat]),
            ChampionRecord::new("Sion", DamageType::Ad, ScalingPhase::Late)
                .with_roles([Slot::Top])
                .with_tags([CompositionTag::Frontline, CompositionTag::HardEngage]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_effective_role_order_appends_missing() {
        let order = effective_role_order(&[Slot::Support, Slot::Jungle]).unwrap();
        assert_eq!(
            order,
            vec![Slot::Support, Slot::Jungle, Slot::Top, Slot::Mid, Slot::Adc]
        );
        assert!(matches!(
            effective_role_order(&[Slot::Mid, Slot::Mid]),
            Err(DraftError::DuplicateRole { .. })
        ));
    }

    #[test]
    fn test_rationale_line_lists_gained_checks() {
        let catalog = catalog();
        let toggles = RequirementToggles::default();
        let before = TeamState::default();
        let after = before.with_pick(Slot::Top, "Sion").unwrap();
        let line = rationale_line(
            Slot::Top,
            "Sion",
            &evaluate_composition_checks(&before, &catalog, &toggles).unwrap(),
            &evaluate_composition_checks(&after, &catalog, &toggles).unwrap(),
        );
        assert_eq!(line, "Top: Sion (+Hard Engage, +Frontline)");
    }

    #[test]
    fn test_top_threat_filter_drops_non_threats() {
        let catalog = catalog();
        let params = TreeParams::new(&catalog).with_config(
            TreeConfig::default()
                .with_max_depth(1)
                .with_prune_unreachable_required(false)
                .with_relative_score_window(None),
        );
        let tree = generate_possibility_tree(&params).unwrap();
        let picks: Vec<_> = tree
            .children
            .iter()
            .filter_map(|c| c.added_champion.as_deref())
            .collect();
        assert!(!picks.contains(&"Sion"));
        assert_eq!(picks.len(), 2);
    }

    #[test]
    fn test_top_threat_filter_blocks_when_no_threat() {
        let catalog: ChampionCatalog = catalog()
            .iter()
            .filter(|r| r.name == "Sion")
            .cloned()
            .collect();
        let params = TreeParams::new(&catalog)
            .with_config(TreeConfig::default().with_prune_unreachable_required(false));
        let tree = generate_possibility_tree(&params).unwrap();
        assert!(tree.is_leaf());
        assert_eq!(tree.viability.blocked_role, Some(Slot::Top));
        assert_eq!(
            tree.viability.blocked_reason,
            Some(BlockedReason::TopThreatFilter)
        );
    }

    #[test]
    fn test_zero_branch_rejected() {
        let catalog = catalog();
        let params =
            TreeParams::new(&catalog).with_config(TreeConfig::default().with_max_branch(0));
        assert!(matches!(
            generate_possibility_tree(&params),
            Err(DraftError::InvalidLimit { .. })
        ));
    }

    #[test]
    fn test_unknown_team_state_champion_rejected() {
        let catalog = catalog();
        let team = TeamState::default().with_pick(Slot::Mid, "Ghost").unwrap();
        let params = TreeParams::new(&catalog).with_team_state(team);
        assert!(matches!(
            generate_possibility_tree(&params),
            Err(DraftError::UnknownChampion { .. })
        ));
    }

    #[test]
    fn test_depth_is_clamped_to_slot_count() {
        let catalog = catalog();
        let params = TreeParams::new(&catalog).with_config(
            TreeConfig::default()
                .with_max_depth(9)
                .with_prune_unreachable_required(false),
        );
        let tree = generate_possibility_tree(&params).unwrap();
        assert!(tree.iter().all(|node| node.depth <= Slot::COUNT));
    }
}
