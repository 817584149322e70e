//! Shared fixtures for integration tests.

#![allow(dead_code)]

use draft_compose::candidates::{CandidatePool, TeamPools};
use draft_compose::checks::{evaluate_composition_checks, RequirementToggles};
use draft_compose::team::{
    ChampionCatalog, ChampionRecord, CompositionTag, DamageType, ScalingPhase, Slot, TeamState,
};
use draft_compose::tree::TreeNode;

use CompositionTag::*;
use DamageType::*;
use ScalingPhase::*;

fn champ(
    name: &str,
    damage: DamageType,
    scaling: ScalingPhase,
    roles: &[Slot],
    tags: &[CompositionTag],
) -> ChampionRecord {
    ChampionRecord::new(name, damage, scaling)
        .with_roles(roles.iter().copied())
        .with_tags(tags.iter().copied())
}

/// A small but realistic catalog: four or five champions per role, every
/// tag represented, and a few flex picks.
pub fn catalog() -> ChampionCatalog {
    [
        champ("Camille", Ad, Mid, &[Slot::Top], &[SideLaneThreat, DiveThreat]),
        champ("Fiora", Ad, Late, &[Slot::Top], &[SideLaneThreat, AntiTank]),
        champ("Shen", Ad, Mid, &[Slot::Top], &[Frontline, SideLaneThreat]),
        champ("Malphite", Ap, Mid, &[Slot::Top], &[HardEngage, Frontline]),
        champ("Maokai", Ap, Mid, &[Slot::Top, Slot::Support], &[HardEngage, Frontline]),
        champ("Sejuani", Ap, Mid, &[Slot::Jungle], &[HardEngage, Frontline]),
        champ("Lee Sin", Ad, Early, &[Slot::Jungle], &[DiveThreat]),
        champ("Vi", Ad, Mid, &[Slot::Jungle], &[HardEngage, DiveThreat]),
        champ("Elise", Ap, Early, &[Slot::Jungle], &[DiveThreat]),
        champ("Orianna", Ap, Late, &[Slot::Mid], &[Waveclear, Disengage]),
        champ("Syndra", Ap, Mid, &[Slot::Mid], &[Waveclear]),
        champ("Zed", Ad, Mid, &[Slot::Mid], &[DiveThreat]),
        champ("Anivia", Ap, Late, &[Slot::Mid], &[Waveclear, Disengage]),
        champ("Jinx", Ad, Late, &[Slot::Adc], &[Waveclear]),
        champ("Vayne", Ad, Late, &[Slot::Adc], &[AntiTank]),
        champ("Kaisa", Mixed, Late, &[Slot::Adc], &[DiveThreat]),
        champ("Ezreal", Ad, Mid, &[Slot::Adc], &[]),
        champ("Leona", Ap, Early, &[Slot::Support], &[HardEngage, Frontline]),
        champ("Janna", Ap, Mid, &[Slot::Support], &[Disengage]),
        champ("Nautilus", Ap, Mid, &[Slot::Support], &[HardEngage, Frontline]),
        champ("Lulu", Ap, Mid, &[Slot::Support], &[Disengage]),
    ]
    .into_iter()
    .collect()
}

/// Team-scoped pool that offers no anti-tank champion.
pub fn pool_without_anti_tank() -> CandidatePool {
    CandidatePool::new()
        .with_slot(Slot::Top, ["Camille", "Shen"])
        .with_slot(Slot::Jungle, ["Sejuani", "Vi"])
        .with_slot(Slot::Mid, ["Syndra", "Orianna"])
        .with_slot(Slot::Adc, ["Jinx", "Kaisa"])
        .with_slot(Slot::Support, ["Leona", "Janna"])
}

pub fn team_pools(entries: impl IntoIterator<Item = (&'static str, CandidatePool)>) -> TeamPools {
    entries
        .into_iter()
        .map(|(id, pool)| (id.to_string(), pool))
        .collect()
}

pub fn team(picks: &[(Slot, &str)]) -> TeamState {
    picks
        .iter()
        .try_fold(TeamState::default(), |team, &(slot, name)| {
            team.with_pick(slot, name)
        })
        .expect("fixture picks are distinct")
}

/// Every (parent, child) pair in pre-order.
pub fn edges(root: &TreeNode) -> Vec<(&TreeNode, &TreeNode)> {
    root.iter()
        .flat_map(|parent| parent.children.iter().map(move |child| (parent, child)))
        .collect()
}

/// Asserts the structural invariants every generated tree must satisfy.
pub fn assert_tree_invariants(
    root: &TreeNode,
    catalog: &ChampionCatalog,
    toggles: &RequirementToggles,
    max_branch: usize,
) {
    for node in root.iter() {
        let names: Vec<&str> = node.team_slots.picks().map(|(_, name)| name).collect();
        let mut unique = names.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(names.len(), unique.len(), "duplicate champion in {names:?}");

        let eval = evaluate_composition_checks(&node.team_slots, catalog, toggles).unwrap();
        assert_eq!(node.required_summary.required_gaps, eval.required_gaps());
        assert_eq!(node.required_summary.unmet_required, eval.unmet_required());

        let v = &node.viability;
        assert_eq!(v.remaining_steps, node.team_slots.remaining());
        assert_eq!(v.is_draft_complete, v.remaining_steps == 0);
        assert_eq!(
            v.is_terminal_valid,
            v.is_draft_complete && node.required_summary.required_gaps == 0
        );

        assert!(node.children.len() <= max_branch);

        if node.is_leaf() {
            let expected = u64::from(v.is_terminal_valid);
            assert_eq!(node.branch_potential.valid_leaf_count, expected);
        } else {
            let sum: u64 = node
                .children
                .iter()
                .map(|c| c.branch_potential.valid_leaf_count)
                .sum();
            assert_eq!(node.branch_potential.valid_leaf_count, sum);
            let best = node
                .children
                .iter()
                .filter_map(|c| c.branch_potential.best_leaf_score)
                .max();
            assert_eq!(node.branch_potential.best_leaf_score, best);
        }
    }

    for (parent, child) in edges(root) {
        assert_eq!(child.depth, parent.depth + 1);
        let role = child.added_role.expect("child has an added role");
        assert!(parent.team_slots.is_open(role));
        assert_eq!(child.team_slots.get(role), child.added_champion.as_deref());
        for slot in Slot::ALL.into_iter().filter(|&s| s != role) {
            assert_eq!(child.team_slots.get(slot), parent.team_slots.get(slot));
        }
        assert!(child.score >= parent.score);
        assert_eq!(child.path_rationale.len(), parent.path_rationale.len() + 1);
    }
}
