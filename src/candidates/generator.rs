//! Eligible-champion generation for a role.

use std::collections::{BTreeMap, BTreeSet};

use super::pool::CandidatePool;
use crate::team::{Slot, TeamState};

/// Champions that could fill `role` on `team`.
///
/// Computes `pool[role] − excluded − {champions already on team}`. Used
/// champions come from the team snapshot itself, so sibling branches never
/// see each other's picks. The result is deduplicated and sorted by name.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use draft_compose::candidates::{generate_candidates, CandidatePool};
/// use draft_compose::team::{create_empty_team_state, Slot};
///
/// let pool = CandidatePool::new().with_slot(Slot::Mid, ["Syndra", "Ahri", "Zed"]);
/// let excluded: BTreeSet<String> = ["Zed".to_string()].into();
/// let team = create_empty_team_state();
/// assert_eq!(generate_candidates(Slot::Mid, &pool, &excluded, &team), ["Ahri", "Syndra"]);
/// ```
pub fn generate_candidates(
    role: Slot,
    pool: &CandidatePool,
    excluded: &BTreeSet<String>,
    team: &TeamState,
) -> Vec<String> {
    let eligible: BTreeSet<&str> = pool
        .champions(role)
        .iter()
        .map(String::as_str)
        .filter(|name| !excluded.contains(*name) && !team.contains(name))
        .collect();
    eligible.into_iter().map(str::to_string).collect()
}

/// Candidates for every open slot of `team`.
pub fn available_by_role(
    team: &TeamState,
    pool: &CandidatePool,
    excluded: &BTreeSet<String>,
) -> BTreeMap<Slot, Vec<String>> {
    team.open_slots()
        .map(|slot| (slot, generate_candidates(slot, pool, excluded, team)))
        .collect()
}
