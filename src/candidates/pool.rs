//! Candidate pools and pool resolution.

use std::collections::BTreeMap;

use crate::error::{DraftError, Result};
use crate::team::{ChampionCatalog, Slot};

/// Champions eligible for each slot in one context.
///
/// Entries are stored in insertion order; duplicates are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidatePool {
    by_slot: BTreeMap<Slot, Vec<String>>,
}

/// Team-scoped pools keyed by team id.
pub type TeamPools = BTreeMap<String, CandidatePool>;

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one champion to a slot's pool.
    pub fn add(&mut self, slot: Slot, champion: impl Into<String>) {
        let champion = champion.into();
        let entries = self.by_slot.entry(slot).or_default();
        if !entries.contains(&champion) {
            entries.push(champion);
        }
    }

    /// Builder form of [`add`](Self::add) for a batch of champions.
    pub fn with_slot<I, S>(mut self, slot: Slot, champions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for champion in champions {
            self.add(slot, champion);
        }
        self
    }

    /// Champions listed for `slot` (empty if none).
    pub fn champions(&self, slot: Slot) -> &[String] {
        self.by_slot.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every `(slot, champion)` entry, in slot order.
    pub fn entries(&self) -> impl Iterator<Item = (Slot, &str)> + '_ {
        self.by_slot
            .iter()
            .flat_map(|(&slot, names)| names.iter().map(move |n| (slot, n.as_str())))
    }

    /// Checks that every entry exists in `catalog`.
    ///
    /// # Errors
    ///
    /// [`DraftError::UnknownChampion`] naming the first missing entry.
    pub fn validate(&self, catalog: &ChampionCatalog) -> Result<()> {
        for (slot, name) in self.entries() {
            if !catalog.contains(name) {
                return Err(DraftError::UnknownChampion {
                    name: name.to_string(),
                    context: format!("the {slot} pool"),
                });
            }
        }
        Ok(())
    }
}

/// Picks the pool for a draft context.
///
/// With a `team_id` the team-scoped pool is used; otherwise the global pool
/// from the catalog. The chosen pool is validated against the catalog.
///
/// # Errors
///
/// [`DraftError::UnknownTeam`] if `team_id` has no registered pool and
/// [`DraftError::UnknownChampion`] for pool entries missing from the catalog.
pub fn resolve_pool(
    team_id: Option<&str>,
    team_pools: &TeamPools,
    catalog: &ChampionCatalog,
) -> Result<CandidatePool> {
    let pool = match team_id {
        Some(id) => team_pools
            .get(id)
            .cloned()
            .ok_or_else(|| DraftError::UnknownTeam {
                team_id: id.to_string(),
            })?,
        None => catalog.global_pool(),
    };
    pool.validate(catalog)?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::{ChampionRecord, DamageType, ScalingPhase};

    fn catalog() -> ChampionCatalog {
        [
            ChampionRecord::new("Ornn", DamageType::Ad, ScalingPhase::Late).with_roles([Slot::Top]),
            ChampionRecord::new("Ahri", DamageType::Ap, ScalingPhase::Mid).with_roles([Slot::Mid]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_add_ignores_duplicates() {
        let pool = CandidatePool::new().with_slot(Slot::Top, ["Ornn", "Ornn"]);
        assert_eq!(pool.champions(Slot::Top), ["Ornn"]);
    }

    #[test]
    fn test_resolve_global_pool() {
        let pool = resolve_pool(None, &TeamPools::new(), &catalog()).unwrap();
        assert_eq!(pool.champions(Slot::Mid), ["Ahri"]);
    }

    #[test]
    fn test_resolve_team_pool() {
        let mut pools = TeamPools::new();
        pools.insert(
            "blue".into(),
            CandidatePool::new().with_slot(Slot::Mid, ["Ornn"]),
        );
        let pool = resolve_pool(Some("blue"), &pools, &catalog()).unwrap();
        assert_eq!(pool.champions(Slot::Mid), ["Ornn"]);
        assert!(pool.champions(Slot::Top).is_empty());
    }

    #[test]
    fn test_resolve_unknown_team() {
        let result = resolve_pool(Some("red"), &TeamPools::new(), &catalog());
        assert!(matches!(result, Err(DraftError::UnknownTeam { .. })));
    }

    #[test]
    fn test_pool_entry_missing_from_catalog() {
        let mut pools = TeamPools::new();
        pools.insert(
            "blue".into(),
            CandidatePool::new().with_slot(Slot::Top, ["Teemo"]),
        );
        let result = resolve_pool(Some("blue"), &pools, &catalog());
        assert!(matches!(
            result,
            Err(DraftError::UnknownChampion { ref name, .. }) if name == "Teemo"
        ));
    }
}
