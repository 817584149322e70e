//! Champion records and the catalog lookup.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::state::Slot;
use crate::candidates::CandidatePool;

/// Damage profile of a champion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageType {
    #[cfg_attr(feature = "serde", serde(rename = "AD"))]
    Ad,
    #[cfg_attr(feature = "serde", serde(rename = "AP"))]
    Ap,
    Mixed,
}

impl DamageType {
    /// Counts toward the physical side of a damage mix.
    pub fn is_physical(self) -> bool {
        matches!(self, DamageType::Ad | DamageType::Mixed)
    }

    /// Counts toward the magic side of a damage mix.
    pub fn is_magic(self) -> bool {
        matches!(self, DamageType::Ap | DamageType::Mixed)
    }
}

/// Point in the game where a champion peaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalingPhase {
    Early,
    Mid,
    Late,
}

/// Boolean composition tags a champion may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompositionTag {
    HardEngage,
    Frontline,
    Waveclear,
    Disengage,
    AntiTank,
    SideLaneThreat,
    DiveThreat,
}

impl CompositionTag {
    /// Human-readable label used in check reasons and path rationale.
    pub fn label(self) -> &'static str {
        match self {
            CompositionTag::HardEngage => "Hard Engage",
            CompositionTag::Frontline => "Frontline",
            CompositionTag::Waveclear => "Waveclear",
            CompositionTag::Disengage => "Disengage",
            CompositionTag::AntiTank => "Anti-Tank",
            CompositionTag::SideLaneThreat => "Side-Lane Threat",
            CompositionTag::DiveThreat => "Dive Threat",
        }
    }
}

impl fmt::Display for CompositionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the engine needs to know about one champion.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChampionRecord {
    pub name: String,
    pub roles: BTreeSet<Slot>,
    pub damage_type: DamageType,
    pub scaling: ScalingPhase,
    pub tags: BTreeSet<CompositionTag>,
}

impl ChampionRecord {
    /// Creates a record with no roles and no tags.
    pub fn new(name: impl Into<String>, damage_type: DamageType, scaling: ScalingPhase) -> Self {
        Self {
            name: name.into(),
            roles: BTreeSet::new(),
            damage_type,
            scaling,
            tags: BTreeSet::new(),
        }
    }

    /// Adds eligible roles.
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Slot>) -> Self {
        self.roles.extend(roles);
        self
    }

    /// Adds composition tags.
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = CompositionTag>) -> Self {
        self.tags.extend(tags);
        self
    }

    pub fn has_tag(&self, tag: CompositionTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Whether this champion is a split-push or dive threat.
    pub fn is_top_threat(&self) -> bool {
        self.has_tag(CompositionTag::SideLaneThreat) || self.has_tag(CompositionTag::DiveThreat)
    }
}

/// Name-keyed champion lookup.
///
/// Records are kept in name order so every derived pool iterates the same
/// way on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChampionCatalog {
    champions: BTreeMap<String, ChampionRecord>,
}

impl ChampionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a record.
    pub fn insert(&mut self, record: ChampionRecord) {
        self.champions.insert(record.name.clone(), record);
    }

    pub fn get(&self, name: &str) -> Option<&ChampionRecord> {
        self.champions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.champions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.champions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.champions.is_empty()
    }

    /// Records in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ChampionRecord> {
        self.champions.values()
    }

    /// The pool used when no team is selected: every champion listed under
    /// each role it can play.
    pub fn global_pool(&self) -> CandidatePool {
        let mut pool = CandidatePool::new();
        for record in self.champions.values() {
            for &slot in &record.roles {
                pool.add(slot, record.name.clone());
            }
        }
        pool
    }
}

impl FromIterator<ChampionRecord> for ChampionCatalog {
    fn from_iter<T: IntoIterator<Item = ChampionRecord>>(iter: T) -> Self {
        let mut catalog = ChampionCatalog::new();
        for record in iter {
            catalog.insert(record);
        }
        catalog
    }
}
