//! Slots and team states.

use std::fmt;
use std::str::FromStr;

use crate::error::{DraftError, Result};

/// One of the five fixed role positions of a composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slot {
    Top,
    Jungle,
    Mid,
    #[cfg_attr(feature = "serde", serde(rename = "ADC"))]
    Adc,
    Support,
}

impl Slot {
    /// All slots in natural order.
    pub const ALL: [Slot; 5] = [Slot::Top, Slot::Jungle, Slot::Mid, Slot::Adc, Slot::Support];

    /// Number of slots in a composition.
    pub const COUNT: usize = 5;

    /// Canonical display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Top => "Top",
            Slot::Jungle => "Jungle",
            Slot::Mid => "Mid",
            Slot::Adc => "ADC",
            Slot::Support => "Support",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Slot::Top),
            "jungle" | "jg" => Ok(Slot::Jungle),
            "mid" | "middle" => Ok(Slot::Mid),
            "adc" | "bot" | "bottom" => Ok(Slot::Adc),
            "support" | "sup" | "supp" => Ok(Slot::Support),
            _ => Err(DraftError::UnknownSlot {
                name: s.to_string(),
            }),
        }
    }
}

/// A snapshot of which champion (if any) occupies each slot.
///
/// Snapshots are cheap to clone and never mutated once handed to the tree
/// builder; each child node owns its own copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamState {
    slots: [Option<String>; Slot::COUNT],
}

/// Returns a team state with every slot empty.
pub fn create_empty_team_state() -> TeamState {
    TeamState::default()
}

/// Coerces a raw slot map into a validated [`TeamState`].
///
/// Slot names are parsed leniently (see [`Slot::from_str`]); champion names
/// are trimmed and empty strings are treated as an empty slot. Slots missing
/// from `raw` stay empty.
///
/// # Errors
///
/// [`DraftError::UnknownSlot`] for an unrecognised slot name and
/// [`DraftError::DuplicateChampion`] when one champion fills two slots and
/// [`DraftError::ConflictingPick`] when a slot is given two different
/// champions.
///
/// # Examples
///
/// ```
/// use draft_compose::team::{normalize_team_state, Slot};
///
/// let team = normalize_team_state([("top", Some(" Garen ")), ("mid", Some(""))]).unwrap();
/// assert_eq!(team.get(Slot::Top), Some("Garen"));
/// assert_eq!(team.get(Slot::Mid), None);
/// ```
pub fn normalize_team_state<I, K, V>(raw: I) -> Result<TeamState>
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut team = TeamState::default();
    for (key, value) in raw {
        let slot: Slot = key.as_ref().parse()?;
        let name = value
            .as_ref()
            .map(|v| v.as_ref().trim())
            .filter(|v| !v.is_empty());
        let Some(name) = name else {
            continue;
        };
        if let Some(existing) = team.get(slot) {
            if existing != name {
                return Err(DraftError::ConflictingPick {
                    slot: slot.to_string(),
                    first: existing.to_string(),
                    second: name.to_string(),
                });
            }
            continue;
        }
        team = team.with_pick(slot, name)?;
    }
    Ok(team)
}

/// Parses a caller-supplied draft order into slots.
///
/// # Errors
///
/// [`DraftError::UnknownSlot`] or [`DraftError::DuplicateRole`].
pub fn parse_role_order<I, S>(names: I) -> Result<Vec<Slot>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut order = Vec::with_capacity(Slot::COUNT);
    for name in names {
        let slot: Slot = name.as_ref().parse()?;
        if order.contains(&slot) {
            return Err(DraftError::DuplicateRole {
                slot: slot.to_string(),
            });
        }
        order.push(slot);
    }
    Ok(order)
}

impl TeamState {
    /// Champion in `slot`, if any.
    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.slots[slot.index()].as_deref()
    }

    /// Whether `slot` is still empty.
    pub fn is_open(&self, slot: Slot) -> bool {
        self.slots[slot.index()].is_none()
    }

    /// Whether `champion` already occupies any slot.
    pub fn contains(&self, champion: &str) -> bool {
        self.picks().any(|(_, name)| name == champion)
    }

    /// Slot holding `champion`, if any.
    pub fn slot_of(&self, champion: &str) -> Option<Slot> {
        self.picks()
            .find(|(_, name)| *name == champion)
            .map(|(slot, _)| slot)
    }

    /// Filled slots with their champions, in slot order.
    pub fn picks(&self) -> impl Iterator<Item = (Slot, &str)> + '_ {
        Slot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|name| (slot, name)))
    }

    /// Empty slots, in slot order.
    pub fn open_slots(&self) -> impl Iterator<Item = Slot> + '_ {
        Slot::ALL.into_iter().filter(move |&slot| self.is_open(slot))
    }

    /// Number of empty slots.
    pub fn remaining(&self) -> usize {
        self.slots.iter().filter(|s| s.is_none()).count()
    }

    /// Whether every slot is filled.
    pub fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns a new snapshot with `champion` placed in `slot`.
    ///
    /// # Errors
    ///
    /// [`DraftError::DuplicateChampion`] if the champion already sits in a
    /// different slot.
    pub fn with_pick(&self, slot: Slot, champion: &str) -> Result<TeamState> {
        if let Some(existing) = self.slot_of(champion) {
            if existing != slot {
                return Err(DraftError::DuplicateChampion {
                    champion: champion.to_string(),
                    first: existing.to_string(),
                    second: slot.to_string(),
                });
            }
        }
        let mut next = self.clone();
        next.slots[slot.index()] = Some(champion.to_string());
        Ok(next)
    }
}
