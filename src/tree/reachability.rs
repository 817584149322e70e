//! Best-case test of whether unmet required checks can still be met.
//!
//! Each unmet required check is tested on its own against the champions
//! still available to the open slots. Joint feasibility (two checks that
//! would both need the last open slot) is not considered.

use std::collections::BTreeMap;

use crate::checks::{CheckEvaluation, CheckName};
use crate::team::{ChampionCatalog, ChampionRecord, DamageType, Slot, TeamState};

/// Required checks unmet in `evaluation` that no sequence of picks can
/// satisfy.
///
/// `available` maps slots to candidate names; only slots still open in
/// `team` and names not already on `team` are considered, so a parent's
/// availability map can be reused to test a child state.
pub fn unreachable_required(
    team: &TeamState,
    evaluation: &CheckEvaluation,
    available: &BTreeMap<Slot, Vec<String>>,
    catalog: &ChampionCatalog,
) -> Vec<CheckName> {
    let offers = OpenOffers::new(team, available, catalog);
    evaluation
        .unmet_required()
        .into_iter()
        .filter(|&check| !offers.can_satisfy(check, team, evaluation))
        .collect()
}

/// Records still available per open slot.
struct OpenOffers<'a> {
    by_slot: Vec<(Slot, Vec<&'a ChampionRecord>)>,
}

impl<'a> OpenOffers<'a> {
    fn new(
        team: &TeamState,
        available: &BTreeMap<Slot, Vec<String>>,
        catalog: &'a ChampionCatalog,
    ) -> Self {
        let by_slot = team
            .open_slots()
            .map(|slot| {
                let records = available
                    .get(&slot)
                    .into_iter()
                    .flatten()
                    .filter(|name| !team.contains(name))
                    .filter_map(|name| catalog.get(name))
                    .collect();
                (slot, records)
            })
            .collect();
        Self { by_slot }
    }

    fn any_slot(&self, pred: impl Fn(&ChampionRecord) -> bool) -> bool {
        self.by_slot
            .iter()
            .any(|(_, records)| records.iter().any(|&r| pred(r)))
    }

    fn can_satisfy(&self, check: CheckName, team: &TeamState, evaluation: &CheckEvaluation) -> bool {
        if let Some(tag) = check.tag() {
            return self.any_slot(|r| r.has_tag(tag));
        }
        match check {
            CheckName::DamageMix => self.can_mix_damage(
                evaluation.missing_needs.needs_ad,
                evaluation.missing_needs.needs_ap,
            ),
            CheckName::TopMustBeThreat => {
                if !team.is_open(Slot::Top) {
                    return false;
                }
                self.by_slot
                    .iter()
                    .filter(|(slot, _)| *slot == Slot::Top)
                    .any(|(_, records)| records.iter().any(|r| r.is_top_threat()))
            }
            _ => false,
        }
    }

    fn can_mix_damage(&self, needs_ad: bool, needs_ap: bool) -> bool {
        match (needs_ad, needs_ap) {
            (false, false) => true,
            (true, false) => self.any_slot(|r| r.damage_type.is_physical()),
            (false, true) => self.any_slot(|r| r.damage_type.is_magic()),
            (true, true) => {
                if self.any_slot(|r| r.damage_type == DamageType::Mixed) {
                    return true;
                }
                // Two distinct slots: one physical, one magic.
                self.by_slot.iter().any(|(ad_slot, ad_records)| {
                    ad_records.iter().any(|r| r.damage_type.is_physical())
                        && self.by_slot.iter().any(|(ap_slot, ap_records)| {
                            ap_slot != ad_slot && ap_records.iter().any(|r| r.damage_type.is_magic())
                        })
                })
            }
        }
    }
}
