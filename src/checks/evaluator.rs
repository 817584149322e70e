//! Requirement-check evaluation.

use std::collections::BTreeMap;

use super::types::{CheckEvaluation, CheckName, CheckResult, MissingNeeds, RequirementToggles};
use crate::error::{DraftError, Result};
use crate::team::{ChampionCatalog, ChampionRecord, Slot, TeamState};

/// Evaluates every check against the non-null picks of `team`.
///
/// `TopMustBeThreat` is `applicable` only once Top is filled, but an empty
/// Top still counts as an unmet requirement when the check is required.
///
/// # Errors
///
/// [`DraftError::UnknownChampion`] if a pick is missing from `catalog`.
///
/// # Examples
///
/// ```
/// use draft_compose::checks::{evaluate_composition_checks, CheckName, RequirementToggles};
/// use draft_compose::team::*;
///
/// let catalog: ChampionCatalog = [ChampionRecord::new("Leona", DamageType::Ap, ScalingPhase::Early)
///     .with_roles([Slot::Support])
///     .with_tags([CompositionTag::HardEngage, CompositionTag::Frontline])]
///     .into_iter()
///     .collect();
/// let team = create_empty_team_state().with_pick(Slot::Support, "Leona").unwrap();
/// let eval = evaluate_composition_checks(&team, &catalog, &RequirementToggles::default()).unwrap();
/// assert!(eval.is_satisfied(CheckName::HasHardEngage));
/// assert!(eval.missing_needs.needs_ad);
/// ```
pub fn evaluate_composition_checks(
    team: &TeamState,
    catalog: &ChampionCatalog,
    toggles: &RequirementToggles,
) -> Result<CheckEvaluation> {
    let mut picks: Vec<(Slot, &ChampionRecord)> = Vec::with_capacity(Slot::COUNT);
    for (slot, name) in team.picks() {
        let record = catalog
            .get(name)
            .ok_or_else(|| DraftError::UnknownChampion {
                name: name.to_string(),
                context: format!("the {slot} slot"),
            })?;
        picks.push((slot, record));
    }

    let mut checks = BTreeMap::new();
    let mut missing = MissingNeeds::default();

    for check in CheckName::ALL {
        let required = toggles.is_required(check);
        let result = match check {
            CheckName::DamageMix => {
                let (result, needs_ad, needs_ap) = damage_mix(&picks, required);
                missing.needs_ad = needs_ad;
                missing.needs_ap = needs_ap;
                result
            }
            CheckName::TopMustBeThreat => {
                let result = top_threat(team, catalog, required);
                missing.needs_top_threat = required && !result.satisfied;
                result
            }
            tagged => tag_presence(tagged, &picks, required),
        };
        if required && !result.satisfied {
            if let Some(tag) = check.tag() {
                missing.tags.push(tag);
            }
        }
        checks.insert(check, result);
    }

    Ok(CheckEvaluation {
        checks,
        missing_needs: missing,
    })
}

fn tag_presence(check: CheckName, picks: &[(Slot, &ChampionRecord)], required: bool) -> CheckResult {
    let Some(tag) = check.tag() else {
        return CheckResult {
            satisfied: false,
            required,
            applicable: false,
            reason: format!("{check} has no tag"),
        };
    };
    let providers: Vec<&str> = picks
        .iter()
        .filter(|(_, record)| record.has_tag(tag))
        .map(|(_, record)| record.name.as_str())
        .collect();
    let satisfied = !providers.is_empty();
    let reason = if satisfied {
        format!("{tag} from {}", providers.join(", "))
    } else {
        format!("No pick provides {tag}")
    };
    CheckResult {
        satisfied,
        required,
        applicable: true,
        reason,
    }
}

/// Returns the result plus `(needs_ad, needs_ap)`.
fn damage_mix(picks: &[(Slot, &ChampionRecord)], required: bool) -> (CheckResult, bool, bool) {
    let has_ad = picks.iter().any(|(_, r)| r.damage_type.is_physical());
    let has_ap = picks.iter().any(|(_, r)| r.damage_type.is_magic());
    let satisfied = has_ad && has_ap;
    let reason = match (has_ad, has_ap) {
        (true, true) => "Both physical and magic damage present".to_string(),
        (false, true) => "Missing an AD or mixed damage source".to_string(),
        (true, false) => "Missing an AP or mixed damage source".to_string(),
        (false, false) => "No damage sources picked yet".to_string(),
    };
    (
        CheckResult {
            satisfied,
            required,
            applicable: true,
            reason,
        },
        !has_ad,
        !has_ap,
    )
}

fn top_threat(team: &TeamState, catalog: &ChampionCatalog, required: bool) -> CheckResult {
    match team.get(Slot::Top).and_then(|name| catalog.get(name)) {
        Some(record) if record.is_top_threat() => CheckResult {
            satisfied: true,
            required,
            applicable: true,
            reason: format!("{} threatens side lanes or dives", record.name),
        },
        Some(record) => CheckResult {
            satisfied: false,
            required,
            applicable: true,
            reason: format!(
                "{} is neither a side-lane nor a dive threat",
                record.name
            ),
        },
        None => CheckResult {
            satisfied: false,
            required,
            applicable: false,
            reason: "Top is open; pick a side-lane or dive threat".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::{create_empty_team_state, CompositionTag, DamageType, ScalingPhase};

    fn catalog() -> ChampionCatalog {
        [
            ChampionRecord::new("Ornn", DamageType::Ap, ScalingPhase::Late)
                .with_roles([Slot::Top])
                .with_tags([CompositionTag::HardEngage, CompositionTag::Frontline]),
            ChampionRecord::new("Camille", DamageType::Ad, ScalingPhase::Mid)
                .with_roles([Slot::Top])
                .with_tags([CompositionTag::SideLaneThreat, CompositionTag::DiveThreat]),
            ChampionRecord::new("Jax", DamageType::Mixed, ScalingPhase::Late)
                .with_roles([Slot::Top, Slot::Jungle])
                .with_tags([CompositionTag::SideLaneThreat]),
            ChampionRecord::new("Anivia", DamageType::Ap, ScalingPhase::Late)
                .with_roles([Slot::Mid])
                .with_tags([CompositionTag::Waveclear]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_empty_team_has_every_required_gap() {
        let toggles = RequirementToggles::all();
        let eval =
            evaluate_composition_checks(&create_empty_team_state(), &catalog(), &toggles).unwrap();
        assert_eq!(eval.required_gaps(), 7);
        assert!(eval.missing_needs.needs_ad);
        assert!(eval.missing_needs.needs_ap);
        assert!(eval.missing_needs.needs_top_threat);
        assert_eq!(eval.missing_needs.tags.len(), 5);
    }

    #[test]
    fn test_empty_top_is_not_applicable_but_still_a_gap() {
        let toggles = RequirementToggles::none().with(CheckName::TopMustBeThreat, true);
        let eval =
            evaluate_composition_checks(&create_empty_team_state(), &catalog(), &toggles).unwrap();
        let top = eval.result(CheckName::TopMustBeThreat).unwrap();
        assert!(!top.applicable);
        assert!(!top.satisfied);
        assert_eq!(eval.required_gaps(), 1);
    }

    #[test]
    fn test_top_threat_satisfied() {
        let team = create_empty_team_state()
            .with_pick(Slot::Top, "Camille")
            .unwrap();
        let eval =
            evaluate_composition_checks(&team, &catalog(), &RequirementToggles::default()).unwrap();
        let top = eval.result(CheckName::TopMustBeThreat).unwrap();
        assert!(top.applicable && top.satisfied);
        assert!(!eval.missing_needs.needs_top_threat);
    }

    #[test]
    fn test_non_threat_top_fails_applicable_check() {
        let team = create_empty_team_state().with_pick(Slot::Top, "Ornn").unwrap();
        let eval =
            evaluate_composition_checks(&team, &catalog(), &RequirementToggles::default()).unwrap();
        let top = eval.result(CheckName::TopMustBeThreat).unwrap();
        assert!(top.applicable);
        assert!(!top.satisfied);
        assert!(top.reason.contains("Ornn"));
    }

    #[test]
    fn test_mixed_damage_satisfies_both_sides() {
        let team = create_empty_team_state().with_pick(Slot::Jungle, "Jax").unwrap();
        let eval =
            evaluate_composition_checks(&team, &catalog(), &RequirementToggles::default()).unwrap();
        assert!(eval.is_satisfied(CheckName::DamageMix));
        assert!(!eval.missing_needs.needs_ad);
        assert!(!eval.missing_needs.needs_ap);
    }

    #[test]
    fn test_optional_checks_do_not_count_as_gaps() {
        let toggles = RequirementToggles::none().with(CheckName::HasWaveclear, true);
        let team = create_empty_team_state()
            .with_pick(Slot::Mid, "Anivia")
            .unwrap();
        let eval = evaluate_composition_checks(&team, &catalog(), &toggles).unwrap();
        assert_eq!(eval.required_gaps(), 0);
        assert!(!eval.is_satisfied(CheckName::HasFrontline));
        assert!(eval.missing_needs.tags.is_empty());
        let wave = eval.result(CheckName::HasWaveclear).unwrap();
        assert_eq!(wave.reason, "Waveclear from Anivia");
    }

    #[test]
    fn test_unknown_pick_is_rejected() {
        let team = create_empty_team_state().with_pick(Slot::Mid, "Nobody").unwrap();
        let result = evaluate_composition_checks(&team, &catalog(), &RequirementToggles::default());
        assert!(matches!(result, Err(DraftError::UnknownChampion { .. })));
    }
}
