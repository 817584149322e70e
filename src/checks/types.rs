//! Check names, toggles, and evaluation results.

use std::collections::BTreeMap;
use std::fmt;

use crate::team::CompositionTag;

/// The fixed composition rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CheckName {
    HasHardEngage,
    HasFrontline,
    HasWaveclear,
    HasDisengage,
    HasAntiTank,
    DamageMix,
    TopMustBeThreat,
}

impl CheckName {
    /// All checks in evaluation order.
    pub const ALL: [CheckName; 7] = [
        CheckName::HasHardEngage,
        CheckName::HasFrontline,
        CheckName::HasWaveclear,
        CheckName::HasDisengage,
        CheckName::HasAntiTank,
        CheckName::DamageMix,
        CheckName::TopMustBeThreat,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CheckName::HasHardEngage => "HasHardEngage",
            CheckName::HasFrontline => "HasFrontline",
            CheckName::HasWaveclear => "HasWaveclear",
            CheckName::HasDisengage => "HasDisengage",
            CheckName::HasAntiTank => "HasAntiTank",
            CheckName::DamageMix => "DamageMix",
            CheckName::TopMustBeThreat => "TopMustBeThreat",
        }
    }

    /// Short label used in path rationale.
    pub fn label(self) -> &'static str {
        match self.tag() {
            Some(tag) => tag.label(),
            None if self == CheckName::DamageMix => "Damage Mix",
            None => "Top Threat",
        }
    }

    /// The tag a tag-presence check looks for; `None` for the structural
    /// checks.
    pub fn tag(self) -> Option<CompositionTag> {
        match self {
            CheckName::HasHardEngage => Some(CompositionTag::HardEngage),
            CheckName::HasFrontline => Some(CompositionTag::Frontline),
            CheckName::HasWaveclear => Some(CompositionTag::Waveclear),
            CheckName::HasDisengage => Some(CompositionTag::Disengage),
            CheckName::HasAntiTank => Some(CompositionTag::AntiTank),
            CheckName::DamageMix | CheckName::TopMustBeThreat => None,
        }
    }
}

impl fmt::Display for CheckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which checks must be satisfied for a draft to count as valid.
///
/// Checks absent from the map are treated as not required.
///
/// # Examples
///
/// ```
/// use draft_compose::checks::{CheckName, RequirementToggles};
///
/// let toggles = RequirementToggles::none()
///     .with(CheckName::HasFrontline, true)
///     .with(CheckName::DamageMix, true);
/// assert!(toggles.is_required(CheckName::HasFrontline));
/// assert!(!toggles.is_required(CheckName::HasAntiTank));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequirementToggles {
    required: BTreeMap<CheckName, bool>,
}

impl Default for RequirementToggles {
    /// Engage, frontline, waveclear, damage mix, and a threatening top laner
    /// are required; disengage and anti-tank are reported only.
    fn default() -> Self {
        Self::none()
            .with(CheckName::HasHardEngage, true)
            .with(CheckName::HasFrontline, true)
            .with(CheckName::HasWaveclear, true)
            .with(CheckName::HasDisengage, false)
            .with(CheckName::HasAntiTank, false)
            .with(CheckName::DamageMix, true)
            .with(CheckName::TopMustBeThreat, true)
    }
}

impl RequirementToggles {
    /// No check required.
    pub fn none() -> Self {
        Self {
            required: BTreeMap::new(),
        }
    }

    /// Every check required.
    pub fn all() -> Self {
        CheckName::ALL
            .into_iter()
            .fold(Self::none(), |t, check| t.with(check, true))
    }

    /// Sets whether `check` is required.
    pub fn with(mut self, check: CheckName, required: bool) -> Self {
        self.required.insert(check, required);
        self
    }

    pub fn is_required(&self, check: CheckName) -> bool {
        self.required.get(&check).copied().unwrap_or(false)
    }

    /// Required checks in check order.
    pub fn required_checks(&self) -> impl Iterator<Item = CheckName> + '_ {
        CheckName::ALL
            .into_iter()
            .filter(move |&check| self.is_required(check))
    }
}

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckResult {
    pub satisfied: bool,
    pub required: bool,
    /// `false` only when the check inspects a slot that is still empty.
    pub applicable: bool,
    pub reason: String,
}

/// What the team still lacks, in terms a pick can supply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MissingNeeds {
    /// Tags whose required check is unmet.
    pub tags: Vec<CompositionTag>,
    pub needs_ad: bool,
    pub needs_ap: bool,
    pub needs_top_threat: bool,
}

/// Full result of evaluating a team state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckEvaluation {
    pub checks: BTreeMap<CheckName, CheckResult>,
    pub missing_needs: MissingNeeds,
}

impl CheckEvaluation {
    pub fn result(&self, check: CheckName) -> Option<&CheckResult> {
        self.checks.get(&check)
    }

    pub fn is_satisfied(&self, check: CheckName) -> bool {
        self.result(check).is_some_and(|r| r.satisfied)
    }

    /// Required checks that are not satisfied, in check order.
    pub fn unmet_required(&self) -> Vec<CheckName> {
        self.checks
            .iter()
            .filter(|(_, r)| r.required && !r.satisfied)
            .map(|(&name, _)| name)
            .collect()
    }

    /// Number of required checks that are not satisfied.
    pub fn required_gaps(&self) -> usize {
        self.checks
            .values()
            .filter(|r| r.required && !r.satisfied)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_toggles() {
        let toggles = RequirementToggles::default();
        let required: Vec<_> = toggles.required_checks().collect();
        assert_eq!(
            required,
            vec![
                CheckName::HasHardEngage,
                CheckName::HasFrontline,
                CheckName::HasWaveclear,
                CheckName::DamageMix,
                CheckName::TopMustBeThreat,
            ]
        );
    }

    #[test]
    fn test_all_and_none() {
        assert_eq!(RequirementToggles::all().required_checks().count(), 7);
        assert_eq!(RequirementToggles::none().required_checks().count(), 0);
    }

    #[test]
    fn test_tag_mapping() {
        assert_eq!(
            CheckName::HasAntiTank.tag(),
            Some(CompositionTag::AntiTank)
        );
        assert_eq!(CheckName::DamageMix.tag(), None);
        assert_eq!(CheckName::TopMustBeThreat.to_string(), "TopMustBeThreat");
    }
}
