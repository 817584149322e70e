//! Draft composition decision engine.
//!
//! Given a team's partial draft, the engine answers two questions: how good
//! is this composition, and which sequences of remaining picks lead to a
//! complete composition that meets every required check.
//!
//! - **Requirement checks**: a fixed rule set (engage, frontline, waveclear,
//!   disengage, anti-tank, damage mix, threatening top laner) evaluated
//!   against a team state, with caller-chosen checks marked required.
//! - **Composition scoring**: one integer per team state, ordered so that
//!   any required gap ranks below every gap-free composition.
//! - **Possibility tree**: a width- and depth-bounded search over the open
//!   slots with score-floor, relative-window, and reachability pruning, a
//!   fallback when the floor empties a role, and per-node viability facts.
//!
//! # Architecture
//!
//! The engine is pure and synchronous. Catalog ingestion, pool storage, and
//! rendering belong to the host, which hands in a [`team::ChampionCatalog`]
//! and optional team pools and receives an immutable [`tree::TreeNode`].
//!
//! # Example
//!
//! ```
//! use draft_compose::team::*;
//! use draft_compose::checks::RequirementToggles;
//! use draft_compose::{evaluate_composition_checks, score_node_from_checks};
//! use draft_compose::checks::ScoreWeights;
//!
//! let catalog: ChampionCatalog = [
//!     ChampionRecord::new("Malphite", DamageType::Ap, ScalingPhase::Mid)
//!         .with_roles([Slot::Top])
//!         .with_tags([CompositionTag::HardEngage, CompositionTag::Frontline]),
//! ]
//! .into_iter()
//! .collect();
//!
//! let team = create_empty_team_state().with_pick(Slot::Top, "Malphite").unwrap();
//! let eval = evaluate_composition_checks(&team, &catalog, &RequirementToggles::default()).unwrap();
//! assert!(eval.required_gaps() > 0);
//! assert!(score_node_from_checks(&eval, &ScoreWeights::default()) < 0);
//! ```

pub mod candidates;
pub mod checks;
pub mod error;
pub mod team;
pub mod tree;

pub use checks::{evaluate_composition_checks, score_node_from_checks};
pub use error::{DraftError, Result};
pub use team::{create_empty_team_state, normalize_team_state};
pub use tree::generate_possibility_tree;
