//! Team model: role slots, team states, and the champion catalog.
//!
//! A [`TeamState`] is a total map from [`Slot`] to an optional champion
//! name. No champion may occupy two slots; [`normalize_team_state`] and
//! [`TeamState::with_pick`] enforce that invariant.
//!
//! [`ChampionCatalog`] is the lookup the evaluator and candidate generator
//! consult. Catalog ingestion is the host's concern; this module only holds
//! the records it is handed.

mod champion;
mod state;

pub use champion::{ChampionCatalog, ChampionRecord, CompositionTag, DamageType, ScalingPhase};
pub use state::{
    create_empty_team_state, normalize_team_state, parse_role_order, Slot, TeamState,
};
