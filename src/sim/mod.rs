//! Round simulation module
//!
//! All gameplay logic lives here. This module has no rendering or platform
//! dependencies:
//! - World state passed explicitly, never global
//! - Wall-clock time only enters through `TickInput::now_ms`
//! - Stable iteration order (target creation order) decides focus ties

pub mod autoplay;
pub mod collision;
pub mod matching;
pub mod perk;
pub mod scoring;
pub mod setup;
pub mod state;
pub mod tick;

pub use autoplay::Autoplay;
pub use collision::{CollisionResult, first_collision};
pub use matching::{FocusResolution, resolve_focus};
pub use perk::{ActivePerk, PerkKind};
pub use scoring::{RoundSummary, StreakOutcome, match_reward, register_match, round_xp};
pub use setup::{initialize_round, new_round, reset_round, stop_round};
pub use state::{GameEvent, Player, RoundPhase, RoundState, Target, WordItem, World};
pub use tick::{TickInput, advance, tick};
