//! Round state and core simulation types
//!
//! Everything a round needs lives in one `World` value. The frame driver owns
//! it and hands it to `tick` by mutable reference; nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::perk::{ActivePerk, PerkKind};
use super::scoring::RoundSummary;
use crate::consts::MIN_LEVEL;
use crate::tuning::Tuning;

/// A vocabulary item supplied by the word source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordItem {
    pub id: String,
    /// Foreign word shown on the target
    pub name: String,
    /// Meaning the player has to type
    pub meaning: String,
}

impl WordItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            meaning: meaning.into(),
        }
    }
}

/// The player's avatar, anchored at the bottom of the play area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    /// Aim heading, 0 = straight up, positive clockwise
    pub rotation_degrees: f32,
}

impl Player {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            rotation_degrees: 0.0,
        }
    }
}

/// A falling word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Stable id taken from the word item
    pub id: String,
    pub display_text: String,
    pub match_text: String,
    pub position: Vec2,
    /// Units per millisecond
    pub base_speed: f32,
    pub is_focused: bool,
    pub is_super_target: bool,
    /// Set once a malformed-entity warning has been logged
    #[serde(skip)]
    pub warned_malformed: bool,
}

impl Target {
    pub fn from_word(word: &WordItem, position: Vec2, base_speed: f32) -> Self {
        Self {
            id: word.id.clone(),
            display_text: word.name.clone(),
            match_text: word.meaning.clone(),
            position,
            base_speed,
            is_focused: false,
            is_super_target: false,
            warned_malformed: false,
        }
    }

    /// Position and speed are usable numbers
    pub fn is_well_formed(&self) -> bool {
        self.position.is_finite() && self.base_speed.is_finite() && self.base_speed >= 0.0
    }
}

/// Lifecycle of a round, derived from the running/over flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No round in progress (fresh, stopped, or reset)
    Idle,
    /// Targets falling, input accepted
    Running,
    /// A target reached the player; terminal until reset
    Over,
}

/// Round-level counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub input_buffer: String,
    pub focused_target_id: Option<String>,
    pub score: u64,
    pub streak: u32,
    /// Always within 1..=5
    pub level: u8,
    pub is_running: bool,
    pub is_over: bool,
    pub active_perk: Option<ActivePerk>,
    pub pending_super_target_id: Option<String>,
    /// Exact matches this round
    pub matches: u32,
    /// Simulated milliseconds while running
    pub elapsed_ms: f64,
}

impl Default for RoundState {
    fn default() -> Self {
        Self {
            input_buffer: String::new(),
            focused_target_id: None,
            score: 0,
            streak: 0,
            level: MIN_LEVEL,
            is_running: false,
            is_over: false,
            active_perk: None,
            pending_super_target_id: None,
            matches: 0,
            elapsed_ms: 0.0,
        }
    }
}

impl RoundState {
    pub fn phase(&self) -> RoundPhase {
        if self.is_over {
            RoundPhase::Over
        } else if self.is_running {
            RoundPhase::Running
        } else {
            RoundPhase::Idle
        }
    }

    /// Kind of the active perk, if any
    pub fn perk_kind(&self) -> Option<PerkKind> {
        self.active_perk.map(|p| p.kind)
    }
}

/// Things that happened during a tick, for sound/UI feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    TargetFocused { id: String },
    FocusCleared,
    TargetCleared { id: String, reward: u64, was_super: bool },
    SuperTargetDesignated { id: String },
    PerkActivated { kind: PerkKind, expires_at_ms: f64 },
    PerkExpired { kind: PerkKind },
    LevelUp { level: u8 },
    RoundOver { summary: RoundSummary },
}

/// Complete round world: player, targets, counters and RNG
#[derive(Debug, Clone)]
pub struct World {
    pub tuning: Tuning,
    pub player: Player,
    /// Creation order is the focus tie-break order
    pub targets: Vec<Target>,
    pub round: RoundState,
    pub rng: Pcg32,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl World {
    /// An idle world with no targets
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let player = Player::at(tuning.player_anchor());
        Self {
            tuning,
            player,
            targets: Vec::new(),
            round: RoundState::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase()
    }

    pub fn focused_target(&self) -> Option<&Target> {
        self.targets.iter().find(|t| t.is_focused)
    }

    /// Meaning text is shown for every target while a reveal perk runs
    pub fn meanings_revealed(&self) -> bool {
        self.round.perk_kind() == Some(PerkKind::Reveal)
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary::from_round(&self.round)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
