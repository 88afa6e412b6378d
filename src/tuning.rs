//! Data-driven game balance
//!
//! Loaded from JSON (missing fields fall back to defaults) and validated before
//! a round uses it.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{EngineError, Result};

/// Target speed bounds for one level (play-area units per millisecond)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

/// Balance knobs for a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play area ===
    /// Play area width
    pub width: f32,
    /// Play area height
    pub height: f32,
    /// Distance of the player anchor above the bottom edge
    pub player_margin: f32,
    /// Horizontal inset for spawn positions
    pub spawn_margin: f32,
    /// Respawned targets appear between `-respawn_band` and `-respawn_clearance`
    pub respawn_band: f32,
    pub respawn_clearance: f32,

    // === Difficulty ===
    /// Speed range per level, index 0 is level 1
    pub speeds: [SpeedRange; MAX_LEVEL as usize],
    /// A target closer than this to the player ends the round
    pub collision_radius: f32,
    /// Chance that a regular match designates a super-target
    pub super_chance: f64,
    /// Words seeded into a session round at most
    pub max_targets: usize,

    // === Scoring ===
    pub base_reward: u64,
    pub super_bonus: u64,
    pub level_up_streak: u32,

    // === Timing ===
    /// Perk lifetime in milliseconds
    pub perk_duration_ms: f64,
    /// Exponential damping rate for avatar aim (per millisecond)
    pub rotation_rate: f32,
    /// Longest frame the simulation will integrate in one tick
    pub max_delta_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: 360.0,
            height: 640.0,
            player_margin: 60.0,
            spawn_margin: 40.0,
            respawn_band: 160.0,
            respawn_clearance: 20.0,

            speeds: [
                SpeedRange::new(0.020, 0.035),
                SpeedRange::new(0.025, 0.045),
                SpeedRange::new(0.032, 0.055),
                SpeedRange::new(0.040, 0.068),
                SpeedRange::new(0.050, 0.085),
            ],
            collision_radius: 36.0,
            super_chance: 0.2,
            max_targets: 6,

            base_reward: BASE_REWARD,
            super_bonus: SUPER_BONUS,
            level_up_streak: LEVEL_UP_STREAK,

            perk_duration_ms: PERK_DURATION_MS,
            rotation_rate: 0.012,
            max_delta_ms: 100.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Speed range for a level (clamped into 1..=5)
    pub fn speed_range(&self, level: u8) -> SpeedRange {
        let idx = level.clamp(MIN_LEVEL, MAX_LEVEL) - MIN_LEVEL;
        self.speeds[idx as usize]
    }

    /// Where the player sits: bottom-center of the play area
    pub fn player_anchor(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width / 2.0, self.height - self.player_margin)
    }

    /// Reject balance tables that would break difficulty scaling or geometry
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(EngineError::InvalidTuning(msg));

        let scalars = [
            ("width", self.width as f64),
            ("height", self.height as f64),
            ("player_margin", self.player_margin as f64),
            ("spawn_margin", self.spawn_margin as f64),
            ("respawn_band", self.respawn_band as f64),
            ("respawn_clearance", self.respawn_clearance as f64),
            ("collision_radius", self.collision_radius as f64),
            ("super_chance", self.super_chance),
            ("perk_duration_ms", self.perk_duration_ms),
            ("rotation_rate", self.rotation_rate as f64),
            ("max_delta_ms", self.max_delta_ms),
        ];
        if let Some((name, value)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return invalid(format!("{} must be finite, got {}", name, value));
        }

        if !(self.width > 0.0 && self.height > 0.0) {
            return invalid(format!("play area {}x{} must be positive", self.width, self.height));
        }
        if self.spawn_margin * 2.0 >= self.width {
            return invalid(format!("spawn margin {} leaves no room", self.spawn_margin));
        }
        if !(self.player_margin >= 0.0 && self.player_margin < self.height) {
            return invalid(format!("player margin {} outside play area", self.player_margin));
        }
        if !(self.respawn_band > self.respawn_clearance && self.respawn_clearance >= 0.0) {
            return invalid("respawn band must lie above the clearance".to_string());
        }
        if !(self.collision_radius > 0.0) {
            return invalid("collision radius must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&self.super_chance) {
            return invalid(format!("super chance {} outside [0, 1]", self.super_chance));
        }
        if self.max_targets == 0 {
            return invalid("max targets must be at least 1".to_string());
        }
        if self.level_up_streak == 0 {
            return invalid("level-up streak must be at least 1".to_string());
        }
        if !(self.perk_duration_ms > 0.0 && self.max_delta_ms > 0.0) {
            return invalid("durations must be positive".to_string());
        }
        if !(self.rotation_rate >= 0.0) {
            return invalid("rotation rate must not be negative".to_string());
        }

        for (i, range) in self.speeds.iter().enumerate() {
            if !(range.min > 0.0 && range.min <= range.max && range.max.is_finite()) {
                return invalid(format!("level {} speed range {:?} is empty", i + 1, range));
            }
        }
        for (i, pair) in self.speeds.windows(2).enumerate() {
            if pair[1].min < pair[0].min || pair[1].max < pair[0].max {
                return invalid(format!(
                    "level {} is slower than level {}",
                    i + 2,
                    i + 1
                ));
            }
        }
        Ok(())
    }
}
