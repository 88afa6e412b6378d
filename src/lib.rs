//! Falling Words - typing-combat engine for vocabulary practice
//!
//! Core modules:
//! - `sim`: Round simulation (targets, matching, perks, scoring, collision)
//! - `session`: Frame-loop driver owning a world, clock and input buffer
//! - `platform`: Wall-clock abstraction (native/browser)
//! - `tuning`: Data-driven game balance
//! - `snapshot`: Read-only frame view for the presentation layer
//! - `highscores`: Leaderboard of finished rounds

pub mod error;
pub mod highscores;
pub mod platform;
pub mod session;
pub mod sim;
pub mod snapshot;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod bindings;

pub use error::{EngineError, Result};
pub use highscores::HighScores;
pub use session::{RoundSession, SummaryRecorder, VocabularySource};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Lowest and highest difficulty level
    pub const MIN_LEVEL: u8 = 1;
    pub const MAX_LEVEL: u8 = 5;

    /// Score for clearing a regular target
    pub const BASE_REWARD: u64 = 10;
    /// Extra score for clearing the designated super-target
    pub const SUPER_BONUS: u64 = 30;
    /// Consecutive matches needed to level up
    pub const LEVEL_UP_STREAK: u32 = 10;

    /// Perk lifetime (real milliseconds, independent of tick rate)
    pub const PERK_DURATION_MS: f64 = 10_000.0;
    /// Speed multiplier while slow-motion is active
    pub const SLOW_MOTION_FACTOR: f32 = 0.5;

    /// Homing is weaker sideways than downward so targets "fall"
    pub const HORIZONTAL_HOMING: f32 = 0.5;
    pub const VERTICAL_HOMING: f32 = 1.0;

    /// Ceiling on XP awarded for a single round
    pub const MAX_ROUND_XP: u32 = 200;
}

/// Clamp any requested level into the playable range
#[inline]
pub fn clamp_level(level: i64) -> u8 {
    level.clamp(consts::MIN_LEVEL as i64, consts::MAX_LEVEL as i64) as u8
}

/// Normalized angle to [-180, 180) degrees
#[inline]
pub fn normalize_degrees(mut angle: f32) -> f32 {
    while angle >= 180.0 {
        angle -= 360.0;
    }
    while angle < -180.0 {
        angle += 360.0;
    }
    angle
}

/// Heading in degrees from `from` to `to`, 0 pointing up the screen (negative y),
/// positive clockwise. `None` when the points coincide.
#[inline]
pub fn heading_degrees(from: Vec2, to: Vec2) -> Option<f32> {
    let d = to - from;
    if d.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(d.x.atan2(-d.y).to_degrees())
}
