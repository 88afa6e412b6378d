//! Score, streak and level arithmetic
//!
//! Pure functions only; the tick applies their results.

use serde::{Deserialize, Serialize};

use super::state::RoundState;
use crate::consts::*;

/// Score awarded for clearing a target
pub fn match_reward(base_reward: u64, super_bonus: u64, was_super: bool) -> u64 {
    if was_super {
        base_reward + super_bonus
    } else {
        base_reward
    }
}

/// Streak and level after one more exact match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakOutcome {
    pub streak: u32,
    pub level: u8,
    pub leveled_up: bool,
}

/// Count a match toward the streak. Reaching `threshold` resets the streak and
/// raises the level (capped at 5); at the cap the streak still resets.
pub fn register_match(streak: u32, level: u8, threshold: u32) -> StreakOutcome {
    let level = level.clamp(MIN_LEVEL, MAX_LEVEL);
    let streak = streak.saturating_add(1);
    if streak >= threshold {
        let next = (level + 1).min(MAX_LEVEL);
        StreakOutcome {
            streak: 0,
            level: next,
            leveled_up: next > level,
        }
    } else {
        StreakOutcome {
            streak,
            level,
            leveled_up: false,
        }
    }
}

/// XP for a finished round: a tenth of the score plus stepped bonuses,
/// each step worth less than the one before, capped at `MAX_ROUND_XP`.
pub fn round_xp(score: u64, level: u8, streak: u32) -> u32 {
    let mut xp = (score / 10).min(MAX_ROUND_XP as u64) as u32;

    if score >= 500 {
        xp += 20;
    }
    if score >= 1000 {
        xp += 30;
    }
    if level >= 3 {
        xp += 15;
    }
    if level >= MAX_LEVEL {
        xp += 10;
    }
    if streak >= 10 {
        xp += 10;
    }
    if streak >= 20 {
        xp += 5;
    }

    xp.min(MAX_ROUND_XP)
}

/// End-of-round numbers handed to the XP recorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub score: u64,
    pub level: u8,
    pub streak: u32,
    pub matches: u32,
    pub xp: u32,
}

impl RoundSummary {
    pub fn from_round(round: &RoundState) -> Self {
        Self {
            score: round.score,
            level: round.level,
            streak: round.streak,
            matches: round.matches,
            xp: round_xp(round.score, round.level, round.streak),
        }
    }
}
