//! Timed power-ups
//!
//! A perk is a deadline, not a timer: the tick compares the wall clock against
//! `expires_at_ms`, so a late expiry can never clear a newer perk.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::SLOW_MOTION_FACTOR;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerkKind {
    /// Meanings visible on every target
    Reveal,
    /// All targets fall at half speed
    SlowMotion,
}

impl PerkKind {
    pub const ALL: [PerkKind; 2] = [PerkKind::Reveal, PerkKind::SlowMotion];

    /// Uniform pick among all kinds
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// The single perk in effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivePerk {
    pub kind: PerkKind,
    pub activated_at_ms: f64,
    pub expires_at_ms: f64,
}

impl ActivePerk {
    pub fn new(kind: PerkKind, now_ms: f64, duration_ms: f64) -> Self {
        Self {
            kind,
            activated_at_ms: now_ms,
            expires_at_ms: now_ms + duration_ms,
        }
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms >= self.expires_at_ms
    }

    pub fn remaining_ms(&self, now_ms: f64) -> f64 {
        (self.expires_at_ms - now_ms).max(0.0)
    }
}

/// Replace whatever is active with a fresh perk of a newly rolled kind
pub fn activate<R: Rng + ?Sized>(
    slot: &mut Option<ActivePerk>,
    rng: &mut R,
    now_ms: f64,
    duration_ms: f64,
) -> ActivePerk {
    let perk = ActivePerk::new(PerkKind::roll(rng), now_ms, duration_ms);
    if let Some(previous) = slot.replace(perk) {
        log::debug!("Perk {:?} replaced by {:?}", previous.kind, perk.kind);
    }
    perk
}

/// Clear the perk once its deadline has passed; returns the kind that expired
pub fn expire(slot: &mut Option<ActivePerk>, now_ms: f64) -> Option<PerkKind> {
    match *slot {
        Some(perk) if perk.is_expired(now_ms) => {
            *slot = None;
            Some(perk.kind)
        }
        _ => None,
    }
}

/// Target speed multiplier for the active perk
pub fn speed_multiplier(slot: &Option<ActivePerk>) -> f32 {
    match slot {
        Some(ActivePerk {
            kind: PerkKind::SlowMotion,
            ..
        }) => SLOW_MOTION_FACTOR,
        _ => 1.0,
    }
}
