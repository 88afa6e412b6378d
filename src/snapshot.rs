//! Read-only view of a world for the presentation layer
//!
//! Copies what a frame needs to draw so the UI never holds the world itself.

use serde::Serialize;

use crate::sim::{PerkKind, RoundPhase, World};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerkView {
    pub kind: PerkKind,
    pub remaining_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetView {
    pub id: String,
    pub text: String,
    /// Present while the target is focused or a reveal perk runs
    pub meaning: Option<String>,
    pub x: f32,
    pub y: f32,
    pub focused: bool,
    pub is_super: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSnapshot {
    pub phase: RoundPhase,
    pub score: u64,
    pub streak: u32,
    pub level: u8,
    /// Simulated time the round has been running
    pub elapsed_ms: f64,
    pub input_buffer: String,
    pub perk: Option<PerkView>,
    pub player_x: f32,
    pub player_y: f32,
    pub player_rotation: f32,
    pub targets: Vec<TargetView>,
}

/// Build the frame view; `now_ms` is only used for the perk countdown
pub fn build_snapshot(world: &World, now_ms: f64) -> RoundSnapshot {
    let revealed = world.meanings_revealed();
    let targets = world
        .targets
        .iter()
        .filter(|t| t.is_well_formed())
        .map(|t| TargetView {
            id: t.id.clone(),
            text: t.display_text.clone(),
            meaning: (revealed || t.is_focused).then(|| t.match_text.clone()),
            x: t.position.x,
            y: t.position.y,
            focused: t.is_focused,
            is_super: t.is_super_target,
        })
        .collect();

    RoundSnapshot {
        phase: world.phase(),
        score: world.round.score,
        streak: world.round.streak,
        level: world.round.level,
        elapsed_ms: world.round.elapsed_ms,
        input_buffer: world.round.input_buffer.clone(),
        perk: world.round.active_perk.map(|p| PerkView {
            kind: p.kind,
            remaining_ms: p.remaining_ms(now_ms),
        }),
        player_x: world.player.position.x,
        player_y: world.player.position.y,
        player_rotation: world.player.rotation_degrees,
        targets,
    }
}
