//! Per-frame simulation tick
//!
//! One call per host animation frame. All round mutation happens here, in a
//! fixed order: input write, perk expiry, movement, collision, matching,
//! exact-match resolution, aiming.

use glam::Vec2;
use rand::Rng;

use super::collision::{self, direction_to};
use super::matching::{self, FocusResolution};
use super::perk;
use super::scoring;
use super::setup::{respawn_position, roll_speed};
use super::state::{GameEvent, RoundPhase, World};
use crate::consts::*;
use crate::{heading_degrees, normalize_degrees};

/// Everything the host supplies for one tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Wall clock (epoch milliseconds), used for perk deadlines
    pub now_ms: f64,
    /// Input buffer written by the text field since the last tick
    pub input_buffer: Option<String>,
}

impl TickInput {
    pub fn at(now_ms: f64) -> Self {
        Self {
            now_ms,
            input_buffer: None,
        }
    }

    pub fn typed(now_ms: f64, text: impl Into<String>) -> Self {
        Self {
            now_ms,
            input_buffer: Some(text.into()),
        }
    }
}

/// Advance the round by `delta_ms`. Does nothing unless the round is running.
pub fn tick(world: &mut World, input: &TickInput, delta_ms: f64) {
    if world.phase() != RoundPhase::Running {
        return;
    }

    let delta_ms = if delta_ms.is_finite() {
        delta_ms.clamp(0.0, world.tuning.max_delta_ms)
    } else {
        0.0
    };

    if let Some(text) = &input.input_buffer {
        world.round.input_buffer.clone_from(text);
    }

    if let Some(kind) = perk::expire(&mut world.round.active_perk, input.now_ms) {
        log::debug!("Perk {:?} expired", kind);
        world.events.push(GameEvent::PerkExpired { kind });
    }

    world.round.elapsed_ms += delta_ms;
    move_targets(world, delta_ms);

    let player = world.player.position;
    if let Some(hit) =
        collision::first_collision(&world.targets, player, world.tuning.collision_radius)
    {
        collision::terminate(world, hit);
        return;
    }

    let focus = update_focus(world);
    if let (Some(index), true) = (focus.index, focus.exact) {
        clear_target(world, index, input.now_ms);
    }

    aim_player(world, delta_ms);
}

/// Snapshot form of `tick`: the input world is left untouched
pub fn advance(world: &World, input: &TickInput, delta_ms: f64) -> World {
    let mut next = world.clone();
    tick(&mut next, input, delta_ms);
    next
}

/// Home every target on the player, sideways at half strength
fn move_targets(world: &mut World, delta_ms: f64) {
    let multiplier = perk::speed_multiplier(&world.round.active_perk);
    let player = world.player.position;
    let dt = delta_ms as f32;

    for target in &mut world.targets {
        if !target.is_well_formed() {
            if !target.warned_malformed {
                log::warn!(
                    "Skipping malformed target {} (pos {:?}, speed {})",
                    target.id,
                    target.position,
                    target.base_speed
                );
                target.warned_malformed = true;
            }
            continue;
        }

        let dir = direction_to(target.position, player);
        let homing = Vec2::new(dir.x * HORIZONTAL_HOMING, dir.y * VERTICAL_HOMING);
        target.position += homing * target.base_speed * dt * multiplier;
    }
}

/// Re-run matching for the current input and move the focus flag
fn update_focus(world: &mut World) -> FocusResolution {
    let focus = matching::resolve_focus(&world.round.input_buffer, &world.targets);
    matching::apply_focus(&mut world.targets, focus.index);

    let focused_id = focus.index.map(|i| world.targets[i].id.clone());
    if focused_id != world.round.focused_target_id {
        match &focused_id {
            Some(id) => {
                log::debug!("Focus -> {}", id);
                world.events.push(GameEvent::TargetFocused { id: id.clone() });
            }
            None => world.events.push(GameEvent::FocusCleared),
        }
        world.round.focused_target_id = focused_id;
    }
    focus
}

/// Exact match on the focused target: score it, roll super/perk, count the
/// streak, send it back above the screen and clear the input.
fn clear_target(world: &mut World, index: usize, now_ms: f64) {
    let World {
        tuning,
        targets,
        round,
        rng,
        events,
        ..
    } = world;
    let target = &mut targets[index];
    let id = target.id.clone();
    let was_super = target.is_super_target;

    let reward = scoring::match_reward(tuning.base_reward, tuning.super_bonus, was_super);
    round.score = round.score.saturating_add(reward);
    round.matches += 1;
    events.push(GameEvent::TargetCleared {
        id: id.clone(),
        reward,
        was_super,
    });
    log::debug!("Cleared {} for {} (super: {})", id, reward, was_super);

    let mut designate = false;
    if was_super {
        target.is_super_target = false;
        round.pending_super_target_id = None;
        let perk = perk::activate(&mut round.active_perk, rng, now_ms, tuning.perk_duration_ms);
        log::debug!("Perk {:?} active until {}", perk.kind, perk.expires_at_ms);
        events.push(GameEvent::PerkActivated {
            kind: perk.kind,
            expires_at_ms: perk.expires_at_ms,
        });
    } else if round.pending_super_target_id.is_none() && rng.random::<f64>() < tuning.super_chance
    {
        designate = true;
    }

    let outcome = scoring::register_match(round.streak, round.level, tuning.level_up_streak);
    round.streak = outcome.streak;
    round.level = outcome.level;
    if outcome.leveled_up {
        log::info!("Level up -> {}", outcome.level);
        events.push(GameEvent::LevelUp {
            level: outcome.level,
        });
    }

    target.position = respawn_position(rng, tuning);
    target.base_speed = roll_speed(rng, tuning, round.level);
    target.is_focused = false;
    if designate {
        target.is_super_target = true;
        round.pending_super_target_id = Some(id.clone());
        events.push(GameEvent::SuperTargetDesignated { id });
    }

    round.input_buffer.clear();
    round.focused_target_id = None;
}

/// Ease the avatar toward the focused target
fn aim_player(world: &mut World, delta_ms: f64) {
    let Some(target) = world.targets.iter().find(|t| t.is_focused) else {
        return;
    };
    let Some(goal) = heading_degrees(world.player.position, target.position) else {
        return;
    };

    let current = world.player.rotation_degrees;
    let diff = normalize_degrees(goal - current);
    let factor = 1.0 - (-world.tuning.rotation_rate * delta_ms as f32).exp();
    world.player.rotation_degrees = normalize_degrees(current + diff * factor);
}
