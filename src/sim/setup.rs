//! Round setup and reset
//!
//! Seeds one target per word and places the player; `reset_round` throws all
//! of it away again.

use glam::Vec2;
use rand::Rng;

use super::state::{Player, RoundState, Target, WordItem, World};
use crate::clamp_level;
use crate::error::Result;
use crate::tuning::Tuning;

/// Random point in the upper third of the play area
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Vec2 {
    let x = rng.random_range(tuning.spawn_margin..=tuning.width - tuning.spawn_margin);
    let y = rng.random_range(0.0..=tuning.height / 3.0);
    Vec2::new(x, y)
}

/// Random point just above the visible area, for a target's next life
pub fn respawn_position<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Vec2 {
    let x = rng.random_range(tuning.spawn_margin..=tuning.width - tuning.spawn_margin);
    let y = -rng.random_range(tuning.respawn_clearance..=tuning.respawn_band);
    Vec2::new(x, y)
}

/// Random speed from the level's range
pub fn roll_speed<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning, level: u8) -> f32 {
    let range = tuning.speed_range(level);
    rng.random_range(range.min..=range.max)
}

/// Start a round: fresh counters, player at the anchor, one target per word
/// in word order. The level is clamped into 1..=5. Fails without touching
/// the world when its tuning cannot produce spawn positions or speeds.
pub fn initialize_round(
    world: &mut World,
    words: &[WordItem],
    requested_level: i64,
) -> Result<()> {
    world.tuning.validate()?;
    let level = clamp_level(requested_level);
    if level as i64 != requested_level {
        log::warn!("Level {} out of range, using {}", requested_level, level);
    }

    world.player = Player::at(world.tuning.player_anchor());
    world.round = RoundState {
        level,
        is_running: true,
        ..RoundState::default()
    };
    world.events.clear();

    let World {
        tuning,
        targets,
        rng,
        ..
    } = world;
    targets.clear();
    targets.reserve(words.len());
    for word in words {
        let position = spawn_position(rng, tuning);
        let speed = roll_speed(rng, tuning, level);
        targets.push(Target::from_word(word, position, speed));
    }

    log::info!("Round started: {} targets at level {}", world.targets.len(), level);
    Ok(())
}

/// Back to idle: discard targets and counters, re-anchor the player
pub fn reset_round(world: &mut World) {
    world.targets.clear();
    world.round = RoundState::default();
    world.player = Player::at(world.tuning.player_anchor());
    world.events.clear();
    log::info!("Round reset");
}

/// Explicit exit: ticks become no-ops and any perk is cancelled. The round
/// is not over, so no summary is produced.
pub fn stop_round(world: &mut World) {
    if !world.round.is_running {
        return;
    }
    world.round.is_running = false;
    world.round.active_perk = None;
    log::info!("Round stopped at score {}", world.round.score);
}

/// Build a world and start a round in one go
pub fn new_round(tuning: Tuning, seed: u64, words: &[WordItem], level: i64) -> Result<World> {
    let mut world = World::new(tuning, seed);
    initialize_round(&mut world, words, level)?;
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::sim::state::RoundPhase;

    fn words(n: usize) -> Vec<WordItem> {
        (0..n)
            .map(|i| WordItem::new(format!("id{i}"), format!("word{i}"), format!("meaning{i}")))
            .collect()
    }

    #[test]
    fn test_initialize_round() {
        let tuning = Tuning::default();
        let world = new_round(tuning.clone(), 42, &words(5), 2).unwrap();

        assert_eq!(world.phase(), RoundPhase::Running);
        assert_eq!(world.round.level, 2);
        assert_eq!(world.round.score, 0);
        assert_eq!(world.round.streak, 0);
        assert_eq!(world.player.position, tuning.player_anchor());
        assert_eq!(world.targets.len(), 5);

        let range = tuning.speed_range(2);
        for (i, t) in world.targets.iter().enumerate() {
            // Word order preserved
            assert_eq!(t.id, format!("id{i}"));
            assert_eq!(t.display_text, format!("word{i}"));
            assert_eq!(t.match_text, format!("meaning{i}"));
            assert!(t.position.y >= 0.0 && t.position.y <= tuning.height / 3.0);
            assert!(t.position.x >= tuning.spawn_margin);
            assert!(t.position.x <= tuning.width - tuning.spawn_margin);
            assert!(t.base_speed >= range.min && t.base_speed <= range.max);
            assert!(!t.is_focused && !t.is_super_target);
        }
    }

    #[test]
    fn test_invalid_tuning_leaves_world_idle() {
        let tuning = Tuning {
            spawn_margin: 200.0,
            ..Tuning::default()
        };
        assert!(matches!(
            new_round(tuning.clone(), 42, &words(3), 1),
            Err(EngineError::InvalidTuning(_))
        ));

        let mut world = World::new(tuning, 42);
        assert!(initialize_round(&mut world, &words(3), 1).is_err());
        assert_eq!(world.phase(), RoundPhase::Idle);
        assert!(world.targets.is_empty());
    }

    #[test]
    fn test_level_clamped() {
        let low = new_round(Tuning::default(), 1, &words(1), -4).unwrap();
        let high = new_round(Tuning::default(), 1, &words(1), 17).unwrap();
        assert_eq!(low.round.level, 1);
        assert_eq!(high.round.level, 5);
    }

    #[test]
    fn test_higher_level_is_faster_on_average() {
        let slow = new_round(Tuning::default(), 9, &words(50), 1).unwrap();
        let fast = new_round(Tuning::default(), 9, &words(50), 5).unwrap();
        let mean = |w: &World| w.targets.iter().map(|t| t.base_speed).sum::<f32>() / 50.0;
        assert!(mean(&fast) > mean(&slow));
    }

    #[test]
    fn test_respawn_above_view() {
        let tuning = Tuning::default();
        let mut world = World::new(tuning.clone(), 5);
        for _ in 0..100 {
            let p = respawn_position(&mut world.rng, &tuning);
            assert!(p.y <= -tuning.respawn_clearance && p.y >= -tuning.respawn_band);
        }
    }

    #[test]
    fn test_stop_round_cancels_perk() {
        use crate::sim::perk::{ActivePerk, PerkKind};

        let mut world = new_round(Tuning::default(), 3, &words(2), 1).unwrap();
        world.round.active_perk = Some(ActivePerk::new(PerkKind::SlowMotion, 0.0, 10_000.0));
        stop_round(&mut world);
        assert_eq!(world.phase(), RoundPhase::Idle);
        assert!(world.round.active_perk.is_none());
        assert_eq!(world.targets.len(), 2);
    }

    #[test]
    fn test_reset_round() {
        let mut world = new_round(Tuning::default(), 3, &words(3), 4).unwrap();
        world.round.score = 120;
        world.round.is_over = true;
        world.round.is_running = false;
        world.player.rotation_degrees = 33.0;

        reset_round(&mut world);
        assert_eq!(world.phase(), RoundPhase::Idle);
        assert!(world.targets.is_empty());
        assert_eq!(world.round, RoundState::default());
        assert_eq!(world.player.rotation_degrees, 0.0);
    }
}
