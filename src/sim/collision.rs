//! Target-reaches-player detection
//!
//! Distances are checked after movement. Coincident points count as a hit,
//! so no direction is ever derived from a zero-length vector here.

use glam::Vec2;

use super::state::{GameEvent, Target, World};

/// Result of a collision sweep over the targets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Index of the first colliding target, in list order
    pub index: usize,
    /// Its distance to the player
    pub distance: f32,
}

/// Whether a point is inside the player's collision radius
#[inline]
pub fn within_radius(point: Vec2, player: Vec2, radius: f32) -> bool {
    point.distance(player) < radius
}

/// Unit vector from `from` toward `to`, zero when they coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// First target (in order) closer than `radius` to the player. Malformed
/// targets are ignored.
pub fn first_collision(targets: &[Target], player: Vec2, radius: f32) -> Option<CollisionResult> {
    targets
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_well_formed())
        .find(|(_, t)| within_radius(t.position, player, radius))
        .map(|(index, t)| CollisionResult {
            index,
            distance: t.position.distance(player),
        })
}

/// Running -> Over. Only the first call has any effect, so the round-over
/// event fires once per round.
pub fn terminate(world: &mut World, hit: CollisionResult) -> bool {
    if world.round.is_over {
        return false;
    }
    world.round.is_over = true;
    world.round.is_running = false;
    world.round.active_perk = None;

    let summary = world.summary();
    log::info!(
        "Round over: target {:?} reached the player (score {}, level {}, xp {})",
        world.targets.get(hit.index).map(|t| t.id.as_str()),
        summary.score,
        summary.level,
        summary.xp
    );
    world.events.push(GameEvent::RoundOver { summary });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::WordItem;

    fn target_at(x: f32, y: f32) -> Target {
        Target::from_word(&WordItem::new("t", "w", "m"), Vec2::new(x, y), 0.03)
    }

    #[test]
    fn test_within_radius() {
        let player = Vec2::new(0.0, 0.0);
        assert!(within_radius(Vec2::new(3.0, 4.0), player, 5.1));
        assert!(!within_radius(Vec2::new(3.0, 4.0), player, 5.0));

        // The sweep uses the same boundary: exactly on the radius is a miss
        let ts = vec![target_at(3.0, 4.0)];
        assert!(first_collision(&ts, player, 5.0).is_none());
        let hit = first_collision(&ts, player, 5.1).unwrap();
        assert!((hit.distance - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_distance_collides() {
        let player = Vec2::new(180.0, 580.0);
        let ts = vec![target_at(180.0, 580.0)];
        let hit = first_collision(&ts, player, 36.0).unwrap();
        assert_eq!(hit.index, 0);
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn test_direction_guard() {
        let p = Vec2::new(5.0, 5.0);
        assert_eq!(direction_to(p, p), Vec2::ZERO);
        let d = direction_to(Vec2::ZERO, Vec2::new(0.0, 10.0));
        assert!((d - Vec2::new(0.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_first_in_order_reported() {
        let player = Vec2::new(0.0, 0.0);
        let ts = vec![target_at(100.0, 0.0), target_at(10.0, 0.0), target_at(1.0, 0.0)];
        assert_eq!(first_collision(&ts, player, 20.0).unwrap().index, 1);
        assert!(first_collision(&ts, player, 0.5).is_none());
    }

    #[test]
    fn test_terminate_once() {
        use crate::sim::setup::new_round;
        use crate::sim::state::RoundPhase;
        use crate::tuning::Tuning;

        let words = [WordItem::new("a", "Luft", "air")];
        let mut world = new_round(Tuning::default(), 1, &words, 1).unwrap();
        let hit = CollisionResult { index: 0, distance: 0.0 };
        assert!(terminate(&mut world, hit));
        assert!(!terminate(&mut world, hit));
        assert_eq!(world.phase(), RoundPhase::Over);
        let overs = world
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::RoundOver { .. }))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_malformed_ignored() {
        let player = Vec2::new(0.0, 0.0);
        let mut ts = vec![target_at(0.0, 0.0)];
        ts[0].base_speed = f32::NAN;
        assert!(first_collision(&ts, player, 20.0).is_none());
    }
}
