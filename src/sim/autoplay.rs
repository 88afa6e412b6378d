//! Demo typist
//!
//! Types the meaning of the most dangerous target one character at a time,
//! so a round can run unattended (native demo, attract screens, soak tests).

use super::matching::normalize;
use super::state::World;

#[derive(Debug, Clone)]
pub struct Autoplay {
    /// Milliseconds between keystrokes
    pub interval_ms: f64,
    since_last_ms: f64,
}

impl Autoplay {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            since_last_ms: 0.0,
        }
    }

    /// The input buffer to write before the next tick, if a key is due
    pub fn next_input(&mut self, world: &World, delta_ms: f64) -> Option<String> {
        self.since_last_ms += delta_ms.max(0.0);
        if self.since_last_ms < self.interval_ms {
            return None;
        }
        self.since_last_ms = 0.0;

        let typed = normalize(&world.round.input_buffer);
        let goal = world
            .focused_target()
            .or_else(|| {
                // Closest to the player first
                world
                    .targets
                    .iter()
                    .filter(|t| t.is_well_formed() && !normalize(&t.match_text).is_empty())
                    .min_by(|a, b| {
                        let da = a.position.distance(world.player.position);
                        let db = b.position.distance(world.player.position);
                        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                    })
            })
            .map(|t| normalize(&t.match_text))?;

        if !goal.starts_with(&typed) {
            // Wrong track; start over
            return Some(String::new());
        }
        let next = goal[typed.len()..].chars().next()?;
        let mut buffer = typed;
        buffer.push(next);
        Some(buffer)
    }
}
