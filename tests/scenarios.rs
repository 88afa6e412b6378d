// Round scenarios driven through the public API, one per documented example.

use falling_words::Tuning;
use falling_words::sim::{
    ActivePerk, GameEvent, PerkKind, RoundPhase, TickInput, WordItem, World, new_round, tick,
};
use glam::Vec2;

fn single_target(meaning: &str, super_chance: f64) -> World {
    let tuning = Tuning {
        super_chance,
        ..Tuning::default()
    };
    let mut world = new_round(tuning, 2024, &[WordItem::new("w1", "Luft", meaning)], 1).unwrap();
    world.targets[0].position = Vec2::new(180.0, 60.0);
    world
}

#[test]
fn typing_air_focuses_then_clears() {
    let mut world = single_target("air", 0.0);

    tick(&mut world, &TickInput::typed(0.0, "a"), 16.0);
    assert!(world.targets[0].is_focused);
    assert_eq!(world.round.score, 0);

    tick(&mut world, &TickInput::typed(16.0, "ai"), 16.0);
    assert!(world.targets[0].is_focused);

    tick(&mut world, &TickInput::typed(32.0, "air"), 16.0);
    assert_eq!(world.round.score, 10);
    assert_eq!(world.round.streak, 1);
    assert_eq!(world.round.input_buffer, "");
}

#[test]
fn typing_air_on_super_target_awards_forty() {
    let mut world = single_target("air", 0.0);
    world.targets[0].is_super_target = true;
    world.round.pending_super_target_id = Some("w1".to_string());

    for (i, text) in ["a", "ai", "air"].into_iter().enumerate() {
        tick(&mut world, &TickInput::typed(i as f64 * 16.0, text), 16.0);
    }
    assert_eq!(world.round.score, 40);
    assert_eq!(world.round.streak, 1);
    assert!(world.round.active_perk.is_some());
}

#[test]
fn tenth_match_levels_up() {
    let mut world = single_target("air", 0.0);
    world.round.streak = 9;
    tick(&mut world, &TickInput::typed(0.0, "air"), 16.0);
    assert_eq!(world.round.streak, 0);
    assert_eq!(world.round.level, 2);
}

#[test]
fn tenth_match_at_max_level_only_resets_streak() {
    let mut world = single_target("air", 0.0);
    world.round.streak = 9;
    world.round.level = 5;
    tick(&mut world, &TickInput::typed(0.0, "air"), 16.0);
    assert_eq!(world.round.streak, 0);
    assert_eq!(world.round.level, 5);
}

#[test]
fn target_inside_radius_ends_round() {
    let mut world = single_target("air", 0.0);
    world.round.streak = 4;
    world.round.score = 70;
    world.targets[0].position = world.player.position - Vec2::new(0.0, 10.0);

    tick(&mut world, &TickInput::typed(0.0, "air"), 16.0);
    assert!(world.round.is_over);
    assert_eq!(world.phase(), RoundPhase::Over);
    assert_eq!(world.round.score, 70);
    assert_eq!(world.round.streak, 4);

    for i in 1..10 {
        tick(&mut world, &TickInput::typed(i as f64 * 16.0, "air"), 16.0);
    }
    assert_eq!(world.round.score, 70);
    assert_eq!(world.round.streak, 4);
    assert_eq!(world.round.level, 1);

    let summaries: Vec<_> = world
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::RoundOver { summary } => Some(summary),
            _ => None,
        })
        .collect();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].score, 70);
}

#[test]
fn perk_gone_one_tick_after_ten_seconds() {
    let mut world = single_target("air", 0.0);
    world.round.active_perk = Some(ActivePerk::new(PerkKind::SlowMotion, 0.0, 10_000.0));

    tick(&mut world, &TickInput::at(10_001.0), 16.0);
    assert_eq!(world.round.active_perk, None);
}

#[test]
fn reset_returns_to_idle_and_allows_a_new_round() {
    use falling_words::sim::{initialize_round, reset_round};

    let mut world = single_target("air", 0.0);
    world.targets[0].position = world.player.position;
    tick(&mut world, &TickInput::at(0.0), 16.0);
    assert_eq!(world.phase(), RoundPhase::Over);

    reset_round(&mut world);
    assert_eq!(world.phase(), RoundPhase::Idle);
    assert!(world.targets.is_empty());

    initialize_round(&mut world, &[WordItem::new("w2", "Feuer", "fire")], 3).unwrap();
    assert_eq!(world.phase(), RoundPhase::Running);
    assert_eq!(world.round.level, 3);
    assert_eq!(world.round.score, 0);
}
