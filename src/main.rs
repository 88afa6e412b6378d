//! Falling Words entry point
//!
//! Native: plays an unattended demo round with the autoplay typist and prints
//! the result. Usage: `falling-words [level] [tuning.json]`.
//! Web: the engine is driven through `bindings::WasmRound` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(err) = demo::run() {
        log::error!("{}", err);
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is bindings::wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::Path;
    use std::rc::Rc;

    use falling_words::platform::{Clock, ManualClock, SystemClock};
    use falling_words::sim::{Autoplay, GameEvent, RoundPhase, WordItem};
    use falling_words::{HighScores, Result, RoundSession, Tuning};

    /// 60 Hz host frames
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after this much simulated time
    const MAX_ROUND_MS: f64 = 5.0 * 60.0 * 1000.0;
    /// Demo typist speed
    const KEY_INTERVAL_MS: f64 = 140.0;

    fn demo_words() -> Vec<WordItem> {
        [
            ("w1", "Luft", "air"),
            ("w2", "Feuer", "fire"),
            ("w3", "Wasser", "water"),
            ("w4", "Erde", "earth"),
            ("w5", "Baum", "tree"),
            ("w6", "Haus", "house"),
            ("w7", "Mond", "moon"),
            ("w8", "Sonne", "sun"),
            ("w9", "Stern", "star"),
            ("w10", "Fluss", "river"),
        ]
        .into_iter()
        .map(|(id, name, meaning)| WordItem::new(id, name, meaning))
        .collect()
    }

    pub fn run() -> Result<()> {
        let mut args = std::env::args().skip(1);
        let level: i64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);
        let tuning = match args.next() {
            Some(path) => Tuning::load(Path::new(&path))?,
            None => Tuning::default(),
        };

        // Simulated wall clock so perks run on the demo's timeline
        let clock = Rc::new(ManualClock::new(SystemClock.now_ms()));
        let seed = clock.now_ms() as u64;
        let mut session = RoundSession::new(tuning, seed, clock.clone(), HighScores::new());
        session.start_from_source(&demo_words(), level)?;
        log::info!("Falling Words (native demo) seed {}", seed);

        let mut bot = Autoplay::new(KEY_INTERVAL_MS);
        let mut simulated = 0.0;
        while session.phase() == RoundPhase::Running && simulated < MAX_ROUND_MS {
            if let Some(text) = bot.next_input(session.world(), FRAME_MS) {
                session.set_input(&text);
            }
            clock.advance(FRAME_MS);
            session.frame(FRAME_MS);
            simulated += FRAME_MS;

            for event in session.drain_events() {
                match event {
                    GameEvent::LevelUp { level } => println!("level up -> {}", level),
                    GameEvent::PerkActivated { kind, .. } => println!("perk: {:?}", kind),
                    GameEvent::TargetCleared { id, reward, .. } => {
                        log::debug!("cleared {} (+{})", id, reward)
                    }
                    _ => {}
                }
            }
        }
        if session.phase() == RoundPhase::Running {
            session.stop();
        }

        let summary = session.world().summary();
        println!(
            "round finished after {:.1}s: score {}, level {}, matches {}, xp {}",
            session.snapshot().elapsed_ms / 1000.0,
            summary.score,
            summary.level,
            summary.matches,
            summary.xp
        );
        if let Some(top) = session.recorder().top_score() {
            println!("best score: {}", top);
        }
        Ok(())
    }
}
