//! Frame-loop driver
//!
//! `RoundSession` owns a world and everything around it that the pure tick
//! should not know about: the clock, keystrokes arriving between frames, the
//! event queue, and the once-per-round hand-off of the summary.

use rand::seq::IndexedRandom;

use crate::error::{EngineError, Result};
use crate::platform::Clock;
use crate::sim::{
    GameEvent, RoundPhase, RoundSummary, TickInput, WordItem, World, initialize_round,
    reset_round, stop_round, tick,
};
use crate::snapshot::{RoundSnapshot, build_snapshot};
use crate::tuning::Tuning;

/// Supplies vocabulary for a round
pub trait VocabularySource {
    fn words(&self) -> Vec<WordItem>;
}

impl VocabularySource for [WordItem] {
    fn words(&self) -> Vec<WordItem> {
        self.to_vec()
    }
}

impl VocabularySource for Vec<WordItem> {
    fn words(&self) -> Vec<WordItem> {
        self.clone()
    }
}

/// Receives the end-of-round numbers (XP/streak bookkeeping lives elsewhere)
pub trait SummaryRecorder {
    fn record(&mut self, summary: &RoundSummary);
}

impl SummaryRecorder for Vec<RoundSummary> {
    fn record(&mut self, summary: &RoundSummary) {
        self.push(*summary);
    }
}

/// A playable round plus its host-side plumbing
pub struct RoundSession<C: Clock, R: SummaryRecorder> {
    world: World,
    clock: C,
    recorder: R,
    /// Input buffer edited since the last frame, applied at the next tick
    pending_input: Option<String>,
    summary_recorded: bool,
    events: Vec<GameEvent>,
}

impl<C: Clock, R: SummaryRecorder> RoundSession<C, R> {
    pub fn new(tuning: Tuning, seed: u64, clock: C, recorder: R) -> Self {
        Self {
            world: World::new(tuning, seed),
            clock,
            recorder,
            pending_input: None,
            summary_recorded: false,
            events: Vec::new(),
        }
    }

    /// Start a round with exactly these words. Rejects an empty word list and
    /// a tuning that fails validation; the session stays idle either way.
    pub fn start(&mut self, words: &[WordItem], level: i64) -> Result<()> {
        if words.is_empty() {
            return Err(EngineError::InvalidWords("no words to seed the round".to_string()));
        }
        initialize_round(&mut self.world, words, level)?;
        self.pending_input = None;
        self.summary_recorded = false;
        self.events.clear();
        Ok(())
    }

    /// Start a round with a random selection of at most `max_targets` words
    pub fn start_from_source<S: VocabularySource + ?Sized>(
        &mut self,
        source: &S,
        level: i64,
    ) -> Result<()> {
        self.world.tuning.validate()?;
        let words = source.words();
        let count = self.world.tuning.max_targets.min(words.len());
        let selected: Vec<WordItem> = words
            .choose_multiple(&mut self.world.rng, count)
            .cloned()
            .collect();
        log::debug!("Selected {} of {} words", selected.len(), words.len());
        self.start(&selected, level)
    }

    /// Run one tick for a host frame and hand off the summary if the round
    /// just ended
    pub fn frame(&mut self, delta_ms: f64) {
        let input = TickInput {
            now_ms: self.clock.now_ms(),
            input_buffer: self.pending_input.take(),
        };
        tick(&mut self.world, &input, delta_ms);
        self.events.extend(self.world.drain_events());

        if self.world.round.is_over && !self.summary_recorded {
            self.summary_recorded = true;
            let summary = self.world.summary();
            self.recorder.record(&summary);
            log::info!("Recorded round summary: {:?}", summary);
        }
    }

    /// Explicit exit: freeze the round and cancel any perk
    pub fn stop(&mut self) {
        stop_round(&mut self.world);
        self.pending_input = None;
    }

    /// Discard the round and return to idle
    pub fn reset(&mut self) {
        reset_round(&mut self.world);
        self.pending_input = None;
        self.summary_recorded = false;
        self.events.clear();
    }

    // === Input buffer edits (visible to the engine at the next frame) ===

    fn edit(&mut self, f: impl FnOnce(&mut String)) {
        if self.phase() != RoundPhase::Running {
            return;
        }
        let current = &self.world.round.input_buffer;
        let buffer = self.pending_input.get_or_insert_with(|| current.clone());
        f(buffer);
    }

    pub fn push_char(&mut self, c: char) {
        self.edit(|b| b.push(c));
    }

    pub fn push_str(&mut self, s: &str) {
        self.edit(|b| b.push_str(s));
    }

    pub fn backspace(&mut self) {
        self.edit(|b| {
            b.pop();
        });
    }

    pub fn clear_input(&mut self) {
        self.edit(String::clear);
    }

    pub fn set_input(&mut self, text: &str) {
        self.edit(|b| {
            b.clear();
            b.push_str(text);
        });
    }

    /// What the text field should show, including unapplied edits
    pub fn input_buffer(&self) -> &str {
        self.pending_input
            .as_deref()
            .unwrap_or(&self.world.round.input_buffer)
    }

    // === Observation ===

    pub fn phase(&self) -> RoundPhase {
        self.world.phase()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        build_snapshot(&self.world, self.clock.now_ms())
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
