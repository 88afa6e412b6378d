//! Browser/webview bindings
//!
//! The host JS frame loop owns a `WasmRound`, forwards keystrokes and
//! `requestAnimationFrame` deltas, and reads JSON snapshots back.

use wasm_bindgen::prelude::*;

use crate::error::EngineError;
use crate::highscores::HighScores;
use crate::platform::SystemClock;
use crate::session::RoundSession;
use crate::sim::WordItem;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn to_js(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WasmRound {
    session: RoundSession<SystemClock, HighScores>,
}

#[wasm_bindgen]
impl WasmRound {
    /// `tuning_json` may be omitted to use the default balance
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> Result<WasmRound, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(to_js)?,
            None => Tuning::default(),
        };
        let seed = js_sys::Date::now() as u64;
        log::info!("Falling Words engine ready (seed {})", seed);
        Ok(Self {
            session: RoundSession::new(tuning, seed, SystemClock, HighScores::new()),
        })
    }

    /// `words_json` is an array of `{id, name, meaning}`
    pub fn start(&mut self, words_json: &str, level: i32) -> Result<(), JsValue> {
        let words: Vec<WordItem> = serde_json::from_str(words_json)
            .map_err(EngineError::from)
            .map_err(to_js)?;
        self.session
            .start_from_source(&words, level as i64)
            .map_err(to_js)
    }

    pub fn frame(&mut self, delta_ms: f64) {
        self.session.frame(delta_ms);
    }

    pub fn push_char(&mut self, c: char) {
        self.session.push_char(c);
    }

    pub fn backspace(&mut self) {
        self.session.backspace();
    }

    pub fn clear_input(&mut self) {
        self.session.clear_input();
    }

    pub fn set_input(&mut self, text: &str) {
        self.session.set_input(text);
    }

    pub fn stop(&mut self) {
        self.session.stop();
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Current frame view as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot())
            .map_err(EngineError::from)
            .map_err(to_js)
    }

    /// Events since the last call, as a JSON array
    pub fn events(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.drain_events())
            .map_err(EngineError::from)
            .map_err(to_js)
    }

    pub fn high_scores(&self) -> Result<String, JsValue> {
        self.session.recorder().to_json().map_err(to_js)
    }
}
