//! WASM exports for the simulation core
//!
//! Wraps [`SimEngine`] with a JS-friendly API. Structured results cross the
//! boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::config::SimConfig;
use crate::content::ContentPools;
use crate::engine::SimEngine;
use crate::input::Key;

/// Simulation controller for WASM
#[wasm_bindgen]
pub struct SimController {
    engine: SimEngine,
}

#[wasm_bindgen]
impl SimController {
    /// Create a controller from optional JSON config and content
    ///
    /// Bad or missing JSON falls back to defaults (logged).
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>, content_json: Option<String>) -> Self {
        let mut config = config_json
            .as_deref()
            .map(SimConfig::from_json_or_default)
            .unwrap_or_default();
        if config.seed.is_none() {
            config.seed = Some((js_sys::Math::random() * u64::MAX as f64) as u64);
        }
        let content = content_json
            .as_deref()
            .map(ContentPools::from_json_or_default)
            .unwrap_or_else(ContentPools::builtin);

        let mut engine = SimEngine::new(config, content, js_sys::Date::now());
        engine.spawn_default_desktop();
        Self { engine }
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Advance to the host timestamp; returns raised signals as JSON
    #[wasm_bindgen]
    pub fn tick(&mut self, now_ms: f64) -> String {
        let signals = self.engine.tick(now_ms);
        serde_json::to_string(&signals).unwrap_or_else(|_| "[]".to_string())
    }

    /// Draw list for the current frame as JSON
    #[wasm_bindgen]
    pub fn draw_list_json(&self) -> String {
        self.engine
            .draw_list()
            .to_json()
            .unwrap_or_else(|_| "{\"items\":[]}".to_string())
    }

    // =========================================================================
    // Input
    // =========================================================================

    #[wasm_bindgen]
    pub fn pointer_down(&mut self, x: f32, y: f32) -> String {
        let result = self.engine.pointer_down(x, y);
        serde_json::to_string(&result).unwrap_or_else(|_| "{}".to_string())
    }

    #[wasm_bindgen]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> String {
        let result = self.engine.pointer_move(x, y);
        serde_json::to_string(&result).unwrap_or_else(|_| "{}".to_string())
    }

    #[wasm_bindgen]
    pub fn pointer_up(&mut self, x: f32, y: f32) -> String {
        let result = self.engine.pointer_up(x, y);
        serde_json::to_string(&result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Key press by DOM key name
    #[wasm_bindgen]
    pub fn key_down(&mut self, key: &str) -> String {
        let result = self.engine.handle_key(Key::from_name(key));
        serde_json::to_string(&result).unwrap_or_else(|_| "{}".to_string())
    }

    // =========================================================================
    // State
    // =========================================================================

    #[wasm_bindgen]
    pub fn is_complete(&self) -> bool {
        self.engine.is_complete()
    }

    #[wasm_bindgen]
    pub fn is_input_blocked(&self) -> bool {
        self.engine.is_input_blocked()
    }

    /// Ending-screen numbers as JSON
    #[wasm_bindgen]
    pub fn stats_json(&self) -> String {
        serde_json::to_string(&self.engine.stats()).unwrap_or_else(|_| "{}".to_string())
    }
}
