#![forbid(unsafe_code)]

use wasm_bindgen::prelude::*;

use cmui_core::ids::{FormId, RowId};
use cmui_forms::ConfirmPrompt;

use crate::config::EnhancerConfig;
use crate::enhancer::Enhancer;
use crate::input::host_millis;
use crate::page::Page;
use crate::EnhanceError;

/// Asks through `window.confirm`. A missing window or a thrown exception
/// counts as "no".
#[derive(Debug, Default)]
pub struct WindowConfirm;

impl ConfirmPrompt for WindowConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

fn js_error(err: EnhanceError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// JS-facing contact page engine.
///
/// The host passes the page description as JSON, forwards DOM events as
/// JSON, drives time with `advance`, and applies the JSON intents returned
/// by `takeIntents`.
#[wasm_bindgen]
pub struct ContactPage {
    engine: Enhancer<WindowConfirm>,
}

#[wasm_bindgen]
impl ContactPage {
    /// Build from a page description and an optional config (both JSON).
    #[wasm_bindgen(constructor)]
    pub fn new(page_json: &str, config_json: Option<String>) -> Result<ContactPage, JsValue> {
        let page = Page::from_json_str(page_json).map_err(js_error)?;
        let config = match config_json {
            Some(json) => serde_json::from_str::<EnhancerConfig>(&json)
                .map_err(|e| js_error(e.into()))?,
            None => EnhancerConfig::default(),
        };
        Ok(Self {
            engine: Enhancer::new(page, config, WindowConfirm),
        })
    }

    /// Bind the page. Returns the number of newly bound forms and rows.
    pub fn init(&mut self) -> u32 {
        u32::try_from(self.engine.init()).unwrap_or(u32::MAX)
    }

    /// Dispatch one JSON-encoded DOM event.
    pub fn input(&mut self, event_json: &str) -> Result<(), JsValue> {
        self.engine.dispatch_json(event_json).map_err(js_error)
    }

    /// Advance the engine clock by `dt_ms` milliseconds.
    pub fn advance(&mut self, dt_ms: f64) {
        self.engine.advance_time(host_millis(dt_ms));
    }

    /// Milliseconds until the next pending task, or `undefined`.
    #[wasm_bindgen(js_name = nextDueIn)]
    pub fn next_due_in(&self) -> Option<f64> {
        let due = self.engine.next_due()?;
        Some(due.saturating_sub(self.engine.now()).as_secs_f64() * 1000.0)
    }

    /// Intents produced since the last call, as a JSON array.
    #[wasm_bindgen(js_name = takeIntents)]
    pub fn take_intents(&mut self) -> Result<String, JsValue> {
        self.engine.take_intents_json().map_err(js_error)
    }

    /// Add a form (JSON). Call `init` to bind it.
    #[wasm_bindgen(js_name = addForm)]
    pub fn add_form(&mut self, form_json: &str) -> Result<(), JsValue> {
        let form = serde_json::from_str(form_json).map_err(|e| js_error(e.into()))?;
        self.engine.add_form(form).map_err(js_error)
    }

    #[wasm_bindgen(js_name = removeForm)]
    pub fn remove_form(&mut self, id: u32) -> Result<(), JsValue> {
        self.engine.remove_form(FormId(id)).map(drop).map_err(js_error)
    }

    /// Add a table row (JSON). Call `init` to bind it.
    #[wasm_bindgen(js_name = addRow)]
    pub fn add_row(&mut self, row_json: &str) -> Result<(), JsValue> {
        let row = serde_json::from_str(row_json).map_err(|e| js_error(e.into()))?;
        self.engine.add_row(row).map_err(js_error)
    }

    #[wasm_bindgen(js_name = removeRow)]
    pub fn remove_row(&mut self, id: u32) -> Result<(), JsValue> {
        self.engine.remove_row(RowId(id)).map(drop).map_err(js_error)
    }

    /// Explicit teardown for JS callers; cancels every pending task.
    pub fn destroy(&mut self) {
        self.engine.teardown();
    }
}
