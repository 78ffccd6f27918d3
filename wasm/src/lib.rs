//! WebAssembly bindings for the Pour-Over Brew Dashboard
//!
//! Exposes to the browser UI:
//! - Water and timer helpers
//! - Brew method listing and schedule generation
//! - 4:6 preset validation
//! - Custom preset persistence in `localStorage`
//!
//! Structured values cross the boundary as JSON strings.

mod storage;

use std::fmt::Display;

use shared::storage::PresetStore;
use shared::{FourSixPour, FourSixPreset, StepContext};
use wasm_bindgen::prelude::*;

pub use storage::LocalStorage;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("pour-over-wasm loaded"));
}

fn js_error(context: &str, err: impl Display) -> JsValue {
    js_sys::Error::new(&format!("{}: {}", context, err)).into()
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_error("Serialization failed", e))
}

fn preset_store() -> PresetStore<LocalStorage> {
    PresetStore::new(LocalStorage)
}

/// Total water (g) for a dose and ratio
#[wasm_bindgen]
pub fn calculate_total_water(coffee_amount: f64, water_ratio: f64) -> f64 {
    shared::calculate_total_water(coffee_amount, water_ratio)
}

/// Seconds as `m:ss`
#[wasm_bindgen]
pub fn format_brew_time(seconds: u32) -> String {
    shared::format_brew_time(seconds)
}

/// All brew methods as a JSON array
#[wasm_bindgen]
pub fn list_brew_methods() -> Result<String, JsValue> {
    to_json(shared::brew_methods())
}

#[wasm_bindgen]
pub fn get_brew_method(id: &str) -> Result<Option<String>, JsValue> {
    shared::get_brew_method(id).map(to_json).transpose()
}

/// Brew steps for a method as a JSON array
///
/// `preset_id` only matters for the 4:6 method and may name a custom preset
/// saved in `localStorage`.
#[wasm_bindgen]
pub fn generate_brew_steps(
    method_id: &str,
    total_water: f64,
    preset_id: Option<String>,
) -> Result<String, JsValue> {
    let store = preset_store();
    let mut ctx = StepContext::new(&store);
    if let Some(id) = preset_id.as_deref() {
        ctx = ctx.with_preset(id);
    }
    to_json(&shared::generate_steps(method_id, total_water, ctx))
}

/// Validate a JSON array of `{amount, timeSeconds}` pours
#[wasm_bindgen]
pub fn validate_four_six_pours(pours_json: &str) -> Result<String, JsValue> {
    let pours: Vec<FourSixPour> =
        serde_json::from_str(pours_json).map_err(|e| js_error("Invalid pours JSON", e))?;
    to_json(&shared::validate_four_six_preset(&pours))
}

/// Built-in and saved presets as a JSON array
#[wasm_bindgen]
pub fn load_presets() -> Result<String, JsValue> {
    to_json(&preset_store().load_all())
}

#[wasm_bindgen]
pub fn get_preset(id: &str) -> Result<Option<String>, JsValue> {
    preset_store()
        .get_by_id(id)
        .map(|preset| to_json(&preset))
        .transpose()
}

/// Save a custom preset given as JSON
#[wasm_bindgen]
pub fn save_preset(preset_json: &str) -> Result<(), JsValue> {
    let preset: FourSixPreset =
        serde_json::from_str(preset_json).map_err(|e| js_error("Invalid preset JSON", e))?;
    preset_store()
        .save(preset)
        .map_err(|e| js_error("Failed to save preset", e))
}

#[wasm_bindgen]
pub fn delete_preset(id: &str) -> Result<(), JsValue> {
    preset_store()
        .delete(id)
        .map_err(|e| js_error("Failed to delete preset", e))
}
