//! Browser `localStorage` medium for the preset store

use shared::storage::KeyValueStore;
use shared::{AppError, AppResult};
use wasm_bindgen::JsValue;

/// `window.localStorage`, looked up on every access
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage(&self) -> AppResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| AppError::StorageUnavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| AppError::StorageUnavailable(describe(&e)))?
            .ok_or_else(|| AppError::StorageUnavailable("localStorage disabled".to_string()))
    }
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| AppError::StorageRead(describe(&e)))
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| AppError::StorageWrite(describe(&e)))
    }
}
