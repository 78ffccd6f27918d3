//! Custom preset persistence
//!
//! Custom presets live as a single JSON array under one key of a key-value
//! medium. Built-in presets are never written; every listing prepends them.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde_json::Value;

use crate::config::StorageConfig;
use crate::error::{AppError, AppResult};
use crate::models::{builtin_preset, builtin_presets, is_builtin_preset_id, FourSixPreset};

/// Key the custom preset list is stored under by default
pub const PRESETS_STORAGE_KEY: &str = "coffee-brew-46-presets";

/// A string key-value medium with last-write-wins semantics
pub trait KeyValueStore {
    /// Read a value, `Ok(None)` when the key was never written
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        (**self).set(key, value)
    }
}

/// Read access to presets by id
pub trait PresetSource {
    fn preset_by_id(&self, id: &str) -> Option<FourSixPreset>;
}

/// Resolves built-in presets only
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPresets;

impl PresetSource for BuiltinPresets {
    fn preset_by_id(&self, id: &str) -> Option<FourSixPreset> {
        builtin_preset(id)
    }
}

/// Built-in presets plus custom presets persisted in `S`
#[derive(Debug)]
pub struct PresetStore<S> {
    kv: S,
    key: String,
}

impl<S: KeyValueStore> PresetStore<S> {
    pub fn new(kv: S) -> Self {
        Self::with_key(kv, PRESETS_STORAGE_KEY)
    }

    pub fn with_key(kv: S, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn from_config(kv: S, config: &StorageConfig) -> Self {
        Self::with_key(kv, config.preset_key.clone())
    }

    /// The underlying medium
    pub fn inner(&self) -> &S {
        &self.kv
    }

    pub fn into_inner(self) -> S {
        self.kv
    }

    /// Persisted entries as stored, one JSON value per preset
    fn read_entries(&self) -> AppResult<Vec<Value>> {
        let Some(stored) = self.kv.get(&self.key)? else {
            return Ok(Vec::new());
        };
        Ok(serde_json::from_str(&stored)?)
    }

    fn read_custom(&self) -> AppResult<Vec<FourSixPreset>> {
        Ok(self
            .read_entries()?
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<FourSixPreset>(entry) {
                Ok(preset) => Some(preset),
                Err(e) => {
                    tracing::warn!("Skipping unreadable preset in {}: {}", self.key, e);
                    None
                }
            })
            .filter(|p| !p.is_default && !is_builtin_preset_id(&p.id))
            .collect())
    }

    /// Custom presets only. Unreadable data yields an empty list.
    pub fn custom_presets(&self) -> Vec<FourSixPreset> {
        self.read_custom().unwrap_or_else(|e| {
            tracing::warn!("Failed to load presets from {}: {}", self.key, e);
            Vec::new()
        })
    }

    /// Built-in presets followed by custom presets
    pub fn load_all(&self) -> Vec<FourSixPreset> {
        let mut presets = builtin_presets();
        presets.extend(self.custom_presets());
        presets
    }

    pub fn get_by_id(&self, id: &str) -> Option<FourSixPreset> {
        self.load_all().into_iter().find(|p| p.id == id)
    }

    /// Entries to rewrite. Medium failures abort the update; a value that is
    /// not a JSON array is replaced.
    fn entries_for_update(&self) -> AppResult<Vec<Value>> {
        match self.read_entries() {
            Err(AppError::Serialization(e)) => {
                tracing::warn!("Replacing unreadable preset data in {}: {}", self.key, e);
                Ok(Vec::new())
            }
            other => other,
        }
    }

    fn write_entries(&mut self, entries: &[Value]) -> AppResult<()> {
        let json = serde_json::to_string(entries)?;
        self.kv.set(&self.key, &json)
    }

    /// Add a custom preset, replacing any custom preset with the same id
    pub fn save(&mut self, preset: FourSixPreset) -> AppResult<()> {
        if is_builtin_preset_id(&preset.id) {
            return Err(AppError::ReadOnlyPreset(preset.id));
        }

        let preset = FourSixPreset {
            is_default: false,
            ..preset
        };
        let result = self.entries_for_update().and_then(|mut entries| {
            let value = serde_json::to_value(&preset)?;
            match entries.iter_mut().find(|e| entry_id(e) == Some(preset.id.as_str())) {
                Some(existing) => *existing = value,
                None => entries.push(value),
            }
            self.write_entries(&entries)?;
            Ok(entries.len())
        });

        match result {
            Ok(count) => {
                tracing::info!("Saved preset {} ({} stored)", preset.id, count);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to save preset {}: {}", preset.id, e);
                Err(e)
            }
        }
    }

    /// Remove a custom preset. Built-in ids are ignored.
    pub fn delete(&mut self, id: &str) -> AppResult<()> {
        if is_builtin_preset_id(id) {
            tracing::debug!("Ignoring delete of built-in preset {}", id);
            return Ok(());
        }

        let result = self.entries_for_update().and_then(|mut entries| {
            entries.retain(|e| entry_id(e) != Some(id));
            self.write_entries(&entries)
        });

        if let Err(e) = &result {
            tracing::error!("Failed to delete preset {}: {}", id, e);
        } else {
            tracing::info!("Deleted preset {}", id);
        }
        result
    }
}

fn entry_id(entry: &Value) -> Option<&str> {
    entry.get("id").and_then(Value::as_str)
}

impl<S: KeyValueStore> PresetSource for PresetStore<S> {
    fn preset_by_id(&self, id: &str) -> Option<FourSixPreset> {
        self.get_by_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FourSixPour, DEFAULT_PRESET_ID};

    fn custom(id: &str, name: &str) -> FourSixPreset {
        FourSixPreset {
            id: id.to_string(),
            name: name.to_string(),
            pours: vec![
                FourSixPour::new(60.0, 0),
                FourSixPour::new(60.0, 40),
                FourSixPour::new(90.0, 80),
                FourSixPour::new(90.0, 120),
            ],
            is_default: false,
        }
    }

    #[test]
    fn test_load_all_without_data_is_builtins() {
        let store = PresetStore::new(MemoryStore::new());
        let presets = store.load_all();
        assert_eq!(presets, builtin_presets());
        assert_eq!(presets[0].id, DEFAULT_PRESET_ID);
    }

    #[test]
    fn test_save_replaces_same_id() {
        let mut store = PresetStore::new(MemoryStore::new());
        store.save(custom("custom-1", "First")).unwrap();
        store.save(custom("custom-1", "Renamed")).unwrap();

        let customs = store.custom_presets();
        assert_eq!(customs.len(), 1);
        assert_eq!(customs[0].name, "Renamed");
    }

    #[test]
    fn test_save_clears_default_flag() {
        let mut store = PresetStore::new(MemoryStore::new());
        let mut preset = custom("custom-2", "Sneaky");
        preset.is_default = true;
        store.save(preset).unwrap();
        assert!(!store.get_by_id("custom-2").unwrap().is_default);
    }

    #[test]
    fn test_builtins_are_read_only() {
        let mut store = PresetStore::new(MemoryStore::new());
        let err = store.save(custom(DEFAULT_PRESET_ID, "Override")).unwrap_err();
        assert!(matches!(err, AppError::ReadOnlyPreset(id) if id == DEFAULT_PRESET_ID));
        assert!(store.inner().is_empty());

        store.delete("bold-46").unwrap();
        assert_eq!(store.load_all().len(), 3);
    }

    #[test]
    fn test_persisted_layout() {
        let mut store = PresetStore::new(MemoryStore::new());
        store.save(custom("custom-3", "Layout")).unwrap();

        let raw = store.inner().get(PRESETS_STORAGE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["id"], "custom-3");
        assert_eq!(json[0]["isDefault"], false);
        assert_eq!(json[0]["pours"][1]["timeSeconds"], 40);
    }

    #[test]
    fn test_persisted_builtins_are_filtered() {
        let mut kv = MemoryStore::new();
        let raw = serde_json::to_string(&builtin_presets()).unwrap();
        kv.set(PRESETS_STORAGE_KEY, &raw).unwrap();

        let store = PresetStore::new(kv);
        assert_eq!(store.load_all().len(), 3);
    }

    #[test]
    fn test_custom_key() {
        let mut store = PresetStore::with_key(MemoryStore::new(), "other-key");
        store.save(custom("custom-4", "Keyed")).unwrap();
        assert!(store.inner().get("other-key").unwrap().is_some());
        assert!(store.inner().get(PRESETS_STORAGE_KEY).unwrap().is_none());
    }
}
