//! Draft editing for custom 4:6 presets

use chrono::{DateTime, Utc};

use crate::error::{AppError, AppResult};
use crate::models::{FourSixPour, FourSixPreset};
use crate::phase::PhaseSplit;
use crate::storage::{KeyValueStore, PresetStore};
use crate::validation::{validate_four_six_preset, validate_preset_name, ValidationResult};

/// Amount given to a newly added pour (g)
pub const NEW_POUR_AMOUNT_G: f64 = 50.0;

/// Gap between the last pour and a newly added one
pub const NEW_POUR_INTERVAL_SECONDS: u32 = 30;

/// A preset being created or edited
#[derive(Debug, Clone, PartialEq)]
pub struct PresetDraft {
    /// Set when editing an existing custom preset
    pub id: Option<String>,
    pub name: String,
    pub pours: Vec<FourSixPour>,
}

impl Default for PresetDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetDraft {
    /// Blank draft seeded with the original 4:6 pours
    pub fn new() -> Self {
        Self {
            id: None,
            name: String::new(),
            pours: vec![
                FourSixPour::new(50.0, 0),
                FourSixPour::new(70.0, 45),
                FourSixPour::new(90.0, 90),
                FourSixPour::new(90.0, 135),
            ],
        }
    }

    /// Start from an existing preset. Built-ins are copied under a new id.
    pub fn from_preset(preset: &FourSixPreset) -> Self {
        Self {
            id: (!preset.is_default).then(|| preset.id.clone()),
            name: preset.name.clone(),
            pours: preset.pours.clone(),
        }
    }

    pub fn add_pour(&mut self) {
        let time_seconds = self
            .pours
            .last()
            .map_or(0, |last| last.time_seconds + NEW_POUR_INTERVAL_SECONDS);
        self.pours
            .push(FourSixPour::new(NEW_POUR_AMOUNT_G, time_seconds));
    }

    /// Remove a pour, keeping at least one. Returns whether anything changed.
    pub fn remove_pour(&mut self, index: usize) -> bool {
        if self.pours.len() <= 1 || index >= self.pours.len() {
            return false;
        }
        self.pours.remove(index);
        true
    }

    pub fn set_amount(&mut self, index: usize, amount: f64) {
        if let Some(pour) = self.pours.get_mut(index) {
            pour.amount = amount;
        }
    }

    pub fn set_time(&mut self, index: usize, time_seconds: u32) {
        if let Some(pour) = self.pours.get_mut(index) {
            pour.time_seconds = time_seconds;
        }
    }

    pub fn total_water(&self) -> f64 {
        self.pours.iter().map(|p| p.amount).sum()
    }

    pub fn validation(&self) -> ValidationResult {
        validate_four_six_preset(&self.pours)
    }

    pub fn phase_split(&self) -> PhaseSplit {
        PhaseSplit::of(&self.pours)
    }

    pub fn can_save(&self) -> bool {
        validate_preset_name(&self.name).is_ok() && self.validation().is_valid
    }

    pub fn build(self) -> AppResult<FourSixPreset> {
        self.build_at(Utc::now())
    }

    /// Finish the draft, generating an id from `now` when it has none
    pub fn build_at(self, now: DateTime<Utc>) -> AppResult<FourSixPreset> {
        if validate_preset_name(&self.name).is_err() {
            return Err(AppError::MissingPresetName);
        }
        let validation = self.validation();
        if !validation.is_valid {
            return Err(AppError::InvalidPreset {
                errors: validation.errors,
            });
        }

        Ok(FourSixPreset {
            id: self
                .id
                .unwrap_or_else(|| format!("custom-{}", now.timestamp_millis())),
            name: self.name.trim().to_string(),
            pours: self.pours,
            is_default: false,
        })
    }

    /// Build the preset and persist it
    pub fn save<S: KeyValueStore>(self, store: &mut PresetStore<S>) -> AppResult<FourSixPreset> {
        let preset = self.build()?;
        store.save(preset.clone())?;
        Ok(preset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::builtin_preset;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;

    #[test]
    fn test_new_draft_is_valid_but_unnamed() {
        let draft = PresetDraft::new();
        assert!(draft.validation().is_valid);
        assert!(!draft.can_save());
        assert_eq!(draft.total_water(), 300.0);
    }

    #[test]
    fn test_add_pour_follows_last() {
        let mut draft = PresetDraft::new();
        draft.add_pour();
        assert_eq!(draft.pours.len(), 5);
        assert_eq!(draft.pours[4], FourSixPour::new(50.0, 165));

        draft.pours.clear();
        draft.add_pour();
        assert_eq!(draft.pours[0], FourSixPour::new(50.0, 0));
    }

    #[test]
    fn test_remove_keeps_one_pour() {
        let mut draft = PresetDraft::new();
        assert!(draft.remove_pour(0));
        assert!(!draft.remove_pour(10));
        while draft.pours.len() > 1 {
            assert!(draft.remove_pour(0));
        }
        assert!(!draft.remove_pour(0));
        assert_eq!(draft.pours.len(), 1);
    }

    #[test]
    fn test_edits_update_validation() {
        let mut draft = PresetDraft::new();
        draft.set_amount(0, 60.0);
        draft.set_amount(1, 60.0);
        assert!(draft.validation().is_valid);

        draft.set_time(3, 10);
        let result = draft.validation();
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["Pour 4 time must be after pour 3 time".to_string()]);
    }

    #[test]
    fn test_build_generates_id_and_trims_name() {
        let mut draft = PresetDraft::new();
        draft.name = "  Morning  ".to_string();
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();

        let preset = draft.build_at(now).unwrap();
        assert_eq!(preset.id, "custom-1700000000123");
        assert_eq!(preset.name, "Morning");
        assert!(!preset.is_default);
    }

    #[test]
    fn test_build_rejects_blank_name() {
        let draft = PresetDraft::new();
        assert!(matches!(draft.build(), Err(AppError::MissingPresetName)));
    }

    #[test]
    fn test_build_rejects_invalid_pours() {
        let mut draft = PresetDraft::new();
        draft.name = "Broken".to_string();
        draft.set_amount(0, 10.0);
        match draft.build() {
            Err(AppError::InvalidPreset { errors }) => {
                assert!(errors.iter().any(|e| e.starts_with("Total water")));
            }
            other => panic!("expected invalid preset, got {:?}", other),
        }
    }

    #[test]
    fn test_editing_builtin_gets_new_id() {
        let original = builtin_preset("gentle-46").unwrap();
        let draft = PresetDraft::from_preset(&original);
        assert_eq!(draft.id, None);
        assert_eq!(draft.pours, original.pours);
    }

    #[test]
    fn test_editing_custom_keeps_id() {
        let mut store = PresetStore::new(MemoryStore::new());
        let mut draft = PresetDraft::new();
        draft.name = "Mine".to_string();
        let saved = draft.save(&mut store).unwrap();

        let mut edit = PresetDraft::from_preset(&saved);
        edit.name = "Mine, renamed".to_string();
        let updated = edit.save(&mut store).unwrap();

        assert_eq!(updated.id, saved.id);
        let customs = store.custom_presets();
        assert_eq!(customs.len(), 1);
        assert_eq!(customs[0].name, "Mine, renamed");
    }
}
