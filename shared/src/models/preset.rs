//! 4:6 preset models

use serde::{Deserialize, Serialize};

/// One pour of a 4:6 preset, authored against the 300g base
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FourSixPour {
    /// Grams of water at the base mass
    pub amount: f64,
    pub time_seconds: u32,
}

impl FourSixPour {
    pub const fn new(amount: f64, time_seconds: u32) -> Self {
        Self {
            amount,
            time_seconds,
        }
    }
}

/// A named pour pattern for the 4:6 method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FourSixPreset {
    pub id: String,
    pub name: String,
    pub pours: Vec<FourSixPour>,
    /// True only for built-in presets
    #[serde(default)]
    pub is_default: bool,
}

impl FourSixPreset {
    /// Sum of all pour amounts at the base mass
    pub fn total_amount(&self) -> f64 {
        self.pours.iter().map(|p| p.amount).sum()
    }
}

/// Id of the preset used when no preset is selected
pub const DEFAULT_PRESET_ID: &str = "default-46";

struct BuiltinPreset {
    id: &'static str,
    name: &'static str,
    pours: &'static [FourSixPour],
}

const BUILTIN_PRESETS: &[BuiltinPreset] = &[
    BuiltinPreset {
        id: DEFAULT_PRESET_ID,
        name: "Original 4:6",
        pours: &[
            FourSixPour::new(50.0, 0),
            FourSixPour::new(70.0, 45),
            FourSixPour::new(90.0, 90),
            FourSixPour::new(90.0, 135),
        ],
    },
    BuiltinPreset {
        id: "gentle-46",
        name: "Gentle (5 pours)",
        pours: &[
            FourSixPour::new(60.0, 0),
            FourSixPour::new(60.0, 45),
            FourSixPour::new(60.0, 90),
            FourSixPour::new(60.0, 120),
            FourSixPour::new(60.0, 150),
        ],
    },
    BuiltinPreset {
        id: "bold-46",
        name: "Bold (3 pours)",
        pours: &[
            FourSixPour::new(120.0, 0),
            FourSixPour::new(90.0, 60),
            FourSixPour::new(90.0, 120),
        ],
    },
];

impl BuiltinPreset {
    fn to_preset(&self) -> FourSixPreset {
        FourSixPreset {
            id: self.id.to_string(),
            name: self.name.to_string(),
            pours: self.pours.to_vec(),
            is_default: true,
        }
    }
}

/// The built-in presets, in display order
pub fn builtin_presets() -> Vec<FourSixPreset> {
    BUILTIN_PRESETS.iter().map(BuiltinPreset::to_preset).collect()
}

/// Look up a built-in preset by id
pub fn builtin_preset(id: &str) -> Option<FourSixPreset> {
    BUILTIN_PRESETS
        .iter()
        .find(|p| p.id == id)
        .map(BuiltinPreset::to_preset)
}

/// Check whether an id belongs to a built-in preset
pub fn is_builtin_preset_id(id: &str) -> bool {
    BUILTIN_PRESETS.iter().any(|p| p.id == id)
}
