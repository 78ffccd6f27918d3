//! Brew schedule generation
//!
//! Each built-in method turns a target water mass into an ordered list of
//! [`BrewStep`]s. Pour times never scale with the batch size; only amounts do.

use crate::models::{
    BrewMethod, BrewStep, Credit, FourSixPreset, MethodKind, DEFAULT_PRESET_ID,
};
use crate::phase::{PhaseSplit, BASE_WATER_G};
use crate::storage::{BuiltinPresets, PresetSource};

/// All brewing methods, in display order
pub static BREW_METHODS: [BrewMethod; 3] = [
    BrewMethod {
        kind: MethodKind::FourSix,
        name: "4:6 Method",
        description: "Tetsu Kasuya's 4:6 method - 4 pours with progressive volumes",
        credit: Some(Credit {
            name: "Tetsu Kasuya (2016 World Brewers Cup Champion)",
            url: "https://projectbarista.com/4-6-method-recipe/",
        }),
        total_brew_time_seconds: 210,
    },
    BrewMethod {
        kind: MethodKind::Hoffmann,
        name: "Hoffman Method",
        description: "James Hoffmann's 1 Cup V60 method - 5 equal pours (20% each)",
        credit: Some(Credit {
            name: "James Hoffmann",
            url: "https://www.youtube.com/watch?v=1oB1oDrDkHM",
        }),
        total_brew_time_seconds: 180,
    },
    BrewMethod {
        kind: MethodKind::SinglePour,
        name: "Single Pour",
        description: "Simple continuous pour method",
        credit: None,
        total_brew_time_seconds: 180,
    },
];

pub fn brew_methods() -> &'static [BrewMethod] {
    &BREW_METHODS
}

pub fn get_brew_method(id: &str) -> Option<&'static BrewMethod> {
    let kind = MethodKind::from_id(id)?;
    BREW_METHODS.iter().find(|m| m.kind == kind)
}

/// Inputs a method may consult besides the water mass
#[derive(Clone, Copy)]
pub struct StepContext<'a> {
    /// Selected 4:6 preset; the first built-in when `None`
    pub preset_id: Option<&'a str>,
    pub presets: &'a dyn PresetSource,
}

impl<'a> StepContext<'a> {
    pub fn new(presets: &'a dyn PresetSource) -> Self {
        Self {
            preset_id: None,
            presets,
        }
    }

    pub fn with_preset(self, preset_id: &'a str) -> Self {
        Self {
            preset_id: Some(preset_id),
            ..self
        }
    }
}

impl Default for StepContext<'_> {
    fn default() -> Self {
        Self::new(&BuiltinPresets)
    }
}

impl std::fmt::Debug for StepContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepContext")
            .field("preset_id", &self.preset_id)
            .finish_non_exhaustive()
    }
}

impl BrewMethod {
    /// Schedule for `total_water` grams. Empty when there is nothing to pour.
    pub fn generate_steps(&self, total_water: f64, ctx: StepContext<'_>) -> Vec<BrewStep> {
        if !(total_water > 0.0) {
            return Vec::new();
        }
        match self.kind {
            MethodKind::FourSix => four_six_steps(total_water, ctx),
            MethodKind::Hoffmann => fraction_steps(total_water, HOFFMANN_POURS),
            MethodKind::SinglePour => fraction_steps(total_water, SINGLE_POUR),
        }
    }
}

/// Look up a method by id and generate its schedule
pub fn generate_steps(method_id: &str, total_water: f64, ctx: StepContext<'_>) -> Vec<BrewStep> {
    get_brew_method(method_id)
        .map(|method| method.generate_steps(total_water, ctx))
        .unwrap_or_default()
}

/// A pour expressed as a share of the total water
struct FractionPour {
    fraction: f64,
    time_seconds: u32,
    description: &'static str,
}

const SINGLE_POUR: &[FractionPour] = &[FractionPour {
    fraction: 1.0,
    time_seconds: 0,
    description: "Pour all water in a slow, continuous stream",
}];

// Bloom plus four pours, each 20% of the total
const HOFFMANN_POURS: &[FractionPour] = &[
    FractionPour {
        fraction: 0.2,
        time_seconds: 0,
        description: "Bloom - swirl gently at 10-15s",
    },
    FractionPour {
        fraction: 0.2,
        time_seconds: 45,
        description: "Pour to 40% total",
    },
    FractionPour {
        fraction: 0.2,
        time_seconds: 70,
        description: "Pour to 60% total",
    },
    FractionPour {
        fraction: 0.2,
        time_seconds: 90,
        description: "Pour to 80% total",
    },
    FractionPour {
        fraction: 0.2,
        time_seconds: 110,
        description: "Pour to 100% total - swirl at 2:00",
    },
];

// Used when the selected 4:6 preset cannot be resolved
const FOUR_SIX_FALLBACK: &[FractionPour] = &[
    FractionPour {
        fraction: 0.1667,
        time_seconds: 0,
        description: "First pour (40% phase - affects sweetness)",
    },
    FractionPour {
        fraction: 0.2333,
        time_seconds: 45,
        description: "Second pour (40% phase - affects sweetness)",
    },
    FractionPour {
        fraction: 0.3,
        time_seconds: 90,
        description: "Third pour (60% phase - affects strength)",
    },
    FractionPour {
        fraction: 0.3,
        time_seconds: 135,
        description: "Fourth pour (60% phase - affects strength)",
    },
];

fn fraction_steps(total_water: f64, pours: &[FractionPour]) -> Vec<BrewStep> {
    let mut cumulative = 0.0;
    let mut steps: Vec<BrewStep> = pours
        .iter()
        .zip(1..)
        .map(|(pour, step_number)| {
            let water_amount = total_water * pour.fraction;
            cumulative += water_amount;
            BrewStep {
                step_number,
                water_amount,
                cumulative_water: cumulative,
                time_seconds: pour.time_seconds,
                description: pour.description.to_string(),
            }
        })
        .collect();

    // The fractions sum to one; pin the last total so rounding never shows
    if let Some(last) = steps.last_mut() {
        last.cumulative_water = total_water;
    }
    steps
}

fn four_six_steps(total_water: f64, ctx: StepContext<'_>) -> Vec<BrewStep> {
    // An empty selection means no selection
    let preset_id = ctx
        .preset_id
        .filter(|id| !id.is_empty())
        .unwrap_or(DEFAULT_PRESET_ID);
    match ctx.presets.preset_by_id(preset_id) {
        Some(preset) => scale_preset(&preset, total_water),
        None => {
            tracing::debug!("Preset {} not found, using fallback 4:6 pours", preset_id);
            fraction_steps(total_water, FOUR_SIX_FALLBACK)
        }
    }
}

/// Scale a preset authored at the base mass onto `total_water` grams
pub fn scale_preset(preset: &FourSixPreset, total_water: f64) -> Vec<BrewStep> {
    let scale = total_water / BASE_WATER_G;
    let split = PhaseSplit::of(&preset.pours);
    let mut cumulative = 0.0;

    preset
        .pours
        .iter()
        .enumerate()
        .map(|(index, pour)| {
            let water_amount = pour.amount * scale;
            cumulative += water_amount;
            let phase = split.phase_of(index);
            BrewStep {
                step_number: index as u32 + 1,
                water_amount,
                cumulative_water: cumulative,
                time_seconds: pour.time_seconds,
                description: format!("Pour {} ({})", index + 1, phase.description()),
            }
        })
        .collect()
}
