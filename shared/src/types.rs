//! Common types used across the dashboard

use serde::{Deserialize, Serialize};

/// Water ratios (1:X) offered to the user
pub const WATER_RATIOS: [f64; 9] = [12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0, 19.0, 20.0];

/// Total water for a dose at a given 1:X ratio
pub fn calculate_total_water(coffee_amount: f64, ratio: f64) -> f64 {
    coffee_amount * ratio
}

/// Short strength hint shown next to some ratios
pub fn ratio_label(ratio: f64) -> Option<&'static str> {
    match ratio as u32 {
        _ if ratio.fract() != 0.0 => None,
        12 => Some("Strong"),
        15 => Some("Balanced"),
        17 => Some("Light"),
        20 => Some("Very Light"),
        _ => None,
    }
}

/// Dose and ratio chosen by the user.
///
/// `total_water` is derived from the other two fields; use the
/// `with_*` methods to change inputs so it never goes stale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrewSettings {
    pub coffee_amount: f64,
    pub water_ratio: f64,
    pub total_water: f64,
}

impl BrewSettings {
    pub fn new(coffee_amount: f64, water_ratio: f64) -> Self {
        Self {
            coffee_amount,
            water_ratio,
            total_water: calculate_total_water(coffee_amount, water_ratio),
        }
    }

    pub fn with_coffee_amount(self, coffee_amount: f64) -> Self {
        Self::new(coffee_amount, self.water_ratio)
    }

    pub fn with_water_ratio(self, water_ratio: f64) -> Self {
        Self::new(self.coffee_amount, water_ratio)
    }
}

impl Default for BrewSettings {
    fn default() -> Self {
        Self::new(20.0, 15.0)
    }
}

/// Format elapsed seconds as `m:ss`
pub fn format_brew_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
