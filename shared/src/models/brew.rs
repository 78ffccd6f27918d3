//! Brew schedule and brew method models

use serde::{Deserialize, Serialize};

/// A single timed pour in a brew schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrewStep {
    /// 1-based, contiguous
    pub step_number: u32,
    /// Water poured in this step (g)
    pub water_amount: f64,
    /// Water poured so far, this step included (g)
    pub cumulative_water: f64,
    /// Elapsed time at which this pour begins
    pub time_seconds: u32,
    pub description: String,
}

/// Built-in brewing methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodKind {
    /// Tetsu Kasuya's 4:6 method, preset driven
    #[serde(rename = "4-6")]
    FourSix,
    /// James Hoffmann's 1 cup V60 method
    #[serde(rename = "hoffman")]
    Hoffmann,
    #[serde(rename = "single-pour")]
    SinglePour,
}

impl MethodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodKind::FourSix => "4-6",
            MethodKind::Hoffmann => "hoffman",
            MethodKind::SinglePour => "single-pour",
        }
    }

    /// Parse a method id such as `"4-6"`
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "4-6" => Some(MethodKind::FourSix),
            "hoffman" => Some(MethodKind::Hoffmann),
            "single-pour" => Some(MethodKind::SinglePour),
            _ => None,
        }
    }
}

impl std::fmt::Display for MethodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Attribution for a published recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Credit {
    pub name: &'static str,
    pub url: &'static str,
}

/// A brewing method as shown to the user.
///
/// Methods are defined once as constants (see [`crate::recipe::BREW_METHODS`])
/// and step generation dispatches on [`MethodKind`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrewMethod {
    #[serde(rename = "id")]
    pub kind: MethodKind,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<Credit>,
    /// Expected time until drawdown completes
    pub total_brew_time_seconds: u32,
}

impl BrewMethod {
    pub fn id(&self) -> &'static str {
        self.kind.as_str()
    }
}
