//! Validation utilities for the Pour-Over Brew Dashboard
//!
//! The 4:6 preset rules are checked independently and every violation is
//! reported, so an editor can show all problems at once.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::FourSixPour;
use crate::phase::{
    Phase, PhaseSplit, BASE_WATER_G, MASS_TOLERANCE_G, PHASE_1_FRACTION, PHASE_2_FRACTION,
};
use crate::types::{calculate_total_water, BrewSettings, WATER_RATIOS};

// ============================================================================
// 4:6 Preset Validation
// ============================================================================

/// A single rule violation found in a 4:6 pour sequence
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PresetIssue {
    #[error("At least one pour is required")]
    NoPours,

    #[error("Total water must be {target}g (current: {actual:.1}g)")]
    TotalMismatch { target: f64, actual: f64 },

    #[error("Phase 1 (sweetness) must be exactly 40% ({target}g). Current: {actual:.1}g ({percentage:.1}%)")]
    Phase1Mismatch {
        target: f64,
        actual: f64,
        percentage: f64,
    },

    #[error("Phase 2 (strength) must be exactly 60% ({target}g). Current: {actual:.1}g ({percentage:.1}%)")]
    Phase2Mismatch {
        target: f64,
        actual: f64,
        percentage: f64,
    },

    /// `index` is 0-based; the message is 1-based
    #[error("Pour {} amount must be greater than 0", .index + 1)]
    NonPositiveAmount { index: usize },

    /// Pour `index` does not start after pour `index - 1`
    #[error("Pour {} time must be after pour {} time", .index + 1, .index)]
    TimeNotIncreasing { index: usize },
}

impl PresetIssue {
    /// The phase an issue should be shown next to, if any
    pub fn phase(&self) -> Option<Phase> {
        match self {
            PresetIssue::Phase1Mismatch { .. } => Some(Phase::Sweetness),
            PresetIssue::Phase2Mismatch { .. } => Some(Phase::Strength),
            _ => None,
        }
    }

    /// The pour an issue refers to, if any (0-based)
    pub fn pour_index(&self) -> Option<usize> {
        match self {
            PresetIssue::NonPositiveAmount { index } | PresetIssue::TimeNotIncreasing { index } => {
                Some(*index)
            }
            _ => None,
        }
    }
}

/// Outcome of validating a 4:6 pour sequence.
///
/// Phase totals and percentages are filled in whether or not the pours are
/// valid so they can be displayed while editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub phase1_total: f64,
    pub phase2_total: f64,
    pub phase1_percentage: f64,
    pub phase2_percentage: f64,
    #[serde(skip)]
    pub issues: Vec<PresetIssue>,
}

impl ValidationResult {
    fn from_issues(issues: Vec<PresetIssue>, phase1_total: f64, phase2_total: f64) -> Self {
        Self {
            is_valid: issues.is_empty(),
            errors: issues.iter().map(ToString::to_string).collect(),
            phase1_total,
            phase2_total,
            phase1_percentage: (phase1_total / BASE_WATER_G) * 100.0,
            phase2_percentage: (phase2_total / BASE_WATER_G) * 100.0,
            issues,
        }
    }

    /// Messages that belong next to the given phase
    pub fn phase_errors(&self, phase: Phase) -> Vec<&str> {
        self.issues
            .iter()
            .zip(&self.errors)
            .filter(|(issue, _)| issue.phase() == Some(phase))
            .map(|(_, message)| message.as_str())
            .collect()
    }

    /// Messages not tied to either phase
    pub fn general_errors(&self) -> Vec<&str> {
        self.issues
            .iter()
            .zip(&self.errors)
            .filter(|(issue, _)| issue.phase().is_none())
            .map(|(_, message)| message.as_str())
            .collect()
    }
}

fn within_tolerance(actual: f64, target: f64) -> bool {
    (actual - target).abs() <= MASS_TOLERANCE_G
}

/// Validate a 4:6 pour sequence against the 300g base
pub fn validate_four_six_preset(pours: &[FourSixPour]) -> ValidationResult {
    if pours.is_empty() {
        return ValidationResult::from_issues(vec![PresetIssue::NoPours], 0.0, 0.0);
    }

    let mut issues = Vec::new();

    let total: f64 = pours.iter().map(|p| p.amount).sum();
    if !within_tolerance(total, BASE_WATER_G) {
        issues.push(PresetIssue::TotalMismatch {
            target: BASE_WATER_G,
            actual: total,
        });
    }

    let (phase1_total, phase2_total) = PhaseSplit::of(pours).totals(pours);

    let phase1_target = BASE_WATER_G * PHASE_1_FRACTION;
    if !within_tolerance(phase1_total, phase1_target) {
        issues.push(PresetIssue::Phase1Mismatch {
            target: phase1_target,
            actual: phase1_total,
            percentage: (phase1_total / BASE_WATER_G) * 100.0,
        });
    }

    let phase2_target = BASE_WATER_G * PHASE_2_FRACTION;
    if !within_tolerance(phase2_total, phase2_target) {
        issues.push(PresetIssue::Phase2Mismatch {
            target: phase2_target,
            actual: phase2_total,
            percentage: (phase2_total / BASE_WATER_G) * 100.0,
        });
    }

    issues.extend(
        pours
            .iter()
            .enumerate()
            .filter(|(_, pour)| !(pour.amount > 0.0))
            .map(|(index, _)| PresetIssue::NonPositiveAmount { index }),
    );

    issues.extend(
        pours
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[1].time_seconds <= pair[0].time_seconds)
            .map(|(i, _)| PresetIssue::TimeNotIncreasing { index: i + 1 }),
    );

    ValidationResult::from_issues(issues, phase1_total, phase2_total)
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate dose, ratio and the derived water total
pub fn validate_brew_settings(settings: &BrewSettings) -> Result<(), &'static str> {
    if !(settings.coffee_amount > 0.0) {
        return Err("Coffee amount must be greater than 0");
    }
    if !WATER_RATIOS.contains(&settings.water_ratio) {
        return Err("Water ratio must be between 1:12 and 1:20");
    }
    if settings.total_water != calculate_total_water(settings.coffee_amount, settings.water_ratio)
    {
        return Err("Total water does not match coffee amount and ratio");
    }
    Ok(())
}

/// Validate a preset name entered by the user
pub fn validate_preset_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Preset name is required");
    }
    Ok(())
}
