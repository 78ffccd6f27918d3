//! 4:6 phase classification
//!
//! A 4:6 preset splits its water into a sweetness phase (the first 40% of the
//! base mass) and a strength phase (the remaining 60%). Pours are assigned to
//! a phase by where the running total crosses the 40% threshold.

use serde::{Deserialize, Serialize};

use crate::models::FourSixPour;

/// Reference mass every 4:6 preset is authored against (g)
pub const BASE_WATER_G: f64 = 300.0;

/// Share of the base mass that belongs to phase 1
pub const PHASE_1_FRACTION: f64 = 0.4;

/// Share of the base mass that belongs to phase 2
pub const PHASE_2_FRACTION: f64 = 0.6;

/// Absolute slack for mass comparisons (g)
pub const MASS_TOLERANCE_G: f64 = 0.1;

/// The two phases of a 4:6 brew
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// First 40%, controls sweetness/acidity balance
    Sweetness,
    /// Remaining 60%, controls strength
    Strength,
}

impl Phase {
    pub fn description(&self) -> &'static str {
        match self {
            Phase::Sweetness => "40% phase - affects sweetness",
            Phase::Strength => "60% phase - affects strength",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Sweetness => write!(f, "Phase 1"),
            Phase::Strength => write!(f, "Phase 2"),
        }
    }
}

/// Index of the last phase 1 pour.
///
/// Returns the first index at which the running sum of `amounts` reaches
/// `base_water * phase1_fraction` less [`MASS_TOLERANCE_G`], or `None` when
/// the sum never gets there.
pub fn find_phase1_end_index<I>(amounts: I, base_water: f64, phase1_fraction: f64) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let threshold = base_water * phase1_fraction - MASS_TOLERANCE_G;
    let mut cumulative = 0.0;
    for (index, amount) in amounts.into_iter().enumerate() {
        cumulative += amount;
        if cumulative >= threshold {
            return Some(index);
        }
    }
    None
}

/// Where a pour sequence splits into its two phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseSplit {
    end_index: Option<usize>,
}

impl PhaseSplit {
    /// Classify pours against the standard 300g / 40% split
    pub fn of(pours: &[FourSixPour]) -> Self {
        Self {
            end_index: find_phase1_end_index(
                pours.iter().map(|p| p.amount),
                BASE_WATER_G,
                PHASE_1_FRACTION,
            ),
        }
    }

    /// Index of the last phase 1 pour, if the threshold was reached
    pub fn phase1_end_index(&self) -> Option<usize> {
        self.end_index
    }

    /// Phase of the pour at `index`. Without a boundary every pour is phase 1.
    pub fn phase_of(&self, index: usize) -> Phase {
        match self.end_index {
            Some(end) if index > end => Phase::Strength,
            _ => Phase::Sweetness,
        }
    }

    /// Number of pours that belong to phase 1
    pub fn phase1_len(&self, pour_count: usize) -> usize {
        match self.end_index {
            Some(end) => (end + 1).min(pour_count),
            None => pour_count,
        }
    }

    /// Phase 1 and phase 2 subtotals, in the pours' own units
    pub fn totals(&self, pours: &[FourSixPour]) -> (f64, f64) {
        let (phase1, phase2) = pours.split_at(self.phase1_len(pours.len()));
        (
            phase1.iter().map(|p| p.amount).sum(),
            phase2.iter().map(|p| p.amount).sum(),
        )
    }
}
