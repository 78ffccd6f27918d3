//! 4:6 preset validation tests
//!
//! Tests for the phase-proportion rules including:
//! - Total, phase 1 and phase 2 mass checks with 0.1g tolerance
//! - Per-pour positivity and strictly increasing times
//! - Accumulation of independent violations

use proptest::prelude::*;
use shared::{
    builtin_presets, find_phase1_end_index, validate_four_six_preset, FourSixPour, Phase,
    PresetIssue, BASE_WATER_G, PHASE_1_FRACTION,
};

fn pours(entries: &[(f64, u32)]) -> Vec<FourSixPour> {
    entries.iter().map(|&(a, t)| FourSixPour::new(a, t)).collect()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_builtin_presets_are_valid() {
        for preset in builtin_presets() {
            let result = validate_four_six_preset(&preset.pours);
            assert!(result.is_valid, "{}: {:?}", preset.id, result.errors);
            assert!((result.phase1_total - 120.0).abs() < 1e-9);
            assert!((result.phase2_total - 180.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_two_hundred_grams_invalid() {
        let result = validate_four_six_preset(&pours(&[(100.0, 0), (100.0, 30)]));
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("Total water must be 300g")));
        assert!(result.errors.iter().any(|e| e.starts_with("Phase 1")));
        assert!(result.errors.iter().any(|e| e.starts_with("Phase 2")));
    }

    #[test]
    fn test_original_pattern_valid() {
        let result =
            validate_four_six_preset(&pours(&[(50.0, 0), (70.0, 45), (90.0, 90), (90.0, 135)]));
        assert!(result.is_valid);
        assert_eq!(result.phase1_total, 120.0);
        assert_eq!(result.phase2_total, 180.0);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_time_regression_invalid() {
        let result = validate_four_six_preset(&pours(&[(120.0, 0), (90.0, 60), (90.0, 0)]));
        assert!(!result.is_valid);
        assert_eq!(result.issues, vec![PresetIssue::TimeNotIncreasing { index: 2 }]);
    }

    #[test]
    fn test_every_rule_reported_together() {
        // Short total, wrong split, a zero pour, and a time going backwards
        let result = validate_four_six_preset(&pours(&[(130.0, 30), (0.0, 20), (100.0, 60)]));
        assert_eq!(result.errors.len(), 5, "{:?}", result.errors);
        assert_eq!(result.phase_errors(Phase::Sweetness).len(), 1);
        assert_eq!(result.phase_errors(Phase::Strength).len(), 1);
        assert_eq!(result.general_errors().len(), 3);
    }

    #[test]
    fn test_percentages_always_reported() {
        let result = validate_four_six_preset(&pours(&[(60.0, 0), (240.0, 45)]));
        assert!(!result.is_valid);
        assert!((result.phase1_percentage - 100.0).abs() < 1e-9);
        assert_eq!(result.phase2_percentage, 0.0);
    }

    #[test]
    fn test_threshold_tie_stays_in_phase1() {
        // 119.95g is inside the tolerance, so the second pour closes phase 1
        let amounts = [60.0, 59.95, 180.05];
        assert_eq!(
            find_phase1_end_index(amounts, BASE_WATER_G, PHASE_1_FRACTION),
            Some(1)
        );
        let result = validate_four_six_preset(&pours(&[(60.0, 0), (59.95, 45), (180.05, 90)]));
        assert!(result.is_valid, "{:?}", result.errors);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Split `total` grams into `n` positive whole-gram pours
    fn split_strategy(total: u32, max_pours: usize) -> impl Strategy<Value = Vec<f64>> {
        (1..=max_pours).prop_flat_map(move |n| {
            prop::collection::vec(1u32..=100u32, n).prop_map(move |weights| {
                let sum: u32 = weights.iter().sum();
                let mut grams: Vec<u32> = weights.iter().map(|w| w * total / sum).collect();
                let assigned: u32 = grams.iter().sum();
                grams[0] += total - assigned;
                grams.into_iter().filter(|&g| g > 0).map(f64::from).collect()
            })
        })
    }

    fn valid_pours_strategy() -> impl Strategy<Value = Vec<FourSixPour>> {
        (split_strategy(120, 3), split_strategy(180, 4), 10u32..=60u32).prop_map(
            |(phase1, phase2, interval)| {
                phase1
                    .into_iter()
                    .chain(phase2)
                    .enumerate()
                    .map(|(i, amount)| FourSixPour::new(amount, i as u32 * interval))
                    .collect()
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: any 120g + 180g split with increasing times is valid
        #[test]
        fn prop_constructed_presets_valid(pours in valid_pours_strategy()) {
            let result = validate_four_six_preset(&pours);
            prop_assert!(result.is_valid, "{:?}", result.errors);
            prop_assert!((result.phase1_total - 120.0).abs() < 1e-9);
        }

        /// Property: is_valid is exactly "no errors"
        #[test]
        fn prop_valid_iff_no_errors(
            entries in prop::collection::vec((-50.0f64..200.0f64, 0u32..300u32), 0..8)
        ) {
            let result = validate_four_six_preset(&pours(&entries));
            prop_assert_eq!(result.is_valid, result.errors.is_empty());
            prop_assert_eq!(result.errors.len(), result.issues.len());
        }

        /// Property: percentages track the phase totals
        #[test]
        fn prop_percentages_match_totals(
            entries in prop::collection::vec((1.0f64..200.0f64, 0u32..300u32), 1..8)
        ) {
            let result = validate_four_six_preset(&pours(&entries));
            prop_assert!((result.phase1_percentage - result.phase1_total / 3.0).abs() < 1e-9);
            prop_assert!((result.phase2_percentage - result.phase2_total / 3.0).abs() < 1e-9);
        }

        /// Property: swapping two distinct times always breaks ordering
        #[test]
        fn prop_reversed_times_rejected(pours in valid_pours_strategy()) {
            prop_assume!(pours.len() >= 2);
            let mut reversed = pours.clone();
            let times: Vec<u32> = pours.iter().rev().map(|p| p.time_seconds).collect();
            for (pour, time) in reversed.iter_mut().zip(times) {
                pour.time_seconds = time;
            }
            let result = validate_four_six_preset(&reversed);
            prop_assert!(!result.is_valid);
            let time_errors = result
                .issues
                .iter()
                .filter(|i| matches!(i, PresetIssue::TimeNotIncreasing { .. }))
                .count();
            prop_assert_eq!(time_errors, reversed.len() - 1);
        }
    }
}
