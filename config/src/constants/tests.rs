//! Tests for `Tolerances` and `ConfigError`.

use super::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_matches_rounding_step() {
    let step = 1.0 / Tolerances::default().coordinate_scale();
    assert!((DEGENERATE_EPSILON_MM - step).abs() < 1e-18);
}

#[test]
fn test_round_half_away_from_zero() {
    let tolerances = Tolerances::new(1, 0.1, 2.0).unwrap();
    assert_eq!(tolerances.round(0.25), 0.3);
    assert_eq!(tolerances.round(-0.25), -0.3);
}

#[test]
fn test_quantize_merges_signed_zero() {
    let tolerances = Tolerances::default();
    assert_eq!(tolerances.quantize(-0.0), tolerances.quantize(0.0));
    assert_eq!(tolerances.quantize(-4e-7), 0);
}

#[test]
fn test_merge_window_scales_with_pitch() {
    let tolerances = Tolerances::default();
    assert_eq!(tolerances.plate_merge_window(1.0), 2.0);
    assert_eq!(tolerances.plate_merge_window(0.5), 1.0);
}

// =============================================================================
// VALIDATION TESTS
// =============================================================================

#[test]
fn test_default_tolerances_are_valid() {
    let tolerances = Tolerances::default();
    let rebuilt = Tolerances::new(
        tolerances.coordinate_decimals,
        tolerances.degenerate_epsilon,
        tolerances.plate_merge_factor,
    );
    assert_eq!(rebuilt, Ok(tolerances));
}

#[test]
fn test_tolerances_reject_invalid_values() {
    assert_eq!(
        Tolerances::new(0, 1e-6, 2.0).unwrap_err(),
        ConfigError::InvalidDecimals(0)
    );
    assert_eq!(
        Tolerances::new(13, 1e-6, 2.0).unwrap_err(),
        ConfigError::InvalidDecimals(13)
    );
    assert_eq!(
        Tolerances::new(6, -1.0, 2.0).unwrap_err(),
        ConfigError::InvalidEpsilon(-1.0)
    );
    assert!(matches!(
        Tolerances::new(6, 1e-6, f64::NAN),
        Err(ConfigError::InvalidMergeFactor(_))
    ));
}

#[test]
fn test_config_error_display() {
    let message = ConfigError::InvalidMergeFactor(0.0).to_string();
    assert!(message.contains("plate_merge_factor"));
}
