//! # Tests for Config Constants
//!
//! Sanity checks on the tuned orientation and projection constants.

use crate::constants::*;

// =============================================================================
// ORIENTATION TESTS
// =============================================================================

#[test]
fn test_angle_domain() {
    assert_eq!(MIN_BUILD_ANGLE_DEG, 0.0);
    assert_eq!(MAX_BUILD_ANGLE_DEG, 90.0);
}

#[test]
fn test_perturbed_angle_leaves_unstable_window() {
    assert!((PERTURBED_ANGLE_DEG - UNSTABLE_ANGLE_DEG).abs() >= UNSTABLE_ANGLE_WINDOW_DEG);
    assert!(PERTURBED_ANGLE_DEG < MAX_BUILD_ANGLE_DEG);
}

// =============================================================================
// PROJECTION TESTS
// =============================================================================

#[test]
fn test_flat_contact_is_positive() {
    assert!(FLAT_CONTACT_WIDTH_MM > 0.0);
    assert!(FLAT_DEPTH_HEIGHT_FRACTION > 0.0 && FLAT_DEPTH_HEIGHT_FRACTION < 1.0);
}
