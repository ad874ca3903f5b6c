#![allow(clippy::float_cmp)]

use super::*;

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_missing_returns_default() {
    let val: f64 = env_parse("__CASEBOARD_TEST_MISSING__", 42.0);
    assert_eq!(val, 42.0);
}

#[test]
fn env_parse_present_valid() {
    unsafe { std::env::set_var("__CASEBOARD_TEST_VALID__", " 99 ") };
    let val: u32 = env_parse("__CASEBOARD_TEST_VALID__", 0);
    assert_eq!(val, 99);
    unsafe { std::env::remove_var("__CASEBOARD_TEST_VALID__") };
}

#[test]
fn env_parse_present_invalid_returns_default() {
    unsafe { std::env::set_var("__CASEBOARD_TEST_INVALID__", "wide") };
    let val: f64 = env_parse("__CASEBOARD_TEST_INVALID__", 7.0);
    assert_eq!(val, 7.0);
    unsafe { std::env::remove_var("__CASEBOARD_TEST_INVALID__") };
}

#[test]
fn env_parse_px_rejects_negative() {
    unsafe { std::env::set_var("__CASEBOARD_TEST_NEG__", "-3") };
    assert_eq!(env_parse_px("__CASEBOARD_TEST_NEG__", 15.0), 15.0);
    unsafe { std::env::remove_var("__CASEBOARD_TEST_NEG__") };
}

#[test]
fn env_parse_px_rejects_nan() {
    unsafe { std::env::set_var("__CASEBOARD_TEST_NAN__", "NaN") };
    assert_eq!(env_parse_px("__CASEBOARD_TEST_NAN__", 15.0), 15.0);
    unsafe { std::env::remove_var("__CASEBOARD_TEST_NAN__") };
}

// =============================================================================
// LayoutConfig
// =============================================================================

#[test]
fn default_matches_constants() {
    let config = LayoutConfig::default();
    assert_eq!(config.gap, DEFAULT_GAP_PX);
    assert_eq!(config.min_width, MIN_WIDGET_WIDTH);
    assert_eq!(config.min_height, MIN_WIDGET_HEIGHT);
    assert_eq!(config.free_space_step, FREE_SPACE_STEP_PX);
    assert_eq!(config.snap_pitch, SNAP_PITCH_PX);
    assert!(!config.grid_snap);
    assert_eq!(config.storage_key, "crmFreeformLayout");
}

#[test]
fn positive_or_replaces_zero() {
    assert_eq!(positive_or(0.0, 40.0), 40.0);
    assert_eq!(positive_or(8.0, 40.0), 8.0);
}

// Every CASEBOARD_* variable is touched by this single test so parallel tests
// never observe each other's overrides.
#[test]
fn from_env_reads_overrides_and_falls_back() {
    let keys = [
        "CASEBOARD_GAP",
        "CASEBOARD_MIN_WIDTH",
        "CASEBOARD_MIN_HEIGHT",
        "CASEBOARD_FREE_SPACE_STEP",
        "CASEBOARD_SNAP_PITCH",
        "CASEBOARD_GRID_SNAP",
        "CASEBOARD_STORAGE_KEY",
    ];
    unsafe {
        for key in keys {
            std::env::remove_var(key);
        }
    }
    assert_eq!(LayoutConfig::from_env(), LayoutConfig::default());

    unsafe {
        std::env::set_var("CASEBOARD_GAP", "20");
        std::env::set_var("CASEBOARD_MIN_WIDTH", "240");
        std::env::set_var("CASEBOARD_FREE_SPACE_STEP", "0");
        std::env::set_var("CASEBOARD_SNAP_PITCH", "8");
        std::env::set_var("CASEBOARD_GRID_SNAP", "true");
        std::env::set_var("CASEBOARD_STORAGE_KEY", "  myLayout ");
    }
    let config = LayoutConfig::from_env();
    assert_eq!(config.gap, 20.0);
    assert_eq!(config.min_width, 240.0);
    assert_eq!(config.min_height, MIN_WIDGET_HEIGHT);
    assert_eq!(config.free_space_step, FREE_SPACE_STEP_PX);
    assert_eq!(config.snap_pitch, 8.0);
    assert!(config.grid_snap);
    assert_eq!(config.storage_key, "myLayout");

    unsafe {
        for key in keys {
            std::env::remove_var(key);
        }
    }
}
