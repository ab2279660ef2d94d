#![allow(clippy::float_cmp)]

use super::*;

const VARS: [&str; 10] = [
    "COURT_PADDING_PX",
    "MARKER_RADIUS_PX",
    "EVENT_QUEUE_CAPACITY",
    "GESTURE_TAP_MAX_DURATION_MS",
    "GESTURE_MULTI_TAP_DELAY_MS",
    "GESTURE_TAP_SLOP_PX",
    "GESTURE_CLEAR_TAP_COUNT",
    "GESTURE_DRAG_HOLD_MS",
    "GESTURE_LONG_PRESS_MS",
    "GESTURE_LONG_PRESS_PLACES",
];

/// Env vars are process-global; serialize the tests that touch them.
static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// # Safety
/// Caller must hold `ENV_LOCK`.
unsafe fn clear_court_env() {
    for var in VARS {
        unsafe { std::env::remove_var(var) };
    }
}

#[test]
fn from_env_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe { clear_court_env() };

    let cfg = CourtConfig::from_env();
    assert_eq!(cfg, CourtConfig::default());
    assert_eq!(cfg.marker_radius_px, 25.0);
    assert_eq!(cfg.gesture.clear_tap_count, 3);
    assert_eq!(cfg.gesture.drag_hold_ms, 500);
    assert!(!cfg.gesture.long_press_places);
}

#[test]
fn from_env_parses_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_court_env();
        std::env::set_var("COURT_PADDING_PX", "12.5");
        std::env::set_var("MARKER_RADIUS_PX", "18");
        std::env::set_var("EVENT_QUEUE_CAPACITY", "16");
        std::env::set_var("GESTURE_TAP_MAX_DURATION_MS", "250");
        std::env::set_var("GESTURE_MULTI_TAP_DELAY_MS", "300");
        std::env::set_var("GESTURE_TAP_SLOP_PX", "4");
        std::env::set_var("GESTURE_CLEAR_TAP_COUNT", "4");
        std::env::set_var("GESTURE_DRAG_HOLD_MS", "700");
        std::env::set_var("GESTURE_LONG_PRESS_MS", "350");
        std::env::set_var("GESTURE_LONG_PRESS_PLACES", "true");
    }

    let cfg = CourtConfig::from_env();
    assert_eq!(cfg.padding_px, 12.5);
    assert_eq!(cfg.marker_radius_px, 18.0);
    assert_eq!(cfg.event_queue_capacity, 16);
    assert_eq!(
        cfg.gesture,
        GestureConfig {
            tap_max_duration_ms: 250,
            multi_tap_delay_ms: 300,
            tap_slop_px: 4.0,
            clear_tap_count: 4,
            drag_hold_ms: 700,
            long_press_ms: 350,
            long_press_places: true,
        }
    );

    unsafe { clear_court_env() };
}

#[test]
fn from_env_ignores_garbage() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_court_env();
        std::env::set_var("GESTURE_DRAG_HOLD_MS", "soon");
        std::env::set_var("GESTURE_LONG_PRESS_PLACES", "yes please");
    }

    let cfg = CourtConfig::from_env();
    assert_eq!(cfg.gesture.drag_hold_ms, DRAG_HOLD_MS);
    assert!(!cfg.gesture.long_press_places);

    unsafe { clear_court_env() };
}

#[test]
fn from_env_clamps_degenerate_values() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_court_env();
        std::env::set_var("GESTURE_CLEAR_TAP_COUNT", "1");
        std::env::set_var("EVENT_QUEUE_CAPACITY", "0");
        std::env::set_var("COURT_PADDING_PX", "-5");
    }

    let cfg = CourtConfig::from_env();
    assert_eq!(cfg.gesture.clear_tap_count, 2);
    assert_eq!(cfg.event_queue_capacity, 1);
    assert_eq!(cfg.padding_px, 0.0);

    unsafe { clear_court_env() };
}
