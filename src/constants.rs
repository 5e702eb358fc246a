//! Centralized constants for the jiggle application
//!
//! Configurable numerical values used throughout the application, with
//! their purpose, unit, and recommended range.

// ============================================================================
// INTERVAL CONFIGURATION
// ============================================================================

/// Interval prefilled in the input field on launch.
/// Unit: seconds
/// Recommended range: 5-60 (short enough to beat common idle timeouts)
pub const DEFAULT_INTERVAL_SECONDS: u64 = 10;

// ============================================================================
// MOVER LOOP
// ============================================================================

/// Countdown tick between display updates; also the upper bound on how long
/// a stop request can go unobserved by the worker.
/// Unit: milliseconds
/// Range: Fixed at 1000, the countdown is defined in whole seconds
pub const COUNTDOWN_TICK_MS: u64 = 1000;

/// Pointer displacement applied on each axis before moving back.
/// Unit: pixels
/// Recommended range: 1-2 (must stay imperceptible)
pub const NUDGE_OFFSET_PX: i32 = 1;

// ============================================================================
// WINDOW
// ============================================================================

/// Initial window inner width.
/// Unit: logical pixels
pub const WINDOW_WIDTH: f32 = 300.0;

/// Initial window inner height.
/// Unit: logical pixels
pub const WINDOW_HEIGHT: f32 = 230.0;

/// Repaint request ceiling while the countdown is visible.
/// Unit: milliseconds
/// Recommended range: 100-500 (must be < COUNTDOWN_TICK_MS)
pub const REPAINT_INTERVAL_MS: u64 = 200;
