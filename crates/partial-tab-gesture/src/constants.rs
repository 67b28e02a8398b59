//! Shared gesture thresholds.
//!
//! Values are in physical pixels and milliseconds unless noted.

/// Movement below this distance keeps a handle touch a tap.
///
/// Matches the platform convention of roughly 8dp of touch slop.
pub const TOUCH_SLOP: f32 = 8.0;

/// A handle touch released later than this is never a tap.
pub const TAP_TIMEOUT_MS: i64 = 300;

/// Minimum `|dy| / |dx|` for a content move to count as vertical.
///
/// Shallower moves are horizontal or ambiguous and are left to the content.
pub const MIN_VERTICAL_SLOPE: f32 = 2.0;

/// Release velocity (px/s) below which a drag end is not a fling.
pub const FLING_VELOCITY_THRESHOLD: f32 = 100.0;

/// Cap applied to release velocities, in px/s.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;
