//! Animation system for the partial tab sheet engine
//!
//! Provides eased, frame-driven interpolation of integer geometry values and
//! a degenerate immediate mode for programmatic changes.

mod animator;
mod easing;
mod spec;

pub use animator::{AnimatorMode, GeometryAnimator};
pub use easing::Easing;
pub use spec::{AnimationSpec, DEFAULT_DURATION_MILLIS};
