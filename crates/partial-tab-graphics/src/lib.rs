//! Pure geometry data for the partial tab sheet engine
//!
//! This crate contains the window rectangle, display metrics, and unit
//! types shared by the gesture, animation and strategy crates.

mod display;
mod geometry;
mod unit;

pub use display::*;
pub use geometry::*;
pub use unit::*;

pub mod prelude {
    pub use crate::display::{DisplayMetrics, Orientation};
    pub use crate::geometry::{Point, WindowGeometry, MATCH_PARENT};
    pub use crate::unit::Dp;
}
