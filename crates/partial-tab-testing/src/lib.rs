//! Testing utilities and harness for the partial tab sheet
//!
//! Fakes stand in for the host window, the observer and the hosted content;
//! [`SheetRobot`] drives a real [`PartialTabSheet`](partial_tab_sheet::PartialTabSheet)
//! with scripted touches and a deterministic frame clock.

pub mod fakes;
pub mod robot;
pub mod robot_assertions;

pub use fakes::*;
pub use robot::*;

pub mod prelude {
    pub use crate::fakes::*;
    pub use crate::robot::*;
    pub use crate::robot_assertions;
}
