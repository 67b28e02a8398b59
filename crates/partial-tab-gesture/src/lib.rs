//! Gesture interpretation for the partial tab sheet.
//!
//! Two consumers compete for touches: the sheet window and the content it
//! hosts. [`GestureClassifier`] arbitrates touches that land on content,
//! [`HandleInterpreter`] turns touches on the drag handle into drag and
//! fling notifications.

mod classifier;
pub mod constants;
mod fling;
mod handle;
mod pointer;
mod velocity_tracker;

pub use classifier::{ContentInput, ContentInputSink, GestureClassifier, GestureState};
pub use fling::{fling_distance, FlingDirection, FlingResult};
pub use handle::{HandleConfig, HandleDragTarget, HandleInterpreter};
pub use pointer::{PointerAction, PointerEvent};
pub use velocity_tracker::VelocityTracker;

pub mod prelude {
    pub use crate::classifier::{ContentInput, ContentInputSink, GestureClassifier, GestureState};
    pub use crate::handle::{HandleDragTarget, HandleInterpreter};
    pub use crate::pointer::{PointerAction, PointerEvent};
}
