//! Partial tab sheet: a resizable overlay window driven by touch.
//!
//! The active [`SizeStrategy`] owns the window rectangle. The
//! [`StrategySelector`] decides which strategy is live for the current
//! device configuration and hot-swaps it when that changes.
//! [`PartialTabSheet`] wires host input to both.

pub mod config;
mod controller;
mod diagnostics;
mod error;
mod events;
mod host;
mod selector;
pub mod strategy;

pub use config::{
    Decoration, LaunchParams, RoundedCorners, SheetConfig, SidePosition, SlideInBehavior,
};
pub use controller::PartialTabSheet;
pub use diagnostics::SheetEnvironment;
pub use error::SheetError;
pub use events::{LayoutEvent, LayoutState, ResizeEvent, ResizeReporter};
pub use host::{ConfigurationSignal, SheetObserver, WindowHost};
pub use selector::{select_type, StrategySelector};
pub use strategy::{HeightStatus, SheetStrategy, SizeStrategy, StrategyType};

pub mod prelude {
    pub use crate::config::{LaunchParams, SheetConfig};
    pub use crate::controller::PartialTabSheet;
    pub use crate::events::LayoutState;
    pub use crate::host::{ConfigurationSignal, SheetObserver, WindowHost};
    pub use crate::strategy::{HeightStatus, SheetStrategy, StrategyType};
}
