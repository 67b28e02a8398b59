//! Capabilities the embedding host provides to the sheet.

use partial_tab_graphics::{DisplayMetrics, Orientation, WindowGeometry};

use crate::events::LayoutState;

/// The platform window the sheet lives in.
pub trait WindowHost {
    /// None until the platform can answer metric queries.
    fn display_metrics(&self) -> Option<DisplayMetrics>;

    fn is_attached(&self) -> bool;

    fn apply_geometry(&self, geometry: &WindowGeometry);

    /// Tears the sheet down once its close animation has landed.
    fn finish_activity(&self);
}

/// Outbound notifications for the app that opened the sheet.
pub trait SheetObserver {
    fn on_resized(&self, height: i32, width: i32);

    fn on_activity_layout(&self, left: i32, top: i32, right: i32, bottom: i32, state: LayoutState);
}

/// Device configuration as seen after a rotation, resize or window mode change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfigurationSignal {
    pub orientation: Orientation,
    pub is_multi_window: bool,
    pub display_width: i32,
    pub display_height: i32,
}

impl ConfigurationSignal {
    pub fn new(display_width: i32, display_height: i32) -> Self {
        Self {
            orientation: Orientation::from_size(display_width, display_height),
            is_multi_window: false,
            display_width,
            display_height,
        }
    }

    pub fn from_metrics(metrics: &DisplayMetrics) -> Self {
        Self::new(metrics.width, metrics.height)
    }

    pub fn with_multi_window(mut self, multi_window: bool) -> Self {
        self.is_multi_window = multi_window;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }
}
