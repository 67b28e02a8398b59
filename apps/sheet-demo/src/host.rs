//! Stand-in window host that logs instead of moving a real window.

use std::cell::Cell;

use partial_tab_gesture::{ContentInput, ContentInputSink};
use partial_tab_graphics::{DisplayMetrics, WindowGeometry};
use partial_tab_sheet::{LayoutState, SheetObserver, WindowHost};

pub struct LoggingHost {
    metrics: Cell<DisplayMetrics>,
    finished: Cell<bool>,
    frames: Cell<u32>,
}

impl LoggingHost {
    pub fn new(metrics: DisplayMetrics) -> Self {
        Self {
            metrics: Cell::new(metrics),
            finished: Cell::new(false),
            frames: Cell::new(0),
        }
    }

    pub fn set_metrics(&self, metrics: DisplayMetrics) {
        self.metrics.set(metrics);
    }

    pub fn is_finished(&self) -> bool {
        self.finished.get()
    }

    /// Number of geometry updates since the last call.
    pub fn take_frames(&self) -> u32 {
        self.frames.replace(0)
    }
}

impl WindowHost for LoggingHost {
    fn display_metrics(&self) -> Option<DisplayMetrics> {
        Some(self.metrics.get())
    }

    fn is_attached(&self) -> bool {
        !self.finished.get()
    }

    fn apply_geometry(&self, geometry: &WindowGeometry) {
        self.frames.set(self.frames.get() + 1);
        log::trace!("window -> {:?}", geometry);
    }

    fn finish_activity(&self) {
        log::info!("activity finished");
        self.finished.set(true);
    }
}

pub struct LoggingObserver;

impl SheetObserver for LoggingObserver {
    fn on_resized(&self, height: i32, width: i32) {
        log::info!("resized to {}x{}", width, height);
    }

    fn on_activity_layout(&self, left: i32, top: i32, right: i32, bottom: i32, state: LayoutState) {
        log::info!("layout ({}, {}, {}, {}) {}", left, top, right, bottom, state);
    }
}

pub struct LoggingContent;

impl ContentInputSink for LoggingContent {
    fn is_scrolled_to_top(&self) -> bool {
        true
    }

    fn deliver(&self, input: ContentInput) {
        log::debug!("content received {:?}", input);
    }
}
