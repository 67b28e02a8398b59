//! Recording fakes for the host capabilities.

use std::cell::{Cell, RefCell};

use partial_tab_gesture::{ContentInput, ContentInputSink};
use partial_tab_graphics::{DisplayMetrics, WindowGeometry};
use partial_tab_sheet::{LayoutEvent, LayoutState, ResizeEvent, SheetObserver, WindowHost};

/// Window host that records every geometry it is asked to apply.
pub struct FakeWindowHost {
    metrics: Cell<Option<DisplayMetrics>>,
    attached: Cell<bool>,
    applied: RefCell<Vec<WindowGeometry>>,
    finished: Cell<usize>,
}

impl FakeWindowHost {
    pub fn new(metrics: DisplayMetrics) -> Self {
        Self {
            metrics: Cell::new(Some(metrics)),
            attached: Cell::new(true),
            applied: RefCell::new(Vec::new()),
            finished: Cell::new(0),
        }
    }

    /// A host whose window is not attached yet and has no metrics.
    pub fn detached() -> Self {
        Self {
            metrics: Cell::new(None),
            attached: Cell::new(false),
            applied: RefCell::new(Vec::new()),
            finished: Cell::new(0),
        }
    }

    pub fn set_metrics(&self, metrics: Option<DisplayMetrics>) {
        self.metrics.set(metrics);
    }

    pub fn set_attached(&self, attached: bool) {
        self.attached.set(attached);
    }

    pub fn applied(&self) -> Vec<WindowGeometry> {
        self.applied.borrow().clone()
    }

    pub fn apply_count(&self) -> usize {
        self.applied.borrow().len()
    }

    pub fn last_geometry(&self) -> Option<WindowGeometry> {
        self.applied.borrow().last().copied()
    }

    pub fn clear_applied(&self) {
        self.applied.borrow_mut().clear();
    }

    pub fn finish_count(&self) -> usize {
        self.finished.get()
    }
}

impl WindowHost for FakeWindowHost {
    fn display_metrics(&self) -> Option<DisplayMetrics> {
        self.metrics.get()
    }

    fn is_attached(&self) -> bool {
        self.attached.get()
    }

    fn apply_geometry(&self, geometry: &WindowGeometry) {
        self.applied.borrow_mut().push(*geometry);
    }

    fn finish_activity(&self) {
        self.finished.set(self.finished.get() + 1);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObservedEvent {
    Layout(LayoutEvent),
    Resized(ResizeEvent),
}

/// Observer that keeps every notification in order.
#[derive(Default)]
pub struct RecordingObserver {
    events: RefCell<Vec<ObservedEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events.borrow().clone()
    }

    pub fn layouts(&self) -> Vec<LayoutEvent> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                ObservedEvent::Layout(layout) => Some(*layout),
                ObservedEvent::Resized(_) => None,
            })
            .collect()
    }

    pub fn resizes(&self) -> Vec<ResizeEvent> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                ObservedEvent::Resized(resize) => Some(*resize),
                ObservedEvent::Layout(_) => None,
            })
            .collect()
    }

    pub fn last_layout(&self) -> Option<LayoutEvent> {
        self.layouts().last().copied()
    }

    pub fn last_resize(&self) -> Option<ResizeEvent> {
        self.resizes().last().copied()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl SheetObserver for RecordingObserver {
    fn on_resized(&self, height: i32, width: i32) {
        self.events
            .borrow_mut()
            .push(ObservedEvent::Resized(ResizeEvent { height, width }));
    }

    fn on_activity_layout(&self, left: i32, top: i32, right: i32, bottom: i32, state: LayoutState) {
        self.events.borrow_mut().push(ObservedEvent::Layout(LayoutEvent {
            left,
            top,
            right,
            bottom,
            layout_state: state,
        }));
    }
}

/// Content view stand-in with a settable scroll position.
pub struct RecordingContentSink {
    at_top: Cell<bool>,
    delivered: RefCell<Vec<ContentInput>>,
}

impl Default for RecordingContentSink {
    fn default() -> Self {
        Self {
            at_top: Cell::new(true),
            delivered: RefCell::new(Vec::new()),
        }
    }
}

impl RecordingContentSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_scrolled_to_top(&self, at_top: bool) {
        self.at_top.set(at_top);
    }

    pub fn delivered(&self) -> Vec<ContentInput> {
        self.delivered.borrow().clone()
    }
}

impl ContentInputSink for RecordingContentSink {
    fn is_scrolled_to_top(&self) -> bool {
        self.at_top.get()
    }

    fn deliver(&self, input: ContentInput) {
        self.delivered.borrow_mut().push(input);
    }
}
