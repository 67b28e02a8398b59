//! Outbound resize and layout notifications.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::host::SheetObserver;

/// Layout states reported to the host. The numeric codes are part of the
/// host contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutState {
    BottomSheet,
    BottomSheetMaximized,
    SideSheet,
    SideSheetMaximized,
    FullScreen,
}

impl LayoutState {
    pub fn code(&self) -> i32 {
        match self {
            LayoutState::BottomSheet => 1,
            LayoutState::BottomSheetMaximized => 2,
            LayoutState::SideSheet => 3,
            LayoutState::SideSheetMaximized => 4,
            LayoutState::FullScreen => 5,
        }
    }
}

impl fmt::Display for LayoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayoutState::BottomSheet => "bottom-sheet",
            LayoutState::BottomSheetMaximized => "bottom-sheet-maximized",
            LayoutState::SideSheet => "side-sheet",
            LayoutState::SideSheetMaximized => "side-sheet-maximized",
            LayoutState::FullScreen => "full-screen",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResizeEvent {
    pub height: i32,
    pub width: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayoutEvent {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub layout_state: LayoutState,
}

impl LayoutEvent {
    pub fn resize(&self) -> ResizeEvent {
        ResizeEvent {
            height: self.bottom - self.top,
            width: self.right - self.left,
        }
    }
}

/// Forwards settled layouts to the observer, dropping repeats.
///
/// Shared by every strategy of a sheet so a hot-swap that lands on the same
/// size stays silent.
pub struct ResizeReporter {
    observer: Rc<dyn SheetObserver>,
    last_layout: Cell<Option<LayoutEvent>>,
    last_resize: Cell<Option<ResizeEvent>>,
}

impl ResizeReporter {
    pub fn new(observer: Rc<dyn SheetObserver>) -> Self {
        Self {
            observer,
            last_layout: Cell::new(None),
            last_resize: Cell::new(None),
        }
    }

    pub fn last_layout(&self) -> Option<LayoutEvent> {
        self.last_layout.get()
    }

    pub fn last_resize(&self) -> Option<ResizeEvent> {
        self.last_resize.get()
    }

    /// Emits the layout, then the resize if the size changed. Returns whether
    /// anything was emitted.
    pub fn report(&self, layout: LayoutEvent) -> bool {
        if self.last_layout.get() == Some(layout) {
            return false;
        }
        let inverted = layout.right < layout.left || layout.bottom < layout.top;
        debug_assert!(!inverted, "inverted layout {:?}", layout);
        if inverted {
            log::error!("inverted layout {:?}", layout);
        }
        self.last_layout.set(Some(layout));
        log::debug!(
            "layout ({}, {}, {}, {}) {}",
            layout.left,
            layout.top,
            layout.right,
            layout.bottom,
            layout.layout_state
        );
        self.observer.on_activity_layout(
            layout.left,
            layout.top,
            layout.right,
            layout.bottom,
            layout.layout_state,
        );

        let resize = layout.resize();
        if self.last_resize.get() != Some(resize) {
            self.last_resize.set(Some(resize));
            self.observer.on_resized(resize.height, resize.width);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Log(RefCell<Vec<String>>);

    impl SheetObserver for Log {
        fn on_resized(&self, height: i32, width: i32) {
            self.0.borrow_mut().push(format!("resize {}x{}", width, height));
        }

        fn on_activity_layout(&self, l: i32, t: i32, r: i32, b: i32, state: LayoutState) {
            self.0
                .borrow_mut()
                .push(format!("layout {} {} {} {} {}", l, t, r, b, state.code()));
        }
    }

    fn layout(top: i32, state: LayoutState) -> LayoutEvent {
        LayoutEvent {
            left: 0,
            top,
            right: 1080,
            bottom: 2000,
            layout_state: state,
        }
    }

    #[test]
    fn layout_precedes_resize_and_repeats_are_dropped() {
        let log = Rc::new(Log::default());
        let reporter = ResizeReporter::new(log.clone());

        assert!(reporter.report(layout(1000, LayoutState::BottomSheet)));
        assert!(!reporter.report(layout(1000, LayoutState::BottomSheet)));

        assert_eq!(
            *log.0.borrow(),
            vec!["layout 0 1000 1080 2000 1", "resize 1080x1000"]
        );
    }

    #[test]
    fn state_change_without_size_change_reports_layout_only() {
        let log = Rc::new(Log::default());
        let reporter = ResizeReporter::new(log.clone());

        reporter.report(layout(0, LayoutState::BottomSheetMaximized));
        reporter.report(layout(0, LayoutState::FullScreen));

        let entries = log.0.borrow();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2], "layout 0 0 1080 2000 5");
    }

    #[test]
    fn codes_are_stable() {
        let codes: Vec<i32> = [
            LayoutState::BottomSheet,
            LayoutState::BottomSheetMaximized,
            LayoutState::SideSheet,
            LayoutState::SideSheetMaximized,
            LayoutState::FullScreen,
        ]
        .iter()
        .map(LayoutState::code)
        .collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5]);
    }
}
