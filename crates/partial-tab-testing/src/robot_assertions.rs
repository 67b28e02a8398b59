//! Assertion helpers for sheet robot tests.

use partial_tab_graphics::WindowGeometry;
use partial_tab_sheet::{LayoutEvent, LayoutState, ResizeEvent};

use crate::fakes::{ObservedEvent, RecordingObserver};

/// Every layout notification must be followed by the resize of the same
/// change, or by another layout when the size did not change.
pub fn assert_layout_precedes_resize(events: &[ObservedEvent], msg: &str) {
    let mut last_layout: Option<LayoutEvent> = None;
    for (index, event) in events.iter().enumerate() {
        match event {
            ObservedEvent::Layout(layout) => last_layout = Some(*layout),
            ObservedEvent::Resized(resize) => {
                let layout = last_layout.unwrap_or_else(|| {
                    panic!("{}: resize {:?} at {} without a layout", msg, resize, index)
                });
                assert_eq!(
                    layout.resize(),
                    *resize,
                    "{}: resize at {} does not match the preceding layout",
                    msg,
                    index
                );
            }
        }
    }
}

/// No two consecutive resize notifications carry the same size.
pub fn assert_no_duplicate_resizes(resizes: &[ResizeEvent], msg: &str) {
    for pair in resizes.windows(2) {
        assert_ne!(pair[0], pair[1], "{}: duplicate resize {:?}", msg, pair[1]);
    }
}

pub fn assert_last_layout(observer: &RecordingObserver, expected: LayoutState, msg: &str) {
    let layout = observer
        .last_layout()
        .unwrap_or_else(|| panic!("{}: no layout reported", msg));
    assert_eq!(layout.layout_state, expected, "{}: layout state", msg);
}

/// Successive values on one axis only ever move toward the target.
pub fn assert_monotonic(values: &[i32], msg: &str) {
    let increasing = values.windows(2).all(|pair| pair[0] < pair[1]);
    let decreasing = values.windows(2).all(|pair| pair[0] > pair[1]);
    assert!(
        increasing || decreasing,
        "{}: values are not strictly monotonic: {:?}",
        msg,
        values
    );
}

pub fn tops(geometries: &[WindowGeometry]) -> Vec<i32> {
    geometries.iter().map(|geometry| geometry.y).collect()
}

pub fn widths(geometries: &[WindowGeometry]) -> Vec<i32> {
    geometries.iter().map(|geometry| geometry.width).collect()
}
