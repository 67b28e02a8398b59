use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;

#[derive(Default)]
struct Sink {
    at_top: Cell<bool>,
    delivered: RefCell<Vec<ContentInput>>,
}

impl ContentInputSink for Sink {
    fn is_scrolled_to_top(&self) -> bool {
        self.at_top.get()
    }

    fn deliver(&self, input: ContentInput) {
        self.delivered.borrow_mut().push(input);
    }
}

fn classifier() -> (GestureClassifier, Rc<Sink>) {
    let sink = Rc::new(Sink::default());
    (GestureClassifier::new(sink.clone()), sink)
}

#[test]
fn down_resets_to_none() {
    let (mut classifier, _sink) = classifier();
    classifier.classify(&PointerEvent::down(100.0, 500.0, 0), false, true);
    classifier.classify(&PointerEvent::moved(100.0, 450.0, 16), false, true);
    assert_eq!(classifier.state(), GestureState::DragTab);

    let state = classifier.classify(&PointerEvent::down(100.0, 500.0, 100), false, true);
    assert_eq!(state, GestureState::None);
}

#[test]
fn upward_drag_at_initial_height_drags_the_window() {
    let (mut classifier, sink) = classifier();
    classifier.classify(&PointerEvent::down(100.0, 500.0, 0), false, true);
    let state = classifier.classify(&PointerEvent::moved(100.0, 480.0, 16), false, true);
    assert_eq!(state, GestureState::DragTab);
    assert!(GestureClassifier::window_receives(state));
    assert!(sink.delivered.borrow().is_empty());
}

#[test]
fn downward_drag_at_initial_height_scrolls_content_without_synthetic_down() {
    let (mut classifier, sink) = classifier();
    classifier.classify(&PointerEvent::down(100.0, 500.0, 0), false, true);
    let state = classifier.classify(&PointerEvent::moved(100.0, 520.0, 16), false, true);
    assert_eq!(state, GestureState::ScrollContent);
    assert!(!GestureClassifier::window_receives(state));
    assert!(sink.delivered.borrow().is_empty());
}

#[test]
fn upward_drag_when_expanded_hands_over_to_content() {
    let (mut classifier, sink) = classifier();
    classifier.classify(&PointerEvent::down(100.0, 500.0, 0), true, true);
    let state = classifier.classify(&PointerEvent::moved(102.0, 470.0, 16), true, true);
    assert_eq!(state, GestureState::ScrollContent);

    let delivered = sink.delivered.borrow();
    assert_eq!(delivered.len(), 1);
    let ContentInput::SyntheticDown(event) = delivered[0];
    assert_eq!(event.action, PointerAction::Down);
    assert_eq!(event.position, Point::new(102.0, 470.0));
    assert_eq!(event.time_ms, 16);
}

#[test]
fn downward_drag_when_expanded_and_content_scrolled_goes_to_content() {
    let (mut classifier, sink) = classifier();
    classifier.classify(&PointerEvent::down(100.0, 500.0, 0), true, false);
    let state = classifier.classify(&PointerEvent::moved(100.0, 540.0, 16), true, false);
    assert_eq!(state, GestureState::ScrollContent);
    assert_eq!(sink.delivered.borrow().len(), 1);
}

#[test]
fn downward_drag_when_expanded_and_content_at_top_drags_the_window() {
    let (mut classifier, sink) = classifier();
    classifier.classify(&PointerEvent::down(100.0, 500.0, 0), true, true);
    let state = classifier.classify(&PointerEvent::moved(100.0, 540.0, 16), true, true);
    assert_eq!(state, GestureState::DragTab);
    assert!(sink.delivered.borrow().is_empty());
}

#[test]
fn shallow_moves_are_rejected_until_dragging() {
    let (mut classifier, _sink) = classifier();
    classifier.classify(&PointerEvent::down(100.0, 500.0, 0), false, true);
    // slope 0.5
    let state = classifier.classify(&PointerEvent::moved(140.0, 480.0, 16), false, true);
    assert_eq!(state, GestureState::None);

    let state = classifier.classify(&PointerEvent::moved(140.0, 460.0, 32), false, true);
    assert_eq!(state, GestureState::DragTab);

    // Once dragging, a shallow move keeps the window in charge.
    let state = classifier.classify(&PointerEvent::moved(200.0, 455.0, 48), false, true);
    assert_eq!(state, GestureState::DragTab);
}

#[test]
fn content_scroll_back_to_top_returns_the_sequence_to_none() {
    let (mut classifier, _sink) = classifier();
    classifier.classify(&PointerEvent::down(100.0, 500.0, 0), true, false);
    classifier.classify(&PointerEvent::moved(100.0, 520.0, 16), true, false);
    assert_eq!(classifier.state(), GestureState::ScrollContent);

    // Still scrolled: stays with content.
    let state = classifier.classify(&PointerEvent::moved(100.0, 540.0, 32), true, false);
    assert_eq!(state, GestureState::ScrollContent);

    let state = classifier.classify(&PointerEvent::moved(100.0, 560.0, 48), true, true);
    assert_eq!(state, GestureState::None);

    let state = classifier.classify(&PointerEvent::moved(100.0, 580.0, 64), true, true);
    assert_eq!(state, GestureState::DragTab);
}

#[test]
fn release_reports_velocity_only_for_window_drags() {
    let (mut classifier, _sink) = classifier();
    classifier.classify(&PointerEvent::down(100.0, 500.0, 0), false, true);
    classifier.classify(&PointerEvent::moved(100.0, 480.0, 10), false, true);
    classifier.classify(&PointerEvent::moved(100.0, 460.0, 20), false, true);
    let velocity = classifier.release(&PointerEvent::up(100.0, 440.0, 30));
    let velocity = velocity.expect("window drag yields a velocity");
    assert!(velocity < 0.0, "upward drag, got {}", velocity);
    assert_eq!(classifier.state(), GestureState::None);

    classifier.classify(&PointerEvent::down(100.0, 500.0, 100), false, true);
    classifier.classify(&PointerEvent::moved(100.0, 540.0, 110), false, true);
    assert_eq!(classifier.release(&PointerEvent::up(100.0, 560.0, 120)), None);
}

#[test]
fn up_without_release_keeps_the_owner() {
    let (mut classifier, _sink) = classifier();
    classifier.classify(&PointerEvent::down(100.0, 500.0, 0), false, true);
    classifier.classify(&PointerEvent::moved(100.0, 470.0, 16), false, true);
    let state = classifier.classify(&PointerEvent::up(100.0, 470.0, 32), false, true);
    assert_eq!(state, GestureState::DragTab);
}

#[test]
fn content_owned_sequences_never_switch_straight_to_the_window() {
    let scripts: [(&[f32], bool, &[bool]); 3] = [
        (&[500.0, 520.0, 480.0, 470.0, 520.0], false, &[true, true, false, true, true]),
        (&[500.0, 460.0, 500.0, 540.0, 520.0, 560.0], true, &[false, false, true, true, false, true]),
        (&[500.0, 510.0, 505.0, 530.0, 490.0], true, &[false, true, false, true, true]),
    ];

    for (ys, expanded, at_top) in scripts {
        let (mut classifier, _sink) = classifier();
        let mut previous = classifier.classify(&PointerEvent::down(100.0, ys[0], 0), expanded, at_top[0]);
        for (index, y) in ys.iter().enumerate().skip(1) {
            let event = PointerEvent::moved(100.0, *y, index as i64 * 16);
            let next = classifier.classify(&event, expanded, at_top[index]);
            assert!(
                !(previous == GestureState::ScrollContent && next == GestureState::DragTab),
                "content-owned sequence jumped to the window at step {}",
                index
            );
            previous = next;
        }
    }
}
