//! Arbitration of touches over the sheet's content.
//!
//! Each touch sequence belongs to at most one consumer: the window (dragging
//! the sheet) or the content (scrolling). A sequence that was handed to the
//! content only returns to undecided when the content is back at its top and
//! the finger moves down.

use std::rc::Rc;

use partial_tab_graphics::Point;

use crate::constants::{MAX_FLING_VELOCITY, MIN_VERTICAL_SLOPE};
use crate::pointer::{PointerAction, PointerEvent};
use crate::velocity_tracker::VelocityTracker;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureState {
    /// Nobody owns the sequence yet.
    #[default]
    None,
    DragTab,
    ScrollContent,
}

/// Messages sent to the hosted content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContentInput {
    /// The content should start tracking a gesture at this point, as if the
    /// finger had just touched down there.
    SyntheticDown(PointerEvent),
}

/// Capability of the content view hosted by the sheet.
pub trait ContentInputSink {
    fn is_scrolled_to_top(&self) -> bool;
    fn deliver(&self, input: ContentInput);
}

pub struct GestureClassifier {
    sink: Rc<dyn ContentInputSink>,
    state: GestureState,
    last_position: Option<Point>,
    velocity: VelocityTracker,
    min_slope: f32,
}

impl GestureClassifier {
    pub fn new(sink: Rc<dyn ContentInputSink>) -> Self {
        Self {
            sink,
            state: GestureState::None,
            last_position: None,
            velocity: VelocityTracker::new(),
            min_slope: MIN_VERTICAL_SLOPE,
        }
    }

    pub fn with_min_slope(mut self, min_slope: f32) -> Self {
        self.min_slope = min_slope;
        self
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn sink(&self) -> &Rc<dyn ContentInputSink> {
        &self.sink
    }

    /// The window handles the event unless the content owns the sequence.
    pub fn window_receives(state: GestureState) -> bool {
        state != GestureState::ScrollContent
    }

    /// Updates and returns the owner of the current sequence.
    ///
    /// Up and Cancel leave the state untouched; call [`release`](Self::release)
    /// to finish the sequence.
    pub fn classify(
        &mut self,
        event: &PointerEvent,
        is_fully_expanded: bool,
        content_scrolled_to_top: bool,
    ) -> GestureState {
        match event.action {
            PointerAction::Down => {
                self.state = GestureState::None;
                self.velocity.clear();
                self.last_position = Some(event.position);
            }
            PointerAction::Move => {
                self.classify_move(event, is_fully_expanded, content_scrolled_to_top);
            }
            PointerAction::Up | PointerAction::Cancel => {}
        }
        self.state
    }

    fn classify_move(
        &mut self,
        event: &PointerEvent,
        is_fully_expanded: bool,
        content_scrolled_to_top: bool,
    ) {
        let Some(previous) = self.last_position.replace(event.position) else {
            // Sequence started outside our view of the stream.
            return;
        };
        let (dx, dy) = previous.delta_to(event.position);
        if dx == 0.0 && dy == 0.0 {
            return;
        }

        let slope = if dx == 0.0 {
            f32::INFINITY
        } else {
            (dy / dx).abs()
        };
        if self.state != GestureState::DragTab && slope < self.min_slope {
            self.velocity.clear();
            return;
        }

        let moving_down = dy > 0.0;
        let next = match self.state {
            GestureState::ScrollContent => {
                if content_scrolled_to_top && moving_down {
                    GestureState::None
                } else {
                    GestureState::ScrollContent
                }
            }
            GestureState::None | GestureState::DragTab => {
                if is_fully_expanded && (!moving_down || !content_scrolled_to_top) {
                    self.sink.deliver(ContentInput::SyntheticDown(
                        event.with_action(PointerAction::Down),
                    ));
                    GestureState::ScrollContent
                } else if !is_fully_expanded && moving_down && self.state == GestureState::None {
                    GestureState::ScrollContent
                } else {
                    GestureState::DragTab
                }
            }
        };

        if next == GestureState::DragTab {
            self.velocity.add_sample(event.time_ms, event.y());
        } else {
            self.velocity.clear();
        }
        if next != self.state {
            log::trace!("gesture {:?} -> {:?}", self.state, next);
        }
        self.state = next;
    }

    /// Finishes the sequence. Returns the release velocity (px/s) when the
    /// window owned the drag.
    pub fn release(&mut self, event: &PointerEvent) -> Option<f32> {
        let velocity = if self.state == GestureState::DragTab {
            if event.action == PointerAction::Up {
                self.velocity.add_sample(event.time_ms, event.y());
            }
            Some(self.velocity.velocity_clamped(MAX_FLING_VELOCITY))
        } else {
            None
        };
        self.state = GestureState::None;
        self.last_position = None;
        self.velocity.clear();
        velocity
    }
}

#[cfg(test)]
#[path = "tests/classifier_tests.rs"]
mod tests;
