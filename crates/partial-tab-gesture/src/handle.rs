//! Drag handle touch interpretation.

use partial_tab_animation::DEFAULT_DURATION_MILLIS;
use partial_tab_graphics::Point;

use crate::constants::{
    FLING_VELOCITY_THRESHOLD, MAX_FLING_VELOCITY, TAP_TIMEOUT_MS, TOUCH_SLOP,
};
use crate::fling::FlingResult;
use crate::pointer::{PointerAction, PointerEvent};
use crate::velocity_tracker::VelocityTracker;

/// Receiver of the drag notifications produced by [`HandleInterpreter`].
///
/// Implemented by the active size strategy.
pub trait HandleDragTarget {
    /// While true, every handle event is swallowed.
    fn is_animating(&self) -> bool;

    fn on_drag_start(&self, y: f32);

    fn on_drag_move(&self, y: f32);

    /// `fling_distance` is signed: negative projects the window upward.
    /// Returns false when the drag ended in a close.
    fn on_drag_end(&self, fling_distance: f32) -> bool;

    fn on_handle_tap(&self) {}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandleConfig {
    pub fling_threshold: f32,
    pub max_fling_velocity: f32,
    pub animation_duration_millis: u64,
    pub touch_slop: f32,
    pub tap_timeout_ms: i64,
}

impl Default for HandleConfig {
    fn default() -> Self {
        Self {
            fling_threshold: FLING_VELOCITY_THRESHOLD,
            max_fling_velocity: MAX_FLING_VELOCITY,
            animation_duration_millis: DEFAULT_DURATION_MILLIS,
            touch_slop: TOUCH_SLOP,
            tap_timeout_ms: TAP_TIMEOUT_MS,
        }
    }
}

struct DragSession {
    origin: Point,
    start_time_ms: i64,
    max_travel: f32,
}

pub struct HandleInterpreter {
    config: HandleConfig,
    velocity: VelocityTracker,
    session: Option<DragSession>,
    close_handler: Option<Box<dyn FnMut()>>,
}

impl Default for HandleInterpreter {
    fn default() -> Self {
        Self::new(HandleConfig::default())
    }
}

impl HandleInterpreter {
    pub fn new(config: HandleConfig) -> Self {
        Self {
            config,
            velocity: VelocityTracker::new(),
            session: None,
            close_handler: None,
        }
    }

    pub fn config(&self) -> &HandleConfig {
        &self.config
    }

    /// Runs when a drag end is answered with `false`.
    pub fn set_close_handler(&mut self, handler: impl FnMut() + 'static) {
        self.close_handler = Some(Box::new(handler));
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Returns whether the event was consumed.
    pub fn on_touch(&mut self, event: &PointerEvent, target: &dyn HandleDragTarget) -> bool {
        if target.is_animating() {
            log::trace!("handle event {:?} swallowed during transition", event.action);
            return true;
        }

        match event.action {
            PointerAction::Down => {
                self.begin(event, target);
                true
            }
            PointerAction::Move => {
                match self.session.as_mut() {
                    Some(session) => {
                        let travel = session.origin.distance_to(event.position);
                        session.max_travel = session.max_travel.max(travel);
                    }
                    None => {
                        // Down was swallowed by a transition; start here.
                        self.begin(event, target);
                        return true;
                    }
                }
                self.velocity.add_sample(event.time_ms, event.y());
                target.on_drag_move(event.y());
                true
            }
            PointerAction::Up | PointerAction::Cancel => self.finish(event, target),
        }
    }

    fn begin(&mut self, event: &PointerEvent, target: &dyn HandleDragTarget) {
        self.velocity.clear();
        self.velocity.add_sample(event.time_ms, event.y());
        self.session = Some(DragSession {
            origin: event.position,
            start_time_ms: event.time_ms,
            max_travel: 0.0,
        });
        target.on_drag_start(event.y());
    }

    fn finish(&mut self, event: &PointerEvent, target: &dyn HandleDragTarget) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        let is_up = event.action == PointerAction::Up;
        if is_up {
            self.velocity.add_sample(event.time_ms, event.y());
        }
        let velocity = self.velocity.velocity_clamped(self.config.max_fling_velocity);
        self.velocity.clear();

        let fling = FlingResult::from_velocity(
            velocity,
            self.config.fling_threshold,
            self.config.animation_duration_millis,
        );
        log::debug!(
            "handle released: velocity {:.0}px/s fling {:?}",
            velocity,
            fling
        );

        if !target.on_drag_end(fling.signed_distance()) {
            if let Some(handler) = self.close_handler.as_mut() {
                handler();
            }
            return true;
        }

        let travel = session.max_travel.max(session.origin.distance_to(event.position));
        let elapsed = event.time_ms - session.start_time_ms;
        if is_up && travel < self.config.touch_slop && elapsed < self.config.tap_timeout_ms {
            target.on_handle_tap();
        }
        true
    }
}

#[cfg(test)]
#[path = "tests/handle_tests.rs"]
mod tests;
