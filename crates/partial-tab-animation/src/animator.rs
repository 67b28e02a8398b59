//! Geometry animator: the single driver of an animated window edge.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use partial_tab_runtime::{FrameCallbackRegistration, FrameClock};

use crate::spec::AnimationSpec;

/// How a [`GeometryAnimator`] reaches its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatorMode {
    /// Ticks over frames following the given [`AnimationSpec`].
    Tween(AnimationSpec),
    /// Ticks the target once and finishes synchronously. Used for
    /// programmatic changes that must not animate.
    Immediate,
}

impl Default for AnimatorMode {
    fn default() -> Self {
        AnimatorMode::Tween(AnimationSpec::default())
    }
}

type TickFn = Box<dyn FnMut(i32) + 'static>;
type FinishFn = Box<dyn FnOnce() + 'static>;

struct ActiveRun {
    generation: u64,
    from: i32,
    to: i32,
    spec: AnimationSpec,
    start_time_nanos: Option<u64>,
    last_value: Option<i32>,
    on_tick: Option<TickFn>,
    on_finished: Option<FinishFn>,
    registration: Option<FrameCallbackRegistration>,
}

struct AnimatorInner {
    clock: FrameClock,
    mode: AnimatorMode,
    generation: u64,
    run: Option<ActiveRun>,
}

/// Drives one integer value from A to B.
///
/// Ticks are strictly monotonic toward the target, the last tick is the
/// target itself, and `on_finished` runs exactly once after it. Starting a
/// new animation cancels the running one without finishing it.
#[derive(Clone)]
pub struct GeometryAnimator {
    inner: Rc<RefCell<AnimatorInner>>,
}

impl GeometryAnimator {
    pub fn new(clock: FrameClock, mode: AnimatorMode) -> Self {
        Self {
            inner: Rc::new(RefCell::new(AnimatorInner {
                clock,
                mode,
                generation: 0,
                run: None,
            })),
        }
    }

    pub fn mode(&self) -> AnimatorMode {
        self.inner.borrow().mode
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().run.is_some()
    }

    /// Target of the running animation, if any.
    pub fn target(&self) -> Option<i32> {
        self.inner.borrow().run.as_ref().map(|run| run.to)
    }

    /// Starts with the animator's configured mode.
    pub fn start(
        &self,
        from: i32,
        to: i32,
        on_tick: impl FnMut(i32) + 'static,
        on_finished: impl FnOnce() + 'static,
    ) {
        let mode = self.mode();
        self.start_with(mode, from, to, on_tick, on_finished);
    }

    pub fn start_with(
        &self,
        mode: AnimatorMode,
        from: i32,
        to: i32,
        mut on_tick: impl FnMut(i32) + 'static,
        on_finished: impl FnOnce() + 'static,
    ) {
        self.cancel();
        match mode {
            AnimatorMode::Immediate => {
                log::trace!("immediate animation {} -> {}", from, to);
                on_tick(to);
                on_finished();
            }
            AnimatorMode::Tween(spec) => {
                log::trace!(
                    "tween {} -> {} over {}ms",
                    from,
                    to,
                    spec.duration_millis
                );
                {
                    let mut inner = self.inner.borrow_mut();
                    inner.generation += 1;
                    let generation = inner.generation;
                    inner.run = Some(ActiveRun {
                        generation,
                        from,
                        to,
                        spec,
                        start_time_nanos: None,
                        last_value: if from == to { None } else { Some(from) },
                        on_tick: Some(Box::new(on_tick)),
                        on_finished: Some(Box::new(on_finished)),
                        registration: None,
                    });
                }
                Self::schedule_frame(&self.inner);
            }
        }
    }

    /// Stops ticking. `on_finished` of the cancelled run is dropped uncalled.
    pub fn cancel(&self) {
        let cancelled = {
            let mut inner = self.inner.borrow_mut();
            inner.generation += 1;
            inner.run.take()
        };
        if let Some(mut run) = cancelled {
            log::trace!("cancelled animation toward {}", run.to);
            if let Some(registration) = run.registration.take() {
                registration.cancel();
            }
        }
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatorInner>>) {
        let clock = {
            let inner = this.borrow();
            match inner.run.as_ref() {
                Some(run) if run.registration.is_none() => inner.clock.clone(),
                _ => return,
            }
        };
        let weak: Weak<RefCell<AnimatorInner>> = Rc::downgrade(this);
        let registration = clock.next_frame(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        if let Some(run) = this.borrow_mut().run.as_mut() {
            run.registration = Some(registration);
        }
    }

    fn on_frame(this: &Rc<RefCell<AnimatorInner>>, frame_time_nanos: u64) {
        let (generation, tick, finished, mut on_tick) = {
            let mut inner = this.borrow_mut();
            let Some(run) = inner.run.as_mut() else {
                return;
            };
            run.registration = None;
            let start = *run.start_time_nanos.get_or_insert(frame_time_nanos);
            let elapsed = frame_time_nanos.saturating_sub(start);
            let value = run.spec.value_at(run.from, run.to, elapsed);
            let finished = value == run.to && elapsed >= run.spec.duration_nanos();
            let tick = if run.last_value == Some(value) {
                None
            } else {
                run.last_value = Some(value);
                Some(value)
            };
            (run.generation, tick, finished, run.on_tick.take())
        };

        if let (Some(value), Some(callback)) = (tick, on_tick.as_mut()) {
            callback(value);
        }

        // The tick may have cancelled or restarted the animator.
        let on_finished = {
            let mut inner = this.borrow_mut();
            let current = inner
                .run
                .as_ref()
                .is_some_and(|run| run.generation == generation);
            if !current {
                return;
            }
            if finished {
                inner.run.take().and_then(|mut run| run.on_finished.take())
            } else {
                if let Some(run) = inner.run.as_mut() {
                    run.on_tick = on_tick;
                }
                None
            }
        };

        match on_finished {
            Some(callback) => callback(),
            None => Self::schedule_frame(this),
        }
    }
}

#[cfg(test)]
#[path = "tests/animator_tests.rs"]
mod tests;
