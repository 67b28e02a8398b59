use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use smallvec::SmallVec;

use crate::delayed::DelayedTaskRegistration;
use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;
use crate::{DelayedTaskId, FrameCallbackId, NANOS_PER_MILLI};

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct DelayedTaskEntry {
    id: DelayedTaskId,
    due_nanos: u64,
    task: Box<dyn FnOnce() + 'static>,
}

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    delayed_tasks: RefCell<Vec<DelayedTaskEntry>>,
    next_delayed_task_id: Cell<u64>,
    now_nanos: Cell<u64>,
    needs_frame: Cell<bool>,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            delayed_tasks: RefCell::new(Vec::new()),
            next_delayed_task_id: Cell::new(1),
            now_nanos: Cell::new(0),
            needs_frame: Cell::new(false),
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn has_delayed_tasks(&self) -> bool {
        !self.delayed_tasks.borrow().is_empty()
    }

    fn refresh_needs_frame(&self) {
        if !self.has_frame_callbacks() && !self.has_delayed_tasks() {
            self.needs_frame.set(false);
        }
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        drop(callbacks);
        self.refresh_needs_frame();
    }

    fn post_delayed(&self, delay_millis: u64, task: Box<dyn FnOnce() + 'static>) -> DelayedTaskId {
        let id = self.next_delayed_task_id.get();
        self.next_delayed_task_id.set(id + 1);
        let due_nanos = self
            .now_nanos
            .get()
            .saturating_add(delay_millis.saturating_mul(NANOS_PER_MILLI));
        self.delayed_tasks.borrow_mut().push(DelayedTaskEntry {
            id,
            due_nanos,
            task,
        });
        self.schedule();
        id
    }

    fn cancel_delayed(&self, id: DelayedTaskId) {
        self.delayed_tasks
            .borrow_mut()
            .retain(|entry| entry.id != id);
        self.refresh_needs_frame();
    }

    fn take_due_tasks(&self, now: u64) -> SmallVec<[DelayedTaskEntry; 4]> {
        let mut tasks = self.delayed_tasks.borrow_mut();
        let mut due: SmallVec<[DelayedTaskEntry; 4]> = SmallVec::new();
        let mut index = 0;
        while index < tasks.len() {
            if tasks[index].due_nanos <= now {
                due.push(tasks.remove(index));
            } else {
                index += 1;
            }
        }
        due.sort_by_key(|entry| (entry.due_nanos, entry.id));
        due
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let now = self.now_nanos.get().max(frame_time_nanos);
        self.now_nanos.set(now);

        // Delayed tasks run first so a re-attached strategy can register its
        // first animation frame in the same pass.
        for entry in self.take_due_tasks(now) {
            log::trace!("running delayed task {}", entry.id);
            (entry.task)();
        }

        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: SmallVec<[Box<dyn FnOnce(u64) + 'static>; 4]> =
            SmallVec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        for callback in pending {
            callback(now);
        }
        self.refresh_needs_frame();
    }
}

/// Owner of all scheduled work. Dropping it cancels everything.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    /// A runtime whose frames are driven purely by explicit drains.
    pub fn headless() -> Self {
        Self::new(Arc::new(DefaultScheduler))
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }

    /// Runs due delayed tasks, then every frame callback registered before
    /// this call, with `frame_time_nanos` as the frame time.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.inner.drain_frame_callbacks(frame_time_nanos);
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner.has_frame_callbacks()
    }

    pub fn has_delayed_tasks(&self) -> bool {
        self.inner.has_delayed_tasks()
    }

    /// Time of the most recently drained frame.
    pub fn now_nanos(&self) -> u64 {
        self.inner.now_nanos.get()
    }
}

#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

/// Weak handle used by animations and strategies; every operation is a
/// no-op once the [`Runtime`] is gone.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    /// Runs `task` on the first frame drained at least `delay_millis` after
    /// the current frame time. The task is cancelled when the returned
    /// registration is dropped.
    pub fn post_delayed(
        &self,
        delay_millis: u64,
        task: impl FnOnce() + 'static,
    ) -> DelayedTaskRegistration {
        match self.inner.upgrade() {
            Some(inner) => {
                let id = inner.post_delayed(delay_millis, Box::new(task));
                DelayedTaskRegistration::new(self.clone(), id)
            }
            None => DelayedTaskRegistration::inactive(self.clone()),
        }
    }

    pub fn cancel_delayed(&self, id: DelayedTaskId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_delayed(id);
        }
    }

    pub(crate) fn is_delayed_pending(&self, id: DelayedTaskId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.delayed_tasks.borrow().iter().any(|e| e.id == id))
            .unwrap_or(false)
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    pub fn now_nanos(&self) -> u64 {
        self.inner
            .upgrade()
            .map(|inner| inner.now_nanos.get())
            .unwrap_or(0)
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
