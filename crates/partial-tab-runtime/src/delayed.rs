use crate::runtime::RuntimeHandle;
use crate::DelayedTaskId;

/// Handle to a task posted with [`RuntimeHandle::post_delayed`].
///
/// Dropping the registration cancels the task if it has not run yet, so
/// replacing a stored registration flushes the previous one.
pub struct DelayedTaskRegistration {
    runtime: RuntimeHandle,
    id: Option<DelayedTaskId>,
}

impl DelayedTaskRegistration {
    pub(crate) fn new(runtime: RuntimeHandle, id: DelayedTaskId) -> Self {
        Self {
            runtime,
            id: Some(id),
        }
    }

    pub(crate) fn inactive(runtime: RuntimeHandle) -> Self {
        Self { runtime, id: None }
    }

    /// True while the task is still waiting to run.
    pub fn is_pending(&self) -> bool {
        self.id
            .map(|id| self.runtime.is_delayed_pending(id))
            .unwrap_or(false)
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_delayed(id);
        }
    }
}

impl Drop for DelayedTaskRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_delayed(id);
        }
    }
}
