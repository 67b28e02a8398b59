use crate::runtime::RuntimeHandle;
use crate::FrameCallbackId;

/// Per-frame scheduling for animations.
///
/// Every request is one-shot: an animation that wants another frame asks
/// again from inside its callback.
#[derive(Clone)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    /// Runs `on_frame` with the time of the next drained frame.
    ///
    /// Once the runtime is gone the request is dropped and the returned
    /// registration is already spent.
    pub fn next_frame(&self, on_frame: impl FnOnce(u64) + 'static) -> FrameCallbackRegistration {
        let id = self.runtime.register_frame_callback(on_frame);
        FrameCallbackRegistration {
            runtime: self.runtime.clone(),
            id,
        }
    }
}

/// Pending frame request. Dropping it withdraws the request.
pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    pub fn cancel(mut self) {
        self.withdraw();
    }

    fn withdraw(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.withdraw();
    }
}
