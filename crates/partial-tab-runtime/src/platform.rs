//! Platform abstraction for frame scheduling.
//!
//! The host event loop implements [`RuntimeScheduler`] so the runtime can
//! ask for a frame when an animation or delayed task is pending.

/// Schedules work for the sheet runtime.
///
/// Implementations are responsible for eventually calling
/// [`Runtime::drain_frame_callbacks`](crate::Runtime::drain_frame_callbacks).
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}
