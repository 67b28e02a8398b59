//! Runtime services for the partial tab sheet engine.
//!
//! Everything in the engine runs on one logical UI thread. The [`Runtime`]
//! owns frame callbacks and delayed tasks; time only moves forward when the
//! host drains a frame, which keeps animations deterministic under test.

mod delayed;
mod frame_clock;
mod latch;
mod platform;
mod runtime;
mod ticker;

pub use delayed::DelayedTaskRegistration;
pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use latch::OneShotLatch;
pub use platform::RuntimeScheduler;
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};
pub use ticker::FrameTicker;

pub type FrameCallbackId = u64;
pub type DelayedTaskId = u64;

pub const NANOS_PER_MILLI: u64 = 1_000_000;

/// Nominal frame interval used by hosts that do not provide vsync timing.
pub const FRAME_INTERVAL_NANOS: u64 = 16_666_667;
