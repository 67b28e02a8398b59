use web_time::Instant;

use crate::runtime::Runtime;

/// Converts wall-clock time into frame times for hosts without a vsync
/// source.
#[derive(Clone, Copy, Debug)]
pub struct FrameTicker {
    origin: Instant,
}

impl Default for FrameTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTicker {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now_nanos(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }

    pub fn now_millis(&self) -> i64 {
        self.origin.elapsed().as_millis() as i64
    }

    /// Drains `runtime` at the current wall-clock time and returns it.
    pub fn tick(&self, runtime: &Runtime) -> u64 {
        let now = self.now_nanos();
        runtime.drain_frame_callbacks(now);
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_is_monotonic() {
        let ticker = FrameTicker::new();
        let first = ticker.now_nanos();
        let second = ticker.now_nanos();
        assert!(second >= first);
    }
}
