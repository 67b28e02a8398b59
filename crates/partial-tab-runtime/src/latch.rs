use std::cell::Cell;

/// A flag that can be tripped once.
///
/// Used for one-time diagnostics. The owner decides its scope by deciding
/// who shares the latch; [`OneShotLatch::reset`] exists for test harnesses.
#[derive(Debug, Default)]
pub struct OneShotLatch {
    fired: Cell<bool>,
}

impl OneShotLatch {
    pub const fn new() -> Self {
        Self {
            fired: Cell::new(false),
        }
    }

    /// Trips the latch. Returns `true` only for the first call.
    pub fn fire(&self) -> bool {
        !self.fired.replace(true)
    }

    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }

    pub fn reset(&self) {
        self.fired.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_until_reset() {
        let latch = OneShotLatch::new();
        assert!(!latch.has_fired());
        assert!(latch.fire());
        assert!(!latch.fire());
        assert!(latch.has_fired());
        latch.reset();
        assert!(latch.fire());
    }
}
