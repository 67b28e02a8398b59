use std::rc::Rc;

use partial_tab_graphics::DisplayMetrics;
use partial_tab_runtime::OneShotLatch;

use crate::strategy::StrategyType;

/// Process-wide facts shared by every sheet opened through one environment.
///
/// Holds the latch behind the once-per-process device capability log line.
/// Tests create their own environment, or call [`reset`](Self::reset).
#[derive(Clone, Default)]
pub struct SheetEnvironment {
    capability_logged: Rc<OneShotLatch>,
}

impl SheetEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true only for the first call in this environment.
    pub fn log_device_capability(&self, metrics: &DisplayMetrics, chosen: StrategyType) -> bool {
        if !self.capability_logged.fire() {
            return false;
        }
        log::info!(
            "display {}x{}px ({:.0}x{:.0}dp, density {}), using {:?}",
            metrics.width,
            metrics.height,
            metrics.width_dp().0,
            metrics.height_dp().0,
            metrics.density,
            chosen
        );
        true
    }

    pub fn has_logged_capability(&self) -> bool {
        self.capability_logged.has_fired()
    }

    pub fn reset(&self) {
        self.capability_logged.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_is_logged_once_per_environment() {
        let environment = SheetEnvironment::new();
        let metrics = DisplayMetrics::new(1080, 2400, 2.75);
        assert!(environment.log_device_capability(&metrics, StrategyType::BottomSheet));
        assert!(!environment.log_device_capability(&metrics, StrategyType::SideSheet));

        let shared = environment.clone();
        assert!(shared.has_logged_capability());

        environment.reset();
        assert!(shared.log_device_capability(&metrics, StrategyType::FullSize));
        assert!(!SheetEnvironment::new().has_logged_capability());
    }
}
