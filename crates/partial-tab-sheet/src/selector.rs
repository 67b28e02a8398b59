//! Chooses the presentation for the current configuration and hot-swaps it.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use partial_tab_graphics::Dp;
use partial_tab_runtime::{DelayedTaskRegistration, RuntimeHandle};
use rustc_hash::FxHashMap;

use crate::diagnostics::SheetEnvironment;
use crate::host::ConfigurationSignal;
use crate::strategy::{SheetContext, SheetStrategy, SizeStrategy, StrategyType};

/// Decision table for the presentation.
pub fn select_type(
    is_multi_window: bool,
    initial_width: Option<i32>,
    initial_height: Option<i32>,
    display_width_dp: f32,
    breakpoint_dp: i32,
) -> StrategyType {
    if is_multi_window {
        return StrategyType::FullSize;
    }
    let wide = display_width_dp >= breakpoint_dp as f32;
    match (initial_width.is_some(), initial_height.is_some()) {
        (false, false) => StrategyType::FullSize,
        (true, true) if wide => StrategyType::SideSheet,
        (true, true) => StrategyType::BottomSheet,
        (true, false) if wide => StrategyType::SideSheet,
        (true, false) => StrategyType::FullSize,
        (false, true) => StrategyType::BottomSheet,
    }
}

/// Owner of the live strategy.
pub struct StrategySelector {
    context: Rc<SheetContext>,
    environment: SheetEnvironment,
    runtime: RuntimeHandle,
    active: RefCell<Option<SizeStrategy>>,
    maximized: RefCell<FxHashMap<StrategyType, bool>>,
    reattach: RefCell<Option<DelayedTaskRegistration>>,
    /// Window-level; outlives any one strategy.
    fullscreen: Cell<bool>,
    weak_self: Weak<StrategySelector>,
}

impl StrategySelector {
    pub fn new(
        context: Rc<SheetContext>,
        environment: SheetEnvironment,
        runtime: RuntimeHandle,
    ) -> Rc<Self> {
        Rc::new_cyclic(|weak_self| Self {
            context,
            environment,
            runtime,
            active: RefCell::new(None),
            maximized: RefCell::new(FxHashMap::default()),
            reattach: RefCell::new(None),
            fullscreen: Cell::new(false),
            weak_self: weak_self.clone(),
        })
    }

    pub fn context(&self) -> &SheetContext {
        &self.context
    }

    pub fn active(&self) -> Option<SizeStrategy> {
        self.active.borrow().clone()
    }

    pub fn active_type(&self) -> Option<StrategyType> {
        self.active.borrow().as_ref().map(SizeStrategy::strategy_type)
    }

    pub fn is_reattach_pending(&self) -> bool {
        self.reattach
            .borrow()
            .as_ref()
            .is_some_and(DelayedTaskRegistration::is_pending)
    }

    /// Remembered maximize flag of a presentation that was swapped out.
    pub fn remembered_maximized(&self, kind: StrategyType) -> bool {
        self.maximized.borrow().get(&kind).copied().unwrap_or(false)
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.get()
    }

    /// Records the host's fullscreen mode and applies it to the live strategy.
    /// Strategies created later start in the recorded mode.
    pub fn set_fullscreen(&self, fullscreen: bool) {
        self.fullscreen.set(fullscreen);
        if let Some(strategy) = self.active() {
            strategy.as_dyn().set_fullscreen(fullscreen);
        }
    }

    fn create(&self, kind: StrategyType) -> SizeStrategy {
        let seed = self.remembered_maximized(kind);
        let strategy = SizeStrategy::new(kind, self.context.clone(), seed);
        if self.fullscreen.get() {
            strategy.as_dyn().set_fullscreen(true);
        }
        strategy
    }

    pub fn type_for(&self, signal: &ConfigurationSignal) -> StrategyType {
        let density = self
            .context
            .host
            .display_metrics()
            .map(|metrics| metrics.density)
            .unwrap_or(1.0);
        let params = &self.context.params;
        select_type(
            signal.is_multi_window,
            params.initial_width,
            params.initial_height,
            Dp::from_px(signal.display_width as f32, density).0,
            params.breakpoint_dp,
        )
    }

    /// Creates and attaches the first strategy without delay.
    pub fn start(&self, signal: &ConfigurationSignal) -> StrategyType {
        let kind = self.type_for(signal);
        if let Some(metrics) = self.context.host.display_metrics() {
            self.environment.log_device_capability(&metrics, kind);
        }
        let strategy = self.create(kind);
        let previous = self.active.borrow_mut().replace(strategy.clone());
        if let Some(previous) = previous {
            previous.as_dyn().destroy();
        }
        strategy.as_dyn().initialize_size();
        kind
    }

    /// Forwards to the live strategy, or swaps it for another presentation.
    pub fn on_configuration_changed(&self, signal: &ConfigurationSignal) {
        let kind = self.type_for(signal);
        let current = self.active();
        if let Some(strategy) = current.as_ref() {
            if strategy.strategy_type() == kind {
                strategy.as_dyn().on_configuration_changed(signal);
                return;
            }
        }
        self.swap(current, kind);
    }

    fn swap(&self, current: Option<SizeStrategy>, kind: StrategyType) {
        // Dropping the registration cancels an attach that has not run yet.
        self.reattach.borrow_mut().take();

        if let Some(old) = current {
            let old_kind = old.strategy_type();
            let was_maximized = old.as_dyn().is_maximized();
            self.maximized.borrow_mut().insert(old_kind, was_maximized);
            old.as_dyn().destroy();
            log::debug!("swapping {:?} -> {:?}", old_kind, kind);
        }

        let strategy = self.create(kind);
        *self.active.borrow_mut() = Some(strategy);

        let selector = self.weak_self.clone();
        let registration = self
            .runtime
            .post_delayed(self.context.config.reattach_delay_ms, move || {
                if let Some(selector) = selector.upgrade() {
                    selector.attach_active();
                }
            });
        *self.reattach.borrow_mut() = Some(registration);
    }

    fn attach_active(&self) {
        self.reattach.borrow_mut().take();
        if let Some(strategy) = self.active() {
            log::debug!("attaching {:?}", strategy.strategy_type());
            strategy.as_dyn().initialize_size();
        }
    }

    /// Destroys the live strategy and any pending attach.
    pub fn shutdown(&self) {
        self.reattach.borrow_mut().take();
        if let Some(strategy) = self.active.borrow_mut().take() {
            strategy.as_dyn().destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_window_is_always_full_size() {
        assert_eq!(
            select_type(true, Some(500), Some(800), 1200.0, 840),
            StrategyType::FullSize
        );
    }

    #[test]
    fn nothing_requested_is_full_size() {
        assert_eq!(select_type(false, None, None, 400.0, 840), StrategyType::FullSize);
        assert_eq!(select_type(false, None, None, 1200.0, 840), StrategyType::FullSize);
    }

    #[test]
    fn both_sizes_switch_on_the_breakpoint() {
        assert_eq!(
            select_type(false, Some(500), Some(800), 839.0, 840),
            StrategyType::BottomSheet
        );
        assert_eq!(
            select_type(false, Some(500), Some(800), 840.0, 840),
            StrategyType::SideSheet
        );
    }

    #[test]
    fn width_only_needs_a_wide_display() {
        assert_eq!(
            select_type(false, Some(500), None, 400.0, 840),
            StrategyType::FullSize
        );
        assert_eq!(
            select_type(false, Some(500), None, 900.0, 840),
            StrategyType::SideSheet
        );
    }

    #[test]
    fn height_only_is_a_bottom_sheet() {
        assert_eq!(
            select_type(false, None, Some(800), 1200.0, 840),
            StrategyType::BottomSheet
        );
    }
}
