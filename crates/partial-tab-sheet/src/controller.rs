//! Composition root: routes host input to the gesture layer and the live
//! strategy.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use partial_tab_gesture::{
    ContentInputSink, FlingResult, GestureClassifier, GestureState, HandleInterpreter,
    PointerEvent,
};
use partial_tab_graphics::WindowGeometry;
use partial_tab_runtime::RuntimeHandle;

use crate::config::{LaunchParams, SheetConfig};
use crate::diagnostics::SheetEnvironment;
use crate::events::ResizeReporter;
use crate::host::{ConfigurationSignal, SheetObserver, WindowHost};
use crate::selector::StrategySelector;
use crate::strategy::{HeightStatus, SheetContext, SheetStrategy, StrategyType};

pub struct PartialTabSheet {
    selector: Rc<StrategySelector>,
    handle: RefCell<HandleInterpreter>,
    classifier: RefCell<GestureClassifier>,
    host: Rc<dyn WindowHost>,
    config: SheetConfig,
}

impl PartialTabSheet {
    pub fn new(
        runtime: RuntimeHandle,
        host: Rc<dyn WindowHost>,
        observer: Rc<dyn SheetObserver>,
        content: Rc<dyn ContentInputSink>,
        params: LaunchParams,
    ) -> Self {
        Self::with_config(
            runtime,
            host,
            observer,
            content,
            params,
            SheetConfig::default(),
            SheetEnvironment::default(),
        )
    }

    pub fn with_config(
        runtime: RuntimeHandle,
        host: Rc<dyn WindowHost>,
        observer: Rc<dyn SheetObserver>,
        content: Rc<dyn ContentInputSink>,
        params: LaunchParams,
        config: SheetConfig,
        environment: SheetEnvironment,
    ) -> Self {
        let context = Rc::new(SheetContext {
            host: host.clone(),
            reporter: Rc::new(ResizeReporter::new(observer)),
            clock: runtime.frame_clock(),
            config,
            params,
        });
        let selector = StrategySelector::new(context, environment, runtime);

        let mut handle = HandleInterpreter::new(config.handle);
        let weak_selector = Rc::downgrade(&selector);
        let close_host = host.clone();
        handle.set_close_handler(move || {
            close_active(&weak_selector, &close_host);
        });

        Self {
            selector,
            handle: RefCell::new(handle),
            classifier: RefCell::new(GestureClassifier::new(content)),
            host,
            config,
        }
    }

    /// Attaches the first strategy for `signal`.
    pub fn start(&self, signal: &ConfigurationSignal) -> StrategyType {
        self.selector.start(signal)
    }

    pub fn selector(&self) -> &Rc<StrategySelector> {
        &self.selector
    }

    pub fn active_type(&self) -> Option<StrategyType> {
        self.selector.active_type()
    }

    pub fn height_status(&self) -> Option<HeightStatus> {
        self.with_active(|strategy| strategy.height_status())
    }

    pub fn geometry(&self) -> Option<WindowGeometry> {
        self.with_active(|strategy| strategy.geometry())
    }

    pub fn is_maximized(&self) -> bool {
        self.with_active(|strategy| strategy.is_maximized())
            .unwrap_or(false)
    }

    fn with_active<R>(&self, f: impl FnOnce(&dyn SheetStrategy) -> R) -> Option<R> {
        self.selector.active().map(|strategy| f(strategy.as_dyn()))
    }

    /// Touch on the drag handle. Returns whether it was consumed.
    pub fn on_handle_touch(&self, event: &PointerEvent) -> bool {
        let Some(strategy) = self.selector.active() else {
            return false;
        };
        self.handle.borrow_mut().on_touch(event, &strategy)
    }

    /// Touch over the content. Returns true when the window took it, in
    /// which case the content must not see it.
    pub fn on_content_touch(&self, event: &PointerEvent) -> bool {
        let Some(strategy) = self.selector.active() else {
            return false;
        };
        if strategy.strategy_type() != StrategyType::BottomSheet {
            return false;
        }
        let sheet = strategy.as_dyn();

        if event.action.ends_sequence() {
            let velocity = self.classifier.borrow_mut().release(event);
            let Some(velocity) = velocity else {
                return false;
            };
            let fling = FlingResult::from_velocity(
                velocity,
                self.config.handle.fling_threshold,
                self.config.handle.animation_duration_millis,
            );
            if !sheet.on_drag_end(fling.signed_distance()) {
                self.close();
            }
            return true;
        }

        let expanded = sheet.is_fully_expanded();
        let (before, after) = {
            let mut classifier = self.classifier.borrow_mut();
            let at_top = classifier.sink().is_scrolled_to_top();
            let before = classifier.state();
            (before, classifier.classify(event, expanded, at_top))
        };

        match (before, after) {
            (GestureState::DragTab, GestureState::DragTab) => {
                sheet.on_drag_move(event.y());
                true
            }
            (_, GestureState::DragTab) => {
                sheet.on_drag_start(event.y());
                true
            }
            (GestureState::DragTab, _) => {
                // The content took over mid-drag; settle the window.
                if !sheet.on_drag_end(0.0) {
                    self.close();
                }
                false
            }
            _ => false,
        }
    }

    pub fn on_configuration_changed(&self, signal: &ConfigurationSignal) {
        self.selector.on_configuration_changed(signal);
    }

    pub fn on_ime_visibility_changed(&self, visible: bool) {
        self.with_active(|strategy| strategy.on_ime_visibility_changed(visible));
    }

    /// Maximize button press; animated.
    pub fn on_maximize_button(&self) -> bool {
        if !self.selector.context().params.maximize_button {
            log::trace!("maximize button pressed but the sheet was launched without one");
            return false;
        }
        self.with_active(|strategy| strategy.toggle_maximize(true))
            .unwrap_or(false)
    }

    /// Programmatic maximize toggle; applied without animation.
    pub fn toggle_maximize(&self) -> bool {
        self.with_active(|strategy| strategy.toggle_maximize(false))
            .unwrap_or(false)
    }

    pub fn enter_fullscreen(&self) {
        self.selector.set_fullscreen(true);
    }

    pub fn exit_fullscreen(&self) {
        self.selector.set_fullscreen(false);
    }

    /// Slides the sheet away and finishes the host activity once it is gone.
    pub fn close(&self) -> bool {
        close_active(&Rc::downgrade(&self.selector), &self.host)
    }

    pub fn destroy(&self) {
        self.selector.shutdown();
    }
}

fn close_active(selector: &Weak<StrategySelector>, host: &Rc<dyn WindowHost>) -> bool {
    let Some(strategy) = selector.upgrade().and_then(|selector| selector.active()) else {
        return false;
    };
    let host = host.clone();
    strategy
        .as_dyn()
        .handle_close_animation(Box::new(move || host.finish_activity()))
}
