//! Size strategies: the owners of the sheet's window rectangle.
//!
//! A strategy exposes [`SheetStrategy`] to the rest of the engine. The three
//! presentations implement the narrower [`SheetVariant`] hooks and share the
//! transition, close and reporting machinery in this module.

mod bottom_sheet;
mod full_size;
mod side_sheet;

pub use bottom_sheet::{initial_height, snap_target, BottomSheetStrategy};
pub use full_size::FullSizeStrategy;
pub use side_sheet::{side_sheet_width, SideSheetStrategy};

use std::cell::{Ref, RefCell};
use std::mem;
use std::rc::{Rc, Weak};

use partial_tab_animation::{AnimatorMode, GeometryAnimator};
use partial_tab_gesture::HandleDragTarget;
use partial_tab_graphics::{DisplayMetrics, WindowGeometry};
use partial_tab_runtime::FrameClock;
use smallvec::SmallVec;

use crate::config::{LaunchParams, SheetConfig};
use crate::error::SheetError;
use crate::events::{LayoutEvent, LayoutState, ResizeReporter};
use crate::host::{ConfigurationSignal, WindowHost};

/// Logical vertical state of the sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeightStatus {
    Top,
    InitialHeight,
    /// An animation is running. Left only when it lands.
    Transition,
    /// Terminal.
    Close,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrategyType {
    BottomSheet,
    SideSheet,
    FullSize,
}

/// Collaborators shared by every strategy a sheet creates.
pub struct SheetContext {
    pub host: Rc<dyn WindowHost>,
    pub reporter: Rc<ResizeReporter>,
    pub clock: FrameClock,
    pub config: SheetConfig,
    pub params: LaunchParams,
}

pub type CloseCallback = Box<dyn FnOnce() + 'static>;

/// Operations every presentation supports.
pub trait SheetStrategy {
    fn strategy_type(&self) -> StrategyType;

    /// First-time setup once the strategy is attached.
    fn initialize_size(&self);

    /// Recomputes the geometry for the current metrics and status.
    /// Idempotent. Deferred while a transition runs.
    fn update_position(&self);

    fn on_drag_start(&self, y: f32);
    fn on_drag_move(&self, y: f32);
    /// Returns false when the drag should close the sheet.
    fn on_drag_end(&self, fling_distance: f32) -> bool;
    fn on_handle_tap(&self);

    /// Slides the sheet off screen and runs `on_finished` once it is gone.
    ///
    /// Returns false if a close is already under way; `on_finished` still
    /// runs when that close lands.
    fn handle_close_animation(&self, on_finished: CloseCallback) -> bool;

    /// Reports the settled layout to the observer, dropping repeats.
    fn maybe_invoke_resize_callback(&self);

    fn on_configuration_changed(&self, signal: &ConfigurationSignal);
    fn on_ime_visibility_changed(&self, visible: bool);
    /// Returns whether the request was accepted.
    fn toggle_maximize(&self, animate: bool) -> bool;
    fn set_fullscreen(&self, fullscreen: bool);

    fn is_maximized(&self) -> bool;
    fn is_fully_expanded(&self) -> bool;
    fn height_status(&self) -> HeightStatus;
    fn geometry(&self) -> WindowGeometry;

    /// Stops all work. Late animation callbacks are ignored afterwards.
    fn destroy(&self);
}

/// Animated change of a single window edge.
pub struct Motion {
    pub from: i32,
    pub to: i32,
    project: Box<dyn Fn(i32) -> WindowGeometry + 'static>,
}

impl Motion {
    pub fn new(from: i32, to: i32, project: impl Fn(i32) -> WindowGeometry + 'static) -> Self {
        Self {
            from,
            to,
            project: Box::new(project),
        }
    }

    /// Moves the window vertically without resizing it.
    pub fn vertical(base: WindowGeometry, to_y: i32) -> Self {
        Self::new(base.y, to_y, move |y| base.with_y(y))
    }

    pub fn horizontal(base: WindowGeometry, to_x: i32) -> Self {
        Self::new(base.x, to_x, move |x| base.with_x(x))
    }

    pub fn geometry_at(&self, value: i32) -> WindowGeometry {
        (self.project)(value)
    }
}

struct CoreState {
    geometry: WindowGeometry,
    applied: Option<WindowGeometry>,
    status: HeightStatus,
    landing: HeightStatus,
    initialized: bool,
    maximized: bool,
    fullscreen: bool,
    destroyed: bool,
    update_pending: bool,
    close_deferred: bool,
    close_callbacks: SmallVec<[CloseCallback; 2]>,
}

/// State and collaborators common to all presentations.
pub struct SheetCore {
    context: Rc<SheetContext>,
    animator: GeometryAnimator,
    state: RefCell<CoreState>,
}

impl SheetCore {
    pub fn new(context: Rc<SheetContext>, maximized: bool) -> Self {
        let animator = GeometryAnimator::new(
            context.clock.clone(),
            AnimatorMode::Tween(context.config.animation),
        );
        Self {
            context,
            animator,
            state: RefCell::new(CoreState {
                geometry: WindowGeometry::default(),
                applied: None,
                status: HeightStatus::InitialHeight,
                landing: HeightStatus::InitialHeight,
                initialized: false,
                maximized,
                fullscreen: false,
                destroyed: false,
                update_pending: false,
                close_deferred: false,
                close_callbacks: SmallVec::new(),
            }),
        }
    }

    pub fn context(&self) -> &SheetContext {
        &self.context
    }

    pub fn config(&self) -> &SheetConfig {
        &self.context.config
    }

    pub fn params(&self) -> &LaunchParams {
        &self.context.params
    }

    pub fn animator(&self) -> &GeometryAnimator {
        &self.animator
    }

    pub fn status(&self) -> HeightStatus {
        self.state.borrow().status
    }

    /// Where the running transition lands, or the current status.
    pub fn landing(&self) -> HeightStatus {
        let state = self.state.borrow();
        match state.status {
            HeightStatus::Transition => state.landing,
            status => status,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(
            self.status(),
            HeightStatus::Top | HeightStatus::InitialHeight
        )
    }

    pub fn geometry(&self) -> WindowGeometry {
        self.state.borrow().geometry
    }

    pub fn is_maximized(&self) -> bool {
        self.state.borrow().maximized
    }

    pub fn set_maximized(&self, maximized: bool) {
        self.state.borrow_mut().maximized = maximized;
    }

    pub fn is_fullscreen(&self) -> bool {
        self.state.borrow().fullscreen
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.borrow().destroyed
    }

    /// Metrics for a geometry operation, or why it cannot run.
    pub fn ready(&self) -> Result<DisplayMetrics, SheetError> {
        {
            let state = self.state.borrow();
            if state.destroyed {
                return Err(SheetError::Destroyed);
            }
            if !state.initialized {
                return Err(SheetError::NotAttached);
            }
        }
        let host = &self.context.host;
        if !host.is_attached() {
            return Err(SheetError::NotAttached);
        }
        host.display_metrics().ok_or(SheetError::MetricsUnavailable)
    }

    /// Stores the geometry and pushes it to the host if it changed.
    pub fn apply(&self, geometry: WindowGeometry) {
        let push = {
            let mut state = self.state.borrow_mut();
            if state.destroyed {
                return;
            }
            state.geometry = geometry;
            if state.applied == Some(geometry) {
                false
            } else {
                state.applied = Some(geometry);
                true
            }
        };
        if push {
            self.context.host.apply_geometry(&geometry);
        }
    }

    fn state(&self) -> Ref<'_, CoreState> {
        self.state.borrow()
    }
}

/// Hooks a presentation implements; everything else comes from the shared
/// machinery through the blanket [`SheetStrategy`] impl.
pub trait SheetVariant: 'static {
    fn core(&self) -> &SheetCore;

    fn weak_self(&self) -> Weak<Self>;

    fn kind(&self) -> StrategyType;

    /// Geometry for the current settled status.
    fn resting_geometry(&self, metrics: &DisplayMetrics) -> WindowGeometry;

    fn layout_state(&self, metrics: &DisplayMetrics) -> LayoutState;

    /// Motion that takes the window off screen.
    fn close_motion(&self, metrics: &DisplayMetrics) -> Motion;

    fn initial_status(&self) -> HeightStatus {
        HeightStatus::InitialHeight
    }

    /// Called when a non-close transition lands, before reporting.
    fn settled(&self, _status: HeightStatus) {}

    fn drag_started(&self, _y: f32) {}

    fn drag_moved(&self, _y: f32) {}

    fn drag_ended(&self, _fling_distance: f32) -> bool {
        true
    }

    fn handle_tapped(&self) {}

    fn ime_visibility_changed(&self, _visible: bool) {}

    fn configuration_changed(&self, _signal: &ConfigurationSignal) {
        reposition(self);
    }

    fn maximize_toggled(&self, _animate: bool) -> bool {
        let core = self.core();
        core.set_maximized(!core.is_maximized());
        true
    }

    fn fully_expanded(&self) -> bool {
        true
    }
}

impl<V: SheetVariant> SheetStrategy for V {
    fn strategy_type(&self) -> StrategyType {
        self.kind()
    }

    fn initialize_size(&self) {
        initialize(self);
    }

    fn update_position(&self) {
        reposition(self);
    }

    fn on_drag_start(&self, y: f32) {
        self.drag_started(y);
    }

    fn on_drag_move(&self, y: f32) {
        self.drag_moved(y);
    }

    fn on_drag_end(&self, fling_distance: f32) -> bool {
        self.drag_ended(fling_distance)
    }

    fn on_handle_tap(&self) {
        self.handle_tapped();
    }

    fn handle_close_animation(&self, on_finished: CloseCallback) -> bool {
        request_close(self, on_finished)
    }

    fn maybe_invoke_resize_callback(&self) {
        report_layout(self);
    }

    fn on_configuration_changed(&self, signal: &ConfigurationSignal) {
        if self.core().is_destroyed() {
            return;
        }
        self.configuration_changed(signal);
    }

    fn on_ime_visibility_changed(&self, visible: bool) {
        self.ime_visibility_changed(visible);
    }

    fn toggle_maximize(&self, animate: bool) -> bool {
        if self.core().is_destroyed() || self.core().is_fullscreen() {
            return false;
        }
        self.maximize_toggled(animate)
    }

    fn set_fullscreen(&self, fullscreen: bool) {
        apply_fullscreen(self, fullscreen);
    }

    fn is_maximized(&self) -> bool {
        self.core().is_maximized()
    }

    fn is_fully_expanded(&self) -> bool {
        self.fully_expanded()
    }

    fn height_status(&self) -> HeightStatus {
        self.core().status()
    }

    fn geometry(&self) -> WindowGeometry {
        self.core().geometry()
    }

    fn destroy(&self) {
        teardown(self);
    }
}

fn initialize<V: SheetVariant>(variant: &V) {
    let status = variant.initial_status();
    let fullscreen = {
        let mut state = variant.core().state.borrow_mut();
        if state.destroyed {
            return;
        }
        state.initialized = true;
        state.status = status;
        state.landing = status;
        state.fullscreen
    };
    log::debug!("{:?}: initialized at {:?}", variant.kind(), status);
    if fullscreen {
        show_fullscreen(variant);
    } else {
        reposition(variant);
    }
}

pub(crate) fn reposition<V: SheetVariant + ?Sized>(variant: &V) {
    let core = variant.core();
    let metrics = match core.ready() {
        Ok(metrics) => metrics,
        Err(err) => {
            log::trace!("update_position skipped: {}", err);
            return;
        }
    };
    {
        let mut state = core.state.borrow_mut();
        if state.fullscreen {
            return;
        }
        match state.status {
            HeightStatus::Transition => {
                state.update_pending = true;
                return;
            }
            HeightStatus::Close => return,
            HeightStatus::Top | HeightStatus::InitialHeight => {}
        }
    }
    core.apply(variant.resting_geometry(&metrics));
    report_layout(variant);
}

pub(crate) fn report_layout<V: SheetVariant + ?Sized>(variant: &V) {
    let core = variant.core();
    let Ok(metrics) = core.ready() else {
        return;
    };
    let (geometry, fullscreen) = {
        let state = core.state();
        if !matches!(state.status, HeightStatus::Top | HeightStatus::InitialHeight) {
            return;
        }
        (state.geometry, state.fullscreen)
    };
    let layout = if fullscreen {
        LayoutEvent {
            left: 0,
            top: 0,
            right: metrics.width,
            bottom: metrics.height,
            layout_state: LayoutState::FullScreen,
        }
    } else {
        LayoutEvent {
            left: geometry.left(),
            top: geometry.top(),
            right: geometry.right(metrics.width),
            bottom: geometry.bottom(metrics.height),
            layout_state: variant.layout_state(&metrics),
        }
    };
    core.context.reporter.report(layout);
}

/// Animates `motion` and lands on `landing`. `mode` overrides the
/// animator's configured mode.
pub(crate) fn start_transition<V: SheetVariant>(
    variant: &V,
    motion: Motion,
    landing: HeightStatus,
    mode: Option<AnimatorMode>,
) {
    let core = variant.core();
    {
        let mut state = core.state.borrow_mut();
        if state.destroyed {
            return;
        }
        state.status = HeightStatus::Transition;
        state.landing = landing;
    }
    log::debug!(
        "{:?}: transition {} -> {} toward {:?}",
        variant.kind(),
        motion.from,
        motion.to,
        landing
    );

    let (from, to) = (motion.from, motion.to);
    let ticking = variant.weak_self();
    let finishing = variant.weak_self();
    let on_tick = move |value: i32| {
        if let Some(strong) = ticking.upgrade() {
            strong.core().apply(motion.geometry_at(value));
        }
    };
    let on_finished = move || {
        if let Some(strong) = finishing.upgrade() {
            finish_transition(&*strong);
        }
    };
    let mode = mode.unwrap_or_else(|| core.animator().mode());
    core.animator().start_with(mode, from, to, on_tick, on_finished);
}

fn finish_transition<V: SheetVariant>(variant: &V) {
    let core = variant.core();
    let (landing, close_callbacks, close_deferred, update_pending) = {
        let mut state = core.state.borrow_mut();
        if state.destroyed || state.status != HeightStatus::Transition {
            return;
        }
        let landing = state.landing;
        state.status = landing;
        if landing == HeightStatus::Close {
            (
                HeightStatus::Close,
                mem::take(&mut state.close_callbacks),
                false,
                false,
            )
        } else {
            (
                landing,
                SmallVec::new(),
                mem::take(&mut state.close_deferred),
                mem::take(&mut state.update_pending),
            )
        }
    };

    if landing == HeightStatus::Close {
        log::debug!(
            "{:?}: closed, running {} callback(s)",
            variant.kind(),
            close_callbacks.len()
        );
        for callback in close_callbacks {
            callback();
        }
        return;
    }

    variant.settled(landing);
    if update_pending {
        reposition(variant);
    }
    report_layout(variant);
    if close_deferred {
        start_close(variant);
    }
}

fn request_close<V: SheetVariant>(variant: &V, on_finished: CloseCallback) -> bool {
    let core = variant.core();
    {
        let mut state = core.state.borrow_mut();
        if state.destroyed {
            log::trace!("close ignored: {}", SheetError::Destroyed);
            return false;
        }
        let closing = state.status == HeightStatus::Close
            || (state.status == HeightStatus::Transition && state.landing == HeightStatus::Close)
            || state.close_deferred;
        state.close_callbacks.push(on_finished);
        if closing {
            log::debug!("close already pending, callback queued");
            return false;
        }
        if state.status == HeightStatus::Transition {
            state.close_deferred = true;
            return true;
        }
    }
    start_close(variant);
    true
}

fn start_close<V: SheetVariant>(variant: &V) {
    let core = variant.core();
    match core.ready() {
        Ok(metrics) => {
            let motion = if core.is_fullscreen() {
                Motion::vertical(core.geometry(), metrics.height)
            } else {
                variant.close_motion(&metrics)
            };
            start_transition(variant, motion, HeightStatus::Close, None);
        }
        Err(err) => {
            log::debug!("closing without animation: {}", err);
            let callbacks = {
                let mut state = core.state.borrow_mut();
                state.status = HeightStatus::Close;
                state.landing = HeightStatus::Close;
                mem::take(&mut state.close_callbacks)
            };
            for callback in callbacks {
                callback();
            }
        }
    }
}

fn apply_fullscreen<V: SheetVariant>(variant: &V, fullscreen: bool) {
    let core = variant.core();
    {
        let mut state = core.state.borrow_mut();
        if state.destroyed || state.fullscreen == fullscreen {
            return;
        }
        if state.status == HeightStatus::Close
            || (state.status == HeightStatus::Transition && state.landing == HeightStatus::Close)
        {
            return;
        }
        state.fullscreen = fullscreen;
    }

    if !fullscreen {
        reposition(variant);
        return;
    }

    if core.status() == HeightStatus::Transition {
        core.animator().cancel();
        let landing = {
            let mut state = core.state.borrow_mut();
            let landing = state.landing;
            state.status = landing;
            state.update_pending = false;
            landing
        };
        variant.settled(landing);
    }
    show_fullscreen(variant);
}

fn show_fullscreen<V: SheetVariant>(variant: &V) {
    let core = variant.core();
    if core.ready().is_ok() {
        core.apply(WindowGeometry::match_parent());
        report_layout(variant);
    }
}

fn teardown<V: SheetVariant>(variant: &V) {
    let core = variant.core();
    let callbacks = {
        let mut state = core.state.borrow_mut();
        if state.destroyed {
            return;
        }
        state.destroyed = true;
        state.update_pending = false;
        let closing = state.close_deferred
            || state.status == HeightStatus::Close
            || (state.status == HeightStatus::Transition && state.landing == HeightStatus::Close);
        state.close_deferred = false;
        let callbacks = mem::take(&mut state.close_callbacks);
        if closing {
            callbacks
        } else {
            SmallVec::new()
        }
    };
    core.animator().cancel();
    log::debug!("{:?}: destroyed", variant.kind());
    for callback in callbacks {
        callback();
    }
}

/// The live strategy.
#[derive(Clone)]
pub enum SizeStrategy {
    BottomSheet(Rc<BottomSheetStrategy>),
    SideSheet(Rc<SideSheetStrategy>),
    FullSize(Rc<FullSizeStrategy>),
}

impl SizeStrategy {
    pub fn new(kind: StrategyType, context: Rc<SheetContext>, maximized: bool) -> Self {
        match kind {
            StrategyType::BottomSheet => {
                SizeStrategy::BottomSheet(BottomSheetStrategy::new(context, maximized))
            }
            StrategyType::SideSheet => {
                SizeStrategy::SideSheet(SideSheetStrategy::new(context, maximized))
            }
            StrategyType::FullSize => {
                SizeStrategy::FullSize(FullSizeStrategy::new(context, maximized))
            }
        }
    }

    pub fn as_dyn(&self) -> &dyn SheetStrategy {
        match self {
            SizeStrategy::BottomSheet(strategy) => &**strategy,
            SizeStrategy::SideSheet(strategy) => &**strategy,
            SizeStrategy::FullSize(strategy) => &**strategy,
        }
    }

    pub fn strategy_type(&self) -> StrategyType {
        self.as_dyn().strategy_type()
    }
}

impl HandleDragTarget for SizeStrategy {
    fn is_animating(&self) -> bool {
        self.as_dyn().height_status() == HeightStatus::Transition
    }

    fn on_drag_start(&self, y: f32) {
        self.as_dyn().on_drag_start(y);
    }

    fn on_drag_move(&self, y: f32) {
        self.as_dyn().on_drag_move(y);
    }

    fn on_drag_end(&self, fling_distance: f32) -> bool {
        self.as_dyn().on_drag_end(fling_distance)
    }

    fn on_handle_tap(&self) {
        self.as_dyn().on_handle_tap();
    }
}

#[cfg(test)]
#[path = "../tests/strategy_tests.rs"]
mod tests;
