//! Robot-style driver for end-to-end sheet tests.
//!
//! # Example
//!
//! ```
//! use partial_tab_graphics::DisplayMetrics;
//! use partial_tab_sheet::LaunchParams;
//! use partial_tab_testing::SheetRobot;
//!
//! let metrics = DisplayMetrics::new(1000, 2000, 2.5);
//! let mut robot = SheetRobot::new(metrics, LaunchParams::new().with_initial_height(800));
//! robot.start();
//! robot.drag_handle(1000.0, 200.0);
//! robot.wait_for_idle();
//! ```

use std::rc::Rc;

use partial_tab_gesture::PointerEvent;
use partial_tab_graphics::DisplayMetrics;
use partial_tab_runtime::{Runtime, FRAME_INTERVAL_NANOS, NANOS_PER_MILLI};
use partial_tab_sheet::{
    ConfigurationSignal, LaunchParams, PartialTabSheet, SheetConfig, SheetEnvironment,
    StrategyType, WindowHost,
};

use crate::fakes::{FakeWindowHost, RecordingContentSink, RecordingObserver};

/// Upper bound on frames pumped by [`SheetRobot::wait_for_idle`].
const MAX_IDLE_FRAMES: usize = 1_000;

/// Finger rest before lifting in a slow drag; longer than the velocity
/// tracker's stop threshold.
const HOLD_BEFORE_RELEASE_MS: u64 = 80;

/// Initializes logging once for the test binary; later calls are no-ops.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Drives a [`PartialTabSheet`] against fakes with a deterministic clock.
pub struct SheetRobot {
    runtime: Runtime,
    host: Rc<FakeWindowHost>,
    observer: Rc<RecordingObserver>,
    content: Rc<RecordingContentSink>,
    sheet: PartialTabSheet,
    multi_window: bool,
}

impl SheetRobot {
    pub fn new(metrics: DisplayMetrics, params: LaunchParams) -> Self {
        Self::with_config(metrics, params, SheetConfig::default())
    }

    pub fn with_config(metrics: DisplayMetrics, params: LaunchParams, config: SheetConfig) -> Self {
        Self::with_host(FakeWindowHost::new(metrics), params, config)
    }

    pub fn with_host(host: FakeWindowHost, params: LaunchParams, config: SheetConfig) -> Self {
        init_test_logging();
        let runtime = Runtime::headless();
        let host = Rc::new(host);
        let observer = Rc::new(RecordingObserver::new());
        let content = Rc::new(RecordingContentSink::new());
        let sheet = PartialTabSheet::with_config(
            runtime.handle(),
            host.clone(),
            observer.clone(),
            content.clone(),
            params,
            config,
            SheetEnvironment::new(),
        );
        Self {
            runtime,
            host,
            observer,
            content,
            sheet,
            multi_window: false,
        }
    }

    /// Attaches the sheet for the host's current metrics.
    pub fn start(&mut self) -> StrategyType {
        let signal = self.signal();
        self.sheet.start(&signal)
    }

    pub fn sheet(&self) -> &PartialTabSheet {
        &self.sheet
    }

    pub fn host(&self) -> &FakeWindowHost {
        &self.host
    }

    pub fn observer(&self) -> &RecordingObserver {
        &self.observer
    }

    pub fn content(&self) -> &RecordingContentSink {
        &self.content
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn now_ms(&self) -> i64 {
        (self.runtime.now_nanos() / NANOS_PER_MILLI) as i64
    }

    fn signal(&self) -> ConfigurationSignal {
        let metrics = self
            .host
            .display_metrics()
            .unwrap_or_else(|| DisplayMetrics::new(0, 0, 1.0));
        ConfigurationSignal::from_metrics(&metrics).with_multi_window(self.multi_window)
    }

    /// Advances the clock by `millis` and drains one frame.
    pub fn advance_time_ms(&mut self, millis: u64) {
        let now = self.runtime.now_nanos() + millis * NANOS_PER_MILLI;
        self.runtime.drain_frame_callbacks(now);
    }

    pub fn advance_frame(&mut self) {
        let now = self.runtime.now_nanos() + FRAME_INTERVAL_NANOS;
        self.runtime.drain_frame_callbacks(now);
    }

    /// Pumps frames until no animation or delayed task is pending.
    pub fn wait_for_idle(&mut self) {
        for frames in 0..MAX_IDLE_FRAMES {
            if !self.runtime.needs_frame() {
                if frames > 0 {
                    log::debug!("idle after {} frame(s) at {}ms", frames, self.now_ms());
                }
                return;
            }
            self.advance_frame();
        }
        panic!("sheet did not become idle after {} frames", MAX_IDLE_FRAMES);
    }

    fn handle_event(&mut self, event: PointerEvent) -> bool {
        self.sheet.on_handle_touch(&event)
    }

    fn content_event(&mut self, event: PointerEvent) -> bool {
        self.sheet.on_content_touch(&event)
    }

    /// Slow drag on the handle: the finger rests before lifting, so no fling.
    pub fn drag_handle(&mut self, from_y: f32, to_y: f32) {
        self.drag_handle_with(from_y, to_y, 10, 16, true);
    }

    /// Fast drag released while moving.
    pub fn fling_handle(&mut self, from_y: f32, to_y: f32) {
        self.drag_handle_with(from_y, to_y, 5, 8, false);
    }

    pub fn drag_handle_with(
        &mut self,
        from_y: f32,
        to_y: f32,
        steps: u32,
        step_ms: u64,
        hold: bool,
    ) {
        let x = 100.0;
        self.handle_event(PointerEvent::down(x, from_y, self.now_ms()));
        for step in 1..=steps {
            self.advance_time_ms(step_ms);
            let y = from_y + (to_y - from_y) * step as f32 / steps as f32;
            self.handle_event(PointerEvent::moved(x, y, self.now_ms()));
        }
        self.advance_time_ms(if hold { HOLD_BEFORE_RELEASE_MS } else { step_ms });
        self.handle_event(PointerEvent::up(x, to_y, self.now_ms()));
    }

    /// Down and up on the handle without movement.
    pub fn tap_handle(&mut self, y: f32) {
        self.handle_event(PointerEvent::down(100.0, y, self.now_ms()));
        self.advance_time_ms(50);
        self.handle_event(PointerEvent::up(100.0, y, self.now_ms()));
    }

    /// Drags over the content. Returns, per event, whether the window took it.
    pub fn drag_content(&mut self, from_y: f32, to_y: f32, steps: u32) -> Vec<bool> {
        let x = 300.0;
        let mut consumed = Vec::with_capacity(steps as usize + 2);
        consumed.push(self.content_event(PointerEvent::down(x, from_y, self.now_ms())));
        for step in 1..=steps {
            self.advance_time_ms(16);
            let y = from_y + (to_y - from_y) * step as f32 / steps as f32;
            consumed.push(self.content_event(PointerEvent::moved(x, y, self.now_ms())));
        }
        self.advance_time_ms(HOLD_BEFORE_RELEASE_MS);
        consumed.push(self.content_event(PointerEvent::up(x, to_y, self.now_ms())));
        consumed
    }

    /// Changes the display and notifies the sheet.
    pub fn change_display(&mut self, metrics: DisplayMetrics) {
        self.host.set_metrics(Some(metrics));
        let signal = self.signal();
        self.sheet.on_configuration_changed(&signal);
    }

    pub fn set_multi_window(&mut self, multi_window: bool) {
        self.multi_window = multi_window;
        let signal = self.signal();
        self.sheet.on_configuration_changed(&signal);
    }
}
