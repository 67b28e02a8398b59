mod host;

use std::rc::Rc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, ensure, Context, Result};
use partial_tab_gesture::PointerEvent;
use partial_tab_graphics::DisplayMetrics;
use partial_tab_runtime::{FrameTicker, Runtime};
use partial_tab_sheet::{
    ConfigurationSignal, HeightStatus, LaunchParams, PartialTabSheet, StrategyType,
};

use host::{LoggingContent, LoggingHost, LoggingObserver};

const FRAME: Duration = Duration::from_millis(16);
const IDLE_TIMEOUT_FRAMES: u32 = 200;

struct Session {
    runtime: Runtime,
    ticker: FrameTicker,
    host: Rc<LoggingHost>,
    sheet: PartialTabSheet,
}

impl Session {
    fn new(metrics: DisplayMetrics, params: LaunchParams) -> Self {
        let runtime = Runtime::headless();
        let host = Rc::new(LoggingHost::new(metrics));
        let sheet = PartialTabSheet::new(
            runtime.handle(),
            host.clone(),
            Rc::new(LoggingObserver),
            Rc::new(LoggingContent),
            params,
        );
        Self {
            runtime,
            ticker: FrameTicker::new(),
            host,
            sheet,
        }
    }

    fn frame(&self) {
        thread::sleep(FRAME);
        self.ticker.tick(&self.runtime);
    }

    fn settle(&self, step: &str) -> Result<()> {
        for _ in 0..IDLE_TIMEOUT_FRAMES {
            if !self.runtime.needs_frame() {
                log::info!(
                    "{}: {:?} {:?} after {} window updates",
                    step,
                    self.sheet.active_type(),
                    self.sheet.height_status(),
                    self.host.take_frames()
                );
                return Ok(());
            }
            self.frame();
        }
        bail!("{} did not settle", step)
    }

    fn drag_handle(&self, from_y: f32, to_y: f32) {
        let now = || self.ticker.now_millis();
        self.sheet.on_handle_touch(&PointerEvent::down(0.0, from_y, now()));
        for step in 1..=8 {
            self.frame();
            let y = from_y + (to_y - from_y) * step as f32 / 8.0;
            self.sheet.on_handle_touch(&PointerEvent::moved(0.0, y, now()));
        }
        for _ in 0..5 {
            self.frame();
        }
        self.sheet.on_handle_touch(&PointerEvent::up(0.0, to_y, now()));
    }

    fn change_display(&self, metrics: DisplayMetrics) {
        self.host.set_metrics(metrics);
        self.sheet
            .on_configuration_changed(&ConfigurationSignal::from_metrics(&metrics));
    }

    fn expect_status(&self, expected: HeightStatus) -> Result<()> {
        let status = self
            .sheet
            .height_status()
            .context("no strategy is attached")?;
        ensure!(status == expected, "expected {:?}, got {:?}", expected, status);
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let phone = DisplayMetrics::new(1080, 2340, 2.75).with_status_bar_height(66);
    let unfolded = DisplayMetrics::new(2208, 1768, 2.625).with_status_bar_height(66);
    let params = LaunchParams::new()
        .with_initial_width(600)
        .with_initial_height(900)
        .with_maximize_button(true);

    let session = Session::new(phone, params);
    let kind = session.sheet.start(&ConfigurationSignal::from_metrics(&phone));
    ensure!(kind == StrategyType::BottomSheet, "phone opened as {:?}", kind);
    session.settle("launch")?;

    let rest = session
        .sheet
        .geometry()
        .map(|g| g.y as f32)
        .context("sheet has no geometry")?;
    session.drag_handle(rest, 200.0);
    session.settle("drag up")?;
    session.expect_status(HeightStatus::Top)?;

    session.change_display(unfolded);
    session.settle("unfold")?;
    ensure!(
        session.sheet.active_type() == Some(StrategyType::SideSheet),
        "unfolded display kept {:?}",
        session.sheet.active_type()
    );

    session.sheet.on_maximize_button();
    session.settle("maximize")?;

    session.change_display(phone);
    session.settle("fold")?;
    session.expect_status(HeightStatus::Top)?;

    session.sheet.close();
    session.settle("close")?;
    ensure!(session.host.is_finished(), "close did not finish the activity");

    println!("session replayed");
    Ok(())
}
