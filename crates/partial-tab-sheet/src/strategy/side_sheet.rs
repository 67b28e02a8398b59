//! Side sheet: full height below the status bar, pinned to one side.

use std::rc::{Rc, Weak};

use partial_tab_animation::AnimatorMode;
use partial_tab_graphics::{DisplayMetrics, WindowGeometry};

use super::{
    start_transition, HeightStatus, Motion, SheetContext, SheetCore, SheetVariant, StrategyType,
};
use crate::config::{SheetConfig, SidePosition, SlideInBehavior};
use crate::events::LayoutState;

/// Restored width of a side sheet.
///
/// Wide displays give the sheet at least a third of the width, narrower ones
/// at least half. Never wider than the display.
pub fn side_sheet_width(requested: i32, metrics: &DisplayMetrics, config: &SheetConfig) -> i32 {
    let ratio = if metrics.width_dp().0 >= config.wide_display_dp {
        config.side_sheet_wide_ratio
    } else {
        config.side_sheet_narrow_ratio
    };
    let floor = (metrics.width as f32 * ratio).round() as i32;
    requested.max(floor).min(metrics.width)
}

pub struct SideSheetStrategy {
    core: SheetCore,
    weak_self: Weak<SideSheetStrategy>,
}

impl SideSheetStrategy {
    pub fn new(context: Rc<SheetContext>, maximized: bool) -> Rc<Self> {
        Rc::new_cyclic(|weak_self| Self {
            core: SheetCore::new(context, maximized),
            weak_self: weak_self.clone(),
        })
    }

    fn position(&self) -> SidePosition {
        self.core.params().side_position
    }

    fn width_for(&self, maximized: bool, metrics: &DisplayMetrics) -> i32 {
        if maximized {
            metrics.width
        } else {
            let requested = self.core.params().initial_width.unwrap_or(0);
            side_sheet_width(requested, metrics, self.core.config())
        }
    }

    fn x_for(&self, width: i32, display_width: i32) -> i32 {
        match self.position() {
            SidePosition::End => display_width - width,
            SidePosition::Start => 0,
        }
    }
}

impl SheetVariant for SideSheetStrategy {
    fn core(&self) -> &SheetCore {
        &self.core
    }

    fn weak_self(&self) -> Weak<Self> {
        self.weak_self.clone()
    }

    fn kind(&self) -> StrategyType {
        StrategyType::SideSheet
    }

    fn resting_geometry(&self, metrics: &DisplayMetrics) -> WindowGeometry {
        let width = self.width_for(self.core.is_maximized(), metrics);
        WindowGeometry::new(
            self.x_for(width, metrics.width),
            metrics.status_bar_height,
            width,
            metrics.height - metrics.status_bar_height,
        )
    }

    fn layout_state(&self, _metrics: &DisplayMetrics) -> LayoutState {
        if self.core.is_maximized() {
            LayoutState::SideSheetMaximized
        } else {
            LayoutState::SideSheet
        }
    }

    fn close_motion(&self, metrics: &DisplayMetrics) -> Motion {
        let base = self.core.geometry();
        match (self.core.params().slide_in, self.position()) {
            (SlideInBehavior::FromBottom, _) => Motion::vertical(base, metrics.height),
            (SlideInBehavior::FromSide, SidePosition::End) => {
                Motion::horizontal(base, metrics.width)
            }
            (SlideInBehavior::FromSide, SidePosition::Start) => {
                Motion::horizontal(base, -base.resolved_width(metrics.width))
            }
        }
    }

    fn maximize_toggled(&self, animate: bool) -> bool {
        let Ok(metrics) = self.core.ready() else {
            return false;
        };
        if !self.core.is_settled() {
            return false;
        }
        let maximized = !self.core.is_maximized();
        self.core.set_maximized(maximized);

        let base = self.core.geometry();
        let target_width = self.width_for(maximized, &metrics);
        let display_width = metrics.width;
        let position = self.position();
        let motion = Motion::new(base.width, target_width, move |width| {
            let x = match position {
                SidePosition::End => display_width - width,
                SidePosition::Start => 0,
            };
            base.with_x(x).with_width(width)
        });
        let mode = (!animate).then_some(AnimatorMode::Immediate);
        start_transition(self, motion, self.core.status(), mode);
        true
    }
}
