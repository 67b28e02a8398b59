//! Bottom sheet: anchored to the display bottom, resized by dragging its top.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use partial_tab_animation::AnimatorMode;
use partial_tab_graphics::{DisplayMetrics, Dp, WindowGeometry, MATCH_PARENT};
use smallvec::{smallvec, SmallVec};

use super::{
    start_transition, HeightStatus, Motion, SheetContext, SheetCore, SheetVariant, StrategyType,
};
use crate::events::LayoutState;
use crate::host::ConfigurationSignal;

/// Height of the sheet at its initial snap point.
///
/// At least `min_ratio` of the display, at most the space below the status bar.
pub fn initial_height(
    requested: i32,
    display_height: i32,
    status_bar_height: i32,
    min_ratio: f32,
) -> i32 {
    let floor = (display_height as f32 * min_ratio).round() as i32;
    requested
        .max(floor)
        .min(display_height - status_bar_height)
}

/// Nearest snap point to `projected_y`.
///
/// Candidates are tried initial height first and only a strictly closer one
/// replaces it, so equidistant projections stay at the initial height.
pub fn snap_target(
    projected_y: f32,
    initial_y: i32,
    top_y: i32,
    close_y: i32,
    allow_top: bool,
) -> HeightStatus {
    let mut candidates: SmallVec<[(HeightStatus, i32); 3]> =
        smallvec![(HeightStatus::InitialHeight, initial_y)];
    if allow_top {
        candidates.push((HeightStatus::Top, top_y));
    }
    candidates.push((HeightStatus::Close, close_y));

    let mut best = HeightStatus::InitialHeight;
    let mut best_distance = f32::INFINITY;
    for (status, y) in candidates {
        let distance = (projected_y - y as f32).abs();
        if distance < best_distance {
            best = status;
            best_distance = distance;
        }
    }
    best
}

pub struct BottomSheetStrategy {
    core: SheetCore,
    weak_self: Weak<BottomSheetStrategy>,
    /// Finger y minus window top while a drag is in progress.
    drag_offset: Cell<Option<f32>>,
    /// Set when the keyboard pushed the sheet to the top.
    ime_expanded: Cell<bool>,
}

impl BottomSheetStrategy {
    pub fn new(context: Rc<SheetContext>, maximized: bool) -> Rc<Self> {
        Rc::new_cyclic(|weak_self| Self {
            core: SheetCore::new(context, maximized),
            weak_self: weak_self.clone(),
            drag_offset: Cell::new(None),
            ime_expanded: Cell::new(false),
        })
    }

    fn is_fixed_height(&self) -> bool {
        self.core.params().fixed_height
    }

    fn is_full_height(metrics: &DisplayMetrics) -> bool {
        metrics.orientation().is_landscape()
    }

    pub fn initial_y(&self, metrics: &DisplayMetrics) -> i32 {
        let requested = self.core.params().initial_height.unwrap_or(0);
        metrics.height
            - initial_height(
                requested,
                metrics.height,
                metrics.status_bar_height,
                self.core.config().min_height_ratio,
            )
    }

    pub fn top_y(&self, metrics: &DisplayMetrics) -> i32 {
        metrics.status_bar_height
    }

    /// Window x and width, centered and capped on wide displays.
    fn horizontal_extent(&self, metrics: &DisplayMetrics) -> (i32, i32) {
        let max_width = metrics.dp_to_px(Dp(self.core.config().bottom_sheet_max_width_dp));
        if metrics.width > max_width {
            ((metrics.width - max_width) / 2, max_width)
        } else {
            (0, metrics.width)
        }
    }

    fn snap_y(&self, status: HeightStatus, metrics: &DisplayMetrics) -> i32 {
        match status {
            HeightStatus::Top => self.top_y(metrics),
            HeightStatus::Close => metrics.height,
            HeightStatus::InitialHeight | HeightStatus::Transition => self.initial_y(metrics),
        }
    }

    /// Animates the window top to the snap point of `target`, keeping the
    /// bottom edge on the display bottom.
    fn move_to(&self, target: HeightStatus, metrics: &DisplayMetrics, mode: Option<AnimatorMode>) {
        let base = self.core.geometry();
        let display_height = metrics.height;
        let motion = Motion::new(base.y, self.snap_y(target, metrics), move |y| {
            base.with_y(y).with_height(display_height - y)
        });
        start_transition(self, motion, target, mode);
    }

    fn toggle(&self, mode: Option<AnimatorMode>) -> bool {
        let Ok(metrics) = self.core.ready() else {
            return false;
        };
        if self.is_fixed_height() || Self::is_full_height(&metrics) {
            return false;
        }
        let target = match self.core.status() {
            HeightStatus::Top => HeightStatus::InitialHeight,
            HeightStatus::InitialHeight => HeightStatus::Top,
            HeightStatus::Transition | HeightStatus::Close => return false,
        };
        self.ime_expanded.set(false);
        self.move_to(target, &metrics, mode);
        true
    }
}

impl SheetVariant for BottomSheetStrategy {
    fn core(&self) -> &SheetCore {
        &self.core
    }

    fn weak_self(&self) -> Weak<Self> {
        self.weak_self.clone()
    }

    fn kind(&self) -> StrategyType {
        StrategyType::BottomSheet
    }

    fn resting_geometry(&self, metrics: &DisplayMetrics) -> WindowGeometry {
        let (x, width) = self.horizontal_extent(metrics);
        if Self::is_full_height(metrics) {
            return WindowGeometry::new(x, 0, width, MATCH_PARENT);
        }
        let y = match self.core.status() {
            HeightStatus::Top => self.top_y(metrics),
            HeightStatus::InitialHeight => self.initial_y(metrics),
            HeightStatus::Transition | HeightStatus::Close => return self.core.geometry(),
        };
        WindowGeometry::new(x, y, width, metrics.height - y)
    }

    fn layout_state(&self, metrics: &DisplayMetrics) -> LayoutState {
        if Self::is_full_height(metrics) || self.core.status() == HeightStatus::Top {
            LayoutState::BottomSheetMaximized
        } else {
            LayoutState::BottomSheet
        }
    }

    fn close_motion(&self, metrics: &DisplayMetrics) -> Motion {
        Motion::vertical(self.core.geometry(), metrics.height)
    }

    fn initial_status(&self) -> HeightStatus {
        if self.core.is_maximized() && !self.is_fixed_height() {
            HeightStatus::Top
        } else {
            HeightStatus::InitialHeight
        }
    }

    fn settled(&self, status: HeightStatus) {
        self.core.set_maximized(status == HeightStatus::Top);
    }

    fn drag_started(&self, y: f32) {
        let Ok(metrics) = self.core.ready() else {
            return;
        };
        if Self::is_full_height(&metrics) || !self.core.is_settled() {
            return;
        }
        self.ime_expanded.set(false);
        self.drag_offset.set(Some(y - self.core.geometry().y as f32));
    }

    fn drag_moved(&self, y: f32) {
        let Some(offset) = self.drag_offset.get() else {
            return;
        };
        let Ok(metrics) = self.core.ready() else {
            return;
        };
        if !self.core.is_settled() {
            return;
        }
        let min_y = if self.is_fixed_height() {
            self.initial_y(&metrics)
        } else {
            self.top_y(&metrics)
        };
        let top = ((y - offset).round() as i32).clamp(min_y, metrics.height);
        let geometry = self
            .core
            .geometry()
            .with_y(top)
            .with_height(metrics.height - top);
        self.core.apply(geometry);
    }

    fn drag_ended(&self, fling_distance: f32) -> bool {
        if self.drag_offset.take().is_none() {
            return true;
        }
        let Ok(metrics) = self.core.ready() else {
            return true;
        };
        if !self.core.is_settled() {
            return true;
        }
        let projected = self.core.geometry().y as f32 + fling_distance;
        let target = snap_target(
            projected,
            self.initial_y(&metrics),
            self.top_y(&metrics),
            metrics.height,
            !self.is_fixed_height(),
        );
        log::debug!(
            "drag released at {} (projected {:.0}), snapping to {:?}",
            self.core.geometry().y,
            projected,
            target
        );
        if target == HeightStatus::Close {
            return false;
        }
        if target == self.core.status() && self.core.geometry().y == self.snap_y(target, &metrics) {
            // Never left the snap point, e.g. a tap.
            return true;
        }
        self.move_to(target, &metrics, None);
        true
    }

    fn handle_tapped(&self) {
        self.toggle(None);
    }

    fn ime_visibility_changed(&self, visible: bool) {
        let Ok(metrics) = self.core.ready() else {
            return;
        };
        if visible {
            if self.core.status() == HeightStatus::InitialHeight
                && !self.is_fixed_height()
                && !Self::is_full_height(&metrics)
            {
                self.ime_expanded.set(true);
                self.move_to(HeightStatus::Top, &metrics, None);
            }
        } else if self.ime_expanded.replace(false) && self.core.landing() == HeightStatus::Top {
            self.move_to(HeightStatus::InitialHeight, &metrics, None);
        }
    }

    fn configuration_changed(&self, _signal: &ConfigurationSignal) {
        self.drag_offset.set(None);
        super::reposition(self);
    }

    fn maximize_toggled(&self, animate: bool) -> bool {
        self.toggle((!animate).then_some(AnimatorMode::Immediate))
    }

    fn fully_expanded(&self) -> bool {
        match self.core.ready() {
            Ok(metrics) => {
                Self::is_full_height(&metrics) || self.core.status() == HeightStatus::Top
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_height_is_clamped_between_half_and_status_bar() {
        assert_eq!(initial_height(800, 2000, 0, 0.5), 1000);
        assert_eq!(initial_height(1500, 2000, 0, 0.5), 1500);
        assert_eq!(initial_height(5000, 2000, 80, 0.5), 1920);
    }

    #[test]
    fn midpoint_between_initial_and_top_stays_initial() {
        let target = snap_target(500.0, 1000, 0, 2000, true);
        assert_eq!(target, HeightStatus::InitialHeight);
    }

    #[test]
    fn midpoint_between_initial_and_close_stays_initial() {
        let target = snap_target(1500.0, 1000, 0, 2000, true);
        assert_eq!(target, HeightStatus::InitialHeight);
    }

    #[test]
    fn nearest_snap_point_wins() {
        assert_eq!(snap_target(100.0, 1000, 0, 2000, true), HeightStatus::Top);
        assert_eq!(snap_target(1900.0, 1000, 0, 2000, true), HeightStatus::Close);
        assert_eq!(snap_target(-400.0, 1000, 0, 2000, true), HeightStatus::Top);
        assert_eq!(snap_target(2600.0, 1000, 0, 2000, true), HeightStatus::Close);
    }

    #[test]
    fn fixed_height_never_snaps_to_top() {
        assert_eq!(
            snap_target(0.0, 1000, 0, 2000, false),
            HeightStatus::InitialHeight
        );
    }
}
