//! Full size: the sheet covers the whole display.

use std::rc::{Rc, Weak};

use partial_tab_graphics::{DisplayMetrics, WindowGeometry};

use super::{Motion, SheetContext, SheetCore, SheetVariant, StrategyType};
use crate::events::LayoutState;

/// Used in multi-window mode and when no usable size was requested. The
/// maximize flag is only carried so it survives a later swap.
pub struct FullSizeStrategy {
    core: SheetCore,
    weak_self: Weak<FullSizeStrategy>,
}

impl FullSizeStrategy {
    pub fn new(context: Rc<SheetContext>, maximized: bool) -> Rc<Self> {
        Rc::new_cyclic(|weak_self| Self {
            core: SheetCore::new(context, maximized),
            weak_self: weak_self.clone(),
        })
    }
}

impl SheetVariant for FullSizeStrategy {
    fn core(&self) -> &SheetCore {
        &self.core
    }

    fn weak_self(&self) -> Weak<Self> {
        self.weak_self.clone()
    }

    fn kind(&self) -> StrategyType {
        StrategyType::FullSize
    }

    fn resting_geometry(&self, _metrics: &DisplayMetrics) -> WindowGeometry {
        WindowGeometry::match_parent()
    }

    fn layout_state(&self, _metrics: &DisplayMetrics) -> LayoutState {
        LayoutState::FullScreen
    }

    fn close_motion(&self, metrics: &DisplayMetrics) -> Motion {
        Motion::vertical(self.core.geometry(), metrics.height)
    }
}
