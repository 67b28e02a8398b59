//! Display metrics as reported by the host platform.

use crate::unit::Dp;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Derives the orientation from raw display dimensions.
    pub fn from_size(width: i32, height: i32) -> Self {
        if width > height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    pub fn is_landscape(&self) -> bool {
        matches!(self, Orientation::Landscape)
    }
}

/// Snapshot of the display the sheet lives on, in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayMetrics {
    pub width: i32,
    pub height: i32,
    /// Pixels per dp.
    pub density: f32,
    pub status_bar_height: i32,
    pub navigation_bar_height: i32,
}

impl DisplayMetrics {
    pub fn new(width: i32, height: i32, density: f32) -> Self {
        Self {
            width,
            height,
            density,
            status_bar_height: 0,
            navigation_bar_height: 0,
        }
    }

    pub fn with_status_bar_height(mut self, height: i32) -> Self {
        self.status_bar_height = height;
        self
    }

    pub fn with_navigation_bar_height(mut self, height: i32) -> Self {
        self.navigation_bar_height = height;
        self
    }

    pub fn width_dp(&self) -> Dp {
        Dp::from_px(self.width as f32, self.density)
    }

    pub fn height_dp(&self) -> Dp {
        Dp::from_px(self.height as f32, self.density)
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from_size(self.width, self.height)
    }

    pub fn dp_to_px(&self, dp: Dp) -> i32 {
        dp.to_px_rounded(self.density)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_dp_uses_density() {
        let metrics = DisplayMetrics::new(1080, 2000, 2.5);
        assert_eq!(metrics.width_dp(), Dp(432.0));
    }

    #[test]
    fn orientation_follows_aspect() {
        assert_eq!(
            DisplayMetrics::new(1080, 2000, 1.0).orientation(),
            Orientation::Portrait
        );
        assert_eq!(
            DisplayMetrics::new(2000, 1080, 1.0).orientation(),
            Orientation::Landscape
        );
    }
}
