//! Unit types: Dp and conversions

/// Density-independent pixels
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Dp(pub f32);

impl Dp {
    pub fn to_px(&self, density: f32) -> f32 {
        self.0 * density
    }

    /// Converts to whole pixels, rounding to the nearest pixel.
    pub fn to_px_rounded(&self, density: f32) -> i32 {
        self.to_px(density).round() as i32
    }

    pub fn from_px(px: f32, density: f32) -> Self {
        if density <= 0.0 {
            return Self(px);
        }
        Self(px / density)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dp_round_trips_through_density() {
        let dp = Dp(600.0);
        assert_eq!(dp.to_px(2.625), 1575.0);
        assert_eq!(Dp::from_px(1575.0, 2.625), Dp(600.0));
    }

    #[test]
    fn zero_density_is_treated_as_identity() {
        assert_eq!(Dp::from_px(400.0, 0.0), Dp(400.0));
    }
}
