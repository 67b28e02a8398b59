use crate::constants::FLING_VELOCITY_THRESHOLD;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FlingDirection {
    Up,
    Down,
    #[default]
    None,
}

/// Projected travel of a released drag.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlingResult {
    /// Unsigned distance in px.
    pub distance: f32,
    pub direction: FlingDirection,
}

impl FlingResult {
    pub const NONE: FlingResult = FlingResult {
        distance: 0.0,
        direction: FlingDirection::None,
    };

    /// Computes the fling for a release velocity in px/s.
    ///
    /// The window decelerates linearly to rest over the animation duration,
    /// so it covers half of `velocity * duration`.
    pub fn from_velocity(velocity: f32, threshold: f32, duration_millis: u64) -> Self {
        if !velocity.is_finite() || velocity.abs() < threshold {
            return Self::NONE;
        }
        let direction = if velocity < 0.0 {
            FlingDirection::Up
        } else {
            FlingDirection::Down
        };
        Self {
            distance: velocity.abs() * duration_millis as f32 / 2000.0,
            direction,
        }
    }

    /// Distance with screen-axis sign: negative moves the window up.
    pub fn signed_distance(&self) -> f32 {
        match self.direction {
            FlingDirection::Up => -self.distance,
            FlingDirection::Down => self.distance,
            FlingDirection::None => 0.0,
        }
    }
}

/// Signed fling distance using the default threshold.
pub fn fling_distance(velocity: f32, duration_millis: u64) -> f32 {
    FlingResult::from_velocity(velocity, FLING_VELOCITY_THRESHOLD, duration_millis).signed_distance()
}
