use crate::easing::Easing;

/// Duration of every sheet snap, close and maximize animation.
pub const DEFAULT_DURATION_MILLIS: u64 = 300;

/// Tween specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    /// Create a linear tween animation.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn duration_nanos(&self) -> u64 {
        self.duration_millis * 1_000_000
    }

    /// Eased progress in [0, 1] after `elapsed_nanos`.
    pub fn progress(&self, elapsed_nanos: u64) -> f32 {
        let duration = self.duration_nanos().max(1);
        let linear = (elapsed_nanos as f64 / duration as f64).clamp(0.0, 1.0) as f32;
        self.easing.transform(linear)
    }

    /// `start + (end - start) * ease(t / duration)`, rounded to a pixel.
    pub fn value_at(&self, start: i32, end: i32, elapsed_nanos: u64) -> i32 {
        if elapsed_nanos >= self.duration_nanos() {
            return end;
        }
        let fraction = self.progress(elapsed_nanos);
        let value = start as f32 + (end - start) as f32 * fraction;
        let rounded = value.round() as i32;
        // Rounding must not step past either end.
        if start <= end {
            rounded.clamp(start, end)
        } else {
            rounded.clamp(end, start)
        }
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(DEFAULT_DURATION_MILLIS, Easing::FastOutSlowIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_has_reasonable_values() {
        let spec = AnimationSpec::default();
        assert_eq!(spec.duration_millis, DEFAULT_DURATION_MILLIS);
        assert_eq!(spec.easing, Easing::FastOutSlowIn);
    }

    #[test]
    fn value_at_hits_both_ends() {
        let spec = AnimationSpec::linear(100);
        assert_eq!(spec.value_at(1000, 0, 0), 1000);
        assert_eq!(spec.value_at(1000, 0, 50_000_000), 500);
        assert_eq!(spec.value_at(1000, 0, 100_000_000), 0);
        assert_eq!(spec.value_at(1000, 0, 900_000_000), 0);
    }

    #[test]
    fn zero_duration_jumps_to_end() {
        let spec = AnimationSpec::linear(0);
        assert_eq!(spec.value_at(0, 40, 0), 40);
    }
}
