//! Launch parameters and tuning knobs.
//!
//! Launch parameters arrive from an untrusted caller and are sanitized on the
//! way in, so the strategies never see negative sizes or unknown codes.

use partial_tab_animation::AnimationSpec;
use partial_tab_gesture::HandleConfig;

/// Breakpoint used when the caller sends none or a negative one.
pub const DEFAULT_BREAKPOINT_DP: i32 = 840;

/// Bottom sheets never grow wider than this on large displays.
pub const BOTTOM_SHEET_MAX_WIDTH_DP: f32 = 900.0;

/// Delay between destroying a strategy and attaching its replacement.
pub const REATTACH_DELAY_MS: u64 = 100;

/// Bottom sheets start at no less than this share of the display height.
pub const MIN_HEIGHT_RATIO: f32 = 0.5;

/// Displays at least this wide use the narrow side sheet ratio.
pub const WIDE_DISPLAY_DP: f32 = 840.0;

pub const SIDE_SHEET_WIDE_RATIO: f32 = 0.33;
pub const SIDE_SHEET_NARROW_RATIO: f32 = 0.5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SidePosition {
    Start,
    #[default]
    End,
}

impl SidePosition {
    /// 1 is start, 2 is end, anything else falls back to end.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => SidePosition::Start,
            _ => SidePosition::End,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SlideInBehavior {
    FromBottom,
    #[default]
    FromSide,
}

impl SlideInBehavior {
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => SlideInBehavior::FromBottom,
            _ => SlideInBehavior::FromSide,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Decoration {
    None,
    #[default]
    Shadow,
    Divider,
}

impl Decoration {
    /// 1 none, 2 shadow, 3 divider. The default code 0 and anything out of
    /// range become shadow.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Decoration::None,
            3 => Decoration::Divider,
            _ => Decoration::Shadow,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RoundedCorners {
    #[default]
    None,
    Top,
}

impl RoundedCorners {
    pub fn from_code(code: i32) -> Self {
        match code {
            2 => RoundedCorners::Top,
            _ => RoundedCorners::None,
        }
    }
}

/// Non-positive sizes mean "not requested".
pub fn sanitize_size(px: i32) -> Option<i32> {
    (px > 0).then_some(px)
}

pub fn sanitize_breakpoint(dp: i32) -> i32 {
    if dp < 0 {
        DEFAULT_BREAKPOINT_DP
    } else {
        dp
    }
}

/// What the caller asked for when opening the sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaunchParams {
    pub initial_width: Option<i32>,
    pub initial_height: Option<i32>,
    pub fixed_height: bool,
    pub side_position: SidePosition,
    pub slide_in: SlideInBehavior,
    /// Forwarded for the host's styling only; the engine never reads it.
    pub decoration: Decoration,
    /// Forwarded for the host's styling only; the engine never reads it.
    pub rounded_corners: RoundedCorners,
    pub maximize_button: bool,
    pub breakpoint_dp: i32,
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self {
            initial_width: None,
            initial_height: None,
            fixed_height: false,
            side_position: SidePosition::default(),
            slide_in: SlideInBehavior::default(),
            decoration: Decoration::default(),
            rounded_corners: RoundedCorners::default(),
            maximize_button: false,
            breakpoint_dp: DEFAULT_BREAKPOINT_DP,
        }
    }
}

impl LaunchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_width(mut self, px: i32) -> Self {
        self.initial_width = sanitize_size(px);
        self
    }

    pub fn with_initial_height(mut self, px: i32) -> Self {
        self.initial_height = sanitize_size(px);
        self
    }

    pub fn with_fixed_height(mut self, fixed: bool) -> Self {
        self.fixed_height = fixed;
        self
    }

    pub fn with_side_position(mut self, position: SidePosition) -> Self {
        self.side_position = position;
        self
    }

    pub fn with_slide_in(mut self, behavior: SlideInBehavior) -> Self {
        self.slide_in = behavior;
        self
    }

    pub fn with_decoration(mut self, decoration: Decoration) -> Self {
        self.decoration = decoration;
        self
    }

    pub fn with_rounded_corners(mut self, corners: RoundedCorners) -> Self {
        self.rounded_corners = corners;
        self
    }

    pub fn with_maximize_button(mut self, enabled: bool) -> Self {
        self.maximize_button = enabled;
        self
    }

    pub fn with_breakpoint_dp(mut self, dp: i32) -> Self {
        self.breakpoint_dp = sanitize_breakpoint(dp);
        self
    }

    /// Builds params from raw integer codes as sent over the wire.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        initial_width: i32,
        initial_height: i32,
        fixed_height: bool,
        side_position: i32,
        decoration: i32,
        rounded_corners: i32,
        maximize_button: bool,
        breakpoint_dp: i32,
    ) -> Self {
        Self::new()
            .with_initial_width(initial_width)
            .with_initial_height(initial_height)
            .with_fixed_height(fixed_height)
            .with_side_position(SidePosition::from_code(side_position))
            .with_decoration(Decoration::from_code(decoration))
            .with_rounded_corners(RoundedCorners::from_code(rounded_corners))
            .with_maximize_button(maximize_button)
            .with_breakpoint_dp(breakpoint_dp)
    }
}

/// Engine tuning. Defaults match platform behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetConfig {
    pub animation: AnimationSpec,
    pub handle: HandleConfig,
    pub reattach_delay_ms: u64,
    pub bottom_sheet_max_width_dp: f32,
    pub min_height_ratio: f32,
    pub wide_display_dp: f32,
    pub side_sheet_wide_ratio: f32,
    pub side_sheet_narrow_ratio: f32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        let animation = AnimationSpec::default();
        Self {
            animation,
            handle: HandleConfig {
                animation_duration_millis: animation.duration_millis,
                ..HandleConfig::default()
            },
            reattach_delay_ms: REATTACH_DELAY_MS,
            bottom_sheet_max_width_dp: BOTTOM_SHEET_MAX_WIDTH_DP,
            min_height_ratio: MIN_HEIGHT_RATIO,
            wide_display_dp: WIDE_DISPLAY_DP,
            side_sheet_wide_ratio: SIDE_SHEET_WIDE_RATIO,
            side_sheet_narrow_ratio: SIDE_SHEET_NARROW_RATIO,
        }
    }
}

impl SheetConfig {
    /// Also keeps the fling projection in step with the animation length.
    pub fn with_animation(mut self, animation: AnimationSpec) -> Self {
        self.animation = animation;
        self.handle.animation_duration_millis = animation.duration_millis;
        self
    }

    pub fn with_handle(mut self, handle: HandleConfig) -> Self {
        self.handle = handle;
        self
    }

    pub fn with_reattach_delay_ms(mut self, delay: u64) -> Self {
        self.reattach_delay_ms = delay;
        self
    }

    pub fn with_bottom_sheet_max_width_dp(mut self, dp: f32) -> Self {
        self.bottom_sheet_max_width_dp = dp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_sizes_are_unset() {
        let params = LaunchParams::new()
            .with_initial_width(-5)
            .with_initial_height(0);
        assert_eq!(params.initial_width, None);
        assert_eq!(params.initial_height, None);

        let params = LaunchParams::new().with_initial_height(800);
        assert_eq!(params.initial_height, Some(800));
    }

    #[test]
    fn negative_breakpoint_falls_back() {
        assert_eq!(LaunchParams::new().with_breakpoint_dp(-1).breakpoint_dp, 840);
        assert_eq!(LaunchParams::new().with_breakpoint_dp(600).breakpoint_dp, 600);
        assert_eq!(LaunchParams::new().with_breakpoint_dp(0).breakpoint_dp, 0);
    }

    #[test]
    fn unknown_codes_fall_back() {
        assert_eq!(Decoration::from_code(0), Decoration::Shadow);
        assert_eq!(Decoration::from_code(-3), Decoration::Shadow);
        assert_eq!(Decoration::from_code(9), Decoration::Shadow);
        assert_eq!(Decoration::from_code(1), Decoration::None);
        assert_eq!(Decoration::from_code(3), Decoration::Divider);

        assert_eq!(RoundedCorners::from_code(0), RoundedCorners::None);
        assert_eq!(RoundedCorners::from_code(7), RoundedCorners::None);
        assert_eq!(RoundedCorners::from_code(2), RoundedCorners::Top);

        assert_eq!(SidePosition::from_code(0), SidePosition::End);
        assert_eq!(SidePosition::from_code(1), SidePosition::Start);
    }

    #[test]
    fn from_raw_sanitizes_everything() {
        let params = LaunchParams::from_raw(-1, 1200, true, 1, 42, -1, true, -10);
        assert_eq!(params.initial_width, None);
        assert_eq!(params.initial_height, Some(1200));
        assert!(params.fixed_height);
        assert_eq!(params.side_position, SidePosition::Start);
        assert_eq!(params.decoration, Decoration::Shadow);
        assert_eq!(params.rounded_corners, RoundedCorners::None);
        assert!(params.maximize_button);
        assert_eq!(params.breakpoint_dp, DEFAULT_BREAKPOINT_DP);
    }

    #[test]
    fn animation_length_drives_fling_projection() {
        let config = SheetConfig::default().with_animation(AnimationSpec::linear(200));
        assert_eq!(config.handle.animation_duration_millis, 200);
    }
}
