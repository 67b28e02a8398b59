use partial_tab_graphics::{DisplayMetrics, WindowGeometry};
use partial_tab_sheet::{HeightStatus, LaunchParams, LayoutState, SheetConfig, StrategyType};
use partial_tab_testing::robot_assertions::{
    assert_last_layout, assert_layout_precedes_resize, assert_monotonic,
    assert_no_duplicate_resizes, tops, widths,
};
use partial_tab_testing::{FakeWindowHost, SheetRobot};

fn phone() -> DisplayMetrics {
    DisplayMetrics::new(1000, 2000, 2.5)
}

fn tablet() -> DisplayMetrics {
    DisplayMetrics::new(2560, 1600, 2.0)
}

fn bottom_sheet_robot() -> SheetRobot {
    let mut robot = SheetRobot::new(phone(), LaunchParams::new().with_initial_height(800));
    assert_eq!(robot.start(), StrategyType::BottomSheet);
    robot
}

#[test]
fn small_requested_height_opens_at_half_the_display() {
    let robot = bottom_sheet_robot();
    let resize = robot.observer().last_resize().expect("initial resize");
    assert_eq!((resize.height, resize.width), (1000, 1000));
    assert_eq!(
        robot.sheet().geometry(),
        Some(WindowGeometry::new(0, 1000, 1000, 1000))
    );
    assert_last_layout(robot.observer(), LayoutState::BottomSheet, "initial");
}

#[test]
fn slow_drag_to_the_top_expands() {
    let mut robot = bottom_sheet_robot();
    robot.drag_handle(1000.0, 100.0);
    robot.wait_for_idle();

    assert_eq!(robot.sheet().height_status(), Some(HeightStatus::Top));
    assert_last_layout(robot.observer(), LayoutState::BottomSheetMaximized, "after drag");
    let resizes = robot.observer().resizes();
    assert_eq!(resizes.len(), 2);
    assert_eq!(resizes[1].height, 2000);
}

#[test]
fn short_slow_drag_falls_back_but_a_fling_carries_on() {
    let mut robot = bottom_sheet_robot();
    robot.drag_handle(1000.0, 800.0);
    robot.wait_for_idle();
    assert_eq!(robot.sheet().height_status(), Some(HeightStatus::InitialHeight));
    assert_eq!(robot.sheet().geometry().map(|g| g.y), Some(1000));

    robot.fling_handle(1000.0, 800.0);
    robot.wait_for_idle();
    assert_eq!(robot.sheet().height_status(), Some(HeightStatus::Top));
}

#[test]
fn snap_animation_is_monotonic() {
    let mut robot = bottom_sheet_robot();
    robot.drag_handle(1000.0, 300.0);
    robot.host().clear_applied();
    robot.wait_for_idle();

    let applied = robot.host().applied();
    assert!(!applied.is_empty());
    assert_monotonic(&tops(&applied), "snap to top");
    assert_eq!(applied.last().map(|g| g.y), Some(0));
}

#[test]
fn tapping_the_handle_toggles() {
    let mut robot = bottom_sheet_robot();
    robot.tap_handle(1000.0);
    robot.wait_for_idle();
    assert_eq!(robot.sheet().height_status(), Some(HeightStatus::Top));

    robot.tap_handle(10.0);
    robot.wait_for_idle();
    assert_eq!(robot.sheet().height_status(), Some(HeightStatus::InitialHeight));
}

#[test]
fn handle_events_are_swallowed_while_animating() {
    let mut robot = bottom_sheet_robot();
    robot.tap_handle(1000.0);
    assert_eq!(robot.sheet().height_status(), Some(HeightStatus::Transition));

    let applied = robot.host().apply_count();
    robot.drag_handle_with(1000.0, 1500.0, 2, 4, false);
    // Only animation ticks were applied; the drag itself was dropped.
    assert!(robot
        .host()
        .applied()
        .iter()
        .skip(applied)
        .all(|g| g.y <= 1000));
    robot.wait_for_idle();
    assert_eq!(robot.sheet().height_status(), Some(HeightStatus::Top));
}

#[test]
fn dragging_to_the_bottom_closes_and_finishes() {
    let mut robot = bottom_sheet_robot();
    robot.drag_handle(1000.0, 1900.0);
    robot.wait_for_idle();

    assert_eq!(robot.sheet().height_status(), Some(HeightStatus::Close));
    assert_eq!(robot.host().finish_count(), 1);
    assert_eq!(robot.host().last_geometry().map(|g| g.y), Some(2000));
}

#[test]
fn concurrent_close_requests_share_one_animation() {
    let mut robot = bottom_sheet_robot();
    robot.host().clear_applied();

    assert!(robot.sheet().close());
    assert!(!robot.sheet().close());
    assert_eq!(robot.host().finish_count(), 0);
    robot.wait_for_idle();

    assert_eq!(robot.host().finish_count(), 2);
    assert_monotonic(&tops(&robot.host().applied()), "single slide down");
}

#[test]
fn dragging_content_up_moves_the_window() {
    let mut robot = bottom_sheet_robot();
    let consumed = robot.drag_content(1500.0, 900.0, 10);

    assert!(!consumed[0], "down always reaches the content");
    assert!(consumed[1..].iter().all(|taken| *taken));
    robot.wait_for_idle();
    assert_eq!(robot.sheet().height_status(), Some(HeightStatus::Top));
    assert!(robot.content().delivered().is_empty());
}

#[test]
fn scrolled_content_keeps_its_gesture_when_expanded() {
    let mut robot = bottom_sheet_robot();
    robot.tap_handle(1000.0);
    robot.wait_for_idle();
    robot.content().set_scrolled_to_top(false);

    let applied = robot.host().apply_count();
    let consumed = robot.drag_content(600.0, 1400.0, 8);

    assert!(consumed.iter().all(|taken| !taken));
    assert_eq!(robot.host().apply_count(), applied);
    assert_eq!(robot.content().delivered().len(), 1);
}

#[test]
fn content_scroll_down_at_initial_height_is_not_a_window_drag() {
    let mut robot = bottom_sheet_robot();
    let applied = robot.host().apply_count();
    let consumed = robot.drag_content(1200.0, 1600.0, 6);
    assert!(consumed.iter().all(|taken| !taken));
    assert_eq!(robot.host().apply_count(), applied);
    assert!(robot.content().delivered().is_empty());
}

#[test]
fn keyboard_pushes_the_sheet_up_and_back() {
    let mut robot = bottom_sheet_robot();
    robot.sheet().on_ime_visibility_changed(true);
    robot.wait_for_idle();
    assert_eq!(robot.sheet().height_status(), Some(HeightStatus::Top));

    robot.sheet().on_ime_visibility_changed(false);
    robot.wait_for_idle();
    assert_eq!(robot.sheet().height_status(), Some(HeightStatus::InitialHeight));
}

#[test]
fn fullscreen_round_trip() {
    let mut robot = bottom_sheet_robot();
    robot.sheet().enter_fullscreen();
    let layout = robot.observer().last_layout().expect("fullscreen layout");
    assert_eq!(
        (layout.left, layout.top, layout.right, layout.bottom),
        (0, 0, 1000, 2000)
    );
    assert_eq!(layout.layout_state, LayoutState::FullScreen);

    robot.sheet().exit_fullscreen();
    robot.wait_for_idle();
    assert_last_layout(robot.observer(), LayoutState::BottomSheet, "restored");
}

#[test]
fn side_sheet_maximize_button_animates_programmatic_toggle_does_not() {
    let mut robot = SheetRobot::new(
        tablet(),
        LaunchParams::new()
            .with_initial_width(500)
            .with_initial_height(800)
            .with_maximize_button(true),
    );
    assert_eq!(robot.start(), StrategyType::SideSheet);
    assert_eq!(
        robot.sheet().geometry(),
        Some(WindowGeometry::new(1715, 0, 845, 1600))
    );

    robot.host().clear_applied();
    assert!(robot.sheet().on_maximize_button());
    assert_eq!(robot.sheet().height_status(), Some(HeightStatus::Transition));
    robot.wait_for_idle();
    assert!(robot.host().apply_count() > 1);
    assert_monotonic(&widths(&robot.host().applied()), "maximize");
    assert_last_layout(robot.observer(), LayoutState::SideSheetMaximized, "maximized");

    assert!(robot.sheet().toggle_maximize());
    assert_ne!(robot.sheet().height_status(), Some(HeightStatus::Transition));
    assert_eq!(robot.sheet().geometry().map(|g| g.width), Some(845));
    assert_last_layout(robot.observer(), LayoutState::SideSheet, "restored");
}

#[test]
fn maximize_button_is_refused_when_launched_without_one() {
    let mut robot = SheetRobot::new(
        tablet(),
        LaunchParams::new()
            .with_initial_width(500)
            .with_initial_height(800),
    );
    robot.start();
    let applied = robot.host().apply_count();

    assert!(!robot.sheet().on_maximize_button());
    assert_eq!(robot.host().apply_count(), applied);
    assert!(!robot.sheet().is_maximized());

    // Programmatic toggles do not depend on the button.
    assert!(robot.sheet().toggle_maximize());
    assert!(robot.sheet().is_maximized());
}

#[test]
fn fullscreen_during_a_snap_lands_on_the_target() {
    let mut robot = bottom_sheet_robot();
    robot.tap_handle(1000.0);
    assert_eq!(robot.sheet().height_status(), Some(HeightStatus::Transition));

    robot.sheet().enter_fullscreen();
    assert_eq!(robot.sheet().height_status(), Some(HeightStatus::Top));
    assert!(robot.sheet().is_maximized());
    assert!(!robot.runtime().needs_frame());

    robot.sheet().exit_fullscreen();
    assert_eq!(robot.sheet().geometry().map(|g| g.y), Some(0));
    assert_last_layout(robot.observer(), LayoutState::BottomSheetMaximized, "restored");
}

#[test]
fn sanitized_launch_without_sizes_is_full_size() {
    let mut robot = SheetRobot::new(phone(), LaunchParams::from_raw(-1, -1, false, 0, 0, 0, false, -1));
    assert_eq!(robot.start(), StrategyType::FullSize);
    assert_last_layout(robot.observer(), LayoutState::FullScreen, "full size");
}

#[test]
fn sheet_waits_for_the_window_to_attach() {
    let mut robot = SheetRobot::with_host(
        FakeWindowHost::detached(),
        LaunchParams::new().with_initial_height(800),
        SheetConfig::default(),
    );
    assert_eq!(robot.start(), StrategyType::BottomSheet);
    assert_eq!(robot.host().apply_count(), 0);
    assert!(robot.observer().events().is_empty());

    robot.host().set_attached(true);
    robot.change_display(phone());
    assert_eq!(
        robot.sheet().geometry(),
        Some(WindowGeometry::new(0, 1000, 1000, 1000))
    );
}

#[test]
fn every_session_reports_layout_before_resize_without_repeats() {
    let mut robot = bottom_sheet_robot();
    robot.tap_handle(1000.0);
    robot.wait_for_idle();
    if let Some(strategy) = robot.sheet().selector().active() {
        strategy.as_dyn().update_position();
        strategy.as_dyn().maybe_invoke_resize_callback();
    }
    robot.drag_handle(0.0, 1000.0);
    robot.wait_for_idle();
    robot.sheet().enter_fullscreen();
    robot.sheet().exit_fullscreen();
    robot.change_display(DisplayMetrics::new(2000, 1000, 2.5));
    robot.wait_for_idle();

    let events = robot.observer().events();
    assert_layout_precedes_resize(&events, "session");
    assert_no_duplicate_resizes(&robot.observer().resizes(), "session");
}
