use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use partial_tab_graphics::DisplayMetrics;
use partial_tab_sheet::LaunchParams;
use partial_tab_testing::SheetRobot;

const DRAG_STEP_SAMPLES: &[u32] = &[10, 60];

fn phone() -> DisplayMetrics {
    DisplayMetrics::new(1080, 2340, 2.75)
}

fn tablet() -> DisplayMetrics {
    DisplayMetrics::new(2560, 1600, 2.0)
}

fn started_robot() -> SheetRobot {
    let mut robot = SheetRobot::new(
        phone(),
        LaunchParams::new()
            .with_initial_width(500)
            .with_initial_height(900),
    );
    robot.start();
    robot
}

fn bench_handle_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("handle_drag");
    for &steps in DRAG_STEP_SAMPLES {
        group.bench_with_input(BenchmarkId::new("move_events", steps), &steps, |b, &steps| {
            let mut robot = started_robot();
            let rest = robot.sheet().geometry().map(|g| g.y as f32).unwrap_or(0.0);

            b.iter(|| {
                // Short drag that snaps back to the initial height.
                robot.drag_handle_with(rest, rest + 120.0, steps, 16, true);
                robot.wait_for_idle();
                black_box(robot.sheet().geometry());
            });
        });
    }
    group.finish();
}

fn bench_content_handover(c: &mut Criterion) {
    c.bench_function("content_drag_expand_and_restore", |b| {
        let mut robot = started_robot();
        b.iter(|| {
            black_box(robot.drag_content(2000.0, 1200.0, 20));
            robot.wait_for_idle();
            robot.sheet().toggle_maximize();
        });
    });
}

fn bench_hot_swap(c: &mut Criterion) {
    c.bench_function("fold_unfold_swap", |b| {
        let mut robot = started_robot();
        b.iter(|| {
            robot.change_display(tablet());
            robot.wait_for_idle();
            robot.change_display(phone());
            robot.wait_for_idle();
            black_box(robot.sheet().active_type());
        });
    });
}

criterion_group!(
    benches,
    bench_handle_drag,
    bench_content_handover,
    bench_hot_swap
);
criterion_main!(benches);
