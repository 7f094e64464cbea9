use approx::assert_relative_eq;
use timeline_rs::TimelineError;
use timeline_rs::core::{AxisGeometry, AxisMapper, MS_PER_HOUR, Viewport};

const T: i64 = 1_700_000_000_000;

fn mapper() -> AxisMapper {
    AxisMapper::new(AxisGeometry::new(40.0, 760.0, 90.0), MS_PER_HOUR as f64).expect("valid axis")
}

#[test]
fn unpanned_now_sits_on_the_anchor() {
    let mut axis = mapper();
    let window = axis.tick(T);

    assert_eq!(window.pixels_per_ms, 720.0 / MS_PER_HOUR as f64);
    assert_eq!(window.now_x, 90.0);
    assert_eq!(axis.time_to_x(T as f64).expect("sampled"), 90.0);
    assert_eq!(window.start_time, T - 250_000);
    assert_eq!(window.end_time, T + 3_350_000);
}

#[test]
fn window_edges_map_to_pixel_bounds() {
    let mut axis = mapper();
    let window = axis.tick(T);

    assert_relative_eq!(window.time_to_x(window.start_time as f64), 40.0);
    assert_relative_eq!(window.time_to_x(window.end_time as f64), 760.0);
    assert_relative_eq!(window.x_to_time(40.0), window.start_time as f64);
}

#[test]
fn degenerate_bounds_are_rejected_and_state_is_kept() {
    let mut axis = mapper();
    let before = axis.geometry();

    let err = axis
        .set_bounds(100.0, 100.0, 100.0)
        .expect_err("zero-width span must fail");
    assert_eq!(
        err,
        TimelineError::DegenerateViewport {
            start_x: 100.0,
            end_x: 100.0
        }
    );
    assert_eq!(axis.geometry(), before);

    assert!(axis.set_bounds(200.0, 100.0, 150.0).is_err());
    assert!(axis.set_bounds(f64::NAN, 100.0, 50.0).is_err());
    assert_eq!(axis.geometry(), before);
}

#[test]
fn non_positive_range_is_rejected() {
    let mut axis = mapper();

    for bad in [0.0, -1.0, f64::INFINITY, f64::NAN] {
        let err = axis.set_range(bad).expect_err("range must be > 0");
        assert!(matches!(err, TimelineError::InvalidRange { .. }));
    }
    assert_eq!(axis.range_ms(), MS_PER_HOUR as f64);
}

#[test]
fn pan_moves_now_and_shifts_the_window() {
    let mut axis = mapper();
    let unpanned = axis.tick(T);

    axis.set_pan(72.0).expect("pan");
    let panned = axis.tick(T);

    assert_eq!(panned.now_x, 162.0);
    // 72px at 5000ms/px moves the window 6 minutes into the past.
    assert_eq!(unpanned.start_time - panned.start_time, 360_000);
    assert_eq!(unpanned.end_time - panned.end_time, 360_000);
    assert_relative_eq!(panned.time_to_x(T as f64), 162.0);
}

#[test]
fn mutation_invalidates_the_sampled_window() {
    let mut axis = mapper();
    axis.tick(T);
    assert!(axis.window().is_some());

    axis.set_range(2.0 * MS_PER_HOUR as f64).expect("range");
    assert!(axis.window().is_none());
    assert_eq!(
        axis.x_to_time(100.0),
        Err(TimelineError::FrameNotSampled)
    );
}

#[test]
fn resize_keeps_pan_within_limit() {
    let mut axis = mapper();
    axis.set_pan(2_000.0).expect("pan");

    axis.set_bounds(0.0, 100.0, 10.0).expect("resize");
    assert!(axis.now_x() <= 100.0 + 4.0 * 100.0);
}

#[test]
fn geometry_from_canvas_matches_widget_layout() {
    let geometry = AxisGeometry::from_viewport(Viewport::new(800, 300), 40.0, 1.0 / 8.0);

    assert_eq!(geometry.start_x, 40.0);
    assert_eq!(geometry.end_x, 760.0);
    assert_eq!(geometry.anchor_x, 100.0);
}
