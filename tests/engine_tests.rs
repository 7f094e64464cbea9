use std::time::Duration;

use approx::assert_relative_eq;
use chrono::{TimeZone, Utc, Weekday};
use timeline_rs::api::{AxisRenderStyle, AxisSnapshot};
use timeline_rs::core::{Granularity, ReferenceKind, Viewport};
use timeline_rs::interaction::{PanDirection, PanState};
use timeline_rs::render::{APPROX_GLYPH_WIDTH_RATIO, NullRenderer};
use timeline_rs::{TimelineEngine, TimelineEngineConfig, TimelineError};

fn utc_ms(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("valid date")
        .timestamp_millis()
}

fn engine() -> TimelineEngine<NullRenderer, Utc> {
    let config = TimelineEngineConfig::new(Viewport::new(800, 300));
    TimelineEngine::with_timezone(NullRenderer::default(), config, Utc).expect("engine init")
}

#[test]
fn default_config_lays_out_the_axis_from_the_canvas() {
    let engine = engine();
    let geometry = engine.axis().geometry();

    assert_eq!(geometry.start_x, 40.0);
    assert_eq!(geometry.end_x, 760.0);
    assert_eq!(geometry.anchor_x, 100.0);
    assert_eq!(engine.zoom_level().control_value, 50.0);
    assert_eq!(engine.pan_state(), PanState::Idle);
}

#[test]
fn render_draws_baseline_ticks_and_reference_labels() {
    let mut engine = engine();
    let now = utc_ms(2024, 3, 10, 12, 0);

    let snapshot = engine.render(now).expect("render");

    let renderer = engine.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_line_count, 1 + snapshot.ticks.len());
    assert_eq!(renderer.last_text_count, 9);

    let kinds: Vec<ReferenceKind> = snapshot.labels.iter().map(|label| label.kind).collect();
    assert_eq!(
        kinds,
        vec![ReferenceKind::Past, ReferenceKind::Now, ReferenceKind::Future]
    );
    assert_eq!(snapshot.ticks_of(Granularity::Now).count(), 1);
    assert!(!snapshot.truncated);
}

#[test]
fn now_label_shows_local_date_and_time() {
    let mut engine = engine();
    let now = utc_ms(2024, 3, 10, 9, 5);

    let snapshot = engine.on_frame(now);

    let label = snapshot
        .labels
        .iter()
        .find(|label| label.kind == ReferenceKind::Now)
        .expect("now label");
    assert_eq!(label.caption, "now");
    assert_eq!(label.date_text, "3/10/2024");
    assert_eq!(label.time_text, "9:05");
    assert_eq!(label.x, 100.0);
}

#[test]
fn future_label_ends_at_the_axis_edge() {
    let mut engine = engine();
    let snapshot = engine.on_frame(utc_ms(2024, 3, 10, 12, 0));

    let future = snapshot.labels.last().expect("future label");
    assert_eq!(future.kind, ReferenceKind::Future);
    let text_width =
        future.date_text.chars().count() as f64 * 14.0 * APPROX_GLYPH_WIDTH_RATIO;
    assert_relative_eq!(future.x, 760.0 - text_width, epsilon = 1e-9);

    let frame = engine.build_render_frame(&snapshot);
    let date_text = frame
        .texts
        .iter()
        .find(|text| text.text == future.date_text && text.x > 600.0)
        .expect("future date text");
    assert_eq!(date_text.x, future.x.floor() + 0.5);
}

#[test]
fn frame_rows_sit_around_the_baseline() {
    let mut engine = engine();
    let snapshot = engine.on_frame(utc_ms(2024, 3, 10, 12, 0));

    let frame = engine.build_render_frame(&snapshot);

    let baseline = frame.lines[0];
    assert_eq!(baseline.y1, 240.5);
    assert_eq!(baseline.y2, 240.5);
    assert_eq!((baseline.x1, baseline.x2), (0.0, 800.0));

    let rows: Vec<f64> = frame.texts[..3].iter().map(|text| text.y).collect();
    assert_eq!(rows, vec![224.5, 255.5, 269.5]);
}

#[test]
fn degenerate_resize_is_rejected_and_geometry_kept() {
    let mut engine = engine();
    let before = engine.axis().geometry();

    let err = engine.on_resize(300.0, 300.0, 300.0).expect_err("degenerate");

    assert!(matches!(err, TimelineError::DegenerateViewport { .. }));
    assert_eq!(engine.axis().geometry(), before);
}

#[test]
fn canvas_resize_rederives_geometry() {
    let mut engine = engine();

    engine
        .on_canvas_resized(Viewport::new(1_600, 400))
        .expect("resize");

    let geometry = engine.axis().geometry();
    assert_eq!(geometry.start_x, 40.0);
    assert_eq!(geometry.end_x, 1_560.0);
    assert_eq!(geometry.anchor_x, 200.0);
    assert_eq!(engine.viewport(), Viewport::new(1_600, 400));

    let err = engine.on_canvas_resized(Viewport::new(0, 400));
    assert!(err.is_err());
    assert_eq!(engine.viewport(), Viewport::new(1_600, 400));
}

#[test]
fn zoom_changes_propagate_to_the_axis() {
    let mut engine = engine();

    let level = engine.on_zoom_changed(-10.0).expect("zoom");

    assert_eq!(level.control_value, 0.0);
    assert_relative_eq!(engine.axis().range_ms(), 60_000.0, max_relative = 1e-12);
    assert_eq!(engine.zoom_level(), level);
}

#[test]
fn held_pan_moves_the_axis_until_released() {
    let mut engine = engine();

    engine.on_pan_held(PanDirection::Forward);
    assert_eq!(engine.pan_state(), PanState::Emitting(PanDirection::Forward));
    let offset = engine
        .advance_pan(Duration::from_millis(300))
        .expect("advance");
    assert_eq!(offset, 20.0);

    engine.on_pan_released();
    let offset = engine
        .advance_pan(Duration::from_millis(300))
        .expect("advance");
    assert_eq!(offset, 20.0);
    assert_eq!(engine.axis().now_x(), 120.0);
}

#[test]
fn panning_far_into_the_past_hides_now() {
    let mut engine = engine();

    engine.on_pan_held(PanDirection::Backward);
    let offset = engine
        .advance_pan(Duration::from_millis(9_000))
        .expect("advance");
    engine.on_pan_released();
    assert_eq!(offset, -600.0);

    let snapshot = engine.render(utc_ms(2024, 3, 10, 12, 0)).expect("render");

    assert!(snapshot.now_x < snapshot.start_x);
    assert_eq!(snapshot.ticks_of(Granularity::Now).count(), 0);
    assert_eq!(snapshot.labels.len(), 2);
    assert_eq!(engine.renderer().last_text_count, 6);
}

#[test]
fn config_json_round_trip_and_defaults() {
    let config = TimelineEngineConfig::new(Viewport::new(640, 200))
        .with_border_px(20.0)
        .with_week_start(Weekday::Mon)
        .with_initial_control(75.0);

    let json = config.to_json_pretty().expect("serialize");
    let restored = TimelineEngineConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);

    let minimal =
        TimelineEngineConfig::from_json_str(r#"{"viewport":{"width":800,"height":300}}"#)
            .expect("parse minimal");
    assert_eq!(minimal, TimelineEngineConfig::new(Viewport::new(800, 300)));
}

#[test]
fn snapshot_serializes_to_json() {
    let mut engine = engine();
    let snapshot = engine.on_frame(utc_ms(2024, 3, 10, 12, 0));

    let json = snapshot.to_json_pretty().expect("serialize");
    assert!(json.contains("\"ticks\""));
    let restored = AxisSnapshot::from_json_str(&json).expect("parse");

    assert_eq!(restored.ticks.len(), snapshot.ticks.len());
    assert_eq!(restored.labels, snapshot.labels);
    assert_eq!(restored.zoom, snapshot.zoom);
}

#[test]
fn invalid_configuration_is_rejected() {
    let style = AxisRenderStyle {
        font_size_px: 0.0,
        ..AxisRenderStyle::default()
    };
    let config = TimelineEngineConfig::new(Viewport::new(800, 300)).with_style(style);
    let result = TimelineEngine::with_timezone(NullRenderer::default(), config, Utc);
    assert!(matches!(result, Err(TimelineError::InvalidData(_))));

    let mut engine = engine();
    assert!(engine.set_render_style(style).is_err());
    assert_eq!(engine.render_style(), AxisRenderStyle::default());

    let config = TimelineEngineConfig::new(Viewport::new(800, 300)).with_anchor_ratio(f64::NAN);
    assert!(TimelineEngine::with_timezone(NullRenderer::default(), config, Utc).is_err());
}
