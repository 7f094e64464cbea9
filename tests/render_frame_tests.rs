use timeline_rs::TimelineError;
use timeline_rs::core::Viewport;
use timeline_rs::render::{Color, LinePrimitive, NullRenderer, RenderFrame, Renderer, TextPrimitive};

#[test]
fn null_renderer_counts_valid_primitives() {
    let frame = RenderFrame::new(Viewport::new(200, 100))
        .with_line(LinePrimitive::new(0.0, 80.5, 200.0, 80.5, 1.0, Color::BLACK))
        .with_line(LinePrimitive::tick(50.0, 80.5, 10.0, 1.0, Color::BLACK))
        .with_text(TextPrimitive::new("now", 50.5, 64.5, 14.0, Color::BLACK));

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("render");

    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_line_count, 2);
    assert_eq!(renderer.last_text_count, 1);
}

#[test]
fn tick_line_is_centered_on_the_baseline() {
    let tick = LinePrimitive::tick(120.0, 240.5, 15.0, 1.0, Color::BLACK);

    assert_eq!((tick.x1, tick.x2), (120.0, 120.0));
    assert_eq!((tick.y1, tick.y2), (225.5, 255.5));
}

#[test]
fn invalid_primitives_fail_validation() {
    let mut renderer = NullRenderer::default();

    let bad_color = RenderFrame::new(Viewport::new(200, 100)).with_line(LinePrimitive::new(
        0.0,
        0.0,
        10.0,
        0.0,
        1.0,
        Color::rgba(1.5, 0.0, 0.0, 1.0),
    ));
    assert!(matches!(
        renderer.render(&bad_color),
        Err(TimelineError::InvalidData(_))
    ));

    let empty_text = RenderFrame::new(Viewport::new(200, 100))
        .with_text(TextPrimitive::new("", 0.0, 0.0, 14.0, Color::BLACK));
    assert!(renderer.render(&empty_text).is_err());

    let nan_line = RenderFrame::new(Viewport::new(200, 100))
        .with_line(LinePrimitive::new(f64::NAN, 0.0, 10.0, 0.0, 1.0, Color::BLACK));
    assert!(renderer.render(&nan_line).is_err());

    let empty_viewport = RenderFrame::new(Viewport::new(0, 100));
    assert!(empty_viewport.is_empty());
    assert!(renderer.render(&empty_viewport).is_err());

    assert_eq!(renderer.frames_rendered, 0);
}

#[test]
fn default_text_measure_scales_with_font_size() {
    let renderer = NullRenderer::default();

    let narrow = renderer.measure_text_width("3/10/2024", 10.0);
    let wide = renderer.measure_text_width("3/10/2024", 20.0);

    assert!(narrow > 0.0);
    assert_eq!(wide, 2.0 * narrow);
}
