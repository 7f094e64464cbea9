use crate::core::Viewport;
use crate::render::{LinePrimitive, RenderFrame, TextPrimitive};

use super::{AxisRenderStyle, AxisSnapshot};

/// Vertical position of the axis line, shifted half a pixel for crisp 1px strokes.
pub(super) fn baseline_y(viewport: Viewport, baseline_ratio: f64) -> f64 {
    f64::from(viewport.height) * baseline_ratio + 0.5
}

/// Turns an axis snapshot into draw primitives.
///
/// Layout per reference label: caption above the axis line, date and time on
/// two rows below it.
pub(super) fn build_axis_frame(
    snapshot: &AxisSnapshot,
    viewport: Viewport,
    baseline_y: f64,
    style: AxisRenderStyle,
) -> RenderFrame {
    let mut frame = RenderFrame::new(viewport).with_line(LinePrimitive::new(
        0.0,
        baseline_y,
        f64::from(viewport.width),
        baseline_y,
        style.stroke_width,
        style.axis_line_color,
    ));

    frame.lines.extend(snapshot.ticks.iter().map(|tick| {
        LinePrimitive::tick(
            tick.x,
            baseline_y,
            tick.half_length,
            style.stroke_width,
            style.tick_color,
        )
    }));

    let caption_y = baseline_y - style.label_offset_px - style.text_padding_px;
    let date_y = baseline_y + style.label_offset_px;
    let time_y = date_y + style.font_size_px;
    for label in &snapshot.labels {
        let x = label.x.floor() + 0.5;
        for (text, y) in [
            (&label.caption, caption_y),
            (&label.date_text, date_y),
            (&label.time_text, time_y),
        ] {
            frame.texts.push(TextPrimitive::new(
                text.as_str(),
                x,
                y,
                style.font_size_px,
                style.text_color,
            ));
        }
    }

    frame
}
