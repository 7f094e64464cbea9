use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};
use crate::render::Color;

/// Visual style of the axis frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRenderStyle {
    pub axis_line_color: Color,
    pub tick_color: Color,
    pub text_color: Color,
    pub stroke_width: f64,
    pub font_size_px: f64,
    /// Distance between the axis line and the reference label rows.
    pub label_offset_px: f64,
    /// Extra gap between the caption row and the axis line.
    pub text_padding_px: f64,
}

impl Default for AxisRenderStyle {
    fn default() -> Self {
        Self {
            axis_line_color: Color::BLACK,
            tick_color: Color::BLACK,
            text_color: Color::BLACK,
            stroke_width: 1.0,
            font_size_px: 14.0,
            label_offset_px: 15.0,
            text_padding_px: 1.0,
        }
    }
}

impl AxisRenderStyle {
    pub fn validate(self) -> TimelineResult<Self> {
        self.axis_line_color.validate()?;
        self.tick_color.validate()?;
        self.text_color.validate()?;

        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(TimelineError::InvalidData(
                "axis stroke width must be finite and > 0".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(TimelineError::InvalidData(
                "axis font size must be finite and > 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("label offset", self.label_offset_px),
            ("text padding", self.text_padding_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TimelineError::InvalidData(format!(
                    "axis {name} must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}
