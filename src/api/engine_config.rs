use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::core::{AxisMapper, TickPlannerConfig, Viewport, ZoomConfig};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::PanConfig;

use super::AxisRenderStyle;

/// Engine bootstrap configuration.
///
/// Serializable so hosts can keep the axis setup in a config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    pub viewport: Viewport,
    /// Inset of the drawable span from both canvas edges.
    #[serde(default = "default_border_px")]
    pub border_px: f64,
    /// Unpanned position of "now" as a fraction of canvas width.
    #[serde(default = "default_anchor_ratio")]
    pub anchor_ratio: f64,
    /// Axis line position as a fraction of canvas height.
    #[serde(default = "default_baseline_ratio")]
    pub baseline_ratio: f64,
    #[serde(default = "default_initial_control")]
    pub initial_control: f64,
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub pan: PanConfig,
    #[serde(default = "default_pan_limit_viewports")]
    pub pan_limit_viewports: f64,
    #[serde(default)]
    pub ticks: TickPlannerConfig,
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,
    #[serde(default)]
    pub style: AxisRenderStyle,
}

impl TimelineEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            border_px: default_border_px(),
            anchor_ratio: default_anchor_ratio(),
            baseline_ratio: default_baseline_ratio(),
            initial_control: default_initial_control(),
            zoom: ZoomConfig::default(),
            pan: PanConfig::default(),
            pan_limit_viewports: default_pan_limit_viewports(),
            ticks: TickPlannerConfig::default(),
            week_start: default_week_start(),
            style: AxisRenderStyle::default(),
        }
    }

    #[must_use]
    pub fn with_border_px(mut self, border_px: f64) -> Self {
        self.border_px = border_px;
        self
    }

    #[must_use]
    pub fn with_anchor_ratio(mut self, anchor_ratio: f64) -> Self {
        self.anchor_ratio = anchor_ratio;
        self
    }

    #[must_use]
    pub fn with_initial_control(mut self, control_value: f64) -> Self {
        self.initial_control = control_value;
        self
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: ZoomConfig) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_pan(mut self, pan: PanConfig) -> Self {
        self.pan = pan;
        self
    }

    #[must_use]
    pub fn with_ticks(mut self, ticks: TickPlannerConfig) -> Self {
        self.ticks = ticks;
        self
    }

    #[must_use]
    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: AxisRenderStyle) -> Self {
        self.style = style;
        self
    }

    /// Checks layout ratios; component configs are validated by their owners.
    pub fn validate(self) -> TimelineResult<Self> {
        if !self.viewport.is_valid() {
            return Err(TimelineError::InvalidData(format!(
                "viewport must be non-empty: {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if !self.border_px.is_finite() || self.border_px < 0.0 {
            return Err(TimelineError::InvalidData(
                "border must be finite and >= 0".to_owned(),
            ));
        }
        if !self.anchor_ratio.is_finite() {
            return Err(TimelineError::InvalidData(
                "anchor ratio must be finite".to_owned(),
            ));
        }
        if !self.baseline_ratio.is_finite() || !(0.0..=1.0).contains(&self.baseline_ratio) {
            return Err(TimelineError::InvalidData(
                "baseline ratio must be in [0, 1]".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(self) -> TimelineResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| TimelineError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| TimelineError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_border_px() -> f64 {
    40.0
}

fn default_anchor_ratio() -> f64 {
    1.0 / 8.0
}

fn default_baseline_ratio() -> f64 {
    4.0 / 5.0
}

fn default_initial_control() -> f64 {
    50.0
}

fn default_pan_limit_viewports() -> f64 {
    AxisMapper::DEFAULT_PAN_LIMIT_VIEWPORTS
}

fn default_week_start() -> Weekday {
    Weekday::Sun
}
