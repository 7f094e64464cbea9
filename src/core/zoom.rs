use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::units::{
    MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_MONTH, MS_PER_WEEK, MS_PER_YEAR,
};
use crate::error::{TimelineError, TimelineResult};

/// Bounds of the zoom control (a slider in most hosts).
///
/// The logarithmic curve spans `min_control..=max_control` from one minute to
/// one year; `overshoot` extends the accepted input past `max_control` so the
/// top of the control keeps zooming out into multi-year spans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomConfig {
    pub min_control: f64,
    pub max_control: f64,
    pub overshoot: f64,
    /// Input quantization step. `0.0` disables snapping.
    pub step: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_control: 0.0,
            max_control: 100.0,
            overshoot: 80.0,
            step: 0.25,
        }
    }
}

impl ZoomConfig {
    pub fn validate(self) -> TimelineResult<Self> {
        if !self.min_control.is_finite()
            || !self.max_control.is_finite()
            || self.max_control <= self.min_control
        {
            return Err(TimelineError::InvalidData(
                "zoom control bounds must be finite with max > min".to_owned(),
            ));
        }
        if !self.overshoot.is_finite() || self.overshoot < 0.0 {
            return Err(TimelineError::InvalidData(
                "zoom overshoot must be finite and >= 0".to_owned(),
            ));
        }
        if !self.step.is_finite() || self.step < 0.0 {
            return Err(TimelineError::InvalidData(
                "zoom step must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Largest accepted control value.
    #[must_use]
    pub fn upper_control(self) -> f64 {
        self.max_control + self.overshoot
    }
}

/// Human-readable description of a visible range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RangeLabel {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl RangeLabel {
    /// Picks the coarsest unit whose boundary `range_ms` has reached.
    #[must_use]
    pub fn for_range_ms(range_ms: f64) -> Self {
        const LADDER: [(i64, RangeLabel); 6] = [
            (MS_PER_YEAR, RangeLabel::Years),
            (MS_PER_MONTH, RangeLabel::Months),
            (MS_PER_WEEK, RangeLabel::Weeks),
            (MS_PER_DAY, RangeLabel::Days),
            (MS_PER_HOUR, RangeLabel::Hours),
            (MS_PER_MINUTE, RangeLabel::Minutes),
        ];

        LADDER
            .iter()
            .find(|(boundary, _)| range_ms >= *boundary as f64)
            .map_or(Self::Seconds, |(_, label)| *label)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Seconds => "Seconds",
            Self::Minutes => "Minutes",
            Self::Hours => "Hours",
            Self::Days => "Days",
            Self::Weeks => "Weeks",
            Self::Months => "Months",
            Self::Years => "Years",
        }
    }
}

impl fmt::Display for RangeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one zoom control update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLevel {
    pub control_value: f64,
    pub range_ms: f64,
    pub label: RangeLabel,
}

/// Maps a bounded control input onto a visible time span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomController {
    config: ZoomConfig,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self {
            config: ZoomConfig::default(),
        }
    }
}

impl ZoomController {
    pub fn new(config: ZoomConfig) -> TimelineResult<Self> {
        Ok(Self {
            config: config.validate()?,
        })
    }

    #[must_use]
    pub fn config(self) -> ZoomConfig {
        self.config
    }

    /// Clamps (and snaps) a raw control value into the accepted range.
    ///
    /// Non-finite input falls back to `min_control`.
    #[must_use]
    pub fn clamp_control(self, control_value: f64) -> f64 {
        let ZoomConfig {
            min_control, step, ..
        } = self.config;
        let upper = self.config.upper_control();
        if !control_value.is_finite() {
            return min_control;
        }

        let clamped = control_value.clamp(min_control, upper);
        if step > 0.0 {
            let snapped = min_control + ((clamped - min_control) / step).round() * step;
            snapped.clamp(min_control, upper)
        } else {
            clamped
        }
    }

    /// Converts a control value into a visible span and its label.
    ///
    /// `range_ms = exp(ln(minute) + scale * (v - min))` with
    /// `scale = (ln(year) - ln(minute)) / (max - min)`. It is evaluated as
    /// `minute * exp(scale * (v - min))` so the floor of the curve is exactly
    /// one minute.
    #[must_use]
    pub fn range_for(self, control_value: f64) -> ZoomLevel {
        let control_value = self.clamp_control(control_value);
        let ZoomConfig {
            min_control,
            max_control,
            ..
        } = self.config;

        let min_out = (MS_PER_MINUTE as f64).ln();
        let max_out = (MS_PER_YEAR as f64).ln();
        let scale = (max_out - min_out) / (max_control - min_control);
        let range_ms = MS_PER_MINUTE as f64 * (scale * (control_value - min_control)).exp();

        ZoomLevel {
            control_value,
            range_ms,
            label: RangeLabel::for_range_ms(range_ms),
        }
    }
}
