use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Viewport;
use crate::core::units::TimestampMs;
use crate::error::{TimelineError, TimelineResult};

/// Pixel geometry of the drawable axis span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisGeometry {
    pub start_x: f64,
    pub end_x: f64,
    /// Unpanned pixel position of "now".
    pub anchor_x: f64,
}

impl AxisGeometry {
    #[must_use]
    pub const fn new(start_x: f64, end_x: f64, anchor_x: f64) -> Self {
        Self {
            start_x,
            end_x,
            anchor_x,
        }
    }

    /// Derives geometry from a canvas: the span is inset by `border_px` on
    /// both sides and "now" sits at `anchor_ratio` of the canvas width.
    #[must_use]
    pub fn from_viewport(viewport: Viewport, border_px: f64, anchor_ratio: f64) -> Self {
        let width = f64::from(viewport.width);
        Self {
            start_x: border_px,
            end_x: width - border_px,
            anchor_x: width * anchor_ratio,
        }
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        self.end_x - self.start_x
    }

    pub fn validate(self) -> TimelineResult<Self> {
        if !self.start_x.is_finite() || !self.end_x.is_finite() || self.end_x <= self.start_x {
            return Err(TimelineError::DegenerateViewport {
                start_x: self.start_x,
                end_x: self.end_x,
            });
        }
        if !self.anchor_x.is_finite() {
            return Err(TimelineError::InvalidData(
                "axis anchor must be finite".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Time/pixel mapping sampled at one instant.
///
/// Time is laid out linearly across `[start_x, end_x]`, anchored so that
/// `now_time` sits at `now_x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisWindow {
    pub now_time: TimestampMs,
    pub now_x: f64,
    pub start_x: f64,
    pub end_x: f64,
    pub start_time: TimestampMs,
    pub end_time: TimestampMs,
    pub range_ms: f64,
    pub pixels_per_ms: f64,
}

impl AxisWindow {
    #[must_use]
    pub fn width_px(self) -> f64 {
        self.end_x - self.start_x
    }

    /// Length of the sampled window; always `>= 1`.
    #[must_use]
    pub fn span_ms(self) -> f64 {
        (self.end_time - self.start_time) as f64
    }

    #[must_use]
    pub fn time_to_x(self, time_ms: f64) -> f64 {
        self.width_px() * (time_ms - self.start_time as f64) / self.span_ms() + self.start_x
    }

    #[must_use]
    pub fn x_to_time(self, x: f64) -> f64 {
        self.start_time as f64 + (x - self.start_x) / self.width_px() * self.span_ms()
    }

    /// Pixel distance between two instants `unit_ms` apart.
    #[must_use]
    pub fn spacing_px(self, unit_ms: i64) -> f64 {
        self.width_px() * unit_ms as f64 / self.span_ms()
    }

    #[must_use]
    pub fn contains_time(self, time: TimestampMs) -> bool {
        (self.start_time..=self.end_time).contains(&time)
    }
}

/// Owns the axis state: geometry, visible range and pan offset.
///
/// Every mutation validates before it writes, so a rejected call leaves the
/// previous state untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisMapper {
    geometry: AxisGeometry,
    range_ms: f64,
    pan_offset_px: f64,
    pan_limit_viewports: f64,
    window: Option<AxisWindow>,
}

impl AxisMapper {
    pub const DEFAULT_PAN_LIMIT_VIEWPORTS: f64 = 4.0;

    pub fn new(geometry: AxisGeometry, range_ms: f64) -> TimelineResult<Self> {
        Ok(Self {
            geometry: geometry.validate()?,
            range_ms: validate_range(range_ms)?,
            pan_offset_px: 0.0,
            pan_limit_viewports: Self::DEFAULT_PAN_LIMIT_VIEWPORTS,
            window: None,
        })
    }

    #[must_use]
    pub fn geometry(&self) -> AxisGeometry {
        self.geometry
    }

    #[must_use]
    pub fn range_ms(&self) -> f64 {
        self.range_ms
    }

    #[must_use]
    pub fn pan_offset_px(&self) -> f64 {
        self.pan_offset_px
    }

    #[must_use]
    pub fn now_x(&self) -> f64 {
        self.geometry.anchor_x + self.pan_offset_px
    }

    #[must_use]
    pub fn pixels_per_ms(&self) -> f64 {
        self.geometry.width_px() / self.range_ms
    }

    /// Last sampled window, cleared by any mutation.
    #[must_use]
    pub fn window(&self) -> Option<AxisWindow> {
        self.window
    }

    /// Limits how far "now" may be panned outside `[start_x, end_x]`,
    /// measured in axis widths.
    pub fn set_pan_limit_viewports(&mut self, limit: f64) -> TimelineResult<()> {
        if !limit.is_finite() || limit < 0.0 {
            return Err(TimelineError::InvalidData(
                "pan limit must be finite and >= 0".to_owned(),
            ));
        }
        self.pan_limit_viewports = limit;
        self.pan_offset_px = self.clamp_pan(self.pan_offset_px);
        self.window = None;
        Ok(())
    }

    pub fn set_bounds(&mut self, start_x: f64, end_x: f64, anchor_x: f64) -> TimelineResult<()> {
        self.set_geometry(AxisGeometry::new(start_x, end_x, anchor_x))
    }

    pub fn set_geometry(&mut self, geometry: AxisGeometry) -> TimelineResult<()> {
        self.geometry = geometry.validate()?;
        self.pan_offset_px = self.clamp_pan(self.pan_offset_px);
        self.window = None;
        debug!(
            start_x = geometry.start_x,
            end_x = geometry.end_x,
            anchor_x = geometry.anchor_x,
            "set axis bounds"
        );
        Ok(())
    }

    pub fn set_range(&mut self, range_ms: f64) -> TimelineResult<()> {
        self.range_ms = validate_range(range_ms)?;
        self.window = None;
        debug!(range_ms, "set axis range");
        Ok(())
    }

    /// Replaces the pan offset and returns the value actually applied.
    pub fn set_pan(&mut self, pan_offset_px: f64) -> TimelineResult<f64> {
        if !pan_offset_px.is_finite() {
            return Err(TimelineError::InvalidData(
                "pan offset must be finite".to_owned(),
            ));
        }
        self.pan_offset_px = self.clamp_pan(pan_offset_px);
        self.window = None;
        Ok(self.pan_offset_px)
    }

    pub fn pan_by(&mut self, delta_px: f64) -> TimelineResult<f64> {
        self.set_pan(self.pan_offset_px + delta_px)
    }

    /// Samples the mapping at `now`.
    pub fn tick(&mut self, now: TimestampMs) -> AxisWindow {
        let AxisGeometry {
            start_x, end_x, ..
        } = self.geometry;
        let now_x = self.now_x();
        let total_px = end_x - start_x;

        let past_ms = ((now_x - start_x) / total_px * self.range_ms).floor() as i64;
        let future_ms = (self.range_ms / total_px * (end_x - now_x)).floor() as i64;
        let mut start_time = now.saturating_sub(past_ms);
        let mut end_time = now.saturating_add(future_ms);
        // Small ranges floor to zero on either side; keep "now" strictly
        // inside whenever its pixel is.
        if now_x > start_x {
            start_time = start_time.min(now.saturating_sub(1));
        }
        if now_x < end_x {
            end_time = end_time.max(now.saturating_add(1));
        }
        let end_time = end_time.max(start_time.saturating_add(1));

        let window = AxisWindow {
            now_time: now,
            now_x,
            start_x,
            end_x,
            start_time,
            end_time,
            range_ms: self.range_ms,
            pixels_per_ms: total_px / self.range_ms,
        };
        self.window = Some(window);
        window
    }

    pub fn time_to_x(&self, time_ms: f64) -> TimelineResult<f64> {
        self.sampled().map(|window| window.time_to_x(time_ms))
    }

    pub fn x_to_time(&self, x: f64) -> TimelineResult<f64> {
        self.sampled().map(|window| window.x_to_time(x))
    }

    fn sampled(&self) -> TimelineResult<AxisWindow> {
        self.window.ok_or(TimelineError::FrameNotSampled)
    }

    fn clamp_pan(&self, pan_offset_px: f64) -> f64 {
        let AxisGeometry {
            start_x,
            end_x,
            anchor_x,
        } = self.geometry;
        let slack = self.geometry.width_px() * self.pan_limit_viewports;
        let min = start_x - slack - anchor_x;
        let max = end_x + slack - anchor_x;
        pan_offset_px.clamp(min, max)
    }
}

fn validate_range(range_ms: f64) -> TimelineResult<f64> {
    if !range_ms.is_finite() || range_ms <= 0.0 {
        return Err(TimelineError::InvalidRange { range_ms });
    }
    Ok(range_ms)
}
