use std::fmt;
use std::time::Duration;

use chrono::{Local, TimeZone, Utc};
use tracing::{debug, trace, warn};

use crate::core::{
    AxisGeometry, AxisMapper, Calendar, TickPlanner, TimestampMs, Viewport, ZoomController,
    ZoomLevel, reference_labels,
};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::{PanController, PanDirection, PanState};
use crate::render::{RenderFrame, Renderer};

use super::axis_frame_builder::{baseline_y, build_axis_frame};
use super::{AxisRenderStyle, AxisSnapshot, TimelineEngineConfig};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Facade consumed by the presentation layer.
///
/// One engine owns the full state of one axis. Inbound events (`on_resize`,
/// `on_zoom_changed`, `on_pan_held`, `on_pan_released`, `on_frame`) mutate it;
/// every frame produces a fresh `AxisSnapshot`.
pub struct TimelineEngine<R: Renderer, Tz: TimeZone = Local> {
    renderer: R,
    config: TimelineEngineConfig,
    viewport: Viewport,
    calendar: Calendar<Tz>,
    zoom: ZoomController,
    zoom_level: ZoomLevel,
    axis: AxisMapper,
    planner: TickPlanner,
    pan: PanController,
    style: AxisRenderStyle,
}

impl<R: Renderer> TimelineEngine<R, Local> {
    /// Creates an engine on the host's local clock.
    pub fn new(renderer: R, config: TimelineEngineConfig) -> TimelineResult<Self> {
        Self::with_timezone(renderer, config, Local)
    }
}

impl<R: Renderer, Tz: TimeZone> TimelineEngine<R, Tz>
where
    Tz::Offset: fmt::Display,
{
    pub fn with_timezone(
        renderer: R,
        config: TimelineEngineConfig,
        timezone: Tz,
    ) -> TimelineResult<Self> {
        let config = config.validate()?;
        let zoom = ZoomController::new(config.zoom)?;
        let zoom_level = zoom.range_for(config.initial_control);
        let geometry =
            AxisGeometry::from_viewport(config.viewport, config.border_px, config.anchor_ratio);
        let mut axis = AxisMapper::new(geometry, zoom_level.range_ms)?;
        axis.set_pan_limit_viewports(config.pan_limit_viewports)?;

        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            range_ms = zoom_level.range_ms,
            "timeline engine initialized"
        );

        Ok(Self {
            renderer,
            viewport: config.viewport,
            calendar: Calendar::new(timezone, config.week_start),
            zoom,
            zoom_level,
            axis,
            planner: TickPlanner::new(config.ticks)?,
            pan: PanController::new(config.pan)?,
            style: config.style.validate()?,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> TimelineEngineConfig {
        self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn axis(&self) -> &AxisMapper {
        &self.axis
    }

    #[must_use]
    pub fn calendar(&self) -> &Calendar<Tz> {
        &self.calendar
    }

    #[must_use]
    pub fn zoom_level(&self) -> ZoomLevel {
        self.zoom_level
    }

    #[must_use]
    pub fn pan_state(&self) -> PanState {
        self.pan.state()
    }

    #[must_use]
    pub fn render_style(&self) -> AxisRenderStyle {
        self.style
    }

    pub fn set_render_style(&mut self, style: AxisRenderStyle) -> TimelineResult<()> {
        self.style = style.validate()?;
        Ok(())
    }

    /// Replaces the axis pixel geometry.
    pub fn on_resize(&mut self, start_x: f64, end_x: f64, anchor_x: f64) -> TimelineResult<()> {
        self.axis
            .set_bounds(start_x, end_x, anchor_x)
            .inspect_err(|err| warn!(error = %err, "rejected axis bounds"))
    }

    /// Re-derives axis geometry from a new canvas size.
    pub fn on_canvas_resized(&mut self, viewport: Viewport) -> TimelineResult<()> {
        if !viewport.is_valid() {
            return Err(TimelineError::InvalidData(format!(
                "viewport must be non-empty: {}x{}",
                viewport.width, viewport.height
            )));
        }
        let geometry =
            AxisGeometry::from_viewport(viewport, self.config.border_px, self.config.anchor_ratio);
        self.axis
            .set_geometry(geometry)
            .inspect_err(|err| warn!(error = %err, "rejected canvas resize"))?;
        self.viewport = viewport;
        Ok(())
    }

    pub fn on_zoom_changed(&mut self, control_value: f64) -> TimelineResult<ZoomLevel> {
        let level = self.zoom.range_for(control_value);
        self.axis.set_range(level.range_ms)?;
        self.zoom_level = level;
        debug!(
            control_value = level.control_value,
            label = %level.label,
            "zoom changed"
        );
        Ok(level)
    }

    pub fn on_pan_held(&mut self, direction: PanDirection) {
        self.pan.start(direction);
    }

    pub fn on_pan_released(&mut self) {
        self.pan.stop();
    }

    /// Feeds elapsed time to the pan timer and applies its output.
    ///
    /// Returns the pan offset after the update.
    pub fn advance_pan(&mut self, elapsed: Duration) -> TimelineResult<f64> {
        let step = self.pan.advance(elapsed);
        if step.fires == 0 {
            return Ok(self.axis.pan_offset_px());
        }
        let applied = self.axis.pan_by(step.delta_px)?;
        trace!(fires = step.fires, pan_offset_px = applied, "pan advanced");
        Ok(applied)
    }

    /// Samples the axis at `now` and plans this frame's ticks and labels.
    pub fn on_frame(&mut self, now: TimestampMs) -> AxisSnapshot {
        let window = self.axis.tick(now);
        let plan = self.planner.plan(window, &self.calendar);
        let font_size_px = self.style.font_size_px;
        let renderer = &self.renderer;
        let labels = reference_labels(window, &self.calendar, |text| {
            renderer.measure_text_width(text, font_size_px)
        });

        AxisSnapshot {
            now_time: window.now_time,
            now_x: window.now_x,
            start_x: window.start_x,
            end_x: window.end_x,
            start_time: window.start_time,
            end_time: window.end_time,
            pixels_per_ms: window.pixels_per_ms,
            pan_offset_px: self.axis.pan_offset_px(),
            zoom: self.zoom_level,
            ticks: plan.ticks,
            labels,
            truncated: plan.truncated,
        }
    }

    /// Same as [`Self::on_frame`] using the system clock.
    pub fn on_frame_now(&mut self) -> AxisSnapshot {
        self.on_frame(Utc::now().timestamp_millis())
    }

    #[must_use]
    pub fn build_render_frame(&self, snapshot: &AxisSnapshot) -> RenderFrame {
        build_axis_frame(
            snapshot,
            self.viewport,
            baseline_y(self.viewport, self.config.baseline_ratio),
            self.style,
        )
    }

    /// Runs one full frame: sample, plan, build and draw.
    pub fn render(&mut self, now: TimestampMs) -> TimelineResult<AxisSnapshot> {
        let snapshot = self.on_frame(now);
        let frame = self.build_render_frame(&snapshot);
        self.renderer.render(&frame)?;
        Ok(snapshot)
    }

    /// Draws one frame into a Cairo context owned by the host.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(
        &mut self,
        context: &cairo::Context,
        now: TimestampMs,
    ) -> TimelineResult<AxisSnapshot>
    where
        R: CairoContextRenderer,
    {
        let snapshot = self.on_frame(now);
        let frame = self.build_render_frame(&snapshot);
        self.renderer.render_on_cairo_context(context, &frame)?;
        Ok(snapshot)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
