mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LinePrimitive, TextPrimitive};

use crate::error::TimelineResult;

/// Average glyph advance as a fraction of font size, used when a backend has
/// no text shaper.
pub const APPROX_GLYPH_WIDTH_RATIO: f64 = 0.6;

/// Contract implemented by drawing backends.
///
/// Backends receive a fully built `RenderFrame`; they never see axis or
/// calendar state.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> TimelineResult<()>;

    /// Width of `text` in pixels, used to right-align the future label.
    fn measure_text_width(&self, text: &str, font_size_px: f64) -> f64 {
        text.chars().count() as f64 * font_size_px * APPROX_GLYPH_WIDTH_RATIO
    }
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
