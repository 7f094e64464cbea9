use crate::error::TimelineResult;
use crate::render::{RenderFrame, Renderer};

/// Headless renderer for tests and hosts without a drawing surface.
///
/// Frames are still validated, so invalid geometry fails here the same way it
/// would in a real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_line_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> TimelineResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_line_count = frame.lines.len();
        self.last_text_count = frame.texts.len();
        Ok(())
    }
}
