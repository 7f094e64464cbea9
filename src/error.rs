use thiserror::Error;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimelineError {
    #[error("degenerate viewport: start_x={start_x}, end_x={end_x}")]
    DegenerateViewport { start_x: f64, end_x: f64 },

    #[error("invalid range: range_ms={range_ms} must be finite and > 0")]
    InvalidRange { range_ms: f64 },

    #[error("axis has not been sampled yet; call `tick` first")]
    FrameNotSampled,

    #[error("invalid data: {0}")]
    InvalidData(String),
}
