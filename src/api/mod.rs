mod axis_frame_builder;
mod engine;
mod engine_config;
mod engine_snapshot;
mod render_style;

pub use engine::TimelineEngine;
pub use engine_config::TimelineEngineConfig;
pub use engine_snapshot::AxisSnapshot;
pub use render_style::AxisRenderStyle;
