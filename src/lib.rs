//! timeline-rs: a zoomable, pannable time axis engine.
//!
//! The engine maps wall-clock time onto a horizontal pixel span anchored at
//! "now". A logarithmic zoom control picks the visible range; within a frame
//! time is laid out linearly. Tick marks are placed on full minutes, hours,
//! days, weeks, months and years, choosing only granularities that are
//! legible at the current zoom.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{TimelineEngine, TimelineEngineConfig};
pub use error::{TimelineError, TimelineResult};
