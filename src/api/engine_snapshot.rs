use serde::{Deserialize, Serialize};

use crate::core::{Granularity, ReferenceLabel, TickSpec, TimestampMs, ZoomLevel};
use crate::error::{TimelineError, TimelineResult};

/// Immutable per-frame output handed to the renderer adapter.
///
/// Nothing in a snapshot survives into the next frame; hosts that want to
/// diff frames keep their own copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSnapshot {
    pub now_time: TimestampMs,
    pub now_x: f64,
    pub start_x: f64,
    pub end_x: f64,
    pub start_time: TimestampMs,
    pub end_time: TimestampMs,
    pub pixels_per_ms: f64,
    pub pan_offset_px: f64,
    pub zoom: ZoomLevel,
    pub ticks: Vec<TickSpec>,
    pub labels: Vec<ReferenceLabel>,
    pub truncated: bool,
}

impl AxisSnapshot {
    pub fn ticks_of(&self, granularity: Granularity) -> impl Iterator<Item = &TickSpec> + '_ {
        self.ticks
            .iter()
            .filter(move |tick| tick.granularity == granularity)
    }

    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TimelineError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| TimelineError::InvalidData(format!("failed to parse snapshot: {e}")))
    }
}
