pub mod axis;
pub mod calendar;
pub mod labels;
pub mod ticks;
pub mod types;
pub mod units;
pub mod zoom;

pub use axis::{AxisGeometry, AxisMapper, AxisWindow};
pub use calendar::Calendar;
pub use labels::{ReferenceKind, ReferenceLabel, reference_labels};
pub use ticks::{
    Legibility, LegibilityThresholds, TickHalfLengths, TickPlan, TickPlanner, TickPlannerConfig,
    TickSpec,
};
pub use types::Viewport;
pub use units::{
    Granularity, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_MONTH, MS_PER_SECOND, MS_PER_WEEK,
    MS_PER_YEAR, TimestampMs,
};
pub use zoom::{RangeLabel, ZoomConfig, ZoomController, ZoomLevel};
