use std::fmt;

use chrono::TimeZone;
use serde::{Deserialize, Serialize};

use crate::core::axis::AxisWindow;
use crate::core::calendar::Calendar;
use crate::core::units::TimestampMs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceKind {
    Past,
    Now,
    Future,
}

impl ReferenceKind {
    #[must_use]
    pub const fn caption(self) -> &'static str {
        match self {
            Self::Past => "past",
            Self::Now => "now",
            Self::Future => "future",
        }
    }
}

/// Text block attached to one of the three reference ticks.
///
/// `x` is the left edge of the text. The future label is shifted left by its
/// measured date width so it ends at the right edge of the axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLabel {
    pub kind: ReferenceKind,
    pub time: TimestampMs,
    pub x: f64,
    pub caption: String,
    pub date_text: String,
    pub time_text: String,
}

/// Builds past/now/future labels for a sampled window.
///
/// `measure` returns the rendered width of a string in pixels. The now label
/// is omitted while "now" is panned outside the window.
pub fn reference_labels<Tz, M>(
    window: AxisWindow,
    calendar: &Calendar<Tz>,
    measure: M,
) -> Vec<ReferenceLabel>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
    M: Fn(&str) -> f64,
{
    let mut anchors = vec![(ReferenceKind::Past, window.start_time, window.start_x)];
    if window.contains_time(window.now_time) {
        anchors.push((ReferenceKind::Now, window.now_time, window.now_x));
    }
    anchors.push((ReferenceKind::Future, window.end_time, window.end_x));

    anchors
        .into_iter()
        .filter_map(|(kind, time, x)| {
            let date_text = calendar.format_date(time)?;
            let time_text = calendar.format_time(time)?;
            let x = match kind {
                ReferenceKind::Future => x - measure(&date_text),
                ReferenceKind::Past | ReferenceKind::Now => x,
            };
            Some(ReferenceLabel {
                kind,
                time,
                x,
                caption: kind.caption().to_owned(),
                date_text,
                time_text,
            })
        })
        .collect()
}
