use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch.
pub type TimestampMs = i64;

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;
pub const MS_PER_WEEK: i64 = 7 * MS_PER_DAY;
/// Fixed-length month used for zoom math and spacing only (four weeks).
pub const MS_PER_MONTH: i64 = 4 * MS_PER_WEEK;
/// Fixed-length year used for zoom math and spacing only (twelve fixed months).
pub const MS_PER_YEAR: i64 = 12 * MS_PER_MONTH;

/// Kind of tick mark emitted by the planner.
///
/// The first six variants are calendar units; `Now` and `Boundary` are the
/// fixed reference marks drawn on every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Granularity {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
    Now,
    Boundary,
}

impl Granularity {
    pub const CALENDAR: [Self; 6] = [
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Year,
    ];

    /// Nominal length of one unit, `None` for reference marks.
    #[must_use]
    pub const fn unit_ms(self) -> Option<i64> {
        match self {
            Self::Minute => Some(MS_PER_MINUTE),
            Self::Hour => Some(MS_PER_HOUR),
            Self::Day => Some(MS_PER_DAY),
            Self::Week => Some(MS_PER_WEEK),
            Self::Month => Some(MS_PER_MONTH),
            Self::Year => Some(MS_PER_YEAR),
            Self::Now | Self::Boundary => None,
        }
    }

    #[must_use]
    pub const fn is_calendar(self) -> bool {
        self.unit_ms().is_some()
    }
}
