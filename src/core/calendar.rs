use std::fmt;

use chrono::{DateTime, Datelike, Local, LocalResult, Offset, TimeZone, Timelike, Utc, Weekday};

use crate::core::units::TimestampMs;

/// Calendar rules used to align and classify tick instants.
///
/// Alignment and predicates are evaluated on wall-clock time in `tz`.
/// Month and year boundaries follow the real calendar (first midnight of the
/// month, first midnight of January), not the fixed-length units used for
/// spacing.
#[derive(Debug, Clone)]
pub struct Calendar<Tz: TimeZone> {
    tz: Tz,
    week_start: Weekday,
}

impl Calendar<Local> {
    #[must_use]
    pub fn local() -> Self {
        Self::new(Local, Weekday::Sun)
    }
}

impl Calendar<Utc> {
    #[must_use]
    pub fn utc() -> Self {
        Self::new(Utc, Weekday::Sun)
    }
}

impl<Tz: TimeZone> Calendar<Tz> {
    #[must_use]
    pub fn new(tz: Tz, week_start: Weekday) -> Self {
        Self { tz, week_start }
    }

    #[must_use]
    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    #[must_use]
    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub fn set_week_start(&mut self, week_start: Weekday) {
        self.week_start = week_start;
    }

    /// Latest instant at or before `time` that is a whole multiple of
    /// `unit_ms` on the local clock.
    ///
    /// The wall-clock value is truncated first and then resolved back through
    /// the timezone, so the result carries its own UTC offset even when a DST
    /// transition lies between it and `time`. A repeated wall-clock time
    /// resolves to the later instant that is still not after `time`. A
    /// skipped one keeps the offset of `time`.
    #[must_use]
    pub fn latest_full(&self, time: TimestampMs, unit_ms: i64) -> TimestampMs {
        let offset_ms = self.offset_ms(time);
        let local = time.saturating_add(offset_ms);
        let floored = local.div_euclid(unit_ms) * unit_ms;
        let fallback = floored.saturating_sub(offset_ms);

        let Some(wall_clock) = DateTime::<Utc>::from_timestamp_millis(floored) else {
            return fallback;
        };
        match self.tz.from_local_datetime(&wall_clock.naive_utc()) {
            LocalResult::Single(resolved) => resolved.timestamp_millis(),
            LocalResult::Ambiguous(earlier, later) => {
                let later = later.timestamp_millis();
                if later <= time {
                    later
                } else {
                    earlier.timestamp_millis()
                }
            }
            LocalResult::None => fallback,
        }
    }

    #[must_use]
    pub fn is_full_day(&self, time: TimestampMs) -> bool {
        self.to_local(time).is_some_and(|local| is_midnight(&local))
    }

    #[must_use]
    pub fn is_full_week(&self, time: TimestampMs) -> bool {
        self.to_local(time)
            .is_some_and(|local| is_midnight(&local) && local.weekday() == self.week_start)
    }

    #[must_use]
    pub fn is_full_month(&self, time: TimestampMs) -> bool {
        self.to_local(time)
            .is_some_and(|local| is_midnight(&local) && local.day() == 1)
    }

    #[must_use]
    pub fn is_full_year(&self, time: TimestampMs) -> bool {
        self.to_local(time)
            .is_some_and(|local| is_midnight(&local) && local.day() == 1 && local.month() == 1)
    }

    fn to_local(&self, time: TimestampMs) -> Option<DateTime<Tz>> {
        DateTime::<Utc>::from_timestamp_millis(time).map(|utc| utc.with_timezone(&self.tz))
    }

    fn offset_ms(&self, time: TimestampMs) -> i64 {
        DateTime::<Utc>::from_timestamp_millis(time).map_or(0, |utc| {
            let offset = self.tz.offset_from_utc_datetime(&utc.naive_utc());
            i64::from(offset.fix().local_minus_utc()) * 1_000
        })
    }
}

impl<Tz: TimeZone> Calendar<Tz>
where
    Tz::Offset: fmt::Display,
{
    /// `M/D/YYYY` on the local clock.
    #[must_use]
    pub fn format_date(&self, time: TimestampMs) -> Option<String> {
        self.to_local(time)
            .map(|local| local.format("%-m/%-d/%Y").to_string())
    }

    /// `H:MM` on the local clock.
    #[must_use]
    pub fn format_time(&self, time: TimestampMs) -> Option<String> {
        self.to_local(time)
            .map(|local| local.format("%-H:%M").to_string())
    }
}

fn is_midnight<Tz: TimeZone>(local: &DateTime<Tz>) -> bool {
    local.num_seconds_from_midnight() == 0 && local.timestamp_subsec_millis() == 0
}
