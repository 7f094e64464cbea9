use chrono::TimeZone;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::core::axis::AxisWindow;
use crate::core::calendar::Calendar;
use crate::core::units::{Granularity, MS_PER_MINUTE, TimestampMs};
use crate::error::{TimelineError, TimelineResult};

/// Minimum pixel spacing for a granularity to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegibilityThresholds {
    pub minute: f64,
    pub hour: f64,
    pub day: f64,
    pub week: f64,
    pub month: f64,
    pub year: f64,
}

impl Default for LegibilityThresholds {
    fn default() -> Self {
        Self {
            minute: 10.0,
            hour: 10.0,
            day: 10.0,
            week: 12.0,
            month: 14.0,
            year: 16.0,
        }
    }
}

impl LegibilityThresholds {
    #[must_use]
    pub fn for_granularity(self, granularity: Granularity) -> Option<f64> {
        match granularity {
            Granularity::Minute => Some(self.minute),
            Granularity::Hour => Some(self.hour),
            Granularity::Day => Some(self.day),
            Granularity::Week => Some(self.week),
            Granularity::Month => Some(self.month),
            Granularity::Year => Some(self.year),
            Granularity::Now | Granularity::Boundary => None,
        }
    }

    pub fn validate(self) -> TimelineResult<Self> {
        for granularity in Granularity::CALENDAR {
            let value = self.for_granularity(granularity).unwrap_or(0.0);
            if !value.is_finite() || value <= 0.0 {
                return Err(TimelineError::InvalidData(format!(
                    "legibility threshold for {granularity:?} must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Visual half-height of each tick kind, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickHalfLengths {
    pub now: f64,
    pub boundary: f64,
    pub minute: f64,
    pub hour: f64,
    pub day: f64,
    pub week: f64,
    pub month: f64,
    pub year: f64,
}

impl Default for TickHalfLengths {
    fn default() -> Self {
        Self {
            now: 15.0,
            boundary: 15.0,
            minute: 5.0,
            hour: 10.0,
            day: 15.0,
            week: 20.0,
            month: 25.0,
            year: 30.0,
        }
    }
}

impl TickHalfLengths {
    #[must_use]
    pub fn for_granularity(self, granularity: Granularity) -> f64 {
        match granularity {
            Granularity::Minute => self.minute,
            Granularity::Hour => self.hour,
            Granularity::Day => self.day,
            Granularity::Week => self.week,
            Granularity::Month => self.month,
            Granularity::Year => self.year,
            Granularity::Now => self.now,
            Granularity::Boundary => self.boundary,
        }
    }

    pub fn validate(self) -> TimelineResult<Self> {
        let all = [
            self.now,
            self.boundary,
            self.minute,
            self.hour,
            self.day,
            self.week,
            self.month,
            self.year,
        ];
        if all.iter().any(|value| !value.is_finite() || *value < 0.0) {
            return Err(TimelineError::InvalidData(
                "tick half lengths must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickPlannerConfig {
    pub thresholds: LegibilityThresholds,
    pub half_lengths: TickHalfLengths,
    /// Upper bound on stepped instants visited per plan, across all walks.
    pub max_walk_steps: usize,
}

impl Default for TickPlannerConfig {
    fn default() -> Self {
        Self {
            thresholds: LegibilityThresholds::default(),
            half_lengths: TickHalfLengths::default(),
            max_walk_steps: 4_096,
        }
    }
}

impl TickPlannerConfig {
    pub fn validate(self) -> TimelineResult<Self> {
        self.thresholds.validate()?;
        self.half_lengths.validate()?;
        if self.max_walk_steps == 0 {
            return Err(TimelineError::InvalidData(
                "max walk steps must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// One tick mark to draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickSpec {
    pub time: TimestampMs,
    pub x: f64,
    pub granularity: Granularity,
    pub half_length: f64,
}

/// Calendar granularities whose spacing clears their threshold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Legibility {
    legible: SmallVec<[Granularity; 6]>,
}

impl Legibility {
    #[must_use]
    pub fn contains(&self, granularity: Granularity) -> bool {
        self.legible.contains(&granularity)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Granularity] {
        &self.legible
    }

    /// Granularity stepped by the main backward walk: hour when legible,
    /// otherwise day, otherwise nothing.
    #[must_use]
    pub fn primary(&self) -> Option<Granularity> {
        [Granularity::Hour, Granularity::Day]
            .into_iter()
            .find(|granularity| self.contains(*granularity))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickPlan {
    pub ticks: Vec<TickSpec>,
    pub legibility: Legibility,
    pub primary: Option<Granularity>,
    /// Stepped instants visited by the walks.
    pub steps: usize,
    /// Set when a walk hit `max_walk_steps` before reaching the window start.
    pub truncated: bool,
}

impl TickPlan {
    pub fn ticks_of(&self, granularity: Granularity) -> impl Iterator<Item = &TickSpec> + '_ {
        self.ticks
            .iter()
            .filter(move |tick| tick.granularity == granularity)
    }
}

/// Chooses legible granularities and enumerates calendar-aligned ticks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickPlanner {
    config: TickPlannerConfig,
}

impl TickPlanner {
    pub fn new(config: TickPlannerConfig) -> TimelineResult<Self> {
        Ok(Self {
            config: config.validate()?,
        })
    }

    #[must_use]
    pub fn config(self) -> TickPlannerConfig {
        self.config
    }

    #[must_use]
    pub fn legibility(self, window: AxisWindow) -> Legibility {
        let thresholds = self.config.thresholds;
        let clears = |granularity: Granularity| {
            match (
                granularity.unit_ms(),
                thresholds.for_granularity(granularity),
            ) {
                (Some(unit_ms), Some(min_px)) => window.spacing_px(unit_ms) >= min_px,
                _ => false,
            }
        };

        let mut legible = SmallVec::new();
        let hour = clears(Granularity::Hour);
        // Minutes refine an hour-scale view; they never stand alone.
        if hour && clears(Granularity::Minute) {
            legible.push(Granularity::Minute);
        }
        if hour {
            legible.push(Granularity::Hour);
        }
        for granularity in [
            Granularity::Day,
            Granularity::Week,
            Granularity::Month,
            Granularity::Year,
        ] {
            if clears(granularity) {
                legible.push(granularity);
            }
        }

        Legibility { legible }
    }

    /// Builds the tick list for one sampled frame.
    ///
    /// Order: start boundary, now (when inside the window), end boundary,
    /// then the primary walk from newest to oldest with calendar ticks
    /// attached to their instant, then the minute walk.
    pub fn plan<Tz: TimeZone>(self, window: AxisWindow, calendar: &Calendar<Tz>) -> TickPlan {
        let legibility = self.legibility(window);
        let primary = legibility.primary();
        let mut walk = Walk {
            planner: self,
            window,
            ticks: Vec::new(),
            steps: 0,
            truncated: false,
        };

        walk.push(window.start_time, window.start_x, Granularity::Boundary);
        if window.contains_time(window.now_time) {
            walk.push(window.now_time, window.now_x, Granularity::Now);
        }
        walk.push(window.end_time, window.end_x, Granularity::Boundary);

        if let Some(primary) = primary {
            walk.primary(primary, &legibility, calendar);
        }
        if legibility.contains(Granularity::Minute) {
            walk.minutes(calendar);
        }

        let Walk {
            ticks,
            steps,
            truncated,
            ..
        } = walk;

        trace!(
            ticks = ticks.len(),
            steps,
            truncated,
            primary = ?primary,
            "planned axis ticks"
        );

        TickPlan {
            ticks,
            legibility,
            primary,
            steps,
            truncated,
        }
    }
}

struct Walk {
    planner: TickPlanner,
    window: AxisWindow,
    ticks: Vec<TickSpec>,
    steps: usize,
    truncated: bool,
}

impl Walk {
    fn push(&mut self, time: TimestampMs, x: f64, granularity: Granularity) {
        self.ticks.push(TickSpec {
            time,
            x,
            granularity,
            half_length: self
                .planner
                .config
                .half_lengths
                .for_granularity(granularity),
        });
    }

    /// Consumes one unit of the step budget; `false` once it is exhausted.
    fn take_step(&mut self, granularity: Granularity) -> bool {
        if self.steps >= self.planner.config.max_walk_steps {
            if !self.truncated {
                warn!(
                    granularity = ?granularity,
                    max_walk_steps = self.planner.config.max_walk_steps,
                    start_time = self.window.start_time,
                    end_time = self.window.end_time,
                    "tick walk truncated by step bound"
                );
            }
            self.truncated = true;
            return false;
        }
        self.steps += 1;
        true
    }

    fn primary<Tz: TimeZone>(
        &mut self,
        primary: Granularity,
        legibility: &Legibility,
        calendar: &Calendar<Tz>,
    ) {
        let Some(unit_ms) = primary.unit_ms() else {
            return;
        };
        let mut time = calendar.latest_full(self.window.end_time, unit_ms);

        while time >= self.window.start_time {
            if !self.take_step(primary) {
                break;
            }
            let x = self.window.time_to_x(time as f64);
            self.push(time, x, primary);

            if primary == Granularity::Hour
                && legibility.contains(Granularity::Day)
                && calendar.is_full_day(time)
            {
                self.push(time, x, Granularity::Day);
            }
            if legibility.contains(Granularity::Week) && calendar.is_full_week(time) {
                self.push(time, x, Granularity::Week);
            }
            if legibility.contains(Granularity::Month) && calendar.is_full_month(time) {
                self.push(time, x, Granularity::Month);
            }
            if legibility.contains(Granularity::Year) && calendar.is_full_year(time) {
                self.push(time, x, Granularity::Year);
            }

            // Re-align from the previous instant; a fixed stride drifts off
            // full local instants across a DST change.
            time = calendar.latest_full(time - 1, unit_ms);
        }
    }

    fn minutes<Tz: TimeZone>(&mut self, calendar: &Calendar<Tz>) {
        let mut time = calendar.latest_full(self.window.end_time, MS_PER_MINUTE);

        while time >= self.window.start_time {
            if !self.take_step(Granularity::Minute) {
                break;
            }
            let x = self.window.time_to_x(time as f64);
            self.push(time, x, Granularity::Minute);
            time = calendar.latest_full(time - 1, MS_PER_MINUTE);
        }
    }
}
