use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TimelineError, TimelineResult};

/// Direction of a held pan gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanDirection {
    /// Increases the pan offset; the view moves toward the future.
    Forward,
    /// Decreases the pan offset.
    Backward,
}

impl PanDirection {
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanState {
    Idle,
    Emitting(PanDirection),
}

/// Repeat timer settings for press-and-hold panning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanConfig {
    pub step_px: f64,
    pub interval_ms: u64,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            step_px: 2.0,
            interval_ms: 30,
        }
    }
}

impl PanConfig {
    pub fn validate(self) -> TimelineResult<Self> {
        if !self.step_px.is_finite() || self.step_px <= 0.0 {
            return Err(TimelineError::InvalidData(
                "pan step must be finite and > 0".to_owned(),
            ));
        }
        if self.interval_ms == 0 {
            return Err(TimelineError::InvalidData(
                "pan interval must be > 0 ms".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn interval(self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Pixel displacement produced by one `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanStep {
    pub fires: u64,
    pub delta_px: f64,
}

/// Level-triggered repeat timer: while a gesture is held, every elapsed
/// interval emits one signed `step_px`.
///
/// The controller does not own a clock. The host reports elapsed time and
/// applies the returned delta to the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanController {
    config: PanConfig,
    state: PanState,
    carry: Duration,
}

impl Default for PanController {
    fn default() -> Self {
        Self {
            config: PanConfig::default(),
            state: PanState::Idle,
            carry: Duration::ZERO,
        }
    }
}

impl PanController {
    pub fn new(config: PanConfig) -> TimelineResult<Self> {
        Ok(Self {
            config: config.validate()?,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn config(self) -> PanConfig {
        self.config
    }

    #[must_use]
    pub fn state(self) -> PanState {
        self.state
    }

    #[must_use]
    pub fn is_emitting(self) -> bool {
        matches!(self.state, PanState::Emitting(_))
    }

    /// Starts emitting in `direction`, cancelling any gesture in progress.
    pub fn start(&mut self, direction: PanDirection) {
        self.carry = Duration::ZERO;
        self.state = PanState::Emitting(direction);
        debug!(direction = ?direction, "pan gesture started");
    }

    pub fn stop(&mut self) {
        if self.is_emitting() {
            debug!("pan gesture stopped");
        }
        self.carry = Duration::ZERO;
        self.state = PanState::Idle;
    }

    /// Advances the timer by `elapsed` and returns the accumulated delta.
    pub fn advance(&mut self, elapsed: Duration) -> PanStep {
        let PanState::Emitting(direction) = self.state else {
            return PanStep::default();
        };

        let interval = self.config.interval();
        self.carry = self.carry.saturating_add(elapsed);
        let fires =
            u64::try_from(self.carry.as_nanos() / interval.as_nanos()).unwrap_or(u64::MAX);
        if fires == 0 {
            return PanStep::default();
        }
        self.carry = Duration::from_nanos((self.carry.as_nanos() % interval.as_nanos()) as u64);

        PanStep {
            fires,
            delta_px: direction.sign() * self.config.step_px * fires as f64,
        }
    }
}
