//! Mutable aircraft state and the per-tick update steps.
//!
//! Each update reads state written by the steps before it, so
//! [`FlightState::advance`] must run them in order: tick, phase, flight
//! parameters, engine status, vibration.

use std::time::Duration;

use crate::random::RandomSource;

/// Ticks `1..=TRAINING_TICKS` belong to the training phase.
pub const TRAINING_TICKS: u64 = 120;

/// Pause taken after every testing-phase tick.
pub const TESTING_TICK_DELAY: Duration = Duration::from_millis(500);

const INITIAL_ALTITUDE_FEET: f64 = 1000.0;
const INITIAL_AIRSPEED_KNOTS: f64 = 250.0;
const INITIAL_PITCH_DEGREES: f64 = 2.0;
const INITIAL_VIBRATION_G: f64 = 2.5;

/// Altitude gained per tick at 90 degrees of pitch.
const CLIMB_FEET_PER_TICK: f64 = 10.0;

/// Odds of an engine failure on a testing tick (1 in N).
const FAILURE_ODDS: u32 = 20;
/// Odds of a failure clearing on a testing tick (1 in N).
const RECOVERY_ODDS: u32 = 10;

/// Simulation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Engine failures suppressed, ticks run back to back.
    Training,
    /// Engine failures possible, ticks paced by [`TESTING_TICK_DELAY`].
    Testing,
}

impl Phase {
    /// Phase for the given tick number.
    #[must_use]
    pub fn for_tick(tick: u64) -> Self {
        if tick <= TRAINING_TICKS {
            Self::Training
        } else {
            Self::Testing
        }
    }

    /// Delay to take after a tick in this phase.
    #[must_use]
    pub fn tick_delay(self) -> Duration {
        match self {
            Self::Training => Duration::ZERO,
            Self::Testing => TESTING_TICK_DELAY,
        }
    }

    /// Console tag for this phase.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Training => "[TRAINING]",
            Self::Testing => "[TESTING]",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Training => write!(f, "training"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// State of the single simulated aircraft.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightState {
    /// Altitude in feet, accumulated tick over tick.
    pub altitude_feet: f64,
    /// Airspeed in knots.
    pub airspeed_knots: f64,
    /// Pitch in degrees.
    pub pitch_degrees: f64,
    /// Airframe vibration in g.
    pub vibration_g: f64,
    /// Sticky engine failure flag.
    pub engine_failure: bool,
    /// True while the tick count is within the training window.
    pub training_phase_active: bool,
    /// Number of ticks run so far.
    pub tick_count: u64,
}

impl Default for FlightState {
    fn default() -> Self {
        Self {
            altitude_feet: INITIAL_ALTITUDE_FEET,
            airspeed_knots: INITIAL_AIRSPEED_KNOTS,
            pitch_degrees: INITIAL_PITCH_DEGREES,
            vibration_g: INITIAL_VIBRATION_G,
            engine_failure: false,
            training_phase_active: true,
            tick_count: 0,
        }
    }
}

impl FlightState {
    /// Current phase, as set by the last phase update.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.training_phase_active {
            Phase::Training
        } else {
            Phase::Testing
        }
    }

    /// Run every update step for one tick.
    pub fn advance(&mut self, rng: &mut impl RandomSource) {
        self.tick_count += 1;
        self.update_phase();
        self.update_flight_parameters();
        self.update_engine_status(rng);
        self.update_vibration(rng);
    }

    /// Derive the phase from the tick count. Training clears any failure.
    pub fn update_phase(&mut self) {
        self.training_phase_active = Phase::for_tick(self.tick_count) == Phase::Training;
        if self.training_phase_active {
            self.engine_failure = false;
        }
    }

    /// Update altitude from the previous pitch, then recompute airspeed and
    /// pitch for this tick.
    pub fn update_flight_parameters(&mut self) {
        let previous_pitch = self.pitch_degrees;
        self.altitude_feet += CLIMB_FEET_PER_TICK * previous_pitch.to_radians().sin();

        let tick = self.tick_count;
        if self.engine_failure {
            self.airspeed_knots = 150.0 + 20.0 * cycle(tick, 5).sin();
            self.pitch_degrees = 15.0 * cycle(tick, 3).sin();
        } else {
            self.airspeed_knots = 250.0 + 30.0 * cycle(tick, 8).cos();
            self.pitch_degrees = 2.0 + 5.0 * cycle(tick, 7).cos();
        }
    }

    /// Randomly set or clear the failure flag. No-op during training.
    ///
    /// The two draws are independent: a failure set on this tick can be
    /// cleared again by the second draw.
    pub fn update_engine_status(&mut self, rng: &mut impl RandomSource) {
        if self.training_phase_active {
            return;
        }
        if rng.below(FAILURE_ODDS) == 0 {
            self.engine_failure = true;
        }
        if rng.below(RECOVERY_ODDS) == 0 {
            self.engine_failure = false;
        }
    }

    /// Draw vibration: `[5.0, 10.0]` on failure, `[2.5, 3.5]` otherwise.
    pub fn update_vibration(&mut self, rng: &mut impl RandomSource) {
        let draw = rng.unit();
        self.vibration_g = if self.engine_failure {
            5.0 + draw * 5.0
        } else {
            2.5 + draw
        };
    }
}

/// Position of `tick` within a cycle of `period` ticks, used as an angle in
/// radians.
#[allow(clippy::cast_precision_loss)]
fn cycle(tick: u64, period: u64) -> f64 {
    (tick % period) as f64
}
