//! Telemetry records.
//!
//! One record is built per tick from a [`FlightState`] snapshot and written
//! as one JSON line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{FlightState, Phase};

/// A snapshot of the aircraft at the end of one tick.
///
/// Field names match the log format: `timestamp`, `altitude`, `airspeed`,
/// `pitch`, `vibration`, `engineFailure`, `trainingPhase`, `simulationTime`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryRecord {
    /// Wall-clock time in seconds since the Unix epoch, millisecond resolution.
    pub timestamp: f64,
    /// Altitude in feet.
    pub altitude: f64,
    /// Airspeed in knots.
    pub airspeed: f64,
    /// Pitch in degrees.
    pub pitch: f64,
    /// Vibration in g.
    pub vibration: f64,
    /// Whether the engine had failed.
    pub engine_failure: bool,
    /// Whether the tick was part of the training phase.
    pub training_phase: bool,
    /// Tick count.
    pub simulation_time: u64,
}

impl TelemetryRecord {
    /// Snapshot `state`, stamped with `now`.
    #[must_use]
    pub fn from_state(state: &FlightState, now: DateTime<Utc>) -> Self {
        Self {
            timestamp: epoch_seconds(now),
            altitude: state.altitude_feet,
            airspeed: state.airspeed_knots,
            pitch: state.pitch_degrees,
            vibration: state.vibration_g,
            engine_failure: state.engine_failure,
            training_phase: state.training_phase_active,
            simulation_time: state.tick_count,
        }
    }

    /// Phase the record was taken in.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.training_phase {
            Phase::Training
        } else {
            Phase::Testing
        }
    }

    /// Human-readable one-line summary for the console.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "{} Alt: {:.2}ft, Speed: {:.2}kts, Pitch: {:.2}°, Vib: {:.2}g{}",
            self.phase().tag(),
            self.altitude,
            self.airspeed,
            self.pitch,
            self.vibration,
            if self.engine_failure {
                " [ENGINE FAILURE]"
            } else {
                ""
            }
        )
    }
}

#[allow(clippy::cast_precision_loss)]
fn epoch_seconds(now: DateTime<Utc>) -> f64 {
    now.timestamp_millis() as f64 / 1000.0
}
