//! The tick loop.
//!
//! [`FlightSimulator`] owns the aircraft state, the telemetry writer and the
//! random source. Each tick advances the state, appends a record, prints a
//! summary line and then waits out the phase delay.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::random::{seeded_rng, RandomSource};
use crate::record::TelemetryRecord;
use crate::state::{FlightState, Phase};
use crate::writer::TelemetryWriter;

/// A cloneable handle used to stop a running simulator.
///
/// The loop checks the handle at the start of every tick, so a stop takes
/// effect after the current tick and its delay complete.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stop_signal: Arc<AtomicBool>,
}

impl StopHandle {
    /// Create a new handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal the simulator to stop.
    pub fn stop(&self) {
        self.stop_signal.store(true, Ordering::SeqCst);
    }

    /// Check if the stop signal has been sent.
    #[must_use]
    pub fn should_stop(&self) -> bool {
        self.stop_signal.load(Ordering::SeqCst)
    }
}

/// Outcome of a call to [`FlightSimulator::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks executed.
    pub ticks: u64,
    /// Records successfully appended to the log.
    pub records_written: u64,
    /// Records dropped because the append failed.
    pub write_failures: u64,
}

/// Simulator for one aircraft.
#[derive(Debug)]
pub struct FlightSimulator<R = StdRng> {
    state: FlightState,
    writer: TelemetryWriter,
    rng: R,
    fail_fast: bool,
}

impl FlightSimulator<StdRng> {
    /// Create a simulator writing to `writer`, seeded from `seed` or entropy.
    #[must_use]
    pub fn new(writer: TelemetryWriter, seed: Option<u64>) -> Self {
        Self::with_rng(writer, seeded_rng(seed))
    }
}

impl<R: RandomSource> FlightSimulator<R> {
    /// Create a simulator drawing from the given random source.
    #[must_use]
    pub fn with_rng(writer: TelemetryWriter, rng: R) -> Self {
        Self {
            state: FlightState::default(),
            writer,
            rng,
            fail_fast: false,
        }
    }

    /// End the run on the first failed append instead of dropping the record.
    #[must_use]
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Current aircraft state.
    #[must_use]
    pub fn state(&self) -> &FlightState {
        &self.state
    }

    /// Mutable access to the aircraft state.
    pub fn state_mut(&mut self) -> &mut FlightState {
        &mut self.state
    }

    /// Run one tick without pacing: advance, append, print.
    ///
    /// The summary line is printed even when the append fails.
    ///
    /// # Errors
    ///
    /// Returns the storage fault if the record could not be appended.
    pub fn tick(&mut self) -> Result<TelemetryRecord> {
        let previous_phase = self.state.phase();
        self.state.advance(&mut self.rng);
        if self.state.phase() != previous_phase {
            info!(
                tick = self.state.tick_count,
                "Entering {} phase",
                self.state.phase()
            );
        }

        let record = TelemetryRecord::from_state(&self.state, Utc::now());
        let appended = self.writer.append(&record);
        println!("{}", record.summary_line());
        appended.map(|()| record)
    }

    /// Run ticks until `stop` is signalled or `max_ticks` ticks have run.
    ///
    /// With no bound and no stop signal this never returns. No delay is
    /// taken after the final tick of a bounded run.
    ///
    /// # Errors
    ///
    /// Returns the first storage fault when fail-fast is enabled. Otherwise
    /// failed appends are logged and counted in the summary.
    pub async fn run(&mut self, stop: &StopHandle, max_ticks: Option<u64>) -> Result<RunSummary> {
        info!(
            path = %self.writer.path().display(),
            "Starting flight telemetry simulator"
        );
        let mut summary = RunSummary::default();

        loop {
            if stop.should_stop() {
                info!(tick = self.state.tick_count, "Stop requested");
                break;
            }

            let outcome = self.tick();
            summary.ticks += 1;
            match outcome {
                Ok(_) => summary.records_written += 1,
                Err(err) if self.fail_fast => return Err(err),
                Err(err) => {
                    summary.write_failures += 1;
                    warn!(tick = self.state.tick_count, "Dropped telemetry record: {err}");
                }
            }

            if max_ticks.is_some_and(|max| summary.ticks >= max) {
                debug!(ticks = summary.ticks, "Tick limit reached");
                break;
            }

            let delay = self.state.phase().tick_delay();
            if delay.is_zero() {
                // Unpaced ticks still give signal listeners and other tasks a turn.
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(delay).await;
            }
        }

        info!(
            ticks = summary.ticks,
            written = summary.records_written,
            dropped = summary.write_failures,
            "Simulation stopped"
        );
        Ok(summary)
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }
}
