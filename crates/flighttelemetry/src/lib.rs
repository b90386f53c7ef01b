//! `flighttelemetry` - A synthetic flight telemetry generator
//!
//! This library simulates a single aircraft on a fixed tick and appends
//! each tick's state to a JSON-lines log, one self-contained record per line.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod random;
pub mod record;
pub mod simulator;
pub mod state;
pub mod writer;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use random::RandomSource;
pub use record::TelemetryRecord;
pub use simulator::{FlightSimulator, RunSummary, StopHandle};
pub use state::{FlightState, Phase};
pub use writer::TelemetryWriter;
