//! Append-only JSON-lines telemetry log.
//!
//! Every append opens the file, writes one line and closes it again. No
//! handle is held between ticks, so external tools may rotate or truncate
//! the log while the simulator runs.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::TelemetryRecord;

/// Writer for the telemetry log.
#[derive(Debug)]
pub struct TelemetryWriter {
    /// Path to the log file.
    path: PathBuf,
}

impl TelemetryWriter {
    /// Create the log at `path`, truncating any existing content.
    ///
    /// Creates parent directories if they don't exist. Calling this again on
    /// the same path discards everything written before.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TelemetryInit`] if the file cannot be created or
    /// truncated, and [`Error::DirectoryCreate`] if its directory cannot be
    /// created.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        File::create(&path).map_err(|source| Error::TelemetryInit {
            path: path.clone(),
            source,
        })?;

        info!("Telemetry log cleared at {}", path.display());
        Ok(Self { path })
    }

    /// Get the path to the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `record` as one JSON line.
    ///
    /// The line and its newline go out in a single write, so a reader
    /// tailing the file never sees a partial record followed by another.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TelemetryAppend`] if the file cannot be opened or
    /// written, and [`Error::Json`] if the record cannot be serialized.
    pub fn append(&self, record: &TelemetryRecord) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let append_error = |source: std::io::Error| Error::TelemetryAppend {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(append_error)?;
        file.write_all(line.as_bytes()).map_err(append_error)?;
        file.flush().map_err(append_error)?;

        debug!(tick = record.simulation_time, "Appended telemetry record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FlightState;
    use chrono::Utc;

    fn temp_log(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!(
                "flighttelemetry_writer_{}_{name}",
                std::process::id()
            ))
            .join("telemetry.jsonl")
    }

    fn cleanup(path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = std::fs::remove_dir_all(parent);
        }
    }

    fn record_for_tick(tick: u64) -> TelemetryRecord {
        let state = FlightState {
            tick_count: tick,
            ..FlightState::default()
        };
        TelemetryRecord::from_state(&state, Utc::now())
    }

    #[test]
    fn test_create_makes_empty_file() {
        let path = temp_log("create");
        let writer = TelemetryWriter::create(&path).unwrap();

        assert_eq!(writer.path(), path);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
        cleanup(&path);
    }

    #[test]
    fn test_append_n_records_yields_n_lines() {
        let path = temp_log("append_n");
        let writer = TelemetryWriter::create(&path).unwrap();
        for tick in 1..=25 {
            writer.append(&record_for_tick(tick)).unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.ends_with('\n'));
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 25);
        for (index, line) in lines.iter().enumerate() {
            let parsed: TelemetryRecord = serde_json::from_str(line).unwrap();
            assert_eq!(parsed.simulation_time, index as u64 + 1);

            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value["timestamp"].is_f64());
            assert!(value["altitude"].is_f64());
            assert!(value["engineFailure"].is_boolean());
            assert!(value["trainingPhase"].is_boolean());
            assert!(value["simulationTime"].is_u64());
        }
        cleanup(&path);
    }

    #[test]
    fn test_recreate_truncates_existing_log() {
        let path = temp_log("truncate");
        let writer = TelemetryWriter::create(&path).unwrap();
        writer.append(&record_for_tick(1)).unwrap();
        writer.append(&record_for_tick(2)).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);

        let writer = TelemetryWriter::create(&path).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);

        writer.append(&record_for_tick(3)).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        cleanup(&path);
    }

    #[test]
    fn test_append_survives_external_truncation() {
        let path = temp_log("rotation");
        let writer = TelemetryWriter::create(&path).unwrap();
        writer.append(&record_for_tick(1)).unwrap();

        std::fs::remove_file(&path).unwrap();
        writer.append(&record_for_tick(2)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: TelemetryRecord = serde_json::from_str(contents.trim_end()).unwrap();
        assert_eq!(parsed.simulation_time, 2);
        cleanup(&path);
    }

    #[test]
    fn test_append_reports_storage_fault() {
        let path = temp_log("fault");
        let writer = TelemetryWriter::create(&path).unwrap();
        cleanup(&path);

        let err = writer.append(&record_for_tick(1)).unwrap_err();
        assert!(matches!(err, Error::TelemetryAppend { .. }));
        assert!(err.is_storage_fault());
    }

    #[test]
    fn test_create_fails_when_path_is_a_directory() {
        let path = temp_log("is_dir");
        std::fs::create_dir_all(&path).unwrap();

        let err = TelemetryWriter::create(&path).unwrap_err();
        assert!(matches!(err, Error::TelemetryInit { .. }));
        cleanup(&path);
    }
}
