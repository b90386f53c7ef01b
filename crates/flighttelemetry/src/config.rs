//! Configuration management for flighttelemetry.
//!
//! Only process wiring is configurable: where the log goes, how append
//! faults are treated, the random seed and an optional tick bound. The
//! flight model itself is fixed.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory name under the platform config dir.
const CONFIG_DIR_NAME: &str = "flighttelemetry";

/// Default telemetry log, relative to the working directory.
const DEFAULT_LOG_PATH: &str = "telemetry.jsonl";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FLIGHTTELEMETRY_`, nested keys
///    separated by `__`, e.g. `FLIGHTTELEMETRY_OUTPUT__PATH`)
/// 2. TOML config file at `~/.config/flighttelemetry/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Telemetry log configuration.
    pub output: OutputConfig,
    /// Simulation run configuration.
    pub simulation: SimulationConfig,
}

/// Telemetry log configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the telemetry log. Truncated at startup.
    pub path: PathBuf,
    /// Stop the run on the first failed append instead of dropping the record.
    pub fail_fast: bool,
}

/// Simulation run configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the random source. Seeded from entropy when unset.
    pub seed: Option<u64>,
    /// Stop after this many ticks. Runs until interrupted when unset.
    pub max_ticks: Option<u64>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOG_PATH),
            fail_fast: false,
        }
    }
}

impl Config {
    /// Load configuration, reading `config_path` or the default config file.
    ///
    /// A missing config file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("FLIGHTTELEMETRY_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.output.path.as_os_str().is_empty() {
            return Err(Error::config_validation("output.path must not be empty"));
        }

        if self.simulation.max_ticks == Some(0) {
            return Err(Error::config_validation(
                "simulation.max_ticks must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Get the telemetry log path.
    #[must_use]
    pub fn log_path(&self) -> &std::path::Path {
        &self.output.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "flighttelemetry_config_{}_{name}.toml",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.output.path, PathBuf::from("telemetry.jsonl"));
        assert!(!config.output.fail_fast);
        assert!(config.simulation.seed.is_none());
        assert!(config.simulation.max_ticks.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_path() {
        let mut config = Config::default();
        config.output.path = PathBuf::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("output.path"));
    }

    #[test]
    fn test_validate_zero_max_ticks() {
        let mut config = Config::default();
        config.simulation.max_ticks = Some(0);

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("max_ticks"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert_eq!(result.unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = temp_config(
            "valid",
            r#"
            [output]
            path = "/var/log/flight/telemetry.jsonl"
            fail_fast = true

            [simulation]
            seed = 42
            max_ticks = 500
            "#,
        );

        let config = Config::load_from(Some(path.clone())).unwrap();
        assert_eq!(
            config.log_path(),
            std::path::Path::new("/var/log/flight/telemetry.jsonl")
        );
        assert!(config.output.fail_fast);
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.simulation.max_ticks, Some(500));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let path = temp_config("invalid", "[simulation]\nmax_ticks = 0\n");

        let result = Config::load_from(Some(path.clone()));
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let path = temp_config("malformed", "[output\npath = ");

        let result = Config::load_from(Some(path.clone()));
        assert!(matches!(result, Err(Error::ConfigLoad(_))));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("flighttelemetry"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("fail_fast"));
        assert!(json.contains("max_ticks"));
    }

    #[test]
    fn test_simulation_config_deserialize() {
        let json = r#"{"seed": 7}"#;
        let simulation: SimulationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(simulation.seed, Some(7));
        assert!(simulation.max_ticks.is_none());
    }
}
