//! CLI command definitions.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::config::Config;
use crate::error::{Error, Result};

/// Run command arguments.
///
/// Each flag overrides the matching configuration value.
#[derive(Debug, Default, Args)]
pub struct RunCommand {
    /// Telemetry log path (truncated at startup)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(short = 'n', long, value_name = "TICKS")]
    pub ticks: Option<u64>,

    /// Seed for the random source
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop on the first failed log append
    #[arg(long)]
    pub fail_fast: bool,
}

impl RunCommand {
    /// Apply these flags on top of `config`.
    #[must_use]
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(output) = &self.output {
            config.output.path.clone_from(output);
        }
        if self.ticks.is_some() {
            config.simulation.max_ticks = self.ticks;
        }
        if self.seed.is_some() {
            config.simulation.seed = self.seed;
        }
        if self.fail_fast {
            config.output.fail_fast = true;
        }
        config
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

impl ConfigCommand {
    /// Whether the active configuration must be loaded before running this
    /// command. `path` and `validate` work even when it is broken.
    #[must_use]
    pub fn needs_loaded_config(&self) -> bool {
        matches!(self, Self::Show { .. })
    }
}

/// Load and validate the configuration file at `path`.
///
/// Unlike [`Config::load_from`], a missing file is an error here.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be parsed, or holds
/// invalid values.
pub fn validate_config_file(path: &Path) -> Result<Config> {
    if !path.is_file() {
        return Err(Error::config_validation(format!(
            "configuration file not found: {}",
            path.display()
        )));
    }
    Config::load_from(Some(path.to_path_buf()))
}
