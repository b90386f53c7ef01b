//! Command-line interface for flighttelemetry.
//!
//! This module provides the CLI structure for the `fltsim` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{validate_config_file, ConfigCommand, RunCommand};

/// fltsim - Synthetic flight telemetry generator
///
/// Simulates one aircraft, prints a summary per tick and appends each tick
/// to a JSON-lines telemetry log.
#[derive(Debug, Parser)]
#[command(name = "fltsim")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the simulator
    Run(RunCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Whether the active configuration must be loaded before dispatch.
    #[must_use]
    pub fn needs_loaded_config(&self) -> bool {
        match &self.command {
            Command::Run(_) => true,
            Command::Config(cmd) => cmd.needs_loaded_config(),
        }
    }

    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
