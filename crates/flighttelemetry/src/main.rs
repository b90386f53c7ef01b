//! `fltsim` - CLI for flighttelemetry
//!
//! Runs the flight telemetry simulator and inspects its configuration.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use flighttelemetry::cli::{validate_config_file, Cli, Command, ConfigCommand, RunCommand};
use flighttelemetry::{init_logging, Config, FlightSimulator, StopHandle, TelemetryWriter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    // `config path` and `config validate` must work while the active config is broken
    let config = if cli.needs_loaded_config() {
        Config::load_from(cli.config.clone()).context("loading configuration")?
    } else {
        Config::default()
    };

    match cli.command {
        Command::Run(run_cmd) => handle_run(config, &run_cmd).await,
        Command::Config(config_cmd) => handle_config(&config, cli.config, config_cmd),
    }
}

async fn handle_run(config: Config, cmd: &RunCommand) -> anyhow::Result<()> {
    let config = cmd.apply(config);
    config.validate()?;

    println!("Starting Flight Telemetry Simulator...");
    let writer = TelemetryWriter::create(config.log_path()).with_context(|| {
        format!(
            "cannot start without a writable telemetry log at {}",
            config.log_path().display()
        )
    })?;

    let stop = StopHandle::new();
    let ctrl_c = stop.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupt received, stopping after the current tick");
                ctrl_c.stop();
            }
            Err(err) => error!("Failed to listen for Ctrl-C: {err}"),
        }
    });
    // Let the listener install its SIGINT handler before the first tick.
    tokio::task::yield_now().await;

    let mut simulator = FlightSimulator::new(writer, config.simulation.seed)
        .fail_fast(config.output.fail_fast);
    let summary = simulator
        .run(&stop, config.simulation.max_ticks)
        .await
        .context("telemetry log became unwritable")?;

    if summary.write_failures > 0 {
        error!(
            dropped = summary.write_failures,
            "Some telemetry records could not be written"
        );
    }
    Ok(())
}

fn handle_config(
    config: &Config,
    active_path: Option<PathBuf>,
    cmd: ConfigCommand,
) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Output]");
                println!("  Log path:           {}", config.log_path().display());
                println!("  Fail fast:          {}", config.output.fail_fast);
                println!();
                println!("[Simulation]");
                println!(
                    "  Seed:               {}",
                    config
                        .simulation
                        .seed
                        .map_or_else(|| "entropy".to_string(), |seed| seed.to_string())
                );
                println!(
                    "  Max ticks:          {}",
                    config
                        .simulation
                        .max_ticks
                        .map_or_else(|| "unbounded".to_string(), |ticks| ticks.to_string())
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(active_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            validate_config_file(&path)
                .with_context(|| format!("{} is not a valid configuration", path.display()))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
