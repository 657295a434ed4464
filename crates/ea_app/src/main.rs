use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ea_app::config::ConsoleConfig;
use ea_app::driver::AppDriver;
use ea_app::logging;
use tracing::{error, info};

/// Estate admin console.
#[derive(Debug, Parser)]
#[command(name = "estate-admin", version)]
struct Cli {
    /// Console config file (defaults to the per-user config location).
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON user file; overrides the configured data path.
    #[arg(long)]
    data: Option<PathBuf>,
    /// Number of generated users when no data file is configured.
    #[arg(long)]
    sample: Option<usize>,
    /// Write the effective settings to the per-user config file and exit.
    #[arg(long)]
    save_config: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.log_filter);

    if cli.save_config {
        return match config.save_default_location() {
            Ok(path) => {
                info!(path = %path.display(), "saved console config");
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!(error = %err, "could not save console config");
                ExitCode::FAILURE
            }
        };
    }

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "console exited with an error");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<ConsoleConfig, ea_app::config::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => ConsoleConfig::load_from_file(path)?,
        None => ConsoleConfig::load_or_default()?,
    };
    if let Some(data) = &cli.data {
        config.data_path = Some(data.clone());
    }
    if let Some(sample) = cli.sample {
        config.sample_size = sample;
    }
    Ok(config)
}

#[cfg(feature = "egui-desktop")]
fn run(config: ConsoleConfig) -> Result<(), Box<dyn std::error::Error>> {
    let driver = AppDriver::from_config(&config)?;
    info!(users = driver.state().records().len(), "starting egui console");
    ea_app::launch(driver)?;
    Ok(())
}

#[cfg(all(not(feature = "egui-desktop"), feature = "dioxus-desktop"))]
fn run(config: ConsoleConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Fail fast on a bad config before the webview comes up.
    let driver = AppDriver::from_config(&config)?;
    info!(users = driver.state().records().len(), "starting dioxus console");
    ea_app::dioxus_app::run(config);
    Ok(())
}

#[cfg(not(any(feature = "egui-desktop", feature = "dioxus-desktop")))]
fn run(config: ConsoleConfig) -> Result<(), Box<dyn std::error::Error>> {
    let driver = AppDriver::from_config(&config)?;
    info!(users = driver.state().records().len(), "no frontend feature enabled");
    Err("built without a frontend; enable `egui-desktop` or `dioxus-desktop`".into())
}
