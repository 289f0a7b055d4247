//! Gallery CLI - log in to a gallery backend from the terminal

mod commands;
mod config;
mod logging;

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use commands::{CommandContext, Commands};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{Level, error, info};

#[derive(Parser)]
#[command(name = "gallery")]
#[command(about = "Command line client for the gallery backend")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Data directory holding the token store, config file and log
    #[arg(short = 'd', long, global = true)]
    data_dir: Option<std::path::PathBuf>,

    /// Backend base URL (overrides config file and GALLERY_BACKEND_HOST)
    #[arg(short = 'b', long, global = true)]
    backend: Option<String>,

    /// Timeout for operations in seconds (0 = no timeout)
    #[arg(short = 't', long, global = true, default_value = "10")]
    timeout: u64,

    /// Also write the log to gallery.log in the data directory
    #[arg(long, global = true)]
    file_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed: {e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let data_dir = config::resolve_data_dir(cli.data_dir);
    let log_dir = cli.file_log.then(|| data_dir.clone());
    logging::init_logging(cli.log_level.into(), log_dir)?;

    let context = CommandContext::load(data_dir, cli.backend)?;
    info!(backend = %context.client_config.backend_host, "Starting Gallery CLI");

    if cli.timeout == 0 {
        return cli.command.execute(&context).await;
    }

    let timeout_duration = Duration::from_secs(cli.timeout);
    tokio::time::timeout(timeout_duration, cli.command.execute(&context))
        .await
        .map_err(|_| anyhow!("Command timed out after {} seconds", cli.timeout))?
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}
