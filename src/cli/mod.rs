use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Dzongkhag Electrical Outage Dashboard
#[derive(Parser)]
#[command(name = "outage-dashboard")]
#[command(about = "Monthly electrical outage statistics for the 20 dzongkhags")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the reporting months available from the service
    Months(commands::months::MonthsCommand),
    /// Show statistics for one month (falls back to sample data)
    Report(commands::report::ReportCommand),
    /// Show generated sample statistics for one month
    Sample(commands::report::SampleCommand),
    /// Run the live dashboard with auto-refresh until interrupted
    Watch(commands::watch::WatchCommand),
}

pub async fn run() -> AppResult<()> {
    // Initialise tracing subscriber to capture info!() macros
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Months(command) => command.run().await,
        Commands::Report(command) => command.run().await,
        Commands::Sample(command) => command.run(),
        Commands::Watch(command) => command.run().await,
    }
}
