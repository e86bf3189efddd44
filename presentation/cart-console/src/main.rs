use clap::Parser;
use dotenvy::dotenv;

mod cli;
mod config;
mod console;
mod setup;

use cli::Cli;
use config::app_config::AppConfig;
use setup::{dependency_injection::DependencyContainer, runner::Runner};

/// Cart console entry point
///
/// Loads configuration, wires the cart coordinator and runs one command
/// against the bookstore backend:
/// - config/: API endpoint and recovery settings
/// - setup/: Dependency injection and command runner
/// - console/: Terminal adapters for notifications, confirmation and rendering
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing with RUST_LOG env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // 2. Load environment variables
    dotenv().ok();

    // 3. Parse arguments and load configuration
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    // 4. Wire dependencies
    let container = DependencyContainer::new(&config, cli.yes)?;

    // 5. Run the command
    Runner::run(cli.command, container).await
}
