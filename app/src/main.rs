// In app/src/main.rs

use anyhow::Result;
use api_client::CandleSource;
use app_config::Settings;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use strategies::SmaCrossover;
use tracing_subscriber::prelude::*;
use web_server::AppState;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Serves SMA(8)/SMA(55) crossover signals for crypto pairs.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Runs the HTTP signal service.
    Serve,

    /// Fetches candles once and prints the current signal.
    Signal {
        /// The exchange to query (e.g., "coinbasepro").
        #[arg(short, long)]
        exchange: String,

        /// The trading pair (e.g., "BTC-EUR").
        #[arg(short = 'P', long)]
        pair: String,

        /// The candle interval (1m, 5m, 15m, 30m, 1h, 2h, 4h or 1d).
        #[arg(short, long)]
        period: String,
    },
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings()?;
    init_tracing(&settings.app.log_level);
    tracing::info!(environment = %settings.app.environment, "Application settings loaded successfully.");

    match cli.command {
        Commands::Serve => run_server(settings).await?,
        Commands::Signal { exchange, pair, period } => {
            handle_signal(settings, exchange, pair, period).await?
        }
    }

    Ok(())
}

/// Installs the global `fmt` subscriber, defaulting every target to `log_level`.
fn init_tracing(log_level: &str) {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(
        tracing_subscriber::filter::Targets::new().with_default(parse_level(log_level)),
    );
    tracing_subscriber::registry().with(fmt_layer).init();
}

fn parse_level(log_level: &str) -> tracing::Level {
    log_level.trim().parse().unwrap_or(tracing::Level::INFO)
}

/// Builds the candle client and crossover engine shared by every command.
fn build_components(settings: &Settings) -> Result<(Arc<dyn CandleSource>, SmaCrossover)> {
    let client = api_client::new(&settings.upstream)?;
    let strategy = SmaCrossover::new(settings.strategy)?;
    tracing::info!(
        upstream = %client.base_url,
        fast_period = strategy.settings().fast_period,
        slow_period = strategy.settings().slow_period,
        "Signal components initialised."
    );
    let candles: Arc<dyn CandleSource> = Arc::new(client);
    Ok((candles, strategy))
}

// --- "Serve" Subcommand Logic ---

/// Starts the web server. It runs until the process is terminated.
async fn run_server(settings: Settings) -> Result<()> {
    let (candles, strategy) = build_components(&settings)?;
    web_server::run(settings.server, AppState::new(candles, strategy)).await?;
    Ok(())
}

// --- "Signal" Subcommand Logic ---

/// Handles the logic for the `signal` subcommand.
async fn handle_signal(settings: Settings, exchange: String, pair: String, period: String) -> Result<()> {
    let (candles, strategy) = build_components(&settings)?;
    let signal =
        web_server::assess_signal(candles.as_ref(), &strategy, &exchange, &pair, &period).await?;
    println!("{signal}");
    Ok(())
}
