//! CLI entry point for the buoy report tool.
//!
//! Provides subcommands for fetching the aggregated multi-station report,
//! retrieving the free-text surf forecast, and listing the station catalog.

use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use buoy_report::aggregate::run_report;
use buoy_report::fetch::{BasicClient, DEFAULT_BASE_URL};
use buoy_report::forecast::fetch_surf_forecast;
use buoy_report::render::Format;
use buoy_report::stations::STATION_CATALOG;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "buoy_report")]
#[command(about = "Fetches Hawaiian buoy readings and renders a surf report", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every cataloged station and print the aggregated report
    Report {
        /// Number of most recent readings to keep per station
        #[arg(short = 'n', long, default_value_t = 10)]
        readings: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "structured")]
        format: Format,
    },
    /// Fetch and print the free-text surf forecast
    Forecast,
    /// List the stations in the catalog
    ListStations,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/buoy_report.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("buoy_report.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report { readings, format } => {
            anyhow::ensure!(readings > 0, "--readings must be a positive integer");

            let base_url = std::env::var("SURFBUOYS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
            let client = Arc::new(BasicClient::new());

            info!(readings, base_url = %base_url, "Starting report run");
            let result = run_report(client, &base_url, readings).await?;
            info!(stations = result.structured.len(), "Report run complete");

            match format {
                Format::Structured => {
                    println!("{}", serde_json::to_string_pretty(&result.structured)?)
                }
                Format::Readable => println!("{}", result.readable),
            }
        }
        Commands::Forecast => {
            let client = BasicClient::new();
            let forecast = fetch_surf_forecast(&client).await?;
            println!("{forecast}");
        }
        Commands::ListStations => {
            for station in STATION_CATALOG {
                let order = station
                    .arrival_order
                    .map_or("NA".to_string(), |o| o.to_string());
                let offset = station
                    .relative_hours
                    .map_or("NA".to_string(), |h| h.to_string());
                println!(
                    "{:<8} {:<40} order={:<3} offset={:<4} {:?}",
                    station.id, station.name, order, offset, station.class
                );
            }
        }
    }

    Ok(())
}
