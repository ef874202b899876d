//! CLI entry point for the bikeshare network statistics tool.
//!
//! Loads station metadata and trip-level ridership records, reconciles them
//! into a directed multigraph, and reports network statistics plus a
//! geographic rendering of the system.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use bikeshare_network::{
    graph::StationGraph,
    plot::{render_to_buffer, render_to_file},
    report::{NetworkStats, append_node_records, log_summary, print_json},
    stations::load_stations,
    trips::reconcile_trips,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_network")]
#[command(about = "Builds and analyzes a bikeshare station network from ridership data", long_about = None)]
struct Cli {
    /// Station information JSON (GBFS-style, payload nested under `data`)
    #[arg(value_name = "STATION_INFO")]
    stations: PathBuf,

    /// Ridership table (CSV with from/to station name columns)
    #[arg(value_name = "RIDERSHIP")]
    ridership: PathBuf,

    /// Write the rendered network image to this PNG path; without it the
    /// render still runs, into an in-memory buffer
    #[arg(short, long)]
    plot: Option<PathBuf>,

    /// Append per-station statistics to this CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also log the full statistics as pretty-printed JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Rendered image width in pixels
    #[arg(long, default_value_t = 1024)]
    plot_width: u32,

    /// Rendered image height in pixels
    #[arg(long, default_value_t = 768)]
    plot_height: u32,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_network.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_network.log"));

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

    let stations = load_stations(&cli.stations)?;
    info!(
        count = stations.len(),
        path = %cli.stations.display(),
        "stations loaded"
    );

    let reconciled = reconcile_trips(&cli.ridership, &stations)?;
    info!(
        kept = reconciled.trips.len(),
        dropped = reconciled.dropped,
        path = %cli.ridership.display(),
        "ridership reconciled"
    );

    let graph = StationGraph::build(&stations, &reconciled.trips);
    let stats = NetworkStats::from_graph(&graph, reconciled.dropped);

    log_summary(&stats);

    if cli.json {
        print_json(&stats)?;
    }

    if let Some(path) = &cli.output {
        append_node_records(path, &stats)?;
        info!(path = %path.display(), rows = stats.nodes.len(), "station statistics written");
    }

    let size = (cli.plot_width, cli.plot_height);
    match &cli.plot {
        Some(path) => {
            render_to_file(&graph, path, size)?;
            info!(path = %path.display(), "network plot written");
        }
        None => {
            let pixels = render_to_buffer(&graph, size)?;
            info!(bytes = pixels.len(), "network plot rendered in memory");
        }
    }

    Ok(())
}
