//! Network summary statistics and their output formats.
//!
//! Supports structured log output, pretty JSON, and a per-station CSV.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

use crate::graph::{StationGraph, StationId};

/// Per-station statistics, one row per node in station-table order.
#[derive(Debug, Serialize)]
pub struct NodeStats {
    pub station_id: StationId,
    pub degree: usize,
    pub in_degree_centrality: f64,
    pub out_degree_centrality: f64,
}

/// Graph-level summary for one pipeline run.
#[derive(Debug, Serialize)]
pub struct NetworkStats {
    pub generated_at: DateTime<Utc>,
    pub node_count: usize,
    pub edge_count: usize,
    pub dropped_trips: usize,
    pub nodes: Vec<NodeStats>,
}

impl NetworkStats {
    /// Computes counts, degrees, and normalized degree centralities.
    ///
    /// Centrality is the directional degree divided by (node count − 1),
    /// always in [0, 1]; with one node or none there is no possible
    /// neighbor, so centrality is 0 rather than a division by zero.
    pub fn from_graph(graph: &StationGraph, dropped_trips: usize) -> Self {
        let node_count = graph.node_count();
        let denominator = node_count.saturating_sub(1) as f64;

        let centrality = |raw: usize| {
            if denominator == 0.0 {
                0.0
            } else {
                raw as f64 / denominator
            }
        };

        let nodes = graph
            .nodes()
            .iter()
            .map(|&id| NodeStats {
                station_id: id,
                degree: graph.degree(id),
                in_degree_centrality: centrality(graph.in_degree(id)),
                out_degree_centrality: centrality(graph.out_degree(id)),
            })
            .collect();

        NetworkStats {
            generated_at: Utc::now(),
            node_count,
            edge_count: graph.edge_count(),
            dropped_trips,
            nodes,
        }
    }
}

/// Logs the graph totals and every station's degree and centralities.
pub fn log_summary(stats: &NetworkStats) {
    info!(
        nodes = stats.node_count,
        edges = stats.edge_count,
        dropped_trips = stats.dropped_trips,
        "network summary"
    );

    for node in &stats.nodes {
        info!(
            station_id = node.station_id,
            degree = node.degree,
            in_degree_centrality = node.in_degree_centrality,
            out_degree_centrality = node.out_degree_centrality,
            "station"
        );
    }
}

/// Logs the full statistics as pretty-printed JSON.
pub fn print_json(stats: &NetworkStats) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(stats)?);
    Ok(())
}

/// Appends per-station statistics rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_node_records(path: &Path, stats: &NetworkStats) -> Result<()> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for node in &stats.nodes {
        writer.serialize(node)?;
    }
    writer.flush()?;

    Ok(())
}
