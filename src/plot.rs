//! Geographic rendering of the station network.
//!
//! Nodes are drawn as small semi-transparent markers at their (lon, lat)
//! coordinates and edges as thin connecting segments. No mesh, axes, or
//! labels are drawn, so the output reads as a map rather than a chart.

use std::ops::Range;
use std::path::Path;

use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use crate::graph::StationGraph;

const NODE_RADIUS: i32 = 3;

/// Renders the network to a PNG file.
pub fn render_to_file(
    graph: &StationGraph,
    path: &Path,
    (width, height): (u32, u32),
) -> Result<()> {
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    draw(graph, &root)?;
    root.present()
        .map_err(|e| anyhow!("failed to write plot to {}: {e}", path.display()))?;
    debug!(path = %path.display(), width, height, "network plot written");
    Ok(())
}

/// Renders the network into an in-memory RGB buffer (3 bytes per pixel).
pub fn render_to_buffer(graph: &StationGraph, (width, height): (u32, u32)) -> Result<Vec<u8>> {
    let mut buffer = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw(graph, &root)?;
        root.present()
            .map_err(|e| anyhow!("in-memory render failed: {e}"))?;
    }
    Ok(buffer)
}

fn draw<DB: DrawingBackend>(graph: &StationGraph, root: &DrawingArea<DB, Shift>) -> Result<()> {
    root.fill(&WHITE)
        .map_err(|e| anyhow!("plot background fill failed: {e}"))?;

    if graph.node_count() == 0 {
        return Ok(());
    }

    let (lon_range, lat_range) = bounds(graph);

    // No mesh is configured, which keeps the axes hidden
    let mut chart = ChartBuilder::on(root)
        .build_cartesian_2d(lon_range, lat_range)
        .map_err(|e| anyhow!("plot coordinate setup failed: {e}"))?;

    let edge_style = BLUE.mix(0.5).stroke_width(1);
    chart
        .draw_series(graph.edges().iter().filter_map(|&(from, to)| {
            let a = graph.position(from)?;
            let b = graph.position(to)?;
            Some(PathElement::new(vec![a, b], edge_style))
        }))
        .map_err(|e| anyhow!("edge rendering failed: {e}"))?;

    chart
        .draw_series(graph.nodes().iter().filter_map(|&id| {
            let pos = graph.position(id)?;
            Some(Circle::new(pos, NODE_RADIUS, BLUE.mix(0.5).filled()))
        }))
        .map_err(|e| anyhow!("node rendering failed: {e}"))?;

    Ok(())
}

/// Coordinate ranges covering every node, padded so markers at the extremes
/// are not clipped. A single-station network gets a fixed pad to avoid a
/// zero-width range.
fn bounds(graph: &StationGraph) -> (Range<f64>, Range<f64>) {
    let mut lon_min = f64::INFINITY;
    let mut lon_max = f64::NEG_INFINITY;
    let mut lat_min = f64::INFINITY;
    let mut lat_max = f64::NEG_INFINITY;

    for &id in graph.nodes() {
        if let Some((lon, lat)) = graph.position(id) {
            lon_min = lon_min.min(lon);
            lon_max = lon_max.max(lon);
            lat_min = lat_min.min(lat);
            lat_max = lat_max.max(lat);
        }
    }

    let pad = |min: f64, max: f64| {
        let span = max - min;
        let margin = if span == 0.0 { 0.01 } else { span * 0.02 };
        (min - margin)..(max + margin)
    };

    (pad(lon_min, lon_max), pad(lat_min, lat_max))
}
