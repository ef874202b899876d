//! Directed multigraph over stations.
//!
//! Nodes are station ids annotated with a (lon, lat) position; edges are
//! individual trips, so repeated trips between the same ordered pair stay
//! as distinct parallel edges. Node and edge order follow the source tables
//! for reproducibility.

use std::collections::HashMap;

use crate::stations::Station;
use crate::trips::Trip;

pub type StationId = u32;

#[derive(Debug)]
pub struct StationGraph {
    nodes: Vec<StationId>,
    positions: HashMap<StationId, (f64, f64)>,
    edges: Vec<(StationId, StationId)>,
    in_degree: HashMap<StationId, usize>,
    out_degree: HashMap<StationId, usize>,
}

impl StationGraph {
    /// Builds the network from the station table and the cleaned trip table.
    ///
    /// Every trip endpoint must already be a station id; the reconciler
    /// guarantees this, so a violation here is a defect upstream.
    pub fn build(stations: &[Station], trips: &[Trip]) -> Self {
        let mut nodes = Vec::with_capacity(stations.len());
        let mut positions = HashMap::with_capacity(stations.len());
        let mut in_degree = HashMap::with_capacity(stations.len());
        let mut out_degree = HashMap::with_capacity(stations.len());

        for station in stations {
            nodes.push(station.station_id);
            positions.insert(station.station_id, (station.lon, station.lat));
            in_degree.insert(station.station_id, 0);
            out_degree.insert(station.station_id, 0);
        }

        let mut edges = Vec::with_capacity(trips.len());
        for trip in trips {
            debug_assert!(positions.contains_key(&trip.from_station_id));
            debug_assert!(positions.contains_key(&trip.to_station_id));

            edges.push((trip.from_station_id, trip.to_station_id));
            *out_degree.entry(trip.from_station_id).or_insert(0) += 1;
            *in_degree.entry(trip.to_station_id).or_insert(0) += 1;
        }

        StationGraph {
            nodes,
            positions,
            edges,
            in_degree,
            out_degree,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Station ids in station-table order.
    pub fn nodes(&self) -> &[StationId] {
        &self.nodes
    }

    /// Directed edges in trip-table order, parallel edges included.
    pub fn edges(&self) -> &[(StationId, StationId)] {
        &self.edges
    }

    /// The (lon, lat) position annotation of a node.
    pub fn position(&self, id: StationId) -> Option<(f64, f64)> {
        self.positions.get(&id).copied()
    }

    pub fn in_degree(&self, id: StationId) -> usize {
        self.in_degree.get(&id).copied().unwrap_or(0)
    }

    pub fn out_degree(&self, id: StationId) -> usize {
        self.out_degree.get(&id).copied().unwrap_or(0)
    }

    /// Total degree: in-degree + out-degree.
    pub fn degree(&self, id: StationId) -> usize {
        self.in_degree(id) + self.out_degree(id)
    }

    /// Number of parallel edges for an ordered (from, to) pair.
    pub fn parallel_edges(&self, from: StationId, to: StationId) -> usize {
        self.edges.iter().filter(|&&e| e == (from, to)).count()
    }
}
