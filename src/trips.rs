//! Ridership reconciliation: resolving trip endpoints to station ids.
//!
//! Trip rows name their endpoints; the station feed keys them by id. The
//! join is an exact string match on station name, with no normalization of
//! case or whitespace, so formatting drift between the two sources silently
//! unresolves a row. Unresolved rows are dropped, not errors, but the drop
//! count is kept for observability.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::PipelineError;
use crate::stations::Station;

const REQUIRED_COLUMNS: [&str; 2] = ["from_station_name", "to_station_name"];

/// One ridership row as it appears in the source table. Columns beyond the
/// endpoint names are ignored.
#[derive(Debug, Deserialize)]
pub struct RawTrip {
    pub from_station_name: String,
    pub to_station_name: String,
}

/// A trip whose endpoints both resolved against the station table.
#[derive(Debug, Clone)]
pub struct Trip {
    pub from_station_id: u32,
    pub to_station_id: u32,
}

/// The cleaned trip table plus the count of rows the join discarded.
#[derive(Debug)]
pub struct ReconciledTrips {
    pub trips: Vec<Trip>,
    pub dropped: usize,
}

/// Reads the ridership CSV and resolves each row's endpoints to station ids.
///
/// # Errors
///
/// Returns [`PipelineError::Io`] if the path cannot be read,
/// [`PipelineError::Schema`] if a required endpoint column is absent, and
/// [`PipelineError::Csv`] if a row cannot be decoded.
pub fn reconcile_trips(
    path: &Path,
    stations: &[Station],
) -> Result<ReconciledTrips, PipelineError> {
    let file = File::open(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|source| PipelineError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(PipelineError::Schema {
                path: path.to_path_buf(),
                column: required.to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    for row in reader.deserialize::<RawTrip>() {
        rows.push(row.map_err(|source| PipelineError::Csv {
            path: path.to_path_buf(),
            source,
        })?);
    }

    debug!(rows = rows.len(), "ridership rows read");
    Ok(resolve(rows, stations))
}

/// Joins raw trip rows against the station table's name → id projection,
/// keeping row order and dropping rows where either endpoint is unmatched.
pub fn resolve(rows: Vec<RawTrip>, stations: &[Station]) -> ReconciledTrips {
    let name_to_id: HashMap<&str, u32> = stations
        .iter()
        .map(|s| (s.name.as_str(), s.station_id))
        .collect();

    let mut trips = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;

    for row in &rows {
        match (
            name_to_id.get(row.from_station_name.as_str()),
            name_to_id.get(row.to_station_name.as_str()),
        ) {
            (Some(&from_station_id), Some(&to_station_id)) => trips.push(Trip {
                from_station_id,
                to_station_id,
            }),
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(
            dropped,
            kept = trips.len(),
            "trips dropped: endpoint names did not match any station"
        );
    }

    ReconciledTrips { trips, dropped }
}
