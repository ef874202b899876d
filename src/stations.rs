//! Station-information feed loading.
//!
//! The station feed is a GBFS-style JSON document whose payload is nested
//! under a top-level `data` key, with the station list one container deeper
//! (`{"data": {"stations": [...]}}`). Some publishers wrap the list under a
//! differently named single key, so the descent is detected structurally
//! rather than hard-coded.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::PipelineError;

/// One physical docking location. Immutable after load; `station_id` is
/// unique and serves as the sole graph node key.
#[derive(Debug, Clone, Deserialize)]
pub struct Station {
    pub station_id: u32,
    pub name: String,
    pub address: String,
    pub capacity: u32,
    pub lon: f64,
    pub lat: f64,
}

/// Loads and flattens the station feed into one [`Station`] per row.
///
/// # Errors
///
/// Returns [`PipelineError::Io`] if the path cannot be read,
/// [`PipelineError::Json`] if the file is not JSON, and
/// [`PipelineError::MalformedInput`] if the expected `data` nesting is
/// absent, the payload is not row-shaped, or a station id repeats.
pub fn load_stations(path: &Path) -> Result<Vec<Station>, PipelineError> {
    let file = File::open(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let doc: Value =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| PipelineError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let stations = parse_stations(&doc).map_err(|reason| PipelineError::MalformedInput {
        path: path.to_path_buf(),
        reason,
    })?;

    debug!(count = stations.len(), "station feed flattened");
    Ok(stations)
}

/// Unpacks the nested document into station rows.
fn parse_stations(doc: &Value) -> Result<Vec<Station>, String> {
    let data = doc
        .get("data")
        .ok_or_else(|| "missing top-level `data` key".to_string())?;

    let rows = station_rows(data)
        .ok_or_else(|| "no station array found under `data`".to_string())?;

    let stations: Vec<Station> = serde_json::from_value(rows.clone())
        .map_err(|e| format!("station rows are not row-shaped: {e}"))?;

    let mut seen = HashSet::new();
    for station in &stations {
        if !seen.insert(station.station_id) {
            return Err(format!("duplicate station_id {}", station.station_id));
        }
    }

    Ok(stations)
}

/// Locates the station array under `data`.
///
/// Accepts the array directly, the conventional `stations` key, or a
/// single-key wrapper object whose sole value is the array.
fn station_rows(data: &Value) -> Option<&Value> {
    match data {
        Value::Array(_) => Some(data),
        Value::Object(map) => {
            let candidate = map.get("stations").or_else(|| {
                if map.len() == 1 {
                    map.values().next()
                } else {
                    None
                }
            })?;
            candidate.is_array().then_some(candidate)
        }
        _ => None,
    }
}
