//! Error taxonomy for the ingest pipeline.
//!
//! Every fatal condition carries the path of the offending input file so a
//! failed run names the stage and file that broke it. Unresolved trip
//! endpoints are not errors; they are counted by the reconciler.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input file is missing or unreadable.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The station feed does not have the expected nesting or row shape.
    #[error("malformed station feed {path}: {reason}")]
    MalformedInput { path: PathBuf, reason: String },

    /// A required column is absent from a tabular input.
    #[error("{path} is missing required column `{column}`")]
    Schema { path: PathBuf, column: String },

    /// The station feed is not valid JSON at all.
    #[error("failed to parse {path} as JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A ridership row could not be read or decoded.
    #[error("failed to read ridership rows from {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
