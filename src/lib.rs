pub mod error;
pub mod graph;
pub mod plot;
pub mod report;
pub mod stations;
pub mod trips;
