//! AirRank
//!
//! Importance scores for an air-route network, computed with weighted
//! PageRank. Airports with inbound but no outbound routes (sinks) have their
//! rank redistributed every iteration instead of leaking out of the vector.
//!
//! # Architecture
//!
//! - [`graph`]: the route graph model (airports, aggregated weighted routes)
//! - [`algo`]: adapter over the `airrank-algorithms` solver
//! - [`ingest`]: OpenFlights `airports`/`routes` readers
//! - [`export`]: ordered rank reports
//! - [`config`]: YAML configuration
//!
//! ## Example Usage
//!
//! ```rust
//! use airrank::algo::{rank_airports, PageRankConfig};
//! use airrank::export::ranking;
//! use airrank::graph::RouteGraph;
//!
//! let mut graph = RouteGraph::new();
//! graph.add_node("BCN", "Barcelona, Spain").unwrap();
//! graph.add_node("JFK", "John F Kennedy Intl, United States").unwrap();
//! graph.add_route("BCN", "JFK").unwrap();
//!
//! let outcome = rank_airports(&mut graph, &PageRankConfig::default()).unwrap();
//! assert!(outcome.converged);
//!
//! let report = ranking(&outcome.ranks, &graph.names());
//! assert_eq!(report[0].id.as_str(), "JFK");
//! ```

#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod ingest;

// Re-export main types for convenience
pub use algo::{rank_airports, rank_airports_from, AlgoError, PageRankConfig, RankOutcome};
pub use config::{RankerConfig, SolverSettings};
pub use error::{AirRankError, AirRankResult};
pub use export::{ranking, write_report, ExportFormat, ExportOptions, RankedAirport};
pub use graph::{Airport, AirportId, GraphError, GraphResult, RouteGraph};
pub use ingest::{load_airports, load_routes, IngestStats};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
