//! Route graph model
//!
//! This module implements the weighted directed graph the ranker runs on:
//! - Airports identified by a unique string id, with an explicit placeholder flag
//! - Aggregated routes: one entry per (origin, destination) pair, weights accumulate
//! - Incrementally maintained outgoing sums and predecessor lists

pub mod edge;
pub mod node;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::{IncomingRoute, Route};
pub use node::{Airport, PLACEHOLDER_NAME};
pub use store::{GraphError, GraphResult, RouteGraph};
pub use types::AirportId;
