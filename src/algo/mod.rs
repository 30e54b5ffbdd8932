//! Ranking module
//!
//! The solver is implemented in the `airrank-algorithms` crate over dense
//! indices. This module provides the integration/adapter layer: it freezes a
//! [`RouteGraph`](crate::graph::RouteGraph), runs the solver and maps scores
//! back to airport ids.

pub mod pagerank;

// Re-export algorithms
pub use airrank_algorithms::{
    page_rank, page_rank_from, AlgoError, AlgoResult, GraphView, PageRankConfig, PageRankResult,
};
pub use pagerank::{rank_airports, rank_airports_from, RankOutcome};
