//! PageRank over the route graph

use crate::graph::{AirportId, RouteGraph};
use airrank_algorithms::{page_rank, page_rank_from, AlgoResult, PageRankConfig, PageRankResult};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;

/// Ranks keyed by airport id plus solve statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankOutcome {
    /// Rank per airport, in graph insertion order
    pub ranks: IndexMap<AirportId, f64>,
    /// Iterations the solver ran
    pub iterations: usize,
    /// Whether the tolerance was met before the iteration cap
    pub converged: bool,
}

/// Calculate PageRank for every airport and publish the ranks into the graph
pub fn rank_airports(graph: &mut RouteGraph, config: &PageRankConfig) -> AlgoResult<RankOutcome> {
    let view = graph.freeze();
    let result = page_rank(&view, config)?;
    Ok(publish(graph, result))
}

/// Same as [`rank_airports`], starting from previously computed ranks.
///
/// Airports missing from `initial` start at 0.
pub fn rank_airports_from(
    graph: &mut RouteGraph,
    config: &PageRankConfig,
    initial: &IndexMap<AirportId, f64>,
) -> AlgoResult<RankOutcome> {
    let view = graph.freeze();
    let start: Vec<f64> = graph
        .airports()
        .map(|airport| initial.get(&airport.id).copied().unwrap_or(0.0))
        .collect();
    let result = page_rank_from(&view, config, &start)?;
    Ok(publish(graph, result))
}

fn publish(graph: &mut RouteGraph, result: PageRankResult) -> RankOutcome {
    info!(
        "PageRank finished after {} iterations (converged: {})",
        result.iterations, result.converged
    );

    graph.publish_ranks(&result.scores);

    let ranks = graph
        .airports()
        .map(|airport| airport.id.clone())
        .zip(result.scores)
        .collect();

    RankOutcome {
        ranks,
        iterations: result.iterations,
        converged: result.converged,
    }
}
