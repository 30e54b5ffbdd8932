//! PageRank algorithm implementation
//!
//! Weighted power iteration over the reverse index of a [`GraphView`].
//! Rank held by sink nodes is collected every iteration and re-injected
//! uniformly across all nodes, so the vector stays stochastic.

use super::common::GraphView;
use super::error::{AlgoError, AlgoResult};
use rayon::prelude::*;
use tracing::{debug, warn};

/// PageRank configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankConfig {
    /// Damping factor (usually 0.85), strictly between 0 and 1
    pub damping_factor: f64,
    /// Iteration cap
    pub max_iterations: usize,
    /// L1 distance between successive vectors below which the solve stops
    pub tolerance: f64,
    /// Node count from which the per-node update runs on the rayon pool
    pub parallel_threshold: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            max_iterations: 1000,
            tolerance: 1e-9,
            parallel_threshold: 4096,
        }
    }
}

impl PageRankConfig {
    /// Reject parameters the iteration cannot run with
    pub fn validate(&self) -> AlgoResult<()> {
        // Written as negated comparisons so NaN is rejected as well.
        if !(self.damping_factor > 0.0 && self.damping_factor < 1.0) {
            return Err(AlgoError::Configuration(format!(
                "damping factor must lie strictly between 0 and 1, got {}",
                self.damping_factor
            )));
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(AlgoError::Configuration(format!(
                "tolerance must be a positive finite number, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(AlgoError::Configuration(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of a PageRank solve
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankResult {
    /// Rank per dense node index, summing to 1
    pub scores: Vec<f64>,
    /// Iterations actually run
    pub iterations: usize,
    /// Whether the tolerance was met before the cap
    pub converged: bool,
}

impl PageRankResult {
    fn empty() -> Self {
        Self {
            scores: Vec::new(),
            iterations: 0,
            converged: true,
        }
    }
}

/// Calculate PageRank for the graph view, starting from the uniform vector
pub fn page_rank(view: &GraphView, config: &PageRankConfig) -> AlgoResult<PageRankResult> {
    config.validate()?;

    let n = view.node_count;
    if n == 0 {
        return Ok(PageRankResult::empty());
    }

    let scores = vec![1.0 / n as f64; n];
    iterate(view, config, scores)
}

/// Calculate PageRank starting from a caller-supplied vector.
///
/// The vector is normalized before the first iteration. It must match the
/// node count, hold only finite non-negative values and have a positive sum.
pub fn page_rank_from(
    view: &GraphView,
    config: &PageRankConfig,
    initial: &[f64],
) -> AlgoResult<PageRankResult> {
    config.validate()?;

    let n = view.node_count;
    if initial.len() != n {
        return Err(AlgoError::Configuration(format!(
            "initial vector has {} entries, graph has {} nodes",
            initial.len(),
            n
        )));
    }
    if n == 0 {
        return Ok(PageRankResult::empty());
    }
    if let Some(idx) = first_unstable(initial) {
        return Err(AlgoError::Configuration(format!(
            "initial rank for node index {} is {}",
            idx, initial[idx]
        )));
    }

    let total: f64 = initial.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return Err(AlgoError::Configuration(format!(
            "initial vector must have a positive finite sum, got {}",
            total
        )));
    }

    let scores = initial.iter().map(|r| r / total).collect();
    iterate(view, config, scores)
}

fn iterate(
    view: &GraphView,
    config: &PageRankConfig,
    mut scores: Vec<f64>,
) -> AlgoResult<PageRankResult> {
    let n = view.node_count;
    let n_f64 = n as f64;
    let d = config.damping_factor;
    let teleport = (1.0 - d) / n_f64;
    let parallel = n >= config.parallel_threshold;
    let sinks = view.sinks();

    debug!(
        nodes = n,
        edges = view.edge_count(),
        sinks = sinks.len(),
        parallel,
        "Starting PageRank"
    );

    // Read buffer `scores`, write buffer `next_scores`; swapped once per iteration.
    let mut next_scores = vec![0.0; n];

    for iteration in 1..=config.max_iterations {
        let sink_mass = sinks.iter().map(|&j| scores[j]).sum::<f64>() / n_f64;
        let base = d * sink_mass + teleport;

        let update = |i: usize| -> f64 {
            let incoming: f64 = view
                .predecessors(i)
                .iter()
                .zip(view.in_edge_weights(i))
                .map(|(&j, &w)| scores[j] * w / view.out_weights[j])
                .sum();
            d * incoming + base
        };

        if parallel {
            next_scores
                .par_iter_mut()
                .enumerate()
                .for_each(|(i, score)| *score = update(i));
        } else {
            for (i, score) in next_scores.iter_mut().enumerate() {
                *score = update(i);
            }
        }

        if let Some(node) = first_unstable(&next_scores) {
            return Err(AlgoError::NumericInstability { iteration, node });
        }

        let total = sum(&next_scores, parallel);
        if !(total > 0.0 && total.is_finite()) {
            return Err(AlgoError::NumericInstability {
                iteration,
                node: argmax(&next_scores),
            });
        }
        if parallel {
            next_scores.par_iter_mut().for_each(|score| *score /= total);
        } else {
            next_scores.iter_mut().for_each(|score| *score /= total);
        }

        let delta: f64 = scores
            .iter()
            .zip(next_scores.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut scores, &mut next_scores);
        debug!(iteration, delta, sink_mass, "PageRank iteration");

        if delta < config.tolerance {
            return Ok(PageRankResult {
                scores,
                iterations: iteration,
                converged: true,
            });
        }
    }

    warn!(
        max_iterations = config.max_iterations,
        tolerance = config.tolerance,
        "PageRank reached the iteration cap without converging"
    );

    Ok(PageRankResult {
        scores,
        iterations: config.max_iterations,
        converged: false,
    })
}

/// Index of the first value that is non-finite or negative
fn first_unstable(values: &[f64]) -> Option<usize> {
    values.iter().position(|v| !(v.is_finite() && *v >= 0.0))
}

fn sum(values: &[f64], parallel: bool) -> f64 {
    if parallel {
        values.par_iter().sum()
    } else {
        values.iter().sum()
    }
}

fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
