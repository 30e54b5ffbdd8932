//! Shared utilities for graph algorithms
//!
//! Provides a read-only, dense view of the graph topology for algorithm execution.

/// A dense, integer-indexed view of a weighted directed graph.
///
/// Only the reverse adjacency is materialised, in Compressed Sparse Column
/// form: for every node, the contiguous run of its predecessors together
/// with the weight of each predecessor's edge into it. Alongside it the view
/// keeps the aggregated outgoing weight of every node, which is all PageRank
/// needs from the forward direction.
#[derive(Debug, Clone, Default)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Aggregated outgoing weight per node. Zero marks a sink.
    pub out_weights: Vec<f64>,

    /// Offsets into `in_sources`/`in_weights`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of predecessor node indices
    pub in_sources: Vec<usize>,
    /// Edge weights: aligned with `in_sources`
    pub in_weights: Vec<f64>,
}

impl GraphView {
    /// Build a view from per-node incoming lists.
    ///
    /// `incoming[i]` holds `(predecessor, weight)` pairs for node `i`.
    /// Pairs whose predecessor has a zero outgoing weight are dropped, so the
    /// solver never divides by a sink's outgoing sum.
    ///
    /// # Panics
    ///
    /// Panics if `incoming` does not have one list per node, or if a
    /// predecessor index is `>= out_weights.len()`.
    pub fn from_incoming(out_weights: Vec<f64>, incoming: Vec<Vec<(usize, f64)>>) -> Self {
        let node_count = out_weights.len();
        assert_eq!(
            incoming.len(),
            node_count,
            "incoming lists must match the node count"
        );

        let edge_total: usize = incoming.iter().map(Vec::len).sum();
        let mut in_offsets = Vec::with_capacity(node_count + 1);
        let mut in_sources = Vec::with_capacity(edge_total);
        let mut in_weights = Vec::with_capacity(edge_total);

        in_offsets.push(0);
        for sources in incoming {
            for (source, weight) in sources {
                assert!(source < node_count, "predecessor {} out of range", source);
                if out_weights[source] != 0.0 {
                    in_sources.push(source);
                    in_weights.push(weight);
                }
            }
            in_offsets.push(in_sources.len());
        }

        GraphView {
            node_count,
            out_weights,
            in_offsets,
            in_sources,
            in_weights,
        }
    }

    /// Build a view from a flat `(origin, destination, weight)` edge list.
    ///
    /// Outgoing sums are derived from the list. Repeated pairs are kept as
    /// separate entries; their contributions add up the same way a single
    /// aggregated entry would.
    ///
    /// # Panics
    ///
    /// Panics if an endpoint index is `>= node_count`.
    pub fn from_weighted_edges(
        node_count: usize,
        edges: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> Self {
        let mut out_weights = vec![0.0; node_count];
        let mut incoming: Vec<Vec<(usize, f64)>> = vec![Vec::new(); node_count];

        for (origin, destination, weight) in edges {
            assert!(
                origin < node_count && destination < node_count,
                "edge {} -> {} out of range for {} nodes",
                origin,
                destination,
                node_count
            );
            out_weights[origin] += weight;
            incoming[destination].push((origin, weight));
        }

        Self::from_incoming(out_weights, incoming)
    }

    /// Number of edges present in the reverse index
    pub fn edge_count(&self) -> usize {
        self.in_sources.len()
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_sources[start..end]
    }

    /// Get weights for incoming edges of a node, aligned with `predecessors`
    pub fn in_edge_weights(&self, idx: usize) -> &[f64] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_weights[start..end]
    }

    /// Whether a node has no outgoing weight
    pub fn is_sink(&self, idx: usize) -> bool {
        self.out_weights[idx] == 0.0
    }

    /// Indices of every sink node
    pub fn sinks(&self) -> Vec<usize> {
        (0..self.node_count).filter(|&i| self.is_sink(i)).collect()
    }
}
