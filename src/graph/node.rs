//! Airport node of the route graph

use super::types::AirportId;
use rustc_hash::FxHashMap;

/// Display name given to airports that were only seen as a route endpoint
pub const PLACEHOLDER_NAME: &str = "unknown";

/// A node in the route graph
///
/// Owns its outgoing adjacency: one aggregated weight per destination,
/// keyed by the destination's dense index in the owning graph.
#[derive(Debug, Clone)]
pub struct Airport {
    /// Unique identifier for this airport
    pub id: AirportId,

    /// Display name
    pub name: String,

    /// Set when the airport was created implicitly by a route and never declared
    pub placeholder: bool,

    /// Sum of all outgoing route weights
    out_weight: f64,

    /// Rank published by the last solve (0 until then)
    rank: f64,

    /// Aggregated outgoing routes: destination index -> weight
    routes: FxHashMap<usize, f64>,
}

impl Airport {
    /// Create a declared airport
    pub fn new(id: AirportId, name: impl Into<String>) -> Self {
        Airport {
            id,
            name: name.into(),
            placeholder: false,
            out_weight: 0.0,
            rank: 0.0,
            routes: FxHashMap::default(),
        }
    }

    /// Create an airport that is only known as a route endpoint
    pub fn placeholder(id: AirportId) -> Self {
        Airport {
            placeholder: true,
            ..Airport::new(id, PLACEHOLDER_NAME)
        }
    }

    pub fn out_weight(&self) -> f64 {
        self.out_weight
    }

    pub fn rank(&self) -> f64 {
        self.rank
    }

    /// A sink has routes arriving but none departing
    pub fn is_sink(&self) -> bool {
        self.out_weight == 0.0
    }

    /// Number of distinct destinations
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Aggregated weight of the route to `destination` (0 when absent)
    pub fn route_weight(&self, destination: usize) -> f64 {
        self.routes.get(&destination).copied().unwrap_or(0.0)
    }

    /// Outgoing routes as (destination index, weight)
    pub fn routes(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.routes.iter().map(|(&dest, &weight)| (dest, weight))
    }

    /// Accumulate `weight` on the route to `destination`.
    ///
    /// Returns true when the route did not exist before.
    pub(crate) fn add_route(&mut self, destination: usize, weight: f64) -> bool {
        self.out_weight += weight;
        let mut created = false;
        *self.routes.entry(destination).or_insert_with(|| {
            created = true;
            0.0
        }) += weight;
        created
    }

    /// Replace a placeholder's name with a declared one
    pub(crate) fn declare(&mut self, name: String) {
        self.name = name;
        self.placeholder = false;
    }

    pub(crate) fn set_rank(&mut self, rank: f64) {
        self.rank = rank;
    }
}
