//! In-memory route graph
//!
//! Airports are kept in insertion order, which doubles as the dense index
//! used by the solver. Every airport owns its aggregated outgoing routes and
//! the graph keeps a predecessor list per airport, filled as routes are
//! created, so reverse lookups never scan the edge set.

use super::edge::{IncomingRoute, Route};
use super::node::Airport;
use super::types::AirportId;
use airrank_algorithms::GraphView;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Invalid weight {weight} for route {origin} -> {destination}: must be positive and finite")]
    InvalidWeight {
        origin: AirportId,
        destination: AirportId,
        weight: f64,
    },

    #[error("Airport identifier must not be empty")]
    EmptyAirportId,
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory route graph
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    /// Airport storage: AirportId -> Airport, dense index = insertion position
    airports: IndexMap<AirportId, Airport, FxBuildHasher>,

    /// Predecessor indices for each airport, in route creation order
    incoming: Vec<Vec<usize>>,

    /// Number of distinct (origin, destination) pairs
    edge_count: usize,

    /// Sum of all route weights
    total_weight: f64,
}

impl RouteGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an airport.
    ///
    /// Idempotent on `id`: an existing declared airport keeps its name, an
    /// existing placeholder takes the declared name. Returns the dense index
    /// and whether the airport was newly inserted.
    pub fn add_node(
        &mut self,
        id: impl Into<AirportId>,
        name: impl Into<String>,
    ) -> GraphResult<(usize, bool)> {
        let id = id.into();
        if id.is_empty() {
            return Err(GraphError::EmptyAirportId);
        }

        if let Some((idx, _, airport)) = self.airports.get_full_mut(&id) {
            if airport.placeholder {
                debug!("Upgrading placeholder airport {}", id);
                airport.declare(name.into());
            }
            return Ok((idx, false));
        }

        Ok((self.insert(Airport::new(id, name)), true))
    }

    /// Add a directed route of `weight` from `origin` to `destination`.
    ///
    /// Missing endpoints are created as placeholders. Weight accumulates on
    /// the existing (origin, destination) entry when there is one.
    pub fn add_edge(
        &mut self,
        origin: impl Into<AirportId>,
        destination: impl Into<AirportId>,
        weight: f64,
    ) -> GraphResult<()> {
        let origin = origin.into();
        let destination = destination.into();

        if origin.is_empty() || destination.is_empty() {
            return Err(GraphError::EmptyAirportId);
        }
        if !(weight > 0.0 && weight.is_finite()) {
            return Err(GraphError::InvalidWeight {
                origin,
                destination,
                weight,
            });
        }

        let o = self.ensure(origin);
        let d = self.ensure(destination);

        if self.airports[o].add_route(d, weight) {
            self.incoming[d].push(o);
            self.edge_count += 1;
        }
        self.total_weight += weight;

        Ok(())
    }

    /// Add a single route record (weight 1)
    pub fn add_route(
        &mut self,
        origin: impl Into<AirportId>,
        destination: impl Into<AirportId>,
    ) -> GraphResult<()> {
        self.add_edge(origin, destination, 1.0)
    }

    fn ensure(&mut self, id: AirportId) -> usize {
        match self.airports.get_index_of(&id) {
            Some(idx) => idx,
            None => {
                debug!("Creating placeholder airport {}", id);
                self.insert(Airport::placeholder(id))
            }
        }
    }

    fn insert(&mut self, airport: Airport) -> usize {
        let (idx, _) = self.airports.insert_full(airport.id.clone(), airport);
        self.incoming.push(Vec::new());
        idx
    }

    /// Check if an airport exists
    pub fn contains(&self, id: &str) -> bool {
        self.airports.contains_key(id)
    }

    /// Dense index of an airport
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.airports.get_index_of(id)
    }

    /// Get an airport by ID
    pub fn airport(&self, id: &str) -> Option<&Airport> {
        self.airports.get(id)
    }

    /// Get an airport by dense index
    pub fn airport_at(&self, idx: usize) -> Option<&Airport> {
        self.airports.get_index(idx).map(|(_, airport)| airport)
    }

    /// All airports in insertion order
    pub fn airports(&self) -> impl Iterator<Item = &Airport> {
        self.airports.values()
    }

    /// Get total number of airports
    pub fn node_count(&self) -> usize {
        self.airports.len()
    }

    /// Get number of aggregated routes
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Sum of every route weight added so far
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Total outgoing weight of an airport; 0 marks a sink
    pub fn outgoing_weight(&self, id: &str) -> Option<f64> {
        self.airports.get(id).map(Airport::out_weight)
    }

    pub fn is_sink(&self, id: &str) -> Option<bool> {
        self.airports.get(id).map(Airport::is_sink)
    }

    /// Airports without outgoing routes
    pub fn sinks(&self) -> impl Iterator<Item = &Airport> {
        self.airports.values().filter(|a| a.is_sink())
    }

    /// Airports that were referenced by a route but never declared
    pub fn placeholders(&self) -> impl Iterator<Item = &Airport> {
        self.airports.values().filter(|a| a.placeholder)
    }

    /// Predecessors of an airport with their route weight and outgoing sum.
    ///
    /// Empty for unknown ids.
    pub fn incoming_edges(&self, id: &str) -> Vec<IncomingRoute<'_>> {
        let Some(dest) = self.airports.get_index_of(id) else {
            return Vec::new();
        };

        self.incoming[dest]
            .iter()
            .map(|&o| {
                let origin = &self.airports[o];
                IncomingRoute {
                    origin: &origin.id,
                    weight: origin.route_weight(dest),
                    origin_out_weight: origin.out_weight(),
                }
            })
            .collect()
    }

    /// Every aggregated route
    pub fn routes(&self) -> impl Iterator<Item = Route<'_>> {
        self.airports.values().flat_map(move |origin| {
            origin.routes().map(move |(dest, weight)| Route {
                origin: &origin.id,
                destination: &self.airports[dest].id,
                weight,
            })
        })
    }

    /// Snapshot the topology as a dense reverse-adjacency view for the solver
    pub fn freeze(&self) -> GraphView {
        let out_weights = self.airports.values().map(Airport::out_weight).collect();
        let incoming = self
            .incoming
            .iter()
            .enumerate()
            .map(|(dest, origins)| {
                origins
                    .iter()
                    .map(|&o| (o, self.airports[o].route_weight(dest)))
                    .collect()
            })
            .collect();

        GraphView::from_incoming(out_weights, incoming)
    }

    /// Airport names keyed by id, in insertion order
    pub fn names(&self) -> IndexMap<AirportId, String> {
        self.airports
            .iter()
            .map(|(id, airport)| (id.clone(), airport.name.clone()))
            .collect()
    }

    /// Ranks published by the last solve, keyed by id
    pub fn ranks(&self) -> IndexMap<AirportId, f64> {
        self.airports
            .iter()
            .map(|(id, airport)| (id.clone(), airport.rank()))
            .collect()
    }

    /// Write a solver score vector (dense index order) back into the airports
    pub(crate) fn publish_ranks(&mut self, scores: &[f64]) {
        debug_assert_eq!(scores.len(), self.airports.len());
        for (airport, &score) in self.airports.values_mut().zip(scores) {
            airport.set_rank(score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_node_is_idempotent() {
        let mut graph = RouteGraph::new();
        let a = graph.add_node("BCN", "Barcelona, Spain").unwrap();
        let b = graph.add_node("BCN", "Something else").unwrap();

        assert_eq!(a, (0, true));
        assert_eq!(b, (0, false));
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.airport("BCN").unwrap().name, "Barcelona, Spain");
    }

    #[test]
    fn test_lookup_by_id_and_index() {
        let mut graph = RouteGraph::new();
        graph.add_node("BCN", "Barcelona, Spain").unwrap();
        graph.add_route("MAD", "BCN").unwrap();

        assert!(graph.contains("MAD"));
        assert!(!graph.contains("JFK"));
        assert_eq!(graph.index_of("BCN"), Some(0));
        assert_eq!(graph.index_of("MAD"), Some(1));
        assert_eq!(graph.index_of("JFK"), None);
        assert_eq!(graph.airport_at(1).unwrap().id.as_str(), "MAD");
        assert!(graph.airport_at(2).is_none());
    }

    #[test]
    fn test_empty_id_rejected() {
        let mut graph = RouteGraph::new();
        assert_eq!(graph.add_node("", "Nowhere"), Err(GraphError::EmptyAirportId));
        assert_eq!(graph.add_route("BCN", ""), Err(GraphError::EmptyAirportId));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_edge_creates_placeholders() {
        let mut graph = RouteGraph::new();
        graph.add_route("BCN", "JFK").unwrap();

        assert_eq!(graph.node_count(), 2);
        assert!(graph.airport("BCN").unwrap().placeholder);
        assert!(graph.airport("JFK").unwrap().placeholder);
        assert_eq!(graph.placeholders().count(), 2);

        // Declaring later upgrades the placeholder in place
        let added = graph.add_node("JFK", "John F Kennedy Intl, United States").unwrap();
        assert_eq!(added, (1, false));
        let jfk = graph.airport("JFK").unwrap();
        assert!(!jfk.placeholder);
        assert_eq!(jfk.name, "John F Kennedy Intl, United States");
    }

    #[test]
    fn test_repeated_edges_accumulate() {
        let mut graph = RouteGraph::new();
        graph.add_route("BCN", "JFK").unwrap();
        graph.add_route("BCN", "JFK").unwrap();
        graph.add_edge("BCN", "JFK", 3.0).unwrap();
        graph.add_route("BCN", "LHR").unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.total_weight(), 6.0);
        assert_eq!(graph.outgoing_weight("BCN"), Some(6.0));
        assert_eq!(graph.outgoing_weight("JFK"), Some(0.0));
        assert_eq!(graph.outgoing_weight("ZZZ"), None);

        let routes: Vec<_> = graph.routes().filter(|r| r.destination.as_str() == "JFK").collect();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].weight, 5.0);
    }

    #[test]
    fn test_invalid_weight_rejected() {
        let mut graph = RouteGraph::new();
        for weight in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = graph.add_edge("BCN", "JFK", weight).unwrap_err();
            assert!(matches!(err, GraphError::InvalidWeight { .. }));
        }
        assert!(graph.is_empty());
    }

    #[test]
    fn test_sinks() {
        let mut graph = RouteGraph::new();
        graph.add_route("A", "B").unwrap();
        graph.add_route("B", "C").unwrap();
        graph.add_node("D", "Isolated").unwrap();

        let sinks: Vec<&str> = graph.sinks().map(|a| a.id.as_str()).collect();
        assert_eq!(sinks, vec!["C", "D"]);
        assert_eq!(graph.is_sink("A"), Some(false));
        assert_eq!(graph.is_sink("C"), Some(true));
    }

    #[test]
    fn test_incoming_edges() {
        let mut graph = RouteGraph::new();
        graph.add_edge("A", "C", 2.0).unwrap();
        graph.add_edge("A", "B", 2.0).unwrap();
        graph.add_edge("B", "C", 1.0).unwrap();
        graph.add_edge("A", "C", 1.0).unwrap();

        let incoming = graph.incoming_edges("C");
        assert_eq!(incoming.len(), 2);

        assert_eq!(incoming[0].origin.as_str(), "A");
        assert_eq!(incoming[0].weight, 3.0);
        assert_eq!(incoming[0].origin_out_weight, 5.0);
        assert!((incoming[0].share() - 0.6).abs() < 1e-12);

        assert_eq!(incoming[1].origin.as_str(), "B");
        assert_eq!(incoming[1].weight, 1.0);
        assert_eq!(incoming[1].origin_out_weight, 1.0);

        assert!(graph.incoming_edges("A").is_empty());
        assert!(graph.incoming_edges("missing").is_empty());
    }

    #[test]
    fn test_freeze_builds_reverse_index() {
        let mut graph = RouteGraph::new();
        graph.add_node("A", "Alpha").unwrap();
        graph.add_node("B", "Beta").unwrap();
        graph.add_node("C", "Gamma").unwrap();
        graph.add_edge("A", "C", 2.0).unwrap();
        graph.add_edge("B", "C", 1.0).unwrap();
        graph.add_edge("A", "B", 1.0).unwrap();

        let view = graph.freeze();
        assert_eq!(view.node_count, 3);
        assert_eq!(view.edge_count(), 3);
        assert_eq!(view.out_weights, vec![3.0, 1.0, 0.0]);
        assert_eq!(view.predecessors(2), &[0, 1]);
        assert_eq!(view.in_edge_weights(2), &[2.0, 1.0]);
        assert_eq!(view.predecessors(1), &[0]);
        assert_eq!(view.sinks(), vec![2]);
    }

    #[test]
    fn test_publish_ranks() {
        let mut graph = RouteGraph::new();
        graph.add_route("A", "B").unwrap();
        graph.publish_ranks(&[0.25, 0.75]);

        let ranks = graph.ranks();
        assert_eq!(ranks.get("A"), Some(&0.25));
        assert_eq!(ranks.get("B"), Some(&0.75));
        assert_eq!(graph.names().get("B").map(String::as_str), Some("unknown"));
    }
}
