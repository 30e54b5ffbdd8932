//! Route views handed out by the graph
//!
//! Routes have no identity of their own: they live in the origin airport's
//! adjacency, keyed by destination. These types are borrowed views over it.

use super::types::AirportId;

/// An aggregated directed route
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route<'a> {
    /// Airport the route departs from
    pub origin: &'a AirportId,

    /// Airport the route arrives at
    pub destination: &'a AirportId,

    /// Sum of the weights of every route record between the pair
    pub weight: f64,
}

/// One predecessor of an airport, as seen from the destination side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncomingRoute<'a> {
    /// Predecessor airport
    pub origin: &'a AirportId,

    /// Weight of the predecessor's route into the airport
    pub weight: f64,

    /// Total outgoing weight of the predecessor
    pub origin_out_weight: f64,
}

impl IncomingRoute<'_> {
    /// Fraction of the predecessor's outgoing weight carried by this route
    pub fn share(&self) -> f64 {
        self.weight / self.origin_out_weight
    }
}
