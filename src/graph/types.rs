//! Core type definitions for the route graph

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Unique identifier for an airport (an IATA code in practice)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct AirportId(String);

impl AirportId {
    pub fn new(id: impl Into<String>) -> Self {
        AirportId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AirportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AirportId {
    fn from(s: String) -> Self {
        AirportId(s)
    }
}

impl From<&str> for AirportId {
    fn from(s: &str) -> Self {
        AirportId(s.to_string())
    }
}

impl Borrow<str> for AirportId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
