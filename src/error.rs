//! Error types for the AirRank crate

use crate::algo::AlgoError;
use crate::graph::GraphError;
use thiserror::Error;

/// Errors that can occur when loading, ranking or exporting
#[derive(Error, Debug)]
pub enum AirRankError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader/writer error that is not confined to a single record
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration file could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Graph model rejected an operation
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Solver failed
    #[error("Ranking error: {0}")]
    Algo(#[from] AlgoError),
}

pub type AirRankResult<T> = Result<T, AirRankError>;
