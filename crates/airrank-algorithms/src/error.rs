//! Error types for the rank solver

use thiserror::Error;

/// Errors that can occur while solving
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgoError {
    /// A solver parameter or initial vector was rejected before iterating
    #[error("Invalid solver configuration: {0}")]
    Configuration(String),

    /// A rank value became non-finite or negative mid-iteration
    #[error("Numeric instability at iteration {iteration}, node index {node}")]
    NumericInstability { iteration: usize, node: usize },
}

pub type AlgoResult<T> = Result<T, AlgoError>;
