//! File configuration
//!
//! Solver parameters and output options, loaded from YAML. Every field has a
//! default, so a partial file (or none at all) is valid.

use crate::algo::PageRankConfig;
use crate::error::AirRankResult;
use crate::export::ExportOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Solver section of the configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Damping factor (usually 0.85)
    pub damping_factor: f64,
    /// L1 convergence tolerance
    pub tolerance: f64,
    /// Iteration cap
    pub max_iterations: usize,
    /// Node count from which iterations run in parallel
    pub parallel_threshold: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        let defaults = PageRankConfig::default();
        Self {
            damping_factor: defaults.damping_factor,
            tolerance: defaults.tolerance,
            max_iterations: defaults.max_iterations,
            parallel_threshold: defaults.parallel_threshold,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    pub solver: SolverSettings,
    pub output: ExportOptions,
}

impl RankerConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> AirRankResult<Self> {
        let path = path.as_ref();
        info!("Loading configuration from {:?}", path);
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parse configuration from a YAML document
    pub fn from_yaml_str(contents: &str) -> AirRankResult<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Render the configuration as YAML
    pub fn to_yaml_string(&self) -> AirRankResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Solver parameters. Validation happens when the solver runs.
    pub fn solver_config(&self) -> PageRankConfig {
        PageRankConfig {
            damping_factor: self.solver.damping_factor,
            max_iterations: self.solver.max_iterations,
            tolerance: self.solver.tolerance,
            parallel_threshold: self.solver.parallel_threshold,
        }
    }
}
