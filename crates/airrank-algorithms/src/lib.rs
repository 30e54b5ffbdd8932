pub mod common;
pub mod error;
pub mod pagerank;

pub use common::GraphView;
pub use error::{AlgoError, AlgoResult};
pub use pagerank::{page_rank, page_rank_from, PageRankConfig, PageRankResult};
