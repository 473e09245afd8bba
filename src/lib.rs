//! `gebc`: geodesic edge betweenness centrality of undirected graphs.
//!
//! \[
//!   \mathrm{gebc}(v) = \sum_{i<j} \frac{n_{ij}(v)}{g_{ij}}
//! \]
//!
//! where \(g_{ij}\) is the number of shortest paths between `i` and `j` and \(n_{ij}(v)\) the
//! number of them passing through `v`. Each pair's shortest paths are reconstructed
//! explicitly from a multi-parent BFS DAG and enumerated with an explicit stack.
//!
//! Pipeline: [`graph`] → per-pair [`search`] → [`paths`] → [`accumulate`], with the outer
//! loop optionally spread over a worker pool by [`distribute`], and [`export`] mapping the
//! result back to the caller's labels.
//!
//! Public invariants (must not drift):
//! - **Node order**: dense vectors are indexed by vertex index `0..n-1`; [`CentralityScores`]
//!   maps them back to input labels.
//! - **Determinism**: serial runs are bit-identical across repeats. Distributed runs agree
//!   with serial ones up to floating-point summation order.
//! - **Endpoints never score**: a vertex gains nothing from pairs it is an endpoint of.
//!
//! Swappable (allowed to change without breaking the contract):
//! - scheduling of work units across workers
//! - internal buffers and reuse strategy
//!
//! # Example
//!
//! ```
//! use gebc::{compute, AdjacencyList, GebcConfig};
//!
//! // 0 - 1 - 2
//! let adj: AdjacencyList = [(0, vec![1]), (1, vec![0, 2]), (2, vec![1])].into_iter().collect();
//! let scores = compute(&adj, GebcConfig::default()).unwrap();
//! assert_eq!(scores.get(1), Some(1.0));
//! assert_eq!(scores.get(0), Some(0.0));
//! ```

pub mod accumulate;
pub mod betweenness;
pub mod components;
pub mod distribute;
pub mod driver;
pub mod export;
pub mod graph;
pub mod paths;
pub mod search;
pub mod topk;

pub use accumulate::{gebc_serial, Accumulator, PairLoop, PairStats};
pub use betweenness::brandes_betweenness;
pub use components::{component_count, connected_components};
pub use distribute::{DistributedRun, WorkDistributor, WorkerReport, WorkerState};
pub use driver::{compute, geodesic_edge_betweenness, GebcConfig};
pub use export::CentralityScores;
pub use graph::{parse_str_adjacency, AdjacencyGraph, AdjacencyList, GraphRef, LabelMap};
pub use paths::{geodesic_paths, PairTally, PathEnumerator};
pub use search::{GeodesicDag, GeodesicSearch};
pub use topk::{normalize_max, top_k};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("vertex {vertex} lists neighbor {neighbor}, which is not a vertex of the graph")]
    MalformedGraph { vertex: i64, neighbor: i64 },
    #[error("edge {from} -> {to} has no reverse edge")]
    AsymmetricEdge { from: i64, to: i64 },
    #[error("labels {min}..={max} are not contiguous for {count} vertices (enable sparse_labels)")]
    NonContiguousLabels { min: i64, max: i64, count: usize },
    #[error("invalid vertex label: {0:?}")]
    InvalidLabel(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("worker {worker} stopped before delivering its result")]
    WorkerLost { worker: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
