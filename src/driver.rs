//! Geodesic edge betweenness centrality: configuration and entry points.

use crate::accumulate::gebc_serial;
use crate::distribute::WorkDistributor;
use crate::export::CentralityScores;
use crate::graph::{AdjacencyGraph, AdjacencyList};
use crate::Result;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct GebcConfig {
    /// Distribute the pair loop over a worker pool instead of running it on the caller.
    pub parallel: bool,
    /// Input labels are not a contiguous range and must be remapped.
    pub sparse_labels: bool,
    /// Pool size when `parallel` is set; `0` means one worker per available core.
    pub workers: usize,
    /// Divide every value by the maximum before returning.
    pub normalize: bool,
}

impl Default for GebcConfig {
    fn default() -> Self {
        Self { parallel: false, sparse_labels: false, workers: 0, normalize: false }
    }
}

impl GebcConfig {
    /// Worker count actually used: 1 when serial, otherwise `workers` or the core count.
    pub fn effective_workers(&self) -> usize {
        if !self.parallel {
            return 1;
        }
        match self.workers {
            0 => std::thread::available_parallelism().map_or(1, |n| n.get()),
            w => w,
        }
    }
}

/// Centrality of every vertex of an already built graph.
///
/// `config.sparse_labels` is ignored here; the graph carries its own label map.
///
/// # Errors
///
/// Propagates worker failures from [`WorkDistributor::run`]. Nothing partial is returned.
pub fn geodesic_edge_betweenness(
    graph: &AdjacencyGraph,
    config: GebcConfig,
) -> Result<CentralityScores> {
    let start = Instant::now();
    let workers = config.effective_workers();
    let values = if config.parallel {
        let run = WorkDistributor::new(workers)?.run(graph)?;
        for report in &run.reports {
            tracing::debug!(
                worker = report.worker,
                sources = report.stats.sources,
                pairs = report.stats.pairs,
                paths = report.stats.paths,
                "worker report"
            );
        }
        run.gebc
    } else {
        gebc_serial(graph)
    };

    tracing::info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        parallel = config.parallel,
        workers,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "geodesic betweenness computed"
    );

    let scores = CentralityScores::new(values, graph.labels().clone());
    Ok(if config.normalize { scores.normalized() } else { scores })
}

/// Build the graph from labeled adjacency and compute its centrality.
///
/// An empty adjacency yields empty scores.
///
/// # Errors
///
/// Any validation error from [`AdjacencyGraph::build`], or a worker failure.
pub fn compute(adjacency: &AdjacencyList, config: GebcConfig) -> Result<CentralityScores> {
    let graph = AdjacencyGraph::build(adjacency, config.sparse_labels)?;
    geodesic_edge_betweenness(&graph, config)
}
