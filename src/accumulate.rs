//! Fractional accumulation of per-pair path counts into a centrality vector.
//!
//! For a pair `(i, j)` with `g` geodesics, an interior vertex `v` lying on `h` of them
//! receives `h / g`. Summing over every unordered pair gives
//! \(\mathrm{gebc}(v) = \sum_{i<j} n_{ij}(v) / g_{ij}\).

use crate::components::connected_components;
use crate::distribute::WorkerState;
use crate::graph::GraphRef;
use crate::paths::{PairTally, PathEnumerator};
use crate::search::GeodesicSearch;
use crate::{Error, Result};

/// Dense centrality vector owned by a single compute unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    gebc: Vec<f64>,
}

impl Accumulator {
    pub fn new(n: usize) -> Self {
        Self { gebc: vec![0.0; n] }
    }

    /// Add `hits / num_paths` for every interior vertex of the pair.
    pub fn add_pair(&mut self, tally: &PairTally<'_>) {
        if tally.num_paths() == 0 {
            return;
        }
        let g = tally.num_paths() as f64;
        for (v, h) in tally.hits() {
            self.gebc[v] += h as f64 / g;
        }
    }

    /// Elementwise sum of another unit's partial vector.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if the lengths differ.
    pub fn merge(&mut self, partial: &[f64]) -> Result<()> {
        if partial.len() != self.gebc.len() {
            return Err(Error::InvalidParameter(format!(
                "partial vector has {} entries, expected {}",
                partial.len(),
                self.gebc.len()
            )));
        }
        for (acc, x) in self.gebc.iter_mut().zip(partial) {
            *acc += x;
        }
        Ok(())
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.gebc
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.gebc
    }
}

/// Work counters for one compute unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairStats {
    /// Outer indices processed.
    pub sources: usize,
    /// Connected pairs processed.
    pub pairs: u64,
    /// Geodesics enumerated over all pairs.
    pub paths: u64,
}

impl std::ops::AddAssign for PairStats {
    fn add_assign(&mut self, rhs: Self) {
        self.sources += rhs.sources;
        self.pairs += rhs.pairs;
        self.paths += rhs.paths;
    }
}

/// Scratch space plus local accumulator for one compute unit.
///
/// A unit of work is one outer index `i`: every pair `(i, j)` with `j > i` in the same
/// component is searched, enumerated and accumulated here.
#[derive(Debug, Clone)]
pub struct PairLoop {
    search: GeodesicSearch,
    paths: PathEnumerator,
    acc: Accumulator,
    stats: PairStats,
}

impl PairLoop {
    pub fn new(n: usize) -> Self {
        Self {
            search: GeodesicSearch::new(n),
            paths: PathEnumerator::new(n),
            acc: Accumulator::new(n),
            stats: PairStats::default(),
        }
    }

    /// Process every pair `(source, j)`, `j > source`, with `component[j] == component[source]`.
    pub fn run_source<G: GraphRef>(&mut self, graph: &G, component: &[usize], source: usize) {
        self.run_source_observed(graph, component, source, |_| {});
    }

    /// Like [`PairLoop::run_source`], reporting each phase change to `observe`.
    pub fn run_source_observed<G, F>(
        &mut self,
        graph: &G,
        component: &[usize],
        source: usize,
        mut observe: F,
    ) where
        G: GraphRef,
        F: FnMut(WorkerState),
    {
        self.stats.sources += 1;
        let c = component[source];
        for target in (source + 1)..graph.node_count() {
            if component[target] != c {
                continue;
            }
            observe(WorkerState::Searching);
            // Same component, so the search always reaches the target.
            let Some(dag) = self.search.search(graph, source, target) else {
                continue;
            };
            observe(WorkerState::Reconstructing);
            let tally = self.paths.tally(&dag);
            observe(WorkerState::Accumulating);
            self.acc.add_pair(&tally);
            self.stats.pairs += 1;
            self.stats.paths += tally.num_paths();
        }
    }

    pub fn stats(&self) -> PairStats {
        self.stats
    }

    pub fn into_parts(self) -> (Accumulator, PairStats) {
        (self.acc, self.stats)
    }
}

/// Geodesic edge betweenness of every vertex, on the calling thread.
pub fn gebc_serial<G: GraphRef>(graph: &G) -> Vec<f64> {
    let n = graph.node_count();
    let component = connected_components(graph);
    let mut unit = PairLoop::new(n);
    for source in 0..n.saturating_sub(1) {
        // Isolated vertices have no partner in their component.
        if graph.degree(source) == 0 {
            continue;
        }
        unit.run_source(graph, &component, source);
    }
    let (acc, stats) = unit.into_parts();
    tracing::debug!(sources = stats.sources, pairs = stats.pairs, paths = stats.paths, "serial pass done");
    acc.into_vec()
}
