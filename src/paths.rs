//! Enumeration of every geodesic in a [`GeodesicDag`].
//!
//! The DAG is read backwards: rooted at the target, with every leaf equal to the source.
//! Each root-to-leaf walk is one geodesic. Walks are generated with an explicit stack and a
//! per-vertex cursor into its parent list, so depth is bounded by the path length (not by
//! the call stack) and shared suffixes are revisited per path without being re-pushed.
//!
//! Invariants:
//! - Every geodesic is produced exactly once.
//! - Within one geodesic a vertex appears at most once (BFS layers are strictly increasing).

use crate::graph::GraphRef;
use crate::search::{GeodesicDag, GeodesicSearch};

/// Reusable stack, cursors and hit counters for path enumeration.
#[derive(Debug, Clone, Default)]
pub struct PathEnumerator {
    stack: Vec<usize>,
    cursor: Vec<usize>,
    hits: Vec<u64>,
    touched: Vec<usize>,
}

/// Per-pair result of [`PathEnumerator::tally`].
#[derive(Debug, Clone, Copy)]
pub struct PairTally<'a> {
    num_paths: u64,
    hits: &'a [u64],
    touched: &'a [usize],
}

impl<'a> PairTally<'a> {
    /// Number of distinct geodesics between the pair.
    pub fn num_paths(&self) -> u64 {
        self.num_paths
    }

    /// Number of geodesics passing through `v`. Always 0 for the two endpoints.
    pub fn hits_of(&self, v: usize) -> u64 {
        self.hits.get(v).copied().unwrap_or(0)
    }

    /// `(vertex, hits)` for every interior vertex of at least one geodesic.
    pub fn hits(&self) -> impl Iterator<Item = (usize, u64)> + 'a {
        let (hits, touched) = (self.hits, self.touched);
        touched.iter().map(move |&v| (v, hits[v]))
    }
}

impl PathEnumerator {
    pub fn new(n: usize) -> Self {
        Self {
            stack: Vec::new(),
            cursor: vec![0; n],
            hits: vec![0; n],
            touched: Vec::new(),
        }
    }

    /// Call `f` once per geodesic and return how many there were.
    ///
    /// `f` receives the path from the target down to the vertex adjacent to the source; the
    /// source itself is never pushed. For an adjacent pair that slice is just `[target]`.
    pub fn for_each_path<F: FnMut(&[usize])>(&mut self, dag: &GeodesicDag<'_>, f: F) -> u64 {
        self.ensure_capacity(dag.capacity());
        walk_paths(&mut self.stack, &mut self.cursor, dag, f)
    }

    /// Count geodesics and, per interior vertex, how many of them pass through it.
    ///
    /// The target is on every stack and the source on none; the target is skipped when
    /// counting so neither endpoint scores for its own pair.
    pub fn tally(&mut self, dag: &GeodesicDag<'_>) -> PairTally<'_> {
        self.ensure_capacity(dag.capacity());
        for &v in &self.touched {
            self.hits[v] = 0;
        }
        self.touched.clear();

        let hits = &mut self.hits;
        let touched = &mut self.touched;
        let num_paths = walk_paths(&mut self.stack, &mut self.cursor, dag, |path| {
            for &v in &path[1..] {
                if hits[v] == 0 {
                    touched.push(v);
                }
                hits[v] += 1;
            }
        });

        PairTally { num_paths, hits: &self.hits, touched: &self.touched }
    }

    fn ensure_capacity(&mut self, n: usize) {
        if self.cursor.len() < n {
            self.cursor.resize(n, 0);
            self.hits.resize(n, 0);
        }
    }
}

fn walk_paths<F: FnMut(&[usize])>(
    stack: &mut Vec<usize>,
    cursor: &mut [usize],
    dag: &GeodesicDag<'_>,
    mut f: F,
) -> u64 {
    let target = dag.target();
    stack.clear();
    if dag.is_root(target) {
        return 0;
    }

    let mut num_paths = 0u64;
    cursor[target] = 0;
    stack.push(target);
    while let Some(&v) = stack.last() {
        let parents = dag.parents(v);
        let slot = cursor[v];
        if slot < parents.len() {
            let p = parents[slot];
            cursor[v] = slot + 1;
            if dag.is_root(p) {
                num_paths += 1;
                f(stack.as_slice());
            } else {
                cursor[p] = 0;
                stack.push(p);
            }
        } else {
            // Exhausted: reset so another branch sharing this suffix can walk it again.
            cursor[v] = 0;
            stack.pop();
        }
    }
    num_paths
}

/// Every geodesic from `source` to `target`, each listed `source ..= target`.
///
/// Empty if `target` is unreachable. Materializes all paths, so only suitable when their
/// number is small; use [`PathEnumerator::tally`] for counting.
///
/// Panics if either vertex is out of range, including when `source == target`.
pub fn geodesic_paths<G: GraphRef>(graph: &G, source: usize, target: usize) -> Vec<Vec<usize>> {
    let n = graph.node_count();
    assert!(source < n && target < n, "pair ({source}, {target}) out of range for {n} vertices");
    if source == target {
        return vec![vec![source]];
    }
    let mut search = GeodesicSearch::new(n);
    let Some(dag) = search.search(graph, source, target) else {
        return Vec::new();
    };
    let mut enumerator = PathEnumerator::new(n);
    let mut paths = Vec::new();
    enumerator.for_each_path(&dag, |stack| {
        let mut path = Vec::with_capacity(stack.len() + 1);
        path.push(source);
        path.extend(stack.iter().rev());
        paths.push(path);
    });
    paths
}
