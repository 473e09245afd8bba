//! Per-pair breadth-first search recording **all** shortest-path predecessors.
//!
//! The result is a multi-parent DAG: `parents(v)` lists every neighbor of `v` that sits one
//! hop closer to the source. Walking parent edges from the target always ends at the source,
//! and every such walk is a distinct geodesic.
//!
//! Buffers are owned by [`GeodesicSearch`] and reused across calls; a "visited stamp"
//! (`Vec<u32>`) marks which entries belong to the current search so nothing is cleared
//! between pairs.

use crate::graph::GraphRef;

/// Reusable BFS scratch space.
#[derive(Debug, Clone, Default)]
pub struct GeodesicSearch {
    stamp: Vec<u32>,
    epoch: u32,
    distance: Vec<u32>,
    parents: Vec<Vec<usize>>,
    queue: Vec<usize>,
}

impl GeodesicSearch {
    pub fn new(n: usize) -> Self {
        Self {
            stamp: vec![0; n],
            epoch: 0,
            distance: vec![0; n],
            parents: vec![Vec::new(); n],
            queue: Vec::with_capacity(n),
        }
    }

    /// Shortest-path DAG from `source` to `target`, or `None` if `target` is unreachable.
    ///
    /// The search stops as soon as `target` is dequeued. FIFO order guarantees every vertex
    /// one layer closer has been expanded by then, so the parent sets of `target` and of
    /// everything strictly closer than it are complete. Vertices at `target`'s distance or
    /// farther may have partial parent sets; they are never on a geodesic to `target`.
    ///
    /// Implementations of [`GraphRef`] must not repeat a neighbor within one list, or the
    /// repeated edge is recorded as a second parent.
    ///
    /// Panics if `source` or `target` is out of range.
    pub fn search<G: GraphRef>(
        &mut self,
        graph: &G,
        source: usize,
        target: usize,
    ) -> Option<GeodesicDag<'_>> {
        let n = graph.node_count();
        assert!(source < n && target < n, "pair ({source}, {target}) out of range for {n} vertices");
        if self.stamp.len() < n {
            self.stamp.resize(n, 0);
            self.distance.resize(n, 0);
            self.parents.resize_with(n, Vec::new);
        }

        self.epoch = self.epoch.wrapping_add(1);
        if self.epoch == 0 {
            // Stamps from 2^32 searches ago would alias the new epoch.
            self.stamp.fill(0);
            self.epoch = 1;
        }
        let epoch = self.epoch;

        self.stamp[source] = epoch;
        self.distance[source] = 0;
        self.parents[source].clear();
        self.queue.clear();
        self.queue.push(source);

        let mut head = 0usize;
        let mut reached = false;
        while head < self.queue.len() {
            let cur = self.queue[head];
            head += 1;
            if cur == target {
                reached = true;
                break;
            }
            let next = self.distance[cur] + 1;
            for &nx in graph.neighbors_ref(cur) {
                if self.stamp[nx] != epoch {
                    self.stamp[nx] = epoch;
                    self.distance[nx] = next;
                    self.parents[nx].clear();
                    self.parents[nx].push(cur);
                    self.queue.push(nx);
                } else if self.distance[nx] == next {
                    // Already discovered from the same layer: `cur` is another predecessor.
                    self.parents[nx].push(cur);
                }
            }
        }

        reached.then(|| GeodesicDag {
            source,
            target,
            epoch,
            stamp: &self.stamp,
            distance: &self.distance,
            parents: &self.parents,
        })
    }
}

/// Borrowed view of one search result.
#[derive(Debug, Clone, Copy)]
pub struct GeodesicDag<'a> {
    source: usize,
    target: usize,
    epoch: u32,
    stamp: &'a [u32],
    distance: &'a [u32],
    parents: &'a [Vec<usize>],
}

impl<'a> GeodesicDag<'a> {
    /// Size of the underlying scratch arrays (at least the graph's vertex count).
    pub fn capacity(&self) -> usize {
        self.stamp.len()
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Length of every geodesic between source and target, in edges.
    pub fn num_hops(&self) -> u32 {
        self.distance[self.target]
    }

    /// Hop count from the source, if `v` was reached before the search stopped.
    pub fn distance(&self, v: usize) -> Option<u32> {
        (self.stamp.get(v) == Some(&self.epoch)).then(|| self.distance[v])
    }

    /// Shortest-path predecessors of `v`, in discovery order. Empty for the source and for
    /// vertices the search never reached.
    pub fn parents(&self, v: usize) -> &'a [usize] {
        if v == self.source || self.stamp.get(v) != Some(&self.epoch) {
            return &[];
        }
        let parents: &'a [Vec<usize>] = self.parents;
        &parents[v]
    }

    /// Whether `v` is the root of the DAG (the search source). Path reconstruction ends here.
    pub fn is_root(&self, v: usize) -> bool {
        v == self.source
    }
}
