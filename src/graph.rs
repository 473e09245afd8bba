//! Graph model: dense, validated, undirected adjacency.
//!
//! Algorithms in this crate are generic over [`GraphRef`], which hands out **borrowed**
//! neighbor slices so the per-pair BFS never allocates a neighbor list.
//!
//! [`AdjacencyGraph`] is the owned implementation built from labeled input. It keeps a
//! [`LabelMap`] so results can be reported against the caller's labels.

use crate::{Error, Result};
use std::collections::BTreeMap;

/// Labeled adjacency input: vertex label -> neighbor labels.
///
/// A `BTreeMap` so that keys iterate in ascending order and remapping is deterministic.
pub type AdjacencyList = BTreeMap<i64, Vec<i64>>;

/// A graph view that can return borrowed neighbor slices.
pub trait GraphRef {
    fn node_count(&self) -> usize;
    fn neighbors_ref(&self, node: usize) -> &[usize];
    fn degree(&self, node: usize) -> usize {
        self.neighbors_ref(node).len()
    }
}

/// Bidirectional map between caller labels and dense indices `0..n`.
///
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LabelMap {
    /// Labels are the contiguous range `min..min + len`; index = label - min.
    Offset { min: i64, len: usize },
    /// Arbitrary labels, sorted ascending; index = position.
    Sparse(Vec<i64>),
}

impl LabelMap {
    pub fn len(&self) -> usize {
        match self {
            LabelMap::Offset { len, .. } => *len,
            LabelMap::Sparse(labels) => labels.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn index_of(&self, label: i64) -> Option<usize> {
        match self {
            LabelMap::Offset { min, len } => {
                let offset = label.checked_sub(*min)?;
                let offset = usize::try_from(offset).ok()?;
                (offset < *len).then_some(offset)
            }
            LabelMap::Sparse(labels) => labels.binary_search(&label).ok(),
        }
    }

    /// Caller label of dense index `index`.
    ///
    /// Panics if `index >= self.len()`.
    pub fn label_of(&self, index: usize) -> i64 {
        match self {
            LabelMap::Offset { min, len } => {
                assert!(index < *len, "index {index} out of range for {len} labels");
                *min + index as i64
            }
            LabelMap::Sparse(labels) => labels[index],
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = i64> + '_ {
        (0..self.len()).map(move |i| self.label_of(i))
    }
}

/// Dense undirected graph with validated, symmetric adjacency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyGraph {
    adj: Vec<Vec<usize>>,
    labels: LabelMap,
}

impl AdjacencyGraph {
    /// Build from labeled adjacency.
    ///
    /// - With `sparse_labels == false`, labels must be contiguous (`min..=max` with no gaps);
    ///   the minimum does not have to be zero.
    /// - With `sparse_labels == true`, labels are remapped in ascending order to `0..n`.
    ///
    /// Self-loops are dropped and repeated neighbors collapsed; neither can change which
    /// vertices lie strictly between two others, but a repeated neighbor would otherwise
    /// be counted as a second parent during path reconstruction.
    ///
    /// # Errors
    ///
    /// - [`Error::NonContiguousLabels`] if labels have gaps and `sparse_labels` is off.
    /// - [`Error::MalformedGraph`] if a neighbor is not itself a key.
    /// - [`Error::AsymmetricEdge`] if an edge is listed in one direction only.
    pub fn build(adjacency: &AdjacencyList, sparse_labels: bool) -> Result<Self> {
        let n = adjacency.len();
        let (Some(&min), Some(&max)) = (adjacency.keys().next(), adjacency.keys().next_back())
        else {
            return Ok(Self { adj: Vec::new(), labels: LabelMap::Offset { min: 0, len: 0 } });
        };

        let labels = if sparse_labels {
            LabelMap::Sparse(adjacency.keys().copied().collect())
        } else {
            if i128::from(max) - i128::from(min) + 1 != n as i128 {
                return Err(Error::NonContiguousLabels { min, max, count: n });
            }
            LabelMap::Offset { min, len: n }
        };

        let mut adj: Vec<Vec<usize>> = Vec::with_capacity(n);
        for (&vertex, neighbors) in adjacency {
            let mut row = Vec::with_capacity(neighbors.len());
            for &neighbor in neighbors {
                let idx = labels
                    .index_of(neighbor)
                    .ok_or(Error::MalformedGraph { vertex, neighbor })?;
                row.push(idx);
            }
            adj.push(row);
        }

        let (self_loops, duplicates) = normalize_rows(&mut adj);
        if self_loops + duplicates > 0 {
            tracing::debug!(self_loops, duplicates, "dropped redundant adjacency entries");
        }
        check_symmetric(&adj).map_err(|(u, v)| Error::AsymmetricEdge {
            from: labels.label_of(u),
            to: labels.label_of(v),
        })?;

        tracing::debug!(vertices = n, min_label = min, sparse_labels, "graph built");
        Ok(Self { adj, labels })
    }

    /// Build from dense adjacency (`adj[i]` lists neighbors of vertex `i`); labels are `0..n`.
    ///
    /// # Errors
    ///
    /// Same validation as [`AdjacencyGraph::build`].
    pub fn from_dense(mut adj: Vec<Vec<usize>>) -> Result<Self> {
        let n = adj.len();
        for (vertex, row) in adj.iter().enumerate() {
            if let Some(&neighbor) = row.iter().find(|&&nb| nb >= n) {
                return Err(Error::MalformedGraph {
                    vertex: vertex as i64,
                    neighbor: neighbor as i64,
                });
            }
        }
        normalize_rows(&mut adj);
        check_symmetric(&adj).map_err(|(u, v)| Error::AsymmetricEdge {
            from: u as i64,
            to: v as i64,
        })?;
        Ok(Self { adj, labels: LabelMap::Offset { min: 0, len: n } })
    }

    /// Build from an undirected `petgraph::Graph`; labels are `NodeIndex::index()`.
    ///
    /// Parallel edges and self-loops are collapsed the same way as in [`AdjacencyGraph::build`].
    #[cfg(feature = "petgraph")]
    pub fn from_petgraph<N, E, Ix>(graph: &petgraph::Graph<N, E, petgraph::Undirected, Ix>) -> Self
    where
        Ix: petgraph::graph::IndexType,
    {
        let n = graph.node_count();
        let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];
        for edge in graph.raw_edges() {
            let (a, b) = (edge.source().index(), edge.target().index());
            adj[a].push(b);
            adj[b].push(a);
        }
        normalize_rows(&mut adj);
        Self { adj, labels: LabelMap::Offset { min: 0, len: n } }
    }

    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adj[v]
    }

    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adj.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }
}

impl GraphRef for AdjacencyGraph {
    fn node_count(&self) -> usize {
        self.adj.len()
    }

    fn neighbors_ref(&self, node: usize) -> &[usize] {
        self.adj.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Parse adjacency whose labels are numeric strings.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// [`Error::InvalidLabel`] if a label does not parse as an integer, or if two keys parse
/// to the same integer.
pub fn parse_str_adjacency<I, K, N, V>(entries: I) -> Result<AdjacencyList>
where
    I: IntoIterator<Item = (K, N)>,
    K: AsRef<str>,
    N: IntoIterator<Item = V>,
    V: AsRef<str>,
{
    let mut out = AdjacencyList::new();
    for (key, neighbors) in entries {
        let vertex = parse_label(key.as_ref())?;
        let row = neighbors
            .into_iter()
            .map(|nb| parse_label(nb.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        if out.insert(vertex, row).is_some() {
            return Err(Error::InvalidLabel(format!("{} (duplicate vertex)", key.as_ref())));
        }
    }
    Ok(out)
}

fn parse_label(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| Error::InvalidLabel(raw.to_string()))
}

/// Drop self-loops and repeated neighbors in place, keeping first-occurrence order.
///
/// Returns `(self_loops, duplicates)` removed.
fn normalize_rows(adj: &mut [Vec<usize>]) -> (usize, usize) {
    let n = adj.len();
    // One stamp buffer reused across rows.
    let mut seen: Vec<usize> = vec![usize::MAX; n];
    let mut self_loops = 0usize;
    let mut duplicates = 0usize;
    for (u, row) in adj.iter_mut().enumerate() {
        row.retain(|&v| {
            if v == u {
                self_loops += 1;
                false
            } else if seen[v] == u {
                duplicates += 1;
                false
            } else {
                seen[v] = u;
                true
            }
        });
    }
    (self_loops, duplicates)
}

/// Returns the first directed edge `(u, v)` with no reverse edge.
fn check_symmetric(adj: &[Vec<usize>]) -> std::result::Result<(), (usize, usize)> {
    let sorted: Vec<Vec<usize>> = adj
        .iter()
        .map(|row| {
            let mut row = row.clone();
            row.sort_unstable();
            row
        })
        .collect();
    for (u, row) in adj.iter().enumerate() {
        for &v in row {
            if sorted[v].binary_search(&u).is_err() {
                return Err((u, v));
            }
        }
    }
    Ok(())
}
