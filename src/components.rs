//! Connected components (undirected).
//!
//! Computed once per run so the pair loop can skip pairs that cannot be joined by any path,
//! instead of discovering that with an exhaustive BFS per pair.

use crate::graph::GraphRef;

/// Component label of every vertex: the smallest vertex index in its component.
///
/// Uses one queue buffer for all BFS runs (head index, no `VecDeque`).
pub fn connected_components<G: GraphRef>(graph: &G) -> Vec<usize> {
    let n = graph.node_count();
    let mut component = vec![usize::MAX; n];
    let mut q: Vec<usize> = Vec::new();

    for start in 0..n {
        if component[start] != usize::MAX {
            continue;
        }
        component[start] = start;
        q.clear();
        q.push(start);
        let mut head = 0usize;
        while head < q.len() {
            let cur = q[head];
            head += 1;
            for &nx in graph.neighbors_ref(cur) {
                if component[nx] == usize::MAX {
                    component[nx] = start;
                    q.push(nx);
                }
            }
        }
    }

    component
}

/// Number of distinct components in a label vector from [`connected_components`].
pub fn component_count(component: &[usize]) -> usize {
    component.iter().enumerate().filter(|&(v, &c)| v == c).count()
}
