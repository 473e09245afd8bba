//! Seeded graph generators shared by the integration tests and the benchmarks.
#![allow(dead_code)]

use gebc::AdjacencyGraph;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Sorts and dedups each row before building.
pub fn dense(mut adj: Vec<Vec<usize>>) -> AdjacencyGraph {
    for nbrs in &mut adj {
        nbrs.sort_unstable();
        nbrs.dedup();
    }
    AdjacencyGraph::from_dense(adj).expect("generated adjacency is symmetric")
}

pub fn ring(n: usize) -> AdjacencyGraph {
    let adj = (0..n).map(|i| vec![(i + 1) % n, (i + n - 1) % n]).collect();
    dense(adj)
}

/// Preferential attachment graph (Barabási–Albert) with `m` edges per new node.
///
/// Hubs concentrate geodesics, which is where betweenness is usually interesting.
pub fn barabasi_albert(n: usize, m: usize, seed: u64) -> AdjacencyGraph {
    assert!(m >= 1 && n > m);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];
    // Endpoint multiset: each vertex appears once per incident edge.
    let mut endpoints: Vec<usize> = Vec::new();

    for i in 0..=m {
        for j in (i + 1)..=m {
            adj[i].push(j);
            adj[j].push(i);
            endpoints.extend([i, j]);
        }
    }

    for v in (m + 1)..n {
        let mut chosen: Vec<usize> = Vec::with_capacity(m);
        while chosen.len() < m {
            let u = endpoints[rng.random_range(0..endpoints.len())];
            if !chosen.contains(&u) {
                chosen.push(u);
            }
        }
        for u in chosen {
            adj[v].push(u);
            adj[u].push(v);
            endpoints.extend([u, v]);
        }
    }
    dense(adj)
}

/// Stochastic block model with `blocks` near-equal communities.
///
/// Sparse `p_out` leaves few bridges, and often several components.
pub fn sbm(n: usize, blocks: usize, p_in: f64, p_out: f64, seed: u64) -> AdjacencyGraph {
    assert!(blocks >= 1 && n >= blocks);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];
    let block = |v: usize| v * blocks / n;

    for i in 0..n {
        for j in (i + 1)..n {
            let p = if block(i) == block(j) { p_in } else { p_out };
            if rng.random_bool(p) {
                adj[i].push(j);
                adj[j].push(i);
            }
        }
    }
    dense(adj)
}
