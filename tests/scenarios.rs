use gebc::{compute, AdjacencyList, CentralityScores, Error, GebcConfig};

fn adjacency(entries: &[(i64, &[i64])]) -> AdjacencyList {
    entries.iter().map(|&(k, v)| (k, v.to_vec())).collect()
}

fn serial(adj: &AdjacencyList) -> CentralityScores {
    compute(adj, GebcConfig::default()).unwrap()
}

fn parallel(adj: &AdjacencyList, workers: usize) -> CentralityScores {
    let cfg = GebcConfig { parallel: true, workers, ..GebcConfig::default() };
    compute(adj, cfg).unwrap()
}

fn assert_values_close(got: &[f64], want: &[f64], tol: f64) {
    assert_eq!(got.len(), want.len(), "length mismatch: {got:?} vs {want:?}");
    for (i, (g, w)) in got.iter().zip(want).enumerate() {
        assert!((g - w).abs() <= tol, "vertex {i}: got {g}, want {w} (all: {got:?})");
    }
}

fn two_routes_graph() -> AdjacencyList {
    adjacency(&[
        (0, &[1, 2]),
        (1, &[0, 3, 4]),
        (2, &[0, 3, 4]),
        (3, &[2, 1, 5]),
        (4, &[2, 1, 5]),
        (5, &[3, 4]),
    ])
}

#[test]
fn hand_checked_bipartite_layers() {
    let scores = serial(&two_routes_graph());
    assert_values_close(
        scores.values(),
        &[0.3333, 1.8333, 1.8333, 1.8333, 1.8333, 0.3333],
        1e-4,
    );
}

#[test]
fn hand_checked_pentagon_and_square_sharing_an_edge() {
    let adj = adjacency(&[
        (0, &[1, 4, 6]),
        (1, &[0, 2]),
        (2, &[1, 3]),
        (3, &[2, 4]),
        (4, &[3, 5, 0]),
        (5, &[4, 6]),
        (6, &[5, 0]),
    ]);
    assert_values_close(serial(&adj).values(), &[5.0, 2.0, 1.0, 2.0, 5.0, 1.0, 1.0], 1e-9);
}

#[test]
fn tree_tail_on_a_dense_core() {
    let adj = adjacency(&[
        (0, &[1, 2, 3]),
        (1, &[0, 2, 4]),
        (2, &[0, 1, 3, 4]),
        (3, &[0, 2, 4]),
        (4, &[1, 2, 3, 5]),
        (5, &[4, 7]),
        (6, &[7]),
        (7, &[5, 6, 8]),
        (8, &[7]),
    ]);
    let want = [1.0 / 3.0, 5.0 / 3.0, 2.0, 5.0 / 3.0, 49.0 / 3.0, 15.0, 0.0, 13.0, 0.0];
    assert_values_close(serial(&adj).values(), &want, 1e-9);
}

#[test]
fn hexagon_is_uniform() {
    let adj = adjacency(&[
        (0, &[1, 5]),
        (1, &[0, 2]),
        (2, &[1, 3]),
        (3, &[2, 4]),
        (4, &[3, 5]),
        (5, &[4, 0]),
    ]);
    let scores = serial(&adj);
    let first = scores.values()[0];
    assert!(first > 0.0);
    for &v in scores.values() {
        assert!((v - first).abs() < 1e-12, "hexagon not uniform: {:?}", scores.values());
    }
}

#[test]
fn two_rhombi_mirror_symmetry() {
    // Two rhombi joined at vertex 2.
    let adj = adjacency(&[
        (0, &[1, 3]),
        (1, &[0, 2]),
        (2, &[1, 3, 4, 6]),
        (3, &[0, 2]),
        (4, &[2, 5]),
        (5, &[4, 6]),
        (6, &[2, 5]),
    ]);
    let v = serial(&adj).values().to_vec();
    assert_values_close(&v, &[0.5, 2.0, 10.0, 2.0, 2.0, 0.5, 2.0], 1e-9);
}

#[test]
fn single_edge_scores_zero() {
    let adj = adjacency(&[(0, &[1]), (1, &[0])]);
    assert_eq!(serial(&adj).values(), &[0.0, 0.0]);
}

#[test]
fn isolated_vertex_scores_zero() {
    let mut adj = two_routes_graph();
    adj.insert(6, Vec::new());
    let scores = serial(&adj);
    assert_eq!(scores.get(6), Some(0.0));
    // The rest of the graph is unaffected.
    assert_values_close(
        &scores.values()[..6],
        &[0.3333, 1.8333, 1.8333, 1.8333, 1.8333, 0.3333],
        1e-4,
    );
}

#[test]
fn sparse_labels_round_trip() {
    let adj = adjacency(&[(5, &[9]), (9, &[5]), (20, &[])]);
    let cfg = GebcConfig { sparse_labels: true, ..GebcConfig::default() };
    let map = compute(&adj, cfg).unwrap().to_map();
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![5, 9, 20]);
    assert!(map.values().all(|&v| v == 0.0));
}

#[test]
fn sparse_input_without_flag_is_rejected() {
    let adj = adjacency(&[(5, &[9]), (9, &[5]), (20, &[])]);
    assert!(matches!(
        compute(&adj, GebcConfig::default()),
        Err(Error::NonContiguousLabels { .. })
    ));
}

#[test]
fn nonzero_minimum_label_maps_back() {
    // 10 - 11 - 12
    let adj = adjacency(&[(10, &[11]), (11, &[10, 12]), (12, &[11])]);
    let scores = serial(&adj);
    assert_eq!(scores.get(11), Some(1.0));
    assert_eq!(scores.get(10), Some(0.0));
    assert_eq!(scores.get(0), None);
}

#[test]
fn missing_neighbor_aborts() {
    let adj = adjacency(&[(0, &[1]), (1, &[0, 2])]);
    assert!(matches!(
        compute(&adj, GebcConfig::default()),
        Err(Error::MalformedGraph { vertex: 1, neighbor: 2 })
    ));
}

#[test]
fn empty_graph_is_empty_result() {
    for parallel in [false, true] {
        let cfg = GebcConfig { parallel, workers: 2, ..GebcConfig::default() };
        assert!(compute(&AdjacencyList::new(), cfg).unwrap().is_empty());
    }
}

#[test]
fn parallel_matches_serial_on_hand_checked_graph() {
    let adj = two_routes_graph();
    let want = serial(&adj);
    for workers in [1, 2, 4] {
        let got = parallel(&adj, workers);
        for (g, w) in got.values().iter().zip(want.values()) {
            assert!((g - w).abs() <= 1e-9 * w.abs().max(1.0), "{workers} workers: {g} vs {w}");
        }
    }
}

#[test]
fn normalized_output_peaks_at_one() {
    let cfg = GebcConfig { normalize: true, ..GebcConfig::default() };
    let scores = compute(&two_routes_graph(), cfg).unwrap();
    let max = scores.values().iter().copied().fold(0.0, f64::max);
    assert!((max - 1.0).abs() < 1e-12);
    assert!((scores.get(0).unwrap() - 0.3333 / 1.8333).abs() < 1e-3);
}

#[test]
fn normalizing_a_graph_without_interior_vertices_yields_zeros() {
    let adj = adjacency(&[(0, &[1]), (1, &[0]), (2, &[])]);
    let cfg = GebcConfig { normalize: true, ..GebcConfig::default() };
    assert_eq!(compute(&adj, cfg).unwrap().values(), &[0.0, 0.0, 0.0]);
}

#[test]
fn string_labels_parse_to_the_same_result() {
    let raw = [
        ("0", vec!["1", "2"]),
        ("1", vec!["0", "3", "4"]),
        ("2", vec!["0", "3", "4"]),
        ("3", vec!["2", "1", "5"]),
        ("4", vec!["2", "1", "5"]),
        ("5", vec!["3", "4"]),
    ];
    let adj = gebc::parse_str_adjacency(raw).unwrap();
    assert_eq!(serial(&adj), serial(&two_routes_graph()));
}

#[test]
fn top_k_reports_labels() {
    let scores = serial(&two_routes_graph());
    let top = scores.top_k(4);
    assert_eq!(top.len(), 4);
    let mut labels: Vec<i64> = top.iter().map(|&(l, _)| l).collect();
    labels.sort_unstable();
    assert_eq!(labels, vec![1, 2, 3, 4]);
}

mod glob_import {
    use gebc::*;

    #[test]
    fn crate_root_glob_import_resolves() {
        let adj: AdjacencyList = [(0, vec![1]), (1, vec![0, 2]), (2, vec![1])].into_iter().collect();
        let scores = compute(&adj, GebcConfig::default()).unwrap();
        assert_eq!(scores.get(1), Some(1.0));
    }
}
