//! Ranking utilities.

use ordered_float::NotNan;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// The `k` largest strictly positive finite scores as `(index, score)`, best first.
///
/// Ties are broken by the larger index, which keeps the result deterministic.
pub fn top_k(scores: &[f64], k: usize) -> Vec<(usize, f64)> {
    if k == 0 || scores.is_empty() {
        return Vec::new();
    }
    let mut heap = BinaryHeap::with_capacity(k + 1);
    for (i, &score) in scores.iter().enumerate() {
        if !score.is_finite() || score <= 0.0 {
            continue;
        }
        let Ok(s) = NotNan::new(score) else { continue };
        if heap.len() < k {
            heap.push(Reverse((s, i)));
        } else if let Some(&Reverse(min)) = heap.peek() {
            if (s, i) > min {
                heap.pop();
                heap.push(Reverse((s, i)));
            }
        }
    }
    let mut results: Vec<(NotNan<f64>, usize)> = heap.into_iter().map(|Reverse(e)| e).collect();
    results.sort_unstable_by(|a, b| b.cmp(a));
    results.into_iter().map(|(s, i)| (i, s.into_inner())).collect()
}

/// Divide every score by the maximum, in place.
///
/// No-op when the maximum is not positive: centrality scores are non-negative, so that only
/// happens when every score is zero.
pub fn normalize_max(scores: &mut [f64]) {
    let max = scores.iter().copied().fold(0.0_f64, f64::max);
    if max > 0.0 {
        for s in scores {
            *s /= max;
        }
    }
}
