use pathfinding::prelude::{kuhn_munkres_min, Matrix};
use crate::common::CrownPoint;

/// Integer cost for a pair exactly at the threshold.
const COST_SCALE: f64 = 1e9;

/// Greedy nearest-available assignment.
///
/// Actual points are visited in order. Each takes the nearest predicted point
/// still in the pool (lowest index on ties) when it lies within `threshold`,
/// and that point leaves the pool.
///
/// # Returns
///
/// `(actual_index, predicted_index, distance)` triples in actual order.
pub(crate) fn greedy(actual: &[CrownPoint], predicted: &[CrownPoint], threshold: f64) -> Vec<(usize, usize, f64)> {
    let mut remaining: Vec<usize> = (0..predicted.len()).collect();
    let mut pairs = Vec::new();

    for (ai, a) in actual.iter().enumerate() {
        let mut nearest: Option<(usize, f64)> = None;
        for (slot, &pi) in remaining.iter().enumerate() {
            let d = a.distance(&predicted[pi]);
            match nearest {
                Some((_, best)) if best <= d => {}
                _ => nearest = Some((slot, d)),
            }
        }

        if let Some((slot, d)) = nearest {
            if d <= threshold {
                let pi = remaining.remove(slot);
                pairs.push((ai, pi, d));
            }
        }
    }

    pairs
}

/// Optimal assignment with the Hungarian algorithm.
///
/// Maximizes the number of pairs within `threshold` and, among those
/// assignments, minimizes the summed distance. Distances are compared after
/// scaling `d / threshold` onto an integer grid of `COST_SCALE` steps.
///
/// # Returns
///
/// `(actual_index, predicted_index, distance)` triples in actual order.
pub(crate) fn optimal(actual: &[CrownPoint], predicted: &[CrownPoint], threshold: f64) -> Vec<(usize, usize, f64)> {
    let (n, m) = (actual.len(), predicted.len());
    if n == 0 || m == 0 {
        return vec![];
    }

    let size = n.max(m);
    // An unusable cell must cost more than any set of usable cells combined.
    let unusable = COST_SCALE as i64 * (n.min(m) as i64 + 1);

    let weights = Matrix::from_fn(size, size, |(i, j)| {
        if i < n && j < m {
            let d = actual[i].distance(&predicted[j]);
            if d <= threshold {
                return (d / threshold * COST_SCALE).round() as i64;
            }
        }
        unusable
    });

    let (_, assignments) = kuhn_munkres_min(&weights);

    assignments
        .iter()
        .enumerate()
        .filter(|&(i, &j)| i < n && j < m)
        .filter_map(|(i, &j)| {
            let d = actual[i].distance(&predicted[j]);
            (d <= threshold).then_some((i, j, d))
        })
        .collect()
}
