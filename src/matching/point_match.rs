//! Greedy nearest-neighbour matching of predicted crowns against ground truth.

use std::collections::HashSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use crate::common::CrownPoint;
use crate::data::{AssignmentMode, ComparisonConfig};
use crate::error::ComparisonError;
use crate::matching::assignment;
use crate::matching::extent::clip_to_common_extent;
use crate::matching::bias::{self, BiasSummary};

/// One accepted actual/predicted pair. Indices refer to the clipped, de-duplicated sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointMatch {
    pub actual_index: usize,
    pub predicted_index: usize,
    pub actual: CrownPoint,
    pub predicted: CrownPoint,
    pub distance: f64,
}

impl PointMatch {
    /// `predicted - actual`.
    pub fn offset(&self) -> (f64, f64) {
        self.actual.offset_to(&self.predicted)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub total_actual: usize,
    pub total_predicted: usize,
    pub total_matched: usize,
    pub total_unmatched_predicted: usize,
    /// Mean match distance; `None` when nothing matched.
    pub average_distance: Option<f64>,
    /// `matched / actual * 100`; `None` when there are no actual points.
    pub accuracy: Option<f64>,
    pub matches: Vec<PointMatch>,
    /// Indices of predicted points no actual point claimed.
    pub unmatched_predicted: Vec<usize>,
    /// `None` when nothing matched or bias was not requested.
    pub bias: Option<BiasSummary>,
}

/// One independent evaluation run for [`compare_many`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRun {
    pub name: String,
    pub actual: Vec<CrownPoint>,
    pub predicted: Vec<CrownPoint>,
}

/// Drops exact coordinate duplicates, keeping first occurrences in order.
pub fn dedup(points: &[CrownPoint]) -> Vec<CrownPoint> {
    let mut seen = HashSet::with_capacity(points.len());
    points
        .iter()
        .filter(|p| seen.insert(p.exact_key()))
        .copied()
        .collect()
}

/// Reference comparison: greedy assignment with bias statistics.
pub fn compare(actual: &[CrownPoint], predicted: &[CrownPoint], threshold: f64) -> Result<ComparisonResult, ComparisonError> {
    compare_with(actual, predicted, &ComparisonConfig::new(threshold))
}

/// Compares `predicted` crowns against `actual` crowns.
///
/// Both sets are clipped to their common extent when a margin is configured,
/// then de-duplicated. The config is validated before any point is looked at.
pub fn compare_with(actual: &[CrownPoint], predicted: &[CrownPoint], config: &ComparisonConfig) -> Result<ComparisonResult, ComparisonError> {
    config.validate()?;
    check_finite("actual", actual)?;
    check_finite("predicted", predicted)?;

    let (actual, predicted) = match config.common_extent_margin {
        Some(margin) => {
            let (a, p) = clip_to_common_extent(actual, predicted, margin);
            (dedup(&a), dedup(&p))
        }
        None => (dedup(actual), dedup(predicted)),
    };

    let pairs = match config.assignment_mode {
        AssignmentMode::Greedy => assignment::greedy(&actual, &predicted, config.threshold),
        AssignmentMode::Optimal => assignment::optimal(&actual, &predicted, config.threshold),
    };

    let mut claimed = vec![false; predicted.len()];
    let mut total_distance = 0.0;
    let matches: Vec<PointMatch> = pairs
        .into_iter()
        .map(|(ai, pi, distance)| {
            claimed[pi] = true;
            total_distance += distance;
            PointMatch {
                actual_index: ai,
                predicted_index: pi,
                actual: actual[ai],
                predicted: predicted[pi],
                distance,
            }
        })
        .collect();

    let unmatched_predicted: Vec<usize> = (0..predicted.len()).filter(|&i| !claimed[i]).collect();
    let total_matched = matches.len();

    let average_distance = (total_matched > 0).then(|| total_distance / total_matched as f64);
    let accuracy = (!actual.is_empty()).then(|| total_matched as f64 / actual.len() as f64 * 100.0);
    let bias = if config.compute_bias {
        bias::summarize(matches.iter().map(PointMatch::offset))
    } else {
        None
    };

    Ok(ComparisonResult {
        total_actual: actual.len(),
        total_predicted: predicted.len(),
        total_matched,
        total_unmatched_predicted: unmatched_predicted.len(),
        average_distance,
        accuracy,
        matches,
        unmatched_predicted,
        bias,
    })
}

/// Evaluates independent runs on the rayon pool, results in input order.
pub fn compare_many(runs: &[ComparisonRun], config: &ComparisonConfig) -> Result<Vec<ComparisonResult>, ComparisonError> {
    config.validate()?;
    runs.par_iter()
        .map(|run| compare_with(&run.actual, &run.predicted, config))
        .collect()
}

fn check_finite(set: &'static str, points: &[CrownPoint]) -> Result<(), ComparisonError> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(index) => Err(ComparisonError::InvalidPoint {
            set,
            index,
            x: points[index].x,
            y: points[index].y,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<CrownPoint> {
        coords.iter().map(|&c| CrownPoint::from(c)).collect()
    }

    #[test]
    fn test_dedup_exact_only() {
        let points = pts(&[(1.0, 2.0), (1.0, 2.0), (0.0, 0.0), (-0.0, 0.0), (1.0, 2.000_000_1)]);
        assert_eq!(dedup(&points), pts(&[(1.0, 2.0), (0.0, 0.0), (1.0, 2.000_000_1)]));
    }

    #[test]
    fn test_threshold_violation_before_processing() {
        let bad = pts(&[(f64::NAN, 0.0)]);
        assert_eq!(compare(&bad, &bad, 0.0).unwrap_err(), ComparisonError::ThresholdViolation(0.0));
        assert_eq!(compare(&[], &[], -1.0).unwrap_err(), ComparisonError::ThresholdViolation(-1.0));
        assert!(matches!(compare(&[], &[], f64::NAN), Err(ComparisonError::ThresholdViolation(_))));
    }

    #[test]
    fn test_non_finite_point() {
        let err = compare(&pts(&[(0.0, 0.0)]), &pts(&[(1.0, f64::INFINITY)]), 1.0).unwrap_err();
        assert!(matches!(err, ComparisonError::InvalidPoint { set: "predicted", index: 0, .. }));
    }

    #[test]
    fn test_empty_sets() {
        let result = compare(&[], &[], 1.0).unwrap();
        assert_eq!(result.total_matched, 0);
        assert_eq!(result.average_distance, None);
        assert_eq!(result.accuracy, None);
        assert_eq!(result.bias, None);

        let result = compare(&pts(&[(0.0, 0.0)]), &[], 1.0).unwrap();
        assert_eq!(result.accuracy, Some(0.0));
        assert_eq!(result.average_distance, None);
    }

    #[test]
    fn test_bias_can_be_disabled() {
        let config = ComparisonConfig::new(1.0).with_bias(false);
        let result = compare_with(&pts(&[(0.0, 0.0)]), &pts(&[(0.5, 0.5)]), &config).unwrap();
        assert_eq!(result.total_matched, 1);
        assert_eq!(result.bias, None);
    }

    #[test]
    fn test_duplicates_counted_once() {
        let actual = pts(&[(0.0, 0.0), (0.0, 0.0)]);
        let predicted = pts(&[(0.1, 0.0), (0.1, 0.0), (9.0, 9.0)]);
        let result = compare(&actual, &predicted, 1.0).unwrap();
        assert_eq!(result.total_actual, 1);
        assert_eq!(result.total_predicted, 2);
        assert_eq!(result.total_unmatched_predicted, 1);
        assert_eq!(result.unmatched_predicted, vec![1]);
        assert_eq!(result.accuracy, Some(100.0));
    }
}
