//! Collapses overlapping detections from several models into consensus boxes.
//!
//! The reference grouping is a single forward pass: every unclaimed detection
//! seeds a group and claims each later unclaimed detection of the same class
//! whose IoU with the *seed* is strictly above the threshold. Claimed
//! detections are never compared against another seed, so the result depends
//! on input order and is not transitive. `MergeMode::Transitive` offers the
//! connected-components alternative.

use crate::common::{CrownDetection, MergedBox};
use crate::data::MergeMode;
use crate::ensemble_runners::union_find::UnionFind;
use crate::error::EnsembleError;

/// Merges one image's detections.
///
/// # Arguments
///
/// * `detections` - Every model's detections for a single image, in scan order.
/// * `iou_threshold` - Minimum overlap, exclusive, for two detections to be grouped.
/// * `mode` - Grouping strategy.
///
/// # Returns
///
/// One `MergedBox` per group, ordered by the group's first member.
pub fn merge(detections: &[CrownDetection], iou_threshold: f64, mode: MergeMode) -> Result<Vec<MergedBox>, EnsembleError> {
    validate(detections)?;

    let groups = match mode {
        MergeMode::Greedy => greedy_groups(detections, iou_threshold),
        MergeMode::Transitive => transitive_groups(detections, iou_threshold),
    };

    groups
        .iter()
        .map(|group| {
            let members: Vec<&CrownDetection> = group.iter().map(|&i| &detections[i]).collect();
            MergedBox::from_members(&members)
        })
        .collect()
}

/// Rejects boxes with `xmin >= xmax` or `ymin >= ymax` and scores outside `[0, 1]`.
pub fn validate(detections: &[CrownDetection]) -> Result<(), EnsembleError> {
    for (index, det) in detections.iter().enumerate() {
        if !det.bbox.is_valid() {
            let (xmin, ymin, xmax, ymax) = det.bbox.xy1_xy2();
            return Err(EnsembleError::InvalidGeometry { index, xmin, ymin, xmax, ymax });
        }
        if !(0.0..=1.0).contains(&det.score) {
            return Err(EnsembleError::InvalidScore { index, score: det.score });
        }
    }
    Ok(())
}

fn overlaps(a: &CrownDetection, b: &CrownDetection, iou_threshold: f64) -> bool {
    a.same_class(b) && a.iou(b) > iou_threshold
}

/// Index groups for the single-pass seed scan.
pub(crate) fn greedy_groups(detections: &[CrownDetection], iou_threshold: f64) -> Vec<Vec<usize>> {
    // owner[i] = group that claimed detection i
    let mut owner: Vec<Option<usize>> = vec![None; detections.len()];
    let mut groups: Vec<Vec<usize>> = Vec::new();

    for seed in 0..detections.len() {
        if owner[seed].is_some() {
            continue;
        }
        let group_id = groups.len();
        owner[seed] = Some(group_id);
        let mut members = vec![seed];

        for j in seed + 1..detections.len() {
            if owner[j].is_none() && overlaps(&detections[seed], &detections[j], iou_threshold) {
                owner[j] = Some(group_id);
                members.push(j);
            }
        }
        groups.push(members);
    }

    groups
}

/// Index groups for the connected components of the overlap graph.
pub(crate) fn transitive_groups(detections: &[CrownDetection], iou_threshold: f64) -> Vec<Vec<usize>> {
    let mut uf = UnionFind::new(detections.len());
    for i in 0..detections.len() {
        for j in i + 1..detections.len() {
            if overlaps(&detections[i], &detections[j], iou_threshold) {
                uf.union(i, j);
            }
        }
    }
    uf.groups()
}
