use anyhow::Context;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use crate::common::{CrownDetection, LabelMap, MergedBox};
use crate::data::EnsembleConfig;
use crate::ensemble_runners::{box_merge, decode, RawDetections};

/// Every model's detections for one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageDetections {
    pub filename: String,
    pub detections: Vec<CrownDetection>,
}

/// Consensus boxes for one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageEnsemble {
    pub filename: String,
    pub boxes: Vec<MergedBox>,
}

/// Decodes raw model outputs and partitions them by image.
///
/// Images keep the order in which they are first seen; within an image,
/// detections keep model order and then model output order.
pub fn group_by_image(raws: &[RawDetections], labels: &LabelMap, config: &EnsembleConfig) -> Vec<ImageDetections> {
    let mut images: Vec<ImageDetections> = Vec::new();
    for raw in raws {
        let decoded = decode::decode(raw, labels, config);
        match images.iter_mut().find(|img| img.filename == raw.filename) {
            Some(img) => img.detections.extend(decoded),
            None => images.push(ImageDetections {
                filename: raw.filename.clone(),
                detections: decoded,
            }),
        }
    }
    images
}

/// Merges each image independently on the rayon pool.
pub fn merge_images(images: &[ImageDetections], config: &EnsembleConfig) -> anyhow::Result<Vec<ImageEnsemble>> {
    images
        .par_iter()
        .map(|img| {
            let boxes = box_merge::merge(&img.detections, config.iou_threshold, config.merge_mode)
                .with_context(|| format!("merging detections for {}", img.filename))?;
            Ok(ImageEnsemble {
                filename: img.filename.clone(),
                boxes,
            })
        })
        .collect()
}
