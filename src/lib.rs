mod utils;
pub mod common;
pub mod crown_metrics;
pub mod data;
pub mod ensemble_runners;
pub mod error;
pub mod matching;
pub mod writers;

use std::time::{Duration, Instant};
use anyhow::Context;
use rayon::prelude::*;
use crate::common::{CrownPoint, LabelMap};
use crate::crown_metrics::{describe_crown, BandStack, CrownAttributes};
use crate::data::{ComparisonConfig, EnsembleConfig, PipelineConfig};
use crate::ensemble_runners::{group_by_image, merge_images, ImageEnsemble, RawDetections};
use crate::matching::{compare_with, ComparisonResult};

pub type Result<T, E = anyhow::Error> = std::result::Result<T, E>;

/// Decodes every model's raw output and merges the detections image by image.
pub fn run_ensemble(raws: &[RawDetections], labels: &LabelMap, config: &EnsembleConfig) -> Result<Vec<ImageEnsemble>> {
    let start = Instant::now();
    config.validate().context("invalid ensemble configuration")?;

    let images = group_by_image(raws, labels, config);
    let step = utils::trace("run_ensemble", "group_by_image", start, Duration::ZERO);

    let merged = merge_images(&images, config)?;
    utils::trace("run_ensemble", "merge_images", start, step);

    let total: usize = merged.iter().map(|img| img.boxes.len()).sum();
    log::info!("Ensembled {} images ({} model outputs) into {} crowns using {} merging in {:?}",
        merged.len(), raws.len(), total, config.merge_mode, start.elapsed());
    Ok(merged)
}

/// Measures every crown of one image against its raster.
///
/// Boxes that fall completely outside the raster are skipped.
pub fn describe_crowns(ensemble: &ImageEnsemble, raster: &BandStack, config: &PipelineConfig) -> Result<Vec<CrownAttributes>> {
    let start = Instant::now();
    raster.check_bands(&config.bands)
        .with_context(|| format!("raster for {} does not carry the configured bands", ensemble.filename))?;

    let crowns: Vec<CrownAttributes> = ensemble
        .boxes
        .par_iter()
        .filter_map(|merged| describe_crown(&ensemble.filename, merged, raster, &config.bands, &config.geo_transform).transpose())
        .collect::<std::result::Result<_, _>>()?;

    let skipped = ensemble.boxes.len() - crowns.len();
    if skipped > 0 {
        log::warn!("{}: {} crowns lie outside the raster", ensemble.filename, skipped);
    }
    log::debug!("{}: described {} crowns in {:?}", ensemble.filename, crowns.len(), start.elapsed());
    Ok(crowns)
}

/// Matches predicted crown centres against ground truth.
pub fn run_comparison(actual: &[CrownPoint], predicted: &[CrownPoint], config: &ComparisonConfig) -> Result<ComparisonResult> {
    let start = Instant::now();
    let result = compare_with(actual, predicted, config).context("point comparison failed")?;
    utils::trace("run_comparison", config.assignment_mode.str(), start, Duration::ZERO);

    log::info!("Matched {} of {} actual points ({} predicted, threshold {})",
        result.total_matched, result.total_actual, result.total_predicted, config.threshold);
    Ok(result)
}
