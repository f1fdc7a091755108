//! Options for ensembling detections from several models.

use serde::{Deserialize, Serialize};
use crate::data::{LabelThreshold, MergeMode};
use crate::error::ConfigError;

/// Overlap above which two same-class detections describe the same crown.
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.20;
/// Minimum model score for a detection to take part in the ensemble.
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleConfig {
    pub iou_threshold: f64,
    pub merge_mode: MergeMode,
    pub score_threshold: f32,
    pub label_thresholds: Vec<LabelThreshold>,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            merge_mode: MergeMode::Greedy,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            label_thresholds: vec![],
        }
    }
}

impl EnsembleConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_iou_threshold(mut self, x: f64) -> Self {
        self.iou_threshold = x;
        self
    }

    pub fn with_merge_mode(mut self, x: MergeMode) -> Self {
        self.merge_mode = x;
        self
    }

    pub fn with_score_threshold(mut self, x: f32) -> Self {
        self.score_threshold = x;
        self
    }

    pub fn with_label_threshold(mut self, label: &str, threshold: f32) -> Self {
        self.label_thresholds.retain(|t| !t.applies_to(label));
        self.label_thresholds.push(LabelThreshold::new(label, threshold));
        self
    }

    /// Score filter for `label`, falling back to the default threshold.
    pub fn threshold_for(&self, label: &str) -> LabelThreshold {
        self.label_thresholds
            .iter()
            .find(|t| t.applies_to(label))
            .cloned()
            .unwrap_or_else(|| LabelThreshold::new(label, self.score_threshold))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.iou_threshold) {
            return Err(ConfigError::InvalidIouThreshold(self.iou_threshold));
        }
        let default = LabelThreshold::new("*", self.score_threshold);
        for t in std::iter::once(&default).chain(self.label_thresholds.iter()) {
            if !(0.0..=1.0).contains(&t.threshold) {
                return Err(ConfigError::InvalidScoreThreshold {
                    label: t.label.clone(),
                    threshold: t.threshold,
                });
            }
        }
        Ok(())
    }
}
