use serde::{Deserialize, Serialize};
use crate::data::AssignmentMode;
use crate::error::ComparisonError;

/// Options for comparing predicted crown points against ground truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Search radius, in map units, around each actual point.
    pub threshold: f64,
    pub assignment_mode: AssignmentMode,
    pub compute_bias: bool,
    /// When set, both sets are clipped to their shared bounding extent first.
    /// Predicted points get this much extra room around it.
    pub common_extent_margin: Option<f64>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            assignment_mode: AssignmentMode::Greedy,
            compute_bias: true,
            common_extent_margin: None,
        }
    }
}

impl ComparisonConfig {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    pub fn with_assignment_mode(mut self, x: AssignmentMode) -> Self {
        self.assignment_mode = x;
        self
    }

    pub fn with_bias(mut self, x: bool) -> Self {
        self.compute_bias = x;
        self
    }

    pub fn with_common_extent(mut self, margin: f64) -> Self {
        self.common_extent_margin = Some(margin);
        self
    }

    pub fn validate(&self) -> Result<(), ComparisonError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ComparisonError::ThresholdViolation(self.threshold));
        }
        if let Some(margin) = self.common_extent_margin {
            if !margin.is_finite() || margin < 0.0 {
                return Err(ComparisonError::InvalidMargin(margin));
            }
        }
        Ok(())
    }
}
