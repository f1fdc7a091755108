use serde::{Deserialize, Serialize};
use crate::common::CrownBox;

/// One raw model output for one image, in pixel coordinates.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrownDetection {
    pub bbox: CrownBox,
    pub class_label: String,
    pub score: f32,
    pub source_model: String,
}

impl CrownDetection {
    pub fn new(bbox: CrownBox, class_label: &str, score: f32, source_model: &str) -> Self {
        Self {
            bbox,
            class_label: class_label.to_string(),
            score,
            source_model: source_model.to_string(),
        }
    }

    pub fn same_class(&self, other: &CrownDetection) -> bool {
        self.class_label == other.class_label
    }

    /// Computes the intersection over union (IoU) between this detection and another.
    pub fn iou(&self, other: &CrownDetection) -> f64 {
        self.bbox.iou(&other.bbox)
    }
}
