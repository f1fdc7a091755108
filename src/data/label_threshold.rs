use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelThreshold {
    pub label: String,
    pub threshold: f32,
}

impl LabelThreshold {
    pub fn new(label: &str, threshold: f32) -> Self {
        Self {
            label: label.to_string(),
            threshold,
        }
    }

    /// `true` when a detection scored `conf` is kept for this label.
    pub fn check_conf(&self, conf: f32) -> bool {
        conf > self.threshold
    }

    pub fn applies_to(&self, label: &str) -> bool {
        self.label == label
    }
}
