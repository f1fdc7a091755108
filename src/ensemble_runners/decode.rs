use serde::{Deserialize, Serialize};
use crate::common::{CrownBox, CrownDetection, LabelMap};
use crate::data::EnsembleConfig;

/// One model's output for one image, as produced by an object-detection graph.
///
/// `boxes` hold normalized `(ymin, xmin, ymax, xmax)` corners in `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDetections {
    pub filename: String,
    pub source_model: String,
    pub img_width: u32,
    pub img_height: u32,
    pub boxes: Vec<[f32; 4]>,
    pub classes: Vec<u32>,
    pub scores: Vec<f32>,
    pub num_detections: usize,
}

impl RawDetections {
    pub fn new(filename: &str, source_model: &str, img_width: u32, img_height: u32) -> Self {
        Self {
            filename: filename.to_string(),
            source_model: source_model.to_string(),
            img_width,
            img_height,
            ..Default::default()
        }
    }

    pub fn with_detection(mut self, normalized: [f32; 4], class_id: u32, score: f32) -> Self {
        self.boxes.push(normalized);
        self.classes.push(class_id);
        self.scores.push(score);
        self.num_detections += 1;
        self
    }
}

/// Denormalizes, labels and score-filters one model's raw output.
///
/// Detections at or below their label's score threshold are dropped, as are
/// boxes that collapse to zero width or height once rounded to pixels.
pub fn decode(raw: &RawDetections, labels: &LabelMap, config: &EnsembleConfig) -> Vec<CrownDetection> {
    let available = raw.boxes.len().min(raw.classes.len()).min(raw.scores.len());
    if available < raw.num_detections {
        log::warn!("{} / {}: num_detections={} but only {} complete rows",
            raw.filename, raw.source_model, raw.num_detections, available);
    }
    let count = raw.num_detections.min(available);

    let mut detections = Vec::with_capacity(count);
    for i in 0..count {
        let label = labels.name(raw.classes[i]);
        let score = raw.scores[i];
        if !config.threshold_for(&label).check_conf(score) {
            continue;
        }

        let bbox = CrownBox::from_normalized(raw.boxes[i], raw.img_width, raw.img_height);
        if !bbox.is_valid() {
            log::debug!("{} / {}: dropping degenerate box {:?}", raw.filename, raw.source_model, bbox);
            continue;
        }
        detections.push(CrownDetection::new(bbox, &label, score, &raw.source_model));
    }

    log::debug!("{} / {}: kept {} of {} detections", raw.filename, raw.source_model, detections.len(), count);
    detections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_filters_and_denormalizes() {
        let labels = LabelMap::new().with_label(1, "tree");
        let raw = RawDetections::new("tile_0.tif", "rgb", 100, 50)
            .with_detection([0.0, 0.0, 0.5, 0.5], 1, 0.9)
            .with_detection([0.0, 0.0, 0.5, 0.5], 1, 0.5)
            .with_detection([0.2, 0.2, 0.2, 0.4], 1, 0.9)
            .with_detection([0.1, 0.1, 0.3, 0.3], 7, 0.7);

        let dets = decode(&raw, &labels, &EnsembleConfig::new());
        assert_eq!(dets.len(), 2);
        assert_eq!(dets[0].bbox.xy1_xy2(), (0, 0, 50, 25));
        assert_eq!(dets[0].class_label, "tree");
        assert_eq!(dets[0].source_model, "rgb");
        assert_eq!(dets[1].class_label, "7");
    }

    #[test]
    fn test_decode_respects_num_detections() {
        let mut raw = RawDetections::new("a.tif", "m", 10, 10)
            .with_detection([0.0, 0.0, 1.0, 1.0], 1, 0.9)
            .with_detection([0.0, 0.0, 1.0, 1.0], 1, 0.9);
        raw.num_detections = 1;
        assert_eq!(decode(&raw, &LabelMap::new(), &EnsembleConfig::new()).len(), 1);
    }
}
