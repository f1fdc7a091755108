use serde::{Deserialize, Serialize};
use crate::common::{CrownBox, CrownDetection};
use crate::error::EnsembleError;

/// Consensus box for one group of overlapping same-class detections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedBox {
    pub bbox: CrownBox,
    pub class_label: String,
    pub score: f32,
    pub num_members: usize,
    pub source_models: Vec<String>,
}

impl MergedBox {
    /// Collapses a group into one box.
    ///
    /// Coordinates are the floor of the per-corner mean, the score is the
    /// arithmetic mean of member scores and the class comes from the first
    /// member. `source_models` lists each contributing model once, in member order.
    pub fn from_members(members: &[&CrownDetection]) -> Result<Self, EnsembleError> {
        let seed = members.first().ok_or(EnsembleError::EmptyGroup)?;

        let mut sums = [0i64; 4];
        let mut score_sum = 0f64;
        let mut source_models: Vec<String> = Vec::new();

        for member in members {
            if !seed.same_class(member) {
                return Err(EnsembleError::MismatchedClass {
                    expected: seed.class_label.clone(),
                    found: member.class_label.clone(),
                });
            }
            let (x1, y1, x2, y2) = member.bbox.xy1_xy2();
            sums[0] += x1 as i64;
            sums[1] += y1 as i64;
            sums[2] += x2 as i64;
            sums[3] += y2 as i64;
            score_sum += member.score as f64;

            if !source_models.contains(&member.source_model) {
                source_models.push(member.source_model.clone());
            }
        }

        let n = members.len() as i64;
        let [x1, y1, x2, y2] = sums.map(|s| s.div_euclid(n) as i32);

        Ok(Self {
            bbox: CrownBox::new(x1, y1, x2, y2),
            class_label: seed.class_label.clone(),
            score: (score_sum / n as f64) as f32,
            num_members: members.len(),
            source_models,
        })
    }
}
