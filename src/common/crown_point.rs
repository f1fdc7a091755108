use serde::{Deserialize, Serialize};

/// Planar crown location in a shared projected coordinate system.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrownPoint {
    pub x: f64,
    pub y: f64,
}

impl CrownPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &CrownPoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Offset vector from this point to `other`.
    pub fn offset_to(&self, other: &CrownPoint) -> (f64, f64) {
        (other.x - self.x, other.y - self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Bit pattern used for exact-equality de-duplication; `-0.0` and `0.0` share a key.
    pub(crate) fn exact_key(&self) -> (u64, u64) {
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }
}

impl From<(f64, f64)> for CrownPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for CrownPoint {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}
