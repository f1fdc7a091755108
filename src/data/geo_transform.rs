use serde::{Deserialize, Serialize};
use crate::common::CrownPoint;
use crate::error::ConfigError;

/// North-up affine mapping from pixel `(col, row)` to map coordinates.
///
/// `origin_x`/`origin_y` are the map coordinates of the top-left corner of the
/// top-left pixel. Both resolutions are positive; rows grow southwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    pub origin_x: f64,
    pub origin_y: f64,
    pub x_res: f64,
    pub y_res: f64,
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            x_res: 1.0,
            y_res: 1.0,
        }
    }
}

impl GeoTransform {
    pub fn new(origin_x: f64, origin_y: f64, x_res: f64, y_res: f64) -> Self {
        Self { origin_x, origin_y, x_res, y_res }
    }

    /// Map coordinates of a (possibly fractional) pixel position.
    pub fn pixel_to_world(&self, col: f64, row: f64) -> CrownPoint {
        CrownPoint::new(self.origin_x + col * self.x_res, self.origin_y - row * self.y_res)
    }

    pub fn pixel_area(&self) -> f64 {
        self.x_res * self.y_res
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |r: f64| r.is_finite() && r > 0.0;
        if !ok(self.x_res) || !ok(self.y_res) {
            return Err(ConfigError::InvalidResolution { x_res: self.x_res, y_res: self.y_res });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_to_world() {
        let gt = GeoTransform::new(500_000.0, 4_800_000.0, 0.5, 0.5);
        let p = gt.pixel_to_world(10.0, 4.0);
        assert_eq!(p, CrownPoint::new(500_005.0, 4_799_998.0));
        assert_eq!(gt.pixel_area(), 0.25);
    }

    #[test]
    fn test_validate() {
        assert!(GeoTransform::default().validate().is_ok());
        assert!(GeoTransform::new(0.0, 0.0, 0.0, 1.0).validate().is_err());
    }
}
