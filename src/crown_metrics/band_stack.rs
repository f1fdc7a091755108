use ndarray::{s, Array3, ArrayView2, ArrayView3, Axis};
use crate::common::CrownBox;
use crate::data::BandIndices;
use crate::error::ConfigError;

/// Multispectral raster held in memory as `(band, row, col)`.
#[derive(Debug, Clone)]
pub struct BandStack {
    data: Array3<f32>,
}

impl BandStack {
    pub fn new(data: Array3<f32>) -> Self {
        Self { data }
    }

    pub fn band_count(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    pub fn height(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    pub fn width(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    pub fn check_bands(&self, bands: &BandIndices) -> Result<(), ConfigError> {
        bands.validate(self.band_count())
    }

    /// Every band cropped to `bbox`, clamped to the raster. `None` when nothing is left.
    pub fn crop(&self, bbox: &CrownBox) -> Option<ArrayView3<'_, f32>> {
        let clamped = bbox.clamp_to(self.width(), self.height());
        if !clamped.is_valid() {
            return None;
        }
        let (x1, y1, x2, y2) = clamped.xy1_xy2();
        Some(self.data.slice(s![.., y1 as usize..y2 as usize, x1 as usize..x2 as usize]))
    }
}

/// One band out of a cropped stack.
pub(crate) fn band<'a>(crop: &ArrayView3<'a, f32>, index: usize) -> ArrayView2<'a, f32> {
    crop.clone().index_axis_move(Axis(0), index)
}
