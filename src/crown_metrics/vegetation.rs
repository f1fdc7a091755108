use ndarray::{Array2, ArrayView2, Zip};
use serde::{Deserialize, Serialize};

const EVI_GAIN: f32 = 2.5;
const EVI_L: f32 = 2.4;
const EVI_C: f32 = 1.0;
const SAVI_L: f32 = 0.5;

/// Per-pixel ratio with a zero denominator mapped to zero.
fn ratio(num: f32, den: f32) -> f32 {
    if den == 0.0 { 0.0 } else { num / den }
}

pub fn ndvi(red: &ArrayView2<f32>, nir: &ArrayView2<f32>) -> Array2<f32> {
    Zip::from(red).and(nir).map_collect(|&r, &n| ratio(n - r, n + r))
}

pub fn evi(red: &ArrayView2<f32>, nir: &ArrayView2<f32>) -> Array2<f32> {
    Zip::from(red)
        .and(nir)
        .map_collect(|&r, &n| EVI_GAIN * ratio(n - r, EVI_L + n + EVI_C * r))
}

pub fn savi(red: &ArrayView2<f32>, nir: &ArrayView2<f32>) -> Array2<f32> {
    Zip::from(red)
        .and(nir)
        .map_collect(|&r, &n| ratio(n - r, r + n + SAVI_L) * (1.0 + SAVI_L))
}

/// Crown-wide means of the three vegetation indices.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexAverages {
    pub ndvi_avg: f64,
    pub savi_avg: f64,
    pub evi_avg: f64,
}

pub(crate) fn mean(values: &Array2<f32>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}
