use std::f64::consts::PI;
use serde::{Deserialize, Serialize};
use crate::common::{CrownBox, CrownPoint, MergedBox};
use crate::crown_metrics::band_stack::{band, BandStack};
use crate::crown_metrics::gaussian::gaussian_filter;
use crate::crown_metrics::vegetation::{self, IndexAverages};
use crate::data::{BandIndices, GeoTransform};
use crate::error::ConfigError;

const CENTRE_SIGMA: f64 = 2.0;
/// Fraction of the crown's mean NDVI a blurred pixel must exceed to count as canopy.
const CANOPY_FRACTION: f64 = 0.75;

/// Physical and spectral description of one merged crown box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrownAttributes {
    pub filename: String,
    /// Box clamped to the raster it was measured on.
    pub bbox: CrownBox,
    pub class_label: String,
    pub score: f32,
    pub ns_spread: f64,
    pub ew_spread: f64,
    pub volume: f64,
    pub indices: IndexAverages,
    /// Canopy area under the NDVI mask, in map units squared.
    pub area: f64,
    /// Centre of mass of the canopy mask; `None` when the mask is empty.
    pub centre: Option<CrownPoint>,
}

/// Spheroid with horizontal semi-axes `ew/2`, `ns/2` and the smaller one as the vertical semi-axis.
pub fn crown_volume(ew_spread: f64, ns_spread: f64) -> f64 {
    let (a, b) = (ew_spread / 2.0, ns_spread / 2.0);
    4.0 / 3.0 * PI * a * b * a.min(b)
}

/// Measures `merged` on `raster`.
///
/// Fails when `bands` points past the raster's bands. `Ok(None)` when the box
/// lies outside the raster.
pub fn describe_crown(filename: &str, merged: &MergedBox, raster: &BandStack, bands: &BandIndices,
                      geo: &GeoTransform) -> Result<Option<CrownAttributes>, ConfigError> {
    raster.check_bands(bands)?;
    let Some(crop) = raster.crop(&merged.bbox) else {
        return Ok(None);
    };
    let bbox = merged.bbox.clamp_to(raster.width(), raster.height());

    let red = band(&crop, bands.red);
    let nir = band(&crop, bands.nir);

    let ndvi = vegetation::ndvi(&red, &nir);
    let indices = IndexAverages {
        ndvi_avg: vegetation::mean(&ndvi),
        savi_avg: vegetation::mean(&vegetation::savi(&red, &nir)),
        evi_avg: vegetation::mean(&vegetation::evi(&red, &nir)),
    };

    // Canopy mask: blurred NDVI with the crop border zeroed.
    let mut edged = ndvi;
    let (rows, cols) = edged.dim();
    edged.row_mut(0).fill(0.0);
    edged.row_mut(rows - 1).fill(0.0);
    edged.column_mut(0).fill(0.0);
    edged.column_mut(cols - 1).fill(0.0);
    let blurred = gaussian_filter(&edged, CENTRE_SIGMA);
    let cutoff = indices.ndvi_avg * CANOPY_FRACTION;

    let (mut count, mut row_sum, mut col_sum) = (0usize, 0f64, 0f64);
    for ((r, c), &v) in blurred.indexed_iter() {
        if v as f64 > cutoff {
            count += 1;
            row_sum += r as f64;
            col_sum += c as f64;
        }
    }

    let centre = (count > 0).then(|| {
        let col = bbox.x1 as f64 + col_sum / count as f64 + 0.5;
        let row = bbox.y1 as f64 + row_sum / count as f64 + 0.5;
        geo.pixel_to_world(col, row)
    });

    let ew_spread = bbox.width() as f64 * geo.x_res;
    let ns_spread = bbox.height() as f64 * geo.y_res;

    Ok(Some(CrownAttributes {
        filename: filename.to_string(),
        bbox,
        class_label: merged.class_label.clone(),
        score: merged.score,
        ns_spread,
        ew_spread,
        volume: crown_volume(ew_spread, ns_spread),
        indices,
        area: count as f64 * geo.pixel_area(),
        centre,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn merged(x1: i32, y1: i32, x2: i32, y2: i32) -> MergedBox {
        MergedBox {
            bbox: CrownBox::new(x1, y1, x2, y2),
            class_label: "tree".to_string(),
            score: 0.8,
            num_members: 2,
            source_models: vec!["m1".to_string(), "m2".to_string()],
        }
    }

    /// 8 band raster with a bright NIR disc centred on (row 10, col 14).
    fn raster() -> BandStack {
        BandStack::new(Array3::from_shape_fn((8, 20, 30), |(b, r, c)| {
            let inside = (r as f64 - 10.0).powi(2) + (c as f64 - 14.0).powi(2) <= 16.0;
            match (b, inside) {
                (7, true) => 0.8,
                (7, false) => 0.3,
                (4, true) => 0.1,
                (4, false) => 0.3,
                _ => 0.2,
            }
        }))
    }

    #[test]
    fn test_describe_crown() {
        let geo = GeoTransform::new(1000.0, 2000.0, 0.5, 0.5);
        let attrs = describe_crown("tile.tif", &merged(4, 0, 25, 20), &raster(), &BandIndices::default(), &geo).unwrap().unwrap();

        assert_eq!(attrs.ew_spread, 10.5);
        assert_eq!(attrs.ns_spread, 10.0);
        assert!(attrs.indices.ndvi_avg > 0.0);
        assert!(attrs.area > 0.0);

        // Disc centre at col 14.5, row 10.5 in pixel-centre coordinates.
        let centre = attrs.centre.unwrap();
        assert!((centre.x - (1000.0 + 14.5 * 0.5)).abs() < 0.5);
        assert!((centre.y - (2000.0 - 10.5 * 0.5)).abs() < 0.5);
    }

    #[test]
    fn test_outside_raster() {
        let geo = GeoTransform::default();
        assert_eq!(describe_crown("t", &merged(40, 0, 50, 10), &raster(), &BandIndices::default(), &geo), Ok(None));
    }

    #[test]
    fn test_bands_out_of_range() {
        let four_band = BandStack::new(Array3::from_elem((4, 6, 6), 0.2f32));
        let err = describe_crown("t", &merged(0, 0, 6, 6), &four_band, &BandIndices::default(), &GeoTransform::default()).unwrap_err();
        assert_eq!(err, ConfigError::BandOutOfRange { band: "red", index: 4, count: 4 });
    }

    #[test]
    fn test_border_is_ignored() {
        // vegetation only on the crop border never forms a canopy
        let ring = BandStack::new(Array3::from_shape_fn((8, 6, 6), |(b, r, c)| {
            let border = r == 0 || c == 0 || r == 5 || c == 5;
            match (b, border) {
                (7, true) => 0.9,
                (4, true) => 0.1,
                _ => 0.3,
            }
        }));
        let attrs = describe_crown("t", &merged(0, 0, 6, 6), &ring, &BandIndices::default(), &GeoTransform::default()).unwrap().unwrap();
        assert!(attrs.indices.ndvi_avg > 0.0);
        assert_eq!(attrs.centre, None);
    }

    #[test]
    fn test_flat_crown_has_no_centre() {
        let flat = BandStack::new(Array3::from_elem((8, 6, 6), 0.2f32));
        let attrs = describe_crown("t", &merged(0, 0, 6, 6), &flat, &BandIndices::default(), &GeoTransform::default()).unwrap().unwrap();
        assert_eq!(attrs.indices.ndvi_avg, 0.0);
        assert_eq!(attrs.centre, None);
        assert_eq!(attrs.area, 0.0);
    }

    #[test]
    fn test_crown_volume() {
        assert!((crown_volume(2.0, 2.0) - 4.0 / 3.0 * PI).abs() < 1e-12);
        assert!((crown_volume(4.0, 2.0) - 4.0 / 3.0 * PI * 2.0).abs() < 1e-12);
    }
}
