use std::path::Path;
use anyhow::Context;
use serde_json::{json, Map, Value};
use crate::common::CrownPoint;
use crate::crown_metrics::CrownAttributes;
use crate::data::GeoTransform;
use crate::matching::ComparisonResult;

fn collection(features: Vec<Value>, crs: Option<&str>) -> Value {
    let mut fc = Map::new();
    fc.insert("type".to_string(), json!("FeatureCollection"));
    if let Some(name) = crs {
        fc.insert("crs".to_string(), json!({ "type": "name", "properties": { "name": name } }));
    }
    fc.insert("features".to_string(), Value::Array(features));
    Value::Object(fc)
}

fn coords(p: &CrownPoint) -> Value {
    json!([p.x, p.y])
}

/// Crown boxes as world-space polygons, one closed ring per crown.
pub fn crown_polygons(crowns: &[CrownAttributes], geo: &GeoTransform, crs: Option<&str>) -> Value {
    let features = crowns
        .iter()
        .map(|crown| {
            let b = &crown.bbox;
            let (x1, y1, x2, y2) = (b.x1 as f64, b.y1 as f64, b.x2 as f64, b.y2 as f64);
            let ring: Vec<Value> = [(x1, y1), (x2, y1), (x2, y2), (x1, y2), (x1, y1)]
                .iter()
                .map(|&(c, r)| coords(&geo.pixel_to_world(c, r)))
                .collect();
            json!({
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": [ring] },
                "properties": {
                    "filename": crown.filename,
                    "label": crown.class_label,
                    "score": crown.score,
                    "ns_spread": crown.ns_spread,
                    "ew_spread": crown.ew_spread,
                    "volume": crown.volume,
                    "ndvi_avg": crown.indices.ndvi_avg,
                    "savi_avg": crown.indices.savi_avg,
                    "evi_avg": crown.indices.evi_avg,
                }
            })
        })
        .collect();
    collection(features, crs)
}

/// Crown centres as points. Crowns without a canopy centre are skipped.
pub fn crown_points(crowns: &[CrownAttributes], crs: Option<&str>) -> Value {
    let features = crowns
        .iter()
        .filter_map(|crown| {
            let centre = crown.centre?;
            Some(json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": coords(&centre) },
                "properties": {
                    "score": crown.score,
                    "area": crown.area,
                    "ndvi_avg": crown.indices.ndvi_avg,
                    "savi_avg": crown.indices.savi_avg,
                    "evi_avg": crown.indices.evi_avg,
                }
            }))
        })
        .collect();
    collection(features, crs)
}

/// One line per matched pair, drawn from the actual point to its predicted partner.
pub fn match_lines(result: &ComparisonResult, crs: Option<&str>) -> Value {
    let features = result
        .matches
        .iter()
        .map(|m| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": [coords(&m.actual), coords(&m.predicted)],
                },
                "properties": {
                    "actual_index": m.actual_index,
                    "predicted_index": m.predicted_index,
                    "distance": m.distance,
                }
            })
        })
        .collect();
    collection(features, crs)
}

pub fn save_geojson(path: &Path, value: &Value) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::CrownBox;
    use crate::crown_metrics::IndexAverages;
    use crate::matching::compare;

    fn crown(centre: Option<CrownPoint>) -> CrownAttributes {
        CrownAttributes {
            filename: "t.tif".to_string(),
            bbox: CrownBox::new(0, 0, 2, 4),
            class_label: "tree".to_string(),
            score: 0.5,
            ns_spread: 4.0,
            ew_spread: 2.0,
            volume: 1.0,
            indices: IndexAverages { ndvi_avg: 0.5, savi_avg: 0.25, evi_avg: 0.125 },
            area: 3.0,
            centre,
        }
    }

    #[test]
    fn test_crown_polygons() {
        let geo = GeoTransform::new(100.0, 50.0, 1.0, 1.0);
        let fc = crown_polygons(&[crown(None)], &geo, Some("EPSG:32631"));
        assert_eq!(fc["crs"]["properties"]["name"], "EPSG:32631");
        let ring = &fc["features"][0]["geometry"]["coordinates"][0];
        assert_eq!(ring.as_array().unwrap().len(), 5);
        assert_eq!(ring[0], json!([100.0, 50.0]));
        assert_eq!(ring[2], json!([102.0, 46.0]));
        assert_eq!(fc["features"][0]["properties"]["volume"], 1.0);
    }

    #[test]
    fn test_crown_points_skip_missing_centre() {
        let fc = crown_points(&[crown(None), crown(Some(CrownPoint::new(1.0, 2.0)))], None);
        assert!(fc.get("crs").is_none());
        let features = fc["features"].as_array().unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0]["geometry"]["coordinates"], json!([1.0, 2.0]));
        assert_eq!(features[0]["properties"]["area"], 3.0);
    }

    #[test]
    fn test_match_lines() {
        let actual = [CrownPoint::new(0.0, 0.0)];
        let predicted = [CrownPoint::new(0.5, 0.0)];
        let result = compare(&actual, &predicted, 1.0).unwrap();
        let fc = match_lines(&result, None);
        assert_eq!(fc["features"][0]["geometry"]["coordinates"], json!([[0.0, 0.0], [0.5, 0.0]]));
    }
}
