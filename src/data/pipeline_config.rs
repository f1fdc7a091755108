use std::path::Path;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use crate::data::{BandIndices, ComparisonConfig, EnsembleConfig, GeoTransform};

/// Everything one ensembling + evaluation run needs, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub ensemble: EnsembleConfig,
    pub comparison: ComparisonConfig,
    pub bands: BandIndices,
    pub geo_transform: GeoTransform,
    pub crs: Option<String>,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(text).context("parsing pipeline config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading pipeline config {}", path.display()))?;
        Self::from_json(&text)
    }

    pub fn with_ensemble(mut self, x: EnsembleConfig) -> Self {
        self.ensemble = x;
        self
    }

    pub fn with_comparison(mut self, x: ComparisonConfig) -> Self {
        self.comparison = x;
        self
    }

    pub fn with_bands(mut self, x: BandIndices) -> Self {
        self.bands = x;
        self
    }

    pub fn with_geo_transform(mut self, x: GeoTransform) -> Self {
        self.geo_transform = x;
        self
    }

    pub fn with_crs(mut self, crs: &str) -> Self {
        self.crs = Some(crs.to_string());
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.ensemble.validate()?;
        self.comparison.validate()?;
        self.geo_transform.validate()?;
        Ok(())
    }

    pub fn to_string(&self) -> String {
        format!("Merge Mode: {}\n\
        IoU Threshold: {}\n\
        Score Threshold: {}\n\
        Assignment Mode: {}\n\
        Distance Threshold: {}\n\
        CRS: {}",
                self.ensemble.merge_mode, self.ensemble.iou_threshold, self.ensemble.score_threshold,
                self.comparison.assignment_mode, self.comparison.threshold,
                self.crs.as_deref().unwrap_or("unspecified"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AssignmentMode, MergeMode};

    #[test]
    fn test_from_json_partial() {
        let config = PipelineConfig::from_json(
            r#"{
                "ensemble": { "merge_mode": "transitive", "label_thresholds": [{ "label": "palm", "threshold": 0.7 }] },
                "comparison": { "threshold": 3.0, "assignment_mode": "optimal" },
                "crs": "EPSG:32631"
            }"#,
        )
        .unwrap();
        assert_eq!(config.ensemble.merge_mode, MergeMode::Transitive);
        assert_eq!(config.ensemble.iou_threshold, 0.20);
        assert_eq!(config.ensemble.threshold_for("palm").threshold, 0.7);
        assert_eq!(config.comparison.assignment_mode, AssignmentMode::Optimal);
        assert!(config.comparison.compute_bias);
        assert_eq!(config.bands, BandIndices::default());
    }

    #[test]
    fn test_from_json_rejects_bad_threshold() {
        let err = PipelineConfig::from_json(r#"{ "comparison": { "threshold": 0.0 } }"#).unwrap_err();
        assert!(err.to_string().contains("threshold"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.json");
        let written = PipelineConfig::new()
            .with_bands(BandIndices { red: 2, green: 1, blue: 0, nir: 3 })
            .with_geo_transform(GeoTransform::new(10.0, 20.0, 0.3, 0.3))
            .with_crs("EPSG:4326");
        std::fs::write(&path, serde_json::to_string(&written).unwrap()).unwrap();

        let loaded = PipelineConfig::load(&path).unwrap();
        assert_eq!(loaded, written);
        assert_eq!(loaded.bands.nir, 3);
        assert!(PipelineConfig::load(&dir.path().join("missing.json")).is_err());
    }
}
