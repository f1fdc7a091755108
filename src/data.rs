mod assignment_mode;
mod band_indices;
mod comparison_config;
mod ensemble_config;
mod geo_transform;
mod label_threshold;
mod merge_mode;
mod pipeline_config;

pub use assignment_mode::AssignmentMode;
pub use band_indices::BandIndices;
pub use comparison_config::ComparisonConfig;
pub use ensemble_config::{EnsembleConfig, DEFAULT_IOU_THRESHOLD, DEFAULT_SCORE_THRESHOLD};
pub use geo_transform::GeoTransform;
pub use label_threshold::LabelThreshold;
pub use merge_mode::MergeMode;
pub use pipeline_config::PipelineConfig;
