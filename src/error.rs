use thiserror::Error;

/// Precondition failures raised by the box merge engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnsembleError {
    #[error("Invalid geometry for detection {index}: ({xmin}, {ymin}, {xmax}, {ymax})")]
    InvalidGeometry {
        index: usize,
        xmin: i32,
        ymin: i32,
        xmax: i32,
        ymax: i32,
    },
    #[error("Invalid score for detection {index}: {score} (expected: 0.0..=1.0)")]
    InvalidScore { index: usize, score: f32 },
    #[error("Cannot merge members of different classes: {expected} vs {found}")]
    MismatchedClass { expected: String, found: String },
    #[error("Cannot build a merged box from an empty group")]
    EmptyGroup,
}

/// Precondition failures raised by the point match engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComparisonError {
    #[error("Distance threshold must be a positive finite number, got {0}")]
    ThresholdViolation(f64),
    #[error("Common extent margin must be a non-negative finite number, got {0}")]
    InvalidMargin(f64),
    #[error("Non-finite coordinate in {set} point {index}: ({x}, {y})")]
    InvalidPoint {
        set: &'static str,
        index: usize,
        x: f64,
        y: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("IoU threshold must be within 0.0..1.0, got {0}")]
    InvalidIouThreshold(f64),
    #[error("Score threshold for '{label}' must be within 0.0..=1.0, got {threshold}")]
    InvalidScoreThreshold { label: String, threshold: f32 },
    #[error("Pixel resolution must be positive, got ({x_res}, {y_res})")]
    InvalidResolution { x_res: f64, y_res: f64 },
    #[error("Band index {index} for {band} is out of range for a {count} band raster")]
    BandOutOfRange {
        band: &'static str,
        index: usize,
        count: usize,
    },
}
