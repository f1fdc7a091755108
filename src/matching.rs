mod assignment;
pub mod bias;
mod extent;
pub mod point_match;

pub use bias::{BiasSummary, Quadrant};
pub use point_match::{compare, compare_many, compare_with, dedup, ComparisonResult, ComparisonRun, PointMatch};
