mod annotations_csv;
mod geojson;
mod report;

pub use annotations_csv::{read_annotations, save_annotations, write_annotations, AnnotationRow};
pub use geojson::{crown_points, crown_polygons, match_lines, save_geojson};
pub use report::{write_report, ComparisonReport, REPORT_FILE_NAME};
