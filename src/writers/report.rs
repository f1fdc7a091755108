use std::fmt;
use std::path::Path;
use anyhow::Context;
use crate::matching::ComparisonResult;

pub const REPORT_FILE_NAME: &str = "result.txt";

/// Plain-text rendering of a [`ComparisonResult`].
pub struct ComparisonReport<'a> {
    result: &'a ComparisonResult,
}

impl<'a> ComparisonReport<'a> {
    pub fn new(result: &'a ComparisonResult) -> Self {
        Self { result }
    }
}

struct Value(Option<f64>);

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{:?}", v),
            None => write!(f, "undefined"),
        }
    }
}

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        writeln!(f, "Total actual points : {}", r.total_actual)?;
        writeln!(f, "Total predicted points : {}", r.total_predicted)?;
        writeln!(f, "Total predicted points that are not near to any actual point : {}", r.total_unmatched_predicted)?;
        writeln!(f, "Total matched points : {}", r.total_matched)?;
        writeln!(f, "Average distance : {}", Value(r.average_distance))?;
        writeln!(f, "Accuracy : {}", Value(r.accuracy))?;

        if let Some(bias) = &r.bias {
            for (i, count) in bias.quadrants.iter().enumerate() {
                writeln!(f, "Total points in quadrant {} : {}", i + 1, count)?;
            }
            writeln!(f, "Total points on an axis : {}", bias.on_axis)?;
            writeln!(f, "Resultant angle : {}", Value(bias.resultant_angle))?;
            writeln!(f, "Resultant magnitude : {:?}", bias.resultant_magnitude)?;
        }
        Ok(())
    }
}

/// Writes the report as `result.txt` inside `dir`, returning the file path.
pub fn write_report(dir: &Path, result: &ComparisonResult) -> anyhow::Result<std::path::PathBuf> {
    let path = dir.join(REPORT_FILE_NAME);
    std::fs::write(&path, ComparisonReport::new(result).to_string())
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("Comparison report written to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::CrownPoint;
    use crate::matching::compare;

    #[test]
    fn test_undefined_values() {
        let result = compare(&[], &[CrownPoint::new(1.0, 1.0)], 1.0).unwrap();
        let text = ComparisonReport::new(&result).to_string();
        assert!(text.contains("Average distance : undefined\n"));
        assert!(text.contains("Accuracy : undefined\n"));
        assert!(text.contains("Total predicted points that are not near to any actual point : 1\n"));
        assert!(!text.contains("quadrant"));
    }

    #[test]
    fn test_full_report() {
        let actual = [CrownPoint::new(0.0, 0.0), CrownPoint::new(10.0, 10.0)];
        let predicted = [CrownPoint::new(0.0, 0.5), CrownPoint::new(100.0, 100.0)];
        let result = compare(&actual, &predicted, 1.0).unwrap();
        let text = ComparisonReport::new(&result).to_string();
        let expected = "\
Total actual points : 2
Total predicted points : 2
Total predicted points that are not near to any actual point : 1
Total matched points : 1
Average distance : 0.5
Accuracy : 50.0
Total points in quadrant 1 : 0
Total points in quadrant 2 : 0
Total points in quadrant 3 : 0
Total points in quadrant 4 : 0
Total points on an axis : 1
Resultant angle : 0.0
Resultant magnitude : 0.5
";
        assert_eq!(text, expected);
    }
}
