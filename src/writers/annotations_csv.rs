use std::io;
use std::path::Path;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use crate::common::{CrownBox, MergedBox};
use crate::ensemble_runners::ImageEnsemble;

/// One row of `annotations.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRow {
    pub filename: String,
    pub xmin: i32,
    pub ymin: i32,
    pub xmax: i32,
    pub ymax: i32,
    pub label: String,
    pub score: f32,
}

impl AnnotationRow {
    pub fn new(filename: &str, merged: &MergedBox) -> Self {
        let (xmin, ymin, xmax, ymax) = merged.bbox.xy1_xy2();
        Self {
            filename: filename.to_string(),
            xmin,
            ymin,
            xmax,
            ymax,
            label: merged.class_label.clone(),
            score: merged.score,
        }
    }
}

/// Writes `filename,xmin,ymin,xmax,ymax,label,score` rows, header first.
pub fn write_annotations<W: io::Write>(writer: W, ensembles: &[ImageEnsemble]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    // Serializing rows only emits the header once there is a row.
    wtr.write_record(["filename", "xmin", "ymin", "xmax", "ymax", "label", "score"])?;
    for image in ensembles {
        for merged in &image.boxes {
            let row = AnnotationRow::new(&image.filename, merged);
            wtr.write_record(&[
                row.filename,
                row.xmin.to_string(),
                row.ymin.to_string(),
                row.xmax.to_string(),
                row.ymax.to_string(),
                row.label,
                row.score.to_string(),
            ])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_annotations(path: &Path, ensembles: &[ImageEnsemble]) -> anyhow::Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_annotations(io::BufWriter::new(file), ensembles)
}

/// Reads annotations back into per-image ensembles, images in first-seen order.
///
/// Member counts and source models are not part of the file; each row comes
/// back as a single-member box.
pub fn read_annotations<R: io::Read>(reader: R) -> anyhow::Result<Vec<ImageEnsemble>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut images: Vec<ImageEnsemble> = Vec::new();

    for (line, row) in rdr.deserialize::<AnnotationRow>().enumerate() {
        let row = row.with_context(|| format!("annotation row {}", line + 1))?;
        let merged = MergedBox {
            bbox: CrownBox::new(row.xmin, row.ymin, row.xmax, row.ymax),
            class_label: row.label,
            score: row.score,
            num_members: 1,
            source_models: vec![],
        };
        match images.iter_mut().find(|img| img.filename == row.filename) {
            Some(img) => img.boxes.push(merged),
            None => images.push(ImageEnsemble {
                filename: row.filename,
                boxes: vec![merged],
            }),
        }
    }

    Ok(images)
}
