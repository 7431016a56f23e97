use std::{fs::File, io::BufWriter, path::Path};

use anyhow::{Context, Result};
use geo::{BoundingRect, Geometry};
use polars::{
    frame::DataFrame,
    io::{json::JsonFormat, SerWriter},
    prelude::{Column, CsvWriter, JsonWriter},
};

use super::SpatialIndex;

/// Build the `id, min_x, min_y, max_x, max_y` table; empty geometries get null envelopes.
pub(super) fn envelope_table(ids: &[String], geoms: &[Geometry<f64>]) -> Result<DataFrame> {
    let rects: Vec<_> = geoms.iter().map(|geom| geom.bounding_rect()).collect();
    let column = |name: &str, f: fn(&geo::Rect<f64>) -> f64| {
        Column::new(name.into(), rects.iter().map(|r| r.as_ref().map(f)).collect::<Vec<Option<f64>>>())
    };

    Ok(DataFrame::new(vec![
        Column::new("id".into(), ids),
        column("min_x", |r| r.min().x),
        column("min_y", |r| r.min().y),
        column("max_x", |r| r.max().x),
        column("max_y", |r| r.max().y),
    ])?)
}

impl SpatialIndex {
    /// Write the index table as JSON lines.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        JsonWriter::new(&mut out)
            .with_json_format(JsonFormat::JsonLines)
            .finish(&mut self.table.clone())
            .context("Failed to write index table to JSON")?;
        Ok(out)
    }

    /// Write the index table as CSV.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        CsvWriter::new(&mut out)
            .finish(&mut self.table.clone())
            .context("Failed to write index table to CSV")?;
        Ok(out)
    }

    /// Write the index table to `path`, as CSV if the extension is `.csv` and as JSON lines otherwise.
    pub fn write_table(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create index file: {}", path.display()))?;
        let writer = BufWriter::new(file);
        let mut df = self.table.clone();

        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => CsvWriter::new(writer).finish(&mut df),
            _ => JsonWriter::new(writer).with_json_format(JsonFormat::JsonLines).finish(&mut df),
        }
        .with_context(|| format!("Failed to write index table to {}", path.display()))
    }
}
