//! TSV→GeoJSON conversion: one tab-separated file with a header row in,
//! one FeatureCollection of point features out.

pub mod geojson;
pub mod row;

use std::fs::File;
use std::path::Path;

use crate::error::Error;
use crate::tsv::TsvTable;
use row::RowDecoder;

/// Column configuration for a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub lat_field: String,
    pub lon_field: String,
    pub id_field: String,
    /// Columns copied into feature properties. `None` keeps every header
    /// column except the lat, lon and id columns.
    pub keep_fields: Option<Vec<String>>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            lat_field: "lat".to_string(),
            lon_field: "lng".to_string(),
            id_field: "id".to_string(),
            keep_fields: None,
        }
    }
}

/// Counts reported by a conversion run.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConvertSummary {
    /// Features written to the output
    pub features: usize,
    /// Rows dropped for missing or unparseable coordinates
    pub skipped: usize,
}

/// Converts the tab-separated file at `input` into a GeoJSON
/// FeatureCollection written to `output`.
///
/// Fails before writing anything if the header does not contain the
/// configured lat/lon columns. Rows whose coordinates do not parse are
/// dropped without failing the run.
pub fn convert(input: &Path, output: &Path, opts: &ConvertOptions) -> Result<ConvertSummary, Error> {
    let table = TsvTable::from_path(input)?;
    let decoder = RowDecoder::new(&table.headers, opts)?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in &table.records {
        match decoder.decode(record) {
            Some(row) => rows.push(row),
            None => skipped += 1,
        }
    }

    let collection = geojson::feature_collection(&rows);
    let out = File::create(output)?;
    serde_json::to_writer_pretty(out, &collection).map_err(|e| Error::Json {
        file_name: output.display().to_string(),
        source: e,
    })?;

    Ok(ConvertSummary {
        features: rows.len(),
        skipped,
    })
}
