//! Row decoding: turning raw tab-separated records into typed point rows.

use geo_types::Coord;
use serde_json::{Map, Value};

use super::ConvertOptions;
use crate::error::Error;

/// Feature identifier taken from the id column: integral when the text
/// parses as an integer, otherwise the raw string.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureId {
    Int(i64),
    Text(String),
}

impl FeatureId {
    pub fn parse(raw: &str) -> FeatureId {
        match raw.trim().parse::<i64>() {
            Ok(n) => FeatureId::Int(n),
            Err(_) => FeatureId::Text(raw.to_string()),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            FeatureId::Int(n) => Value::from(*n),
            FeatureId::Text(s) => Value::from(s.as_str()),
        }
    }
}

/// One accepted input row, ready to become a GeoJSON feature.
#[derive(Debug, Clone, PartialEq)]
pub struct PointRow {
    /// Parsed position, `x` = longitude, `y` = latitude
    pub coord: Coord<f64>,
    pub id: Option<FeatureId>,
    pub properties: Map<String, Value>,
}

/// Resolves the configured column names against the header once, then
/// decodes records into accepted rows.
pub struct RowDecoder {
    lat_idx: usize,
    lon_idx: usize,
    id_idx: Option<usize>,
    /// Kept property columns with their header position, `None` for keep
    /// names absent from the header
    keep: Vec<(String, Option<usize>)>,
}

impl RowDecoder {
    pub fn new(headers: &[String], opts: &ConvertOptions) -> Result<RowDecoder, Error> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let (Some(lat_idx), Some(lon_idx)) =
            (position(&opts.lat_field), position(&opts.lon_field))
        else {
            return Err(Error::MissingColumns {
                lat_field: opts.lat_field.clone(),
                lon_field: opts.lon_field.clone(),
                found: headers.to_vec(),
            });
        };
        let id_idx = position(&opts.id_field);

        let keep_names: Vec<String> = match &opts.keep_fields {
            Some(fields) => fields.clone(),
            None => headers
                .iter()
                .filter(|h| {
                    h.as_str() != opts.lat_field
                        && h.as_str() != opts.lon_field
                        && h.as_str() != opts.id_field
                })
                .cloned()
                .collect(),
        };
        let keep = keep_names
            .into_iter()
            .map(|name| {
                let idx = position(&name);
                (name, idx)
            })
            .collect();

        Ok(RowDecoder {
            lat_idx,
            lon_idx,
            id_idx,
            keep,
        })
    }

    /// Decodes one record. Returns `None` when the latitude or longitude
    /// field is missing or fails to parse; such rows produce no feature.
    pub fn decode(&self, record: &csv::StringRecord) -> Option<PointRow> {
        let lat = parse_coord(record.get(self.lat_idx)?)?;
        let lon = parse_coord(record.get(self.lon_idx)?)?;

        let mut properties = Map::new();
        for (name, idx) in &self.keep {
            let value = idx
                .and_then(|i| record.get(i))
                .map(Value::from)
                .unwrap_or(Value::Null);
            properties.insert(name.clone(), value);
        }

        let id = self
            .id_idx
            .and_then(|i| record.get(i))
            .filter(|v| !v.is_empty())
            .map(FeatureId::parse);

        Some(PointRow {
            coord: Coord { x: lon, y: lat },
            id,
            properties,
        })
    }
}

/// Lenient coordinate parse: surrounding whitespace is tolerated, anything
/// non-numeric rejects the value.
pub fn parse_coord(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}
