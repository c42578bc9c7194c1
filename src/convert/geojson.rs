//! GeoJSON assembly for the converter output.

use geo_types::Coord;
use serde_json::{json, Value};

use super::row::PointRow;

/// Axis-aligned bounds over a set of positions, in GeoJSON
/// `[min_lon, min_lat, max_lon, max_lat]` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Bounds {
    /// Degenerate bounds of a single position.
    fn of(coord: Coord<f64>) -> Bounds {
        Bounds {
            min_lon: coord.x,
            min_lat: coord.y,
            max_lon: coord.x,
            max_lat: coord.y,
        }
    }

    fn merge(self, other: Bounds) -> Bounds {
        Bounds {
            min_lon: self.min_lon.min(other.min_lon),
            min_lat: self.min_lat.min(other.min_lat),
            max_lon: self.max_lon.max(other.max_lon),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }

    /// Folds a sequence of positions into their overall bounds, `None`
    /// when the sequence is empty.
    pub fn of_coords<I>(coords: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = Coord<f64>>,
    {
        coords.into_iter().map(Bounds::of).reduce(Bounds::merge)
    }

    pub fn to_value(&self) -> Value {
        json!([self.min_lon, self.min_lat, self.max_lon, self.max_lat])
    }
}

/// Builds one GeoJSON point feature. The degenerate bbox is attached to
/// both the geometry and the feature, and the id key is only present when
/// the source row carried one.
pub fn point_feature(row: &PointRow) -> Value {
    let bbox = [row.coord.x, row.coord.y, row.coord.x, row.coord.y];
    let mut feature = json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [row.coord.x, row.coord.y],
            "bbox": bbox,
        },
        "properties": &row.properties,
        "bbox": bbox,
    });
    if let Some(id) = &row.id {
        feature["id"] = id.to_value();
    }
    feature
}

/// Assembles the final FeatureCollection. The collection `bbox` is only
/// attached when at least one feature was produced.
pub fn feature_collection(rows: &[PointRow]) -> Value {
    let features: Vec<Value> = rows.iter().map(point_feature).collect();
    let mut collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });
    if let Some(bounds) = Bounds::of_coords(rows.iter().map(|r| r.coord)) {
        collection["bbox"] = bounds.to_value();
    }
    collection
}

#[cfg(test)]
mod tests {
    use serde_json::Map;

    use super::super::row::FeatureId;
    use super::*;

    fn point(lon: f64, lat: f64) -> Coord<f64> {
        Coord { x: lon, y: lat }
    }

    fn row(lon: f64, lat: f64, id: Option<FeatureId>) -> PointRow {
        PointRow {
            coord: point(lon, lat),
            id,
            properties: Map::new(),
        }
    }

    #[test]
    fn bounds_of_empty_sequence_is_none() {
        assert_eq!(Bounds::of_coords(std::iter::empty()), None);
    }

    #[test]
    fn bounds_fold_is_componentwise_min_max() {
        let bounds =
            Bounds::of_coords(vec![point(96.15, 16.80), point(96.10, 17.00), point(96.30, 16.50)])
                .unwrap();
        assert_eq!(bounds.min_lon, 96.10);
        assert_eq!(bounds.min_lat, 16.50);
        assert_eq!(bounds.max_lon, 96.30);
        assert_eq!(bounds.max_lat, 17.00);
    }

    #[test]
    fn single_point_bounds_are_degenerate() {
        let bounds = Bounds::of_coords(vec![point(96.15, 16.80)]).unwrap();
        assert_eq!(bounds.to_value(), json!([96.15, 16.80, 96.15, 16.80]));
    }

    #[test]
    fn feature_is_longitude_first() {
        let feature = point_feature(&row(96.15, 16.80, None));
        assert_eq!(feature["type"], "Feature");
        assert_eq!(feature["geometry"]["type"], "Point");
        assert_eq!(feature["geometry"]["coordinates"], json!([96.15, 16.80]));
        assert_eq!(feature["geometry"]["bbox"], json!([96.15, 16.80, 96.15, 16.80]));
        assert_eq!(feature["bbox"], json!([96.15, 16.80, 96.15, 16.80]));
    }

    #[test]
    fn feature_id_is_typed() {
        let feature = point_feature(&row(96.15, 16.80, Some(FeatureId::Int(42))));
        assert_eq!(feature["id"], json!(42));

        let feature = point_feature(&row(96.15, 16.80, Some(FeatureId::Text("abc".into()))));
        assert_eq!(feature["id"], json!("abc"));

        let feature = point_feature(&row(96.15, 16.80, None));
        assert!(feature.get("id").is_none());
    }

    #[test]
    fn collection_bbox_follows_features() {
        let collection = feature_collection(&[]);
        assert_eq!(collection["features"], json!([]));
        assert!(collection.get("bbox").is_none());

        let collection = feature_collection(&[row(96.15, 16.80, None), row(96.20, 16.70, None)]);
        assert_eq!(collection["bbox"], json!([96.15, 16.70, 96.20, 16.80]));
    }
}
