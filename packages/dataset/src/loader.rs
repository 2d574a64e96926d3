//! GeoJSON and metadata file loaders.
//!
//! The trip ping export is a point feature collection with `ad_id`,
//! `park_name`, `utc_timestamp`, and `visited_park` properties. The open
//! space export is a polygon feature collection keyed by
//! `ParkGroupDescription` and `GlobalID`. Property names follow the wire
//! formats of those upstream exports, not this crate's field names.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use geojson::{FeatureCollection, GeoJson, JsonObject};
use park_map_park_models::{ParkInfo, ParkPolygon};
use park_map_trip_models::TripPing;

use crate::DatasetError;

/// Loads the trip ping point dataset from a GeoJSON export.
///
/// # Errors
///
/// Returns a [`DatasetError`] if the file cannot be read, is not a point
/// feature collection, or any feature is missing a required property.
pub fn load_trip_pings(path: &Path) -> Result<Vec<TripPing>, DatasetError> {
    let collection = read_feature_collection(path)?;
    let mut pings = Vec::with_capacity(collection.features.len());

    for (index, feature) in collection.features.into_iter().enumerate() {
        let geometry = feature
            .geometry
            .and_then(|geometry| geo::Geometry::<f64>::try_from(geometry).ok());
        let Some(geo::Geometry::Point(point)) = geometry else {
            return Err(DatasetError::UnsupportedGeometry {
                path: path.to_path_buf(),
                index,
            });
        };

        let properties = feature.properties.unwrap_or_default();
        let device_id = require_str(&properties, "ad_id", path, index)?.to_string();
        let park_name = optional_str(&properties, "park_name").map(ToString::to_string);
        let raw_timestamp = require_str(&properties, "utc_timestamp", path, index)?;
        let timestamp =
            parse_utc_timestamp(raw_timestamp).ok_or_else(|| DatasetError::InvalidTimestamp {
                path: path.to_path_buf(),
                index,
                value: raw_timestamp.to_string(),
            })?;
        let visited_park = properties
            .get("visited_park")
            .and_then(serde_json::Value::as_bool)
            .ok_or(DatasetError::MissingProperty {
                path: path.to_path_buf(),
                index,
                property: "visited_park",
            })?;

        pings.push(TripPing {
            device_id,
            park_name,
            timestamp,
            lon: point.x(),
            lat: point.y(),
            visited_park,
        });
    }

    log::info!("Loaded {} trip pings from {}", pings.len(), path.display());
    Ok(pings)
}

/// Loads the park boundary dataset from a GeoJSON export.
///
/// Single polygons are wrapped into one-element multi-polygons; multi-part
/// boundaries arrive pre-exploded upstream and each row is kept as-is,
/// never merged.
///
/// # Errors
///
/// Returns a [`DatasetError`] if the file cannot be read, is not a polygon
/// feature collection, or any feature is missing a required property.
pub fn load_park_polygons(path: &Path) -> Result<Vec<ParkPolygon>, DatasetError> {
    let collection = read_feature_collection(path)?;
    let mut parks = Vec::with_capacity(collection.features.len());

    for (index, feature) in collection.features.into_iter().enumerate() {
        let geometry = feature
            .geometry
            .and_then(|geometry| geo::Geometry::<f64>::try_from(geometry).ok());
        let geometry = match geometry {
            Some(geo::Geometry::MultiPolygon(multi)) => multi,
            Some(geo::Geometry::Polygon(polygon)) => geo::MultiPolygon(vec![polygon]),
            _ => {
                return Err(DatasetError::UnsupportedGeometry {
                    path: path.to_path_buf(),
                    index,
                });
            }
        };

        let properties = feature.properties.unwrap_or_default();
        let park_group_name =
            require_str(&properties, "ParkGroupDescription", path, index)?.to_string();
        let global_id = require_str(&properties, "GlobalID", path, index)?.to_string();
        let acreage = properties.get("Acreage").and_then(serde_json::Value::as_f64);
        let contact = optional_str(&properties, "Contact").map(ToString::to_string);

        parks.push(ParkPolygon {
            park_group_name,
            global_id,
            geometry,
            acreage,
            contact,
        });
    }

    log::info!(
        "Loaded {} park boundaries from {}",
        parks.len(),
        path.display()
    );
    Ok(parks)
}

/// Loads the optional park metadata file: a JSON object mapping boundary
/// `GlobalID`s to [`ParkInfo`] records.
///
/// # Errors
///
/// Returns a [`DatasetError`] if the file cannot be read or deserialized.
pub fn load_park_info(path: &Path) -> Result<BTreeMap<String, ParkInfo>, DatasetError> {
    let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let info: BTreeMap<String, ParkInfo> =
        serde_json::from_str(&content).map_err(|source| DatasetError::Metadata {
            path: path.to_path_buf(),
            source,
        })?;

    log::info!(
        "Loaded metadata for {} parks from {}",
        info.len(),
        path.display()
    );
    Ok(info)
}

fn read_feature_collection(path: &Path) -> Result<FeatureCollection, DatasetError> {
    let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_feature_collection(&content, path)
}

fn parse_feature_collection(
    content: &str,
    path: &Path,
) -> Result<FeatureCollection, DatasetError> {
    let geojson: GeoJson = content.parse().map_err(|source| DatasetError::Geojson {
        path: path.to_path_buf(),
        source: Box::new(source),
    })?;
    match geojson {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        GeoJson::Feature(_) | GeoJson::Geometry(_) => Err(DatasetError::NotFeatureCollection {
            path: path.to_path_buf(),
        }),
    }
}

/// Parses a ping timestamp: RFC 3339, or a bare ISO 8601 datetime with
/// optional fractional seconds (treated as UTC).
fn parse_utc_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    None
}

fn optional_str<'a>(properties: &'a JsonObject, key: &str) -> Option<&'a str> {
    properties.get(key).and_then(serde_json::Value::as_str)
}

fn require_str<'a>(
    properties: &'a JsonObject,
    key: &'static str,
    path: &Path,
    index: usize,
) -> Result<&'a str, DatasetError> {
    optional_str(properties, key).ok_or(DatasetError::MissingProperty {
        path: path.to_path_buf(),
        index,
        property: key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    const PINGS_GEOJSON: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-105.281, 39.999]},
                "properties": {
                    "ad_id": "device-a",
                    "park_name": "Chautauqua",
                    "utc_timestamp": "2024-06-01T10:00:00Z",
                    "visited_park": true
                }
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-105.300, 40.020]},
                "properties": {
                    "ad_id": "device-b",
                    "park_name": null,
                    "utc_timestamp": "2024-06-02T09:30:00",
                    "visited_park": false
                }
            }
        ]
    }"#;

    const PARKS_GEOJSON: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [-105.30, 39.99], [-105.27, 39.99],
                        [-105.27, 40.01], [-105.30, 40.01],
                        [-105.30, 39.99]
                    ]]
                },
                "properties": {
                    "ParkGroupDescription": "Chautauqua",
                    "GlobalID": "guid-1",
                    "Acreage": 79.3,
                    "Contact": "https://example.org/chautauqua"
                }
            }
        ]
    }"#;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("park_map_loader_{name}"));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn parses_trip_pings_with_nullable_park_names() {
        let path = write_temp("pings.geojson", PINGS_GEOJSON);
        let pings = load_trip_pings(&path).unwrap();
        assert_eq!(pings.len(), 2);

        assert_eq!(pings[0].device_id, "device-a");
        assert_eq!(pings[0].park_name.as_deref(), Some("Chautauqua"));
        assert!((pings[0].lon - -105.281).abs() < f64::EPSILON);
        assert!((pings[0].lat - 39.999).abs() < f64::EPSILON);
        assert!(pings[0].visited_park);
        assert_eq!(
            pings[0].timestamp,
            Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
        );

        assert_eq!(pings[1].park_name, None);
        assert!(!pings[1].visited_park);
    }

    #[test]
    fn parses_park_polygons_and_wraps_single_polygons() {
        let path = write_temp("parks.geojson", PARKS_GEOJSON);
        let parks = load_park_polygons(&path).unwrap();
        assert_eq!(parks.len(), 1);
        assert_eq!(parks[0].park_group_name, "Chautauqua");
        assert_eq!(parks[0].global_id, "guid-1");
        assert_eq!(parks[0].acreage, Some(79.3));
        assert_eq!(parks[0].geometry.0.len(), 1);
    }

    #[test]
    fn missing_required_property_is_reported_with_its_name() {
        let content = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
                "properties": {"park_name": "Chautauqua"}
            }]
        }"#;
        let path = write_temp("missing_prop.geojson", content);
        let err = load_trip_pings(&path).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::MissingProperty {
                property: "ad_id",
                index: 0,
                ..
            }
        ));
    }

    #[test]
    fn non_point_ping_geometry_is_rejected() {
        let path = write_temp("bad_geom.geojson", PARKS_GEOJSON);
        let err = load_trip_pings(&path).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::UnsupportedGeometry { index: 0, .. }
        ));
    }

    #[test]
    fn unparseable_timestamp_is_rejected() {
        let content = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
                "properties": {
                    "ad_id": "device-a",
                    "park_name": "Chautauqua",
                    "utc_timestamp": "last tuesday",
                    "visited_park": true
                }
            }]
        }"#;
        let path = write_temp("bad_ts.geojson", content);
        let err = load_trip_pings(&path).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidTimestamp { .. }));
    }

    #[test]
    fn bare_geometry_is_not_a_feature_collection() {
        let path = write_temp(
            "bare_geometry.geojson",
            r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#,
        );
        let err = load_trip_pings(&path).unwrap_err();
        assert!(matches!(err, DatasetError::NotFeatureCollection { .. }));
    }

    #[test]
    fn parses_timestamp_formats() {
        assert!(parse_utc_timestamp("2024-06-01T10:00:00Z").is_some());
        assert!(parse_utc_timestamp("2024-06-01T10:00:00.250").is_some());
        assert!(parse_utc_timestamp("2024-06-01 10:00:00").is_some());
        assert!(parse_utc_timestamp("not-a-time").is_none());
    }

    #[test]
    fn loads_park_info_map() {
        let content = r#"{
            "guid-1": {"name": "Chautauqua", "acreage": 79.3},
            "guid-2": {"name": "Sanitas"}
        }"#;
        let path = write_temp("info.json", content);
        let info = load_park_info(&path).unwrap();
        assert_eq!(info.len(), 2);
        assert_eq!(info["guid-1"].name, "Chautauqua");
        assert!(info["guid-2"].acreage.is_none());
    }
}
