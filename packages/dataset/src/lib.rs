#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Load-once immutable datasets for the park map pipeline.
//!
//! The [`Dataset`] handle is built once at startup from the trip ping and
//! park boundary GeoJSON exports (plus an optional park metadata file) and
//! then shared read-only with every pipeline run. Filtering and
//! aggregation always start from this same ground truth; nothing is ever
//! re-fetched or mutated per interaction.

mod loader;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use park_map_park_models::{ParkInfo, ParkPolygon};
use park_map_trip_models::TripPing;
use thiserror::Error;

pub use loader::{load_park_info, load_park_polygons, load_trip_pings};

/// Errors that can occur while loading the base datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Reading a source file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A source file is not valid GeoJSON.
    #[error("invalid GeoJSON in {path}: {source}")]
    Geojson {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying parse error.
        source: Box<geojson::Error>,
    },

    /// A GeoJSON file parsed but is not a feature collection.
    #[error("{path} is not a GeoJSON feature collection")]
    NotFeatureCollection {
        /// Offending file.
        path: PathBuf,
    },

    /// A feature is missing a required property.
    #[error("feature {index} in {path} is missing property {property:?}")]
    MissingProperty {
        /// File containing the feature.
        path: PathBuf,
        /// Zero-based feature index.
        index: usize,
        /// Name of the missing or mistyped property.
        property: &'static str,
    },

    /// A feature has no geometry or a geometry of the wrong type.
    #[error("feature {index} in {path} has a missing or unsupported geometry")]
    UnsupportedGeometry {
        /// File containing the feature.
        path: PathBuf,
        /// Zero-based feature index.
        index: usize,
    },

    /// A ping timestamp could not be parsed.
    #[error("feature {index} in {path} has unparseable timestamp {value:?}")]
    InvalidTimestamp {
        /// File containing the feature.
        path: PathBuf,
        /// Zero-based feature index.
        index: usize,
        /// The raw timestamp string.
        value: String,
    },

    /// The park metadata file is not valid JSON for the expected shape.
    #[error("invalid park metadata in {path}: {source}")]
    Metadata {
        /// Offending file.
        path: PathBuf,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },
}

/// The immutable base datasets, loaded once and shared across all
/// pipeline runs.
#[derive(Debug, Clone)]
pub struct Dataset {
    pings: Vec<TripPing>,
    parks: Vec<ParkPolygon>,
    park_info: BTreeMap<String, ParkInfo>,
}

impl Dataset {
    /// Builds a dataset from already-loaded collections.
    #[must_use]
    pub const fn new(
        pings: Vec<TripPing>,
        parks: Vec<ParkPolygon>,
        park_info: BTreeMap<String, ParkInfo>,
    ) -> Self {
        Self {
            pings,
            parks,
            park_info,
        }
    }

    /// Loads the dataset from the GeoJSON exports and the optional park
    /// metadata file.
    ///
    /// # Errors
    ///
    /// Returns a [`DatasetError`] if any file cannot be read or parsed.
    pub fn load(
        pings_path: &Path,
        parks_path: &Path,
        info_path: Option<&Path>,
    ) -> Result<Self, DatasetError> {
        let pings = load_trip_pings(pings_path)?;
        let parks = load_park_polygons(parks_path)?;
        let park_info = match info_path {
            Some(path) => load_park_info(path)?,
            None => BTreeMap::new(),
        };

        log::info!(
            "Loaded {} trip pings, {} park boundaries, {} metadata records",
            pings.len(),
            parks.len(),
            park_info.len()
        );

        Ok(Self::new(pings, parks, park_info))
    }

    /// The full trip ping dataset.
    #[must_use]
    pub fn pings(&self) -> &[TripPing] {
        &self.pings
    }

    /// The full park boundary dataset.
    #[must_use]
    pub fn parks(&self) -> &[ParkPolygon] {
        &self.parks
    }

    /// Looks up the metadata record for a boundary's `global_id`.
    ///
    /// A missing record means "no rich info available" and is a valid
    /// degraded state, not an error.
    #[must_use]
    pub fn park_info(&self, global_id: &str) -> Option<&ParkInfo> {
        self.park_info.get(global_id)
    }

    /// Park names available as selection options: every distinct
    /// attributed park name across the ping dataset, sorted. Pings with no
    /// park attribution contribute nothing.
    #[must_use]
    pub fn available_parks(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .pings
            .iter()
            .filter_map(|ping| ping.park_name.clone())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Earliest and latest ping dates, for seeding a date-range control.
    /// `None` when the ping dataset is empty.
    #[must_use]
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.pings.iter().map(TripPing::date).min()?;
        let last = self.pings.iter().map(TripPing::date).max()?;
        Some((first, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone as _, Utc};

    fn ping(device: &str, park: Option<&str>, day: u32) -> TripPing {
        TripPing {
            device_id: device.to_string(),
            park_name: park.map(ToString::to_string),
            timestamp: Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap(),
            lon: -105.28,
            lat: 39.99,
            visited_park: true,
        }
    }

    #[test]
    fn available_parks_are_sorted_distinct_and_drop_nulls() {
        let dataset = Dataset::new(
            vec![
                ping("A", Some("Sanitas"), 1),
                ping("B", Some("Chautauqua"), 1),
                ping("C", Some("Sanitas"), 2),
                ping("D", None, 2),
            ],
            Vec::new(),
            BTreeMap::new(),
        );
        assert_eq!(dataset.available_parks(), ["Chautauqua", "Sanitas"]);
    }

    #[test]
    fn date_bounds_span_the_ping_dataset() {
        let dataset = Dataset::new(
            vec![ping("A", Some("Sanitas"), 7), ping("B", Some("Sanitas"), 2)],
            Vec::new(),
            BTreeMap::new(),
        );
        let (first, last) = dataset.date_bounds().unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 6, 7).unwrap());
    }

    #[test]
    fn empty_dataset_has_no_date_bounds() {
        let dataset = Dataset::new(Vec::new(), Vec::new(), BTreeMap::new());
        assert!(dataset.date_bounds().is_none());
    }

    #[test]
    fn missing_metadata_is_a_degraded_state_not_an_error() {
        let dataset = Dataset::new(Vec::new(), Vec::new(), BTreeMap::new());
        assert!(dataset.park_info("no-such-id").is_none());
    }
}
