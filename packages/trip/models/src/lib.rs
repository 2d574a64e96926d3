#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Trip ping sample types.
//!
//! A trip ping is one timestamped geolocation sample from a mobile device,
//! already attributed to a park (or to no park) by the upstream ping
//! processing pipeline. Everything downstream — filtering, trip and park
//! summaries, map layers — consumes these records read-only.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One observed location sample from a visitor device.
///
/// The `visited_park` classification is computed upstream; this crate treats
/// it as ground truth and never recomputes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPing {
    /// Opaque advertising identifier, stable per physical device.
    pub device_id: String,
    /// Park the ping was attributed to, `None` when the ping landed outside
    /// every known park boundary.
    pub park_name: Option<String>,
    /// Observation time in UTC.
    pub timestamp: DateTime<Utc>,
    /// Longitude in WGS84 degrees.
    pub lon: f64,
    /// Latitude in WGS84 degrees.
    pub lat: f64,
    /// Whether this ping belongs to a genuine park visit (vs. passing
    /// through or background noise).
    pub visited_park: bool,
}

impl TripPing {
    /// Calendar date of the observation, used by date-range filtering.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    #[test]
    fn date_truncates_to_calendar_day() {
        let ping = TripPing {
            device_id: "abc".to_string(),
            park_name: Some("Chautauqua".to_string()),
            timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 23, 59, 59).unwrap(),
            lon: -105.28,
            lat: 39.99,
            visited_park: true,
        };
        assert_eq!(
            ping.date(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }
}
