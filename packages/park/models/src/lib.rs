#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Park boundary and park metadata types.
//!
//! A [`ParkPolygon`] is one boundary row as supplied by the open space
//! GeoJSON export (parks with multi-part boundaries arrive pre-exploded,
//! one row per part; rows are never merged here). [`ParkInfo`] is the rich
//! per-park metadata record, keyed by the boundary's `global_id` and loaded
//! once at startup as a read-only lookup.

use geo::MultiPolygon;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One park boundary row.
#[derive(Debug, Clone, PartialEq)]
pub struct ParkPolygon {
    /// Park group name, the join key to `TripPing::park_name`.
    pub park_group_name: String,
    /// Opaque identifier joining this boundary to its [`ParkInfo`] record.
    pub global_id: String,
    /// Boundary geometry in WGS84. Single polygons are wrapped into a
    /// one-element multi-polygon so consumers handle one shape.
    pub geometry: MultiPolygon<f64>,
    /// Park acreage, when the export carries it.
    pub acreage: Option<f64>,
    /// Contact link for the managing agency.
    pub contact: Option<String>,
}

/// Dog policy in effect for a park.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DogPolicy {
    /// Dogs allowed off-leash everywhere.
    Allowed,
    /// Dogs allowed on-leash only.
    LeashRequired,
    /// Off-leash allowed with a voice-and-sight control tag.
    VoiceAndSight,
    /// No dogs permitted.
    Prohibited,
}

/// Difficulty rating for a single trail.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TrailDifficulty {
    /// Flat, maintained surface.
    Easy,
    /// Sustained grade or uneven surface.
    Moderate,
    /// Steep, rocky, or exposed.
    Difficult,
}

/// One trail within a park.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trail {
    /// Trail name.
    pub name: String,
    /// Difficulty rating.
    pub difficulty: TrailDifficulty,
    /// One-way length in miles.
    pub length_miles: f64,
}

/// Seasonal and annual visit-count statistics for a park.
///
/// All fields are optional; parks without counters simply report `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeasonalVisits {
    /// Estimated visits March through May.
    pub spring: Option<u64>,
    /// Estimated visits June through August.
    pub summer: Option<u64>,
    /// Estimated visits September through November.
    pub fall: Option<u64>,
    /// Estimated visits December through February.
    pub winter: Option<u64>,
    /// Estimated visits for the full year.
    pub annual: Option<u64>,
}

/// Rich per-park metadata record, keyed by the boundary `global_id`.
///
/// Every field beyond the name is optional with an explicit default, so a
/// sparse metadata file still deserializes into a complete record and
/// display code never falls back to ad hoc "get with fallback" lookups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParkInfo {
    /// Park name as shown to analysts.
    pub name: String,
    /// Park acreage.
    pub acreage: Option<f64>,
    /// Contact link for the managing agency.
    pub contact: Option<String>,
    /// Dog policy, when published.
    pub dog_policy: Option<DogPolicy>,
    /// Supported activities (hiking, climbing, bouldering, ...).
    pub activities: Vec<String>,
    /// Whether the park has restrooms at the trailhead.
    pub has_restrooms: bool,
    /// Whether the trailhead is ADA accessible.
    pub ada_accessible: bool,
    /// Parking capacity in vehicles, when published.
    pub parking_capacity: Option<u32>,
    /// Trails within the park.
    pub trails: Vec<Trail>,
    /// Seasonal and annual visit counters.
    pub visits: SeasonalVisits,
}
