#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived trip and park visitation summary types.
//!
//! Summary rows are recomputed from the filtered ping set on every filter
//! change and never persisted. Timestamps stay at full precision here;
//! truncating them to display strings is the presentation layer's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statistics for one trip: all pings sharing a device and a park.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    /// Device identifier of the visitor.
    pub device_id: String,
    /// Park the trip took place in.
    pub park_name: String,
    /// Visit classification of the group, populated only when summaries
    /// are split by visit status.
    pub visited_park: Option<bool>,
    /// Number of pings in the group.
    pub num_pings: u64,
    /// Earliest ping timestamp in the group.
    pub first_ping: DateTime<Utc>,
    /// Latest ping timestamp in the group.
    pub last_ping: DateTime<Utc>,
}

/// Visitation statistics for one park across the filtered ping set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkSummary {
    /// Park name.
    pub park_name: String,
    /// Number of distinct devices seen in the park.
    pub num_visitors: u64,
    /// Total number of pings in the park.
    pub num_pings: u64,
    /// Earliest ping timestamp in the park.
    pub first_ping: DateTime<Utc>,
    /// Latest ping timestamp in the park.
    pub last_ping: DateTime<Utc>,
}
