#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Grouped trip and park visitation summaries.
//!
//! Pure functions over an already-filtered ping set: no filtering happens
//! here, and identical input always produces identical output. Pings with
//! no park attribution are skipped by grouping, matching how the upstream
//! export treats them as noise. An empty input yields empty summaries,
//! never an error.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use park_map_analytics_models::{ParkSummary, TripSummary};
use park_map_trip_models::TripPing;

/// Computes one [`TripSummary`] row per `(device_id, park_name)` group.
///
/// With `split_by_visit_status` set, visit status joins the group key (one
/// row per `(device_id, park_name, visited_park)`) and each row carries its
/// classification; deployments that force visitor-only filtering upstream
/// leave it unset. Row order is group discovery order, but callers must not
/// rely on any ordering beyond grouping determinism.
#[must_use]
pub fn trip_summaries(pings: &[TripPing], split_by_visit_status: bool) -> Vec<TripSummary> {
    let mut index: HashMap<(String, String, Option<bool>), usize> = HashMap::new();
    let mut rows: Vec<TripSummary> = Vec::new();

    for ping in pings {
        let Some(park) = ping.park_name.as_deref() else {
            continue;
        };
        let status = split_by_visit_status.then_some(ping.visited_park);
        let key = (ping.device_id.clone(), park.to_string(), status);

        match index.entry(key) {
            Entry::Occupied(entry) => {
                let row = &mut rows[*entry.get()];
                row.num_pings += 1;
                row.first_ping = row.first_ping.min(ping.timestamp);
                row.last_ping = row.last_ping.max(ping.timestamp);
            }
            Entry::Vacant(entry) => {
                entry.insert(rows.len());
                rows.push(TripSummary {
                    device_id: ping.device_id.clone(),
                    park_name: park.to_string(),
                    visited_park: status,
                    num_pings: 1,
                    first_ping: ping.timestamp,
                    last_ping: ping.timestamp,
                });
            }
        }
    }

    log::debug!("aggregated {} pings into {} trip rows", pings.len(), rows.len());
    rows
}

/// Per-park accumulator while scanning the ping set.
struct ParkAccumulator {
    summary: ParkSummary,
    devices: HashSet<String>,
}

/// Computes one [`ParkSummary`] row per park, sorted by distinct-visitor
/// count descending.
///
/// Ties keep group discovery order (the order parks first appear in the
/// input), so output is deterministic for a fixed input.
#[must_use]
pub fn park_summaries(pings: &[TripPing]) -> Vec<ParkSummary> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<ParkAccumulator> = Vec::new();

    for ping in pings {
        let Some(park) = ping.park_name.as_deref() else {
            continue;
        };

        match index.entry(park.to_string()) {
            Entry::Occupied(entry) => {
                let group = &mut groups[*entry.get()];
                group.summary.num_pings += 1;
                group.summary.first_ping = group.summary.first_ping.min(ping.timestamp);
                group.summary.last_ping = group.summary.last_ping.max(ping.timestamp);
                group.devices.insert(ping.device_id.clone());
            }
            Entry::Vacant(entry) => {
                entry.insert(groups.len());
                groups.push(ParkAccumulator {
                    summary: ParkSummary {
                        park_name: park.to_string(),
                        num_visitors: 0,
                        num_pings: 1,
                        first_ping: ping.timestamp,
                        last_ping: ping.timestamp,
                    },
                    devices: HashSet::from([ping.device_id.clone()]),
                });
            }
        }
    }

    let mut rows: Vec<ParkSummary> = groups
        .into_iter()
        .map(|group| ParkSummary {
            num_visitors: group.devices.len() as u64,
            ..group.summary
        })
        .collect();

    // Stable sort keeps discovery order within equal visitor counts.
    rows.sort_by_key(|row| std::cmp::Reverse(row.num_visitors));

    log::debug!("aggregated {} pings into {} park rows", pings.len(), rows.len());
    rows
}
