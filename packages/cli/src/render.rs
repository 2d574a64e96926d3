//! Plain-text table rendering for the summary outputs.
//!
//! Display-only concerns live here: column layout and truncating
//! full-precision timestamps to minute resolution. The summary types
//! themselves keep full precision.

use chrono::{DateTime, Utc};
use park_map_analytics_models::{ParkSummary, TripSummary};
use park_map_dataset::Dataset;
use park_map_park_models::ParkPolygon;

fn minute(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M").to_string()
}

fn visit_label(visited_park: Option<bool>) -> &'static str {
    match visited_park {
        None => "-",
        Some(true) => "visitor",
        Some(false) => "non-visitor",
    }
}

/// Prints the trip statistics table.
pub fn print_trip_table(trips: &[TripSummary]) {
    println!("Trip statistics ({} rows)", trips.len());
    println!(
        "{:<38} {:<24} {:<12} {:>6}  {:<17} {:<17}",
        "device", "park", "status", "pings", "first ping", "last ping"
    );
    for row in trips {
        println!(
            "{:<38} {:<24} {:<12} {:>6}  {:<17} {:<17}",
            row.device_id,
            row.park_name,
            visit_label(row.visited_park),
            row.num_pings,
            minute(row.first_ping),
            minute(row.last_ping)
        );
    }
}

/// Prints the park summary table, already sorted by visitor count.
pub fn print_park_table(parks: &[ParkSummary]) {
    println!("Park summary ({} rows)", parks.len());
    println!(
        "{:<24} {:>9} {:>7}  {:<17} {:<17}",
        "park", "visitors", "pings", "first ping", "last ping"
    );
    for row in parks {
        println!(
            "{:<24} {:>9} {:>7}  {:<17} {:<17}",
            row.park_name,
            row.num_visitors,
            row.num_pings,
            minute(row.first_ping),
            minute(row.last_ping)
        );
    }
}

/// Prints the rich metadata panel for the focused park.
///
/// Missing metadata is a valid degraded state: the panel still renders
/// with whatever the boundary row carries.
pub fn print_park_details(focused: &str, boundaries: &[ParkPolygon], dataset: &Dataset) {
    let Some(boundary) = boundaries
        .iter()
        .find(|park| park.park_group_name == focused)
    else {
        println!("No boundary data for {focused}");
        return;
    };

    println!("Park details: {}", boundary.park_group_name);
    let Some(info) = dataset.park_info(&boundary.global_id) else {
        if let Some(acreage) = boundary.acreage {
            println!("  acreage: {acreage:.1}");
        }
        if let Some(contact) = &boundary.contact {
            println!("  contact: {contact}");
        }
        println!("  (no rich metadata available)");
        return;
    };

    if let Some(acreage) = info.acreage.or(boundary.acreage) {
        println!("  acreage: {acreage:.1}");
    }
    if let Some(contact) = info.contact.as_deref().or(boundary.contact.as_deref()) {
        println!("  contact: {contact}");
    }
    if let Some(policy) = info.dog_policy {
        println!("  dog policy: {policy}");
    }
    if !info.activities.is_empty() {
        println!("  activities: {}", info.activities.join(", "));
    }
    println!(
        "  restrooms: {}  ADA accessible: {}",
        yes_no(info.has_restrooms),
        yes_no(info.ada_accessible)
    );
    if let Some(capacity) = info.parking_capacity {
        println!("  parking capacity: {capacity}");
    }
    for trail in &info.trails {
        println!(
            "  trail: {} ({}, {:.1} mi)",
            trail.name, trail.difficulty, trail.length_miles
        );
    }
    if let Some(annual) = info.visits.annual {
        println!("  annual visits: {annual}");
    }
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
