#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the park visitation pipeline.
//!
//! Loads the trip ping and park boundary exports once, applies the
//! analyst's filter criteria from flags, and prints the trip statistics
//! and park summary tables (or the whole filtered result as JSON). This
//! binary plays the role the dashboard UI plays in production: it owns all
//! display formatting, while the filter and analytics crates own the
//! semantics.

mod render;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use park_map_dataset::Dataset;
use park_map_filter::{FilterCriteria, FilteredView, ParkFocus, VisitorType};

#[derive(Debug, Parser)]
#[command(name = "park-map", about = "Filter and summarize park trip pings")]
struct Args {
    /// Trip ping GeoJSON export.
    #[arg(long)]
    pings: PathBuf,

    /// Park boundary GeoJSON export.
    #[arg(long)]
    parks: PathBuf,

    /// Optional park metadata JSON file (GlobalID -> park info).
    #[arg(long)]
    park_info: Option<PathBuf>,

    /// Park to include; repeat for multiple. Defaults to every park seen
    /// in the ping dataset.
    #[arg(long = "park")]
    selected_parks: Vec<String>,

    /// Visit-status filter: ALL, VISITOR, or NON_VISITOR.
    #[arg(long, default_value_t = VisitorType::All)]
    visitor_type: VisitorType,

    /// First date to include (inclusive). Defaults to the earliest ping
    /// date when both bounds are omitted.
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Last date to include (inclusive). Defaults to the latest ping date
    /// when both bounds are omitted.
    #[arg(long)]
    end_date: Option<NaiveDate>,

    /// Narrow the result to one park after all other filters.
    #[arg(long)]
    focus: Option<String>,

    /// Emit the filtered summaries as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let args = Args::parse();

    let dataset = Dataset::load(&args.pings, &args.parks, args.park_info.as_deref())?;

    let selected_parks = if args.selected_parks.is_empty() {
        dataset.available_parks()
    } else {
        args.selected_parks.clone()
    };

    // Mirror the dashboard's date control: seed an omitted range from the
    // data bounds, but pass it on explicitly. The filter engine itself
    // never invents a default.
    let (start_date, end_date) = match (args.start_date, args.end_date) {
        (None, None) => dataset
            .date_bounds()
            .map_or((None, None), |(first, last)| (Some(first), Some(last))),
        bounds => bounds,
    };

    let focus = args
        .focus
        .clone()
        .map_or(ParkFocus::All, ParkFocus::Park);

    let criteria = FilterCriteria::new(
        selected_parks,
        args.visitor_type,
        start_date,
        end_date,
        focus,
    )?;
    log::info!(
        "Filtering {} pings: {} parks selected, visitor type {}, focus {:?}",
        dataset.pings().len(),
        criteria.selected_parks.len(),
        criteria.visitor_type,
        criteria.focus.park()
    );

    let view = FilteredView::apply(dataset.pings(), dataset.parks(), &criteria)?;

    // Trip rows split by visit status only when the status filter leaves
    // both classes in the result.
    let split = args.visitor_type == VisitorType::All;
    let trips = park_map_analytics::trip_summaries(&view.pings, split);
    let parks = park_map_analytics::park_summaries(&view.pings);

    if args.json {
        let output = serde_json::json!({
            "numPings": view.pings.len(),
            "tripSummaries": trips,
            "parkSummaries": parks,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    render::print_trip_table(&trips);
    println!();
    render::print_park_table(&parks);

    if let Some(focused) = criteria.focus.park() {
        println!();
        render::print_park_details(focused, &view.parks, &dataset);
    }

    Ok(())
}
