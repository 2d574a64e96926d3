#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Predicate filtering of trip pings and park boundaries.
//!
//! The engine takes the immutable base datasets plus one
//! [`FilterCriteria`] bundle and produces new filtered collections. All
//! predicates are conjunctive and order-insensitive: park selection,
//! visit status, and date range apply first, and the active-park focus
//! narrows that result without ever replacing it. Every run is a fresh
//! pass over the base data, so repeated runs with identical criteria are
//! byte-for-byte identical.

mod criteria;

pub use criteria::{DateRange, FilterCriteria, ParkFocus, VisitorType};

use park_map_park_models::ParkPolygon;
use park_map_trip_models::TripPing;
use thiserror::Error;

/// Errors that can occur while assembling or running a filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The date range is missing one or both bounds. The caller must
    /// re-prompt; the engine never substitutes a default range.
    #[error("date range is incomplete: both a start and an end date are required")]
    IncompleteDateRange,
}

/// The filtered view of one pipeline run: pings and boundaries that
/// survived the same criteria.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    /// Pings passing park selection, visit status, date range, and focus.
    pub pings: Vec<TripPing>,
    /// Boundaries passing park selection and focus.
    pub parks: Vec<ParkPolygon>,
}

impl FilteredView {
    /// Runs one complete filter pass over the base datasets.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::IncompleteDateRange`] before touching any
    /// data if the criteria carry no date range; no partial results are
    /// produced.
    pub fn apply(
        pings: &[TripPing],
        parks: &[ParkPolygon],
        criteria: &FilterCriteria,
    ) -> Result<Self, FilterError> {
        let filtered = Self {
            pings: filter_pings(pings, criteria)?,
            parks: filter_parks(parks, criteria),
        };
        log::debug!(
            "filter pass kept {}/{} pings and {}/{} boundaries",
            filtered.pings.len(),
            pings.len(),
            filtered.parks.len(),
            parks.len()
        );
        Ok(filtered)
    }
}

/// Filters the ping dataset by all four criteria.
///
/// Pings without a park attribution never match: park selection is set
/// membership and `None` is a member of nothing. An empty selection set
/// therefore yields an empty result rather than "no filter applied".
///
/// # Errors
///
/// Returns [`FilterError::IncompleteDateRange`] if the criteria carry no
/// date range.
pub fn filter_pings(
    pings: &[TripPing],
    criteria: &FilterCriteria,
) -> Result<Vec<TripPing>, FilterError> {
    let criteria = criteria.validated()?;
    let range = criteria
        .date_range
        .ok_or(FilterError::IncompleteDateRange)?;

    Ok(pings
        .iter()
        .filter(|ping| {
            ping.park_name.as_deref().is_some_and(|park| {
                criteria.selected_parks.contains(park)
                    && criteria.visitor_type.matches(ping.visited_park)
                    && range.contains(ping.date())
                    && criteria.focus.matches(park)
            })
        })
        .cloned()
        .collect())
}

/// Filters the boundary dataset by park selection and focus.
///
/// Visit status and date range don't apply to boundaries, so this stage
/// is infallible; pipeline-level validation happens in
/// [`FilteredView::apply`].
#[must_use]
pub fn filter_parks(parks: &[ParkPolygon], criteria: &FilterCriteria) -> Vec<ParkPolygon> {
    parks
        .iter()
        .filter(|park| {
            criteria.selected_parks.contains(&park.park_group_name)
                && criteria.focus.matches(&park.park_group_name)
        })
        .cloned()
        .collect()
}
