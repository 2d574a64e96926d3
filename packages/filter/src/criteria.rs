//! User-selected filter criteria.
//!
//! Criteria are plain values assembled by the presentation layer (sidebar
//! controls, CLI flags) and handed to the engine as one immutable bundle.
//! Construction is where incomplete input is rejected; once a
//! [`FilterCriteria`] exists, every pipeline run with it is infallible.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::FilterError;

/// Visit-status filter mode.
///
/// Deployments that omit the visitor-type control simply fix this to one
/// variant (the kiosk build forces [`VisitorType::Visitor`]); nothing in the
/// engine distinguishes a user-chosen mode from a hardcoded one.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum VisitorType {
    /// Keep every ping regardless of classification.
    #[default]
    All,
    /// Keep only pings classified as genuine park visits.
    Visitor,
    /// Keep only pings classified as pass-through or background noise.
    NonVisitor,
}

impl VisitorType {
    /// Whether a ping with the given `visited_park` flag passes this mode.
    #[must_use]
    pub const fn matches(self, visited_park: bool) -> bool {
        match self {
            Self::All => true,
            Self::Visitor => visited_park,
            Self::NonVisitor => !visited_park,
        }
    }
}

/// Inclusive calendar date range.
///
/// Compared against the calendar date of each ping's UTC timestamp, both
/// bounds inclusive. A range whose start is after its end is valid to
/// construct and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// First date kept, inclusive.
    pub start: NaiveDate,
    /// Last date kept, inclusive.
    pub end: NaiveDate,
}

impl DateRange {
    /// Builds a range from two optional bounds.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::IncompleteDateRange`] if either bound is
    /// absent. The caller must re-prompt; the engine never guesses a
    /// default range.
    pub const fn new(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, FilterError> {
        match (start, end) {
            (Some(start), Some(end)) => Ok(Self { start, end }),
            _ => Err(FilterError::IncompleteDateRange),
        }
    }

    /// Whether `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Active-park focus: narrow the already-filtered view to one park.
///
/// Focus never widens anything. Focusing on a park outside the current
/// selection is a valid state that yields empty results, which the
/// presentation layer renders as "no data".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParkFocus {
    /// No narrowing; pass the upstream-filtered view through unchanged.
    #[default]
    All,
    /// Keep only the named park.
    Park(String),
}

impl ParkFocus {
    /// Whether a row attributed to `park_name` passes the focus.
    #[must_use]
    pub fn matches(&self, park_name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Park(focused) => focused == park_name,
        }
    }

    /// The focused park name, if any.
    #[must_use]
    pub fn park(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Park(name) => Some(name.as_str()),
        }
    }
}

/// One immutable bundle of filter criteria for a pipeline run.
///
/// All four predicates combine with AND semantics and are
/// order-insensitive. An empty `selected_parks` set means "nothing
/// selected" and yields empty results; it is never treated as "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Parks the analyst has selected. Subset of the known park-name set.
    pub selected_parks: BTreeSet<String>,
    /// Visit-status mode.
    pub visitor_type: VisitorType,
    /// Inclusive date range, `None` only in the default (unconfigured)
    /// state; [`FilterCriteria::validated`] rejects it.
    pub date_range: Option<DateRange>,
    /// Final-stage single-park narrowing.
    pub focus: ParkFocus,
}

impl FilterCriteria {
    /// Builds validated criteria from raw control state.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::IncompleteDateRange`] if either date bound is
    /// missing.
    pub fn new(
        selected_parks: impl IntoIterator<Item = String>,
        visitor_type: VisitorType,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        focus: ParkFocus,
    ) -> Result<Self, FilterError> {
        Ok(Self {
            selected_parks: selected_parks.into_iter().collect(),
            visitor_type,
            date_range: Some(DateRange::new(start_date, end_date)?),
            focus,
        })
    }

    /// Checks that the criteria are complete enough to run the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::IncompleteDateRange`] if no date range has
    /// been set.
    pub const fn validated(&self) -> Result<&Self, FilterError> {
        if self.date_range.is_none() {
            return Err(FilterError::IncompleteDateRange);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn visitor_type_matches_flag() {
        assert!(VisitorType::All.matches(true));
        assert!(VisitorType::All.matches(false));
        assert!(VisitorType::Visitor.matches(true));
        assert!(!VisitorType::Visitor.matches(false));
        assert!(!VisitorType::NonVisitor.matches(true));
        assert!(VisitorType::NonVisitor.matches(false));
    }

    #[test]
    fn date_range_is_inclusive_on_both_bounds() {
        let range = DateRange::new(Some(date(2024, 6, 1)), Some(date(2024, 6, 2))).unwrap();
        assert!(range.contains(date(2024, 6, 1)));
        assert!(range.contains(date(2024, 6, 2)));
        assert!(!range.contains(date(2024, 5, 31)));
        assert!(!range.contains(date(2024, 6, 3)));
    }

    #[test]
    fn inverted_date_range_matches_nothing() {
        let range = DateRange::new(Some(date(2024, 6, 2)), Some(date(2024, 6, 1))).unwrap();
        assert!(!range.contains(date(2024, 6, 1)));
        assert!(!range.contains(date(2024, 6, 2)));
    }

    #[test]
    fn missing_bound_is_rejected() {
        assert_eq!(
            DateRange::new(Some(date(2024, 6, 1)), None),
            Err(FilterError::IncompleteDateRange)
        );
        assert_eq!(
            DateRange::new(None, Some(date(2024, 6, 1))),
            Err(FilterError::IncompleteDateRange)
        );
        assert_eq!(DateRange::new(None, None), Err(FilterError::IncompleteDateRange));
    }

    #[test]
    fn default_criteria_fail_validation() {
        let criteria = FilterCriteria::default();
        assert_eq!(
            criteria.validated().unwrap_err(),
            FilterError::IncompleteDateRange
        );
    }

    #[test]
    fn focus_matches_only_named_park() {
        let focus = ParkFocus::Park("Chautauqua".to_string());
        assert!(focus.matches("Chautauqua"));
        assert!(!focus.matches("Sanitas"));
        assert!(ParkFocus::All.matches("Sanitas"));
        assert_eq!(focus.park(), Some("Chautauqua"));
        assert_eq!(ParkFocus::All.park(), None);
    }

    #[test]
    fn visitor_type_parses_from_screaming_snake() {
        assert_eq!("VISITOR".parse::<VisitorType>().unwrap(), VisitorType::Visitor);
        assert_eq!(
            "NON_VISITOR".parse::<VisitorType>().unwrap(),
            VisitorType::NonVisitor
        );
        assert!("SOMETIMES".parse::<VisitorType>().is_err());
    }
}
