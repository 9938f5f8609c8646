//! Listing search criteria
//!
//! A bag of optional filters that the store translates into one query.
//! All present criteria AND together; the non-expired base predicate is
//! always applied.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::value_objects::{Quantity, Snowflake};

/// Optional criteria for a listing search.
///
/// `poster_ids` is the already-resolved form of the "posted by name"
/// criterion: `None` means the criterion was absent, `Some(vec![])` means
/// no user matched and the search short-circuits to an empty result.
#[derive(Debug, Clone, Default)]
pub struct ListingSearch {
    /// Case-insensitive substring over food type OR description
    pub text: Option<String>,
    /// Space-separated tokens; a listing matches only if its location
    /// contains every token, case-insensitively, in any order
    pub location: Option<String>,
    /// Calendar day the listing was created on
    pub posted_on: Option<NaiveDate>,
    /// Minimum quantity, compared phase-aware in base units
    pub quantity: Option<Quantity>,
    /// Narrows the default non-expired filter: expiration >= this instant
    pub min_expiry: Option<DateTime<Utc>>,
    /// Creator ids resolved from a poster-name criterion
    pub poster_ids: Option<Vec<Snowflake>>,
}

impl ListingSearch {
    /// True when a poster-name criterion resolved to nobody; the caller
    /// returns an empty result without touching the store.
    pub fn is_unsatisfiable(&self) -> bool {
        matches!(&self.poster_ids, Some(ids) if ids.is_empty())
    }

    /// Lowercased location tokens, empty when the criterion is absent
    pub fn location_tokens(&self) -> Vec<String> {
        self.location
            .as_deref()
            .map(|loc| {
                loc.split_whitespace()
                    .map(str::to_lowercase)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Inclusive bounds of the `posted_on` calendar day in UTC:
    /// `[00:00:00.000, 23:59:59.999]`
    pub fn posted_on_bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.posted_on.map(day_bounds)
    }
}

fn day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day.and_hms_opt(0, 0, 0).expect("midnight is valid");
    let end = day
        .and_hms_milli_opt(23, 59, 59, 999)
        .expect("end of day is valid");
    (Utc.from_utc_datetime(&start), Utc.from_utc_datetime(&end))
}
