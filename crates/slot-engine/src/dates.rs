//! Which days in a range still have an open slot.

use chrono::NaiveDate;

use crate::availability::{available_slots, is_closed};
use crate::model::Provider;

/// Dates in `[start, end]` on which the provider has at least one free slot,
/// in ascending order.
///
/// An inverted range (`start > end`) yields no dates.
pub fn available_dates(provider: &Provider, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .filter(|date| !is_closed(provider, *date) && !available_slots(provider, *date).is_empty())
        .collect()
}
