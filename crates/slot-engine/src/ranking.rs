//! Order providers for the search result list.
//!
//! Keys, in priority order:
//!
//! 1. [`SlotStatus`] ascending (available, then full, then closed)
//! 2. popular providers first
//! 3. rating descending
//!
//! Providers that tie on all three keep their input order.

use std::cmp::Ordering;

use chrono::NaiveDate;
use log::debug;

use crate::availability::{provider_status, SlotStatus};
use crate::model::Provider;
use crate::time::ClockTime;

/// A provider paired with the status it was ranked by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedProvider<'a> {
    pub provider: &'a Provider,
    pub status: SlotStatus,
}

/// Rank borrowed providers, classifying each exactly once.
pub fn rank_providers<'a>(
    providers: &'a [Provider],
    date: NaiveDate,
    time: Option<ClockTime>,
) -> Vec<RankedProvider<'a>> {
    rank_refs(providers.iter(), date, time)
}

/// Rank any iterator of provider references. Used by catalog searches that
/// have already narrowed the list.
pub(crate) fn rank_refs<'a>(
    providers: impl IntoIterator<Item = &'a Provider>,
    date: NaiveDate,
    time: Option<ClockTime>,
) -> Vec<RankedProvider<'a>> {
    let mut ranked: Vec<RankedProvider<'a>> = providers
        .into_iter()
        .map(|provider| RankedProvider {
            provider,
            status: provider_status(provider, date, time),
        })
        .collect();

    // `sort_by` is stable, which preserves input order on full ties.
    ranked.sort_by(compare);

    debug!(
        "ranked {} providers for {} (time {:?})",
        ranked.len(),
        date,
        time.map(|t| t.to_string())
    );
    ranked
}

/// Return a newly ordered copy of `providers`; the input is left untouched.
pub fn sort_by_availability(
    providers: &[Provider],
    date: NaiveDate,
    time: Option<ClockTime>,
) -> Vec<Provider> {
    rank_providers(providers, date, time)
        .into_iter()
        .map(|ranked| ranked.provider.clone())
        .collect()
}

fn compare(a: &RankedProvider<'_>, b: &RankedProvider<'_>) -> Ordering {
    a.status
        .cmp(&b.status)
        .then_with(|| b.provider.is_popular.cmp(&a.provider.is_popular))
        .then_with(|| rating_key(b.provider.rating).total_cmp(&rating_key(a.provider.rating)))
}

/// Fold `-0.0` into `0.0` so equal ratings compare equal under `total_cmp`.
fn rating_key(rating: f64) -> f64 {
    rating + 0.0
}
