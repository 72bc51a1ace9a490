//! Per-provider availability classification and slot enumeration.
//!
//! Everything here is a pure function of a borrowed [`Provider`] and a date
//! (plus an optional time). Nothing is cached between calls.
//!
//! Two boundary rules coexist and are relied on by callers:
//!
//! - [`is_available`] treats working hours as the inclusive range
//!   `[start, end]`, so a query exactly at closing time is available.
//! - [`available_slots`] only generates starts strictly before `end`.

use chrono::NaiveDate;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::model::Provider;
use crate::time::{ClockTime, SLOT_MINUTES};

/// Bookability of a provider for a date, or for a single slot on that date.
///
/// Variants are declared in ranking order: `Available < Full < Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Full,
    Closed,
}

/// True when the provider has no working hours on `date`.
pub fn is_closed(provider: &Provider, date: NaiveDate) -> bool {
    provider.hours_on(date).is_none()
}

/// True when `time` is already booked on `date`.
pub fn is_full(provider: &Provider, date: NaiveDate, time: ClockTime) -> bool {
    provider
        .bookings_on(date)
        .is_some_and(|booked| booked.contains(&time))
}

/// True when the provider is open on `date`, `time` is not booked, and `time`
/// falls within working hours (closing time included).
pub fn is_available(provider: &Provider, date: NaiveDate, time: ClockTime) -> bool {
    let Some(hours) = provider.hours_on(date) else {
        return false;
    };
    if is_full(provider, date, time) {
        return false;
    }
    hours.start <= time && time <= hours.end
}

/// Unbooked slot starts on `date`, in ascending order.
///
/// Candidates start at opening time and step by [`SLOT_MINUTES`] while the
/// candidate is strictly before closing time. The last slot may run past
/// closing; only its start has to precede it.
pub fn available_slots(provider: &Provider, date: NaiveDate) -> Vec<ClockTime> {
    let Some(hours) = provider.hours_on(date) else {
        return Vec::new();
    };
    let booked = provider.bookings_on(date);

    let mut slots = Vec::new();
    let mut minutes = hours.start.minutes();
    while minutes < hours.end.minutes() {
        let slot = ClockTime::from_minutes(minutes);
        if !booked.is_some_and(|b| b.contains(&slot)) {
            slots.push(slot);
        }
        minutes += SLOT_MINUTES;
    }

    slots
}

/// Classify a provider for `date`, optionally narrowed to one slot `time`.
///
/// Without a time, the provider is `Available` if any slot is free that day
/// and `Full` otherwise. With a time, a booked slot or one outside working
/// hours is `Full`; a time query never yields `Closed` on an open day.
pub fn provider_status(
    provider: &Provider,
    date: NaiveDate,
    time: Option<ClockTime>,
) -> SlotStatus {
    let status = if is_closed(provider, date) {
        SlotStatus::Closed
    } else {
        match time {
            Some(t) if is_available(provider, date, t) => SlotStatus::Available,
            Some(_) => SlotStatus::Full,
            None if available_slots(provider, date).is_empty() => SlotStatus::Full,
            None => SlotStatus::Available,
        }
    };

    trace!(
        "provider {} on {} at {:?}: {:?}",
        provider.id,
        date,
        time.map(|t| t.to_string()),
        status
    );
    status
}
