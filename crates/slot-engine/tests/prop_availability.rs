//! Property-based tests for the availability engine using proptest.
//!
//! These verify invariants that hold for *any* schedule, not just the fixed
//! fixtures in `availability_tests.rs` and `ranking_tests.rs`.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use slot_engine::{
    available_dates, available_slots, is_available, is_closed, is_full, minutes_to_time,
    provider_status, sort_by_availability, time_to_minutes, ClockTime, OpenHours, Provider,
    SlotStatus,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

/// Working hours on the hour or half hour, `start < end`.
fn arb_hours() -> impl Strategy<Value = (u32, u32)> {
    (0u32..46, 1u32..=20).prop_map(|(start_half, len_half)| {
        let start = start_half * 30;
        let end = (start + len_half * 30).min(23 * 60 + 59);
        (start, end)
    })
}

/// Booked slot starts on the hour.
fn arb_booked() -> impl Strategy<Value = BTreeSet<u32>> {
    prop::collection::btree_set(0u32..24, 0..10)
        .prop_map(|hours| hours.into_iter().map(|h| h * 60).collect())
}

/// A provider with hours on a random subset of a one-week window.
fn arb_provider() -> impl Strategy<Value = Provider> {
    (
        prop::collection::vec((any::<bool>(), arb_hours(), arb_booked()), 7),
        any::<bool>(),
        0u32..=50,
        "[a-z]{1,6}",
    )
        .prop_map(|(days, popular, rating_tenths, id)| {
            let mut p = Provider::new(id, "Generated");
            p.is_popular = popular;
            p.rating = f64::from(rating_tenths) / 10.0;
            for (offset, (open, (start, end), booked)) in days.into_iter().enumerate() {
                let date = base_date() + Duration::days(offset as i64);
                if open {
                    p.open_hours.insert(
                        date,
                        OpenHours {
                            start: ClockTime::from_minutes(start),
                            end: ClockTime::from_minutes(end),
                        },
                    );
                }
                if !booked.is_empty() {
                    p.booked_slots
                        .insert(date, booked.into_iter().map(ClockTime::from_minutes).collect());
                }
            }
            p
        })
}

fn arb_offset() -> impl Strategy<Value = i64> {
    0i64..7
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: minute/clock roundtrip
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn minutes_roundtrip(m in 0u32..1440) {
        prop_assert_eq!(time_to_minutes(&minutes_to_time(m)).unwrap(), m);
    }
}

// ---------------------------------------------------------------------------
// Property 2: closed days have no slots and classify as Closed
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn closed_days_are_closed(p in arb_provider(), offset in arb_offset()) {
        let date = base_date() + Duration::days(offset);
        if p.open_hours.contains_key(&date) {
            return Ok(());
        }
        prop_assert!(is_closed(&p, date));
        prop_assert!(available_slots(&p, date).is_empty());
        prop_assert_eq!(provider_status(&p, date, None), SlotStatus::Closed);
    }
}

// ---------------------------------------------------------------------------
// Property 3: booked times are full and never available
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn booked_times_are_never_available(p in arb_provider(), offset in arb_offset()) {
        let date = base_date() + Duration::days(offset);
        if let Some(booked) = p.booked_slots.get(&date) {
            for time in booked {
                prop_assert!(is_full(&p, date, *time));
                prop_assert!(!is_available(&p, date, *time));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: slots are strictly ascending, unbooked, and start within hours
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_are_ascending_and_free(p in arb_provider(), offset in arb_offset()) {
        let date = base_date() + Duration::days(offset);
        let slots = available_slots(&p, date);

        for pair in slots.windows(2) {
            prop_assert!(pair[0] < pair[1], "not ascending: {} then {}", pair[0], pair[1]);
        }
        let booked = p.booked_slots.get(&date);
        for slot in &slots {
            prop_assert!(!booked.is_some_and(|b| b.contains(slot)));
            prop_assert!(is_available(&p, date, *slot));
        }
        if let Some(hours) = p.open_hours.get(&date) {
            for slot in &slots {
                prop_assert!(hours.start <= *slot && *slot < hours.end);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: ranking is status-monotone and a permutation of the input
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn ranking_is_status_monotone(
        providers in prop::collection::vec(arb_provider(), 0..8),
        offset in arb_offset(),
        hour in prop::option::of(0u32..24),
    ) {
        let date = base_date() + Duration::days(offset);
        let time = hour.map(|h| ClockTime::from_minutes(h * 60));
        let sorted = sort_by_availability(&providers, date, time);

        prop_assert_eq!(sorted.len(), providers.len());
        let statuses: Vec<SlotStatus> =
            sorted.iter().map(|p| provider_status(p, date, time)).collect();
        for pair in statuses.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: ranking is stable on full ties
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn ranking_is_stable(template in arb_provider(), copies in 2usize..6, offset in arb_offset()) {
        let date = base_date() + Duration::days(offset);
        let providers: Vec<Provider> = (0..copies)
            .map(|i| {
                let mut p = template.clone();
                p.id = format!("copy-{}", i);
                p
            })
            .collect();

        let sorted = sort_by_availability(&providers, date, None);
        let ids: Vec<&str> = sorted.iter().map(|p| p.id.as_str()).collect();
        let expected: Vec<String> = (0..copies).map(|i| format!("copy-{}", i)).collect();
        prop_assert_eq!(ids, expected.iter().map(|s| s.as_str()).collect::<Vec<_>>());
    }
}

// ---------------------------------------------------------------------------
// Property 7: date query agrees with per-day slot enumeration
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn available_dates_match_slots(p in arb_provider()) {
        let start = base_date();
        let end = base_date() + Duration::days(6);
        let dates = available_dates(&p, start, end);

        let expected: Vec<NaiveDate> = (0..7)
            .map(|i| start + Duration::days(i))
            .filter(|d| !available_slots(&p, *d).is_empty())
            .collect();
        prop_assert_eq!(dates, expected);
    }
}
