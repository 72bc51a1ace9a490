//! WASM bindings for slot-engine.
//!
//! Exposes status classification, free-slot listing, ranking and the
//! date-range query to the mobile client's JavaScript layer via
//! `wasm-bindgen`. Provider records cross the boundary as JSON strings in the
//! same shape the client already uses (`isPopular`, `openHours`,
//! `bookedSlots`, ...); dates are `YYYY-MM-DD` and times `HH:mm`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir mobile/src/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use slot_engine::{ClockTime, Provider, SlotStatus};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RankedProviderDto<'a> {
    #[serde(flatten)]
    provider: &'a Provider,
    status: SlotStatus,
}

// ---------------------------------------------------------------------------
// Helpers: parse boundary values, mapping errors to JS strings
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_provider(json: &str) -> Result<Provider, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid provider JSON: {}", e)))
}

fn parse_providers(json: &str) -> Result<Vec<Provider>, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid providers JSON: {}", e)))
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    slot_engine::parse_date(s).map_err(js_err)
}

fn parse_time(s: &str) -> Result<ClockTime, JsValue> {
    s.parse().map_err(js_err)
}

fn parse_optional_time(s: Option<String>) -> Result<Option<ClockTime>, JsValue> {
    s.filter(|s| !s.is_empty()).as_deref().map(parse_time).transpose()
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Classify a provider as `"available"`, `"full"` or `"closed"`.
///
/// `time` may be omitted (or empty) for a whole-day classification.
#[wasm_bindgen(js_name = "getBarberStatus")]
pub fn get_barber_status(
    provider_json: &str,
    date: &str,
    time: Option<String>,
) -> Result<String, JsValue> {
    let provider = parse_provider(provider_json)?;
    let date = parse_date(date)?;
    let time = parse_optional_time(time)?;

    to_json(&slot_engine::provider_status(&provider, date, time))
}

/// Whether one `HH:mm` slot is bookable (working hours are inclusive of
/// closing time).
#[wasm_bindgen(js_name = "isAvailable")]
pub fn is_available(provider_json: &str, date: &str, time: &str) -> Result<bool, JsValue> {
    let provider = parse_provider(provider_json)?;
    Ok(slot_engine::is_available(
        &provider,
        parse_date(date)?,
        parse_time(time)?,
    ))
}

/// Free slot starts for a day, as a JSON array of `HH:mm` strings.
#[wasm_bindgen(js_name = "getAvailableSlots")]
pub fn get_available_slots(provider_json: &str, date: &str) -> Result<String, JsValue> {
    let provider = parse_provider(provider_json)?;
    let date = parse_date(date)?;

    to_json(&slot_engine::available_slots(&provider, date))
}

/// Rank a JSON array of providers for the result list.
///
/// Returns the providers in ranked order, each with an added `status` field.
#[wasm_bindgen(js_name = "sortByAvailability")]
pub fn sort_by_availability(
    providers_json: &str,
    date: &str,
    time: Option<String>,
) -> Result<String, JsValue> {
    let providers = parse_providers(providers_json)?;
    let date = parse_date(date)?;
    let time = parse_optional_time(time)?;

    let dtos: Vec<RankedProviderDto<'_>> = slot_engine::rank_providers(&providers, date, time)
        .into_iter()
        .map(|ranked| RankedProviderDto {
            provider: ranked.provider,
            status: ranked.status,
        })
        .collect();

    to_json(&dtos)
}

/// Days in `[start, end]` with at least one free slot, as a JSON array of
/// `YYYY-MM-DD` strings.
#[wasm_bindgen(js_name = "getAvailableDates")]
pub fn get_available_dates(provider_json: &str, start: &str, end: &str) -> Result<String, JsValue> {
    let provider = parse_provider(provider_json)?;
    let dates = slot_engine::available_dates(&provider, parse_date(start)?, parse_date(end)?);

    let keys: Vec<String> = dates.into_iter().map(slot_engine::format_date).collect();
    to_json(&keys)
}
