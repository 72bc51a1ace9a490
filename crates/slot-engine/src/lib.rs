//! # slot-engine
//!
//! Deterministic availability computation for a barber booking marketplace.
//!
//! Given a provider's working hours and booked slots, the engine decides
//! whether the provider is closed, full or available on a date (or at a
//! specific time), lists the free 60-minute slots, ranks a list of providers
//! for the search results and finds the days in a range that still have room.
//! Every function is pure: inputs are borrowed and results are freshly built.
//!
//! ## Quick start
//!
//! ```rust
//! use slot_engine::{available_slots, parse_date, provider_status, Catalog, SlotStatus};
//!
//! let json = r#"[{
//!     "id": "1",
//!     "name": "Corner Cuts",
//!     "openHours": { "2024-06-10": { "start": "09:00", "end": "12:00" } },
//!     "bookedSlots": { "2024-06-10": ["10:00"] }
//! }]"#;
//! let catalog = Catalog::from_json(json).unwrap();
//! let barber = catalog.find_by_id("1").unwrap();
//! let date = parse_date("2024-06-10").unwrap();
//!
//! let slots: Vec<String> = available_slots(barber, date).iter().map(|t| t.to_string()).collect();
//! assert_eq!(slots, ["09:00", "11:00"]);
//! assert_eq!(provider_status(barber, date, None), SlotStatus::Available);
//! ```
//!
//! ## Modules
//!
//! - [`time`] — `HH:mm` / `YYYY-MM-DD` parsing and minute arithmetic
//! - [`model`] — Provider records as supplied by the data layer
//! - [`availability`] — Closed/full/available classification and free slots
//! - [`ranking`] — Stable multi-key ordering of providers
//! - [`dates`] — Days in a range with at least one free slot
//! - [`catalog`] — Lookup, search, list filters, booking quotes and waitlist requests
//! - [`error`] — Error types

pub mod availability;
pub mod catalog;
pub mod dates;
pub mod error;
pub mod model;
pub mod ranking;
pub mod time;

pub use availability::{
    available_slots, is_available, is_closed, is_full, provider_status, SlotStatus,
};
pub use catalog::{
    BookingQuote, BookingRequest, Catalog, ListFilter, SearchFilters, WaitlistConfirmation,
    WaitlistRequest,
};
pub use dates::available_dates;
pub use error::SlotError;
pub use model::{OpenHours, Provider, Service};
pub use ranking::{rank_providers, sort_by_availability, RankedProvider};
pub use time::{
    format_date, minutes_to_time, parse_date, time_to_minutes, ClockTime, SLOT_MINUTES,
};
