//! Read-only provider catalog: lookup, location search, list filters,
//! booking quotes and waitlist requests.
//!
//! The catalog holds a snapshot handed over by the data layer. It never
//! changes a record; searches return borrowed views in a new order.

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::availability::{provider_status, SlotStatus};
use crate::error::{Result, SlotError};
use crate::model::{Provider, Service};
use crate::ranking::rank_refs;
use crate::time::ClockTime;

/// Search criteria from the home screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Case-insensitive substring of the provider address. Empty matches all.
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<ClockTime>,
}

/// Quick filters offered above the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFilter {
    #[default]
    All,
    /// Only providers classified `Available` for the searched date/time.
    Available,
    /// Only providers flagged popular.
    Popular,
    /// Everyone, nearest first.
    Nearby,
}

/// Ask to be notified when a slot frees up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistRequest {
    pub provider_id: String,
    pub date: NaiveDate,
    pub time: ClockTime,
}

/// Acknowledgement of a waitlist request. Nothing is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistConfirmation {
    pub provider_id: String,
    pub provider_name: String,
    pub date: NaiveDate,
    pub time: ClockTime,
    /// Status of the requested slot at the time of the request.
    pub status: SlotStatus,
    pub message: String,
}

/// Services chosen for one slot on the booking screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub provider_id: String,
    pub date: NaiveDate,
    pub time: ClockTime,
    pub service_ids: Vec<String>,
}

/// Price and duration of a booking request. Nothing is reserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuote {
    pub provider_id: String,
    pub provider_name: String,
    pub date: NaiveDate,
    pub time: ClockTime,
    /// Selected services in request order, each listed once.
    pub services: Vec<Service>,
    pub total_price: f64,
    /// Sum of service durations in minutes.
    pub total_duration: u32,
    /// Status of the requested slot; only `Available` can be booked.
    pub status: SlotStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    providers: Vec<Provider>,
}

impl Catalog {
    pub fn new(providers: Vec<Provider>) -> Self {
        Catalog { providers }
    }

    /// Load a catalog from a JSON array of provider records.
    ///
    /// # Errors
    /// Returns `SlotError::Json` if the document is not an array of valid
    /// records, including records with malformed date keys or times.
    pub fn from_json(json: &str) -> Result<Self> {
        let providers: Vec<Provider> = serde_json::from_str(json)?;
        debug!("loaded catalog with {} providers", providers.len());
        Ok(Catalog { providers })
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    /// Providers whose address contains `filters.location`.
    ///
    /// When both a date and a time are given the matches are ranked by
    /// availability; otherwise catalog order is kept.
    pub fn search(&self, filters: &SearchFilters) -> Vec<&Provider> {
        let needle = filters.location.to_lowercase();
        let matches = self
            .providers
            .iter()
            .filter(|p| needle.is_empty() || p.address.to_lowercase().contains(&needle));

        match (filters.date, filters.time) {
            (Some(date), Some(time)) => rank_refs(matches, date, Some(time))
                .into_iter()
                .map(|ranked| ranked.provider)
                .collect(),
            _ => matches.collect(),
        }
    }

    /// Price a booking request.
    ///
    /// Repeated service ids are counted once.
    ///
    /// # Errors
    /// Returns `SlotError::ProviderNotFound` for an unknown provider,
    /// `SlotError::NoServicesSelected` for an empty selection, and
    /// `SlotError::UnknownService` for a service the provider does not offer.
    pub fn quote_booking(&self, request: &BookingRequest) -> Result<BookingQuote> {
        let provider = self
            .find_by_id(&request.provider_id)
            .ok_or_else(|| SlotError::ProviderNotFound(request.provider_id.clone()))?;
        if request.service_ids.is_empty() {
            return Err(SlotError::NoServicesSelected);
        }

        let mut services: Vec<Service> = Vec::with_capacity(request.service_ids.len());
        for id in &request.service_ids {
            if services.iter().any(|s| &s.id == id) {
                continue;
            }
            let service = provider
                .services
                .iter()
                .find(|s| &s.id == id)
                .ok_or_else(|| SlotError::UnknownService {
                    provider_id: provider.id.clone(),
                    service_id: id.clone(),
                })?;
            services.push(service.clone());
        }

        let total_price = services.iter().map(|s| s.price).sum();
        let total_duration = services.iter().map(|s| s.duration).sum();
        let status = provider_status(provider, request.date, Some(request.time));
        debug!(
            "quoted {} services for provider {} on {} at {}: {:?}",
            services.len(),
            provider.id,
            request.date,
            request.time,
            status
        );

        Ok(BookingQuote {
            provider_id: provider.id.clone(),
            provider_name: provider.name.clone(),
            date: request.date,
            time: request.time,
            services,
            total_price,
            total_duration,
            status,
        })
    }

    /// Validate a waitlist request against the catalog.
    ///
    /// # Errors
    /// Returns `SlotError::ProviderNotFound` if no provider has the id.
    pub fn request_waitlist(&self, request: &WaitlistRequest) -> Result<WaitlistConfirmation> {
        let provider = self
            .find_by_id(&request.provider_id)
            .ok_or_else(|| SlotError::ProviderNotFound(request.provider_id.clone()))?;

        let status = provider_status(provider, request.date, Some(request.time));
        Ok(WaitlistConfirmation {
            provider_id: provider.id.clone(),
            provider_name: provider.name.clone(),
            date: request.date,
            time: request.time,
            status,
            message: format!(
                "Waitlist request received for {} on {} at {}.",
                provider.name, request.date, request.time
            ),
        })
    }
}

/// Apply a quick filter to an already-searched list.
///
/// `Available` needs a date to classify against; without one every provider
/// is kept.
pub fn apply_filter<'a>(
    providers: Vec<&'a Provider>,
    filter: ListFilter,
    date: Option<NaiveDate>,
    time: Option<ClockTime>,
) -> Vec<&'a Provider> {
    match filter {
        ListFilter::All => providers,
        ListFilter::Available => match date {
            Some(date) => providers
                .into_iter()
                .filter(|p| provider_status(p, date, time) == SlotStatus::Available)
                .collect(),
            None => providers,
        },
        ListFilter::Popular => providers.into_iter().filter(|p| p.is_popular).collect(),
        ListFilter::Nearby => {
            let mut sorted = providers;
            sorted.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
            sorted
        }
    }
}

/// Keep providers whose name contains `query`, ignoring case.
pub fn filter_by_name<'a>(providers: Vec<&'a Provider>, query: &str) -> Vec<&'a Provider> {
    if query.is_empty() {
        return providers;
    }
    let needle = query.to_lowercase();
    providers
        .into_iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}
