//! Provider records as supplied by the data layer.
//!
//! JSON field names follow the mobile client (`isPopular`, `openHours`,
//! `bookedSlots`, ...). Date keys are parsed into [`NaiveDate`] when the
//! record is deserialized, so a malformed key fails the whole load instead of
//! silently never matching a lookup.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::time::{self, ClockTime};

/// Working hours for a single day. `start < end` is assumed, not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenHours {
    pub start: ClockTime,
    pub end: ClockTime,
}

/// A bookable service. Priced by booking quotes; not consulted by the availability engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    /// Duration in minutes.
    pub duration: u32,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A barber or salon and its schedule for the dates the data layer knows about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub distance_km: f64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub services: Vec<Service>,
    /// Days the provider is open. A date with no entry is a closed day.
    #[serde(default, deserialize_with = "date_keyed")]
    pub open_hours: BTreeMap<NaiveDate, OpenHours>,
    /// Slot start times already reserved, per date.
    #[serde(default, deserialize_with = "date_keyed")]
    pub booked_slots: BTreeMap<NaiveDate, BTreeSet<ClockTime>>,
}

impl Provider {
    /// A provider with no schedule, services or display details.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Provider {
            id: id.into(),
            name: name.into(),
            rating: 0.0,
            is_popular: false,
            distance_km: 0.0,
            address: String::new(),
            phone: String::new(),
            description: None,
            image_url: None,
            review_count: None,
            services: Vec::new(),
            open_hours: BTreeMap::new(),
            booked_slots: BTreeMap::new(),
        }
    }

    pub fn hours_on(&self, date: NaiveDate) -> Option<OpenHours> {
        self.open_hours.get(&date).copied()
    }

    /// Booked slot starts for `date`; `None` means nothing is booked.
    pub fn bookings_on(&self, date: NaiveDate) -> Option<&BTreeSet<ClockTime>> {
        self.booked_slots.get(&date)
    }
}

/// Deserialize a map keyed by strict `YYYY-MM-DD` strings.
fn date_keyed<'de, D, V>(deserializer: D) -> Result<BTreeMap<NaiveDate, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    let raw: BTreeMap<String, V> = BTreeMap::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| {
            time::parse_date(&key)
                .map(|date| (date, value))
                .map_err(de::Error::custom)
        })
        .collect()
}
