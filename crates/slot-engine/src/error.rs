//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    /// A time string was not a zero-padded 24-hour `HH:mm` value.
    #[error("Malformed time: {0:?} (expected HH:mm)")]
    MalformedTime(String),

    /// A date string was not a valid `YYYY-MM-DD` calendar date.
    #[error("Unknown date format: {0:?} (expected YYYY-MM-DD)")]
    UnknownDateFormat(String),

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// A booking named a service the provider does not offer.
    #[error("Service {service_id} is not offered by provider {provider_id}")]
    UnknownService {
        provider_id: String,
        service_id: String,
    },

    #[error("At least one service must be selected")]
    NoServicesSelected,

    /// The provider catalog could not be parsed.
    #[error("Catalog parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
