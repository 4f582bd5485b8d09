//! Domain error types.
//!
//! These errors represent invalid trip search input and itineraries that cannot
//! be assembled. They are distinct from repository and live-pricing errors.

use super::IataCode;

/// Reasons a search request is rejected before optimization.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    /// Origin and destination are the same city
    #[error("origin and destination must differ (both {0})")]
    SameCity(IataCode),

    /// Return date is not after the departure date
    #[error("return date must be after departure date")]
    ReturnNotAfterDeparture,

    /// Traveler count outside 1-10
    #[error("travelers must be between 1 and 10, got {0}")]
    TravelersOutOfRange(u8),

    /// Hotel star minimum outside 1-5
    #[error("hotel stars must be between 1 and 5, got {0}")]
    HotelStarsOutOfRange(u8),

    /// Budget cap that is negative or not a number
    #[error("budget must be a non-negative amount")]
    InvalidBudget,
}

/// Reasons an itinerary cannot be assembled.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VariantError {
    #[error("itinerary needs at least 2 cities, got {0}")]
    TooFewCities(usize),
}
