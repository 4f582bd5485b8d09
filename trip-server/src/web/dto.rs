//! Data transfer objects for web requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{CityNode, OptimizationMode, RouteVariant, SearchRequest};

/// Request to plan a round trip.
///
/// Optional fields take the same defaults as [`SearchRequest::new`].
#[derive(Debug, Deserialize)]
pub struct PlanTripRequest {
    /// Origin IATA code
    pub origin: String,

    /// Destination IATA code
    pub destination: String,

    pub departure_date: NaiveDate,

    pub return_date: NaiveDate,

    pub travelers: Option<u8>,

    /// Minimum hotel star level
    pub hotel_stars: Option<u8>,

    /// Maximum total cost in USD for the whole party
    pub budget_max: Option<f64>,

    /// Whether multi-city itineraries may be proposed
    pub include_transit: Option<bool>,

    pub mode: Option<OptimizationMode>,
}

/// The search as it was run.
#[derive(Debug, Serialize)]
pub struct SearchSummary {
    #[serde(flatten)]
    pub request: SearchRequest,

    pub nights: u32,
}

impl From<&SearchRequest> for SearchSummary {
    fn from(request: &SearchRequest) -> Self {
        Self {
            request: request.clone(),
            nights: request.nights(),
        }
    }
}

/// Response for trip planning.
#[derive(Debug, Serialize)]
pub struct PlanTripResponse {
    pub search: SearchSummary,

    /// Itineraries, best score first
    pub variants: Vec<RouteVariant>,

    /// Copy of the recommended itinerary, if any
    pub recommended: Option<RouteVariant>,

    /// Candidates built before budget filtering and deduplication
    pub candidates_generated: usize,
}

/// Query parameters for city search.
#[derive(Debug, Deserialize)]
pub struct CitySearchQuery {
    /// Code prefix or part of the city name
    pub q: String,

    /// Maximum results (default 10, capped at 50)
    pub limit: Option<usize>,
}

/// A city in search results.
#[derive(Debug, Serialize)]
pub struct CityResult {
    pub code: String,
    pub name: String,
    pub country: Option<String>,
    pub flag: Option<String>,
    pub is_hub: bool,
}

impl CityResult {
    pub fn from_city(city: &CityNode) -> Self {
        Self {
            code: city.code.to_string(),
            name: city.name.clone(),
            country: city.country.as_ref().map(|c| c.name.clone()),
            flag: city
                .country
                .as_ref()
                .map(|c| c.flag.clone())
                .filter(|f| !f.is_empty()),
            is_hub: city.is_hub,
        }
    }
}

/// Response for city search.
#[derive(Debug, Serialize)]
pub struct CitySearchResponse {
    pub cities: Vec<CityResult>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
