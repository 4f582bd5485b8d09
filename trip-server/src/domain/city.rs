//! City reference data.

use serde::{Deserialize, Serialize};

use super::IataCode;

/// A country a city belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// ISO country code
    pub code: String,
    /// Display name
    pub name: String,
    /// Flag emoji, shown next to hub cities
    #[serde(default)]
    pub flag: String,
}

/// A city node in the price graph.
///
/// Cities are immutable reference data owned by the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityNode {
    /// IATA code, the unique key
    pub code: IataCode,

    /// Display name
    pub name: String,

    /// Country, if known
    #[serde(default)]
    pub country: Option<Country>,

    /// Whether the city is a designated transit hub
    #[serde(default)]
    pub is_hub: bool,

    /// Average nightly hotel rate in USD, used when no hotel offer matches
    #[serde(default)]
    pub avg_hotel_rate: Option<f64>,
}

impl CityNode {
    /// Create a city with no country, hub flag or hotel rate.
    pub fn new(code: IataCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            country: None,
            is_hub: false,
            avg_hotel_rate: None,
        }
    }

    /// Mark the city as a transit hub.
    pub fn hub(mut self) -> Self {
        self.is_hub = true;
        self
    }

    /// Set the country.
    pub fn with_country(mut self, country: Country) -> Self {
        self.country = Some(country);
        self
    }

    /// Set the average nightly hotel rate.
    pub fn with_avg_hotel_rate(mut self, rate: f64) -> Self {
        self.avg_hotel_rate = Some(rate);
        self
    }
}
