//! Price observations and offers read from the repositories.

use serde::{Deserialize, Serialize};

use super::IataCode;

/// Where a graph edge's price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeSource {
    /// A stored flight price observation
    Observed,
    /// A curated estimate for a major city pair
    Estimated,
}

/// A priced, timed connection between two cities.
///
/// Many edges may exist per pair; the price graph keeps the cheapest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEdge {
    pub origin: IataCode,
    pub destination: IataCode,
    /// Price in USD for one traveler
    pub price: f64,
    pub duration_mins: u32,
    pub source: EdgeSource,
}

impl PriceEdge {
    /// An edge backed by a stored observation.
    pub fn observed(origin: IataCode, destination: IataCode, price: f64, duration_mins: u32) -> Self {
        Self {
            origin,
            destination,
            price,
            duration_mins,
            source: EdgeSource::Observed,
        }
    }

    /// An edge from the curated estimate table.
    pub fn estimated(
        origin: IataCode,
        destination: IataCode,
        price: f64,
        duration_mins: u32,
    ) -> Self {
        Self {
            origin,
            destination,
            price,
            duration_mins,
            source: EdgeSource::Estimated,
        }
    }
}

/// The cheapest stored flight for a pair on a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOffer {
    pub price: f64,
    pub airline: String,
    pub duration_mins: u32,
}

/// The cheapest stored hotel meeting a star minimum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelOffer {
    pub name: String,
    pub stars: u8,
    pub price_per_night: f64,
}
