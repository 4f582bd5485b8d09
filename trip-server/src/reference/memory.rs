//! In-memory reference data loaded from a JSON snapshot.
//!
//! The snapshot has three arrays:
//!
//! ```json
//! {
//!   "cities":  [{"code": "IST", "name": "Istanbul", "is_hub": true, ...}],
//!   "flights": [{"origin": "TAS", "destination": "IST", "date": "2025-06-01",
//!                "price": 240.0, "airline": "Turkish Airlines", "duration_mins": 300}],
//!   "hotels":  [{"city": "IST", "name": "Pera Inn", "stars": 3, "price_per_night": 52.0}]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{CityNode, FlightOffer, HotelOffer, IataCode, PriceEdge};

use super::error::ReferenceError;
use super::{CityDirectory, HotelRepository, PriceRepository};

/// One stored flight price observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub origin: IataCode,
    pub destination: IataCode,
    pub date: NaiveDate,
    pub price: f64,
    pub airline: String,
    pub duration_mins: u32,
}

impl FlightRecord {
    pub fn new(
        origin: IataCode,
        destination: IataCode,
        date: NaiveDate,
        price: f64,
        airline: impl Into<String>,
        duration_mins: u32,
    ) -> Self {
        Self {
            origin,
            destination,
            date,
            price,
            airline: airline.into(),
            duration_mins,
        }
    }
}

/// One stored hotel offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelRecord {
    pub city: IataCode,
    pub name: String,
    pub stars: u8,
    pub price_per_night: f64,
}

impl HotelRecord {
    pub fn new(city: IataCode, name: impl Into<String>, stars: u8, price_per_night: f64) -> Self {
        Self {
            city,
            name: name.into(),
            stars,
            price_per_night,
        }
    }
}

/// On-disk shape of the reference data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceSnapshot {
    pub cities: Vec<CityNode>,
    #[serde(default)]
    pub flights: Vec<FlightRecord>,
    #[serde(default)]
    pub hotels: Vec<HotelRecord>,
}

/// Reference data held in memory.
///
/// Cities are kept in a `BTreeMap` so every listing is in code order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReference {
    cities: BTreeMap<IataCode, CityNode>,
    flights: Vec<FlightRecord>,
    hotels: Vec<HotelRecord>,
}

impl InMemoryReference {
    /// Create an empty reference set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a parsed snapshot.
    pub fn from_snapshot(snapshot: ReferenceSnapshot) -> Result<Self, ReferenceError> {
        let mut cities = BTreeMap::new();
        for city in snapshot.cities {
            let code = city.code;
            if cities.insert(code, city).is_some() {
                return Err(ReferenceError::DuplicateCity(code));
            }
        }

        Ok(Self {
            cities,
            flights: snapshot.flights,
            hotels: snapshot.hotels,
        })
    }

    /// Parse a snapshot from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ReferenceError> {
        let snapshot: ReferenceSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    /// Load a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReferenceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ReferenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let reference = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            cities = reference.cities.len(),
            flights = reference.flights.len(),
            hotels = reference.hotels.len(),
            "loaded reference snapshot"
        );
        Ok(reference)
    }

    /// Add or replace a city.
    pub fn with_city(mut self, city: CityNode) -> Self {
        self.cities.insert(city.code, city);
        self
    }

    pub fn with_flight(mut self, flight: FlightRecord) -> Self {
        self.flights.push(flight);
        self
    }

    pub fn with_hotel(mut self, hotel: HotelRecord) -> Self {
        self.hotels.push(hotel);
        self
    }

    /// Number of known cities.
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Find cities by code prefix or name substring.
    ///
    /// Matching is case-insensitive. An exact code match comes first, the rest
    /// follow in code order. A blank query matches nothing.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&CityNode> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let upper = query.to_uppercase();
        let lower = query.to_lowercase();

        let mut matches: Vec<&CityNode> = self
            .cities
            .values()
            .filter(|c| c.code.as_str().starts_with(&upper) || c.name.to_lowercase().contains(&lower))
            .collect();

        // Stable sort keeps code order within each group
        matches.sort_by_key(|c| c.code.as_str() != upper);
        matches.truncate(limit);
        matches
    }
}

impl CityDirectory for InMemoryReference {
    fn lookup(&self, code: IataCode) -> Option<&CityNode> {
        self.cities.get(&code)
    }

    fn list_hubs(&self) -> Vec<IataCode> {
        self.cities.values().filter(|c| c.is_hub).map(|c| c.code).collect()
    }

    fn codes(&self) -> Vec<IataCode> {
        self.cities.keys().copied().collect()
    }
}

impl PriceRepository for InMemoryReference {
    fn cheapest_price(
        &self,
        origin: IataCode,
        destination: IataCode,
        date: NaiveDate,
    ) -> Option<FlightOffer> {
        self.flights
            .iter()
            .filter(|f| f.origin == origin && f.destination == destination && f.date == date)
            .min_by(|a, b| a.price.total_cmp(&b.price))
            .map(|f| FlightOffer {
                price: f.price,
                airline: f.airline.clone(),
                duration_mins: f.duration_mins,
            })
    }

    fn average_price(&self, origin: IataCode, destination: IataCode) -> Option<f64> {
        let (sum, count) = self
            .flights
            .iter()
            .filter(|f| f.origin == origin && f.destination == destination)
            .fold((0.0, 0u32), |(sum, count), f| (sum + f.price, count + 1));

        (count > 0).then(|| sum / f64::from(count))
    }

    fn observations(&self) -> Vec<PriceEdge> {
        self.flights
            .iter()
            .map(|f| PriceEdge::observed(f.origin, f.destination, f.price, f.duration_mins))
            .collect()
    }
}

impl HotelRepository for InMemoryReference {
    fn cheapest_hotel(&self, city: IataCode, min_stars: u8) -> Option<HotelOffer> {
        self.hotels
            .iter()
            .filter(|h| h.city == city && h.stars >= min_stars)
            .min_by(|a, b| a.price_per_night.total_cmp(&b.price_per_night))
            .map(|h| HotelOffer {
                name: h.name.clone(),
                stars: h.stars,
                price_per_night: h.price_per_night,
            })
    }
}
