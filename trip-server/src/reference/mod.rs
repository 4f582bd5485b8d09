//! Read-only reference data: cities, stored flight prices and hotels.
//!
//! The optimizer only ever reads through these traits, so any backing store
//! can be plugged in. [`InMemoryReference`] serves a JSON snapshot.

mod error;
mod memory;

pub use error::ReferenceError;
pub use memory::{FlightRecord, HotelRecord, InMemoryReference, ReferenceSnapshot};

use chrono::NaiveDate;

use crate::domain::{CityNode, FlightOffer, HotelOffer, IataCode, PriceEdge};

/// Lookup of known cities.
pub trait CityDirectory {
    /// Find a city by code.
    fn lookup(&self, code: IataCode) -> Option<&CityNode>;

    /// Codes of every city flagged as a hub, in code order.
    fn list_hubs(&self) -> Vec<IataCode>;

    /// Codes of every known city, in code order.
    fn codes(&self) -> Vec<IataCode>;
}

/// Stored flight price observations.
pub trait PriceRepository {
    /// Cheapest stored flight for the pair on the given date.
    fn cheapest_price(
        &self,
        origin: IataCode,
        destination: IataCode,
        date: NaiveDate,
    ) -> Option<FlightOffer>;

    /// Mean stored price for the pair across all dates.
    fn average_price(&self, origin: IataCode, destination: IataCode) -> Option<f64>;

    /// Every stored observation as a graph edge.
    fn observations(&self) -> Vec<PriceEdge>;
}

/// Stored hotel offers.
pub trait HotelRepository {
    /// Cheapest hotel in the city with at least `min_stars` stars.
    fn cheapest_hotel(&self, city: IataCode, min_stars: u8) -> Option<HotelOffer>;
}
