//! Domain types for the trip planner.
//!
//! This module contains the core domain model types: validated city codes,
//! reference data records, the search request and the costed itineraries
//! produced for it. Types enforce their invariants at construction time, so
//! code that receives them can trust their validity.

mod city;
mod error;
mod iata;
mod itinerary;
mod price;
mod request;

pub use city::{CityNode, Country};
pub use error::{RequestError, VariantError};
pub use iata::{IataCode, InvalidIataCode};
pub use itinerary::{DataSource, HotelStay, HubInfo, ItinerarySegment, LegRole, RouteKind, RouteVariant};
pub use price::{EdgeSource, FlightOffer, HotelOffer, PriceEdge};
pub use request::{OptimizationMode, SearchRequest};
