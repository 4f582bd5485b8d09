//! Round-trip itinerary planner server.
//!
//! Given an origin, destination and travel dates, proposes direct, transit
//! and multi-city itineraries with flights and hotels priced, and recommends
//! one of them.

pub mod domain;
pub mod live;
pub mod planner;
pub mod reference;
pub mod web;
