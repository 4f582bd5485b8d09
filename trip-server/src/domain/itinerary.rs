//! Itinerary types.
//!
//! A `RouteVariant` is one fully-costed round trip: the outbound chain of
//! flights through zero or more stop cities, the inbound flight home, and the
//! hotel stays in between.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{IataCode, VariantError};

/// How a candidate itinerary was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    /// Origin straight to destination
    Direct,
    /// One hub stop on the way
    Transit,
    /// Two hub stops on the way
    Multi,
    /// Path found by cheapest-price search
    OptimalCheapest,
    /// Path found by fastest-time search
    OptimalFastest,
}

impl RouteKind {
    /// Comfort component of the score for this kind.
    pub fn comfort_score(&self) -> f64 {
        match self {
            RouteKind::Direct => 15.0,
            RouteKind::Transit => 10.0,
            RouteKind::Multi | RouteKind::OptimalCheapest | RouteKind::OptimalFastest => 5.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::Direct => "direct",
            RouteKind::Transit => "transit",
            RouteKind::Multi => "multi",
            RouteKind::OptimalCheapest => "optimal_cheapest",
            RouteKind::OptimalFastest => "optimal_fastest",
        }
    }
}

/// Position of a flight within the round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegRole {
    /// First flight out of the origin
    Outbound,
    /// Flight between stop cities or into the destination
    Transit,
    /// Flight home
    Inbound,
}

/// Which price tier produced a flight quote.
///
/// Ordered from most to least trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    LiveApi,
    GraphCache,
    Database,
    #[serde(rename = "database_avg")]
    DatabaseAverage,
    Estimated,
    Fallback,
}

/// One priced flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItinerarySegment {
    pub from: IataCode,
    pub to: IataCode,
    pub date: NaiveDate,
    /// Price in USD for one traveler
    pub price: f64,
    pub airline: String,
    pub duration_mins: u32,
    pub role: LegRole,
    pub source: DataSource,
    /// Booking link from a live quote
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Nights spent in one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelStay {
    pub city: IataCode,
    pub nights: u32,
    pub price_per_night: f64,
    pub total_price: f64,
    /// Star level the price was resolved for
    pub stars: u8,
}

impl HotelStay {
    pub fn new(city: IataCode, nights: u32, price_per_night: f64, stars: u8) -> Self {
        Self {
            city,
            nights,
            price_per_night,
            total_price: price_per_night * f64::from(nights),
            stars,
        }
    }
}

/// Display metadata for the stop city of a single-stop itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubInfo {
    pub code: IataCode,
    pub name: String,
    pub country: Option<String>,
    pub flag: Option<String>,
}

/// A candidate round trip.
///
/// # Invariants
///
/// - At least two cities (origin and destination)
/// - `total_flight_cost` is the sum of segment prices times travelers
/// - `total_cost` is flights plus hotels
/// - `stops` is the number of cities between origin and destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteVariant {
    pub kind: RouteKind,
    pub cities: Vec<IataCode>,
    pub segments: Vec<ItinerarySegment>,
    pub hotels: Vec<HotelStay>,
    pub total_flight_cost: f64,
    pub total_hotel_cost: f64,
    pub total_cost: f64,
    pub total_duration_mins: u32,
    pub stops: usize,
    pub savings_amount: f64,
    pub savings_percent: f64,
    pub score: f64,
    pub recommended: bool,
    pub bonus: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hub: Option<HubInfo>,
}

impl RouteVariant {
    /// Assemble a variant, deriving all totals from its segments and stays.
    ///
    /// Savings, score and the recommendation flag start at zero; they are
    /// filled in once every candidate for the search is known.
    ///
    /// # Errors
    ///
    /// Returns `Err` if fewer than two cities are given.
    pub fn assemble(
        kind: RouteKind,
        cities: Vec<IataCode>,
        segments: Vec<ItinerarySegment>,
        hotels: Vec<HotelStay>,
        travelers: u8,
    ) -> Result<Self, VariantError> {
        if cities.len() < 2 {
            return Err(VariantError::TooFewCities(cities.len()));
        }

        let flight_sum: f64 = segments.iter().map(|s| s.price).sum();
        let total_flight_cost = flight_sum * f64::from(travelers);
        let total_hotel_cost: f64 = hotels.iter().map(|h| h.total_price).sum();
        let total_duration_mins = segments
            .iter()
            .fold(0u32, |total, s| total.saturating_add(s.duration_mins));
        let stops = cities.len() - 2;

        Ok(Self {
            kind,
            cities,
            segments,
            hotels,
            total_flight_cost,
            total_hotel_cost,
            total_cost: total_flight_cost + total_hotel_cost,
            total_duration_mins,
            stops,
            savings_amount: 0.0,
            savings_percent: 0.0,
            score: 0.0,
            recommended: false,
            bonus: String::new(),
            hub: None,
        })
    }

    pub fn with_bonus(mut self, bonus: impl Into<String>) -> Self {
        self.bonus = bonus.into();
        self
    }

    pub fn with_hub(mut self, hub: HubInfo) -> Self {
        self.hub = Some(hub);
        self
    }

    pub fn origin(&self) -> IataCode {
        self.cities[0]
    }

    pub fn destination(&self) -> IataCode {
        self.cities[self.cities.len() - 1]
    }

    pub fn is_direct(&self) -> bool {
        self.kind == RouteKind::Direct
    }

    /// Total nights across all hotel stays.
    pub fn hotel_nights(&self) -> u32 {
        self.hotels.iter().map(|h| h.nights).sum()
    }
}
