//! Layered flight and hotel price resolution.
//!
//! Flight tiers, most trusted first:
//!
//! 0. live quote (when enabled and before the search deadline)
//! 1. price graph edge
//! 2. stored price for the exact date
//! 3. stored average for the pair
//! 4. static per-pair table
//! 5. generic default quote
//!
//! Hotel tiers: cheapest stored hotel meeting the star minimum, the city's
//! average nightly rate, the static per-city table, then a generic rate.
//!
//! Resolution never fails. Lookups are memoized for the lifetime of the
//! resolver, which is one search.

use std::collections::HashMap;

use chrono::NaiveDate;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::domain::{DataSource, EdgeSource, IataCode, ItinerarySegment, LegRole};
use crate::live::{LivePriceProvider, LiveQuote, plausible_duration};
use crate::reference::{CityDirectory, HotelRepository, PriceRepository};

use super::config::OptimizerConfig;
use super::fallback;
use super::graph::PriceGraph;

/// Airline label for prices aggregated over several carriers.
const MULTIPLE_AIRLINES: &str = "Multiple";

/// Airline label for prices with no carrier information.
const UNKNOWN_AIRLINE: &str = "Unknown";

/// A resolved price for one flight.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightQuote {
    pub price: f64,
    pub airline: String,
    pub duration_mins: u32,
    pub source: DataSource,
    pub link: Option<String>,
}

impl FlightQuote {
    fn new(price: f64, airline: impl Into<String>, duration_mins: u32, source: DataSource) -> Self {
        Self {
            price,
            airline: airline.into(),
            duration_mins,
            source,
            link: None,
        }
    }

    /// Attach the quote to a concrete flight.
    pub fn into_segment(
        self,
        from: IataCode,
        to: IataCode,
        date: NaiveDate,
        role: LegRole,
    ) -> ItinerarySegment {
        ItinerarySegment {
            from,
            to,
            date,
            price: self.price,
            airline: self.airline,
            duration_mins: self.duration_mins,
            role,
            source: self.source,
            link: self.link,
        }
    }
}

type FlightKey = (IataCode, IataCode, NaiveDate);

/// Request-scoped price resolver.
pub struct PriceResolver<'a, R, L> {
    reference: &'a R,
    graph: &'a PriceGraph,
    live: &'a L,
    config: &'a OptimizerConfig,
    deadline: Instant,
    live_quotes: HashMap<FlightKey, Option<FlightQuote>>,
    averages: HashMap<(IataCode, IataCode), Option<f64>>,
    hotel_rates: HashMap<(IataCode, u8), f64>,
}

impl<'a, R, L> PriceResolver<'a, R, L>
where
    R: CityDirectory + PriceRepository + HotelRepository,
    L: LivePriceProvider,
{
    pub fn new(
        reference: &'a R,
        graph: &'a PriceGraph,
        live: &'a L,
        config: &'a OptimizerConfig,
        deadline: Instant,
    ) -> Self {
        Self {
            reference,
            graph,
            live,
            config,
            deadline,
            live_quotes: HashMap::new(),
            averages: HashMap::new(),
            hotel_rates: HashMap::new(),
        }
    }

    /// Resolve a quote for one flight.
    pub async fn flight_quote(
        &mut self,
        origin: IataCode,
        destination: IataCode,
        date: NaiveDate,
    ) -> FlightQuote {
        if self.config.use_live_prices {
            if let Some(quote) = self.live_quote(origin, destination, date).await {
                return quote;
            }
        }

        self.stored_quote(origin, destination, date)
    }

    async fn live_quote(
        &mut self,
        origin: IataCode,
        destination: IataCode,
        date: NaiveDate,
    ) -> Option<FlightQuote> {
        let key = (origin, destination, date);
        if let Some(cached) = self.live_quotes.get(&key) {
            return cached.clone();
        }

        let now = Instant::now();
        if now >= self.deadline {
            debug!(origin = %origin, destination = %destination, "search deadline passed, skipping live tier");
            return None;
        }

        let budget = self.config.live_timeout.min(self.deadline - now);
        let quote = match tokio::time::timeout(budget, self.live.search(origin, destination, date)).await {
            Ok(quotes) => self.cheapest_live(quotes),
            Err(_) => {
                warn!(
                    origin = %origin,
                    destination = %destination,
                    %date,
                    timeout_ms = budget.as_millis() as u64,
                    "live price lookup timed out"
                );
                None
            }
        };

        if let Some(q) = &quote {
            debug!(origin = %origin, destination = %destination, price = q.price, "live quote");
        }

        self.live_quotes.insert(key, quote.clone());
        quote
    }

    fn cheapest_live(&self, quotes: Vec<LiveQuote>) -> Option<FlightQuote> {
        quotes
            .into_iter()
            .filter(LiveQuote::is_valid)
            .min_by(|a, b| a.price.total_cmp(&b.price))
            .map(|q| FlightQuote {
                price: q.price,
                airline: q.airline,
                duration_mins: plausible_duration(q.duration_mins).unwrap_or(self.config.default_duration_mins),
                source: DataSource::LiveApi,
                link: q.link,
            })
    }

    /// Resolve from stored and static data only.
    fn stored_quote(&mut self, origin: IataCode, destination: IataCode, date: NaiveDate) -> FlightQuote {
        if let Some(edge) = self.graph.edge(origin, destination) {
            let (airline, source) = match edge.source {
                EdgeSource::Observed => (MULTIPLE_AIRLINES, DataSource::GraphCache),
                EdgeSource::Estimated => ("Estimated", DataSource::Estimated),
            };
            debug!(origin = %origin, destination = %destination, price = edge.price, ?source, "graph quote");
            return FlightQuote::new(edge.price, airline, edge.duration_mins, source);
        }

        if let Some(offer) = self.reference.cheapest_price(origin, destination, date) {
            debug!(origin = %origin, destination = %destination, price = offer.price, "stored quote");
            return FlightQuote::new(offer.price, offer.airline, offer.duration_mins, DataSource::Database);
        }

        if let Some(price) = self.average_price(origin, destination) {
            debug!(origin = %origin, destination = %destination, price, "average quote");
            return FlightQuote::new(
                price,
                MULTIPLE_AIRLINES,
                self.config.default_duration_mins,
                DataSource::DatabaseAverage,
            );
        }

        if let Some(offer) = fallback::route_fallback(origin, destination) {
            debug!(origin = %origin, destination = %destination, price = offer.price, "static route quote");
            return FlightQuote::new(offer.price, offer.airline, offer.duration_mins, DataSource::Estimated);
        }

        debug!(origin = %origin, destination = %destination, "default quote");
        FlightQuote::new(
            self.config.default_price,
            UNKNOWN_AIRLINE,
            self.config.default_duration_mins,
            DataSource::Fallback,
        )
    }

    fn average_price(&mut self, origin: IataCode, destination: IataCode) -> Option<f64> {
        let reference = self.reference;
        *self
            .averages
            .entry((origin, destination))
            .or_insert_with(|| reference.average_price(origin, destination).filter(|p| p.is_finite()))
    }

    /// Nightly rate for a city at the given star minimum.
    pub fn hotel_rate(&mut self, city: IataCode, stars: u8) -> f64 {
        if let Some(&rate) = self.hotel_rates.get(&(city, stars)) {
            return rate;
        }

        let rate = self
            .reference
            .cheapest_hotel(city, stars)
            .map(|offer| offer.price_per_night)
            .or_else(|| {
                self.reference
                    .lookup(city)
                    .and_then(|c| c.avg_hotel_rate)
                    .filter(|r| r.is_finite() && *r >= 0.0)
            })
            .or_else(|| fallback::hotel_rate(city, stars))
            .unwrap_or_else(|| fallback::default_hotel_rate(stars));

        debug!(city = %city, stars, rate, "hotel rate");
        self.hotel_rates.insert((city, stars), rate);
        rate
    }
}
