//! Expand a city sequence into a fully priced itinerary.

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::domain::{HotelStay, HubInfo, IataCode, LegRole, RouteKind, RouteVariant, SearchRequest};
use crate::live::LivePriceProvider;
use crate::reference::{CityDirectory, HotelRepository, PriceRepository};

use super::pricing::PriceResolver;

/// How nights are split across intermediate stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StayPlan {
    /// Each stop gets `max(1, nights / (stops + 1))`.
    Even,
    /// Explicit nights per stop, in order. Stops past the end get one night.
    PerStop(Vec<u32>),
}

/// Split `total` nights between `stops` intermediate cities and the
/// destination.
///
/// Stops never receive more than what is left, so late stops in a short trip
/// may get zero. Returns the per-stop nights and the destination's share; the
/// two always sum to `total`.
pub fn allocate_nights(total: u32, stops: usize, plan: &StayPlan) -> (Vec<u32>, u32) {
    let even = match u32::try_from(stops) {
        Ok(k) => (total / k.saturating_add(1)).max(1),
        Err(_) => 1,
    };

    let mut remaining = total;
    let per_stop = (0..stops)
        .map(|i| {
            let wanted = match plan {
                StayPlan::Even => even,
                StayPlan::PerStop(nights) => nights.get(i).copied().unwrap_or(1),
            };
            let nights = wanted.min(remaining);
            remaining -= nights;
            nights
        })
        .collect();

    (per_stop, remaining)
}

/// Builds priced itineraries for one search.
pub struct ItineraryBuilder<'a, R, L> {
    reference: &'a R,
    request: &'a SearchRequest,
    resolver: PriceResolver<'a, R, L>,
}

impl<'a, R, L> ItineraryBuilder<'a, R, L>
where
    R: CityDirectory + PriceRepository + HotelRepository,
    L: LivePriceProvider,
{
    pub fn new(reference: &'a R, request: &'a SearchRequest, resolver: PriceResolver<'a, R, L>) -> Self {
        Self {
            reference,
            request,
            resolver,
        }
    }

    /// Build one itinerary.
    ///
    /// Flights run along `cities` and then back from the last city to the
    /// first. Outbound flight `i` leaves `i` days after departure; the flight
    /// home always leaves on the return date. Returns `None` for fewer than
    /// two cities.
    pub async fn build(
        &mut self,
        kind: RouteKind,
        cities: &[IataCode],
        plan: &StayPlan,
    ) -> Option<RouteVariant> {
        let (&origin, &destination) = match cities {
            [first, .., last] => (first, last),
            _ => {
                debug!(kind = kind.as_str(), cities = cities.len(), "too few cities for itinerary");
                return None;
            }
        };

        let mut segments = Vec::with_capacity(cities.len());
        for (i, pair) in cities.windows(2).enumerate() {
            let date = self.leg_date(i);
            let role = if i == 0 {
                LegRole::Outbound
            } else {
                LegRole::Transit
            };
            let quote = self.resolver.flight_quote(pair[0], pair[1], date).await;
            segments.push(quote.into_segment(pair[0], pair[1], date, role));
        }

        let return_date = self.request.return_date;
        let quote = self.resolver.flight_quote(destination, origin, return_date).await;
        segments.push(quote.into_segment(destination, origin, return_date, LegRole::Inbound));

        let stops = &cities[1..cities.len() - 1];
        let hotels = self.hotel_stays(stops, destination, plan);

        let variant = match RouteVariant::assemble(
            kind,
            cities.to_vec(),
            segments,
            hotels,
            self.request.travelers,
        ) {
            Ok(v) => v,
            Err(e) => {
                debug!(kind = kind.as_str(), error = %e, "itinerary rejected");
                return None;
            }
        };

        let variant = variant.with_bonus(self.bonus(stops));
        let variant = match stops {
            [hub] => variant.with_hub(self.hub_info(*hub)),
            _ => variant,
        };

        debug!(
            kind = kind.as_str(),
            cities = ?variant.cities,
            total_cost = variant.total_cost,
            "itinerary built"
        );
        Some(variant)
    }

    fn leg_date(&self, index: usize) -> NaiveDate {
        let departure = self.request.departure_date;
        u64::try_from(index)
            .ok()
            .and_then(|i| departure.checked_add_days(Days::new(i)))
            .unwrap_or(departure)
    }

    fn hotel_stays(&mut self, stops: &[IataCode], destination: IataCode, plan: &StayPlan) -> Vec<HotelStay> {
        let stars = self.request.hotel_stars;
        let (per_stop, at_destination) = allocate_nights(self.request.nights(), stops.len(), plan);

        stops
            .iter()
            .copied()
            .zip(per_stop)
            .chain(std::iter::once((destination, at_destination)))
            .filter(|&(_, nights)| nights > 0)
            .map(|(city, nights)| HotelStay::new(city, nights, self.resolver.hotel_rate(city, stars), stars))
            .collect()
    }

    fn city_name(&self, code: IataCode) -> String {
        self.reference
            .lookup(code)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| code.to_string())
    }

    fn bonus(&self, stops: &[IataCode]) -> String {
        match stops {
            [] => "The fastest and most comfortable option. Save your time!".to_string(),
            [hub] => format!("See 2 countries! Stop over in {}.", self.city_name(*hub)),
            _ => {
                let names: Vec<String> = stops.iter().map(|&c| self.city_name(c)).collect();
                format!(
                    "See {} countries! A great trip via {}.",
                    stops.len() + 1,
                    names.join(", ")
                )
            }
        }
    }

    fn hub_info(&self, hub: IataCode) -> HubInfo {
        match self.reference.lookup(hub) {
            Some(city) => HubInfo {
                code: hub,
                name: city.name.clone(),
                country: city.country.as_ref().map(|c| c.name.clone()),
                flag: city
                    .country
                    .as_ref()
                    .map(|c| c.flag.clone())
                    .filter(|f| !f.is_empty()),
            },
            None => HubInfo {
                code: hub,
                name: hub.to_string(),
                country: None,
                flag: None,
            },
        }
    }
}
