//! Curated static data used when stored prices run out.
//!
//! Prices are in USD for one traveler, durations in minutes.

use crate::domain::{FlightOffer, IataCode, PriceEdge};

/// Hubs tried first for single-stop itineraries.
const CURATED_HUBS: [&str; 6] = ["DXB", "IST", "DOH", "BKK", "KUL", "SIN"];

/// Ordered hub pairs tried for two-stop itineraries.
const MULTI_CITY_PAIRS: [(&str, &str); 3] = [("DXB", "IST"), ("IST", "DXB"), ("DOH", "BKK")];

/// Estimated graph edges between major cities, inserted in both directions.
const ESTIMATED_EDGES: [(&str, &str, f64, u32); 25] = [
    ("TAS", "IST", 250.0, 300),
    ("TAS", "DXB", 200.0, 270),
    ("TAS", "DOH", 220.0, 300),
    ("TAS", "BKK", 350.0, 420),
    ("TAS", "KUL", 400.0, 480),
    ("TAS", "SIN", 450.0, 540),
    ("TAS", "CAI", 300.0, 360),
    ("DXB", "IST", 150.0, 180),
    ("DXB", "DOH", 80.0, 90),
    ("DXB", "BKK", 250.0, 360),
    ("DXB", "KUL", 280.0, 360),
    ("DXB", "SIN", 300.0, 360),
    ("DXB", "CAI", 180.0, 240),
    ("IST", "DOH", 160.0, 210),
    ("IST", "BKK", 350.0, 540),
    ("IST", "KUL", 400.0, 540),
    ("IST", "SIN", 420.0, 540),
    ("IST", "CAI", 120.0, 150),
    ("DOH", "BKK", 280.0, 390),
    ("DOH", "KUL", 300.0, 420),
    ("DOH", "SIN", 320.0, 420),
    ("DOH", "CAI", 150.0, 180),
    ("BKK", "KUL", 80.0, 120),
    ("BKK", "SIN", 100.0, 150),
    ("KUL", "SIN", 50.0, 60),
];

/// Per-pair quotes used after every stored tier has missed.
///
/// Looked up in the given direction first, then reversed.
const ROUTE_FALLBACKS: [(&str, &str, f64, &str, u32); 23] = [
    ("TAS", "IST", 250.0, "Turkish Airlines", 300),
    ("TAS", "DXB", 200.0, "Flydubai", 270),
    ("TAS", "DOH", 220.0, "Qatar Airways", 300),
    ("TAS", "BKK", 350.0, "Uzbekistan Airways", 420),
    ("TAS", "KUL", 400.0, "AirAsia", 480),
    ("TAS", "CAI", 300.0, "Egyptair", 360),
    ("TAS", "SVO", 150.0, "Aeroflot", 240),
    ("TAS", "LED", 180.0, "Uzbekistan Airways", 270),
    ("DXB", "IST", 120.0, "Emirates", 180),
    ("DXB", "DOH", 60.0, "Emirates", 90),
    ("DXB", "BKK", 220.0, "Emirates", 360),
    ("DXB", "KUL", 250.0, "Emirates", 360),
    ("DXB", "SIN", 280.0, "Emirates", 360),
    ("DXB", "CAI", 150.0, "Emirates", 240),
    ("IST", "DXB", 120.0, "Turkish Airlines", 180),
    ("IST", "DOH", 140.0, "Turkish Airlines", 210),
    ("IST", "CAI", 100.0, "Turkish Airlines", 150),
    ("DOH", "IST", 140.0, "Qatar Airways", 210),
    ("DOH", "BKK", 250.0, "Qatar Airways", 390),
    ("DOH", "CAI", 130.0, "Qatar Airways", 180),
    ("BKK", "KUL", 60.0, "AirAsia", 120),
    ("BKK", "SIN", 80.0, "AirAsia", 150),
    ("KUL", "SIN", 40.0, "AirAsia", 60),
];

/// Nightly rates by star level (index 0 is one star).
const HOTEL_RATES: [(&str, [f64; 5]); 8] = [
    ("IST", [15.0, 30.0, 55.0, 95.0, 180.0]),
    ("DXB", [20.0, 35.0, 45.0, 85.0, 200.0]),
    ("DOH", [25.0, 40.0, 60.0, 110.0, 200.0]),
    ("BKK", [8.0, 15.0, 25.0, 65.0, 150.0]),
    ("KUL", [10.0, 20.0, 35.0, 80.0, 150.0]),
    ("SIN", [25.0, 45.0, 70.0, 150.0, 300.0]),
    ("CAI", [10.0, 20.0, 35.0, 90.0, 180.0]),
    ("TAS", [12.0, 25.0, 40.0, 70.0, 120.0]),
];

/// Nightly rates for cities missing from [`HOTEL_RATES`].
const DEFAULT_HOTEL_RATES: [f64; 5] = [15.0, 30.0, 50.0, 100.0, 200.0];

fn code(s: &str) -> Option<IataCode> {
    IataCode::parse(s).ok()
}

pub fn curated_hubs() -> Vec<IataCode> {
    CURATED_HUBS.iter().filter_map(|s| code(s)).collect()
}

pub fn multi_city_pairs() -> Vec<(IataCode, IataCode)> {
    MULTI_CITY_PAIRS
        .iter()
        .filter_map(|(a, b)| Some((code(a)?, code(b)?)))
        .collect()
}

/// Estimated edges as listed; callers add the reverse direction.
pub fn estimated_edges() -> impl Iterator<Item = PriceEdge> {
    ESTIMATED_EDGES.iter().filter_map(|&(o, d, price, duration)| {
        Some(PriceEdge::estimated(code(o)?, code(d)?, price, duration))
    })
}

/// Static quote for a pair, trying the reverse direction second.
pub fn route_fallback(origin: IataCode, destination: IataCode) -> Option<FlightOffer> {
    let find = |from: IataCode, to: IataCode| {
        ROUTE_FALLBACKS
            .iter()
            .find(|(o, d, ..)| *o == from.as_str() && *d == to.as_str())
    };

    find(origin, destination)
        .or_else(|| find(destination, origin))
        .map(|&(_, _, price, airline, duration_mins)| FlightOffer {
            price,
            airline: airline.to_string(),
            duration_mins,
        })
}

fn star_index(stars: u8) -> usize {
    usize::from(stars.clamp(1, 5)) - 1
}

/// Static nightly rate for a listed city.
pub fn hotel_rate(city: IataCode, stars: u8) -> Option<f64> {
    HOTEL_RATES
        .iter()
        .find(|(c, _)| *c == city.as_str())
        .map(|(_, rates)| rates[star_index(stars)])
}

/// Generic nightly rate for any city.
pub fn default_hotel_rate(stars: u8) -> f64 {
    DEFAULT_HOTEL_RATES[star_index(stars)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> IataCode {
        IataCode::parse(s).unwrap()
    }

    #[test]
    fn all_table_codes_parse() {
        assert_eq!(curated_hubs().len(), CURATED_HUBS.len());
        assert_eq!(multi_city_pairs().len(), MULTI_CITY_PAIRS.len());
        assert_eq!(estimated_edges().count(), ESTIMATED_EDGES.len());
    }

    #[test]
    fn route_fallback_prefers_listed_direction() {
        let offer = route_fallback(c("IST"), c("DXB")).unwrap();
        assert_eq!(offer.airline, "Turkish Airlines");

        let offer = route_fallback(c("DXB"), c("IST")).unwrap();
        assert_eq!(offer.airline, "Emirates");
    }

    #[test]
    fn route_fallback_reverse_lookup() {
        let offer = route_fallback(c("SIN"), c("KUL")).unwrap();
        assert_eq!(offer.price, 40.0);
        assert_eq!(offer.duration_mins, 60);
        assert_eq!(offer.airline, "AirAsia");

        assert!(route_fallback(c("TAS"), c("JFK")).is_none());
    }

    #[test]
    fn hotel_rates_by_star() {
        assert_eq!(hotel_rate(c("IST"), 3), Some(55.0));
        assert_eq!(hotel_rate(c("BKK"), 1), Some(8.0));
        assert_eq!(hotel_rate(c("SIN"), 5), Some(300.0));
        assert_eq!(hotel_rate(c("JFK"), 3), None);
    }

    #[test]
    fn star_levels_are_clamped() {
        assert_eq!(hotel_rate(c("IST"), 0), Some(15.0));
        assert_eq!(hotel_rate(c("IST"), 9), Some(180.0));
        assert_eq!(default_hotel_rate(0), 15.0);
        assert_eq!(default_hotel_rate(3), 50.0);
        assert_eq!(default_hotel_rate(7), 200.0);
    }
}
