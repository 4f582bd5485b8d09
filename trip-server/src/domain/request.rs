//! Trip search input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{IataCode, RequestError};

/// How candidates are weighted when scoring and picking a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationMode {
    /// Favor low total cost
    Cheapest,
    /// Favor short total flight time
    Fastest,
    /// Unweighted sum of all criteria
    #[default]
    Balanced,
    /// Favor few stops and direct routing
    Comfort,
}

/// A round-trip search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub origin: IataCode,
    pub destination: IataCode,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,

    /// Number of travelers (1-10). Flight prices are per traveler.
    pub travelers: u8,

    /// Minimum hotel star rating (1-5).
    pub hotel_stars: u8,

    /// Optional cap on the total trip cost in USD.
    pub budget_max: Option<f64>,

    /// Whether multi-city itineraries may be generated.
    pub include_transit: bool,

    pub mode: OptimizationMode,
}

impl SearchRequest {
    /// Create a request for one traveler, 3-star hotels, no budget,
    /// transit allowed, balanced mode.
    pub fn new(
        origin: IataCode,
        destination: IataCode,
        departure_date: NaiveDate,
        return_date: NaiveDate,
    ) -> Self {
        Self {
            origin,
            destination,
            departure_date,
            return_date,
            travelers: 1,
            hotel_stars: 3,
            budget_max: None,
            include_transit: true,
            mode: OptimizationMode::Balanced,
        }
    }

    pub fn with_travelers(mut self, travelers: u8) -> Self {
        self.travelers = travelers;
        self
    }

    pub fn with_hotel_stars(mut self, stars: u8) -> Self {
        self.hotel_stars = stars;
        self
    }

    pub fn with_budget(mut self, budget_max: f64) -> Self {
        self.budget_max = Some(budget_max);
        self
    }

    pub fn with_include_transit(mut self, include_transit: bool) -> Self {
        self.include_transit = include_transit;
        self
    }

    pub fn with_mode(mut self, mode: OptimizationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Nights between departure and return.
    ///
    /// Zero for requests that fail validation with a return date on or
    /// before departure.
    pub fn nights(&self) -> u32 {
        let days = self
            .return_date
            .signed_duration_since(self.departure_date)
            .num_days();
        u32::try_from(days).unwrap_or(0)
    }

    /// Validate the request.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.origin == self.destination {
            return Err(RequestError::SameCity(self.origin));
        }

        if self.return_date <= self.departure_date {
            return Err(RequestError::ReturnNotAfterDeparture);
        }

        if !(1..=10).contains(&self.travelers) {
            return Err(RequestError::TravelersOutOfRange(self.travelers));
        }

        if !(1..=5).contains(&self.hotel_stars) {
            return Err(RequestError::HotelStarsOutOfRange(self.hotel_stars));
        }

        if let Some(budget) = self.budget_max {
            if !budget.is_finite() || budget < 0.0 {
                return Err(RequestError::InvalidBudget);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> IataCode {
        IataCode::parse(s).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn request() -> SearchRequest {
        SearchRequest::new(code("TAS"), code("IST"), date(1), date(8))
    }

    #[test]
    fn defaults() {
        let req = request();
        assert_eq!(req.travelers, 1);
        assert_eq!(req.hotel_stars, 3);
        assert_eq!(req.budget_max, None);
        assert!(req.include_transit);
        assert_eq!(req.mode, OptimizationMode::Balanced);
        assert_eq!(req.nights(), 7);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn nights_clamped_for_inverted_dates() {
        let req = SearchRequest::new(code("TAS"), code("IST"), date(8), date(1));
        assert_eq!(req.nights(), 0);
    }

    #[test]
    fn rejects_same_city() {
        let req = SearchRequest::new(code("TAS"), code("TAS"), date(1), date(8));
        assert_eq!(req.validate(), Err(RequestError::SameCity(code("TAS"))));
    }

    #[test]
    fn rejects_return_not_after_departure() {
        let req = SearchRequest::new(code("TAS"), code("IST"), date(5), date(5));
        assert_eq!(req.validate(), Err(RequestError::ReturnNotAfterDeparture));
    }

    #[test]
    fn rejects_traveler_count() {
        assert_eq!(
            request().with_travelers(0).validate(),
            Err(RequestError::TravelersOutOfRange(0))
        );
        assert_eq!(
            request().with_travelers(11).validate(),
            Err(RequestError::TravelersOutOfRange(11))
        );
        assert!(request().with_travelers(10).validate().is_ok());
    }

    #[test]
    fn rejects_hotel_stars() {
        assert_eq!(
            request().with_hotel_stars(6).validate(),
            Err(RequestError::HotelStarsOutOfRange(6))
        );
        assert!(request().with_hotel_stars(5).validate().is_ok());
    }

    #[test]
    fn rejects_bad_budget() {
        assert_eq!(
            request().with_budget(-1.0).validate(),
            Err(RequestError::InvalidBudget)
        );
        assert_eq!(
            request().with_budget(f64::NAN).validate(),
            Err(RequestError::InvalidBudget)
        );
        assert!(request().with_budget(0.0).validate().is_ok());
    }

    #[test]
    fn mode_serde_names() {
        let mode: OptimizationMode = serde_json::from_str("\"cheapest\"").unwrap();
        assert_eq!(mode, OptimizationMode::Cheapest);
        assert_eq!(
            serde_json::to_string(&OptimizationMode::Comfort).unwrap(),
            "\"comfort\""
        );
    }
}
