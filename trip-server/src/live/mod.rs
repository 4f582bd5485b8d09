//! Live flight price quotes.
//!
//! Live quotes are the most trusted price tier but also the least reliable:
//! providers return an empty list on any failure and the optimizer falls back
//! to stored and estimated prices.

mod cache;
mod client;
mod error;

pub use cache::{CachedLiveProvider, LiveCacheConfig};
pub use client::{TravelpayoutsClient, TravelpayoutsConfig};
pub use error::LiveQuoteError;

use std::future::Future;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::IataCode;

/// Longest flight time accepted from a provider (minutes).
pub const MAX_FLIGHT_MINS: u32 = 48 * 60;

/// Flight time if it is positive and within [`MAX_FLIGHT_MINS`].
pub fn plausible_duration(mins: Option<u32>) -> Option<u32> {
    mins.filter(|&m| m > 0 && m <= MAX_FLIGHT_MINS)
}

/// One live fare for a city pair and date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveQuote {
    /// Price in USD for one traveler
    pub price: f64,
    pub airline: String,
    /// Flight time, when the provider reports it
    pub duration_mins: Option<u32>,
    pub link: Option<String>,
}

impl LiveQuote {
    /// Whether the price is usable.
    pub fn is_valid(&self) -> bool {
        self.price.is_finite() && self.price > 0.0
    }
}

/// A source of live flight quotes.
///
/// Implementations must not fail: errors are logged and reported as an empty
/// list.
pub trait LivePriceProvider {
    fn search(
        &self,
        origin: IataCode,
        destination: IataCode,
        date: NaiveDate,
    ) -> impl Future<Output = Vec<LiveQuote>> + Send;
}

/// Provider used when live pricing is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLiveQuotes;

impl LivePriceProvider for NoLiveQuotes {
    async fn search(&self, _: IataCode, _: IataCode, _: NaiveDate) -> Vec<LiveQuote> {
        Vec::new()
    }
}
