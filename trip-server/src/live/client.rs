//! Travelpayouts (Aviasales) price API client.
//!
//! Queries the `prices_for_dates` endpoint for the cheapest one-way fares on
//! a given date. The API token is passed as a query parameter.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::domain::IataCode;

use super::error::LiveQuoteError;
use super::{LivePriceProvider, LiveQuote, plausible_duration};

/// Default base URL for the Travelpayouts API.
const DEFAULT_BASE_URL: &str = "https://api.travelpayouts.com";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Booking link prefix for search results.
const BOOKING_BASE_URL: &str = "https://www.aviasales.com/search";

/// Results requested per call.
const RESULT_LIMIT: u8 = 10;

/// Configuration for the Travelpayouts client.
#[derive(Debug, Clone)]
pub struct TravelpayoutsConfig {
    /// API token; live pricing is off without one
    pub token: Option<String>,
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout
    pub timeout: Duration,
}

impl TravelpayoutsConfig {
    /// Create a config with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for TravelpayoutsConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PricesResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Vec<PriceEntry>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PriceEntry {
    price: f64,
    #[serde(default)]
    airline: Option<String>,
    #[serde(default)]
    duration: Option<u32>,
    #[serde(default)]
    duration_to: Option<u32>,
}

/// Travelpayouts API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct TravelpayoutsClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    semaphore: Arc<Semaphore>,
}

impl TravelpayoutsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TravelpayoutsConfig) -> Result<Self, LiveQuoteError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            token: config.token.filter(|t| !t.is_empty()),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Whether an API token is present.
    pub fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    /// Fetch the cheapest one-way fares for a pair on a date.
    ///
    /// Quotes with unusable prices are dropped.
    pub async fn fetch(
        &self,
        origin: IataCode,
        destination: IataCode,
        date: NaiveDate,
    ) -> Result<Vec<LiveQuote>, LiveQuoteError> {
        let token = self.token.as_deref().ok_or(LiveQuoteError::NotConfigured)?;

        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| LiveQuoteError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/aviasales/v3/prices_for_dates", self.base_url);
        let departure_at = date.format("%Y-%m-%d").to_string();
        let limit = RESULT_LIMIT.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("origin", origin.as_str()),
                ("destination", destination.as_str()),
                ("departure_at", departure_at.as_str()),
                ("currency", "usd"),
                ("sorting", "price"),
                ("direct", "false"),
                ("one_way", "true"),
                ("limit", limit.as_str()),
                ("token", token),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(LiveQuoteError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LiveQuoteError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LiveQuoteError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let quotes = parse_prices(&body, origin, destination, date)?;

        debug!(
            origin = %origin,
            destination = %destination,
            %date,
            quotes = quotes.len(),
            "live quotes fetched"
        );

        Ok(quotes)
    }
}

impl LivePriceProvider for TravelpayoutsClient {
    async fn search(
        &self,
        origin: IataCode,
        destination: IataCode,
        date: NaiveDate,
    ) -> Vec<LiveQuote> {
        if !self.is_configured() {
            return Vec::new();
        }

        match self.fetch(origin, destination, date).await {
            Ok(quotes) => quotes,
            Err(e) => {
                warn!(origin = %origin, destination = %destination, %date, error = %e, "live price lookup failed");
                Vec::new()
            }
        }
    }
}

/// Parse a `prices_for_dates` response body.
fn parse_prices(
    body: &str,
    origin: IataCode,
    destination: IataCode,
    date: NaiveDate,
) -> Result<Vec<LiveQuote>, LiveQuoteError> {
    let response: PricesResponse = serde_json::from_str(body).map_err(|e| LiveQuoteError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })?;

    if !response.success {
        return Err(LiveQuoteError::Api {
            status: 200,
            message: response.error.unwrap_or_else(|| "unsuccessful response".to_string()),
        });
    }

    let link = booking_link(origin, destination, date);

    Ok(response
        .data
        .into_iter()
        .map(|entry| LiveQuote {
            price: entry.price,
            airline: entry.airline.unwrap_or_else(|| "Unknown".to_string()),
            duration_mins: plausible_duration(entry.duration.or(entry.duration_to)),
            link: Some(link.clone()),
        })
        .filter(LiveQuote::is_valid)
        .collect())
}

/// Search link in the `{origin}{ddmm}{destination}{adults}` form.
fn booking_link(origin: IataCode, destination: IataCode, date: NaiveDate) -> String {
    format!("{BOOKING_BASE_URL}/{origin}{}{destination}1", date.format("%d%m"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> IataCode {
        IataCode::parse(s).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn parses_price_entries() {
        let body = r#"{
            "success": true,
            "data": [
                {"price": 212, "airline": "HY", "duration": 305, "link": "/search/x"},
                {"price": 230.5, "airline": "TK", "duration_to": 290},
                {"price": 250},
                {"price": 260, "duration": 2147483648}
            ],
            "currency": "usd"
        }"#;

        let quotes = parse_prices(body, code("TAS"), code("IST"), date()).unwrap();
        assert_eq!(quotes.len(), 4);
        assert_eq!(quotes[0].price, 212.0);
        assert_eq!(quotes[0].airline, "HY");
        assert_eq!(quotes[0].duration_mins, Some(305));
        assert_eq!(quotes[1].duration_mins, Some(290));
        assert_eq!(quotes[2].airline, "Unknown");
        assert_eq!(quotes[2].duration_mins, None);
        // Absurd flight times are dropped, the fare is kept
        assert_eq!(quotes[3].price, 260.0);
        assert_eq!(quotes[3].duration_mins, None);
        assert_eq!(
            quotes[0].link.as_deref(),
            Some("https://www.aviasales.com/search/TAS0106IST1")
        );
    }

    #[test]
    fn drops_unusable_prices() {
        let body = r#"{"success": true, "data": [{"price": 0}, {"price": -3}, {"price": 99}]}"#;
        let quotes = parse_prices(body, code("TAS"), code("IST"), date()).unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].price, 99.0);
    }

    #[test]
    fn unsuccessful_payload_is_api_error() {
        let body = r#"{"success": false, "data": [], "error": "bad token"}"#;
        let err = parse_prices(body, code("TAS"), code("IST"), date()).unwrap_err();
        assert!(matches!(err, LiveQuoteError::Api { status: 200, ref message } if message == "bad token"));
    }

    #[test]
    fn malformed_body_is_json_error() {
        let err = parse_prices("<html>", code("TAS"), code("IST"), date()).unwrap_err();
        assert!(matches!(err, LiveQuoteError::Json { .. }));
    }

    #[test]
    fn empty_token_is_unconfigured() {
        let client = TravelpayoutsClient::new(TravelpayoutsConfig::new("")).unwrap();
        assert!(!client.is_configured());

        let client = TravelpayoutsClient::new(TravelpayoutsConfig::new("secret")).unwrap();
        assert!(client.is_configured());
    }

    #[tokio::test]
    async fn unconfigured_client_returns_nothing() {
        let client = TravelpayoutsClient::new(TravelpayoutsConfig::default()).unwrap();
        assert!(client.search(code("TAS"), code("IST"), date()).await.is_empty());

        let err = client.fetch(code("TAS"), code("IST"), date()).await.unwrap_err();
        assert!(matches!(err, LiveQuoteError::NotConfigured));
    }

    #[test]
    fn default_config() {
        let config = TravelpayoutsConfig::default();
        assert_eq!(config.token, None);
        assert_eq!(config.base_url, "https://api.travelpayouts.com");
        assert_eq!(config.max_concurrent, 4);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }
}
