//! Caching layer for live price quotes.
//!
//! Fares move slowly relative to a user session, so answers are kept for a
//! few minutes and shared across searches. Empty answers are never cached: an
//! empty list usually means the provider failed, and the next search should
//! try again.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::IataCode;

use super::{LivePriceProvider, LiveQuote};

/// Cache key: (origin, destination, departure date).
type QuoteKey = (IataCode, IataCode, NaiveDate);

/// Cached quote list.
type QuoteEntry = Arc<Vec<LiveQuote>>;

/// Configuration for the live quote cache.
#[derive(Debug, Clone)]
pub struct LiveCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for LiveCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
        }
    }
}

/// Live provider with caching.
///
/// Wraps any provider and caches its non-empty answers.
pub struct CachedLiveProvider<P> {
    provider: P,
    quotes: MokaCache<QuoteKey, QuoteEntry>,
}

impl<P: LivePriceProvider + Sync> CachedLiveProvider<P> {
    /// Create a new cached provider.
    pub fn new(provider: P, config: &LiveCacheConfig) -> Self {
        let quotes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { provider, quotes }
    }

    /// Access the wrapped provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.quotes.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.quotes.invalidate_all();
    }
}

impl<P: LivePriceProvider + Sync> LivePriceProvider for CachedLiveProvider<P> {
    async fn search(
        &self,
        origin: IataCode,
        destination: IataCode,
        date: NaiveDate,
    ) -> Vec<LiveQuote> {
        let key = (origin, destination, date);

        if let Some(cached) = self.quotes.get(&key).await {
            trace!(origin = %origin, destination = %destination, %date, "live quote cache hit");
            return cached.as_ref().clone();
        }

        let quotes = self.provider.search(origin, destination, date).await;

        if !quotes.is_empty() {
            self.quotes.insert(key, Arc::new(quotes.clone())).await;
        }

        quotes
    }
}
