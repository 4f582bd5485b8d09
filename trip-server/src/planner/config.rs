//! Optimizer configuration.

use std::time::Duration;

/// Tunable parameters for one optimization pass.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Penalty added for every flight after the first when searching for
    /// the fastest path (minutes).
    pub layover_penalty_mins: u32,

    /// How many single-hub itineraries to keep.
    pub transit_keep: usize,

    /// How many two-hub itineraries to keep.
    pub multi_keep: usize,

    /// Trips shorter than this never get two-hub itineraries.
    pub multi_min_nights: u32,

    /// Maximum number of hubs tried for single-hub itineraries.
    pub hub_candidate_cap: usize,

    /// Minimum savings against the direct route for an early recommendation
    /// (percent).
    pub savings_threshold_percent: f64,

    /// An early recommendation must score at least this fraction of the best.
    pub recommend_score_ratio: f64,

    /// Price used when no tier can price a flight (USD).
    pub default_price: f64,

    /// Duration used when no tier can price a flight (minutes).
    pub default_duration_mins: u32,

    /// Whether the live quote tier is consulted.
    pub use_live_prices: bool,

    /// Upper bound on a single live quote call.
    pub live_timeout: Duration,

    /// Time after which live quotes are no longer requested.
    pub search_deadline: Duration,
}

impl OptimizerConfig {
    pub fn with_layover_penalty(mut self, mins: u32) -> Self {
        self.layover_penalty_mins = mins;
        self
    }

    pub fn with_live_prices(mut self, enabled: bool) -> Self {
        self.use_live_prices = enabled;
        self
    }

    pub fn with_live_timeout(mut self, timeout: Duration) -> Self {
        self.live_timeout = timeout;
        self
    }

    pub fn with_search_deadline(mut self, deadline: Duration) -> Self {
        self.search_deadline = deadline;
        self
    }

    pub fn with_default_quote(mut self, price: f64, duration_mins: u32) -> Self {
        self.default_price = price;
        self.default_duration_mins = duration_mins;
        self
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            layover_penalty_mins: 120,
            transit_keep: 3,
            multi_keep: 2,
            multi_min_nights: 5,
            hub_candidate_cap: 8,
            savings_threshold_percent: 10.0,
            recommend_score_ratio: 0.9,
            default_price: 200.0,
            default_duration_mins: 240,
            use_live_prices: false,
            live_timeout: Duration::from_secs(10),
            search_deadline: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = OptimizerConfig::default();

        assert_eq!(config.layover_penalty_mins, 120);
        assert_eq!(config.transit_keep, 3);
        assert_eq!(config.multi_keep, 2);
        assert_eq!(config.multi_min_nights, 5);
        assert_eq!(config.hub_candidate_cap, 8);
        assert_eq!(config.savings_threshold_percent, 10.0);
        assert_eq!(config.recommend_score_ratio, 0.9);
        assert_eq!(config.default_price, 200.0);
        assert_eq!(config.default_duration_mins, 240);
        assert!(!config.use_live_prices);
        assert_eq!(config.live_timeout, Duration::from_secs(10));
        assert_eq!(config.search_deadline, Duration::from_secs(30));
    }

    #[test]
    fn builder_overrides() {
        let config = OptimizerConfig::default()
            .with_layover_penalty(60)
            .with_live_prices(true)
            .with_live_timeout(Duration::from_secs(2))
            .with_search_deadline(Duration::from_secs(5))
            .with_default_quote(150.0, 180);

        assert_eq!(config.layover_penalty_mins, 60);
        assert!(config.use_live_prices);
        assert_eq!(config.live_timeout, Duration::from_secs(2));
        assert_eq!(config.search_deadline, Duration::from_secs(5));
        assert_eq!(config.default_price, 150.0);
        assert_eq!(config.default_duration_mins, 180);
    }
}
