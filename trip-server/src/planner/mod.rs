//! Itinerary optimization.
//!
//! A search builds a price graph from reference data, generates candidate
//! itineraries (direct, single-hub, two-hub and graph-optimal), prices every
//! flight and hotel night through a layered resolver, then scores the
//! candidates and flags exactly one as recommended.

mod config;
mod fallback;
mod graph;
mod itinerary;
mod optimizer;
mod path;
mod pricing;
mod rank;
mod variants;

pub use config::OptimizerConfig;
pub use graph::PriceGraph;
pub use itinerary::{allocate_nights, ItineraryBuilder, StayPlan};
pub use optimizer::{SearchResult, TripOptimizer};
pub use path::PathSearch;
pub use pricing::{FlightQuote, PriceResolver};
pub use rank::{
    apply_savings, compute_savings, deduplicate, filter_budget, mark_recommended, rank_variants,
    score_variant,
};
pub use variants::VariantGenerator;
