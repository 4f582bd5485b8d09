//! One itinerary search, end to end.

use std::time::Duration;

use tokio::time::Instant;
use tracing::info;

use crate::domain::{RouteVariant, SearchRequest};
use crate::live::LivePriceProvider;
use crate::reference::{CityDirectory, HotelRepository, PriceRepository};

use super::config::OptimizerConfig;
use super::graph::PriceGraph;
use super::itinerary::ItineraryBuilder;
use super::pricing::PriceResolver;
use super::rank::rank_variants;
use super::variants::VariantGenerator;

/// Deadline offset used when the configured one cannot be represented.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Result of an itinerary search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Candidates that passed filtering, best score first.
    pub variants: Vec<RouteVariant>,

    /// Number of candidates built before budget filtering and deduplication.
    pub candidates_generated: usize,
}

impl SearchResult {
    /// Create an empty result.
    pub fn empty() -> Self {
        Self {
            variants: Vec::new(),
            candidates_generated: 0,
        }
    }

    /// The recommended variant, if any candidate survived.
    pub fn recommended(&self) -> Option<&RouteVariant> {
        self.variants.iter().find(|v| v.recommended)
    }
}

/// Optimizer for a single search request.
///
/// Builds its own price graph from the reference data at construction. Memo
/// caches for prices live only as long as one call to
/// [`TripOptimizer::optimize`].
pub struct TripOptimizer<'a, R, L> {
    reference: &'a R,
    live: &'a L,
    config: OptimizerConfig,
    request: SearchRequest,
    graph: PriceGraph,
}

impl<'a, R, L> TripOptimizer<'a, R, L>
where
    R: CityDirectory + PriceRepository + HotelRepository,
    L: LivePriceProvider,
{
    pub fn new(reference: &'a R, live: &'a L, config: OptimizerConfig, request: SearchRequest) -> Self {
        let graph = PriceGraph::build(reference);
        Self {
            reference,
            live,
            config,
            request,
            graph,
        }
    }

    pub fn graph(&self) -> &PriceGraph {
        &self.graph
    }

    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    /// Generate, filter, score and rank every candidate.
    ///
    /// Never fails: missing prices fall back to estimates and an empty
    /// result is valid.
    pub async fn optimize(&self) -> SearchResult {
        let started = Instant::now();
        let deadline = started
            .checked_add(self.config.search_deadline)
            .unwrap_or(started + FAR_FUTURE);

        let resolver = PriceResolver::new(self.reference, &self.graph, self.live, &self.config, deadline);
        let builder = ItineraryBuilder::new(self.reference, &self.request, resolver);
        let candidates = VariantGenerator::new(self.reference, &self.graph, &self.request, &self.config, builder)
            .generate()
            .await;

        let candidates_generated = candidates.len();
        let variants = rank_variants(candidates, &self.request, &self.config);

        info!(
            origin = %self.request.origin,
            destination = %self.request.destination,
            mode = ?self.request.mode,
            candidates = candidates_generated,
            variants = variants.len(),
            recommended = ?variants.iter().find(|v| v.recommended).map(|v| v.kind.as_str()),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "trip search complete"
        );

        SearchResult {
            variants,
            candidates_generated,
        }
    }
}

#[cfg(test)]
#[path = "optimizer_tests.rs"]
mod tests;
