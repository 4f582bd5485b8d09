//! Candidate itinerary generation.
//!
//! Candidates are produced in a fixed order: direct, single-hub transit,
//! two-hub multi-city, then the cheapest and fastest graph paths. The order
//! matters downstream, where the recommender scans candidates in it.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{IataCode, RouteKind, RouteVariant, SearchRequest};
use crate::live::LivePriceProvider;
use crate::reference::{CityDirectory, HotelRepository, PriceRepository};

use super::config::OptimizerConfig;
use super::fallback;
use super::graph::PriceGraph;
use super::itinerary::{ItineraryBuilder, StayPlan};
use super::path::PathSearch;

/// Produces every candidate itinerary for one search.
pub struct VariantGenerator<'a, R, L> {
    reference: &'a R,
    graph: &'a PriceGraph,
    request: &'a SearchRequest,
    config: &'a OptimizerConfig,
    builder: ItineraryBuilder<'a, R, L>,
}

impl<'a, R, L> VariantGenerator<'a, R, L>
where
    R: CityDirectory + PriceRepository + HotelRepository,
    L: LivePriceProvider,
{
    pub fn new(
        reference: &'a R,
        graph: &'a PriceGraph,
        request: &'a SearchRequest,
        config: &'a OptimizerConfig,
        builder: ItineraryBuilder<'a, R, L>,
    ) -> Self {
        Self {
            reference,
            graph,
            request,
            config,
            builder,
        }
    }

    /// All candidates, in generation order.
    pub async fn generate(&mut self) -> Vec<RouteVariant> {
        let mut variants = Vec::new();

        if let Some(direct) = self.direct().await {
            variants.push(direct);
        }
        variants.extend(self.transit().await);
        variants.extend(self.multi_city().await);

        let search = PathSearch::new(self.graph, self.config.layover_penalty_mins);
        let (origin, destination) = (self.request.origin, self.request.destination);

        let paths = [
            (RouteKind::OptimalCheapest, search.cheapest_path(origin, destination)),
            (RouteKind::OptimalFastest, search.fastest_path(origin, destination)),
        ];
        for (kind, path) in paths {
            let Some(path) = path.filter(|p| p.len() >= 2) else {
                debug!(kind = kind.as_str(), "no path found");
                continue;
            };
            if variants.iter().any(|v| v.cities == path) {
                debug!(kind = kind.as_str(), cities = ?path, "path already covered");
                continue;
            }
            if let Some(variant) = self.builder.build(kind, &path, &StayPlan::Even).await {
                variants.push(variant);
            }
        }

        debug!(candidates = variants.len(), "candidates generated");
        variants
    }

    async fn direct(&mut self) -> Option<RouteVariant> {
        let cities = [self.request.origin, self.request.destination];
        self.builder.build(RouteKind::Direct, &cities, &StayPlan::Even).await
    }

    /// The cheapest single-hub itineraries, ties kept in candidate order.
    async fn transit(&mut self) -> Vec<RouteVariant> {
        let (origin, destination) = (self.request.origin, self.request.destination);
        let plan = StayPlan::PerStop(vec![1]);

        let mut variants = Vec::new();
        for hub in self.hub_candidates() {
            if let Some(variant) = self
                .builder
                .build(RouteKind::Transit, &[origin, hub, destination], &plan)
                .await
            {
                variants.push(variant);
            }
        }

        variants.sort_by(|a, b| a.total_cost.total_cmp(&b.total_cost));
        variants.truncate(self.config.transit_keep);
        variants
    }

    /// The first two-hub itineraries that can be built from the curated
    /// pairs. Only for trips with enough nights and transit allowed.
    async fn multi_city(&mut self) -> Vec<RouteVariant> {
        let nights = self.request.nights();
        if !self.request.include_transit || nights < self.config.multi_min_nights {
            return Vec::new();
        }

        let (origin, destination) = (self.request.origin, self.request.destination);
        let per_hub = (nights / 3).max(1);
        let plan = StayPlan::PerStop(vec![per_hub, per_hub]);

        let mut variants = Vec::new();
        for (first, second) in fallback::multi_city_pairs() {
            if variants.len() >= self.config.multi_keep {
                break;
            }
            let usable = [first, second]
                .iter()
                .all(|&hub| hub != origin && hub != destination && self.reference.lookup(hub).is_some());
            if !usable {
                continue;
            }

            let cities = [origin, first, second, destination];
            if let Some(variant) = self.builder.build(RouteKind::Multi, &cities, &plan).await {
                variants.push(variant);
            }
        }
        variants
    }

    /// Hubs to try for single-hub itineraries.
    ///
    /// Curated hubs first, then the directory's hubs in code order, then the
    /// origin's graph neighbors. Origin, destination and cities unknown to
    /// the directory are skipped; the list is capped.
    pub fn hub_candidates(&self) -> Vec<IataCode> {
        let (origin, destination) = (self.request.origin, self.request.destination);
        let neighbors = self.graph.neighbors(origin).iter().map(|e| e.destination);

        let mut seen = HashSet::new();
        fallback::curated_hubs()
            .into_iter()
            .chain(self.reference.list_hubs())
            .chain(neighbors)
            .filter(|&hub| hub != origin && hub != destination)
            .filter(|&hub| self.reference.lookup(hub).is_some())
            .filter(|&hub| seen.insert(hub))
            .take(self.config.hub_candidate_cap)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tokio::time::Instant;

    use super::*;
    use crate::domain::CityNode;
    use crate::live::NoLiveQuotes;
    use crate::planner::pricing::PriceResolver;
    use crate::reference::{FlightRecord, InMemoryReference};

    fn code(s: &str) -> IataCode {
        IataCode::parse(s).unwrap()
    }

    fn codes(list: &[&str]) -> Vec<IataCode> {
        list.iter().map(|s| code(s)).collect()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn reference() -> InMemoryReference {
        let mut reference = InMemoryReference::new()
            .with_city(CityNode::new(code("TAS"), "Tashkent"))
            .with_city(CityNode::new(code("AUH"), "Abu Dhabi").hub())
            .with_city(CityNode::new(code("SVO"), "Moscow"))
            .with_city(CityNode::new(code("CAI"), "Cairo"))
            .with_flight(FlightRecord::new(code("TAS"), code("SVO"), date(1), 140.0, "Aeroflot", 240))
            .with_flight(FlightRecord::new(code("TAS"), code("CAI"), date(1), 290.0, "Egyptair", 360));
        for (hub, name) in [
            ("DXB", "Dubai"),
            ("IST", "Istanbul"),
            ("DOH", "Doha"),
            ("BKK", "Bangkok"),
            ("KUL", "Kuala Lumpur"),
            ("SIN", "Singapore"),
        ] {
            reference = reference.with_city(CityNode::new(code(hub), name).hub());
        }
        reference
    }

    async fn generate(reference: &InMemoryReference, request: &SearchRequest) -> Vec<RouteVariant> {
        let graph = PriceGraph::build(reference);
        let config = OptimizerConfig::default();
        let deadline = Instant::now() + config.search_deadline;
        let resolver = PriceResolver::new(reference, &graph, &NoLiveQuotes, &config, deadline);
        let builder = ItineraryBuilder::new(reference, request, resolver);
        VariantGenerator::new(reference, &graph, request, &config, builder)
            .generate()
            .await
    }

    fn hub_candidates(reference: &InMemoryReference, request: &SearchRequest) -> Vec<IataCode> {
        let graph = PriceGraph::build(reference);
        let config = OptimizerConfig::default();
        let deadline = Instant::now();
        let resolver = PriceResolver::new(reference, &graph, &NoLiveQuotes, &config, deadline);
        let builder = ItineraryBuilder::new(reference, request, resolver);
        VariantGenerator::new(reference, &graph, request, &config, builder).hub_candidates()
    }

    #[test]
    fn hub_candidate_order() {
        let reference = reference();
        let request = SearchRequest::new(code("TAS"), code("IST"), date(1), date(8));

        // Curated minus destination, then AUH from the directory, then
        // graph neighbors of TAS not already listed (CAI, SVO); capped at 8
        assert_eq!(
            hub_candidates(&reference, &request),
            codes(&["DXB", "DOH", "BKK", "KUL", "SIN", "AUH", "CAI", "SVO"])
        );
    }

    #[test]
    fn hub_candidates_skip_unknown_cities() {
        let reference = InMemoryReference::new()
            .with_city(CityNode::new(code("TAS"), "Tashkent"))
            .with_city(CityNode::new(code("IST"), "Istanbul"))
            .with_city(CityNode::new(code("DXB"), "Dubai"));
        let request = SearchRequest::new(code("TAS"), code("IST"), date(1), date(8));

        assert_eq!(hub_candidates(&reference, &request), codes(&["DXB"]));
    }

    #[tokio::test]
    async fn generation_order_and_limits() {
        let reference = reference();
        let request = SearchRequest::new(code("TAS"), code("IST"), date(1), date(8));
        let variants = generate(&reference, &request).await;

        assert_eq!(variants[0].kind, RouteKind::Direct);
        assert_eq!(variants[0].cities, codes(&["TAS", "IST"]));

        let transit: Vec<_> = variants.iter().filter(|v| v.kind == RouteKind::Transit).collect();
        assert_eq!(transit.len(), 3);
        assert!(transit.windows(2).all(|w| w[0].total_cost <= w[1].total_cost));
        assert!(transit.iter().all(|v| v.hotels[0].nights == 1));

        // Pairs containing the destination are skipped
        let multi: Vec<_> = variants.iter().filter(|v| v.kind == RouteKind::Multi).collect();
        assert_eq!(multi.len(), 1);
        assert_eq!(multi[0].cities, codes(&["TAS", "DOH", "BKK", "IST"]));

        // Kinds appear in generation order
        let rank = |k: RouteKind| match k {
            RouteKind::Direct => 0,
            RouteKind::Transit => 1,
            RouteKind::Multi => 2,
            RouteKind::OptimalCheapest => 3,
            RouteKind::OptimalFastest => 4,
        };
        assert!(variants.windows(2).all(|w| rank(w[0].kind) <= rank(w[1].kind)));
    }

    #[tokio::test]
    async fn multi_city_needs_transit_and_nights() {
        let reference = reference();

        let request = SearchRequest::new(code("TAS"), code("CAI"), date(1), date(11)).with_include_transit(false);
        let variants = generate(&reference, &request).await;
        assert!(variants.iter().all(|v| v.kind != RouteKind::Multi));

        let request = SearchRequest::new(code("TAS"), code("CAI"), date(1), date(5));
        let variants = generate(&reference, &request).await;
        assert!(variants.iter().all(|v| v.kind != RouteKind::Multi));

        let request = SearchRequest::new(code("TAS"), code("CAI"), date(1), date(10));
        let variants = generate(&reference, &request).await;
        let multi: Vec<_> = variants.iter().filter(|v| v.kind == RouteKind::Multi).collect();
        assert_eq!(multi.len(), 2);
        assert_eq!(multi[0].cities, codes(&["TAS", "DXB", "IST", "CAI"]));
        assert_eq!(multi[1].cities, codes(&["TAS", "IST", "DXB", "CAI"]));
        assert_eq!(multi[0].hotels[0].nights, 3);
        assert_eq!(multi[0].hotels[1].nights, 3);
        assert_eq!(multi[0].hotel_nights(), 9);
    }

    #[tokio::test]
    async fn optimal_paths_never_repeat_sequences() {
        let reference = reference();
        let request = SearchRequest::new(code("TAS"), code("SIN"), date(1), date(8));
        let variants = generate(&reference, &request).await;

        let mut sequences: Vec<_> = variants.iter().map(|v| v.cities.clone()).collect();
        let total = sequences.len();
        sequences.sort();
        sequences.dedup();
        assert_eq!(sequences.len(), total);
    }
}
