//! Weighted city-pair graph built from stored prices.
//!
//! Every stored observation becomes a candidate edge; only the cheapest per
//! directed pair survives. Curated estimates fill gaps between major cities
//! in both directions, but never replace an observed edge.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, trace};

use crate::domain::{IataCode, PriceEdge};
use crate::reference::{CityDirectory, PriceRepository};

use super::fallback;

/// Adjacency map from each city to its outgoing edges.
///
/// Immutable once built. Neighbor lists are in destination code order.
#[derive(Debug, Clone, Default)]
pub struct PriceGraph {
    nodes: HashSet<IataCode>,
    adjacency: HashMap<IataCode, Vec<PriceEdge>>,
}

impl PriceGraph {
    /// Build the graph from the directory's cities and every stored price.
    pub fn build<R: CityDirectory + PriceRepository>(reference: &R) -> Self {
        let graph = Self::from_parts(
            reference.codes(),
            reference.observations(),
            fallback::estimated_edges(),
        );
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "price graph built"
        );
        graph
    }

    /// Build from explicit nodes, observations and estimates.
    ///
    /// Edges touching a code outside `nodes`, self-loops, and edges with a
    /// negative or non-finite price are ignored.
    pub fn from_parts(
        nodes: impl IntoIterator<Item = IataCode>,
        observations: impl IntoIterator<Item = PriceEdge>,
        estimates: impl IntoIterator<Item = PriceEdge>,
    ) -> Self {
        let nodes: HashSet<IataCode> = nodes.into_iter().collect();
        let mut pairs: BTreeMap<IataCode, BTreeMap<IataCode, PriceEdge>> = BTreeMap::new();

        let usable = |edge: &PriceEdge| {
            nodes.contains(&edge.origin)
                && nodes.contains(&edge.destination)
                && edge.origin != edge.destination
                && edge.price.is_finite()
                && edge.price >= 0.0
        };

        for edge in observations {
            if !usable(&edge) {
                trace!(origin = %edge.origin, destination = %edge.destination, "observation skipped");
                continue;
            }

            let slot = pairs.entry(edge.origin).or_default();
            match slot.get(&edge.destination) {
                Some(existing) if existing.price <= edge.price => {}
                _ => {
                    slot.insert(edge.destination, edge);
                }
            }
        }

        for edge in estimates {
            if !usable(&edge) {
                continue;
            }

            let reverse = PriceEdge {
                origin: edge.destination,
                destination: edge.origin,
                ..edge.clone()
            };

            for e in [edge, reverse] {
                pairs
                    .entry(e.origin)
                    .or_default()
                    .entry(e.destination)
                    .or_insert(e);
            }
        }

        let adjacency = pairs
            .into_iter()
            .map(|(origin, edges)| (origin, edges.into_values().collect()))
            .collect();

        Self { nodes, adjacency }
    }

    /// Outgoing edges of a city; empty for unknown cities.
    pub fn neighbors(&self, code: IataCode) -> &[PriceEdge] {
        self.adjacency
            .get(&code)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// The kept edge for a directed pair.
    pub fn edge(&self, origin: IataCode, destination: IataCode) -> Option<&PriceEdge> {
        self.neighbors(origin)
            .iter()
            .find(|e| e.destination == destination)
    }

    pub fn contains(&self, code: IataCode) -> bool {
        self.nodes.contains(&code)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EdgeSource;

    fn code(s: &str) -> IataCode {
        IataCode::parse(s).unwrap()
    }

    fn codes(list: &[&str]) -> Vec<IataCode> {
        list.iter().map(|s| code(s)).collect()
    }

    fn observed(o: &str, d: &str, price: f64, duration: u32) -> PriceEdge {
        PriceEdge::observed(code(o), code(d), price, duration)
    }

    fn estimated(o: &str, d: &str, price: f64, duration: u32) -> PriceEdge {
        PriceEdge::estimated(code(o), code(d), price, duration)
    }

    #[test]
    fn keeps_cheapest_observation_with_its_duration() {
        let graph = PriceGraph::from_parts(
            codes(&["TAS", "IST"]),
            vec![
                observed("TAS", "IST", 260.0, 310),
                observed("TAS", "IST", 230.0, 330),
                observed("TAS", "IST", 245.0, 290),
            ],
            vec![],
        );

        let edge = graph.edge(code("TAS"), code("IST")).unwrap();
        assert_eq!(edge.price, 230.0);
        assert_eq!(edge.duration_mins, 330);
        assert!(graph.edge(code("IST"), code("TAS")).is_none());
    }

    #[test]
    fn estimates_fill_both_directions() {
        let graph = PriceGraph::from_parts(
            codes(&["DXB", "DOH"]),
            vec![],
            vec![estimated("DXB", "DOH", 80.0, 90)],
        );

        let forward = graph.edge(code("DXB"), code("DOH")).unwrap();
        let reverse = graph.edge(code("DOH"), code("DXB")).unwrap();
        assert_eq!(forward.source, EdgeSource::Estimated);
        assert_eq!(reverse.price, 80.0);
        assert_eq!(reverse.duration_mins, 90);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn estimates_never_replace_observations() {
        let graph = PriceGraph::from_parts(
            codes(&["TAS", "IST"]),
            vec![observed("IST", "TAS", 300.0, 320)],
            vec![estimated("TAS", "IST", 250.0, 300)],
        );

        let observed_edge = graph.edge(code("IST"), code("TAS")).unwrap();
        assert_eq!(observed_edge.source, EdgeSource::Observed);
        assert_eq!(observed_edge.price, 300.0);

        let estimated_edge = graph.edge(code("TAS"), code("IST")).unwrap();
        assert_eq!(estimated_edge.source, EdgeSource::Estimated);
    }

    #[test]
    fn unknown_codes_ignored() {
        let graph = PriceGraph::from_parts(
            codes(&["TAS", "IST"]),
            vec![observed("TAS", "JFK", 500.0, 600), observed("LHR", "IST", 120.0, 240)],
            vec![estimated("TAS", "BKK", 350.0, 420)],
        );

        assert_eq!(graph.edge_count(), 0);
        assert!(graph.neighbors(code("JFK")).is_empty());
        assert!(!graph.contains(code("JFK")));
        assert!(graph.contains(code("TAS")));
    }

    #[test]
    fn unusable_prices_ignored() {
        let graph = PriceGraph::from_parts(
            codes(&["TAS", "IST"]),
            vec![
                observed("TAS", "IST", f64::NAN, 300),
                observed("TAS", "IST", -10.0, 300),
                observed("TAS", "TAS", 10.0, 30),
            ],
            vec![],
        );
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn neighbors_in_code_order() {
        let graph = PriceGraph::from_parts(
            codes(&["TAS", "IST", "DXB", "BKK"]),
            vec![
                observed("TAS", "IST", 250.0, 300),
                observed("TAS", "BKK", 350.0, 420),
                observed("TAS", "DXB", 200.0, 270),
            ],
            vec![],
        );

        let order: Vec<_> = graph.neighbors(code("TAS")).iter().map(|e| e.destination).collect();
        assert_eq!(order, codes(&["BKK", "DXB", "IST"]));
    }
}
