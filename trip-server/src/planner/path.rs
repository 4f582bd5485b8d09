//! Single-criterion shortest path search over the price graph.
//!
//! Standard non-negative-weight shortest path: a min-heap keyed by cumulative
//! cost, where each city is finalized the first time it is popped. Entries
//! with equal cost pop in insertion order, so results are deterministic.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tracing::trace;

use crate::domain::{IataCode, PriceEdge};

use super::graph::PriceGraph;

/// Heap entry, ordered so that `BinaryHeap` pops the lowest priority first
/// and, among equals, the earliest pushed.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    priority: f64,
    seq: u64,
    node: IataCode,
    parent: Option<IataCode>,
    hops: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behaviour
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Path search over a built graph.
#[derive(Debug, Clone, Copy)]
pub struct PathSearch<'g> {
    graph: &'g PriceGraph,
    layover_penalty_mins: u32,
}

impl<'g> PathSearch<'g> {
    pub fn new(graph: &'g PriceGraph, layover_penalty_mins: u32) -> Self {
        Self {
            graph,
            layover_penalty_mins,
        }
    }

    /// City sequence with the lowest total price.
    pub fn cheapest_path(&self, start: IataCode, end: IataCode) -> Option<Vec<IataCode>> {
        self.search(start, end, |edge, _| edge.price)
    }

    /// City sequence with the lowest total flight time, counting a layover
    /// penalty for every flight after the first.
    pub fn fastest_path(&self, start: IataCode, end: IataCode) -> Option<Vec<IataCode>> {
        let penalty = f64::from(self.layover_penalty_mins);
        self.search(start, end, |edge, hops| {
            let layover = if hops > 0 { penalty } else { 0.0 };
            f64::from(edge.duration_mins) + layover
        })
    }

    /// `weight` receives the edge and the number of flights already taken.
    fn search<F>(&self, start: IataCode, end: IataCode, weight: F) -> Option<Vec<IataCode>>
    where
        F: Fn(&PriceEdge, usize) -> f64,
    {
        if !self.graph.contains(start) || !self.graph.contains(end) {
            return None;
        }

        let mut parents: HashMap<IataCode, Option<IataCode>> = HashMap::new();
        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;

        heap.push(QueueEntry {
            priority: 0.0,
            seq,
            node: start,
            parent: None,
            hops: 0,
        });

        while let Some(entry) = heap.pop() {
            if parents.contains_key(&entry.node) {
                continue;
            }
            parents.insert(entry.node, entry.parent);

            if entry.node == end {
                return Some(reconstruct(&parents, end));
            }

            for edge in self.graph.neighbors(entry.node) {
                if parents.contains_key(&edge.destination) {
                    continue;
                }

                seq += 1;
                let priority = entry.priority + weight(edge, entry.hops);
                trace!(
                    from = %entry.node,
                    to = %edge.destination,
                    priority,
                    "path search push"
                );
                heap.push(QueueEntry {
                    priority,
                    seq,
                    node: edge.destination,
                    parent: Some(entry.node),
                    hops: entry.hops + 1,
                });
            }
        }

        None
    }
}

fn reconstruct(parents: &HashMap<IataCode, Option<IataCode>>, end: IataCode) -> Vec<IataCode> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(Some(parent)) = parents.get(&current) {
        path.push(*parent);
        current = *parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> IataCode {
        IataCode::parse(s).unwrap()
    }

    fn codes(list: &[&str]) -> Vec<IataCode> {
        list.iter().map(|s| code(s)).collect()
    }

    fn graph(nodes: &[&str], edges: &[(&str, &str, f64, u32)]) -> PriceGraph {
        PriceGraph::from_parts(
            codes(nodes),
            edges
                .iter()
                .map(|&(o, d, p, dur)| PriceEdge::observed(code(o), code(d), p, dur)),
            Vec::new(),
        )
    }

    #[test]
    fn cheapest_prefers_cheaper_chain() {
        let g = graph(
            &["TAS", "DXB", "IST"],
            &[
                ("TAS", "IST", 400.0, 300),
                ("TAS", "DXB", 150.0, 270),
                ("DXB", "IST", 120.0, 180),
            ],
        );
        let search = PathSearch::new(&g, 120);

        assert_eq!(
            search.cheapest_path(code("TAS"), code("IST")),
            Some(codes(&["TAS", "DXB", "IST"]))
        );
    }

    #[test]
    fn fastest_counts_layover_penalty() {
        // Via DXB: 270 + (180 + 120) = 570 > 500 direct
        let g = graph(
            &["TAS", "DXB", "IST"],
            &[
                ("TAS", "IST", 400.0, 500),
                ("TAS", "DXB", 150.0, 270),
                ("DXB", "IST", 120.0, 180),
            ],
        );

        assert_eq!(
            PathSearch::new(&g, 120).fastest_path(code("TAS"), code("IST")),
            Some(codes(&["TAS", "IST"]))
        );
        // Without the penalty the chain wins: 450 < 500
        assert_eq!(
            PathSearch::new(&g, 0).fastest_path(code("TAS"), code("IST")),
            Some(codes(&["TAS", "DXB", "IST"]))
        );
    }

    #[test]
    fn equal_costs_resolve_in_insertion_order() {
        // Both chains cost 300; DOH is pushed before DXB (code order)
        let g = graph(
            &["TAS", "DXB", "DOH", "IST"],
            &[
                ("TAS", "DXB", 100.0, 100),
                ("TAS", "DOH", 100.0, 100),
                ("DXB", "IST", 200.0, 100),
                ("DOH", "IST", 200.0, 100),
            ],
        );
        let search = PathSearch::new(&g, 120);

        assert_eq!(
            search.cheapest_path(code("TAS"), code("IST")),
            Some(codes(&["TAS", "DOH", "IST"]))
        );
    }

    #[test]
    fn unknown_or_unreachable() {
        let g = graph(&["TAS", "IST", "CAI"], &[("TAS", "IST", 250.0, 300)]);
        let search = PathSearch::new(&g, 120);

        assert_eq!(search.cheapest_path(code("JFK"), code("IST")), None);
        assert_eq!(search.cheapest_path(code("TAS"), code("JFK")), None);
        assert_eq!(search.cheapest_path(code("TAS"), code("CAI")), None);
        assert_eq!(search.fastest_path(code("IST"), code("TAS")), None);
    }

    #[test]
    fn start_equals_end() {
        let g = graph(&["TAS"], &[]);
        let search = PathSearch::new(&g, 120);
        assert_eq!(search.cheapest_path(code("TAS"), code("TAS")), Some(codes(&["TAS"])));
    }
}
