/// Temporal graph storage over `petgraph`, plus the cycle-enumeration stack.
///
/// This module wraps a [`StableDiGraph`] with typed node and edge weights and
/// exposes the pipeline that turns a stream of timestamped edge observations
/// into enumerated time-respecting cycles:
///
/// 1. [`TemporalGraph`] — node/edge storage with per-edge timestamp
///    histories, built incrementally ([`TemporalGraph::add_observation`]) or
///    in bulk from serde records ([`TemporalGraph::from_records`]).
/// 2. [`components`] — restriction of the search universe to strongly
///    connected components that can actually hold a cycle.
/// 3. [`adjacency`] — the per-search [`AdjacencyIndex`]: node → neighbours
///    with ascending, deduplicated timestamp histories.
/// 4. [`cycles`] — the Johnson-style temporal cycle search engine,
///    [`temporal_cycles`] / [`visit_temporal_cycles`].
/// 5. [`realize`] — the combinatorial realization validator used by the
///    engine's structural-first mode.
///
/// # Observation Merging
///
/// There is exactly one stored edge per `(source, target)` pair. Repeated
/// observations of the same pair append to that edge's history rather than
/// adding parallel edges, matching how the upstream temporal stores model
/// repeated interactions.
pub mod adjacency;
pub mod components;
pub mod cycles;
pub mod realize;

pub use adjacency::{AdjacencyIndex, OutEdge};
pub use components::cyclic_components;
pub use cycles::{
    BoundsError, CycleBounds, TemporalCycle, temporal_cycles, visit_temporal_cycles,
};
pub use realize::realizations;

use std::collections::HashMap;

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};

use crate::records::EdgeRecord;
use crate::types::Timestamp;

/// Weight stored inline on each petgraph node.
///
/// Kept small so traversal loops over the node slab stay cache-friendly; the
/// name is the only attribute the cycle engine ever needs.
#[derive(Debug, Clone)]
pub struct NodeWeight {
    /// Opaque node name copied from the observation feed.
    pub name: String,
}

/// Weight stored inline on each petgraph edge.
///
/// The history is kept in arrival order, possibly unsorted and with
/// duplicates. Sorting and deduplication happen once per search when the
/// [`AdjacencyIndex`] is built, so repeated searches never pay for re-sorting
/// and graph ingestion stays O(1) per observation.
#[derive(Debug, Clone)]
pub struct EdgeWeight {
    /// Every time this directed edge was observed, in arrival order.
    pub history: Vec<Timestamp>,
}

/// A directed temporal graph: nodes named by opaque strings, edges carrying
/// timestamp histories.
///
/// Wraps a `petgraph` [`StableDiGraph`] with typed [`NodeWeight`] and
/// [`EdgeWeight`] structs, and maintains a `HashMap<String, NodeIndex>` for
/// O(1) lookup of nodes by name.
///
/// Construction is infallible: observations auto-create their endpoint nodes,
/// the way the upstream temporal stores ingest event streams. There is no
/// dangling-edge state to reject.
#[derive(Debug, Default)]
pub struct TemporalGraph {
    graph: StableDiGraph<NodeWeight, EdgeWeight>,
    name_to_index: HashMap<String, NodeIndex>,
}

impl TemporalGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a slice of observation records.
    ///
    /// Every record's endpoints are registered as nodes even when its
    /// timestamp list is empty; an empty list contributes no edge (a node can
    /// legitimately be known without any recorded interaction).
    pub fn from_records(records: &[EdgeRecord]) -> Self {
        let mut graph = Self::new();
        for record in records {
            graph.add_node(&record.source);
            graph.add_node(&record.target);
            for &at in &record.timestamps {
                graph.add_observation(&record.source, &record.target, at);
            }
        }
        graph
    }

    /// Returns the [`NodeIndex`] for `name`, inserting the node first if it
    /// is not yet present.
    pub fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.name_to_index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(NodeWeight {
            name: name.to_owned(),
        });
        self.name_to_index.insert(name.to_owned(), idx);
        idx
    }

    /// Records one observation of the directed edge `source → target` at
    /// time `at`.
    ///
    /// Endpoints are created on demand. A repeated `(source, target)` pair
    /// appends to the existing edge's history instead of adding a parallel
    /// edge.
    pub fn add_observation(&mut self, source: &str, target: &str, at: Timestamp) -> EdgeIndex {
        let source_idx = self.add_node(source);
        let target_idx = self.add_node(target);

        match self.graph.find_edge(source_idx, target_idx) {
            Some(edge_idx) => {
                if let Some(weight) = self.graph.edge_weight_mut(edge_idx) {
                    weight.history.push(at);
                }
                edge_idx
            }
            None => self
                .graph
                .add_edge(source_idx, target_idx, EdgeWeight { history: vec![at] }),
        }
    }

    /// Returns the number of nodes currently in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of distinct `(source, target)` edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Looks up the [`NodeIndex`] for a node name.
    ///
    /// Returns `None` if no node with that name exists.
    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.name_to_index.get(name).copied()
    }

    /// Returns the name for the given index, or `None` if the index is out
    /// of bounds or refers to a removed node.
    pub fn node_name(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(|weight| weight.name.as_str())
    }

    /// Returns a reference to the underlying [`StableDiGraph`] for use by
    /// the traversal and enumeration algorithms.
    pub fn graph(&self) -> &StableDiGraph<NodeWeight, EdgeWeight> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::test_helpers::graph_from;

    /// An empty graph has no nodes and no edges.
    #[test]
    fn test_empty_graph() {
        let g = TemporalGraph::new();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.node_index("a").is_none());
    }

    /// Observations auto-create their endpoint nodes.
    #[test]
    fn test_observation_creates_endpoints() {
        let mut g = TemporalGraph::new();
        g.add_observation("a", "b", 10);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert!(g.node_index("a").is_some());
        assert!(g.node_index("b").is_some());
    }

    /// Repeated observations of one `(source, target)` pair merge into a
    /// single edge whose history accumulates every timestamp.
    #[test]
    fn test_repeated_observations_merge_into_one_edge() {
        let mut g = TemporalGraph::new();
        let first = g.add_observation("a", "b", 10);
        let second = g.add_observation("a", "b", 5);
        let third = g.add_observation("a", "b", 10);

        assert_eq!(first, second);
        assert_eq!(second, third);
        assert_eq!(g.edge_count(), 1);

        let weight = g.graph().edge_weight(first).expect("edge exists");
        assert_eq!(weight.history, vec![10, 5, 10]);
    }

    /// Opposite directions are distinct edges.
    #[test]
    fn test_directions_are_distinct_edges() {
        let mut g = TemporalGraph::new();
        g.add_observation("a", "b", 1);
        g.add_observation("b", "a", 2);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 2);
    }

    /// Name lookup and index lookup are inverses.
    #[test]
    fn test_name_index_round_trip() {
        let g = graph_from(&[("a", "b", &[1]), ("b", "c", &[2])]);
        for name in ["a", "b", "c"] {
            let idx = g.node_index(name).expect("node exists");
            assert_eq!(g.node_name(idx), Some(name));
        }
    }

    /// `from_records` registers endpoints of empty-history records without
    /// creating an edge for them.
    #[test]
    fn test_from_records_empty_history_registers_nodes_only() {
        let records = vec![
            EdgeRecord {
                source: "a".to_owned(),
                target: "b".to_owned(),
                timestamps: vec![3, 1],
            },
            EdgeRecord {
                source: "b".to_owned(),
                target: "c".to_owned(),
                timestamps: vec![],
            },
        ];
        let g = TemporalGraph::from_records(&records);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 1);
        assert!(g.node_index("c").is_some());
    }
}
