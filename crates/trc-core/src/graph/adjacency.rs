/// The per-search adjacency index: node → neighbours with ascending,
/// deduplicated timestamp histories.
///
/// Built eagerly and in full before any backtracking starts, trading memory
/// for never re-sorting a history mid-search: one edge's timestamps are
/// consulted many times across start nodes and recursion depths.
///
/// # Ordering
///
/// Neighbour lists are ordered by ascending [`NodeIndex`] and each history is
/// sorted ascending, so every iteration the search engine performs over this
/// index is deterministic and re-runs produce identical result sequences.
///
/// # History Semantics
///
/// A history is a *set* of observation times: duplicates in the raw edge
/// weight collapse here, and an edge whose history is empty is omitted
/// entirely (it can never contribute a time-respecting step).
use std::collections::{BTreeMap, HashMap, HashSet};

use petgraph::stable_graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::graph::TemporalGraph;
use crate::types::Timestamp;

/// One outgoing edge as seen by the search: the neighbour it leads to and
/// the ascending, deduplicated times at which it can be traversed.
#[derive(Debug, Clone)]
pub struct OutEdge {
    /// Target of the edge.
    pub neighbor: NodeIndex,
    // Invariant: non-empty, ascending, duplicate-free (enforced by `build`).
    times: Vec<Timestamp>,
}

impl OutEdge {
    /// The full ascending timestamp history of this edge.
    pub fn times(&self) -> &[Timestamp] {
        &self.times
    }

    /// Earliest observation time.
    pub fn earliest(&self) -> Timestamp {
        // `build` never stores an empty history; the fallback is unreachable.
        self.times.first().copied().unwrap_or(Timestamp::MIN)
    }

    /// Latest observation time.
    pub fn latest(&self) -> Timestamp {
        self.times.last().copied().unwrap_or(Timestamp::MIN)
    }

    /// The ascending tail of timestamps strictly later than `last`.
    ///
    /// `None` means this is the first edge of a path: every timestamp is
    /// eligible. Ties are rejected — a cycle's timestamp sequence must be
    /// strictly increasing, so an observation at exactly `last` is not a
    /// valid next step.
    pub fn eligible_after(&self, last: Option<Timestamp>) -> &[Timestamp] {
        match last {
            None => &self.times,
            Some(cutoff) => {
                let from = self.times.partition_point(|&held| held <= cutoff);
                &self.times[from..]
            }
        }
    }
}

/// Node → outgoing temporal edges, restricted to a kept node set.
///
/// Derived, read-only state owned by one enumeration invocation; build once,
/// search, discard.
#[derive(Debug)]
pub struct AdjacencyIndex {
    out: HashMap<NodeIndex, Vec<OutEdge>>,
}

impl AdjacencyIndex {
    /// Builds the index over every edge of `graph` whose endpoints are both
    /// in `keep`.
    ///
    /// Parallel observations of one `(source, target)` pair are merged, then
    /// each history is sorted ascending and deduplicated. Edges with no
    /// observations are omitted.
    pub fn build(graph: &TemporalGraph, keep: &HashSet<NodeIndex>) -> Self {
        let g = graph.graph();
        let mut out: HashMap<NodeIndex, Vec<OutEdge>> = HashMap::with_capacity(keep.len());

        for source in g.node_indices().filter(|idx| keep.contains(idx)) {
            // BTreeMap gives the ascending-NodeIndex neighbour order the
            // engine's determinism guarantee rests on.
            let mut merged: BTreeMap<NodeIndex, Vec<Timestamp>> = BTreeMap::new();
            for edge_ref in g.edges(source) {
                if !keep.contains(&edge_ref.target()) {
                    continue;
                }
                merged
                    .entry(edge_ref.target())
                    .or_default()
                    .extend_from_slice(&edge_ref.weight().history);
            }

            let entries: Vec<OutEdge> = merged
                .into_iter()
                .filter_map(|(neighbor, mut times)| {
                    if times.is_empty() {
                        return None;
                    }
                    times.sort_unstable();
                    times.dedup();
                    Some(OutEdge { neighbor, times })
                })
                .collect();

            if !entries.is_empty() {
                out.insert(source, entries);
            }
        }

        Self { out }
    }

    /// The outgoing temporal edges of `v`, ordered by ascending neighbour
    /// index. Empty for nodes with no eligible out-edges.
    pub fn out_edges(&self, v: NodeIndex) -> &[OutEdge] {
        self.out.get(&v).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolves the sorted history of the edge `source → target`, or `None`
    /// if the index holds no such edge.
    pub fn history(&self, source: NodeIndex, target: NodeIndex) -> Option<&[Timestamp]> {
        let entries = self.out.get(&source)?;
        entries
            .binary_search_by_key(&target, |entry| entry.neighbor)
            .ok()
            .map(|position| entries[position].times())
    }
}
