/// Component restriction: confine the cycle search to nodes that can
/// actually sit on a cycle.
///
/// Every elementary cycle lies entirely inside one strongly connected
/// component, and a component of size 1 cannot close a multi-node cycle, so
/// discarding trivial components shrinks the downstream search from the whole
/// graph to its cyclic core without losing any result. Self-loop-only nodes
/// also form trivial components and are discarded with them; a self-loop on a
/// node *inside* a nontrivial component still surfaces as a single-node cycle
/// during the search.
///
/// The restricted "graph view" is never materialized as a separate graph:
/// the [`AdjacencyIndex`](crate::graph::AdjacencyIndex) is simply built over
/// the kept node set, folding subgraph restriction and index construction
/// into one pass.
use petgraph::algo::tarjan_scc;
use petgraph::stable_graph::NodeIndex;

use crate::graph::TemporalGraph;

/// Returns the strongly connected components of `graph` that contain more
/// than one node, i.e. the components that can hold a cycle.
///
/// Component order and the node order within each component come from
/// Tarjan's algorithm and are deterministic for a given insertion order, so
/// downstream enumeration order is reproducible.
pub fn cyclic_components(graph: &TemporalGraph) -> Vec<Vec<NodeIndex>> {
    tarjan_scc(graph.graph())
        .into_iter()
        .filter(|component| component.len() > 1)
        .collect()
}
