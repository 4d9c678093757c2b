//! Shared test helper functions for constructing temporal-graph fixtures.
//!
//! Compiled only in test builds and used by the unit test modules throughout
//! `trc-core`. Integration tests in `crates/trc-core/tests/` define their own
//! local helpers because they link against the non-test library build where
//! this module is not available.
#![allow(clippy::expect_used)]

use crate::graph::{TemporalCycle, TemporalGraph};
use crate::types::Timestamp;

/// Builds a graph from `(source, target, timestamps)` triples.
pub fn graph_from(edges: &[(&str, &str, &[Timestamp])]) -> TemporalGraph {
    let mut graph = TemporalGraph::new();
    for &(source, target, times) in edges {
        for &at in times {
            graph.add_observation(source, target, at);
        }
    }
    graph
}

/// Resolves cycles to `(names, times)` pairs for readable assertions.
pub fn named_cycles(
    graph: &TemporalGraph,
    cycles: &[TemporalCycle],
) -> Vec<(Vec<String>, Vec<Timestamp>)> {
    cycles
        .iter()
        .map(|cycle| {
            let names = cycle
                .resolve(graph)
                .expect("all cycle nodes exist")
                .into_iter()
                .map(str::to_owned)
                .collect();
            (names, cycle.times.clone())
        })
        .collect()
}
