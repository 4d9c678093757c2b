#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod graph;
pub mod records;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use graph::{
    AdjacencyIndex, BoundsError, CycleBounds, EdgeWeight, NodeWeight, OutEdge, TemporalCycle,
    TemporalGraph, cyclic_components, realizations, temporal_cycles, visit_temporal_cycles,
};
pub use records::EdgeRecord;
pub use types::Timestamp;
