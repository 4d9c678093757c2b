//! Generator validity: seeded reproducibility and structural guarantees.
#![allow(clippy::expect_used)]

use trc_bench::{SizeTier, generate_temporal_graph};
use trc_core::{CycleBounds, cyclic_components, temporal_cycles};

/// The same seed produces the same graph and the same enumeration output.
#[test]
fn test_same_seed_reproduces_graph() {
    let first = generate_temporal_graph(&SizeTier::Small.config(7));
    let second = generate_temporal_graph(&SizeTier::Small.config(7));

    assert_eq!(first.node_count(), second.node_count());
    assert_eq!(first.edge_count(), second.edge_count());

    let bounds = CycleBounds {
        max_length: Some(3),
        max_cycles: Some(50),
        ..CycleBounds::default()
    };
    let cycles_first = temporal_cycles(&first, &bounds).expect("valid bounds");
    let cycles_second = temporal_cycles(&second, &bounds).expect("valid bounds");
    assert_eq!(cycles_first, cycles_second);
}

/// Node count matches the configured ring size.
#[test]
fn test_node_count_matches_config() {
    let config = SizeTier::Small.config(42);
    let graph = generate_temporal_graph(&config);
    assert_eq!(graph.node_count(), config.num_nodes);
}

/// The ring backbone guarantees a nontrivial strongly connected component.
#[test]
fn test_ring_forms_cyclic_component() {
    for tier in [SizeTier::Small, SizeTier::Medium] {
        let graph = generate_temporal_graph(&tier.config(42));
        let components = cyclic_components(&graph);
        assert!(!components.is_empty(), "{tier:?} must have a cyclic core");
        let largest = components.iter().map(Vec::len).max().unwrap_or(0);
        assert!(largest >= tier.config(42).num_nodes);
    }
}
