/// Combinatorial realization of structural cycles.
///
/// The secondary stage behind the engine's structural-first mode: the search
/// finds a *candidate* node cycle using only coarse per-edge time windows,
/// then this module enumerates the concrete strictly increasing timestamp
/// assignments that candidate actually admits — possibly none.
///
/// Enumeration is a depth-first walk over edge positions carrying the
/// previously chosen timestamp. The combination cap cuts the walk short both
/// inside the candidate loop and at recursion entry, so a capped call does no
/// work past its last recorded realization.
use std::collections::HashSet;

use petgraph::stable_graph::NodeIndex;

use crate::graph::adjacency::AdjacencyIndex;
use crate::graph::cycles::TemporalCycle;
use crate::types::Timestamp;

/// Enumerates the distinct time-respecting realizations of one structural
/// cycle.
///
/// # Parameters
///
/// - `adjacency` — the search's edge index; histories are resolved here.
/// - `cycle_nodes` — the closed node sequence `[n0, …, nk-1, n0]`.
/// - `max_duration` — optional bound on `last − first` per realization.
/// - `cap` — optional bound on how many realizations to record.
///
/// # Output
///
/// All distinct realizations found before the cap, in ascending
/// lexicographic timestamp order (each edge's history is scanned ascending).
/// An edge that cannot be resolved in the index, or has no recorded history,
/// yields an empty result: the candidate admits no realization. That is
/// normal control flow, not a fault — the graph view can legitimately lack
/// data the structural search speculated about.
pub fn realizations(
    adjacency: &AdjacencyIndex,
    cycle_nodes: &[NodeIndex],
    max_duration: Option<Timestamp>,
    cap: Option<usize>,
) -> Vec<TemporalCycle> {
    let mut histories: Vec<&[Timestamp]> = Vec::with_capacity(cycle_nodes.len().saturating_sub(1));
    for pair in cycle_nodes.windows(2) {
        match adjacency.history(pair[0], pair[1]) {
            Some(times) if !times.is_empty() => histories.push(times),
            Some(_) | None => return Vec::new(),
        }
    }

    let edge_count = histories.len();
    let mut search = RealizationSearch {
        histories,
        cycle_nodes,
        max_duration,
        cap,
        chosen: Vec::with_capacity(edge_count),
        seen: HashSet::new(),
        found: Vec::new(),
    };
    search.descend(0, None);
    search.found
}

/// Depth-first assignment state for one structural cycle.
struct RealizationSearch<'a> {
    histories: Vec<&'a [Timestamp]>,
    cycle_nodes: &'a [NodeIndex],
    max_duration: Option<Timestamp>,
    cap: Option<usize>,
    chosen: Vec<Timestamp>,
    seen: HashSet<Vec<Timestamp>>,
    found: Vec<TemporalCycle>,
}

impl RealizationSearch<'_> {
    fn capped(&self) -> bool {
        self.cap.is_some_and(|cap| self.found.len() >= cap)
    }

    /// Tries every timestamp of the edge at `position` strictly later than
    /// `prev`, recursing to the next position on each hit.
    fn descend(&mut self, position: usize, prev: Option<Timestamp>) {
        if self.capped() {
            return;
        }

        if position == self.histories.len() {
            if let (Some(limit), Some(&first), Some(&last)) =
                (self.max_duration, self.chosen.first(), self.chosen.last())
            {
                if last - first > limit {
                    return;
                }
            }
            // The node sequence is fixed for the whole call, so the chosen
            // timestamps alone key the deduplication.
            if self.seen.insert(self.chosen.clone()) {
                self.found.push(TemporalCycle {
                    nodes: self.cycle_nodes.to_vec(),
                    times: self.chosen.clone(),
                });
            }
            return;
        }

        let history: &[Timestamp] = self.histories[position];
        for &candidate in history {
            if self.capped() {
                return;
            }
            if prev.is_none_or(|held| candidate > held) {
                self.chosen.push(candidate);
                self.descend(position + 1, Some(candidate));
                self.chosen.pop();
            }
        }
    }
}
