/// Time-respecting cycle enumeration.
///
/// Enumerates elementary cycles whose edge timestamps can be chosen to form
/// a strictly increasing sequence: a walk that returns to its starting node
/// while always moving forward in time. The search is a Johnson-style
/// depth-first backtracking over the [`AdjacencyIndex`], restricted to the
/// strongly connected components that can hold a cycle, under four
/// simultaneous budgets (`max_length`, `max_cycles`, `max_duration`,
/// `max_combo`).
///
/// # Two Validation Strategies, One Engine
///
/// The engine branches on *time windows* `(earliest, latest)`:
///
/// - **Exact expansion** (default) branches on every eligible timestamp of
///   every outgoing edge — a degenerate window per timestamp — so each
///   closed path already is a fully verified realization.
/// - **Structural-first** (selected by [`CycleBounds::max_combo`]) branches
///   once per edge on its full history window, using the coarse test
///   `next.latest > prev.earliest` to find candidate node cycles cheaply;
///   each candidate is then handed to [`realize::realizations`] to enumerate
///   the concrete increasing assignments, capped per candidate.
///
/// Because an exact timestamp `t` is the window `(t, t)`, the eligibility,
/// duration-pruning, and closing-duration rules are literally the same
/// formulas in both modes.
///
/// # Johnson Bookkeeping
///
/// Each start node's search keeps the classical blocked set and reactivation
/// map: a node whose subtree closed no cycle is recorded as dependent on its
/// out-neighbours and is unblocked, transitively, as soon as one of them
/// participates in a success. Elementary-path enforcement itself uses the
/// on-path set — under temporal constraints a node fruitless for one time
/// prefix can still close a cycle for a later one, so the blocked set stays
/// bookkeeping rather than a hard filter.
///
/// # Budgets and Cancellation
///
/// One emission budget is shared across every component, start node, and
/// validator call of an invocation. Reaching `max_cycles` — or a sink
/// returning [`ControlFlow::Break`] — unwinds every active recursion level
/// and every pending outer loop immediately; nothing is computed past the
/// last emitted result.
///
/// # Determinism
///
/// Components and start nodes follow Tarjan order, neighbours ascend by node
/// index, timestamps ascend per neighbour: identical inputs and bounds yield
/// the identical result sequence on every run.
use std::collections::{HashMap, HashSet};
use std::ops::ControlFlow;

use petgraph::stable_graph::NodeIndex;

use crate::graph::TemporalGraph;
use crate::graph::adjacency::AdjacencyIndex;
use crate::graph::components::cyclic_components;
use crate::graph::realize;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Search budgets for one enumeration invocation.
///
/// Every field defaults to unbounded. Bounds are validated before any search
/// work starts; see [`BoundsError`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleBounds {
    /// Maximum number of distinct nodes per cycle. Must be ≥ 1 when set.
    pub max_length: Option<usize>,
    /// Global cap on emitted realizations across the whole invocation.
    /// Must be ≥ 1 when set.
    pub max_cycles: Option<usize>,
    /// Maximum `last − first` timestamp span within one realization, in the
    /// same unit as the timestamps. Must be ≥ 0 when set.
    pub max_duration: Option<Timestamp>,
    /// When set, selects structural-first mode and caps how many
    /// realizations are enumerated per structural candidate. Must be ≥ 1
    /// when set.
    pub max_combo: Option<usize>,
}

impl CycleBounds {
    fn validate(&self) -> Result<(), BoundsError> {
        if self.max_length == Some(0) {
            return Err(BoundsError::ZeroBound("max_length"));
        }
        if self.max_cycles == Some(0) {
            return Err(BoundsError::ZeroBound("max_cycles"));
        }
        if self.max_combo == Some(0) {
            return Err(BoundsError::ZeroBound("max_combo"));
        }
        if let Some(limit) = self.max_duration {
            if limit < 0 {
                return Err(BoundsError::NegativeDuration(limit));
            }
        }
        Ok(())
    }
}

/// Errors raised for invalid [`CycleBounds`] before a search starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundsError {
    /// A count bound was set to zero; the contained string names the field.
    ZeroBound(&'static str),
    /// `max_duration` was negative; the contained value is the rejected one.
    NegativeDuration(Timestamp),
}

impl std::fmt::Display for BoundsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundsError::ZeroBound(field) => {
                write!(f, "zero is not a valid value for {field}")
            }
            BoundsError::NegativeDuration(value) => {
                write!(f, "negative max_duration: {value}")
            }
        }
    }
}

impl std::error::Error for BoundsError {}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// One time-respecting cycle: a closed node sequence and the strictly
/// increasing timestamps chosen on its edges.
///
/// `nodes` has length `distinct_nodes() + 1` with the first and last entry
/// equal (the closing node); `times` has one entry per edge, each drawn from
/// that edge's recorded history.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemporalCycle {
    /// The closed node sequence `[n0, …, nk-1, n0]`.
    pub nodes: Vec<NodeIndex>,
    /// The strictly increasing edge timestamps, one per traversed edge.
    pub times: Vec<Timestamp>,
}

impl TemporalCycle {
    /// Number of distinct nodes on the cycle.
    pub fn distinct_nodes(&self) -> usize {
        self.times.len()
    }

    /// Timestamp span `last − first` of this realization (0 for single-edge
    /// cycles).
    pub fn duration(&self) -> Timestamp {
        let first = self.times.first().copied().unwrap_or(0);
        let last = self.times.last().copied().unwrap_or(0);
        last - first
    }

    /// Resolves the node sequence to names, or `None` if any node has been
    /// removed from `graph` since the cycle was produced.
    pub fn resolve<'g>(&self, graph: &'g TemporalGraph) -> Option<Vec<&'g str>> {
        self.nodes.iter().map(|&idx| graph.node_name(idx)).collect()
    }
}

// ---------------------------------------------------------------------------
// Termination controller
// ---------------------------------------------------------------------------

/// The shared emission counter enforcing `max_cycles` across every component,
/// start node, and validator call of one invocation.
///
/// Monotonically increasing, never reset mid-search. Single-threaded by
/// construction, so a plain counter suffices; a parallel variant would need
/// an atomic and cap checks tolerant of slight staleness.
#[derive(Debug)]
struct EmissionBudget {
    emitted: usize,
    cap: Option<usize>,
}

impl EmissionBudget {
    fn new(cap: Option<usize>) -> Self {
        Self { emitted: 0, cap }
    }

    fn record(&mut self) {
        self.emitted = self.emitted.saturating_add(1);
    }

    fn exhausted(&self) -> bool {
        self.cap.is_some_and(|cap| self.emitted >= cap)
    }

    /// Headroom left under the cap; feeds the validator's effective
    /// combination cap so no realization is enumerated only to be discarded.
    fn remaining(&self) -> Option<usize> {
        self.cap.map(|cap| cap.saturating_sub(self.emitted))
    }
}

// ---------------------------------------------------------------------------
// Search engine
// ---------------------------------------------------------------------------

/// Inclusive window of times one edge step may occupy. Exact-expansion steps
/// are degenerate windows (`earliest == latest`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimeWindow {
    earliest: Timestamp,
    latest: Timestamp,
}

#[derive(Debug, Clone, Copy)]
enum SearchMode {
    ExactExpansion,
    StructuralFirst { max_combo: usize },
}

/// Per-start-node search state. Owned exclusively by one start node's
/// exploration; nothing here is shared across start nodes.
struct CycleSearch<'a> {
    adjacency: &'a AdjacencyIndex,
    mode: SearchMode,
    bounds: &'a CycleBounds,
    start: NodeIndex,
    /// Ordered distinct nodes of the current path, beginning at `start`.
    path: Vec<NodeIndex>,
    /// Window chosen on each committed edge, parallel to `path[1..]`.
    windows: Vec<TimeWindow>,
    on_path: HashSet<NodeIndex>,
    blocked: HashSet<NodeIndex>,
    /// Reactivation map: node → nodes to unblock when it joins a success.
    blocked_deps: HashMap<NodeIndex, HashSet<NodeIndex>>,
}

impl CycleSearch<'_> {
    /// Eligible continuations out of `v` given the previously chosen window.
    ///
    /// Exact mode yields one candidate per strictly-later timestamp, in
    /// ascending order per neighbour; structural mode yields one candidate
    /// per neighbour whose window could still advance time
    /// (`latest > prev.earliest`).
    fn next_steps(&self, v: NodeIndex, last: Option<TimeWindow>) -> Vec<(NodeIndex, TimeWindow)> {
        let mut steps = Vec::new();
        for edge in self.adjacency.out_edges(v) {
            match self.mode {
                SearchMode::ExactExpansion => {
                    for &t in edge.eligible_after(last.map(|window| window.earliest)) {
                        steps.push((
                            edge.neighbor,
                            TimeWindow {
                                earliest: t,
                                latest: t,
                            },
                        ));
                    }
                }
                SearchMode::StructuralFirst { .. } => {
                    let window = TimeWindow {
                        earliest: edge.earliest(),
                        latest: edge.latest(),
                    };
                    if last.is_none_or(|prev| window.latest > prev.earliest) {
                        steps.push((edge.neighbor, window));
                    }
                }
            }
        }
        steps
    }

    /// One recursive step of the Johnson-style backtracking.
    ///
    /// Returns `Continue(closed)` where `closed` reports whether this call's
    /// subtree closed at least one cycle, or `Break` when the emission
    /// budget is exhausted or the sink cancelled — either unwinds the whole
    /// invocation.
    fn explore<F>(
        &mut self,
        v: NodeIndex,
        last: Option<TimeWindow>,
        budget: &mut EmissionBudget,
        sink: &mut F,
    ) -> ControlFlow<(), bool>
    where
        F: FnMut(TemporalCycle) -> ControlFlow<()>,
    {
        self.blocked.insert(v);
        let mut closed = false;

        for (w, window) in self.next_steps(v, last) {
            // The first committed window anchors the duration budget: once a
            // path exists, any step past the window is unreachable on this
            // branch no matter what is chosen later.
            if let (Some(limit), Some(first)) =
                (self.bounds.max_duration, self.windows.first().copied())
            {
                if window.earliest - first.latest > limit {
                    continue;
                }
            }

            if w == self.start {
                let duration = self
                    .windows
                    .first()
                    .map_or(0, |first| window.earliest - first.latest);
                let length_ok = self
                    .bounds
                    .max_length
                    .is_none_or(|limit| self.path.len() <= limit);
                let duration_ok = self
                    .bounds
                    .max_duration
                    .is_none_or(|limit| duration <= limit);
                if length_ok && duration_ok {
                    closed = true;
                    self.emit_closing(window, budget, sink)?;
                }
            } else if !self.on_path.contains(&w)
                && self
                    .bounds
                    .max_length
                    .is_none_or(|limit| self.path.len() < limit)
            {
                self.path.push(w);
                self.windows.push(window);
                self.on_path.insert(w);
                let outcome = self.explore(w, Some(window), budget, sink);
                self.path.pop();
                self.windows.pop();
                self.on_path.remove(&w);
                if outcome? {
                    closed = true;
                }
            }
        }

        if closed {
            self.unblock(v);
        } else {
            // No success below v: park it on every out-neighbour so a later
            // success through any of them reactivates it.
            for edge in self.adjacency.out_edges(v) {
                self.blocked_deps.entry(edge.neighbor).or_default().insert(v);
            }
        }

        ControlFlow::Continue(closed)
    }

    /// Emits everything the closing step `path → start` yields: the one
    /// realization in exact mode, or every validated realization of the
    /// candidate in structural-first mode.
    fn emit_closing<F>(
        &self,
        closing: TimeWindow,
        budget: &mut EmissionBudget,
        sink: &mut F,
    ) -> ControlFlow<()>
    where
        F: FnMut(TemporalCycle) -> ControlFlow<()>,
    {
        let mut nodes = self.path.clone();
        nodes.push(self.start);

        match self.mode {
            SearchMode::ExactExpansion => {
                let mut times: Vec<Timestamp> =
                    self.windows.iter().map(|window| window.earliest).collect();
                times.push(closing.earliest);
                budget.record();
                sink(TemporalCycle { nodes, times })?;
                if budget.exhausted() {
                    return ControlFlow::Break(());
                }
            }
            SearchMode::StructuralFirst { max_combo } => {
                let cap = Some(
                    budget
                        .remaining()
                        .map_or(max_combo, |headroom| headroom.min(max_combo)),
                );
                for cycle in
                    realize::realizations(self.adjacency, &nodes, self.bounds.max_duration, cap)
                {
                    budget.record();
                    sink(cycle)?;
                    if budget.exhausted() {
                        return ControlFlow::Break(());
                    }
                }
            }
        }

        ControlFlow::Continue(())
    }

    /// Removes `node` from the blocked set and, transitively, every node
    /// parked on it in the reactivation map.
    fn unblock(&mut self, node: NodeIndex) {
        let mut worklist = vec![node];
        while let Some(current) = worklist.pop() {
            if self.blocked.remove(&current) {
                if let Some(dependents) = self.blocked_deps.remove(&current) {
                    worklist.extend(dependents);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Enumerates every time-respecting cycle of `graph` within `bounds`,
/// collected in discovery order.
///
/// Each node of each nontrivial strongly connected component anchors its own
/// search, so rotations of one structural cycle are enumerated as distinct
/// anchored cycles, each with its own realizations.
///
/// # Errors
///
/// Returns [`BoundsError`] if `bounds` is invalid; the graph is not touched
/// in that case.
pub fn temporal_cycles(
    graph: &TemporalGraph,
    bounds: &CycleBounds,
) -> Result<Vec<TemporalCycle>, BoundsError> {
    let mut found = Vec::new();
    visit_temporal_cycles(graph, bounds, |cycle| {
        found.push(cycle);
        ControlFlow::Continue(())
    })?;
    Ok(found)
}

/// Streams every time-respecting cycle of `graph` within `bounds` into
/// `sink`, in discovery order.
///
/// This is the demand-driven form of [`temporal_cycles`]: the sink observes
/// each realization the moment the search finds it, and returning
/// [`ControlFlow::Break`] cancels the whole enumeration — every active
/// recursion level, every pending start node, every pending component —
/// without computing anything further. Reaching `max_cycles` cancels the
/// same way from the inside.
///
/// # Errors
///
/// Returns [`BoundsError`] if `bounds` is invalid (zero count bound or
/// negative duration); validation happens before any search work.
pub fn visit_temporal_cycles<F>(
    graph: &TemporalGraph,
    bounds: &CycleBounds,
    mut sink: F,
) -> Result<(), BoundsError>
where
    F: FnMut(TemporalCycle) -> ControlFlow<()>,
{
    bounds.validate()?;

    let components = cyclic_components(graph);
    let keep: HashSet<NodeIndex> = components.iter().flatten().copied().collect();
    let adjacency = AdjacencyIndex::build(graph, &keep);

    let mode = match bounds.max_combo {
        Some(max_combo) => SearchMode::StructuralFirst { max_combo },
        None => SearchMode::ExactExpansion,
    };
    let mut budget = EmissionBudget::new(bounds.max_cycles);

    for component in &components {
        for &start in component {
            if budget.exhausted() {
                return Ok(());
            }
            let mut search = CycleSearch {
                adjacency: &adjacency,
                mode,
                bounds,
                start,
                path: vec![start],
                windows: Vec::new(),
                on_path: HashSet::from([start]),
                blocked: HashSet::new(),
                blocked_deps: HashMap::new(),
            };
            if search.explore(start, None, &mut budget, &mut sink).is_break() {
                return Ok(());
            }
        }
    }

    Ok(())
}
