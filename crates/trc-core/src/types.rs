/// Scalar types shared across the crate.
///
/// Timestamps are the only scalar the engine cares about. They are opaque
/// discrete instants: the enumeration algorithms compare and subtract them
/// but never interpret them as wall-clock values.

/// A discrete edge-observation time (millisecond scale in the upstream data
/// feeds, but any consistent integer unit works).
///
/// Durations (`latest − earliest` within one cycle) use the same unit.
pub type Timestamp = i64;
