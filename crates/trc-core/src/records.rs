/// Serde-facing observation records for bulk graph construction.
///
/// An [`EdgeRecord`] is one directed edge together with every time it was
/// observed. Records are the interchange form for building a
/// [`TemporalGraph`](crate::graph::TemporalGraph) from exported interaction
/// logs; see [`TemporalGraph::from_records`](crate::graph::TemporalGraph::from_records).
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// One directed edge with its observed timestamp history.
///
/// `timestamps` may be unsorted and may contain duplicates: duplicates are
/// repeated observations of the same interaction, not errors, and collapse
/// into one traversal option when the search index is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Name of the node the interaction originated from.
    pub source: String,
    /// Name of the node the interaction was directed at.
    pub target: String,
    /// Times at which the interaction was observed.
    pub timestamps: Vec<Timestamp>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    /// Records deserialize from the plain JSON shape emitted by the
    /// observation exporters.
    #[test]
    fn test_record_from_json() {
        let record: EdgeRecord = serde_json::from_str(
            r#"{"source": "a", "target": "b", "timestamps": [30, 10, 10]}"#,
        )
        .expect("valid record JSON");
        assert_eq!(record.source, "a");
        assert_eq!(record.target, "b");
        assert_eq!(record.timestamps, vec![30, 10, 10]);
    }

    /// Serialization round-trips a record unchanged, including unsorted and
    /// duplicated timestamps.
    #[test]
    fn test_record_round_trip() {
        let record = EdgeRecord {
            source: "src".to_owned(),
            target: "dst".to_owned(),
            timestamps: vec![5, 1, 5],
        };
        let json = serde_json::to_string(&record).expect("serializes");
        let back: EdgeRecord = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, record);
    }
}
