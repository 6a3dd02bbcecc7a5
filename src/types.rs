// Shared types used across the timestamp and clock modules.

use std::fmt;

/// Causal relation between two timestamps.
///
/// Happens-before (`->`) follows three rules:
/// - on the same process, `A -> B` if `A` was stamped before `B` by the local clock,
/// - if process P1 sends message M to P2, `send(M) -> receive(M)`,
/// - transitivity: `A -> B` and `B -> C` give `A -> C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Relation {
    /// Timestamps are equal.
    Equal,
    /// The left timestamp is causally before the right one.
    HappensBefore,
    /// The left timestamp is causally after the right one.
    HappensAfter,
    /// Neither timestamp happens before the other.
    Concurrent,
}

impl Relation {
    /// Returns the relation seen from the other side, so that
    /// `a.compare(b) == b.compare(a).reverse()`.
    pub fn reverse(self) -> Relation {
        match self {
            Relation::HappensBefore => Relation::HappensAfter,
            Relation::HappensAfter => Relation::HappensBefore,
            other => other,
        }
    }
}

/// Opaque, stable identifier of a process in a dynamic vector.
///
/// Assignment and discovery of ids happen outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ProcessId(String);

impl ProcessId {
    pub fn new(id: impl Into<String>) -> Self {
        ProcessId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProcessId {
    fn from(id: &str) -> Self {
        ProcessId(id.to_owned())
    }
}

impl From<String> for ProcessId {
    fn from(id: String) -> Self {
        ProcessId(id)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_reverse() {
        assert_eq!(Relation::HappensBefore.reverse(), Relation::HappensAfter);
        assert_eq!(Relation::HappensAfter.reverse(), Relation::HappensBefore);
        assert_eq!(Relation::Equal.reverse(), Relation::Equal);
        assert_eq!(Relation::Concurrent.reverse(), Relation::Concurrent);
    }

    #[test]
    fn test_process_id_serializes_as_string() {
        let id = ProcessId::from("node-a");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"node-a\"");
        let back: ProcessId = serde_json::from_str("\"node-a\"").unwrap();
        assert_eq!(back, id);
    }
}
