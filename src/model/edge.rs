//! Edge between a subject and one of its attributes.

use serde::{Deserialize, Serialize};
use super::NodeId;

/// Opaque edge identifier. A restored edge gets a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Render-time materialization of one association.
///
/// Edges are unordered pairs; `subject` and `attribute` name the two sides
/// of the bipartite graph, not a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub subject: NodeId,
    pub attribute: NodeId,
}

impl Edge {
    pub fn new(id: EdgeId, subject: NodeId, attribute: NodeId) -> Self {
        Self { id, subject, attribute }
    }

    pub fn pair(&self) -> (NodeId, NodeId) {
        (self.subject, self.attribute)
    }
}
