//! Node records in the leaf/feature graph.

use serde::{Deserialize, Serialize};

/// Opaque node identifier.
///
/// Allocated in creation order starting at 1 and never reused: nodes live
/// for the lifetime of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which side of the bipartite graph a node sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A leaf type reported by an observation.
    Subject,
    /// A feature shared across subjects.
    Attribute,
}

impl NodeKind {
    pub fn other(self) -> Self {
        match self {
            NodeKind::Subject => NodeKind::Attribute,
            NodeKind::Attribute => NodeKind::Subject,
        }
    }

    /// Style a node of this kind carries when nothing highlights it.
    pub fn default_style(self) -> NodeStyle {
        match self {
            NodeKind::Subject => NodeStyle::SubjectDefault,
            NodeKind::Attribute => NodeStyle::AttributeDefault,
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Subject => f.write_str("subject"),
            NodeKind::Attribute => f.write_str("attribute"),
        }
    }
}

/// Render style tag. Serializes to `subject-default`, `attribute-default`
/// and `highlighted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeStyle {
    SubjectDefault,
    AttributeDefault,
    Highlighted,
}

impl NodeStyle {
    pub fn tag(self) -> &'static str {
        match self {
            NodeStyle::SubjectDefault => "subject-default",
            NodeStyle::AttributeDefault => "attribute-default",
            NodeStyle::Highlighted => "highlighted",
        }
    }
}

/// A point on the layout plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Width and height of a node's box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// A node in the graph.
///
/// Records are immutable once created: the position is assigned by the
/// layout exactly once and highlighting lives in a separate overlay.
/// `position` is the center of the node's box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub kind: NodeKind,
    pub label: String,
    pub position: Position,
    pub size: Size,
}
