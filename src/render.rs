//! Render model: a consistent snapshot for the drawing collaborator.
//!
//! Built from the store's immutable records plus the selection overlay.
//! Taking a snapshot never mutates anything.

use serde::{Deserialize, Serialize};

use crate::layout::LayoutStrategy;
use crate::model::{EdgeId, NodeId, NodeKind, NodeRecord, NodeStyle, Position, Size};
use crate::selection::StyleOverlay;
use crate::store::GraphStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    pub id: NodeId,
    pub label: String,
    pub kind: NodeKind,
    pub position: Position,
    pub size: Size,
    pub style: NodeStyle,
}

impl RenderNode {
    fn from_record(record: &NodeRecord, overlay: &StyleOverlay) -> Self {
        Self {
            id: record.id,
            label: record.label.clone(),
            kind: record.kind,
            position: record.position,
            size: record.size,
            style: overlay.style_for(record),
        }
    }

    /// True if `(x, y)` falls inside this node's box.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (x - self.position.x).abs() <= self.size.width / 2.0
            && (y - self.position.y).abs() <= self.size.height / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
}

/// Nodes in creation order and the currently materialized edges.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderModel {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
    pub edges_visible: bool,
}

impl RenderModel {
    pub fn build<L: LayoutStrategy>(store: &GraphStore<L>, overlay: &StyleOverlay) -> Self {
        Self {
            nodes: store
                .nodes()
                .iter()
                .map(|n| RenderNode::from_record(n, overlay))
                .collect(),
            edges: store
                .edges()
                .iter()
                .map(|e| RenderEdge { id: e.id, source: e.subject, target: e.attribute })
                .collect(),
            edges_visible: store.edges_visible(),
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&RenderNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Node under a point. Later nodes are drawn on top, so the most
    /// recently created hit wins.
    pub fn node_at(&self, x: f64, y: f64) -> Option<NodeId> {
        self.nodes.iter().rev().find(|n| n.contains(x, y)).map(|n| n.id)
    }

    pub fn highlighted(&self) -> impl Iterator<Item = &RenderNode> {
        self.nodes.iter().filter(|n| n.style == NodeStyle::Highlighted)
    }

    /// Edge endpoint pairs, sorted, for set comparisons.
    pub fn edge_pairs(&self) -> Vec<(NodeId, NodeId)> {
        let mut pairs: Vec<_> = self.edges.iter().map(|e| (e.source, e.target)).collect();
        pairs.sort_unstable();
        pairs
    }
}
