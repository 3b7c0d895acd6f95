//! Edge visibility.
//!
//! Associations are the source of truth and are never touched here. This
//! controller only owns the materialized edge set, so hiding drops every
//! edge and showing rebuilds them from the associations it is handed.
//!
//! Invariant: while visible there is exactly one edge per associated
//! (subject, attribute) pair; while hidden there are none.

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::model::{Edge, EdgeId, NodeId};

/// Edge ids created for one subject, in creation order.
pub type SubjectEdges = SmallVec<[EdgeId; 8]>;

pub struct VisibilityController {
    visible: bool,
    /// Current edges, in creation order.
    edges: Vec<Edge>,
    pairs: HashSet<(NodeId, NodeId)>,
    by_subject: HashMap<NodeId, SubjectEdges>,
    next_edge_id: u64,
}

impl VisibilityController {
    pub fn new(visible: bool) -> Self {
        Self {
            visible,
            edges: Vec::new(),
            pairs: HashSet::new(),
            by_subject: HashMap::new(),
            next_edge_id: 1,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges recorded for a subject while visible. Empty when hidden.
    pub fn edges_of(&self, subject: NodeId) -> &[EdgeId] {
        self.by_subject.get(&subject).map(|ids| ids.as_slice()).unwrap_or(&[])
    }

    /// Materialize the edge for one pair.
    ///
    /// Returns `None` when hidden or when the pair already has an edge.
    pub fn connect(&mut self, subject: NodeId, attribute: NodeId) -> Option<EdgeId> {
        if !self.visible || !self.pairs.insert((subject, attribute)) {
            return None;
        }
        let id = EdgeId(self.next_edge_id);
        self.next_edge_id += 1;
        self.edges.push(Edge::new(id, subject, attribute));
        self.by_subject.entry(subject).or_default().push(id);
        Some(id)
    }

    /// Remove every edge. Returns how many were removed; no-op when hidden.
    pub fn hide(&mut self) -> usize {
        if !self.visible {
            return 0;
        }
        let removed = self.edges.len();
        self.edges.clear();
        self.pairs.clear();
        self.by_subject.clear();
        self.visible = false;
        tracing::debug!(removed, "edges hidden");
        removed
    }

    /// Rebuild edges from `associations` (subject, ordered attributes),
    /// visited in the order given. Returns how many edges were created;
    /// no-op when already visible.
    pub fn show<'a, I>(&mut self, associations: I) -> usize
    where
        I: IntoIterator<Item = (NodeId, &'a [NodeId])>,
    {
        if self.visible {
            return 0;
        }
        self.visible = true;
        let mut created = 0;
        for (subject, attributes) in associations {
            for &attribute in attributes {
                if self.connect(subject, attribute).is_some() {
                    created += 1;
                }
            }
        }
        tracing::debug!(created, "edges shown");
        created
    }

    /// Flip visibility. Returns the new state.
    pub fn toggle<'a, I>(&mut self, associations: I) -> bool
    where
        I: IntoIterator<Item = (NodeId, &'a [NodeId])>,
    {
        if self.visible {
            self.hide();
        } else {
            self.show(associations);
        }
        self.visible
    }

    /// Edge pairs as a set, for comparisons.
    pub fn pair_set(&self) -> std::collections::BTreeSet<(NodeId, NodeId)> {
        self.edges.iter().map(Edge::pair).collect()
    }
}

impl Default for VisibilityController {
    fn default() -> Self {
        Self::new(false)
    }
}

// ============================================================================
// Tests
// ============================================================================
