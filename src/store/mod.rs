//! # Graph Store
//!
//! Canonical state of the leaf/feature graph: subject and attribute nodes,
//! the subject → attributes associations, and the materialized edge set.
//!
//! Order-significant data lives in `Vec`s (creation order); the hashbrown
//! maps are lookup indexes only, so nothing observable depends on hash
//! iteration order.
//!
//! ## Limitations
//!
//! - **Append-only**: nodes and associations are never deleted.
//! - **Single writer**: every mutation takes `&mut self`. Use
//!   [`SharedLeafGraph`](crate::SharedLeafGraph) when several producers
//!   submit observations.
//! - **Memory only**: nothing is persisted.

pub mod stats;

use chrono::{DateTime, Utc};
use hashbrown::{HashMap, HashSet};

use crate::layout::{LayoutConfig, LayoutStrategy, RingLayout};
use crate::model::*;
use crate::visibility::VisibilityController;
use crate::Result;

pub use stats::GraphStats;

// ============================================================================
// ObservationOutcome
// ============================================================================

/// What a single `add_observation` call changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationOutcome {
    pub subject: NodeId,
    /// The subject's full attribute list after the call, first-seen order.
    pub attributes: Vec<String>,
    pub created_subject: bool,
    pub created_attributes: Vec<NodeId>,
    pub new_associations: usize,
    pub new_edges: usize,
}

impl ObservationOutcome {
    /// True if the call created at least one node.
    pub fn created_any_node(&self) -> bool {
        self.created_subject || !self.created_attributes.is_empty()
    }
}

// ============================================================================
// GraphStore
// ============================================================================

/// In-memory bipartite graph store.
pub struct GraphStore<L: LayoutStrategy = RingLayout> {
    /// All nodes; `NodeId(n)` lives at index `n - 1`.
    nodes: Vec<NodeRecord>,
    subjects: Vec<NodeId>,
    attributes: Vec<NodeId>,
    subject_index: HashMap<String, NodeId>,
    attribute_index: HashMap<String, NodeId>,
    /// subject → attribute ids, first-seen order
    associations: HashMap<NodeId, Vec<NodeId>>,
    association_pairs: HashSet<(NodeId, NodeId)>,
    visibility: VisibilityController,
    layout: L,
    dirty: bool,
    observations: u64,
    last_mutation_at: Option<DateTime<Utc>>,
}

impl GraphStore<RingLayout> {
    /// Store with the default ring layout and hidden edges.
    pub fn new() -> Self {
        Self::with_layout(RingLayout::default(), false)
    }

    pub fn from_config(config: LayoutConfig, edges_visible: bool) -> Self {
        Self::with_layout(RingLayout::new(config), edges_visible)
    }
}

impl Default for GraphStore<RingLayout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: LayoutStrategy> GraphStore<L> {
    pub fn with_layout(layout: L, edges_visible: bool) -> Self {
        Self {
            nodes: Vec::new(),
            subjects: Vec::new(),
            attributes: Vec::new(),
            subject_index: HashMap::new(),
            attribute_index: HashMap::new(),
            associations: HashMap::new(),
            association_pairs: HashSet::new(),
            visibility: VisibilityController::new(edges_visible),
            layout,
            dirty: false,
            observations: 0,
            last_mutation_at: None,
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Merge one observation into the graph.
    ///
    /// Validation runs before anything is touched, so a rejected call leaves
    /// the store exactly as it was.
    pub fn add_observation<S: AsRef<str>>(
        &mut self,
        subject: &str,
        attributes: &[S],
    ) -> Result<ObservationOutcome> {
        if let Err(err) = validate_parts(subject, attributes) {
            tracing::debug!(subject, error = %err, "observation rejected");
            return Err(err);
        }

        let (subject_id, created_subject) = match self.subject_index.get(subject).copied() {
            Some(id) => (id, false),
            None => (self.create_node(NodeKind::Subject, subject), true),
        };

        let mut created_attributes = Vec::new();
        let mut new_associations = 0;
        for name in attributes {
            let name = name.as_ref();
            let attribute_id = match self.attribute_index.get(name).copied() {
                Some(id) => id,
                None => {
                    let id = self.create_node(NodeKind::Attribute, name);
                    created_attributes.push(id);
                    id
                }
            };
            if self.association_pairs.insert((subject_id, attribute_id)) {
                self.associations.entry(subject_id).or_default().push(attribute_id);
                new_associations += 1;
            }
        }

        let mut new_edges = 0;
        if self.visibility.is_visible() {
            let linked = self.associations.get(&subject_id).map(Vec::as_slice).unwrap_or(&[]);
            for &attribute_id in linked {
                if self.visibility.connect(subject_id, attribute_id).is_some() {
                    new_edges += 1;
                }
            }
        }

        self.observations += 1;
        self.touch();

        tracing::debug!(
            subject,
            %subject_id,
            created_subject,
            created_attributes = created_attributes.len(),
            new_associations,
            new_edges,
            "observation accepted"
        );

        Ok(ObservationOutcome {
            subject: subject_id,
            attributes: self.attributes_of(subject).into_iter().map(String::from).collect(),
            created_subject,
            created_attributes,
            new_associations,
            new_edges,
        })
    }

    fn create_node(&mut self, kind: NodeKind, label: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u64 + 1);
        let position = match kind {
            NodeKind::Subject => self.layout.place_subject(label),
            NodeKind::Attribute => self.layout.place_attribute(label),
        };
        let size = self.layout.size_of(kind, label);

        self.nodes.push(NodeRecord {
            id,
            kind,
            label: label.to_string(),
            position,
            size,
        });
        match kind {
            NodeKind::Subject => {
                self.subjects.push(id);
                self.subject_index.insert(label.to_string(), id);
            }
            NodeKind::Attribute => {
                self.attributes.push(id);
                self.attribute_index.insert(label.to_string(), id);
            }
        }

        tracing::debug!(%id, %kind, label, x = position.x, y = position.y, "node created");
        id
    }

    fn touch(&mut self) {
        self.dirty = true;
        self.last_mutation_at = Some(Utc::now());
    }

    // ========================================================================
    // Edge visibility
    // ========================================================================

    pub fn edges_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    /// Drop every edge, keeping associations. Returns how many were removed.
    pub fn hide_edges(&mut self) -> usize {
        if !self.visibility.is_visible() {
            return 0;
        }
        let removed = self.visibility.hide();
        self.touch();
        removed
    }

    /// Rebuild edges from associations in subject creation order.
    /// Returns how many were created.
    pub fn show_edges(&mut self) -> usize {
        if self.visibility.is_visible() {
            return 0;
        }
        let associations = &self.associations;
        let view = self.subjects.iter().map(|s| {
            (*s, associations.get(s).map(Vec::as_slice).unwrap_or(&[]))
        });
        let created = self.visibility.show(view);
        self.touch();
        created
    }

    /// Flip edge visibility. Returns the new state.
    pub fn toggle_edges(&mut self) -> bool {
        let associations = &self.associations;
        let view = self.subjects.iter().map(|s| {
            (*s, associations.get(s).map(Vec::as_slice).unwrap_or(&[]))
        });
        let visible = self.visibility.toggle(view);
        self.touch();
        visible
    }

    pub fn edges(&self) -> &[Edge] {
        self.visibility.edges()
    }

    pub fn visibility(&self) -> &VisibilityController {
        &self.visibility
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn has_any_data(&self) -> bool {
        !self.subjects.is_empty()
    }

    /// Attribute names of a subject in first-seen order. Empty if unknown.
    pub fn attributes_of(&self, subject: &str) -> Vec<&str> {
        self.subject_id(subject)
            .map(|id| self.labels(self.attribute_ids_of(id)))
            .unwrap_or_default()
    }

    /// Subject names carrying an attribute, in subject creation order.
    pub fn subjects_with(&self, attribute: &str) -> Vec<&str> {
        self.attribute_id(attribute)
            .map(|id| self.labels(&self.subject_ids_with(id)))
            .unwrap_or_default()
    }

    pub fn attribute_ids_of(&self, subject: NodeId) -> &[NodeId] {
        self.associations.get(&subject).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn subject_ids_with(&self, attribute: NodeId) -> Vec<NodeId> {
        self.subjects
            .iter()
            .copied()
            .filter(|s| self.is_associated(*s, attribute))
            .collect()
    }

    pub fn is_associated(&self, subject: NodeId, attribute: NodeId) -> bool {
        self.association_pairs.contains(&(subject, attribute))
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeRecord> {
        let index = usize::try_from(id.0).ok()?.checked_sub(1)?;
        self.nodes.get(index)
    }

    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.label.as_str())
    }

    /// Labels for a list of ids, skipping unknown ones.
    pub fn labels(&self, ids: &[NodeId]) -> Vec<&str> {
        ids.iter().filter_map(|id| self.label(*id)).collect()
    }

    /// Every node in creation order.
    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    pub fn subject_ids(&self) -> &[NodeId] {
        &self.subjects
    }

    pub fn attribute_ids(&self) -> &[NodeId] {
        &self.attributes
    }

    pub fn subject_id(&self, name: &str) -> Option<NodeId> {
        self.subject_index.get(name).copied()
    }

    pub fn attribute_id(&self, name: &str) -> Option<NodeId> {
        self.attribute_index.get(name).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.visibility.edge_count()
    }

    pub fn association_count(&self) -> usize {
        self.association_pairs.len()
    }

    // ========================================================================
    // Render cache bookkeeping
    // ========================================================================

    /// True when the graph changed since the last `mark_rendered`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_rendered(&mut self) {
        self.dirty = false;
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            subjects: self.subjects.len(),
            attributes: self.attributes.len(),
            associations: self.association_pairs.len(),
            edges: self.visibility.edge_count(),
            edges_visible: self.visibility.is_visible(),
            observations: self.observations,
            last_mutation_at: self.last_mutation_at,
        }
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }
}

// ============================================================================
// Tests
// ============================================================================
