//! # Selection & Queries
//!
//! Click-driven selection state machine. Every click rebuilds the highlight
//! overlay from scratch and recomputes the query result, so no stale
//! highlighting survives a selection change.
//!
//! ```text
//!            plain click (subject)          modifier click (subject)
//!  Empty ──────────────────────▶ SingleSubject ─────────────▶ MultiSubject
//!    │                                 │                          │
//!    │ plain click (attribute)         │ any click on attribute   │
//!    ▼                                 ▼ (starts fresh)           │
//!  SingleAttribute ◀───────────────────┴──────────────────────────┘
//!    │
//!    │ modifier click (attribute)
//!    ▼
//!  MultiAttribute
//! ```
//!
//! Symmetrically, any click on a subject while attributes are selected
//! starts a fresh `SingleSubject` selection.
//!
//! A modifier click only extends the selection when it is non-empty and of
//! the same kind; otherwise it behaves like a plain click.

pub mod query;
pub mod result;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::layout::LayoutStrategy;
use crate::model::{NodeId, NodeKind, NodeRecord, NodeStyle};
use crate::store::GraphStore;
use crate::{Error, Result};

pub use result::{QueryResult, Similarity};

// ============================================================================
// SelectionMode
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    #[default]
    Empty,
    SingleSubject,
    MultiSubject,
    SingleAttribute,
    MultiAttribute,
}

impl SelectionMode {
    /// Mode for a non-empty selection of `len` nodes of one kind.
    pub fn for_selection(kind: NodeKind, len: usize) -> Self {
        match (kind, len) {
            (_, 0) => SelectionMode::Empty,
            (NodeKind::Subject, 1) => SelectionMode::SingleSubject,
            (NodeKind::Subject, _) => SelectionMode::MultiSubject,
            (NodeKind::Attribute, 1) => SelectionMode::SingleAttribute,
            (NodeKind::Attribute, _) => SelectionMode::MultiAttribute,
        }
    }

    /// Kind of node currently selected, if any.
    pub fn kind(self) -> Option<NodeKind> {
        match self {
            SelectionMode::Empty => None,
            SelectionMode::SingleSubject | SelectionMode::MultiSubject => Some(NodeKind::Subject),
            SelectionMode::SingleAttribute | SelectionMode::MultiAttribute => Some(NodeKind::Attribute),
        }
    }
}

// ============================================================================
// StyleOverlay
// ============================================================================

/// Highlight state kept apart from the immutable node records.
#[derive(Debug, Clone, Default)]
pub struct StyleOverlay {
    highlighted: HashSet<NodeId>,
}

impl StyleOverlay {
    pub fn clear(&mut self) {
        self.highlighted.clear();
    }

    pub fn highlight(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        self.highlighted.extend(ids);
    }

    pub fn is_highlighted(&self, id: NodeId) -> bool {
        self.highlighted.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.highlighted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.highlighted.is_empty()
    }

    /// Effective style for a node.
    pub fn style_for(&self, node: &NodeRecord) -> NodeStyle {
        if self.is_highlighted(node.id) {
            NodeStyle::Highlighted
        } else {
            node.kind.default_style()
        }
    }
}

// ============================================================================
// SelectionEngine
// ============================================================================

/// Currently selected node ids, in click order.
pub type Selection = SmallVec<[NodeId; 4]>;

#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    selected: Selection,
    mode: SelectionMode,
    overlay: StyleOverlay,
    last_result: QueryResult,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a resolved node click.
    ///
    /// Unknown ids yield `Error::UnknownNodeReference` and leave the
    /// selection, overlay and last result untouched.
    pub fn handle_click<L: LayoutStrategy>(
        &mut self,
        store: &GraphStore<L>,
        node: NodeId,
        multi: bool,
    ) -> Result<&QueryResult> {
        let Some(record) = store.node(node) else {
            tracing::debug!(%node, "click on unknown node ignored");
            return Err(Error::UnknownNodeReference(node));
        };
        let kind = record.kind;

        let extend = multi && self.mode.kind() == Some(kind);
        if !extend {
            self.selected.clear();
        }
        if !self.selected.contains(&node) {
            self.selected.push(node);
        }
        self.mode = SelectionMode::for_selection(kind, self.selected.len());

        tracing::debug!(%node, multi, extend, mode = ?self.mode, selected = self.selected.len(), "selection changed");
        self.refresh(store);
        Ok(&self.last_result)
    }

    /// Recompute highlight and result for the current selection against
    /// the store's current contents.
    pub fn refresh<L: LayoutStrategy>(&mut self, store: &GraphStore<L>) {
        self.overlay.clear();
        let (result, highlight) = evaluate(store, self.mode, &self.selected);
        self.overlay.highlight(highlight);
        self.last_result = result;
    }

    /// Drop the selection and every highlight.
    pub fn reset(&mut self) {
        self.selected.clear();
        self.mode = SelectionMode::Empty;
        self.overlay.clear();
        self.last_result = QueryResult::NoSelection;
    }

    pub fn selection(&self) -> &[NodeId] {
        &self.selected
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn overlay(&self) -> &StyleOverlay {
        &self.overlay
    }

    pub fn last_result(&self) -> &QueryResult {
        &self.last_result
    }
}

/// Result and highlight set for a selection.
fn evaluate<L: LayoutStrategy>(
    store: &GraphStore<L>,
    mode: SelectionMode,
    selected: &[NodeId],
) -> (QueryResult, Vec<NodeId>) {
    let owned = |ids: &[NodeId]| -> Vec<String> {
        store.labels(ids).into_iter().map(String::from).collect()
    };

    match mode {
        SelectionMode::Empty => (QueryResult::NoSelection, Vec::new()),

        SelectionMode::SingleSubject => {
            let Some(&subject) = selected.first() else {
                return (QueryResult::NoSelection, Vec::new());
            };
            let attributes = store.attribute_ids_of(subject).to_vec();
            let most_similar = query::most_similar(store, subject).map(|(other, count)| Similarity {
                subject: store.label(other).unwrap_or_default().to_string(),
                common_count: count,
                shared: owned(&query::shared_attributes(store, subject, other)),
            });
            let result = QueryResult::SubjectDetail {
                name: store.label(subject).unwrap_or_default().to_string(),
                attributes: owned(&attributes),
                most_similar,
            };
            (result, attributes)
        }

        SelectionMode::MultiSubject => {
            let common = query::common_attributes(store, selected);
            let result = QueryResult::CommonAttributes {
                subjects: owned(selected),
                attributes: owned(&common),
            };
            (result, common)
        }

        SelectionMode::SingleAttribute | SelectionMode::MultiAttribute => {
            let subjects = query::matching_subjects(store, selected);
            let result = QueryResult::MatchingSubjects {
                query_attributes: owned(selected),
                subjects: owned(&subjects),
            };
            (result, subjects)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
