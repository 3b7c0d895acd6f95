//! # leafgraph — Incremental Leaf/Feature Association Graph
//!
//! Builds a bipartite graph of leaf types ("subjects") and the features
//! ("attributes") observed on them, one observation at a time, and answers
//! interactive structural queries: which subject is most similar, which
//! features a group of subjects shares, which subjects carry a set of
//! features.
//!
//! ## Design Principles
//!
//! 1. **Append-only**: nodes are created once, positioned once, never moved or deleted
//! 2. **Associations are truth**: edges are a render-time view that can be hidden and rebuilt
//! 3. **Overlay styling**: highlights live beside the node records, never inside them
//! 4. **Deterministic output**: every observable order is creation order or an explicit rule
//!
//! ## Quick Start
//!
//! ```rust
//! use leafgraph::LeafGraph;
//!
//! # fn example() -> leafgraph::Result<()> {
//! let mut graph = LeafGraph::new();
//! graph.submit_observation("Oak", &["serrated", "green"])?;
//! graph.submit_observation("Maple", &["serrated", "red"])?;
//!
//! let oak = graph.store().subject_id("Oak").unwrap();
//! graph.handle_node_click(oak, false)?;
//! assert_eq!(graph.last_query_result().most_similar(), Some(("Maple", 1)));
//!
//! let model = graph.render_model();
//! assert_eq!(model.nodes.len(), 5);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Components
//!
//! | Component | Module | Description |
//! |-----------|--------|-------------|
//! | `GraphStore` | `store` | Nodes, associations, edges |
//! | `RingLayout` | `layout` | Position assignment at creation time |
//! | `VisibilityController` | `visibility` | Hide / rebuild edges |
//! | `SelectionEngine` | `selection` | Clicks → highlight set + query result |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod store;
pub mod layout;
pub mod visibility;
pub mod selection;
pub mod render;
pub mod shared;
pub mod export;

use serde::{Deserialize, Serialize};

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{
    Edge, EdgeId, NodeId, NodeKind, NodeRecord, NodeStyle, Observation, Position, Size,
};
pub use store::{GraphStats, GraphStore, ObservationOutcome};
pub use layout::{AttributePlacement, LayoutConfig, LayoutStrategy, RingLayout, SubjectSlots};
pub use visibility::VisibilityController;
pub use selection::{QueryResult, SelectionEngine, SelectionMode, Similarity, StyleOverlay};
pub use render::{RenderEdge, RenderModel, RenderNode};
pub use shared::SharedLeafGraph;

// ============================================================================
// Configuration
// ============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub layout: LayoutConfig,
    /// Whether edges are materialized from the start.
    pub edges_visible_on_start: bool,
    /// Clear the selection whenever an observation is accepted. When false
    /// the selection is kept and re-evaluated against the new data.
    pub reset_selection_on_observation: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            edges_visible_on_start: false,
            reset_selection_on_observation: true,
        }
    }
}

// ============================================================================
// Top-level LeafGraph handle
// ============================================================================

/// The primary entry point. Owns the store and the selection engine and
/// exposes the inbound/outbound contracts used by the UI collaborators.
pub struct LeafGraph<L: LayoutStrategy = RingLayout> {
    store: GraphStore<L>,
    selection: SelectionEngine,
    reset_selection_on_observation: bool,
}

impl LeafGraph<RingLayout> {
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        let reset = config.reset_selection_on_observation;
        let store = GraphStore::from_config(config.layout, config.edges_visible_on_start);
        Self::from_parts(store, reset)
    }
}

impl Default for LeafGraph<RingLayout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: LayoutStrategy> LeafGraph<L> {
    /// Graph with a caller-supplied layout strategy.
    pub fn with_layout(layout: L, config: &GraphConfig) -> Self {
        let store = GraphStore::with_layout(layout, config.edges_visible_on_start);
        Self::from_parts(store, config.reset_selection_on_observation)
    }

    fn from_parts(store: GraphStore<L>, reset_selection_on_observation: bool) -> Self {
        Self {
            store,
            selection: SelectionEngine::new(),
            reset_selection_on_observation,
        }
    }

    // ========================================================================
    // Inbound
    // ========================================================================

    /// Merge a validated observation into the graph.
    pub fn submit_observation<S: AsRef<str>>(
        &mut self,
        subject: &str,
        attributes: &[S],
    ) -> Result<ObservationOutcome> {
        let outcome = self.store.add_observation(subject, attributes)?;
        if self.reset_selection_on_observation {
            self.selection.reset();
        } else {
            self.selection.refresh(&self.store);
        }
        Ok(outcome)
    }

    pub fn submit(&mut self, observation: &Observation) -> Result<ObservationOutcome> {
        self.submit_observation(&observation.subject, observation.attributes.as_slice())
    }

    /// Apply a click already resolved to a node.
    ///
    /// An unknown id returns `Error::UnknownNodeReference` and changes nothing.
    pub fn handle_node_click(&mut self, node: NodeId, multi_select: bool) -> Result<&QueryResult> {
        self.selection.handle_click(&self.store, node, multi_select)
    }

    /// Flip edge visibility. Returns the new state.
    pub fn toggle_edge_visibility(&mut self) -> bool {
        let visible = self.store.toggle_edges();
        tracing::info!(visible, edges = self.store.edge_count(), "edge visibility toggled");
        visible
    }

    pub fn hide_edges(&mut self) -> usize {
        self.store.hide_edges()
    }

    pub fn show_edges(&mut self) -> usize {
        self.store.show_edges()
    }

    /// Clear the selection and every highlight.
    pub fn reset_selection(&mut self) {
        self.selection.reset();
    }

    // ========================================================================
    // Outbound
    // ========================================================================

    pub fn render_model(&self) -> RenderModel {
        RenderModel::build(&self.store, self.selection.overlay())
    }

    pub fn last_query_result(&self) -> &QueryResult {
        self.selection.last_result()
    }

    pub fn has_any_data(&self) -> bool {
        self.store.has_any_data()
    }

    pub fn attributes_of(&self, subject: &str) -> Vec<&str> {
        self.store.attributes_of(subject)
    }

    pub fn edges_visible(&self) -> bool {
        self.store.edges_visible()
    }

    /// True when the graph changed since the last `mark_rendered`.
    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    pub fn mark_rendered(&mut self) {
        self.store.mark_rendered();
    }

    pub fn stats(&self) -> GraphStats {
        self.store.stats()
    }

    /// Read access to the store (for advanced use).
    pub fn store(&self) -> &GraphStore<L> {
        &self.store
    }

    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid observation: {0}")]
    InvalidObservation(String),

    #[error("Unknown node reference: {0}")]
    UnknownNodeReference(NodeId),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
