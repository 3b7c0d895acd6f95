//! Shared handle for several producers.
//!
//! Every mutation holds the write lock for the whole operation, and
//! `render_model()` snapshots under the read lock, so a reader never sees a
//! half-applied observation.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::layout::{LayoutStrategy, RingLayout};
use crate::model::NodeId;
use crate::render::RenderModel;
use crate::selection::QueryResult;
use crate::store::{GraphStats, ObservationOutcome};
use crate::{GraphConfig, LeafGraph, Result};

/// Cheaply clonable, thread-safe wrapper around a [`LeafGraph`].
pub struct SharedLeafGraph<L: LayoutStrategy = RingLayout> {
    inner: Arc<RwLock<LeafGraph<L>>>,
}

impl<L: LayoutStrategy> Clone for SharedLeafGraph<L> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl SharedLeafGraph<RingLayout> {
    pub fn with_config(config: GraphConfig) -> Self {
        Self::from_graph(LeafGraph::with_config(config))
    }
}

impl Default for SharedLeafGraph<RingLayout> {
    fn default() -> Self {
        Self::from_graph(LeafGraph::new())
    }
}

impl<L: LayoutStrategy> SharedLeafGraph<L> {
    pub fn from_graph(graph: LeafGraph<L>) -> Self {
        Self { inner: Arc::new(RwLock::new(graph)) }
    }

    pub fn submit_observation<S: AsRef<str>>(
        &self,
        subject: &str,
        attributes: &[S],
    ) -> Result<ObservationOutcome> {
        self.inner.write().submit_observation(subject, attributes)
    }

    pub fn handle_node_click(&self, node: NodeId, multi_select: bool) -> Result<QueryResult> {
        self.inner.write().handle_node_click(node, multi_select).cloned()
    }

    pub fn toggle_edge_visibility(&self) -> bool {
        self.inner.write().toggle_edge_visibility()
    }

    pub fn reset_selection(&self) {
        self.inner.write().reset_selection();
    }

    pub fn render_model(&self) -> RenderModel {
        self.inner.read().render_model()
    }

    pub fn last_query_result(&self) -> QueryResult {
        self.inner.read().last_query_result().clone()
    }

    pub fn stats(&self) -> GraphStats {
        self.inner.read().stats()
    }

    /// Hold the read lock for several consistent reads.
    pub fn read(&self) -> RwLockReadGuard<'_, LeafGraph<L>> {
        self.inner.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_producers_keep_invariants() {
        let shared = SharedLeafGraph::with_config(GraphConfig {
            edges_visible_on_start: true,
            ..GraphConfig::default()
        });

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        let subject = format!("leaf-{}", i % 5);
                        let attrs = [format!("f-{}", (i + t) % 7), "common".to_string()];
                        shared.submit_observation(&subject, &attrs).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let graph = shared.read();
        let store = graph.store();
        assert_eq!(store.subject_ids().len(), 5);
        assert_eq!(store.attribute_ids().len(), 8);
        assert_eq!(store.edge_count(), store.association_count());
        assert_eq!(graph.stats().observations, 100);
        for &s in store.subject_ids() {
            let attrs = store.attribute_ids_of(s);
            let unique: std::collections::HashSet<_> = attrs.iter().collect();
            assert_eq!(unique.len(), attrs.len());
        }
    }

    #[test]
    fn test_click_through_shared_handle() {
        let shared = SharedLeafGraph::default();
        shared.submit_observation("Oak", &["serrated"]).unwrap();
        let oak = shared.read().store().subject_id("Oak").unwrap();
        let result = shared.handle_node_click(oak, false).unwrap();
        assert_eq!(result, shared.last_query_result());
        assert!(shared.handle_node_click(NodeId(42), false).is_err());
    }
}
