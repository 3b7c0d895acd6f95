//! Store statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters describing the current graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub subjects: usize,
    pub attributes: usize,
    pub associations: usize,
    pub edges: usize,
    pub edges_visible: bool,
    /// Accepted observations, duplicates included.
    pub observations: u64,
    pub last_mutation_at: Option<DateTime<Utc>>,
}

impl std::fmt::Display for GraphStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GraphStats {{ subjects: {}, attributes: {}, associations: {}, edges: {} ({}), observations: {} }}",
            self.subjects,
            self.attributes,
            self.associations,
            self.edges,
            if self.edges_visible { "visible" } else { "hidden" },
            self.observations,
        )
    }
}
