//! Structured query results handed to the result surface.
//!
//! The core never formats these for display.

use serde::{Deserialize, Serialize};

/// The subject most similar to a selected one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Similarity {
    pub subject: String,
    pub common_count: usize,
    /// The shared attributes, in the selected subject's order.
    pub shared: Vec<String>,
}

/// Outcome of the latest selection change.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryResult {
    /// Nothing is selected.
    #[default]
    NoSelection,
    /// One subject selected: its attributes and its closest neighbour.
    SubjectDetail {
        name: String,
        attributes: Vec<String>,
        most_similar: Option<Similarity>,
    },
    /// Several subjects selected: the attributes they all share.
    /// An empty list means "none in common".
    CommonAttributes {
        subjects: Vec<String>,
        attributes: Vec<String>,
    },
    /// One or more attributes selected: subjects carrying all of them.
    MatchingSubjects {
        query_attributes: Vec<String>,
        subjects: Vec<String>,
    },
}

impl QueryResult {
    pub fn is_no_selection(&self) -> bool {
        matches!(self, QueryResult::NoSelection)
    }

    /// Convenience accessor for the most-similar subject and its count.
    pub fn most_similar(&self) -> Option<(&str, usize)> {
        match self {
            QueryResult::SubjectDetail { most_similar: Some(sim), .. } => {
                Some((sim.subject.as_str(), sim.common_count))
            }
            _ => None,
        }
    }
}
