//! Observation — one validated `{subject, attributes[]}` record.
//!
//! Records arrive already decoded from the inference collaborator. The serde
//! aliases accept that collaborator's field names (`leaf_type`, `features`)
//! so a decoded JSON object maps straight onto this type.

use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// An incoming observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(alias = "leaf_type")]
    pub subject: String,
    #[serde(alias = "features")]
    pub attributes: Vec<String>,
}

impl Observation {
    pub fn new(
        subject: impl Into<String>,
        attributes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            subject: subject.into(),
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }

    /// Check this record before it touches the graph.
    pub fn validate(&self) -> Result<()> {
        validate_parts(&self.subject, &self.attributes)
    }
}

/// Reject an observation with an empty subject, no attributes, or a blank
/// attribute name. Whitespace-only names count as empty.
pub fn validate_parts<S: AsRef<str>>(subject: &str, attributes: &[S]) -> Result<()> {
    if subject.trim().is_empty() {
        return Err(Error::InvalidObservation("subject name is empty".into()));
    }
    if attributes.is_empty() {
        return Err(Error::InvalidObservation(format!(
            "observation for '{subject}' has no attributes"
        )));
    }
    if let Some(pos) = attributes.iter().position(|a| a.as_ref().trim().is_empty()) {
        return Err(Error::InvalidObservation(format!(
            "attribute #{pos} of '{subject}' is empty"
        )));
    }
    Ok(())
}
