//! # Leaf/Feature Graph Model
//!
//! Plain DTOs shared by the store, layout, selection and render layers.
//!
//! Design rule: this module is pure data. No layout math, no selection
//! state, no I/O.

pub mod node;
pub mod edge;
pub mod observation;

pub use node::{NodeId, NodeKind, NodeRecord, NodeStyle, Position, Size};
pub use edge::{Edge, EdgeId};
pub use observation::{Observation, validate_parts};
