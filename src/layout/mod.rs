//! # Layout
//!
//! Append-only coordinate assignment. A node is placed exactly once, at
//! the moment the store creates it, and never moved afterwards.
//!
//! | Strategy | Module | Description |
//! |----------|--------|-------------|
//! | `RingLayout` | `ring` | Subjects on an outer ring, attributes in an inner disc |
//!
//! Anything implementing [`LayoutStrategy`] can be injected into a
//! [`GraphStore`](crate::store::GraphStore).

pub mod ring;

use serde::{Deserialize, Serialize};
use crate::model::{NodeKind, Position, Size};

pub use ring::RingLayout;

// ============================================================================
// Node geometry
// ============================================================================

pub const SUBJECT_MIN_WIDTH: f64 = 80.0;
pub const ATTRIBUTE_MIN_WIDTH: f64 = 100.0;
pub const PER_CHAR_WIDTH: f64 = 8.0;
pub const NODE_HEIGHT: f64 = 30.0;

/// Box size for a label: `max(min_width, chars * 8)` by 30.
pub fn node_size(kind: NodeKind, label: &str) -> Size {
    let min_width = match kind {
        NodeKind::Subject => SUBJECT_MIN_WIDTH,
        NodeKind::Attribute => ATTRIBUTE_MIN_WIDTH,
    };
    let text_width = label.chars().count() as f64 * PER_CHAR_WIDTH;
    Size { width: min_width.max(text_width), height: NODE_HEIGHT }
}

// ============================================================================
// Configuration
// ============================================================================

/// Default seed for the attribute grid shuffle and jitter.
pub const DEFAULT_SEED: u64 = 0x1EAF_6A7F;

/// How subject nodes pick their angle on the outer ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectSlots {
    /// `angle = 2π·k/n + π`. Slots repeat once more than `n` subjects exist,
    /// so later subjects land on top of earlier ones.
    Fixed(usize),
    /// `angle = π + k·φ` with φ the golden angle. Never repeats a slot.
    GoldenAngle,
}

/// How attribute nodes pick their offset inside the inner disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributePlacement {
    /// Consume one entry from each of two independently shuffled 11-value
    /// grids over [-1.0, 1.0]. Once exhausted every further attribute gets
    /// offset (0, 0) and only jitter separates them.
    ShuffledGrid,
    /// Golden-angle spiral growing outward from the origin. Never runs out of
    /// slots; growth stops one node height inside the subject ring, where
    /// later attributes keep circling at that radius.
    Spiral,
}

/// Layout parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub origin: Position,
    pub subject_radius: f64,
    pub attribute_radius: f64,
    /// Jitter amplitude as a fraction of the attribute radius. Clamped to 0.01.
    pub jitter_fraction: f64,
    /// RNG seed. `None` draws a fresh seed from the OS per run.
    pub seed: Option<u64>,
    pub subject_slots: SubjectSlots,
    pub attribute_placement: AttributePlacement,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin: Position::new(400.0, 300.0),
            subject_radius: 250.0,
            attribute_radius: 120.0,
            jitter_fraction: 0.01,
            seed: Some(DEFAULT_SEED),
            subject_slots: SubjectSlots::Fixed(7),
            attribute_placement: AttributePlacement::ShuffledGrid,
        }
    }
}

impl LayoutConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_subject_slots(mut self, slots: SubjectSlots) -> Self {
        self.subject_slots = slots;
        self
    }

    pub fn with_attribute_placement(mut self, placement: AttributePlacement) -> Self {
        self.attribute_placement = placement;
        self
    }
}

// ============================================================================
// LayoutStrategy Trait
// ============================================================================

/// Contract between the store and whatever places its nodes.
///
/// Each method is called once per node, in creation order, and must return
/// the node's final position.
pub trait LayoutStrategy: Send + Sync + 'static {
    /// Place the next subject node.
    fn place_subject(&mut self, label: &str) -> Position;

    /// Place the next attribute node.
    fn place_attribute(&mut self, label: &str) -> Position;

    /// Size of a node's box. Default: [`node_size`].
    fn size_of(&self, kind: NodeKind, label: &str) -> Size {
        node_size(kind, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_size_minimums() {
        assert_eq!(node_size(NodeKind::Subject, "Oak").width, 80.0);
        assert_eq!(node_size(NodeKind::Attribute, "red").width, 100.0);
        assert_eq!(node_size(NodeKind::Subject, "Oak").height, 30.0);
    }

    #[test]
    fn test_node_size_grows_with_label() {
        // 15 chars * 8 = 120
        assert_eq!(node_size(NodeKind::Subject, "Acer Palmatum!!").width, 120.0);
        assert_eq!(node_size(NodeKind::Attribute, "Acer Palmatum!!").width, 120.0);
        // counted in chars, not bytes
        assert_eq!(node_size(NodeKind::Subject, "ééééééééééé").width, 88.0);
    }

    #[test]
    fn test_partial_config_deserializes() {
        let cfg: LayoutConfig =
            serde_json::from_str(r#"{"subject_slots": "golden_angle", "seed": 7}"#).unwrap();
        assert_eq!(cfg.subject_slots, SubjectSlots::GoldenAngle);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.subject_radius, LayoutConfig::default().subject_radius);
    }
}
