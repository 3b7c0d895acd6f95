//! Set-theoretic queries over the store: similarity, intersection and
//! containment. Pure functions; nothing here mutates.

use hashbrown::HashSet;

use crate::layout::LayoutStrategy;
use crate::model::NodeId;
use crate::store::GraphStore;

/// Number of attributes two subjects share.
pub fn similarity<L: LayoutStrategy>(store: &GraphStore<L>, a: NodeId, b: NodeId) -> usize {
    store
        .attribute_ids_of(a)
        .iter()
        .filter(|attr| store.is_associated(b, **attr))
        .count()
}

/// Attributes two subjects share, in `a`'s order.
pub fn shared_attributes<L: LayoutStrategy>(
    store: &GraphStore<L>,
    a: NodeId,
    b: NodeId,
) -> Vec<NodeId> {
    store
        .attribute_ids_of(a)
        .iter()
        .copied()
        .filter(|attr| store.is_associated(b, *attr))
        .collect()
}

/// The other subject sharing the most attributes with `subject`.
///
/// Returns `None` when no subject shares anything. Ties go to the
/// lexicographically smallest subject name.
pub fn most_similar<L: LayoutStrategy>(
    store: &GraphStore<L>,
    subject: NodeId,
) -> Option<(NodeId, usize)> {
    let mut best: Option<(NodeId, usize, &str)> = None;
    for &other in store.subject_ids() {
        if other == subject {
            continue;
        }
        let count = similarity(store, subject, other);
        if count == 0 {
            continue;
        }
        let name = store.label(other).unwrap_or_default();
        let better = match best {
            None => true,
            Some((_, best_count, best_name)) => {
                count > best_count || (count == best_count && name < best_name)
            }
        };
        if better {
            best = Some((other, count, name));
        }
    }
    best.map(|(id, count, _)| (id, count))
}

/// Attributes shared by every subject, in the first subject's order.
/// Empty input yields an empty result.
pub fn common_attributes<L: LayoutStrategy>(
    store: &GraphStore<L>,
    subjects: &[NodeId],
) -> Vec<NodeId> {
    let Some((first, rest)) = subjects.split_first() else {
        return Vec::new();
    };
    store
        .attribute_ids_of(*first)
        .iter()
        .copied()
        .filter(|attr| rest.iter().all(|s| store.is_associated(*s, *attr)))
        .collect()
}

/// Subjects whose attribute set is a superset of `attributes`, in subject
/// creation order. An empty query matches every subject.
pub fn matching_subjects<L: LayoutStrategy>(
    store: &GraphStore<L>,
    attributes: &[NodeId],
) -> Vec<NodeId> {
    let wanted: HashSet<NodeId> = attributes.iter().copied().collect();
    store
        .subject_ids()
        .iter()
        .copied()
        .filter(|s| wanted.iter().all(|attr| store.is_associated(*s, *attr)))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
