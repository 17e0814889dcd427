//! Node storage and the in-order traversal engine.
//!
//! Nodes live in an arena owned by [`BinTree`](crate::BinTree). The `left`
//! and `right` links are the structural edges of the tree; `upper` is a
//! plain back-reference to the parent used only for navigation. Since
//! individual keys are never removed, the arena has no holes and every
//! slot is reachable from the root.

use std::cmp::Ordering;

// =============================================================================
// NodeId Definition
// =============================================================================

/// Position of a node inside the arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct NodeId(usize);

impl NodeId {
    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0
    }
}

static_assertions::assert_impl_all!(NodeId: Copy, Send, Sync);

// =============================================================================
// Node Definition
// =============================================================================

/// A key-value pair with links to its children and its parent.
#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) upper: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    /// Creates a childless node hanging from `upper`.
    pub(crate) const fn new(key: K, value: V, upper: Option<NodeId>) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            upper,
        }
    }

    /// Returns the child link on the given side of this node.
    pub(crate) const fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Returns a mutable handle on the child link on the given side.
    pub(crate) const fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    /// Side a key descends to relative to a node key, `None` on a match.
    pub(crate) const fn of(ordering: Ordering) -> Option<Self> {
        match ordering {
            Ordering::Less => Some(Self::Left),
            Ordering::Greater => Some(Self::Right),
            Ordering::Equal => None,
        }
    }
}

// =============================================================================
// Traversal Engine
// =============================================================================

/// Leftmost node of the subtree rooted at `root`.
pub(crate) fn first<K, V>(nodes: &[Node<K, V>], root: Option<NodeId>) -> Option<NodeId> {
    let mut current = root?;
    while let Some(left) = nodes[current.index()].left {
        current = left;
    }
    Some(current)
}

/// In-order successor of `current`, or `None` when `current` holds the
/// greatest key.
///
/// With a right subtree the successor is its leftmost node. Otherwise the
/// walk climbs `upper` links, skipping every ancestor whose key is not
/// greater than the key being stepped from.
pub(crate) fn successor<K: Ord, V>(nodes: &[Node<K, V>], current: NodeId) -> Option<NodeId> {
    let node = &nodes[current.index()];
    if node.right.is_some() {
        return first(nodes, node.right);
    }

    let key = &node.key;
    let mut ancestor = node.upper;
    while let Some(id) = ancestor {
        let candidate = &nodes[id.index()];
        if candidate.key > *key {
            return Some(id);
        }
        ancestor = candidate.upper;
    }
    None
}

/// Arena slot holding `key`, if any, in O(height) comparisons.
pub(crate) fn search<K, V, Q>(nodes: &[Node<K, V>], root: Option<NodeId>, key: &Q) -> Option<NodeId>
where
    K: std::borrow::Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut current = root;
    while let Some(id) = current {
        let node = &nodes[id.index()];
        match Side::of(key.cmp(node.key.borrow())) {
            Some(side) => current = node.child(side),
            None => return Some(id),
        }
    }
    None
}

/// Number of nodes on the longest root-to-leaf path.
pub(crate) fn height<K, V>(nodes: &[Node<K, V>], root: Option<NodeId>) -> usize {
    let mut tallest = 0;
    let mut pending: Vec<(NodeId, usize)> = root.map(|id| (id, 1)).into_iter().collect();
    while let Some((id, depth)) = pending.pop() {
        tallest = tallest.max(depth);
        let node = &nodes[id.index()];
        pending.extend(node.left.map(|left| (left, depth + 1)));
        pending.extend(node.right.map(|right| (right, depth + 1)));
    }
    tallest
}
