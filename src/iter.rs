//! Iterators over the entries of a [`BinTree`](crate::BinTree).
//!
//! [`Iter`] steps lazily through parent back-references like a
//! [`Cursor`](crate::Cursor). [`IterMut`] and [`IntoIter`] hand out
//! disjoint borrows or owned entries, so they resolve the in-order
//! sequence of arena slots up front.

use std::iter::FusedIterator;

use crate::node::{self, Node, NodeId};

// =============================================================================
// Iter
// =============================================================================

/// An iterator over key-value pairs of a [`BinTree`](crate::BinTree), in
/// ascending key order.
pub struct Iter<'a, K, V> {
    nodes: &'a [Node<K, V>],
    front: Option<NodeId>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) const fn new(nodes: &'a [Node<K, V>], front: Option<NodeId>) -> Self {
        Self {
            nodes,
            front,
            remaining: nodes.len(),
        }
    }
}

impl<'a, K: Ord, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        let current = self.front?;
        self.front = node::successor(nodes, current);
        self.remaining = self.remaining.saturating_sub(1);
        let node = &nodes[current.index()];
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Ord, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K: Ord, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front,
            remaining: self.remaining,
        }
    }
}

// =============================================================================
// IterMut
// =============================================================================

/// An iterator over key-value pairs with mutable values, in ascending key
/// order.
pub struct IterMut<'a, K, V> {
    entries: std::vec::IntoIter<(&'a K, &'a mut V)>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    /// Splits the arena into one borrow per node and orders them by `order`.
    pub(crate) fn new(nodes: &'a mut [Node<K, V>], order: &[NodeId]) -> Self {
        let mut slots: Vec<Option<&'a mut Node<K, V>>> = nodes.iter_mut().map(Some).collect();
        let entries: Vec<(&'a K, &'a mut V)> = order
            .iter()
            .filter_map(|id| slots[id.index()].take())
            .map(|node| (&node.key, &mut node.value))
            .collect();
        Self {
            entries: entries.into_iter(),
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

// =============================================================================
// IntoIter
// =============================================================================

/// An owning iterator over key-value pairs of a [`BinTree`](crate::BinTree),
/// in ascending key order.
pub struct IntoIter<K, V> {
    entries: std::vec::IntoIter<(K, V)>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(nodes: Vec<Node<K, V>>, order: &[NodeId]) -> Self {
        let mut slots: Vec<Option<Node<K, V>>> = nodes.into_iter().map(Some).collect();
        let entries: Vec<(K, V)> = order
            .iter()
            .filter_map(|id| slots[id.index()].take())
            .map(|node| (node.key, node.value))
            .collect();
        Self {
            entries: entries.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

// =============================================================================
// Keys / Values / ValuesMut
// =============================================================================

/// An iterator over the keys of a [`BinTree`](crate::BinTree).
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) const fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K: Ord, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Ord, V> ExactSizeIterator for Keys<'_, K, V> {}

/// An iterator over the values of a [`BinTree`](crate::BinTree), in key order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) const fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K: Ord, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Ord, V> ExactSizeIterator for Values<'_, K, V> {}

/// An iterator over mutable values of a [`BinTree`](crate::BinTree), in key
/// order.
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> ValuesMut<'a, K, V> {
    pub(crate) const fn new(inner: IterMut<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

#[cfg(test)]
mod tests {
    use crate::BinTree;
    use rstest::rstest;

    fn sample() -> BinTree<i32, char> {
        [(4, 'd'), (2, 'b'), (1, 'a'), (3, 'c'), (5, 'e')]
            .into_iter()
            .collect()
    }

    #[rstest]
    fn test_iter_exact_size() {
        let tree = sample();
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 5);
        iter.next();
        iter.next();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.count(), 3);
    }

    #[rstest]
    fn test_iter_is_fused() {
        let tree = sample();
        let mut iter = tree.iter();
        for _ in 0..5 {
            assert!(iter.next().is_some());
        }
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[rstest]
    fn test_iter_clone_is_independent() {
        let tree = sample();
        let mut iter = tree.iter();
        iter.next();
        let snapshot = iter.clone();
        iter.next();
        assert_eq!(snapshot.map(|(key, _)| *key).collect::<Vec<_>>(), vec![2, 3, 4, 5]);
    }

    #[rstest]
    fn test_keys_and_values() {
        let tree = sample();
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(
            tree.values().copied().collect::<String>(),
            "abcde".to_string()
        );
    }

    #[rstest]
    fn test_values_mut() {
        let mut tree = sample();
        for value in tree.values_mut() {
            *value = value.to_ascii_uppercase();
        }
        assert_eq!(tree.values().copied().collect::<String>(), "ABCDE");
    }

    #[rstest]
    fn test_into_iter_reversed() {
        let keys: Vec<i32> = sample().into_iter().rev().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![5, 4, 3, 2, 1]);
    }

    #[rstest]
    fn test_empty_iterators() {
        let mut tree: BinTree<i32, char> = BinTree::new();
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.iter_mut().next(), None);
        assert_eq!(tree.into_iter().next(), None);
    }
}
