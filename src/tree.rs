//! Ordered map backed by an unbalanced binary search tree.
//!
//! This module provides [`BinTree`], a mutable ordered map whose shape is
//! determined by insertion order. The tree never rebalances on its own;
//! [`BinTree::balance`] rebuilds a height-balanced tree on demand.
//!
//! - O(height) insert
//! - O(height) find
//! - O(N log N) balance
//! - O(N) deep copy preserving topology
//! - O(1) len, take
//!
//! # Examples
//!
//! ```rust
//! use bintree::BinTree;
//!
//! let mut tree = BinTree::new();
//! for key in [8, 3, 10, 1, 6] {
//!     tree.insert(key, key * 10);
//! }
//!
//! let keys: Vec<&i32> = tree.keys().collect();
//! assert_eq!(keys, vec![&1, &3, &6, &8, &10]);
//!
//! tree.balance();
//! assert_eq!(tree.root().key(), Ok(&6));
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;

use crate::cursor::{Cursor, CursorMut};
use crate::error::TreeError;
use crate::iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use crate::node::{self, Node, NodeId, Side};

// =============================================================================
// BinTree Definition
// =============================================================================

/// An ordered map backed by a binary search tree with parent back-references.
///
/// Nodes are stored in an arena owned by the tree. Each node links to its
/// children and to its parent, which lets cursors step to the in-order
/// successor without an auxiliary stack.
///
/// # Time Complexity
///
/// | Operation               | Complexity    |
/// |-------------------------|---------------|
/// | `new`                   | O(1)          |
/// | `insert`                | O(height)     |
/// | `find` / `get`          | O(height)     |
/// | `get_or_insert_default` | O(height)     |
/// | `balance`               | O(N log N)    |
/// | `clone`                 | O(N)          |
/// | `clear`                 | O(N)          |
/// | `take`                  | O(1)          |
/// | `len`                   | O(1)          |
///
/// # Examples
///
/// ```rust
/// use bintree::BinTree;
///
/// let mut tree = BinTree::new();
/// tree.insert("b", 2);
/// tree.insert("a", 1);
/// tree.insert("b", 20);
///
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.get("b"), Some(&20));
/// assert!(tree.find("z").is_end());
/// ```
pub struct BinTree<K, V> {
    /// Arena of nodes; every slot is reachable from `root`
    pub(crate) nodes: Vec<Node<K, V>>,
    /// Root node, absent for an empty tree
    pub(crate) root: Option<NodeId>,
}

static_assertions::assert_impl_all!(BinTree<i32, String>: Send, Sync, Clone, Default);

impl<K, V> BinTree<K, V> {
    /// Creates a new empty tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bintree::BinTree;
    ///
    /// let tree: BinTree<i32, String> = BinTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of keys stored in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    ///
    /// An empty tree has height 0 and a single node has height 1.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bintree::BinTree;
    ///
    /// let mut tree: BinTree<i32, ()> = (1..=7).map(|key| (key, ())).collect();
    /// assert_eq!(tree.height(), 7);
    ///
    /// tree.balance();
    /// assert_eq!(tree.height(), 3);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        node::height(&self.nodes, self.root)
    }

    /// Removes every entry, leaving the tree empty.
    ///
    /// Every node is released exactly once. Clearing an empty tree is a no-op.
    pub fn clear(&mut self) {
        debug_log!(released = self.nodes.len(), "cleared tree");
        self.nodes.clear();
        self.root = None;
    }

    /// Moves the whole tree out, leaving `self` empty and usable.
    ///
    /// No node is copied or reallocated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bintree::BinTree;
    ///
    /// let mut source: BinTree<i32, i32> = [(1, 10), (2, 20)].into_iter().collect();
    /// let destination = source.take();
    ///
    /// assert_eq!(destination.len(), 2);
    /// assert!(source.is_empty());
    /// source.insert(3, 30);
    /// assert_eq!(source.len(), 1);
    /// ```
    #[must_use = "the moved-out tree is dropped immediately otherwise, use `clear` instead"]
    pub fn take(&mut self) -> Self {
        debug_log!(moved = self.nodes.len(), "moved tree out");
        std::mem::take(self)
    }

    /// Returns a cursor at the smallest key, or the end cursor when empty.
    #[must_use]
    pub fn begin(&self) -> Cursor<'_, K, V> {
        Cursor::new(self, node::first(&self.nodes, self.root))
    }

    /// Returns the end cursor, positioned past the greatest key.
    #[must_use]
    pub const fn end(&self) -> Cursor<'_, K, V> {
        Cursor::new(self, None)
    }

    /// Returns a mutable cursor at the smallest key.
    #[must_use]
    pub fn begin_mut(&mut self) -> CursorMut<'_, K, V> {
        let position = node::first(&self.nodes, self.root);
        CursorMut::new(self, position)
    }

    /// Returns a cursor at the root node, or the end cursor when empty.
    ///
    /// Combined with [`Cursor::left`], [`Cursor::right`] and
    /// [`Cursor::parent`] this exposes the shape of the tree.
    #[must_use]
    pub const fn root(&self) -> Cursor<'_, K, V> {
        Cursor::new(self, self.root)
    }
}

impl<K: Ord, V> BinTree<K, V> {
    /// Inserts a key-value pair into the tree.
    ///
    /// A new key becomes a leaf below the last node visited by the descent.
    /// An existing key keeps its node and has its value replaced; the old
    /// value is returned.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bintree::BinTree;
    ///
    /// let mut tree = BinTree::new();
    /// assert_eq!(tree.insert(1, "one"), None);
    /// assert_eq!(tree.insert(1, "ONE"), Some("one"));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert_entry(key, value).1
    }

    /// Descends from the root and either overwrites the matching node or
    /// hangs a new leaf. Returns the node holding `key` afterwards.
    pub(crate) fn insert_entry(&mut self, key: K, value: V) -> (NodeId, Option<V>) {
        let Some(mut current) = self.root else {
            let id = self.allocate(key, value, None);
            self.root = Some(id);
            return (id, None);
        };

        loop {
            let node = &mut self.nodes[current.index()];
            let Some(side) = Side::of(key.cmp(&node.key)) else {
                return (current, Some(std::mem::replace(&mut node.value, value)));
            };
            match node.child(side) {
                Some(child) => current = child,
                None => {
                    let id = self.allocate(key, value, Some(current));
                    *self.nodes[current.index()].child_mut(side) = Some(id);
                    return (id, None);
                }
            }
        }
    }

    /// Returns a cursor at `key`, or the end cursor if the key is absent.
    ///
    /// The key may be any borrowed form of the tree's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bintree::BinTree;
    ///
    /// let tree: BinTree<i32, &str> = [(7, "seven")].into_iter().collect();
    /// assert_eq!(tree.find(&7).value(), Ok(&"seven"));
    /// assert!(tree.find(&99) == tree.end());
    /// ```
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Cursor::new(self, node::search(&self.nodes, self.root, key))
    }

    /// Returns a mutable cursor at `key`, or at the end if the key is absent.
    #[must_use]
    pub fn find_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let position = node::search(&self.nodes, self.root, key);
        CursorMut::new(self, position)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        node::search(&self.nodes, self.root, key).map(|id| &self.nodes[id.index()].value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        node::search(&self.nodes, self.root, key).map(|id| &mut self.nodes[id.index()].value)
    }

    /// Returns `true` if the tree contains a value for the specified key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        node::search(&self.nodes, self.root, key).is_some()
    }

    /// Read-only indexed access.
    ///
    /// Unlike [`get_or_insert_default`](Self::get_or_insert_default) this
    /// never inserts.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::KeyNotFound`] if the key is not stored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bintree::{BinTree, TreeError};
    ///
    /// let tree: BinTree<i32, i32> = [(1, 10)].into_iter().collect();
    /// assert_eq!(tree.try_get(&1), Ok(&10));
    /// assert_eq!(tree.try_get(&2), Err(TreeError::KeyNotFound));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn try_get<Q>(&self, key: &Q) -> Result<&V, TreeError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or(TreeError::KeyNotFound)
    }

    /// Mutable indexed access.
    ///
    /// Returns the value stored under `key`, first inserting `V::default()`
    /// if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bintree::BinTree;
    ///
    /// let mut tree: BinTree<&str, u32> = BinTree::new();
    /// *tree.get_or_insert_default("hits") += 1;
    /// *tree.get_or_insert_default("hits") += 1;
    /// assert_eq!(tree.get("hits"), Some(&2));
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let id = match node::search(&self.nodes, self.root, &key) {
            Some(id) => id,
            None => self.insert_entry(key, V::default()).0,
        };
        &mut self.nodes[id.index()].value
    }

    /// Rebuilds the tree with near-minimal height.
    ///
    /// The entries are moved out in key order and the old structure is
    /// discarded. The median of each index range `[left, right)` is then
    /// inserted before the lower half `[left, middle)` and the upper half
    /// `(middle, right)`, where `middle = left + (right - left) / 2`. On an
    /// even-length range the lower half therefore holds one more entry
    /// than the upper half.
    ///
    /// Balancing an empty tree is a no-op.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bintree::BinTree;
    ///
    /// let mut tree: BinTree<i32, ()> = (1..=4).map(|key| (key, ())).collect();
    /// tree.balance();
    ///
    /// let root = tree.root();
    /// assert_eq!(root.key(), Ok(&3));
    /// assert_eq!(root.left().key(), Ok(&2));
    /// assert_eq!(root.right().key(), Ok(&4));
    /// ```
    pub fn balance(&mut self) {
        if self.is_empty() {
            return;
        }

        let mut entries: Vec<Option<(K, V)>> = std::mem::take(self).into_iter().map(Some).collect();
        self.nodes.reserve(entries.len());

        let mut ranges = vec![(0, entries.len())];
        while let Some((left, right)) = ranges.pop() {
            if left >= right {
                continue;
            }
            let middle = left + (right - left) / 2;
            if let Some((key, value)) = entries[middle].take() {
                self.insert(key, value);
            }
            // Lower half first, matching the recursive order
            ranges.push((middle + 1, right));
            ranges.push((left, middle));
        }

        debug_log!(entries = self.nodes.len(), height = self.height(), "balanced tree");
    }

    /// Returns an iterator over the entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bintree::BinTree;
    ///
    /// let tree: BinTree<i32, char> = [(2, 'b'), (1, 'a')].into_iter().collect();
    /// let entries: Vec<(&i32, &char)> = tree.iter().collect();
    /// assert_eq!(entries, vec![(&1, &'a'), (&2, &'b')]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.nodes, node::first(&self.nodes, self.root))
    }

    /// Returns an iterator over the entries with mutable values, in
    /// ascending key order.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let order = self.in_order_ids();
        IterMut::new(&mut self.nodes, &order)
    }

    /// Returns an iterator over the keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over the values in ascending key order.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Returns an iterator over mutable values in ascending key order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut::new(self.iter_mut())
    }

    /// Arena positions in ascending key order.
    pub(crate) fn in_order_ids(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut current = node::first(&self.nodes, self.root);
        while let Some(id) = current {
            order.push(id);
            current = node::successor(&self.nodes, id);
        }
        order
    }
}

impl<K, V> BinTree<K, V> {
    /// Appends a childless node hanging from `upper`.
    fn allocate(&mut self, key: K, value: V, upper: Option<NodeId>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        trace_log!(node = id.index(), upper = ?upper.map(NodeId::index), "allocated node");
        self.nodes.push(Node::new(key, value, upper));
        id
    }

    /// Mirrors `source` node by node into this (empty) tree, so the copy has
    /// the same shape as the source rather than the shape of a re-insertion.
    fn copy_structure_from(&mut self, source: &Self)
    where
        K: Clone,
        V: Clone,
    {
        let Some(source_root) = source.root else {
            return;
        };
        let root_node = &source.nodes[source_root.index()];
        let root = self.allocate(root_node.key.clone(), root_node.value.clone(), None);
        self.root = Some(root);

        let mut pending = vec![(source_root, root)];
        while let Some((original, mirrored)) = pending.pop() {
            for side in [Side::Right, Side::Left] {
                let Some(child) = source.nodes[original.index()].child(side) else {
                    continue;
                };
                let child_node = &source.nodes[child.index()];
                let copy = self.allocate(
                    child_node.key.clone(),
                    child_node.value.clone(),
                    Some(mirrored),
                );
                *self.nodes[mirrored.index()].child_mut(side) = Some(copy);
                pending.push((child, copy));
            }
        }

        debug_log!(copied = self.nodes.len(), "copied tree");
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for BinTree<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for BinTree<K, V> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.len());
        copy.copy_structure_from(self);
        copy
    }

    /// Releases the current content of `self`, then deep-copies `source`.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.nodes.reserve(source.len());
        self.copy_structure_from(source);
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BinTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for BinTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> IntoIterator for BinTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let order = self.in_order_ids();
        IntoIter::new(self.nodes, &order)
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a BinTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a mut BinTree<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Read-only indexing.
///
/// # Panics
///
/// Panics with [`TreeError::KeyNotFound`] if the key is not stored. Use
/// [`BinTree::try_get`] to handle the miss, or
/// [`BinTree::get_or_insert_default`] to insert on a miss.
impl<K, V, Q> Index<&Q> for BinTree<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        match self.try_get(key) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

/// Trees are equal when they hold the same entries, whatever their shape.
impl<K: Ord, V: PartialEq> PartialEq for BinTree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Ord, V: Eq> Eq for BinTree<K, V> {}

impl<K: Ord + Hash, V: Hash> Hash for BinTree<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for BinTree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

/// One `key: value` line per entry, in ascending key order.
impl<K: Ord + fmt::Display, V: fmt::Display> fmt::Display for BinTree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self {
            writeln!(formatter, "{key}: {value}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for BinTree<K, V>
where
    K: serde::Serialize + Ord,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct BinTreeVisitor<K, V> {
    key_marker: std::marker::PhantomData<K>,
    value_marker: std::marker::PhantomData<V>,
}

#[cfg(feature = "serde")]
impl<K, V> BinTreeVisitor<K, V> {
    const fn new() -> Self {
        Self {
            key_marker: std::marker::PhantomData,
            value_marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for BinTreeVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = BinTree<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut tree = BinTree::new();
        while let Some((key, value)) = access.next_entry()? {
            tree.insert(key, value);
        }
        Ok(tree)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for BinTree<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(BinTreeVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    /// Keys of the reference scenario, all mapped to 42.
    const SCENARIO_KEYS: [i32; 9] = [8, 3, 10, 1, 6, 7, 14, 13, 4];

    #[fixture]
    fn scenario() -> BinTree<i32, i32> {
        let mut tree = BinTree::new();
        for key in SCENARIO_KEYS {
            tree.insert(key, 42);
        }
        tree
    }

    /// Walks the arena and checks BST order and the back-reference invariant.
    fn assert_links_consistent<K: Ord + fmt::Debug, V>(tree: &BinTree<K, V>) {
        if let Some(root) = tree.root {
            assert_eq!(tree.nodes[root.index()].upper, None);
        }
        let mut reachable = 0;
        let mut pending: Vec<NodeId> = tree.root.into_iter().collect();
        while let Some(id) = pending.pop() {
            reachable += 1;
            let node = &tree.nodes[id.index()];
            if let Some(left) = node.left {
                assert_eq!(tree.nodes[left.index()].upper, Some(id));
                assert!(tree.nodes[left.index()].key < node.key);
                pending.push(left);
            }
            if let Some(right) = node.right {
                assert_eq!(tree.nodes[right.index()].upper, Some(id));
                assert!(tree.nodes[right.index()].key > node.key);
                pending.push(right);
            }
        }
        assert_eq!(reachable, tree.len());
    }

    #[rstest]
    fn test_new_creates_empty() {
        let tree: BinTree<i32, String> = BinTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert!(tree.begin() == tree.end());
    }

    #[rstest]
    fn test_first_insert_becomes_root() {
        let mut tree = BinTree::new();
        tree.insert(5, "five");
        assert_eq!(tree.root, Some(NodeId::new(0)));
        assert_eq!(tree.nodes[0].upper, None);
        assert_eq!(tree.nodes[0].left, None);
        assert_eq!(tree.nodes[0].right, None);
    }

    #[rstest]
    fn test_insert_links_children_to_parent(scenario: BinTree<i32, i32>) {
        assert_links_consistent(&scenario);
        assert_eq!(scenario.len(), 9);
    }

    #[rstest]
    fn test_insert_duplicate_keeps_node() {
        let mut tree = BinTree::new();
        tree.insert(1, "one");
        tree.insert(2, "two");
        let replaced = tree.insert(1, "ONE");

        assert_eq!(replaced, Some("one"));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.nodes[0].value, "ONE");
    }

    #[rstest]
    fn test_scenario_in_order(scenario: BinTree<i32, i32>) {
        let keys: Vec<i32> = scenario.keys().copied().collect();
        assert_eq!(keys, vec![1, 3, 4, 6, 7, 8, 10, 13, 14]);
    }

    #[rstest]
    fn test_scenario_shape(scenario: BinTree<i32, i32>) {
        // 8 -> (3 -> (1, 6 -> (4, 7)), 10 -> (_, 14 -> (13, _)))
        assert_eq!(scenario.height(), 4);
        let root = scenario.root();
        assert_eq!(root.key(), Ok(&8));
        assert_eq!(root.left().right().left().key(), Ok(&4));
        assert_eq!(root.right().right().left().key(), Ok(&13));
    }

    #[rstest]
    fn test_balance_scenario(mut scenario: BinTree<i32, i32>) {
        scenario.balance();

        assert_links_consistent(&scenario);
        assert_eq!(scenario.len(), 9);
        let keys: Vec<i32> = scenario.keys().copied().collect();
        assert_eq!(keys, vec![1, 3, 4, 6, 7, 8, 10, 13, 14]);

        let root = scenario.root();
        assert_eq!(root.key(), Ok(&7));
        assert_eq!(root.left().key(), Ok(&4));
        assert_eq!(root.left().left().key(), Ok(&3));
        assert_eq!(root.left().left().left().key(), Ok(&1));
        assert_eq!(root.left().right().key(), Ok(&6));
        assert_eq!(root.right().key(), Ok(&13));
        assert_eq!(root.right().left().key(), Ok(&10));
        assert_eq!(root.right().left().left().key(), Ok(&8));
        assert_eq!(root.right().right().key(), Ok(&14));
    }

    #[rstest]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(3, 2)]
    #[case(7, 3)]
    #[case(8, 4)]
    #[case(15, 4)]
    #[case(100, 7)]
    fn test_balance_height(#[case] count: i32, #[case] expected: usize) {
        let mut tree: BinTree<i32, ()> = (0..count).map(|key| (key, ())).collect();
        tree.balance();
        assert_eq!(tree.height(), expected);
        assert_links_consistent(&tree);
    }

    #[rstest]
    fn test_balance_even_range_favours_lower_half() {
        let mut tree: BinTree<i32, ()> = (1..=2).map(|key| (key, ())).collect();
        tree.balance();
        // [0, 2): middle index 1 is the root, key 1 becomes its left child
        assert_eq!(tree.root().key(), Ok(&2));
        assert_eq!(tree.root().left().key(), Ok(&1));
        assert!(tree.root().right().is_end());
    }

    #[rstest]
    fn test_balance_empty_is_noop() {
        let mut tree: BinTree<i32, i32> = BinTree::new();
        tree.balance();
        assert!(tree.is_empty());
        assert!(tree.root().is_end());
    }

    #[rstest]
    fn test_balance_does_not_require_clone() {
        struct Opaque(u8);

        let mut tree = BinTree::new();
        for key in 0..10 {
            tree.insert(key, Opaque(key));
        }
        tree.balance();
        assert_eq!(tree.get(&9).map(|opaque| opaque.0), Some(9));
    }

    #[rstest]
    fn test_clear(mut scenario: BinTree<i32, i32>) {
        scenario.clear();
        assert!(scenario.is_empty());
        assert_eq!(scenario.root, None);
        assert!(scenario.begin().is_end());

        scenario.clear();
        assert!(scenario.is_empty());
    }

    #[rstest]
    fn test_clone_preserves_topology(scenario: BinTree<i32, i32>) {
        let copy = scenario.clone();
        assert_links_consistent(&copy);
        assert_eq!(copy.len(), scenario.len());
        assert_eq!(copy.height(), scenario.height());
        assert_eq!(copy.root().key(), Ok(&8));
        assert_eq!(copy.root().left().right().right().key(), Ok(&7));
        assert_eq!(copy, scenario);
    }

    #[rstest]
    fn test_clone_from_replaces_content(scenario: BinTree<i32, i32>) {
        let mut destination: BinTree<i32, i32> = [(100, 0), (200, 0)].into_iter().collect();
        destination.clone_from(&scenario);

        assert_links_consistent(&destination);
        assert_eq!(destination.len(), 9);
        assert!(!destination.contains_key(&100));
        assert_eq!(destination.root().key(), Ok(&8));
    }

    #[rstest]
    fn test_take_leaves_empty_source(mut scenario: BinTree<i32, i32>) {
        let moved = scenario.take();
        assert_eq!(moved.len(), 9);
        assert!(scenario.is_empty());
        assert_eq!(scenario.iter().count(), 0);
    }

    #[rstest]
    fn test_get_or_insert_default_inserts_once(mut scenario: BinTree<i32, i32>) {
        assert_eq!(*scenario.get_or_insert_default(20), 0);
        *scenario.get_or_insert_default(20) = 5;
        assert_eq!(scenario.len(), 10);
        assert_eq!(scenario.get(&20), Some(&5));
        assert_links_consistent(&scenario);
    }

    #[rstest]
    fn test_try_get_does_not_insert(scenario: BinTree<i32, i32>) {
        assert_eq!(scenario.try_get(&20), Err(TreeError::KeyNotFound));
        assert_eq!(scenario.try_get(&7), Ok(&42));
        assert_eq!(scenario.len(), 9);
    }

    #[rstest]
    #[should_panic(expected = "Key not found")]
    fn test_index_panics_on_missing_key(scenario: BinTree<i32, i32>) {
        let _value: i32 = scenario[&99];
    }

    #[rstest]
    fn test_index_existing_key(scenario: BinTree<i32, i32>) {
        assert_eq!(scenario[&13], 42);
    }

    #[rstest]
    fn test_borrowed_key_lookup() {
        let mut tree = BinTree::new();
        tree.insert("hello".to_string(), 1);
        assert_eq!(tree.get("hello"), Some(&1));
        assert!(tree.contains_key("hello"));
        assert!(tree.find("world").is_end());
    }

    #[rstest]
    fn test_display() {
        let tree: BinTree<i32, &str> = [(2, "two"), (1, "one")].into_iter().collect();
        assert_eq!(format!("{tree}"), "1: one\n2: two\n");

        let empty: BinTree<i32, &str> = BinTree::new();
        assert_eq!(format!("{empty}"), "");
    }

    #[rstest]
    fn test_debug() {
        let tree: BinTree<i32, &str> = [(2, "two"), (1, "one")].into_iter().collect();
        assert_eq!(format!("{tree:?}"), r#"{1: "one", 2: "two"}"#);
    }

    #[rstest]
    fn test_equality_ignores_shape() {
        let ascending: BinTree<i32, i32> = (0..5).map(|key| (key, key)).collect();
        let mut balanced = ascending.clone();
        balanced.balance();

        assert_ne!(ascending.height(), balanced.height());
        assert_eq!(ascending, balanced);
    }

    #[rstest]
    fn test_iter_mut_updates_values(mut scenario: BinTree<i32, i32>) {
        for (key, value) in &mut scenario {
            *value = *key * 2;
        }
        let values: Vec<i32> = scenario.values().copied().collect();
        assert_eq!(values, vec![2, 6, 8, 12, 14, 16, 20, 26, 28]);
    }

    #[rstest]
    fn test_into_iter_in_order(scenario: BinTree<i32, i32>) {
        let keys: Vec<i32> = scenario.into_iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![1, 3, 4, 6, 7, 8, 10, 13, 14]);
    }
}
