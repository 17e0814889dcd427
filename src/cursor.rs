//! Cursors over tree positions.
//!
//! A cursor is either positioned at a node or at the end of the tree.
//! [`Cursor`] is the read-only view and [`CursorMut`] additionally allows
//! values to be modified. Both step forward with the same successor walk
//! over parent back-references, so traversal needs no auxiliary stack.
//!
//! Keys are never mutable through a cursor. Dereferencing or advancing a
//! cursor at the end returns [`TreeError::EndOfTree`].
//!
//! # Examples
//!
//! ```rust
//! use bintree::BinTree;
//!
//! let tree: BinTree<i32, &str> = [(2, "b"), (1, "a"), (3, "c")].into_iter().collect();
//!
//! let mut cursor = tree.begin();
//! let mut keys = Vec::new();
//! while cursor != tree.end() {
//!     keys.push(*cursor.key()?);
//!     cursor.move_next()?;
//! }
//! assert_eq!(keys, vec![1, 2, 3]);
//! # Ok::<(), bintree::TreeError>(())
//! ```

use std::fmt;

use crate::error::TreeError;
use crate::node::{self, Node, NodeId};
use crate::tree::BinTree;

// =============================================================================
// Cursor Definition
// =============================================================================

/// A read-only position in a [`BinTree`].
///
/// Two cursors compare equal when they point at the same node of the same
/// tree, or when both are at the end.
pub struct Cursor<'a, K, V> {
    tree: &'a BinTree<K, V>,
    position: Option<NodeId>,
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) const fn new(tree: &'a BinTree<K, V>, position: Option<NodeId>) -> Self {
        Self { tree, position }
    }

    /// Returns `true` if the cursor is past the greatest key.
    #[inline]
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.position.is_none()
    }

    fn node(&self) -> Result<&'a Node<K, V>, TreeError> {
        let tree = self.tree;
        self.position
            .map(|id| &tree.nodes[id.index()])
            .ok_or(TreeError::EndOfTree)
    }

    /// Returns the key at the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EndOfTree`] if the cursor is at the end.
    pub fn key(&self) -> Result<&'a K, TreeError> {
        self.node().map(|node| &node.key)
    }

    /// Returns the value at the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EndOfTree`] if the cursor is at the end.
    pub fn value(&self) -> Result<&'a V, TreeError> {
        self.node().map(|node| &node.value)
    }

    /// Returns the key-value pair at the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EndOfTree`] if the cursor is at the end.
    pub fn pair(&self) -> Result<(&'a K, &'a V), TreeError> {
        self.node().map(|node| (&node.key, &node.value))
    }

    /// Cursor at the parent node; the end cursor for the root or at the end.
    #[must_use]
    pub fn parent(&self) -> Self {
        self.follow(|node| node.upper)
    }

    /// Cursor at the left child; the end cursor if there is none.
    #[must_use]
    pub fn left(&self) -> Self {
        self.follow(|node| node.left)
    }

    /// Cursor at the right child; the end cursor if there is none.
    #[must_use]
    pub fn right(&self) -> Self {
        self.follow(|node| node.right)
    }

    fn follow(&self, link: impl FnOnce(&Node<K, V>) -> Option<NodeId>) -> Self {
        Self::new(self.tree, self.node().ok().and_then(link))
    }
}

impl<K: Ord, V> Cursor<'_, K, V> {
    /// Advances to the in-order successor, reaching the end after the
    /// greatest key.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EndOfTree`] if the cursor is already at the end.
    pub fn move_next(&mut self) -> Result<(), TreeError> {
        let current = self.position.ok_or(TreeError::EndOfTree)?;
        self.position = node::successor(&self.tree.nodes, current);
        Ok(())
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        match (self.position, other.position) {
            (None, None) => true,
            (Some(mine), Some(theirs)) => std::ptr::eq(self.tree, other.tree) && mine == theirs,
            _ => false,
        }
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Cursor<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pair() {
            Ok(pair) => formatter.debug_tuple("Cursor").field(&pair).finish(),
            Err(_) => formatter.write_str("Cursor(end)"),
        }
    }
}

// =============================================================================
// CursorMut Definition
// =============================================================================

/// A position in a [`BinTree`] through which values can be modified.
///
/// The cursor holds the tree exclusively. Its position stays valid across
/// [`CursorMut::insert`] because existing nodes never move.
pub struct CursorMut<'a, K, V> {
    tree: &'a mut BinTree<K, V>,
    position: Option<NodeId>,
}

impl<'a, K, V> CursorMut<'a, K, V> {
    pub(crate) const fn new(tree: &'a mut BinTree<K, V>, position: Option<NodeId>) -> Self {
        Self { tree, position }
    }

    /// Returns `true` if the cursor is past the greatest key.
    #[inline]
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.position.is_none()
    }

    /// Read-only view of this cursor at the same position.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, K, V> {
        Cursor::new(self.tree, self.position)
    }

    /// Returns the key at the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EndOfTree`] if the cursor is at the end.
    pub fn key(&self) -> Result<&K, TreeError> {
        self.as_cursor().key()
    }

    /// Returns the value at the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EndOfTree`] if the cursor is at the end.
    pub fn value(&self) -> Result<&V, TreeError> {
        self.as_cursor().value()
    }

    /// Returns the key and a mutable reference to the value at the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EndOfTree`] if the cursor is at the end.
    pub fn pair_mut(&mut self) -> Result<(&K, &mut V), TreeError> {
        let id = self.position.ok_or(TreeError::EndOfTree)?;
        let node = &mut self.tree.nodes[id.index()];
        Ok((&node.key, &mut node.value))
    }

    /// Returns a mutable reference to the value at the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EndOfTree`] if the cursor is at the end.
    pub fn value_mut(&mut self) -> Result<&mut V, TreeError> {
        self.pair_mut().map(|(_, value)| value)
    }

    /// Consumes the cursor, returning a mutable reference to the value with
    /// the lifetime of the tree borrow.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EndOfTree`] if the cursor is at the end.
    pub fn into_value_mut(self) -> Result<&'a mut V, TreeError> {
        let id = self.position.ok_or(TreeError::EndOfTree)?;
        let tree = self.tree;
        Ok(&mut tree.nodes[id.index()].value)
    }
}

impl<K: Ord, V> CursorMut<'_, K, V> {
    /// Advances to the in-order successor, reaching the end after the
    /// greatest key.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EndOfTree`] if the cursor is already at the end.
    pub fn move_next(&mut self) -> Result<(), TreeError> {
        let current = self.position.ok_or(TreeError::EndOfTree)?;
        self.position = node::successor(&self.tree.nodes, current);
        Ok(())
    }

    /// Inserts into the underlying tree without moving the cursor.
    ///
    /// A key greater than the current one is visited by later calls to
    /// [`move_next`](Self::move_next).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bintree::BinTree;
    ///
    /// let mut tree: BinTree<i32, i32> = [(1, 0), (5, 0)].into_iter().collect();
    /// let mut cursor = tree.begin_mut();
    /// cursor.insert(3, 0);
    /// cursor.move_next()?;
    /// assert_eq!(cursor.key(), Ok(&3));
    /// # Ok::<(), bintree::TreeError>(())
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.tree.insert(key, value)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for CursorMut<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_cursor().pair() {
            Ok(pair) => formatter.debug_tuple("CursorMut").field(&pair).finish(),
            Err(_) => formatter.write_str("CursorMut(end)"),
        }
    }
}
