//! Error types for tree access.
//!
//! Failed lookups through [`BinTree::find`](crate::BinTree::find) are not
//! errors: they produce the end cursor. Errors are reserved for the two
//! cases where the caller asked for something that does not exist.

/// Represents errors that can occur when accessing a [`BinTree`](crate::BinTree).
///
/// # Examples
///
/// ```rust
/// use bintree::{BinTree, TreeError};
///
/// let tree: BinTree<i32, i32> = BinTree::new();
/// assert_eq!(tree.try_get(&1), Err(TreeError::KeyNotFound));
/// assert_eq!(format!("{}", TreeError::KeyNotFound), "Key not found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeError {
    /// Read-only indexed access was given a key that is not stored.
    KeyNotFound,
    /// A cursor positioned at the end of the tree was dereferenced or advanced.
    EndOfTree,
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeyNotFound => write!(formatter, "Key not found"),
            Self::EndOfTree => write!(formatter, "Cursor is positioned at the end of the tree"),
        }
    }
}

impl std::error::Error for TreeError {}
