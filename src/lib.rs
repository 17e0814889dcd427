//! # bintree
//!
//! An ordered key-value container backed by a binary search tree whose
//! nodes keep a back-reference to their parent.
//!
//! ## Overview
//!
//! - **[`BinTree`]**: insert with overwrite on duplicate keys, exact-key
//!   lookup, default-on-miss and error-on-miss indexed access, deep copy
//!   that preserves topology, O(1) move-out, and an on-demand
//!   [`balance`](BinTree::balance) that rebuilds a height-balanced tree.
//! - **[`Cursor`] / [`CursorMut`]**: positions in the tree that step to the
//!   in-order successor by climbing parent links, with no auxiliary stack.
//! - **Iterators**: [`Iter`], [`IterMut`], [`IntoIter`] and friends for use
//!   with the standard iterator adaptors.
//!
//! The tree does not rebalance itself on insertion. Its shape follows the
//! insertion order until `balance` is called.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`BinTree`]
//! - `tracing`: emit `tracing` events for node allocation and whole-tree
//!   operations
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use bintree::BinTree;
//!
//! let mut tree = BinTree::new();
//! for key in [8, 3, 10, 1, 6, 7, 14, 13, 4] {
//!     tree.insert(key, 42);
//! }
//! assert_eq!(tree.len(), 9);
//! assert!(!tree.find(&7).is_end());
//! assert!(tree.find(&99) == tree.end());
//!
//! let snapshot = tree.clone();
//! tree.balance();
//! *tree.get_or_insert_default(20) += 1;
//!
//! assert_eq!(tree.len(), 10);
//! assert!(snapshot.try_get(&20).is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

#[macro_use]
mod tracing_helpers;

mod cursor;
mod error;
mod iter;
mod node;
mod tree;

pub use cursor::{Cursor, CursorMut};
pub use error::TreeError;
pub use iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
pub use tree::BinTree;

/// Prelude module for convenient imports.
///
/// ```rust
/// use bintree::prelude::*;
///
/// let tree: BinTree<i32, i32> = BinTree::new();
/// assert_eq!(tree.try_get(&1), Err(TreeError::KeyNotFound));
/// ```
pub mod prelude {
    pub use crate::{BinTree, Cursor, CursorMut, TreeError};
}
