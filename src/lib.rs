//! An ordered map based on an AVL tree.
//!
//! The tree stores its nodes in a dense arena and rebalances itself after
//! every insertion and removal, so lookups, insertions, and removals all run
//! in logarithmic time. A small companion module, [`paths`], checks whether
//! every root-to-leaf path in a plain binary tree has the same length.

pub use crate::map::Map;

pub mod map;
pub mod paths;

mod node;

#[cfg(feature = "ordered_iter")]
mod ordered_iter;

#[cfg(feature = "quickcheck")]
mod quickcheck;
