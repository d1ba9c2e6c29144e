//! Arena-based AVL tree.
//!
//! A height-balanced binary search tree providing ordered key storage with
//! O(log n) insert, remove, and search. Every mutation descends to the edit
//! point and restores the balance invariant with local rotations while
//! unwinding back to the root, so the tree is eagerly consistent whenever a
//! call returns.
//!
//! Instead of raw pointers, all tree links are `Option<u32>` indices into a
//! `Vec`-backed arena. Rotations re-link indices, no node is ever shared or
//! referenced from two places, and freed slots are recycled through a free
//! list.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`Node`] / [`KeyNode`] / [`AvlNodeLike`] traits over arena-indexed nodes |
//! | [`avl`] | [`AvlNode`] and the [`AvlSet`] public surface |
//! | [`avl::util`] | rotations, rebalancing, recursive insert/remove, search, validation |
//! | [`traverse`] | lazy pre/in/post-order [`Traversal`] iterator |
//! | [`error`] | [`InvariantError`] reported by the validator |

pub mod avl;
pub mod error;
pub mod traverse;
pub mod types;

pub use avl::{AvlNode, AvlSet};
pub use error::InvariantError;
pub use traverse::{Traversal, TraversalOrder};
pub use types::{AvlNodeLike, Comparator, KeyNode, Node};
