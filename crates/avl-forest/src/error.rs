//! Validation errors reported by [`crate::avl::util::assert_avl_tree`].

use thiserror::Error;

/// A structural invariant the tree failed to uphold.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("height cache mismatch at node {node}: expected {expected}, got {actual}")]
    HeightMismatch { node: u32, expected: u32, actual: u32 },
    #[error("balance violated at node {node}: balance factor {bf}")]
    Unbalanced { node: u32, bf: i32 },
    #[error("key order violated: in-order traversal is not strictly increasing")]
    OrderViolation,
}
