//! Node trait definitions.
//!
//! All tree "pointers" are `Option<u32>` indices into a [`Vec`]-backed
//! arena. Tree-manipulation functions take the arena as a slice (or
//! `&mut [N]`) and work with indices; the traits below are the seam that
//! lets them stay generic over the concrete node layout.
//!
//! There are no parent links: every mutating algorithm descends recursively
//! and repairs heights while unwinding, so child links are all it needs.

/// Binary-tree child links (`l`, `r`).
pub trait Node {
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Comparator used by ordered tree structures.
///
/// Returns a negative value, zero, or a positive value when the first key
/// orders before, equal to, or after the second.
pub type Comparator<K> = dyn Fn(&K, &K) -> i32;

/// Keyed node interface used by ordered structures.
pub trait KeyNode<K>: Node {
    fn key(&self) -> &K;
    fn key_mut(&mut self) -> &mut K;
}

/// AVL-specific node behavior: a cached subtree height.
///
/// The cache is maintained eagerly — every structural function refreshes it
/// right after reassigning a child link, so readers never descend.
pub trait AvlNodeLike<K>: KeyNode<K> {
    fn height(&self) -> u32;
    fn set_height(&mut self, h: u32);
}
