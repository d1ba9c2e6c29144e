//! Lazy tree traversal.
//!
//! [`Traversal`] walks an arena-backed binary tree in pre-, in-, or
//! post-order without recursion, driving an explicit frame stack instead.
//! Each frame is `(node, stage)` where the stage records how far the visit
//! of that node has progressed: 0 = not yet entered, 1 = left subtree done,
//! 2 = both subtrees done. Stack depth is bounded by the tree height.

use std::marker::PhantomData;

use crate::types::KeyNode;

/// Visiting order for [`Traversal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraversalOrder {
    Pre,
    In,
    Post,
}

/// Lazy, finite iterator over the keys of a subtree.
///
/// Restartable in the sense that constructing a new `Traversal` over the
/// same arena and root always replays the full sequence.
pub struct Traversal<'a, K, N> {
    arena: &'a [N],
    order: TraversalOrder,
    stack: Vec<(u32, u8)>,
    _key: PhantomData<fn() -> &'a K>,
}

impl<'a, K, N: KeyNode<K>> Traversal<'a, K, N> {
    pub fn new(arena: &'a [N], root: Option<u32>, order: TraversalOrder) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = root {
            stack.push((root, 0));
        }
        Self {
            arena,
            order,
            stack,
            _key: PhantomData,
        }
    }
}

impl<'a, K, N: KeyNode<K>> Iterator for Traversal<'a, K, N> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        while let Some((i, stage)) = self.stack.pop() {
            let node = &self.arena[i as usize];
            match stage {
                0 => {
                    self.stack.push((i, 1));
                    if let Some(l) = node.l() {
                        self.stack.push((l, 0));
                    }
                    if self.order == TraversalOrder::Pre {
                        return Some(node.key());
                    }
                }
                1 => {
                    self.stack.push((i, 2));
                    if let Some(r) = node.r() {
                        self.stack.push((r, 0));
                    }
                    if self.order == TraversalOrder::In {
                        return Some(node.key());
                    }
                }
                _ => {
                    if self.order == TraversalOrder::Post {
                        return Some(node.key());
                    }
                }
            }
        }
        None
    }
}
