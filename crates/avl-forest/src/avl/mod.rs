//! Height-balanced (AVL) search tree over an arena.

#[path = "AvlSet.rs"]
pub mod avl_set;
pub mod util;

pub use avl_set::AvlSet;

use crate::types::{AvlNodeLike, KeyNode, Node};

/// One tree node: a key, child links, and the cached height of the subtree
/// rooted here (a leaf has height 1).
#[derive(Clone, Debug)]
pub struct AvlNode<K> {
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: K,
    pub height: u32,
}

impl<K> AvlNode<K> {
    pub fn new(k: K) -> Self {
        Self {
            l: None,
            r: None,
            k,
            height: 1,
        }
    }
}

impl<K> Node for AvlNode<K> {
    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

impl<K> KeyNode<K> for AvlNode<K> {
    fn key(&self) -> &K {
        &self.k
    }

    fn key_mut(&mut self) -> &mut K {
        &mut self.k
    }
}

impl<K> AvlNodeLike<K> for AvlNode<K> {
    fn height(&self) -> u32 {
        self.height
    }

    fn set_height(&mut self, h: u32) {
        self.height = h;
    }
}
