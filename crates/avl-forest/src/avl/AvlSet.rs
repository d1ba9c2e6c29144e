use std::fmt;

use super::util;
use super::AvlNode;
use crate::error::InvariantError;
use crate::traverse::{Traversal, TraversalOrder};

fn default_comparator<K: PartialOrd>(a: &K, b: &K) -> i32 {
    if a == b {
        0
    } else if a < b {
        -1
    } else {
        1
    }
}

/// Ordered set backed by an arena-allocated AVL tree.
///
/// Keys are unique; inserting an existing key or removing a missing one is
/// a structural no-op. Freed arena slots are recycled through a free list,
/// so indices of live nodes stay stable across unrelated mutations.
pub struct AvlSet<K, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    arena: Vec<AvlNode<K>>,
    free: Vec<u32>,
    root: Option<u32>,
    len: usize,
    comparator: C,
}

impl<K> AvlSet<K, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K> Default for AvlSet<K, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> AvlSet<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
            comparator,
        }
    }

    /// The node is fully constructed in its slot before any tree link
    /// touches it.
    fn alloc(&mut self, key: K) -> u32 {
        match self.free.pop() {
            Some(i) => {
                self.arena[i as usize] = AvlNode::new(key);
                i
            }
            None => {
                self.arena.push(AvlNode::new(key));
                (self.arena.len() - 1) as u32
            }
        }
    }

    /// Inserts `key`, returning `false` if it was already present.
    pub fn insert(&mut self, key: K) -> bool {
        let n = self.alloc(key);
        let (root, inserted) = util::insert(&mut self.arena, self.root, n, &self.comparator);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        } else {
            self.free.push(n);
        }
        inserted
    }

    /// Removes `key`, returning `false` if it was absent.
    pub fn remove(&mut self, key: &K) -> bool {
        let (root, freed) = util::remove(&mut self.arena, self.root, key, &self.comparator);
        self.root = root;
        match freed {
            Some(i) => {
                self.free.push(i);
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        util::find(&self.arena, self.root, key, &self.comparator).is_some()
    }

    /// Lazy traversal of all keys in the requested order.
    pub fn traverse(&self, order: TraversalOrder) -> Traversal<'_, K, AvlNode<K>> {
        Traversal::new(&self.arena, self.root, order)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Cached height of the whole tree; 0 when empty.
    pub fn height(&self) -> u32 {
        util::height(&self.arena, self.root)
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    /// Checks the balance invariant, the height cache, and strict key
    /// ordering over the whole tree.
    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        util::assert_avl_tree(&self.arena, self.root, &self.comparator)
    }
}

impl<K, C> fmt::Debug for AvlSet<K, C>
where
    K: fmt::Debug,
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&util::print(&self.arena, self.root, ""))
    }
}
