//! AVL algorithm core.
//!
//! Free functions over an arena of [`AvlNodeLike`] nodes. Every mutating
//! function descends recursively to the edit point and calls [`balance`] on
//! each ancestor while unwinding, so both the height cache and the balance
//! invariant hold again by the time the call returns.
//!
//! Slot lifecycle is the caller's business: [`insert`] takes an
//! already-constructed node index (fully built before it is ever linked),
//! and [`remove`] reports the detached slot back so the caller can recycle
//! it.

use std::fmt::Debug;

use crate::error::InvariantError;
use crate::traverse::{Traversal, TraversalOrder};
use crate::types::AvlNodeLike;

#[inline]
fn get_l<K, N>(arena: &[N], i: u32) -> Option<u32>
where
    N: AvlNodeLike<K>,
{
    arena[i as usize].l()
}

#[inline]
fn get_r<K, N>(arena: &[N], i: u32) -> Option<u32>
where
    N: AvlNodeLike<K>,
{
    arena[i as usize].r()
}

#[inline]
fn set_l<K, N>(arena: &mut [N], i: u32, v: Option<u32>)
where
    N: AvlNodeLike<K>,
{
    arena[i as usize].set_l(v);
}

#[inline]
fn set_r<K, N>(arena: &mut [N], i: u32, v: Option<u32>)
where
    N: AvlNodeLike<K>,
{
    arena[i as usize].set_r(v);
}

/// Cached height of a possibly-absent subtree. 0 for an empty subtree.
///
/// Never descends; the cache is kept correct by every structural function.
#[inline]
pub fn height<K, N>(arena: &[N], node: Option<u32>) -> u32
where
    N: AvlNodeLike<K>,
{
    node.map_or(0, |i| arena[i as usize].height())
}

/// `height(left) - height(right)`; 0 for an absent node.
#[inline]
pub fn balance_factor<K, N>(arena: &[N], node: Option<u32>) -> i32
where
    N: AvlNodeLike<K>,
{
    match node {
        None => 0,
        Some(i) => {
            height(arena, get_l(arena, i)) as i32 - height(arena, get_r(arena, i)) as i32
        }
    }
}

/// Recomputes a node's cached height from its direct children only.
#[inline]
pub fn update_height<K, N>(arena: &mut [N], i: u32)
where
    N: AvlNodeLike<K>,
{
    let h = 1 + height(arena, get_l(arena, i)).max(height(arena, get_r(arena, i)));
    arena[i as usize].set_height(h);
}

/// Right rotation around `y` (the LL shape, or the second step of LR):
///
/// ```text
///        y                  x
///       / \                / \
///      x   C     →        A   y
///     / \                    / \
///    A   B                  B   C
/// ```
///
/// Returns the new subtree root (`x`). Heights are refreshed child-first.
pub fn rotate_right<K, N>(arena: &mut [N], y: u32) -> u32
where
    N: AvlNodeLike<K>,
{
    let x = get_l(arena, y).expect("right rotation requires a left child");
    let b = get_r(arena, x);

    set_l(arena, y, b);
    set_r(arena, x, Some(y));

    update_height(arena, y);
    update_height(arena, x);

    x
}

/// Left rotation around `x` (the RR shape, or the second step of RL):
///
/// ```text
///      x                  y
///     / \                / \
///    A   y     →        x   C
///       / \            / \
///      B   C          A   B
/// ```
pub fn rotate_left<K, N>(arena: &mut [N], x: u32) -> u32
where
    N: AvlNodeLike<K>,
{
    let y = get_r(arena, x).expect("left rotation requires a right child");
    let b = get_l(arena, y);

    set_r(arena, x, b);
    set_l(arena, y, Some(x));

    update_height(arena, x);
    update_height(arena, y);

    y
}

/// Restores the balance invariant at `node` after a structural change in
/// one of its subtrees, returning the (possibly new) subtree root.
///
/// The single-vs-double rotation tie-break is the sign of the child's own
/// balance factor; a child at exactly 0 takes the single-rotation path.
pub fn balance<K, N>(arena: &mut [N], node: u32) -> u32
where
    N: AvlNodeLike<K>,
{
    update_height(arena, node);
    let bf = balance_factor(arena, Some(node));

    if bf > 1 {
        let l = get_l(arena, node).expect("left-heavy node has a left child");
        if balance_factor(arena, Some(l)) >= 0 {
            rotate_right(arena, node)
        } else {
            let l = rotate_left(arena, l);
            set_l(arena, node, Some(l));
            rotate_right(arena, node)
        }
    } else if bf < -1 {
        let r = get_r(arena, node).expect("right-heavy node has a right child");
        if balance_factor(arena, Some(r)) <= 0 {
            rotate_left(arena, node)
        } else {
            let r = rotate_right(arena, r);
            set_r(arena, node, Some(r));
            rotate_left(arena, node)
        }
    } else {
        node
    }
}

/// Inserts the pre-constructed node `n` into the subtree rooted at `node`.
///
/// Returns `(new_subtree_root, inserted)`. An equal key is a structural
/// no-op and reports `inserted = false`; the caller still owns slot `n` in
/// that case and should recycle it.
pub fn insert<K, N, C>(arena: &mut [N], node: Option<u32>, n: u32, comparator: &C) -> (u32, bool)
where
    N: AvlNodeLike<K>,
    C: Fn(&K, &K) -> i32,
{
    let Some(node) = node else {
        return (n, true);
    };

    let cmp = comparator(arena[n as usize].key(), arena[node as usize].key());
    if cmp == 0 {
        return (node, false);
    }

    let inserted = if cmp < 0 {
        let (l, inserted) = insert(arena, get_l(arena, node), n, comparator);
        set_l(arena, node, Some(l));
        inserted
    } else {
        let (r, inserted) = insert(arena, get_r(arena, node), n, comparator);
        set_r(arena, node, Some(r));
        inserted
    };

    (balance(arena, node), inserted)
}

/// Resets a slot that is leaving the tree so stale links cannot leak.
fn detach<K, N>(arena: &mut [N], i: u32)
where
    N: AvlNodeLike<K>,
{
    set_l(arena, i, None);
    set_r(arena, i, None);
    arena[i as usize].set_height(1);
}

/// Moves the key in slot `from` into slot `to` (the displaced key ends up
/// in `from`, which the caller is about to free).
fn relocate_key<K, N>(arena: &mut [N], from: u32, to: u32)
where
    N: AvlNodeLike<K>,
{
    let (from, to) = (from as usize, to as usize);
    debug_assert_ne!(from, to);
    let (lo, hi) = (from.min(to), from.max(to));
    let (head, tail) = arena.split_at_mut(hi);
    std::mem::swap(head[lo].key_mut(), tail[0].key_mut());
}

/// Detaches the leftmost node of the subtree rooted at `node`.
///
/// Returns `(new_subtree_root, detached_min)`, rebalancing every node on
/// the way back up. The detached slot keeps its key but loses its links.
pub fn remove_min<K, N>(arena: &mut [N], node: u32) -> (Option<u32>, u32)
where
    N: AvlNodeLike<K>,
{
    match get_l(arena, node) {
        None => {
            let r = get_r(arena, node);
            detach(arena, node);
            (r, node)
        }
        Some(l) => {
            let (l, min) = remove_min(arena, l);
            set_l(arena, node, l);
            (Some(balance(arena, node)), min)
        }
    }
}

/// Removes `key` from the subtree rooted at `node`.
///
/// Returns `(new_subtree_root, freed_slot)`. A missing key is an idempotent
/// no-op (`freed_slot = None`). Every ancestor on the return path is
/// rebalanced — a deletion can shrink a subtree by one level, which may
/// cascade imbalances arbitrarily far up.
///
/// The two-children case promotes the in-order successor's key into the
/// removal-point node and structurally removes the successor from the right
/// subtree; the freed slot is the successor's.
pub fn remove<K, N, C>(
    arena: &mut [N],
    node: Option<u32>,
    key: &K,
    comparator: &C,
) -> (Option<u32>, Option<u32>)
where
    N: AvlNodeLike<K>,
    C: Fn(&K, &K) -> i32,
{
    let Some(node) = node else {
        return (None, None);
    };

    let cmp = comparator(key, arena[node as usize].key());
    if cmp < 0 {
        let (l, freed) = remove(arena, get_l(arena, node), key, comparator);
        set_l(arena, node, l);
        (Some(balance(arena, node)), freed)
    } else if cmp > 0 {
        let (r, freed) = remove(arena, get_r(arena, node), key, comparator);
        set_r(arena, node, r);
        (Some(balance(arena, node)), freed)
    } else {
        match (get_l(arena, node), get_r(arena, node)) {
            (None, r) => {
                detach(arena, node);
                (r, Some(node))
            }
            (l, None) => {
                detach(arena, node);
                (l, Some(node))
            }
            (Some(_), Some(r)) => {
                let (r, succ) = remove_min(arena, r);
                relocate_key(arena, succ, node);
                set_r(arena, node, r);
                (Some(balance(arena, node)), Some(succ))
            }
        }
    }
}

/// Finds a node by key. Iterative descent, no side effects.
pub fn find<K, N, C>(arena: &[N], root: Option<u32>, key: &K, comparator: &C) -> Option<u32>
where
    N: AvlNodeLike<K>,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    while let Some(i) = curr {
        let cmp = comparator(key, arena[i as usize].key());
        if cmp == 0 {
            return Some(i);
        }
        curr = if cmp < 0 {
            get_l(arena, i)
        } else {
            get_r(arena, i)
        };
    }
    None
}

/// Verifies the height cache, the balance invariant, and strict in-order
/// key ordering for the whole subtree.
pub fn assert_avl_tree<K, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), InvariantError>
where
    N: AvlNodeLike<K>,
    C: Fn(&K, &K) -> i32,
{
    fn check_heights<K, N>(arena: &[N], node: u32) -> Result<u32, InvariantError>
    where
        N: AvlNodeLike<K>,
    {
        let lh = match arena[node as usize].l() {
            Some(l) => check_heights(arena, l)?,
            None => 0,
        };
        let rh = match arena[node as usize].r() {
            Some(r) => check_heights(arena, r)?,
            None => 0,
        };

        let expected = 1 + lh.max(rh);
        let actual = arena[node as usize].height();
        if actual != expected {
            return Err(InvariantError::HeightMismatch {
                node,
                expected,
                actual,
            });
        }

        let bf = lh as i32 - rh as i32;
        if !(-1..=1).contains(&bf) {
            return Err(InvariantError::Unbalanced { node, bf });
        }

        Ok(expected)
    }

    let Some(root) = root else {
        return Ok(());
    };

    check_heights(arena, root)?;

    let mut prev: Option<&K> = None;
    for key in Traversal::new(arena, Some(root), TraversalOrder::In) {
        if let Some(prev) = prev {
            // Equal keys fail too: no duplicates.
            if comparator(prev, key) >= 0 {
                return Err(InvariantError::OrderViolation);
            }
        }
        prev = Some(key);
    }

    Ok(())
}

/// Debug printer for AVL trees.
pub fn print<K, N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    N: AvlNodeLike<K>,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = print::<K, N>(arena, n.l(), &format!("{tab}  "));
            let right = print::<K, N>(arena, n.r(), &format!("{tab}  "));
            format!(
                "Node[{i}] [h={}] {{ {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.height(),
                n.key()
            )
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avl::AvlNode;

    fn cmp(a: &i32, b: &i32) -> i32 {
        if a == b {
            0
        } else if a < b {
            -1
        } else {
            1
        }
    }

    fn build(keys: &[i32]) -> (Vec<AvlNode<i32>>, Option<u32>) {
        let mut arena: Vec<AvlNode<i32>> = Vec::new();
        let mut root = None;
        for &k in keys {
            let n = arena.len() as u32;
            arena.push(AvlNode::new(k));
            let (new_root, inserted) = insert(&mut arena, root, n, &cmp);
            assert!(inserted, "duplicate in build input: {k}");
            root = Some(new_root);
        }
        (arena, root)
    }

    fn in_order(arena: &[AvlNode<i32>], root: Option<u32>) -> Vec<i32> {
        Traversal::new(arena, root, TraversalOrder::In)
            .copied()
            .collect()
    }

    fn root_key(arena: &[AvlNode<i32>], root: Option<u32>) -> i32 {
        arena[root.unwrap() as usize].k
    }

    #[test]
    fn rotate_right_relinks_middle_subtree() {
        // y=30 (l=x, r=C), x=20 (l=A, r=B)
        let mut arena = vec![
            AvlNode::new(30), // 0 = y
            AvlNode::new(20), // 1 = x
            AvlNode::new(10), // 2 = A
            AvlNode::new(25), // 3 = B
            AvlNode::new(40), // 4 = C
        ];
        arena[0].l = Some(1);
        arena[0].r = Some(4);
        arena[1].l = Some(2);
        arena[1].r = Some(3);
        arena[1].height = 2;
        arena[0].height = 3;

        let new_root = rotate_right(&mut arena, 0);
        assert_eq!(new_root, 1);
        assert_eq!(arena[1].l, Some(2));
        assert_eq!(arena[1].r, Some(0));
        assert_eq!(arena[0].l, Some(3)); // B moved under y
        assert_eq!(arena[0].r, Some(4));
        assert_eq!(arena[0].height, 2);
        assert_eq!(arena[1].height, 3);
        assert_avl_tree(&arena, Some(new_root), &cmp).unwrap();
    }

    #[test]
    fn balance_dispatches_all_four_cases() {
        // Each 3-key sequence forces exactly one rotation shape at the root.
        for (keys, label) in [
            ([30, 20, 10], "LL"),
            ([30, 10, 20], "LR"),
            ([10, 20, 30], "RR"),
            ([10, 30, 20], "RL"),
        ] {
            let (arena, root) = build(&keys);
            assert_eq!(root_key(&arena, root), 20, "{label}");
            assert_eq!(in_order(&arena, root), vec![10, 20, 30], "{label}");
            assert_eq!(height(&arena, root), 2, "{label}");
            assert_avl_tree(&arena, root, &cmp).unwrap();
        }
    }

    #[test]
    fn balance_treats_even_child_as_single_rotation() {
        // Deleting 50 leaves the root left-heavy with a left child at
        // bf = 0; that must resolve as a single right rotation.
        let (mut arena, root) = build(&[40, 20, 50, 10, 30]);
        let (root, freed) = remove(&mut arena, root, &50, &cmp);
        assert_eq!(freed, Some(2));
        assert_eq!(root_key(&arena, root), 20);
        assert_eq!(in_order(&arena, root), vec![10, 20, 30, 40]);
        assert_avl_tree(&arena, root, &cmp).unwrap();
    }

    #[test]
    fn insert_rejects_duplicate() {
        let (mut arena, root) = build(&[2, 1, 3]);
        let n = arena.len() as u32;
        arena.push(AvlNode::new(2));
        let (new_root, inserted) = insert(&mut arena, root, n, &cmp);
        assert!(!inserted);
        assert_eq!(Some(new_root), root);
        assert_eq!(in_order(&arena, Some(new_root)), vec![1, 2, 3]);
    }

    #[test]
    fn remove_min_detaches_leftmost() {
        let (mut arena, root) = build(&[4, 2, 6, 1, 3, 5, 7]);
        let (root, min) = remove_min(&mut arena, root.unwrap());
        assert_eq!(arena[min as usize].k, 1);
        assert_eq!(arena[min as usize].l, None);
        assert_eq!(arena[min as usize].r, None);
        assert_eq!(in_order(&arena, root), vec![2, 3, 4, 5, 6, 7]);
        assert_avl_tree(&arena, root, &cmp).unwrap();
    }

    #[test]
    fn remove_two_children_promotes_successor_key() {
        let (mut arena, root) = build(&[50, 30, 70, 20, 40, 60, 80]);
        let (root, freed) = remove(&mut arena, root, &50, &cmp);
        assert_eq!(root_key(&arena, root), 60);
        // The freed slot holds the displaced key, not the successor's.
        assert_eq!(arena[freed.unwrap() as usize].k, 50);
        assert_eq!(in_order(&arena, root), vec![20, 30, 40, 60, 70, 80]);
        assert_avl_tree(&arena, root, &cmp).unwrap();
    }

    #[test]
    fn remove_missing_key_is_noop() {
        let (mut arena, root) = build(&[2, 1, 3]);
        let (new_root, freed) = remove(&mut arena, root, &9, &cmp);
        assert_eq!(freed, None);
        assert_eq!(new_root, root);
        assert_eq!(in_order(&arena, new_root), vec![1, 2, 3]);
    }

    #[test]
    fn validator_reports_stale_height_cache() {
        let (mut arena, root) = build(&[2, 1, 3]);
        let i = root.unwrap();
        arena[i as usize].height = 7;
        assert_eq!(
            assert_avl_tree(&arena, root, &cmp),
            Err(InvariantError::HeightMismatch {
                node: i,
                expected: 2,
                actual: 7
            })
        );
    }

    #[test]
    fn validator_reports_order_violation() {
        let mut arena = vec![AvlNode::new(1), AvlNode::new(2)];
        arena[0].l = Some(1); // 2 sits in 1's left subtree
        arena[0].height = 2;
        assert_eq!(
            assert_avl_tree(&arena, Some(0), &cmp),
            Err(InvariantError::OrderViolation)
        );
    }
}
