// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dynamic bounding volume hierarchy generic over scalar `T: Scalar`.
//!
//! The tree is binary with exactly one slot per leaf. Internal nodes hold the
//! union of their children's boxes and the height of their subtree. All nodes
//! live in one arena addressed by index; freed nodes are recycled through a free
//! list, and a slot→leaf table lets removal start at the leaf instead of
//! searching for it.
//!
//! Insertion descends from the root towards the cheapest sibling using a
//! branch-and-bound surface heuristic, splices a new parent above it, and then
//! walks back to the root refitting boxes and applying rotations wherever the
//! two child heights differ by more than one. Removal splices the leaf's sibling
//! into the grandparent and performs the same upward walk. Heights therefore
//! stay logarithmic even when boxes arrive in spatial order, as they do while a
//! stroke is being drawn.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use crate::backend::Backend;
use crate::types::{Aabb2D, Scalar, margin};
use core::fmt::Debug;

/// A self-balancing BVH backend.
pub struct Bvh<T: Scalar> {
    nodes: Vec<Node<T>>,
    free: Vec<NodeIdx>,
    root: Option<NodeIdx>,
    leaves: Vec<Option<NodeIdx>>,
    alive: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Kind {
    Leaf(usize),
    Internal { left: NodeIdx, right: NodeIdx },
    Free,
}

#[derive(Copy, Clone, Debug)]
struct Node<T: Scalar> {
    bbox: Aabb2D<T>,
    parent: Option<NodeIdx>,
    height: u32,
    kind: Kind,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn get(self) -> usize {
        self.0
    }
}

impl<T: Scalar> Default for Bvh<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            leaves: Vec::new(),
            alive: 0,
        }
    }
}

impl<T: Scalar> Bvh<T> {
    /// Height of the tree: 0 for a single leaf, 0 when empty.
    pub fn height(&self) -> u32 {
        self.root.map(|r| self.node(r).height).unwrap_or(0)
    }

    /// Number of arena nodes currently in use (leaves plus internal nodes).
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Union of every live box, or `None` when empty.
    pub fn bounds(&self) -> Option<Aabb2D<T>> {
        self.root.map(|r| self.node(r).bbox)
    }

    fn node(&self, i: NodeIdx) -> &Node<T> {
        &self.nodes[i.get()]
    }

    fn node_mut(&mut self, i: NodeIdx) -> &mut Node<T> {
        &mut self.nodes[i.get()]
    }

    fn alloc_node(&mut self, node: Node<T>) -> NodeIdx {
        if let Some(i) = self.free.pop() {
            *self.node_mut(i) = node;
            i
        } else {
            self.nodes.push(node);
            NodeIdx(self.nodes.len() - 1)
        }
    }

    fn free_node(&mut self, i: NodeIdx) {
        let n = self.node_mut(i);
        n.kind = Kind::Free;
        n.parent = None;
        n.height = 0;
        self.free.push(i);
    }

    fn replace_child(&mut self, parent: NodeIdx, old: NodeIdx, new: NodeIdx) {
        if let Kind::Internal { left, right } = self.node(parent).kind {
            self.node_mut(parent).kind = if left == old {
                Kind::Internal { left: new, right }
            } else {
                Kind::Internal { left, right: new }
            };
        }
    }

    /// Cost of pushing `bbox` down into `child`, given the cost already inherited from ancestors.
    fn descend_cost(&self, child: NodeIdx, bbox: &Aabb2D<T>, inherited: T::Acc) -> T::Acc {
        let c = self.node(child);
        let grown = margin(&c.bbox.union(bbox));
        match c.kind {
            Kind::Leaf(_) => grown + inherited,
            _ => grown - margin(&c.bbox) + inherited,
        }
    }

    fn pick_sibling(&self, root: NodeIdx, bbox: &Aabb2D<T>) -> NodeIdx {
        let two = T::acc_from_usize(2);
        let mut at = root;
        while let Kind::Internal { left, right } = self.node(at).kind {
            let own = self.node(at).bbox;
            let combined = margin(&own.union(bbox));
            // Pairing with `at` itself creates one new parent covering both.
            let here = two * combined;
            let inherited = two * (combined - margin(&own));
            let cost_left = self.descend_cost(left, bbox, inherited);
            let cost_right = self.descend_cost(right, bbox, inherited);
            if here < cost_left && here < cost_right {
                break;
            }
            at = if cost_left < cost_right { left } else { right };
        }
        at
    }

    fn insert_leaf(&mut self, leaf: NodeIdx) {
        let Some(root) = self.root else {
            self.root = Some(leaf);
            return;
        };
        let bbox = self.node(leaf).bbox;
        let sibling = self.pick_sibling(root, &bbox);
        let old_parent = self.node(sibling).parent;
        let sib = *self.node(sibling);
        let parent = self.alloc_node(Node {
            bbox: sib.bbox.union(&bbox),
            parent: old_parent,
            height: sib.height + 1,
            kind: Kind::Internal {
                left: sibling,
                right: leaf,
            },
        });
        match old_parent {
            Some(p) => self.replace_child(p, sibling, parent),
            None => self.root = Some(parent),
        }
        self.node_mut(sibling).parent = Some(parent);
        self.node_mut(leaf).parent = Some(parent);
        self.refit_from(Some(parent));
    }

    fn remove_leaf(&mut self, leaf: NodeIdx) {
        if self.root == Some(leaf) {
            self.root = None;
            return;
        }
        let Some(parent) = self.node(leaf).parent else {
            return;
        };
        let Kind::Internal { left, right } = self.node(parent).kind else {
            return;
        };
        let sibling = if left == leaf { right } else { left };
        let grandparent = self.node(parent).parent;
        self.node_mut(sibling).parent = grandparent;
        self.free_node(parent);
        match grandparent {
            Some(g) => {
                self.replace_child(g, parent, sibling);
                self.refit_from(Some(g));
            }
            None => self.root = Some(sibling),
        }
    }

    /// Walk to the root, rebalancing and recomputing box and height at each step.
    fn refit_from(&mut self, mut at: Option<NodeIdx>) {
        while let Some(i) = at {
            let i = self.balance(i);
            if let Kind::Internal { left, right } = self.node(i).kind {
                let (l, r) = (self.node(left), self.node(right));
                let height = 1 + l.height.max(r.height);
                let bbox = l.bbox.union(&r.bbox);
                let n = self.node_mut(i);
                n.height = height;
                n.bbox = bbox;
            }
            at = self.node(i).parent;
        }
    }

    /// Rotate `a` if its children's heights differ by more than one.
    /// Returns the node now occupying `a`'s position.
    fn balance(&mut self, a: NodeIdx) -> NodeIdx {
        let Kind::Internal { left, right } = self.node(a).kind else {
            return a;
        };
        if self.node(a).height < 2 {
            return a;
        }
        let hl = self.node(left).height;
        let hr = self.node(right).height;
        if hr > hl + 1 {
            self.promote(a, right, left, false)
        } else if hl > hr + 1 {
            self.promote(a, left, right, true)
        } else {
            a
        }
    }

    /// Lift child `p` of `a` into `a`'s place. `a` keeps `other` plus `p`'s
    /// shorter child; `p` keeps its taller child and adopts `a`.
    fn promote(&mut self, a: NodeIdx, p: NodeIdx, other: NodeIdx, p_was_left: bool) -> NodeIdx {
        let Kind::Internal { left: f, right: g } = self.node(p).kind else {
            return a;
        };
        let (taller, shorter) = if self.node(f).height > self.node(g).height {
            (f, g)
        } else {
            (g, f)
        };

        let grand = self.node(a).parent;
        self.node_mut(p).parent = grand;
        match grand {
            Some(gp) => self.replace_child(gp, a, p),
            None => self.root = Some(p),
        }
        self.node_mut(a).parent = Some(p);
        self.node_mut(shorter).parent = Some(a);

        self.node_mut(a).kind = if p_was_left {
            Kind::Internal {
                left: shorter,
                right: other,
            }
        } else {
            Kind::Internal {
                left: other,
                right: shorter,
            }
        };
        let (o, s) = (self.node(other), self.node(shorter));
        let a_bbox = o.bbox.union(&s.bbox);
        let a_height = 1 + o.height.max(s.height);
        {
            let n = self.node_mut(a);
            n.bbox = a_bbox;
            n.height = a_height;
        }

        let t = *self.node(taller);
        let n = self.node_mut(p);
        n.kind = Kind::Internal {
            left: a,
            right: taller,
        };
        n.bbox = a_bbox.union(&t.bbox);
        n.height = 1 + a_height.max(t.height);
        p
    }
}

impl<T: Scalar> Backend<T> for Bvh<T> {
    fn insert(&mut self, slot: usize, aabb: Aabb2D<T>) {
        if self.leaves.get(slot).copied().flatten().is_some() {
            self.remove(slot);
        }
        let leaf = self.alloc_node(Node {
            bbox: aabb,
            parent: None,
            height: 0,
            kind: Kind::Leaf(slot),
        });
        if self.leaves.len() <= slot {
            self.leaves.resize_with(slot + 1, || None);
        }
        self.leaves[slot] = Some(leaf);
        self.alive += 1;
        self.insert_leaf(leaf);
    }

    fn remove(&mut self, slot: usize) -> bool {
        let Some(leaf) = self.leaves.get_mut(slot).and_then(Option::take) else {
            return false;
        };
        self.remove_leaf(leaf);
        self.free_node(leaf);
        self.alive -= 1;
        true
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.root = None;
        self.leaves.clear();
        self.alive = 0;
    }

    fn len(&self) -> usize {
        self.alive
    }

    fn query_rect<'a>(&'a self, rect: Aabb2D<T>) -> Box<dyn Iterator<Item = usize> + 'a> {
        let mut out = Vec::new();
        let Some(root) = self.root else {
            return Box::new(out.into_iter());
        };
        let mut stack = vec![root];
        while let Some(i) = stack.pop() {
            let n = self.node(i);
            if !n.bbox.intersects(&rect) {
                continue;
            }
            match n.kind {
                Kind::Leaf(slot) => out.push(slot),
                Kind::Internal { left, right } => {
                    stack.push(left);
                    stack.push(right);
                }
                Kind::Free => {}
            }
        }
        Box::new(out.into_iter())
    }
}

impl<T: Scalar> Debug for Bvh<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Bvh")
            .field("arena_nodes", &self.nodes.len())
            .field("free_nodes", &self.free.len())
            .field("alive", &self.alive)
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

/// BVH with f32 coordinates and f64 metrics.
pub type BvhF32 = Bvh<f32>;

/// BVH with f64 coordinates and f64 metrics.
pub type BvhF64 = Bvh<f64>;

/// BVH with i64 coordinates and i128 metrics.
pub type BvhI64 = Bvh<i64>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::flatvec::FlatVec;

    impl<T: Scalar> Bvh<T> {
        /// Check parent links, heights, boxes and arena accounting. Panics on violation.
        fn validate(&self) {
            let mut reachable = 0_usize;
            let mut leaves = 0_usize;
            if let Some(root) = self.root {
                assert_eq!(self.node(root).parent, None, "root has no parent");
                let mut stack = vec![root];
                while let Some(i) = stack.pop() {
                    reachable += 1;
                    let n = self.node(i);
                    match n.kind {
                        Kind::Leaf(slot) => {
                            leaves += 1;
                            assert_eq!(n.height, 0, "leaves have height 0");
                            assert_eq!(self.leaves[slot], Some(i), "slot table points at leaf");
                        }
                        Kind::Internal { left, right } => {
                            let (l, r) = (self.node(left), self.node(right));
                            assert_eq!(l.parent, Some(i), "left child links back");
                            assert_eq!(r.parent, Some(i), "right child links back");
                            assert_eq!(n.height, 1 + l.height.max(r.height), "height is refit");
                            assert_eq!(n.bbox, l.bbox.union(&r.bbox), "box is tight union");
                            stack.push(left);
                            stack.push(right);
                        }
                        Kind::Free => panic!("free node reachable from root"),
                    }
                }
            }
            assert_eq!(leaves, self.alive, "every live slot has one leaf");
            assert_eq!(reachable, self.node_count(), "no leaked arena nodes");
            if self.alive > 0 {
                assert_eq!(reachable, 2 * self.alive - 1, "binary tree node count");
            }
        }
    }

    fn log2_ceil(n: usize) -> u32 {
        usize::BITS - n.saturating_sub(1).leading_zeros()
    }

    #[test]
    fn empty_tree_queries_nothing() {
        let b: Bvh<f64> = Bvh::default();
        assert_eq!(b.query_rect(Aabb2D::new(-1e9, -1e9, 1e9, 1e9)).count(), 0);
        assert_eq!(b.height(), 0);
        assert!(b.bounds().is_none());
    }

    #[test]
    fn single_leaf_is_root() {
        let mut b: Bvh<i64> = Bvh::default();
        b.insert(7, Aabb2D::new(0, 0, 10, 10));
        b.validate();
        assert_eq!(b.node_count(), 1);
        let hits: Vec<_> = b.query_rect(Aabb2D::new(10, 10, 20, 20)).collect();
        assert_eq!(hits, vec![7], "closed intervals include touching corners");
        assert!(b.remove(7));
        b.validate();
        assert!(b.bounds().is_none());
    }

    #[test]
    fn sequential_strokes_stay_shallow() {
        // Boxes arriving left to right along a line, like a stroke being drawn.
        let mut b: Bvh<f64> = Bvh::default();
        let n = 1024_usize;
        for i in 0..n {
            let x = i as f64 * 4.0;
            b.insert(i, Aabb2D::new(x - 3.0, -3.0, x + 7.0, 3.0));
        }
        b.validate();
        assert!(
            b.height() <= 2 * log2_ceil(n) + 1,
            "height {} too large for {n} leaves",
            b.height()
        );
    }

    #[test]
    fn removal_keeps_structure_and_reuses_nodes() {
        let mut b: Bvh<i64> = Bvh::default();
        for i in 0..64_usize {
            let x = i64::try_from(i).unwrap() * 20;
            b.insert(i, Aabb2D::new(x, 0, x + 10, 10));
        }
        let peak = b.nodes.len();
        for i in (0..64_usize).step_by(3) {
            assert!(b.remove(i));
            b.validate();
        }
        assert!(!b.remove(0), "already removed");
        for i in (0..64_usize).step_by(3) {
            let x = i64::try_from(i).unwrap() * 20;
            b.insert(i, Aabb2D::new(x, 100, x + 10, 110));
        }
        b.validate();
        assert_eq!(b.nodes.len(), peak, "freed nodes are recycled");
        assert!(b.height() <= 2 * log2_ceil(64) + 1);
    }

    #[test]
    fn lifo_removal_drains_to_empty() {
        let mut b: Bvh<f64> = Bvh::default();
        for i in 0..200_usize {
            let t = i as f64 * 0.1;
            b.insert(i, Aabb2D::<f64>::from_xywh(t.cos() * 50.0, t.sin() * 50.0, 2.0, 2.0));
        }
        for i in (0..200_usize).rev() {
            assert!(b.remove(i));
            if i % 17 == 0 {
                b.validate();
            }
        }
        b.validate();
        assert!(b.is_empty());
        assert!(b.root.is_none());
    }

    #[test]
    fn reinserting_a_live_slot_replaces_it() {
        let mut b: Bvh<i64> = Bvh::default();
        b.insert(0, Aabb2D::new(0, 0, 10, 10));
        b.insert(1, Aabb2D::new(20, 0, 30, 10));
        b.insert(0, Aabb2D::new(100, 100, 110, 110));
        b.validate();
        assert_eq!(b.len(), 2);
        assert_eq!(b.query_rect(Aabb2D::new(5, 5, 5, 5)).count(), 0);
        let hits: Vec<_> = b.query_rect(Aabb2D::new(105, 105, 105, 105)).collect();
        assert_eq!(hits, vec![0]);
    }

    #[test]
    fn matches_flat_scan_under_churn() {
        let mut state = 0x9E37_79B9_7F4A_7C15_u64;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 11) as f64 / (1_u64 << 53) as f64
        };
        let mut bvh: Bvh<f64> = Bvh::default();
        let mut flat: FlatVec<f64> = FlatVec::default();
        let mut live = Vec::new();
        for slot in 0..500_usize {
            let r = Aabb2D::<f64>::from_xywh(next() * 1000.0, next() * 1000.0, 5.0 + next() * 40.0, 5.0);
            bvh.insert(slot, r);
            flat.insert(slot, r);
            live.push(slot);
            if next() < 0.3 {
                let victim = live.swap_remove((next() * live.len() as f64) as usize % live.len());
                assert_eq!(bvh.remove(victim), flat.remove(victim));
            }
        }
        bvh.validate();
        for _ in 0..50 {
            let q = Aabb2D::<f64>::from_xywh(next() * 900.0, next() * 900.0, 100.0, 100.0);
            let mut a: Vec<_> = bvh.query_rect(q).collect();
            let mut b: Vec<_> = flat.query_rect(q).collect();
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b, "bvh and flat scan disagree for {q:?}");
        }
    }
}
