//! The bounding-circle tree.
//!
//! # Arena
//!
//! Tree nodes live in a `slab::Slab`; parent/child links are slab keys.
//! Leaves are the only nodes carrying a data token, and a [`CircleHandle`]
//! always names a leaf.  Internal nodes are created with exactly two
//! children and are released as soon as removal leaves them with fewer,
//! so every query path ends at a leaf.
//!
//! # Containment invariant
//!
//! Every node's circle contains the circles of all its descendant leaves.
//! Insertion enforces this by enlarging ancestors after attaching; removal
//! preserves it trivially (circles only ever cover a superset after a
//! splice).
//!
//! # Concurrency
//!
//! `Hbb` is single-owner mutable state: no internal locking, callers must
//! not interleave mutation with queries.

use glam::Vec2;
use slab::Slab;

use crate::circle::{Circle, ray_dist};

/// Handle to a leaf, returned by [`Hbb::insert`].  Invalidated by
/// [`Hbb::remove`] and by [`Hbb::update`] (which returns the replacement).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CircleHandle(usize);

struct TreeNode<D> {
    circle: Circle,
    parent: Option<usize>,
    left:   Option<usize>,
    right:  Option<usize>,
    /// `Some` iff this node is a leaf.
    data:   Option<D>,
}

/// Hierarchical bounding-circle index.
pub struct Hbb<D> {
    arena: Slab<TreeNode<D>>,
    root:  usize,
    leaves: usize,
}

impl<D: Copy + PartialEq> Default for Hbb<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Copy + PartialEq> Hbb<D> {
    pub fn new() -> Self {
        let mut arena = Slab::new();
        let root = arena.insert(TreeNode {
            circle: Circle::new(Vec2::ZERO, 0.0),
            parent: None,
            left:   None,
            right:  None,
            data:   None,
        });
        Self { arena, root, leaves: 0 }
    }

    /// Number of leaves currently in the tree.
    pub fn len(&self) -> usize {
        self.leaves
    }

    pub fn is_empty(&self) -> bool {
        self.leaves == 0
    }

    /// The root's bounding circle, `None` while the tree is empty.
    pub fn root_circle(&self) -> Option<Circle> {
        if self.is_empty() {
            None
        } else {
            Some(self.arena[self.root].circle)
        }
    }

    /// The circle a handle currently occupies.
    pub fn circle(&self, h: CircleHandle) -> Circle {
        self.arena[h.0].circle
    }

    // ── Insertion ─────────────────────────────────────────────────────────

    /// Insert a leaf circle carrying `data` and return its handle.
    pub fn insert(&mut self, center: Vec2, r: f32, data: D) -> CircleHandle {
        let leaf = self.arena.insert(TreeNode {
            circle: Circle::new(center, r),
            parent: None,
            left:   None,
            right:  None,
            data:   Some(data),
        });
        self.attach(self.root, leaf);
        self.enlarge_ancestors(leaf);
        self.leaves += 1;
        CircleHandle(leaf)
    }

    /// Descend from `node` and hang `leaf` somewhere under it.
    fn attach(&mut self, node: usize, leaf: usize) {
        let leaf_circle = self.arena[leaf].circle;
        let (left, right) = (self.arena[node].left, self.arena[node].right);

        if let Some(l) = left {
            let ln = &self.arena[l];
            if ln.data.is_none() && ln.circle.contains_circle(&leaf_circle) {
                return self.attach(l, leaf);
            }
            if right.is_none() {
                return self.link(node, Slot::Right, leaf);
            }
        }
        if let Some(r) = right {
            let rn = &self.arena[r];
            if rn.data.is_none() && rn.circle.contains_circle(&leaf_circle) {
                return self.attach(r, leaf);
            }
            if left.is_none() {
                return self.link(node, Slot::Left, leaf);
            }
        }
        if left.is_none() && right.is_none() {
            return self.link(node, Slot::Left, leaf);
        }

        // Both slots taken and neither child swallows the leaf: split the
        // cheaper side under a fresh internal node.
        let (l, r) = (left.unwrap(), right.unwrap());
        let lc = self.arena[l].circle;
        let rc = self.arena[r].circle;
        let (slot, child) = if lc.merge_cost(&leaf_circle) < rc.merge_cost(&leaf_circle) {
            (Slot::Left, l)
        } else {
            (Slot::Right, r)
        };

        let bound = self.arena[child].circle.merge(&leaf_circle);
        let inner = self.arena.insert(TreeNode {
            circle: bound,
            parent: None,
            left:   None,
            right:  None,
            data:   None,
        });
        self.link(inner, Slot::Left, child);
        self.link(inner, Slot::Right, leaf);
        self.link(node, slot, inner);
    }

    /// Walk from `leaf`'s parent to the root, growing every circle that
    /// does not already contain the new leaf.
    fn enlarge_ancestors(&mut self, leaf: usize) {
        let leaf_circle = self.arena[leaf].circle;
        let mut cur = self.arena[leaf].parent;
        while let Some(n) = cur {
            let first_leaf = n == self.root && self.leaves == 0;
            let node = &mut self.arena[n];
            if first_leaf {
                node.circle = leaf_circle;
            } else if !node.circle.contains_circle(&leaf_circle) {
                node.circle = node.circle.merge(&leaf_circle);
            }
            cur = node.parent;
        }
    }

    // ── Removal ───────────────────────────────────────────────────────────

    /// Remove a leaf and collapse any single-child ancestors.
    ///
    /// # Panics
    /// Panics if the handle does not name a live leaf.
    pub fn remove(&mut self, h: CircleHandle) {
        let leaf = h.0;
        assert!(self.arena[leaf].data.is_some(), "handle does not name a leaf");
        let parent = self.arena[leaf].parent;
        if let Some(p) = parent {
            self.unlink(p, leaf);
        }
        self.arena.remove(leaf);
        self.leaves -= 1;
        if let Some(p) = parent {
            self.collapse(p);
        }
    }

    /// Re-insert the leaf behind `h` at a new center.  Returns the new
    /// handle; the old one is dead.
    pub fn update(&mut self, h: CircleHandle, center: Vec2) -> CircleHandle {
        let r = self.arena[h.0].circle.r;
        let data = self.arena[h.0].data.expect("handle does not name a leaf");
        self.remove(h);
        self.insert(center, r, data)
    }

    /// Splice away ancestors left with fewer than two children.  The root
    /// is exempt: it may legitimately hold zero or one child.
    fn collapse(&mut self, mut n: usize) {
        loop {
            if n == self.root {
                if self.leaves == 0 {
                    self.arena[n].circle = Circle::new(Vec2::ZERO, 0.0);
                }
                return;
            }
            let node = &self.arena[n];
            let parent = node.parent.expect("non-root node must have a parent");
            match (node.left, node.right) {
                (Some(_), Some(_)) => return,
                (Some(c), None) | (None, Some(c)) => {
                    // Single child: lift it into our slot.
                    self.replace_child(parent, n, c);
                    self.arena.remove(n);
                    n = parent;
                }
                (None, None) => {
                    self.unlink(parent, n);
                    self.arena.remove(n);
                    n = parent;
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Visit every leaf whose circle overlaps `probe`.
    pub fn collision_test(&self, probe: &Circle, mut visit: impl FnMut(D, Circle)) {
        self.walk(self.root, &|c| c.intersects(probe), &mut visit);
    }

    /// Visit every leaf whose circle contains `p`.
    pub fn fetch_by_point(&self, p: Vec2, mut visit: impl FnMut(D, Circle)) {
        self.walk(self.root, &|c| c.contains_point(p), &mut visit);
    }

    /// Visit every leaf whose circle comes within its radius of the closed
    /// segment `p0 p1`.
    pub fn fetch_by_ray(&self, p0: Vec2, p1: Vec2, mut visit: impl FnMut(D, Circle)) {
        self.walk(self.root, &|c| ray_dist(p0, p1, c.center).0 < c.r, &mut visit);
    }

    fn walk(
        &self,
        node: usize,
        pred: &impl Fn(&Circle) -> bool,
        visit: &mut impl FnMut(D, Circle),
    ) {
        for child in [self.arena[node].left, self.arena[node].right].into_iter().flatten() {
            let n = &self.arena[child];
            if !pred(&n.circle) {
                continue;
            }
            match n.data {
                Some(d) => visit(d, n.circle),
                None => self.walk(child, pred, visit),
            }
        }
    }

    /// `true` iff every node's circle contains all of its descendant
    /// leaves' circles.
    pub fn containment_ok(&self) -> bool {
        self.subtree_bound_ok(self.root)
    }

    fn subtree_bound_ok(&self, node: usize) -> bool {
        let bound = self.arena[node].circle;
        let mut ok = true;
        self.walk(node, &|_| true, &mut |_, leaf_circle| {
            if !bound.contains_circle(&leaf_circle) {
                ok = false;
            }
        });
        if !ok {
            return false;
        }
        [self.arena[node].left, self.arena[node].right]
            .into_iter()
            .flatten()
            .filter(|&c| self.arena[c].data.is_none())
            .all(|c| self.subtree_bound_ok(c))
    }

    // ── Link plumbing ─────────────────────────────────────────────────────

    fn link(&mut self, parent: usize, slot: Slot, child: usize) {
        match slot {
            Slot::Left => self.arena[parent].left = Some(child),
            Slot::Right => self.arena[parent].right = Some(child),
        }
        self.arena[child].parent = Some(parent);
    }

    fn unlink(&mut self, parent: usize, child: usize) {
        let p = &mut self.arena[parent];
        if p.left == Some(child) {
            p.left = None;
        }
        if p.right == Some(child) {
            p.right = None;
        }
        self.arena[child].parent = None;
    }

    fn replace_child(&mut self, parent: usize, old: usize, new: usize) {
        let p = &mut self.arena[parent];
        if p.left == Some(old) {
            p.left = Some(new);
        } else if p.right == Some(old) {
            p.right = Some(new);
        }
        self.arena[new].parent = Some(parent);
        self.arena[old].parent = None;
    }
}

#[derive(Copy, Clone)]
enum Slot {
    Left,
    Right,
}
