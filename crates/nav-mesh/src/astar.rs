//! Capped grid A* over an arbitrary cell predicate.
//!
//! Used twice: between two node centroids during way construction, and as
//! the road-walking fallback when a route query lands on bare road with no
//! way metadata (a mesh with roads but no junctions).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use nav_core::{IVec2, NEIGHBORS_8};

/// Heap entry ordered by ascending f, then by cell scan order so equal-cost
/// pops are deterministic.
#[derive(Copy, Clone, PartialEq)]
struct OpenEntry {
    f: f32,
    cell: IVec2,
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap and we want the smallest f.
        other
            .f
            .partial_cmp(&self.f)
            .unwrap_or(Ordering::Equal)
            .then_with(|| (other.cell.y, other.cell.x).cmp(&(self.cell.y, self.cell.x)))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest 8-connected path from `start` to `goal` over cells satisfying
/// `allowed`, both endpoints included in the result.
///
/// Diagonal steps cost √2, straight steps 1; the heuristic is Euclidean
/// distance, so paths are optimal.  At most `it_cap` nodes are expanded;
/// hitting the cap returns `None` (the caller treats it like "unreachable").
pub fn grid_astar(
    allowed: impl Fn(IVec2) -> bool,
    start: IVec2,
    goal: IVec2,
    it_cap: usize,
) -> Option<Vec<IVec2>> {
    if !allowed(start) || !allowed(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let mut g: FxHashMap<IVec2, f32> = FxHashMap::default();
    let mut prev: FxHashMap<IVec2, IVec2> = FxHashMap::default();
    let mut open = BinaryHeap::new();

    g.insert(start, 0.0);
    open.push(OpenEntry { f: heuristic(start, goal), cell: start });

    let mut expanded = 0usize;
    while let Some(OpenEntry { f, cell }) = open.pop() {
        if cell == goal {
            return Some(reconstruct(&prev, start, goal));
        }
        // Skip stale heap entries.
        let g_cell = g[&cell];
        if f > g_cell + heuristic(cell, goal) + 1e-4 {
            continue;
        }

        expanded += 1;
        if expanded > it_cap {
            return None;
        }

        for step in NEIGHBORS_8 {
            let next = cell + step;
            if !allowed(next) {
                continue;
            }
            let cost = g_cell + step.as_vec2().length();
            if g.get(&next).is_none_or(|&old| cost < old) {
                g.insert(next, cost);
                prev.insert(next, cell);
                open.push(OpenEntry { f: cost + heuristic(next, goal), cell: next });
            }
        }
    }
    None
}

#[inline]
fn heuristic(a: IVec2, b: IVec2) -> f32 {
    a.as_vec2().distance(b.as_vec2())
}

fn reconstruct(prev: &FxHashMap<IVec2, IVec2>, start: IVec2, goal: IVec2) -> Vec<IVec2> {
    let mut path = vec![goal];
    let mut cur = goal;
    while cur != start {
        cur = prev[&cur];
        path.push(cur);
    }
    path.reverse();
    path
}
