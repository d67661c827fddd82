//! Road-attraction flow field.
//!
//! A breadth-first flood from every road cell outward.  Following the
//! stored `target` pointers from any reachable cell walks back onto the
//! road; the cost is monotonically decreasing along that walk, so the walk
//! always terminates.

use std::collections::VecDeque;

use nav_core::{IVec2, NEIGHBORS_8, NO_CELL};

use crate::mesh::{CELL_FREE, NavMesh, PathNavCell};

/// Narrow cells cost extra so the attraction field routes around tight
/// gaps: `penalty = NARROW_PENALTY / clearance` when the clearance is at or
/// below the configured path width.
const NARROW_PENALTY: f32 = 1000.0;

/// Clearance floor for the penalty divisor, so obstacle-adjacent cells get
/// a large finite penalty instead of ∞.
const MIN_CLEARANCE: f32 = 1e-3;

/// Flood the whole map with "one step toward the road" pointers.
///
/// Seeds are all road cells (ways and node blocks alike); they hold
/// `(NO_CELL, 0)`.  Cells the flood never reaches keep `(NO_CELL, -1)`.
pub fn build_nav_flow_field(mesh: &mut NavMesh, min_path_width: f32) {
    mesh.path_nav_map.fill(PathNavCell::UNREACHABLE);
    let generation = mesh.bump_search_gen();

    let mut queue: VecDeque<IVec2> = VecDeque::new();
    for y in 0..mesh.height {
        for x in 0..mesh.width {
            if *mesh.id_map.at(x, y) == CELL_FREE {
                continue;
            }
            let seed = IVec2::new(x, y);
            *mesh.path_nav_map.cell_mut(seed) = PathNavCell::ON_ROAD;
            *mesh.search_map.cell_mut(seed) = generation;
            for step in NEIGHBORS_8 {
                let n = seed + step;
                if mesh.contains(n) {
                    queue.push_back(n);
                }
            }
        }
    }

    while let Some(pos) = queue.pop_front() {
        if *mesh.search_map.cell(pos) == generation {
            continue;
        }

        // Cheapest finalized neighbor; NEIGHBORS_8 order breaks ties.
        let mut best: Option<(IVec2, f32)> = None;
        for step in NEIGHBORS_8 {
            let n = pos + step;
            if !mesh.contains(n) || *mesh.search_map.cell(n) != generation {
                continue;
            }
            let through = mesh.path_nav_map.cell(n).cost + step.as_vec2().length();
            if best.is_none_or(|(_, w)| through < w) {
                best = Some((n, through));
            }
        }
        let Some((target, through)) = best else {
            continue;
        };

        let clearance = mesh.sdf.cell(pos);
        let penalty = if clearance <= min_path_width {
            NARROW_PENALTY / clearance.max(MIN_CLEARANCE)
        } else {
            0.0
        };

        *mesh.path_nav_map.cell_mut(pos) = PathNavCell { target, cost: through + penalty };
        *mesh.search_map.cell_mut(pos) = generation;
        for step in NEIGHBORS_8 {
            let n = pos + step;
            if mesh.contains(n) && *mesh.search_map.cell(n) != generation {
                queue.push_back(n);
            }
        }
    }
}

// ── Road attraction ───────────────────────────────────────────────────────────

/// The walk from an off-road cell onto the road.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadAttraction {
    /// Every cell visited, starting cell first, foothold last.
    pub tail: Vec<IVec2>,
    /// The on-road cell the walk landed on.
    pub foothold: IVec2,
}

/// Follow the flow field from `start` until it reaches the road.
///
/// Fails (`None`) when `start` is off-grid, when the flood never reached
/// it, or when the walk ends on a cell that is not actually part of the
/// road network.
pub fn to_road(mesh: &NavMesh, start: IVec2) -> Option<RoadAttraction> {
    let mut tail = Vec::new();
    let mut cur = start;

    // Cost strictly decreases along the walk, so |cells| bounds it; the cap
    // only matters for fields corrupted on disk.
    let cap = mesh.width as usize * mesh.height as usize;
    for _ in 0..=cap {
        if !mesh.contains(cur) {
            return None;
        }
        let cell = *mesh.path_nav_map.cell(cur);
        if !cell.reachable() {
            return None;
        }
        tail.push(cur);
        if cell.target == NO_CELL {
            break;
        }
        cur = cell.target;
    }

    let foothold = *tail.last()?;
    if mesh.label(foothold) != CELL_FREE {
        Some(RoadAttraction { tail, foothold })
    } else {
        None
    }
}
