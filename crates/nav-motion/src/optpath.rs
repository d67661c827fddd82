//! Polyline straightening.
//!
//! The route a mesh query returns hugs the medial axis cell by cell.  An
//! agent wants long straight segments instead, so the optimizer repeatedly
//! jumps to the farthest route vertex still visible at the agent's width.

use log::debug;

use nav_core::Vec2;
use nav_field::SdfField;

use crate::ray::ray_march;

/// Iterations of the fractional refinement along a blocked segment.
const REFINE_ITERS: usize = 8;

/// Forward progress below this counts as a stall and triggers the
/// step-to-next-vertex fallback.
const MIN_ADVANCE: f32 = 1e-3;

/// Straighten `path_in` against the SDF at `path_width`.
///
/// The output starts at the input start and ends at the input end, stays
/// in free space at the given width (except for an escape prefix when the
/// start itself is too close to an obstacle), and is never longer than the
/// input.
pub fn opt_path(path_in: &[Vec2], sdf: &SdfField, path_width: f32) -> Vec<Vec2> {
    if path_in.is_empty() {
        return Vec::new();
    }
    // Too short to be worth straightening.
    if path_in.len() <= 3 {
        return path_in.to_vec();
    }
    let last = path_in.len() - 1;

    let mut out: Vec<Vec2> = Vec::new();
    let mut idx;
    let mut cur;

    if sdf.sample(path_in[0]) > path_width {
        cur = path_in[0];
        idx = 1;
    } else {
        // Start is jammed against an obstacle: keep the verbatim start so
        // the agent can escape, then pick up at the first clear vertex.
        match path_in.iter().position(|&p| sdf.sample(p) > path_width) {
            Some(k) => {
                out.push(path_in[0]);
                cur = path_in[k];
                idx = k + 1;
            }
            // The whole route is below width; nothing to straighten.
            None => return path_in.to_vec(),
        }
    }
    out.push(cur);

    let iter_cap = path_in.len() * 32;
    let mut iters = 0usize;
    while idx <= last {
        iters += 1;
        if iters > iter_cap {
            debug!("opt_path stalled, keeping route tail verbatim");
            break;
        }

        if let Some(j) = far_visible(path_in, sdf, path_width, cur, idx, last) {
            cur = path_in[j];
            out.push(cur);
            idx = j + 1;
            continue;
        }

        // Not even the next vertex is visible: creep along the blocked
        // segment to the farthest clear fraction.
        let next = path_in[idx];
        let t = refine_fraction(sdf, path_width, cur, next);
        let reached = cur.lerp(next, t);
        if reached.distance(cur) < MIN_ADVANCE {
            // No progress at all: step straight to the vertex and let the
            // agent squeeze through.
            cur = next;
            out.push(cur);
            idx += 1;
        } else {
            cur = reached;
            out.push(cur);
            if cur.distance(next) <= path_width {
                idx += 1;
            }
        }
    }

    if out.last() != Some(&path_in[last]) {
        out.push(path_in[last]);
    }
    out
}

/// Largest `j` in `[idx, last]` whose vertex is reachable from `cur` in a
/// single clear march.  `None` when even `idx` is blocked.
fn far_visible(
    path: &[Vec2],
    sdf: &SdfField,
    width: f32,
    cur: Vec2,
    idx: usize,
    last: usize,
) -> Option<usize> {
    if ray_march(sdf, cur, path[idx], width).hit {
        return None;
    }
    let mut lo = idx;
    let mut hi = last;
    while lo < hi {
        let mid = (lo + hi + 1) / 2;
        if ray_march(sdf, cur, path[mid], width).hit {
            hi = mid - 1;
        } else {
            lo = mid;
        }
    }
    Some(lo)
}

/// Binary search in parameter space for the farthest clear fraction of the
/// segment `cur → next`.
fn refine_fraction(sdf: &SdfField, width: f32, cur: Vec2, next: Vec2) -> f32 {
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    for _ in 0..REFINE_ITERS {
        let mid = (lo + hi) * 0.5;
        if ray_march(sdf, cur, cur.lerp(next, mid), width).hit {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    lo
}
