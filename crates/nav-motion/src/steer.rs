//! Per-tick steering with avoidance rotations.

use nav_core::{IVec2, Vec2};
use nav_field::SdfField;
use nav_index::{Hbb, RayRegion, ray_dist};

use crate::optpath::opt_path;
use crate::ray::ray_march;

/// Avoidance rotation limit: ±60°.
const AVOID_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

/// Iterations of the rotation-angle binary search.
const AVOID_ITERS: usize = 8;

// ── Dynamic ray test ──────────────────────────────────────────────────────────

/// `true` when the segment from `begin` toward `end`, capped at `range`,
/// passes within another agent's circle.
///
/// Hits whose closest feature is the segment start are "behind" the mover
/// and count as passing around rather than colliding.  The mover's own
/// leaf is filtered by its token.
pub fn dynamic_ray_hit<D: Copy + PartialEq>(
    index: &Hbb<D>,
    begin: Vec2,
    end: Vec2,
    range: f32,
    exclude: D,
) -> bool {
    let dir = end - begin;
    let len = dir.length();
    if len <= 0.0 {
        return false;
    }
    let capped = begin + dir * (range / len);

    let mut hit = false;
    index.fetch_by_ray(begin, capped, |token, circle| {
        if hit || token == exclude {
            return;
        }
        let (dist, region) = ray_dist(begin, capped, circle.center);
        if dist < circle.r && region != RayRegion::Begin {
            hit = true;
        }
    });
    hit
}

// ── Avoidance ─────────────────────────────────────────────────────────────────

/// Try to reach `candidate` from `current`, rotating the displacement up
/// to ±60° when the straight move is blocked.  `None` means no clear move
/// exists this tick.
pub fn avoid<D: Copy + PartialEq>(
    sdf: &SdfField,
    index: &Hbb<D>,
    exclude: D,
    current: Vec2,
    candidate: Vec2,
    radius: f32,
) -> Option<Vec2> {
    // A committed position must itself keep full clearance: the march can
    // legitimately jump a short segment inside the start's empty disc, but
    // the agent still may not END somewhere narrower than its radius.
    let clear = |to: Vec2| {
        sdf.sample(to) > radius
            && !ray_march(sdf, current, to, radius).hit
            && !dynamic_ray_hit(index, current, to, current.distance(to), exclude)
    };

    if clear(candidate) {
        return Some(candidate);
    }

    let delta = candidate - current;
    for sign in [1.0f32, -1.0] {
        if !clear(current + Vec2::from_angle(sign * AVOID_ANGLE).rotate(delta)) {
            continue;
        }
        // The full rotation clears; shrink it to the smallest angle that
        // still does.
        let mut lo = 0.0f32;
        let mut hi = AVOID_ANGLE;
        for _ in 0..AVOID_ITERS {
            let mid = (lo + hi) * 0.5;
            if clear(current + Vec2::from_angle(sign * mid).rotate(delta)) {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        return Some(current + Vec2::from_angle(sign * hi).rotate(delta));
    }
    None
}

// ── Per-tick step ─────────────────────────────────────────────────────────────

/// Compute the next position for an agent following `path`.
///
/// Straightens the cell route, aims one `vel`-length step at the first
/// straightened vertex farther than `vel` (or directly at the final vertex
/// when everything is closer), then runs avoidance.  `None` means the
/// agent cannot (or need not) move this tick.
pub fn next_pos<D: Copy + PartialEq>(
    path: &[IVec2],
    sdf: &SdfField,
    index: &Hbb<D>,
    exclude: D,
    current: Vec2,
    vel: f32,
    radius: f32,
) -> Option<Vec2> {
    if path.is_empty() {
        return None;
    }
    let poly: Vec<Vec2> = path.iter().map(|c| c.as_vec2()).collect();
    let opt = opt_path(&poly, sdf, radius);
    steer_along(&opt, sdf, index, exclude, current, vel, radius)
}

/// The steering half of [`next_pos`], for callers that already hold the
/// straightened polyline (the sim driver keeps it for observers).
pub fn steer_along<D: Copy + PartialEq>(
    opt: &[Vec2],
    sdf: &SdfField,
    index: &Hbb<D>,
    exclude: D,
    current: Vec2,
    vel: f32,
    radius: f32,
) -> Option<Vec2> {
    let candidate = match opt.iter().find(|p| p.distance(current) > vel) {
        Some(&aim) => current + (aim - current).normalize_or_zero() * vel,
        // Everything is within reach: go straight to the goal.
        None => *opt.last()?,
    };
    if candidate.distance(current) <= 1e-3 {
        return None;
    }

    avoid(sdf, index, exclude, current, candidate, radius)
}
