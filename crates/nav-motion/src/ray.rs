//! Sphere tracing over the scalar SDF.
//!
//! The SDF value at a point is the radius of an empty disc around it, so a
//! ray can always advance by the sampled distance without skipping an
//! obstacle.  Marching therefore takes long steps in open space and short
//! ones near walls.

use nav_core::Vec2;
use nav_field::SdfField;

/// Minimum advance per step; keeps degenerate widths from stalling the
/// march.
const MIN_STEP: f32 = 1e-3;

/// Outcome of one march.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct March {
    /// `true` when the clearance dropped below the path width somewhere
    /// along the segment (including at the start).
    pub hit: bool,
    /// The sampled position with the smallest clearance seen.
    pub nearest: Vec2,
}

/// March from `begin` toward `end` at the given path width.
pub fn ray_march(sdf: &SdfField, begin: Vec2, end: Vec2, path_width: f32) -> March {
    let start_clear = sdf.sample(begin);
    if start_clear < path_width {
        return March { hit: true, nearest: begin };
    }

    let total = begin.distance(end);
    if total <= MIN_STEP {
        return March { hit: false, nearest: begin };
    }
    let dir = (end - begin) / total;

    // First step is safe by the disc property.
    let mut pos = begin + dir * start_clear.min(total);
    let mut nearest = pos;
    let mut nearest_clear = sdf.sample(pos);

    while pos.distance_squared(end) > path_width * path_width {
        let clear = sdf.sample(pos);
        if clear < nearest_clear {
            nearest_clear = clear;
            nearest = pos;
        }
        if clear < path_width {
            return March { hit: true, nearest };
        }
        let remaining = pos.distance(end);
        pos += dir * clear.min(remaining).max(MIN_STEP);
    }
    March { hit: false, nearest }
}
