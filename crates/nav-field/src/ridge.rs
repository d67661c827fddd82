//! Medial-axis cell predicate.
//!
//! A cell sits on the medial axis of free space when the maximal inscribed
//! circle centered there touches the obstacle set in more than one place.
//! The vector SDF makes that observable locally: cells flanking a ridge
//! have nearest-obstacle directions pointing away from each other, so the
//! cosine of the angle between them drops.
//!
//! Only obstacle-driven directions count.  Where the nearest feature is a
//! map edge the direction says nothing about obstacles, and an empty map
//! must not grow a road skeleton out of its own borders.

use nav_core::{IVec2, Vec2};

use crate::sdf::{SdfField, VectorCell, VectorSdf};

/// Default coherence threshold: cos 30°.  Flanking directions more than 30°
/// apart mark a ridge.
pub const RIDGE_MIN_COS: f32 = 0.866_025_4;

/// The four opposite-neighbor stencils through a cell: horizontal,
/// vertical, and the two diagonals.
const STENCILS: [[IVec2; 2]; 4] = [
    [IVec2::new(-1, 0), IVec2::new(1, 0)],
    [IVec2::new(0, -1), IVec2::new(0, 1)],
    [IVec2::new(-1, -1), IVec2::new(1, 1)],
    [IVec2::new(-1, 1), IVec2::new(1, -1)],
];

/// `true` iff `p` is a medial-axis (ridge) cell.
///
/// Requires: `p` not on the map border, clearance above `min_item_size`,
/// and at least one stencil whose flanking directions are both
/// obstacle-driven and have a dot product below `min_cos`.
pub fn is_ridge(
    sdf: &SdfField,
    vsdf: &VectorSdf,
    p: IVec2,
    min_item_size: f32,
    min_cos: f32,
) -> bool {
    // Border cells cannot host a full stencil.
    if p.x <= 0 || p.y <= 0 || p.x >= sdf.width() - 1 || p.y >= sdf.height() - 1 {
        return false;
    }
    if sdf.cell(p) <= min_item_size {
        return false;
    }

    let w = sdf.width();
    let h = sdf.height();
    STENCILS.iter().any(|[a, b]| {
        match (obstacle_dir(vsdf, w, h, p + *a), obstacle_dir(vsdf, w, h, p + *b)) {
            (Some(da), Some(db)) => da.dot(db) < min_cos,
            _ => false,
        }
    })
}

/// The cell's normalized nearest-point direction, or `None` when that
/// nearest point lies on the map boundary rectangle.
fn obstacle_dir(vsdf: &VectorSdf, width: i32, height: i32, c: IVec2) -> Option<Vec2> {
    let cell: &VectorCell = vsdf.cell(c);
    let p = cell.pos;
    let on_edge = p.x == 0.0 || p.y == 0.0 || p.x == width as f32 || p.y == height as f32;
    if on_edge {
        None
    } else {
        Some(cell.dir.normalize_or_zero())
    }
}
