//! Grid geometry helpers on top of glam.
//!
//! Continuous positions are `Vec2` (grid-space units, one unit per cell);
//! cell coordinates are `IVec2`.  Conversions go through `IVec2::as_vec2`
//! and `Vec2::as_ivec2`; positions inside the grid are non-negative, so the
//! truncation in `as_ivec2` is a floor.

pub use glam::{IVec2, Vec2};

/// Sentinel cell used by the flow fields for "no target" / "on the road".
pub const NO_CELL: IVec2 = IVec2::new(-1, -1);

/// The eight neighbor offsets in row-major scan order.  Flow-field and
/// component passes iterate this array directly, so its order is part of the
/// deterministic tie-break contract.
pub const NEIGHBORS_8: [IVec2; 8] = [
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
];

/// Cumulative Euclidean length of a cell polyline.
pub fn path_length(cells: &[IVec2]) -> f32 {
    cells
        .windows(2)
        .map(|w| w[0].as_vec2().distance(w[1].as_vec2()))
        .sum()
}

/// Cumulative Euclidean length of a real-valued polyline.
pub fn poly_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
