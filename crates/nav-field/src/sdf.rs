//! Signed distance field and its vectorized companion.
//!
//! # Two fields, one pass
//!
//! `SdfField` stores, per cell, the distance to the nearest obstacle or map
//! edge (whichever is smaller).  `VectorSdf` stores the full answer the
//! distance was derived from: the direction to that nearest point and the
//! point itself.  Invariant: `vsdf[c].dir.length() == sdf[c]` up to float
//! rounding.
//!
//! Cells are independent, so the build pass runs data-parallel over rows
//! (rayon).  The cloud's R-tree is read-only and `Sync`; no locking needed.

use rayon::prelude::*;

use nav_core::{Field, IVec2, Vec2};

use crate::cloud::PointCloud;

// ── Cell types ────────────────────────────────────────────────────────────────

/// One cell of the vector SDF: `pos` is the nearest obstacle or boundary
/// point, `dir = pos - cell`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VectorCell {
    pub dir: Vec2,
    pub pos: Vec2,
}

impl VectorCell {
    pub const ZERO: VectorCell = VectorCell { dir: Vec2::ZERO, pos: Vec2::ZERO };
}

/// Field of [`VectorCell`]s.
pub type VectorSdf = Field<VectorCell>;

// ── SdfField ──────────────────────────────────────────────────────────────────

/// Scalar distance field with bilinear sampling.
///
/// `cells` is public for direct indexed access on hot paths (ray marching
/// reads it every step); use [`SdfField::sample`] for continuous positions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SdfField {
    pub cells: Field<f32>,
}

impl SdfField {
    pub fn new(width: i32, height: i32) -> Self {
        Self { cells: Field::new(width, height, 0.0) }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.cells.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.cells.height()
    }

    /// Distance at an exact cell.  Panics off-grid.
    #[inline]
    pub fn at(&self, x: i32, y: i32) -> f32 {
        *self.cells.at(x, y)
    }

    /// Distance at an exact cell (`IVec2` flavor).  Panics off-grid.
    #[inline]
    pub fn cell(&self, c: IVec2) -> f32 {
        *self.cells.cell(c)
    }

    /// Checked cell probe.
    #[inline]
    pub fn get(&self, c: IVec2) -> Option<f32> {
        self.cells.get(c).copied()
    }

    /// Bilinearly interpolated distance at a continuous position.
    ///
    /// Positions outside `[0, W-1] × [0, H-1]` sample as 0: off-map counts
    /// as an obstacle, which is exactly what ray marching wants.
    pub fn sample(&self, pos: Vec2) -> f32 {
        let max_x = (self.width() - 1) as f32;
        let max_y = (self.height() - 1) as f32;
        if pos.x < 0.0 || pos.y < 0.0 || pos.x > max_x || pos.y > max_y {
            return 0.0;
        }

        let x1 = pos.x.floor() as i32;
        let y1 = pos.y.floor() as i32;
        let x2 = (x1 + 1).min(self.width() - 1);
        let y2 = (y1 + 1).min(self.height() - 1);
        let tx = pos.x - x1 as f32;
        let ty = pos.y - y1 as f32;

        let f1 = self.at(x1, y1);
        let f2 = self.at(x2, y1);
        let f3 = self.at(x1, y2);
        let f4 = self.at(x2, y2);

        let f12 = f1 + tx * (f2 - f1);
        let f34 = f3 + tx * (f4 - f3);
        f12 + ty * (f34 - f12)
    }
}

// ── Build pass ────────────────────────────────────────────────────────────────

/// Nearest obstacle-or-edge answer for one cell.
fn nearest_for_cell(cloud: &PointCloud, width: i32, height: i32, x: i32, y: i32) -> VectorCell {
    let p = Vec2::new(x as f32, y as f32);

    // The four map-edge projections of p.  The edges sit at 0 and at the
    // full extent (W, H), not at the last cell row.
    let edges = [
        Vec2::new(p.x, 0.0),
        Vec2::new(p.x, height as f32),
        Vec2::new(0.0, p.y),
        Vec2::new(width as f32, p.y),
    ];

    let mut best_pos = edges[0];
    let mut best_d2 = p.distance_squared(best_pos);
    for e in &edges[1..] {
        let d2 = p.distance_squared(*e);
        if d2 < best_d2 {
            best_d2 = d2;
            best_pos = *e;
        }
    }

    if let Some(obs) = cloud.nearest(p) {
        if p.distance_squared(obs) < best_d2 {
            best_pos = obs;
        }
    }

    VectorCell { dir: best_pos - p, pos: best_pos }
}

/// Build the scalar and vector SDFs for a `width × height` grid.
///
/// An empty cloud is fine: every cell then measures distance to the map
/// edge only.
pub fn build_sdf_maps(cloud: &PointCloud, width: i32, height: i32) -> (SdfField, VectorSdf) {
    let rows: Vec<Vec<VectorCell>> = (0..height)
        .into_par_iter()
        .map(|y| {
            (0..width)
                .map(|x| nearest_for_cell(cloud, width, height, x, y))
                .collect()
        })
        .collect();

    let mut sdf = SdfField::new(width, height);
    let mut vsdf = VectorSdf::new(width, height, VectorCell::ZERO);
    for (y, row) in rows.iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            *vsdf.at_mut(x as i32, y as i32) = *cell;
            *sdf.cells.at_mut(x as i32, y as i32) = cell.dir.length();
        }
    }
    (sdf, vsdf)
}
