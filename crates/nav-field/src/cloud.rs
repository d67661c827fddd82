//! Obstacle point cloud with an exact nearest-neighbor index.
//!
//! Obstacles are sampled once at build time; the cloud is immutable after
//! construction.  An R-tree (via `rstar`) answers exact nearest queries in
//! O(log n); the SDF build issues one query per grid cell.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use nav_core::Vec2;

// ── R-tree obstacle entry ─────────────────────────────────────────────────────

/// Entry stored in the R-tree: a bare 2-D point in grid space.
#[derive(Clone)]
struct ObstacleEntry {
    point: [f32; 2],
}

impl RTreeObject for ObstacleEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for ObstacleEntry {
    /// Squared Euclidean distance; grid space is already planar, so the
    /// nearest-by-`distance_2` entry is the exact nearest obstacle.
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── PointCloud ────────────────────────────────────────────────────────────────

/// Immutable obstacle set supporting `nearest(q)`.
pub struct PointCloud {
    tree: RTree<ObstacleEntry>,
}

impl PointCloud {
    /// Bulk-load the index from a point set.  O(n log n), faster than n
    /// single inserts.
    pub fn build(points: &[Vec2]) -> Self {
        let entries = points
            .iter()
            .map(|p| ObstacleEntry { point: [p.x, p.y] })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// The obstacle nearest to `q`, or `None` for an empty cloud.
    pub fn nearest(&self, q: Vec2) -> Option<Vec2> {
        self.tree
            .nearest_neighbor(&[q.x, q.y])
            .map(|e| Vec2::new(e.point[0], e.point[1]))
    }

    /// Iterate all obstacle points (arbitrary order).  Used by the points
    /// persistence layer.
    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.tree
            .iter()
            .map(|e| Vec2::new(e.point[0], e.point[1]))
    }
}
