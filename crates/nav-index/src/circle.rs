//! Bounding-circle math shared by the tree and its queries.

use glam::Vec2;

/// Slack applied to containment checks so float rounding on the merge math
/// never makes a freshly merged parent "not contain" its children.
const CONTAIN_EPS: f32 = 1e-4;

/// A circle in grid space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub r: f32,
}

impl Circle {
    #[inline]
    pub fn new(center: Vec2, r: f32) -> Self {
        Self { center, r }
    }

    /// `true` iff `p` lies strictly inside.
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.center.distance_squared(p) < self.r * self.r
    }

    /// `true` iff `other` lies entirely inside `self` (with rounding slack).
    #[inline]
    pub fn contains_circle(&self, other: &Circle) -> bool {
        self.center.distance(other.center) + other.r <= self.r + CONTAIN_EPS
    }

    /// `true` iff the two circles overlap.
    #[inline]
    pub fn intersects(&self, other: &Circle) -> bool {
        let rr = self.r + other.r;
        self.center.distance_squared(other.center) < rr * rr
    }

    /// Radius the bound of `self` and `other` would have, used to pick the
    /// cheaper child to merge with on insertion.
    #[inline]
    pub fn merge_cost(&self, other: &Circle) -> f32 {
        (self.center.distance(other.center) + self.r + other.r) * 0.5
    }

    /// The tight bounding circle of two circles.
    ///
    /// For distinct centers the bound's diameter is the chord from the far
    /// side of `self` to the far side of `other` along the center line.
    pub fn merge(&self, other: &Circle) -> Circle {
        let line = other.center - self.center;
        let d = line.length();
        if d <= 0.0 {
            return Circle::new(self.center, self.r.max(other.r));
        }
        let dir = line / d;
        let b1 = self.center - dir * self.r;
        let b2 = other.center + dir * other.r;
        Circle::new((b1 + b2) * 0.5, b1.distance(b2) * 0.5)
    }
}

// ── Segment distance ──────────────────────────────────────────────────────────

/// Which feature of the segment was closest.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RayRegion {
    /// Closest to the segment start.  Ray-test callers treat hits here as
    /// "behind the agent" and let them pass.
    Begin,
    /// Closest to the segment end.
    End,
    /// Perpendicular foot inside the segment.
    Interior,
}

/// Exact distance from `c` to the closed segment `p1 p2`, plus the closest
/// feature.  A degenerate segment (`p1 == p2`) measures to the point and
/// reports [`RayRegion::Begin`].
pub fn ray_dist(p1: Vec2, p2: Vec2, c: Vec2) -> (f32, RayRegion) {
    let u = p2 - p1;
    let len2 = u.length_squared();
    if len2 <= 0.0 {
        return (c.distance(p1), RayRegion::Begin);
    }

    let t = (c - p1).dot(u) / len2;
    if t <= 0.0 {
        (c.distance(p1), RayRegion::Begin)
    } else if t >= 1.0 {
        (c.distance(p2), RayRegion::End)
    } else {
        let s = (c - p1).perp_dot(u);
        (s.abs() / len2.sqrt(), RayRegion::Interior)
    }
}
