//! Unit tests for nav-index.

#[cfg(test)]
mod helpers {
    use glam::Vec2;

    use crate::{Circle, Hbb};

    /// Probe circle large enough to intersect anything on the grid.
    pub fn everything() -> Circle {
        Circle::new(Vec2::ZERO, 1.0e9)
    }

    /// Collect every accessible leaf (token, circle).
    pub fn all_leaves(hbb: &Hbb<u32>) -> Vec<(u32, Circle)> {
        let mut out = Vec::new();
        hbb.collision_test(&everything(), |d, c| out.push((d, c)));
        out
    }
}

#[cfg(test)]
mod circle_math {
    use approx::assert_relative_eq;
    use glam::Vec2;

    use crate::{Circle, RayRegion, ray_dist};

    #[test]
    fn merge_contains_both_inputs() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 2.0);
        let b = Circle::new(Vec2::new(10.0, 0.0), 1.0);
        let m = a.merge(&b);
        assert!(m.contains_circle(&a));
        assert!(m.contains_circle(&b));
        // Chord runs from (-2, 0) to (11, 0): center 4.5, radius 6.5.
        assert_relative_eq!(m.center.x, 4.5, epsilon = 1e-5);
        assert_relative_eq!(m.r, 6.5, epsilon = 1e-5);
    }

    #[test]
    fn merge_concentric_takes_larger_radius() {
        let a = Circle::new(Vec2::new(3.0, 3.0), 1.0);
        let b = Circle::new(Vec2::new(3.0, 3.0), 4.0);
        let m = a.merge(&b);
        assert_eq!(m.center, Vec2::new(3.0, 3.0));
        assert_eq!(m.r, 4.0);
    }

    #[test]
    fn merge_of_contained_circle_is_tight() {
        let big = Circle::new(Vec2::new(0.0, 0.0), 5.0);
        let small = Circle::new(Vec2::new(1.0, 0.0), 1.0);
        let m = big.merge(&small);
        assert!(m.r <= big.r + 1e-4);
    }

    #[test]
    fn ray_dist_interior_is_perpendicular() {
        let (d, region) =
            ray_dist(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(5.0, 3.0));
        assert_relative_eq!(d, 3.0, epsilon = 1e-5);
        assert_eq!(region, RayRegion::Interior);
    }

    #[test]
    fn ray_dist_clamps_to_endpoints() {
        let p1 = Vec2::new(0.0, 0.0);
        let p2 = Vec2::new(10.0, 0.0);
        let (d, region) = ray_dist(p1, p2, Vec2::new(-3.0, 4.0));
        assert_relative_eq!(d, 5.0, epsilon = 1e-5);
        assert_eq!(region, RayRegion::Begin);

        let (d, region) = ray_dist(p1, p2, Vec2::new(13.0, -4.0));
        assert_relative_eq!(d, 5.0, epsilon = 1e-5);
        assert_eq!(region, RayRegion::End);
    }

    #[test]
    fn ray_dist_degenerate_segment() {
        let p = Vec2::new(2.0, 2.0);
        let (d, region) = ray_dist(p, p, Vec2::new(2.0, 7.0));
        assert_relative_eq!(d, 5.0, epsilon = 1e-5);
        assert_eq!(region, RayRegion::Begin);
    }

    /// Brute-force check of the closed-segment distance on a sample grid.
    #[test]
    fn ray_dist_matches_sampled_minimum() {
        let p1 = Vec2::new(1.0, 2.0);
        let p2 = Vec2::new(7.0, -1.0);
        for c in [
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(9.0, -3.0),
            Vec2::new(-2.0, 2.0),
            Vec2::new(3.0, 1.0),
        ] {
            let (d, _) = ray_dist(p1, p2, c);
            let sampled = (0..=1000)
                .map(|i| p1.lerp(p2, i as f32 / 1000.0).distance(c))
                .fold(f32::INFINITY, f32::min);
            assert!((d - sampled).abs() < 1e-2, "d={d} sampled={sampled}");
        }
    }
}

#[cfg(test)]
mod tree {
    use glam::Vec2;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::helpers::{all_leaves, everything};
    use crate::{Circle, Hbb};

    #[test]
    fn insert_then_query_by_point() {
        let mut hbb: Hbb<u32> = Hbb::new();
        hbb.insert(Vec2::new(10.0, 10.0), 2.0, 1);
        hbb.insert(Vec2::new(30.0, 10.0), 2.0, 2);
        hbb.insert(Vec2::new(10.0, 30.0), 2.0, 3);

        let mut found = Vec::new();
        hbb.fetch_by_point(Vec2::new(30.5, 10.5), |d, _| found.push(d));
        assert_eq!(found, vec![2]);

        found.clear();
        hbb.fetch_by_point(Vec2::new(50.0, 50.0), |d, _| found.push(d));
        assert!(found.is_empty());
    }

    #[test]
    fn ray_query_matches_brute_force() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut hbb: Hbb<u32> = Hbb::new();
        let mut circles = Vec::new();
        for i in 0..64 {
            let c = Vec2::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0));
            let r = rng.gen_range(0.5..4.0);
            hbb.insert(c, r, i);
            circles.push(Circle::new(c, r));
        }

        for _ in 0..20 {
            let p0 = Vec2::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0));
            let p1 = Vec2::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0));

            let mut got: Vec<u32> = Vec::new();
            hbb.fetch_by_ray(p0, p1, |d, _| got.push(d));
            got.sort_unstable();

            let mut want: Vec<u32> = circles
                .iter()
                .enumerate()
                .filter(|(_, c)| crate::ray_dist(p0, p1, c.center).0 < c.r)
                .map(|(i, _)| i as u32)
                .collect();
            want.sort_unstable();

            assert_eq!(got, want);
        }
    }

    #[test]
    fn update_moves_a_leaf() {
        let mut hbb: Hbb<u32> = Hbb::new();
        let h = hbb.insert(Vec2::new(5.0, 5.0), 1.0, 9);
        hbb.insert(Vec2::new(50.0, 50.0), 1.0, 1);

        let h = hbb.update(h, Vec2::new(20.0, 20.0));
        assert_eq!(hbb.len(), 2);
        assert_eq!(hbb.circle(h).center, Vec2::new(20.0, 20.0));

        let mut found = Vec::new();
        hbb.fetch_by_point(Vec2::new(20.0, 20.0), |d, _| found.push(d));
        assert_eq!(found, vec![9]);
    }

    /// The end-to-end stress scenario: 1000 random leaves in, reverse order
    /// out, with the containment invariant checked throughout.
    #[test]
    fn thousand_leaves_in_and_out() {
        let mut rng = SmallRng::seed_from_u64(99);
        let mut hbb: Hbb<u32> = Hbb::new();
        let mut handles = Vec::new();

        for i in 0..1000u32 {
            let c = Vec2::new(rng.gen_range(0.0..512.0), rng.gen_range(0.0..512.0));
            let r = rng.gen_range(0.5..8.0);
            handles.push(hbb.insert(c, r, i));

            // The root bound must contain every accessible leaf.
            let root = hbb.root_circle().unwrap();
            for (_, leaf) in all_leaves(&hbb) {
                assert!(root.contains_circle(&leaf));
            }
            if i % 100 == 99 {
                assert!(hbb.containment_ok());
            }
        }
        assert_eq!(hbb.len(), 1000);

        for (i, h) in handles.into_iter().enumerate().rev() {
            hbb.remove(h);
            assert_eq!(hbb.len(), i);
            // Accessible leaves shrink by exactly one per removal.
            assert_eq!(all_leaves(&hbb).len(), i);
        }
        assert!(hbb.is_empty());
        assert!(hbb.root_circle().is_none());
        let mut visited = 0;
        hbb.collision_test(&everything(), |_, _| visited += 1);
        assert_eq!(visited, 0);
    }

    #[test]
    fn removal_heals_interleaved() {
        let mut hbb: Hbb<u32> = Hbb::new();
        let h: Vec<_> = (0..10)
            .map(|i| hbb.insert(Vec2::new(i as f32 * 3.0, 0.0), 1.0, i))
            .collect();

        // Drop every other leaf, then confirm the survivors still answer.
        for (i, handle) in h.iter().enumerate() {
            if i % 2 == 0 {
                hbb.remove(*handle);
            }
        }
        assert_eq!(hbb.len(), 5);
        assert!(hbb.containment_ok());

        let mut tokens: Vec<u32> = all_leaves(&hbb).into_iter().map(|(d, _)| d).collect();
        tokens.sort_unstable();
        assert_eq!(tokens, vec![1, 3, 5, 7, 9]);
    }
}
