//! Unit tests for nav-field.

#[cfg(test)]
mod helpers {
    use nav_core::Vec2;

    /// Two horizontal walls of obstacle points with a free corridor between.
    /// Walls sit on rows `y = 1` and `y = y_top` (interior rows, so the
    /// walls are real obstacles rather than map edges), one point per
    /// integer x.
    pub fn corridor_points(width: i32, y_top: i32) -> Vec<Vec2> {
        let mut pts = Vec::new();
        for x in 0..width {
            pts.push(Vec2::new(x as f32, 1.0));
            pts.push(Vec2::new(x as f32, y_top as f32));
        }
        pts
    }
}

#[cfg(test)]
mod cloud {
    use nav_core::Vec2;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::PointCloud;

    #[test]
    fn empty_cloud_has_no_nearest() {
        let cloud = PointCloud::build(&[]);
        assert!(cloud.is_empty());
        assert!(cloud.nearest(Vec2::new(3.0, 4.0)).is_none());
    }

    #[test]
    fn nearest_matches_brute_force() {
        let mut rng = SmallRng::seed_from_u64(7);
        let points: Vec<Vec2> = (0..200)
            .map(|_| Vec2::new(rng.gen_range(0.0..64.0), rng.gen_range(0.0..64.0)))
            .collect();
        let cloud = PointCloud::build(&points);
        assert_eq!(cloud.len(), 200);

        for _ in 0..50 {
            let q = Vec2::new(rng.gen_range(-8.0..72.0), rng.gen_range(-8.0..72.0));
            let got = cloud.nearest(q).unwrap();
            let best = points
                .iter()
                .copied()
                .min_by(|a, b| {
                    a.distance_squared(q).partial_cmp(&b.distance_squared(q)).unwrap()
                })
                .unwrap();
            // The index must be exact: same distance as the brute-force winner.
            assert_eq!(got.distance_squared(q), best.distance_squared(q));
        }
    }
}

#[cfg(test)]
mod sdf {
    use approx::assert_relative_eq;
    use nav_core::{IVec2, Vec2};

    use crate::{PointCloud, build_sdf_maps};

    #[test]
    fn empty_world_measures_edge_distance() {
        let cloud = PointCloud::build(&[]);
        let (sdf, _) = build_sdf_maps(&cloud, 32, 32);

        for (c, &d) in sdf.cells.iter_cells() {
            let edge = (c.x.min(c.y).min(32 - c.x).min(32 - c.y)) as f32;
            assert_relative_eq!(d, edge, epsilon = 1e-5);
        }
        assert_relative_eq!(sdf.at(16, 16), 16.0, epsilon = 1e-5);
    }

    #[test]
    fn scalar_field_is_vector_field_norm() {
        let points = super::helpers::corridor_points(20, 8);
        let cloud = PointCloud::build(&points);
        let (sdf, vsdf) = build_sdf_maps(&cloud, 20, 10);

        for (c, cell) in vsdf.iter_cells() {
            assert_relative_eq!(sdf.cell(c), cell.dir.length(), epsilon = 1e-4);
            // dir is pos relative to the cell.
            let p = c.as_vec2();
            assert_relative_eq!(cell.pos.x, (p + cell.dir).x, epsilon = 1e-4);
            assert_relative_eq!(cell.pos.y, (p + cell.dir).y, epsilon = 1e-4);
        }
    }

    #[test]
    fn obstacle_beats_farther_edge() {
        let cloud = PointCloud::build(&[Vec2::new(16.0, 16.0)]);
        let (sdf, vsdf) = build_sdf_maps(&cloud, 32, 32);

        // Next to the obstacle the obstacle wins over any edge.
        assert_relative_eq!(sdf.at(17, 16), 1.0, epsilon = 1e-5);
        assert_eq!(vsdf.cell(IVec2::new(17, 16)).pos, Vec2::new(16.0, 16.0));
        // In a corner the edge wins.
        assert_relative_eq!(sdf.at(1, 1), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn bilinear_sample_interpolates() {
        let cloud = PointCloud::build(&[]);
        let (sdf, _) = build_sdf_maps(&cloud, 16, 16);

        // Halfway between (1, 8) and (2, 8): edge distances 1 and 2.
        assert_relative_eq!(sdf.sample(Vec2::new(1.5, 8.0)), 1.5, epsilon = 1e-4);
        // Exactly on a cell reproduces the cell value.
        assert_relative_eq!(sdf.sample(Vec2::new(3.0, 8.0)), sdf.at(3, 8), epsilon = 1e-5);
    }

    #[test]
    fn sample_outside_is_zero() {
        let cloud = PointCloud::build(&[]);
        let (sdf, _) = build_sdf_maps(&cloud, 16, 16);
        assert_eq!(sdf.sample(Vec2::new(-0.5, 4.0)), 0.0);
        assert_eq!(sdf.sample(Vec2::new(4.0, 15.5)), 0.0);
    }
}

#[cfg(test)]
mod ridge {
    use nav_core::IVec2;

    use crate::{PointCloud, RIDGE_MIN_COS, build_sdf_maps, is_ridge};

    #[test]
    fn corridor_centerline_is_ridge() {
        let points = super::helpers::corridor_points(20, 8);
        let cloud = PointCloud::build(&points);
        let (sdf, vsdf) = build_sdf_maps(&cloud, 20, 10);

        let ridge_at =
            |x, y| is_ridge(&sdf, &vsdf, IVec2::new(x, y), 2.0, RIDGE_MIN_COS);

        // The corridor spans y = 2..=7; its medial rows are y = 4 and y = 5.
        assert!(ridge_at(10, 4));
        assert!(ridge_at(10, 5));
        assert!(!ridge_at(10, 3));
        assert!(!ridge_at(10, 6));
    }

    #[test]
    fn border_and_low_clearance_never_ridge() {
        let points = super::helpers::corridor_points(20, 8);
        let cloud = PointCloud::build(&points);
        let (sdf, vsdf) = build_sdf_maps(&cloud, 20, 10);

        assert!(!is_ridge(&sdf, &vsdf, IVec2::new(0, 4), 2.0, RIDGE_MIN_COS));
        assert!(!is_ridge(&sdf, &vsdf, IVec2::new(10, 0), 2.0, RIDGE_MIN_COS));
        // Huge clearance requirement rejects everything.
        assert!(!is_ridge(&sdf, &vsdf, IVec2::new(10, 4), 100.0, RIDGE_MIN_COS));
    }

    /// With no obstacles there is nothing for a medial axis to run between;
    /// map edges alone must never produce ridge cells.
    #[test]
    fn empty_world_has_no_ridge() {
        let cloud = PointCloud::build(&[]);
        let (sdf, vsdf) = build_sdf_maps(&cloud, 32, 32);
        for y in 0..32 {
            for x in 0..32 {
                assert!(!is_ridge(&sdf, &vsdf, IVec2::new(x, y), 2.0, RIDGE_MIN_COS));
            }
        }
    }
}
