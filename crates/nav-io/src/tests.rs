//! Unit tests for nav-io.

#[cfg(test)]
mod helpers {
    use nav_core::{MeshConfig, Vec2};
    use nav_field::PointCloud;
    use nav_mesh::{NavMesh, build_mesh};

    /// Two plus-junctions joined by a corridor: a mesh with real nodes,
    /// a way, and fully populated fields.
    pub fn twin_cross_mesh() -> NavMesh {
        let mut pts = Vec::new();
        for i in 0..=64 {
            let v = i as f32;
            let in_left = v > 16.5 && v < 23.5;
            let in_right = v > 40.5 && v < 47.5;
            if !in_left && !in_right {
                pts.push(Vec2::new(v, 28.5));
                pts.push(Vec2::new(v, 35.5));
            }
            if !(v > 28.5 && v < 35.5) {
                pts.push(Vec2::new(16.5, v));
                pts.push(Vec2::new(23.5, v));
                pts.push(Vec2::new(40.5, v));
                pts.push(Vec2::new(47.5, v));
            }
        }
        let cfg = MeshConfig {
            width: 64,
            height: 64,
            min_item_size: 2.0,
            min_path_width: 3.0,
            node_area: 2,
        };
        build_mesh(&PointCloud::build(&pts), &cfg).unwrap()
    }
}

#[cfg(test)]
mod mesh_round_trip {
    use nav_core::Vec2;
    use nav_route::{FlowFieldRouter, Router};

    use super::helpers::twin_cross_mesh;
    use crate::{load_mesh, save_mesh};

    #[test]
    fn save_then_load_compares_equal() {
        let mesh = twin_cross_mesh();
        let dir = tempfile::tempdir().unwrap();
        save_mesh(&mesh, dir.path()).unwrap();

        let loaded = load_mesh(dir.path()).unwrap().expect("mesh should load");

        assert_eq!(loaded.width, mesh.width);
        assert_eq!(loaded.height, mesh.height);
        assert_eq!(loaded.min_item_size, mesh.min_item_size);

        // Graph: nodes in id order, ways with identical metadata, and both
        // endpoints indexing their ways.
        assert_eq!(loaded.nodes, mesh.nodes);
        assert_eq!(loaded.ways, mesh.ways);

        // Every field byte-for-byte.
        assert_eq!(loaded.sdf.cells, mesh.sdf.cells);
        assert_eq!(loaded.vsdf, mesh.vsdf);
        assert_eq!(loaded.path_dis_map, mesh.path_dis_map);
        assert_eq!(loaded.path_nav_map, mesh.path_nav_map);
        assert_eq!(loaded.id_map, mesh.id_map);
    }

    #[test]
    fn loaded_mesh_routes_without_rebuilding() {
        let mesh = twin_cross_mesh();
        let dir = tempfile::tempdir().unwrap();
        save_mesh(&mesh, dir.path()).unwrap();
        let loaded = load_mesh(dir.path()).unwrap().unwrap();

        let route =
            FlowFieldRouter.route(&loaded, Vec2::new(27.0, 32.0), Vec2::new(37.0, 32.0), 0.0);
        assert!(!route.is_empty());
    }

    #[test]
    fn missing_directory_is_not_a_mesh() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("nothing_here");
        assert!(load_mesh(&absent).unwrap().is_none());
    }

    #[test]
    fn malformed_config_is_not_a_mesh() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.txt"), "not numbers\n").unwrap();
        assert!(load_mesh(dir.path()).unwrap().is_none());
    }

    #[test]
    fn truncated_chunk_is_not_a_mesh() {
        let mesh = twin_cross_mesh();
        let dir = tempfile::tempdir().unwrap();
        save_mesh(&mesh, dir.path()).unwrap();

        // Chop the id map short.
        let id_chunk = dir.path().join("idMap.chunk");
        let bytes = std::fs::read(&id_chunk).unwrap();
        std::fs::write(&id_chunk, &bytes[..bytes.len() / 2]).unwrap();

        assert!(load_mesh(dir.path()).unwrap().is_none());
    }
}

#[cfg(test)]
mod points_file {
    use nav_core::Vec2;

    use crate::{load_points, save_points};

    #[test]
    fn round_trip() {
        let pts = vec![Vec2::new(1.5, 2.25), Vec2::new(-3.0, 64.0), Vec2::new(0.0, 0.0)];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.txt");

        save_points(&pts, &path).unwrap();
        assert_eq!(load_points(&path).unwrap(), pts);
    }

    #[test]
    fn junk_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.txt");
        std::fs::write(&path, "1 2\noops\n3.5 4.5\n").unwrap();

        let pts = load_points(&path).unwrap();
        assert_eq!(pts, vec![Vec2::new(1.0, 2.0), Vec2::new(3.5, 4.5)]);
    }
}

#[cfg(test)]
mod trail {
    use nav_agent::AgentSet;
    use nav_core::Vec2;
    use nav_sim::SimObserver;

    use crate::TrailWriter;

    #[test]
    fn writes_one_row_per_agent_per_tick() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trails.csv");

        let mut agents = AgentSet::new();
        agents.add(Vec2::new(1.0, 2.0), 1.0);
        agents.add(Vec2::new(3.0, 4.0), 1.0);

        let mut writer = TrailWriter::create(&path).unwrap();
        writer.on_tick(1, 2, &agents);
        writer.on_tick(2, 0, &agents);
        writer.on_run_end(2);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "agent_id,tick,x,y");
        // 2 ticks × 2 agents.
        assert_eq!(lines.len(), 1 + 4);
        assert_eq!(lines[1], "0,1,1,2");
    }
}
