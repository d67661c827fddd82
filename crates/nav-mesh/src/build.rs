//! The mesh build pipeline.
//!
//! Passes run strictly in order; each consumes only fields the previous
//! passes finished.  The per-cell passes (SDF, ridge flagging) are
//! data-parallel with per-thread row buffers; everything downstream is
//! sequential and deterministic (row-major scans, sorted adjacency).

use std::collections::{BTreeSet, VecDeque};

use log::{debug, info};
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use nav_core::{IVec2, MeshConfig, NEIGHBORS_8, NavResult, NodeId};
use nav_field::{PointCloud, RIDGE_MIN_COS, build_sdf_maps, is_ridge};

use crate::astar::grid_astar;
use crate::flow::build_nav_flow_field;
use crate::mesh::{CELL_FREE, CELL_RIDGE, CELL_ROAD, NavMesh, Node, PathDisCell, Way};

/// Expansion cap for the intra-corridor A*.
pub(crate) const ASTAR_IT_CAP: usize = 512;

/// Build a complete mesh from an obstacle cloud.
///
/// An empty cloud is valid and produces an empty graph (no ridge survives
/// the clearance thresholds against the map edge alone on any reasonably
/// sized map).
pub fn build_mesh(cloud: &PointCloud, cfg: &MeshConfig) -> NavResult<NavMesh> {
    cfg.validate()?;

    let mut mesh = NavMesh::new(cfg.width, cfg.height);
    mesh.min_item_size = cfg.min_item_size;

    let (sdf, vsdf) = build_sdf_maps(cloud, cfg.width, cfg.height);
    mesh.sdf = sdf;
    mesh.vsdf = vsdf;
    debug!("sdf pass done ({} points)", cloud.len());

    let start_points = build_id_map(&mut mesh, cfg);
    debug!("ridge pass: {} candidate cells", start_points.len());

    let road = remove_waste(&mut mesh, &start_points);
    debug!("island cleanup: {} road cells kept", road.len());

    let remaining = detect_nodes(&mut mesh, cfg, &road);
    build_ways(&mut mesh, cfg, &remaining);
    build_nav_flow_field(&mut mesh, cfg.min_path_width);

    info!(
        "mesh built: {}x{}, {} nodes, {} ways",
        mesh.width,
        mesh.height,
        mesh.nodes.len(),
        mesh.ways.len()
    );
    Ok(mesh)
}

// ── Ridge labeling ────────────────────────────────────────────────────────────

/// Label every qualifying ridge cell [`CELL_RIDGE`] and return them in
/// row-major order.
fn build_id_map(mesh: &mut NavMesh, cfg: &MeshConfig) -> Vec<IVec2> {
    let sdf = &mesh.sdf;
    let vsdf = &mesh.vsdf;

    // Per-row buffers, concatenated in row order afterwards: the pass stays
    // deterministic no matter how rayon schedules it.
    let rows: Vec<Vec<IVec2>> = (0..cfg.height)
        .into_par_iter()
        .map(|y| {
            (0..cfg.width)
                .map(|x| IVec2::new(x, y))
                .filter(|&p| {
                    sdf.cell(p) > cfg.min_path_width
                        && is_ridge(sdf, vsdf, p, cfg.min_item_size, RIDGE_MIN_COS)
                })
                .collect()
        })
        .collect();

    let start_points: Vec<IVec2> = rows.into_iter().flatten().collect();
    for &p in &start_points {
        *mesh.id_map.cell_mut(p) = CELL_RIDGE;
    }
    start_points
}

// ── Island grouping ───────────────────────────────────────────────────────────

/// Partition a cell set into 8-connected components.
///
/// Groups come out in first-cell discovery order and their union equals the
/// input; duplicate input cells are folded.
pub fn islands(points: &[IVec2]) -> Vec<Vec<IVec2>> {
    let members: FxHashSet<IVec2> = points.iter().copied().collect();
    let mut visited: FxHashSet<IVec2> = FxHashSet::default();
    let mut groups = Vec::new();

    for &p in points {
        if visited.contains(&p) {
            continue;
        }
        let mut group = Vec::new();
        let mut queue = VecDeque::from([p]);
        visited.insert(p);
        while let Some(c) = queue.pop_front() {
            group.push(c);
            for step in NEIGHBORS_8 {
                let n = c + step;
                if members.contains(&n) && visited.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        groups.push(group);
    }
    groups
}

/// Keep only the largest ridge component, relabeling it [`CELL_ROAD`];
/// everything else reverts to [`CELL_FREE`].
fn remove_waste(mesh: &mut NavMesh, start_points: &[IVec2]) -> Vec<IVec2> {
    let groups = islands(start_points);
    let Some(largest) = groups.iter().map(Vec::len).max() else {
        return Vec::new();
    };
    let keep = groups.iter().position(|g| g.len() == largest).unwrap_or(0);

    for (i, group) in groups.into_iter().enumerate() {
        for c in group {
            *mesh.id_map.cell_mut(c) = if i == keep { CELL_ROAD } else { CELL_FREE };
        }
    }

    // Re-collect in row-major order so later passes scan deterministically
    // regardless of BFS discovery order.
    let mut road = Vec::new();
    for y in 0..mesh.height {
        for x in 0..mesh.width {
            if *mesh.id_map.at(x, y) == CELL_ROAD {
                road.push(IVec2::new(x, y));
            }
        }
    }
    road
}

// ── Node detection ────────────────────────────────────────────────────────────

/// Closed loop of probe offsets around a cell: four fans of half-width
/// `area` toward +x, +y, -x, -y.  Fan seams repeat a corner probe, which is
/// harmless for transition counting.
fn perimeter_loop(area: i32) -> Vec<IVec2> {
    let a = area;
    let mut probes = Vec::with_capacity(4 * (2 * a as usize + 1));
    for i in -a..=a {
        probes.push(IVec2::new(a, i));
    }
    for i in (-a..=a).rev() {
        probes.push(IVec2::new(i, a));
    }
    for i in (-a..=a).rev() {
        probes.push(IVec2::new(-a, i));
    }
    for i in -a..=a {
        probes.push(IVec2::new(i, -a));
    }
    probes
}

/// `true` iff every cell on the short ray from `p` toward `p + offset` is a
/// road cell.
fn probe_clear(mesh: &NavMesh, p: IVec2, offset: IVec2, area: i32) -> bool {
    for k in 1..=area {
        let t = k as f32 / area as f32;
        let cell = p
            + IVec2::new(
                (offset.x as f32 * t).round() as i32,
                (offset.y as f32 * t).round() as i32,
            );
        if mesh.id_map.get(cell) != Some(&CELL_ROAD) {
            return false;
        }
    }
    true
}

/// A road cell is a junction candidate iff three or more distinct arms of
/// road extend from it.  Arms are counted as false→true transitions while
/// walking the probe fans in a closed loop (wrap included), so a straight
/// corridor (two arms, two transitions) never qualifies.
pub(crate) fn is_node(mesh: &NavMesh, p: IVec2, area: i32) -> bool {
    let probes = perimeter_loop(area);
    let vals: Vec<bool> = probes
        .iter()
        .map(|&o| probe_clear(mesh, p, o, area))
        .collect();

    let mut transitions = 0;
    for i in 0..vals.len() {
        let prev = vals[(i + vals.len() - 1) % vals.len()];
        if !prev && vals[i] {
            transitions += 1;
        }
    }
    transitions >= 3
}

/// Find junction candidates, absorb their surrounding blocks, and create
/// one node per 8-connected block island.  Returns the road cells NOT
/// absorbed into any node.
fn detect_nodes(mesh: &mut NavMesh, cfg: &MeshConfig, road: &[IVec2]) -> Vec<IVec2> {
    let area = cfg.node_area;

    let candidates: Vec<IVec2> = road
        .iter()
        .copied()
        .filter(|&p| is_node(mesh, p, area))
        .collect();
    debug!("node detection: {} junction candidates", candidates.len());

    // Union of the (2*area+1)^2 road blocks around every candidate, kept in
    // discovery order.
    let mut block_set: FxHashSet<IVec2> = FxHashSet::default();
    let mut block_cells: Vec<IVec2> = Vec::new();
    for &p in &candidates {
        for dy in -area..=area {
            for dx in -area..=area {
                let c = p + IVec2::new(dx, dy);
                if mesh.id_map.get(c) == Some(&CELL_ROAD) && block_set.insert(c) {
                    block_cells.push(c);
                }
            }
        }
    }

    for group in islands(&block_cells) {
        let id = NodeId(mesh.nodes.len() as u32 + 1);
        let position = island_centroid(&group);
        for &c in &group {
            *mesh.id_map.cell_mut(c) = id.label();
            *mesh.path_dis_map.cell_mut(c) =
                PathDisCell { first: id.label(), second: 0, distance: 0.0, index: 0 };
        }
        mesh.nodes.push(Node { id, position, ways: BTreeSet::new() });
    }

    road.iter()
        .copied()
        .filter(|c| !block_set.contains(c))
        .collect()
}

/// Cell centroid of an island, snapped to the nearest member cell when the
/// rounded centroid itself is not part of the island.
fn island_centroid(group: &[IVec2]) -> IVec2 {
    let sum = group.iter().fold(IVec2::ZERO, |acc, &c| acc + c);
    let n = group.len() as f32;
    let centroid = IVec2::new(
        (sum.x as f32 / n).round() as i32,
        (sum.y as f32 / n).round() as i32,
    );
    if group.contains(&centroid) {
        return centroid;
    }
    group
        .iter()
        .copied()
        .min_by(|a, b| {
            let da = (*a - centroid).as_vec2().length_squared();
            let db = (*b - centroid).as_vec2().length_squared();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(centroid)
}

// ── Way construction ──────────────────────────────────────────────────────────

/// Split the leftover road cells into corridors and connect every corridor
/// that borders exactly two nodes with a way.
fn build_ways(mesh: &mut NavMesh, cfg: &MeshConfig, remaining: &[IVec2]) {
    for component in islands(remaining) {
        // Which node blocks does this corridor touch?
        let mut touched: BTreeSet<i32> = BTreeSet::new();
        for &c in &component {
            for step in NEIGHBORS_8 {
                if let Some(&label) = mesh.id_map.get(c + step) {
                    if label > 0 {
                        touched.insert(label);
                    }
                }
            }
        }
        if touched.len() != 2 {
            // Dead ends and multi-junction slivers carry no way.
            continue;
        }

        let mut ids = touched.into_iter();
        let a = NodeId(ids.next().unwrap() as u32);
        let b = NodeId(ids.next().unwrap() as u32);
        let key = (a, b);
        if mesh.ways.contains_key(&key) {
            // Parallel corridors between the same pair: first one wins.
            continue;
        }

        let comp_set: FxHashSet<IVec2> = component.iter().copied().collect();
        let start = mesh.node(a).map(|n| n.position);
        let goal = mesh.node(b).map(|n| n.position);
        let (Some(start), Some(goal)) = (start, goal) else { continue };

        let allowed = |c: IVec2| {
            comp_set.contains(&c)
                || mesh.id_map.get(c) == Some(&a.label())
                || mesh.id_map.get(c) == Some(&b.label())
        };
        let Some(cells) = grid_astar(allowed, start, goal, ASTAR_IT_CAP) else {
            debug!("no corridor path between {a} and {b}");
            continue;
        };

        if let Some(way) = make_way(mesh, a, b, &cells) {
            write_path_dis(mesh, &way);
            mesh.nodes[a.slot()].ways.insert(key);
            mesh.nodes[b.slot()].ways.insert(key);
            mesh.ways.insert(key, way);
        }
    }
}

/// Shape an A* cell sequence (centroid to centroid) into a way: the
/// polyline keeps only the road-labeled middle, strictly excluding both
/// node blocks.
fn make_way(mesh: &NavMesh, a: NodeId, b: NodeId, cells: &[IVec2]) -> Option<Way> {
    let first = cells.iter().position(|&c| mesh.label(c) == CELL_ROAD);
    let max_path: Vec<IVec2> = match first {
        Some(first) => {
            let last = cells.iter().rposition(|&c| mesh.label(c) == CELL_ROAD).unwrap();
            cells[first..=last].to_vec()
        }
        // Adjacent blocks: a way with an empty polyline is legal.
        None => Vec::new(),
    };

    let pa = mesh.node(a)?.position;
    let pb = mesh.node(b)?.position;

    let mut length = 0.0;
    let mut prev = pa;
    for &c in &max_path {
        length += prev.as_vec2().distance(c.as_vec2());
        prev = c;
    }
    length += prev.as_vec2().distance(pb.as_vec2());

    let min_width = max_path
        .iter()
        .map(|&c| mesh.sdf.cell(c))
        .fold(f32::INFINITY, f32::min);
    let min_width = if min_width.is_finite() {
        min_width
    } else {
        mesh.sdf.cell(pa).min(mesh.sdf.cell(pb))
    };

    Some(Way { p1: a, p2: b, max_path, length, min_width })
}

/// Stamp way metadata onto every polyline cell: farther endpoint, closer
/// endpoint, geodesic distance to the closer one, polyline index.
fn write_path_dis(mesh: &mut NavMesh, way: &Way) {
    let pa = mesh.nodes[way.p1.slot()].position;

    let mut dist_a = 0.0;
    let mut prev = pa;
    for (i, &c) in way.max_path.iter().enumerate() {
        dist_a += prev.as_vec2().distance(c.as_vec2());
        prev = c;

        let dist_b = way.length - dist_a;
        let cell = if dist_a <= dist_b {
            PathDisCell {
                first: way.p2.label(),
                second: way.p1.label(),
                distance: dist_a,
                index: i as i32,
            }
        } else {
            PathDisCell {
                first: way.p1.label(),
                second: way.p2.label(),
                distance: dist_b,
                index: i as i32,
            }
        };
        *mesh.path_dis_map.cell_mut(c) = cell;
    }
}
