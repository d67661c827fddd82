//! Whole-mesh save/load.

use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::Path;

use log::warn;

use nav_core::{IVec2, NodeId};
use nav_field::VectorCell;
use nav_mesh::{NavMesh, Node, PathDisCell, PathNavCell, Way, WayKey};

use crate::chunk::{load_field, save_field};
use crate::error::IoResult;

const CONFIG_TXT: &str = "config.txt";
const NODES_TXT: &str = "nodes.txt";
const WAYS_TXT: &str = "ways.txt";
const SDF_CHUNK: &str = "sdfMap.chunk";
const VSDF_CHUNK: &str = "vsdfMap.chunk";
const PATH_DIS_CHUNK: &str = "pathDisMap.chunk";
const PATH_NAV_CHUNK: &str = "pathNavMap.chunk";
const ID_CHUNK: &str = "idMap.chunk";

// ── Save ──────────────────────────────────────────────────────────────────────

/// Write a mesh into `dir` (created if missing).
pub fn save_mesh(mesh: &NavMesh, dir: &Path) -> IoResult<()> {
    fs::create_dir_all(dir)?;

    fs::write(
        dir.join(CONFIG_TXT),
        format!("{} {} {}\n", mesh.width, mesh.height, mesh.min_item_size),
    )?;

    let mut nodes = String::new();
    for node in &mesh.nodes {
        nodes.push_str(&format!("{} {}\n", node.position.x, node.position.y));
    }
    fs::write(dir.join(NODES_TXT), nodes)?;

    let mut ways = fs::File::create(dir.join(WAYS_TXT))?;
    for way in mesh.ways.values() {
        writeln!(ways, "c{} {} {} {}", way.p1.0, way.p2.0, way.length, way.min_width)?;
        for p in &way.max_path {
            writeln!(ways, "p{} {}", p.x, p.y)?;
        }
        writeln!(ways, "e")?;
    }

    save_field(&mesh.sdf.cells, &dir.join(SDF_CHUNK))?;
    save_field(&mesh.vsdf, &dir.join(VSDF_CHUNK))?;
    save_field(&mesh.path_dis_map, &dir.join(PATH_DIS_CHUNK))?;
    save_field(&mesh.path_nav_map, &dir.join(PATH_NAV_CHUNK))?;
    save_field(&mesh.id_map, &dir.join(ID_CHUNK))?;
    Ok(())
}

// ── Load ──────────────────────────────────────────────────────────────────────

/// Read a mesh back from `dir`.
///
/// `Ok(None)` when the directory holds no usable mesh (missing or
/// malformed files); `Err` only for hard I/O failures.  A loaded mesh is
/// ready for queries without any rebuilding; only the search scratch
/// state starts fresh.
pub fn load_mesh(dir: &Path) -> IoResult<Option<NavMesh>> {
    let Some((width, height, min_item_size)) = read_config(&dir.join(CONFIG_TXT))? else {
        return Ok(None);
    };
    if width <= 0 || height <= 0 {
        return Ok(None);
    }

    let mut mesh = NavMesh::new(width, height);
    mesh.min_item_size = min_item_size;

    let Some(sdf) = load_field(width, height, 0.0f32, &dir.join(SDF_CHUNK))? else {
        return Ok(None);
    };
    mesh.sdf.cells = sdf;
    let Some(vsdf) = load_field(width, height, VectorCell::ZERO, &dir.join(VSDF_CHUNK))? else {
        return Ok(None);
    };
    mesh.vsdf = vsdf;
    let Some(dis) = load_field(width, height, PathDisCell::EMPTY, &dir.join(PATH_DIS_CHUNK))?
    else {
        return Ok(None);
    };
    mesh.path_dis_map = dis;
    let Some(nav) =
        load_field(width, height, PathNavCell::UNREACHABLE, &dir.join(PATH_NAV_CHUNK))?
    else {
        return Ok(None);
    };
    mesh.path_nav_map = nav;
    let Some(ids) = load_field(width, height, 0i32, &dir.join(ID_CHUNK))? else {
        return Ok(None);
    };
    mesh.id_map = ids;

    read_nodes(&dir.join(NODES_TXT), &mut mesh)?;
    read_ways(&dir.join(WAYS_TXT), &mut mesh)?;
    Ok(Some(mesh))
}

fn read_config(path: &Path) -> IoResult<Option<(i32, i32, f32)>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut it = text.split_whitespace();
    let parsed = (|| {
        let w = it.next()?.parse().ok()?;
        let h = it.next()?.parse().ok()?;
        let m = it.next()?.parse().ok()?;
        Some((w, h, m))
    })();
    Ok(parsed)
}

fn read_nodes(path: &Path, mesh: &mut NavMesh) -> IoResult<()> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    for line in text.lines() {
        let mut it = line.split_whitespace();
        let (Some(x), Some(y)) = (it.next(), it.next()) else { continue };
        let (Ok(x), Ok(y)) = (x.parse(), y.parse()) else { continue };
        let id = NodeId(mesh.nodes.len() as u32 + 1);
        mesh.nodes.push(Node {
            id,
            position: IVec2::new(x, y),
            ways: BTreeSet::new(),
        });
    }
    Ok(())
}

fn read_ways(path: &Path, mesh: &mut NavMesh) -> IoResult<()> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    let mut header: Option<(NodeId, NodeId, f32, f32)> = None;
    let mut points: Vec<IVec2> = Vec::new();

    for line in text.lines() {
        match line.as_bytes().first() {
            Some(b'c') => {
                let mut it = line[1..].split_whitespace();
                header = (|| {
                    let p1 = NodeId(it.next()?.parse().ok()?);
                    let p2 = NodeId(it.next()?.parse().ok()?);
                    let length = it.next()?.parse().ok()?;
                    let min_width = it.next()?.parse().ok()?;
                    Some((p1, p2, length, min_width))
                })();
                points.clear();
            }
            Some(b'p') => {
                let mut it = line[1..].split_whitespace();
                if let (Some(Ok(x)), Some(Ok(y))) =
                    (it.next().map(str::parse), it.next().map(str::parse))
                {
                    points.push(IVec2::new(x, y));
                }
            }
            Some(b'e') => {
                if let Some((p1, p2, length, min_width)) = header.take() {
                    commit_way(mesh, p1, p2, length, min_width, std::mem::take(&mut points));
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn commit_way(
    mesh: &mut NavMesh,
    p1: NodeId,
    p2: NodeId,
    length: f32,
    min_width: f32,
    max_path: Vec<IVec2>,
) {
    let valid = |id: NodeId| id.0 >= 1 && (id.0 as usize) <= mesh.nodes.len();
    if !valid(p1) || !valid(p2) {
        warn!("way references unknown node ({p1}, {p2})");
        return;
    }
    let key: WayKey = (p1, p2);
    mesh.nodes[p1.slot()].ways.insert(key);
    mesh.nodes[p2.slot()].ways.insert(key);
    mesh.ways.insert(key, Way { p1, p2, max_path, length, min_width });
}
