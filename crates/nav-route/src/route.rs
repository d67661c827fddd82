//! The two-level route query.

use std::collections::VecDeque;

use log::debug;

use nav_core::{IVec2, NodeId, Vec2};
use nav_mesh::{NavMesh, PathDisCell, WayKey, grid_astar, to_road};

/// Walking the flow field visits at most this many edges; a longer walk
/// means a corrupted field and aborts the query.
const EDGE_CAP: usize = 512;

/// Relaxation-pop bound for the graph flow field.  Generously above any
/// real node count; hitting it yields the best partial field.
const FLOW_POP_CAP: usize = 4096;

/// Expansion cap for the bare-road A* fallback.
const FALLBACK_IT_CAP: usize = 512;

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable route planner.
///
/// Returns the route as a cell polyline ordered from the agent to the
/// target, or an empty vector when no route exists.  Topological failures
/// are not errors.
pub trait Router {
    fn route(&self, mesh: &NavMesh, start: Vec2, target: Vec2, clearance: f32) -> Vec<IVec2>;
}

/// The default planner: road attraction + spliced graph flow field, with a
/// grid A* fallback for meshes whose roads formed no ways.
pub struct FlowFieldRouter;

impl Router for FlowFieldRouter {
    fn route(&self, mesh: &NavMesh, start: Vec2, target: Vec2, clearance: f32) -> Vec<IVec2> {
        find_route(mesh, start, target, clearance)
    }
}

// ── Query entry ───────────────────────────────────────────────────────────────

/// Compute a cell route from `start` to `target`.
///
/// `clearance` filters ways: only ways wider than it are traversable (pass
/// 0.0 to disable).  Every failure mode (off-road endpoints, disconnected
/// roads, cap hits) returns an empty polyline.
pub fn find_route(mesh: &NavMesh, start: Vec2, target: Vec2, clearance: f32) -> Vec<IVec2> {
    let Some(from) = to_road(mesh, start.as_ivec2()) else {
        return Vec::new();
    };
    let Some(to) = to_road(mesh, target.as_ivec2()) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    if from.foothold == to.foothold {
        // Both endpoints drain to the same cell: no graph work to do.
        push_cells(&mut out, from.tail.iter().copied());
        push_cells(&mut out, to.tail.iter().rev().copied());
        return out;
    }

    let s_meta = *mesh.path_dis_map.cell(from.foothold);
    let t_meta = *mesh.path_dis_map.cell(to.foothold);
    let on_graph = |m: &PathDisCell| m.is_way_cell() || m.is_node_cell();

    let middle = if on_graph(&s_meta) && on_graph(&t_meta) {
        let query = SpliceQuery::build(mesh, &s_meta, from.foothold, &t_meta, to.foothold, clearance);
        query.walk()
    } else {
        // Bare road (a mesh with roads but no junctions): walk the road
        // cells directly.
        debug!("route feet carry no way metadata, road A* fallback");
        let allowed = |c: IVec2| mesh.contains(c) && mesh.label(c) != 0;
        grid_astar(allowed, from.foothold, to.foothold, FALLBACK_IT_CAP)
    };

    let Some(middle) = middle else {
        return Vec::new();
    };

    push_cells(&mut out, from.tail.iter().copied());
    push_cells(&mut out, middle.iter().copied());
    push_cells(&mut out, to.tail.iter().rev().copied());
    out
}

/// Append cells, folding consecutive duplicates at the seams.
fn push_cells(out: &mut Vec<IVec2>, cells: impl IntoIterator<Item = IVec2>) {
    for c in cells {
        if out.last() != Some(&c) {
            out.push(c);
        }
    }
}

// ── Transient splice ──────────────────────────────────────────────────────────

/// A way spliced between a virtual route endpoint and a real node for the
/// duration of one query.
struct TmpWay {
    /// The real node this way reaches.
    attach: NodeId,
    /// Polyline from the foothold toward `attach` (foothold first); empty
    /// when the foothold already sits on a node cell.
    cells: Vec<IVec2>,
    /// Geodesic length including the bridge to the node centroid.
    length: f32,
    /// Minimum clearance along `cells` (∞ for the zero-length splice).
    min_width: f32,
}

/// Build the (up to two) transient ways for one foothold.
fn splice_ways(mesh: &NavMesh, meta: &PathDisCell, foot: IVec2) -> Vec<TmpWay> {
    if meta.is_node_cell() {
        return vec![TmpWay {
            attach: NodeId(meta.first as u32),
            cells: Vec::new(),
            length: 0.0,
            min_width: f32::INFINITY,
        }];
    }

    let far = NodeId(meta.first as u32);
    let near = NodeId(meta.second as u32);
    let key: WayKey = (far.min(near), far.max(near));
    let Some(way) = mesh.way(key) else {
        return Vec::new();
    };
    if way.max_path.is_empty() {
        // Stale metadata pointing at a polyline-less way: treat the foot
        // like a node-adjacent cell with no usable slice.
        return Vec::new();
    }
    let idx = (meta.index as usize).min(way.max_path.len() - 1);

    let toward = |endpoint: NodeId| -> TmpWay {
        let cells: Vec<IVec2> = if endpoint == way.p2 {
            way.max_path[idx..].to_vec()
        } else {
            way.max_path[..=idx].iter().rev().copied().collect()
        };
        let length = if endpoint == near { meta.distance } else { way.length - meta.distance };
        // The slice's own narrowest cell, not an arithmetic leftover of the
        // parent way's width.
        let min_width = cells
            .iter()
            .map(|&c| mesh.sdf.cell(c))
            .fold(f32::INFINITY, f32::min);
        TmpWay { attach: endpoint, cells, length, min_width }
    };

    vec![toward(far), toward(near)]
}

// ── Flow field over the spliced graph ─────────────────────────────────────────

/// Which edge a vertex follows toward the target.
#[derive(Copy, Clone)]
enum EdgeRef {
    Perm(WayKey),
    /// Index into `start_ways`.
    TmpStart(usize),
    /// Index into `target_ways`.
    TmpTarget(usize),
}

struct SpliceQuery<'m> {
    mesh: &'m NavMesh,
    clearance: f32,
    start_ways: Vec<TmpWay>,
    target_ways: Vec<TmpWay>,
    /// Flow state per vertex: real node slots, then V_START, then V_TARGET.
    value: Vec<f32>,
    from: Vec<Option<(EdgeRef, usize)>>,
}

impl<'m> SpliceQuery<'m> {
    fn v_start(&self) -> usize {
        self.mesh.nodes.len()
    }

    fn v_target(&self) -> usize {
        self.mesh.nodes.len() + 1
    }

    fn build(
        mesh: &'m NavMesh,
        s_meta: &PathDisCell,
        s_foot: IVec2,
        t_meta: &PathDisCell,
        t_foot: IVec2,
        clearance: f32,
    ) -> Self {
        let start_ways = splice_ways(mesh, s_meta, s_foot);
        let target_ways = splice_ways(mesh, t_meta, t_foot);
        let vertices = mesh.nodes.len() + 2;
        let mut query = Self {
            mesh,
            clearance,
            start_ways,
            target_ways,
            value: vec![f32::INFINITY; vertices],
            from: vec![None; vertices],
        };
        query.flood();
        query
    }

    /// Breadth-first relaxation rooted at the target virtual vertex.  The
    /// start vertex is a sink: it receives a flow value but never
    /// propagates, so no route ever threads through the agent's own start.
    fn flood(&mut self) {
        let mesh = self.mesh;
        let v_start = self.v_start();
        let v_target = self.v_target();
        self.value[v_target] = 0.0;

        let mut queue: VecDeque<usize> = VecDeque::from([v_target]);
        let mut pops = 0usize;
        while let Some(v) = queue.pop_front() {
            pops += 1;
            if pops > FLOW_POP_CAP {
                debug!("graph flow field hit its pop cap");
                break;
            }
            if v == v_start {
                continue;
            }

            if v == v_target {
                for i in 0..self.target_ways.len() {
                    let (attach, length, width) = {
                        let w = &self.target_ways[i];
                        (w.attach.slot(), w.length, w.min_width)
                    };
                    if width > self.clearance
                        && self.relax(v, attach, length, (EdgeRef::TmpTarget(i), v))
                    {
                        queue.push_back(attach);
                    }
                }
                continue;
            }

            // v is a real node: permanent ways first (sorted key order),
            // then the splice toward the start sink.
            let node_id = mesh.nodes[v].id;
            for &key in &mesh.nodes[v].ways {
                let Some(way) = mesh.way(key) else { continue };
                if way.min_width <= self.clearance {
                    continue;
                }
                let other = if way.p1 == node_id { way.p2 } else { way.p1 };
                let other = other.slot();
                if self.relax(v, other, way.length, (EdgeRef::Perm(key), v)) {
                    queue.push_back(other);
                }
            }
            for i in 0..self.start_ways.len() {
                let (attach, length, width) = {
                    let w = &self.start_ways[i];
                    (w.attach, w.length, w.min_width)
                };
                if attach.slot() == v && width > self.clearance {
                    // No need to enqueue: the sink never propagates.
                    self.relax(v, v_start, length, (EdgeRef::TmpStart(i), v));
                }
            }
        }
    }

    /// Improve `to` through `from_v`; `true` when the value dropped.
    fn relax(&mut self, from_v: usize, to: usize, length: f32, edge: (EdgeRef, usize)) -> bool {
        let cand = self.value[from_v] + length;
        if cand + 1e-6 < self.value[to] {
            self.value[to] = cand;
            self.from[to] = Some(edge);
            true
        } else {
            false
        }
    }

    /// Follow the flow from the start vertex and concatenate the traversed
    /// polylines.  `None` when the target is unreachable or the walk blows
    /// the edge cap.
    fn walk(&self) -> Option<Vec<IVec2>> {
        let mut cells = Vec::new();
        let mut v = self.v_start();
        for _ in 0..EDGE_CAP {
            if v == self.v_target() {
                return Some(cells);
            }
            let (edge, toward) = self.from[v]?;
            match edge {
                EdgeRef::TmpStart(i) => {
                    // Stored foot→node; traversed from the start sink, so
                    // forward as stored.
                    push_cells(&mut cells, self.start_ways[i].cells.iter().copied());
                }
                EdgeRef::TmpTarget(i) => {
                    // Stored foot→node; traversed node→target, so reversed.
                    push_cells(&mut cells, self.target_ways[i].cells.iter().rev().copied());
                }
                EdgeRef::Perm(key) => {
                    let way = self.mesh.way(key)?;
                    // Only real nodes carry permanent edges.
                    let here = self.mesh.nodes[v].id;
                    if way.p1 == here {
                        push_cells(&mut cells, way.max_path.iter().copied());
                    } else {
                        push_cells(&mut cells, way.max_path.iter().rev().copied());
                    }
                }
            }
            v = toward;
        }
        debug!("route walk hit the edge cap");
        None
    }
}
