//! Mesh data model: the road graph and its per-cell fields.

use std::collections::{BTreeMap, BTreeSet};

use nav_core::{Field, IVec2, NO_CELL, NodeId};
use nav_field::{SdfField, VectorCell, VectorSdf};

// ── Cell labels ───────────────────────────────────────────────────────────────

/// Free cell, not on the road.
pub const CELL_FREE: i32 = 0;
/// Ridge candidate, only present while the build is in flight.
pub const CELL_RIDGE: i32 = -1;
/// Confirmed road cell.
pub const CELL_ROAD: i32 = -2;

// ── Graph types ───────────────────────────────────────────────────────────────

/// Way lookup key: node ids ordered `(small, large)`.
pub type WayKey = (NodeId, NodeId);

/// A junction of the road network (three or more arms).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: NodeId,
    /// Centroid cell of the junction island.
    pub position: IVec2,
    /// Keys of the ways incident to this node.  Sorted so adjacency
    /// iteration order is deterministic.
    pub ways: BTreeSet<WayKey>,
}

/// A polyline edge between two nodes along the ridge.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Way {
    pub p1: NodeId,
    pub p2: NodeId,
    /// Road cells from `p1` toward `p2`, strictly exclusive of both node
    /// centroids.
    pub max_path: Vec<IVec2>,
    /// Euclidean length of the full polyline including the bridges to both
    /// endpoint centroids.
    pub length: f32,
    /// Minimum SDF value along `max_path`: anything wider cannot pass.
    pub min_width: f32,
}

// ── Field cell types ──────────────────────────────────────────────────────────

/// Per-road-cell way metadata.
///
/// On a way cell: `first` is the farther endpoint id, `second` the closer
/// one, `distance` the geodesic distance to the closer endpoint, `index`
/// the cell's position in the way's polyline.  On a node cell:
/// `(node_id, 0, 0, 0)`.  Elsewhere: all zero.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathDisCell {
    pub first: i32,
    pub second: i32,
    pub distance: f32,
    pub index: i32,
}

impl PathDisCell {
    pub const EMPTY: PathDisCell = PathDisCell { first: 0, second: 0, distance: 0.0, index: 0 };

    /// `true` iff this cell belongs to a node block.
    #[inline]
    pub fn is_node_cell(&self) -> bool {
        self.first > 0 && self.second == 0
    }

    /// `true` iff this cell carries way metadata.
    #[inline]
    pub fn is_way_cell(&self) -> bool {
        self.second > 0
    }
}

/// Road-attraction flow cell: the next cell one step toward the road, and
/// the accumulated cost.  On-road cells hold `(NO_CELL, 0)`; unreachable
/// cells hold `(NO_CELL, -1)`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNavCell {
    pub target: IVec2,
    pub cost: f32,
}

impl PathNavCell {
    pub const UNREACHABLE: PathNavCell = PathNavCell { target: NO_CELL, cost: -1.0 };
    pub const ON_ROAD: PathNavCell = PathNavCell { target: NO_CELL, cost: 0.0 };

    #[inline]
    pub fn reachable(&self) -> bool {
        self.cost >= 0.0
    }

    #[inline]
    pub fn on_road(&self) -> bool {
        self.cost == 0.0 && self.target == NO_CELL
    }
}

// ── NavMesh ───────────────────────────────────────────────────────────────────

/// The navigation mesh: road graph plus every per-cell field.
///
/// Fields are `pub` for direct indexed access on hot paths and for the
/// persistence layer; treat a built mesh as read-only.  Scratch state for
/// build passes is the `search_map` generation field: a cell is live in the
/// current pass iff its stored generation equals `search_gen`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavMesh {
    pub width: i32,
    pub height: i32,
    /// Minimum clearance that qualified as free space at build time.
    pub min_item_size: f32,

    /// Dense node storage; `NodeId(k)` lives at slot `k - 1`.
    pub nodes: Vec<Node>,
    /// Ways keyed by ordered id pair.  BTreeMap so iteration follows key
    /// order (the deterministic tie-break contract).
    pub ways: BTreeMap<WayKey, Way>,

    pub sdf: SdfField,
    pub vsdf: VectorSdf,
    pub id_map: Field<i32>,
    pub path_dis_map: Field<PathDisCell>,
    pub path_nav_map: Field<PathNavCell>,
    pub search_map: Field<i32>,
    pub search_gen: i32,
}

impl NavMesh {
    /// An empty mesh with zeroed fields, ready for the build passes (or for
    /// the loader to fill in).
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            min_item_size: 0.0,
            nodes: Vec::new(),
            ways: BTreeMap::new(),
            sdf: SdfField::new(width, height),
            vsdf: VectorSdf::new(width, height, VectorCell::ZERO),
            id_map: Field::new(width, height, CELL_FREE),
            path_dis_map: Field::new(width, height, PathDisCell::EMPTY),
            path_nav_map: Field::new(width, height, PathNavCell::UNREACHABLE),
            search_map: Field::new(width, height, 0),
            search_gen: 0,
        }
    }

    #[inline]
    pub fn contains(&self, cell: IVec2) -> bool {
        self.id_map.contains(cell)
    }

    /// Cell label at `cell`.  Panics off-grid.
    #[inline]
    pub fn label(&self, cell: IVec2) -> i32 {
        *self.id_map.cell(cell)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.slot())
    }

    pub fn way(&self, key: WayKey) -> Option<&Way> {
        self.ways.get(&key)
    }

    /// Start a fresh search pass: cells whose `search_map` equals the
    /// returned generation are "visited this pass".
    pub fn bump_search_gen(&mut self) -> i32 {
        self.search_gen += 1;
        self.search_gen
    }
}
