//! `nav-mesh` — the navigation road graph and its build pipeline.
//!
//! The mesh is built in a strict pass pipeline; no pass reads a field a
//! later pass produces:
//!
//! ```text
//! points → SDF/vSDF → ridge labels → largest island → node blocks
//!        → ways (grid A* per corridor) → road-attraction flow field
//! ```
//!
//! # Crate layout
//!
//! | Module    | Contents                                                |
//! |-----------|---------------------------------------------------------|
//! | [`mesh`]  | `NavMesh`, `Node`, `Way`, cell labels, field cell types |
//! | [`build`] | the build passes and `islands` grouping                 |
//! | [`astar`] | capped grid A* over a cell predicate                    |
//! | [`flow`]  | road-attraction flow field and `to_road`                |

pub mod astar;
pub mod build;
pub mod flow;
pub mod mesh;


pub use astar::grid_astar;
pub use build::{build_mesh, islands};
pub use flow::{RoadAttraction, to_road};
pub use mesh::{
    CELL_FREE, CELL_RIDGE, CELL_ROAD, NavMesh, Node, PathDisCell, PathNavCell, Way, WayKey,
};
