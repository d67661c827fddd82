//! `nav-io` — on-disk persistence and trail export.
//!
//! A saved mesh is a directory:
//!
//! ```text
//! config.txt       "<W> <H> <minItemSize>\n"
//! nodes.txt        "<x> <y>\n" per node, line order = id order
//! ways.txt         "c<id1> <id2> <length> <minWidth>\n" "p<x> <y>\n"* "e\n"
//! sdfMap.chunk     raw row-major cell dumps, fixed-size cells,
//! vsdfMap.chunk    native endianness (writer and reader must match)
//! pathDisMap.chunk
//! pathNavMap.chunk
//! idMap.chunk
//! ```
//!
//! | Module      | Contents                                     |
//! |-------------|----------------------------------------------|
//! | [`chunk`]   | fixed-size per-cell codec + field dump/load  |
//! | [`mesh_io`] | `save_mesh`, `load_mesh`                     |
//! | [`points`]  | points.txt save/load                         |
//! | [`trail`]   | CSV trail writer (a `SimObserver`)           |
//! | [`error`]   | `IoError`, `IoResult<T>`                     |

pub mod chunk;
pub mod error;
pub mod mesh_io;
pub mod points;
pub mod trail;

#[cfg(test)]
mod tests;

pub use error::{IoError, IoResult};
pub use mesh_io::{load_mesh, save_mesh};
pub use points::{load_points, save_points};
pub use trail::TrailWriter;
