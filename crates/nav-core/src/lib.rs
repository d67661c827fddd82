//! `nav-core` — foundational types for the `gridnav` navigation engine.
//!
//! This crate is a dependency of every other `nav-*` crate.  It intentionally
//! has no `nav-*` dependencies and minimal external ones (only `glam` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                            |
//! |-------------|-----------------------------------------------------|
//! | [`ids`]     | `NodeId`, `AgentId`                                 |
//! | [`field`]   | `Field<T>`, the row-major 2D cell store             |
//! | [`vec`]     | grid geometry helpers over glam `Vec2`/`IVec2`      |
//! | [`config`]  | `MeshConfig`                                        |
//! | [`error`]   | `NavError`, `NavResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|---------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.     |

pub mod config;
pub mod error;
pub mod field;
pub mod ids;
pub mod vec;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::MeshConfig;
pub use error::{NavError, NavResult};
pub use field::Field;
pub use ids::{AgentId, NodeId};
pub use vec::{IVec2, Vec2, NEIGHBORS_8, NO_CELL, path_length, poly_length};
