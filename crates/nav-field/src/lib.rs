//! `nav-field` — obstacle cloud and signed distance field.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`cloud`] | `PointCloud`: immutable exact nearest-neighbor index      |
//! | [`sdf`]   | `SdfField`, `VectorSdf`, the parallel build pass          |
//! | [`ridge`] | medial-axis cell predicate over the vector SDF            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.  |

pub mod cloud;
pub mod ridge;
pub mod sdf;

#[cfg(test)]
mod tests;

pub use cloud::PointCloud;
pub use ridge::{RIDGE_MIN_COS, is_ridge};
pub use sdf::{SdfField, VectorCell, VectorSdf, build_sdf_maps};
