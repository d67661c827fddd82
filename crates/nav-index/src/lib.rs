//! `nav-index` — hierarchical bounding circles (HBB) for dynamic obstacles.
//!
//! A binary tree in which every node stores a circle enclosing all of its
//! descendants; leaves carry a caller-supplied `Copy` token (an agent id).
//! The tree self-heals on removal and answers three pruned queries:
//! circle-overlap, point containment, and finite-segment (ray) overlap.
//!
//! | Module     | Contents                                        |
//! |------------|-------------------------------------------------|
//! | [`circle`] | `Circle` math, `ray_dist`, `RayRegion`          |
//! | [`tree`]   | `Hbb<D>`, `CircleHandle`                        |

pub mod circle;
pub mod tree;

#[cfg(test)]
mod tests;

pub use circle::{Circle, RayRegion, ray_dist};
pub use tree::{CircleHandle, Hbb};
