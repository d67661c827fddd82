//! `nav-route` — route queries over an immutable [`nav_mesh::NavMesh`].
//!
//! A query snaps both endpoints onto the road (road attraction), splices
//! transient ways from each foothold to the real endpoints of the way it
//! landed on, floods a flow field over the node graph rooted at the target,
//! and walks it back from the start.  All transient state lives in the
//! query; the mesh is never mutated, so concurrent queries on separate
//! query values are sound by construction.
//!
//! # Pluggability
//!
//! The sim driver calls routing through the [`Router`] trait so
//! applications can swap in custom planners without touching the driver.
//! The default [`FlowFieldRouter`] implements the two-level search.

pub mod route;


pub use route::{FlowFieldRouter, Router};
