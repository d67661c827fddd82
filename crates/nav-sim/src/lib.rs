//! `nav-sim` — the per-tick simulation driver.
//!
//! Each tick runs three phases over all agents: rebuild routes against the
//! target (one query per agent over the shared immutable mesh), steer each
//! agent one velocity step honoring static and dynamic obstacles, then
//! refresh the dynamic index with the committed positions.  The run ends
//! when a tick moves nobody or the tick cap is hit.

pub mod observer;
pub mod sim;


pub use observer::{NoopObserver, SimObserver};
pub use sim::Simulation;
