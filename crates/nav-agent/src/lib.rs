//! `nav-agent` — moving agents and their dynamic-obstacle index.
//!
//! | Module    | Contents                                        |
//! |-----------|-------------------------------------------------|
//! | [`agent`] | `Agent`, `AgentSet`                             |
//! | [`world`] | `DynamicWorld` (an `Hbb<AgentId>` + lifecycle)  |

pub mod agent;
pub mod world;


pub use agent::{Agent, AgentSet};
pub use world::DynamicWorld;
