//! The dynamic-obstacle world: one bounding-circle leaf per connected
//! agent.
//!
//! The leaf carries the agent's id; the agent carries the leaf's handle.
//! Neither owns the other, so the lifecycle discipline is explicit:
//! connect on registration, refresh after every committed move, disconnect
//! before dropping the agent.

use nav_core::AgentId;
use nav_index::Hbb;

use crate::agent::Agent;

/// Spatial index over all connected agents.
#[derive(Default)]
pub struct DynamicWorld {
    /// The underlying circle tree.  Public so steering can run ray tests
    /// against it directly.
    pub index: Hbb<AgentId>,
}

impl DynamicWorld {
    pub fn new() -> Self {
        Self { index: Hbb::new() }
    }

    /// Number of connected agents.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Insert `agent` at its current position.  No-op when already
    /// connected.
    pub fn connect(&mut self, id: AgentId, agent: &mut Agent) {
        if agent.handle.is_some() {
            return;
        }
        agent.handle = Some(self.index.insert(agent.current_pos, agent.radius, id));
    }

    /// Remove `agent`'s leaf.  No-op when not connected.
    pub fn disconnect(&mut self, agent: &mut Agent) {
        if let Some(h) = agent.handle.take() {
            self.index.remove(h);
        }
    }

    /// Move `agent`'s leaf to its current position (drop + re-insert, so
    /// the tree re-balances around the new location).
    pub fn refresh(&mut self, agent: &mut Agent) {
        if let Some(h) = agent.handle.take() {
            agent.handle = Some(self.index.update(h, agent.current_pos));
        }
    }
}
