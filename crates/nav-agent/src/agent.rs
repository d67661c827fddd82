//! Agent state.

use nav_core::{AgentId, IVec2, Vec2};
use nav_index::CircleHandle;

/// One moving agent.
///
/// `handle` is the agent's leaf in the [`DynamicWorld`](crate::world)
/// index; it must be disconnected (via the world) before the agent is
/// dropped or its position becomes stale collision geometry.
#[derive(Clone, Debug)]
pub struct Agent {
    /// Where the agent entered the simulation (ticks restart from here).
    pub start_pos: Vec2,
    pub current_pos: Vec2,
    pub radius: f32,
    /// Per-agent destination override; falls back to the simulation's
    /// common target when `None`.
    pub target: Option<Vec2>,

    /// Latest cell route from the mesh query.
    pub path: Vec<IVec2>,
    /// Latest straightened polyline the agent is following.
    pub path_opt: Vec<Vec2>,
    /// Positions committed during the current simulation run.
    pub trail: Vec<Vec2>,

    /// Leaf in the dynamic index, `None` while disconnected.
    pub handle: Option<CircleHandle>,
}

impl Agent {
    pub fn new(start_pos: Vec2, radius: f32) -> Self {
        Self {
            start_pos,
            current_pos: start_pos,
            radius,
            target: None,
            path: Vec::new(),
            path_opt: Vec::new(),
            trail: Vec::new(),
            handle: None,
        }
    }

    /// Distance still to cover to `target`.
    #[inline]
    pub fn distance_to(&self, target: Vec2) -> f32 {
        self.current_pos.distance(target)
    }
}

// ── AgentSet ──────────────────────────────────────────────────────────────────

/// Dense agent storage indexed by [`AgentId`].
#[derive(Default)]
pub struct AgentSet {
    agents: Vec<Agent>,
}

impl AgentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent and return its id (sequential from 0).
    pub fn add(&mut self, start_pos: Vec2, radius: f32) -> AgentId {
        let id = AgentId(self.agents.len() as u32);
        self.agents.push(Agent::new(start_pos, radius));
        id
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.index())
    }

    /// All ids, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.agents.len() as u32).map(AgentId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &Agent)> + '_ {
        self.agents
            .iter()
            .enumerate()
            .map(|(i, a)| (AgentId(i as u32), a))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (AgentId, &mut Agent)> + '_ {
        self.agents
            .iter_mut()
            .enumerate()
            .map(|(i, a)| (AgentId(i as u32), a))
    }
}
