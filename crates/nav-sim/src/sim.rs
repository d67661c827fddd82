//! The `Simulation` struct and its tick loop.

use log::{debug, info};

use nav_agent::{AgentSet, DynamicWorld};
use nav_core::{AgentId, Vec2};
use nav_mesh::NavMesh;
use nav_motion::{opt_path, steer_along};
use nav_route::Router;

use crate::observer::SimObserver;

/// Default per-tick step length.
const DEFAULT_VEL: f32 = 8.0;

/// Default safety cap on run length.
const DEFAULT_TICK_CAP: u64 = 4096;

/// Drives a set of agents across a built mesh toward a target.
///
/// `Simulation<R>` owns the mesh, the agents, and the dynamic index; the
/// route planner is a type parameter so a custom [`Router`] can be swapped
/// in with no runtime overhead.
pub struct Simulation<R: Router> {
    pub mesh: NavMesh,
    pub router: R,
    pub agents: AgentSet,
    pub world: DynamicWorld,

    /// Common destination; agents may override it individually.
    pub target: Option<Vec2>,
    /// Per-tick step length.
    pub vel: f32,
    /// Hard bound on ticks per run.
    pub tick_cap: u64,
}

impl<R: Router> Simulation<R> {
    pub fn new(mesh: NavMesh, router: R) -> Self {
        Self {
            mesh,
            router,
            agents: AgentSet::new(),
            world: DynamicWorld::new(),
            target: None,
            vel: DEFAULT_VEL,
            tick_cap: DEFAULT_TICK_CAP,
        }
    }

    // ── Agent management ──────────────────────────────────────────────────

    /// Register an agent and connect it to the dynamic index.
    pub fn add_agent(&mut self, pos: Vec2, radius: f32) -> AgentId {
        let id = self.agents.add(pos, radius);
        if let Some(agent) = self.agents.get_mut(id) {
            self.world.connect(id, agent);
        }
        id
    }

    /// Take an agent out of the dynamic index (it stops moving and stops
    /// being an obstacle for others).
    pub fn disconnect_agent(&mut self, id: AgentId) {
        if let Some(agent) = self.agents.get_mut(id) {
            self.world.disconnect(agent);
        }
    }

    /// Set the common target for all agents.
    pub fn set_target(&mut self, pos: Vec2) {
        self.target = Some(pos);
    }

    /// Give one agent its own destination.
    pub fn set_agent_target(&mut self, id: AgentId, pos: Vec2) {
        if let Some(agent) = self.agents.get_mut(id) {
            agent.target = Some(pos);
        }
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance every agent one step.  Returns the agents that moved and
    /// their new positions.
    pub fn step_once(&mut self) -> Vec<(AgentId, Vec2)> {
        // Phase 1: rebuild routes.  The mesh is immutable; each query
        // splices its own transient state.
        let ids: Vec<AgentId> = self.agents.ids().collect();
        for &id in &ids {
            let Some(agent) = self.agents.get(id) else { continue };
            let Some(target) = agent.target.or(self.target) else { continue };
            let route = self
                .router
                .route(&self.mesh, agent.current_pos, target, agent.radius);
            if let Some(agent) = self.agents.get_mut(id) {
                agent.path = route;
            }
        }

        // Phase 2: steer.  Reads the dynamic index in a consistent state;
        // commits happen on the agent only.
        let mut moves: Vec<(AgentId, Vec2)> = Vec::new();
        for &id in &ids {
            let Some(agent) = self.agents.get(id) else { continue };
            if agent.handle.is_none() || agent.path.is_empty() {
                continue;
            }
            let poly: Vec<Vec2> = agent.path.iter().map(|c| c.as_vec2()).collect();
            let opt = opt_path(&poly, &self.mesh.sdf, agent.radius);
            let stepped = steer_along(
                &opt,
                &self.mesh.sdf,
                &self.world.index,
                id,
                agent.current_pos,
                self.vel,
                agent.radius,
            );

            let Some(agent) = self.agents.get_mut(id) else { continue };
            agent.path_opt = opt;
            if let Some(pos) = stepped {
                agent.current_pos = pos;
                agent.trail.push(pos);
                moves.push((id, pos));
            }
        }

        // Phase 3: refresh the index with the committed positions.
        for (id, _) in &moves {
            if let Some(agent) = self.agents.get_mut(*id) {
                self.world.refresh(agent);
            }
        }
        moves
    }

    /// Run from scratch: agents restart at their spawn positions and tick
    /// until nobody moves or the cap is hit.  Returns the tick count.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> u64 {
        let ids: Vec<AgentId> = self.agents.ids().collect();
        for &id in &ids {
            if let Some(agent) = self.agents.get_mut(id) {
                agent.current_pos = agent.start_pos;
                agent.trail.clear();
                self.world.refresh(agent);
            }
        }

        let mut tick = 0u64;
        loop {
            let moves = self.step_once();
            tick += 1;
            observer.on_tick(tick, moves.len(), &self.agents);
            debug!("tick {tick}: {} agents moved", moves.len());
            if moves.is_empty() {
                break;
            }
            if tick >= self.tick_cap {
                info!("simulation hit its tick cap at {tick}");
                break;
            }
        }
        observer.on_run_end(tick);
        tick
    }
}
