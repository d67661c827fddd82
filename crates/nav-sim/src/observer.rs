//! Simulation observer trait for progress reporting and data collection.

use nav_agent::AgentSet;

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] at
/// tick boundaries.
///
/// All methods have default no-op implementations so implementors only
/// need to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick(&mut self, tick: u64, moved: usize, _agents: &AgentSet) {
///         println!("tick {tick}: {moved} agents moved");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after every tick with the number of agents that moved and
    /// read access to the full agent state (positions, trails, paths).
    fn on_tick(&mut self, _tick: u64, _moved: usize, _agents: &AgentSet) {}

    /// Called once when the run terminates (no movement or cap hit).
    fn on_run_end(&mut self, _final_tick: u64) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run`
/// but don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
