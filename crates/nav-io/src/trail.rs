//! CSV trail export.
//!
//! One row per agent per tick: `agent_id,tick,x,y`.  Hook it into
//! [`Simulation::run`](nav_sim::Simulation::run) as the observer and call
//! [`TrailWriter::finish`] afterwards (also done on drop).

use std::fs::File;
use std::path::Path;

use csv::Writer;

use nav_agent::AgentSet;
use nav_sim::SimObserver;

use crate::error::IoResult;

/// Writes every agent's position at every tick to one CSV file.
pub struct TrailWriter {
    writer: Writer<File>,
    finished: bool,
}

impl TrailWriter {
    /// Create (or truncate) the trail file and write the header row.
    pub fn create(path: &Path) -> IoResult<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(["agent_id", "tick", "x", "y"])?;
        Ok(Self { writer, finished: false })
    }

    /// Flush the file.  Idempotent.
    pub fn finish(&mut self) -> IoResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}

impl SimObserver for TrailWriter {
    fn on_tick(&mut self, tick: u64, _moved: usize, agents: &AgentSet) {
        for (id, agent) in agents.iter() {
            let row = [
                id.0.to_string(),
                tick.to_string(),
                agent.current_pos.x.to_string(),
                agent.current_pos.y.to_string(),
            ];
            if let Err(e) = self.writer.write_record(&row) {
                log::warn!("trail write failed: {e}");
                return;
            }
        }
    }

    fn on_run_end(&mut self, _final_tick: u64) {
        if let Err(e) = self.finish() {
            log::warn!("trail flush failed: {e}");
        }
    }
}

impl Drop for TrailWriter {
    fn drop(&mut self) {
        let _ = self.finish();
    }
}
