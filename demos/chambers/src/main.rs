//! chambers — smallest end-to-end example for the gridnav engine.
//!
//! Scatters a two-chamber world (a dividing wall with one doorway plus a
//! few random pillars), builds the navigation mesh, saves it to disk, and
//! walks two agents from the west chamber to a common target in the east
//! chamber, recording their trails as CSV.
//!
//! Run with `RUST_LOG=debug` to watch the build passes and tick loop.

use std::path::Path;

use anyhow::Result;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use nav_core::{MeshConfig, Vec2};
use nav_field::PointCloud;
use nav_io::{TrailWriter, save_mesh, save_points};
use nav_mesh::build_mesh;
use nav_route::FlowFieldRouter;
use nav_sim::Simulation;

// ── Constants ─────────────────────────────────────────────────────────────────

const WIDTH: i32 = 128;
const HEIGHT: i32 = 64;
const SEED: u64 = 42;
const PILLARS_PER_CHAMBER: usize = 6;
const AGENT_RADIUS: f32 = 1.5;
const AGENT_VEL: f32 = 2.0;
const OUT_DIR: &str = "chambers_out";

// ── World generation ──────────────────────────────────────────────────────────

/// The dividing wall (with a doorway) plus random pillar clutter.
fn scatter_world(rng: &mut SmallRng) -> Vec<Vec2> {
    let mut pts = Vec::new();

    // Wall at x = 64 with a doorway spanning y = 24..=40.
    for y in 0..=HEIGHT {
        if !(24..=40).contains(&y) {
            pts.push(Vec2::new(64.0, y as f32));
        }
    }

    // A few pillars per chamber, kept away from the doorway lane.
    for chamber in [8.0f32..52.0, 76.0f32..120.0] {
        for _ in 0..PILLARS_PER_CHAMBER {
            let cx = rng.gen_range(chamber.clone());
            let cy = rng.gen_range(8.0..56.0f32);
            for i in 0..8 {
                let a = i as f32 * std::f32::consts::TAU / 8.0;
                pts.push(Vec2::new(cx + 2.0 * a.cos(), cy + 2.0 * a.sin()));
            }
        }
    }
    pts
}

// ── Entry ─────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();
    let out = Path::new(OUT_DIR);
    std::fs::create_dir_all(out)?;

    let mut rng = SmallRng::seed_from_u64(SEED);
    let points = scatter_world(&mut rng);
    save_points(&points, &out.join("points.txt"))?;

    let cfg = MeshConfig {
        width: WIDTH,
        height: HEIGHT,
        min_item_size: 2.0,
        min_path_width: 3.0,
        ..MeshConfig::default()
    };
    let mesh = build_mesh(&PointCloud::build(&points), &cfg)?;
    log::info!(
        "built mesh: {} nodes, {} ways, {} obstacle points",
        mesh.nodes.len(),
        mesh.ways.len(),
        points.len()
    );
    save_mesh(&mesh, &out.join("mesh"))?;

    let mut sim = Simulation::new(mesh, FlowFieldRouter);
    sim.vel = AGENT_VEL;
    let a = sim.add_agent(Vec2::new(16.0, 20.0), AGENT_RADIUS);
    let b = sim.add_agent(Vec2::new(16.0, 44.0), AGENT_RADIUS);
    sim.set_target(Vec2::new(112.0, 32.0));

    let mut trails = TrailWriter::create(&out.join("trails.csv"))?;
    let ticks = sim.run(&mut trails);
    trails.finish()?;

    for id in [a, b] {
        let agent = sim.agents.get(id).expect("agent registered above");
        println!(
            "agent {}: {:.1} -> {:.1} in {ticks} ticks",
            id.0, agent.start_pos, agent.current_pos
        );
    }
    println!("world, mesh, and trails written to {OUT_DIR}/");
    Ok(())
}
