//! Gridwalk quickstart: generate a world, tick it, print frames.
//!
//! Demonstrates:
//!   1. Building a WorldConfig and LockstepWorld
//!   2. Ticking and reading per-turn metrics
//!   3. Rendering ASCII frames from a WorldView
//!   4. Resetting with a new seed
//!   5. Running the same world on a tick thread
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example quickstart

use std::time::Duration;

use gridwalk_engine::{state_hash, LockstepWorld, RealtimeWorld, WorldConfig};
use tracing_subscriber::EnvFilter;

const FRAMES: u64 = 5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = WorldConfig {
        rows: 12,
        cols: 24,
        agent_count: 4,
        seed: 2024,
        ..WorldConfig::default()
    };
    let mut world = LockstepWorld::new(config.clone())?;
    println!("tick {}:\n{}", world.current_tick(), world.view().render_ascii());

    for _ in 0..FRAMES {
        let m = world.tick();
        println!(
            "tick {} agent {:?} {:?} path_len={} expanded={} ({} us)",
            m.tick, m.agent, m.outcome, m.path_len, m.expanded, m.total_us
        );
        println!("{}", world.view().render_ascii());
    }

    match world.run_until_arrived(2_000) {
        Some(ticks) => println!("all agents arrived after {ticks} more ticks"),
        None => println!("some agents cannot reach their goals"),
    }
    println!("stats: {:?}", world.stats());
    println!("state hash: {:016x}", state_hash(&world.view()));

    world.reset(config.seed + 1)?;
    println!("after reset(seed={}):\n{}", world.seed(), world.view().render_ascii());

    let realtime = RealtimeWorld::spawn(world, 30.0)?;
    if let Some(view) = realtime.recv_view_timeout(Duration::from_secs(1)) {
        println!("realtime tick {}:\n{}", view.tick(), view.render_ascii());
    }
    std::thread::sleep(Duration::from_millis(200));
    let world = realtime.shutdown()?;
    println!("realtime world stopped at tick {}", world.current_tick());
    Ok(())
}
