//! Headless particle machine
//!
//! Seeds a random population, runs the machine for a few seconds and logs
//! progress. Set `RUST_LOG=debug` for pacer and machine lifecycle messages.

use particle_physics::ParticlePhysics;
use particle_simulation::{Machine, MachineConfig, MachineSettings};
use std::thread;
use std::time::Duration;

const PARTICLE_COUNT: usize = 300;
const RUN_SECONDS: u64 = 5;
const LOG_EVERY: u64 = 60;

fn run() -> Result<(), particle_simulation::MachineError> {
    let settings = MachineSettings::builder()
        .physics(ParticlePhysics::default())
        .config(MachineConfig::default())
        .build()?;
    let mut machine = Machine::new(settings)?;

    machine.fill_random(PARTICLE_COUNT)?;
    machine.randomize_group_matrix()?;
    log::info!(
        "✓ Seeded {} particles in {}x{} world",
        PARTICLE_COUNT,
        machine.world().width(),
        machine.world().height()
    );

    machine.on_frame(|args| {
        if args.index % LOG_EVERY == 0 {
            log::info!("frame {} at {:.1} fps", args.index, args.fps);
        }
    });

    machine.start();
    thread::sleep(Duration::from_secs(RUN_SECONDS));
    machine.stop();

    let particles = machine.particles();
    let escaped = particles
        .iter()
        .filter(|p| !machine.world().contains(p.position()))
        .count();
    log::info!(
        "✓ Stopped after {} frames, {} of {} particles outside the world",
        machine.frame(),
        escaped,
        particles.len()
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting particle machine...");
    if let Err(e) = run() {
        log::error!("particle machine failed: {e}");
        std::process::exit(1);
    }
}
