//! Particle machine: population lifecycle around the frame pipeline
//!
//! The machine is either stopped or running. While stopped, the seed
//! population and the group matrix may be replaced; starting copies the seed
//! into the live population and lets the pacer drive [`Simulation::step`].

use crate::error::MachineError;
use crate::frame::{FrameArgs, FrameListener};
use crate::pacer::Pacer;
use crate::params::MachineConfig;
use crate::simulation::Simulation;
use particle_physics::{Particle, ParticleInstance, ParticlePhysics, Point, Rect, SEED_GROUPS};
use rand::Rng;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Everything needed to build a [`Machine`]
#[derive(Clone, Debug)]
pub struct MachineSettings {
    physics: ParticlePhysics,
    config: MachineConfig,
}

impl MachineSettings {
    pub fn new(physics: ParticlePhysics) -> Self {
        Self {
            physics,
            config: MachineConfig::default(),
        }
    }

    pub fn builder() -> MachineSettingsBuilder {
        MachineSettingsBuilder::default()
    }

    pub fn physics(&self) -> &ParticlePhysics {
        &self.physics
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }
}

#[derive(Default)]
pub struct MachineSettingsBuilder {
    physics: Option<ParticlePhysics>,
    config: MachineConfig,
}

impl MachineSettingsBuilder {
    pub fn physics(mut self, physics: ParticlePhysics) -> Self {
        self.physics = Some(physics);
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Fails with [`MachineError::MissingPhysics`] if no physics was given
    pub fn build(self) -> Result<MachineSettings, MachineError> {
        let physics = self.physics.ok_or(MachineError::MissingPhysics)?;
        Ok(MachineSettings {
            physics,
            config: self.config,
        })
    }
}

pub struct Machine {
    simulation: Arc<Mutex<Simulation>>,
    listeners: Arc<Mutex<Vec<FrameListener>>>,
    seed: Vec<Particle>,
    pacer: Pacer,
}

impl Machine {
    pub fn new(settings: MachineSettings) -> Result<Self, MachineError> {
        let MachineSettings { physics, config } = settings;
        let simulation = Simulation::new(
            physics,
            config.world,
            config.compute_mode,
            config.worker_threads,
        )?;

        log::info!(
            "machine created: {:?} compute, {} worker threads, {:?} pacer at {} fps",
            config.compute_mode,
            config.worker_threads,
            config.pacer_policy,
            config.target_fps
        );

        Ok(Self {
            simulation: Arc::new(Mutex::new(simulation)),
            listeners: Arc::new(Mutex::new(Vec::new())),
            seed: Vec::new(),
            pacer: Pacer::new(config.pacer_policy, config.target_fps),
        })
    }

    pub fn is_running(&self) -> bool {
        self.pacer.enabled()
    }

    /// Copy the seed into the live population and start the pacer.
    /// Does nothing if already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        lock(&self.simulation).reset(&self.seed);

        let simulation = Arc::clone(&self.simulation);
        let listeners = Arc::clone(&self.listeners);
        self.pacer.start(move |fps| {
            run_frame(&simulation, &listeners, fps);
        });

        log::info!("machine started with {} particles", self.seed.len());
    }

    /// Stop the pacer. A frame already in flight completes first.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }

        self.pacer.stop();
        log::info!("machine stopped at frame {}", self.frame());
    }

    /// Run exactly one frame integrated at `fps` and notify listeners.
    ///
    /// Returns `None` when `fps` is not a positive finite rate.
    pub fn step(&self, fps: f64) -> Option<FrameArgs> {
        run_frame(&self.simulation, &self.listeners, fps)
    }

    /// Copy the seed into the live population without starting
    pub fn reset(&mut self) -> Result<(), MachineError> {
        self.ensure_stopped()?;
        lock(&self.simulation).reset(&self.seed);
        Ok(())
    }

    /// Replace the seed with `count` random particles inside the world
    pub fn fill_random(&mut self, count: usize) -> Result<(), MachineError> {
        self.ensure_stopped()?;

        let mut rng = rand::rng();
        let (world, primary_spin) = {
            let simulation = lock(&self.simulation);
            (simulation.world(), simulation.physics().primary_spin())
        };

        self.seed = (0..count)
            .map(|_| {
                let x = world.left() + random_offset(&mut rng, world.width());
                let y = world.top() + random_offset(&mut rng, world.height());
                let spin = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                Particle::new(Point::new(x, y))
                    .with_group(rng.random_range(0..SEED_GROUPS))
                    .with_spin(spin * primary_spin)
            })
            .collect();

        log::info!("seeded {count} particles");
        Ok(())
    }

    /// Replace the seed with a caller-built population
    pub fn set_seed(&mut self, particles: Vec<Particle>) -> Result<(), MachineError> {
        self.ensure_stopped()?;
        self.seed = particles;
        Ok(())
    }

    pub fn seed(&self) -> &[Particle] {
        &self.seed
    }

    pub fn randomize_group_matrix(&mut self) -> Result<(), MachineError> {
        self.ensure_stopped()?;
        let mut rng = rand::rng();
        lock(&self.simulation)
            .physics_mut()
            .group_matrix_mut()
            .randomize(&mut rng);
        log::info!("group matrix randomized");
        Ok(())
    }

    pub fn set_group_coefficient(
        &mut self,
        influenced: usize,
        influencer: usize,
        value: f64,
    ) -> Result<(), MachineError> {
        self.ensure_stopped()?;
        lock(&self.simulation)
            .physics_mut()
            .group_matrix_mut()
            .set_coefficient(influenced, influencer, value)?;
        Ok(())
    }

    /// Tune physics constants. Allowed at any time, but while running any
    /// change to the group matrix is reverted.
    pub fn update_physics<F>(&self, f: F)
    where
        F: FnOnce(&mut ParticlePhysics),
    {
        let running = self.is_running();
        let mut simulation = lock(&self.simulation);
        let groups = *simulation.physics().group_matrix();
        f(simulation.physics_mut());

        if running && *simulation.physics().group_matrix() != groups {
            log::warn!("group matrix is read-only while running; change reverted");
            *simulation.physics_mut().group_matrix_mut() = groups;
        }
    }

    pub fn physics(&self) -> ParticlePhysics {
        lock(&self.simulation).physics().clone()
    }

    pub fn world(&self) -> Rect {
        lock(&self.simulation).world()
    }

    /// Takes effect on the next frame
    pub fn set_world(&self, world: Rect) {
        lock(&self.simulation).set_world(world);
    }

    /// Snapshot of the live population
    pub fn particles(&self) -> Vec<Particle> {
        lock(&self.simulation).particles().to_vec()
    }

    /// Render-ready snapshot of the live population
    pub fn instances(&self) -> Vec<ParticleInstance> {
        lock(&self.simulation).instances()
    }

    pub fn frame(&self) -> u64 {
        lock(&self.simulation).frame()
    }

    /// Rate measured by the pacer at its last tick
    pub fn fps(&self) -> f64 {
        self.pacer.fps()
    }

    pub fn pacer(&self) -> &Pacer {
        &self.pacer
    }

    pub fn pacer_mut(&mut self) -> &mut Pacer {
        &mut self.pacer
    }

    /// Register a callback for frame-completed notifications. Listeners may
    /// read the machine but must not register further listeners.
    pub fn on_frame<F>(&self, listener: F)
    where
        F: FnMut(FrameArgs) + Send + 'static,
    {
        lock(&self.listeners).push(Box::new(listener));
    }

    fn ensure_stopped(&self) -> Result<(), MachineError> {
        if self.is_running() {
            log::warn!("rejected: machine is running");
            return Err(MachineError::Running);
        }
        Ok(())
    }
}

impl Drop for Machine {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Step the simulation, then notify listeners.
///
/// The listener lock is held across the whole frame so concurrent callers
/// notify in frame order. The simulation lock is released before listeners
/// run so they may read the machine. Lock order is listeners, then
/// simulation.
fn run_frame(
    simulation: &Mutex<Simulation>,
    listeners: &Mutex<Vec<FrameListener>>,
    fps: f64,
) -> Option<FrameArgs> {
    let mut listeners = lock(listeners);
    let args = lock(simulation).step(fps)?;
    log::debug!("frame {} at {:.1} fps", args.index, args.fps);

    for listener in listeners.iter_mut() {
        listener(args);
    }
    Some(args)
}

/// Integer offset in `[0, extent)`; zero for an empty extent
fn random_offset<R: Rng>(rng: &mut R, extent: f64) -> f64 {
    let extent = extent as i64;
    if extent <= 0 {
        return 0.0;
    }
    rng.random_range(0..extent) as f64
}

/// Poisoning is ignored: the guarded state is plain data
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ComputeMode;
    use particle_physics::MAX_GROUP;

    fn machine() -> Machine {
        let config = MachineConfig::default()
            .with_compute_mode(ComputeMode::Sequential)
            .with_world(Rect::sized(400.0, 300.0));
        let settings = MachineSettings::builder()
            .physics(ParticlePhysics::default())
            .config(config)
            .build()
            .unwrap();
        Machine::new(settings).unwrap()
    }

    #[test]
    fn test_builder_requires_physics() {
        let result = MachineSettings::builder().build();
        assert!(matches!(result, Err(MachineError::MissingPhysics)));
    }

    #[test]
    fn test_fill_random_stays_in_world() {
        let mut m = machine();
        m.fill_random(200).unwrap();
        assert_eq!(m.seed().len(), 200);

        let primary_spin = m.physics().primary_spin();
        for p in m.seed() {
            assert!(p.position().x >= 0.0 && p.position().x < 400.0);
            assert!(p.position().y >= 0.0 && p.position().y < 300.0);
            assert_eq!(p.position().x.fract(), 0.0);
            assert!(p.group() < SEED_GROUPS);
            assert_eq!(p.spin().abs(), primary_spin);
            assert_eq!(p.energy(), 1.0);
        }
        // Seeding does not touch the live population
        assert!(m.particles().is_empty());
    }

    #[test]
    fn test_fill_random_on_empty_world() {
        let mut m = machine();
        m.set_world(Rect::new(5.0, 6.0, 0.0, 0.0));
        m.fill_random(3).unwrap();
        assert!(m.seed().iter().all(|p| p.position() == Point::new(5.0, 6.0)));
    }

    #[test]
    fn test_reset_copies_seed() {
        let mut m = machine();
        m.fill_random(10).unwrap();
        m.reset().unwrap();

        let live = m.particles();
        assert_eq!(live.len(), 10);
        for (a, b) in live.iter().zip(m.seed()) {
            assert_eq!(a.id(), b.id());
        }
        assert_eq!(m.frame(), 0);
    }

    #[test]
    fn test_step_notifies_listeners() {
        let m = machine();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        m.on_frame(move |args| sink.lock().unwrap().push(args));

        m.step(60.0);
        m.step(30.0);
        assert_eq!(m.step(0.0), None);

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                FrameArgs { index: 1, fps: 60.0 },
                FrameArgs { index: 2, fps: 30.0 }
            ]
        );
    }

    #[test]
    fn test_concurrent_steps_notify_in_frame_order() {
        let m = machine();
        m.set_world(Rect::sized(10_000.0, 10_000.0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        m.on_frame(move |args| sink.lock().unwrap().push(args.index));

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        m.step(60.0);
                    }
                });
            }
        });

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, (1..=200).collect::<Vec<u64>>());
        assert_eq!(m.frame(), 200);
    }

    #[test]
    fn test_update_physics_while_stopped() {
        let m = machine();
        m.update_physics(|physics| {
            physics.set_conservation(0.5);
            physics.group_matrix_mut().set_coefficient(1, 2, 1.0).unwrap();
        });

        let physics = m.physics();
        assert_eq!(physics.conservation(), 0.5);
        assert_eq!(physics.group_matrix().coefficient(1, 2), 1.0);
    }

    #[test]
    fn test_set_group_coefficient_out_of_range() {
        let mut m = machine();
        let result = m.set_group_coefficient(MAX_GROUP, 0, 1.0);
        assert!(matches!(result, Err(MachineError::Physics(_))));
    }
}
