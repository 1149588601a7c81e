//! Frame pipeline: parallel force pass, boundary test, sequential apply
//!
//! A frame reads the live population only while computing forces; all
//! mutations are gathered as [`Command`]s first and applied afterwards, so
//! the force pass never observes a half-updated frame.

use crate::command::{self, Axis, Command};
use crate::error::MachineError;
use crate::frame::FrameArgs;
use crate::params::ComputeMode;
use particle_physics::{Particle, ParticleInstance, ParticlePhysics, Rect, Vector};
use rayon::prelude::*;

/// Gap kept between a bounced particle and the wall it hit
const BOUNCE_MARGIN: f64 = 1.0;

/// Live state advanced by every frame
pub struct Simulation {
    physics: ParticlePhysics,
    world: Rect,
    particles: Vec<Particle>,
    frame: u64,
    commands: Vec<Command>,
    mode: ComputeMode,
    pool: Option<rayon::ThreadPool>,
}

impl Simulation {
    pub fn new(
        physics: ParticlePhysics,
        world: Rect,
        mode: ComputeMode,
        worker_threads: usize,
    ) -> Result<Self, MachineError> {
        let pool = match mode {
            ComputeMode::Parallel => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(worker_threads)
                    .thread_name(|i| format!("particle-worker-{i}"))
                    .build()?,
            ),
            ComputeMode::Sequential => None,
        };

        Ok(Self {
            physics,
            world,
            particles: Vec::new(),
            frame: 0,
            commands: Vec::new(),
            mode,
            pool,
        })
    }

    pub fn physics(&self) -> &ParticlePhysics {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut ParticlePhysics {
        &mut self.physics
    }

    pub fn world(&self) -> Rect {
        self.world
    }

    pub fn set_world(&mut self, world: Rect) {
        self.world = world;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn mode(&self) -> ComputeMode {
        self.mode
    }

    /// Replace the live population and rewind the frame counter
    pub fn reset(&mut self, particles: &[Particle]) {
        self.particles.clear();
        self.particles.extend_from_slice(particles);
        self.frame = 0;
    }

    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.particles
            .iter()
            .map(|p| ParticleInstance::new(p, &self.physics))
            .collect()
    }

    /// Advance one frame integrated at `fps`.
    ///
    /// Returns `None` and leaves the state untouched when `fps` is not a
    /// positive finite rate.
    pub fn step(&mut self, fps: f64) -> Option<FrameArgs> {
        if !(fps.is_finite() && fps > 0.0) {
            log::warn!("skipping frame {}: unusable fps {fps}", self.frame);
            return None;
        }

        self.commands.clear();
        self.compute(fps);
        command::apply_all(&self.commands, &mut self.particles, self.physics.conservation());
        log::trace!(
            "frame {} applied {} commands",
            self.frame,
            self.commands.len()
        );
        self.commands.clear();

        self.frame += 1;
        Some(FrameArgs {
            index: self.frame,
            fps,
        })
    }

    /// Read phase: fill `self.commands` in particle order
    fn compute(&mut self, fps: f64) {
        let Self {
            physics,
            world,
            particles,
            commands,
            pool,
            ..
        } = self;
        let (physics, world, particles) = (&*physics, &*world, particles.as_slice());
        let plan_one =
            |(index, p): (usize, &Particle)| plan(physics, world, particles, index, p, fps);

        match pool {
            Some(pool) => pool.install(|| {
                commands.par_extend(
                    particles
                        .par_iter()
                        .enumerate()
                        .flat_map_iter(|item| plan_one(item).into_iter().flatten()),
                );
            }),
            None => commands.extend(
                particles
                    .iter()
                    .enumerate()
                    .flat_map(|item| plan_one(item).into_iter().flatten()),
            ),
        }
    }
}

/// Commands for one particle: the two ordinary updates, or up to two bounces
fn plan(
    physics: &ParticlePhysics,
    world: &Rect,
    particles: &[Particle],
    index: usize,
    p: &Particle,
    fps: f64,
) -> [Option<Command>; 2] {
    let acceleration = accumulate(physics, particles, index);
    let offset = per_frame(p.velocity(), fps) + per_frame(acceleration, fps);

    let radius = physics.radius(p);
    let bounce_x = collide(
        index,
        Axis::X,
        p.position().x,
        offset.x,
        radius,
        world.left(),
        world.right(),
    );
    let bounce_y = collide(
        index,
        Axis::Y,
        p.position().y,
        offset.y,
        radius,
        world.top(),
        world.bottom(),
    );
    if bounce_x.is_some() || bounce_y.is_some() {
        return [bounce_x, bounce_y];
    }

    [
        Some(Command::SetVelocity {
            index,
            acceleration,
        }),
        Some(Command::Move { index, offset }),
    ]
}

/// Sum of braked, mass-scaled interactions on `particles[index]` from every
/// other slot of the population. Slots, not ids, decide identity: clones of
/// one particle still act on each other.
fn accumulate(physics: &ParticlePhysics, particles: &[Particle], index: usize) -> Vector {
    let p = &particles[index];
    let speed = p.velocity().length();
    let mut acceleration = Vector::ZERO;
    for (slot, other) in particles.iter().enumerate() {
        if slot == index {
            continue;
        }

        let mut next = physics.interaction(p, other);
        let coef = physics.limit_velocity_coef(speed, next.length());
        next.set_length(coef * next.length() / p.energy());
        acceleration += next;
    }
    acceleration
}

fn per_frame(v: Vector, fps: f64) -> Vector {
    Vector::new(v.x / fps, v.y / fps)
}

/// Bounce command if moving by `offset` would leave `[near, far]` on one axis
fn collide(
    index: usize,
    axis: Axis,
    coordinate: f64,
    offset: f64,
    radius: f64,
    near: f64,
    far: f64,
) -> Option<Command> {
    let next = coordinate + offset;
    let clamped = if next + radius > far {
        far - radius - BOUNCE_MARGIN
    } else if next < near {
        near + BOUNCE_MARGIN
    } else {
        return None;
    };

    Some(Command::Bounce {
        index,
        axis,
        coordinate: clamped,
    })
}
