//! Particle state

use crate::constants::MAX_GROUP;
use crate::physics::ParticlePhysics;
use crate::vector::{Point, Vector};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique particle identity. Clones share the id of their source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(u64);

impl ParticleId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// A point particle.
///
/// `group` stays in `[0, MAX_GROUP)`, `energy` stays positive and `spin`
/// stays non-zero: out-of-domain writes are ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    id: ParticleId,
    group: usize,
    energy: f64,
    spin: f64,
    position: Point,
    velocity: Vector,
}

impl Particle {
    /// Create a particle at rest at `position` with energy 1 and spin 1
    pub fn new(position: Point) -> Self {
        Self {
            id: ParticleId::next(),
            group: 0,
            energy: 1.0,
            spin: 1.0,
            position,
            velocity: Vector::ZERO,
        }
    }

    pub fn with_group(mut self, group: usize) -> Self {
        self.set_group(group);
        self
    }

    pub fn with_energy(mut self, energy: f64) -> Self {
        self.set_energy(energy);
        self
    }

    pub fn with_spin(mut self, spin: f64) -> Self {
        self.set_spin(spin);
        self
    }

    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn group(&self) -> usize {
        self.group
    }

    pub fn set_group(&mut self, group: usize) {
        if group < MAX_GROUP {
            self.group = group;
        }
    }

    /// Mass of the particle; also drives its radius
    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn set_energy(&mut self, energy: f64) {
        if energy > 0.0 {
            self.energy = energy;
        }
    }

    pub fn spin(&self) -> f64 {
        self.spin
    }

    pub fn set_spin(&mut self, spin: f64) {
        if spin != 0.0 {
            self.spin = spin;
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn set_x(&mut self, x: f64) {
        self.position.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.position.y = y;
    }

    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vector) {
        self.velocity = velocity;
    }

    pub fn set_velocity_x(&mut self, x: f64) {
        self.velocity.x = x;
    }

    pub fn set_velocity_y(&mut self, y: f64) {
        self.velocity.y = y;
    }

    /// Shift the position by `offset`
    pub fn apply_move(&mut self, offset: Vector) {
        self.position.x += offset.x;
        self.position.y += offset.y;
    }

    pub fn radius(&self, physics: &ParticlePhysics) -> f64 {
        physics.radius(self)
    }
}
