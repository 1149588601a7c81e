//! Flat per-particle data handed to a renderer

use crate::particle::Particle;
use crate::physics::ParticlePhysics;
use bytemuck::{Pod, Zeroable};

/// Render-ready copy of one particle.
///
/// `repr(C)` and `Pod` so a whole frame can be uploaded with
/// `bytemuck::cast_slice`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub radius: f32,
    pub energy: f32,
    pub spin: f32,
    pub group: u32,
}

impl ParticleInstance {
    pub fn new(p: &Particle, physics: &ParticlePhysics) -> Self {
        let position = p.position();
        let velocity = p.velocity();
        Self {
            position: [position.x as f32, position.y as f32],
            velocity: [velocity.x as f32, velocity.y as f32],
            radius: physics.radius(p) as f32,
            energy: p.energy() as f32,
            spin: p.spin() as f32,
            group: p.group() as u32,
        }
    }
}
