//! Pairwise force model
//!
//! Every field follows the same bounded, oscillating radial profile
//! (see [`field_force`]). The individual laws only differ in how they scale
//! tension/dispersal and which sign they attach.

use crate::particle::Particle;
use crate::physics::ParticlePhysics;
use crate::vector::Vector;
use std::f64::consts::PI;

/// Magnitude of a field at `distance`.
///
/// `|tension * dispersal * sin(distance / dispersal)|` below the cutoff at
/// `π * dispersal`, zero from the cutoff on. Never negative.
pub fn field_force(tension: f64, dispersal: f64, distance: f64) -> f64 {
    if distance >= PI * dispersal {
        return 0.0;
    }

    (-tension * dispersal * (1.0 / dispersal * distance).sin()).abs()
}

impl ParticlePhysics {
    /// Net force exerted on `p` by `influencer`.
    ///
    /// The result starts as a unit vector pointing at the influencer (or along
    /// `p`'s velocity when the two coincide); each law extends its length, and
    /// the unit seed is removed at the end.
    pub fn interaction(&self, p: &Particle, influencer: &Particle) -> Vector {
        let offset = Self::construct_vector(p, influencer);
        if offset.is_degenerate() {
            // Coincident and at rest: there is no direction to push along
            return Vector::ZERO;
        }

        let direction = offset.angle();
        let distance = offset.length();
        let mut result = Vector::new(0.0, 1.0);
        result.set_angle(direction);
        result += self.gravity_force(influencer.energy(), distance);
        result += self.collision_force(self.radius(influencer), distance);
        result += self.spin_force(p.spin(), influencer.spin(), distance);
        result += self.group_force(p.group(), influencer.group(), distance);
        result += -1.0;
        result
    }

    /// Attraction towards a particle of the given mass
    pub fn gravity_force(&self, mass: f64, distance: f64) -> f64 {
        let tension = mass * self.mass_distortion() * self.gravity().tension();
        field_force(tension, self.gravity().dispersal(), distance)
    }

    /// Short-range repulsion; the range grows with the influencer's radius
    pub fn collision_force(&self, radius: f64, distance: f64) -> f64 {
        let dispersal = 4.0 * radius / PI * self.collision().dispersal();
        -field_force(self.collision().tension(), dispersal, distance)
    }

    /// Charge coupling. Defined for completeness, not part of [`Self::interaction`].
    pub fn electricity_force(&self, p_charge: f64, infl_charge: f64, distance: f64) -> f64 {
        if p_charge == infl_charge {
            return 0.0;
        }

        let sign = if infl_charge * p_charge > 0.0 { -1.0 } else { 1.0 };
        let tension = p_charge * infl_charge * self.electricity().tension();
        sign * field_force(tension, self.electricity().dispersal(), distance)
    }

    /// Same-sign spins repel, opposite spins attract
    pub fn spin_force(&self, p_spin: f64, infl_spin: f64, distance: f64) -> f64 {
        let sign = if infl_spin * p_spin > 0.0 { -1.0 } else { 1.0 };
        let tension = (infl_spin - p_spin).abs() * self.spin().tension();
        sign * field_force(tension, self.spin().dispersal(), distance)
    }

    /// Group affinity from the interaction matrix
    pub fn group_force(&self, p_group: usize, infl_group: usize, distance: f64) -> f64 {
        let coef = self.group_matrix().coefficient(p_group, infl_group);
        let sign = if coef > 0.0 { 1.0 } else { -1.0 };
        let tension = coef * self.group().tension();
        sign * field_force(tension, self.group().dispersal(), distance)
    }

    /// Braking multiplier applied to each contribution.
    ///
    /// Approaches zero as `vel` or `acc` approaches the speed cap. Goes
    /// negative when exactly one of them exceeds the cap, which reverses the
    /// contribution.
    pub fn limit_velocity_coef(&self, vel: f64, acc: f64) -> f64 {
        let max = self.max_velocity();
        (max - vel) * (max - acc) / (max * max)
    }

    /// Vector from `start` to `end`, or `start`'s velocity when they coincide
    pub fn construct_vector(start: &Particle, end: &Particle) -> Vector {
        let v = Vector::between(start.position(), end.position());
        if v.is_degenerate() {
            return start.velocity();
        }

        v
    }
}
