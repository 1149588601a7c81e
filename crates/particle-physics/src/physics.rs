//! Physics model shared by every particle of a machine

use crate::constants::*;
use crate::field::Field;
use crate::group::GroupMatrix;
use crate::particle::Particle;

/// Global constants, field descriptors and the group matrix.
///
/// All setters ignore out-of-domain values and keep the previous one.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticlePhysics {
    conservation: f64,
    mass_distortion: f64,
    max_velocity: f64,
    primary_spin: f64,
    primary_radius: f64,

    gravity: Field,
    collision: Field,
    electricity: Field,
    spin: Field,
    group: Field,

    groups: GroupMatrix,
}

impl Default for ParticlePhysics {
    fn default() -> Self {
        Self {
            conservation: CONSERVATION,
            mass_distortion: MASS_DISTORTION,
            max_velocity: MAX_VELOCITY,
            primary_spin: PRIMARY_SPIN,
            primary_radius: PRIMARY_RADIUS,
            gravity: Field::new("gravity", GRAVITY_FIELD.0, GRAVITY_FIELD.1),
            collision: Field::new("collision", COLLISION_FIELD.0, COLLISION_FIELD.1),
            electricity: Field::new("electricity", ELECTRICITY_FIELD.0, ELECTRICITY_FIELD.1),
            spin: Field::new("spin", SPIN_FIELD.0, SPIN_FIELD.1),
            group: Field::new("group", GROUP_FIELD.0, GROUP_FIELD.1),
            groups: GroupMatrix::new(),
        }
    }
}

impl ParticlePhysics {
    /// Fraction of velocity kept each frame, in (0, 1]
    pub fn conservation(&self) -> f64 {
        self.conservation
    }

    pub fn set_conservation(&mut self, conservation: f64) {
        if conservation > 0.0 && conservation <= 1.0 {
            self.conservation = conservation;
        }
    }

    /// Gravitational distortion of a unit-energy particle
    pub fn mass_distortion(&self) -> f64 {
        self.mass_distortion
    }

    pub fn set_mass_distortion(&mut self, mass_distortion: f64) {
        if mass_distortion > 0.0 {
            self.mass_distortion = mass_distortion;
        }
    }

    /// Speed (px/s) the limiting coefficient brakes towards
    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    pub fn set_max_velocity(&mut self, max_velocity: f64) {
        if max_velocity > 0.0 {
            self.max_velocity = max_velocity;
        }
    }

    pub fn primary_spin(&self) -> f64 {
        self.primary_spin
    }

    pub fn set_primary_spin(&mut self, primary_spin: f64) {
        if primary_spin > 0.0 {
            self.primary_spin = primary_spin;
        }
    }

    /// Radius (px) of a unit-energy particle
    pub fn primary_radius(&self) -> f64 {
        self.primary_radius
    }

    pub fn set_primary_radius(&mut self, primary_radius: f64) {
        if primary_radius > 0.0 {
            self.primary_radius = primary_radius;
        }
    }

    pub fn gravity(&self) -> &Field {
        &self.gravity
    }

    pub fn gravity_mut(&mut self) -> &mut Field {
        &mut self.gravity
    }

    pub fn collision(&self) -> &Field {
        &self.collision
    }

    pub fn collision_mut(&mut self) -> &mut Field {
        &mut self.collision
    }

    pub fn electricity(&self) -> &Field {
        &self.electricity
    }

    pub fn electricity_mut(&mut self) -> &mut Field {
        &mut self.electricity
    }

    pub fn spin(&self) -> &Field {
        &self.spin
    }

    pub fn spin_mut(&mut self) -> &mut Field {
        &mut self.spin
    }

    pub fn group(&self) -> &Field {
        &self.group
    }

    pub fn group_mut(&mut self) -> &mut Field {
        &mut self.group
    }

    pub fn group_matrix(&self) -> &GroupMatrix {
        &self.groups
    }

    pub fn group_matrix_mut(&mut self) -> &mut GroupMatrix {
        &mut self.groups
    }

    /// `sqrt(energy) * primary_radius`
    pub fn radius(&self, p: &Particle) -> f64 {
        p.energy().sqrt() * self.primary_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Point;

    #[test]
    fn test_defaults() {
        let physics = ParticlePhysics::default();
        assert_eq!(physics.conservation(), 1.0);
        assert_eq!(physics.mass_distortion(), 2.0);
        assert_eq!(physics.max_velocity(), 10_000.0);
        assert_eq!(physics.primary_spin(), 0.5);
        assert_eq!(physics.primary_radius(), 4.0);
        assert_eq!(physics.gravity().tension(), 0.001);
        assert_eq!(physics.collision().dispersal(), 0.5);
        assert_eq!(physics.group().tension(), 0.3);
    }

    #[test]
    fn test_conservation_domain() {
        let mut physics = ParticlePhysics::default();
        physics.set_conservation(0.9);
        assert_eq!(physics.conservation(), 0.9);

        physics.set_conservation(0.0);
        physics.set_conservation(1.01);
        physics.set_conservation(-0.5);
        physics.set_conservation(f64::NAN);
        assert_eq!(physics.conservation(), 0.9);

        physics.set_conservation(1.0);
        assert_eq!(physics.conservation(), 1.0);
    }

    #[test]
    fn test_positive_only_setters() {
        let mut physics = ParticlePhysics::default();
        physics.set_max_velocity(0.0);
        physics.set_mass_distortion(-2.0);
        physics.set_primary_spin(0.0);
        physics.set_primary_radius(-4.0);
        assert_eq!(physics.max_velocity(), 10_000.0);
        assert_eq!(physics.mass_distortion(), 2.0);
        assert_eq!(physics.primary_spin(), 0.5);
        assert_eq!(physics.primary_radius(), 4.0);

        physics.set_max_velocity(500.0);
        physics.set_primary_radius(2.0);
        assert_eq!(physics.max_velocity(), 500.0);
        assert_eq!(physics.primary_radius(), 2.0);
    }

    #[test]
    fn test_field_writes_go_through_field_clamping() {
        let mut physics = ParticlePhysics::default();
        physics.spin_mut().set_tension(-1.0);
        assert_eq!(physics.spin().tension(), 0.5);
        physics.spin_mut().set_tension(2.0);
        assert_eq!(physics.spin().tension(), 2.0);
    }

    #[test]
    fn test_radius() {
        let physics = ParticlePhysics::default();
        let p = Particle::new(Point::ZERO).with_energy(9.0);
        assert_eq!(physics.radius(&p), 12.0);
    }
}
