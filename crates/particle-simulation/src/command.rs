//! Deferred particle mutations
//!
//! The force pass only reads particle state. Everything it wants to change is
//! captured as a [`Command`] and applied afterwards in one sequential pass.

use particle_physics::{Particle, Vector};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// One mutation of the particle at `index` in the live population
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Damp the velocity by the conservation factor, then add `acceleration`
    SetVelocity { index: usize, acceleration: Vector },
    /// Shift the position by the per-frame displacement
    Move { index: usize, offset: Vector },
    /// Clamp `axis` to `coordinate`, reflect that velocity component, damp
    Bounce {
        index: usize,
        axis: Axis,
        coordinate: f64,
    },
}

impl Command {
    pub fn index(&self) -> usize {
        match *self {
            Command::SetVelocity { index, .. }
            | Command::Move { index, .. }
            | Command::Bounce { index, .. } => index,
        }
    }

    pub fn apply(&self, particle: &mut Particle, conservation: f64) {
        match *self {
            Command::SetVelocity { acceleration, .. } => {
                let damped = particle.velocity() * conservation;
                particle.set_velocity(damped + acceleration);
            }
            Command::Move { offset, .. } => particle.apply_move(offset),
            Command::Bounce {
                axis, coordinate, ..
            } => {
                let velocity = particle.velocity();
                match axis {
                    Axis::X => {
                        particle.set_x(coordinate);
                        particle.set_velocity_x(-velocity.x);
                    }
                    Axis::Y => {
                        particle.set_y(coordinate);
                        particle.set_velocity_y(-velocity.y);
                    }
                }
                particle.set_velocity(particle.velocity() * conservation);
            }
        }
    }
}

/// Apply `commands` in order against `particles`
pub fn apply_all(commands: &[Command], particles: &mut [Particle], conservation: f64) {
    for command in commands {
        log::trace!("applying {command:?}");
        command.apply(&mut particles[command.index()], conservation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_physics::Point;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_set_velocity_damps_then_adds() {
        let mut p = Particle::new(Point::ZERO).with_velocity(Vector::new(10.0, 0.0));
        Command::SetVelocity {
            index: 0,
            acceleration: Vector::new(1.0, 2.0),
        }
        .apply(&mut p, 0.5);

        assert!((p.velocity().x - 6.0).abs() < EPS);
        assert!((p.velocity().y - 2.0).abs() < EPS);
    }

    #[test]
    fn test_move() {
        let mut p = Particle::new(Point::new(1.0, 1.0));
        Command::Move {
            index: 0,
            offset: Vector::new(2.0, -1.0),
        }
        .apply(&mut p, 1.0);
        assert_eq!(p.position(), Point::new(3.0, 0.0));
    }

    #[test]
    fn test_bounce_reflects_axis_and_damps() {
        let mut p = Particle::new(Point::new(99.0, 50.0)).with_velocity(Vector::new(600.0, 30.0));
        Command::Bounce {
            index: 0,
            axis: Axis::X,
            coordinate: 95.0,
        }
        .apply(&mut p, 0.5);

        assert_eq!(p.position(), Point::new(95.0, 50.0));
        assert!((p.velocity().x + 300.0).abs() < 1e-9);
        assert!((p.velocity().y - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounce_y() {
        let mut p = Particle::new(Point::new(10.0, -3.0)).with_velocity(Vector::new(0.0, -40.0));
        Command::Bounce {
            index: 0,
            axis: Axis::Y,
            coordinate: 1.0,
        }
        .apply(&mut p, 1.0);

        assert_eq!(p.position().y, 1.0);
        assert!(p.velocity().y > 0.0);
        assert!(p.velocity().x.abs() < EPS);
    }

    #[test]
    fn test_apply_all_in_order() {
        let mut particles = vec![Particle::new(Point::ZERO), Particle::new(Point::ZERO)];
        let commands = [
            Command::Move {
                index: 1,
                offset: Vector::new(1.0, 0.0),
            },
            Command::Bounce {
                index: 1,
                axis: Axis::X,
                coordinate: 7.0,
            },
        ];
        apply_all(&commands, &mut particles, 1.0);

        assert_eq!(particles[0].position(), Point::ZERO);
        assert_eq!(particles[1].position(), Point::new(7.0, 0.0));
    }
}
