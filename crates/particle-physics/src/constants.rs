//! Reference constants for the particle machine
//!
//! Distances are in pixels, velocities in pixels per second.

/// Number of particle groups the interaction matrix covers
pub const MAX_GROUP: usize = 10;

/// Velocity retention per frame, in (0, 1]
pub const CONSERVATION: f64 = 1.0;

/// Gravitational distortion produced by a particle of energy 1
pub const MASS_DISTORTION: f64 = 2.0;

/// Speed cap used by the velocity-limiting coefficient
pub const MAX_VELOCITY: f64 = 10_000.0;

/// Spin magnitude given to freshly seeded particles
pub const PRIMARY_SPIN: f64 = 0.5;

/// Radius of a particle with energy 1
pub const PRIMARY_RADIUS: f64 = 4.0;

/// Gravity field (tension, dispersal)
pub const GRAVITY_FIELD: (f64, f64) = (0.001, 70.0);

/// Collision field (tension, dispersal); dispersal is scaled by the radius
pub const COLLISION_FIELD: (f64, f64) = (100.0, 0.5);

/// Electricity field (tension, dispersal); not part of the interaction sum
pub const ELECTRICITY_FIELD: (f64, f64) = (1.0, 1.0);

/// Spin coupling field (tension, dispersal)
pub const SPIN_FIELD: (f64, f64) = (0.5, 40.0);

/// Group affinity field (tension, dispersal)
pub const GROUP_FIELD: (f64, f64) = (0.3, 40.0);

/// Number of groups used when seeding a random population
pub const SEED_GROUPS: usize = 3;
