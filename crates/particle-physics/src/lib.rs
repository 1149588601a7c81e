//! # Particle Physics
//!
//! Primitives and force model for a 2D particle machine: planar vectors,
//! field descriptors, the group interaction matrix, particles and the
//! pairwise interaction law.

pub mod constants;
pub mod error;
pub mod field;
pub mod forces;
pub mod group;
pub mod instance;
pub mod particle;
pub mod physics;
pub mod rect;
pub mod vector;

pub use constants::*;
pub use error::*;
pub use field::*;
pub use forces::*;
pub use group::*;
pub use instance::*;
pub use particle::*;
pub use physics::*;
pub use rect::*;
pub use vector::*;
