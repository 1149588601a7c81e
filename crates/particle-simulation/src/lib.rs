//! # Particle Simulation
//!
//! Frame-driven engine for the particle machine: a pacer fires frames, each
//! frame computes pairwise forces on a bounded worker pool, then applies the
//! resulting moves, velocity updates and wall bounces in one sequential pass.

pub mod command;
pub mod error;
pub mod frame;
pub mod machine;
pub mod pacer;
pub mod params;
pub mod simulation;

pub use command::*;
pub use error::*;
pub use frame::*;
pub use machine::*;
pub use pacer::*;
pub use params::*;
pub use simulation::*;
