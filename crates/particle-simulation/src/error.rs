//! Error types for the machine

use particle_physics::PhysicsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MachineError {
    /// Settings were built without a physics model
    #[error("a physics model must be supplied")]
    MissingPhysics,

    /// The operation is only allowed while the machine is stopped
    #[error("the machine is running; stop it first")]
    Running,

    #[error(transparent)]
    Physics(#[from] PhysicsError),

    #[error("failed to build the worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
