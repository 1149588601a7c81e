//! Error types for the physics crate

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhysicsError {
    /// Checked group-matrix access outside `[0, MAX_GROUP)`
    #[error("group {group} is out of range (max {max})")]
    GroupOutOfRange { group: usize, max: usize },
}
