//! Machine configuration

use particle_physics::Rect;

/// What the pacer does when a tick comes due while the previous frame is
/// still running. Either way, frames never overlap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PacerPolicy {
    /// Wait for the running frame, then fire. Ticks are delayed, never lost.
    #[default]
    Serialize,
    /// Fire on a fixed schedule and discard ticks that find a frame running.
    DropIfBusy,
}

/// How the force pass walks the population
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ComputeMode {
    /// One bounded worker pool over particles, sequential inner scan
    #[default]
    Parallel,
    /// Single-threaded reference path
    Sequential,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MachineConfig {
    /// Frames per second the pacer aims for, in (0, 1000]
    pub target_fps: u32,
    /// Size of the force-pass worker pool; 0 lets rayon pick
    pub worker_threads: usize,
    pub pacer_policy: PacerPolicy,
    pub compute_mode: ComputeMode,
    /// World bounds particles bounce off
    pub world: Rect,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            worker_threads: 3,
            pacer_policy: PacerPolicy::Serialize,
            compute_mode: ComputeMode::Parallel,
            world: Rect::sized(800.0, 600.0),
        }
    }
}

impl MachineConfig {
    pub fn with_target_fps(mut self, target_fps: u32) -> Self {
        self.target_fps = target_fps;
        self
    }

    pub fn with_worker_threads(mut self, worker_threads: usize) -> Self {
        self.worker_threads = worker_threads;
        self
    }

    pub fn with_pacer_policy(mut self, pacer_policy: PacerPolicy) -> Self {
        self.pacer_policy = pacer_policy;
        self
    }

    pub fn with_compute_mode(mut self, compute_mode: ComputeMode) -> Self {
        self.compute_mode = compute_mode;
        self
    }

    pub fn with_world(mut self, world: Rect) -> Self {
        self.world = world;
        self
    }
}
