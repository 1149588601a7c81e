//! Frame-completed notifications

/// Sent once per completed frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameArgs {
    /// Number of frames completed since the last start
    pub index: u64,
    /// Instantaneous rate the frame was integrated at
    pub fps: f64,
}

/// Callback invoked from the pacer's thread after every frame.
///
/// Listeners must hand the data off to their own context (e.g. a UI thread)
/// rather than block.
pub type FrameListener = Box<dyn FnMut(FrameArgs) + Send>;
