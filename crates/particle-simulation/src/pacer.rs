//! Frame clock
//!
//! Calls a frame callback at a target rate on a background thread and
//! measures the rate it actually achieved. Whatever the [`PacerPolicy`], at
//! most one callback invocation is in flight at any time.

use crate::params::PacerPolicy;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Upper bound on a single sleep while waiting for the next tick
const POLL: Duration = Duration::from_millis(1);

pub const MAX_TARGET_FPS: u32 = 1000;

/// Rate used until a valid target is set
pub const DEFAULT_TARGET_FPS: u32 = 50;

/// State shared between the pacer handle and its threads
#[derive(Debug)]
struct Shared {
    interval_ms: AtomicU64,
    fps_bits: AtomicU64,
}

impl Shared {
    fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.load(Ordering::Relaxed))
    }

    fn fps(&self) -> f64 {
        f64::from_bits(self.fps_bits.load(Ordering::Relaxed))
    }

    fn record(&self, elapsed: Duration) -> Option<f64> {
        let ms = elapsed.as_secs_f64() * 1000.0;
        if ms <= 0.0 {
            return None;
        }

        let fps = 1000.0 / ms;
        self.fps_bits.store(fps.to_bits(), Ordering::Relaxed);
        Some(fps)
    }
}

/// Threads and stop flag of one start/stop cycle
struct Run {
    running: Arc<AtomicBool>,
    threads: Vec<JoinHandle<()>>,
}

pub struct Pacer {
    policy: PacerPolicy,
    target_fps: u32,
    shared: Arc<Shared>,
    run: Option<Run>,
}

impl Pacer {
    /// An out-of-range `target_fps` leaves the pacer at [`DEFAULT_TARGET_FPS`]
    pub fn new(policy: PacerPolicy, target_fps: u32) -> Self {
        let mut pacer = Self {
            policy,
            target_fps: DEFAULT_TARGET_FPS,
            shared: Arc::new(Shared {
                interval_ms: AtomicU64::new(u64::from(MAX_TARGET_FPS / DEFAULT_TARGET_FPS)),
                fps_bits: AtomicU64::new(0f64.to_bits()),
            }),
            run: None,
        };
        if target_fps == 0 || target_fps > MAX_TARGET_FPS {
            log::warn!("target fps {target_fps} out of range, using {DEFAULT_TARGET_FPS}");
        }
        pacer.set_target_fps(target_fps);
        pacer
    }

    pub fn policy(&self) -> PacerPolicy {
        self.policy
    }

    /// Milliseconds between ticks
    pub fn interval(&self) -> u64 {
        self.shared.interval_ms.load(Ordering::Relaxed)
    }

    /// Zero is ignored. Takes effect on the next tick.
    pub fn set_interval(&mut self, interval_ms: u64) {
        if interval_ms > 0 {
            self.shared.interval_ms.store(interval_ms, Ordering::Relaxed);
        }
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Values outside (0, 1000] are ignored
    pub fn set_target_fps(&mut self, target_fps: u32) {
        if target_fps > 0 && target_fps <= MAX_TARGET_FPS {
            self.target_fps = target_fps;
            self.set_interval(u64::from(MAX_TARGET_FPS / target_fps));
        }
    }

    /// Rate measured at the last tick; 0 before the first tick
    pub fn fps(&self) -> f64 {
        self.shared.fps()
    }

    /// Convert a per-second quantity to the last measured frame
    pub fn into_per_frame(&self, per_second: f64) -> f64 {
        per_second / self.fps()
    }

    pub fn enabled(&self) -> bool {
        self.run
            .as_ref()
            .is_some_and(|run| run.running.load(Ordering::Acquire))
    }

    /// Start ticking. The callback receives the fps measured for its tick.
    /// Does nothing if already running.
    pub fn start<F>(&mut self, callback: F)
    where
        F: FnMut(f64) + Send + 'static,
    {
        if self.enabled() {
            return;
        }

        let running = Arc::new(AtomicBool::new(true));
        let threads = match self.policy {
            PacerPolicy::Serialize => {
                vec![spawn_serialized(Arc::clone(&self.shared), Arc::clone(&running), callback)]
            }
            PacerPolicy::DropIfBusy => {
                spawn_drop_if_busy(Arc::clone(&self.shared), Arc::clone(&running), callback)
            }
        };

        log::debug!(
            "pacer started ({:?}, every {} ms)",
            self.policy,
            self.interval()
        );
        self.run = Some(Run { running, threads });
    }

    /// Stop ticking and wait for an in-flight callback to finish.
    ///
    /// Called from inside the callback, the wait is skipped: the threads exit
    /// on their own once the callback returns.
    pub fn stop(&mut self) {
        let Some(run) = self.run.take() else {
            return;
        };

        run.running.store(false, Ordering::Release);
        let current = thread::current().id();
        for handle in run.threads {
            if handle.thread().id() == current {
                continue;
            }
            if handle.join().is_err() {
                log::warn!("pacer thread panicked");
            }
        }
        log::debug!("pacer stopped");
    }
}

impl Drop for Pacer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Poll until the interval has elapsed, then run the callback to completion
/// before polling again.
fn spawn_serialized<F>(
    shared: Arc<Shared>,
    running: Arc<AtomicBool>,
    mut callback: F,
) -> JoinHandle<()>
where
    F: FnMut(f64) + Send + 'static,
{
    thread::spawn(move || {
        let mut last = Instant::now();
        while running.load(Ordering::Acquire) {
            let interval = shared.interval();
            let elapsed = last.elapsed();
            if elapsed < interval {
                thread::sleep((interval - elapsed).min(POLL));
                continue;
            }

            if let Some(fps) = shared.record(elapsed) {
                last = Instant::now();
                callback(fps);
            }
        }
    })
}

/// Fire on a fixed schedule. Ticks are handed to a single worker over a
/// rendezvous channel, so a tick that finds the worker busy is dropped.
fn spawn_drop_if_busy<F>(
    shared: Arc<Shared>,
    running: Arc<AtomicBool>,
    mut callback: F,
) -> Vec<JoinHandle<()>>
where
    F: FnMut(f64) + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel::<f64>(0);

    let worker = thread::spawn(move || {
        for fps in rx {
            callback(fps);
        }
    });

    let timer = thread::spawn(move || {
        let mut last = Instant::now();
        let mut next = last + shared.interval();
        while running.load(Ordering::Acquire) {
            let now = Instant::now();
            if now < next {
                thread::sleep((next - now).min(POLL));
                continue;
            }

            next += shared.interval();
            if next < now {
                next = now + shared.interval();
            }

            let elapsed = last.elapsed();
            let ms = elapsed.as_secs_f64() * 1000.0;
            if ms <= 0.0 {
                continue;
            }
            match tx.try_send(1000.0 / ms) {
                Ok(()) => {
                    shared.record(elapsed);
                    last = now;
                }
                Err(mpsc::TrySendError::Full(_)) => {
                    log::trace!("tick dropped: frame still running")
                }
                Err(mpsc::TrySendError::Disconnected(_)) => break,
            }
        }
        // Dropping the sender lets the worker finish its frame and exit
    });

    vec![timer, worker]
}
