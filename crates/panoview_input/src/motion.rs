//! Device attitude sampling
//!
//! Sensor acquisition itself is platform glue and lives behind the
//! [`MotionSource`] trait. The sampler polls a source at a fixed interval on
//! a background thread and forwards samples over a channel; the viewer owner
//! drains that channel on its own thread, which is the single point where
//! orientation state is mutated.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use panoview_math::Quat;
use serde::{Serialize, Deserialize};

/// Default attitude sampling interval (~15ms)
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(15);

/// Device-to-screen orientation at the time a sample was taken
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenOrientation {
    Portrait,
    LandscapeLeft,
    LandscapeRight,
    PortraitUpsideDown,
}

impl Default for ScreenOrientation {
    fn default() -> Self {
        ScreenOrientation::Portrait
    }
}

/// One device attitude reading
#[derive(Clone, Copy, Debug)]
pub struct MotionSample {
    /// Device attitude relative to the reference frame
    pub attitude: Quat,
    /// Screen orientation used to remap the sensor frame
    pub screen_orientation: ScreenOrientation,
}

/// Provider of device attitude samples
///
/// `sample` returning `None` models a malformed sensor callback: it is logged
/// and sampling stops permanently for this sampler.
pub trait MotionSource: Send + 'static {
    /// Whether the underlying sensor exists and can deliver samples
    fn is_available(&self) -> bool;
    /// Pull the next attitude reading
    fn sample(&mut self) -> Option<MotionSample>;
}

/// Shared pause flag for short-lived sample suppression
///
/// Pausing drops samples at the source instead of stopping the sampling
/// thread, so resuming does not pay sensor-restart latency. Used while a
/// two-finger rotate gesture is in flight.
#[derive(Clone, Default)]
pub struct MotionPause(Arc<AtomicBool>);

impl MotionPause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, paused: bool) {
        self.0.store(paused, Ordering::Relaxed);
    }

    pub fn is_paused(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Fixed-interval attitude sampler
///
/// `start` is a silent no-op when the source reports unavailable, and `stop`
/// is idempotent. Samples taken while paused are dropped, not queued.
pub struct MotionSampler {
    interval: Duration,
    running: Arc<AtomicBool>,
    paused: MotionPause,
    receiver: Option<Receiver<MotionSample>>,
    handle: Option<JoinHandle<()>>,
}

impl Default for MotionSampler {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_INTERVAL)
    }
}

impl MotionSampler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: Arc::new(AtomicBool::new(false)),
            paused: MotionPause::new(),
            receiver: None,
            handle: None,
        }
    }

    /// Begin sampling the given source on a background thread
    ///
    /// Does nothing if sampling is already active or the source is
    /// unavailable.
    pub fn start<S: MotionSource>(&mut self, mut source: S) {
        if self.is_active() {
            log::debug!("motion sampling already active");
            return;
        }
        if !source.is_available() {
            log::debug!("device motion unavailable; sampling not started");
            return;
        }

        let (sender, receiver): (Sender<MotionSample>, Receiver<MotionSample>) = mpsc::channel();
        self.receiver = Some(receiver);
        self.paused.set(false);
        self.running.store(true, Ordering::Relaxed);

        let running = Arc::clone(&self.running);
        let paused = self.paused.clone();
        let interval = self.interval;

        self.handle = Some(std::thread::spawn(move || {
            while running.load(Ordering::Relaxed) {
                if !paused.is_paused() {
                    match source.sample() {
                        Some(sample) => {
                            // Owner dropped its receiver; nothing left to feed.
                            if sender.send(sample).is_err() {
                                break;
                            }
                        }
                        None => {
                            log::error!("motion sample missing; stopping device motion updates");
                            running.store(false, Ordering::Relaxed);
                            break;
                        }
                    }
                }
                std::thread::sleep(interval);
            }
        }));
    }

    /// Stop sampling; safe to call when already stopped
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        self.receiver = None;
    }

    /// Whether the sampling thread is running
    pub fn is_active(&self) -> bool {
        self.handle.is_some() && self.running.load(Ordering::Relaxed)
    }

    /// Handle for pausing sample delivery without stopping the thread
    pub fn pause_handle(&self) -> MotionPause {
        self.paused.clone()
    }

    /// Drain queued samples for processing on the owning thread
    pub fn pending(&mut self) -> Vec<MotionSample> {
        match &self.receiver {
            Some(receiver) => receiver.try_iter().collect(),
            None => Vec::new(),
        }
    }
}

impl Drop for MotionSampler {
    fn drop(&mut self) {
        self.stop();
    }
}
