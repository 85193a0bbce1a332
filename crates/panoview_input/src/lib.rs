//! Panorama Input Handling
//!
//! This crate turns raw control events into orientation updates on a
//! [`PanoramaControl`] implementor:
//!
//! - [`GestureProcessor`] - pan / pinch / two-finger-rotate phase handling
//! - [`MotionSampler`] - fixed-interval device attitude sampling on a
//!   background thread, marshalled to the owning thread over a channel

mod gestures;
mod motion;

pub use gestures::{ControlMethod, GesturePhase, GestureProcessor, PanoramaControl};
pub use motion::{
    MotionPause, MotionSample, MotionSampler, MotionSource, ScreenOrientation,
    DEFAULT_SAMPLE_INTERVAL,
};
