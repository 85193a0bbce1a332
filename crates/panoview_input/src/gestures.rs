//! Gesture phase handling for panorama control
//!
//! Gesture recognizers live outside this crate; they deliver absolute
//! translations, pinch scales and rotation angles with began/changed/ended
//! phases. The processor differences them into deltas and drives a
//! [`PanoramaControl`] implementor.

use panoview_math::Vec2;
use serde::{Serialize, Deserialize};

use crate::motion::{MotionPause, MotionSample};

/// Which inputs are allowed to mutate the camera orientation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMethod {
    /// Device attitude only
    Motion,
    /// Touch gestures only
    Touch,
    /// Touch layered as a persistent offset on top of device attitude
    Both,
}

impl Default for ControlMethod {
    fn default() -> Self {
        ControlMethod::Touch
    }
}

/// Lifecycle of a continuous gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
}

/// Trait for the camera-side of gesture handling
///
/// Allows the processor to work with any viewer implementation.
pub trait PanoramaControl {
    /// Currently active control method
    fn control_method(&self) -> ControlMethod;
    /// Whether the two-finger rotate gesture applies (false for cylinders)
    fn rotate_gesture_enabled(&self) -> bool;
    /// Current vertical field of view in degrees
    fn field_of_view(&self) -> f32;
    /// Set the vertical field of view in degrees
    fn set_field_of_view(&mut self, degrees: f32);
    /// (min, max) field of view bounds in degrees
    fn fov_limits(&self) -> (f32, f32);
    /// Apply a pan translation delta in UI points
    fn apply_pan(&mut self, delta: Vec2);
    /// Apply a roll delta in radians about the camera Z axis
    fn apply_rotate(&mut self, delta: f32);
    /// Apply a device attitude sample
    fn apply_motion(&mut self, sample: &MotionSample);
}

/// Differences absolute gesture values into per-event deltas
///
/// One processor per viewer; it carries the previous pan location, previous
/// rotation angle and the field of view captured when a pinch began.
#[derive(Default)]
pub struct GestureProcessor {
    prev_location: Vec2,
    prev_rotation: f32,
    start_scale: f32,
}

impl GestureProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a pan gesture event carrying the absolute translation from the
    /// gesture start point.
    pub fn handle_pan<C: PanoramaControl>(
        &mut self,
        control: &mut C,
        phase: GesturePhase,
        location: Vec2,
    ) {
        match phase {
            GesturePhase::Began => {
                self.prev_location = Vec2::ZERO;
            }
            GesturePhase::Changed => {
                let delta = location - self.prev_location;
                control.apply_pan(delta);
                self.prev_location = location;
            }
            GesturePhase::Ended => {}
        }
    }

    /// Handle a pinch gesture event carrying the absolute scale factor.
    ///
    /// Zooming divides the field of view captured at gesture start; values
    /// outside (min, max] are ignored rather than clamped, so the gesture
    /// stalls at the bounds exactly like the original control.
    pub fn handle_pinch<C: PanoramaControl>(
        &mut self,
        control: &mut C,
        phase: GesturePhase,
        scale: f32,
    ) {
        match phase {
            GesturePhase::Began => {
                self.start_scale = control.field_of_view();
            }
            GesturePhase::Changed => {
                let fov = self.start_scale / scale;
                let (min_fov, max_fov) = control.fov_limits();
                if fov > min_fov && fov <= max_fov {
                    control.set_field_of_view(fov);
                }
            }
            GesturePhase::Ended => {}
        }
    }

    /// Handle a two-finger rotate gesture carrying the absolute rotation in
    /// radians.
    ///
    /// Disabled entirely for cylindrical panoramas. When the control method
    /// is [`ControlMethod::Both`], motion sampling is paused for the duration
    /// of the gesture so sensor samples do not fight the fingers.
    pub fn handle_rotate<C: PanoramaControl>(
        &mut self,
        control: &mut C,
        motion_pause: Option<&MotionPause>,
        phase: GesturePhase,
        rotation: f32,
    ) {
        if !control.rotate_gesture_enabled() {
            return;
        }

        match phase {
            GesturePhase::Began => {
                self.prev_rotation = 0.0;
                if control.control_method() == ControlMethod::Both {
                    if let Some(pause) = motion_pause {
                        pause.set(true);
                    }
                }
            }
            GesturePhase::Changed => {
                control.apply_rotate(rotation - self.prev_rotation);
                self.prev_rotation = rotation;
            }
            GesturePhase::Ended => {
                if let Some(pause) = motion_pause {
                    pause.set(false);
                }
            }
        }
    }
}
