//! Event dispatch for viewer state changes
//!
//! Every orientation mutation ends in one explicit dispatch call with a fixed
//! delivery order: compass sink, then the user movement handler, then the
//! rotation key handler, then the camera-moved handler. Some report sites
//! (reset, viewport resize) suppress the user movement handler while still
//! feeding the rest; [`ReportFlags`] selects which handlers fire.

use bitflags::bitflags;

bitflags! {
    /// Which handlers a report delivers to (the compass always updates)
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ReportFlags: u8 {
        /// The user-facing movement handler
        const MOVEMENT_HANDLER = 1 << 0;
        /// The rotation key handler
        const ROTATION_KEY = 1 << 1;
        /// The pitch/yaw camera-moved handler
        const CAMERA_MOVED = 1 << 2;
    }
}

/// Sink for a compass-style overlay tied to the viewer
///
/// Updated before any user handler so the overlay never lags a callback that
/// might trigger further work.
pub trait Compass {
    /// Called with the rotation angle and horizontal field of view in radians
    fn update_ui(&mut self, rotation_angle: f32, field_of_view: f32);
}

/// `(rotation_angle_radians, field_of_view_radians)` movement callback
pub type MovementHandler = Box<dyn FnMut(f32, f32)>;

/// Coarse rotation-bucket key callback
pub type RotationKeyHandler = Box<dyn FnMut(i64)>;

/// `(pitch_degrees, yaw_degrees, roll_degrees)` camera-moved callback
pub type CameraMovedHandler = Box<dyn FnMut(f32, f32, f32)>;

/// Optional user callbacks delivered after each state mutation
#[derive(Default)]
pub struct EventHandlers {
    pub movement: Option<MovementHandler>,
    pub rotation_key: Option<RotationKeyHandler>,
    pub camera_moved: Option<CameraMovedHandler>,
}

impl EventHandlers {
    pub fn new() -> Self {
        Self::default()
    }
}
