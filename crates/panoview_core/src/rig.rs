//! Camera orientation accumulation and sensor fusion
//!
//! The rig owns the orientation quaternion and translates the two control
//! sources into updates. Pitch and yaw are NOT read back from the
//! orientation: they are derived from wrapped drag-distance accumulators,
//! because Euler readback near the poles drifts. The orientation itself is
//! only consulted for the rotation angle reported downstream.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use panoview_math::{Quat, Vec2};
use panoview_input::{ControlMethod, ScreenOrientation};

use crate::types::PanoramaType;

/// Radians applied by a drag spanning the full viewport extent (360 degrees)
const MAX_PAN_ROTATION: f32 = TAU;

/// Owns the camera orientation and the drag/sensor bookkeeping
pub struct CameraRig {
    orientation: Quat,
    /// Wrapped cumulative horizontal drag distance in UI points
    x_delta_total: f32,
    /// Wrapped cumulative vertical drag distance in UI points
    y_delta_total: f32,
    /// Touch-applied pitch offset in radians, consumed by sensor fusion
    total_x: f32,
    /// Touch-applied yaw offset in radians, consumed by sensor fusion
    total_y: f32,
    pitch: f32,
    yaw: f32,
    start_angle: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraRig {
    pub fn new() -> Self {
        Self {
            orientation: Quat::IDENTITY,
            x_delta_total: 0.0,
            y_delta_total: 0.0,
            total_x: 0.0,
            total_y: 0.0,
            pitch: 0.0,
            yaw: 0.0,
            start_angle: 0.0,
        }
    }

    /// Builder: set the starting yaw in radians
    pub fn with_start_angle(mut self, start_angle: f32) -> Self {
        self.start_angle = start_angle;
        self.orientation = Quat::from_angle_axis(start_angle, 0.0, 1.0, 0.0);
        self
    }

    /// Current camera orientation for render-sink consumption
    #[inline]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Rotation angle in radians reported downstream
    #[inline]
    pub fn rotation_angle(&self) -> f32 {
        -self.orientation.euler_y()
    }

    /// Pitch in degrees derived from accumulated vertical drag
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Yaw in degrees derived from accumulated horizontal drag
    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub fn start_angle(&self) -> f32 {
        self.start_angle
    }

    pub fn set_start_angle(&mut self, start_angle: f32) {
        self.start_angle = start_angle;
    }

    #[inline]
    pub fn x_delta_total(&self) -> f32 {
        self.x_delta_total
    }

    #[inline]
    pub fn y_delta_total(&self) -> f32 {
        self.y_delta_total
    }

    #[inline]
    pub fn total_x(&self) -> f32 {
        self.total_x
    }

    #[inline]
    pub fn total_y(&self) -> f32 {
        self.total_y
    }

    /// Apply a pan translation delta in UI points
    ///
    /// Pitch/yaw always update from the wrapped drag distance. Under
    /// [`ControlMethod::Both`] the rotation itself is only accumulated into
    /// `total_x`/`total_y`; the next sensor sample consumes them. Otherwise
    /// the orientation is composed here: pitch about the camera-local X axis
    /// (right multiply), yaw about the world Y axis (left multiply). The
    /// asymmetric order keeps yaw anchored to world space so drags do not
    /// couple into roll.
    pub fn apply_pan(
        &mut self,
        delta: Vec2,
        pan_speed: Vec2,
        method: ControlMethod,
        panorama_type: PanoramaType,
        viewport: Vec2,
    ) {
        debug_assert!(viewport.x > 0.0 && viewport.y > 0.0);

        let mut speed = pan_speed;
        if panorama_type == PanoramaType::Cylindrical {
            // No vertical movement in a cylindrical panorama.
            speed.y = 0.0;
        }
        let delta = delta.scale(speed);

        // Drag distance wraps once per viewport extent: a full-width drag is
        // one full revolution.
        let pitch_ticks = 360.0 / viewport.y;
        self.y_delta_total += delta.y;
        if self.y_delta_total > viewport.y {
            self.y_delta_total -= viewport.y;
        } else if self.y_delta_total < 0.0 {
            self.y_delta_total += viewport.y;
        }
        self.pitch = self.y_delta_total * pitch_ticks;

        let yaw_ticks = 360.0 / viewport.x;
        self.x_delta_total += delta.x;
        if self.x_delta_total > viewport.x {
            self.x_delta_total -= viewport.x;
        } else if self.x_delta_total < 0.0 {
            self.x_delta_total += viewport.x;
        }
        self.yaw = self.x_delta_total * yaw_ticks;

        let y_radians = delta.x / viewport.x * MAX_PAN_ROTATION;
        let x_radians = delta.y / viewport.y * MAX_PAN_ROTATION;

        if method == ControlMethod::Both {
            // Accumulate only; the sensor callback applies these on top of
            // the next attitude sample.
            self.total_x += x_radians;
            self.total_y += y_radians;
        } else {
            let mut q = self.orientation;
            q = q * Quat::from_angle_axis(x_radians, 1.0, 0.0, 0.0);
            q = Quat::from_angle_axis(y_radians, 0.0, 1.0, 0.0) * q;
            self.orientation = q.normalized();
        }
    }

    /// Apply a two-finger rotate delta in radians about the camera Z axis
    pub fn apply_rotate(&mut self, z_radians: f32) {
        let q = self.orientation * Quat::from_angle_axis(z_radians, 0.0, 0.0, 1.0);
        self.orientation = q.normalized();
    }

    /// Fuse a device attitude sample into the orientation
    ///
    /// Cylindrical panoramas derive a heading from the attitude rotation
    /// matrix and set a yaw-only orientation, keeping the camera level.
    /// Spherical panoramas remap the attitude into the screen frame and,
    /// under [`ControlMethod::Both`], layer the accumulated touch offsets on
    /// top using the same composition order as the pan path.
    pub fn apply_motion(
        &mut self,
        attitude: Quat,
        screen_orientation: ScreenOrientation,
        method: ControlMethod,
        panorama_type: PanoramaType,
    ) {
        if panorama_type == PanoramaType::Cylindrical {
            let m = attitude.to_rotation_matrix();
            let mut user_heading = PI - m[2][1].atan2(m[2][0]);
            user_heading += FRAC_PI_2;

            let mut start_angle = self.start_angle;
            if method == ControlMethod::Both {
                start_angle += self.total_y;
            }
            self.orientation = Quat::from_angle_axis(start_angle - user_heading, 0.0, 1.0, 0.0);
        } else {
            let mut q = remap_attitude(attitude, screen_orientation);

            if method == ControlMethod::Both {
                q = q * Quat::from_angle_axis(self.total_x, 1.0, 0.0, 0.0);
                q = Quat::from_angle_axis(self.total_y, 0.0, 1.0, 0.0) * q;
            }

            self.orientation = q.normalized();
        }
    }

    /// Restore the starting orientation and zero all accumulators
    pub fn reset(&mut self) {
        self.orientation = Quat::from_angle_axis(self.start_angle, 0.0, 1.0, 0.0);
        self.x_delta_total = 0.0;
        self.y_delta_total = 0.0;
        self.total_x = 0.0;
        self.total_y = 0.0;
        self.pitch = 0.0;
        self.yaw = 0.0;
    }
}

/// Remap a device attitude quaternion from the sensor frame into the screen
/// frame for the current device-to-screen orientation
///
/// Each case applies fixed correction rotations and then permutes/negates the
/// x/y components per the sensor alignment table.
fn remap_attitude(attitude: Quat, screen_orientation: ScreenOrientation) -> Quat {
    match screen_orientation {
        ScreenOrientation::LandscapeRight => {
            let cq1 = Quat::from_angle_axis(FRAC_PI_2, 0.0, 1.0, 0.0);
            let cq2 = Quat::from_angle_axis(-FRAC_PI_2, 1.0, 0.0, 0.0);
            let q = cq2 * (cq1 * attitude);
            Quat::new(-q.y, q.x, q.z, q.w)
        }
        ScreenOrientation::LandscapeLeft => {
            let cq1 = Quat::from_angle_axis(-FRAC_PI_2, 0.0, 1.0, 0.0);
            let cq2 = Quat::from_angle_axis(-FRAC_PI_2, 1.0, 0.0, 0.0);
            let q = cq2 * (cq1 * attitude);
            Quat::new(q.y, -q.x, q.z, q.w)
        }
        ScreenOrientation::PortraitUpsideDown => {
            let cq1 = Quat::from_angle_axis(-FRAC_PI_2, 1.0, 0.0, 0.0);
            let cq2 = Quat::from_angle_axis(PI, 0.0, 0.0, 1.0);
            let q = cq2 * (cq1 * attitude);
            Quat::new(-q.x, -q.y, q.z, q.w)
        }
        ScreenOrientation::Portrait => {
            let clockwise = Quat::from_angle_axis(-FRAC_PI_2, 1.0, 0.0, 0.0);
            clockwise * attitude
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn viewport() -> Vec2 {
        Vec2::new(1000.0, 1000.0)
    }

    #[test]
    fn test_quarter_width_drag_yields_36_degrees_yaw() {
        let mut rig = CameraRig::new();
        rig.apply_pan(
            Vec2::new(250.0, 0.0),
            Vec2::new(0.4, 0.4),
            ControlMethod::Touch,
            PanoramaType::Spherical,
            viewport(),
        );
        assert!(approx_eq(rig.yaw(), 36.0));
        assert!(approx_eq(rig.pitch(), 0.0));
        // The orientation turned by the same fraction of a revolution.
        assert!(approx_eq(rig.rotation_angle(), -(36f32.to_radians())));
    }

    #[test]
    fn test_full_width_drag_wraps_accumulator() {
        let mut rig = CameraRig::new();
        let speed = Vec2::new(1.0, 1.0);
        rig.apply_pan(Vec2::new(500.0, 0.0), speed, ControlMethod::Touch, PanoramaType::Spherical, viewport());
        rig.apply_pan(Vec2::new(500.0, 0.0), speed, ControlMethod::Touch, PanoramaType::Spherical, viewport());
        assert!(approx_eq(rig.x_delta_total(), 1000.0));
        assert!(approx_eq(rig.yaw(), 360.0));

        // One more half-width drag wraps back down.
        rig.apply_pan(Vec2::new(500.0, 0.0), speed, ControlMethod::Touch, PanoramaType::Spherical, viewport());
        assert!(approx_eq(rig.x_delta_total(), 500.0));
        assert!(approx_eq(rig.yaw(), 180.0));
    }

    #[test]
    fn test_negative_drag_wraps_up() {
        let mut rig = CameraRig::new();
        rig.apply_pan(
            Vec2::new(-100.0, 0.0),
            Vec2::new(1.0, 1.0),
            ControlMethod::Touch,
            PanoramaType::Spherical,
            viewport(),
        );
        assert!(approx_eq(rig.x_delta_total(), 900.0));
        assert!(approx_eq(rig.yaw(), 324.0));
    }

    #[test]
    fn test_cylindrical_locks_pitch() {
        let mut rig = CameraRig::new();
        rig.apply_pan(
            Vec2::new(0.0, 300.0),
            Vec2::new(0.4, 0.4),
            ControlMethod::Touch,
            PanoramaType::Cylindrical,
            viewport(),
        );
        assert_eq!(rig.pitch(), 0.0);
        assert_eq!(rig.orientation(), Quat::IDENTITY);
    }

    #[test]
    fn test_both_accumulates_without_mutating_orientation() {
        let mut rig = CameraRig::new();
        rig.apply_pan(
            Vec2::new(500.0, 250.0),
            Vec2::new(1.0, 1.0),
            ControlMethod::Both,
            PanoramaType::Spherical,
            viewport(),
        );
        assert_eq!(rig.orientation(), Quat::IDENTITY);
        assert!(approx_eq(rig.total_y(), TAU * 0.5));
        assert!(approx_eq(rig.total_x(), TAU * 0.25));
        // Accumulators persist across pans until reset.
        rig.apply_pan(
            Vec2::new(250.0, 0.0),
            Vec2::new(1.0, 1.0),
            ControlMethod::Both,
            PanoramaType::Spherical,
            viewport(),
        );
        assert!(approx_eq(rig.total_y(), TAU * 0.75));
    }

    #[test]
    fn test_vertical_drag_does_not_touch_yaw_signal() {
        let mut rig = CameraRig::new();
        rig.apply_pan(
            Vec2::new(0.0, 200.0),
            Vec2::new(1.0, 1.0),
            ControlMethod::Touch,
            PanoramaType::Spherical,
            viewport(),
        );
        assert_eq!(rig.yaw(), 0.0);
        assert!(approx_eq(rig.pitch(), 72.0));
        // Pitch composes about camera-local X, so the reported yaw angle from
        // the orientation stays put as well.
        assert!(approx_eq(rig.rotation_angle(), 0.0));
    }

    #[test]
    fn test_motion_portrait_sets_remapped_attitude() {
        let mut rig = CameraRig::new();
        rig.apply_motion(
            Quat::IDENTITY,
            ScreenOrientation::Portrait,
            ControlMethod::Motion,
            PanoramaType::Spherical,
        );
        // Identity attitude remaps to a -90 degree pitch correction.
        assert!(approx_eq(rig.orientation().euler_x(), -FRAC_PI_2));
        assert!(approx_eq(rig.orientation().euler_y(), 0.0));
    }

    #[test]
    fn test_remap_landscape_right() {
        // Identity attitude through the landscape-right correction pair
        // Ry(pi/2) then Rx(-pi/2), components permuted (-y, x, z, w).
        let q = remap_attitude(Quat::IDENTITY, ScreenOrientation::LandscapeRight);
        assert!(approx_eq(q.x, -0.5));
        assert!(approx_eq(q.y, -0.5));
        assert!(approx_eq(q.z, -0.5));
        assert!(approx_eq(q.w, 0.5));
    }

    #[test]
    fn test_remap_landscape_left() {
        // Mirror of landscape-right: Ry(-pi/2) then Rx(-pi/2), permuted
        // (y, -x, z, w). The y/z signs differ from the right-side case.
        let q = remap_attitude(Quat::IDENTITY, ScreenOrientation::LandscapeLeft);
        assert!(approx_eq(q.x, -0.5));
        assert!(approx_eq(q.y, 0.5));
        assert!(approx_eq(q.z, 0.5));
        assert!(approx_eq(q.w, 0.5));
    }

    #[test]
    fn test_remap_portrait_upside_down() {
        // A 0.4 rad yaw attitude keeps all four components nonzero, so the
        // (-x, -y, z, w) negations are observable: Rx(-pi/2) then Rz(pi)
        // yields (-c*sy, -s*cy, c*cy, s*sy) before the permutation, with
        // s = c = sin(pi/4), sy = sin(0.2), cy = cos(0.2).
        let q = remap_attitude(
            Quat::from_angle_axis(0.4, 0.0, 1.0, 0.0),
            ScreenOrientation::PortraitUpsideDown,
        );
        assert!(approx_eq(q.x, 0.140481));
        assert!(approx_eq(q.y, 0.693011));
        assert!(approx_eq(q.z, 0.693011));
        assert!(approx_eq(q.w, 0.140481));
    }

    #[test]
    fn test_remap_preserves_unit_magnitude() {
        let attitude = Quat::from_angle_axis(0.9, 0.0, 1.0, 0.0);
        for orientation in [
            ScreenOrientation::Portrait,
            ScreenOrientation::LandscapeLeft,
            ScreenOrientation::LandscapeRight,
            ScreenOrientation::PortraitUpsideDown,
        ] {
            let q = remap_attitude(attitude, orientation);
            assert!(approx_eq(q.magnitude(), 1.0), "for {:?}", orientation);
        }
    }

    #[test]
    fn test_motion_cylindrical_is_yaw_only() {
        let mut rig = CameraRig::new();
        rig.apply_motion(
            Quat::from_angle_axis(0.4, 1.0, 0.0, 0.0),
            ScreenOrientation::Portrait,
            ControlMethod::Motion,
            PanoramaType::Cylindrical,
        );
        let q = rig.orientation();
        // A yaw-only quaternion has zero x and z components.
        assert!(q.x.abs() < EPSILON);
        assert!(q.z.abs() < EPSILON);
    }

    #[test]
    fn test_motion_both_consumes_touch_offsets() {
        let mut rig = CameraRig::new();
        rig.apply_pan(
            Vec2::new(250.0, 0.0),
            Vec2::new(1.0, 1.0),
            ControlMethod::Both,
            PanoramaType::Spherical,
            viewport(),
        );
        rig.apply_motion(
            Quat::IDENTITY,
            ScreenOrientation::Portrait,
            ControlMethod::Both,
            PanoramaType::Spherical,
        );

        let mut sensor_only = CameraRig::new();
        sensor_only.apply_motion(
            Quat::IDENTITY,
            ScreenOrientation::Portrait,
            ControlMethod::Motion,
            PanoramaType::Spherical,
        );

        // The touch offset rotated the fused orientation away from the pure
        // sensor orientation, and remains queued for the next sample too.
        assert!(rig.orientation() != sensor_only.orientation());
        assert!(approx_eq(rig.total_y(), TAU * 0.25));
    }

    #[test]
    fn test_reset_restores_start_angle() {
        let mut rig = CameraRig::new().with_start_angle(0.5);
        rig.apply_pan(
            Vec2::new(300.0, 120.0),
            Vec2::new(1.0, 1.0),
            ControlMethod::Both,
            PanoramaType::Spherical,
            viewport(),
        );
        rig.reset();
        assert_eq!(rig.pitch(), 0.0);
        assert_eq!(rig.yaw(), 0.0);
        assert_eq!(rig.total_x(), 0.0);
        assert_eq!(rig.total_y(), 0.0);
        assert!(approx_eq(rig.orientation().euler_y(), 0.5));
    }
}
