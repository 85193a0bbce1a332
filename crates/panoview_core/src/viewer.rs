//! One panorama viewer instance
//!
//! `PanoramaViewer` binds a [`CameraRig`] to field-of-view state, the heading
//! converters and event dispatch. It is the [`PanoramaControl`] implementor
//! gesture processing and motion pumping drive, and the piece a render sink
//! reads the orientation quaternion from.
//!
//! All mutation happens through `&mut self` on the owning thread; motion
//! samples are marshalled here by draining the sampler queue on that thread.

use panoview_math::{Quat, Vec2};
use panoview_input::{ControlMethod, MotionSample, PanoramaControl};

use crate::events::{Compass, EventHandlers, ReportFlags};
use crate::heading::HeadingConverter;
use crate::rig::CameraRig;
use crate::rotation_key;
use crate::types::PanoramaType;

pub struct PanoramaViewer {
    rig: CameraRig,
    panorama_type: PanoramaType,
    control_method: ControlMethod,
    pan_speed: Vec2,
    /// Yaw offset applied to the panorama geometry by the render sink
    angle_offset: f32,
    min_fov: f32,
    max_fov: f32,
    y_fov: f32,
    viewport: Vec2,
    pitch_converter: HeadingConverter,
    yaw_converter: HeadingConverter,
    roll_converter: HeadingConverter,
    heading: f32,
    pitch_heading: f32,
    roll_heading: f32,
    last_rotation_key: i64,
    compass: Option<Box<dyn Compass>>,
    handlers: EventHandlers,
}

impl PanoramaViewer {
    /// Create a viewer for the given viewport extent in UI points
    pub fn new(viewport: Vec2) -> Self {
        Self {
            rig: CameraRig::new(),
            panorama_type: PanoramaType::default(),
            control_method: ControlMethod::default(),
            pan_speed: Vec2::new(0.4, 0.4),
            angle_offset: 0.0,
            min_fov: 40.0,
            max_fov: 100.0,
            y_fov: 100.0,
            viewport,
            pitch_converter: HeadingConverter::new(),
            yaw_converter: HeadingConverter::new(),
            roll_converter: HeadingConverter::new(),
            heading: 0.0,
            pitch_heading: 0.0,
            roll_heading: 0.0,
            last_rotation_key: 0,
            compass: None,
            handlers: EventHandlers::new(),
        }
    }

    /// Builder: set the panorama projection type
    pub fn with_panorama_type(mut self, panorama_type: PanoramaType) -> Self {
        self.panorama_type = panorama_type;
        self
    }

    /// Builder: set the control method
    pub fn with_control_method(mut self, control_method: ControlMethod) -> Self {
        self.control_method = control_method;
        self
    }

    /// Builder: set the pan speed factors
    pub fn with_pan_speed(mut self, pan_speed: Vec2) -> Self {
        self.pan_speed = pan_speed;
        self
    }

    /// Builder: set the starting yaw in radians
    pub fn with_start_angle(mut self, start_angle: f32) -> Self {
        self.rig = CameraRig::new().with_start_angle(start_angle);
        self
    }

    /// Builder: set the field of view bounds in degrees
    pub fn with_fov_range(mut self, min_fov: f32, max_fov: f32) -> Self {
        self.min_fov = min_fov;
        self.max_fov = max_fov;
        self.y_fov = max_fov;
        self
    }

    /// Builder: set the geometry yaw offset in radians
    pub fn with_angle_offset(mut self, angle_offset: f32) -> Self {
        self.angle_offset = angle_offset;
        self
    }

    // ------------------------------------------------------------------
    // State readback

    /// Current orientation quaternion for render-sink consumption
    pub fn orientation(&self) -> Quat {
        self.rig.orientation()
    }

    /// Pitch in degrees derived from accumulated drag distance
    pub fn pitch(&self) -> f32 {
        self.rig.pitch()
    }

    /// Yaw in degrees derived from accumulated drag distance
    pub fn yaw(&self) -> f32 {
        self.rig.yaw()
    }

    /// Debounced 0-360 degree heading from the last report
    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Debounced pitch heading from the last report
    pub fn pitch_heading(&self) -> f32 {
        self.pitch_heading
    }

    /// Debounced roll heading from the last report
    pub fn roll_heading(&self) -> f32 {
        self.roll_heading
    }

    /// The key delivered by the most recent rotation report
    pub fn last_rotation_key(&self) -> i64 {
        self.last_rotation_key
    }

    pub fn panorama_type(&self) -> PanoramaType {
        self.panorama_type
    }

    pub fn control_method(&self) -> ControlMethod {
        self.control_method
    }

    /// Yaw offset the render sink should apply to the panorama geometry
    pub fn angle_offset(&self) -> f32 {
        self.angle_offset
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Horizontal field of view in degrees, derived from the vertical one
    pub fn x_fov(&self) -> f32 {
        self.y_fov * self.viewport.x / self.viewport.y
    }

    // ------------------------------------------------------------------
    // Explicit configuration setters
    //
    // Setting the panorama type or control method changes what subsequent
    // input means, so callers follow up with an explicit `reset_camera`;
    // `PanoramaManager` does exactly that. Nothing cascades implicitly here.

    pub fn set_panorama_type(&mut self, panorama_type: PanoramaType) {
        self.panorama_type = panorama_type;
    }

    pub fn set_control_method(&mut self, control_method: ControlMethod) {
        self.control_method = control_method;
    }

    pub fn set_start_angle(&mut self, start_angle: f32) {
        self.rig.set_start_angle(start_angle);
    }

    pub fn set_angle_offset(&mut self, angle_offset: f32) {
        self.angle_offset = angle_offset;
    }

    pub fn set_pan_speed(&mut self, pan_speed: Vec2) {
        self.pan_speed = pan_speed;
    }

    /// Attach the compass overlay sink
    pub fn set_compass(&mut self, compass: Box<dyn Compass>) {
        self.compass = Some(compass);
    }

    /// Set the user movement handler
    pub fn set_movement_handler<F: FnMut(f32, f32) + 'static>(&mut self, handler: F) {
        self.handlers.movement = Some(Box::new(handler));
    }

    /// Set the rotation key handler
    pub fn set_rotation_key_handler<F: FnMut(i64) + 'static>(&mut self, handler: F) {
        self.handlers.rotation_key = Some(Box::new(handler));
    }

    /// Set the camera-moved handler
    pub fn set_camera_moved_handler<F: FnMut(f32, f32, f32) + 'static>(&mut self, handler: F) {
        self.handlers.camera_moved = Some(Box::new(handler));
    }

    /// Update the viewport extent
    ///
    /// A size change re-reports movement so the compass and derived signals
    /// track the new field of view, but does not re-fire the user movement
    /// handler.
    pub fn set_viewport(&mut self, size: Vec2) {
        if size == self.viewport {
            return;
        }
        self.viewport = size;
        self.report_movement(
            self.rig.rotation_angle(),
            self.x_fov().to_radians(),
            ReportFlags::all() & !ReportFlags::MOVEMENT_HANDLER,
        );
    }

    // ------------------------------------------------------------------
    // Input application

    /// Apply a pan translation delta in UI points and report movement
    ///
    /// Also the entry point for synthetic one-shot pans (gamepad-style
    /// `move_camera`), which carry the whole translation in a single delta.
    pub fn apply_pan(&mut self, delta: Vec2) {
        self.rig.apply_pan(
            delta,
            self.pan_speed,
            self.control_method,
            self.panorama_type,
            self.viewport,
        );
        self.report_movement(
            self.rig.rotation_angle(),
            self.x_fov().to_radians(),
            ReportFlags::all(),
        );
    }

    /// Apply a two-finger rotate delta in radians
    ///
    /// Roll does not change the reported heading, so no report fires.
    pub fn apply_rotate(&mut self, delta: f32) {
        self.rig.apply_rotate(delta);
    }

    /// Apply a device attitude sample and report movement
    ///
    /// Ignored unless the control method admits sensor input.
    pub fn apply_motion(&mut self, sample: &MotionSample) {
        if self.control_method == ControlMethod::Touch {
            return;
        }
        self.rig.apply_motion(
            sample.attitude,
            sample.screen_orientation,
            self.control_method,
            self.panorama_type,
        );
        self.report_movement(
            self.rig.rotation_angle(),
            self.x_fov().to_radians(),
            ReportFlags::all(),
        );
    }

    /// Reset the camera to its starting pose
    ///
    /// With `reset_angle` false (viewer-wide policy says keep the current
    /// view across an image swap) only the field of view snaps back and the
    /// stored rotation key is re-delivered so downstream state resyncs.
    pub fn reset_camera(&mut self, reset_angle: bool) {
        self.y_fov = self.max_fov;
        if reset_angle {
            self.rig.reset();
            self.pitch_converter.reset();
            self.yaw_converter.reset();
            self.roll_converter.reset();
            self.report_movement(
                self.rig.start_angle(),
                self.x_fov().to_radians(),
                ReportFlags::all() & !ReportFlags::MOVEMENT_HANDLER,
            );
        } else {
            if let Some(handler) = self.handlers.rotation_key.as_mut() {
                handler(self.last_rotation_key);
            }
            self.report_camera_moved();
        }
    }

    // ------------------------------------------------------------------
    // Dispatch

    /// Deliver one movement report
    ///
    /// Order is fixed: compass, movement handler, rotation key, camera moved.
    fn report_movement(&mut self, rotation_angle: f32, field_of_view: f32, flags: ReportFlags) {
        if let Some(compass) = self.compass.as_mut() {
            compass.update_ui(rotation_angle, field_of_view);
        }

        // Stabilized headings for downstream consumers.
        let euler = self.rig.orientation().euler_angles();
        self.pitch_heading = self.pitch_converter.convert(euler[0]);
        self.heading = self.yaw_converter.convert(rotation_angle);
        self.roll_heading = self.roll_converter.convert(euler[2]);

        if flags.contains(ReportFlags::MOVEMENT_HANDLER) {
            if let Some(handler) = self.handlers.movement.as_mut() {
                handler(rotation_angle, field_of_view);
            }
        }

        if flags.contains(ReportFlags::ROTATION_KEY) && self.handlers.rotation_key.is_some() {
            let orientation = self.rig.orientation();
            let (axis, _) = orientation.to_axis_angle();
            match rotation_key::encode(rotation_angle, axis[1] * orientation.y) {
                Ok(key) => {
                    if let Some(handler) = self.handlers.rotation_key.as_mut() {
                        handler(key);
                    }
                    self.last_rotation_key = key;
                }
                Err(err) => log::error!("rotation key encoding failed: {}", err),
            }
        }

        if flags.contains(ReportFlags::CAMERA_MOVED) {
            self.report_camera_moved();
        }
    }

    fn report_camera_moved(&mut self) {
        if let Some(handler) = self.handlers.camera_moved.as_mut() {
            handler(self.rig.pitch().round(), self.rig.yaw().round(), 0.0);
        }
    }
}

impl PanoramaControl for PanoramaViewer {
    fn control_method(&self) -> ControlMethod {
        self.control_method
    }

    fn rotate_gesture_enabled(&self) -> bool {
        self.panorama_type == PanoramaType::Spherical
    }

    fn field_of_view(&self) -> f32 {
        self.y_fov
    }

    fn set_field_of_view(&mut self, degrees: f32) {
        self.y_fov = degrees;
    }

    fn fov_limits(&self) -> (f32, f32) {
        (self.min_fov, self.max_fov)
    }

    fn apply_pan(&mut self, delta: Vec2) {
        PanoramaViewer::apply_pan(self, delta);
    }

    fn apply_rotate(&mut self, delta: f32) {
        PanoramaViewer::apply_rotate(self, delta);
    }

    fn apply_motion(&mut self, sample: &MotionSample) {
        PanoramaViewer::apply_motion(self, sample);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use panoview_input::ScreenOrientation;

    const EPSILON: f32 = 0.001;

    fn viewer() -> PanoramaViewer {
        PanoramaViewer::new(Vec2::new(1000.0, 1000.0))
    }

    #[test]
    fn test_quarter_drag_scenario() {
        let mut v = viewer();
        v.apply_pan(Vec2::new(250.0, 0.0));
        assert!((v.yaw() - 36.0).abs() < EPSILON);
        assert_eq!(v.pitch(), 0.0);
    }

    #[test]
    fn test_camera_moved_receives_rounded_degrees() {
        let mut v = viewer();
        let seen: Rc<RefCell<Vec<(f32, f32, f32)>>> = Rc::default();
        let sink = Rc::clone(&seen);
        v.set_camera_moved_handler(move |pitch, yaw, roll| {
            sink.borrow_mut().push((pitch, yaw, roll));
        });

        v.apply_pan(Vec2::new(251.0, 0.0));
        // 251 * 0.4 * 0.36 = 36.144, rounded to the nearest degree.
        assert_eq!(seen.borrow().as_slice(), &[(0.0, 36.0, 0.0)]);
    }

    #[test]
    fn test_dispatch_order() {
        struct OrderCompass(Rc<RefCell<Vec<&'static str>>>);
        impl Compass for OrderCompass {
            fn update_ui(&mut self, _rotation_angle: f32, _field_of_view: f32) {
                self.0.borrow_mut().push("compass");
            }
        }

        let order: Rc<RefCell<Vec<&'static str>>> = Rc::default();
        let mut v = viewer();
        v.set_compass(Box::new(OrderCompass(Rc::clone(&order))));
        let o = Rc::clone(&order);
        v.set_movement_handler(move |_, _| o.borrow_mut().push("movement"));
        let o = Rc::clone(&order);
        v.set_rotation_key_handler(move |_| o.borrow_mut().push("rotation_key"));
        let o = Rc::clone(&order);
        v.set_camera_moved_handler(move |_, _, _| o.borrow_mut().push("camera_moved"));

        v.apply_pan(Vec2::new(10.0, 0.0));
        assert_eq!(
            order.borrow().as_slice(),
            &["compass", "movement", "rotation_key", "camera_moved"]
        );
    }

    #[test]
    fn test_viewport_change_skips_movement_handler() {
        let moved: Rc<RefCell<u32>> = Rc::default();
        let keyed: Rc<RefCell<u32>> = Rc::default();

        let mut v = viewer();
        let m = Rc::clone(&moved);
        v.set_movement_handler(move |_, _| *m.borrow_mut() += 1);
        let k = Rc::clone(&keyed);
        v.set_rotation_key_handler(move |_| *k.borrow_mut() += 1);

        v.set_viewport(Vec2::new(800.0, 600.0));
        assert_eq!(*moved.borrow(), 0);
        assert_eq!(*keyed.borrow(), 1);

        // Same size again: no report at all.
        v.set_viewport(Vec2::new(800.0, 600.0));
        assert_eq!(*keyed.borrow(), 1);
    }

    #[test]
    fn test_reset_restores_pose_and_fov() {
        let mut v = viewer().with_start_angle(0.25);
        v.set_field_of_view(55.0);
        v.apply_pan(Vec2::new(400.0, 150.0));
        v.reset_camera(true);

        assert_eq!(v.pitch(), 0.0);
        assert_eq!(v.yaw(), 0.0);
        assert_eq!(v.field_of_view(), 100.0);
        assert!((v.orientation().euler_y() - 0.25).abs() < EPSILON);
    }

    #[test]
    fn test_reset_without_angle_replays_last_key() {
        let keys: Rc<RefCell<Vec<i64>>> = Rc::default();
        let mut v = viewer();
        let k = Rc::clone(&keys);
        v.set_rotation_key_handler(move |key| k.borrow_mut().push(key));

        v.apply_pan(Vec2::new(300.0, 0.0));
        let last = *keys.borrow().last().unwrap();

        v.reset_camera(false);
        assert_eq!(*keys.borrow().last().unwrap(), last);
        // The camera itself did not move.
        assert!((v.yaw() - 43.0).abs() < 1.0);
    }

    #[test]
    fn test_touch_method_ignores_motion_samples() {
        let mut v = viewer();
        let before = v.orientation();
        v.apply_motion(&MotionSample {
            attitude: Quat::from_angle_axis(0.8, 0.0, 1.0, 0.0),
            screen_orientation: ScreenOrientation::Portrait,
        });
        assert_eq!(v.orientation(), before);
    }

    #[test]
    fn test_motion_sample_updates_heading_state() {
        let mut v = viewer().with_control_method(ControlMethod::Motion);
        v.apply_motion(&MotionSample {
            attitude: Quat::IDENTITY,
            screen_orientation: ScreenOrientation::Portrait,
        });
        // A report ran: the debounced heading state is now defined.
        assert!((0.0..360.0).contains(&v.heading()));
    }

    #[test]
    fn test_cylindrical_disables_rotate_gesture() {
        let v = viewer().with_panorama_type(PanoramaType::Cylindrical);
        assert!(!v.rotate_gesture_enabled());
    }
}
