//! Viewer registry and viewer-wide policy
//!
//! Embedding frameworks rebuild their view trees freely, so something stable
//! has to know which viewer is current and carry the policy flags that
//! survive a rebuild. `PanoramaManager` owns viewers in a slotmap keyed by a
//! generational [`ViewerKey`]; registration and deregistration are explicit,
//! and the most recently registered viewer is the active one.

use slotmap::{new_key_type, SlotMap};

use panoview_math::Vec2;
use panoview_input::ControlMethod;

use crate::events::Compass;
use crate::types::PanoramaType;
use crate::viewer::PanoramaViewer;

new_key_type! {
    /// Generational key to a registered viewer
    pub struct ViewerKey;
}

pub struct PanoramaManager {
    viewers: SlotMap<ViewerKey, PanoramaViewer>,
    active: Option<ViewerKey>,
    /// Whether configuration changes snap the camera back to the start angle
    pub should_reset_camera_angle: bool,
    /// Whether the next layout pass should swap the displayed image
    ///
    /// Kept here so a view-tree rebuild that did not change the viewed
    /// location can skip reloading and keep the current rotation.
    pub should_update_image: bool,
}

impl Default for PanoramaManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PanoramaManager {
    pub fn new() -> Self {
        Self {
            viewers: SlotMap::with_key(),
            active: None,
            should_reset_camera_angle: true,
            should_update_image: false,
        }
    }

    /// Register a viewer and make it the active one
    pub fn register(&mut self, viewer: PanoramaViewer) -> ViewerKey {
        let key = self.viewers.insert(viewer);
        self.active = Some(key);
        key
    }

    /// Remove a viewer, returning it if it was registered
    pub fn deregister(&mut self, key: ViewerKey) -> Option<PanoramaViewer> {
        if self.active == Some(key) {
            self.active = None;
        }
        self.viewers.remove(key)
    }

    pub fn active_key(&self) -> Option<ViewerKey> {
        self.active
    }

    /// Make a registered viewer the active one; false if the key is stale
    pub fn set_active(&mut self, key: ViewerKey) -> bool {
        if self.viewers.contains_key(key) {
            self.active = Some(key);
            true
        } else {
            false
        }
    }

    pub fn viewer(&self, key: ViewerKey) -> Option<&PanoramaViewer> {
        self.viewers.get(key)
    }

    pub fn viewer_mut(&mut self, key: ViewerKey) -> Option<&mut PanoramaViewer> {
        self.viewers.get_mut(key)
    }

    pub fn active_viewer(&self) -> Option<&PanoramaViewer> {
        self.active.and_then(|key| self.viewers.get(key))
    }

    pub fn active_viewer_mut(&mut self) -> Option<&mut PanoramaViewer> {
        self.active.and_then(|key| self.viewers.get_mut(key))
    }

    /// Attach a compass sink to the active viewer; false if none is active
    pub fn connect_compass(&mut self, compass: Box<dyn Compass>) -> bool {
        match self.active_viewer_mut() {
            Some(viewer) => {
                viewer.set_compass(compass);
                true
            }
            None => false,
        }
    }

    /// Programmatic pan from an alternate input device (e.g. a gamepad
    /// thumbstick), routed to the active viewer as a one-shot translation.
    pub fn move_camera(&mut self, x_axis: f32, y_axis: f32) {
        if let Some(viewer) = self.active_viewer_mut() {
            viewer.apply_pan(Vec2::new(x_axis * -10.0, y_axis * 10.0));
        }
    }

    /// Rotation key last delivered by the active viewer
    pub fn last_rotation_key(&self) -> i64 {
        self.active_viewer()
            .map(|viewer| viewer.last_rotation_key())
            .unwrap_or(0)
    }

    /// Change a viewer's panorama type, then reset per policy
    pub fn set_panorama_type(&mut self, key: ViewerKey, panorama_type: PanoramaType) {
        let reset_angle = self.should_reset_camera_angle;
        if let Some(viewer) = self.viewers.get_mut(key) {
            viewer.set_panorama_type(panorama_type);
            viewer.reset_camera(reset_angle);
        }
    }

    /// Change a viewer's control method, then reset per policy
    pub fn set_control_method(&mut self, key: ViewerKey, control_method: ControlMethod) {
        let reset_angle = self.should_reset_camera_angle;
        if let Some(viewer) = self.viewers.get_mut(key) {
            viewer.set_control_method(control_method);
            viewer.reset_camera(reset_angle);
        }
    }

    /// Reset a viewer's camera per policy
    pub fn reset_camera(&mut self, key: ViewerKey) {
        let reset_angle = self.should_reset_camera_angle;
        if let Some(viewer) = self.viewers.get_mut(key) {
            viewer.reset_camera(reset_angle);
        }
    }
}
