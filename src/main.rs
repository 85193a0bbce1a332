//! Panoview - panorama camera orientation engine
//!
//! Headless driver: builds a viewer from configuration, replays a short
//! scripted input session (pan gestures, a pinch, device motion), and logs
//! the orientation reports a host UI would consume.

mod config;

use std::time::Duration;

use panoview_core::{PanoramaManager, PanoramaViewer, Quat, Vec2};
use panoview_input::{
    ControlMethod, GesturePhase, GestureProcessor, MotionSample, MotionSampler, MotionSource,
    ScreenOrientation,
};

use config::AppConfig;

/// Synthetic motion source standing in for a device IMU
///
/// Yields a slow yaw sweep in portrait orientation, then reports exhaustion
/// so the sampler shuts itself down.
struct SweepSource {
    step: u32,
    limit: u32,
}

impl SweepSource {
    fn new(limit: u32) -> Self {
        Self { step: 0, limit }
    }
}

impl MotionSource for SweepSource {
    fn is_available(&self) -> bool {
        true
    }

    fn sample(&mut self) -> Option<MotionSample> {
        if self.step >= self.limit {
            return None;
        }
        self.step += 1;
        let yaw = (self.step as f32) * 2.0f32.to_radians();
        Some(MotionSample {
            attitude: Quat::from_angle_axis(yaw, 0.0, 1.0, 0.0),
            screen_orientation: ScreenOrientation::Portrait,
        })
    }
}

fn build_viewer(config: &AppConfig) -> PanoramaViewer {
    let viewport = Vec2::new(config.window.width as f32, config.window.height as f32);
    let mut viewer = PanoramaViewer::new(viewport)
        .with_control_method(config.viewer.control_method)
        .with_panorama_type(config.viewer.panorama_type)
        .with_pan_speed(Vec2::new(config.viewer.pan_speed[0], config.viewer.pan_speed[1]))
        .with_start_angle(config.viewer.start_angle.to_radians())
        .with_fov_range(config.viewer.min_fov, config.viewer.max_fov)
        .with_angle_offset(config.viewer.angle_offset.to_radians());

    viewer.set_movement_handler(|rotation, fov| {
        log::info!(
            "movement: rotation {:.1} deg, fov {:.1} deg",
            rotation.to_degrees(),
            fov.to_degrees()
        );
    });
    viewer.set_camera_moved_handler(|pitch, yaw, roll| {
        log::info!("camera: pitch {} yaw {} roll {}", pitch, yaw, roll);
    });
    viewer
}

fn main() {
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    env_logger::Builder::new()
        .parse_filters(&config.debug.log_level)
        .init();
    if let Some(e) = load_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting Panoview");

    let mut viewer = build_viewer(&config);
    if config.debug.log_rotation_keys {
        viewer.set_rotation_key_handler(|key| log::info!("rotation key: {}", key));
    }

    let mut manager = PanoramaManager::new();
    let key = manager.register(viewer);

    // Scripted drag: a third of the viewport width, right to left, in four
    // gesture updates.
    let mut gestures = GestureProcessor::new();
    let step = config.window.width as f32 / 12.0;
    if let Some(viewer) = manager.viewer_mut(key) {
        gestures.handle_pan(viewer, GesturePhase::Began, Vec2::ZERO);
        for i in 1..=4 {
            gestures.handle_pan(viewer, GesturePhase::Changed, Vec2::new(step * i as f32, 0.0));
        }
        gestures.handle_pan(viewer, GesturePhase::Ended, Vec2::new(step * 4.0, 0.0));
    }

    // Scripted pinch: zoom in to half the starting field of view.
    if let Some(viewer) = manager.viewer_mut(key) {
        gestures.handle_pinch(viewer, GesturePhase::Began, 1.0);
        gestures.handle_pinch(viewer, GesturePhase::Changed, 2.0);
    }

    // Device motion, if the configured control method consumes it.
    if config.viewer.control_method != ControlMethod::Touch {
        let mut sampler =
            MotionSampler::new(Duration::from_millis(config.motion.interval_ms));
        sampler.start(SweepSource::new(30));
        std::thread::sleep(Duration::from_millis(config.motion.interval_ms * 40));
        let samples = sampler.pending();
        log::info!("Applying {} motion samples", samples.len());
        if let Some(viewer) = manager.viewer_mut(key) {
            for sample in &samples {
                viewer.apply_motion(sample);
            }
        }
        sampler.stop();
    }

    if let Some(viewer) = manager.viewer(key) {
        log::info!(
            "Final pose: pitch {:.2} yaw {:.2} heading {:.2}, rotation key {}",
            viewer.pitch(),
            viewer.yaw(),
            viewer.heading(),
            viewer.last_rotation_key()
        );
    }
}
