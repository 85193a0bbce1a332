//! Core orientation engine for the panorama viewer
//!
//! This crate fuses finger-drag translation and device-attitude quaternions
//! into a single camera orientation and derives the stable signals downstream
//! consumers key off of:
//!
//! - [`HeadingConverter`] - quadrant-debounced 0-360 degree heading normalizer
//! - [`CameraRig`] - orientation quaternion plus the drag-distance
//!   accumulators pitch and yaw are derived from
//! - [`rotation_key`] - lossy integer bucket for event deduplication
//! - [`target`] - angular target windows and hit testing
//! - [`PanoramaViewer`] - one viewer instance: rig, field of view, heading
//!   converters and ordered event dispatch
//! - [`PanoramaManager`] - explicit registry of viewers and viewer-wide policy

mod types;
mod heading;
mod rig;
pub mod rotation_key;
pub mod target;
mod events;
mod viewer;
mod manager;

pub use types::PanoramaType;
pub use heading::{HeadingConverter, Quadrant};
pub use rig::CameraRig;
pub use rotation_key::KeyError;
pub use target::{TargetType, EMPTY_POINT};
pub use events::{Compass, EventHandlers, ReportFlags};
pub use viewer::PanoramaViewer;
pub use manager::{PanoramaManager, ViewerKey};

// Re-export commonly used types from panoview_math for convenience
pub use panoview_math::{Quat, Vec2};

// Re-export the input vocabulary so callers rarely need panoview_input directly
pub use panoview_input::{ControlMethod, MotionSample, ScreenOrientation};
