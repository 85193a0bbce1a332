//! Rotation math for the panorama viewer
//!
//! This crate provides the quaternion and 2D point types used by the
//! orientation engine.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D point for pan translations and viewport extents
//! - [`Quat`] - unit quaternion representing camera attitude
//!
//! ## Helpers
//!
//! - [`wrap_degrees`] - fold an angle in radians into `[0, 360)` degrees

mod vec2;
mod quat;
pub mod angle;

pub use vec2::Vec2;
pub use quat::Quat;
pub use angle::wrap_degrees;
