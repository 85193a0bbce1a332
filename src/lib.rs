//! Panoview - panorama camera orientation engine
//!
//! Library surface for the application crate: configuration loading lives
//! here so integration tests can exercise it; the engine itself is in the
//! `panoview_core`, `panoview_input`, and `panoview_math` crates.

pub mod config;
