//! Panorama geometry type

use serde::{Serialize, Deserialize};

/// The projection surface the panorama image is mapped onto
///
/// Cylindrical panoramas lock vertical (pitch) movement and disable the
/// two-finger rotate gesture entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanoramaType {
    /// The panorama image wraps a cylinder
    Cylindrical,
    /// The panorama image wraps a full sphere
    Spherical,
}

impl Default for PanoramaType {
    fn default() -> Self {
        PanoramaType::Spherical
    }
}
