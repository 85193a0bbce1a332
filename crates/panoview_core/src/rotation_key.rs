//! Lossy rotation bucket keys
//!
//! Downstream logic keys one-shot events (narration, hotspot reveals) off the
//! camera heading. Raw angles are too chatty for that, so the key collapses
//! nearby headings into one integer bucket: two quantized terms are
//! concatenated decimally. Distinct headings may collide; that is the point.

use std::fmt;

use panoview_math::wrap_degrees;

/// Rotation key encoding failure
#[derive(Debug)]
pub enum KeyError {
    /// The concatenated digits did not parse as an integer; only possible
    /// when a wrapped term still came out negative
    Unrepresentable(String),
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyError::Unrepresentable(text) => {
                write!(f, "rotation key not representable: {:?}", text)
            }
        }
    }
}

impl std::error::Error for KeyError {}

/// Derive a coarse equality key from the rotation angle and the yaw
/// axis-orientation product
///
/// Both inputs are in radians; each is folded into `[0, 360)` degrees,
/// quantized (0.50 and 0.70 coefficients), and the two integers are
/// concatenated as decimal digits.
pub fn encode(rotation_angle: f32, axis_product: f32) -> Result<i64, KeyError> {
    let a = wrap_degrees(rotation_angle);
    let b = wrap_degrees(axis_product);
    let text = format!("{}{}", (a * 0.50) as i64, (b * 0.70) as i64);
    text.parse::<i64>().map_err(|_| KeyError::Unrepresentable(text))
}
