//! Angle wrapping helpers

/// Convert radians to degrees folded into `[0, 360)`
///
/// Matches `fmod(360 + degrees, 360)`: for inputs below -2*pi the result can
/// still come out negative. The rotation key encoder treats that as an
/// encoding failure rather than widening the fold here.
#[inline]
pub fn wrap_degrees(radians: f32) -> f32 {
    (360.0 + radians.to_degrees()) % 360.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const EPSILON: f32 = 0.001;

    #[test]
    fn test_positive_angle() {
        assert!((wrap_degrees(PI) - 180.0).abs() < EPSILON);
    }

    #[test]
    fn test_negative_angle_wraps_up() {
        assert!((wrap_degrees(-PI / 2.0) - 270.0).abs() < EPSILON);
    }

    #[test]
    fn test_zero() {
        assert_eq!(wrap_degrees(0.0), 0.0);
    }

    #[test]
    fn test_deep_negative_stays_negative() {
        // Single-fold wrap only; this is the documented failure input for
        // rotation key encoding.
        assert!(wrap_degrees(-3.0 * PI) < 0.0);
    }
}
