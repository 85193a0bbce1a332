//! Angular target windows and hit testing
//!
//! A target is a point of interest on the panorama described by a pitch/yaw
//! center. The window around it is built from leading/trailing bounds a fixed
//! margin either side of the center, wrapping through the 0/360 boundary when
//! needed.

/// Sentinel marking "no target configured"
pub const EMPTY_POINT: f32 = 1000.0;

/// The kind of target being built, which sets the window margin
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetType {
    /// Room-to-room navigation hotspot (wide window)
    Navigation,
    /// Object interaction hotspot (narrow window)
    Interaction,
}

impl TargetType {
    /// Margin in degrees either side of the target center
    pub fn margin(self) -> f32 {
        match self {
            TargetType::Navigation => 10.0,
            TargetType::Interaction => 5.0,
        }
    }
}

/// Leading bound of a target window: center plus margin, wrapped below 360
///
/// The sentinel passes through unchanged.
pub fn leading_target(point: f32, target_type: TargetType) -> f32 {
    if point == EMPTY_POINT {
        return EMPTY_POINT;
    }

    let mut target = point + target_type.margin();
    if target > 360.0 {
        target -= 360.0;
    }
    target
}

/// Trailing bound of a target window: center minus margin, wrapped above 0
///
/// The sentinel passes through unchanged.
pub fn trailing_target(point: f32, target_type: TargetType) -> f32 {
    if point == EMPTY_POINT {
        return EMPTY_POINT;
    }

    let mut target = point - target_type.margin();
    if target < 0.0 {
        target += 360.0;
    }
    target
}

/// Whether a point lies inside the window bounded by leading and trailing
///
/// When trailing exceeds leading the window wraps through 0/360 and the test
/// becomes a union of the two end segments.
pub fn in_range(point: f32, leading: f32, trailing: f32) -> bool {
    if trailing > leading {
        (trailing..=360.0).contains(&point) || (0.0..=leading).contains(&point)
    } else {
        (trailing..=leading).contains(&point)
    }
}

/// Test a pitch/yaw reading against a full target window
///
/// A sentinel leading pitch means no target is configured; always a miss.
pub fn target_hit(
    pitch: f32,
    yaw: f32,
    pitch_leading: f32,
    pitch_trailing: f32,
    yaw_leading: f32,
    yaw_trailing: f32,
) -> bool {
    if pitch_leading == EMPTY_POINT {
        return false;
    }

    in_range(pitch, pitch_leading, pitch_trailing) && in_range(yaw, yaw_leading, yaw_trailing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_trailing_are_inverse() {
        for point in [5.0f32, 90.0, 180.0, 270.0, 355.0] {
            let trailing = trailing_target(point, TargetType::Navigation);
            let roundtrip = leading_target(trailing, TargetType::Navigation);
            assert_eq!(roundtrip, point, "point {}", point);
        }
    }

    #[test]
    fn test_inverse_at_zero_lands_on_360() {
        // 0 and 360 name the same heading; the round trip resolves to the
        // 360 spelling because the wrap check is strict.
        let trailing = trailing_target(0.0, TargetType::Navigation);
        assert_eq!(trailing, 350.0);
        assert_eq!(leading_target(trailing, TargetType::Navigation), 360.0);
    }

    #[test]
    fn test_leading_wraps_past_360() {
        assert_eq!(leading_target(355.0, TargetType::Navigation), 5.0);
        assert_eq!(leading_target(358.0, TargetType::Interaction), 3.0);
    }

    #[test]
    fn test_trailing_wraps_below_zero() {
        assert_eq!(trailing_target(5.0, TargetType::Navigation), 355.0);
        assert_eq!(trailing_target(2.0, TargetType::Interaction), 357.0);
    }

    #[test]
    fn test_sentinel_passes_through() {
        assert_eq!(leading_target(EMPTY_POINT, TargetType::Navigation), EMPTY_POINT);
        assert_eq!(trailing_target(EMPTY_POINT, TargetType::Interaction), EMPTY_POINT);
    }

    #[test]
    fn test_in_range_plain_window() {
        assert!(in_range(45.0, 50.0, 40.0));
        assert!(!in_range(39.0, 50.0, 40.0));
        assert!(!in_range(51.0, 50.0, 40.0));
    }

    #[test]
    fn test_in_range_window_wrapping_zero() {
        // leading=10, trailing=350: the window crosses 0 degrees.
        for hit in [355.0f32, 0.0, 5.0] {
            assert!(in_range(hit, 10.0, 350.0), "expected hit at {}", hit);
        }
        for miss in [20.0f32, 180.0] {
            assert!(!in_range(miss, 10.0, 350.0), "expected miss at {}", miss);
        }
    }

    #[test]
    fn test_target_hit_requires_both_axes() {
        // Window centered at pitch 0, yaw 90.
        let pl = leading_target(0.0, TargetType::Navigation);
        let pt = trailing_target(0.0, TargetType::Navigation);
        let yl = leading_target(90.0, TargetType::Navigation);
        let yt = trailing_target(90.0, TargetType::Navigation);

        assert!(target_hit(5.0, 85.0, pl, pt, yl, yt));
        assert!(!target_hit(5.0, 120.0, pl, pt, yl, yt));
        assert!(!target_hit(45.0, 85.0, pl, pt, yl, yt));
    }

    #[test]
    fn test_target_hit_sentinel_is_always_a_miss() {
        assert!(!target_hit(0.0, 0.0, EMPTY_POINT, 350.0, 10.0, 350.0));
        assert!(!target_hit(5.0, 85.0, EMPTY_POINT, EMPTY_POINT, EMPTY_POINT, EMPTY_POINT));
    }
}
