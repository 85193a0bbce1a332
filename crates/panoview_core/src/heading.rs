//! Quadrant-debounced heading normalization
//!
//! Euler yaw read back from an orientation is only piecewise continuous: the
//! middle angle of the decomposition folds at +/-90 degrees, so a camera
//! swinging past the top or bottom of the sphere sees the raw angle flip sign
//! or reverse direction. [`HeadingConverter`] tracks which side of the fold
//! the camera last resolved to and picks the output branch that keeps the
//! reported 0-360 degree heading moving with the actual motion.

/// Which side of the Euler singularity the angle last resolved to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Converts raw signed Euler angles into debounced 0-360 degree headings
///
/// Stateful: one converter per angle stream. Reset alongside the camera.
pub struct HeadingConverter {
    quadrant: Quadrant,
    last_angle: f32,
}

impl Default for HeadingConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadingConverter {
    pub fn new() -> Self {
        Self {
            quadrant: Quadrant::TopLeft,
            last_angle: 0.0,
        }
    }

    /// Create a converter with explicit state (e.g. restoring a session)
    pub fn with_state(quadrant: Quadrant, last_angle: f32) -> Self {
        Self { quadrant, last_angle }
    }

    /// Restore the initial state
    pub fn reset(&mut self) {
        self.quadrant = Quadrant::TopLeft;
        self.last_angle = 0.0;
    }

    /// Convert a raw Euler angle in radians into a 0-360 degree heading
    ///
    /// The angle is rounded to the nearest whole degree first; repeat calls
    /// with the same rounded value take the cheaper non-debounced path.
    pub fn convert(&mut self, angle: f32) -> f32 {
        // The raw angle falls into two chunks (0..=89 and 89..=180 after
        // shifting negatives up) plus the two magic fold values at +/-90.
        let angle_rounded = angle.to_degrees().round();
        let mut degrees = angle_rounded;
        if degrees < 0.0 {
            degrees += 180.0;
        }

        let mut output = 0.0;

        if angle_rounded != self.last_angle {
            if angle_rounded == 90.0 {
                // Swinging past the right-side fold flips top and bottom.
                match self.quadrant {
                    Quadrant::TopRight => self.quadrant = Quadrant::BottomRight,
                    Quadrant::BottomRight => self.quadrant = Quadrant::TopRight,
                    _ => {}
                }
                output = 270.0;
            } else if angle_rounded == -90.0 {
                // Swinging past the left-side fold flips top and bottom.
                match self.quadrant {
                    Quadrant::TopLeft => self.quadrant = Quadrant::BottomLeft,
                    Quadrant::BottomLeft => self.quadrant = Quadrant::TopLeft,
                    _ => {}
                }
                output = 90.0;
            } else if (0.0..=89.0).contains(&degrees) {
                // Left side of the sphere, possibly arriving from the right.
                match self.quadrant {
                    Quadrant::TopLeft => output = degrees,
                    // Quadrant handoff calls emit the 0.0 default. That is a
                    // known gap inherited from the reference behavior; every
                    // recorded heading sweep depends on it, so it stays.
                    Quadrant::TopRight => self.quadrant = Quadrant::TopLeft,
                    Quadrant::BottomLeft => output = 180.0 - degrees,
                    Quadrant::BottomRight => self.quadrant = Quadrant::BottomLeft,
                }
            } else if (89.0..=180.0).contains(&degrees) {
                // Right side of the sphere, possibly arriving from the left.
                match self.quadrant {
                    Quadrant::TopLeft => self.quadrant = Quadrant::TopRight,
                    Quadrant::TopRight => output = 175.0 + degrees,
                    Quadrant::BottomLeft => self.quadrant = Quadrant::BottomRight,
                    Quadrant::BottomRight => output = 360.0 - degrees,
                }
            }
        } else {
            // Value unchanged since the last call; no quadrant transitions.
            if angle_rounded == 90.0 {
                output = 270.0;
            } else if angle_rounded == -90.0 {
                output = 90.0;
            } else if (0.0..=89.0).contains(&degrees) {
                output = if self.quadrant == Quadrant::BottomLeft {
                    180.0 - degrees
                } else {
                    degrees
                };
            } else if (89.0..=180.0).contains(&degrees) {
                output = if self.quadrant == Quadrant::BottomRight {
                    360.0 - degrees
                } else {
                    175.0 + degrees
                };
            }
        }

        self.last_angle = angle_rounded;
        output
    }
}
