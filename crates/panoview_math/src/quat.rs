//! Unit quaternion for representing camera attitude
//!
//! The panorama camera never stores Euler angles directly; pan and sensor
//! input are composed as quaternion products so the orientation stays well
//! defined near the poles. Euler readbacks are derived on demand.
//!
//! Components are stored vector-first (x, y, z, w) with w as the scalar,
//! matching the layout most scene graphs and motion APIs exchange.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

/// Unit quaternion (x, y, z, w) representing a rotation in 3D space
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create a quaternion from raw components
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a quaternion rotating by `angle` radians about the given axis
    ///
    /// The axis is expected to be unit length; callers pass basis axes.
    pub fn from_angle_axis(angle: f32, x: f32, y: f32, z: f32) -> Self {
        let half = angle * 0.5;
        let s = half.sin();
        Self {
            x: x * s,
            y: y * s,
            z: z * s,
            w: half.cos(),
        }
    }

    /// Squared magnitude
    #[inline]
    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Magnitude
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Normalize to unit magnitude
    ///
    /// Repeated composition accumulates float error; the orientation owner
    /// re-normalizes after every product so the invariant holds.
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            let inv = 1.0 / mag;
            Self {
                x: self.x * inv,
                y: self.y * inv,
                z: self.z * inv,
                w: self.w * inv,
            }
        } else {
            Self::IDENTITY
        }
    }

    /// Rotation matrix (row-major, rotates column vectors)
    ///
    /// Row 2 carries the entries the cylindrical sensor path reads to derive
    /// the user heading.
    pub fn to_rotation_matrix(&self) -> [[f32; 3]; 3] {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        [
            [
                1.0 - 2.0 * (y * y + z * z),
                2.0 * (x * y - w * z),
                2.0 * (x * z + w * y),
            ],
            [
                2.0 * (x * y + w * z),
                1.0 - 2.0 * (x * x + z * z),
                2.0 * (y * z - w * x),
            ],
            [
                2.0 * (x * z - w * y),
                2.0 * (y * z + w * x),
                1.0 - 2.0 * (x * x + y * y),
            ],
        ]
    }

    /// Euler angles (pitch about X, yaw about Y, roll about Z) in radians
    ///
    /// Decomposition order is Rx * Ry * Rz, so yaw is the middle angle and
    /// folds at +/-90 degrees. The heading converter exists to undo exactly
    /// that fold; do not "fix" the range here.
    pub fn euler_angles(&self) -> [f32; 3] {
        let m = self.to_rotation_matrix();
        let yaw = m[0][2].clamp(-1.0, 1.0).asin();
        let pitch = (-m[1][2]).atan2(m[2][2]);
        let roll = (-m[0][1]).atan2(m[0][0]);
        [pitch, yaw, roll]
    }

    /// Euler pitch component (rotation about X) in radians
    #[inline]
    pub fn euler_x(&self) -> f32 {
        self.euler_angles()[0]
    }

    /// Euler yaw component (rotation about Y) in radians
    #[inline]
    pub fn euler_y(&self) -> f32 {
        self.euler_angles()[1]
    }

    /// Euler roll component (rotation about Z) in radians
    #[inline]
    pub fn euler_z(&self) -> f32 {
        self.euler_angles()[2]
    }

    /// Axis-angle form: (unit axis, angle in radians)
    ///
    /// The identity rotation reads back as a zero axis and zero angle, the
    /// same degenerate value scene graphs report for an unrotated node.
    pub fn to_axis_angle(&self) -> ([f32; 3], f32) {
        let w = self.w.clamp(-1.0, 1.0);
        let s_sq = 1.0 - w * w;
        if s_sq < 1.0e-12 {
            return ([0.0, 0.0, 0.0], 0.0);
        }
        let s = s_sq.sqrt();
        ([self.x / s, self.y / s, self.z / s], 2.0 * w.acos())
    }
}

impl std::ops::Mul for Quat {
    type Output = Self;

    /// Hamilton product: `a * b` applies `b` first, then `a`
    fn mul(self, rhs: Self) -> Self {
        let (ax, ay, az, aw) = (self.x, self.y, self.z, self.w);
        let (bx, by, bz, bw) = (rhs.x, rhs.y, rhs.z, rhs.w);
        Self {
            x: aw * bx + ax * bw + ay * bz - az * by,
            y: aw * by - ax * bz + ay * bw + az * bx,
            z: aw * bz + ax * by - ay * bx + az * bw,
            w: aw * bw - ax * bx - ay * by - az * bz,
        }
    }
}
