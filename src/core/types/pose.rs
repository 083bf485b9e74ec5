//! Rigid-transform pose type used for particle hypotheses.

use serde::{Deserialize, Serialize};

use super::point::{Point2D, Point3D};

/// Unit quaternion representing a 3D rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    /// Create identity quaternion (no rotation).
    #[inline]
    pub fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Create a rotation about the Z axis by `yaw` radians.
    #[inline]
    pub fn from_yaw(yaw: f32) -> Self {
        let half = yaw * 0.5;
        Self {
            w: half.cos(),
            x: 0.0,
            y: 0.0,
            z: half.sin(),
        }
    }

    /// Normalize the quaternion to unit length.
    pub fn normalize(&mut self) {
        let norm = (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        if norm > 1e-10 {
            self.w /= norm;
            self.x /= norm;
            self.y /= norm;
            self.z /= norm;
        }
    }

    /// Yaw (Z axis rotation) in radians.
    #[inline]
    pub fn yaw(&self) -> f32 {
        let siny_cosp = 2.0 * (self.w * self.z + self.x * self.y);
        let cosy_cosp = 1.0 - 2.0 * (self.y * self.y + self.z * self.z);
        siny_cosp.atan2(cosy_cosp)
    }

    /// Rotate a point by this quaternion.
    ///
    /// Uses the expanded sandwich product `q * v * q⁻¹`:
    /// ```text
    /// t  = 2 * (q.xyz × v)
    /// v' = v + q.w * t + (q.xyz × t)
    /// ```
    #[inline]
    pub fn rotate(&self, v: &Point3D) -> Point3D {
        let q = Point3D::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        *v + t * self.w + q.cross(&t)
    }
}

/// A rigid transform: rotation followed by translation.
///
/// One pose per particle hypothesis; copied by value into the scoring
/// loop, so it stays small and immutable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Translation in meters
    pub position: Point3D,
    /// Rotation as a unit quaternion
    pub rotation: Quaternion,
}

impl Pose {
    /// Create a new pose.
    #[inline]
    pub fn new(position: Point3D, rotation: Quaternion) -> Self {
        Self { position, rotation }
    }

    /// Planar pose at (x, y) with heading `yaw` and zero height.
    #[inline]
    pub fn from_xy_yaw(x: f32, y: f32, yaw: f32) -> Self {
        Self {
            position: Point3D::new(x, y, 0.0),
            rotation: Quaternion::from_yaw(yaw),
        }
    }

    /// Identity pose at origin with no rotation.
    #[inline]
    pub fn identity() -> Self {
        Self {
            position: Point3D::default(),
            rotation: Quaternion::identity(),
        }
    }

    /// Transform a point from this pose's local frame into the world frame.
    #[inline]
    pub fn transform_point(&self, point: &Point3D) -> Point3D {
        self.rotation.rotate(point) + self.position
    }

    /// Planar position, dropping height.
    #[inline]
    pub fn xy(&self) -> Point2D {
        self.position.xy()
    }

    /// Heading in radians.
    #[inline]
    pub fn yaw(&self) -> f32 {
        self.rotation.yaw()
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}
