//! Oriented line segments representing lane markings.
//!
//! Segments are represented by their endpoints only (no parametric form):
//! transforming a segment is just transforming two points, and the extent
//! is implicit. Direction is implied by `end - start` and is treated as
//! axis-like everywhere (a marking and its reverse are the same marking).

use serde::{Deserialize, Serialize};

use super::point::Point3D;
use super::pose::Pose;
use crate::core::math::direction_degrees;

/// A directed 3D line segment.
///
/// Two populations exist at runtime: the static vector-map markings
/// (world frame, replaced rarely) and per-frame detections (sensor
/// frame, transformed into world frame once per particle).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    /// Start point of the segment.
    pub start: Point3D,
    /// End point of the segment.
    pub end: Point3D,
}

impl LineSegment {
    /// Create a new segment from two points.
    #[inline]
    pub fn new(start: Point3D, end: Point3D) -> Self {
        Self { start, end }
    }

    /// Segment length in meters.
    #[inline]
    pub fn length(&self) -> f32 {
        (self.end - self.start).norm()
    }

    /// Unit direction vector, or `None` for a degenerate segment.
    #[inline]
    pub fn unit_direction(&self) -> Option<Point3D> {
        (self.end - self.start).normalized()
    }

    /// Planar direction folded to [0°, 180°).
    #[inline]
    pub fn direction_degrees(&self) -> f32 {
        direction_degrees((self.end - self.start).xy())
    }

    /// Segment transformed into the frame of `pose`.
    #[inline]
    pub fn transformed(&self, pose: &Pose) -> LineSegment {
        LineSegment {
            start: pose.transform_point(&self.start),
            end: pose.transform_point(&self.end),
        }
    }
}

/// Transform every segment of a cloud by `pose`.
pub fn transform_cloud(cloud: &[LineSegment], pose: &Pose) -> Vec<LineSegment> {
    cloud.iter().map(|s| s.transformed(pose)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_segment_length() {
        let seg = LineSegment::new(Point3D::new(0.0, 0.0, 0.0), Point3D::new(3.0, 4.0, 0.0));
        assert_relative_eq!(seg.length(), 5.0);
    }

    #[test]
    fn test_degenerate_segment_has_no_direction() {
        let p = Point3D::new(1.0, 2.0, 3.0);
        let seg = LineSegment::new(p, p);
        assert!(seg.unit_direction().is_none());
        assert_relative_eq!(seg.length(), 0.0);
    }

    #[test]
    fn test_direction_degrees_is_axis_like() {
        let fwd = LineSegment::new(Point3D::new(0.0, 0.0, 0.0), Point3D::new(1.0, 1.0, 0.0));
        let rev = LineSegment::new(Point3D::new(1.0, 1.0, 0.0), Point3D::new(0.0, 0.0, 0.0));
        assert_relative_eq!(
            fwd.direction_degrees(),
            rev.direction_degrees(),
            epsilon = 1e-3
        );
        assert_relative_eq!(fwd.direction_degrees(), 45.0, epsilon = 1e-3);
    }

    #[test]
    fn test_transform_cloud_rotates_and_translates() {
        let cloud = vec![LineSegment::new(
            Point3D::new(1.0, 0.0, 0.0),
            Point3D::new(2.0, 0.0, 0.0),
        )];
        let pose = Pose::from_xy_yaw(0.0, 1.0, FRAC_PI_2);
        let out = transform_cloud(&cloud, &pose);
        assert_relative_eq!(out[0].start.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(out[0].start.y, 2.0, epsilon = 1e-6);
        assert_relative_eq!(out[0].end.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(out[0].end.y, 3.0, epsilon = 1e-6);
    }
}
