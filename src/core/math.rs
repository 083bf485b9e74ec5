//! Marking-direction angle arithmetic.

use crate::core::types::Point2D;

/// Planar direction of a vector, folded to [0°, 180°).
///
/// Lane markings are axis-like: a segment and its reverse share one
/// direction, so the angle is folded onto a half-circle.
///
/// # Example
/// ```
/// use rekha_localizer::core::math::direction_degrees;
/// use rekha_localizer::core::types::Point2D;
///
/// assert!((direction_degrees(Point2D::new(1.0, 0.0)) - 0.0).abs() < 1e-4);
/// assert!((direction_degrees(Point2D::new(-1.0, 0.0)) - 0.0).abs() < 1e-4);
/// assert!((direction_degrees(Point2D::new(0.0, -1.0)) - 90.0).abs() < 1e-4);
/// ```
#[inline]
pub fn direction_degrees(v: Point2D) -> f32 {
    v.y.atan2(v.x).to_degrees().rem_euclid(180.0)
}
