//! Particle type shared with the external filter owner.

use serde::{Deserialize, Serialize};

use super::point::Point3D;
use super::pose::{Pose, Quaternion};

/// A single particle representing a possible vehicle pose.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    /// Hypothesized vehicle pose.
    pub pose: Pose,
    /// Importance weight (unnormalized).
    pub weight: f64,
}

impl Particle {
    /// Create a new particle with unit weight.
    pub fn new(pose: Pose) -> Self {
        Self { pose, weight: 1.0 }
    }

    /// Create a new particle with specified weight.
    pub fn with_weight(pose: Pose, weight: f64) -> Self {
        Self { pose, weight }
    }
}

/// Weighted mean pose of a particle set.
///
/// Position is the weight-averaged translation; heading is the circular
/// (sin/cos) mean of the per-particle yaws, so a set straddling ±π does
/// not average to a bogus heading. Falls back to the unweighted mean
/// when the total weight is numerically zero.
pub fn mean_pose(particles: &[Particle]) -> Pose {
    if particles.is_empty() {
        return Pose::identity();
    }

    let mut sum = Point3D::default();
    let mut sum_sin = 0.0f32;
    let mut sum_cos = 0.0f32;
    let mut total_weight = 0.0f32;

    for p in particles {
        let w = p.weight as f32;
        sum = sum + p.pose.position * w;
        let yaw = p.pose.yaw();
        sum_sin += w * yaw.sin();
        sum_cos += w * yaw.cos();
        total_weight += w;
    }

    if total_weight > 1e-10 {
        Pose::new(
            sum * (1.0 / total_weight),
            Quaternion::from_yaw(sum_sin.atan2(sum_cos)),
        )
    } else {
        let n = particles.len() as f32;
        let mut sum = Point3D::default();
        let mut sum_sin = 0.0f32;
        let mut sum_cos = 0.0f32;
        for p in particles {
            sum = sum + p.pose.position;
            let yaw = p.pose.yaw();
            sum_sin += yaw.sin();
            sum_cos += yaw.cos();
        }
        Pose::new(sum * (1.0 / n), Quaternion::from_yaw(sum_sin.atan2(sum_cos)))
    }
}
