//! Unified segment-walk scoring traversal.
//!
//! One traversal serves both consumers: the corrector sums sample
//! scores into a particle's raw score without materializing anything,
//! and the diagnostics path collects the same samples as a colored
//! point cloud for the mean-pose hypothesis.

use crate::algorithms::cost_map::HierarchicalCostMap;
use crate::core::color::{rainbow, Rgb};
use crate::core::types::{LineSegment, Point2D, Point3D};

use super::config::CorrectorConfig;

/// One scored sample point along a detected segment.
#[derive(Debug, Clone, Copy)]
pub struct ScoredSample {
    /// Sample position, world frame.
    pub point: Point3D,
    /// Per-sample score: `decay * (alignment * cost + score_offset)`.
    pub score: f32,
    /// Diagnostic color on a rainbow scale.
    pub color: Rgb,
}

/// Absolute cosine between a segment direction and a quantized
/// marking direction byte. Unsigned: a marking and its reverse align
/// identically. A segment with no planar extent aligns with nothing.
#[inline]
fn alignment(tangent: Point3D, direction_deg: u8) -> f32 {
    match tangent.xy().normalized() {
        Some(t) => {
            let theta = (direction_deg as f32).to_radians();
            t.dot(&Point2D::new(theta.cos(), theta.sin())).abs()
        }
        None => 0.0,
    }
}

/// Lazily walk sample points along every segment of `cloud`.
///
/// Samples step by `config.sample_step` from start toward end;
/// `self_position` is the scoring particle's planar position for the
/// distance decay. Degenerate segments yield no samples, and a
/// non-finite sample point is skipped so it scores zero by omission.
pub fn scored_samples<'a>(
    cost_map: &'a mut HierarchicalCostMap,
    cloud: &'a [LineSegment],
    self_position: Point2D,
    config: &'a CorrectorConfig,
) -> impl Iterator<Item = ScoredSample> + 'a {
    let mut segment_index = 0usize;
    let mut along = 0.0f32;
    let mut tangent = Point3D::default();
    let mut direction_valid = false;

    std::iter::from_fn(move || loop {
        let segment = cloud.get(segment_index)?;
        let length = segment.length();

        if !direction_valid {
            let usable = segment.start.is_finite() && segment.end.is_finite();
            match segment.unit_direction().filter(|_| usable) {
                Some(t) => {
                    tangent = t;
                    direction_valid = true;
                }
                None => {
                    log::debug!("Skipping degenerate detection segment {}", segment_index);
                    segment_index += 1;
                    along = 0.0;
                    continue;
                }
            }
        }

        if along >= length {
            segment_index += 1;
            along = 0.0;
            direction_valid = false;
            continue;
        }

        let point = segment.start + tangent * along;
        along += config.sample_step;

        if !point.is_finite() {
            continue;
        }

        let squared_norm = point.xy().distance_squared(&self_position);
        let gain = (-config.far_weight_gain * squared_norm).exp();

        let (cost, direction) = cost_map.cost_and_direction(point.xy());
        let score = gain * (alignment(tangent, direction) * cost as f32 + config.score_offset);

        return Some(ScoredSample {
            point,
            score,
            color: score_color(score),
        });
    })
}

/// Sum of sample scores over the whole cloud: the particle's raw score.
pub fn raw_score(
    cost_map: &mut HierarchicalCostMap,
    cloud: &[LineSegment],
    self_position: Point2D,
    config: &CorrectorConfig,
) -> f32 {
    scored_samples(cost_map, cloud, self_position, config)
        .map(|s| s.score)
        .sum()
}

/// Rainbow color for a per-sample score.
///
/// Per-sample scores live in roughly [-255, 255]; map that span onto
/// the scale so zero sits at the middle.
#[inline]
fn score_color(score: f32) -> Rgb {
    rainbow(score / 510.0 + 0.5)
}
