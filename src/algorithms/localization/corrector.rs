//! Particle re-weighting against the hierarchical cost map.

use crate::algorithms::cost_map::{CostMapConfig, HierarchicalCostMap};
use crate::core::types::{
    mean_pose, transform_cloud, LineSegment, Particle, Point2D, Pose, Timestamped,
};
use crate::error::Result;

use super::config::CorrectorConfig;
use super::scoring::{raw_score, scored_samples, ScoredSample};
use super::weight::score_to_weight;

/// Link to the external particle-filter owner.
///
/// The owner holds the authoritative particle set and performs motion
/// prediction and resampling; the corrector only borrows a
/// timestamp-synchronized snapshot and pushes re-weighted sets back.
pub trait ParticleFilterLink {
    /// Particle set synchronized to a timestamp, or `None` when no
    /// snapshot is available yet. Absence is normal, not an error.
    fn synchronized_particles(&mut self, timestamp_us: u64) -> Option<Timestamped<Vec<Particle>>>;

    /// Push a fully re-weighted particle set back to the owner.
    fn commit_weighted_particles(&mut self, particles: Timestamped<Vec<Particle>>);
}

/// What a [`SegmentCorrector::reweight`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionOutcome {
    /// Weights were computed and committed to the filter owner.
    Applied,
    /// Weights were computed but discarded: the mean pose barely moved
    /// since the last committed update.
    SuppressedNearStationary,
    /// No synchronized particle snapshot existed; nothing happened.
    NoSynchronizedParticles,
}

/// Scores particle pose hypotheses against camera-detected lane
/// markings via the cost map, and converts scores into bounded weights.
#[derive(Debug)]
pub struct SegmentCorrector {
    config: CorrectorConfig,
    cost_map: HierarchicalCostMap,
    /// Planar mean position at the last committed update.
    last_mean_position: Option<Point2D>,
}

impl SegmentCorrector {
    /// Create a corrector with its own cost map.
    ///
    /// Fails fast if either configuration is invalid.
    pub fn new(config: CorrectorConfig, cost_map_config: CostMapConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cost_map: HierarchicalCostMap::new(cost_map_config)?,
            last_mean_position: None,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &CorrectorConfig {
        &self.config
    }

    /// The owned cost map, for source replacement and constraint or
    /// diagnostic access.
    pub fn cost_map_mut(&mut self) -> &mut HierarchicalCostMap {
        &mut self.cost_map
    }

    /// Replace the static vector-map markings feeding tile generation.
    pub fn set_map_segments(&mut self, segments: Vec<LineSegment>) {
        self.cost_map.set_source_segments(segments);
    }

    /// Re-weight the particle set synchronized to a detection.
    ///
    /// Scores every particle independently: the detection cloud is
    /// transformed from sensor frame into world frame by the
    /// particle's pose, walked sample-by-sample through the cost map,
    /// and the summed raw score converted to a bounded weight. Runs to
    /// completion once a snapshot exists; a malformed segment can
    /// lower a particle's score but never abort the pass.
    pub fn reweight<L: ParticleFilterLink>(
        &mut self,
        detection: &Timestamped<Vec<LineSegment>>,
        filter: &mut L,
    ) -> CorrectionOutcome {
        let Some(mut snapshot) = filter.synchronized_particles(detection.timestamp_us) else {
            return CorrectionOutcome::NoSynchronizedParticles;
        };

        let gap = detection.gap_seconds(snapshot.timestamp_us);
        if gap > self.config.timestamp_warn_tolerance_us as f64 * 1e-6 {
            log::warn!(
                "Timestamp gap between detection and particles is LARGE: {:.3} s",
                gap
            );
        }

        for particle in &mut snapshot.data {
            let transformed = transform_cloud(&detection.data, &particle.pose);
            let raw = raw_score(
                &mut self.cost_map,
                &transformed,
                particle.pose.xy(),
                &self.config,
            );
            particle.weight =
                score_to_weight(raw, self.config.max_raw_score, self.config.min_prob);
        }

        // All particles query a common tile neighborhood within one
        // call, so one sweep per call is enough.
        self.cost_map.erase_obsolete();

        let mean = mean_pose(&snapshot.data).xy();
        let moved_enough = match self.last_mean_position {
            Some(last) => mean.distance_squared(&last) > self.config.commit_threshold_sq,
            None => true,
        };

        if moved_enough {
            self.last_mean_position = Some(mean);
            filter.commit_weighted_particles(snapshot);
            CorrectionOutcome::Applied
        } else {
            log::warn!("Skip weighting because almost same position");
            CorrectionOutcome::SuppressedNearStationary
        }
    }

    /// Scored sample cloud for one pose hypothesis.
    ///
    /// Diagnostic companion to [`Self::reweight`]: the same traversal,
    /// materialized. Typically called with the mean pose after a
    /// correction cycle.
    pub fn scored_cloud(&mut self, detection: &[LineSegment], pose: &Pose) -> Vec<ScoredSample> {
        let transformed = transform_cloud(detection, pose);
        scored_samples(&mut self.cost_map, &transformed, pose.xy(), &self.config).collect()
    }

    /// World rectangles of resident tiles, for coverage display.
    pub fn tile_coverage(&self) -> Vec<(Point2D, Point2D)> {
        self.cost_map.resident_tile_bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Point3D;
    use approx::assert_relative_eq;

    /// Minimal in-memory filter owner for tests.
    struct StubFilter {
        snapshot: Option<Timestamped<Vec<Particle>>>,
        committed: Vec<Timestamped<Vec<Particle>>>,
    }

    impl StubFilter {
        fn with_particles(particles: Vec<Particle>, timestamp_us: u64) -> Self {
            Self {
                snapshot: Some(Timestamped::new(particles, timestamp_us)),
                committed: Vec::new(),
            }
        }

        fn empty() -> Self {
            Self {
                snapshot: None,
                committed: Vec::new(),
            }
        }
    }

    impl ParticleFilterLink for StubFilter {
        fn synchronized_particles(
            &mut self,
            _timestamp_us: u64,
        ) -> Option<Timestamped<Vec<Particle>>> {
            self.snapshot.clone()
        }

        fn commit_weighted_particles(&mut self, particles: Timestamped<Vec<Particle>>) {
            self.committed.push(particles);
        }
    }

    fn test_corrector() -> SegmentCorrector {
        let cost_map_config = CostMapConfig {
            unit_length: 20.0,
            image_size: 400,
            ..Default::default()
        };
        SegmentCorrector::new(CorrectorConfig::default(), cost_map_config).unwrap()
    }

    fn straight_segment() -> LineSegment {
        LineSegment::new(Point3D::new(0.0, 0.0, 0.0), Point3D::new(10.0, 0.0, 0.0))
    }

    #[test]
    fn test_no_snapshot_is_a_noop() {
        let mut corrector = test_corrector();
        let mut filter = StubFilter::empty();
        let detection = Timestamped::new(vec![straight_segment()], 1_000_000);

        let outcome = corrector.reweight(&detection, &mut filter);
        assert_eq!(outcome, CorrectionOutcome::NoSynchronizedParticles);
        assert!(filter.committed.is_empty());
    }

    #[test]
    fn test_reweight_preserves_size_and_order() {
        let mut corrector = test_corrector();
        corrector.set_map_segments(vec![straight_segment()]);

        let particles: Vec<Particle> = (0..5)
            .map(|i| Particle::new(Pose::from_xy_yaw(i as f32, 0.0, 0.0)))
            .collect();
        let mut filter = StubFilter::with_particles(particles, 1_000_000);
        let detection = Timestamped::new(vec![straight_segment()], 1_000_000);

        let outcome = corrector.reweight(&detection, &mut filter);
        assert_eq!(outcome, CorrectionOutcome::Applied);

        let committed = &filter.committed[0];
        assert_eq!(committed.data.len(), 5);
        for (i, p) in committed.data.iter().enumerate() {
            assert_relative_eq!(p.pose.position.x, i as f32, epsilon = 1e-6);
            assert!(p.weight > 0.0);
        }
    }

    #[test]
    fn test_empty_detection_gives_uniform_midpoint_weight() {
        let mut corrector = test_corrector();
        let particles = vec![
            Particle::new(Pose::from_xy_yaw(0.0, 0.0, 0.0)),
            Particle::new(Pose::from_xy_yaw(3.0, 1.0, 0.5)),
        ];
        let mut filter = StubFilter::with_particles(particles, 0);
        let detection = Timestamped::new(Vec::new(), 0);

        corrector.reweight(&detection, &mut filter);
        let committed = &filter.committed[0];
        let expected = corrector.config().min_prob.sqrt();
        for p in &committed.data {
            assert_relative_eq!(p.weight, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_suppression_when_mean_barely_moves() {
        let mut corrector = test_corrector();
        let particles = vec![Particle::new(Pose::from_xy_yaw(5.0, 5.0, 0.0))];
        let detection = Timestamped::new(vec![straight_segment()], 0);

        let mut filter = StubFilter::with_particles(particles.clone(), 0);
        assert_eq!(
            corrector.reweight(&detection, &mut filter),
            CorrectionOutcome::Applied
        );

        // Same snapshot again: the mean pose has not moved.
        let mut filter = StubFilter::with_particles(particles, 0);
        assert_eq!(
            corrector.reweight(&detection, &mut filter),
            CorrectionOutcome::SuppressedNearStationary
        );
        assert!(filter.committed.is_empty());
    }

    #[test]
    fn test_commit_resumes_after_large_displacement() {
        let mut corrector = test_corrector();
        let detection = Timestamped::new(vec![straight_segment()], 0);

        let mut filter =
            StubFilter::with_particles(vec![Particle::new(Pose::from_xy_yaw(0.0, 0.0, 0.0))], 0);
        corrector.reweight(&detection, &mut filter);

        // 2 m of displacement clears the 1 m² squared threshold.
        let mut filter =
            StubFilter::with_particles(vec![Particle::new(Pose::from_xy_yaw(2.0, 0.0, 0.0))], 0);
        assert_eq!(
            corrector.reweight(&detection, &mut filter),
            CorrectionOutcome::Applied
        );
    }

    #[test]
    fn test_scored_cloud_matches_sample_count() {
        let mut corrector = test_corrector();
        corrector.set_map_segments(vec![straight_segment()]);
        let cloud = corrector.scored_cloud(&[straight_segment()], &Pose::identity());
        assert_eq!(cloud.len(), 100);
    }

    #[test]
    fn test_tile_coverage_reports_resident_tiles() {
        let mut corrector = test_corrector();
        assert!(corrector.tile_coverage().is_empty());
        corrector.scored_cloud(&[straight_segment()], &Pose::identity());
        assert!(!corrector.tile_coverage().is_empty());
    }
}
