//! Corrector configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for the segment corrector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectorConfig {
    /// Additive per-sample score bias.
    ///
    /// Negative, so samples landing on empty map pull the raw score
    /// down. Typical: -64.0
    pub score_offset: f32,

    /// Symmetric clamp bound on the raw score.
    ///
    /// Typical: 5000.0
    pub max_raw_score: f32,

    /// Probability floor for the weight conversion.
    ///
    /// Every particle keeps at least this weight; the ceiling is
    /// `min_prob * exp(-ln(min_prob))`, i.e. 1.0. Typical: 0.01
    pub min_prob: f64,

    /// Distance-decay rate: nearer evidence weighs more.
    ///
    /// Per-sample gain is `exp(-far_weight_gain * d²)` with `d` the
    /// planar distance from the particle. Typical: 0.001
    pub far_weight_gain: f32,

    /// Squared planar mean displacement below which a weight update
    /// is suppressed, in m².
    ///
    /// Avoids reinforcing the same bias while nearly stationary.
    /// Typical: 1.0
    pub commit_threshold_sq: f32,

    /// Sample step along detected segments, in meters.
    ///
    /// Typical: 0.1
    pub sample_step: f32,

    /// Detection-to-snapshot timestamp gap that triggers a warning,
    /// in microseconds.
    ///
    /// Diagnostic only; scoring proceeds regardless of the gap.
    /// Typical: 100_000 (0.1 s)
    pub timestamp_warn_tolerance_us: u64,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        Self {
            score_offset: -64.0,
            max_raw_score: 5000.0,
            min_prob: 0.01,
            far_weight_gain: 0.001,
            commit_threshold_sq: 1.0,
            sample_step: 0.1,
            timestamp_warn_tolerance_us: 100_000,
        }
    }
}

impl CorrectorConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.max_raw_score > 0.0) || !self.max_raw_score.is_finite() {
            return Err(Error::config(format!(
                "max_raw_score must be positive and finite, got {}",
                self.max_raw_score
            )));
        }
        if !(self.min_prob > 0.0 && self.min_prob < 1.0) {
            return Err(Error::config(format!(
                "min_prob must be in (0, 1), got {}",
                self.min_prob
            )));
        }
        if !(self.sample_step > 0.0) || !self.sample_step.is_finite() {
            return Err(Error::config(format!(
                "sample_step must be positive and finite, got {}",
                self.sample_step
            )));
        }
        if !(self.far_weight_gain >= 0.0) || !self.far_weight_gain.is_finite() {
            return Err(Error::config(format!(
                "far_weight_gain must be non-negative, got {}",
                self.far_weight_gain
            )));
        }
        if !(self.commit_threshold_sq >= 0.0) {
            return Err(Error::config(format!(
                "commit_threshold_sq must be non-negative, got {}",
                self.commit_threshold_sq
            )));
        }
        if !self.score_offset.is_finite() {
            return Err(Error::config("score_offset must be finite"));
        }
        Ok(())
    }
}
