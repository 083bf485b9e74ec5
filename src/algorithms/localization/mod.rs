//! Measurement correction for the external particle filter.
//!
//! [`SegmentCorrector`] consumes timestamped lane-marking detections,
//! scores every pose hypothesis against the cost map, and pushes
//! bounded weights back through [`ParticleFilterLink`].

mod config;
mod corrector;
mod scoring;
mod weight;

pub use config::CorrectorConfig;
pub use corrector::{CorrectionOutcome, ParticleFilterLink, SegmentCorrector};
pub use scoring::ScoredSample;
pub use weight::score_to_weight;
