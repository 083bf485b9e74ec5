//! Lane-marking measurement correction for particle-filter vehicle
//! localization.
//!
//! A vehicle localization stack keeps a set of weighted pose
//! hypotheses (particles) and corrects them with camera-detected lane
//! markings matched against a pre-built vector map. This crate is that
//! correction core, built from two tightly coupled pieces:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  algorithms/                        │  ← Core algorithms
//! │   localization/  SegmentCorrector, scoring, weights │
//! │   cost_map/      HierarchicalCostMap, tile raster   │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │            (types, math, color)                     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Data flow
//!
//! 1. The host feeds the static vector-map markings into the corrector
//!    once via [`SegmentCorrector::set_map_segments`].
//! 2. Each detection frame, [`SegmentCorrector::reweight`] pulls a
//!    synchronized particle snapshot through [`ParticleFilterLink`],
//!    transforms the detected segments into world frame per particle,
//!    and walks sample points through the [`HierarchicalCostMap`].
//! 3. Tiles rasterize lazily on first query and are swept by a
//!    two-phase eviction policy once per cycle, so memory stays
//!    bounded to the region the particles actually look at.
//! 4. Raw alignment scores are clamped and mapped onto
//!    `[min_prob, 1.0]`, then committed back to the filter owner
//!    unless the mean pose barely moved since the last commit.
//!
//! The particle filter itself (prediction, resampling), the upstream
//! segment detector, and the vector-map loader are external
//! collaborators.
//!
//! # Example
//!
//! ```
//! use rekha_localizer::{
//!     CorrectorConfig, CostMapConfig, LineSegment, Point3D, SegmentCorrector,
//! };
//!
//! let mut corrector =
//!     SegmentCorrector::new(CorrectorConfig::default(), CostMapConfig::default()).unwrap();
//! corrector.set_map_segments(vec![LineSegment::new(
//!     Point3D::new(0.0, 0.0, 0.0),
//!     Point3D::new(10.0, 0.0, 0.0),
//! )]);
//! ```

pub mod algorithms;
pub mod core;
pub mod error;

pub use crate::core::color::Rgb;
pub use crate::core::types::{
    mean_pose, transform_cloud, LineSegment, Particle, Point2D, Point3D, Pose, Quaternion,
    Timestamped,
};

pub use crate::algorithms::cost_map::{
    CostMapConfig, CostTile, GammaLut, HierarchicalCostMap, Polygon2D, RgbImage, TileCoord,
};
pub use crate::algorithms::localization::{
    score_to_weight, CorrectionOutcome, CorrectorConfig, ParticleFilterLink, ScoredSample,
    SegmentCorrector,
};

pub use crate::error::{Error, Result};
