//! Core data types for the measurement-correction pipeline.
//!
//! Geometry:
//! - [`Point2D`] / [`Point3D`]: points in meters
//! - [`Quaternion`] / [`Pose`]: rigid transform for particle hypotheses
//! - [`LineSegment`]: oriented lane-marking segment
//!
//! Filter interface:
//! - [`Particle`]: (pose, weight) pair owned by the external filter
//! - [`Timestamped<T>`]: generic timestamp wrapper

mod particle;
mod point;
mod pose;
mod segment;
mod timestamped;

pub use particle::{mean_pose, Particle};
pub use point::{Point2D, Point3D};
pub use pose::{Pose, Quaternion};
pub use segment::{transform_cloud, LineSegment};
pub use timestamped::Timestamped;
