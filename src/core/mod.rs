//! Foundation layer: geometry types, angle math, and color scales.

pub mod color;
pub mod math;
pub mod types;
