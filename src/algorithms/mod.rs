//! Core algorithms: cost-map caching and particle re-weighting.

pub mod cost_map;
pub mod localization;
