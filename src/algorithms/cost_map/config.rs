//! Cost map configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for the hierarchical cost map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostMapConfig {
    /// Tile edge length in meters.
    ///
    /// Every tile covers a `unit_length × unit_length` world square.
    /// Typical: 20.0
    pub unit_length: f32,

    /// Tile raster resolution in pixels per edge.
    ///
    /// Typical: 800 (2.5 cm cells at unit_length 20.0)
    pub image_size: usize,

    /// Maximum number of resident tiles after an eviction sweep.
    ///
    /// Capacity may be exceeded transiently between sweeps. Typical: 10
    pub max_tiles: usize,

    /// Gamma exponent for the cost remap.
    ///
    /// Values > 1 spread resolution near the high-cost end. Typical: 4.0
    pub gamma: f32,

    /// Distance falloff radius in meters.
    ///
    /// Pixels farther than this from every segment get cost 0.
    /// Typical: 0.5
    pub falloff_radius: f32,

    /// Vertical tolerance in meters for the elevation constraint.
    ///
    /// Only consulted when an elevation is set. Typical: 4.0
    pub elevation_tolerance: f32,
}

impl Default for CostMapConfig {
    fn default() -> Self {
        Self {
            unit_length: 20.0,
            image_size: 800,
            max_tiles: 10,
            gamma: 4.0,
            falloff_radius: 0.5,
            elevation_tolerance: 4.0,
        }
    }
}

impl CostMapConfig {
    /// Validate the configuration.
    ///
    /// Tile geometry must be fixed and sane before any coordinate math
    /// runs; the cache constructor calls this and refuses to build
    /// otherwise.
    pub fn validate(&self) -> Result<()> {
        if !(self.unit_length > 0.0) || !self.unit_length.is_finite() {
            return Err(Error::config(format!(
                "unit_length must be positive and finite, got {}",
                self.unit_length
            )));
        }
        if self.image_size == 0 {
            return Err(Error::config("image_size must be at least 1"));
        }
        if self.max_tiles == 0 {
            return Err(Error::config("max_tiles must be at least 1"));
        }
        if !(self.gamma > 0.0) || !self.gamma.is_finite() {
            return Err(Error::config(format!(
                "gamma must be positive and finite, got {}",
                self.gamma
            )));
        }
        if !(self.falloff_radius > 0.0) || !self.falloff_radius.is_finite() {
            return Err(Error::config(format!(
                "falloff_radius must be positive and finite, got {}",
                self.falloff_radius
            )));
        }
        if !(self.elevation_tolerance > 0.0) {
            return Err(Error::config(format!(
                "elevation_tolerance must be positive, got {}",
                self.elevation_tolerance
            )));
        }
        Ok(())
    }

    /// Meters covered by one raster pixel.
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.unit_length / self.image_size as f32
    }
}
