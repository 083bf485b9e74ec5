//! Tile coordinates and the per-tile cost raster.

use serde::{Deserialize, Serialize};

use crate::core::types::Point2D;

use super::config::CostMapConfig;

/// Discrete coordinate of one cost-map tile.
///
/// Obtained from a world position by floor division with the configured
/// tile edge length, so it is stable for negative coordinates too.
/// Hashable: used as the cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    /// Tile owning the given world position.
    #[inline]
    pub fn from_position(p: Point2D, unit_length: f32) -> Self {
        Self {
            x: (p.x / unit_length).floor() as i32,
            y: (p.y / unit_length).floor() as i32,
        }
    }

    /// World coordinates of the tile's minimum corner.
    #[inline]
    pub fn world_min(&self, unit_length: f32) -> Point2D {
        Point2D::new(self.x as f32 * unit_length, self.y as f32 * unit_length)
    }

    /// Axis-aligned world rectangle covered by this tile.
    #[inline]
    pub fn world_bounds(&self, unit_length: f32) -> (Point2D, Point2D) {
        let min = self.world_min(unit_length);
        (min, min + Point2D::new(unit_length, unit_length))
    }
}

/// Fixed-resolution raster of one tile.
///
/// Each cell stores a cost byte (0–255, higher = better alignment with
/// a lane marking) and the marking direction quantized to whole degrees
/// in [0, 180). Immutable after generation; a source-cloud replacement
/// evicts and regenerates rather than patching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostTile {
    size: usize,
    cost: Vec<u8>,
    direction: Vec<u8>,
}

impl CostTile {
    /// Create an empty tile (cost 0 everywhere).
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cost: vec![0; size * size],
            direction: vec![0; size * size],
        }
    }

    /// Raster edge length in pixels.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major cell index.
    #[inline]
    fn index(&self, px: usize, py: usize) -> usize {
        py * self.size + px
    }

    /// (cost, direction) at a pixel.
    #[inline]
    pub fn at(&self, px: usize, py: usize) -> (u8, u8) {
        let i = self.index(px, py);
        (self.cost[i], self.direction[i])
    }

    /// Raise a pixel to `cost` if it beats the resident value.
    ///
    /// Pointwise maximum keeps the raster deterministic regardless of
    /// segment processing order; on an exact tie the earlier segment's
    /// direction stays.
    #[inline]
    pub(crate) fn raise(&mut self, px: usize, py: usize, cost: u8, direction: u8) {
        let i = self.index(px, py);
        if cost > self.cost[i] {
            self.cost[i] = cost;
            self.direction[i] = direction;
        }
    }

    /// Clear a pixel to cost 0 (restriction-polygon masking).
    #[inline]
    pub(crate) fn clear(&mut self, px: usize, py: usize) {
        let i = self.index(px, py);
        self.cost[i] = 0;
        self.direction[i] = 0;
    }

    /// Pixel indices of the cell nearest a world position.
    ///
    /// Positions outside the tile clamp to the border cell, so queries
    /// at the tile seam stay well defined.
    #[inline]
    pub fn pixel_of(
        &self,
        position: Point2D,
        coord: TileCoord,
        config: &CostMapConfig,
    ) -> (usize, usize) {
        let min = coord.world_min(config.unit_length);
        let res = config.resolution();
        let px = ((position.x - min.x) / res).floor();
        let py = ((position.y - min.y) / res).floor();
        let clamp = |v: f32| (v.max(0.0) as usize).min(self.size - 1);
        (clamp(px), clamp(py))
    }

    /// (cost, direction) of the cell nearest a world position.
    #[inline]
    pub fn sample(&self, position: Point2D, coord: TileCoord, config: &CostMapConfig) -> (u8, u8) {
        let (px, py) = self.pixel_of(position, coord, config);
        self.at(px, py)
    }
}
