//! Hierarchical cost map: a lazily generated, evicting tile cache.
//!
//! Vector-map lane markings are rasterized into square tiles on first
//! query and kept in a hash map keyed by [`TileCoord`]. An
//! accessed-flag sweep ([`HierarchicalCostMap::erase_obsolete`], run
//! once per correction cycle) drops every tile that no query touched
//! since the previous sweep, then enforces the capacity bound
//! oldest-first. This keeps memory proportional to the area the
//! particles are actually looking at without per-query LRU
//! bookkeeping.

mod config;
mod generator;
mod render;
mod tile;

pub use config::CostMapConfig;
pub use generator::{GammaLut, Polygon2D};
pub use render::RgbImage;
pub use tile::{CostTile, TileCoord};

use std::collections::{HashMap, VecDeque};

use crate::core::types::{LineSegment, Point2D};
use crate::error::Result;

/// Lazily generated, evicting cache of cost tiles.
///
/// Mutation discipline: queries take `&mut self` because a miss
/// generates the tile and every hit marks its accessed flag;
/// `erase_obsolete` also takes `&mut self`, so the borrow checker
/// enforces that no query overlaps an eviction sweep.
#[derive(Debug)]
pub struct HierarchicalCostMap {
    config: CostMapConfig,
    gamma_lut: GammaLut,

    /// Static map source, world frame.
    source: Vec<LineSegment>,
    /// Optional height constraint for vertically stacked roadways.
    elevation: Option<f32>,
    /// Drivable-region mask; empty means the whole plane is eligible.
    polygons: Vec<Polygon2D>,

    /// Resident tiles. Keyset always matches `accessed`.
    tiles: HashMap<TileCoord, CostTile>,
    /// True for tiles touched since the last eviction sweep.
    accessed: HashMap<TileCoord, bool>,
    /// Insertion order, oldest first, for the capacity pass.
    history: VecDeque<TileCoord>,
}

impl HierarchicalCostMap {
    /// Create an empty cost map.
    ///
    /// Fails if the tile geometry configuration is invalid; no
    /// coordinate math can run before a valid configuration exists.
    pub fn new(config: CostMapConfig) -> Result<Self> {
        config.validate()?;
        let gamma_lut = GammaLut::new(config.gamma);
        Ok(Self {
            config,
            gamma_lut,
            source: Vec::new(),
            elevation: None,
            polygons: Vec::new(),
            tiles: HashMap::new(),
            accessed: HashMap::new(),
            history: VecDeque::new(),
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &CostMapConfig {
        &self.config
    }

    /// Number of resident tiles.
    pub fn resident_tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Replace the static map source.
    ///
    /// All resident tiles derive from the previous source, so they are
    /// evicted outright rather than patched.
    pub fn set_source_segments(&mut self, segments: Vec<LineSegment>) {
        log::info!(
            "Cost map source replaced: {} segments, flushing {} resident tiles",
            segments.len(),
            self.tiles.len()
        );
        self.source = segments;
        self.flush();
    }

    /// Set or clear the elevation constraint.
    ///
    /// Applies to tiles generated from now on; resident tiles keep
    /// their old content until they fall out of the cache.
    pub fn set_elevation(&mut self, height: Option<f32>) {
        self.elevation = height;
    }

    /// Replace the restriction polygons.
    ///
    /// Same lazy-consistency rule as [`Self::set_elevation`].
    pub fn set_restriction_polygons(&mut self, polygons: Vec<Polygon2D>) {
        self.polygons = polygons;
    }

    /// (cost, direction) of the cell nearest `position`.
    ///
    /// Hot path: called once per sample point along every detected
    /// segment for every particle. Generates the owning tile on first
    /// access and marks it accessed.
    pub fn cost_and_direction(&mut self, position: Point2D) -> (u8, u8) {
        let coord = TileCoord::from_position(position, self.config.unit_length);
        self.ensure_tile(coord);
        self.accessed.insert(coord, true);
        self.tiles[&coord].sample(position, coord, &self.config)
    }

    /// Evict tiles that went unqueried since the previous sweep.
    ///
    /// Phase 1 drops every tile whose accessed flag is still false and
    /// resets the survivors' flags. Phase 2 evicts oldest-first until
    /// the capacity bound holds. Call once per correction cycle, not
    /// per query.
    pub fn erase_obsolete(&mut self) {
        let before = self.tiles.len();

        let stale: Vec<TileCoord> = self
            .accessed
            .iter()
            .filter(|(_, &touched)| !touched)
            .map(|(&coord, _)| coord)
            .collect();
        for coord in &stale {
            self.remove_tile(*coord);
        }
        for flag in self.accessed.values_mut() {
            *flag = false;
        }

        while self.tiles.len() > self.config.max_tiles {
            let Some(oldest) = self.history.front().copied() else {
                break;
            };
            self.remove_tile(oldest);
        }

        if before != self.tiles.len() {
            log::debug!(
                "Cost map sweep: {} -> {} resident tiles ({} stale)",
                before,
                self.tiles.len(),
                stale.len()
            );
        }
    }

    /// World rectangles of every resident tile, for coverage display.
    pub fn resident_tile_bounds(&self) -> Vec<(Point2D, Point2D)> {
        self.tiles
            .keys()
            .map(|coord| coord.world_bounds(self.config.unit_length))
            .collect()
    }

    fn ensure_tile(&mut self, coord: TileCoord) {
        if self.tiles.contains_key(&coord) {
            return;
        }
        let tile = generator::rasterize_tile(
            coord,
            &self.source,
            self.elevation,
            &self.polygons,
            &self.config,
            &self.gamma_lut,
        );
        self.tiles.insert(coord, tile);
        self.accessed.insert(coord, false);
        self.history.push_back(coord);
    }

    fn remove_tile(&mut self, coord: TileCoord) {
        self.tiles.remove(&coord);
        self.accessed.remove(&coord);
        self.history.retain(|c| *c != coord);
    }

    fn flush(&mut self) {
        self.tiles.clear();
        self.accessed.clear();
        self.history.clear();
    }
}
