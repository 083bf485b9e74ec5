//! Tile rasterization: vector-map segments to cost/direction rasters.

use crate::core::types::{LineSegment, Point2D};

use super::config::CostMapConfig;
use super::tile::{CostTile, TileCoord};

/// 256-entry lookup table applying a power-law remap to cost bytes.
///
/// With an exponent above 1 the low-cost range is crushed and the
/// high-cost range stretched, so small alignment differences near the
/// "good" end stay distinguishable after quantization.
#[derive(Debug, Clone)]
pub struct GammaLut {
    table: [u8; 256],
}

impl GammaLut {
    /// Build the table for the given exponent.
    pub fn new(gamma: f32) -> Self {
        let mut table = [0u8; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            let normalized = i as f32 / 255.0;
            *entry = (normalized.powf(gamma) * 255.0).round() as u8;
        }
        Self { table }
    }

    /// Remap one cost byte.
    #[inline]
    pub fn apply(&self, value: u8) -> u8 {
        self.table[value as usize]
    }
}

/// A simple 2D polygon used to mask non-drivable regions.
#[derive(Debug, Clone)]
pub struct Polygon2D {
    /// Vertices in perimeter order; the closing edge is implicit.
    pub vertices: Vec<Point2D>,
}

impl Polygon2D {
    /// Create a polygon from its vertices.
    pub fn new(vertices: Vec<Point2D>) -> Self {
        Self { vertices }
    }

    /// Even-odd containment test.
    pub fn contains(&self, p: Point2D) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[j];
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

/// Distance from a point to a segment, both projected to the plane.
#[inline]
fn planar_distance_to_segment(p: Point2D, start: Point2D, end: Point2D) -> f32 {
    let d = end - start;
    let len_sq = d.dot(&d);
    if len_sq < 1e-12 {
        return p.distance(&start);
    }
    let t = ((p - start).dot(&d) / len_sq).clamp(0.0, 1.0);
    p.distance(&(start + d * t))
}

/// Rasterize the source segments restricted to one tile.
///
/// Segments are culled by bounding box (inflated by the falloff radius)
/// and, when `elevation` is set, by endpoint height against the
/// configured vertical tolerance. Each surviving segment paints every
/// pixel within the falloff radius with a linear distance falloff
/// pushed through the gamma table; overlaps combine by pointwise
/// maximum so the raster is deterministic for any segment order.
/// When restriction polygons are present, pixels outside their union
/// are cleared afterwards.
pub fn rasterize_tile(
    coord: TileCoord,
    segments: &[LineSegment],
    elevation: Option<f32>,
    polygons: &[Polygon2D],
    config: &CostMapConfig,
    lut: &GammaLut,
) -> CostTile {
    let mut tile = CostTile::empty(config.image_size);
    let (tile_min, tile_max) = coord.world_bounds(config.unit_length);
    let res = config.resolution();
    let radius = config.falloff_radius;
    let size = config.image_size;

    for segment in segments {
        if let Some(height) = elevation {
            let near = (segment.start.z - height).abs() <= config.elevation_tolerance
                && (segment.end.z - height).abs() <= config.elevation_tolerance;
            if !near {
                continue;
            }
        }

        let s = segment.start.xy();
        let e = segment.end.xy();

        // Inflated segment bbox vs tile bbox.
        let seg_min_x = s.x.min(e.x) - radius;
        let seg_max_x = s.x.max(e.x) + radius;
        let seg_min_y = s.y.min(e.y) - radius;
        let seg_max_y = s.y.max(e.y) + radius;
        if seg_max_x < tile_min.x
            || seg_min_x > tile_max.x
            || seg_max_y < tile_min.y
            || seg_min_y > tile_max.y
        {
            continue;
        }

        let direction = segment.direction_degrees().rem_euclid(180.0) as u8;

        // Pixel window covering the inflated segment bbox, clamped to
        // the tile.
        let px_min = (((seg_min_x - tile_min.x) / res).floor().max(0.0)) as usize;
        let py_min = (((seg_min_y - tile_min.y) / res).floor().max(0.0)) as usize;
        let px_max = ((((seg_max_x - tile_min.x) / res).ceil()) as usize).min(size - 1);
        let py_max = ((((seg_max_y - tile_min.y) / res).ceil()) as usize).min(size - 1);

        for py in py_min..=py_max {
            let wy = tile_min.y + (py as f32 + 0.5) * res;
            for px in px_min..=px_max {
                let wx = tile_min.x + (px as f32 + 0.5) * res;
                let d = planar_distance_to_segment(Point2D::new(wx, wy), s, e);
                if d >= radius {
                    continue;
                }
                let falloff = 1.0 - d / radius;
                let cost = lut.apply((falloff * 255.0).round() as u8);
                tile.raise(px, py, cost, direction);
            }
        }
    }

    if !polygons.is_empty() {
        for py in 0..size {
            let wy = tile_min.y + (py as f32 + 0.5) * res;
            for px in 0..size {
                let wx = tile_min.x + (px as f32 + 0.5) * res;
                let p = Point2D::new(wx, wy);
                if !polygons.iter().any(|poly| poly.contains(p)) {
                    tile.clear(px, py);
                }
            }
        }
    }

    tile
}
