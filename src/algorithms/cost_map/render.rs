//! Diagnostic rendering for the cost map.
//!
//! Composes cost and direction into colors for match-debug imagery.
//! None of this runs in the correction path.

use crate::core::color::{hsv_to_rgb, Rgb};
use crate::core::types::{Point2D, Pose};

use super::HierarchicalCostMap;

/// Fixed pixel edge length of [`HierarchicalCostMap::render_around_pose`] output.
const RENDER_SIZE: usize = 400;

/// A simple owned RGB raster.
#[derive(Debug, Clone)]
pub struct RgbImage {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Row-major pixels, index = y * width + x.
    pub pixels: Vec<Rgb>,
}

impl RgbImage {
    /// Pixel at (x, y).
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }
}

impl HierarchicalCostMap {
    /// Visualization color of the cell nearest `position`.
    ///
    /// Same resolution path as the scalar query (tile generation on
    /// miss, accessed-flag marking): marking direction drives hue over
    /// the full circle, cost drives value. Unrasterized cells render
    /// black.
    pub fn color_at(&mut self, position: Point2D) -> Rgb {
        let (cost, direction) = self.cost_and_direction(position);
        cost_direction_color(cost, direction)
    }

    /// Render the map neighborhood centered on `pose`.
    ///
    /// Covers one tile edge length of world space regardless of where
    /// the pose sits relative to tile seams, so the window may span up
    /// to four tiles.
    pub fn render_around_pose(&mut self, pose: &Pose) -> RgbImage {
        let center = pose.xy();
        let extent = self.config().unit_length;
        let res = extent / RENDER_SIZE as f32;
        let min = center - Point2D::new(extent / 2.0, extent / 2.0);

        let mut pixels = Vec::with_capacity(RENDER_SIZE * RENDER_SIZE);
        for py in 0..RENDER_SIZE {
            let wy = min.y + (py as f32 + 0.5) * res;
            for px in 0..RENDER_SIZE {
                let wx = min.x + (px as f32 + 0.5) * res;
                pixels.push(self.color_at(Point2D::new(wx, wy)));
            }
        }

        RgbImage {
            width: RENDER_SIZE,
            height: RENDER_SIZE,
            pixels,
        }
    }
}

/// Hue from direction (doubled onto the full circle), value from cost.
#[inline]
fn cost_direction_color(cost: u8, direction: u8) -> Rgb {
    hsv_to_rgb(direction as f32 * 2.0, 1.0, cost as f32 / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::cost_map::CostMapConfig;
    use crate::core::types::{LineSegment, Point3D};

    fn map_with_segment() -> HierarchicalCostMap {
        let config = CostMapConfig {
            unit_length: 10.0,
            image_size: 50,
            ..Default::default()
        };
        let mut map = HierarchicalCostMap::new(config).unwrap();
        map.set_source_segments(vec![LineSegment::new(
            Point3D::new(1.0, 5.0, 0.0),
            Point3D::new(9.0, 5.0, 0.0),
        )]);
        map
    }

    #[test]
    fn test_color_black_where_unrasterized() {
        let mut map = map_with_segment();
        assert_eq!(map.color_at(Point2D::new(5.0, 1.0)), Rgb::black());
    }

    #[test]
    fn test_color_bright_on_marking() {
        let mut map = map_with_segment();
        let c = map.color_at(Point2D::new(5.0, 5.0));
        assert!(
            c.r > 80 && c.g == 0 && c.b == 0,
            "direction 0° should render pure-red at the marking's cost, got {:?}",
            c
        );
    }

    #[test]
    fn test_color_query_marks_tile_accessed() {
        let mut map = map_with_segment();
        map.color_at(Point2D::new(5.0, 5.0));
        assert_eq!(map.resident_tile_count(), 1);
        map.erase_obsolete();
        assert_eq!(map.resident_tile_count(), 1, "color query counts as access");
    }

    #[test]
    fn test_render_around_pose_dimensions() {
        let mut map = map_with_segment();
        let image = map.render_around_pose(&Pose::from_xy_yaw(5.0, 5.0, 0.0));
        assert_eq!(image.width, RENDER_SIZE);
        assert_eq!(image.height, RENDER_SIZE);
        assert_eq!(image.pixels.len(), RENDER_SIZE * RENDER_SIZE);
    }

    #[test]
    fn test_render_shows_marking_row() {
        let mut map = map_with_segment();
        let image = map.render_around_pose(&Pose::from_xy_yaw(5.0, 5.0, 0.0));
        // The marking passes through the window center.
        let mid = image.at(RENDER_SIZE / 2, RENDER_SIZE / 2);
        assert_ne!(mid, Rgb::black());
        // The window corner is empty map.
        assert_eq!(image.at(0, 0), Rgb::black());
    }
}
