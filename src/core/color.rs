//! Color utilities for diagnostic visualization.
//!
//! The cost map composes cost and direction into a hue/value color, and
//! the scored sample cloud maps per-sample scores through a rainbow
//! scale. Nothing here affects correction math.

use serde::{Deserialize, Serialize};

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a new color.
    #[inline]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (all channels zero).
    #[inline]
    pub fn black() -> Self {
        Self { r: 0, g: 0, b: 0 }
    }
}

/// Convert HSV to RGB.
///
/// `h` is hue in degrees [0, 360), `s` and `v` in [0, 1]. Uses the
/// piecewise 60° sector form.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let h = h.clamp(0.0, 360.0);
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);

    let max = v;
    let min = max * (1.0 - s);

    let to_byte = |c: f32| (c * 255.0).round() as u8;
    let ramp = |x: f32| to_byte(x / 60.0 * (max - min) + min);

    if h < 60.0 {
        Rgb::new(to_byte(max), ramp(h), to_byte(min))
    } else if h < 120.0 {
        Rgb::new(ramp(120.0 - h), to_byte(max), to_byte(min))
    } else if h < 180.0 {
        Rgb::new(to_byte(min), to_byte(max), ramp(h - 120.0))
    } else if h < 240.0 {
        Rgb::new(to_byte(min), ramp(240.0 - h), to_byte(max))
    } else if h < 300.0 {
        Rgb::new(ramp(h - 240.0), to_byte(min), to_byte(max))
    } else {
        Rgb::new(to_byte(max), to_byte(min), ramp(360.0 - h))
    }
}

/// Rainbow color scale over [0, 1]: blue → cyan → green → yellow → red.
pub fn rainbow(value: f32) -> Rgb {
    let value = value.clamp(0.0, 1.0);
    let (mut r, mut g, mut b) = (1.0f32, 1.0f32, 1.0f32);
    if value < 0.25 {
        r = 0.0;
        g = 4.0 * value;
    } else if value < 0.5 {
        r = 0.0;
        b = 1.0 + 4.0 * (0.25 - value);
    } else if value < 0.75 {
        r = 4.0 * (value - 0.5);
        b = 0.0;
    } else {
        g = 1.0 + 4.0 * (0.75 - value);
        b = 0.0;
    }
    Rgb::new(
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}
