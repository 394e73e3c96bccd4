//! Continuous color scales for single-channel products.
//!
//! A scale maps a unit value to an RGB triple in [0, 1]. Recipes accept any
//! [`ColorScale`], so callers can inject their own palettes; the built-in
//! ramps cover the `ice` family used for infrared imagery.

use ndarray::Array2;

use crate::color::process::ColorPlanes;
use crate::error::{MesoError, Result};
use crate::filters::map_pixels;

/// Perceptual `ice` palette, dark navy to near white, 12 evenly spaced stops.
const ICE_STOPS: [[u8; 3]; 12] = [
    [3, 5, 18],
    [25, 25, 51],
    [44, 42, 87],
    [58, 60, 125],
    [62, 83, 160],
    [62, 109, 178],
    [72, 134, 187],
    [89, 159, 196],
    [114, 184, 205],
    [149, 207, 216],
    [192, 229, 232],
    [234, 252, 253],
];

/// Maps a normalized value in [0, 1] to an RGB triple in [0, 1].
pub trait ColorScale: Send + Sync {
    fn name(&self) -> &str;

    /// Color at `t`. Values outside [0, 1] are clamped; NaN propagates.
    fn sample(&self, t: f32) -> [f32; 3];
}

/// Piecewise-linear ramp through evenly spaced stops.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorRamp {
    name: String,
    stops: Vec<[f32; 3]>,
}

impl ColorRamp {
    /// Build a ramp from at least two stops with components in [0, 1].
    pub fn new(name: impl Into<String>, stops: Vec<[f32; 3]>) -> Result<Self> {
        if stops.len() < 2 {
            return Err(MesoError::InvalidParameter(
                "a color ramp needs at least two stops".into(),
            ));
        }
        if stops.iter().flatten().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(MesoError::InvalidParameter(
                "color ramp components must lie in [0, 1]".into(),
            ));
        }
        Ok(Self {
            name: name.into(),
            stops,
        })
    }

    /// Build a ramp from `#rrggbb` strings.
    pub fn from_hex(name: impl Into<String>, colors: &[&str]) -> Result<Self> {
        let stops = colors
            .iter()
            .map(|hex| {
                hex_to_rgb(hex)
                    .ok_or_else(|| MesoError::InvalidParameter(format!("bad hex color '{hex}'")))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(name, stops)
    }

    pub fn ice() -> Self {
        Self {
            name: "ice".into(),
            stops: ICE_STOPS.iter().map(|&rgb| unit_rgb(rgb)).collect(),
        }
    }

    pub fn ice_r() -> Self {
        Self::ice().reversed("ice_r")
    }

    pub fn reversed(&self, name: impl Into<String>) -> Self {
        let mut stops = self.stops.clone();
        stops.reverse();
        Self {
            name: name.into(),
            stops,
        }
    }

    pub fn stops(&self) -> &[[f32; 3]] {
        &self.stops
    }
}

impl ColorScale for ColorRamp {
    fn name(&self) -> &str {
        &self.name
    }

    fn sample(&self, t: f32) -> [f32; 3] {
        if t.is_nan() {
            return [f32::NAN; 3];
        }
        let segments = (self.stops.len() - 1) as f32;
        let pos = t.clamp(0.0, 1.0) * segments;
        let low = (pos.floor() as usize).min(self.stops.len() - 2);
        let frac = pos - low as f32;
        let a = self.stops[low];
        let b = self.stops[low + 1];
        [
            a[0] + (b[0] - a[0]) * frac,
            a[1] + (b[1] - a[1]) * frac,
            a[2] + (b[2] - a[2]) * frac,
        ]
    }
}

/// Colorize a unit-range plane.
pub fn apply_scale(data: &Array2<f32>, scale: &dyn ColorScale) -> ColorPlanes {
    ColorPlanes {
        red: map_pixels(data, |t| scale.sample(t)[0]),
        green: map_pixels(data, |t| scale.sample(t)[1]),
        blue: map_pixels(data, |t| scale.sample(t)[2]),
    }
}

/// Parse `#rrggbb` into unit RGB.
pub fn hex_to_rgb(hex: &str) -> Option<[f32; 3]> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some(unit_rgb([r, g, b]))
}

fn unit_rgb(rgb: [u8; 3]) -> [f32; 3] {
    [
        rgb[0] as f32 / 255.0,
        rgb[1] as f32 / 255.0,
        rgb[2] as f32 / 255.0,
    ]
}
