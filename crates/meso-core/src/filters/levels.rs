use ndarray::Array2;

use crate::consts::{ALBEDO_BRIGHTNESS_SCALE, ALBEDO_PERCENT};
use crate::error::{MesoError, Result};

use super::map_pixels;

/// Apply gamma correction: output = input^(1/gamma).
///
/// gamma > 1.0 brightens midtones, gamma < 1.0 darkens them. The input is
/// not clamped; negative values produce NaN, so clip upstream.
pub fn gamma_correct(data: &Array2<f32>, gamma: f32) -> Result<Array2<f32>> {
    if !(gamma.is_finite() && gamma > 0.0) {
        return Err(MesoError::InvalidParameter(format!(
            "gamma must be a positive finite number, got {gamma}"
        )));
    }
    let inv_gamma = 1.0 / gamma;
    Ok(map_pixels(data, |v| v.powf(inv_gamma)))
}

/// Invert a unit-range plane: 1 - v.
pub fn invert(data: &Array2<f32>) -> Array2<f32> {
    map_pixels(data, |v| 1.0 - v)
}

/// Convert unit albedo to a 0..255 brightness scale: sqrt(v * 100) * 25.5.
pub fn albedo_to_brightness(data: &Array2<f32>) -> Array2<f32> {
    map_pixels(data, |v| (v * ALBEDO_PERCENT).sqrt() * ALBEDO_BRIGHTNESS_SCALE)
}
