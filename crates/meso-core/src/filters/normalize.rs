use ndarray::Array2;

use crate::consts::{BREAKPOINT_HIGH, BREAKPOINT_KNEE, BREAKPOINT_LOW};
use crate::error::{MesoError, Result};

use super::arith::nan_min;
use super::{map_pixels, zip_pixels};

/// Linear range normalization: maps [lower, upper] → [0.0, 1.0].
///
/// With `clip` the result is clamped to [0.0, 1.0]. `lower == upper` is
/// rejected. NaN pixels stay NaN.
pub fn normalize(data: &Array2<f32>, lower: f32, upper: f32, clip: bool) -> Result<Array2<f32>> {
    if !lower.is_finite() || !upper.is_finite() {
        return Err(MesoError::InvalidParameter(format!(
            "normalization bounds must be finite, got [{lower}, {upper}]"
        )));
    }
    if lower == upper {
        return Err(MesoError::InvalidParameter(format!(
            "degenerate normalization range [{lower}, {upper}]"
        )));
    }

    let range = upper - lower;
    let out = if clip {
        map_pixels(data, |v| ((v - lower) / range).clamp(0.0, 1.0))
    } else {
        map_pixels(data, |v| (v - lower) / range)
    };
    Ok(out)
}

/// Clamp every pixel to [0.0, 1.0].
pub fn clip_unit(data: &Array2<f32>) -> Array2<f32> {
    map_pixels(data, |v| v.clamp(0.0, 1.0))
}

/// Two-segment contrast stretch on a 0..255 brightness scale:
/// `min(normalize(v, 0, 10), normalize(v, 10, 255))`.
pub fn breakpoint_stretch(data: &Array2<f32>) -> Result<Array2<f32>> {
    let low = normalize(data, BREAKPOINT_LOW, BREAKPOINT_KNEE, true)?;
    let high = normalize(data, BREAKPOINT_KNEE, BREAKPOINT_HIGH, true)?;
    zip_pixels(&low, &high, nan_min)
}
