use ndarray::Array2;

use crate::error::Result;

use super::{ensure_same_shape, map_pixels, zip_pixels};

/// Channel differencing: a - b.
pub fn difference(a: &Array2<f32>, b: &Array2<f32>) -> Result<Array2<f32>> {
    zip_pixels(a, b, |x, y| x - y)
}

/// Elementwise maximum of two planes. NaN in either input yields NaN.
pub fn maximum(a: &Array2<f32>, b: &Array2<f32>) -> Result<Array2<f32>> {
    zip_pixels(a, b, nan_max)
}

pub(crate) fn nan_max(x: f32, y: f32) -> f32 {
    if x.is_nan() || y.is_nan() {
        f32::NAN
    } else {
        x.max(y)
    }
}

pub(crate) fn nan_min(x: f32, y: f32) -> f32 {
    if x.is_nan() || y.is_nan() {
        f32::NAN
    } else {
        x.min(y)
    }
}

/// Divide every pixel by a constant.
pub fn scale(data: &Array2<f32>, divisor: f32) -> Array2<f32> {
    map_pixels(data, |v| v / divisor)
}

/// Weighted sum of three planes: wa*a + wb*b + wc*c.
pub fn weighted_sum(
    a: &Array2<f32>,
    b: &Array2<f32>,
    c: &Array2<f32>,
    weights: [f32; 3],
) -> Result<Array2<f32>> {
    ensure_same_shape(a, b)?;
    ensure_same_shape(a, c)?;
    let [wa, wb, wc] = weights;
    let mut out = a.mapv(|v| v * wa);
    out.zip_mut_with(b, |o, &v| *o += wb * v);
    out.zip_mut_with(c, |o, &v| *o += wc * v);
    Ok(out)
}
