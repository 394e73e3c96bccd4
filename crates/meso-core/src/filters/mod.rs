//! Per-pixel numeric primitives shared by every recipe.

pub mod arith;
pub mod levels;
pub mod normalize;

use ndarray::{Array2, Zip};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{MesoError, Result};

/// Map every pixel through `f`, in parallel above the pixel threshold.
pub(crate) fn map_pixels<F>(data: &Array2<f32>, f: F) -> Array2<f32>
where
    F: Fn(f32) -> f32 + Send + Sync,
{
    if data.len() >= PARALLEL_PIXEL_THRESHOLD {
        Zip::from(data).par_map_collect(|&v| f(v))
    } else {
        data.mapv(f)
    }
}

/// Combine two equal-shaped arrays pixel by pixel.
pub(crate) fn zip_pixels<F>(a: &Array2<f32>, b: &Array2<f32>, f: F) -> Result<Array2<f32>>
where
    F: Fn(f32, f32) -> f32 + Send + Sync,
{
    ensure_same_shape(a, b)?;
    if a.len() >= PARALLEL_PIXEL_THRESHOLD {
        Ok(Zip::from(a).and(b).par_map_collect(|&x, &y| f(x, y)))
    } else {
        Ok(Zip::from(a).and(b).map_collect(|&x, &y| f(x, y)))
    }
}

pub(crate) fn ensure_same_shape(a: &Array2<f32>, b: &Array2<f32>) -> Result<()> {
    if a.dim() != b.dim() {
        return Err(MesoError::ShapeMismatch {
            expected: a.dim(),
            found: b.dim(),
        });
    }
    Ok(())
}
