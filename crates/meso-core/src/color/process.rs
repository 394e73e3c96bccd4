use ndarray::{stack, Array2, Array3, Axis};

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{MesoError, Result};
use crate::filters::ensure_same_shape;

/// Three co-registered planes produced by a recipe, each nominally in [0, 1].
#[derive(Clone, Debug)]
pub struct ColorPlanes {
    pub red: Array2<f32>,
    pub green: Array2<f32>,
    pub blue: Array2<f32>,
}

impl ColorPlanes {
    /// Create planes, rejecting mismatched shapes.
    pub fn new(red: Array2<f32>, green: Array2<f32>, blue: Array2<f32>) -> Result<Self> {
        ensure_same_shape(&red, &green)?;
        ensure_same_shape(&red, &blue)?;
        Ok(Self { red, green, blue })
    }

    /// Shape as (height, width).
    pub fn dim(&self) -> (usize, usize) {
        self.red.dim()
    }

    /// Apply a processing function to each plane independently.
    pub fn map<F>(&self, mut process_fn: F) -> Result<Self>
    where
        F: FnMut(&Array2<f32>) -> Result<Array2<f32>>,
    {
        Ok(Self {
            red: process_fn(&self.red)?,
            green: process_fn(&self.green)?,
            blue: process_fn(&self.blue)?,
        })
    }

    /// Stack into one (height, width, 3) array.
    pub fn stack(&self) -> Result<Array3<f32>> {
        stack(
            Axis(2),
            &[self.red.view(), self.green.view(), self.blue.view()],
        )
        .map_err(|_| MesoError::ShapeMismatch {
            expected: self.red.dim(),
            found: if self.green.dim() != self.red.dim() {
                self.green.dim()
            } else {
                self.blue.dim()
            },
        })
    }

    /// Split a (height, width, 3) array back into planes.
    pub fn from_stacked(data: &Array3<f32>) -> Result<Self> {
        let (h, w, planes) = data.dim();
        if planes != COLOR_CHANNEL_COUNT {
            return Err(MesoError::InvalidParameter(format!(
                "expected {COLOR_CHANNEL_COUNT} color planes, found {planes} in {h}x{w} image"
            )));
        }
        Ok(Self {
            red: data.index_axis(Axis(2), 0).to_owned(),
            green: data.index_axis(Axis(2), 1).to_owned(),
            blue: data.index_axis(Axis(2), 2).to_owned(),
        })
    }
}
