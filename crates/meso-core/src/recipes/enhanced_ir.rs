use ndarray::Array2;
use tracing::debug;

use crate::channels::load_channel;
use crate::color::colorscale::{apply_scale, ColorScale};
use crate::color::process::ColorPlanes;
use crate::error::Result;
use crate::filters::levels::gamma_correct;
use crate::filters::map_pixels;
use crate::filters::normalize::normalize;
use crate::frame::{ChannelId, MultiChannelFrame};

use super::config::EnhancedIrParams;

/// Clean IR brightness temperature rendered through a color scale.
///
/// The temperature is windowed to `params.range` (°C) or, without one, to the
/// frame's own finite min/max. A frame with a single temperature maps to the
/// middle of the scale.
pub fn enhanced_ir(
    frame: &MultiChannelFrame,
    params: &EnhancedIrParams,
    scale: &dyn ColorScale,
) -> Result<ColorPlanes> {
    let ir = load_channel(frame, ChannelId::C13)?;

    let unit = match params.range {
        Some([lower, upper]) => normalize(&ir, lower, upper, true)?,
        None => auto_window(&ir)?,
    };
    let unit = gamma_correct(&unit, params.gamma)?;
    Ok(apply_scale(&unit, scale))
}

fn auto_window(ir: &Array2<f32>) -> Result<Array2<f32>> {
    let range = ir
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f32, f32)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        });

    match range {
        Some((lo, hi)) if lo < hi => {
            debug!(lower = lo, upper = hi, "Enhanced IR auto window");
            normalize(ir, lo, hi, true)
        }
        _ => Ok(map_pixels(ir, |v| if v.is_nan() { v } else { 0.5 })),
    }
}
