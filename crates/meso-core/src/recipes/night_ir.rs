use ndarray::Array2;

use crate::channels::load_channel_kelvin;
use crate::color::process::ColorPlanes;
use crate::consts::{NIGHT_IR_DIMMING, NIGHT_IR_LOWER_K, NIGHT_IR_UPPER_K};
use crate::error::Result;
use crate::filters::arith::{maximum, scale};
use crate::filters::levels::invert;
use crate::filters::normalize::normalize;
use crate::frame::{ChannelId, MultiChannelFrame};

/// Grayscale luminance floor from the clean IR band.
///
/// Channel 13 is windowed to 90–313 K, inverted so cold tops are bright and
/// dimmed by 1.4, which caps the floor at ~0.71.
pub fn night_ir_floor(frame: &MultiChannelFrame) -> Result<Array2<f32>> {
    let ir = load_channel_kelvin(frame, ChannelId::C13)?;
    let ir = normalize(&ir, NIGHT_IR_LOWER_K, NIGHT_IR_UPPER_K, true)?;
    Ok(scale(&invert(&ir), NIGHT_IR_DIMMING))
}

/// Raise every plane to at least the night-IR floor. Sunlit pixels that are
/// already brighter than the floor are unchanged.
pub fn apply_night_ir(frame: &MultiChannelFrame, planes: &ColorPlanes) -> Result<ColorPlanes> {
    let floor = night_ir_floor(frame)?;
    planes.map(|plane| maximum(plane, &floor))
}
