use crate::color::process::ColorPlanes;
use crate::error::Result;
use crate::filters::levels::{albedo_to_brightness, gamma_correct};
use crate::filters::normalize::breakpoint_stretch;
use crate::frame::MultiChannelFrame;

use super::config::NaturalColorParams;
use super::night_ir::apply_night_ir;
use super::true_color::{load_visible, pseudo_green};

pub fn natural_color(
    frame: &MultiChannelFrame,
    params: &NaturalColorParams,
) -> Result<ColorPlanes> {
    let mut planes = load_visible(frame)?;
    if params.pseudo_green {
        planes = pseudo_green(planes)?;
    }

    // Albedo to 0..255 brightness, then the two-segment contrast stretch.
    let mut planes = planes.map(|plane| breakpoint_stretch(&albedo_to_brightness(plane)))?;

    if params.night_ir {
        planes = apply_night_ir(frame, &planes)?;
    }
    planes.map(|plane| gamma_correct(plane, params.gamma))
}
