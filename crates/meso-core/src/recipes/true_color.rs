use crate::channels::load_rgb_channels;
use crate::color::process::ColorPlanes;
use crate::consts::{PSEUDO_GREEN_BLUE, PSEUDO_GREEN_RED, PSEUDO_GREEN_VEGGIE};
use crate::error::Result;
use crate::filters::arith::weighted_sum;
use crate::filters::levels::gamma_correct;
use crate::filters::normalize::clip_unit;
use crate::frame::{ChannelId, MultiChannelFrame};

use super::config::TrueColorParams;
use super::night_ir::apply_night_ir;

/// Red (C02), veggie (C03) and blue (C01) reflectance, clipped to [0, 1].
pub(super) fn load_visible(frame: &MultiChannelFrame) -> Result<ColorPlanes> {
    let (r, g, b) = load_rgb_channels(frame, [ChannelId::C02, ChannelId::C03, ChannelId::C01])?;
    ColorPlanes::new(clip_unit(&r), clip_unit(&g), clip_unit(&b))
}

/// Swap the veggie band for 0.45 R + 0.10 G + 0.45 B, clipped.
pub(super) fn pseudo_green(planes: ColorPlanes) -> Result<ColorPlanes> {
    let green = weighted_sum(
        &planes.red,
        &planes.green,
        &planes.blue,
        [PSEUDO_GREEN_RED, PSEUDO_GREEN_VEGGIE, PSEUDO_GREEN_BLUE],
    )?;
    Ok(ColorPlanes {
        green: clip_unit(&green),
        ..planes
    })
}

pub fn true_color(frame: &MultiChannelFrame, params: &TrueColorParams) -> Result<ColorPlanes> {
    let planes = load_visible(frame)?;
    let mut planes = planes.map(|plane| gamma_correct(plane, params.gamma))?;

    if params.pseudo_green {
        planes = pseudo_green(planes)?;
    }
    if params.night_ir {
        planes = apply_night_ir(frame, &planes)?;
    }
    Ok(planes)
}
