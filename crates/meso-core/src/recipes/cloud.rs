use crate::channels::load_rgb_channels;
use crate::color::process::ColorPlanes;
use crate::consts::DAY_CLOUD_CONVECTION_GAMMA;
use crate::error::Result;
use crate::filters::levels::{gamma_correct, invert};
use crate::filters::normalize::normalize;
use crate::frame::{ChannelId, MultiChannelFrame};

/// Day Cloud Phase: C13 (°C, inverted), C02, C05.
pub fn day_cloud_phase(frame: &MultiChannelFrame) -> Result<ColorPlanes> {
    let (r, g, b) = load_rgb_channels(frame, [ChannelId::C13, ChannelId::C02, ChannelId::C05])?;

    let r = invert(&normalize(&r, -53.5, 7.5, true)?);
    let g = normalize(&g, 0.0, 0.78, true)?;
    let b = normalize(&b, 0.01, 0.59, true)?;

    ColorPlanes::new(r, g, b)
}

/// Day Cloud Convection: C02 drives red and green, inverted C13 drives blue.
pub fn day_cloud_convection(frame: &MultiChannelFrame) -> Result<ColorPlanes> {
    let (r, g, b) = load_rgb_channels(frame, [ChannelId::C02, ChannelId::C02, ChannelId::C13])?;

    let r = gamma_correct(&normalize(&r, 0.0, 1.0, true)?, DAY_CLOUD_CONVECTION_GAMMA)?;
    let g = gamma_correct(&normalize(&g, 0.0, 1.0, true)?, DAY_CLOUD_CONVECTION_GAMMA)?;
    let b = invert(&normalize(&b, -70.15, 49.85, true)?);

    ColorPlanes::new(r, g, b)
}
