use crate::channels::{load_channel, load_rgb_channels};
use crate::color::process::ColorPlanes;
use crate::error::Result;
use crate::filters::arith::difference;
use crate::filters::levels::{gamma_correct, invert};
use crate::filters::normalize::normalize;
use crate::frame::{ChannelId, MultiChannelFrame};

/// Water Vapor: clean IR, upper-level and lower-level water vapor bands, all
/// in °C and inverted so moist/cold regions are bright.
pub fn water_vapor(frame: &MultiChannelFrame) -> Result<ColorPlanes> {
    let (r, g, b) = load_rgb_channels(frame, [ChannelId::C13, ChannelId::C08, ChannelId::C10])?;

    let r = invert(&normalize(&r, -70.86, 5.81, true)?);
    let g = invert(&normalize(&g, -58.49, -30.48, true)?);
    let b = invert(&normalize(&b, -28.03, -12.12, true)?);

    ColorPlanes::new(r, g, b)
}

/// Differential Water Vapor: C10−C08 on red, C10 and C08 (°C) on green and
/// blue. Gamma is applied before the inversion.
pub fn differential_water_vapor(frame: &MultiChannelFrame) -> Result<ColorPlanes> {
    let c08 = load_channel(frame, ChannelId::C08)?;
    let c10 = load_channel(frame, ChannelId::C10)?;

    let r = normalize(&difference(&c10, &c08)?, -3.0, 30.0, true)?;
    let g = normalize(&c10, -60.0, 5.0, true)?;
    let b = normalize(&c08, -64.65, -29.25, true)?;

    let r = invert(&gamma_correct(&r, 0.2587)?);
    let g = invert(&gamma_correct(&g, 0.4)?);
    let b = invert(&gamma_correct(&b, 0.4)?);

    ColorPlanes::new(r, g, b)
}
