use crate::channels::load_channel;
use crate::color::process::ColorPlanes;
use crate::error::Result;
use crate::filters::arith::difference;
use crate::filters::normalize::normalize;
use crate::frame::{ChannelId, MultiChannelFrame};

/// Day Convection: every plane is a band difference.
///
/// Red C08−C10, green C07−C13, blue C05−C02.
pub fn day_convection(frame: &MultiChannelFrame) -> Result<ColorPlanes> {
    let c02 = load_channel(frame, ChannelId::C02)?;
    let c05 = load_channel(frame, ChannelId::C05)?;
    let c07 = load_channel(frame, ChannelId::C07)?;
    let c08 = load_channel(frame, ChannelId::C08)?;
    let c10 = load_channel(frame, ChannelId::C10)?;
    let c13 = load_channel(frame, ChannelId::C13)?;

    let r = normalize(&difference(&c08, &c10)?, -35.0, 5.0, true)?;
    let g = normalize(&difference(&c07, &c13)?, -5.0, 60.0, true)?;
    let b = normalize(&difference(&c05, &c02)?, -0.75, 0.25, true)?;

    ColorPlanes::new(r, g, b)
}
