use crate::channels::load_channel;
use crate::color::process::ColorPlanes;
use crate::error::Result;
use crate::filters::arith::difference;
use crate::filters::levels::invert;
use crate::filters::normalize::normalize;
use crate::frame::{ChannelId, MultiChannelFrame};

/// Air Mass: red C08−C10, green C12−C13, blue inverted C08 (°C).
pub fn air_mass(frame: &MultiChannelFrame) -> Result<ColorPlanes> {
    let c08 = load_channel(frame, ChannelId::C08)?;
    let c10 = load_channel(frame, ChannelId::C10)?;
    let c12 = load_channel(frame, ChannelId::C12)?;
    let c13 = load_channel(frame, ChannelId::C13)?;

    let r = normalize(&difference(&c08, &c10)?, -26.2, 0.6, true)?;
    let g = normalize(&difference(&c12, &c13)?, -43.2, 6.7, true)?;
    let b = invert(&normalize(&c08, -64.65, -29.25, true)?);

    ColorPlanes::new(r, g, b)
}
