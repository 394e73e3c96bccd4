use ndarray::Array2;

use crate::consts::KELVIN_OFFSET;
use crate::error::{MesoError, Result};
use crate::frame::{Channel, ChannelId, MultiChannelFrame, Unit};

fn lookup(frame: &MultiChannelFrame, id: ChannelId) -> Result<&Channel> {
    frame
        .channel(id)
        .ok_or(MesoError::MissingChannel { channel: id })
}

/// Fetch one channel in working units: Kelvin becomes Celsius, everything
/// else passes through.
pub fn load_channel(frame: &MultiChannelFrame, id: ChannelId) -> Result<Array2<f32>> {
    let channel = lookup(frame, id)?;
    Ok(match channel.unit {
        Unit::Kelvin => channel.data.mapv(|v| v - KELVIN_OFFSET),
        Unit::Celsius | Unit::Reflectance => channel.data.clone(),
    })
}

/// Fetch several channels in request order. The first absent channel aborts
/// the whole request.
pub fn load_channels(frame: &MultiChannelFrame, ids: &[ChannelId]) -> Result<Vec<Array2<f32>>> {
    ids.iter().map(|&id| load_channel(frame, id)).collect()
}

/// Fetch exactly three channels, the common recipe shape.
pub fn load_rgb_channels(
    frame: &MultiChannelFrame,
    ids: [ChannelId; 3],
) -> Result<(Array2<f32>, Array2<f32>, Array2<f32>)> {
    let r = load_channel(frame, ids[0])?;
    let g = load_channel(frame, ids[1])?;
    let b = load_channel(frame, ids[2])?;
    Ok((r, g, b))
}

/// Fetch a brightness temperature channel in Kelvin.
pub fn load_channel_kelvin(frame: &MultiChannelFrame, id: ChannelId) -> Result<Array2<f32>> {
    let channel = lookup(frame, id)?;
    match channel.unit {
        Unit::Kelvin => Ok(channel.data.clone()),
        Unit::Celsius => Ok(channel.data.mapv(|v| v + KELVIN_OFFSET)),
        Unit::Reflectance => Err(MesoError::InvalidParameter(format!(
            "channel {id} holds reflectance, not a brightness temperature"
        ))),
    }
}
