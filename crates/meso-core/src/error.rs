use thiserror::Error;

use crate::frame::ChannelId;

#[derive(Error, Debug)]
pub enum MesoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Channel {channel} is not present in the frame")]
    MissingChannel { channel: ChannelId },

    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Unknown recipe: {0}")]
    UnknownRecipe(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("Invalid scene manifest: {0}")]
    InvalidManifest(String),

    #[error("Manifest parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, MesoError>;
