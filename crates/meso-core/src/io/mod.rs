pub mod band;
pub mod image_io;
pub mod manifest;
