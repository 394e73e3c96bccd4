//! Single-band readers: raw little-endian grids and 16-bit images.

use std::fs::File;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use memmap2::Mmap;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{MesoError, Result};

/// Sample type of a raw band file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandDtype {
    #[default]
    I16,
    U16,
    F32,
}

impl BandDtype {
    pub fn size(self) -> usize {
        match self {
            Self::I16 | Self::U16 => 2,
            Self::F32 => 4,
        }
    }
}

/// How to turn stored samples into physical values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandLayout {
    pub width: usize,
    pub height: usize,
    pub dtype: BandDtype,
    pub scale_factor: f32,
    pub add_offset: f32,
    /// Stored sample marking a missing pixel; decoded as NaN.
    pub fill_value: Option<f64>,
}

impl BandLayout {
    fn decode(&self, stored: f64) -> f32 {
        if self.fill_value == Some(stored) {
            f32::NAN
        } else {
            stored as f32 * self.scale_factor + self.add_offset
        }
    }
}

/// Read one band. `.png`, `.tif` and `.tiff` files go through the image
/// decoder as 16-bit luminance; anything else is a raw little-endian grid.
pub fn read_band(path: &Path, layout: &BandLayout) -> Result<Array2<f32>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png" | "tif" | "tiff") => read_image_band(path, layout),
        _ => read_raw_band(path, layout),
    }
}

/// Read a headerless little-endian band through a memory map.
pub fn read_raw_band(path: &Path, layout: &BandLayout) -> Result<Array2<f32>> {
    let pixels = layout
        .width
        .checked_mul(layout.height)
        .ok_or_else(|| MesoError::InvalidManifest("band dimensions overflow".into()))?;
    let expected = pixels * layout.dtype.size();

    let file = File::open(path)?;
    let actual = file.metadata()?.len();
    if actual != expected as u64 {
        return Err(MesoError::InvalidManifest(format!(
            "{}: expected {} bytes for {}x{} {:?}, found {}",
            path.display(),
            expected,
            layout.width,
            layout.height,
            layout.dtype,
            actual
        )));
    }
    if pixels == 0 {
        return Ok(Array2::zeros((layout.height, layout.width)));
    }

    let mmap = unsafe { Mmap::map(&file)? };
    let mut cursor = &mmap[..];
    let values: Vec<f32> = match layout.dtype {
        BandDtype::I16 => {
            let mut raw = vec![0i16; pixels];
            cursor.read_i16_into::<LittleEndian>(&mut raw)?;
            raw.into_iter().map(|v| layout.decode(v as f64)).collect()
        }
        BandDtype::U16 => {
            let mut raw = vec![0u16; pixels];
            cursor.read_u16_into::<LittleEndian>(&mut raw)?;
            raw.into_iter().map(|v| layout.decode(v as f64)).collect()
        }
        BandDtype::F32 => {
            let mut raw = vec![0f32; pixels];
            cursor.read_f32_into::<LittleEndian>(&mut raw)?;
            raw.into_iter().map(|v| layout.decode(v as f64)).collect()
        }
    };

    Array2::from_shape_vec((layout.height, layout.width), values)
        .map_err(|e| MesoError::InvalidManifest(format!("{}: {e}", path.display())))
}

/// Read a grayscale image band; samples are the raw 0..=65535 values.
pub fn read_image_band(path: &Path, layout: &BandLayout) -> Result<Array2<f32>> {
    let gray = image::open(path)?.to_luma16();
    let (w, h) = gray.dimensions();
    if (w as usize, h as usize) != (layout.width, layout.height) {
        return Err(MesoError::InvalidManifest(format!(
            "{}: image is {}x{}, manifest says {}x{}",
            path.display(),
            w,
            h,
            layout.width,
            layout.height
        )));
    }

    let values: Vec<f32> = gray
        .into_raw()
        .into_iter()
        .map(|v| layout.decode(v as f64))
        .collect();
    Array2::from_shape_vec((layout.height, layout.width), values)
        .map_err(|e| MesoError::InvalidManifest(format!("{}: {e}", path.display())))
}
