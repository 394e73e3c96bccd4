#![allow(dead_code)]

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use chrono::{DateTime, TimeZone, Utc};
use ndarray::{Array1, Array2};

use meso_core::frame::{BoundingBox, ChannelId, MultiChannelFrame, PlatformInfo, Unit};

/// Fixed scan time used by every synthetic frame.
pub fn scan_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 20, 18, 1, 24).unwrap()
}

/// Mesoscale window over the southern plains.
pub fn plains_extent() -> BoundingBox {
    BoundingBox {
        north: 36.5,
        south: 26.0,
        east: -92.0,
        west: -104.0,
    }
}

/// Scan angle axes centered on nadir, roughly 2 km pixels.
pub fn scan_axes(h: usize, w: usize) -> (Array1<f64>, Array1<f64>) {
    let step = 5.6e-5;
    let x = Array1::from_shape_fn(w, |i| (i as f64 - (w as f64 - 1.0) / 2.0) * step);
    let y = Array1::from_shape_fn(h, |i| ((h as f64 - 1.0) / 2.0 - i as f64) * step);
    (x, y)
}

/// Build a frame where each listed channel holds a constant value.
pub fn uniform_frame(h: usize, w: usize, channels: &[(ChannelId, Unit, f32)]) -> MultiChannelFrame {
    let (x, y) = scan_axes(h, w);
    channels
        .iter()
        .fold(MultiChannelFrame::builder(scan_time()), |b, &(id, unit, v)| {
            b.channel(id, unit, Array2::from_elem((h, w), v))
        })
        .axes(x, y)
        .extent(plains_extent())
        .platform(PlatformInfo {
            platform_id: "G16".into(),
            orbital_slot: "GOES-East".into(),
            ..Default::default()
        })
        .build()
        .unwrap()
}

/// A diagonal ramp from `lo` to `hi`.
pub fn ramp(h: usize, w: usize, lo: f32, hi: f32) -> Array2<f32> {
    let n = (h * w).max(2) - 1;
    Array2::from_shape_fn((h, w), |(r, c)| lo + (hi - lo) * (r * w + c) as f32 / n as f32)
}

/// All sixteen bands: reflectance ramps over 0..1.2 for C01–C06 (slightly
/// out of range on purpose) and brightness temperature ramps over 180–320 K
/// for C07–C16.
pub fn full_frame(h: usize, w: usize) -> MultiChannelFrame {
    let (x, y) = scan_axes(h, w);
    (1..=16u8)
        .fold(MultiChannelFrame::builder(scan_time()), |b, n| {
            let id = ChannelId::new(n).unwrap();
            if n <= 6 {
                b.channel(id, Unit::Reflectance, ramp(h, w, -0.05, 1.2))
            } else {
                b.channel(id, Unit::Kelvin, ramp(h, w, 180.0 + n as f32, 320.0 - n as f32))
            }
        })
        .axes(x, y)
        .extent(plains_extent())
        .build()
        .unwrap()
}

/// Write a raw little-endian i16 band.
pub fn write_band_i16(path: &Path, values: &[i16]) {
    let mut out = BufWriter::new(File::create(path).unwrap());
    for &v in values {
        out.write_i16::<LittleEndian>(v).unwrap();
    }
    out.flush().unwrap();
}

/// Write a raw little-endian f32 band.
pub fn write_band_f32(path: &Path, values: &[f32]) {
    let mut out = BufWriter::new(File::create(path).unwrap());
    for &v in values {
        out.write_f32::<LittleEndian>(v).unwrap();
    }
    out.flush().unwrap();
}

pub fn assert_unit_range(data: &Array2<f32>, what: &str) {
    for &v in data.iter() {
        assert!((0.0..=1.0).contains(&v), "{what}: {v} outside [0, 1]");
    }
}
