//! TOML scene manifests: one scan described as metadata plus band files.
//!
//! ```toml
//! timestamp = "2024-05-20T18:01:24Z"
//! width = 500
//! height = 500
//!
//! [grid]
//! x_origin = -0.0358
//! dx = 0.000028
//! y_origin = 0.0952
//! dy = -0.000028
//!
//! [extent]
//! north = 36.5
//! south = 26.0
//! east = -92.0
//! west = -104.0
//!
//! [[channels]]
//! id = 13
//! unit = "K"
//! file = "C13.bin"
//! dtype = "i16"
//! scale_factor = 0.06145332
//! add_offset = 89.62
//! fill_value = -1
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use ndarray::Array1;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{MesoError, Result};
use crate::frame::{
    BoundingBox, ChannelId, ImagerProjection, MultiChannelFrame, PlatformInfo, Unit,
};

use super::band::{read_band, BandDtype, BandLayout};

/// Regular scan-angle grid: coordinate of pixel `i` is `origin + i * step`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub x_origin: f64,
    pub dx: f64,
    pub y_origin: f64,
    pub dy: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelSpec {
    pub id: ChannelId,
    pub unit: Unit,
    pub file: PathBuf,
    #[serde(default)]
    pub dtype: BandDtype,
    #[serde(default = "default_scale")]
    pub scale_factor: f32,
    #[serde(default)]
    pub add_offset: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_value: Option<f64>,
}

fn default_scale() -> f32 {
    1.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneManifest {
    pub timestamp: DateTime<Utc>,
    pub width: usize,
    pub height: usize,
    pub grid: GridSpec,
    pub extent: BoundingBox,
    #[serde(default)]
    pub platform: PlatformInfo,
    #[serde(default)]
    pub projection: ImagerProjection,
    pub channels: Vec<ChannelSpec>,
}

impl SceneManifest {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(text)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MesoError::InvalidManifest(format!(
                "grid must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        let g = &self.grid;
        for (name, v) in [
            ("x_origin", g.x_origin),
            ("dx", g.dx),
            ("y_origin", g.y_origin),
            ("dy", g.dy),
        ] {
            if !v.is_finite() {
                return Err(MesoError::InvalidManifest(format!("grid.{name} is {v}")));
            }
        }
        if g.dx == 0.0 || g.dy == 0.0 {
            return Err(MesoError::InvalidManifest("grid step must be non-zero".into()));
        }
        if self.channels.is_empty() {
            return Err(MesoError::InvalidManifest("no channels listed".into()));
        }
        Ok(())
    }

    pub fn x_axis(&self) -> Array1<f64> {
        Array1::from_shape_fn(self.width, |i| self.grid.x_origin + i as f64 * self.grid.dx)
    }

    pub fn y_axis(&self) -> Array1<f64> {
        Array1::from_shape_fn(self.height, |i| self.grid.y_origin + i as f64 * self.grid.dy)
    }

    fn layout(&self, spec: &ChannelSpec) -> BandLayout {
        BandLayout {
            width: self.width,
            height: self.height,
            dtype: spec.dtype,
            scale_factor: spec.scale_factor,
            add_offset: spec.add_offset,
            fill_value: spec.fill_value,
        }
    }

    /// Read every band and build the frame. Relative band paths resolve
    /// against `base_dir`.
    pub fn to_frame(&self, base_dir: &Path) -> Result<MultiChannelFrame> {
        let bands = self
            .channels
            .par_iter()
            .map(|spec| {
                let path = base_dir.join(&spec.file);
                debug!(channel = %spec.id, path = %path.display(), "Reading band");
                read_band(&path, &self.layout(spec)).map(|data| (spec.id, spec.unit, data))
            })
            .collect::<Result<Vec<_>>>()?;

        let frame = bands
            .into_iter()
            .fold(MultiChannelFrame::builder(self.timestamp), |b, (id, unit, data)| {
                b.channel(id, unit, data)
            })
            .axes(self.x_axis(), self.y_axis())
            .extent(self.extent)
            .platform(self.platform.clone())
            .projection(self.projection)
            .build()?;
        Ok(frame)
    }
}

/// Load a scene from a manifest file.
pub fn load_scene(path: &Path) -> Result<MultiChannelFrame> {
    let manifest = SceneManifest::from_file(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let frame = manifest.to_frame(base_dir)?;
    info!(
        path = %path.display(),
        channels = manifest.channels.len(),
        width = frame.width(),
        height = frame.height(),
        timestamp = %frame.timestamp(),
        "Loaded scene"
    );
    Ok(frame)
}
