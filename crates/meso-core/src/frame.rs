use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::consts::MAX_CHANNEL_ID;
use crate::error::{MesoError, Result};

/// Imager band number, 1..=16.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ChannelId(u8);

impl ChannelId {
    pub const C01: ChannelId = ChannelId(1);
    pub const C02: ChannelId = ChannelId(2);
    pub const C03: ChannelId = ChannelId(3);
    pub const C04: ChannelId = ChannelId(4);
    pub const C05: ChannelId = ChannelId(5);
    pub const C06: ChannelId = ChannelId(6);
    pub const C07: ChannelId = ChannelId(7);
    pub const C08: ChannelId = ChannelId(8);
    pub const C09: ChannelId = ChannelId(9);
    pub const C10: ChannelId = ChannelId(10);
    pub const C11: ChannelId = ChannelId(11);
    pub const C12: ChannelId = ChannelId(12);
    pub const C13: ChannelId = ChannelId(13);
    pub const C14: ChannelId = ChannelId(14);
    pub const C15: ChannelId = ChannelId(15);
    pub const C16: ChannelId = ChannelId(16);

    pub fn new(number: u8) -> Result<Self> {
        if (1..=MAX_CHANNEL_ID).contains(&number) {
            Ok(Self(number))
        } else {
            Err(MesoError::InvalidParameter(format!(
                "channel id {number} outside 1..={MAX_CHANNEL_ID}"
            )))
        }
    }
}

impl TryFrom<u8> for ChannelId {
    type Error = MesoError;

    fn try_from(number: u8) -> Result<Self> {
        Self::new(number)
    }
}

impl From<ChannelId> for u8 {
    fn from(id: ChannelId) -> u8 {
        id.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{:02}", self.0)
    }
}

/// Physical unit a channel's values are expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    /// Brightness temperature in Kelvin.
    #[serde(rename = "K", alias = "kelvin", alias = "Kelvin")]
    Kelvin,
    /// Brightness temperature in degrees Celsius.
    #[serde(rename = "C", alias = "degC", alias = "celsius", alias = "Celsius")]
    Celsius,
    /// Unitless reflectance factor, nominally 0..1.
    #[serde(rename = "1", alias = "reflectance", alias = "Reflectance")]
    Reflectance,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kelvin => write!(f, "K"),
            Self::Celsius => write!(f, "°C"),
            Self::Reflectance => write!(f, "reflectance"),
        }
    }
}

/// One spectral plane with its unit tag.
#[derive(Clone, Debug)]
pub struct Channel {
    pub data: Array2<f32>,
    pub unit: Unit,
}

/// Geographic extent of a scan in degrees (the mesoscale window).
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Whether a point lies inside the window. Windows whose west edge is
    /// east of their east edge straddle the antimeridian.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        if lat < self.south || lat > self.north {
            return false;
        }
        if self.west <= self.east {
            lon >= self.west && lon <= self.east
        } else {
            lon >= self.west || lon <= self.east
        }
    }

    /// Center as (lon, lat).
    pub fn center(&self) -> (f64, f64) {
        let lat = (self.north + self.south) / 2.0;
        let lon = if self.west <= self.east {
            (self.west + self.east) / 2.0
        } else {
            let mid = (self.west + self.east + 360.0) / 2.0;
            if mid > 180.0 {
                mid - 360.0
            } else {
                mid
            }
        };
        (lon, lat)
    }
}

/// Descriptive scene/platform attributes copied onto every composite.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformInfo {
    pub scene_id: String,
    pub platform_id: String,
    pub orbital_slot: String,
    pub instrument_type: String,
    pub title: String,
    pub spatial_resolution: String,
}

/// Fixed-grid projection parameters of the imager.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagerProjection {
    /// Satellite height above the ellipsoid surface (m).
    pub perspective_point_height: f64,
    pub semi_major_axis: f64,
    pub semi_minor_axis: f64,
    /// Sub-satellite longitude (degrees, negative west).
    pub longitude_of_projection_origin: f64,
}

impl Default for ImagerProjection {
    fn default() -> Self {
        // GOES-East (75°W) on the GRS80 ellipsoid.
        Self {
            perspective_point_height: 35_786_023.0,
            semi_major_axis: 6_378_137.0,
            semi_minor_axis: 6_356_752.314_14,
            longitude_of_projection_origin: -75.0,
        }
    }
}

/// One instrument scan: co-registered channels plus coordinates and metadata.
///
/// Built through [`FrameBuilder`], which checks co-registration. Immutable
/// afterwards.
#[derive(Clone, Debug)]
pub struct MultiChannelFrame {
    channels: BTreeMap<ChannelId, Channel>,
    x: Array1<f64>,
    y: Array1<f64>,
    timestamp: DateTime<Utc>,
    extent: BoundingBox,
    platform: PlatformInfo,
    projection: ImagerProjection,
}

impl MultiChannelFrame {
    pub fn builder(timestamp: DateTime<Utc>) -> FrameBuilder {
        FrameBuilder::new(timestamp)
    }

    pub fn channel(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.get(&id)
    }

    pub fn contains(&self, id: ChannelId) -> bool {
        self.channels.contains_key(&id)
    }

    pub fn channel_ids(&self) -> impl Iterator<Item = ChannelId> + '_ {
        self.channels.keys().copied()
    }

    /// Pixel grid shape as (height, width).
    pub fn shape(&self) -> (usize, usize) {
        (self.y.len(), self.x.len())
    }

    pub fn width(&self) -> usize {
        self.x.len()
    }

    pub fn height(&self) -> usize {
        self.y.len()
    }

    /// Horizontal scan angle axis (radians).
    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    /// Vertical scan angle axis (radians).
    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn extent(&self) -> &BoundingBox {
        &self.extent
    }

    pub fn platform(&self) -> &PlatformInfo {
        &self.platform
    }

    pub fn projection(&self) -> &ImagerProjection {
        &self.projection
    }
}

/// Collects channels and metadata, validating co-registration on `build`.
#[derive(Debug)]
pub struct FrameBuilder {
    channels: BTreeMap<ChannelId, Channel>,
    duplicate: Option<ChannelId>,
    axes: Option<(Array1<f64>, Array1<f64>)>,
    timestamp: DateTime<Utc>,
    extent: Option<BoundingBox>,
    platform: PlatformInfo,
    projection: ImagerProjection,
}

impl FrameBuilder {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            channels: BTreeMap::new(),
            duplicate: None,
            axes: None,
            timestamp,
            extent: None,
            platform: PlatformInfo::default(),
            projection: ImagerProjection::default(),
        }
    }

    pub fn channel(mut self, id: ChannelId, unit: Unit, data: Array2<f32>) -> Self {
        if self.channels.insert(id, Channel { data, unit }).is_some() {
            self.duplicate.get_or_insert(id);
        }
        self
    }

    /// Scan angle axes: `x` has one entry per column, `y` one per row.
    pub fn axes(mut self, x: Array1<f64>, y: Array1<f64>) -> Self {
        self.axes = Some((x, y));
        self
    }

    pub fn extent(mut self, extent: BoundingBox) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn platform(mut self, platform: PlatformInfo) -> Self {
        self.platform = platform;
        self
    }

    pub fn projection(mut self, projection: ImagerProjection) -> Self {
        self.projection = projection;
        self
    }

    pub fn build(self) -> Result<MultiChannelFrame> {
        if let Some(id) = self.duplicate {
            return Err(MesoError::InvalidFrame(format!(
                "channel {id} supplied more than once"
            )));
        }
        let (x, y) = self
            .axes
            .ok_or_else(|| MesoError::InvalidFrame("missing x/y coordinate axes".into()))?;
        let extent = self
            .extent
            .ok_or_else(|| MesoError::InvalidFrame("missing geospatial extent".into()))?;
        if self.channels.is_empty() {
            return Err(MesoError::InvalidFrame("frame has no channels".into()));
        }

        let expected = (y.len(), x.len());
        if expected.0 == 0 || expected.1 == 0 {
            return Err(MesoError::InvalidFrame(format!(
                "empty pixel grid {}x{}",
                expected.1, expected.0
            )));
        }
        for channel in self.channels.values() {
            let found = channel.data.dim();
            if found != expected {
                return Err(MesoError::ShapeMismatch { expected, found });
            }
        }

        Ok(MultiChannelFrame {
            channels: self.channels,
            x,
            y,
            timestamp: self.timestamp,
            extent,
            platform: self.platform,
            projection: self.projection,
        })
    }
}
