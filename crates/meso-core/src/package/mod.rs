//! Wraps recipe output with coordinates, extents and scene metadata.

pub mod projection;

use chrono::{DateTime, Utc};
use ndarray::{Array1, Array2, Array3, Zip};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::color::process::ColorPlanes;
use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{MesoError, Result};
use crate::frame::{BoundingBox, ImagerProjection, MultiChannelFrame, PlatformInfo};

use self::projection::MapProjection;

/// Plot bounds in projection metres: (x2 min, x2 max, y2 min, y2 max).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayExtent {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DisplayExtent {
    fn from_axes(x2: &Array1<f64>, y2: &Array1<f64>) -> Self {
        let (x_min, x_max) = min_max(x2);
        let (y_min, y_max) = min_max(y2);
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x_min, self.x_max, self.y_min, self.y_max)
    }
}

fn min_max(values: &Array1<f64>) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Per-pixel latitude and longitude in degrees, NaN where the pixel misses
/// the Earth.
#[derive(Clone, Debug)]
pub struct GeodeticGrid {
    pub latitude: Array2<f64>,
    pub longitude: Array2<f64>,
}

impl GeodeticGrid {
    fn project(x2: &Array1<f64>, y2: &Array1<f64>, projection: &dyn MapProjection) -> Self {
        let shape = (y2.len(), x2.len());
        let mut latitude = Array2::<f64>::from_elem(shape, f64::NAN);
        let mut longitude = Array2::<f64>::from_elem(shape, f64::NAN);

        let fill = |(row, col): (usize, usize), lat: &mut f64, lon: &mut f64| {
            if let Some((lo, la)) = projection.to_geodetic(x2[col], y2[row]) {
                *lat = la;
                *lon = lo;
            }
        };

        let zip = Zip::indexed(&mut latitude).and(&mut longitude);
        if shape.0 * shape.1 >= PARALLEL_PIXEL_THRESHOLD {
            zip.par_for_each(fill);
        } else {
            zip.for_each(fill);
        }

        Self {
            latitude,
            longitude,
        }
    }

    /// Number of pixels that landed on the Earth.
    pub fn valid_count(&self) -> usize {
        self.latitude.iter().filter(|v| v.is_finite()).count()
    }
}

/// A rendered composite ready for display or export.
#[derive(Clone, Debug)]
pub struct CompositeImage {
    pub description: String,
    /// (height, width, 3), planes in [0, 1].
    pub data: Array3<f32>,
    /// Scan angle axes (radians), copied from the frame.
    pub x: Array1<f64>,
    pub y: Array1<f64>,
    /// Scan angles scaled by the perspective point height (metres).
    pub x2: Array1<f64>,
    pub y2: Array1<f64>,
    pub geodetic: Option<GeodeticGrid>,
    pub timestamp: DateTime<Utc>,
    pub extent: BoundingBox,
    pub platform: PlatformInfo,
    pub projection: ImagerProjection,
    pub display_extent: DisplayExtent,
}

impl CompositeImage {
    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn extent(&self) -> &BoundingBox {
        &self.extent
    }

    pub fn planes(&self) -> Result<ColorPlanes> {
        ColorPlanes::from_stacked(&self.data)
    }

    pub fn summary(&self) -> CompositeSummary {
        CompositeSummary {
            description: self.description.clone(),
            timestamp: self.timestamp,
            width: self.width(),
            height: self.height(),
            extent: self.extent,
            display_extent: self.display_extent,
            platform: self.platform.clone(),
            perspective_point_height: self.projection.perspective_point_height,
            geodetic: self.geodetic.is_some(),
        }
    }
}

/// Serializable metadata written next to an exported image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompositeSummary {
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub width: usize,
    pub height: usize,
    pub extent: BoundingBox,
    pub display_extent: DisplayExtent,
    pub platform: PlatformInfo,
    pub perspective_point_height: f64,
    pub geodetic: bool,
}

/// Package planes with the frame's coordinates and metadata.
pub fn package(
    frame: &MultiChannelFrame,
    planes: &ColorPlanes,
    description: &str,
) -> Result<CompositeImage> {
    assemble(frame, planes, description, None)
}

/// Like [`package`], additionally deriving a lat/lon grid through `projection`.
pub fn package_with_projection(
    frame: &MultiChannelFrame,
    planes: &ColorPlanes,
    description: &str,
    projection: &dyn MapProjection,
) -> Result<CompositeImage> {
    assemble(frame, planes, description, Some(projection))
}

fn assemble(
    frame: &MultiChannelFrame,
    planes: &ColorPlanes,
    description: &str,
    projection: Option<&dyn MapProjection>,
) -> Result<CompositeImage> {
    if planes.dim() != frame.shape() {
        return Err(MesoError::ShapeMismatch {
            expected: frame.shape(),
            found: planes.dim(),
        });
    }
    let data = planes.stack()?;

    let sat_height = frame.projection().perspective_point_height;
    let x2 = frame.x().mapv(|v| v * sat_height);
    let y2 = frame.y().mapv(|v| v * sat_height);
    let display_extent = DisplayExtent::from_axes(&x2, &y2);

    let geodetic = projection.map(|p| {
        let grid = GeodeticGrid::project(&x2, &y2, p);
        debug!(
            valid = grid.valid_count(),
            total = grid.latitude.len(),
            "Derived geodetic grid"
        );
        grid
    });

    info!(
        description,
        width = frame.width(),
        height = frame.height(),
        geodetic = geodetic.is_some(),
        "Packaged composite"
    );

    Ok(CompositeImage {
        description: description.to_string(),
        data,
        x: frame.x().clone(),
        y: frame.y().clone(),
        x2,
        y2,
        geodetic,
        timestamp: frame.timestamp(),
        extent: *frame.extent(),
        platform: frame.platform().clone(),
        projection: *frame.projection(),
        display_extent,
    })
}
