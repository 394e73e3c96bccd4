//! Map projections used to attach geodetic coordinates to composites.
//!
//! The packager only needs the inverse transform (projected metres to
//! lon/lat), expressed by [`MapProjection`]. [`Geostationary`] implements it
//! for the GOES-R fixed grid.
//!
//! Reference: GOES-R Product Definition and Users' Guide (PUG) Volume 4

use crate::frame::ImagerProjection;

/// Inverse map projection: projected coordinates to geographic degrees.
pub trait MapProjection: Send + Sync {
    /// Convert projected `(x, y)` to `(lon, lat)` in degrees. `None` when the
    /// point does not land on the Earth.
    fn to_geodetic(&self, x: f64, y: f64) -> Option<(f64, f64)>;
}

/// Geostationary view from a satellite above the equator.
///
/// Projected coordinates are scan angles multiplied by the perspective point
/// height, i.e. metres on the fixed grid.
#[derive(Debug, Clone)]
pub struct Geostationary {
    /// Satellite distance from Earth center (m): perspective height + req.
    pub h: f64,
    /// Perspective point height above the surface (m).
    pub perspective_point_height: f64,
    /// Semi-major axis (m).
    pub req: f64,
    /// Semi-minor axis (m).
    pub rpol: f64,
    /// Sub-satellite longitude (radians).
    pub lambda_0: f64,
}

impl Geostationary {
    pub fn new(
        perspective_point_height: f64,
        semi_major_axis: f64,
        semi_minor_axis: f64,
        longitude_origin_deg: f64,
    ) -> Self {
        Self {
            h: perspective_point_height + semi_major_axis,
            perspective_point_height,
            req: semi_major_axis,
            rpol: semi_minor_axis,
            lambda_0: longitude_origin_deg.to_radians(),
        }
    }

    pub fn from_imager(imager: &ImagerProjection) -> Self {
        Self::new(
            imager.perspective_point_height,
            imager.semi_major_axis,
            imager.semi_minor_axis,
            imager.longitude_of_projection_origin,
        )
    }

    /// Scan angles (radians) to (lon, lat) degrees. Based on PUG Vol. 4,
    /// section 4.2.8. `None` when the line of sight misses the Earth.
    pub fn scan_to_geo(&self, x_rad: f64, y_rad: f64) -> Option<(f64, f64)> {
        let sin_x = x_rad.sin();
        let cos_x = x_rad.cos();
        let sin_y = y_rad.sin();
        let cos_y = y_rad.cos();

        let a = sin_x.powi(2)
            + cos_x.powi(2) * (cos_y.powi(2) + (self.req / self.rpol).powi(2) * sin_y.powi(2));
        let b = -2.0 * self.h * cos_x * cos_y;
        let c = self.h.powi(2) - self.req.powi(2);

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let rs = (-b - discriminant.sqrt()) / (2.0 * a);

        let sx = rs * cos_x * cos_y;
        let sy = -rs * sin_x;
        let sz = rs * cos_x * sin_y;

        let lat = ((self.req / self.rpol).powi(2) * sz / (self.h - sx).hypot(sy)).atan();
        let lon = self.lambda_0 - sy.atan2(self.h - sx);

        Some((lon.to_degrees(), lat.to_degrees()))
    }

    /// (lon, lat) degrees to scan angles (radians). `None` beyond the limb.
    pub fn geo_to_scan(&self, lon_deg: f64, lat_deg: f64) -> Option<(f64, f64)> {
        let lat_rad = lat_deg.to_radians();
        let lon_rad = lon_deg.to_radians();

        let dlon = lon_rad - self.lambda_0;

        // Geocentric latitude and radius on the ellipsoid.
        let phi_c = ((self.rpol / self.req).powi(2) * lat_rad.tan()).atan();
        let e2 = 1.0 - (self.rpol / self.req).powi(2);
        let rc = self.rpol / (1.0 - e2 * phi_c.cos().powi(2)).sqrt();

        let sx = self.h - rc * phi_c.cos() * dlon.cos();
        let sy = -rc * phi_c.cos() * dlon.sin();
        let sz = rc * phi_c.sin();

        // Point must face the satellite.
        if self.h * (self.h - sx) < sy * sy + (self.req / self.rpol).powi(2) * sz * sz {
            return None;
        }

        let y_rad = (sz / sx).atan();
        let x_rad = (-sy / (sx * sx + sy * sy + sz * sz).sqrt()).asin();
        Some((x_rad, y_rad))
    }
}

impl MapProjection for Geostationary {
    fn to_geodetic(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        self.scan_to_geo(
            x / self.perspective_point_height,
            y / self.perspective_point_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goes_east() -> Geostationary {
        Geostationary::from_imager(&ImagerProjection::default())
    }

    #[test]
    fn test_nadir_maps_to_sub_satellite_point() {
        let (lon, lat) = goes_east().scan_to_geo(0.0, 0.0).unwrap();
        assert!((lon + 75.0).abs() < 1e-9, "lon {lon}");
        assert!(lat.abs() < 1e-9, "lat {lat}");
    }

    #[test]
    fn test_scan_roundtrip() {
        let proj = goes_east();
        for &(lon, lat) in &[(-80.0, 25.0), (-60.5, -10.0), (-95.0, 40.0)] {
            let (x, y) = proj.geo_to_scan(lon, lat).unwrap();
            let (lon2, lat2) = proj.scan_to_geo(x, y).unwrap();
            assert!((lon - lon2).abs() < 1e-6, "{lon} vs {lon2}");
            assert!((lat - lat2).abs() < 1e-6, "{lat} vs {lat2}");
        }
    }

    #[test]
    fn test_off_earth() {
        assert!(goes_east().scan_to_geo(0.2, 0.2).is_none());
    }

    #[test]
    fn test_far_side_not_visible() {
        assert!(goes_east().geo_to_scan(105.0, 0.0).is_none());
    }
}
