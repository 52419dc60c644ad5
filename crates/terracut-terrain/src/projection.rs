//! Globe camera: converts screen points to geographic coordinates.
//!
//! Casts a ray from a pinhole camera through the pixel and intersects the
//! WGS84 ellipsoid. The camera hovers above a geodetic point and looks
//! straight down the ellipsoid normal, screen x = East, screen y = South.

use glam::DVec3;

use terracut_core::constants::{WGS84_SEMI_MAJOR_AXIS, WGS84_SEMI_MINOR_AXIS};
use terracut_core::types::{GeoCoord, ScreenPoint};
use terracut_core::ScreenProjection;

/// Reference ellipsoid radii along x, y (equatorial) and z (polar).
const RADII: DVec3 = DVec3::new(
    WGS84_SEMI_MAJOR_AXIS,
    WGS84_SEMI_MAJOR_AXIS,
    WGS84_SEMI_MINOR_AXIS,
);

/// First eccentricity squared.
fn eccentricity_sq() -> f64 {
    1.0 - (WGS84_SEMI_MINOR_AXIS * WGS84_SEMI_MINOR_AXIS)
        / (WGS84_SEMI_MAJOR_AXIS * WGS84_SEMI_MAJOR_AXIS)
}

/// Geodetic lat/lon (degrees) + height (meters) to Earth-centered Cartesian.
pub fn geodetic_to_ecef(lat: f64, lon: f64, height: f64) -> DVec3 {
    let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
    let (sin_lon, cos_lon) = lon.to_radians().sin_cos();
    let e2 = eccentricity_sq();
    let n = WGS84_SEMI_MAJOR_AXIS / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    DVec3::new(
        (n + height) * cos_lat * cos_lon,
        (n + height) * cos_lat * sin_lon,
        (n * (1.0 - e2) + height) * sin_lat,
    )
}

/// Geodetic lat/lon of a point lying on the ellipsoid surface.
fn surface_to_geodetic(p: DVec3) -> GeoCoord {
    let lon = p.y.atan2(p.x);
    let lat = p.z.atan2((1.0 - eccentricity_sq()) * (p.x * p.x + p.y * p.y).sqrt());
    GeoCoord::new(lon.to_degrees(), lat.to_degrees())
}

/// Nearest forward intersection of a ray with the reference ellipsoid.
fn intersect_ellipsoid(origin: DVec3, direction: DVec3) -> Option<DVec3> {
    // Scale space so the ellipsoid becomes the unit sphere
    let o = origin / RADII;
    let d = direction / RADII;

    let a = d.dot(d);
    let b = 2.0 * o.dot(d);
    let c = o.dot(o) - 1.0;
    if c < 0.0 {
        return None; // origin inside the ellipsoid
    }

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }

    let t = (-b - disc.sqrt()) / (2.0 * a);
    if t < 0.0 {
        return None;
    }
    Some(origin + direction * t)
}

/// Pinhole camera looking down at the globe.
#[derive(Debug, Clone)]
pub struct GlobeCamera {
    position: DVec3,
    forward: DVec3,
    right: DVec3,
    up: DVec3,
    viewport_width: f64,
    viewport_height: f64,
    tan_half_fov: f64,
}

impl GlobeCamera {
    /// Camera `altitude` meters above (lon, lat), vertical field of view in degrees.
    pub fn looking_down(
        longitude: f64,
        latitude: f64,
        altitude: f64,
        viewport_width: f64,
        viewport_height: f64,
        fov_y_degrees: f64,
    ) -> Self {
        let (sin_lat, cos_lat) = latitude.to_radians().sin_cos();
        let (sin_lon, cos_lon) = longitude.to_radians().sin_cos();

        let normal = DVec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);
        let east = DVec3::new(-sin_lon, cos_lon, 0.0);
        let north = DVec3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);

        Self {
            position: geodetic_to_ecef(latitude, longitude, altitude),
            forward: -normal,
            right: east,
            up: north,
            viewport_width,
            viewport_height,
            tan_half_fov: (fov_y_degrees.to_radians() / 2.0).tan(),
        }
    }

    /// Unit ray direction through a screen point.
    fn ray_direction(&self, point: ScreenPoint) -> DVec3 {
        let aspect = self.viewport_width / self.viewport_height;
        let ndc_x = 2.0 * point.x / self.viewport_width - 1.0;
        let ndc_y = 1.0 - 2.0 * point.y / self.viewport_height;

        (self.forward
            + self.right * (ndc_x * self.tan_half_fov * aspect)
            + self.up * (ndc_y * self.tan_half_fov))
            .normalize()
    }
}

impl ScreenProjection for GlobeCamera {
    fn screen_to_geo(&self, point: ScreenPoint) -> Option<GeoCoord> {
        let hit = intersect_ellipsoid(self.position, self.ray_direction(point))?;
        Some(surface_to_geodetic(hit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> GlobeCamera {
        GlobeCamera::looking_down(56.2, 26.5, 50_000.0, 800.0, 600.0, 60.0)
    }

    #[test]
    fn test_center_pixel_hits_nadir() {
        let cam = camera();
        let geo = cam.screen_to_geo(ScreenPoint::new(400.0, 300.0)).unwrap();
        assert!((geo.longitude - 56.2).abs() < 1e-6, "lon: {}", geo.longitude);
        assert!((geo.latitude - 26.5).abs() < 1e-6, "lat: {}", geo.latitude);
    }

    #[test]
    fn test_screen_axes_follow_east_and_south() {
        let cam = camera();
        let center = cam.screen_to_geo(ScreenPoint::new(400.0, 300.0)).unwrap();
        let right = cam.screen_to_geo(ScreenPoint::new(700.0, 300.0)).unwrap();
        let below = cam.screen_to_geo(ScreenPoint::new(400.0, 550.0)).unwrap();

        assert!(right.longitude > center.longitude, "right of center is east");
        assert!(below.latitude < center.latitude, "below center is south");
    }

    #[test]
    fn test_pixel_off_globe_returns_none() {
        // Far away with a wide lens: the corners see empty space
        let cam = GlobeCamera::looking_down(0.0, 0.0, 100_000_000.0, 800.0, 600.0, 90.0);
        assert!(cam.screen_to_geo(ScreenPoint::new(0.0, 0.0)).is_none());
        assert!(cam.screen_to_geo(ScreenPoint::new(400.0, 300.0)).is_some());
    }

    #[test]
    fn test_geodetic_to_ecef_equator() {
        let p = geodetic_to_ecef(0.0, 0.0, 0.0);
        assert!((p.x - WGS84_SEMI_MAJOR_AXIS).abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
        assert!(p.z.abs() < 1e-6);

        let pole = geodetic_to_ecef(90.0, 0.0, 0.0);
        assert!((pole.z - WGS84_SEMI_MINOR_AXIS).abs() < 1e-6);
    }

    #[test]
    fn test_surface_roundtrip() {
        let p = geodetic_to_ecef(-33.9, 151.2, 0.0);
        let geo = surface_to_geodetic(p);
        assert!((geo.latitude + 33.9).abs() < 1e-9);
        assert!((geo.longitude - 151.2).abs() < 1e-9);
    }
}
