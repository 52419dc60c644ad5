//! Fundamental geographic and screen-space types.

use serde::{Deserialize, Serialize};

/// Geographic coordinate on the reference ellipsoid, in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoCoord {
    /// Longitude in degrees, -180..180.
    pub longitude: f64,
    /// Latitude in degrees, -90..90.
    pub latitude: f64,
}

impl GeoCoord {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// Screen-space pointer position in pixels (origin top-left, y down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned geographic rectangle in degrees.
///
/// Always normalized: `west <= east` and `south <= north`, also when
/// deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBounds")]
pub struct GeoRectangle {
    west: f64,
    south: f64,
    east: f64,
    north: f64,
}

/// Bounds as they arrive on the wire, possibly swapped.
#[derive(Deserialize)]
struct RawBounds {
    west: f64,
    south: f64,
    east: f64,
    north: f64,
}

impl From<RawBounds> for GeoRectangle {
    fn from(raw: RawBounds) -> Self {
        Self::from_bounds(raw.west, raw.south, raw.east, raw.north)
    }
}

impl GeoRectangle {
    /// Build a rectangle from two opposite corners given in any order.
    pub fn from_corners(a: GeoCoord, b: GeoCoord) -> Self {
        Self {
            west: a.longitude.min(b.longitude),
            south: a.latitude.min(b.latitude),
            east: a.longitude.max(b.longitude),
            north: a.latitude.max(b.latitude),
        }
    }

    /// Build a rectangle from explicit bounds, normalizing swapped edges.
    pub fn from_bounds(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self::from_corners(GeoCoord::new(west, south), GeoCoord::new(east, north))
    }

    pub fn west(&self) -> f64 {
        self.west
    }

    pub fn south(&self) -> f64 {
        self.south
    }

    pub fn east(&self) -> f64 {
        self.east
    }

    pub fn north(&self) -> f64 {
        self.north
    }

    /// Longitude span in degrees.
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Latitude span in degrees.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// True when the rectangle has zero width or zero height.
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    /// Inclusive containment test.
    pub fn contains(&self, coord: &GeoCoord) -> bool {
        coord.longitude >= self.west
            && coord.longitude <= self.east
            && coord.latitude >= self.south
            && coord.latitude <= self.north
    }
}

/// A grid point after terrain sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampledPoint {
    pub longitude: f64,
    pub latitude: f64,
    /// Ellipsoid height in meters; `None` when no terrain source resolved it.
    pub height: Option<f64>,
}

impl SampledPoint {
    pub fn new(coord: GeoCoord, height: Option<f64>) -> Self {
        Self {
            longitude: coord.longitude,
            latitude: coord.latitude,
            height,
        }
    }

    pub fn coord(&self) -> GeoCoord {
        GeoCoord::new(self.longitude, self.latitude)
    }
}
