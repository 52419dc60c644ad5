//! Heightmap tile with geographic elevation queries.

use terracut_core::types::GeoCoord;
use terracut_core::{Error, Result};

/// Tolerance (in cells) for coordinates computed onto a tile edge.
const EDGE_EPSILON: f64 = 1e-6;

/// Heightmap tile header metadata.
#[derive(Debug, Clone)]
pub struct HeightmapHeader {
    /// Southwest corner latitude (degrees).
    pub origin_lat: f64,
    /// Southwest corner longitude (degrees).
    pub origin_lon: f64,
    /// Arc-seconds between adjacent samples.
    pub cell_size: f64,
    /// Number of samples per row (west to east).
    pub width: u32,
    /// Number of rows (north to south).
    pub height: u32,
    /// Minimum elevation in the tile (meters).
    pub min_elevation: i16,
    /// Maximum elevation in the tile (meters).
    pub max_elevation: i16,
}

impl HeightmapHeader {
    /// Sample spacing in degrees.
    pub fn spacing_deg(&self) -> f64 {
        self.cell_size / 3600.0
    }

    /// North edge latitude (degrees). Samples sit on the edges.
    pub fn north_lat(&self) -> f64 {
        self.origin_lat + (self.height.saturating_sub(1)) as f64 * self.spacing_deg()
    }

    /// East edge longitude (degrees).
    pub fn east_lon(&self) -> f64 {
        self.origin_lon + (self.width.saturating_sub(1)) as f64 * self.spacing_deg()
    }
}

/// Loaded elevation tile.
#[derive(Debug, Clone)]
pub struct Heightmap {
    header: HeightmapHeader,
    /// Elevation values in meters, row-major (north-to-south, west-to-east).
    elevations: Vec<i16>,
}

impl Heightmap {
    /// Fails unless `elevations` holds exactly `width * height` samples.
    pub fn new(header: HeightmapHeader, elevations: Vec<i16>) -> Result<Self> {
        let expected = header.width as usize * header.height as usize;
        if elevations.len() != expected {
            return Err(Error::terrain(format!(
                "heightmap {}x{} needs {expected} samples, got {}",
                header.width,
                header.height,
                elevations.len()
            )));
        }
        Ok(Self { header, elevations })
    }

    pub fn header(&self) -> &HeightmapHeader {
        &self.header
    }

    /// True if the coordinate falls inside the tile (edges included).
    pub fn covers(&self, coord: &GeoCoord) -> bool {
        self.geo_to_grid(coord.latitude, coord.longitude).is_some()
    }

    /// Convert lat/lon to grid row/col (fractional).
    fn geo_to_grid(&self, lat: f64, lon: f64) -> Option<(f64, f64)> {
        let h = &self.header;
        if h.width == 0 || h.height == 0 {
            return None;
        }

        // Column: west-to-east
        let col = (lon - h.origin_lon) / h.spacing_deg();
        // Row: north-to-south (row 0 = north edge)
        let row = (h.north_lat() - lat) / h.spacing_deg();

        let max_col = (h.width - 1) as f64;
        let max_row = (h.height - 1) as f64;
        if !col.is_finite()
            || !row.is_finite()
            || col < -EDGE_EPSILON
            || row < -EDGE_EPSILON
            || col > max_col + EDGE_EPSILON
            || row > max_row + EDGE_EPSILON
        {
            return None;
        }

        Some((row.clamp(0.0, max_row), col.clamp(0.0, max_col)))
    }

    /// Get raw elevation at integer grid coordinates.
    fn raw_elevation(&self, row: usize, col: usize) -> i16 {
        let h = &self.header;
        if row >= h.height as usize || col >= h.width as usize {
            return 0;
        }
        self.elevations[row * h.width as usize + col]
    }

    /// Elevation at a geographic coordinate with bilinear interpolation.
    /// Returns None outside the tile.
    pub fn elevation_at(&self, coord: &GeoCoord) -> Option<f64> {
        let (row, col) = self.geo_to_grid(coord.latitude, coord.longitude)?;
        Some(self.bilinear(row, col))
    }

    /// Bilinear interpolation at fractional row/col.
    fn bilinear(&self, row: f64, col: f64) -> f64 {
        let r0 = row.floor() as usize;
        let c0 = col.floor() as usize;
        let r1 = (r0 + 1).min(self.header.height as usize - 1);
        let c1 = (c0 + 1).min(self.header.width as usize - 1);

        let fr = row - r0 as f64;
        let fc = col - c0 as f64;

        let e00 = self.raw_elevation(r0, c0) as f64;
        let e01 = self.raw_elevation(r0, c1) as f64;
        let e10 = self.raw_elevation(r1, c0) as f64;
        let e11 = self.raw_elevation(r1, c1) as f64;

        let top = e00 * (1.0 - fc) + e01 * fc;
        let bot = e10 * (1.0 - fc) + e11 * fc;
        top * (1.0 - fr) + bot * fr
    }
}
