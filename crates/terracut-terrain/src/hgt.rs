//! NASADEM / SRTM HGT tile parser.
//!
//! HGT files are flat arrays of big-endian i16 elevation values
//! covering 1° × 1° tiles. The filename encodes the SW corner
//! coordinates (e.g., N25E056.hgt).

use std::path::Path;

use tracing::debug;

use terracut_core::{Error, Result};

use crate::heightmap::{Heightmap, HeightmapHeader};

/// Void value in HGT files (no data).
const HGT_VOID: i16 = -32768;

/// Parse an HGT filename to extract the SW corner coordinates.
/// Format: `N25E056.hgt` or `S10W045.hgt`
pub fn parse_hgt_filename(filename: &str) -> Option<(f64, f64)> {
    let name = filename
        .strip_suffix(".hgt")
        .or_else(|| filename.strip_suffix(".HGT"))?;

    if name.len() < 7 || !name.is_ascii() {
        return None;
    }

    let lat_sign = match &name[0..1] {
        "N" | "n" => 1.0,
        "S" | "s" => -1.0,
        _ => return None,
    };
    let lat: f64 = name[1..3].parse().ok()?;

    let lon_sign = match &name[3..4] {
        "E" | "e" => 1.0,
        "W" | "w" => -1.0,
        _ => return None,
    };
    let lon: f64 = name[4..7].parse().ok()?;

    Some((lat * lat_sign, lon * lon_sign))
}

/// Determine the grid size from the file size.
/// 1 arc-second: 3601 × 3601 = 25,934,402 bytes
/// 3 arc-second: 1201 × 1201 = 2,884,802 bytes
fn grid_size_from_byte_count(byte_count: usize) -> Option<(u32, f64)> {
    match byte_count {
        25_934_402 => Some((3601, 1.0)),
        2_884_802 => Some((1201, 3.0)),
        _ => None,
    }
}

/// Parse raw HGT bytes into elevation values, grid side and cell size.
pub fn parse_hgt_bytes(data: &[u8]) -> Result<(Vec<i16>, u32, f64)> {
    let (grid_side, cell_size) = grid_size_from_byte_count(data.len()).ok_or_else(|| {
        Error::terrain(format!(
            "Unexpected HGT file size: {} bytes (expected {} or {})",
            data.len(),
            3601 * 3601 * 2,
            1201 * 1201 * 2
        ))
    })?;

    let elevations = data
        .chunks_exact(2)
        .map(|pair| i16::from_be_bytes([pair[0], pair[1]]))
        .collect();

    Ok((elevations, grid_side, cell_size))
}

/// Fill void values (-32768) by averaging non-void neighbors.
pub fn fill_voids(elevations: &mut [i16], width: u32, height: u32) -> usize {
    let w = width as usize;
    let h = height as usize;

    let snapshot = elevations.to_vec();
    let mut filled = 0;
    for r in 0..h {
        for c in 0..w {
            let idx = r * w + c;
            if snapshot[idx] != HGT_VOID {
                continue;
            }

            let mut sum = 0i64;
            let mut count = 0u32;
            for dr in -1i32..=1 {
                for dc in -1i32..=1 {
                    if dr == 0 && dc == 0 {
                        continue;
                    }
                    let nr = r as i32 + dr;
                    let nc = c as i32 + dc;
                    if nr >= 0 && nr < h as i32 && nc >= 0 && nc < w as i32 {
                        let nidx = nr as usize * w + nc as usize;
                        if snapshot[nidx] != HGT_VOID {
                            sum += snapshot[nidx] as i64;
                            count += 1;
                        }
                    }
                }
            }

            elevations[idx] = if count > 0 {
                (sum / count as i64) as i16
            } else {
                0 // surrounded by voids: sea level
            };
            filled += 1;
        }
    }
    filled
}

/// Build a heightmap from raw HGT bytes and the tile's SW corner.
pub fn heightmap_from_hgt(data: &[u8], origin_lat: f64, origin_lon: f64) -> Result<Heightmap> {
    let (mut elevations, grid_side, cell_size) = parse_hgt_bytes(data)?;

    let filled = fill_voids(&mut elevations, grid_side, grid_side);
    if filled > 0 {
        debug!(filled, "Filled HGT voids");
    }

    let min_elevation = elevations.iter().copied().min().unwrap_or(0);
    let max_elevation = elevations.iter().copied().max().unwrap_or(0);

    let header = HeightmapHeader {
        origin_lat,
        origin_lon,
        cell_size,
        width: grid_side,
        height: grid_side,
        min_elevation,
        max_elevation,
    };

    Heightmap::new(header, elevations)
}

/// Load a single HGT file.
pub fn load_hgt(path: &Path) -> Result<Heightmap> {
    let filename = path
        .file_name()
        .and_then(|f| f.to_str())
        .ok_or_else(|| Error::terrain(format!("Invalid HGT filename: {}", path.display())))?;

    let (origin_lat, origin_lon) = parse_hgt_filename(filename).ok_or_else(|| {
        Error::terrain(format!(
            "Cannot parse HGT coordinates from filename: {filename}"
        ))
    })?;

    let data = std::fs::read(path)?;
    heightmap_from_hgt(&data, origin_lat, origin_lon)
}
